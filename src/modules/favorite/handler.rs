use super::dto::FavoriteStatus;
use super::model::{Favorite, FavoriteCar};
use super::service::FavoriteService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// The caller's favorite cars, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favorite cars", body = ApiResponse<Vec<FavoriteCar>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match FavoriteService::list(&state.db, user.id).await {
        Ok(favorites) => ApiSuccess::ok(favorites, "Favorites retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a car to favorites
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{car_id}",
    params(("car_id" = i64, Path, description = "Car id")),
    responses(
        (status = 201, description = "Added", body = ApiResponse<Favorite>),
        (status = 400, description = "Already in favorites"),
        (status = 404, description = "Car not found")
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(car_id): Path<i64>,
) -> impl IntoResponse {
    match FavoriteService::add(&state.db, user.id, car_id).await {
        Ok(favorite) => ApiSuccess::created(favorite, "Car added to favorites").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Remove a car from favorites
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{car_id}",
    params(("car_id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Removed"),
        (status = 404, description = "Not in favorites")
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(car_id): Path<i64>,
) -> impl IntoResponse {
    match FavoriteService::remove(&state.db, user.id, car_id).await {
        Ok(()) => ApiSuccess(ApiResponse::message("Car removed from favorites"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Whether a car is in the caller's favorites
#[utoipa::path(
    get,
    path = "/api/v1/favorites/{car_id}",
    params(("car_id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Favorite flag", body = ApiResponse<FavoriteStatus>)
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn favorite_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(car_id): Path<i64>,
) -> impl IntoResponse {
    match FavoriteService::status(&state.db, user.id, car_id).await {
        Ok(status) => ApiSuccess::ok(status, "Favorite status retrieved").into_response(),
        Err(e) => e.into_response(),
    }
}
