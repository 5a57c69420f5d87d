use super::dto::{CreateReviewRequest, RatingStats, TopRatedQuery, UpdateReviewRequest};
use super::model::Review;
use super::service::ReviewService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::middleware::auth::CurrentUser;
use crate::modules::car::model::Car;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Post a review for a car
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<Review>),
        (status = 400, description = "Invalid review"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Car not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateReviewRequest>,
) -> impl IntoResponse {
    match ReviewService::create(&state.db, &user, payload).await {
        Ok(review) => ApiSuccess::created(review, "Review created successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Edit a review
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 400, description = "Invalid review"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReviewRequest>,
) -> impl IntoResponse {
    match ReviewService::update(&state.db, &user, id, payload).await {
        Ok(review) => ApiSuccess::ok(review, "Review updated successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ReviewService::delete(&state.db, &user, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a review by id
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = ApiResponse<Review>),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews"
)]
pub async fn get_review(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match ReviewService::find_by_id(&state.db, id).await {
        Ok(review) => ApiSuccess::ok(review, "Review retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Reviews of one car, newest first
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}/reviews",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Reviews of the car", body = ApiResponse<Vec<Review>>)
    ),
    tag = "Reviews"
)]
pub async fn list_car_reviews(State(state): State<AppState>, Path(car_id): Path<i64>) -> impl IntoResponse {
    match ReviewService::list_for_car(&state.db, car_id).await {
        Ok(reviews) => ApiSuccess::ok(reviews, "Reviews retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rating distribution of one car
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}/rating-stats",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Average and per-star counts", body = ApiResponse<RatingStats>)
    ),
    tag = "Reviews"
)]
pub async fn rating_stats(State(state): State<AppState>, Path(car_id): Path<i64>) -> impl IntoResponse {
    match ReviewService::rating_stats(&state.db, car_id).await {
        Ok(stats) => ApiSuccess::ok(stats, "Rating stats retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Best rated cars
#[utoipa::path(
    get,
    path = "/api/v1/reviews/top-rated-cars",
    params(TopRatedQuery),
    responses(
        (status = 200, description = "Cars by average rating, best first", body = ApiResponse<Vec<Car>>)
    ),
    tag = "Reviews"
)]
pub async fn top_rated_cars(State(state): State<AppState>, Query(query): Query<TopRatedQuery>) -> impl IntoResponse {
    match ReviewService::top_rated(&state.db, query.limit()).await {
        Ok(cars) => ApiSuccess::ok(cars, "Top rated cars retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}
