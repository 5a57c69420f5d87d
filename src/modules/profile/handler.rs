use super::dto::{ProfileResponse, UpdateNameRequest, UpdatePasswordRequest};
use super::service::ProfileService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::middleware::auth::CurrentUser;
use crate::modules::user::model::UserResponse;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Own profile with reviews
#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match ProfileService::by_id(&state.db, user.id).await {
        Ok(profile) => ApiSuccess::ok(profile, "Profile retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Profile by user id
#[utoipa::path(
    get,
    path = "/api/v1/profile/id/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn profile_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match ProfileService::by_id(&state.db, id).await {
        Ok(profile) => ApiSuccess::ok(profile, "Profile retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Profile by e-mail
#[utoipa::path(
    get,
    path = "/api/v1/profile/email/{email}",
    params(("email" = String, Path, description = "E-mail address")),
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn profile_by_email(State(state): State<AppState>, Path(email): Path<String>) -> impl IntoResponse {
    match ProfileService::by_email(&state.db, &email).await {
        Ok(profile) => ApiSuccess::ok(profile, "Profile retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Profile by display name
#[utoipa::path(
    get,
    path = "/api/v1/profile/name/{name}",
    params(("name" = String, Path, description = "Display name")),
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn profile_by_name(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    match ProfileService::by_name(&state.db, &name).await {
        Ok(profile) => ApiSuccess::ok(profile, "Profile retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Change display name
#[utoipa::path(
    put,
    path = "/api/v1/profile/name",
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "Name updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn update_name(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateNameRequest>,
) -> impl IntoResponse {
    match ProfileService::update_name(&state.db, user.id, payload).await {
        Ok(updated) => ApiSuccess::ok(updated, "Name updated successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Change password
#[utoipa::path(
    put,
    path = "/api/v1/profile/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Old password is incorrect or new one is too short")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
pub async fn update_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> impl IntoResponse {
    match ProfileService::update_password(&state.db, user.id, payload).await {
        Ok(()) => ApiSuccess(ApiResponse::message("Password updated successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
