use super::dto::UpdateRoleRequest;
use super::service::AdminService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::user::model::UserResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// All users except super admins
#[utoipa::path(
    get,
    path = "/api/v1/superadmin/users",
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<UserResponse>>),
        (status = 403, description = "Forbidden")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match AdminService::list_users(&state.db).await {
        Ok(users) => ApiSuccess::ok(users, "Users retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// One user
#[utoipa::path(
    get,
    path = "/api/v1/superadmin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match AdminService::get_user(&state.db, id).await {
        Ok(user) => ApiSuccess::ok(user, "User retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/v1/superadmin/users/{id}/role",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = ApiResponse<UserResponse>),
        (status = 400, description = "Role cannot be assigned"),
        (status = 403, description = "Target is a super admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> impl IntoResponse {
    match AdminService::update_role(&state.db, id, payload).await {
        Ok(user) => ApiSuccess::ok(user, "User role updated successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Block a user
#[utoipa::path(
    put,
    path = "/api/v1/superadmin/users/{id}/block",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User blocked", body = ApiResponse<UserResponse>),
        (status = 403, description = "Target is a super admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn block_user(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match AdminService::set_blocked(&state.db, id, true).await {
        Ok(user) => ApiSuccess::ok(user, "User blocked successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Unblock a user
#[utoipa::path(
    put,
    path = "/api/v1/superadmin/users/{id}/unblock",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User unblocked", body = ApiResponse<UserResponse>),
        (status = 403, description = "Target is a super admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn unblock_user(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match AdminService::set_blocked(&state.db, id, false).await {
        Ok(user) => ApiSuccess::ok(user, "User unblocked successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a user together with their reviews and favorites
#[utoipa::path(
    delete,
    path = "/api/v1/superadmin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Target is a super admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Super Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match AdminService::delete_user(&state.db, id).await {
        Ok(()) => ApiSuccess(ApiResponse::message("User deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
