use super::dto::{AuthResponse, LoginRequest, RegisterRequest};
use super::service::AuthService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::middleware::auth::CurrentUser;
use crate::modules::user::model::UserResponse;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Json,
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation failed or email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    match AuthService::register(&state, payload).await {
        Ok(res) => ApiSuccess::created(res, "User registered successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Login and receive a session token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account is blocked")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login(&state, payload).await {
        Ok(res) => ApiSuccess::ok(res, "Login successful").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Current user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match AuthService::me(&state, user.id).await {
        Ok(res) => ApiSuccess::ok(res, "User retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}
