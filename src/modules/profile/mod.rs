use axum::Router;
use axum::routing::{get, put};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/me", get(handler::my_profile))
        .route("/id/{id}", get(handler::profile_by_id))
        .route("/email/{email}", get(handler::profile_by_email))
        .route("/name/{name}", get(handler::profile_by_name))
        .route("/name", put(handler::update_name))
        .route("/password", put(handler::update_password))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
