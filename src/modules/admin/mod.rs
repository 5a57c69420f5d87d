//! User management reserved for super admins.

use axum::Router;
use axum::routing::{get, put};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/users", get(handler::list_users))
        .route("/users/{id}", get(handler::get_user).delete(handler::delete_user))
        .route("/users/{id}/role", put(handler::update_role))
        .route("/users/{id}/block", put(handler::block_user))
        .route("/users/{id}/unblock", put(handler::unblock_user))
        .route_layer(middleware::from_fn(crate::middleware::role::super_admin_guard))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
