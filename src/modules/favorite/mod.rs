use axum::Router;
use axum::routing::get;
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/", get(handler::list_favorites))
        .route(
            "/{car_id}",
            get(handler::favorite_status)
                .post(handler::add_favorite)
                .delete(handler::remove_favorite),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
