//! Reviews and the average rating they drive.

use axum::Router;
use axum::routing::{get, post, put};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod rating;
pub mod repository;
pub mod service;

/// Mounted at the API root: it serves both `/reviews/...` and the per-car
/// `/cars/{id}/...` read endpoints.
pub fn router(state: AppState) -> axum::Router<AppState> {
    let public_routes = Router::new()
        .route("/reviews/top-rated-cars", get(handler::top_rated_cars))
        .route("/reviews/{id}", get(handler::get_review))
        .route("/cars/{id}/reviews", get(handler::list_car_reviews))
        .route("/cars/{id}/rating-stats", get(handler::rating_stats));

    let protected_routes = Router::new()
        .route("/reviews", post(handler::create_review))
        .route("/reviews/{id}", put(handler::update_review).delete(handler::delete_review))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    public_routes.merge(protected_routes)
}
