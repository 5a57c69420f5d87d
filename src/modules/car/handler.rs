use super::dto::{CreateCarRequest, UpdateCarRequest};
use super::model::Car;
use super::service::CarService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List all cars
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    responses(
        (status = 200, description = "List of cars", body = ApiResponse<Vec<Car>>)
    ),
    tag = "Cars"
)]
pub async fn list_cars(State(state): State<AppState>) -> impl IntoResponse {
    match CarService::list(&state.db).await {
        Ok(cars) => ApiSuccess::ok(cars, "Cars retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a car by id
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car details", body = ApiResponse<Car>),
        (status = 404, description = "Car not found")
    ),
    tag = "Cars"
)]
pub async fn get_car(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match CarService::find_by_id(&state.db, id).await {
        Ok(car) => ApiSuccess::ok(car, "Car retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a car listing
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = ApiResponse<Car>),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarRequest>,
) -> impl IntoResponse {
    match CarService::create(&state.db, payload).await {
        Ok(car) => ApiSuccess::created(car, "Car created successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a car listing
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    params(("id" = i64, Path, description = "Car id")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = ApiResponse<Car>),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found")
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCarRequest>,
) -> impl IntoResponse {
    match CarService::update(&state.db, id, payload).await {
        Ok(car) => ApiSuccess::ok(car, "Car updated successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a car listing with its reviews and favorites
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found")
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn delete_car(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match CarService::delete(&state.db, id).await {
        Ok(()) => ApiSuccess(ApiResponse::message("Car deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
