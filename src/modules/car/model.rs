use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A listing. `avg_rating` is derived from the car's reviews and is only
/// ever written by the rating recompute, never by car endpoints.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, ToSchema)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub car_type: String,
    pub year: i32,
    pub mileage: f64,
    pub transmission: String,
    pub engine_volume: f64,
    pub price: f64,
    pub is_new: bool,
    pub avg_rating: f64,
    pub image_url: String,
}
