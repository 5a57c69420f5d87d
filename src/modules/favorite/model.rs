use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::modules::car::model::Car;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

/// A favorite joined with the car it points at.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct FavoriteCar {
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub favorited_at: OffsetDateTime,
    #[sqlx(flatten)]
    pub car: Car,
}
