use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::rating::RatingDistribution;

pub const DEFAULT_TOP_RATED_LIMIT: i64 = 10;

/// The author is always the caller; it is never read from the body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub car_id: i64,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RatingStats {
    pub avg_rating: f64,
    pub total_reviews: i64,
    pub rating_1_count: i64,
    pub rating_2_count: i64,
    pub rating_3_count: i64,
    pub rating_4_count: i64,
    pub rating_5_count: i64,
}

impl From<&RatingDistribution> for RatingStats {
    fn from(d: &RatingDistribution) -> Self {
        Self {
            avg_rating: d.average(),
            total_reviews: d.total(),
            rating_1_count: d.count(1),
            rating_2_count: d.count(2),
            rating_3_count: d.count(3),
            rating_4_count: d.count(4),
            rating_5_count: d.count(5),
        }
    }
}

/// `limit` stays a string so a non-numeric value falls back to the default
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopRatedQuery {
    /// Number of cars to return, 10 when missing or not a positive integer.
    pub limit: Option<String>,
}

impl TopRatedQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_TOP_RATED_LIMIT)
    }
}
