//! Average rating bookkeeping.
//!
//! A car's `avg_rating` is a cache of the mean over its stored reviews. It
//! is always rebuilt from the full review set inside the transaction that
//! changed the set, with the car row locked, so two writers on one car
//! queue up while writers on other cars never touch the same lock.

use super::model::{MAX_RATING, MIN_RATING};
use super::repository::ReviewRepository;
use crate::modules::car::repository::CarRepository;
use sqlx::PgConnection;
use tracing::debug;

const STAR_LEVELS: usize = (MAX_RATING - MIN_RATING + 1) as usize;

/// How many reviews a car has at each star level.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RatingDistribution {
    counts: [i64; STAR_LEVELS],
}

impl RatingDistribution {
    /// Rows outside the 1..=5 scale are ignored; the schema rejects them anyway.
    pub fn from_counts<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, i64)>,
    {
        let mut distribution = Self::default();
        for (rating, count) in rows {
            if let Some(slot) = Self::slot(rating) {
                distribution.counts[slot] += count;
            }
        }
        distribution
    }

    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self::from_counts(ratings.into_iter().map(|r| (r, 1)))
    }

    fn slot(rating: i32) -> Option<usize> {
        (MIN_RATING..=MAX_RATING)
            .contains(&rating)
            .then(|| (rating - MIN_RATING) as usize)
    }

    pub fn count(&self, rating: i32) -> i64 {
        Self::slot(rating).map_or(0, |slot| self.counts[slot])
    }

    pub fn total(&self) -> i64 {
        self.counts.iter().sum()
    }

    /// Mean star value, or 0 for a car nobody has reviewed.
    pub fn average(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: i64 = (MIN_RATING..=MAX_RATING)
            .map(|rating| i64::from(rating) * self.count(rating))
            .sum();
        sum as f64 / total as f64
    }
}

/// Reads the car's current distribution through `conn`.
pub async fn distribution(conn: &mut PgConnection, car_id: i64) -> Result<RatingDistribution, sqlx::Error> {
    let rows = ReviewRepository::rating_counts(&mut *conn, car_id).await?;
    Ok(RatingDistribution::from_counts(rows))
}

/// Rebuilds and stores `avg_rating` for one car. Must run inside the
/// transaction that changed the car's reviews, after the car lock is held.
pub async fn recompute(conn: &mut PgConnection, car_id: i64) -> Result<f64, sqlx::Error> {
    let avg_rating = distribution(&mut *conn, car_id).await?.average();
    CarRepository::set_avg_rating(&mut *conn, car_id, avg_rating).await?;
    debug!(car_id, avg_rating, "Recomputed average rating");
    Ok(avg_rating)
}
