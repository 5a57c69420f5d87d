use super::dto::FavoriteStatus;
use super::model::{Favorite, FavoriteCar};
use super::repository::FavoriteRepository;
use crate::common::error::{is_foreign_key_violation, violated_constraint, AppError};
use sqlx::PgPool;
use tracing::info;

pub struct FavoriteService;

impl FavoriteService {
    pub async fn add(db: &PgPool, user_id: i64, car_id: i64) -> Result<Favorite, AppError> {
        let inserted = FavoriteRepository::insert(db, user_id, car_id)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    missing_reference(violated_constraint(&e))
                } else {
                    e.into()
                }
            })?;

        let favorite = inserted.ok_or_else(|| AppError::Conflict("Car is already in favorites".to_string()))?;
        info!(user_id, car_id, "Car added to favorites");
        Ok(favorite)
    }

    pub async fn remove(db: &PgPool, user_id: i64, car_id: i64) -> Result<(), AppError> {
        if !FavoriteRepository::delete(db, user_id, car_id).await? {
            return Err(AppError::not_found("Favorite"));
        }
        info!(user_id, car_id, "Car removed from favorites");
        Ok(())
    }

    pub async fn list(db: &PgPool, user_id: i64) -> Result<Vec<FavoriteCar>, AppError> {
        Ok(FavoriteRepository::list_by_user(db, user_id).await?)
    }

    pub async fn status(db: &PgPool, user_id: i64, car_id: i64) -> Result<FavoriteStatus, AppError> {
        let is_favorite = FavoriteRepository::exists(db, user_id, car_id).await?;
        Ok(FavoriteStatus { is_favorite })
    }
}

const USER_REFERENCE: &str = "fk_users_favorites";

/// Maps a foreign-key failure on `favorites` to the row that was missing.
fn missing_reference(constraint: Option<&str>) -> AppError {
    match constraint {
        Some(USER_REFERENCE) => AppError::UserLookupFailed,
        _ => AppError::not_found("Car"),
    }
}
