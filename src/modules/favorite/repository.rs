use super::model::{Favorite, FavoriteCar};
use sqlx::PgExecutor;

pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Returns `None` when the pair already exists. The unique constraint
    /// decides, so two racing requests cannot both insert.
    pub async fn insert<'e, E>(executor: E, user_id: i64, car_id: i64) -> Result<Option<Favorite>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, car_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, car_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn delete<'e, E>(executor: E, user_id: i64, car_id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND car_id = $2")
            .bind(user_id)
            .bind(car_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists<'e, E>(executor: E, user_id: i64, car_id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND car_id = $2)",
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_one(executor)
        .await
    }

    pub async fn list_by_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<FavoriteCar>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, FavoriteCar>(
            r#"
            SELECT c.*, f.created_at AS favorited_at
            FROM favorites f
            JOIN cars c ON c.id = f.car_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }
}
