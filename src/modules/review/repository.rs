use super::model::{Review, ReviewDraft};
use sqlx::PgExecutor;

pub struct ReviewRepository;

impl ReviewRepository {
    pub async fn insert<'e, E>(executor: E, draft: &ReviewDraft) -> Result<Review, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (car_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(draft.car_id)
        .bind(draft.user_id)
        .bind(draft.rating)
        .bind(&draft.comment)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        rating: i32,
        comment: &str,
    ) -> Result<Option<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = $1, comment = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(rating)
        .bind(comment)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_car<'e, E>(executor: E, car_id: i64) -> Result<Vec<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE car_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(car_id)
        .fetch_all(executor)
        .await
    }

    pub async fn list_by_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// `(rating, count)` for every star value the car has received.
    pub async fn rating_counts<'e, E>(executor: E, car_id: i64) -> Result<Vec<(i32, i64)>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, (i32, i64)>(
            "SELECT rating, COUNT(*) FROM reviews WHERE car_id = $1 GROUP BY rating",
        )
        .bind(car_id)
        .fetch_all(executor)
        .await
    }

    /// Cars a user has reviewed, ascending so callers can lock them in order.
    pub async fn car_ids_reviewed_by<'e, E>(executor: E, user_id: i64) -> Result<Vec<i64>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT car_id FROM reviews WHERE user_id = $1 ORDER BY car_id ASC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }
}
