use super::dto::{CreateCarRequest, UpdateCarRequest};
use super::model::Car;
use sqlx::PgExecutor;

pub struct CarRepository;

impl CarRepository {
    pub async fn create<'e, E>(executor: E, req: &CreateCarRequest) -> Result<Car, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (brand, model, car_type, year, mileage, transmission, engine_volume, price, is_new, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&req.brand)
        .bind(&req.model)
        .bind(&req.car_type)
        .bind(req.year)
        .bind(req.mileage)
        .bind(&req.transmission)
        .bind(req.engine_volume)
        .bind(req.price)
        .bind(req.is_new)
        .bind(&req.image_url)
        .fetch_one(executor)
        .await
    }

    pub async fn list<'e, E>(executor: E) -> Result<Vec<Car>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY id ASC")
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Car>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn update<'e, E>(executor: E, id: i64, req: &UpdateCarRequest) -> Result<Option<Car>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET
                brand = COALESCE($1, brand),
                model = COALESCE($2, model),
                car_type = COALESCE($3, car_type),
                year = COALESCE($4, year),
                mileage = COALESCE($5, mileage),
                transmission = COALESCE($6, transmission),
                engine_volume = COALESCE($7, engine_volume),
                price = COALESCE($8, price),
                is_new = COALESCE($9, is_new),
                image_url = COALESCE($10, image_url)
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(req.brand.as_deref())
        .bind(req.model.as_deref())
        .bind(req.car_type.as_deref())
        .bind(req.year)
        .bind(req.mileage)
        .bind(req.transmission.as_deref())
        .bind(req.engine_volume)
        .bind(req.price)
        .bind(req.is_new)
        .bind(req.image_url.as_deref())
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Reviews and favorites go with the car through `ON DELETE CASCADE`.
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Highest average first; equal averages fall back to the lower id so
    /// pages stay stable. Rows missing a brand or model are skipped.
    pub async fn top_rated<'e, E>(executor: E, limit: i64) -> Result<Vec<Car>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE brand <> '' AND model <> ''
            ORDER BY avg_rating DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await
    }

    /// Row lock that queues every rating change for this car behind the
    /// current transaction. Returns false when the car does not exist.
    pub async fn lock_for_update<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(locked.is_some())
    }

    pub async fn set_avg_rating<'e, E>(executor: E, id: i64, avg_rating: f64) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE cars SET avg_rating = $1 WHERE id = $2")
            .bind(avg_rating)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
