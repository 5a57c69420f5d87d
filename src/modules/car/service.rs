use super::dto::{CreateCarRequest, UpdateCarRequest};
use super::model::Car;
use super::repository::CarRepository;
use crate::common::error::AppError;
use sqlx::PgPool;
use tracing::info;

pub struct CarService;

impl CarService {
    pub async fn create(db: &PgPool, req: CreateCarRequest) -> Result<Car, AppError> {
        req.check()?;
        let car = CarRepository::create(db, &req).await?;
        info!(car_id = car.id, brand = %car.brand, model = %car.model, "Car created");
        Ok(car)
    }

    pub async fn list(db: &PgPool) -> Result<Vec<Car>, AppError> {
        Ok(CarRepository::list(db).await?)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Car, AppError> {
        CarRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found("Car"))
    }

    pub async fn update(db: &PgPool, id: i64, req: UpdateCarRequest) -> Result<Car, AppError> {
        req.check()?;
        let car = CarRepository::update(db, id, &req)
            .await?
            .ok_or_else(|| AppError::not_found("Car"))?;
        info!(car_id = car.id, "Car updated");
        Ok(car)
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        if !CarRepository::delete(db, id).await? {
            return Err(AppError::not_found("Car"));
        }
        info!(car_id = id, "Car deleted");
        Ok(())
    }
}
