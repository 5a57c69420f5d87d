use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

pub const OLDEST_MODEL_YEAR: i32 = 1900;

fn default_car_type() -> String {
    "sedan".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 100, message = "brand cannot be empty"))]
    pub brand: String,
    #[validate(length(min = 1, max = 100, message = "model cannot be empty"))]
    pub model: String,
    #[serde(default = "default_car_type")]
    #[validate(length(max = 50))]
    pub car_type: String,
    pub year: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "invalid mileage"))]
    pub mileage: f64,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub transmission: String,
    #[validate(range(exclusive_min = 0.0, message = "invalid engine volume"))]
    pub engine_volume: f64,
    #[validate(range(min = 0.0, message = "invalid price"))]
    pub price: f64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub image_url: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 100, message = "brand cannot be empty"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100, message = "model cannot be empty"))]
    pub model: Option<String>,
    #[validate(length(max = 50))]
    pub car_type: Option<String>,
    pub year: Option<i32>,
    #[validate(range(min = 0.0, message = "invalid mileage"))]
    pub mileage: Option<f64>,
    #[validate(length(max = 50))]
    pub transmission: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "invalid engine volume"))]
    pub engine_volume: Option<f64>,
    #[validate(range(min = 0.0, message = "invalid price"))]
    pub price: Option<f64>,
    pub is_new: Option<bool>,
    pub image_url: Option<String>,
}

/// Next year's models are already on sale.
pub fn check_year(year: i32) -> Result<(), AppError> {
    let newest = OffsetDateTime::now_utc().year() + 1;
    if (OLDEST_MODEL_YEAR..=newest).contains(&year) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "invalid year: must be between {} and {}",
            OLDEST_MODEL_YEAR, newest
        )))
    }
}

impl CreateCarRequest {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        check_year(self.year)
    }
}

impl UpdateCarRequest {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        match self.year {
            Some(year) => check_year(year),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateCarRequest {
        serde_json::from_str(
            r#"{"brand":"Toyota","model":"Camry","year":2020,"engine_volume":2.5,"price":18000}"#,
        )
        .unwrap()
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let req = create();
        assert_eq!(req.car_type, "sedan");
        assert_eq!(req.mileage, 0.0);
        assert!(!req.is_new);
        assert!(req.check().is_ok());
    }

    #[test]
    fn rejects_bad_cars() {
        let mut req = create();
        req.brand = String::new();
        assert!(req.check().is_err());

        let mut req = create();
        req.year = 1899;
        assert!(req.check().is_err());

        let mut req = create();
        req.year = OffsetDateTime::now_utc().year() + 2;
        assert!(req.check().is_err());

        let mut req = create();
        req.engine_volume = 0.0;
        assert!(req.check().is_err());

        let mut req = create();
        req.price = -1.0;
        assert!(req.check().is_err());
    }

    #[test]
    fn next_years_model_is_accepted() {
        assert!(check_year(OffsetDateTime::now_utc().year() + 1).is_ok());
        assert!(check_year(OLDEST_MODEL_YEAR).is_ok());
    }

    #[test]
    fn update_only_checks_present_fields() {
        assert!(UpdateCarRequest::default().check().is_ok());

        let req = UpdateCarRequest { year: Some(1800), ..Default::default() };
        assert!(req.check().is_err());

        let req = UpdateCarRequest { model: Some(String::new()), ..Default::default() };
        assert!(req.check().is_err());
    }

    #[test]
    fn avg_rating_is_not_part_of_the_payload() {
        let req: CreateCarRequest = serde_json::from_str(
            r#"{"brand":"Kia","model":"Rio","year":2019,"engine_volume":1.6,"price":9000,"avg_rating":5}"#,
        )
        .unwrap();
        assert!(req.check().is_ok());
        assert!(!format!("{:?}", req).contains("avg_rating"));
    }
}
