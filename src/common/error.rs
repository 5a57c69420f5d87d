use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::common::response::ApiError;
use crate::modules::auth::token::TokenError;
use crate::modules::review::model::ReviewViolation;

/// Every failure a request can end in. The variant decides the status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid review: {0}")]
    InvalidReview(#[from] ReviewViolation),

    #[error("{0}")]
    Conflict(String),

    #[error("Authorization header is required")]
    MissingCredential,

    #[error("Authorization header must be a Bearer token")]
    MalformedCredential,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("User for this token no longer exists")]
    UserLookupFailed,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is blocked")]
    AccountBlocked,

    #[error("{0}")]
    Forbidden(String),

    #[error("Super admin accounts cannot be modified")]
    SuperAdminProtected,

    #[error("{0}")]
    NotFound(String),

    #[error("Review not found")]
    ReviewNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::InvalidReview(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingCredential
            | AppError::MalformedCredential
            | AppError::Token(_)
            | AppError::UserLookupFailed
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountBlocked | AppError::Forbidden(_) | AppError::SuperAdminProtected => {
                StatusCode::FORBIDDEN
            }
            AppError::NotFound(_) | AppError::ReviewNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        ApiError(message, status).into_response()
    }
}

/// True when the statement hit a unique constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// True when the statement referenced a row that does not exist.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

/// Name of the constraint the database reported, if any.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    err.as_database_error().and_then(|db| db.constraint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(AppError::Validation("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidReview(ReviewViolation::RatingOutOfRange).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Token(TokenError::Expired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::UserLookupFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountBlocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::SuperAdminProtected.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::ReviewNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let response = AppError::Internal(anyhow::anyhow!("connection refused on 10.0.0.7"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Internal server error");
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let response = AppError::ReviewNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Review not found");
        assert!(json["data"].is_null());
    }
}
