use super::dto::{ProfileResponse, UpdateNameRequest, UpdatePasswordRequest};
use crate::common::error::AppError;
use crate::common::security;
use crate::modules::auth::dto::normalize_email;
use crate::modules::review::repository::ReviewRepository;
use crate::modules::user::model::{User, UserResponse};
use crate::modules::user::repository::UserRepository;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

pub struct ProfileService;

impl ProfileService {
    pub async fn by_id(db: &PgPool, id: i64) -> Result<ProfileResponse, AppError> {
        let user = UserRepository::find_by_id(db, id).await?;
        Self::profile_of(db, user).await
    }

    pub async fn by_email(db: &PgPool, email: &str) -> Result<ProfileResponse, AppError> {
        let user = UserRepository::find_by_email(db, &normalize_email(email)).await?;
        Self::profile_of(db, user).await
    }

    /// Names are not unique; the earliest account with the name wins.
    pub async fn by_name(db: &PgPool, name: &str) -> Result<ProfileResponse, AppError> {
        let user = UserRepository::find_by_name(db, name.trim()).await?;
        Self::profile_of(db, user).await
    }

    pub async fn update_name(db: &PgPool, user_id: i64, req: UpdateNameRequest) -> Result<UserResponse, AppError> {
        let req = req.normalized();
        req.validate()?;
        let user = UserRepository::update_name(db, user_id, &req.name)
            .await?
            .ok_or(AppError::UserLookupFailed)?;
        info!(user_id, "Profile name updated");
        Ok(user.into())
    }

    pub async fn update_password(db: &PgPool, user_id: i64, req: UpdatePasswordRequest) -> Result<(), AppError> {
        req.validate()?;
        let user = UserRepository::find_by_id(db, user_id)
            .await?
            .ok_or(AppError::UserLookupFailed)?;

        security::verify_password(&req.old_password, &user.password_hash)
            .map_err(|_| AppError::Validation("Old password is incorrect".to_string()))?;

        let password_hash = security::hash_password(&req.new_password)?;
        if !UserRepository::update_password_hash(db, user_id, &password_hash).await? {
            return Err(AppError::UserLookupFailed);
        }
        info!(user_id, "Password changed");
        Ok(())
    }

    async fn profile_of(db: &PgPool, user: Option<User>) -> Result<ProfileResponse, AppError> {
        let user = user.ok_or_else(|| AppError::not_found("User"))?;
        let reviews = ReviewRepository::list_by_user(db, user.id).await?;
        Ok(ProfileResponse {
            user: user.into(),
            reviews,
        })
    }
}
