use super::dto::UpdateRoleRequest;
use crate::common::error::AppError;
use crate::modules::car::repository::CarRepository;
use crate::modules::review::rating;
use crate::modules::review::repository::ReviewRepository;
use crate::modules::user::model::{User, UserResponse, UserRole};
use crate::modules::user::repository::UserRepository;
use sqlx::PgPool;
use tracing::{info, warn};

pub struct AdminService;

impl AdminService {
    /// Everyone except super admins.
    pub async fn list_users(db: &PgPool) -> Result<Vec<UserResponse>, AppError> {
        let users = UserRepository::list_without_role(db, UserRole::SuperAdmin).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(db: &PgPool, id: i64) -> Result<UserResponse, AppError> {
        UserRepository::find_by_id(db, id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn update_role(db: &PgPool, id: i64, req: UpdateRoleRequest) -> Result<UserResponse, AppError> {
        if !req.role.is_assignable() {
            return Err(AppError::Validation(format!("Role {} cannot be assigned", req.role)));
        }
        modifiable_target(db, id).await?;

        let user = UserRepository::update_role(db, id, req.role)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        info!(user_id = id, role = %user.role, "User role changed");
        Ok(user.into())
    }

    pub async fn set_blocked(db: &PgPool, id: i64, blocked: bool) -> Result<UserResponse, AppError> {
        modifiable_target(db, id).await?;

        let user = UserRepository::set_blocked(db, id, blocked)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        info!(user_id = id, blocked, "User block status changed");
        Ok(user.into())
    }

    /// Removes the user and, through the cascade, their reviews and
    /// favorites. Every car that loses a review is locked first and has its
    /// average rebuilt before the transaction commits.
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let target = UserRepository::lock_for_delete(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        reject_super_admin(&target)?;

        // Ascending ids, so two deletes never wait on each other in a cycle.
        let car_ids = ReviewRepository::car_ids_reviewed_by(&mut *tx, id).await?;
        for car_id in &car_ids {
            CarRepository::lock_for_update(&mut *tx, *car_id).await?;
        }

        if !UserRepository::delete(&mut *tx, id).await? {
            return Err(AppError::not_found("User"));
        }
        for car_id in &car_ids {
            rating::recompute(&mut *tx, *car_id).await?;
        }
        tx.commit().await?;

        info!(user_id = id, cars_recomputed = car_ids.len(), "User deleted");
        Ok(())
    }
}

async fn modifiable_target(db: &PgPool, id: i64) -> Result<User, AppError> {
    let user = UserRepository::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    reject_super_admin(&user)?;
    Ok(user)
}

pub fn reject_super_admin(user: &User) -> Result<(), AppError> {
    if user.role.grants_all() {
        warn!(user_id = user.id, "Refused to modify a super admin");
        return Err(AppError::SuperAdminProtected);
    }
    Ok(())
}
