use crate::common::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::user::model::UserRole;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

/// Car management.
pub const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin];
/// User management.
pub const SUPER_ADMIN_ROLES: &[UserRole] = &[UserRole::SuperAdmin];

/// Super admins pass every check; anyone else needs a listed role.
/// A blocked identity is always denied.
pub fn authorize(identity: &CurrentUser, allowed: &[UserRole]) -> bool {
    if identity.is_blocked {
        return false;
    }
    identity.role.grants_all() || allowed.contains(&identity.role)
}

async fn require_roles(allowed: &[UserRole], req: Request, next: Next) -> Result<Response, AppError> {
    // No identity means the auth layer did not run: deny rather than pass.
    let granted = req
        .extensions()
        .get::<CurrentUser>()
        .map(|identity| (identity.id, authorize(identity, allowed)));

    match granted {
        None => Err(AppError::MissingCredential),
        Some((_, true)) => Ok(next.run(req).await),
        Some((user_id, false)) => {
            warn!(user_id, path = %req.uri().path(), "Insufficient privileges");
            Err(AppError::Forbidden("Forbidden: insufficient privileges".to_string()))
        }
    }
}

pub async fn admin_guard(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(ADMIN_ROLES, req, next).await
}

pub async fn super_admin_guard(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(SUPER_ADMIN_ROLES, req, next).await
}
