use super::dto::{normalize_email, AuthResponse, LoginRequest, RegisterRequest};
use crate::common::error::{is_unique_violation, AppError};
use crate::common::security;
use crate::config::settings::SuperAdminSeed;
use crate::modules::user::model::{User, UserResponse, UserRole};
use crate::modules::user::repository::UserRepository;
use crate::state::AppState;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

pub struct AuthService;

impl AuthService {
    pub async fn register(state: &AppState, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let req = req.normalized();
        req.validate()?;

        let role = req.role.unwrap_or(UserRole::User);
        if !role.is_assignable() {
            return Err(AppError::Validation(format!("Role {} cannot be requested at registration", role)));
        }

        if UserRepository::find_by_email(&state.db, &req.email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = security::hash_password(&req.password)?;

        // The unique index has the final say if two registrations race.
        let user = UserRepository::create(&state.db, &req.name, &req.email, &password_hash, role)
            .await
            .map_err(|e| if is_unique_violation(&e) { duplicate_email() } else { e.into() })?;

        info!(user_id = user.id, role = %user.role, "User registered");
        Self::session_for(state, user)
    }

    pub async fn login(state: &AppState, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let req = req.normalized();
        req.validate()?;

        let user = UserRepository::find_by_email(&state.db, &req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        security::verify_password(&req.password, &user.password_hash)
            .map_err(|_| AppError::InvalidCredentials)?;

        if user.is_blocked {
            warn!(user_id = user.id, "Blocked user attempted to log in");
            return Err(AppError::AccountBlocked);
        }

        info!(user_id = user.id, "User logged in");
        Self::session_for(state, user)
    }

    pub async fn me(state: &AppState, user_id: i64) -> Result<UserResponse, AppError> {
        UserRepository::find_by_id(&state.db, user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(AppError::UserLookupFailed)
    }

    /// Creates the configured super admin unless one already exists.
    pub async fn ensure_super_admin(pool: &PgPool, seed: &SuperAdminSeed) -> Result<(), AppError> {
        if UserRepository::exists_with_role(pool, UserRole::SuperAdmin).await? {
            return Ok(());
        }

        let email = normalize_email(&seed.email);
        if UserRepository::find_by_email(pool, &email).await?.is_some() {
            warn!("Super admin seed e-mail belongs to an existing account; not promoting it");
            return Ok(());
        }

        let password_hash = security::hash_password(&seed.password)?;
        let user = UserRepository::create(pool, &seed.name, &email, &password_hash, UserRole::SuperAdmin).await?;

        info!(user_id = user.id, "Bootstrapped super admin account");
        Ok(())
    }

    fn session_for(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
        let token = state.tokens.issue(user.id)?;

        Ok(AuthResponse {
            token,
            expires_in: state.tokens.ttl().whole_seconds(),
            user: user.into(),
        })
    }
}

fn duplicate_email() -> AppError {
    AppError::Conflict("User with this email already exists".to_string())
}
