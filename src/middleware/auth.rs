use crate::common::error::AppError;
use crate::modules::user::model::{User, UserRole};
use crate::modules::user::repository::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// The caller, resolved fresh from the store on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_blocked: bool,
}

impl From<User> for CurrentUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_blocked: u.is_blocked,
        }
    }
}

pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingCredential)?
        .to_str()
        .map_err(|_| AppError::MalformedCredential)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::MalformedCredential)
}

/// Verifies the bearer token and loads its user.
///
/// Role and block changes apply on the very next request because nothing
/// about the user is cached in the token beyond its id.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, AppError> {
    let token = extract_bearer(headers)?;
    let user_id = state.tokens.verify(token)?;

    let user = UserRepository::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::UserLookupFailed)?;

    if user.is_blocked {
        return Err(AppError::AccountBlocked);
    }

    Ok(CurrentUser::from(user))
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = match authenticate(&state, req.headers()).await {
        Ok(user) => user,
        Err(e) => {
            warn!(path = %req.uri().path(), "Authentication rejected: {}", e);
            return Err(e);
        }
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
