use serde::Deserialize;
use utoipa::ToSchema;

use crate::modules::user::model::UserRole;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    /// USER or ADMIN.
    pub role: UserRole,
}
