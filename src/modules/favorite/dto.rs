use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}
