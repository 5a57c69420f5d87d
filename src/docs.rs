use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::modules::{admin, auth, car, favorite, profile, review, user};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handler::register,
        auth::handler::login,
        auth::handler::get_me,
        car::handler::list_cars,
        car::handler::get_car,
        car::handler::create_car,
        car::handler::update_car,
        car::handler::delete_car,
        review::handler::create_review,
        review::handler::update_review,
        review::handler::delete_review,
        review::handler::get_review,
        review::handler::list_car_reviews,
        review::handler::rating_stats,
        review::handler::top_rated_cars,
        favorite::handler::list_favorites,
        favorite::handler::add_favorite,
        favorite::handler::remove_favorite,
        favorite::handler::favorite_status,
        profile::handler::my_profile,
        profile::handler::profile_by_id,
        profile::handler::profile_by_email,
        profile::handler::profile_by_name,
        profile::handler::update_name,
        profile::handler::update_password,
        admin::handler::list_users,
        admin::handler::get_user,
        admin::handler::update_role,
        admin::handler::block_user,
        admin::handler::unblock_user,
        admin::handler::delete_user,
    ),
    components(
        schemas(
            auth::dto::RegisterRequest,
            auth::dto::LoginRequest,
            auth::dto::AuthResponse,
            user::model::UserRole,
            user::model::UserResponse,
            car::model::Car,
            car::dto::CreateCarRequest,
            car::dto::UpdateCarRequest,
            review::model::Review,
            review::dto::CreateReviewRequest,
            review::dto::UpdateReviewRequest,
            review::dto::RatingStats,
            favorite::model::Favorite,
            favorite::model::FavoriteCar,
            favorite::dto::FavoriteStatus,
            profile::dto::ProfileResponse,
            profile::dto::UpdateNameRequest,
            profile::dto::UpdatePasswordRequest,
            admin::dto::UpdateRoleRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Cars", description = "Car listings"),
        (name = "Reviews", description = "Reviews and rating aggregates"),
        (name = "Favorites", description = "Per-user favorite cars"),
        (name = "Profile", description = "User profiles"),
        (name = "Super Admin", description = "User management")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
