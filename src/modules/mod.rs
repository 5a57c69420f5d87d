pub mod admin;
pub mod auth;
pub mod car;
pub mod favorite;
pub mod profile;
pub mod review;
pub mod user;
