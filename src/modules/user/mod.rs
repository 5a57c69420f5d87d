//! Stored user accounts: the credential store every other module reads from.

pub mod model;
pub mod repository;
