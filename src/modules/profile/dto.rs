use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::review::model::Review;
use crate::modules::user::model::UserResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNameRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    pub name: String,
}

impl UpdateNameRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_must_have_three_characters() {
        assert!(UpdateNameRequest { name: "Bo".into() }.validate().is_err());
        assert!(UpdateNameRequest { name: "Bob".into() }.validate().is_ok());
    }

    #[test]
    fn whitespace_does_not_count_towards_the_name() {
        assert!(UpdateNameRequest { name: "     ".into() }.normalized().validate().is_err());
        assert!(UpdateNameRequest { name: " Bo  ".into() }.normalized().validate().is_err());

        let req = UpdateNameRequest { name: "  Bob ".into() }.normalized();
        assert!(req.validate().is_ok());
        assert_eq!(req.name, "Bob");
    }

    #[test]
    fn new_password_length_is_checked() {
        let short = UpdatePasswordRequest { old_password: "old-secret".into(), new_password: "12345".into() };
        assert!(short.validate().is_err());

        let ok = UpdatePasswordRequest { old_password: "old-secret".into(), new_password: "123456".into() };
        assert!(ok.validate().is_ok());
    }
}
