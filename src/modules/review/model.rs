use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MIN_COMMENT_CHARS: usize = 3;
pub const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, ToSchema)]
pub struct Review {
    pub id: i64,
    pub car_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

/// First rule a review breaks, in the order they are checked.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewViolation {
    #[error("car_id is required")]
    CarIdRequired,
    #[error("user_id is required")]
    UserIdRequired,
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("comment must be at least 3 characters")]
    CommentTooShort,
    #[error("comment must be at most 1000 characters")]
    CommentTooLong,
}

/// A review before it is stored or after an edit is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub car_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ReviewViolation> {
        if self.car_id <= 0 {
            return Err(ReviewViolation::CarIdRequired);
        }
        if self.user_id <= 0 {
            return Err(ReviewViolation::UserIdRequired);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ReviewViolation::RatingOutOfRange);
        }
        // Characters, not bytes: "Отлично" is seven.
        let chars = self.comment.chars().count();
        if chars < MIN_COMMENT_CHARS {
            return Err(ReviewViolation::CommentTooShort);
        }
        if chars > MAX_COMMENT_CHARS {
            return Err(ReviewViolation::CommentTooLong);
        }
        Ok(())
    }
}

impl Review {
    /// The stored review with a new rating and comment. Owner and car stay.
    pub fn edited(&self, rating: i32, comment: String) -> ReviewDraft {
        ReviewDraft {
            car_id: self.car_id,
            user_id: self.user_id,
            rating,
            comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: i32, comment: &str) -> ReviewDraft {
        ReviewDraft {
            car_id: 1,
            user_id: 1,
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_valid_drafts() {
        assert_eq!(draft(1, "bad").validate(), Ok(()));
        assert_eq!(draft(5, &"a".repeat(1000)).validate(), Ok(()));
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(draft(0, "fine car").validate(), Err(ReviewViolation::RatingOutOfRange));
        assert_eq!(draft(6, "fine car").validate(), Err(ReviewViolation::RatingOutOfRange));
        assert_eq!(draft(-3, "fine car").validate(), Err(ReviewViolation::RatingOutOfRange));
    }

    #[test]
    fn test_comment_length_counts_characters() {
        assert_eq!(draft(4, "ok").validate(), Err(ReviewViolation::CommentTooShort));
        assert_eq!(draft(4, &"a".repeat(1001)).validate(), Err(ReviewViolation::CommentTooLong));
        // Three two-byte characters pass even though they are six bytes.
        assert_eq!(draft(4, "ööö").validate(), Ok(()));
        // 1000 Cyrillic letters are 2000 bytes but still within the limit.
        assert_eq!(draft(4, &"ж".repeat(1000)).validate(), Ok(()));
    }

    #[test]
    fn test_first_violation_wins() {
        let mut d = draft(9, "");
        d.car_id = 0;
        d.user_id = 0;
        assert_eq!(d.validate(), Err(ReviewViolation::CarIdRequired));

        d.car_id = 7;
        assert_eq!(d.validate(), Err(ReviewViolation::UserIdRequired));

        d.user_id = 3;
        assert_eq!(d.validate(), Err(ReviewViolation::RatingOutOfRange));

        d.rating = 3;
        assert_eq!(d.validate(), Err(ReviewViolation::CommentTooShort));
    }

    #[test]
    fn test_edit_keeps_owner_and_car() {
        let review = Review {
            id: 10,
            car_id: 4,
            user_id: 8,
            rating: 2,
            comment: "meh".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let edited = review.edited(5, "much better now".to_string());
        assert_eq!(edited.car_id, 4);
        assert_eq!(edited.user_id, 8);
        assert_eq!(edited.rating, 5);
    }
}
