use super::dto::{CreateReviewRequest, RatingStats, UpdateReviewRequest};
use super::model::{Review, ReviewDraft};
use super::rating;
use super::repository::ReviewRepository;
use crate::common::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::car::model::Car;
use crate::modules::car::repository::CarRepository;
use crate::modules::user::repository::UserRepository;
use sqlx::PgPool;
use tracing::{info, warn};

pub struct ReviewService;

impl ReviewService {
    /// Stores a review by `actor` and refreshes the car's average in the
    /// same transaction.
    pub async fn create(db: &PgPool, actor: &CurrentUser, req: CreateReviewRequest) -> Result<Review, AppError> {
        let draft = ReviewDraft {
            car_id: req.car_id,
            user_id: actor.id,
            rating: req.rating,
            comment: req.comment,
        };
        draft.validate()?;

        let mut tx = db.begin().await?;

        // User before car, the same order a user delete takes them in.
        if !UserRepository::lock_key_share(&mut *tx, draft.user_id).await? {
            return Err(AppError::UserLookupFailed);
        }
        if !CarRepository::lock_for_update(&mut *tx, draft.car_id).await? {
            return Err(AppError::not_found("Car"));
        }

        let review = ReviewRepository::insert(&mut *tx, &draft).await?;
        let avg_rating = rating::recompute(&mut *tx, review.car_id).await?;
        tx.commit().await?;

        info!(review_id = review.id, car_id = review.car_id, avg_rating, "Review created");
        Ok(review)
    }

    pub async fn update(
        db: &PgPool,
        actor: &CurrentUser,
        id: i64,
        req: UpdateReviewRequest,
    ) -> Result<Review, AppError> {
        let mut tx = db.begin().await?;

        let existing = ReviewRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        ensure_can_modify(actor, &existing)?;

        let draft = existing.edited(req.rating, req.comment);
        draft.validate()?;

        // A concurrent delete may have won the lock; the update then finds nothing.
        CarRepository::lock_for_update(&mut *tx, existing.car_id).await?;
        let review = ReviewRepository::update(&mut *tx, id, draft.rating, &draft.comment)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        let avg_rating = rating::recompute(&mut *tx, review.car_id).await?;
        tx.commit().await?;

        info!(review_id = review.id, car_id = review.car_id, avg_rating, "Review updated");
        Ok(review)
    }

    pub async fn delete(db: &PgPool, actor: &CurrentUser, id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let existing = ReviewRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        ensure_can_modify(actor, &existing)?;

        CarRepository::lock_for_update(&mut *tx, existing.car_id).await?;
        if !ReviewRepository::delete(&mut *tx, id).await? {
            return Err(AppError::ReviewNotFound);
        }
        let avg_rating = rating::recompute(&mut *tx, existing.car_id).await?;
        tx.commit().await?;

        info!(review_id = id, car_id = existing.car_id, avg_rating, "Review deleted");
        Ok(())
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Review, AppError> {
        ReviewRepository::find_by_id(db, id)
            .await?
            .ok_or(AppError::ReviewNotFound)
    }

    pub async fn list_for_car(db: &PgPool, car_id: i64) -> Result<Vec<Review>, AppError> {
        Ok(ReviewRepository::list_by_car(db, car_id).await?)
    }

    pub async fn list_for_user(db: &PgPool, user_id: i64) -> Result<Vec<Review>, AppError> {
        Ok(ReviewRepository::list_by_user(db, user_id).await?)
    }

    /// Built from the review rows themselves. A car without reviews, or one
    /// that no longer exists, reports zero everywhere.
    pub async fn rating_stats(db: &PgPool, car_id: i64) -> Result<RatingStats, AppError> {
        let mut conn = db.acquire().await?;
        let distribution = rating::distribution(&mut *conn, car_id).await?;
        Ok(RatingStats::from(&distribution))
    }

    pub async fn top_rated(db: &PgPool, limit: i64) -> Result<Vec<Car>, AppError> {
        Ok(CarRepository::top_rated(db, limit).await?)
    }
}

/// Only the author may change a review. A super admin may change any.
pub fn ensure_can_modify(actor: &CurrentUser, review: &Review) -> Result<(), AppError> {
    if actor.id == review.user_id || actor.role.grants_all() {
        return Ok(());
    }
    warn!(user_id = actor.id, review_id = review.id, "Attempt to modify another user's review");
    Err(AppError::Forbidden("You can only modify your own reviews".to_string()))
}
