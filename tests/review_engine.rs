//! Store-backed checks of the rating bookkeeping. They need a PostgreSQL
//! server: `DATABASE_URL=postgres://... cargo test -- --ignored`.

use car_marketplace::common::error::AppError;
use car_marketplace::middleware::auth::CurrentUser;
use car_marketplace::modules::admin::dto::UpdateRoleRequest;
use car_marketplace::modules::admin::service::AdminService;
use car_marketplace::modules::car::dto::CreateCarRequest;
use car_marketplace::modules::car::model::Car;
use car_marketplace::modules::car::repository::CarRepository;
use car_marketplace::modules::car::service::CarService;
use car_marketplace::modules::favorite::service::FavoriteService;
use car_marketplace::modules::review::dto::{CreateReviewRequest, UpdateReviewRequest};
use car_marketplace::modules::review::service::ReviewService;
use car_marketplace::modules::user::model::UserRole;
use car_marketplace::modules::user::repository::UserRepository;
use sqlx::PgPool;
use std::time::Duration;

async fn user(db: &PgPool, name: &str, role: UserRole) -> CurrentUser {
    let email = format!("{}@example.com", name.to_lowercase());
    UserRepository::create(db, name, &email, "not-a-real-hash", role)
        .await
        .unwrap()
        .into()
}

async fn car(db: &PgPool, brand: &str) -> Car {
    let req = CreateCarRequest {
        brand: brand.to_string(),
        model: "Model".to_string(),
        car_type: "sedan".to_string(),
        year: 2021,
        mileage: 1000.0,
        transmission: "auto".to_string(),
        engine_volume: 2.0,
        price: 15000.0,
        is_new: false,
        image_url: String::new(),
    };
    CarRepository::create(db, &req).await.unwrap()
}

fn review(car_id: i64, rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        car_id,
        rating,
        comment: format!("{} stars from me", rating),
    }
}

async fn avg_rating(db: &PgPool, car_id: i64) -> f64 {
    CarRepository::find_by_id(db, car_id).await.unwrap().unwrap().avg_rating
}

fn mean(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn average_follows_every_mutation(db: PgPool) {
    let alice = user(&db, "Alice", UserRole::User).await;
    let bob = user(&db, "Bob", UserRole::User).await;
    let carol = user(&db, "Carol", UserRole::User).await;
    let target = car(&db, "Toyota").await;
    assert_eq!(target.avg_rating, 0.0);

    let a = ReviewService::create(&db, &alice, review(target.id, 5)).await.unwrap();
    assert!(close(avg_rating(&db, target.id).await, mean(&[5])));

    let b = ReviewService::create(&db, &bob, review(target.id, 2)).await.unwrap();
    assert!(close(avg_rating(&db, target.id).await, mean(&[5, 2])));

    let c = ReviewService::create(&db, &carol, review(target.id, 4)).await.unwrap();
    assert!(close(avg_rating(&db, target.id).await, mean(&[5, 2, 4])));

    let edit = UpdateReviewRequest { rating: 1, comment: "changed my mind".into() };
    ReviewService::update(&db, &alice, a.id, edit).await.unwrap();
    assert!(close(avg_rating(&db, target.id).await, mean(&[1, 2, 4])));

    ReviewService::delete(&db, &bob, b.id).await.unwrap();
    assert!(close(avg_rating(&db, target.id).await, mean(&[1, 4])));

    ReviewService::delete(&db, &alice, a.id).await.unwrap();
    ReviewService::delete(&db, &carol, c.id).await.unwrap();
    assert_eq!(avg_rating(&db, target.id).await, 0.0);

    let stats = ReviewService::rating_stats(&db, target.id).await.unwrap();
    assert_eq!(stats.total_reviews, 0);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn invalid_review_leaves_no_trace(db: PgPool) {
    let alice = user(&db, "Alice", UserRole::User).await;
    let target = car(&db, "Mazda").await;

    let err = ReviewService::create(&db, &alice, review(target.id, 6)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidReview(_)));

    let err = ReviewService::create(&db, &alice, review(target.id + 1000, 4)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let stats = ReviewService::rating_stats(&db, target.id).await.unwrap();
    assert_eq!(stats.total_reviews, 0);
    assert_eq!(avg_rating(&db, target.id).await, 0.0);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn concurrent_reviews_on_one_car_all_count(db: PgPool) {
    let car_id = car(&db, "Honda").await.id;
    let ratings = [5, 1, 4, 4, 2, 3, 5, 1];

    let mut tasks = Vec::new();
    for (i, rating) in ratings.iter().copied().enumerate() {
        let author = user(&db, &format!("Writer{}", i), UserRole::User).await;
        let db = db.clone();
        tasks.push(tokio::spawn(async move {
            ReviewService::create(&db, &author, review(car_id, rating)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stats = ReviewService::rating_stats(&db, car_id).await.unwrap();
    assert_eq!(stats.total_reviews, ratings.len() as i64);
    assert!(close(avg_rating(&db, car_id).await, mean(&ratings)));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn a_locked_car_only_holds_up_its_own_reviews(db: PgPool) {
    let alice = user(&db, "Alice", UserRole::User).await;
    let busy = car(&db, "Busy").await;
    let idle = car(&db, "Idle").await;

    let mut holder = db.begin().await.unwrap();
    assert!(CarRepository::lock_for_update(&mut *holder, busy.id).await.unwrap());

    let other_car = tokio::time::timeout(
        Duration::from_secs(5),
        ReviewService::create(&db, &alice, review(idle.id, 4)),
    )
    .await;
    assert!(other_car.expect("review on another car must not wait").is_ok());

    let same_car = tokio::time::timeout(
        Duration::from_millis(300),
        ReviewService::create(&db, &alice, review(busy.id, 4)),
    )
    .await;
    assert!(same_car.is_err(), "review on the locked car should queue");

    holder.rollback().await.unwrap();
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn top_rated_orders_by_average_then_id(db: PgPool) {
    for (id, brand, avg) in [(2, "Audi", 4.5), (5, "BMW", 4.5), (1, "Fiat", 3.0), (9, "Lada", 0.0), (3, "", 5.0)] {
        sqlx::query(
            "INSERT INTO cars (id, brand, model, year, engine_volume, price, avg_rating) VALUES ($1, $2, 'X', 2020, 1.6, 1000, $3)",
        )
        .bind(id as i64)
        .bind(brand)
        .bind(avg)
        .execute(&db)
        .await
        .unwrap();
    }

    let ids: Vec<i64> = ReviewService::top_rated(&db, 3).await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 5, 1]);

    let all = ReviewService::top_rated(&db, 10).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().map(|c| c.id), Some(9));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn deleting_a_car_takes_its_reviews(db: PgPool) {
    let alice = user(&db, "Alice", UserRole::User).await;
    let target = car(&db, "Volvo").await;
    let written = ReviewService::create(&db, &alice, review(target.id, 3)).await.unwrap();

    CarService::delete(&db, target.id).await.unwrap();

    let stats = ReviewService::rating_stats(&db, target.id).await.unwrap();
    assert_eq!(stats.total_reviews, 0);
    assert!(matches!(
        ReviewService::find_by_id(&db, written.id).await,
        Err(AppError::ReviewNotFound)
    ));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn only_the_author_or_a_super_admin_may_edit(db: PgPool) {
    let author = user(&db, "Author", UserRole::User).await;
    let admin = user(&db, "Admin", UserRole::Admin).await;
    let root = user(&db, "Root", UserRole::SuperAdmin).await;
    let target = car(&db, "Skoda").await;
    let written = ReviewService::create(&db, &author, review(target.id, 2)).await.unwrap();

    let edit = || UpdateReviewRequest { rating: 5, comment: "hijacked".into() };

    let err = ReviewService::update(&db, &admin, written.id, edit()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = ReviewService::delete(&db, &admin, written.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(close(avg_rating(&db, target.id).await, 2.0));

    // Missing reviews report 404 before ownership is considered.
    let err = ReviewService::delete(&db, &admin, written.id + 1000).await.unwrap_err();
    assert!(matches!(err, AppError::ReviewNotFound));

    let updated = ReviewService::update(&db, &root, written.id, edit()).await.unwrap();
    assert_eq!(updated.user_id, author.id);
    assert!(close(avg_rating(&db, target.id).await, 5.0));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn super_admins_cannot_be_touched(db: PgPool) {
    let root = user(&db, "Root", UserRole::SuperAdmin).await;

    assert!(matches!(
        AdminService::set_blocked(&db, root.id, true).await,
        Err(AppError::SuperAdminProtected)
    ));
    assert!(matches!(
        AdminService::update_role(&db, root.id, UpdateRoleRequest { role: UserRole::User }).await,
        Err(AppError::SuperAdminProtected)
    ));
    assert!(matches!(
        AdminService::delete_user(&db, root.id).await,
        Err(AppError::SuperAdminProtected)
    ));

    let stored = UserRepository::find_by_id(&db, root.id).await.unwrap().unwrap();
    assert!(!stored.is_blocked);
    assert_eq!(stored.role, UserRole::SuperAdmin);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn deleting_a_user_recomputes_their_cars(db: PgPool) {
    let leaving = user(&db, "Leaving", UserRole::User).await;
    let staying = user(&db, "Staying", UserRole::User).await;
    let first = car(&db, "Opel").await;
    let second = car(&db, "Seat").await;

    ReviewService::create(&db, &leaving, review(first.id, 1)).await.unwrap();
    ReviewService::create(&db, &staying, review(first.id, 5)).await.unwrap();
    ReviewService::create(&db, &leaving, review(second.id, 2)).await.unwrap();

    AdminService::delete_user(&db, leaving.id).await.unwrap();

    assert!(close(avg_rating(&db, first.id).await, 5.0));
    assert_eq!(avg_rating(&db, second.id).await, 0.0);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn favorites_are_unique_per_user_and_car(db: PgPool) {
    let alice = user(&db, "Alice", UserRole::User).await;
    let target = car(&db, "Kia").await;

    FavoriteService::add(&db, alice.id, target.id).await.unwrap();
    assert!(matches!(
        FavoriteService::add(&db, alice.id, target.id).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        FavoriteService::add(&db, alice.id, target.id + 1000).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        FavoriteService::add(&db, alice.id + 1000, target.id).await,
        Err(AppError::UserLookupFailed)
    ));

    let listed = FavoriteService::list(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].car.id, target.id);
    assert!(FavoriteService::status(&db, alice.id, target.id).await.unwrap().is_favorite);

    FavoriteService::remove(&db, alice.id, target.id).await.unwrap();
    assert!(matches!(
        FavoriteService::remove(&db, alice.id, target.id).await,
        Err(AppError::NotFound(_))
    ));
}
