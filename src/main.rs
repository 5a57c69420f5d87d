use anyhow::Context;
use car_marketplace::app;
use car_marketplace::config::settings::AppConfig;
use car_marketplace::infrastructure::db::pool;
use car_marketplace::modules::auth::service::AuthService;
use car_marketplace::state::AppState;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("car_marketplace=debug,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;
    let db = pool::connect_to_db(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    pool::run_migrations(&db)
        .await
        .context("failed to apply migrations")?;

    if let Some(seed) = &config.super_admin {
        AuthService::ensure_super_admin(&db, seed)
            .await
            .context("failed to bootstrap the super admin account")?;
    }

    let addr = format!("0.0.0.0:{}", config.server_port);
    let state = AppState::new(config, db);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
