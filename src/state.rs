use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::auth::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self { config, db, tokens }
    }
}
