use crate::auth::{JwtKeys, TokenAuthority};
use crate::config::AppConfig;
use crate::storage::{
    memory::{MemoryExpenseStore, MemoryUserStore},
    postgres::{PgExpenseStore, PgUserStore},
    ExpenseStore, UserStore,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Application context built once at startup and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub tokens: Arc<dyn TokenAuthority>,
}

impl AppState {
    pub fn with_postgres(config: AppConfig, db: PgPool) -> Self {
        let tokens = Arc::new(JwtKeys::from_config(&config.jwt)) as Arc<dyn TokenAuthority>;
        Self {
            config: Arc::new(config),
            users: Arc::new(PgUserStore::new(db.clone())),
            expenses: Arc::new(PgExpenseStore::new(db)),
            tokens,
        }
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        expenses: Arc<dyn ExpenseStore>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            config,
            users,
            expenses,
            tokens,
        }
    }

    /// Fresh in-memory stores and JWT keys for `secret`.
    pub fn in_memory(secret: &str) -> Self {
        let config = AppConfig::for_tests(secret);
        let tokens = Arc::new(JwtKeys::from_config(&config.jwt)) as Arc<dyn TokenAuthority>;
        Self::from_parts(
            Arc::new(config),
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryExpenseStore::new()),
            tokens,
        )
    }
}
