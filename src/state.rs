use std::sync::Arc;

use crate::auth::{TokenConfig, UserStore};
use crate::config::{AppConfig, StoreKind};
use crate::database::{
    DatabaseManager, MemoryTodoStore, MemoryUserRecordStore, PgTodoStore, PgUserRecordStore,
    TodoStore, UserRecordStore,
};

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoStore>,
    /// Rows of the user CRUD sample, unrelated to the login table in `users`
    pub user_records: Arc<dyn UserRecordStore>,
    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenConfig>,
}

impl AppState {
    pub fn new(
        todos: Arc<dyn TodoStore>,
        user_records: Arc<dyn UserRecordStore>,
        users: Arc<UserStore>,
        tokens: TokenConfig,
    ) -> Self {
        Self {
            todos,
            user_records,
            users,
            tokens: Arc::new(tokens),
        }
    }

    /// Connect the configured store and load the demo user table
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let (todos, user_records): (Arc<dyn TodoStore>, Arc<dyn UserRecordStore>) =
            match config.database.store {
                StoreKind::Postgres => {
                    let pool = DatabaseManager::connect(&config.database).await?;
                    DatabaseManager::create_tables(&pool).await?;
                    (
                        Arc::new(PgTodoStore::new(pool.clone())),
                        Arc::new(PgUserRecordStore::new(pool)),
                    )
                }
                StoreKind::Memory => {
                    tracing::warn!("Using in-memory stores; data is lost on restart");
                    (
                        Arc::new(MemoryTodoStore::new()),
                        Arc::new(MemoryUserRecordStore::new()),
                    )
                }
            };

        let users = UserStore::demo()?;
        tracing::info!("Loaded {} demo users", users.len());

        Ok(Self::new(
            todos,
            user_records,
            Arc::new(users),
            TokenConfig::from_security(&config.security),
        ))
    }
}
