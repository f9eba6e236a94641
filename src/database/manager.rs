use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Todo with id {0} does not exist")]
    TodoNotFound(i32),

    #[error("User not found")]
    UserNotFound(i32),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_TODO_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS "Todo" (
    id SERIAL PRIMARY KEY,
    title VARCHAR(50) NOT NULL,
    description VARCHAR(200) NULL,
    completed BOOLEAN NULL
)"#;

const CREATE_USERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL,
    email VARCHAR(100) NOT NULL
)"#;

/// Connection and schema helpers for the Postgres backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(
            "Created database pool for {}:{}/{}",
            config.host, config.port, config.name
        );
        Ok(pool)
    }

    /// `DATABASE_URL` when present, otherwise assembled from the DB_* parts
    pub fn connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            url::Url::parse(url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
            return Ok(url.clone());
        }

        let invalid = |what: &str| DatabaseError::InvalidDatabaseUrl(format!("invalid {}", what));

        let mut url = url::Url::parse("postgres://localhost")
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_host(Some(&config.host))
            .map_err(|_| invalid("host"))?;
        url.set_port(Some(config.port)).map_err(|_| invalid("port"))?;
        url.set_username(&config.user).map_err(|_| invalid("user"))?;
        url.set_password(Some(&config.password))
            .map_err(|_| invalid("password"))?;
        url.set_path(&format!("/{}", config.name));
        Ok(url.into())
    }

    /// Create the Todo and users tables if they are missing
    pub async fn create_tables(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_TODO_TABLE).execute(pool).await?;
        sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
        info!("Todo and users tables ready");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
