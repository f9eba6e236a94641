use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::todo::{Todo, TodoPayload};
use crate::database::models::user_record::{UserRecord, UserRecordPayload};

/// Access to the Todo table. Every operation is a single statement;
/// there is no transaction or version check spanning calls.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a todo and return it with its generated id
    async fn add(&self, payload: TodoPayload) -> Result<Todo, DatabaseError>;

    /// All todos ordered by id
    async fn list(&self) -> Result<Vec<Todo>, DatabaseError>;

    async fn get(&self, id: i32) -> Result<Option<Todo>, DatabaseError>;

    /// Overwrite every mutable field. `TodoNotFound` if the id is absent.
    async fn update(&self, id: i32, payload: TodoPayload) -> Result<Todo, DatabaseError>;

    /// `TodoNotFound` if the id is absent
    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Postgres-backed store over the `"Todo"` table
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn add(&self, payload: TodoPayload) -> Result<Todo, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"INSERT INTO "Todo" (title, description, completed)
               VALUES ($1, $2, $3)
               RETURNING id, title, description, completed"#,
        )
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, DatabaseError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"SELECT id, title, description, completed FROM "Todo" ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn get(&self, id: i32) -> Result<Option<Todo>, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"SELECT id, title, description, completed FROM "Todo" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update(&self, id: i32, payload: TodoPayload) -> Result<Todo, DatabaseError> {
        sqlx::query_as::<_, Todo>(
            r#"UPDATE "Todo"
               SET title = $1, description = $2, completed = $3
               WHERE id = $4
               RETURNING id, title, description, completed"#,
        )
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::TodoNotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let rows_affected = sqlx::query(r#"DELETE FROM "Todo" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DatabaseError::TodoNotFound(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Access to the `users` table of the user CRUD sample
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn create(&self, payload: UserRecordPayload) -> Result<UserRecord, DatabaseError>;

    async fn find(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError>;

    /// `UserNotFound` if the id is absent
    async fn update(&self, id: i32, payload: UserRecordPayload)
        -> Result<UserRecord, DatabaseError>;

    /// `UserNotFound` if the id is absent
    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;
}

/// Postgres-backed store over the `users` table
#[derive(Clone)]
pub struct PgUserRecordStore {
    pool: PgPool,
}

impl PgUserRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRecordStore for PgUserRecordStore {
    async fn create(&self, payload: UserRecordPayload) -> Result<UserRecord, DatabaseError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"INSERT INTO users (username, email) VALUES ($1, $2)
               RETURNING id, username, email"#,
        )
        .bind(payload.username)
        .bind(payload.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(
        &self,
        id: i32,
        payload: UserRecordPayload,
    ) -> Result<UserRecord, DatabaseError> {
        sqlx::query_as::<_, UserRecord>(
            r#"UPDATE users SET username = $1, email = $2
               WHERE id = $3
               RETURNING id, username, email"#,
        )
        .bind(payload.username)
        .bind(payload.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::UserNotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let rows_affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DatabaseError::UserNotFound(id));
        }
        Ok(())
    }
}
