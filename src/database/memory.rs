use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::todo::{Todo, TodoPayload};
use crate::database::models::user_record::{UserRecord, UserRecordPayload};
use crate::database::store::{TodoStore, UserRecordStore};

/// Rows keyed by id. Ids start at 1 and are never reused, matching a SERIAL column.
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }
}

/// Process-local todo store selected with `TODO_STORE=memory`
#[derive(Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Table<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn add(&self, payload: TodoPayload) -> Result<Todo, DatabaseError> {
        let mut inner = self.inner.write().await;
        Ok(inner.insert_with(|id| payload.into_todo(id)))
    }

    async fn list(&self) -> Result<Vec<Todo>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Todo>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, payload: TodoPayload) -> Result<Todo, DatabaseError> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(DatabaseError::TodoNotFound(id))?;
        *row = payload.into_todo(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DatabaseError::TodoNotFound(id))
    }
}

/// Process-local `users` table, paired with [`MemoryTodoStore`]
#[derive(Default)]
pub struct MemoryUserRecordStore {
    inner: RwLock<Table<UserRecord>>,
}

impl MemoryUserRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRecordStore for MemoryUserRecordStore {
    async fn create(&self, payload: UserRecordPayload) -> Result<UserRecord, DatabaseError> {
        let mut inner = self.inner.write().await;
        Ok(inner.insert_with(|id| payload.into_record(id)))
    }

    async fn find(&self, id: i32) -> Result<Option<UserRecord>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i32,
        payload: UserRecordPayload,
    ) -> Result<UserRecord, DatabaseError> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(DatabaseError::UserNotFound(id))?;
        *row = payload.into_record(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DatabaseError::UserNotFound(id))
    }
}
