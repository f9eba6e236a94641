use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Row of the `"Todo"` table. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Request body for creating or overwriting a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TodoPayload {
    #[validate(length(min = 1, max = 50, message = "title must be between 1 and 50 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "description must be at most 200 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoPayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub(crate) fn into_todo(self, id: i32) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}
