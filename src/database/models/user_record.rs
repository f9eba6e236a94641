use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Request body for creating or overwriting a user row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserRecordPayload {
    #[validate(length(min = 1, max = 50, message = "username must be between 1 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl UserRecordPayload {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    pub(crate) fn into_record(self, id: i32) -> UserRecord {
        UserRecord {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_and_email_are_checked() {
        assert!(UserRecordPayload::new("amy", "amy@example.com").validate().is_ok());
        assert!(UserRecordPayload::new("", "amy@example.com").validate().is_err());

        let errors = UserRecordPayload::new("amy", "not-an-email")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
