pub mod manager;
pub mod memory;
pub mod models;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryTodoStore, MemoryUserRecordStore};
pub use models::todo::{Todo, TodoPayload};
pub use models::user_record::{UserRecord, UserRecordPayload};
pub use store::{PgTodoStore, PgUserRecordStore, TodoStore, UserRecordStore};
