pub mod todo;
pub mod user_record;
