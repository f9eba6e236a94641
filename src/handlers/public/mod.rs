pub mod exceptions;
pub mod system;
pub mod todo;
pub mod token;
pub mod users;
