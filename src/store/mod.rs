//! Persistence layer — libSQL-backed storage for todo items.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use traits::{NewTodo, TodoStore};
