//! `TodoStore` trait — the async persistence interface handlers use.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DatabaseError;
use crate::todos::model::TodoItem;

/// Insert payload: every field except the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    /// Creation instant, set by the caller (the create handler owns the
    /// clock, not the store).
    pub created_at: DateTime<Utc>,
}

/// Backend-agnostic store for todo rows.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new todo. Returns the store-assigned id.
    async fn insert(&self, new: NewTodo) -> Result<i64, DatabaseError>;

    /// Look up a todo by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, DatabaseError>;

    /// Replace the row matching `item.id`.
    ///
    /// Fails with [`DatabaseError::NotFound`] when no such row exists.
    async fn update(&self, item: &TodoItem) -> Result<(), DatabaseError>;

    /// Delete the row if present. A missing row is not an error.
    async fn remove(&self, id: i64) -> Result<(), DatabaseError>;

    /// All todos: incomplete before completed, then by due date ascending
    /// with undated items last, then newest first.
    async fn list_all(&self) -> Result<Vec<TodoItem>, DatabaseError>;
}
