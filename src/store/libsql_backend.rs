//! libSQL store — async `TodoStore` implementation.
//!
//! Supports local file and in-memory databases. Timestamps are stored as
//! RFC 3339 text and due dates as `YYYY-MM-DD` text, both of which order
//! correctly under SQLite's string comparison.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{Connection, Database, params};
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{NewTodo, TodoStore};
use crate::todos::model::TodoItem;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<Database>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Database opened");
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Get the connection.
    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Parse a `YYYY-MM-DD` due date column.
fn parse_due_date(s: &Option<String>) -> Option<NaiveDate> {
    s.as_ref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Map a libsql Row to a TodoItem.
///
/// Column order matches TODO_COLUMNS:
/// 0:id, 1:title, 2:description, 3:is_completed, 4:due_date, 5:created_at
fn row_to_todo(row: &libsql::Row) -> Result<TodoItem, libsql::Error> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2).ok();
    let is_completed: i64 = row.get(3)?;
    let due_date: Option<String> = row.get(4).ok();
    let created_str: String = row.get(5)?;

    Ok(TodoItem {
        id,
        title,
        description,
        is_completed: is_completed != 0,
        due_date: parse_due_date(&due_date),
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const TODO_COLUMNS: &str = "id, title, description, is_completed, due_date, created_at";

#[async_trait]
impl TodoStore for LibSqlStore {
    async fn insert(&self, new: NewTodo) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO todos (title, description, is_completed, due_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.title.as_str(),
                new.description.as_deref(),
                new.is_completed as i64,
                new.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                new.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, "Todo inserted into DB");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("find_by_id: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let todo = row_to_todo(&row)
                    .map_err(|e| DatabaseError::Query(format!("find_by_id row parse: {e}")))?;
                Ok(Some(todo))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("find_by_id: {e}"))),
        }
    }

    async fn update(&self, item: &TodoItem) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let count = conn
            .execute(
                "UPDATE todos SET title = ?1, description = ?2, is_completed = ?3,
                    due_date = ?4, created_at = ?5 WHERE id = ?6",
                params![
                    item.title.as_str(),
                    item.description.as_deref(),
                    item.is_completed as i64,
                    item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    item.created_at.to_rfc3339(),
                    item.id,
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("update: {e}")))?;

        if count == 0 {
            return Err(DatabaseError::NotFound(item.id));
        }
        debug!(id = item.id, "Todo updated in DB");
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let count = conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])
            .await
            .map_err(|e| DatabaseError::Query(format!("remove: {e}")))?;

        if count == 0 {
            debug!(id, "Delete was a no-op, no such todo");
        } else {
            debug!(id, "Todo deleted from DB");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<TodoItem>, DatabaseError> {
        let conn = self.conn();
        // Incomplete first, then by due date with undated rows last, then
        // newest first.
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {TODO_COLUMNS} FROM todos
                     ORDER BY is_completed ASC, due_date IS NULL ASC, due_date ASC, created_at DESC"
                ),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_all: {e}")))?;

        let mut todos = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            todos.push(
                row_to_todo(&row)
                    .map_err(|e| DatabaseError::Query(format!("list_all row parse: {e}")))?,
            );
        }
        Ok(todos)
    }
}
