//! HTTP handlers for the todo CRUD surface.
//!
//! Each handler validates its input, makes one store call, and answers
//! with a rendered page or a redirect back to the list.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use chrono::Utc;
use tracing::{debug, info};

use super::model::{self, TodoForm, TodoItem};
use super::views::{self, FormMode};
use crate::error::{AppError, Result};
use crate::store::TodoStore;

/// Shared state threaded through every handler.
#[derive(Clone)]
pub struct TodoRouteState {
    pub store: Arc<dyn TodoStore>,
}

/// 302 redirect back to the list page.
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/todo")]).into_response()
}

/// Build the application router.
pub fn todo_routes(state: TodoRouteState) -> Router {
    Router::new()
        .route("/", get(|| async { redirect_to_list() }))
        .route("/todo", get(list))
        .route("/todo/create", get(show_create).post(create))
        .route("/todo/edit/{id}", get(show_edit).post(edit))
        .route("/todo/delete/{id}", get(show_delete).post(delete))
        .route("/todo/toggle/{id}", post(toggle))
        .with_state(state)
}

/// GET /todo — every item, incomplete first.
async fn list(State(state): State<TodoRouteState>) -> Result<Html<String>> {
    let todos = state.store.list_all().await?;
    Ok(Html(views::list_page(&todos)))
}

/// GET /todo/create — blank form with the due date defaulted to tomorrow.
async fn show_create() -> Html<String> {
    let form = TodoForm::with_default_due_date();
    Html(views::form_page(FormMode::Create, &form, &[]))
}

/// POST /todo/create
async fn create(
    State(state): State<TodoRouteState>,
    Form(form): Form<TodoForm>,
) -> Result<Response> {
    if let Err(errors) = model::validate(&form) {
        debug!(violations = errors.len(), "Create rejected by validation");
        return Ok(Html(views::form_page(FormMode::Create, &form, &errors)).into_response());
    }

    // The server owns created_at; anything the client sent is ignored.
    let id = state.store.insert(form.into_new(Utc::now())).await?;
    info!(id, "Todo created");
    Ok(redirect_to_list())
}

/// GET /todo/edit/{id}
async fn show_edit(
    State(state): State<TodoRouteState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let todo = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    let form = TodoForm::from_item(&todo);
    Ok(Html(views::form_page(FormMode::Edit, &form, &[])))
}

/// POST /todo/edit/{id}
async fn edit(
    State(state): State<TodoRouteState>,
    Path(id): Path<i64>,
    Form(form): Form<TodoForm>,
) -> Result<Response> {
    // The path id and the submitted id must agree before anything else
    // happens — no lookup, no persistence on mismatch.
    if form.id != Some(id) {
        debug!(path_id = id, form_id = ?form.id, "Edit id mismatch");
        return Err(AppError::NotFound);
    }

    if let Err(errors) = model::validate(&form) {
        debug!(id, violations = errors.len(), "Edit rejected by validation");
        return Ok(Html(views::form_page(FormMode::Edit, &form, &errors)).into_response());
    }

    // Carry the stored created_at forward; a whole-row update would
    // otherwise clobber it with whatever the form carried.
    let existing = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    let updated = TodoItem {
        id,
        title: form.title.trim().to_string(),
        description: form.description_opt(),
        is_completed: form.is_completed(),
        due_date: form.due_date_parsed(),
        created_at: existing.created_at,
    };
    state.store.update(&updated).await?;
    info!(id, "Todo updated");
    Ok(redirect_to_list())
}

/// GET /todo/delete/{id} — confirmation page, no mutation.
async fn show_delete(
    State(state): State<TodoRouteState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let todo = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(views::confirm_page(&todo)))
}

/// POST /todo/delete/{id} — idempotent; a missing id still redirects.
async fn delete(State(state): State<TodoRouteState>, Path(id): Path<i64>) -> Result<Response> {
    state.store.remove(id).await?;
    info!(id, "Todo deleted");
    Ok(redirect_to_list())
}

/// POST /todo/toggle/{id} — flip completion on an existing item.
async fn toggle(State(state): State<TodoRouteState>, Path(id): Path<i64>) -> Result<Response> {
    let mut todo = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    todo.is_completed = !todo.is_completed;
    state.store.update(&todo).await?;
    info!(id, completed = todo.is_completed, "Todo toggled");
    Ok(redirect_to_list())
}
