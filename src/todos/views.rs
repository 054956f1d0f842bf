//! Server-rendered HTML pages.
//!
//! Plain `format!`-assembled markup; all user-supplied text goes through
//! `escape_html`. The pages carry no client-side logic beyond forms.

use super::model::{FieldError, TodoForm, TodoItem};

/// Which write path a form posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Escape text for interpolation into HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} — Todo</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border-bottom: 1px solid #ddd; padding: 0.4rem; text-align: left; }}
.done {{ text-decoration: line-through; color: #888; }}
.errors {{ color: #b00; }}
label {{ display: block; margin-top: 0.6rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#
    )
}

/// The list page: every item, incomplete first.
pub fn list_page(todos: &[TodoItem]) -> String {
    let mut rows = String::new();
    for todo in todos {
        let class = if todo.is_completed { " class=\"done\"" } else { "" };
        let due = todo
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let toggle_label = if todo.is_completed { "Reopen" } else { "Done" };
        rows.push_str(&format!(
            r#"<tr{class}>
<td>{title}</td>
<td>{description}</td>
<td>{due}</td>
<td>
<form method="post" action="/todo/toggle/{id}" style="display:inline"><button>{toggle_label}</button></form>
<a href="/todo/edit/{id}">Edit</a>
<a href="/todo/delete/{id}">Delete</a>
</td>
</tr>
"#,
            title = escape_html(&todo.title),
            description = escape_html(todo.description.as_deref().unwrap_or("")),
            id = todo.id,
        ));
    }

    let body = format!(
        r#"<p><a href="/todo/create">New todo</a></p>
<table>
<tr><th>Title</th><th>Description</th><th>Due</th><th></th></tr>
{rows}</table>
"#
    );
    layout("Todo List", &body)
}

/// The create/edit form, re-rendered with field errors on invalid input.
pub fn form_page(mode: FormMode, form: &TodoForm, errors: &[FieldError]) -> String {
    let (title, action, id_field) = match mode {
        FormMode::Create => ("New Todo", "/todo/create".to_string(), String::new()),
        FormMode::Edit => {
            let id = form.id.unwrap_or_default();
            (
                "Edit Todo",
                format!("/todo/edit/{id}"),
                format!(r#"<input type="hidden" name="id" value="{id}">"#),
            )
        }
    };

    let error_list = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(&e.message)))
            .collect();
        format!("<ul class=\"errors\">{items}</ul>")
    };

    let checked = if form.is_completed() { " checked" } else { "" };
    let body = format!(
        r#"{error_list}<form method="post" action="{action}">
{id_field}<label>Title <input name="title" value="{title_value}"></label>
<label>Description <textarea name="description">{description}</textarea></label>
<label>Due date <input type="date" name="due_date" value="{due_date}"></label>
<label><input type="checkbox" name="is_completed"{checked}> Completed</label>
<p><button>Save</button> <a href="/todo">Cancel</a></p>
</form>
"#,
        title_value = escape_html(&form.title),
        description = escape_html(&form.description),
        due_date = escape_html(&form.due_date),
    );
    layout(title, &body)
}

/// The delete confirmation page. No mutation happens here.
pub fn confirm_page(todo: &TodoItem) -> String {
    let body = format!(
        r#"<p>Delete "{title}"?</p>
<form method="post" action="/todo/delete/{id}">
<button>Delete</button> <a href="/todo">Cancel</a>
</form>
"#,
        title = escape_html(&todo.title),
        id = todo.id,
    );
    layout("Confirm Delete", &body)
}
