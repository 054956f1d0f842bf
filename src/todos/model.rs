//! Todo data model — the stored item, the form payload, and validation.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::store::NewTodo;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 300;

/// A single to-do item as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    /// Store-assigned id, immutable once created.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether the item is done.
    pub is_completed: bool,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// When the item was created. Never changed by updates.
    pub created_at: DateTime<Utc>,
}

/// Raw form submission from the create/edit pages.
///
/// Fields arrive as the browser sends them: empty strings for blank
/// inputs, and checkboxes present only when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    /// Hidden id field, present on the edit form only.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Checkboxes submit a value when ticked and nothing otherwise.
    #[serde(default)]
    pub is_completed: Option<String>,
    /// `YYYY-MM-DD` from a date input, or empty.
    #[serde(default)]
    pub due_date: String,
}

impl TodoForm {
    /// Blank form for the create page, due date defaulted to tomorrow.
    pub fn with_default_due_date() -> Self {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        Self {
            due_date: tomorrow.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Pre-filled form for the edit page.
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            id: Some(item.id),
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            is_completed: item.is_completed.then(|| "on".to_string()),
            due_date: item
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Whether the completion checkbox was ticked.
    pub fn is_completed(&self) -> bool {
        self.is_completed.is_some()
    }

    /// Description with blank submissions normalized to `None`.
    pub fn description_opt(&self) -> Option<String> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(self.description.clone())
        }
    }

    /// Parsed due date; blank or malformed input means no due date.
    pub fn due_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok()
    }

    /// Convert a validated submission into an insert payload.
    ///
    /// `created_at` comes from the caller: the server owns the creation
    /// timestamp, never the client.
    pub fn into_new(self, created_at: DateTime<Utc>) -> NewTodo {
        NewTodo {
            description: self.description_opt(),
            is_completed: self.is_completed(),
            due_date: self.due_date_parsed(),
            title: self.title.trim().to_string(),
            created_at,
        }
    }
}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a submission against the entity constraints.
///
/// Pure: no store access, no side effects. Lengths are counted in
/// characters, not bytes.
pub fn validate(form: &TodoForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required."));
    } else if form.title.trim().chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("Title must be {TITLE_MAX_CHARS} characters or fewer."),
        ));
    }

    if let Some(desc) = form.description_opt() {
        if desc.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.push(FieldError::new(
                "description",
                format!("Description must be {DESCRIPTION_MAX_CHARS} characters or fewer."),
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, description: &str) -> TodoForm {
        TodoForm {
            title: title.to_string(),
            description: description.to_string(),
            ..TodoForm::default()
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate(&form("Buy milk", "")).is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let errors = validate(&form("", "")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn whitespace_title_is_rejected() {
        assert!(validate(&form("   ", "")).is_err());
    }

    #[test]
    fn title_at_limit_passes() {
        assert!(validate(&form(&"x".repeat(100), "")).is_ok());
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let errors = validate(&form(&"x".repeat(101), "")).unwrap_err();
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn title_limit_counts_chars_not_bytes() {
        // 100 multi-byte characters are within the limit.
        assert!(validate(&form(&"ü".repeat(100), "")).is_ok());
        assert!(validate(&form(&"ü".repeat(101), "")).is_err());
    }

    #[test]
    fn description_at_limit_passes() {
        assert!(validate(&form("t", &"d".repeat(300))).is_ok());
    }

    #[test]
    fn description_over_limit_is_rejected() {
        let errors = validate(&form("t", &"d".repeat(301))).unwrap_err();
        assert_eq!(errors[0].field, "description");
    }

    #[test]
    fn long_title_and_description_report_both_fields() {
        let errors = validate(&form(&"x".repeat(101), &"d".repeat(301))).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn checkbox_presence_means_completed() {
        let mut f = form("t", "");
        assert!(!f.is_completed());
        f.is_completed = Some("on".into());
        assert!(f.is_completed());
    }

    #[test]
    fn blank_description_normalizes_to_none() {
        assert!(form("t", "").description_opt().is_none());
        assert!(form("t", "  ").description_opt().is_none());
        assert_eq!(form("t", "hi").description_opt().as_deref(), Some("hi"));
    }

    #[test]
    fn due_date_parses_or_falls_back_to_none() {
        let mut f = form("t", "");
        assert!(f.due_date_parsed().is_none());
        f.due_date = "2026-09-15".into();
        assert_eq!(f.due_date_parsed(), NaiveDate::from_ymd_opt(2026, 9, 15));
        f.due_date = "not a date".into();
        assert!(f.due_date_parsed().is_none());
    }

    #[test]
    fn default_form_due_date_is_tomorrow() {
        let f = TodoForm::with_default_due_date();
        let expected = Utc::now().date_naive() + Duration::days(1);
        assert_eq!(f.due_date, expected.format("%Y-%m-%d").to_string());
        assert!(f.id.is_none());
        assert!(f.title.is_empty());
    }

    #[test]
    fn from_item_round_trips_fields() {
        let item = TodoItem {
            id: 7,
            title: "Ship it".into(),
            description: Some("Before Friday".into()),
            is_completed: true,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 4),
            created_at: Utc::now(),
        };
        let f = TodoForm::from_item(&item);
        assert_eq!(f.id, Some(7));
        assert_eq!(f.title, "Ship it");
        assert_eq!(f.description, "Before Friday");
        assert!(f.is_completed());
        assert_eq!(f.due_date, "2026-09-04");
    }

    #[test]
    fn into_new_uses_server_timestamp() {
        let now = Utc::now();
        let new = form("  Trim me  ", "").into_new(now);
        assert_eq!(new.title, "Trim me");
        assert_eq!(new.created_at, now);
        assert!(new.description.is_none());
        assert!(!new.is_completed);
    }
}
