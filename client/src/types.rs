//! Data types shared across the taskdeck client.
//!
//! This module defines the wire schema spoken with the backend (todos, AI
//! suggestions, auth payloads) plus the locally cached session. All types
//! serialize to camelCase JSON; priorities use the backend's uppercase
//! string form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority as understood by the backend.
///
/// Ordering follows urgency: `Low < Medium < High < Urgent`.
///
/// # Examples
///
/// ```
/// use taskdeck_client::types::Priority;
///
/// let p: Priority = "urgent".parse().unwrap();
/// assert_eq!(p, Priority::Urgent);
/// assert_eq!(p.to_string(), "URGENT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Returns the backend's uppercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            other => Err(format!(
                "unknown priority '{other}' (expected LOW, MEDIUM, HIGH, or URGENT)"
            )),
        }
    }
}

/// A single task record mirrored from the server.
///
/// The `order` field is client-local: it drives list rendering, is dense
/// within the currently loaded set, and is never sent to or received from
/// the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier, unique and stable across edits.
    pub id: i64,

    /// Task title, non-empty.
    pub title: String,

    /// Free-form description, may be empty.
    pub description: String,

    /// Current priority.
    pub priority: Priority,

    /// Due timestamp.
    pub due_date: DateTime<Utc>,

    /// Completion flag.
    pub completed: bool,

    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Server-side last-update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Client-local display order.
    #[serde(skip)]
    pub order: usize,
}

/// Payload for creating a new todo (`POST /todos`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
}

/// Partial update payload (`PUT /todos/{id}`).
///
/// `None` fields are omitted from the JSON body so the server leaves them
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

/// An AI-suggested task (`POST /ai/suggest` response element).
///
/// Suggestions are ephemeral: they exist only in the adapter's local result
/// set between generation and promotion or dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub suggested_task: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// A server-computed priority ranking element (`POST /ai/prioritize`
/// response element). Only `id` and `priority` are consumed by the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityUpdate {
    pub id: i64,
    pub title: String,
    pub priority: Priority,
    pub is_completed: bool,
}

/// The authenticated user's identity and bearer token.
///
/// Created on successful login, cached durably by
/// [`SessionStore`](crate::session::SessionStore), destroyed on logout or
/// on any authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Login request payload (`POST /auth/login`).
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration request payload (`POST /auth/register`).
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            user_id: response.id,
            username: response.username,
            email: response.email,
            token: response.token,
        }
    }
}

/// Registration response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todo_json() -> &'static str {
        r#"{
            "id": 42,
            "title": "Write report",
            "description": "Quarterly numbers",
            "priority": "HIGH",
            "dueDate": "2026-08-10T12:00:00Z",
            "completed": false,
            "createdAt": "2026-08-01T09:00:00Z",
            "updatedAt": "2026-08-03T15:30:00Z"
        }"#
    }

    #[test]
    fn priority_serializes_to_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"LOW\"");
        assert_eq!(
            serde_json::to_string(&Priority::Medium).unwrap(),
            "\"MEDIUM\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
        assert_eq!(
            serde_json::to_string(&Priority::Urgent).unwrap(),
            "\"URGENT\""
        );
    }

    #[test]
    fn priority_orders_by_urgency() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" urgent ".parse::<Priority>().unwrap(), Priority::Urgent);
    }

    #[test]
    fn priority_rejects_unknown_values() {
        let err = "critical".parse::<Priority>().unwrap_err();
        assert!(err.contains("CRITICAL"));
    }

    #[test]
    fn todo_deserializes_from_server_payload() {
        let todo: Todo = serde_json::from_str(sample_todo_json()).unwrap();

        assert_eq!(todo.id, 42);
        assert_eq!(todo.title, "Write report");
        assert_eq!(todo.priority, Priority::High);
        assert!(!todo.completed);
        // Client-local field is never part of the wire form
        assert_eq!(todo.order, 0);
    }

    #[test]
    fn todo_serialization_omits_order() {
        let mut todo: Todo = serde_json::from_str(sample_todo_json()).unwrap();
        todo.order = 7;

        let value = serde_json::to_value(&todo).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("dueDate"));
        assert!(object.contains_key("createdAt"));
        assert!(!object.contains_key("order"));
    }

    #[test]
    fn patch_skips_unset_fields() {
        let patch = TodoPatch {
            title: Some("New title".to_string()),
            ..TodoPatch::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["title"], "New title");
    }

    #[test]
    fn patch_is_empty_when_default() {
        assert!(TodoPatch::default().is_empty());

        let patch = TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = TodoDraft {
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: Priority::Low,
            due_date: "2026-08-10T12:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&draft).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("dueDate"));
        assert_eq!(object["priority"], "LOW");
    }

    #[test]
    fn priority_update_uses_is_completed_wire_name() {
        let json = r#"{"id": 1, "title": "t", "priority": "URGENT", "isCompleted": true}"#;
        let update: PriorityUpdate = serde_json::from_str(json).unwrap();

        assert_eq!(update.id, 1);
        assert_eq!(update.priority, Priority::Urgent);
        assert!(update.is_completed);
    }

    #[test]
    fn login_response_converts_to_session() {
        let json = r#"{"token": "tok-1", "type": "Bearer", "id": 9, "username": "ada", "email": "ada@example.com"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let session: Session = response.into();

        assert_eq!(session.user_id, 9);
        assert_eq!(session.username, "ada");
        assert_eq!(session.token, "tok-1");
    }

    #[test]
    fn suggestion_deserializes_from_server_payload() {
        let json = r#"{"id": 3, "suggestedTask": "Plan sprint", "priority": "MEDIUM", "createdAt": "2026-08-05T08:00:00Z"}"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();

        assert_eq!(suggestion.id, 3);
        assert_eq!(suggestion.suggested_task, "Plan sprint");
        assert_eq!(suggestion.priority, Priority::Medium);
    }
}
