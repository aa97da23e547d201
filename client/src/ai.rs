//! AI-assistant adapter: prioritization and task suggestions.
//!
//! The adapter fronts the backend's two AI endpoints. Both are
//! fire-and-forget from the caller's perspective but serialized against a
//! single `processing` flag, so only one AI operation runs at a time.
//!
//! - **Prioritize** asks the server for an `(id, priority)` ranking and
//!   merges it into the store. An empty ranking is an informational no-op,
//!   not an error.
//! - **Suggest** stages a set of suggested tasks in local ephemeral state.
//!   A suggestion lives there until it is promoted into a real todo (a
//!   `create` with the suggestion's priority and a due date 7 days out) or
//!   the adapter is dismissed, at which point the rest are discarded
//!   without persistence.

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::ApiError;
use crate::store::{StoreError, TodoStore};
use crate::types::{Suggestion, Todo, TodoDraft};

/// Default due-date horizon for promoted suggestions, in days.
const PROMOTED_DUE_DAYS: i64 = 7;

/// Errors that can occur during AI operations.
#[derive(Error, Debug)]
pub enum AiError {
    /// Another AI operation is still in flight.
    #[error("an AI operation is already running")]
    Busy,

    /// The referenced suggestion is not in the staged set.
    #[error("no staged suggestion with id {0}")]
    UnknownSuggestion(i64),

    /// The backend call failed.
    #[error("gateway error: {0}")]
    Api(#[from] ApiError),

    /// Promoting a suggestion into the store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Outcome of a prioritization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrioritizeOutcome {
    /// The ranking was merged; this many todos changed priority.
    Applied(usize),

    /// The server returned an empty ranking. Informational, not an error.
    NoUpdates,

    /// The collection is empty; nothing to prioritize.
    NothingToDo,
}

/// Stages AI results between generation and promotion or dismissal.
#[derive(Debug, Default)]
pub struct Assistant {
    processing: bool,
    suggestions: Vec<Suggestion>,
}

impl Assistant {
    /// Creates an idle assistant with no staged suggestions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently staged suggestions.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Returns `true` if an AI operation is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Requests a priority ranking and merges it into the store.
    ///
    /// # Errors
    ///
    /// Returns `AiError::Busy` when another AI operation is running, or a
    /// wrapped gateway error when the request fails (the collection is left
    /// unchanged in that case).
    pub async fn prioritize(&mut self, store: &mut TodoStore) -> Result<PrioritizeOutcome, AiError> {
        if store.is_empty() {
            return Ok(PrioritizeOutcome::NothingToDo);
        }
        if self.processing {
            return Err(AiError::Busy);
        }

        self.processing = true;
        let result = store.gateway().prioritize().await;
        self.processing = false;

        let updates = result?;
        if updates.is_empty() {
            debug!("Prioritization returned no updates");
            return Ok(PrioritizeOutcome::NoUpdates);
        }

        let changed = store.merge_priorities(&updates);
        info!(received = updates.len(), changed, "Applied priority ranking");
        Ok(PrioritizeOutcome::Applied(changed))
    }

    /// Requests suggested tasks and replaces the staged set.
    ///
    /// # Errors
    ///
    /// Returns `AiError::Busy` when another AI operation is running, or a
    /// wrapped gateway error when the request fails (previously staged
    /// suggestions are kept in that case).
    pub async fn suggest(&mut self, store: &TodoStore) -> Result<&[Suggestion], AiError> {
        if self.processing {
            return Err(AiError::Busy);
        }

        self.processing = true;
        let result = store.gateway().suggest().await;
        self.processing = false;

        self.suggestions = result?;
        info!(count = self.suggestions.len(), "Staged suggestions");
        Ok(&self.suggestions)
    }

    /// Promotes a staged suggestion into a real todo.
    ///
    /// The create uses the suggested text as title, copies the suggestion's
    /// priority, defaults the due date to 7 days out, and notes the
    /// suggestion's creation date in the description. On success the
    /// suggestion leaves the staged set.
    ///
    /// # Errors
    ///
    /// Returns `AiError::UnknownSuggestion` when the id is not staged, or a
    /// wrapped store error when the create fails (the suggestion stays
    /// staged so the user can retry).
    pub async fn promote(&mut self, id: i64, store: &mut TodoStore) -> Result<Todo, AiError> {
        let Some(suggestion) = self.suggestions.iter().find(|s| s.id == id).cloned() else {
            return Err(AiError::UnknownSuggestion(id));
        };

        let draft = TodoDraft {
            title: suggestion.suggested_task.clone(),
            description: format!(
                "AI suggested task (created {})",
                suggestion.created_at.format("%Y-%m-%d")
            ),
            priority: suggestion.priority,
            due_date: Utc::now() + Duration::days(PROMOTED_DUE_DAYS),
        };

        let todo = store.create(draft).await?;
        self.suggestions.retain(|s| s.id != id);
        info!(suggestion_id = id, todo_id = todo.id, "Promoted suggestion");
        Ok(todo)
    }

    /// Discards all staged suggestions.
    pub fn dismiss(&mut self) {
        if !self.suggestions.is_empty() {
            debug!(count = self.suggestions.len(), "Discarding suggestions");
        }
        self.suggestions.clear();
    }
}
