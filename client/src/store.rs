//! Todo collection store.
//!
//! The store is the single source of truth for the todo list: it owns the
//! in-memory mirror of the server's todo set and mediates every create/
//! read/update/delete/reorder/toggle operation. Other components only read
//! the collection (via [`todos`](TodoStore::todos)) or go through the
//! mutator methods; nothing else holds a mutable reference into it.
//!
//! # Reconciliation
//!
//! Mutations follow `idle → pending → {committed | reverted-with-error}`.
//! Writes never touch local state before server confirmation, with one
//! deliberate exception: [`toggle_completed`](TodoStore::toggle_completed)
//! flips the local flag optimistically for responsiveness and restores the
//! captured pre-toggle value if the request fails. Overlapping edits to the
//! same identifier are last-writer-wins on the local cache; this is a
//! documented limitation, not a hardened-against case.
//!
//! Display order is client-local: dense indices `0..n` are assigned on
//! load, after a confirmed delete, and on every successful reorder.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{ApiError, Gateway};
use crate::types::{PriorityUpdate, Todo, TodoDraft, TodoPatch};

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A draft was submitted with an empty (or whitespace-only) title.
    #[error("title cannot be empty")]
    EmptyTitle,

    /// The operation referenced an identifier not present in the collection.
    #[error("no todo with id {0}")]
    UnknownId(i64),

    /// A reorder sequence did not contain exactly the current identifiers.
    #[error("reorder sequence is not a permutation of the current collection")]
    NotPermutation,

    /// The backend rejected or failed the operation.
    #[error("gateway error: {0}")]
    Api(#[from] ApiError),
}

/// Single owner of the in-memory todo collection.
pub struct TodoStore {
    gateway: Gateway,
    todos: Vec<Todo>,
    last_error: Option<String>,
}

impl TodoStore {
    /// Creates an empty store backed by the given gateway.
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            todos: Vec::new(),
            last_error: None,
        }
    }

    /// Returns the gateway this store talks through.
    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Returns a read-only view of the collection in display order.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Returns the number of todos currently loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the todo with the given identifier, if loaded.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns the message of the most recent failed operation, if any.
    ///
    /// Cleared at the start of every operation.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the full todo set from the backend, replacing local state.
    ///
    /// On failure the prior state is left intact and the error is surfaced;
    /// there is no automatic retry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Api` when the fetch fails.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.last_error = None;

        match self.gateway.fetch_todos().await {
            Ok(mut todos) => {
                for (index, todo) in todos.iter_mut().enumerate() {
                    todo.order = index;
                }
                info!(count = todos.len(), "Loaded todos");
                self.todos = todos;
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e.into())
            }
        }
    }

    /// Creates a new todo and appends the server's representation.
    ///
    /// The title is validated client-side before any network call. Local
    /// state is only mutated after the server confirms the create.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyTitle` for a blank title, or
    /// `StoreError::Api` when the backend rejects the create (local state
    /// is untouched in both cases).
    pub async fn create(&mut self, draft: TodoDraft) -> Result<Todo, StoreError> {
        self.last_error = None;

        if draft.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        match self.gateway.create_todo(&draft).await {
            Ok(mut todo) => {
                todo.order = self.todos.len();
                self.todos.push(todo.clone());
                Ok(todo)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e.into())
            }
        }
    }

    /// Sends a partial update and reconciles the server's representation
    /// into the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownId` without a network call when the
    /// identifier is not loaded, or `StoreError::Api` when the backend
    /// rejects the update (local state unchanged).
    pub async fn update(&mut self, id: i64, patch: TodoPatch) -> Result<Todo, StoreError> {
        self.last_error = None;

        if self.get(id).is_none() {
            return Err(StoreError::UnknownId(id));
        }

        match self.gateway.update_todo(id, &patch).await {
            Ok(server) => Ok(self.reconcile(server)),
            Err(e) => {
                self.record_error(&e);
                Err(e.into())
            }
        }
    }

    /// Optimistically flips the completion flag, then reconciles with the
    /// server.
    ///
    /// The pre-toggle value is captured before the local mutation; on
    /// failure that captured value is restored. Re-flipping the current
    /// value instead would corrupt an entry whose flag changed while the
    /// request was in flight.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownId` when the identifier is not loaded,
    /// or `StoreError::Api` after reverting the optimistic flip.
    pub async fn toggle_completed(&mut self, id: i64) -> Result<Todo, StoreError> {
        self.last_error = None;

        let Some(entry) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return Err(StoreError::UnknownId(id));
        };

        let previous = entry.completed;
        entry.completed = !previous;

        match self.gateway.toggle_todo(id).await {
            Ok(server) => Ok(self.reconcile(server)),
            Err(e) => {
                // Restore the captured value; the entry may have been
                // removed while the request was in flight.
                if let Some(entry) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    entry.completed = previous;
                }
                self.record_error(&e);
                Err(e.into())
            }
        }
    }

    /// Deletes a todo, removing the local entry only after server
    /// confirmation. There is no optimistic removal to compensate for.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownId` when the identifier is not loaded,
    /// or `StoreError::Api` when the delete fails (collection unchanged).
    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.last_error = None;

        if self.get(id).is_none() {
            return Err(StoreError::UnknownId(id));
        }

        match self.gateway.delete_todo(id).await {
            Ok(()) => {
                self.todos.retain(|todo| todo.id != id);
                self.renumber();
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e.into())
            }
        }
    }

    /// Commits a new ordering of the collection.
    ///
    /// Local-only: the backend does not persist ordering. The sequence must
    /// be a permutation of the current collection; each entry is assigned a
    /// fresh dense order index matching its position.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotPermutation` when the sequence does not
    /// contain exactly the current identifiers.
    pub fn reorder(&mut self, new_sequence: Vec<Todo>) -> Result<(), StoreError> {
        let mut current: Vec<i64> = self.todos.iter().map(|todo| todo.id).collect();
        let mut proposed: Vec<i64> = new_sequence.iter().map(|todo| todo.id).collect();
        current.sort_unstable();
        proposed.sort_unstable();

        if current != proposed {
            return Err(StoreError::NotPermutation);
        }

        self.todos = new_sequence;
        self.renumber();
        debug!(count = self.todos.len(), "Reordered todos");
        Ok(())
    }

    /// Applies `(id, priority)` pairs to matching entries.
    ///
    /// Identifiers with no local match are ignored. Returns the number of
    /// entries whose priority actually changed.
    pub fn merge_priorities(&mut self, updates: &[PriorityUpdate]) -> usize {
        let mut changed = 0;

        for update in updates {
            if let Some(entry) = self.todos.iter_mut().find(|todo| todo.id == update.id) {
                if entry.priority != update.priority {
                    entry.priority = update.priority;
                    changed += 1;
                }
            }
        }

        if changed > 0 {
            debug!(changed, "Merged priority updates");
        }
        changed
    }

    /// Replaces the local entry matching the server copy, preserving its
    /// display order. A response for an entry that was removed while the
    /// request was in flight is passed through without re-inserting it.
    fn reconcile(&mut self, server: Todo) -> Todo {
        if let Some(entry) = self.todos.iter_mut().find(|todo| todo.id == server.id) {
            let order = entry.order;
            *entry = server;
            entry.order = order;
            entry.clone()
        } else {
            server
        }
    }

    /// Reassigns dense order indices matching current positions.
    fn renumber(&mut self) {
        for (index, todo) in self.todos.iter_mut().enumerate() {
            todo.order = index;
        }
    }

    fn record_error(&mut self, error: &ApiError) {
        warn!(error = %error, "Store operation failed");
        self.last_error = Some(error.to_string());
    }
}
