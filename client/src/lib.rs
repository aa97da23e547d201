//! Taskdeck Client - terminal client for the taskdeck backend.
//!
//! This crate provides the client-side state layer for a task-management
//! backend: an authenticated API gateway, a durable session cache, an
//! in-memory todo store with optimistic updates and server reconciliation,
//! pure filter/search derivation, reorder computation over filtered views,
//! and an adapter for the backend's AI endpoints.
//!
//! # Overview
//!
//! The [`store::TodoStore`] is the single source of truth for the todo
//! collection; every mutation goes through it and is reconciled against the
//! server's response. The [`gateway::Gateway`] attaches the cached bearer
//! token to outgoing requests and clears the session on any authorization
//! failure, forcing re-authentication. Filtering and reordering are pure
//! computations over the collection; the [`ai::Assistant`] stages ephemeral
//! suggestions and merges server-computed priority rankings.
//!
//! # Modules
//!
//! - [`types`]: Wire and domain types (todos, suggestions, session, auth)
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Crate-level error type
//! - [`session`]: Durable session cache
//! - [`gateway`]: HTTP client for the backend's REST contract
//! - [`store`]: Todo collection store with server reconciliation
//! - [`filter`]: Filter/search derivation
//! - [`reorder`]: Reorder computation for filtered views
//! - [`ai`]: AI prioritization and suggestion adapter

pub mod ai;
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod reorder;
pub mod session;
pub mod store;
pub mod types;

pub use ai::{AiError, Assistant, PrioritizeOutcome};
pub use config::{Config, ConfigError};
pub use error::{ClientError, Result};
pub use filter::{filter_todos, PriorityFilter, StatusFilter, TodoFilter};
pub use gateway::{ApiError, Gateway};
pub use reorder::plan_move;
pub use session::{SessionError, SessionStore};
pub use store::{StoreError, TodoStore};
pub use types::{Priority, PriorityUpdate, Session, Suggestion, Todo, TodoDraft, TodoPatch};
