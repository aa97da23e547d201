//! Taskdeck - terminal client for the taskdeck backend.
//!
//! This binary exposes the client library's operations as subcommands:
//! authentication, todo CRUD with filtering and reordering, and the
//! backend's AI prioritization/suggestion features.
//!
//! # Environment Variables
//!
//! See the [`taskdeck_client::config`] module for available configuration
//! options.

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskdeck_client::ai::{Assistant, PrioritizeOutcome};
use taskdeck_client::config::Config;
use taskdeck_client::filter::{filter_todos, PriorityFilter, StatusFilter, TodoFilter};
use taskdeck_client::gateway::{ApiError, Gateway};
use taskdeck_client::reorder::plan_move;
use taskdeck_client::session::SessionStore;
use taskdeck_client::store::TodoStore;
use taskdeck_client::types::{Priority, Todo, TodoDraft, TodoPatch};

/// Taskdeck - terminal client for the taskdeck backend.
///
/// Mirrors the server's todo set locally, with filtering, reordering, and
/// AI-assisted prioritization and suggestions.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TASKDECK_SERVER_URL    Backend base URL (required)
    TASKDECK_SESSION_PATH  Session cache directory (default: ~/.taskdeck)
    TASKDECK_TIMEOUT_SECS  HTTP request timeout in seconds (default: 30)

EXAMPLES:
    # Log in and list open urgent todos
    taskdeck login --username ada --password secret
    taskdeck list --status active --priority urgent

    # Add a todo due next Friday
    taskdeck add \"Ship release\" --due 2026-08-14 --priority high

    # Move the first visible item to third place
    taskdeck move 0 2

    # Ask the AI for suggestions and promote the second one
    taskdeck suggest --promote 2
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new account. Log in separately afterwards.
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Log in and cache the session.
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Discard the cached session.
    Logout,

    /// Show the cached session's identity.
    Whoami,

    /// List todos, optionally filtered.
    List {
        /// Case-insensitive substring matched against title and description.
        #[arg(long)]
        search: Option<String>,

        /// Status filter: all, active, or completed.
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter: all, low, medium, high, or urgent.
        #[arg(long, default_value = "all")]
        priority: String,
    },

    /// Create a new todo.
    Add {
        /// Task title.
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Priority: low, medium, high, or urgent.
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Due date, RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        due: String,
    },

    /// Update fields of an existing todo.
    Edit {
        /// Server-assigned todo id.
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Priority: low, medium, high, or urgent.
        #[arg(long)]
        priority: Option<String>,

        /// Due date, RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,

        /// Set the completion flag directly.
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Toggle a todo's completion flag.
    Done {
        /// Server-assigned todo id.
        id: i64,
    },

    /// Delete a todo.
    Rm {
        /// Server-assigned todo id.
        id: i64,
    },

    /// Move a visible item to a new position in the list.
    ///
    /// Positions are 0-based indices into the currently visible (filtered)
    /// sequence; hidden items keep their relative order.
    Move {
        /// Source position among the visible items.
        from: usize,

        /// Destination position among the visible items.
        to: usize,

        /// Case-insensitive substring matched against title and description.
        #[arg(long)]
        search: Option<String>,

        /// Status filter: all, active, or completed.
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter: all, low, medium, high, or urgent.
        #[arg(long, default_value = "all")]
        priority: String,
    },

    /// Ask the AI to re-prioritize the todo list.
    Prioritize,

    /// Ask the AI for suggested tasks.
    Suggest {
        /// Promote the n-th suggestion (1-based) into a todo.
        #[arg(long)]
        promote: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let sessions = SessionStore::new(config.session_path.clone());
    let gateway = Gateway::from_config(&config, sessions.clone());

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let message = gateway.register(&username, &email, &password).await?;
            println!("{message}");
            Ok(())
        }

        Command::Login { username, password } => match gateway.login(&username, &password).await {
            Ok(session) => {
                println!("Logged in as {} <{}>", session.username, session.email);
                Ok(())
            }
            Err(ApiError::Unauthorized) => bail!("Invalid username or password"),
            Err(e) => Err(e.into()),
        },

        Command::Logout => {
            sessions.clear()?;
            println!("Logged out.");
            Ok(())
        }

        Command::Whoami => {
            match sessions.load()? {
                Some(session) => println!(
                    "{} <{}> (user id {})",
                    session.username, session.email, session.user_id
                ),
                None => println!("Not logged in."),
            }
            Ok(())
        }

        Command::List {
            search,
            status,
            priority,
        } => {
            let filter = build_filter(search, &status, &priority)?;
            Ok(run_list(gateway, &filter).await?)
        }

        Command::Add {
            title,
            description,
            priority,
            due,
        } => {
            let draft = TodoDraft {
                title,
                description,
                priority: parse_priority(&priority)?,
                due_date: parse_due(&due)?,
            };
            let mut store = TodoStore::new(gateway);
            let todo = store.create(draft).await?;
            println!("Created #{}: {}", todo.id, todo.title);
            Ok(())
        }

        Command::Edit {
            id,
            title,
            description,
            priority,
            due,
            completed,
        } => {
            let patch = TodoPatch {
                title,
                description,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                due_date: due.as_deref().map(parse_due).transpose()?,
                completed,
            };
            if patch.is_empty() {
                bail!("Nothing to update; pass at least one field");
            }

            let mut store = TodoStore::new(gateway);
            store.load().await?;
            let todo = store.update(id, patch).await?;
            println!("Updated #{}: {}", todo.id, todo.title);
            Ok(())
        }

        Command::Done { id } => {
            let mut store = TodoStore::new(gateway);
            store.load().await?;
            let todo = store.toggle_completed(id).await?;
            let state = if todo.completed { "done" } else { "open" };
            println!("#{} is now {state}", todo.id);
            Ok(())
        }

        Command::Rm { id } => {
            let mut store = TodoStore::new(gateway);
            store.load().await?;
            store.delete(id).await?;
            println!("Deleted #{id}");
            Ok(())
        }

        Command::Move {
            from,
            to,
            search,
            status,
            priority,
        } => {
            let filter = build_filter(search, &status, &priority)?;
            Ok(run_move(gateway, &filter, from, to).await?)
        }

        Command::Prioritize => {
            let mut store = TodoStore::new(gateway);
            store.load().await?;

            let mut assistant = Assistant::new();
            match assistant.prioritize(&mut store).await? {
                PrioritizeOutcome::Applied(changed) => {
                    println!("Priorities updated for {changed} todo(s).");
                    print_todos(&store.todos().iter().collect::<Vec<_>>());
                }
                PrioritizeOutcome::NoUpdates => println!("No priority updates available."),
                PrioritizeOutcome::NothingToDo => println!("No todos to prioritize."),
            }
            Ok(())
        }

        Command::Suggest { promote } => {
            let mut store = TodoStore::new(gateway);
            let mut assistant = Assistant::new();

            let suggestions = assistant.suggest(&store).await?.to_vec();
            if suggestions.is_empty() {
                println!("No suggestions available.");
                return Ok(());
            }

            for (index, suggestion) in suggestions.iter().enumerate() {
                println!(
                    "{:>2}. [{}] {}",
                    index + 1,
                    suggestion.priority,
                    suggestion.suggested_task
                );
            }

            if let Some(position) = promote {
                let chosen = position
                    .checked_sub(1)
                    .and_then(|index| suggestions.get(index))
                    .with_context(|| format!("No suggestion at position {position}"))?;
                let todo = assistant.promote(chosen.id, &mut store).await?;
                println!(
                    "Promoted to #{}: {} (due {})",
                    todo.id,
                    todo.title,
                    todo.due_date.format("%Y-%m-%d")
                );
            }
            Ok(())
        }
    }
}

/// Loads the collection and prints the filtered view.
async fn run_list(gateway: Gateway, filter: &TodoFilter) -> taskdeck_client::Result<()> {
    let mut store = TodoStore::new(gateway);
    store.load().await?;

    let visible = filter_todos(store.todos(), filter);
    if visible.is_empty() {
        if filter.is_unrestricted() {
            println!("No todos yet.");
        } else {
            println!("No todos match the filters.");
        }
        return Ok(());
    }

    let active = store.todos().iter().filter(|t| !t.completed).count();
    println!("{} total, {} active", store.len(), active);
    print_todos(&visible);
    Ok(())
}

/// Loads the collection, maps the visible move onto the full list, and
/// commits the new ordering.
async fn run_move(
    gateway: Gateway,
    filter: &TodoFilter,
    from: usize,
    to: usize,
) -> taskdeck_client::Result<()> {
    let mut store = TodoStore::new(gateway);
    store.load().await?;

    let visible_ids: Vec<i64> = filter_todos(store.todos(), filter)
        .iter()
        .map(|todo| todo.id)
        .collect();

    match plan_move(store.todos(), &visible_ids, from, Some(to)) {
        Some(new_sequence) => {
            store.reorder(new_sequence)?;
            print_todos(&store.todos().iter().collect::<Vec<_>>());
            Ok(())
        }
        None => {
            println!("Nothing to move.");
            Ok(())
        }
    }
}

fn print_todos(todos: &[&Todo]) {
    for (position, todo) in todos.iter().enumerate() {
        let mark = if todo.completed { "x" } else { " " };
        println!(
            "{position:>3} [{mark}] #{:<5} {:<8} due {}  {}",
            todo.id,
            todo.priority,
            todo.due_date.format("%Y-%m-%d"),
            todo.title
        );
    }
}

fn build_filter(
    search: Option<String>,
    status: &str,
    priority: &str,
) -> anyhow::Result<TodoFilter> {
    let status: StatusFilter = status.parse().map_err(anyhow::Error::msg)?;
    let priority: PriorityFilter = priority.parse().map_err(anyhow::Error::msg)?;
    Ok(TodoFilter {
        search,
        status,
        priority,
    })
}

fn parse_priority(value: &str) -> anyhow::Result<Priority> {
    value.parse().map_err(anyhow::Error::msg)
}

/// Initializes tracing with an env-filter; defaults to `warn` so command
/// output stays clean unless `RUST_LOG` asks for more.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();
}

/// Parses a due date given as RFC 3339 or as a plain `YYYY-MM-DD` day
/// (interpreted as midnight UTC).
fn parse_due(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid due date '{value}' (expected RFC 3339 or YYYY-MM-DD)"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
