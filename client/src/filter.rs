//! Filter and search derivation over the todo collection.
//!
//! This is a pure view: a function from (collection, search text, status
//! filter, priority filter) to a filtered sequence. No side effects, no
//! network calls, input order preserved. Search matches case-insensitively
//! against title and description (substring, not tokenized); the three
//! criteria compose with logical AND.

use std::str::FromStr;

use crate::types::{Priority, Todo};

/// Completion-status criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only todos not yet completed.
    Active,
    /// Only completed todos.
    Completed,
}

impl StatusFilter {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!(
                "unknown status filter '{other}' (expected all, active, or completed)"
            )),
        }
    }
}

/// Priority criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    /// No priority restriction.
    #[default]
    All,
    /// Only todos with exactly this priority.
    Only(Priority),
}

impl PriorityFilter {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => todo.priority == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>().map(PriorityFilter::Only)
    }
}

/// Combined filter criteria. The default matches everything.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Case-insensitive substring matched against title and description.
    /// `None` (or an empty string) matches everything.
    pub search: Option<String>,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl TodoFilter {
    /// Returns `true` if the todo satisfies every criterion.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                todo.title.to_lowercase().contains(&needle)
                    || todo.description.to_lowercase().contains(&needle)
            }
        };

        matches_search && self.status.matches(todo) && self.priority.matches(todo)
    }

    /// Returns `true` if no criterion restricts the view.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self.search.as_deref(), None | Some(""))
            && self.status == StatusFilter::All
            && self.priority == PriorityFilter::All
    }
}

/// Derives the filtered view of the collection, preserving input order.
#[must_use]
pub fn filter_todos<'a>(todos: &'a [Todo], filter: &TodoFilter) -> Vec<&'a Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_todo(
        id: i64,
        title: &str,
        description: &str,
        priority: Priority,
        completed: bool,
    ) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            due_date: "2026-08-10T12:00:00Z".parse().unwrap(),
            completed,
            created_at: "2026-08-01T09:00:00Z".parse().unwrap(),
            updated_at: "2026-08-01T09:00:00Z".parse().unwrap(),
            order: 0,
        }
    }

    fn sample_collection() -> Vec<Todo> {
        vec![
            make_todo(1, "Ship release", "cut the tag", Priority::Urgent, true),
            make_todo(2, "Water plants", "", Priority::Low, false),
            make_todo(3, "File taxes", "before deadline", Priority::Urgent, true),
            make_todo(4, "Read book", "sci-fi", Priority::Medium, false),
            make_todo(5, "Fix bug", "toggle revert", Priority::High, true),
        ]
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let todos = sample_collection();
        let filter = TodoFilter::default();

        assert!(filter.is_unrestricted());
        assert_eq!(filter_todos(&todos, &filter).len(), todos.len());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let todos = sample_collection();
        let filter = TodoFilter {
            search: Some("SHIP".to_string()),
            ..TodoFilter::default()
        };

        let visible = filter_todos(&todos, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_search_matches_description_too() {
        let todos = sample_collection();
        let filter = TodoFilter {
            search: Some("deadline".to_string()),
            ..TodoFilter::default()
        };

        let visible = filter_todos(&todos, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let todos = sample_collection();
        let filter = TodoFilter {
            search: Some(String::new()),
            ..TodoFilter::default()
        };

        assert_eq!(filter_todos(&todos, &filter).len(), todos.len());
    }

    #[test]
    fn test_status_filter_active() {
        let todos = sample_collection();
        let filter = TodoFilter {
            status: StatusFilter::Active,
            ..TodoFilter::default()
        };

        let ids: Vec<i64> = filter_todos(&todos, &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_status_and_priority_compose_with_and() {
        // 5 todos: 2 completed+URGENT, 3 other combinations
        let todos = sample_collection();
        let filter = TodoFilter {
            status: StatusFilter::Completed,
            priority: PriorityFilter::Only(Priority::Urgent),
            ..TodoFilter::default()
        };

        let visible = filter_todos(&todos, &filter);
        let ids: Vec<i64> = visible.iter().map(|t| t.id).collect();

        // Exactly the two matching entries, order preserved
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_all_three_criteria_compose() {
        let todos = sample_collection();
        let filter = TodoFilter {
            search: Some("tag".to_string()),
            status: StatusFilter::Completed,
            priority: PriorityFilter::Only(Priority::Urgent),
        };

        let visible = filter_todos(&todos, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_status_filter_parses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Active".parse::<StatusFilter>().unwrap(),
            StatusFilter::Active
        );
        assert_eq!(
            "COMPLETED".parse::<StatusFilter>().unwrap(),
            StatusFilter::Completed
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_priority_filter_parses() {
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "high".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::High)
        );
        assert!("extreme".parse::<PriorityFilter>().is_err());
    }
}
