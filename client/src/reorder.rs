//! Reorder computation for drag-style moves over a (possibly filtered) view.
//!
//! A drag gesture is expressed in the frame of the *visible* sequence: the
//! user moved the item at visible position `from` to visible position `to`.
//! When a filter is active the move has to be mapped back onto the full
//! collection without corrupting the relative order of hidden items. This
//! module implements that mapping as a stable partition and splice:
//!
//! 1. Partition the full collection into the visible subsequence and the
//!    hidden remainder, each keeping its relative order.
//! 2. Move the dragged element within the visible subsequence (remove and
//!    reinsert, a single-element move, not a swap).
//! 3. Splice the permuted visible subsequence back together with the hidden
//!    remainder, which follows it in its original relative order.
//!
//! With full collection `[A,B,C,D,E]` and visible view `[A,C,E]`, moving
//! visible position 0 to visible position 2 yields `[C,E,A,B,D]`: `A` lands
//! just after `E`, and the hidden `B` and `D` keep their relative order.
//!
//! Dropping outside any valid target (`to` is `None`) and dropping an item
//! onto itself are no-ops, reported as `None`.

use std::collections::HashSet;

use crate::types::Todo;

/// Computes the new full ordering for a move within the visible sequence.
///
/// # Arguments
///
/// * `todos` - The full collection in current display order
/// * `visible_ids` - Identifiers of the currently visible items, in display
///   order (typically the output of [`filter_todos`](crate::filter::filter_todos))
/// * `from` - Source index within the visible sequence
/// * `to` - Destination index within the visible sequence, or `None` when
///   the drop landed outside any valid target
///
/// # Returns
///
/// The permuted full collection, or `None` when the gesture is a no-op:
/// missing destination, `from == to`, an out-of-range index, or a visible
/// identifier that is not part of the collection.
#[must_use]
pub fn plan_move(
    todos: &[Todo],
    visible_ids: &[i64],
    from: usize,
    to: Option<usize>,
) -> Option<Vec<Todo>> {
    let to = to?;

    if from == to || from >= visible_ids.len() || to >= visible_ids.len() {
        return None;
    }

    let visible_set: HashSet<i64> = visible_ids.iter().copied().collect();

    // Stable partition: visible items in the order the gesture saw them,
    // hidden items in collection order.
    let mut visible: Vec<Todo> = Vec::with_capacity(visible_ids.len());
    for id in visible_ids {
        visible.push(todos.iter().find(|todo| todo.id == *id)?.clone());
    }
    let hidden: Vec<Todo> = todos
        .iter()
        .filter(|todo| !visible_set.contains(&todo.id))
        .cloned()
        .collect();

    // Single-element move within the visible subsequence.
    let moved = visible.remove(from);
    visible.insert(to, moved);

    visible.extend(hidden);
    Some(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn make_todo(id: i64, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Medium,
            due_date: "2026-08-10T12:00:00Z".parse().unwrap(),
            completed: false,
            created_at: "2026-08-01T09:00:00Z".parse().unwrap(),
            updated_at: "2026-08-01T09:00:00Z".parse().unwrap(),
            order: 0,
        }
    }

    /// Full list [A,B,C,D,E] with ids 1..=5.
    fn full_collection() -> Vec<Todo> {
        vec![
            make_todo(1, "A"),
            make_todo(2, "B"),
            make_todo(3, "C"),
            make_todo(4, "D"),
            make_todo(5, "E"),
        ]
    }

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|todo| todo.title.as_str()).collect()
    }

    #[test]
    fn test_filtered_move_preserves_hidden_relative_order() {
        // Visible view [A,C,E], move A (visible 0) to visible 2
        let todos = full_collection();
        let result = plan_move(&todos, &[1, 3, 5], 0, Some(2)).unwrap();

        assert_eq!(titles(&result), vec!["C", "E", "A", "B", "D"]);
    }

    #[test]
    fn test_unfiltered_move_forward() {
        let todos = full_collection();
        let all_ids: Vec<i64> = todos.iter().map(|t| t.id).collect();

        let result = plan_move(&todos, &all_ids, 0, Some(3)).unwrap();
        assert_eq!(titles(&result), vec!["B", "C", "D", "A", "E"]);
    }

    #[test]
    fn test_unfiltered_move_backward() {
        let todos = full_collection();
        let all_ids: Vec<i64> = todos.iter().map(|t| t.id).collect();

        let result = plan_move(&todos, &all_ids, 4, Some(1)).unwrap();
        assert_eq!(titles(&result), vec!["A", "E", "B", "C", "D"]);
    }

    #[test]
    fn test_move_is_a_move_not_a_swap() {
        let todos = full_collection();
        let all_ids: Vec<i64> = todos.iter().map(|t| t.id).collect();

        // Moving A to position 2 shifts B and C left rather than swapping A/C
        let result = plan_move(&todos, &all_ids, 0, Some(2)).unwrap();
        assert_eq!(titles(&result), vec!["B", "C", "A", "D", "E"]);
    }

    #[test]
    fn test_no_destination_is_noop() {
        let todos = full_collection();
        assert!(plan_move(&todos, &[1, 3, 5], 0, None).is_none());
    }

    #[test]
    fn test_drop_onto_self_is_noop() {
        let todos = full_collection();
        assert!(plan_move(&todos, &[1, 3, 5], 1, Some(1)).is_none());
    }

    #[test]
    fn test_out_of_range_indices_are_noop() {
        let todos = full_collection();
        assert!(plan_move(&todos, &[1, 3, 5], 7, Some(0)).is_none());
        assert!(plan_move(&todos, &[1, 3, 5], 0, Some(3)).is_none());
    }

    #[test]
    fn test_unknown_visible_id_is_noop() {
        let todos = full_collection();
        assert!(plan_move(&todos, &[1, 99], 0, Some(1)).is_none());
    }

    #[test]
    fn test_fully_visible_result_is_permutation() {
        let todos = full_collection();
        let all_ids: Vec<i64> = todos.iter().map(|t| t.id).collect();

        let result = plan_move(&todos, &all_ids, 2, Some(0)).unwrap();
        let mut ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
