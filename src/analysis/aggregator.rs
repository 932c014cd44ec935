//! Task aggregation and completion statistics.
//!
//! This module joins tasks to their owners and computes the completion
//! counts used by the console report and the exports.

use crate::models::{Task, User};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Completed vs. total tasks for one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCount {
    pub done: usize,
    pub total: usize,
}

/// Tasks whose completion flag is exactly `true`, in source order.
pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_done()).collect()
}

/// Count completed and total tasks.
pub fn count_completion(tasks: &[Task]) -> CompletionCount {
    CompletionCount {
        done: completed_tasks(tasks).len(),
        total: tasks.len(),
    }
}

/// Build a user id to username lookup. Users without an id are skipped;
/// a later duplicate id replaces an earlier one.
pub fn username_lookup(users: &[User]) -> HashMap<i64, Option<String>> {
    users
        .iter()
        .filter_map(|u| u.id.map(|id| (id, u.username.clone())))
        .collect()
}

/// Group tasks by owner key, keeping first-seen key order and source order
/// within each group.
pub fn group_by_owner(tasks: &[Task]) -> IndexMap<String, Vec<&Task>> {
    let mut grouped: IndexMap<String, Vec<&Task>> = IndexMap::new();

    for task in tasks {
        grouped.entry(task.owner_key()).or_default().push(task);
    }

    grouped
}

/// Per-owner completion counts in first-seen owner order.
pub fn completion_counts(tasks: &[Task]) -> IndexMap<String, CompletionCount> {
    let mut counts: IndexMap<String, CompletionCount> = IndexMap::new();

    for task in tasks {
        let entry = counts.entry(task.owner_key()).or_default();
        entry.total += 1;
        if task.is_done() {
            entry.done += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn create_test_task(user_id: i64, title: &str, completed: Value) -> Task {
        Task {
            user_id: Some(user_id),
            title: Some(Value::from(title)),
            completed: Some(completed),
        }
    }

    fn create_test_user(id: i64, username: &str) -> User {
        User {
            id: Some(id),
            name: None,
            username: Some(username.to_string()),
        }
    }

    #[test]
    fn test_completed_tasks_keeps_order() {
        let tasks = vec![
            create_test_task(1, "a", json!(true)),
            create_test_task(1, "b", json!(false)),
            create_test_task(1, "c", json!(true)),
            create_test_task(1, "d", json!("true")),
        ];

        let titles: Vec<_> = completed_tasks(&tasks)
            .into_iter()
            .map(|t| t.title_text())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_count_completion_empty() {
        assert_eq!(count_completion(&[]), CompletionCount { done: 0, total: 0 });
    }

    #[test]
    fn test_username_lookup() {
        let users = vec![
            create_test_user(1, "Bret"),
            User::default(),
            create_test_user(2, "Antonette"),
            create_test_user(1, "Bret2"),
        ];

        let lookup = username_lookup(&users);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&1), Some(&Some("Bret2".to_string())));
        assert_eq!(lookup.get(&2), Some(&Some("Antonette".to_string())));
    }

    #[test]
    fn test_group_by_owner_first_seen_order() {
        let tasks = vec![
            create_test_task(3, "x", json!(false)),
            create_test_task(1, "y", json!(true)),
            create_test_task(3, "z", json!(true)),
            Task::default(),
        ];

        let grouped = group_by_owner(&tasks);
        let keys: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(keys, vec!["3", "1", "null"]);
        assert_eq!(grouped["3"].len(), 2);
        assert_eq!(grouped["3"][1].title_text(), "z");
    }

    #[test]
    fn test_completion_counts() {
        let tasks = vec![
            create_test_task(1, "a", json!(true)),
            create_test_task(2, "b", json!(false)),
            create_test_task(1, "c", json!(false)),
            create_test_task(1, "d", json!(true)),
        ];

        let counts = completion_counts(&tasks);
        assert_eq!(counts["1"], CompletionCount { done: 2, total: 3 });
        assert_eq!(counts["2"], CompletionCount { done: 0, total: 1 });
    }
}
