//! Per-employee progress report.

use crate::analysis::{completed_tasks, count_completion, CompletionCount};
use crate::models::{Task, User};
use std::fmt;

/// Completed-task summary for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub employee_name: String,
    pub count: CompletionCount,
    /// Titles of completed tasks, in source order.
    pub completed_titles: Vec<String>,
}

impl ProgressReport {
    /// Build a report, or `None` when the user has no display name.
    pub fn build(user: &User, tasks: &[Task]) -> Option<Self> {
        let employee_name = user.display_name()?.to_string();

        let completed_titles = completed_tasks(tasks)
            .into_iter()
            .map(|t| t.title_text())
            .collect();

        Some(Self {
            employee_name,
            count: count_completion(tasks),
            completed_titles,
        })
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Employee {} is done with tasks({}/{}):",
            self.employee_name, self.count.done, self.count.total
        )?;
        for title in &self.completed_titles {
            writeln!(f, "\t {}", title)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ervin() -> User {
        User {
            id: Some(2),
            name: Some("Ervin Howell".to_string()),
            username: Some("Antonette".to_string()),
        }
    }

    #[test]
    fn test_report_eight_of_twenty() {
        let tasks: Vec<Task> = (0..20)
            .map(|i| Task {
                user_id: Some(2),
                title: Some(json!(format!("task {}", i))),
                completed: Some(json!(i % 5 < 2)),
            })
            .collect();

        let report = ProgressReport::build(&ervin(), &tasks).unwrap();
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Employee Ervin Howell is done with tasks(8/20):");
        assert_eq!(lines.len(), 9);
        assert!(lines[1..].iter().all(|l| l.starts_with("\t ")));
        assert_eq!(lines[1], "\t task 0");
        assert_eq!(lines[2], "\t task 1");
        assert_eq!(lines[3], "\t task 5");
        assert_eq!(lines[8], "\t task 16");
    }

    #[test]
    fn test_report_empty_todos() {
        let report = ProgressReport::build(&ervin(), &[]).unwrap();
        assert_eq!(
            report.to_string(),
            "Employee Ervin Howell is done with tasks(0/0):\n"
        );
    }

    #[test]
    fn test_report_requires_name() {
        let nameless = User {
            name: None,
            ..ervin()
        };
        assert!(ProgressReport::build(&nameless, &[]).is_none());
    }

    #[test]
    fn test_report_counts_only_boolean_true() {
        let tasks = vec![
            Task {
                user_id: Some(2),
                title: Some(json!("string flag")),
                completed: Some(json!("true")),
            },
            Task {
                user_id: Some(2),
                title: None,
                completed: Some(json!(true)),
            },
        ];

        let report = ProgressReport::build(&ervin(), &tasks).unwrap();
        assert_eq!(report.count, CompletionCount { done: 1, total: 2 });
        assert_eq!(report.completed_titles, vec![String::new()]);
    }

    #[test]
    fn test_report_renders_non_string_title() {
        let tasks = vec![Task {
            user_id: Some(2),
            title: Some(json!(123)),
            completed: Some(json!(true)),
        }];

        let report = ProgressReport::build(&ervin(), &tasks).unwrap();
        assert_eq!(
            report.to_string(),
            "Employee Ervin Howell is done with tasks(1/1):\n\t 123\n"
        );
    }
}
