//! Data models for users, tasks and export records.
//!
//! Remote payloads are decoded leniently: every field is optional, unknown
//! fields are ignored and a field of an unexpected type reads as absent, so
//! a sparse or odd body never fails to deserialize because of one field.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode a field as `T`, or `None` when it holds something else.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A user (employee) from the `/users` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Display name, e.g. "Ervin Howell".
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Login name, e.g. "Antonette".
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
}

impl User {
    /// Returns the display name when present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A task from the `/todos` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier of the owning user.
    #[serde(default, rename = "userId", deserialize_with = "lenient")]
    pub user_id: Option<i64>,
    /// Task title exactly as the API returned it.
    #[serde(default)]
    pub title: Option<Value>,
    /// Completion flag exactly as the API returned it.
    #[serde(default)]
    pub completed: Option<Value>,
}

impl Task {
    /// A task is done only when `completed` is the boolean `true`.
    pub fn is_done(&self) -> bool {
        matches!(self.completed, Some(Value::Bool(true)))
    }

    /// Title as console text: strings verbatim, other JSON values in their
    /// JSON form, nothing when absent.
    pub fn title_text(&self) -> String {
        match &self.title {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(title)) => title.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Key used to group this task under its owner in an export.
    pub fn owner_key(&self) -> String {
        match self.user_id {
            Some(id) => id.to_string(),
            None => "null".to_string(),
        }
    }
}

/// One row of a single-employee export (`<id>.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTaskRecord {
    pub task: Option<Value>,
    pub completed: Option<Value>,
    pub username: Option<String>,
}

impl EmployeeTaskRecord {
    pub fn new(task: &Task, username: Option<&str>) -> Self {
        Self {
            task: task.title.clone(),
            completed: task.completed.clone(),
            username: username.map(String::from),
        }
    }
}

/// One row of the all-employees export (`todo_all_employees.json`).
///
/// Field order differs from [`EmployeeTaskRecord`]; consumers of the
/// existing files depend on both layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedTaskRecord {
    pub username: Option<String>,
    pub task: Option<Value>,
    pub completed: Option<Value>,
}

impl TaggedTaskRecord {
    pub fn new(task: &Task, username: Option<&str>) -> Self {
        Self {
            username: username.map(String::from),
            task: task.title.clone(),
            completed: task.completed.clone(),
        }
    }
}

/// User id (as a string) to that user's task records, in first-seen order.
pub type ExportMapping<R> = IndexMap<String, Vec<R>>;
