//! JSON export of task records.
//!
//! Two layouts exist: `<id>.json` for a single employee and
//! `todo_all_employees.json` for everyone. Both are written compactly and
//! overwrite any previous file.

use crate::analysis::{group_by_owner, username_lookup};
use crate::models::{EmployeeTaskRecord, ExportMapping, TaggedTaskRecord, Task, User};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// File name of the all-employees export.
pub const ALL_EMPLOYEES_FILE: &str = "todo_all_employees.json";

/// File name of a single-employee export.
pub fn employee_file_name(employee_id: u64) -> String {
    format!("{}.json", employee_id)
}

/// Every task of one employee under the single key `employee_id`.
pub fn employee_export(
    employee_id: u64,
    user: &User,
    tasks: &[Task],
) -> ExportMapping<EmployeeTaskRecord> {
    let username = user.username.as_deref();
    let records = tasks
        .iter()
        .map(|t| EmployeeTaskRecord::new(t, username))
        .collect();

    let mut mapping = ExportMapping::new();
    mapping.insert(employee_id.to_string(), records);
    mapping
}

/// Every task keyed by owner id, with the owner's username joined in.
///
/// Owners missing from `users` get a `null` username.
pub fn all_employees_export(users: &[User], tasks: &[Task]) -> ExportMapping<TaggedTaskRecord> {
    let usernames = username_lookup(users);

    group_by_owner(tasks)
        .into_iter()
        .map(|(key, owned)| {
            let records = owned
                .into_iter()
                .map(|t| {
                    let username = t
                        .user_id
                        .and_then(|id| usernames.get(&id))
                        .and_then(|name| name.as_deref());
                    TaggedTaskRecord::new(t, username)
                })
                .collect();
            (key, records)
        })
        .collect()
}

/// Serialize `mapping` to `path`, replacing any existing file.
pub fn write_export<R: Serialize>(path: &Path, mapping: &ExportMapping<R>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, mapping)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    debug!("Wrote {} key(s) to {}", mapping.len(), path.display());
    Ok(())
}
