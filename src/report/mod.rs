//! Console progress reports and JSON exports.
//!
//! This module renders the per-employee progress report and builds and
//! writes the two export file layouts.

pub mod export;
pub mod progress;

pub use export::{
    all_employees_export, employee_export, employee_file_name, write_export, ALL_EMPLOYEES_FILE,
};
pub use progress::ProgressReport;
