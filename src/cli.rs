//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// todo-gather - employee TODO progress from a REST API
///
/// Prints how many tasks an employee has completed and exports task
/// lists to JSON files.
///
/// Examples:
///   todo-gather progress 2
///   todo-gather export 2 --output-dir ./out
///   todo-gather export-all
///   todo-gather --base-url http://localhost:3000 export-all
///   todo-gather --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the users/todos API
    ///
    /// Overrides the config file. Defaults to https://jsonplaceholder.typicode.com.
    #[arg(long, value_name = "URL", env = "TODO_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory export files are written to
    #[arg(long, value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Request timeout in seconds (no timeout unless set here or in config)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .todo-gather.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .todo-gather.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print completed vs. total tasks for one employee
    Progress {
        /// Employee identifier (digits only; anything else is ignored)
        employee_id: Option<String>,

        /// Any further argument turns the command into a no-op
        #[arg(hide = true)]
        extra: Vec<String>,
    },
    /// Print progress and export all of one employee's tasks to <ID>.json
    Export {
        /// Employee identifier (digits only; anything else is ignored)
        employee_id: Option<String>,

        #[arg(hide = true)]
        extra: Vec<String>,
    },
    /// Export every employee's tasks to todo_all_employees.json
    ExportAll {
        /// Ignored
        #[arg(hide = true)]
        extra: Vec<String>,
    },
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.command.is_none() {
            return Err("A command is required (progress, export or export-all)".to_string());
        }

        if let Some(ref url) = self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

/// Interpret a raw employee id argument.
///
/// Only a non-empty run of ASCII digits is accepted; everything else
/// (signs, whitespace, overflow) yields `None` and the command does nothing.
pub fn parse_employee_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Employee id of a `progress`/`export` invocation.
///
/// Exactly one all-digit argument is required; a missing id or any extra
/// argument yields `None`.
pub fn single_employee_id(employee_id: Option<&str>, extra: &[String]) -> Option<u64> {
    if !extra.is_empty() {
        return None;
    }
    employee_id.and_then(parse_employee_id)
}
