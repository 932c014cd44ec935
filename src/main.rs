//! todo-gather - employee TODO progress and exports
//!
//! A CLI tool that reads the users and todos collections of a REST API,
//! prints per-employee completion progress and exports task lists to JSON.
//!
//! Exit codes:
//!   0 - Success (including an ignored, non-numeric employee id)
//!   1 - Runtime error (connection, decode, config, file write)

mod analysis;
mod api;
mod cli;
mod config;
mod models;
mod report;

use anyhow::{Context, Result};
use api::TodoApiClient;
use cli::{Args, Command};
use config::Config;
use models::{Task, User};
use report::ProgressReport;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    debug!("todo-gather v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .todo-gather.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("Created {} with default settings.", config::CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings. Logs go to stderr so
/// stdout only carries the progress report.
fn init_logging(args: &Args) {
    let subscriber = log_subscriber(args.log_level(), std::io::stderr);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn log_subscriber<W>(
    level: tracing::Level,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish()
}

/// Load configuration, build the client and dispatch the command.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let Some(command) = args.command else {
        return Ok(());
    };

    let client = TodoApiClient::new(&config.api.base_url, config.api.timeout())?;
    let output_dir = config.output.dir.as_path();
    let mut stdout = std::io::stdout();

    match command {
        Command::Progress { employee_id, extra } => {
            let Some(id) = cli::single_employee_id(employee_id.as_deref(), &extra) else {
                debug!("Ignoring arguments {:?} {:?}", employee_id, extra);
                return Ok(());
            };
            run_progress(&client, id, &mut stdout).await?;
        }
        Command::Export { employee_id, extra } => {
            let Some(id) = cli::single_employee_id(employee_id.as_deref(), &extra) else {
                debug!("Ignoring arguments {:?} {:?}", employee_id, extra);
                return Ok(());
            };
            if let Some(path) = run_export(&client, id, output_dir, &mut stdout).await? {
                info!("Export saved to {}", path.display());
            }
        }
        Command::ExportAll { extra } => {
            if !extra.is_empty() {
                debug!("Ignoring extra arguments {:?}", extra);
            }
            let path = run_export_all(&client, output_dir).await?;
            info!("Export saved to {}", path.display());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

/// An employee with a display name and their tasks.
struct EmployeeTasks {
    user: User,
    tasks: Vec<Task>,
    report: ProgressReport,
}

/// Fetch the profile and then the tasks of one employee.
///
/// Returns `None` when the profile carries no display name.
async fn fetch_employee(client: &TodoApiClient, id: u64) -> Result<Option<EmployeeTasks>> {
    let user = client
        .fetch_user(id)
        .await
        .with_context(|| format!("Failed to fetch employee {}", id))?;
    let tasks = client
        .fetch_todos_for(id)
        .await
        .with_context(|| format!("Failed to fetch tasks of employee {}", id))?;

    let Some(report) = ProgressReport::build(&user, &tasks) else {
        debug!("Employee {} has no name, nothing to report", id);
        return Ok(None);
    };

    Ok(Some(EmployeeTasks {
        user,
        tasks,
        report,
    }))
}

/// Print the progress report of one employee.
async fn run_progress(client: &TodoApiClient, id: u64, out: &mut impl Write) -> Result<()> {
    if let Some(employee) = fetch_employee(client, id).await? {
        write!(out, "{}", employee.report).context("Failed to write report")?;
    }
    Ok(())
}

/// Print the progress report of one employee and export all their tasks.
///
/// Returns the export path, or `None` when nothing was reported.
async fn run_export(
    client: &TodoApiClient,
    id: u64,
    output_dir: &Path,
    out: &mut impl Write,
) -> Result<Option<PathBuf>> {
    let Some(employee) = fetch_employee(client, id).await? else {
        return Ok(None);
    };

    write!(out, "{}", employee.report).context("Failed to write report")?;

    let mapping = report::employee_export(id, &employee.user, &employee.tasks);
    let path = output_dir.join(report::employee_file_name(id));
    report::write_export(&path, &mapping)?;

    Ok(Some(path))
}

/// Export the tasks of every employee.
async fn run_export_all(client: &TodoApiClient, output_dir: &Path) -> Result<PathBuf> {
    let users = client
        .fetch_users()
        .await
        .context("Failed to fetch users")?;
    let tasks = client
        .fetch_todos()
        .await
        .context("Failed to fetch tasks")?;

    debug!("Fetched {} users and {} tasks", users.len(), tasks.len());
    for (owner, count) in analysis::completion_counts(&tasks) {
        debug!("User {}: {}/{} tasks done", owner, count.done, count.total);
    }

    let mapping = report::all_employees_export(&users, &tasks);
    let path = output_dir.join(report::ALL_EMPLOYEES_FILE);
    report::write_export(&path, &mapping)?;

    Ok(path)
}
