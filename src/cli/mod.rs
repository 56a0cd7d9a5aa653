//! Command-line interface for crewboard
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;

mod dashboard;
mod employee;
mod task;

/// crewboard - Employee Task Tracker
///
/// A CLI and terminal dashboard for the employee task tracker API:
/// summary charts, task management, and employee management over a
/// full-refresh synchronization model.
#[derive(Parser, Debug)]
#[command(name = "crewboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base address of the tracker API (overrides .crewboard.toml)
    #[arg(long, global = true, env = "CREWBOARD_API")]
    pub api: Option<String>,

    /// Directory containing .crewboard.toml (defaults to current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal dashboard
    Ui,

    /// Print the dashboard summary (status buckets, workload, recent tasks)
    Dashboard,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Employee management
    #[command(subcommand)]
    Employee(EmployeeCommands),
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, optionally filtered by employee and status
    Ls {
        /// Only tasks assigned to this employee id
        #[arg(long)]
        employee: Option<i64>,

        /// Only tasks with this status: pending, in_progress, completed
        #[arg(long)]
        status: Option<String>,

        /// Free-text filter over title, description, and assignee
        #[arg(long)]
        query: Option<String>,
    },

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Assignee employee id
        #[arg(long, required = true)]
        employee: i64,

        /// Longer description
        #[arg(long, default_value = "")]
        description: String,

        /// Initial status: pending, in_progress, completed
        #[arg(long, default_value = "pending")]
        status: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Update fields of an existing task
    Set {
        /// Task id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Reassign to this employee id
        #[arg(long)]
        employee: Option<i64>,

        /// New status: pending, in_progress, completed
        #[arg(long)]
        status: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// List employees with their task statistics
    Ls,

    /// Create an employee
    Add {
        /// Employee name
        name: String,

        /// Email address
        #[arg(long, required = true)]
        email: String,

        /// Department
        #[arg(long, default_value = "")]
        department: String,

        /// Position
        #[arg(long, default_value = "")]
        position: String,
    },
}

impl Cli {
    /// Execute the selected subcommand
    pub fn run(self) -> Result<()> {
        let config = self.load_config();
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Ui => crate::ui::dashboard::run(config),
            Commands::Dashboard => dashboard::run(dashboard::DashboardOptions { config, output }),
            Commands::Task(command) => match command {
                TaskCommands::Ls {
                    employee,
                    status,
                    query,
                } => task::run_ls(task::LsOptions {
                    config,
                    output,
                    employee,
                    status,
                    query,
                }),
                TaskCommands::Add {
                    title,
                    employee,
                    description,
                    status,
                    due,
                } => task::run_add(task::AddOptions {
                    config,
                    output,
                    title,
                    employee,
                    description,
                    status,
                    due,
                }),
                TaskCommands::Set {
                    id,
                    title,
                    description,
                    employee,
                    status,
                    due,
                    clear_due,
                } => task::run_set(task::SetOptions {
                    config,
                    output,
                    id,
                    title,
                    description,
                    employee,
                    status,
                    due,
                    clear_due,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions { config, output, id }),
            },
            Commands::Employee(command) => match command {
                EmployeeCommands::Ls => employee::run_ls(employee::LsOptions { config, output }),
                EmployeeCommands::Add {
                    name,
                    email,
                    department,
                    position,
                } => employee::run_add(employee::AddOptions {
                    config,
                    output,
                    name,
                    email,
                    department,
                    position,
                }),
            },
        }
    }

    fn load_config(&self) -> Config {
        let dir = self.config_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."))
        });
        let mut config = Config::load_from_dir(&dir);
        if let Some(api) = self.api.as_deref() {
            if !api.trim().is_empty() {
                config.api.base_url = api.trim().to_string();
            }
        }
        config
    }
}

/// Run an async API interaction to completion on a fresh runtime.
///
/// CLI commands are one-shot; a current-thread runtime per invocation
/// keeps them synchronous at the surface.
pub(crate) fn block_on<F, T>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
