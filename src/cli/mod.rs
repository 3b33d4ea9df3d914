//! CLI command definitions and handlers

use clap::{Parser, Subcommand, ValueEnum};

pub mod board;
pub mod context;
pub mod init;
pub mod stage;
pub mod status;
pub mod task;

pub use context::CommandContext;

/// boardop - companion CLI for a local task-board API
#[derive(Parser, Debug)]
#[command(name = "boardop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "BOARDOP_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override the board API base URL
    #[arg(long, global = true, env = "BOARDOP_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "BOARDOP_CONFIG", hide_env = true)]
    pub config: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize boardop configuration
    Init,

    /// Show configuration and API connectivity status
    Status,

    /// Display version information
    Version,

    /// Show the board: stages in order with their active tasks
    Board,

    /// Manage stages (board columns)
    #[command(subcommand)]
    Stage(StageCommands),

    /// Manage tasks (board cards)
    #[command(subcommand)]
    Task(TaskCommands),
}

/// Stage subcommands
#[derive(Subcommand, Debug)]
pub enum StageCommands {
    /// List all stages
    List,

    /// Show one stage
    Get {
        /// Stage ID
        id: i64,
    },

    /// Create a stage
    Create {
        /// Column name
        #[arg(long)]
        name: String,

        /// Display position on the board
        #[arg(long, default_value_t = 0)]
        position: i64,
    },

    /// Update a stage
    Update {
        /// Stage ID
        id: i64,

        /// New column name
        #[arg(long)]
        name: Option<String>,

        /// New display position
        #[arg(long)]
        position: Option<i64>,
    },

    /// Delete a stage
    Delete {
        /// Stage ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks (active by default)
    List {
        /// Show archived tasks instead of active ones
        #[arg(long)]
        historized: bool,
    },

    /// Show one task
    Get {
        /// Task ID
        id: i64,
    },

    /// Create a task
    Create {
        /// ID of the stage the task starts in
        #[arg(long)]
        stage_id: i64,

        /// Card title
        #[arg(long)]
        title: String,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,

        /// Version tag the task targets
        #[arg(long, default_value = "")]
        version: String,

        /// Display position within the stage
        #[arg(long, default_value_t = 0)]
        position: i64,

        /// External Redmine ticket reference
        #[arg(long)]
        redmine: Option<i64>,
    },

    /// Update a task's fields
    Update {
        /// Task ID
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        version: Option<String>,

        #[arg(long)]
        position: Option<i64>,

        #[arg(long)]
        redmine: Option<i64>,
    },

    /// Move a task to another stage
    Move {
        /// Task ID
        id: i64,

        /// Target stage ID
        #[arg(long)]
        stage: i64,
    },

    /// Reorder tasks within a stage; positions follow the given order
    Reorder {
        /// Stage ID the tasks belong to
        stage_id: i64,

        /// Task IDs in their new display order
        task_ids: Vec<i64>,
    },

    /// Archive a task (remove it from the active view)
    Archive {
        /// Task ID
        id: i64,
    },

    /// Delete a task permanently
    Delete {
        /// Task ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Parse a config-file preference; unknown values fall back to table
    pub fn from_preference(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}
