use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CurriculumCommands, PlanCommands, ProgressCommands};

/// Study plan generator
///
/// Tempo spreads the lessons and tests of a learning track over a number of
/// study days on the weekdays you choose, keeps a history of generated plans
/// and reports how far along a student is.
#[derive(Parser)]
#[command(version, about, name = "tempo")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tempo/tempo.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `curriculum`: Import tracks and enrollments, inspect what a plan covers
/// - `plan`: Generate, preview and inspect study plans
/// - `progress`: Record lesson and test results
#[derive(Subcommand)]
pub enum Commands {
    /// Import and inspect curricula
    #[command(alias = "c")]
    Curriculum {
        #[command(subcommand)]
        command: CurriculumCommands,
    },
    /// Generate and inspect study plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Record progress on lessons and tests
    #[command(alias = "r")]
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },
}
