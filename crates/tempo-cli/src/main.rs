//! Tempo CLI
//!
//! Command-line front end for the tempo study planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::{CommandFactory, Parser};
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tempo_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let Some(command) = command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("Tempo started with {}", planner.database_path().display());

    let cli = Cli::new(planner, TerminalRenderer::from_flags(no_color));
    match command {
        Curriculum { command } => cli.handle_curriculum_command(command).await,
        Plan { command } => cli.handle_plan_command(command).await,
        Progress { command } => cli.handle_progress_command(command).await,
    }
}
