//! Roster CLI Application
//!
//! Command-line interface and MCP server for tracking the workers,
//! documents, tickets and tasks of a recruitment agency.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, RosterMcpServer};
use renderer::TerminalRenderer;
use roster_core::{models::EntityKind, params::ListEntities, TrackerBuilder, TransitionTable};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        actor,
        strict_transitions,
        command,
    } = Args::parse();

    let mut builder = TrackerBuilder::new().with_database_path(database_file);
    if strict_transitions {
        builder = builder.with_transition_policy(TransitionTable::worker_lifecycle());
    }
    let tracker = builder.build().await.context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Roster started with database {}", tracker.database_path().display());

    match command {
        Some(Entity { command }) => {
            Cli::new(tracker, renderer, actor)
                .handle_entity_command(command)
                .await
        }
        Some(Status { command }) => {
            Cli::new(tracker, renderer, actor)
                .handle_status_command(command)
                .await
        }
        Some(Milestone { command }) => {
            Cli::new(tracker, renderer, actor)
                .handle_milestone_command(command)
                .await
        }
        Some(History { command }) => {
            Cli::new(tracker, renderer, actor)
                .handle_history_command(command)
                .await
        }
        Some(Layout { command }) => {
            Cli::new(tracker, renderer, actor)
                .handle_layout_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Roster MCP server");
            run_stdio_server(RosterMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(tracker, renderer, actor)
                .list_entities(&ListEntities::of_kind(EntityKind::Worker))
                .await
        }
    }
}
