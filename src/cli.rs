//! Command-line interface definition for Filmdesk
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive console chat and catalog
//! inspection.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filmdesk - conversational film catalog service
///
/// Hold multi-turn dialogues (create, search, filter, delete, edit, rate)
/// against a shared in-memory film catalog.
#[derive(Parser, Debug, Clone)]
#[command(name = "filmdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// YAML seed file loaded into the catalog at startup
    /// (overrides catalog.seed_path from the config)
    #[arg(long, env = "FILMDESK_SEED_PATH")]
    pub seed: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Filmdesk
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive console conversation with the catalog
    Chat {
        /// Owner id the console events are tagged with
        #[arg(short, long, default_value = "console-user")]
        owner: String,
    },

    /// Print the seeded catalog and exit
    List {
        /// Print entries as JSON instead of a plain listing
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
