//! CLI module - Command-line interface for holonet
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// holonet - people, planets and per-user favorites over HTTP
#[derive(Parser)]
#[command(name = "holonet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommands>,
    },

    /// Load users, planets and people from a TOML file
    Seed {
        /// Path to the seed file
        path: PathBuf,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrateCommands {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// List applied and pending migrations
    Status,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["holonet"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_migrate_down() {
        let cli = Cli::try_parse_from(["holonet", "migrate", "down"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                command: Some(MigrateCommands::Down)
            })
        ));
    }

    #[test]
    fn test_seed_requires_path() {
        assert!(Cli::try_parse_from(["holonet", "seed"]).is_err());
    }
}
