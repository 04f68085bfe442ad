//! CLI command definitions for the `hiveplan` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! resource (e.g., `hiveplan catalog bees`, `hiveplan builds list`).

pub mod builds;
pub mod catalog;
pub mod init;
pub mod plan;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Plan bee hives: place bees, tune slots, compare and save builds.
#[derive(Parser)]
#[command(name = "hiveplan", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory, default config and an editable catalog.
    Init,

    /// Browse the bee and beequip catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Start an interactive hive planning session.
    Plan {
        /// Seed the session from a previously exported build file.
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Manage saved builds.
    Builds {
        #[command(subcommand)]
        action: BuildsCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List bees.
    #[command(alias = "ls")]
    Bees {
        /// Case-insensitive name search.
        #[arg(long, short)]
        search: Option<String>,

        /// Only this rarity (basic, rare, epic, legendary, mythic, event).
        #[arg(long)]
        rarity: Option<String>,

        /// Only this colour (red, blue, white, colorless).
        #[arg(long)]
        color: Option<String>,

        /// Sort by name, rarity, attack or gather.
        #[arg(long, default_value = "name")]
        sort: String,
    },

    /// List beequips.
    Beequips {
        /// Case-insensitive name search.
        #[arg(long, short)]
        search: Option<String>,

        /// Only this slot type (stinger, guard, antennae, booster, collector).
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Show one bee in full.
    Show {
        /// Bee id or name.
        bee: String,
    },
}

#[derive(Subcommand)]
pub enum BuildsCommand {
    /// List saved builds.
    #[command(alias = "ls")]
    List {
        /// Sort key, `-` prefix for descending (e.g. -created_date, name, -total_attack).
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,

        /// Maximum number of builds to show.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show a saved build with its hive layout.
    Show {
        /// Build id.
        id: String,
    },

    /// Delete a saved build.
    #[command(alias = "rm")]
    Delete {
        /// Build id.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Save a private copy of a build.
    Duplicate {
        /// Build id.
        id: String,
    },

    /// Write a build to a JSON file.
    Export {
        /// Build id.
        id: String,

        /// Directory to write into (defaults to the configured export dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_builds_list() {
        let cli = Cli::try_parse_from(["hiveplan", "--json", "builds", "list", "--sort", "-total_attack"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Builds {
                action: BuildsCommand::List { sort, limit },
            } => {
                assert_eq!(sort.as_deref(), Some("-total_attack"));
                assert!(limit.is_none());
            }
            _ => panic!("expected builds list"),
        }
    }

    #[test]
    fn test_parse_catalog_filters() {
        let cli = Cli::try_parse_from([
            "hiveplan", "catalog", "bees", "--rarity", "mythic", "--sort", "attack", "-v",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(
            cli.command,
            Commands::Catalog {
                action: CatalogCommand::Bees { .. }
            }
        ));
    }
}
