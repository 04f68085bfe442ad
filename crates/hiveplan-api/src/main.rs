//! Hiveplan CLI entry point.
//!
//! Binary name: `hiveplan`
//!
//! Parses CLI arguments, initializes logging, the database and services,
//! then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{BuildsCommand, CatalogCommand, Cli, Commands};
use hiveplan_observe::tracing_setup::{LogOptions, init_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&LogOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        json: cli.log_json,
    })
    .map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "hiveplan", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Init => {
            cli::init::run_init(&state, cli.json).await?;
        }

        Commands::Catalog { action } => match action {
            CatalogCommand::Bees {
                search,
                rarity,
                color,
                sort,
            } => {
                cli::catalog::list_bees(&state, search, rarity, color, &sort, cli.json).await?;
            }
            CatalogCommand::Beequips { search, kind } => {
                cli::catalog::list_beequips(&state, search, kind, cli.json).await?;
            }
            CatalogCommand::Show { bee } => {
                cli::catalog::show_bee(&state, &bee, cli.json).await?;
            }
        },

        Commands::Plan { from } => {
            cli::plan::run_plan(&state, from, cli.json).await?;
        }

        Commands::Builds { action } => match action {
            BuildsCommand::List { sort, limit } => {
                cli::builds::list_builds(&state, sort, limit, cli.json).await?;
            }
            BuildsCommand::Show { id } => {
                cli::builds::show_build(&state, &id, cli.json).await?;
            }
            BuildsCommand::Delete { id, force } => {
                cli::builds::delete_build(&state, &id, force, cli.json).await?;
            }
            BuildsCommand::Duplicate { id } => {
                cli::builds::duplicate_build(&state, &id, cli.json).await?;
            }
            BuildsCommand::Export { id, out } => {
                cli::builds::export_build(&state, &id, out, cli.json).await?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
