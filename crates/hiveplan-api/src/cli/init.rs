//! `hiveplan init`: data directory, default config and an editable catalog.

use anyhow::Result;
use console::style;

use hiveplan_infra::catalog::seed_catalog;
use hiveplan_infra::config::{CONFIG_FILE, write_default_config};
use hiveplan_infra::filesystem::ensure_data_dir;

use crate::state::AppState;

pub async fn run_init(state: &AppState, json: bool) -> Result<()> {
    ensure_data_dir(&state.data_dir).await?;
    let config_written = write_default_config(&state.data_dir).await?;
    let seeded = seed_catalog(&state.catalog_dir).await?;

    if json {
        let files: Vec<String> = seeded.iter().map(|p| p.display().to_string()).collect();
        println!(
            "{}",
            serde_json::json!({
                "data_dir": state.data_dir.display().to_string(),
                "config_written": config_written,
                "catalog_dir": state.catalog_dir.display().to_string(),
                "catalog_files_written": files,
            })
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Data directory: {}",
        style("✓").green().bold(),
        style(state.data_dir.display()).cyan()
    );
    let config_path = state.data_dir.join(CONFIG_FILE);
    if config_written {
        println!("  {} Wrote {}", style("✓").green().bold(), config_path.display());
    } else {
        println!("  {} Kept existing {}", style("·").dim(), config_path.display());
    }
    if seeded.is_empty() {
        println!(
            "  {} Catalog already present in {}",
            style("·").dim(),
            state.catalog_dir.display()
        );
    } else {
        for path in &seeded {
            println!("  {} Wrote {}", style("✓").green().bold(), path.display());
        }
    }
    println!();
    println!("  Edit the catalog files to add bees, then run {}.", style("hiveplan plan").cyan());
    println!();
    Ok(())
}
