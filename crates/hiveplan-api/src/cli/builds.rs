//! Saved-build library commands: list, show, delete, duplicate, export.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use hiveplan_core::export::saved_export_file_name;
use hiveplan_core::repository::build::{BuildFilter, BuildSort};
use hiveplan_core::service::build::summarize;
use hiveplan_core::stats::aggregate;
use hiveplan_infra::export::write_export;
use hiveplan_types::build::BuildId;

use crate::cli::render::{format_relative_time, print_hive, print_totals, spinner};
use crate::state::AppState;

fn parse_id(id: &str) -> Result<BuildId> {
    id.parse::<BuildId>()
        .map_err(|e| anyhow!("invalid build id '{id}': {e}"))
}

/// List saved builds, newest first unless a sort key is given.
pub async fn list_builds(
    state: &AppState,
    sort: Option<String>,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let key = sort.unwrap_or_else(|| state.config.default_build_sort.clone());
    let filter = BuildFilter {
        sort: BuildSort::parse(&key),
        limit,
        offset: None,
    };
    let builds = state.build_service.list_filtered(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&builds)?);
        return Ok(());
    }

    if builds.is_empty() {
        println!();
        println!(
            "  {} No saved builds yet. Run {} to plan one.",
            style("i").blue().bold(),
            style("hiveplan plan").cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Bees").fg(Color::White),
        Cell::new("Attack").fg(Color::White),
        Cell::new("Gather/s").fg(Color::White),
        Cell::new("Convert/s").fg(Color::White),
        Cell::new("Tags").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for build in &builds {
        table.add_row(vec![
            Cell::new(&build.name).fg(Color::Cyan),
            Cell::new(build.bee_count),
            Cell::new(build.total_attack).fg(Color::Red),
            Cell::new(format!("{:.1}", build.total_gather_rate)).fg(Color::Yellow),
            Cell::new(format!("{:.1}", build.total_convert_rate)).fg(Color::Blue),
            Cell::new(build.tags.join(", ")),
            Cell::new(format_relative_time(&build.created_at)).fg(Color::DarkGrey),
            Cell::new(build.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    let summary = summarize(&builds);
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} build{}, {} bees placed in total",
        style(summary.build_count).bold(),
        if summary.build_count == 1 { "" } else { "s" },
        style(summary.total_bees_used).bold()
    );
    println!();
    Ok(())
}

pub async fn show_build(state: &AppState, id: &str, json: bool) -> Result<()> {
    let build = state.build_service.get_build(&parse_id(id)?).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&build)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&build.name).cyan().bold());
    if !build.description.is_empty() {
        println!("  {}", style(&build.description).dim());
    }
    println!();
    print_hive(&build.build_data);
    print_totals(&aggregate(&build.build_data));
    println!();
    if !build.tags.is_empty() {
        println!("  {} {}", style("Tags:").bold(), build.tags.join(", "));
    }
    println!(
        "  {} {}",
        style("Visibility:").bold(),
        if build.is_public { "public" } else { "private" }
    );
    println!(
        "  {} {}",
        style("Created:").bold(),
        build.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  {} {}", style("ID:").bold(), style(&build.id).dim());
    println!();
    Ok(())
}

/// Delete a saved build, asking first unless `force` or `json` is set.
pub async fn delete_build(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let build = state.build_service.get_build(&id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete build '{}'?",
                style(&build.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let progress = spinner(format!("Deleting {}...", build.name))?;
    state.build_service.delete_build(&id).await?;
    progress.finish_and_clear();

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id.to_string()}));
    } else {
        println!("  {} Build '{}' deleted.", style("✓").red().bold(), build.name);
    }
    Ok(())
}

pub async fn duplicate_build(state: &AppState, id: &str, json: bool) -> Result<()> {
    let progress = spinner("Duplicating build...")?;
    let copy = state.build_service.duplicate_build(&parse_id(id)?).await;
    progress.finish_and_clear();
    let copy = copy?;

    if json {
        println!("{}", serde_json::to_string_pretty(&copy)?);
    } else {
        println!(
            "  {} Saved '{}'",
            style("✓").green().bold(),
            style(&copy.name).cyan()
        );
        println!("  New id: {}", style(&copy.id).bold());
    }
    Ok(())
}

/// Write a saved build to `{out or export_dir}/{name}.json`.
pub async fn export_build(
    state: &AppState,
    id: &str,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let document = state
        .build_service
        .export_build(&parse_id(id)?, chrono::Utc::now())
        .await?;
    let dir = out.unwrap_or_else(|| state.export_dir.clone());
    let path = write_export(&dir, &saved_export_file_name(&document.name), &document).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"exported": true, "path": path.display().to_string()})
        );
    } else {
        println!(
            "  {} Exported '{}' to {}",
            style("✓").green().bold(),
            document.name,
            style(path.display()).cyan()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[test]
    fn test_parse_id_round_trips_display() {
        let id = BuildId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
