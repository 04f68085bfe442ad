//! Catalog browsing commands: bees, beequips, show.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use hiveplan_core::catalog::{BeeQuery, BeeSort, BeequipQuery};
use hiveplan_core::palette::{beequip_rarity_tone, color_tone};
use hiveplan_types::bee::{BeeColor, Rarity};
use hiveplan_types::beequip::BeequipType;

use crate::cli::render::{bee_label, bee_table, tone_color, tone_style};
use crate::state::AppState;

pub async fn list_bees(
    state: &AppState,
    search: Option<String>,
    rarity: Option<String>,
    color: Option<String>,
    sort: &str,
    json: bool,
) -> Result<()> {
    let query = BeeQuery {
        search,
        rarity: rarity
            .map(|r| r.parse::<Rarity>())
            .transpose()
            .map_err(|e| anyhow!(e))?,
        color: color
            .map(|c| c.parse::<BeeColor>())
            .transpose()
            .map_err(|e| anyhow!(e))?,
        sort: sort.parse::<BeeSort>().map_err(|e| anyhow!(e))?,
    };

    let catalog = state.load_catalog().await?;
    let bees = query.apply(&catalog.bees);

    if json {
        println!("{}", serde_json::to_string_pretty(&bees)?);
        return Ok(());
    }

    if bees.is_empty() {
        println!();
        println!("  {} No bees match.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    println!();
    println!("{}", bee_table(&bees));
    println!();
    println!(
        "  {} bee{} (sorted by {})",
        style(bees.len()).bold(),
        if bees.len() == 1 { "" } else { "s" },
        query.sort
    );
    println!();
    Ok(())
}

pub async fn list_beequips(
    state: &AppState,
    search: Option<String>,
    kind: Option<String>,
    json: bool,
) -> Result<()> {
    let query = BeequipQuery {
        search,
        kind: kind
            .map(|k| k.parse::<BeequipType>())
            .transpose()
            .map_err(|e| anyhow!(e))?,
    };

    let catalog = state.load_catalog().await?;
    let beequips = query.apply(&catalog.beequips);

    if json {
        println!("{}", serde_json::to_string_pretty(&beequips)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Rarity").fg(Color::White),
        Cell::new("Stats").fg(Color::White),
    ]);

    for beequip in &beequips {
        let tone = tone_color(beequip_rarity_tone(beequip.rarity));
        let rarity = beequip
            .rarity
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let stats: Vec<String> = beequip
            .stats
            .iter()
            .map(|(name, value)| format!("{name} +{value}"))
            .collect();
        table.add_row(vec![
            Cell::new(&beequip.name).fg(tone),
            Cell::new(beequip.kind.to_string()),
            Cell::new(rarity).fg(tone),
            Cell::new(stats.join(", ")),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} beequip{}",
        style(beequips.len()).bold(),
        if beequips.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

pub async fn show_bee(state: &AppState, key: &str, json: bool) -> Result<()> {
    let catalog = state.load_catalog().await?;
    let bee = catalog
        .find_bee(key)
        .ok_or_else(|| anyhow!("no bee named '{key}' in the catalog"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(bee)?);
        return Ok(());
    }

    let color = bee
        .color
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());

    println!();
    println!("  {}  {}", bee_label(bee), style(format!("({})", bee.rarity)).dim());
    println!();
    println!("  {}  {}", style("Colour:").bold(), tone_style(color_tone(bee.color)).apply_to(color));
    println!("  {}  {}", style("Attack:").bold(), bee.attack());
    println!(
        "  {}  {} every {}s",
        style("Gather:").bold(),
        bee.gather_amount(),
        bee.gather_speed()
    );
    println!(
        "  {}  {} every {}s",
        style("Convert:").bold(),
        bee.convert_amount(),
        bee.convert_speed()
    );
    println!("  {}  {}", style("Energy:").bold(), bee.energy());
    if let Some(field) = &bee.favorite_field {
        println!("  {}  {}", style("Favourite field:").bold(), field);
    }
    if !bee.abilities.is_empty() {
        println!("  {}  {}", style("Abilities:").bold(), bee.abilities.join(", "));
    }
    if !bee.description.is_empty() {
        println!();
        println!("  {}", style(&bee.description).dim());
    }
    println!();
    Ok(())
}
