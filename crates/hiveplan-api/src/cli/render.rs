//! Shared terminal rendering: palettes, hive grid, totals and tables.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::{Style, style};
use indicatif::{ProgressBar, ProgressStyle};

use hiveplan_core::palette::{Tone, color_tone, rarity_glow, rarity_tone};
use hiveplan_types::bee::Bee;
use hiveplan_types::build::BuildState;
use hiveplan_types::slot::{HIVE_SIZE, SlotIndex};
use hiveplan_types::stats::BuildTotals;

const GRID_COLUMNS: usize = 5;

pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Gray => Style::new().white().dim(),
        Tone::Blue => Style::new().blue(),
        Tone::Purple => Style::new().magenta(),
        Tone::Yellow => Style::new().yellow(),
        Tone::Cyan => Style::new().cyan(),
        Tone::Green => Style::new().green(),
        Tone::Red => Style::new().red(),
        Tone::White => Style::new().white(),
        Tone::Dim => Style::new().dim(),
    }
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gray => Color::Grey,
        Tone::Blue => Color::Blue,
        Tone::Purple => Color::Magenta,
        Tone::Yellow => Color::Yellow,
        Tone::Cyan => Color::Cyan,
        Tone::Green => Color::Green,
        Tone::Red => Color::Red,
        Tone::White => Color::White,
        Tone::Dim => Color::DarkGrey,
    }
}

/// Bee name in its rarity colour, bold for the top tiers.
pub fn bee_label(bee: &Bee) -> String {
    let mut label = tone_style(rarity_tone(bee.rarity));
    if rarity_glow(bee.rarity).is_some() {
        label = label.bold();
    }
    label.apply_to(&bee.name).to_string()
}

/// Spinner used around database calls.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

/// The hive as a grid, five slots per row, numbered from 1.
pub fn print_hive(state: &BuildState) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let slots: Vec<SlotIndex> = SlotIndex::all().collect();
    for row in slots.chunks(GRID_COLUMNS) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|slot| match state.get(*slot) {
                Some(config) => {
                    let mut text = format!("{:>2} {}", slot.ordinal(), short_name(&config.bee.name));
                    if config.gifted {
                        text.push_str(" *");
                    }
                    text.push_str(&format!("\n   L{}", config.level));
                    if config.beequip.is_some() {
                        text.push_str(" +eq");
                    }
                    Cell::new(text).fg(tone_color(color_tone(config.bee.color)))
                }
                None => Cell::new(format!("{:>2} .", slot.ordinal())).fg(Color::DarkGrey),
            })
            .collect();
        table.add_row(cells);
    }

    println!("{table}");
    println!(
        "  {} of {HIVE_SIZE} slots filled   {} gifted   {}",
        style(state.len()).bold(),
        style("*").bold(),
        style("+eq beequip").dim()
    );
}

fn short_name(name: &str) -> String {
    let trimmed = name.strip_suffix(" Bee").unwrap_or(name);
    if trimmed.chars().count() > 10 {
        let head: String = trimmed.chars().take(9).collect();
        format!("{head}.")
    } else {
        trimmed.to_string()
    }
}

pub fn print_totals(totals: &BuildTotals) {
    println!(
        "  {} {}   {} {:.1}   {} {:.1}   {} {}   {} {}",
        style("Attack").bold(),
        style(totals.total_attack).red(),
        style("Gather").bold(),
        totals.total_gather_rate,
        style("Convert").bold(),
        totals.total_convert_rate,
        style("Bees").bold(),
        totals.bee_count,
        style("Efficiency").bold(),
        style(totals.efficiency).cyan(),
    );

    if !totals.color_counts.is_empty() {
        let colors: Vec<String> = totals
            .color_counts
            .iter()
            .map(|(color, n)| {
                tone_style(color_tone(Some(*color)))
                    .apply_to(format!("{color} {n}"))
                    .to_string()
            })
            .collect();
        println!("  {} {}", style("Colours").bold(), colors.join("  "));
    }
    if !totals.rarity_counts.is_empty() {
        let rarities: Vec<String> = totals
            .rarity_counts
            .iter()
            .map(|(rarity, n)| {
                tone_style(rarity_tone(*rarity))
                    .apply_to(format!("{rarity} {n}"))
                    .to_string()
            })
            .collect();
        println!("  {} {}", style("Rarities").bold(), rarities.join("  "));
    }
}

/// Bee list table used by `catalog bees` and the planner's bee picker.
pub fn bee_table(bees: &[&Bee]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Rarity").fg(Color::White),
        Cell::new("Colour").fg(Color::White),
        Cell::new("Attack").fg(Color::White),
        Cell::new("Gather").fg(Color::White),
        Cell::new("Convert").fg(Color::White),
        Cell::new("Energy").fg(Color::White),
    ]);

    for bee in bees {
        let color = bee
            .color
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&bee.name).fg(tone_color(rarity_tone(bee.rarity))),
            Cell::new(bee.rarity.to_string()).fg(tone_color(rarity_tone(bee.rarity))),
            Cell::new(color).fg(tone_color(color_tone(bee.color))),
            Cell::new(format_stat(bee.base_attack)),
            Cell::new(format_stat(bee.base_gather_amount)),
            Cell::new(format_stat(bee.base_convert_amount)),
            Cell::new(format_stat(bee.energy)),
        ]);
    }

    table
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

pub fn print_error(err: &dyn std::fmt::Display) {
    println!("  {} {err}", style("✗").red().bold());
}

pub fn print_ok(message: &str) {
    println!("  {} {message}", style("✓").green().bold());
}

pub fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
