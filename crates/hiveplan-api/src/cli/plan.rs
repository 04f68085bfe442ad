//! Interactive planning session (`hiveplan plan`).
//!
//! A menu loop over a single `HiveSession`. Outside the editor the menu
//! offers placement, paste, removal and library actions; while a slot is
//! being edited only editor actions are shown, mirroring the session's own
//! rule that other input is ignored until the edit is closed.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};

use hiveplan_core::catalog::{BeeQuery, Catalog};
use hiveplan_core::editor::{SlotEditor, parse_magnitude};
use hiveplan_core::export::session_export_file_name;
use hiveplan_core::session::{HiveSession, SelectOutcome, SlotClick};
use hiveplan_core::stats::effective_attack;
use hiveplan_infra::export::{read_session_export, write_export};
use hiveplan_types::build::SaveBuildRequest;
use hiveplan_types::slot::{HIVE_SIZE, MutationStat};

use crate::cli::render::{bee_label, print_error, print_hive, print_ok, print_totals};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HiveAction {
    SelectBee,
    CancelPlacement,
    ClickSlot,
    Paste,
    Remove,
    ShowHive,
    ClearHive,
    ClearClipboard,
    Save,
    Export,
    Quit,
}

impl HiveAction {
    fn label(self) -> &'static str {
        match self {
            HiveAction::SelectBee => "Select a bee to place",
            HiveAction::CancelPlacement => "Stop placing",
            HiveAction::ClickSlot => "Click a slot",
            HiveAction::Paste => "Paste clipboard into a slot",
            HiveAction::Remove => "Remove a bee",
            HiveAction::ShowHive => "Show hive",
            HiveAction::ClearHive => "Clear hive",
            HiveAction::ClearClipboard => "Clear clipboard",
            HiveAction::Save => "Save build",
            HiveAction::Export => "Export to file",
            HiveAction::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    Level,
    ToggleGifted,
    MutationStat,
    MutationValue,
    Beequip,
    Override,
    ClearOverride,
    Save,
    Copy,
    Remove,
    Cancel,
}

impl EditAction {
    fn label(self) -> &'static str {
        match self {
            EditAction::Level => "Set level",
            EditAction::ToggleGifted => "Toggle gifted",
            EditAction::MutationStat => "Choose mutation",
            EditAction::MutationValue => "Set mutation value",
            EditAction::Beequip => "Choose beequip",
            EditAction::Override => "Override a beequip stat",
            EditAction::ClearOverride => "Clear an override",
            EditAction::Save => "Save slot",
            EditAction::Copy => "Copy to clipboard",
            EditAction::Remove => "Remove bee",
            EditAction::Cancel => "Cancel",
        }
    }
}

/// Menu entries that make sense for the current session.
fn hive_actions(session: &HiveSession) -> Vec<HiveAction> {
    let mut actions = vec![HiveAction::SelectBee];
    if session.pending_bee().is_some() {
        actions.push(HiveAction::CancelPlacement);
    }
    actions.push(HiveAction::ClickSlot);
    if !session.clipboard().is_empty() {
        actions.push(HiveAction::Paste);
    }
    if !session.build().is_empty() {
        actions.extend([HiveAction::Remove, HiveAction::ShowHive, HiveAction::ClearHive]);
    }
    if !session.clipboard().is_empty() {
        actions.push(HiveAction::ClearClipboard);
    }
    if !session.build().is_empty() {
        actions.push(HiveAction::Save);
    }
    actions.extend([HiveAction::Export, HiveAction::Quit]);
    actions
}

fn edit_actions(editor: &SlotEditor) -> Vec<EditAction> {
    let mut actions = vec![EditAction::Level, EditAction::ToggleGifted, EditAction::MutationStat];
    if editor.mutation_stat().is_some() {
        actions.push(EditAction::MutationValue);
    }
    actions.push(EditAction::Beequip);
    if editor.beequip().is_some() {
        actions.push(EditAction::Override);
    }
    if !editor.overrides().is_empty() {
        actions.push(EditAction::ClearOverride);
    }
    actions.extend([EditAction::Save, EditAction::Copy, EditAction::Remove, EditAction::Cancel]);
    actions
}

fn describe_click(click: SlotClick) -> Option<String> {
    match click {
        SlotClick::Placed(slot) => Some(format!("Placed into slot {}", slot.ordinal())),
        SlotClick::Pasted(slot) => Some(format!("Pasted into slot {}", slot.ordinal())),
        SlotClick::EditorOpened(_) | SlotClick::Ignored => None,
    }
}

/// Run the planner until the user quits.
pub async fn run_plan(state: &AppState, from: Option<PathBuf>, json: bool) -> Result<()> {
    let catalog = state.load_catalog().await?;

    let (mut session, mut name) = match from {
        Some(path) => {
            let export = read_session_export(&path).await?;
            tracing::info!(path = %path.display(), bees = export.slots.len(), "session seeded from export");
            (
                HiveSession::from_build(export.slots, state.levels()),
                Some(export.name),
            )
        }
        None => (HiveSession::new(state.levels()), None),
    };

    println!();
    println!(
        "  {} Planning a hive of {} slots with {} bees in the catalog.",
        style("*").cyan().bold(),
        HIVE_SIZE,
        catalog.bees.len()
    );

    loop {
        if session.editor().is_some() {
            edit_step(&mut session, &catalog)?;
            continue;
        }

        print_status(&session);
        let actions = hive_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new().items(&labels).default(0).interact()?;

        match actions[choice] {
            HiveAction::SelectBee => select_bee(&mut session, &catalog)?,
            HiveAction::CancelPlacement => session.cancel_placement(),
            HiveAction::ClickSlot => {
                let slot = prompt_slot("Slot")?;
                match session.click_slot(slot) {
                    Ok(click) => {
                        if let Some(message) = describe_click(click) {
                            print_ok(&message);
                        }
                    }
                    Err(e) => print_error(&e),
                }
            }
            HiveAction::Paste => {
                let slot = prompt_slot("Paste into slot")?;
                match session.paste(slot) {
                    Ok(()) => print_ok(&format!("Pasted into slot {}", slot + 1)),
                    Err(e) => print_error(&e),
                }
            }
            HiveAction::Remove => {
                let slot = prompt_slot("Remove from slot")?;
                match session.remove(slot) {
                    Ok(Some(removed)) => print_ok(&format!("Removed {}", removed.bee.name)),
                    Ok(None) => println!("  {} Slot {} was empty.", style("·").dim(), slot + 1),
                    Err(e) => print_error(&e),
                }
            }
            HiveAction::ShowHive => print_hive(session.build()),
            HiveAction::ClearHive => {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} bees?", session.build().len()))
                    .default(false)
                    .interact()?;
                if confirmed {
                    let removed = session.clear_hive();
                    print_ok(&format!("Cleared {removed} slots"));
                }
            }
            HiveAction::ClearClipboard => {
                session.clear_clipboard();
                print_ok("Clipboard cleared");
            }
            HiveAction::Save => save_build(state, &session, &mut name).await?,
            HiveAction::Export => export_session(state, &session, name.as_deref()).await?,
            HiveAction::Quit => break,
        }
    }

    if json {
        let export = session.export(name.as_deref(), chrono::Utc::now());
        println!("{}", serde_json::to_string_pretty(&export)?);
    }
    Ok(())
}

fn print_status(session: &HiveSession) {
    println!();
    print_totals(session.totals());
    if let Some(bee) = session.pending_bee() {
        println!("  {} Placing {}", style(">").yellow().bold(), bee_label(bee));
    }
    if let Some(copied) = session.clipboard().peek() {
        println!(
            "  {} Clipboard: {} (level {})",
            style("#").cyan(),
            bee_label(&copied.bee),
            copied.level
        );
    }
    println!();
}

fn prompt_slot(prompt: &str) -> Result<usize> {
    let ordinal: usize = Input::new()
        .with_prompt(format!("{prompt} (1-{HIVE_SIZE})"))
        .validate_with(|n: &usize| -> Result<(), String> {
            if (1..=HIVE_SIZE).contains(n) {
                Ok(())
            } else {
                Err(format!("enter a slot between 1 and {HIVE_SIZE}"))
            }
        })
        .interact_text()?;
    Ok(ordinal - 1)
}

fn select_bee(session: &mut HiveSession, catalog: &Catalog) -> Result<()> {
    let search: String = Input::new()
        .with_prompt("Search bees (blank for all)")
        .allow_empty(true)
        .interact_text()?;
    let query = BeeQuery {
        search: Some(search).filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };
    let bees = query.apply(&catalog.bees);
    if bees.is_empty() {
        println!("  {} No bees match.", style("i").blue().bold());
        return Ok(());
    }

    let mut items: Vec<String> = bees
        .iter()
        .map(|b| format!("{} {}", bee_label(b), style(format!("({})", b.rarity)).dim()))
        .collect();
    items.push("< Back".to_string());

    let choice = Select::new().items(&items).default(0).interact()?;
    let Some(bee) = bees.get(choice) else {
        return Ok(());
    };

    match session.select_bee(bee) {
        SelectOutcome::Selected => print_ok(&format!("Placing {}: click empty slots to drop it", bee.name)),
        SelectOutcome::Deselected => print_ok(&format!("Stopped placing {}", bee.name)),
        SelectOutcome::Ignored => {}
    }
    Ok(())
}

fn print_editor(editor: &SlotEditor, session: &HiveSession) {
    println!();
    println!(
        "  {} Slot {}: {}",
        style("Editing").cyan().bold(),
        editor.slot().ordinal(),
        bee_label(editor.bee())
    );
    println!("  {} {}", style("Level:").bold(), editor.level());
    println!(
        "  {} {}",
        style("Gifted:").bold(),
        if editor.gifted() { "yes" } else { "no" }
    );
    match editor.mutation_stat() {
        Some(stat) => println!(
            "  {} {} {}",
            style("Mutation:").bold(),
            stat,
            if editor.mutation_value().is_empty() { "0" } else { editor.mutation_value() }
        ),
        None => println!("  {} none", style("Mutation:").bold()),
    }
    match editor.beequip() {
        Some(beequip) => {
            println!("  {} {} ({})", style("Beequip:").bold(), beequip.name, beequip.kind);
            for (stat, value) in &beequip.stats {
                let effective = editor.overrides().get(stat).copied().unwrap_or(*value);
                let marker = if editor.overrides().contains_key(stat) { " (override)" } else { "" };
                println!("      {stat} +{effective}{marker}");
            }
        }
        None => println!("  {} none", style("Beequip:").bold()),
    }
    match editor.finish(&session.levels()) {
        Ok(config) => println!(
            "  {} {:.1}",
            style("Effective attack:").bold(),
            effective_attack(&config)
        ),
        Err(e) => println!("  {} {}", style("!").yellow().bold(), e),
    }
    println!();
}

fn edit_step(session: &mut HiveSession, catalog: &Catalog) -> Result<()> {
    let Some(editor) = session.editor() else {
        return Ok(());
    };
    print_editor(editor, session);
    let actions = edit_actions(editor);

    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let choice = Select::new().items(&labels).default(0).interact()?;
    let max_level = session.levels().max;

    match actions[choice] {
        EditAction::Save => match session.save_edit() {
            Ok(slot) => print_ok(&format!("Slot {} saved", slot.ordinal())),
            Err(e) => print_error(&e),
        },
        EditAction::Copy => match session.copy_edit() {
            Ok(slot) => print_ok(&format!("Slot {} copied to the clipboard", slot.ordinal())),
            Err(e) => print_error(&e),
        },
        EditAction::Remove => match session.remove_edit() {
            Ok(slot) => print_ok(&format!("Slot {} emptied", slot.ordinal())),
            Err(e) => print_error(&e),
        },
        EditAction::Cancel => {
            session.cancel_edit();
        }
        action => {
            let Some(editor) = session.editor_mut() else {
                return Ok(());
            };
            edit_field(editor, action, catalog, max_level)?;
        }
    }
    Ok(())
}

fn edit_field(
    editor: &mut SlotEditor,
    action: EditAction,
    catalog: &Catalog,
    max_level: u32,
) -> Result<()> {
    match action {
        EditAction::Level => {
            let level: u32 = Input::new()
                .with_prompt(format!("Level (1-{max_level})"))
                .with_initial_text(editor.level().to_string())
                .interact_text()?;
            editor.set_level(level);
        }
        EditAction::ToggleGifted => editor.set_gifted(!editor.gifted()),
        EditAction::MutationStat => {
            let mut items = vec!["None".to_string()];
            items.extend(MutationStat::ALL.iter().map(ToString::to_string));
            let current = editor
                .mutation_stat()
                .and_then(|s| MutationStat::ALL.iter().position(|m| *m == s))
                .map_or(0, |i| i + 1);
            let choice = Select::new().items(&items).default(current).interact()?;
            editor.set_mutation_stat(choice.checked_sub(1).map(|i| MutationStat::ALL[i]));
        }
        EditAction::MutationValue => {
            let value: String = Input::new()
                .with_prompt("Mutation value (e.g. 5 or 2.5%)")
                .with_initial_text(editor.mutation_value())
                .allow_empty(true)
                .interact_text()?;
            editor.set_mutation_value(value);
        }
        EditAction::Beequip => {
            let mut items = vec!["None".to_string()];
            items.extend(
                catalog
                    .beequips
                    .iter()
                    .map(|b| format!("{} ({})", b.name, b.kind)),
            );
            let choice = Select::new().items(&items).default(0).interact()?;
            let beequip = choice
                .checked_sub(1)
                .and_then(|i| catalog.beequips.get(i))
                .cloned();
            let had_overrides = !editor.overrides().is_empty();
            if editor.select_beequip(beequip) && had_overrides {
                println!("  {} Overrides reset", style("·").dim());
            }
        }
        EditAction::Override => {
            let Some(beequip) = editor.beequip() else {
                return Ok(());
            };
            let stats: Vec<String> = beequip.stats.keys().cloned().collect();
            if stats.is_empty() {
                println!("  {} This beequip has no stats to override.", style("i").blue().bold());
                return Ok(());
            }
            let choice = Select::new().items(&stats).default(0).interact()?;
            let raw: String = Input::new()
                .with_prompt(format!("New value for {}", stats[choice]))
                .interact_text()?;
            match parse_magnitude(&raw).and_then(|v| editor.set_override(stats[choice].clone(), v)) {
                Ok(()) => {}
                Err(e) => print_error(&e),
            }
        }
        EditAction::ClearOverride => {
            let stats: Vec<String> = editor.overrides().keys().cloned().collect();
            if stats.is_empty() {
                return Ok(());
            }
            let choice = Select::new().items(&stats).default(0).interact()?;
            editor.clear_override(&stats[choice]);
        }
        EditAction::Save | EditAction::Copy | EditAction::Remove | EditAction::Cancel => {}
    }
    Ok(())
}

async fn save_build(state: &AppState, session: &HiveSession, name: &mut Option<String>) -> Result<()> {
    let mut input = Input::<String>::new().with_prompt("Build name");
    if let Some(current) = name.as_deref() {
        input = input.with_initial_text(current);
    }
    let build_name = input.interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description (blank for a generated one)")
        .allow_empty(true)
        .interact_text()?;
    let is_public = Confirm::new()
        .with_prompt("Make this build public?")
        .default(false)
        .interact()?;

    let request = SaveBuildRequest {
        name: build_name.clone(),
        description: Some(description).filter(|d| !d.trim().is_empty()),
        tags: None,
        is_public,
    };

    match state.build_service.save_build(request, session.build()).await {
        Ok(saved) => {
            print_ok(&format!(
                "Saved '{}' ({} bees, attack {})",
                saved.name, saved.bee_count, saved.total_attack
            ));
            println!("  id: {}", style(&saved.id).dim());
            *name = Some(build_name);
        }
        Err(e) => print_error(&e),
    }
    Ok(())
}

async fn export_session(state: &AppState, session: &HiveSession, name: Option<&str>) -> Result<()> {
    let document = session.export(name, chrono::Utc::now());
    let file_name = session_export_file_name(name);
    match write_export(&state.export_dir, &file_name, &document).await {
        Ok(path) => print_ok(&format!("Exported to {}", path.display())),
        Err(e) => print_error(&e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiveplan_core::editor::LevelRange;
    use hiveplan_types::bee::{Bee, BeeId, Rarity};
    use hiveplan_types::beequip::{Beequip, BeequipId, BeequipType};
    use hiveplan_types::slot::SlotIndex;

    fn bee(id: &str) -> Bee {
        Bee {
            id: BeeId::new(id),
            name: id.to_string(),
            rarity: Rarity::Basic,
            base_attack: Some(1.0),
            base_gather_amount: None,
            base_gather_speed: None,
            base_convert_amount: None,
            base_convert_speed: None,
            energy: None,
            color: None,
            abilities: Vec::new(),
            favorite_field: None,
            description: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn test_empty_session_menu() {
        let session = HiveSession::new(LevelRange::default());
        assert_eq!(
            hive_actions(&session),
            vec![
                HiveAction::SelectBee,
                HiveAction::ClickSlot,
                HiveAction::Export,
                HiveAction::Quit
            ]
        );
    }

    #[test]
    fn test_menu_grows_with_hive_and_clipboard() {
        let mut session = HiveSession::new(LevelRange::default());
        session.select_bee(&bee("basic"));
        session.click_slot(0).unwrap();

        let actions = hive_actions(&session);
        assert!(actions.contains(&HiveAction::CancelPlacement));
        assert!(actions.contains(&HiveAction::Save));
        assert!(!actions.contains(&HiveAction::Paste));

        session.click_slot(0).unwrap();
        session.copy_edit().unwrap();
        let actions = hive_actions(&session);
        assert!(actions.contains(&HiveAction::Paste));
        assert!(actions.contains(&HiveAction::ClearClipboard));
        assert!(!actions.contains(&HiveAction::CancelPlacement));
    }

    #[test]
    fn test_editor_menu_follows_editor_state() {
        let mut session = HiveSession::new(LevelRange::default());
        session.select_bee(&bee("basic"));
        session.click_slot(3).unwrap();
        session.click_slot(3).unwrap();

        let actions = edit_actions(session.editor().unwrap());
        assert!(!actions.contains(&EditAction::MutationValue));
        assert!(!actions.contains(&EditAction::Override));
        assert_eq!(actions.last(), Some(&EditAction::Cancel));

        let editor = session.editor_mut().unwrap();
        editor.set_mutation_stat(Some(MutationStat::Attack));
        editor.select_beequip(Some(Beequip {
            id: BeequipId::new("thimble"),
            name: "Thimble".to_string(),
            kind: BeequipType::Guard,
            rarity: None,
            stats: [("attack".to_string(), 1.0)].into_iter().collect(),
            description: String::new(),
            image_url: None,
        }));
        editor.set_override("attack", 3.0).unwrap();

        let actions = edit_actions(session.editor().unwrap());
        assert!(actions.contains(&EditAction::MutationValue));
        assert!(actions.contains(&EditAction::Override));
        assert!(actions.contains(&EditAction::ClearOverride));
    }

    #[test]
    fn test_describe_click_uses_ordinals() {
        let slot = SlotIndex::new(4).unwrap();
        assert_eq!(describe_click(SlotClick::Placed(slot)).as_deref(), Some("Placed into slot 5"));
        assert_eq!(describe_click(SlotClick::Pasted(slot)).as_deref(), Some("Pasted into slot 5"));
        assert!(describe_click(SlotClick::EditorOpened(slot)).is_none());
        assert!(describe_click(SlotClick::Ignored).is_none());
    }
}
