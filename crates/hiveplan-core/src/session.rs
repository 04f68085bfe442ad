//! Interactive planning session.
//!
//! `HiveSession` is the single owner of the build, the clipboard and the
//! current interaction mode. Front ends hold one session and pass it by
//! reference to rendering code; every mutating action goes through a method
//! here so the totals are recomputed after each change.

use chrono::{DateTime, Utc};

use hiveplan_types::bee::Bee;
use hiveplan_types::build::BuildState;
use hiveplan_types::error::HiveError;
use hiveplan_types::export::BuildExport;
use hiveplan_types::slot::{SlotConfig, SlotIndex};
use hiveplan_types::stats::BuildTotals;

use crate::clipboard::Clipboard;
use crate::editor::{LevelRange, SlotEditor};
use crate::export::session_export;
use crate::hive::BuildStateExt;
use crate::stats::aggregate;

/// What the session is waiting for.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Nothing selected, no editor open.
    Idle,
    /// A catalog bee is selected and will be placed into each empty slot clicked.
    Placing { bee: Bee },
    /// The editor is open on an occupied slot. Other input is ignored until
    /// the edit is saved, copied, removed or cancelled.
    Editing(SlotEditor),
}

/// Result of selecting a bee from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// The pending bee was selected again and the selection was dropped.
    Deselected,
    /// The editor is open.
    Ignored,
}

/// Result of clicking a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClick {
    Placed(SlotIndex),
    Pasted(SlotIndex),
    EditorOpened(SlotIndex),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct HiveSession {
    build: BuildState,
    clipboard: Clipboard,
    mode: Mode,
    levels: LevelRange,
    totals: BuildTotals,
}

impl Default for HiveSession {
    fn default() -> Self {
        Self::new(LevelRange::default())
    }
}

impl HiveSession {
    /// Start with an empty hive.
    pub fn new(levels: LevelRange) -> Self {
        Self::from_build(BuildState::new(), levels)
    }

    /// Start from an existing build, e.g. a re-imported export.
    pub fn from_build(build: BuildState, levels: LevelRange) -> Self {
        let totals = aggregate(&build);
        Self {
            build,
            clipboard: Clipboard::new(),
            mode: Mode::Idle,
            levels,
            totals,
        }
    }

    pub fn build(&self) -> &BuildState {
        &self.build
    }

    pub fn totals(&self) -> &BuildTotals {
        &self.totals
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn levels(&self) -> LevelRange {
        self.levels
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// The bee awaiting placement, if any.
    pub fn pending_bee(&self) -> Option<&Bee> {
        match &self.mode {
            Mode::Placing { bee } => Some(bee),
            _ => None,
        }
    }

    pub fn editor(&self) -> Option<&SlotEditor> {
        match &self.mode {
            Mode::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut SlotEditor> {
        match &mut self.mode {
            Mode::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    /// Select a bee for placement. Selecting the pending bee again deselects it.
    pub fn select_bee(&mut self, bee: &Bee) -> SelectOutcome {
        match &self.mode {
            Mode::Editing(_) => SelectOutcome::Ignored,
            Mode::Placing { bee: pending } if pending.id == bee.id => {
                self.mode = Mode::Idle;
                SelectOutcome::Deselected
            }
            _ => {
                tracing::debug!(bee = %bee.id, "bee selected for placement");
                self.mode = Mode::Placing { bee: bee.clone() };
                SelectOutcome::Selected
            }
        }
    }

    /// Drop the pending placement without placing anything.
    pub fn cancel_placement(&mut self) {
        if matches!(self.mode, Mode::Placing { .. }) {
            self.mode = Mode::Idle;
        }
    }

    /// Handle a click on a slot.
    ///
    /// An occupied slot opens the editor and drops any pending placement. An
    /// empty slot receives the pending bee while placing (the selection is
    /// kept), otherwise the clipboard contents if there are any.
    pub fn click_slot(&mut self, index: usize) -> Result<SlotClick, HiveError> {
        let slot = SlotIndex::new(index)?;

        if matches!(self.mode, Mode::Editing(_)) {
            return Ok(SlotClick::Ignored);
        }

        if let Some(config) = self.build.get(slot) {
            self.mode = Mode::Editing(SlotEditor::open(slot, config));
            return Ok(SlotClick::EditorOpened(slot));
        }

        if let Mode::Placing { bee } = &self.mode {
            self.build.place_bee(index, bee)?;
            self.refresh();
            return Ok(SlotClick::Placed(slot));
        }

        if let Some(config) = self.clipboard.peek() {
            self.build.paste_slot(index, config.clone())?;
            self.refresh();
            return Ok(SlotClick::Pasted(slot));
        }

        Ok(SlotClick::Ignored)
    }

    /// Paste the clipboard into an empty slot.
    pub fn paste(&mut self, index: usize) -> Result<(), HiveError> {
        let config = self
            .clipboard
            .peek()
            .cloned()
            .ok_or_else(|| HiveError::Validation("clipboard is empty".to_string()))?;
        self.build.paste_slot(index, config)?;
        self.refresh();
        Ok(())
    }

    /// Validate the open edit and write it to its slot.
    ///
    /// On a validation error the editor stays open with its input intact.
    pub fn save_edit(&mut self) -> Result<SlotIndex, HiveError> {
        let (slot, config) = {
            let editor = self.require_editor()?;
            (editor.slot(), editor.finish(&self.levels)?)
        };
        self.build.update_slot(slot.get(), config)?;
        self.mode = Mode::Idle;
        self.refresh();
        Ok(slot)
    }

    /// Close the editor without applying it. Returns `false` if none was open.
    pub fn cancel_edit(&mut self) -> bool {
        if matches!(self.mode, Mode::Editing(_)) {
            self.mode = Mode::Idle;
            true
        } else {
            false
        }
    }

    /// Copy the unsaved edit into the clipboard and close the editor.
    ///
    /// The slot itself keeps its previous configuration.
    pub fn copy_edit(&mut self) -> Result<SlotIndex, HiveError> {
        let (slot, config) = {
            let editor = self.require_editor()?;
            (editor.slot(), editor.finish(&self.levels)?)
        };
        self.clipboard.copy(config);
        self.mode = Mode::Idle;
        Ok(slot)
    }

    /// Remove the bee under the editor and close it.
    pub fn remove_edit(&mut self) -> Result<SlotIndex, HiveError> {
        let slot = self.require_editor()?.slot();
        self.build.remove_bee(slot.get())?;
        self.mode = Mode::Idle;
        self.refresh();
        Ok(slot)
    }

    /// Remove a bee directly. Closes the editor if it was open on that slot.
    pub fn remove(&mut self, index: usize) -> Result<Option<SlotConfig>, HiveError> {
        let removed = self.build.remove_bee(index)?;
        if self.editor().is_some_and(|e| e.slot().get() == index) {
            self.mode = Mode::Idle;
        }
        self.refresh();
        Ok(removed)
    }

    /// Empty the hive. The clipboard and any pending placement survive.
    pub fn clear_hive(&mut self) -> usize {
        let removed = self.build.clear();
        if matches!(self.mode, Mode::Editing(_)) {
            self.mode = Mode::Idle;
        }
        self.refresh();
        removed
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    /// Snapshot the session as an export document.
    pub fn export(&self, name: Option<&str>, timestamp: DateTime<Utc>) -> BuildExport {
        session_export(name, &self.build, timestamp)
    }

    fn require_editor(&self) -> Result<&SlotEditor, HiveError> {
        self.editor()
            .ok_or_else(|| HiveError::Validation("no slot is being edited".to_string()))
    }

    fn refresh(&mut self) {
        self.totals = aggregate(&self.build);
    }
}
