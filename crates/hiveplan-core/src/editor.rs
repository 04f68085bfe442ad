//! Slot configuration editor.
//!
//! Holds the in-progress edit of one occupied slot and turns it into a
//! validated replacement `SlotConfig`. The editor never touches the build
//! itself; the session writes the result through `update_slot`.

use std::collections::BTreeMap;

use hiveplan_types::bee::Bee;
use hiveplan_types::beequip::Beequip;
use hiveplan_types::error::HiveError;
use hiveplan_types::slot::{EquippedBeequip, Mutation, MutationStat, SlotConfig, SlotIndex};

/// Default upper bound for bee levels.
pub const DEFAULT_MAX_LEVEL: u32 = 25;

/// Inclusive level bounds accepted by the editor. The minimum is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

impl LevelRange {
    /// A `max` below 1 is raised to 1.
    pub fn new(max: u32) -> Self {
        Self {
            min: 1,
            max: max.max(1),
        }
    }

    pub fn contains(&self, level: u32) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}

/// In-progress edit state for a single slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEditor {
    slot: SlotIndex,
    bee: Bee,
    level: u32,
    gifted: bool,
    mutation_stat: Option<MutationStat>,
    mutation_value: String,
    beequip: Option<Beequip>,
    overrides: BTreeMap<String, f64>,
}

impl SlotEditor {
    /// Start editing from the slot's current configuration.
    pub fn open(slot: SlotIndex, config: &SlotConfig) -> Self {
        let (mutation_stat, mutation_value) = match &config.mutation {
            Some(m) => (Some(m.stat), m.value.to_string()),
            None => (None, String::new()),
        };
        let (beequip, overrides) = match &config.beequip {
            Some(eq) => (Some(eq.base.clone()), eq.overrides.clone()),
            None => (None, BTreeMap::new()),
        };

        Self {
            slot,
            bee: config.bee.clone(),
            level: config.level,
            gifted: config.gifted,
            mutation_stat,
            mutation_value,
            beequip,
            overrides,
        }
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn bee(&self) -> &Bee {
        &self.bee
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gifted(&self) -> bool {
        self.gifted
    }

    pub fn mutation_stat(&self) -> Option<MutationStat> {
        self.mutation_stat
    }

    pub fn mutation_value(&self) -> &str {
        &self.mutation_value
    }

    pub fn beequip(&self) -> Option<&Beequip> {
        self.beequip.as_ref()
    }

    pub fn overrides(&self) -> &BTreeMap<String, f64> {
        &self.overrides
    }

    /// Range checking happens in `finish`, so any value can be held while typing.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn set_gifted(&mut self, gifted: bool) {
        self.gifted = gifted;
    }

    /// `None` selects "no mutation".
    pub fn set_mutation_stat(&mut self, stat: Option<MutationStat>) {
        self.mutation_stat = stat;
    }

    pub fn set_mutation_value(&mut self, value: impl Into<String>) {
        self.mutation_value = value.into();
    }

    /// Change the equipped beequip.
    ///
    /// Overrides are cleared in the same step whenever the referenced beequip
    /// id changes, including to or from none. Returns `true` if they were reset.
    pub fn select_beequip(&mut self, beequip: Option<Beequip>) -> bool {
        let current = self.beequip.as_ref().map(|b| &b.id);
        let next = beequip.as_ref().map(|b| &b.id);
        let changed = current != next;

        if changed {
            self.overrides.clear();
        }
        self.beequip = beequip;

        tracing::debug!(slot = %self.slot, changed, "beequip selected");
        changed
    }

    /// Override one stat of the equipped beequip for this slot only.
    pub fn set_override(&mut self, stat: impl Into<String>, value: f64) -> Result<(), HiveError> {
        if self.beequip.is_none() {
            return Err(HiveError::Validation(
                "no beequip equipped to override".to_string(),
            ));
        }
        if !value.is_finite() {
            return Err(HiveError::Validation(format!(
                "override value must be a number, got {value}"
            )));
        }
        self.overrides.insert(stat.into(), value);
        Ok(())
    }

    /// Drop an override so the base stat applies again.
    pub fn clear_override(&mut self, stat: &str) -> Option<f64> {
        self.overrides.remove(stat)
    }

    /// Validate the edit and produce the replacement configuration.
    ///
    /// The editor keeps its state on failure so the user can correct it.
    pub fn finish(&self, levels: &LevelRange) -> Result<SlotConfig, HiveError> {
        if !levels.contains(self.level) {
            return Err(HiveError::Validation(format!(
                "level must be between {} and {}, got {}",
                levels.min, levels.max, self.level
            )));
        }

        let mutation = match self.mutation_stat {
            Some(stat) => Some(Mutation {
                stat,
                value: parse_magnitude(&self.mutation_value)?,
            }),
            None => None,
        };

        let beequip = self.beequip.as_ref().map(|base| EquippedBeequip {
            base: base.clone(),
            overrides: self.overrides.clone(),
        });

        Ok(SlotConfig {
            bee: self.bee.clone(),
            level: self.level,
            gifted: self.gifted,
            mutation,
            beequip,
        })
    }
}

/// Parse a free-text mutation magnitude such as `"5"`, `" 2.5% "` or `""`.
///
/// Blank input is 0. A single trailing `%` is accepted and dropped.
pub fn parse_magnitude(input: &str) -> Result<f64, HiveError> {
    let trimmed = input.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    if number.is_empty() {
        return Ok(0.0);
    }

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HiveError::Validation(format!(
            "mutation value must be a number, got '{trimmed}'"
        ))),
    }
}
