//! Build-state mutations.
//!
//! The `BuildState` struct lives in `hiveplan-types`; this module provides an
//! extension trait (`BuildStateExt`) with the mutating operations. Every
//! operation bounds-checks the slot index before touching the map, so a
//! failed call leaves the state unchanged.

use hiveplan_types::bee::Bee;
use hiveplan_types::build::BuildState;
use hiveplan_types::error::{HiveError, InvalidSlotReason};
use hiveplan_types::slot::{SlotConfig, SlotIndex};

/// Mutating operations on a `BuildState`.
pub trait BuildStateExt {
    /// Place `bee` with default settings into an empty slot.
    ///
    /// Returns `Ok(false)` without changing anything when the slot is
    /// already occupied (occupied slots are edited, not re-placed).
    fn place_bee(&mut self, index: usize, bee: &Bee) -> Result<bool, HiveError>;

    /// Empty a slot. Removing from an empty slot is not an error.
    fn remove_bee(&mut self, index: usize) -> Result<Option<SlotConfig>, HiveError>;

    /// Replace the configuration of an occupied slot wholesale.
    ///
    /// Returns the previous configuration.
    fn update_slot(&mut self, index: usize, config: SlotConfig) -> Result<SlotConfig, HiveError>;

    /// Write a configuration into an empty slot (clipboard paste).
    fn paste_slot(&mut self, index: usize, config: SlotConfig) -> Result<(), HiveError>;

    /// Empty every slot. Returns how many bees were removed.
    fn clear(&mut self) -> usize;
}

impl BuildStateExt for BuildState {
    fn place_bee(&mut self, index: usize, bee: &Bee) -> Result<bool, HiveError> {
        let slot = SlotIndex::new(index)?;
        if self.slots.contains_key(&slot) {
            tracing::debug!(slot = index, "slot occupied, placement skipped");
            return Ok(false);
        }
        self.slots.insert(slot, SlotConfig::placed(bee.clone()));
        tracing::debug!(slot = index, bee = %bee.id, "bee placed");
        Ok(true)
    }

    fn remove_bee(&mut self, index: usize) -> Result<Option<SlotConfig>, HiveError> {
        let slot = SlotIndex::new(index)?;
        let removed = self.slots.remove(&slot);
        if removed.is_some() {
            tracing::debug!(slot = index, "bee removed");
        }
        Ok(removed)
    }

    fn update_slot(&mut self, index: usize, config: SlotConfig) -> Result<SlotConfig, HiveError> {
        let slot = SlotIndex::new(index)?;
        match self.slots.get_mut(&slot) {
            Some(existing) => {
                tracing::debug!(slot = index, "slot updated");
                Ok(std::mem::replace(existing, config))
            }
            None => Err(HiveError::invalid_slot(index, InvalidSlotReason::Unoccupied)),
        }
    }

    fn paste_slot(&mut self, index: usize, config: SlotConfig) -> Result<(), HiveError> {
        let slot = SlotIndex::new(index)?;
        if self.slots.contains_key(&slot) {
            return Err(HiveError::invalid_slot(index, InvalidSlotReason::Occupied));
        }
        tracing::debug!(slot = index, bee = %config.bee.id, "configuration pasted");
        self.slots.insert(slot, config);
        Ok(())
    }

    fn clear(&mut self) -> usize {
        let removed = self.slots.len();
        self.slots.clear();
        tracing::debug!(removed, "hive cleared");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bee;
    use hiveplan_types::bee::Rarity;
    use hiveplan_types::slot::{DEFAULT_LEVEL, HIVE_SIZE};

    #[test]
    fn test_place_bee_uses_defaults() {
        let mut state = BuildState::new();
        let placed = state.place_bee(3, &bee("brave", Rarity::Rare, 5.0)).unwrap();
        assert!(placed);

        let config = state.get(SlotIndex::new(3).unwrap()).unwrap();
        assert_eq!(config.level, DEFAULT_LEVEL);
        assert!(!config.gifted);
        assert!(config.mutation.is_none());
        assert!(config.beequip.is_none());
    }

    #[test]
    fn test_place_bee_out_of_range() {
        let mut state = BuildState::new();
        let err = state
            .place_bee(HIVE_SIZE, &bee("brave", Rarity::Rare, 5.0))
            .unwrap_err();
        assert!(matches!(
            err,
            HiveError::InvalidSlot {
                reason: InvalidSlotReason::OutOfRange,
                ..
            }
        ));
        assert!(state.is_empty());
    }

    #[test]
    fn test_place_bee_on_occupied_slot_is_noop() {
        let mut state = BuildState::new();
        state.place_bee(0, &bee("brave", Rarity::Rare, 5.0)).unwrap();
        let mut edited = state.get(SlotIndex::new(0).unwrap()).unwrap().clone();
        edited.level = 15;
        state.update_slot(0, edited).unwrap();

        let placed = state.place_bee(0, &bee("bomber", Rarity::Rare, 3.0)).unwrap();
        assert!(!placed);
        let config = state.get(SlotIndex::new(0).unwrap()).unwrap();
        assert_eq!(config.bee.id.as_str(), "brave");
        assert_eq!(config.level, 15);
    }

    #[test]
    fn test_place_then_remove_restores_occupancy() {
        let mut state = BuildState::new();
        state.place_bee(1, &bee("basic", Rarity::Basic, 1.0)).unwrap();
        let before = state.clone();

        state.place_bee(20, &bee("brave", Rarity::Rare, 5.0)).unwrap();
        state.remove_bee(20).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_empty_slot_is_idempotent() {
        let mut state = BuildState::new();
        assert!(state.remove_bee(4).unwrap().is_none());
        assert!(state.remove_bee(4).unwrap().is_none());
        assert!(state.remove_bee(99).is_err());
    }

    #[test]
    fn test_update_slot_requires_placement() {
        let mut state = BuildState::new();
        let config = SlotConfig::placed(bee("brave", Rarity::Rare, 5.0));
        let err = state.update_slot(2, config).unwrap_err();
        assert!(matches!(
            err,
            HiveError::InvalidSlot {
                index: 2,
                reason: InvalidSlotReason::Unoccupied
            }
        ));
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_slot_replaces_wholesale() {
        let mut state = BuildState::new();
        state.place_bee(2, &bee("brave", Rarity::Rare, 5.0)).unwrap();

        let mut replacement = SlotConfig::placed(bee("rad", Rarity::Epic, 7.0));
        replacement.gifted = true;
        let previous = state.update_slot(2, replacement.clone()).unwrap();

        assert_eq!(previous.bee.id.as_str(), "brave");
        assert_eq!(state.get(SlotIndex::new(2).unwrap()), Some(&replacement));
    }

    #[test]
    fn test_paste_slot_requires_empty_target() {
        let mut state = BuildState::new();
        state.place_bee(0, &bee("brave", Rarity::Rare, 5.0)).unwrap();
        let config = SlotConfig::placed(bee("rad", Rarity::Epic, 7.0));

        let err = state.paste_slot(0, config.clone()).unwrap_err();
        assert!(matches!(
            err,
            HiveError::InvalidSlot {
                reason: InvalidSlotReason::Occupied,
                ..
            }
        ));

        state.paste_slot(1, config.clone()).unwrap();
        assert_eq!(state.get(SlotIndex::new(1).unwrap()), Some(&config));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut state = BuildState::new();
        for i in 0..5 {
            state.place_bee(i, &bee("basic", Rarity::Basic, 1.0)).unwrap();
        }
        assert_eq!(state.clear(), 5);
        assert!(state.is_empty());
        assert_eq!(state.clear(), 0);
    }
}
