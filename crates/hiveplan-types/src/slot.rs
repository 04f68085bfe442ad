//! Hive slot addressing and per-slot configuration.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::bee::Bee;
use crate::beequip::Beequip;
use crate::error::{HiveError, InvalidSlotReason};

/// Number of slots in a hive.
pub const HIVE_SIZE: usize = 50;

/// Level given to a freshly placed bee.
pub const DEFAULT_LEVEL: u32 = 9;

/// A validated slot position in `0..HIVE_SIZE`.
///
/// Serialized as a plain integer (a decimal string when used as a JSON map key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Validate a raw index.
    pub fn new(index: usize) -> Result<Self, HiveError> {
        if index < HIVE_SIZE {
            Ok(Self(index as u8))
        } else {
            Err(HiveError::invalid_slot(index, InvalidSlotReason::OutOfRange))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// One-based position as shown to players ("Slot #1").
    pub fn ordinal(self) -> usize {
        self.get() + 1
    }

    /// Every slot in hive order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..HIVE_SIZE as u8).map(SlotIndex)
    }
}

impl TryFrom<u8> for SlotIndex {
    type Error = HiveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SlotIndex::new(value as usize)
    }
}

impl From<SlotIndex> for u8 {
    fn from(index: SlotIndex) -> Self {
        index.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of stats a mutation can roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationStat {
    Attack,
    Pollen,
    #[serde(rename = "Convert Rate")]
    ConvertRate,
    #[serde(rename = "Energy Regen")]
    EnergyRegen,
    #[serde(rename = "Move Speed")]
    MoveSpeed,
    #[serde(rename = "Critical Chance")]
    CriticalChance,
}

impl MutationStat {
    pub const ALL: [MutationStat; 6] = [
        MutationStat::Attack,
        MutationStat::Pollen,
        MutationStat::ConvertRate,
        MutationStat::EnergyRegen,
        MutationStat::MoveSpeed,
        MutationStat::CriticalChance,
    ];
}

impl fmt::Display for MutationStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationStat::Attack => write!(f, "Attack"),
            MutationStat::Pollen => write!(f, "Pollen"),
            MutationStat::ConvertRate => write!(f, "Convert Rate"),
            MutationStat::EnergyRegen => write!(f, "Energy Regen"),
            MutationStat::MoveSpeed => write!(f, "Move Speed"),
            MutationStat::CriticalChance => write!(f, "Critical Chance"),
        }
    }
}

impl FromStr for MutationStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "attack" => Ok(MutationStat::Attack),
            "pollen" => Ok(MutationStat::Pollen),
            "convertrate" => Ok(MutationStat::ConvertRate),
            "energyregen" => Ok(MutationStat::EnergyRegen),
            "movespeed" => Ok(MutationStat::MoveSpeed),
            "criticalchance" => Ok(MutationStat::CriticalChance),
            _ => Err(format!("invalid mutation stat: '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub stat: MutationStat,
    pub value: f64,
}

/// A beequip fitted to one slot, with per-slot stat overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedBeequip {
    pub base: Beequip,
    /// Stat name -> value that supersedes the base stat for this slot only.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

impl EquippedBeequip {
    pub fn new(base: Beequip) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    /// Override if set, else the base stat, else `None`.
    pub fn effective_stat(&self, name: &str) -> Option<f64> {
        self.overrides
            .get(name)
            .copied()
            .or_else(|| self.base.stat(name))
    }
}

/// Configuration of one occupied slot.
///
/// `mutation` and `beequip` are `None` when unset; they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub bee: Bee,
    pub level: u32,
    pub gifted: bool,
    pub mutation: Option<Mutation>,
    pub beequip: Option<EquippedBeequip>,
}

impl SlotConfig {
    /// A freshly placed bee: level 9, not gifted, no mutation, no beequip.
    pub fn placed(bee: Bee) -> Self {
        Self {
            bee,
            level: DEFAULT_LEVEL,
            gifted: false,
            mutation: None,
            beequip: None,
        }
    }
}
