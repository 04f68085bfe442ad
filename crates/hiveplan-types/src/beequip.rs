use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Stat key read by the attack calculation.
pub const ATTACK_STAT: &str = "attack";

/// Catalog identifier for a beequip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeequipId(pub String);

impl BeequipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeequipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An equippable item from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beequip {
    pub id: BeequipId,
    pub name: String,
    /// The slot the beequip fits into.
    #[serde(rename = "type")]
    pub kind: BeequipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<BeequipRarity>,
    /// Stat name -> numeric bonus.
    pub stats: BTreeMap<String, f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Beequip {
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats.get(name).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeequipType {
    Stinger,
    Guard,
    Antennae,
    Booster,
    Collector,
}

impl fmt::Display for BeequipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeequipType::Stinger => write!(f, "Stinger"),
            BeequipType::Guard => write!(f, "Guard"),
            BeequipType::Antennae => write!(f, "Antennae"),
            BeequipType::Booster => write!(f, "Booster"),
            BeequipType::Collector => write!(f, "Collector"),
        }
    }
}

impl FromStr for BeequipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stinger" => Ok(BeequipType::Stinger),
            "guard" => Ok(BeequipType::Guard),
            "antennae" => Ok(BeequipType::Antennae),
            "booster" => Ok(BeequipType::Booster),
            "collector" => Ok(BeequipType::Collector),
            other => Err(format!("invalid beequip type: '{other}'")),
        }
    }
}

/// Beequip rarity. Separate from bee rarity: there is no Basic or Event tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeequipRarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl fmt::Display for BeequipRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeequipRarity::Common => write!(f, "Common"),
            BeequipRarity::Rare => write!(f, "Rare"),
            BeequipRarity::Epic => write!(f, "Epic"),
            BeequipRarity::Legendary => write!(f, "Legendary"),
            BeequipRarity::Mythic => write!(f, "Mythic"),
        }
    }
}
