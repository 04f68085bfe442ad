use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Catalog identifier for a bee, as assigned by the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeeId(pub String);

impl BeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bee definition from the catalog. Immutable once loaded.
///
/// Base stats are optional in the catalog; an absent stat counts as 0
/// (gather speed counts as 1) through the accessor methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bee {
    pub id: BeeId,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_attack: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_gather_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_gather_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_convert_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_convert_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Pollen colour; bees without one are left out of colour counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<BeeColor>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_field: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Bee {
    pub fn attack(&self) -> f64 {
        self.base_attack.unwrap_or(0.0)
    }

    pub fn gather_amount(&self) -> f64 {
        self.base_gather_amount.unwrap_or(0.0)
    }

    pub fn gather_speed(&self) -> f64 {
        self.base_gather_speed.unwrap_or(1.0)
    }

    pub fn convert_amount(&self) -> f64 {
        self.base_convert_amount.unwrap_or(0.0)
    }

    pub fn convert_speed(&self) -> f64 {
        self.base_convert_speed.unwrap_or(0.0)
    }

    pub fn energy(&self) -> f64 {
        self.energy.unwrap_or(0.0)
    }
}

/// Rarity tiers, declared in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Basic,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Event,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Basic,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Event,
    ];

    /// Position in the tier order (Basic = 0).
    pub fn tier(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Basic => write!(f, "Basic"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
            Rarity::Mythic => write!(f, "Mythic"),
            Rarity::Event => write!(f, "Event"),
        }
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Rarity::Basic),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            "mythic" => Ok(Rarity::Mythic),
            "event" => Ok(Rarity::Event),
            other => Err(format!("invalid rarity: '{other}'")),
        }
    }
}

/// Pollen colour of a bee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeeColor {
    Red,
    Blue,
    White,
    Colorless,
}

impl BeeColor {
    pub const ALL: [BeeColor; 4] = [
        BeeColor::Red,
        BeeColor::Blue,
        BeeColor::White,
        BeeColor::Colorless,
    ];
}

impl fmt::Display for BeeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeeColor::Red => write!(f, "Red"),
            BeeColor::Blue => write!(f, "Blue"),
            BeeColor::White => write!(f, "White"),
            BeeColor::Colorless => write!(f, "Colorless"),
        }
    }
}

impl FromStr for BeeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(BeeColor::Red),
            "blue" => Ok(BeeColor::Blue),
            "white" => Ok(BeeColor::White),
            "colorless" => Ok(BeeColor::Colorless),
            other => Err(format!("invalid bee color: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stats_default_to_zero() {
        let bee: Bee = serde_json::from_str(
            r#"{"id": "b1", "name": "Basic Bee", "rarity": "Basic"}"#,
        )
        .unwrap();

        assert_eq!(bee.attack(), 0.0);
        assert_eq!(bee.gather_amount(), 0.0);
        assert_eq!(bee.convert_amount(), 0.0);
        assert_eq!(bee.energy(), 0.0);
        assert_eq!(bee.gather_speed(), 1.0);
        assert!(bee.color.is_none());
        assert!(bee.abilities.is_empty());
    }

    #[test]
    fn test_absent_stats_are_not_serialized() {
        let bee: Bee = serde_json::from_str(
            r#"{"id": "b1", "name": "Basic Bee", "rarity": "Basic", "base_attack": 1}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&bee).unwrap();
        assert_eq!(json["base_attack"], 1.0);
        assert!(json.get("base_gather_amount").is_none());
    }

    #[test]
    fn test_rarity_tier_order() {
        assert!(Rarity::Basic < Rarity::Rare);
        assert!(Rarity::Mythic < Rarity::Event);
        assert_eq!(Rarity::Event.tier(), 5);
    }

    #[test]
    fn test_rarity_parse_is_case_insensitive() {
        assert_eq!("legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
        assert_eq!("MYTHIC".parse::<Rarity>().unwrap(), Rarity::Mythic);
        assert!("shiny".parse::<Rarity>().is_err());
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("blue".parse::<BeeColor>().unwrap(), BeeColor::Blue);
        assert!("green".parse::<BeeColor>().is_err());
    }
}
