//! Aggregate totals over a build.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::bee::{BeeColor, Rarity};

/// Summary of a hive, recomputed after every build-state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildTotals {
    /// Number of occupied slots.
    pub bee_count: u32,
    /// Sum of effective attack, rounded once at the end.
    pub total_attack: i64,
    /// Sum of base gather amounts (no modifiers).
    pub total_gather_rate: f64,
    /// Sum of base convert amounts (no modifiers).
    pub total_convert_rate: f64,
    /// `round((total_attack + total_gather_rate) / bee_count)`, 0 for an empty hive.
    pub efficiency: i64,
    #[serde(default)]
    pub total_gather_speed: f64,
    #[serde(default)]
    pub total_energy: f64,
    #[serde(default)]
    pub rarity_counts: BTreeMap<Rarity, u32>,
    /// Bees without a colour are not counted.
    #[serde(default)]
    pub color_counts: BTreeMap<BeeColor, u32>,
    /// Distinct colours present, in `BeeColor` declaration order.
    #[serde(default)]
    pub color_tags: Vec<BeeColor>,
}

impl BuildTotals {
    pub fn headline(&self) -> HeadlineStats {
        HeadlineStats {
            total_attack: self.total_attack,
            total_gather_rate: self.total_gather_rate,
            total_convert_rate: self.total_convert_rate,
            bee_count: self.bee_count,
        }
    }
}

/// The four numbers stored with a saved build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadlineStats {
    pub total_attack: i64,
    pub total_gather_rate: f64,
    pub total_convert_rate: f64,
    pub bee_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_copies_persisted_fields() {
        let totals = BuildTotals {
            bee_count: 3,
            total_attack: 227,
            total_gather_rate: 30.0,
            total_convert_rate: 120.0,
            efficiency: 86,
            ..Default::default()
        };
        let headline = totals.headline();
        assert_eq!(headline.bee_count, 3);
        assert_eq!(headline.total_attack, 227);
        assert_eq!(headline.total_convert_rate, 120.0);
    }

    #[test]
    fn test_rarity_counts_json_keys() {
        let mut totals = BuildTotals::default();
        totals.rarity_counts.insert(Rarity::Legendary, 2);
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["rarity_counts"]["Legendary"], 2);

        let parsed: BuildTotals = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.rarity_counts.get(&Rarity::Legendary), Some(&2));
    }
}
