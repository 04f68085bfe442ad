//! Shared catalog entries for unit tests.

use std::collections::BTreeMap;

use hiveplan_types::bee::{Bee, BeeColor, BeeId, Rarity};
use hiveplan_types::beequip::{Beequip, BeequipId, BeequipType};

pub fn bee(id: &str, rarity: Rarity, attack: f64) -> Bee {
    Bee {
        id: BeeId::new(id),
        name: format!("{id} Bee"),
        rarity,
        base_attack: Some(attack),
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

pub fn colored_bee(id: &str, color: BeeColor, attack: f64, gather: f64, convert: f64) -> Bee {
    Bee {
        color: Some(color),
        base_gather_amount: Some(gather),
        base_convert_amount: Some(convert),
        ..bee(id, Rarity::Rare, attack)
    }
}

pub fn beequip(id: &str, stats: &[(&str, f64)]) -> Beequip {
    Beequip {
        id: BeequipId::new(id),
        name: format!("{id} Beequip"),
        kind: BeequipType::Stinger,
        rarity: None,
        stats: stats
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
        description: String::new(),
        image_url: None,
    }
}
