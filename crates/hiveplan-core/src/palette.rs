//! Display colours for rarities and pollen colours.
//!
//! Exhaustive matches, so a new variant fails to compile until it has a colour.

use hiveplan_types::bee::{BeeColor, Rarity};
use hiveplan_types::beequip::BeequipRarity;

/// Terminal-friendly colour names, mapped onto a concrete style by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gray,
    Blue,
    Purple,
    Yellow,
    Cyan,
    Green,
    Red,
    White,
    Dim,
}

pub fn rarity_tone(rarity: Rarity) -> Tone {
    match rarity {
        Rarity::Basic => Tone::Gray,
        Rarity::Rare => Tone::Blue,
        Rarity::Epic => Tone::Purple,
        Rarity::Legendary => Tone::Yellow,
        Rarity::Mythic => Tone::Cyan,
        Rarity::Event => Tone::Green,
    }
}

/// Highlight for the rarest tiers only.
pub fn rarity_glow(rarity: Rarity) -> Option<Tone> {
    match rarity {
        Rarity::Basic | Rarity::Rare | Rarity::Epic => None,
        Rarity::Legendary => Some(Tone::Yellow),
        Rarity::Mythic => Some(Tone::Cyan),
        Rarity::Event => Some(Tone::Green),
    }
}

pub fn color_tone(color: Option<BeeColor>) -> Tone {
    match color {
        Some(BeeColor::Red) => Tone::Red,
        Some(BeeColor::Blue) => Tone::Blue,
        Some(BeeColor::White) => Tone::White,
        Some(BeeColor::Colorless) | None => Tone::Dim,
    }
}

pub fn beequip_rarity_tone(rarity: Option<BeequipRarity>) -> Tone {
    match rarity {
        Some(BeequipRarity::Common) | None => Tone::Gray,
        Some(BeequipRarity::Rare) => Tone::Blue,
        Some(BeequipRarity::Epic) => Tone::Purple,
        Some(BeequipRarity::Legendary) => Tone::Yellow,
        Some(BeequipRarity::Mythic) => Tone::Cyan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_only_for_top_tiers() {
        let glowing: Vec<Rarity> = Rarity::ALL
            .into_iter()
            .filter(|r| rarity_glow(*r).is_some())
            .collect();
        assert_eq!(glowing, vec![Rarity::Legendary, Rarity::Mythic, Rarity::Event]);
    }

    #[test]
    fn test_uncoloured_bees_are_dim() {
        assert_eq!(color_tone(None), Tone::Dim);
        assert_eq!(color_tone(Some(BeeColor::Colorless)), Tone::Dim);
        assert_eq!(color_tone(Some(BeeColor::Red)), Tone::Red);
    }
}
