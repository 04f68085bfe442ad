//! Stat aggregation over a build.
//!
//! Pure and order-independent: per-slot contributions are summed in a
//! canonical order so any enumeration of the same slots yields identical
//! totals, bit for bit.

use std::collections::BTreeMap;

use hiveplan_types::beequip::ATTACK_STAT;
use hiveplan_types::build::BuildState;
use hiveplan_types::slot::{MutationStat, SlotConfig};
use hiveplan_types::stats::BuildTotals;

/// Attack gained per level above 1, as a fraction of base attack.
pub const LEVEL_ATTACK_BONUS: f64 = 0.1;

/// Attack multiplier for gifted bees.
pub const GIFTED_ATTACK_MULTIPLIER: f64 = 1.2;

/// Attack multiplier for an Attack mutation, regardless of magnitude.
pub const ATTACK_MUTATION_MULTIPLIER: f64 = 1.05;

/// Effective attack of one slot, unrounded.
///
/// Level bonus, then gifted, then mutation multiply in that order; the
/// beequip attack bonus (slot override, else base stat, else 0) is added last.
pub fn effective_attack(config: &SlotConfig) -> f64 {
    let level_bonus = 1.0 + (f64::from(config.level) - 1.0) * LEVEL_ATTACK_BONUS;
    let mut attack = config.bee.attack() * level_bonus;

    if config.gifted {
        attack *= GIFTED_ATTACK_MULTIPLIER;
    }
    if config
        .mutation
        .as_ref()
        .is_some_and(|m| m.stat == MutationStat::Attack)
    {
        attack *= ATTACK_MUTATION_MULTIPLIER;
    }
    if let Some(beequip) = &config.beequip {
        attack += beequip.effective_stat(ATTACK_STAT).unwrap_or(0.0);
    }

    attack
}

/// Fold a build into its totals.
pub fn aggregate(state: &BuildState) -> BuildTotals {
    aggregate_slots(state.slots.values())
}

/// Fold any collection of occupied slots into totals.
///
/// Gather and convert totals are plain sums of base amounts; level, gift,
/// mutation and beequip only affect attack.
pub fn aggregate_slots<'a, I>(slots: I) -> BuildTotals
where
    I: IntoIterator<Item = &'a SlotConfig>,
{
    let mut attack = Vec::new();
    let mut gather = Vec::new();
    let mut convert = Vec::new();
    let mut gather_speed = Vec::new();
    let mut energy = Vec::new();
    let mut rarity_counts = BTreeMap::new();
    let mut color_counts = BTreeMap::new();

    for config in slots {
        attack.push(effective_attack(config));
        gather.push(config.bee.gather_amount());
        convert.push(config.bee.convert_amount());
        gather_speed.push(config.bee.gather_speed());
        energy.push(config.bee.energy());

        *rarity_counts.entry(config.bee.rarity).or_insert(0) += 1;
        if let Some(color) = config.bee.color {
            *color_counts.entry(color).or_insert(0) += 1;
        }
    }

    let bee_count = attack.len() as u32;
    let total_attack = canonical_sum(attack).round() as i64;
    let total_gather_rate = canonical_sum(gather);

    let efficiency = if bee_count == 0 {
        0
    } else {
        ((total_attack as f64 + total_gather_rate) / f64::from(bee_count)).round() as i64
    };

    BuildTotals {
        bee_count,
        total_attack,
        total_gather_rate,
        total_convert_rate: canonical_sum(convert),
        efficiency,
        total_gather_speed: canonical_sum(gather_speed),
        total_energy: canonical_sum(energy),
        color_tags: color_counts.keys().copied().collect(),
        rarity_counts,
        color_counts,
    }
}

/// Sum in ascending order so the result does not depend on input order.
fn canonical_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{bee, beequip, colored_bee};
    use crate::hive::BuildStateExt;
    use hiveplan_types::bee::{BeeColor, Rarity};
    use hiveplan_types::slot::{EquippedBeequip, Mutation, SlotIndex};
    use proptest::prelude::*;

    fn slot(level: u32, gifted: bool, mutation: Option<MutationStat>) -> SlotConfig {
        SlotConfig {
            level,
            gifted,
            mutation: mutation.map(|stat| Mutation { stat, value: 3.0 }),
            ..SlotConfig::placed(bee("a", Rarity::Rare, 100.0))
        }
    }

    fn state_of(configs: Vec<SlotConfig>) -> BuildState {
        let mut state = BuildState::new();
        for (i, config) in configs.into_iter().enumerate() {
            state.slots.insert(SlotIndex::new(i).unwrap(), config);
        }
        state
    }

    #[test]
    fn test_level_nine_attack() {
        let totals = aggregate(&state_of(vec![slot(9, false, None)]));
        assert_eq!(totals.total_attack, 180);
    }

    #[test]
    fn test_gifted_attack() {
        let totals = aggregate(&state_of(vec![slot(9, true, None)]));
        assert_eq!(totals.total_attack, 216);
    }

    #[test]
    fn test_gifted_attack_mutation() {
        let config = slot(9, true, Some(MutationStat::Attack));
        assert!((effective_attack(&config) - 226.8).abs() < 1e-9);

        let totals = aggregate(&state_of(vec![config]));
        assert_eq!(totals.total_attack, 227);
    }

    #[test]
    fn test_non_attack_mutation_has_no_effect() {
        let totals = aggregate(&state_of(vec![slot(9, false, Some(MutationStat::Pollen))]));
        assert_eq!(totals.total_attack, 180);
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        // 680.4 -> 680; rounding each slot first would give 681.
        let config = slot(9, true, Some(MutationStat::Attack));
        let totals = aggregate(&state_of(vec![config.clone(), config.clone(), config]));
        assert_eq!(totals.total_attack, 680);
    }

    #[test]
    fn test_beequip_base_attack_added_after_multipliers() {
        let mut config = slot(9, true, None);
        config.beequip = Some(EquippedBeequip::new(beequip("q", &[("attack", 4.0)])));
        assert!((effective_attack(&config) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_beequip_override_supersedes_base() {
        let mut equipped = EquippedBeequip::new(beequip("q", &[("attack", 4.0)]));
        equipped.overrides.insert("attack".to_string(), 10.0);
        let mut config = slot(9, false, None);
        config.beequip = Some(equipped);
        assert!((effective_attack(&config) - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_beequip_override_without_base_stat() {
        let mut equipped = EquippedBeequip::new(beequip("q", &[("pollen", 12.0)]));
        let mut config = slot(9, false, None);
        config.beequip = Some(equipped.clone());
        assert!((effective_attack(&config) - 180.0).abs() < 1e-9);

        equipped.overrides.insert("attack".to_string(), 2.0);
        config.beequip = Some(equipped);
        assert!((effective_attack(&config) - 182.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_hive_totals() {
        let totals = aggregate(&BuildState::new());
        assert_eq!(totals.bee_count, 0);
        assert_eq!(totals.total_attack, 0);
        assert_eq!(totals.efficiency, 0);
        assert_eq!(totals.total_gather_rate, 0.0);
        assert!(totals.rarity_counts.is_empty());
    }

    #[test]
    fn test_gather_and_convert_ignore_modifiers() {
        let mut gifted = SlotConfig::placed(colored_bee("x", BeeColor::Blue, 2.0, 10.0, 40.0));
        gifted.gifted = true;
        gifted.level = 20;
        gifted.mutation = Some(Mutation {
            stat: MutationStat::Pollen,
            value: 5.0,
        });
        let plain = SlotConfig::placed(colored_bee("y", BeeColor::Red, 3.0, 6.0, 25.0));

        let totals = aggregate(&state_of(vec![gifted, plain]));
        assert_eq!(totals.total_gather_rate, 16.0);
        assert_eq!(totals.total_convert_rate, 65.0);
    }

    #[test]
    fn test_efficiency() {
        // attack 180 + 180 = 360, gather 0 + 0 -> 360 / 2 = 180
        let totals = aggregate(&state_of(vec![slot(9, false, None), slot(9, false, None)]));
        assert_eq!(totals.efficiency, 180);

        let mut state = BuildState::new();
        state
            .place_bee(0, &colored_bee("x", BeeColor::White, 1.0, 10.0, 0.0))
            .unwrap();
        state
            .place_bee(1, &colored_bee("y", BeeColor::White, 1.0, 11.0, 0.0))
            .unwrap();
        // attack 1.8 + 1.8 = 3.6 -> 4; (4 + 21) / 2 = 12.5 -> 13
        let totals = aggregate(&state);
        assert_eq!(totals.total_attack, 4);
        assert_eq!(totals.efficiency, 13);
    }

    #[test]
    fn test_rarity_and_color_histograms() {
        let configs = vec![
            SlotConfig::placed(colored_bee("r1", BeeColor::Red, 1.0, 1.0, 1.0)),
            SlotConfig::placed(colored_bee("r2", BeeColor::Red, 1.0, 1.0, 1.0)),
            SlotConfig::placed(colored_bee("b1", BeeColor::Blue, 1.0, 1.0, 1.0)),
            SlotConfig::placed(bee("plain", Rarity::Legendary, 1.0)),
        ];
        let totals = aggregate(&state_of(configs));

        assert_eq!(totals.rarity_counts.get(&Rarity::Rare), Some(&3));
        assert_eq!(totals.rarity_counts.get(&Rarity::Legendary), Some(&1));
        assert_eq!(totals.color_counts.get(&BeeColor::Red), Some(&2));
        assert_eq!(totals.color_counts.get(&BeeColor::Blue), Some(&1));
        assert_eq!(totals.color_counts.values().sum::<u32>(), 3);
        assert_eq!(totals.color_tags, vec![BeeColor::Red, BeeColor::Blue]);
    }

    #[test]
    fn test_missing_gather_speed_counts_as_one() {
        let totals = aggregate(&state_of(vec![slot(9, false, None), slot(1, false, None)]));
        assert_eq!(totals.total_gather_speed, 2.0);
        assert_eq!(totals.total_energy, 0.0);
    }

    fn arb_slot() -> impl Strategy<Value = SlotConfig> {
        (
            0.0f64..500.0,
            0.0f64..80.0,
            0.0f64..400.0,
            1u32..=25,
            any::<bool>(),
            prop::option::of(prop::sample::select(MutationStat::ALL.to_vec())),
            prop::option::of(0.0f64..20.0),
            prop::option::of(prop::sample::select(BeeColor::ALL.to_vec())),
        )
            .prop_map(
                |(atk, gather, convert, level, gifted, mutation, equip_attack, color)| {
                    let mut config = SlotConfig::placed(bee("p", Rarity::Epic, atk));
                    config.bee.base_gather_amount = Some(gather);
                    config.bee.base_convert_amount = Some(convert);
                    config.bee.color = color;
                    config.level = level;
                    config.gifted = gifted;
                    config.mutation = mutation.map(|stat| Mutation { stat, value: 1.0 });
                    config.beequip = equip_attack
                        .map(|a| EquippedBeequip::new(beequip("q", &[("attack", a)])));
                    config
                },
            )
    }

    proptest! {
        #[test]
        fn prop_aggregate_is_order_independent(
            (original, shuffled) in prop::collection::vec(arb_slot(), 0..50)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let a = aggregate_slots(original.iter());
            let b = aggregate_slots(shuffled.iter());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_empty_or_not_never_panics(configs in prop::collection::vec(arb_slot(), 0..5)) {
            let totals = aggregate_slots(configs.iter());
            prop_assert_eq!(totals.bee_count as usize, configs.len());
            if configs.is_empty() {
                prop_assert_eq!(totals.efficiency, 0);
                prop_assert_eq!(totals.total_attack, 0);
            }
        }
    }
}
