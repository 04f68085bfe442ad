//! Catalog loading and browsing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use hiveplan_types::bee::{Bee, BeeColor, Rarity};
use hiveplan_types::beequip::{Beequip, BeequipType};
use hiveplan_types::error::CatalogError;

use crate::repository::catalog::CatalogProvider;

/// Ordering for bee listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BeeSort {
    /// Ascending, case-insensitive.
    #[default]
    Name,
    /// Rarest first.
    Rarity,
    /// Highest base attack first.
    Attack,
    /// Highest base gather amount first.
    Gather,
}

impl fmt::Display for BeeSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeeSort::Name => write!(f, "name"),
            BeeSort::Rarity => write!(f, "rarity"),
            BeeSort::Attack => write!(f, "attack"),
            BeeSort::Gather => write!(f, "gather"),
        }
    }
}

impl FromStr for BeeSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(BeeSort::Name),
            "rarity" => Ok(BeeSort::Rarity),
            "attack" => Ok(BeeSort::Attack),
            "gather" => Ok(BeeSort::Gather),
            _ => Err(format!("invalid bee sort: '{s}'")),
        }
    }
}

/// Search, filter and sort options for the bee list.
#[derive(Debug, Clone, Default)]
pub struct BeeQuery {
    /// Case-insensitive substring of the bee name.
    pub search: Option<String>,
    pub rarity: Option<Rarity>,
    pub color: Option<BeeColor>,
    pub sort: BeeSort,
}

impl BeeQuery {
    pub fn matches(&self, bee: &Bee) -> bool {
        if let Some(needle) = normalized(self.search.as_deref()) {
            if !bee.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.rarity.is_some_and(|r| r != bee.rarity) {
            return false;
        }
        if self.color.is_some() && self.color != bee.color {
            return false;
        }
        true
    }

    /// Matching bees in the requested order. Ties keep catalog order.
    pub fn apply<'a>(&self, bees: &'a [Bee]) -> Vec<&'a Bee> {
        let mut hits: Vec<&Bee> = bees.iter().filter(|b| self.matches(b)).collect();
        hits.sort_by(|a, b| self.compare(a, b));
        hits
    }

    fn compare(&self, a: &Bee, b: &Bee) -> Ordering {
        match self.sort {
            BeeSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            BeeSort::Rarity => b.rarity.tier().cmp(&a.rarity.tier()),
            BeeSort::Attack => b.attack().total_cmp(&a.attack()),
            BeeSort::Gather => b.gather_amount().total_cmp(&a.gather_amount()),
        }
    }
}

/// Search and slot-type filter for the beequip list.
#[derive(Debug, Clone, Default)]
pub struct BeequipQuery {
    pub search: Option<String>,
    pub kind: Option<BeequipType>,
}

impl BeequipQuery {
    pub fn matches(&self, beequip: &Beequip) -> bool {
        if let Some(needle) = normalized(self.search.as_deref()) {
            if !beequip.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        self.kind.is_none_or(|kind| kind == beequip.kind)
    }

    pub fn apply<'a>(&self, beequips: &'a [Beequip]) -> Vec<&'a Beequip> {
        beequips.iter().filter(|b| self.matches(b)).collect()
    }
}

fn normalized(search: Option<&str>) -> Option<String> {
    search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Both catalog lists, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub bees: Vec<Bee>,
    pub beequips: Vec<Beequip>,
}

impl Catalog {
    pub async fn load<P: CatalogProvider>(provider: &P) -> Result<Self, CatalogError> {
        let bees = provider.list_bees().await?;
        let beequips = provider.list_beequips().await?;
        tracing::debug!(bees = bees.len(), beequips = beequips.len(), "catalog loaded");
        Ok(Self { bees, beequips })
    }

    /// Look a bee up by id, then by case-insensitive name.
    pub fn find_bee(&self, key: &str) -> Option<&Bee> {
        let key = key.trim();
        self.bees
            .iter()
            .find(|b| b.id.as_str() == key)
            .or_else(|| self.bees.iter().find(|b| b.name.eq_ignore_ascii_case(key)))
    }

    /// Look a beequip up by id, then by case-insensitive name.
    pub fn find_beequip(&self, key: &str) -> Option<&Beequip> {
        let key = key.trim();
        self.beequips
            .iter()
            .find(|b| b.id.as_str() == key)
            .or_else(|| {
                self.beequips
                    .iter()
                    .find(|b| b.name.eq_ignore_ascii_case(key))
            })
    }
}
