//! Ideal-placement table: which categories are classified, where each one belongs,
//! and how much it weighs in the compliance score.
//!
//! The monitored set and the rules live in one value so classification and scoring
//! always agree. Construction rejects rules for categories that are not monitored.

use serde::{Deserialize, Serialize};

use super::compass::CompassZone;
use crate::category::Category;
use crate::error::PlacementError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub category: Category,
    pub ideal: Vec<CompassZone>,
    pub weight: f64,
}

/// Versioned placement configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlacementTable")]
pub struct PlacementTable {
    version: u32,
    monitored: Vec<Category>,
    rules: Vec<PlacementRule>,
}

#[derive(Deserialize)]
struct RawPlacementTable {
    version: u32,
    monitored: Vec<Category>,
    rules: Vec<PlacementRule>,
}

impl TryFrom<RawPlacementTable> for PlacementTable {
    type Error = PlacementError;

    fn try_from(raw: RawPlacementTable) -> Result<Self, Self::Error> {
        PlacementTable::new(raw.version, raw.monitored, raw.rules)
    }
}

impl PlacementTable {
    pub fn new(
        version: u32,
        monitored: Vec<Category>,
        rules: Vec<PlacementRule>,
    ) -> Result<Self, PlacementError> {
        for (i, c) in monitored.iter().enumerate() {
            if monitored[..i].contains(c) {
                return Err(PlacementError::DuplicateMonitored(*c));
            }
        }
        for (i, rule) in rules.iter().enumerate() {
            if !(rule.weight.is_finite() && rule.weight > 0.0) {
                return Err(PlacementError::InvalidWeight {
                    category: rule.category,
                    weight: rule.weight,
                });
            }
            if !monitored.contains(&rule.category) {
                return Err(PlacementError::Unmonitored(rule.category));
            }
            if rules[..i].iter().any(|r| r.category == rule.category) {
                return Err(PlacementError::DuplicateRule(rule.category));
            }
        }
        Ok(Self {
            version,
            monitored,
            rules,
        })
    }

    /// Version 1: the traditional placement rules.
    ///
    /// `front_door` is classified but carries no rule, so it never affects the score.
    pub fn classic() -> Self {
        use CompassZone::*;
        let rule = |category, ideal: &[CompassZone], weight| PlacementRule {
            category,
            ideal: ideal.to_vec(),
            weight,
        };
        Self {
            version: 1,
            monitored: vec![
                Category::Kitchen,
                Category::Bedroom,
                Category::Living,
                Category::Bathroom,
                Category::FrontDoor,
                Category::Balcony,
            ],
            rules: vec![
                rule(Category::Kitchen, &[SouthEast], 1.5),
                rule(Category::Bedroom, &[SouthWest, West, South], 1.3),
                rule(Category::Living, &[North, NorthEast, East], 1.2),
                rule(Category::Bathroom, &[NorthWest, West], 1.0),
                rule(Category::Balcony, &[North, East, NorthEast], 0.8),
            ],
        }
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Categories to classify, in report order.
    #[inline]
    pub fn monitored(&self) -> &[Category] {
        &self.monitored
    }

    pub fn rule(&self, category: Category) -> Option<&PlacementRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    #[inline]
    pub fn rules(&self) -> &[PlacementRule] {
        &self.rules
    }
}

impl Default for PlacementTable {
    fn default() -> Self {
        Self::classic()
    }
}
