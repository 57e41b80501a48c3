//! Canonical region categories and the alias table applied at the load boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataIntegrityError;
use crate::record::RecordId;

/// A named structural layer of a floor plan.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Living,
    Bedroom,
    Bathroom,
    Kitchen,
    Door,
    Window,
    Wall,
    FrontDoor,
    Balcony,
    Inner,
    Land,
}

/// Known misspellings and the canonical category they stand for.
const ALIASES: &[(&str, Category)] = &[("balacony", Category::Balcony)];

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Living,
        Category::Bedroom,
        Category::Bathroom,
        Category::Kitchen,
        Category::Door,
        Category::Window,
        Category::Wall,
        Category::FrontDoor,
        Category::Balcony,
        Category::Inner,
        Category::Land,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Living => "living",
            Category::Bedroom => "bedroom",
            Category::Bathroom => "bathroom",
            Category::Kitchen => "kitchen",
            Category::Door => "door",
            Category::Window => "window",
            Category::Wall => "wall",
            Category::FrontDoor => "front_door",
            Category::Balcony => "balcony",
            Category::Inner => "inner",
            Category::Land => "land",
        }
    }

    /// Resolve a raw key, accepting both canonical spellings and aliases.
    pub fn resolve(key: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, c)| *c)
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::resolve(s).ok_or_else(|| format!("unknown category `{s}`"))
    }
}

/// Map raw keys to canonical categories.
///
/// Keys that name no category are returned separately so the caller can decide how
/// loudly to ignore them. Two raw keys resolving to the same category is a
/// `DataIntegrityError::ConflictingKeys`.
pub fn normalize_keys<V>(
    record: RecordId,
    raw: impl IntoIterator<Item = (String, V)>,
) -> Result<(BTreeMap<Category, V>, Vec<String>), DataIntegrityError> {
    let mut out: BTreeMap<Category, (String, V)> = BTreeMap::new();
    let mut unknown = Vec::new();
    for (key, value) in raw {
        let Some(category) = Category::resolve(&key) else {
            unknown.push(key);
            continue;
        };
        if let Some((prev, _)) = out.get(&category) {
            return Err(DataIntegrityError::ConflictingKeys {
                record,
                category,
                keys: vec![prev.clone(), key],
            });
        }
        out.insert(category, (key, value));
    }
    let normalized = out.into_iter().map(|(c, (_, v))| (c, v)).collect();
    Ok((normalized, unknown))
}
