//! Level definitions: named, ordered groupings of controls.

use serde::{Deserialize, Serialize};

/// A named grouping of controls, e.g. a defense layer or deployment tier.
/// Control identifiers are raw strings in source order; normalization happens
/// when the level is reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub controls: Vec<String>,
}

impl Level {
    pub fn new(name: impl Into<String>, controls: Vec<String>) -> Self {
        Self {
            name: name.into(),
            controls,
        }
    }
}

/// Ordered collection of levels. Order is significant: reports render levels
/// in the order the source listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelMap {
    pub levels: Vec<Level>,
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level) {
        self.levels.push(level);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }

    /// Level names in definition order.
    pub fn names(&self) -> Vec<&str> {
        self.levels.iter().map(|level| level.name.as_str()).collect()
    }

    /// Total number of control entries across all levels, duplicates
    /// included.
    pub fn total_controls(&self) -> usize {
        self.levels.iter().map(|level| level.controls.len()).sum()
    }
}

impl<'a> IntoIterator for &'a LevelMap {
    type Item = &'a Level;
    type IntoIter = std::slice::Iter<'a, Level>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
