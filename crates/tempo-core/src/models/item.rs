//! Flattened learning items produced by curriculum collection.

use serde::{Deserialize, Serialize};

use super::ItemKind;

/// Position of an item in the curriculum: course order, module order, and
/// order within the module. Orders lexicographically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal {
    pub course: u32,
    pub module: u32,
    pub position: u32,
}

/// Reference to one lesson or one test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UnitRef {
    pub kind: ItemKind,
    pub id: u64,
}

impl UnitRef {
    pub fn lesson(id: u64) -> Self {
        Self {
            kind: ItemKind::Lesson,
            id,
        }
    }

    pub fn test(id: u64) -> Self {
        Self {
            kind: ItemKind::Test,
            id,
        }
    }
}

/// A lesson or test with its estimated study duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningItem {
    /// Lesson or test ID
    pub id: u64,
    pub kind: ItemKind,
    pub title: String,
    /// Estimated time to study the item, in seconds
    pub duration_seconds: u64,
    pub ordinal: Ordinal,
}

impl LearningItem {
    /// The lesson/test reference this item stands for.
    pub fn unit(&self) -> UnitRef {
        UnitRef {
            kind: self.kind,
            id: self.id,
        }
    }
}
