//! Status and kind enumerations for plans and learning items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a study plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// The student's current plan
    #[default]
    Active,

    /// Replaced by a newer plan and kept for history
    Superseded,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "superseded" => Ok(PlanStatus::Superseded),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Superseded => "superseded",
        }
    }
}

/// Kind of a learning item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lesson,
    Test,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lesson" => Ok(ItemKind::Lesson),
            "test" => Ok(ItemKind::Test),
            _ => Err(format!("Invalid item kind: {s}")),
        }
    }
}

impl ItemKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lesson => "lesson",
            ItemKind::Test => "test",
        }
    }

    /// Get the kind with a consistent icon for display.
    ///
    /// ```rust
    /// use tempo_core::models::ItemKind;
    ///
    /// assert_eq!(ItemKind::Lesson.with_icon(), "▶ Lesson");
    /// assert_eq!(ItemKind::Test.with_icon(), "✎ Test");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ItemKind::Lesson => "▶ Lesson",
            ItemKind::Test => "✎ Test",
        }
    }
}
