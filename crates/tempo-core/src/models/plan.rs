//! Study plan model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PlanStatus, UnitRef, Weekdays};

/// A generated calendar of study sessions for one student and track.
///
/// Plans are created whole and are read-only afterwards except for
/// `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyPlan {
    /// Unique identifier of the plan (0 for previews that were never stored)
    pub id: u64,

    pub student_id: u64,

    pub track_id: u64,

    /// No session is scheduled before this date
    pub start_date: Date,

    /// ISO weekdays the student studies on
    pub weekdays: Weekdays,

    /// Number of study days the curriculum is spread over
    pub requested_days: u32,

    /// Timestamp when the plan was generated (UTC)
    pub generated_at: Timestamp,

    #[serde(default)]
    pub status: PlanStatus,

    /// Scheduled items ordered by slot, then position within the slot
    #[serde(default)]
    pub items: Vec<StudyPlanItem>,
}

impl StudyPlan {
    /// Number of distinct slots that carry at least one item.
    pub fn occupied_slots(&self) -> usize {
        let mut slots: Vec<u32> = self.items.iter().map(|item| item.slot_index).collect();
        slots.dedup();
        slots.len()
    }

    /// Date of the first scheduled item.
    pub fn first_date(&self) -> Option<Date> {
        self.items.first().map(|item| item.date)
    }

    /// Date of the last scheduled item.
    pub fn last_date(&self) -> Option<Date> {
        self.items.last().map(|item| item.date)
    }
}

/// One lesson or test placed on a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyPlanItem {
    pub date: Date,

    /// Ordinal of the session the item belongs to
    pub slot_index: u32,

    /// Position of the item inside its session (0-indexed)
    pub position: u32,

    /// The lesson or test to study
    pub unit: UnitRef,

    /// Title copied at generation time
    pub title: String,

    /// Estimated duration copied at generation time, in seconds
    pub duration_seconds: u64,
}
