//! Plan summary and progress report types.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PlanStatus, StudyPlan, StudyPlanItem, UnitRef, Weekdays};

/// Summary information about a plan for history listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: u64,
    pub student_id: u64,
    pub track_id: u64,
    pub status: PlanStatus,
    pub start_date: Date,
    pub weekdays: Weekdays,
    pub requested_days: u32,
    pub generated_at: Timestamp,
    /// Number of scheduled lessons and tests
    pub total_units: u32,
    /// Date of the last scheduled item
    pub last_date: Option<Date>,
}

impl From<&StudyPlan> for PlanSummary {
    fn from(plan: &StudyPlan) -> Self {
        Self {
            id: plan.id,
            student_id: plan.student_id,
            track_id: plan.track_id,
            status: plan.status,
            start_date: plan.start_date,
            weekdays: plan.weekdays.clone(),
            requested_days: plan.requested_days,
            generated_at: plan.generated_at,
            total_units: plan.items.len() as u32,
            last_date: plan.last_date(),
        }
    }
}

/// A due item the student has not completed yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutstandingUnit {
    pub date: Date,
    pub slot_index: u32,
    pub unit: UnitRef,
    pub title: String,
    /// Whether the item is still locked for the student
    pub locked: bool,
}

impl OutstandingUnit {
    pub(crate) fn from_item(item: &StudyPlanItem, locked: bool) -> Self {
        Self {
            date: item.date,
            slot_index: item.slot_index,
            unit: item.unit,
            title: item.title.clone(),
            locked,
        }
    }
}

/// Progress of a student against a plan as of a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub plan_id: u64,
    /// Day the report was computed for
    pub as_of: Date,
    /// Requested days minus elapsed study days; negative once overrun
    pub remaining_days: i64,
    pub stars_earned: u32,
    /// Completed units with at least two stars
    pub units_at_two_stars: u32,
    pub units_completed: u32,
    /// Units due on or before `as_of`
    pub units_planned: u32,
    pub total_units: u32,
    /// Slots due on or before `as_of`
    pub sessions_due: u32,
    /// Due slots whose items are all completed
    pub sessions_completed: u32,
    pub outstanding: Vec<OutstandingUnit>,
}

/// A plan regrouped by date with live completion status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDetail {
    /// Plan metadata; its items are moved into `days`
    pub plan: StudyPlan,
    pub days: Vec<PlanDay>,
}

/// All items scheduled on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanDay {
    pub date: Date,
    pub slot_index: u32,
    pub entries: Vec<PlanEntry>,
}

/// A scheduled item annotated with the student's live status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub item: StudyPlanItem,
    pub completed: bool,
    pub stars: u8,
    pub locked: bool,
}
