//! The study plan generation pipeline.
//!
//! Generation runs four pure steps in memory:
//!
//! 1. [`collect_items`] flattens enrolled courses into learning items.
//! 2. [`allocate`] spaces or packs the items into sessions.
//! 3. [`balance`] evens out packed sessions (packing mode only).
//! 4. [`map_dates`] places every session on a study weekday.
//!
//! [`build_plan`] chains them and produces an unsaved [`StudyPlan`].
//! Progress reporting over a stored plan lives in [`evaluate`] and
//! [`detail`].

pub mod allocator;
pub mod balancer;
pub mod calendar;
pub mod collector;
pub mod progress;

#[cfg(test)]
mod tests;

use jiff::{civil::Date, Timestamp};
use log::debug;

pub use allocator::{allocate, spacing_gaps, Allocation, AllocationMode, Session};
pub use balancer::{balance, propose_move, spread, Balanced};
pub use calendar::{elapsed_study_days, map_dates, CalendarMapper};
pub use collector::{collect_items, LESSON_PAD_SECONDS, TEST_DURATION_SECONDS};
pub use progress::{detail, evaluate, WELL_DONE_STARS};

use crate::{
    error::Result,
    models::{Course, PlanStatus, StudyPlan, StudyPlanItem, Weekdays},
};

/// Validated generation inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub student_id: u64,
    pub track_id: u64,
    pub start_date: Date,
    pub weekdays: Weekdays,
    pub requested_days: u32,
    pub generated_at: Timestamp,
}

/// Builds an unsaved plan (id 0, status active) for `courses`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` when the courses hold nothing to
/// schedule or no study day was requested, and `PlannerError::Date` when
/// calendar placement leaves the supported date range.
pub fn build_plan(courses: &[Course], request: &PlanRequest) -> Result<StudyPlan> {
    let items = collect_items(courses)?;
    let Allocation { mode, sessions } = allocate(&items, request.requested_days)?;

    let sessions = match mode {
        AllocationMode::Spacing => sessions,
        AllocationMode::Packing => balance(sessions, &items).sessions,
    };
    let dates = map_dates(&sessions, request.start_date, &request.weekdays)?;

    let mut plan_items = Vec::with_capacity(items.len());
    for (slot_index, (session, date)) in sessions.iter().zip(&dates).enumerate() {
        for (position, &index) in session.items.iter().enumerate() {
            let item = &items[index];
            plan_items.push(StudyPlanItem {
                date: *date,
                slot_index: slot_index as u32,
                position: position as u32,
                unit: item.unit(),
                title: item.title.clone(),
                duration_seconds: item.duration_seconds,
            });
        }
    }

    debug!(
        "Built plan for student {} on track {}: {} items over {} slots",
        request.student_id,
        request.track_id,
        plan_items.len(),
        sessions.len()
    );

    Ok(StudyPlan {
        id: 0,
        student_id: request.student_id,
        track_id: request.track_id,
        start_date: request.start_date,
        weekdays: request.weekdays.clone(),
        requested_days: request.requested_days,
        generated_at: request.generated_at,
        status: PlanStatus::Active,
        items: plan_items,
    })
}
