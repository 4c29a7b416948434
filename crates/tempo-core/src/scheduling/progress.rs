//! Progress evaluation of a stored plan against live lesson/test status.

use jiff::civil::Date;

use super::calendar::elapsed_study_days;
use crate::{
    error::Result,
    models::{OutstandingUnit, PlanDay, PlanDetail, PlanEntry, ProgressSummary, StudyPlan},
    progress::ProgressSource,
};

/// Stars a completed unit needs to count as well done.
pub const WELL_DONE_STARS: u8 = 2;

/// Summarizes progress on `plan` for every item due on or before `today`.
///
/// # Errors
///
/// Propagates failures of the progress source and of date arithmetic.
pub fn evaluate<S>(plan: &StudyPlan, source: &S, today: Date) -> Result<ProgressSummary>
where
    S: ProgressSource + ?Sized,
{
    let student_id = plan.student_id;
    let mut summary = ProgressSummary {
        plan_id: plan.id,
        as_of: today,
        remaining_days: 0,
        stars_earned: 0,
        units_at_two_stars: 0,
        units_completed: 0,
        units_planned: 0,
        total_units: plan.items.len() as u32,
        sessions_due: 0,
        sessions_completed: 0,
        outstanding: Vec::new(),
    };

    let mut current_slot: Option<(u32, bool)> = None;
    for item in plan.items.iter().filter(|item| item.date <= today) {
        summary.units_planned += 1;

        let completed = source.is_completed(item.unit, student_id)?;
        if completed {
            let stars = source.stars(item.unit, student_id)?;
            summary.units_completed += 1;
            summary.stars_earned += u32::from(stars);
            if stars >= WELL_DONE_STARS {
                summary.units_at_two_stars += 1;
            }
        } else {
            let locked = source.is_locked(item.unit, student_id)?;
            summary.outstanding.push(OutstandingUnit::from_item(item, locked));
        }

        current_slot = match current_slot {
            Some((slot, all_done)) if slot == item.slot_index => Some((slot, all_done && completed)),
            previous => {
                summary.close_slot(previous);
                Some((item.slot_index, completed))
            }
        };
    }
    summary.close_slot(current_slot);

    let elapsed = elapsed_study_days(&plan.weekdays, plan.start_date, today)?;
    summary.remaining_days = i64::from(plan.requested_days) - i64::from(elapsed);

    Ok(summary)
}

impl ProgressSummary {
    fn close_slot(&mut self, slot: Option<(u32, bool)>) {
        if let Some((_, all_done)) = slot {
            self.sessions_due += 1;
            if all_done {
                self.sessions_completed += 1;
            }
        }
    }
}

/// Regroups `plan` by date, annotating every item with live status.
///
/// # Errors
///
/// Propagates failures of the progress source.
pub fn detail<S>(mut plan: StudyPlan, source: &S) -> Result<PlanDetail>
where
    S: ProgressSource + ?Sized,
{
    let student_id = plan.student_id;
    let mut days: Vec<PlanDay> = Vec::new();

    for item in std::mem::take(&mut plan.items) {
        let completed = source.is_completed(item.unit, student_id)?;
        let stars = if completed {
            source.stars(item.unit, student_id)?
        } else {
            0
        };
        let locked = source.is_locked(item.unit, student_id)?;
        let entry = PlanEntry {
            item,
            completed,
            stars,
            locked,
        };

        match days.last_mut() {
            Some(day) if day.slot_index == entry.item.slot_index => day.entries.push(entry),
            _ => days.push(PlanDay {
                date: entry.item.date,
                slot_index: entry.item.slot_index,
                entries: vec![entry],
            }),
        }
    }

    Ok(PlanDetail { plan, days })
}
