//! Display implementations for domain models.
//!
//! These render markdown for the terminal renderer. Plans are grouped into
//! one section per study day, in slot order.

use std::fmt;

use super::datetime::{LocalDateTime, StudyDuration};
use crate::models::{
    ImportReport, ItemKind, LearningItem, PlanDetail, PlanEntry, PlanStatus, PlanSummary,
    ProgressSummary, StudyPlan, StudyPlanItem, Weekdays,
};

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday set as short names, e.g. `Mon, Wed, Fri`.
struct WeekdayNames<'a>(&'a Weekdays);

impl fmt::Display for WeekdayNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .0
            .as_slice()
            .iter()
            .filter_map(|&day| WEEKDAY_NAMES.get(usize::from(day).wrapping_sub(1)).copied())
            .collect();
        write!(f, "{}", names.join(", "))
    }
}

fn day_heading(f: &mut fmt::Formatter<'_>, item: &StudyPlanItem) -> fmt::Result {
    writeln!(
        f,
        "## {} ({}), session {}",
        item.date,
        item.date.strftime("%a"),
        item.slot_index + 1
    )?;
    writeln!(f)
}

fn item_line(item: &StudyPlanItem) -> String {
    format!(
        "{} {}: {} ({})",
        item.unit.kind.with_icon(),
        item.unit.id,
        item.title,
        StudyDuration(item.duration_seconds)
    )
}

fn plan_header(f: &mut fmt::Formatter<'_>, plan: &StudyPlan) -> fmt::Result {
    if plan.id == 0 {
        writeln!(f, "# Study plan preview")?;
    } else {
        writeln!(f, "# Study plan {}", plan.id)?;
    }
    writeln!(f)?;

    writeln!(f, "- Student: {}", plan.student_id)?;
    writeln!(f, "- Track: {}", plan.track_id)?;
    writeln!(f, "- Status: {}", plan.status)?;
    writeln!(f, "- Starts: {}", plan.start_date)?;
    writeln!(f, "- Weekdays: {}", WeekdayNames(&plan.weekdays))?;
    writeln!(f, "- Requested days: {}", plan.requested_days)?;
    writeln!(f, "- Generated: {}", LocalDateTime(&plan.generated_at))
}

impl fmt::Display for StudyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        plan_header(f, self)?;

        if self.items.is_empty() {
            return writeln!(f, "\nNo items in this plan.");
        }

        let mut current_slot = None;
        for item in &self.items {
            if current_slot != Some(item.slot_index) {
                current_slot = Some(item.slot_index);
                writeln!(f)?;
                day_heading(f, item)?;
            }
            writeln!(f, "- {}", item_line(item))?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Plan {} ({}, {} units)",
            self.id, self.status, self.total_units
        )?;
        writeln!(f)?;
        writeln!(f, "- **Track**: {}", self.track_id)?;
        match self.last_date {
            Some(last) => writeln!(f, "- **Dates**: {} to {last}", self.start_date)?,
            None => writeln!(f, "- **Starts**: {}", self.start_date)?,
        }
        writeln!(
            f,
            "- **Schedule**: {} days on {}",
            self.requested_days,
            WeekdayNames(&self.weekdays)
        )?;
        writeln!(f, "- **Generated**: {}", LocalDateTime(&self.generated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for LearningItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} {}: {} ({})",
            self.kind.with_icon(),
            self.id,
            self.title,
            StudyDuration(self.duration_seconds)
        )
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Progress on plan {} as of {}", self.plan_id, self.as_of)?;
        writeln!(f)?;

        if self.remaining_days < 0 {
            writeln!(
                f,
                "- Remaining study days: {} (window exceeded)",
                self.remaining_days
            )?;
        } else {
            writeln!(f, "- Remaining study days: {}", self.remaining_days)?;
        }
        writeln!(
            f,
            "- Units completed: {} of {} due ({} in plan)",
            self.units_completed, self.units_planned, self.total_units
        )?;
        writeln!(
            f,
            "- Sessions completed: {} of {} due",
            self.sessions_completed, self.sessions_due
        )?;
        writeln!(f, "- Stars earned: {}", self.stars_earned)?;
        writeln!(f, "- Units with 2+ stars: {}", self.units_at_two_stars)?;

        if self.outstanding.is_empty() {
            return writeln!(f, "\nNothing outstanding.");
        }

        writeln!(f, "\n## Outstanding")?;
        writeln!(f)?;
        for unit in &self.outstanding {
            let lock = if unit.locked { " (locked)" } else { "" };
            writeln!(
                f,
                "- {} {} {}: {}{lock}",
                unit.date,
                unit.unit.kind.with_icon(),
                unit.unit.id,
                unit.title
            )?;
        }
        Ok(())
    }
}

fn stars(count: u8) -> String {
    (0..3).map(|i| if i < count { '★' } else { '☆' }).collect()
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "[x]" } else { "[ ]" };
        write!(f, "- {check} {}", item_line(&self.item))?;
        if self.completed {
            write!(f, " {}", stars(self.stars))?;
        }
        if self.locked {
            write!(f, " (locked)")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        plan_header(f, &self.plan)?;

        if self.days.is_empty() {
            return writeln!(f, "\nNo items in this plan.");
        }
        for day in &self.days {
            writeln!(f)?;
            if let Some(first) = day.entries.first() {
                day_heading(f, &first.item)?;
            }
            for entry in &day.entries {
                write!(f, "{entry}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Tracks: {}", self.tracks)?;
        writeln!(f, "- Courses: {}", self.courses)?;
        writeln!(f, "- Modules: {}", self.modules)?;
        writeln!(f, "- Lessons: {}", self.lessons)?;
        writeln!(f, "- Tests: {}", self.tests)?;
        writeln!(f, "- Students: {}", self.students)
    }
}
