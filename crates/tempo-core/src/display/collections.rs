//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::StudyDuration;
use crate::models::{LearningItem, PlanSummary};

/// Newtype wrapper for displaying a student's plan history.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use tempo_core::{
///     display::PlanSummaries,
///     models::{PlanStatus, PlanSummary, Weekdays},
/// };
///
/// let summary = PlanSummary {
///     id: 4,
///     student_id: 7,
///     track_id: 1,
///     status: PlanStatus::Superseded,
///     start_date: date(2024, 9, 2),
///     weekdays: Weekdays::new([1, 3, 5])?,
///     requested_days: 12,
///     generated_at: Timestamp::UNIX_EPOCH,
///     total_units: 18,
///     last_date: Some(date(2024, 9, 27)),
/// };
///
/// let output = PlanSummaries(vec![summary]).to_string();
/// assert!(output.contains("## Plan 4 (superseded, 18 units)"));
/// assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
/// # Ok::<(), tempo_core::PlannerError>(())
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a collected curriculum with its total
/// study time.
pub struct LearningItems(pub Vec<LearningItem>);

impl LearningItems {
    /// Sum of all item durations, in seconds, saturating at `u64::MAX`.
    pub fn total_seconds(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.duration_seconds))
    }
}

impl fmt::Display for LearningItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No lessons or tests found.");
        }
        for item in &self.0 {
            write!(f, "{item}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{} items, {} of study in total",
            self.0.len(),
            StudyDuration(self.total_seconds())
        )
    }
}
