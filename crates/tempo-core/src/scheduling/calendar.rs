//! Calendar mapping: turns session gaps into concrete study dates.
//!
//! Each session lands on a distinct date that falls on one of the student's
//! weekdays and never before the start date. A session's target is the
//! previous session's date plus its gap. When the target is unusable, the
//! nearest free weekday on either side wins, with ties going to the earlier
//! date.

use std::collections::BTreeSet;

use jiff::civil::Date;
use log::debug;

use super::allocator::Session;
use crate::{error::Result, models::Weekdays};

/// Places sessions on dates one at a time, remembering used dates.
#[derive(Debug, Clone)]
pub struct CalendarMapper<'a> {
    weekdays: &'a Weekdays,
    start_date: Date,
    used: BTreeSet<Date>,
    current: Option<Date>,
}

impl<'a> CalendarMapper<'a> {
    pub fn new(start_date: Date, weekdays: &'a Weekdays) -> Self {
        Self {
            weekdays,
            start_date,
            used: BTreeSet::new(),
            current: None,
        }
    }

    /// Places the first session: the start date itself when it is a study
    /// weekday, otherwise the nearest study weekday after it.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Date` if the search leaves jiff's date range.
    pub fn place_first(&mut self) -> Result<Date> {
        let anchor = self.start_date.yesterday()?;
        let date = self.resolve(anchor, self.start_date)?;
        Ok(self.mark(date))
    }

    /// Places the next session `gap` days after the previous one.
    ///
    /// Falls back to [`Self::place_first`] when nothing has been placed yet.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Date` if the search leaves jiff's date range.
    pub fn place_after(&mut self, gap: u32) -> Result<Date> {
        let Some(current) = self.current else {
            return self.place_first();
        };

        let mut target = current;
        for _ in 0..gap {
            target = target.tomorrow()?;
        }
        // backward search stays strictly after the previous session
        let floor = current.tomorrow()?.max(self.start_date);
        let date = self.resolve(target, floor)?;
        Ok(self.mark(date))
    }

    fn mark(&mut self, date: Date) -> Date {
        self.used.insert(date);
        self.current = Some(date);
        date
    }

    fn is_free(&self, date: Date) -> bool {
        self.weekdays.contains(date) && !self.used.contains(&date)
    }

    fn resolve(&self, target: Date, floor: Date) -> Result<Date> {
        if target >= floor && self.is_free(target) {
            return Ok(target);
        }

        let (after, after_distance) = self.search_forward(target)?;
        let chosen = match self.search_backward(target, floor)? {
            Some((before, before_distance)) if before_distance <= after_distance => before,
            _ => after,
        };

        debug!("Target {target} unavailable, placed on {chosen}");
        Ok(chosen)
    }

    /// Nearest free date `<= target` and not before `floor`.
    fn search_backward(&self, target: Date, floor: Date) -> Result<Option<(Date, u32)>> {
        let mut date = target;
        let mut distance = 0;
        while date >= floor {
            if self.is_free(date) {
                return Ok(Some((date, distance)));
            }
            date = date.yesterday()?;
            distance += 1;
        }
        Ok(None)
    }

    /// Nearest free date `> target`.
    fn search_forward(&self, target: Date) -> Result<(Date, u32)> {
        let mut date = target.tomorrow()?;
        let mut distance = 1;
        while !self.is_free(date) {
            date = date.tomorrow()?;
            distance += 1;
        }
        Ok((date, distance))
    }
}

/// Maps each session to its study date.
///
/// The gap of session `i` decides the distance to session `i + 1`; the last
/// session's gap is ignored.
///
/// # Errors
///
/// Returns `PlannerError::Date` if placement leaves jiff's date range.
pub fn map_dates(sessions: &[Session], start_date: Date, weekdays: &Weekdays) -> Result<Vec<Date>> {
    let mut mapper = CalendarMapper::new(start_date, weekdays);
    let mut dates = Vec::with_capacity(sessions.len());

    for (index, _) in sessions.iter().enumerate() {
        let date = match index {
            0 => mapper.place_first()?,
            _ => mapper.place_after(sessions[index - 1].gap_to_next)?,
        };
        dates.push(date);
    }

    Ok(dates)
}

/// Counts study weekdays from `start_date` through `today`, both inclusive.
///
/// Returns 0 when `today` is before `start_date`.
///
/// # Errors
///
/// Returns `PlannerError::Date` if the walk leaves jiff's date range.
///
/// ```rust
/// use jiff::civil::date;
/// use tempo_core::{models::Weekdays, scheduling::elapsed_study_days};
///
/// let weekdays = Weekdays::new([1, 3, 5])?;
/// // Monday 2024-09-02 through Sunday 2024-09-08
/// assert_eq!(elapsed_study_days(&weekdays, date(2024, 9, 2), date(2024, 9, 8))?, 3);
/// assert_eq!(elapsed_study_days(&weekdays, date(2024, 9, 2), date(2024, 9, 1))?, 0);
/// # Ok::<(), tempo_core::PlannerError>(())
/// ```
pub fn elapsed_study_days(weekdays: &Weekdays, start_date: Date, today: Date) -> Result<u32> {
    let mut count = 0;
    let mut date = start_date;
    while date <= today {
        if weekdays.contains(date) {
            count += 1;
        }
        date = date.tomorrow()?;
    }
    Ok(count)
}
