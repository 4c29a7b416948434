//! Validated set of ISO weekdays a student wants to study on.

use std::{fmt, str::FromStr};

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Ascending, de-duplicated, non-empty set of ISO weekday numbers
/// (1 = Monday ... 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Weekdays(Vec<u8>);

impl Weekdays {
    /// Builds a weekday set, sorting and de-duplicating the input.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when the set is empty or contains
    /// a number outside `1..=7`.
    ///
    /// ```rust
    /// use tempo_core::models::Weekdays;
    ///
    /// let days = Weekdays::new([5, 1, 3, 1])?;
    /// assert_eq!(days.as_slice(), &[1, 3, 5]);
    /// assert!(Weekdays::new([]).is_err());
    /// assert!(Weekdays::new([0]).is_err());
    /// # Ok::<(), tempo_core::PlannerError>(())
    /// ```
    pub fn new(days: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut days: Vec<u8> = days.into_iter().collect();
        if let Some(bad) = days.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(PlannerError::invalid_input("weekdays")
                .with_reason(format!("{bad} is not an ISO weekday (1 = Monday ... 7 = Sunday)")));
        }
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            return Err(PlannerError::invalid_input("weekdays")
                .with_reason("At least one study weekday is required"));
        }
        Ok(Self(days))
    }

    /// Whether `date` falls on one of the study weekdays.
    pub fn contains(&self, date: Date) -> bool {
        self.contains_weekday(date.weekday())
    }

    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        // to_monday_one_offset is always in 1..=7
        self.0.contains(&(weekday.to_monday_one_offset() as u8))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Weekdays {
    type Error = PlannerError;

    fn try_from(days: Vec<u8>) -> Result<Self> {
        Self::new(days)
    }
}

impl From<Weekdays> for Vec<u8> {
    fn from(days: Weekdays) -> Self {
        days.0
    }
}

/// Parses the comma-separated storage form, e.g. `"1,3,5"`.
impl FromStr for Weekdays {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let days = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>().map_err(|_| {
                    PlannerError::invalid_input("weekdays")
                        .with_reason(format!("'{part}' is not a weekday number"))
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::new(days)
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u8::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}
