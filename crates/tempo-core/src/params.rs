//! Parameter structures for planner operations.
//!
//! These are interface-agnostic: they carry no clap derives and only serde
//! for transport. Interface layers wrap them in their own argument types and
//! convert with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │
//! │  (clap derives) │    │ (serde derives) │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! Raw user input (weekday numbers, day counts) is validated here, before
//! any scheduling math runs.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{UnitRef, Weekdays},
    progress::UnitProgress,
    scheduling::PlanRequest,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for operations scoped to one student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentId {
    pub student_id: u64,
}

/// A student and one of their learning tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentTrack {
    pub student_id: u64,
    pub track_id: u64,
}

/// Parameters for generating or previewing a study plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlan {
    pub student_id: u64,
    pub track_id: u64,
    /// No session is scheduled before this date
    pub start_date: Date,
    /// ISO weekday numbers (1 = Monday ... 7 = Sunday)
    pub weekdays: Vec<u8>,
    /// Number of study days to spread the curriculum over
    pub requested_days: i64,
    /// Generation timestamp; defaults to now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<Timestamp>,
}

impl GeneratePlan {
    /// Validates the raw inputs into a scheduling request.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the weekday set is empty or
    ///   holds a number outside `1..=7`
    /// * `PlannerError::InvalidInput` - When `requested_days` is not positive
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use tempo_core::params::GeneratePlan;
    ///
    /// let params = GeneratePlan {
    ///     student_id: 7,
    ///     track_id: 3,
    ///     start_date: date(2024, 9, 2),
    ///     weekdays: vec![5, 1, 3],
    ///     requested_days: 10,
    ///     generated_at: None,
    /// };
    /// let request = params.validate()?;
    /// assert_eq!(request.weekdays.as_slice(), &[1, 3, 5]);
    ///
    /// let params = GeneratePlan { requested_days: 0, ..params };
    /// assert!(params.validate().is_err());
    /// # Ok::<(), tempo_core::PlannerError>(())
    /// ```
    pub fn validate(&self) -> Result<PlanRequest> {
        let weekdays = Weekdays::new(self.weekdays.iter().copied())?;

        if self.requested_days <= 0 {
            return Err(PlannerError::invalid_input("requested_days").with_reason(format!(
                "Requested days must be positive, got {}",
                self.requested_days
            )));
        }
        let requested_days = u32::try_from(self.requested_days).map_err(|_| {
            PlannerError::invalid_input("requested_days")
                .with_reason(format!("{} study days is too many", self.requested_days))
        })?;

        Ok(PlanRequest {
            student_id: self.student_id,
            track_id: self.track_id,
            start_date: self.start_date,
            weekdays,
            requested_days,
            generated_at: self.generated_at.unwrap_or_else(Timestamp::now),
        })
    }
}

/// Parameters for a progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub plan_id: u64,
    /// Day to evaluate as; defaults to today in the system time zone
    #[serde(default)]
    pub as_of: Option<Date>,
}

/// Parameters for listing a student's plan history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    pub student_id: u64,
    /// Only list the active plan
    #[serde(default)]
    pub active_only: bool,
}

/// Parameters for recording a student's progress on a lesson or test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordProgress {
    pub student_id: u64,
    pub unit: UnitRef,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub stars: u8,
}

impl RecordProgress {
    /// Validates the star rating and returns the progress to store.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when `stars` exceeds 3.
    pub fn validate(&self) -> Result<UnitProgress> {
        let progress = UnitProgress {
            completed: self.completed,
            locked: self.locked,
            stars: self.stars,
        };
        progress.validate()?;
        Ok(progress)
    }
}
