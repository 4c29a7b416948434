//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{ImportReport, StudyPlan};

/// Wrapper type for displaying the result of create operations.
///
/// ```rust
/// use tempo_core::{display::CreateResult, models::ImportReport};
///
/// let report = ImportReport { tracks: 1, courses: 2, ..Default::default() };
/// let output = CreateResult::new(report).to_string();
/// assert!(output.starts_with("Imported curriculum"));
/// assert!(output.contains("- Courses: 2"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<StudyPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated study plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ImportReport> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Imported curriculum")?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a plan that was computed but not stored.
pub struct PreviewResult(pub StudyPlan);

impl fmt::Display for PreviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Preview only: {} items over {} study days, nothing was saved",
            self.0.items.len(),
            self.0.occupied_slots()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}
