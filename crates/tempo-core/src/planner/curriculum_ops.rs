//! Curriculum and progress operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    error::Result,
    models::{Catalog, ImportReport, LearningItem},
    params::{RecordProgress, StudentTrack},
    scheduling::collect_items,
};

impl Planner {
    /// Imports tracks, their curriculum and students from a catalog.
    ///
    /// The whole catalog is applied in one transaction.
    pub async fn import_curriculum(&self, catalog: &Catalog) -> Result<ImportReport> {
        let catalog = catalog.clone();

        let report = self
            .with_database(move |db| db.import_catalog(&catalog))
            .await?;

        info!(
            "Imported {} tracks, {} courses and {} students",
            report.tracks, report.courses, report.students
        );
        Ok(report)
    }

    /// Returns the learning items a plan for this student and track would
    /// schedule, in curriculum order.
    ///
    /// # Errors
    ///
    /// * `PlannerError::NotFound` - Unknown track or student
    /// * `PlannerError::InvalidInput` - The enrolled courses hold no lessons
    ///   or tests
    pub async fn curriculum(&self, params: &StudentTrack) -> Result<Vec<LearningItem>> {
        let student_id = params.student_id;
        let track_id = params.track_id;

        self.with_database(move |db| collect_items(&db.courses_for(student_id, track_id)?))
            .await
    }

    /// Records a student's progress on one lesson or test.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - Star rating above 3
    /// * `PlannerError::NotFound` - Unknown student, lesson or test
    pub async fn record_progress(&self, params: &RecordProgress) -> Result<()> {
        let progress = params.validate()?;
        let student_id = params.student_id;
        let unit = params.unit;

        self.with_database(move |db| db.record_progress(student_id, unit, progress))
            .await
    }
}
