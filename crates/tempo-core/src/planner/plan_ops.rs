//! Plan operations for the Planner.

use jiff::Zoned;
use log::info;

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    models::{PlanDetail, ProgressSummary, StudyPlan},
    params::{GeneratePlan, Id, ListPlans, ProgressQuery, StudentId},
    scheduling::{self, build_plan},
};

impl Planner {
    /// Generates and stores a study plan, superseding the student's active
    /// plan.
    ///
    /// Inputs are validated before anything is read. The supersede and the
    /// insert of the new plan with all its items commit together.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - Empty weekday set, non-positive day
    ///   count, or a curriculum with nothing to schedule
    /// * `PlannerError::NotFound` - Unknown track or student
    pub async fn generate_plan(&self, params: &GeneratePlan) -> Result<StudyPlan> {
        let request = params.validate()?;

        let plan = self
            .with_database(move |db| {
                let courses = db.courses_for(request.student_id, request.track_id)?;
                let plan = build_plan(&courses, &request)?;
                db.insert_plan(&plan)
            })
            .await?;

        info!(
            "Generated plan {} for student {} ({} items)",
            plan.id,
            plan.student_id,
            plan.items.len()
        );
        Ok(plan)
    }

    /// Computes the plan [`Self::generate_plan`] would store, without writing
    /// anything.
    ///
    /// The preview has ID 0. With a fixed `generated_at`, identical params
    /// over an unchanged curriculum give identical previews.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_plan`].
    pub async fn preview_plan(&self, params: &GeneratePlan) -> Result<StudyPlan> {
        let request = params.validate()?;

        self.with_database(move |db| {
            let courses = db.courses_for(request.student_id, request.track_id)?;
            build_plan(&courses, &request)
        })
        .await
    }

    /// Retrieves a plan with its items by ID.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when no plan has this ID.
    pub async fn get_plan(&self, params: &Id) -> Result<StudyPlan> {
        let plan_id = params.id;

        self.with_database(move |db| {
            db.get_plan(plan_id)?
                .ok_or_else(|| PlannerError::not_found("Study plan", plan_id))
        })
        .await
    }

    /// Returns the student's active plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidState` when the student has no active
    /// plan, or more than one.
    pub async fn active_plan(&self, params: &StudentId) -> Result<StudyPlan> {
        let student_id = params.student_id;

        self.with_database(move |db| db.active_plan(student_id)).await
    }

    /// Lists a student's plan history, newest first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let student_id = params.student_id;
        let active_only = params.active_only;

        let summaries = self
            .with_database(move |db| db.list_plans(student_id, active_only))
            .await?;
        Ok(PlanSummaries(summaries))
    }

    /// Returns a plan regrouped by date, with the student's live completion
    /// status on every item.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when no plan has this ID.
    pub async fn plan_detail(&self, params: &Id) -> Result<PlanDetail> {
        let plan_id = params.id;

        self.with_database(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .ok_or_else(|| PlannerError::not_found("Study plan", plan_id))?;
            scheduling::detail(plan, &*db)
        })
        .await
    }

    /// Reports progress on a plan as of a day, today by default.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when no plan has this ID.
    pub async fn progress_summary(&self, params: &ProgressQuery) -> Result<ProgressSummary> {
        let plan_id = params.plan_id;
        let as_of = params.as_of.unwrap_or_else(|| Zoned::now().date());

        self.with_database(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .ok_or_else(|| PlannerError::not_found("Study plan", plan_id))?;
            scheduling::evaluate(&plan, &*db, as_of)
        })
        .await
    }
}
