//! Command definitions and handlers.
//!
//! Clap argument structs wrap the interface-agnostic parameter types of
//! `tempo_core::params` and convert into them with `From`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Core parameter types stay free of clap attributes; help text, aliases and
//! value parsing live here. Domain validation (weekday sets, day counts, star
//! ratings) happens in the core so every interface gets the same errors.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::{civil::Date, Zoned};
use log::debug;
use tempo_core::{
    display::{CreateResult, LearningItems, OperationStatus, PreviewResult},
    models::Catalog,
    params::*,
    ItemKind, Planner, UnitRef,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Curriculum commands
// ============================================================================

/// Import a catalog of tracks, courses and students from a JSON file
///
/// Records are upserted by ID. A re-imported track replaces its course tree
/// and a re-imported student replaces their enrollments.
#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Path to the catalog JSON file")]
    pub path: PathBuf,
}

/// List the lessons and tests a plan would schedule
#[derive(Args)]
pub struct ShowCurriculumArgs {
    #[arg(help = "Student whose enrollments select the courses")]
    pub student_id: u64,
    #[arg(help = "Learning track to collect")]
    pub track_id: u64,
}

impl From<ShowCurriculumArgs> for StudentTrack {
    fn from(val: ShowCurriculumArgs) -> Self {
        StudentTrack {
            student_id: val.student_id,
            track_id: val.track_id,
        }
    }
}

#[derive(Subcommand)]
pub enum CurriculumCommands {
    /// Import a catalog JSON file
    #[command(alias = "i")]
    Import(ImportArgs),
    /// Show the lessons and tests a plan would cover
    #[command(alias = "s")]
    Show(ShowCurriculumArgs),
}

// ============================================================================
// Plan commands
// ============================================================================

/// Day of the week accepted by `--weekdays`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum WeekdayArg {
    #[value(alias = "1")]
    Mon,
    #[value(alias = "2")]
    Tue,
    #[value(alias = "3")]
    Wed,
    #[value(alias = "4")]
    Thu,
    #[value(alias = "5")]
    Fri,
    #[value(alias = "6")]
    Sat,
    #[value(alias = "7")]
    Sun,
}

impl From<WeekdayArg> for u8 {
    /// ISO weekday number, Monday = 1
    fn from(val: WeekdayArg) -> Self {
        match val {
            WeekdayArg::Mon => 1,
            WeekdayArg::Tue => 2,
            WeekdayArg::Wed => 3,
            WeekdayArg::Thu => 4,
            WeekdayArg::Fri => 5,
            WeekdayArg::Sat => 6,
            WeekdayArg::Sun => 7,
        }
    }
}

/// Generate a study plan
///
/// Spreads the track's lessons and tests over `--days` study days. With at
/// least as many days as items, each item gets its own day and the days are
/// spread evenly; otherwise items are packed by duration.
#[derive(Args)]
pub struct GeneratePlanArgs {
    #[arg(help = "Student to plan for")]
    pub student_id: u64,
    #[arg(help = "Learning track to plan")]
    pub track_id: u64,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required = true,
        help = "Study weekdays as a comma-separated list (mon,wed,fri or 1,3,5)"
    )]
    pub weekdays: Vec<WeekdayArg>,
    #[arg(short, long, allow_negative_numbers = true, help = "Number of study days")]
    pub days: i64,
    #[arg(short, long, help = "First possible study date (YYYY-MM-DD), defaults to today")]
    pub start: Option<Date>,
}

impl From<GeneratePlanArgs> for GeneratePlan {
    fn from(val: GeneratePlanArgs) -> Self {
        GeneratePlan {
            student_id: val.student_id,
            track_id: val.track_id,
            start_date: val.start.unwrap_or_else(|| Zoned::now().date()),
            weekdays: val.weekdays.into_iter().map(u8::from).collect(),
            requested_days: val.days,
            generated_at: None,
        }
    }
}

/// Compute a study plan without saving it
#[derive(Args)]
pub struct PreviewPlanArgs {
    #[command(flatten)]
    pub plan: GeneratePlanArgs,
    #[arg(long, help = "Print the plan as JSON instead of markdown")]
    pub json: bool,
}

/// Show a stored plan as it was generated
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Report progress on a plan
#[derive(Args)]
pub struct PlanProgressArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    #[arg(long, help = "Evaluate as of this date (YYYY-MM-DD), defaults to today")]
    pub as_of: Option<Date>,
}

impl From<PlanProgressArgs> for ProgressQuery {
    fn from(val: PlanProgressArgs) -> Self {
        ProgressQuery {
            plan_id: val.plan_id,
            as_of: val.as_of,
        }
    }
}

/// List a student's plans, newest first
#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(help = "Student whose plans to list")]
    pub student_id: u64,
    #[arg(long, help = "Only show the active plan")]
    pub active: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            student_id: val.student_id,
            active_only: val.active,
        }
    }
}

/// Show a student's active plan
#[derive(Args)]
pub struct ActivePlanArgs {
    #[arg(help = "Student whose active plan to show")]
    pub student_id: u64,
}

impl From<ActivePlanArgs> for StudentId {
    fn from(val: ActivePlanArgs) -> Self {
        StudentId {
            student_id: val.student_id,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate and save a study plan, superseding the active one
    #[command(alias = "g")]
    Generate(GeneratePlanArgs),
    /// Compute a study plan without saving it
    Preview(PreviewPlanArgs),
    /// Show a stored plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Show a plan by day with completion status
    #[command(alias = "d")]
    Detail(ShowPlanArgs),
    /// Report progress on a plan
    Progress(PlanProgressArgs),
    /// List a student's plans
    #[command(alias = "ls")]
    List(ListPlansArgs),
    /// Show a student's active plan
    Active(ActivePlanArgs),
}

// ============================================================================
// Progress commands
// ============================================================================

/// Record a student's result on a lesson or test
#[derive(Args)]
pub struct RecordProgressArgs {
    #[arg(help = "Student the result belongs to")]
    pub student_id: u64,
    #[arg(help = "Lesson or test ID")]
    pub id: u64,
    #[arg(long, help = "Mark as completed")]
    pub completed: bool,
    #[arg(long, help = "Mark as locked")]
    pub locked: bool,
    #[arg(long, default_value_t = 0, help = "Stars earned (0-3)")]
    pub stars: u8,
}

impl RecordProgressArgs {
    /// Converts to core params for a lesson or a test.
    pub fn into_params(self, kind: ItemKind) -> RecordProgress {
        RecordProgress {
            student_id: self.student_id,
            unit: UnitRef { kind, id: self.id },
            completed: self.completed,
            locked: self.locked,
            stars: self.stars,
        }
    }
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Record progress on a lesson
    #[command(alias = "l")]
    Lesson(RecordProgressArgs),
    /// Record progress on a test
    #[command(alias = "t")]
    Test(RecordProgressArgs),
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_curriculum_command(&self, command: CurriculumCommands) -> Result<()> {
        match command {
            CurriculumCommands::Import(args) => {
                let catalog = Catalog::from_path(&args.path).with_context(|| {
                    format!("Failed to read catalog from {}", args.path.display())
                })?;
                let report = self
                    .planner
                    .import_curriculum(&catalog)
                    .await
                    .context("Failed to import curriculum")?;
                self.renderer.render_display(&CreateResult::new(report))
            }
            CurriculumCommands::Show(args) => {
                let items = self
                    .planner
                    .curriculum(&args.into())
                    .await
                    .context("Failed to collect curriculum")?;
                self.renderer.render_display(&LearningItems(items))
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Generate(args) => {
                let plan = self
                    .planner
                    .generate_plan(&args.into())
                    .await
                    .context("Failed to generate plan")?;
                self.renderer.render_display(&CreateResult::new(plan))
            }
            PlanCommands::Preview(args) => {
                let json = args.json;
                let plan = self
                    .planner
                    .preview_plan(&args.plan.into())
                    .await
                    .context("Failed to preview plan")?;
                if json {
                    debug!("Printing preview as JSON");
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                    Ok(())
                } else {
                    self.renderer.render_display(&PreviewResult(plan))
                }
            }
            PlanCommands::Show(args) => {
                let plan = self
                    .planner
                    .get_plan(&args.into())
                    .await
                    .context("Failed to load plan")?;
                self.renderer.render_display(&plan)
            }
            PlanCommands::Detail(args) => {
                let detail = self
                    .planner
                    .plan_detail(&args.into())
                    .await
                    .context("Failed to load plan detail")?;
                self.renderer.render_display(&detail)
            }
            PlanCommands::Progress(args) => {
                let summary = self
                    .planner
                    .progress_summary(&args.into())
                    .await
                    .context("Failed to summarize progress")?;
                self.renderer.render_display(&summary)
            }
            PlanCommands::List(args) => {
                let plans = self
                    .planner
                    .list_plans(&args.into())
                    .await
                    .context("Failed to list plans")?;
                self.renderer.render_display(&plans)
            }
            PlanCommands::Active(args) => {
                let plan = self
                    .planner
                    .active_plan(&args.into())
                    .await
                    .context("Failed to load active plan")?;
                self.renderer.render_display(&plan)
            }
        }
    }

    pub async fn handle_progress_command(&self, command: ProgressCommands) -> Result<()> {
        let params = match command {
            ProgressCommands::Lesson(args) => args.into_params(ItemKind::Lesson),
            ProgressCommands::Test(args) => args.into_params(ItemKind::Test),
        };

        self.planner
            .record_progress(&params)
            .await
            .context("Failed to record progress")?;

        let status = OperationStatus::success(format!(
            "Recorded progress on {} {}",
            params.unit.kind, params.unit.id
        ));
        self.renderer.render_display(&status)
    }
}
