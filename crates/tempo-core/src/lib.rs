//! Core library for the Tempo study planner.
//!
//! Tempo turns a student's enrolled courses into a dated study plan: every
//! lesson and test of a learning track is distributed across a requested
//! number of study days that fall on the student's chosen weekdays.
//!
//! # Architecture
//!
//! - **Scheduling** ([`scheduling`]): pure, in-memory pipeline that collects
//!   learning items, allocates them to sessions, balances packed sessions
//!   and maps sessions to calendar dates
//! - **Storage** ([`db`]): SQLite persistence of the curriculum, progress
//!   records and the plan history
//! - **Facade** ([`planner`]): async operations that run the pipeline
//!   against the store
//! - **Display** ([`display`]): markdown formatting of plans and reports
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use tempo_core::{
//!     models::Catalog,
//!     params::{GeneratePlan, ProgressQuery},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("tempo.db"))
//!     .build()
//!     .await?;
//!
//! // Load tracks, courses and enrollments
//! let catalog = Catalog::from_path("catalog.json")?;
//! planner.import_curriculum(&catalog).await?;
//!
//! // Spread track 3 over twelve Monday/Wednesday/Friday sessions
//! let plan = planner
//!     .generate_plan(&GeneratePlan {
//!         student_id: 7,
//!         track_id: 3,
//!         start_date: date(2024, 9, 2),
//!         weekdays: vec![1, 3, 5],
//!         requested_days: 12,
//!         generated_at: None,
//!     })
//!     .await?;
//! println!("{plan}");
//!
//! let summary = planner
//!     .progress_summary(&ProgressQuery {
//!         plan_id: plan.id,
//!         as_of: Some(date(2024, 9, 13)),
//!     })
//!     .await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod progress;
pub mod scheduling;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, LearningItems, OperationStatus, PlanSummaries, PreviewResult};
pub use error::{PlannerError, Result};
pub use models::{
    Catalog, ImportReport, ItemKind, LearningItem, PlanDetail, PlanStatus, PlanSummary,
    ProgressSummary, StudyPlan, StudyPlanItem, UnitRef, Weekdays,
};
pub use params::{
    GeneratePlan, Id, ListPlans, ProgressQuery, RecordProgress, StudentId, StudentTrack,
};
pub use planner::{Planner, PlannerBuilder};
pub use progress::{ProgressSource, UnitProgress};
