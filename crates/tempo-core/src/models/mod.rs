//! Data models for curricula, learning items and study plans.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! The models fall into three groups:
//!
//! - **Curriculum input** ([`Catalog`], [`Track`], [`Course`], [`Module`],
//!   [`Lesson`], [`Test`], [`Student`]): flat, ID-referenced records handed
//!   over by the enrollment provider.
//! - **Scheduling** ([`LearningItem`], [`Ordinal`], [`Weekdays`]): the
//!   immutable working set of the scheduling pipeline.
//! - **Plans and reports** ([`StudyPlan`], [`StudyPlanItem`],
//!   [`PlanSummary`], [`ProgressSummary`], [`PlanDetail`]).
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use tempo_core::models::{PlanStatus, StudyPlan, StudyPlanItem, UnitRef, Weekdays};
//!
//! let plan = StudyPlan {
//!     id: 1,
//!     student_id: 7,
//!     track_id: 3,
//!     start_date: date(2024, 9, 2),
//!     weekdays: Weekdays::new([1, 3, 5])?,
//!     requested_days: 10,
//!     generated_at: Timestamp::UNIX_EPOCH,
//!     status: PlanStatus::Active,
//!     items: vec![StudyPlanItem {
//!         date: date(2024, 9, 2),
//!         slot_index: 0,
//!         position: 0,
//!         unit: UnitRef::lesson(1000),
//!         title: "Vowels".to_string(),
//!         duration_seconds: 2520,
//!     }],
//! };
//! assert_eq!(plan.occupied_slots(), 1);
//! println!("{plan}");
//! # Ok::<(), tempo_core::PlannerError>(())
//! ```

pub mod curriculum;
pub mod item;
pub mod plan;
pub mod status;
pub mod summary;
pub mod weekdays;


pub use curriculum::{
    Catalog, Course, ImportReport, Lesson, Module, ModuleContent, Student, Test, Track,
};
pub use item::{LearningItem, Ordinal, UnitRef};
pub use plan::{StudyPlan, StudyPlanItem};
pub use status::{ItemKind, PlanStatus};
pub use summary::{OutstandingUnit, PlanDay, PlanDetail, PlanEntry, PlanSummary, ProgressSummary};
pub use weekdays::Weekdays;
