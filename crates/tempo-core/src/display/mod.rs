//! Display formatting for planner results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]),
//! producing markdown the CLI renders with termimad. This module adds
//! newtype wrappers for collections and operation outcomes, so the same data
//! can be framed differently per context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Markdown      │
//! │ (StudyPlan, …)  │───▶│ (PlanSummaries, │───▶│    Output       │
//! │                 │    │  CreateResult)  │    │  (Terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (PlanSummaries, LearningItems)
//! - [`results`]: Operation results (CreateResult, PreviewResult)
//! - [`status`]: Confirmation messages (OperationStatus)
//! - [`datetime`]: Timestamp and duration formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{LearningItems, PlanSummaries};
pub use datetime::{LocalDateTime, StudyDuration};
pub use results::{CreateResult, PreviewResult};
pub use status::OperationStatus;
