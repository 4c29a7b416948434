//! Async planner facade over the scheduling pipeline and the SQLite store.
//!
//! [`Planner`] is the entry point interfaces talk to. Every operation opens
//! the database inside [`tokio::task::spawn_blocking`] and runs the
//! synchronous core there, so callers on an async runtime never block.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Plan generation, preview, history and progress reports
//! - [`curriculum_ops`]: Curriculum import, inspection and progress recording
//!
//! # Examples
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use tempo_core::{params::GeneratePlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/tempo.db"))
//!     .build()
//!     .await?;
//!
//! let params = GeneratePlan {
//!     student_id: 7,
//!     track_id: 3,
//!     start_date: date(2024, 9, 2),
//!     weekdays: vec![1, 3, 5],
//!     requested_days: 12,
//!     generated_at: None,
//! };
//!
//! // Check the calendar first, then commit it
//! let preview = planner.preview_plan(&params).await?;
//! println!("{preview}");
//! let plan = planner.generate_plan(&params).await?;
//! assert_ne!(plan.id, 0);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod curriculum_ops;
pub mod plan_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for generating and tracking study plans.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite database backing this planner.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Opens the database on the blocking pool and runs `operation` on it.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }
}
