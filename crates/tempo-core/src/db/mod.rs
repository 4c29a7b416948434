//! SQLite store for curricula, progress and study plans.
//!
//! The store plays two roles. It is the curriculum/progress provider the
//! scheduling pipeline reads from, and it is the persistence layer for
//! generated plans. Queries are split by concern into submodules, each
//! adding methods to [`Database`].

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod curriculum_queries;
pub mod migrations;
pub mod plan_queries;
pub mod progress_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
