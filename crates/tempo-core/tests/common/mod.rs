#![allow(dead_code)]

use std::path::Path;

use jiff::{civil::date, Timestamp};
use tempo_core::{models::Catalog, params::GeneratePlan, Database, Planner, PlannerBuilder};
use tempfile::TempDir;

pub const STUDENT: u64 = 21;
pub const SECOND_STUDENT: u64 = 22;
pub const TRACK: u64 = 3;
pub const EMPTY_TRACK: u64 = 4;

/// Loads the shared catalog fixture.
pub fn catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json");
    Catalog::from_path(path).expect("Failed to load catalog fixture")
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Helper function to create a database with the catalog imported
pub fn create_seeded_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut db = Database::new(temp_dir.path().join("test.db")).expect("Failed to create database");
    db.import_catalog(&catalog()).expect("Failed to import catalog");
    (temp_dir, db)
}

/// Tuesday/Thursday plan starting Monday 2025-01-06.
pub fn generate_params(requested_days: i64) -> GeneratePlan {
    GeneratePlan {
        student_id: STUDENT,
        track_id: TRACK,
        start_date: date(2025, 1, 6),
        weekdays: vec![2, 4],
        requested_days,
        generated_at: Some(Timestamp::UNIX_EPOCH),
    }
}
