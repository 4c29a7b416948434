//! Lesson and test progress rows.

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{ItemKind, UnitRef},
    progress::{ProgressSource, UnitProgress},
};

const SELECT_LESSON_PROGRESS_SQL: &str =
    "SELECT completed, locked, stars FROM lesson_progress WHERE lesson_id = ?1 AND student_id = ?2";
const SELECT_TEST_PROGRESS_SQL: &str =
    "SELECT completed, locked, stars FROM test_progress WHERE test_id = ?1 AND student_id = ?2";
const UPSERT_LESSON_PROGRESS_SQL: &str = "INSERT INTO lesson_progress (lesson_id, student_id, completed, locked, stars) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(lesson_id, student_id) \
     DO UPDATE SET completed = excluded.completed, locked = excluded.locked, stars = excluded.stars";
const UPSERT_TEST_PROGRESS_SQL: &str = "INSERT INTO test_progress (test_id, student_id, completed, locked, stars) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(test_id, student_id) \
     DO UPDATE SET completed = excluded.completed, locked = excluded.locked, stars = excluded.stars";

const CHECK_LESSON_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM lessons WHERE id = ?1)";
const CHECK_TEST_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tests WHERE id = ?1)";
const CHECK_STUDENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1)";

impl super::Database {
    /// Stored progress of a student on a lesson or test.
    ///
    /// A missing row means not completed, unlocked and without stars.
    pub fn unit_progress(&self, unit: UnitRef, student_id: u64) -> Result<UnitProgress> {
        let sql = match unit.kind {
            ItemKind::Lesson => SELECT_LESSON_PROGRESS_SQL,
            ItemKind::Test => SELECT_TEST_PROGRESS_SQL,
        };
        let progress = self
            .connection
            .query_row(sql, params![unit.id as i64, student_id as i64], |row| {
                Ok(UnitProgress {
                    completed: row.get(0)?,
                    locked: row.get(1)?,
                    stars: row.get(2)?,
                })
            })
            .optional()
            .db_context("Failed to query progress")?;

        Ok(progress.unwrap_or_default())
    }

    /// Records a student's progress on a lesson or test, replacing any
    /// previous record.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when the student or the lesson/test
    /// does not exist, and `PlannerError::InvalidInput` for an out-of-range
    /// star rating.
    pub fn record_progress(
        &mut self,
        student_id: u64,
        unit: UnitRef,
        progress: UnitProgress,
    ) -> Result<()> {
        progress.validate()?;
        self.ensure_exists(CHECK_STUDENT_EXISTS_SQL, "Student", student_id)?;

        let (check_sql, upsert_sql, entity) = match unit.kind {
            ItemKind::Lesson => (CHECK_LESSON_EXISTS_SQL, UPSERT_LESSON_PROGRESS_SQL, "Lesson"),
            ItemKind::Test => (CHECK_TEST_EXISTS_SQL, UPSERT_TEST_PROGRESS_SQL, "Test"),
        };
        self.ensure_exists(check_sql, entity, unit.id)?;

        self.connection
            .execute(
                upsert_sql,
                params![
                    unit.id as i64,
                    student_id as i64,
                    progress.completed,
                    progress.locked,
                    progress.stars
                ],
            )
            .db_context("Failed to record progress")?;
        Ok(())
    }
}

impl ProgressSource for super::Database {
    fn lesson_completed(&self, lesson_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.unit_progress(UnitRef::lesson(lesson_id), student_id)?.completed)
    }

    fn lesson_locked(&self, lesson_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.unit_progress(UnitRef::lesson(lesson_id), student_id)?.locked)
    }

    fn lesson_stars(&self, lesson_id: u64, student_id: u64) -> Result<u8> {
        Ok(self.unit_progress(UnitRef::lesson(lesson_id), student_id)?.stars)
    }

    fn test_completed(&self, test_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.unit_progress(UnitRef::test(test_id), student_id)?.completed)
    }

    fn test_locked(&self, test_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.unit_progress(UnitRef::test(test_id), student_id)?.locked)
    }

    fn test_stars(&self, test_id: u64, student_id: u64) -> Result<u8> {
        Ok(self.unit_progress(UnitRef::test(test_id), student_id)?.stars)
    }
}
