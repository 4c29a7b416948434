//! Lesson and test progress lookups.
//!
//! The progress evaluator only needs three questions answered per lesson or
//! test: is it completed, is it locked, and how many stars did the student
//! earn. [`ProgressSource`] captures that contract; [`crate::Database`]
//! implements it over SQLite and [`InMemoryProgress`] over a map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{ItemKind, UnitRef},
};

/// Highest star rating a lesson or test can earn.
pub const MAX_STARS: u8 = 3;

/// External lesson/test progress service.
pub trait ProgressSource {
    fn lesson_completed(&self, lesson_id: u64, student_id: u64) -> Result<bool>;
    fn lesson_locked(&self, lesson_id: u64, student_id: u64) -> Result<bool>;
    fn lesson_stars(&self, lesson_id: u64, student_id: u64) -> Result<u8>;

    fn test_completed(&self, test_id: u64, student_id: u64) -> Result<bool>;
    fn test_locked(&self, test_id: u64, student_id: u64) -> Result<bool>;
    fn test_stars(&self, test_id: u64, student_id: u64) -> Result<u8>;

    /// Completion of a lesson or test.
    fn is_completed(&self, unit: UnitRef, student_id: u64) -> Result<bool> {
        match unit.kind {
            ItemKind::Lesson => self.lesson_completed(unit.id, student_id),
            ItemKind::Test => self.test_completed(unit.id, student_id),
        }
    }

    /// Lock state of a lesson or test.
    fn is_locked(&self, unit: UnitRef, student_id: u64) -> Result<bool> {
        match unit.kind {
            ItemKind::Lesson => self.lesson_locked(unit.id, student_id),
            ItemKind::Test => self.test_locked(unit.id, student_id),
        }
    }

    /// Stars earned on a lesson or test.
    fn stars(&self, unit: UnitRef, student_id: u64) -> Result<u8> {
        match unit.kind {
            ItemKind::Lesson => self.lesson_stars(unit.id, student_id),
            ItemKind::Test => self.test_stars(unit.id, student_id),
        }
    }
}

/// Progress of one student on one lesson or test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProgress {
    pub completed: bool,
    pub locked: bool,
    pub stars: u8,
}

impl UnitProgress {
    /// Checks that the star rating is within `0..=3`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for field `stars` otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.stars > MAX_STARS {
            return Err(PlannerError::invalid_input("stars")
                .with_reason(format!("Stars must be between 0 and {MAX_STARS}, got {}", self.stars)));
        }
        Ok(())
    }
}

/// Map-backed progress source.
///
/// Units without an entry are reported as not completed, unlocked and
/// without stars.
///
/// ```rust
/// use tempo_core::{
///     models::UnitRef,
///     progress::{InMemoryProgress, ProgressSource, UnitProgress},
/// };
///
/// let mut progress = InMemoryProgress::default();
/// progress.set(7, UnitRef::lesson(1), UnitProgress { completed: true, locked: false, stars: 2 });
///
/// assert!(progress.is_completed(UnitRef::lesson(1), 7)?);
/// assert_eq!(progress.stars(UnitRef::lesson(1), 7)?, 2);
/// assert!(!progress.is_completed(UnitRef::test(1), 7)?);
/// # Ok::<(), tempo_core::PlannerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgress {
    entries: HashMap<(u64, UnitRef), UnitProgress>,
}

impl InMemoryProgress {
    pub fn set(&mut self, student_id: u64, unit: UnitRef, progress: UnitProgress) {
        self.entries.insert((student_id, unit), progress);
    }

    fn get(&self, student_id: u64, unit: UnitRef) -> UnitProgress {
        self.entries
            .get(&(student_id, unit))
            .copied()
            .unwrap_or_default()
    }
}

impl ProgressSource for InMemoryProgress {
    fn lesson_completed(&self, lesson_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.get(student_id, UnitRef::lesson(lesson_id)).completed)
    }

    fn lesson_locked(&self, lesson_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.get(student_id, UnitRef::lesson(lesson_id)).locked)
    }

    fn lesson_stars(&self, lesson_id: u64, student_id: u64) -> Result<u8> {
        Ok(self.get(student_id, UnitRef::lesson(lesson_id)).stars)
    }

    fn test_completed(&self, test_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.get(student_id, UnitRef::test(test_id)).completed)
    }

    fn test_locked(&self, test_id: u64, student_id: u64) -> Result<bool> {
        Ok(self.get(student_id, UnitRef::test(test_id)).locked)
    }

    fn test_stars(&self, test_id: u64, student_id: u64) -> Result<u8> {
        Ok(self.get(student_id, UnitRef::test(test_id)).stars)
    }
}
