//! Curriculum import and enrolled-course queries.

use std::collections::HashSet;

use log::debug;
use rusqlite::{params, Transaction};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Catalog, Course, ImportReport, Lesson, Module, ModuleContent, Student, Test, Track},
};

const UPSERT_TRACK_SQL: &str =
    "INSERT INTO tracks (id, title) VALUES (?1, ?2) ON CONFLICT(id) DO UPDATE SET title = excluded.title";
const UPSERT_COURSE_SQL: &str = "INSERT INTO courses (id, track_id, title, position) VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(id) DO UPDATE SET track_id = excluded.track_id, title = excluded.title, position = excluded.position";
const UPSERT_MODULE_SQL: &str = "INSERT INTO modules (id, course_id, title, kind, position) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(id) DO UPDATE SET course_id = excluded.course_id, title = excluded.title, kind = excluded.kind, position = excluded.position";
const UPSERT_LESSON_SQL: &str = "INSERT INTO lessons (id, module_id, title, position) VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(id) DO UPDATE SET module_id = excluded.module_id, title = excluded.title, position = excluded.position";
const DELETE_LESSON_MEDIA_SQL: &str = "DELETE FROM lesson_media WHERE lesson_id = ?1";
const INSERT_LESSON_MEDIA_SQL: &str =
    "INSERT INTO lesson_media (lesson_id, position, duration_seconds) VALUES (?1, ?2, ?3)";
const UPSERT_TEST_SQL: &str = "INSERT INTO tests (id, module_id, title, position) VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(id) DO UPDATE SET module_id = excluded.module_id, title = excluded.title, position = excluded.position";
const UPSERT_STUDENT_SQL: &str =
    "INSERT INTO students (id, name) VALUES (?1, ?2) ON CONFLICT(id) DO UPDATE SET name = excluded.name";
const DELETE_ENROLLMENTS_SQL: &str = "DELETE FROM enrollments WHERE student_id = ?1";
const INSERT_ENROLLMENT_SQL: &str = "INSERT INTO enrollments (student_id, course_id) VALUES (?1, ?2)";

const CHECK_TRACK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tracks WHERE id = ?1)";
const CHECK_STUDENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1)";
const CHECK_COURSE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?1)";

const SELECT_ENROLLED_COURSES_SQL: &str = "SELECT c.id, c.title FROM courses c \
     JOIN enrollments e ON e.course_id = c.id \
     WHERE c.track_id = ?1 AND e.student_id = ?2 ORDER BY c.position, c.id";
const SELECT_MODULES_SQL: &str =
    "SELECT id, title, kind FROM modules WHERE course_id = ?1 ORDER BY position, id";
const SELECT_LESSONS_SQL: &str =
    "SELECT id, title FROM lessons WHERE module_id = ?1 ORDER BY position, id";
const SELECT_LESSON_MEDIA_SQL: &str =
    "SELECT duration_seconds FROM lesson_media WHERE lesson_id = ?1 ORDER BY position";
const SELECT_TESTS_SQL: &str = "SELECT id, title FROM tests WHERE module_id = ?1 ORDER BY position, id";

/// Child rows to prune when a parent is re-imported: `(table, parent column)`.
const COURSES_OF_TRACK: (&str, &str) = ("courses", "track_id");
const MODULES_OF_COURSE: (&str, &str) = ("modules", "course_id");
const LESSONS_OF_MODULE: (&str, &str) = ("lessons", "module_id");
const TESTS_OF_MODULE: (&str, &str) = ("tests", "module_id");

impl super::Database {
    /// Imports a catalog in one transaction, upserting every record by ID.
    ///
    /// A re-imported track replaces its course tree: courses, modules,
    /// lessons and tests listed nowhere in the catalog are removed. Rows
    /// that only moved to another parent keep their ID and progress.
    /// A re-imported student replaces their enrollments.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when a student is enrolled in a course
    /// that exists neither in the catalog nor in the database.
    pub fn import_catalog(&mut self, catalog: &Catalog) -> Result<ImportReport> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut report = ImportReport::default();
        for track in &catalog.tracks {
            import_track(&tx, track, &mut report)?;
        }
        // Pruning waits until every row sits under its new parent, so moved
        // rows never meet a cascading delete
        let incoming = IncomingIds::of(catalog);
        for track in &catalog.tracks {
            prune_track(&tx, track, &incoming)?;
        }
        for student in &catalog.students {
            import_student(&tx, student, &mut report)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Imported catalog: {report:?}");
        Ok(report)
    }

    /// Loads the courses of `track_id` the student is enrolled in, fully
    /// resolved and in curriculum order.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` when the track or the student does not
    /// exist.
    pub fn courses_for(&self, student_id: u64, track_id: u64) -> Result<Vec<Course>> {
        self.ensure_exists(CHECK_TRACK_EXISTS_SQL, "Track", track_id)?;
        self.ensure_exists(CHECK_STUDENT_EXISTS_SQL, "Student", student_id)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_ENROLLED_COURSES_SQL)
            .db_context("Failed to prepare query")?;
        let headers = stmt
            .query_map(params![track_id as i64, student_id as i64], |row| {
                Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
            })
            .db_context("Failed to query enrolled courses")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect enrolled courses")?;

        headers
            .into_iter()
            .map(|(id, title)| {
                Ok(Course {
                    id,
                    title,
                    modules: self.modules_of(id)?,
                })
            })
            .collect()
    }

    fn modules_of(&self, course_id: u64) -> Result<Vec<Module>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MODULES_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![course_id as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .db_context("Failed to query modules")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect modules")?;

        rows.into_iter()
            .map(|(id, title, kind)| {
                let content = match kind.as_str() {
                    "tests" => ModuleContent::Tests(self.tests_of(id)?),
                    _ => ModuleContent::Lessons(self.lessons_of(id)?),
                };
                Ok(Module { id, title, content })
            })
            .collect()
    }

    fn lessons_of(&self, module_id: u64) -> Result<Vec<Lesson>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_LESSONS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![module_id as i64], |row| {
                Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
            })
            .db_context("Failed to query lessons")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect lessons")?;

        let mut media = self
            .connection
            .prepare(SELECT_LESSON_MEDIA_SQL)
            .db_context("Failed to prepare query")?;

        rows.into_iter()
            .map(|(id, title)| {
                let media_seconds = media
                    .query_map(params![id as i64], |row| Ok(row.get::<_, i64>(0)? as u64))
                    .db_context("Failed to query lesson media")?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .db_context("Failed to collect lesson media")?;
                Ok(Lesson {
                    id,
                    title,
                    media_seconds,
                })
            })
            .collect()
    }

    fn tests_of(&self, module_id: u64) -> Result<Vec<Test>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TESTS_SQL)
            .db_context("Failed to prepare query")?;
        let tests = stmt
            .query_map(params![module_id as i64], |row| {
                Ok(Test {
                    id: row.get::<_, i64>(0)? as u64,
                    title: row.get(1)?,
                })
            })
            .db_context("Failed to query tests")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect tests")?;
        Ok(tests)
    }

    /// Fails with `NotFound` unless `check_sql` reports the row exists.
    pub(super) fn ensure_exists(&self, check_sql: &str, entity: &'static str, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(check_sql, params![id as i64], |row| row.get(0))
            .db_context("Failed to check existence")?;
        if exists {
            Ok(())
        } else {
            Err(PlannerError::not_found(entity, id))
        }
    }
}

/// IDs of every curriculum row a catalog lists, whatever its parent.
#[derive(Default)]
struct IncomingIds {
    courses: HashSet<u64>,
    modules: HashSet<u64>,
    lessons: HashSet<u64>,
    tests: HashSet<u64>,
}

impl IncomingIds {
    fn of(catalog: &Catalog) -> Self {
        let mut ids = Self::default();
        for course in catalog.tracks.iter().flat_map(|track| &track.courses) {
            ids.courses.insert(course.id);
            for module in &course.modules {
                ids.modules.insert(module.id);
                match &module.content {
                    ModuleContent::Lessons(lessons) => {
                        ids.lessons.extend(lessons.iter().map(|l| l.id));
                    }
                    ModuleContent::Tests(tests) => ids.tests.extend(tests.iter().map(|t| t.id)),
                }
            }
        }
        ids
    }
}

fn import_track(tx: &Transaction<'_>, track: &Track, report: &mut ImportReport) -> Result<()> {
    tx.execute(UPSERT_TRACK_SQL, params![track.id as i64, &track.title])
        .db_context("Failed to upsert track")?;
    report.tracks += 1;

    for (position, course) in track.courses.iter().enumerate() {
        tx.execute(
            UPSERT_COURSE_SQL,
            params![course.id as i64, track.id as i64, &course.title, position as i64],
        )
        .db_context("Failed to upsert course")?;
        report.courses += 1;

        for (position, module) in course.modules.iter().enumerate() {
            import_module(tx, course.id, position, module, report)?;
        }
    }
    Ok(())
}

fn import_module(
    tx: &Transaction<'_>,
    course_id: u64,
    position: usize,
    module: &Module,
    report: &mut ImportReport,
) -> Result<()> {
    let kind = match module.content {
        ModuleContent::Lessons(_) => "lessons",
        ModuleContent::Tests(_) => "tests",
    };
    tx.execute(
        UPSERT_MODULE_SQL,
        params![module.id as i64, course_id as i64, &module.title, kind, position as i64],
    )
    .db_context("Failed to upsert module")?;
    report.modules += 1;

    match &module.content {
        ModuleContent::Lessons(lessons) => {
            for (position, lesson) in lessons.iter().enumerate() {
                tx.execute(
                    UPSERT_LESSON_SQL,
                    params![lesson.id as i64, module.id as i64, &lesson.title, position as i64],
                )
                .db_context("Failed to upsert lesson")?;
                tx.execute(DELETE_LESSON_MEDIA_SQL, params![lesson.id as i64])
                    .db_context("Failed to clear lesson media")?;
                for (position, seconds) in lesson.media_seconds.iter().enumerate() {
                    tx.execute(
                        INSERT_LESSON_MEDIA_SQL,
                        params![lesson.id as i64, position as i64, *seconds as i64],
                    )
                    .db_context("Failed to insert lesson media")?;
                }
                report.lessons += 1;
            }
        }
        ModuleContent::Tests(tests) => {
            for (position, test) in tests.iter().enumerate() {
                tx.execute(
                    UPSERT_TEST_SQL,
                    params![test.id as i64, module.id as i64, &test.title, position as i64],
                )
                .db_context("Failed to upsert test")?;
                report.tests += 1;
            }
        }
    }
    Ok(())
}

fn import_student(tx: &Transaction<'_>, student: &Student, report: &mut ImportReport) -> Result<()> {
    tx.execute(UPSERT_STUDENT_SQL, params![student.id as i64, &student.name])
        .db_context("Failed to upsert student")?;
    tx.execute(DELETE_ENROLLMENTS_SQL, params![student.id as i64])
        .db_context("Failed to clear enrollments")?;

    for course_id in &student.enrolled_courses {
        let exists: bool = tx
            .query_row(CHECK_COURSE_EXISTS_SQL, params![*course_id as i64], |row| row.get(0))
            .db_context("Failed to check course existence")?;
        if !exists {
            return Err(PlannerError::not_found("Course", *course_id));
        }
        tx.execute(INSERT_ENROLLMENT_SQL, params![student.id as i64, *course_id as i64])
            .db_context("Failed to insert enrollment")?;
    }
    report.students += 1;
    Ok(())
}

/// Removes the rows under `track` that the catalog no longer lists.
///
/// A module holds one kind of unit, so rows of the other kind are pruned
/// as well.
fn prune_track(tx: &Transaction<'_>, track: &Track, incoming: &IncomingIds) -> Result<()> {
    prune(tx, COURSES_OF_TRACK, track.id, &incoming.courses)?;
    for course in &track.courses {
        prune(tx, MODULES_OF_COURSE, course.id, &incoming.modules)?;
        for module in &course.modules {
            prune(tx, LESSONS_OF_MODULE, module.id, &incoming.lessons)?;
            prune(tx, TESTS_OF_MODULE, module.id, &incoming.tests)?;
        }
    }
    Ok(())
}

/// Deletes rows of `table` under `parent_id` whose ID is not in `keep`.
fn prune(
    tx: &Transaction<'_>,
    (table, parent_column): (&str, &str),
    parent_id: u64,
    keep: &HashSet<u64>,
) -> Result<()> {
    let mut stmt = tx
        .prepare(&format!("SELECT id FROM {table} WHERE {parent_column} = ?1"))
        .db_context("Failed to prepare query")?;
    let existing = stmt
        .query_map(params![parent_id as i64], |row| Ok(row.get::<_, i64>(0)? as u64))
        .db_context("Failed to query existing rows")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to collect existing rows")?;
    drop(stmt);

    let delete_sql = format!("DELETE FROM {table} WHERE id = ?1");
    for id in existing.into_iter().filter(|id| !keep.contains(id)) {
        tx.execute(&delete_sql, params![id as i64])
            .db_context("Failed to prune stale curriculum row")?;
    }
    Ok(())
}
