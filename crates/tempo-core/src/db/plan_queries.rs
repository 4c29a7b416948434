//! Study plan persistence and history queries.

use std::{fmt, str::FromStr};

use log::debug;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{ItemKind, PlanStatus, PlanSummary, StudyPlan, StudyPlanItem, UnitRef},
};

const SUPERSEDE_ACTIVE_PLANS_SQL: &str =
    "UPDATE study_plans SET status = ?1 WHERE student_id = ?2 AND status = ?3";
const INSERT_PLAN_SQL: &str = "INSERT INTO study_plans (student_id, track_id, start_date, weekdays, requested_days, generated_at, status) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const INSERT_PLAN_ITEM_SQL: &str = "INSERT INTO study_plan_items (plan_id, date, slot_index, position, lesson_id, test_id, title, duration_seconds) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_PLAN_SQL: &str = "SELECT id, student_id, track_id, start_date, weekdays, requested_days, generated_at, status \
     FROM study_plans WHERE id = ?1";
const SELECT_PLAN_ITEMS_SQL: &str = "SELECT date, slot_index, position, lesson_id, test_id, title, duration_seconds \
     FROM study_plan_items WHERE plan_id = ?1 ORDER BY slot_index, position";
const SELECT_ACTIVE_PLAN_IDS_SQL: &str =
    "SELECT id FROM study_plans WHERE student_id = ?1 AND status = ?2 ORDER BY id";

// Plan columns followed by item count and last item date
const SELECT_PLAN_SUMMARIES_SQL: &str = "SELECT p.id, p.student_id, p.track_id, p.start_date, p.weekdays, \
     p.requested_days, p.generated_at, p.status, \
     (SELECT COUNT(*) FROM study_plan_items i WHERE i.plan_id = p.id), \
     (SELECT MAX(i.date) FROM study_plan_items i WHERE i.plan_id = p.id) \
     FROM study_plans p WHERE p.student_id = ?1";

impl super::Database {
    /// Stores a generated plan, superseding the student's active plan.
    ///
    /// Both writes happen in one transaction: either the old plan is
    /// superseded and the new one fully inserted, or nothing changes.
    /// Returns the plan with its assigned ID.
    pub fn insert_plan(&mut self, plan: &StudyPlan) -> Result<StudyPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let superseded = tx
            .execute(
                SUPERSEDE_ACTIVE_PLANS_SQL,
                params![
                    PlanStatus::Superseded.as_str(),
                    plan.student_id as i64,
                    PlanStatus::Active.as_str()
                ],
            )
            .db_context("Failed to supersede active plan")?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.student_id as i64,
                plan.track_id as i64,
                plan.start_date.to_string(),
                plan.weekdays.to_string(),
                i64::from(plan.requested_days),
                plan.generated_at.to_string(),
                PlanStatus::Active.as_str()
            ],
        )
        .db_context("Failed to insert plan")?;
        let id = tx.last_insert_rowid() as u64;

        {
            let mut stmt = tx
                .prepare(INSERT_PLAN_ITEM_SQL)
                .db_context("Failed to prepare item insert")?;
            for item in &plan.items {
                let (lesson_id, test_id) = match item.unit.kind {
                    ItemKind::Lesson => (Some(item.unit.id as i64), None),
                    ItemKind::Test => (None, Some(item.unit.id as i64)),
                };
                stmt.execute(params![
                    id as i64,
                    item.date.to_string(),
                    i64::from(item.slot_index),
                    i64::from(item.position),
                    lesson_id,
                    test_id,
                    &item.title,
                    item.duration_seconds as i64
                ])
                .db_context("Failed to insert plan item")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "Stored plan {id} for student {} ({} items, {superseded} superseded)",
            plan.student_id,
            plan.items.len()
        );

        Ok(StudyPlan {
            id,
            status: PlanStatus::Active,
            ..plan.clone()
        })
    }

    /// Retrieves a plan with its items by ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<StudyPlan>> {
        let plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        match plan {
            Some(mut plan) => {
                plan.items = self.plan_items(plan.id)?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// Returns the student's single active plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidState` when the student has no active
    /// plan or, contrary to the supersede rule, more than one.
    pub fn active_plan(&self, student_id: u64) -> Result<StudyPlan> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVE_PLAN_IDS_SQL)
            .db_context("Failed to prepare query")?;
        let ids = stmt
            .query_map(
                params![student_id as i64, PlanStatus::Active.as_str()],
                |row| Ok(row.get::<_, i64>(0)? as u64),
            )
            .db_context("Failed to query active plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect active plans")?;

        match ids.as_slice() {
            [] => Err(PlannerError::invalid_state(format!(
                "Student {student_id} has no active study plan"
            ))),
            [id] => self
                .get_plan(*id)?
                .ok_or_else(|| PlannerError::not_found("Study plan", *id)),
            many => Err(PlannerError::invalid_state(format!(
                "Student {student_id} has {} active study plans",
                many.len()
            ))),
        }
    }

    /// Lists a student's plans, newest first.
    pub fn list_plans(&self, student_id: u64, active_only: bool) -> Result<Vec<PlanSummary>> {
        let mut query = SELECT_PLAN_SUMMARIES_SQL.to_string();
        if active_only {
            query.push_str(" AND p.status = 'active'");
        }
        query.push_str(" ORDER BY p.id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let summaries = stmt
            .query_map(params![student_id as i64], |row| {
                let plan = plan_from_row(row)?;
                let total_units: i64 = row.get(8)?;
                let last_date = row
                    .get::<_, Option<String>>(9)?
                    .map(|text| parse_text(9, &text))
                    .transpose()?;
                Ok(PlanSummary {
                    total_units: total_units as u32,
                    last_date,
                    ..PlanSummary::from(&plan)
                })
            })
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch plans")?;

        Ok(summaries)
    }

    fn plan_items(&self, plan_id: u64) -> Result<Vec<StudyPlanItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_ITEMS_SQL)
            .db_context("Failed to prepare query")?;
        let items = stmt
            .query_map(params![plan_id as i64], item_from_row)
            .db_context("Failed to query plan items")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch plan items")?;
        Ok(items)
    }
}

/// Maps the eight leading plan columns of a row to a plan without items.
fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<StudyPlan> {
    Ok(StudyPlan {
        id: row.get::<_, i64>(0)? as u64,
        student_id: row.get::<_, i64>(1)? as u64,
        track_id: row.get::<_, i64>(2)? as u64,
        start_date: parse_text(3, &row.get::<_, String>(3)?)?,
        weekdays: parse_text(4, &row.get::<_, String>(4)?)?,
        requested_days: row.get::<_, i64>(5)? as u32,
        generated_at: parse_text(6, &row.get::<_, String>(6)?)?,
        status: parse_text(7, &row.get::<_, String>(7)?)?,
        items: Vec::new(),
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<StudyPlanItem> {
    let lesson_id: Option<i64> = row.get(3)?;
    let test_id: Option<i64> = row.get(4)?;
    let unit = match (lesson_id, test_id) {
        (Some(id), None) => UnitRef::lesson(id as u64),
        (None, Some(id)) => UnitRef::test(id as u64),
        _ => {
            return Err(conversion_failure(
                3,
                "Plan item must reference exactly one lesson or test".to_string(),
            ))
        }
    };

    Ok(StudyPlanItem {
        date: parse_text(0, &row.get::<_, String>(0)?)?,
        slot_index: row.get::<_, i64>(1)? as u32,
        position: row.get::<_, i64>(2)? as u32,
        unit,
        title: row.get(5)?,
        duration_seconds: row.get::<_, i64>(6)? as u64,
    })
}

/// Parses a text column, reporting failures as conversion errors.
fn parse_text<T>(index: usize, text: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| conversion_failure(index, format!("Invalid value '{text}': {e}")))
}

fn conversion_failure(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}
