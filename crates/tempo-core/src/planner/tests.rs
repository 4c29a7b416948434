//! Tests for the planner module.

use jiff::{civil::date, Timestamp};
use tempfile::TempDir;

use super::*;
use crate::{
    models::{
        Catalog, Course, Lesson, Module, ModuleContent, PlanStatus, Student, Test, Track, UnitRef,
    },
    params::{GeneratePlan, Id, ListPlans, ProgressQuery, RecordProgress, StudentId, StudentTrack},
};

const STUDENT: u64 = 7;
const TRACK: u64 = 1;

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// One track with two courses: five lessons and a test, the student enrolled
/// in both.
fn catalog() -> Catalog {
    let lesson = |id: u64, media: &[u64]| Lesson {
        id,
        title: format!("Lesson {id}"),
        media_seconds: media.to_vec(),
    };

    Catalog {
        tracks: vec![Track {
            id: TRACK,
            title: "Japanese N5".to_string(),
            courses: vec![
                Course {
                    id: 10,
                    title: "Kana".to_string(),
                    modules: vec![
                        Module {
                            id: 100,
                            title: "Hiragana".to_string(),
                            content: ModuleContent::Lessons(vec![
                                lesson(1000, &[300, 420]),
                                lesson(1001, &[600]),
                                lesson(1002, &[]),
                            ]),
                        },
                        Module {
                            id: 101,
                            title: "Kana quiz".to_string(),
                            content: ModuleContent::Tests(vec![
                                Test {
                                    id: 5000,
                                    title: "Quiz A".to_string(),
                                },
                                Test {
                                    id: 5001,
                                    title: "Quiz B".to_string(),
                                },
                            ]),
                        },
                    ],
                },
                Course {
                    id: 11,
                    title: "Greetings".to_string(),
                    modules: vec![Module {
                        id: 110,
                        title: "Basics".to_string(),
                        content: ModuleContent::Lessons(vec![
                            lesson(1100, &[900]),
                            lesson(1101, &[1200, 300]),
                        ]),
                    }],
                },
            ],
        }],
        students: vec![Student {
            id: STUDENT,
            name: "Mai".to_string(),
            enrolled_courses: vec![10, 11],
        }],
    }
}

async fn seeded_planner() -> (TempDir, Planner) {
    let (temp_dir, planner) = create_test_planner().await;
    planner
        .import_curriculum(&catalog())
        .await
        .expect("Failed to import catalog");
    (temp_dir, planner)
}

fn generate(requested_days: i64) -> GeneratePlan {
    GeneratePlan {
        student_id: STUDENT,
        track_id: TRACK,
        start_date: date(2024, 9, 2),
        weekdays: vec![1, 3, 5],
        requested_days,
        generated_at: Some(Timestamp::UNIX_EPOCH),
    }
}

#[tokio::test]
async fn test_import_curriculum_reports_counts() {
    let (_temp_dir, planner) = create_test_planner().await;

    let report = planner
        .import_curriculum(&catalog())
        .await
        .expect("Failed to import catalog");

    assert_eq!(report.tracks, 1);
    assert_eq!(report.courses, 2);
    assert_eq!(report.modules, 3);
    assert_eq!(report.lessons, 5);
    assert_eq!(report.tests, 2);
    assert_eq!(report.students, 1);
}

#[tokio::test]
async fn test_curriculum_collects_items_in_order() {
    let (_temp_dir, planner) = seeded_planner().await;

    let items = planner
        .curriculum(&StudentTrack {
            student_id: STUDENT,
            track_id: TRACK,
        })
        .await
        .expect("Failed to collect curriculum");

    let units: Vec<UnitRef> = items.iter().map(|item| item.unit()).collect();
    assert_eq!(
        units,
        vec![
            UnitRef::lesson(1000),
            UnitRef::lesson(1001),
            UnitRef::lesson(1002),
            UnitRef::test(5000),
            UnitRef::lesson(1100),
            UnitRef::lesson(1101),
        ]
    );
    assert_eq!(items[0].duration_seconds, 300 + 420 + 1800);
    assert_eq!(items[3].duration_seconds, 1800);
}

#[tokio::test]
async fn test_reimport_replaces_course_tree() {
    let (_temp_dir, planner) = seeded_planner().await;

    let mut updated = catalog();
    updated.tracks[0].courses.truncate(1);
    if let ModuleContent::Lessons(lessons) = &mut updated.tracks[0].courses[0].modules[0].content
    {
        lessons.remove(1);
    }
    updated.students[0].enrolled_courses = vec![10];
    planner
        .import_curriculum(&updated)
        .await
        .expect("Failed to re-import catalog");

    let items = planner
        .curriculum(&StudentTrack {
            student_id: STUDENT,
            track_id: TRACK,
        })
        .await
        .expect("Failed to collect curriculum");

    assert_eq!(items.len(), 3);
    assert!(!items.iter().any(|item| item.id == 1001));
}

#[tokio::test]
async fn test_import_rejects_unknown_enrollment() {
    let (_temp_dir, planner) = create_test_planner().await;

    let mut bad = catalog();
    bad.students[0].enrolled_courses.push(99);

    match planner.import_curriculum(&bad).await {
        Err(PlannerError::NotFound { entity, id }) => {
            assert_eq!(entity, "Course");
            assert_eq!(id, 99);
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }

    // nothing from the failed import was kept
    let result = planner
        .curriculum(&StudentTrack {
            student_id: STUDENT,
            track_id: TRACK,
        })
        .await;
    assert!(matches!(result, Err(PlannerError::NotFound { .. })));
}

#[tokio::test]
async fn test_generate_plan_persists_and_returns_id() {
    let (_temp_dir, planner) = seeded_planner().await;

    let plan = planner
        .generate_plan(&generate(6))
        .await
        .expect("Failed to generate plan");

    assert_ne!(plan.id, 0);
    assert_eq!(plan.status, PlanStatus::Active);
    assert_eq!(plan.items.len(), 6);

    let stored = planner
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan");
    assert_eq!(stored, plan);
}

#[tokio::test]
async fn test_generate_plan_supersedes_previous_plan() {
    let (_temp_dir, planner) = seeded_planner().await;

    let first = planner.generate_plan(&generate(6)).await.unwrap();
    let second = planner.generate_plan(&generate(3)).await.unwrap();

    let first = planner.get_plan(&Id { id: first.id }).await.unwrap();
    assert_eq!(first.status, PlanStatus::Superseded);

    let active = planner
        .active_plan(&StudentId {
            student_id: STUDENT,
        })
        .await
        .expect("Failed to get active plan");
    assert_eq!(active.id, second.id);

    let history = planner
        .list_plans(&ListPlans {
            student_id: STUDENT,
            active_only: false,
        })
        .await
        .unwrap();
    assert_eq!(history.0.len(), 2);
    assert_eq!(history.0[0].id, second.id);
    assert_eq!(history.0[1].status, PlanStatus::Superseded);
    assert_eq!(history.0[1].total_units, 6);

    let active_only = planner
        .list_plans(&ListPlans {
            student_id: STUDENT,
            active_only: true,
        })
        .await
        .unwrap();
    assert_eq!(active_only.0.len(), 1);
}

#[tokio::test]
async fn test_preview_matches_generate_and_writes_nothing() {
    let (_temp_dir, planner) = seeded_planner().await;

    let first = planner.preview_plan(&generate(4)).await.unwrap();
    let second = planner.preview_plan(&generate(4)).await.unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.id, 0);

    let result = planner
        .active_plan(&StudentId {
            student_id: STUDENT,
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidState { .. })));

    let generated = planner.generate_plan(&generate(4)).await.unwrap();
    assert_eq!(generated.items, first.items);
}

#[tokio::test]
async fn test_generate_rejects_invalid_input_before_lookup() {
    let (_temp_dir, planner) = create_test_planner().await;

    // the database is empty, so a lookup would report NotFound
    let params = GeneratePlan {
        weekdays: vec![],
        ..generate(5)
    };
    assert!(matches!(
        planner.generate_plan(&params).await,
        Err(PlannerError::InvalidInput { .. })
    ));
    assert!(matches!(
        planner.preview_plan(&generate(0)).await,
        Err(PlannerError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_generate_unknown_track_or_student() {
    let (_temp_dir, planner) = seeded_planner().await;

    let params = GeneratePlan {
        track_id: 42,
        ..generate(5)
    };
    match planner.generate_plan(&params).await {
        Err(PlannerError::NotFound { entity, id }) => {
            assert_eq!(entity, "Track");
            assert_eq!(id, 42);
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }

    let params = GeneratePlan {
        student_id: 8,
        ..generate(5)
    };
    assert!(matches!(
        planner.generate_plan(&params).await,
        Err(PlannerError::NotFound { entity: "Student", .. })
    ));
}

#[tokio::test]
async fn test_get_plan_not_found() {
    let (_temp_dir, planner) = create_test_planner().await;

    match planner.get_plan(&Id { id: 999 }).await {
        Err(PlannerError::NotFound { id, .. }) => assert_eq!(id, 999),
        other => panic!("Expected NotFound error, got {other:?}"),
    }
    assert!(matches!(
        planner.plan_detail(&Id { id: 999 }).await,
        Err(PlannerError::NotFound { .. })
    ));
    assert!(matches!(
        planner
            .progress_summary(&ProgressQuery {
                plan_id: 999,
                as_of: None
            })
            .await,
        Err(PlannerError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_progress_summary_uses_recorded_progress() {
    let (_temp_dir, planner) = seeded_planner().await;
    // six items over six Mon/Wed/Fri study days
    let plan = planner.generate_plan(&generate(6)).await.unwrap();

    for (unit, stars) in [(UnitRef::lesson(1000), 3), (UnitRef::lesson(1001), 1)] {
        planner
            .record_progress(&RecordProgress {
                student_id: STUDENT,
                unit,
                completed: true,
                locked: false,
                stars,
            })
            .await
            .expect("Failed to record progress");
    }
    planner
        .record_progress(&RecordProgress {
            student_id: STUDENT,
            unit: UnitRef::lesson(1002),
            completed: false,
            locked: true,
            stars: 0,
        })
        .await
        .unwrap();

    // Friday of the first week: three sessions due
    let summary = planner
        .progress_summary(&ProgressQuery {
            plan_id: plan.id,
            as_of: Some(date(2024, 9, 6)),
        })
        .await
        .expect("Failed to compute progress");

    assert_eq!(summary.units_planned, 3);
    assert_eq!(summary.units_completed, 2);
    assert_eq!(summary.stars_earned, 4);
    assert_eq!(summary.units_at_two_stars, 1);
    assert_eq!(summary.total_units, 6);
    assert_eq!(summary.remaining_days, 3);
    assert_eq!(summary.sessions_due, 3);
    assert_eq!(summary.sessions_completed, 2);
    assert_eq!(summary.outstanding.len(), 1);
    assert_eq!(summary.outstanding[0].unit, UnitRef::lesson(1002));
    assert!(summary.outstanding[0].locked);
}

#[tokio::test]
async fn test_plan_detail_groups_by_date() {
    let (_temp_dir, planner) = seeded_planner().await;
    let plan = planner.generate_plan(&generate(2)).await.unwrap();

    planner
        .record_progress(&RecordProgress {
            student_id: STUDENT,
            unit: UnitRef::test(5000),
            completed: true,
            locked: false,
            stars: 2,
        })
        .await
        .unwrap();

    let detail = planner.plan_detail(&Id { id: plan.id }).await.unwrap();

    assert_eq!(detail.plan.id, plan.id);
    let total: usize = detail.days.iter().map(|day| day.entries.len()).sum();
    assert_eq!(total, 6);
    assert!(detail.days.windows(2).all(|w| w[0].date < w[1].date));

    let test_entry = detail
        .days
        .iter()
        .flat_map(|day| &day.entries)
        .find(|entry| entry.item.unit == UnitRef::test(5000))
        .expect("Test should be scheduled");
    assert!(test_entry.completed);
    assert_eq!(test_entry.stars, 2);
}

#[tokio::test]
async fn test_record_progress_validation() {
    let (_temp_dir, planner) = seeded_planner().await;

    let params = RecordProgress {
        student_id: STUDENT,
        unit: UnitRef::lesson(1000),
        completed: true,
        locked: false,
        stars: 5,
    };
    assert!(matches!(
        planner.record_progress(&params).await,
        Err(PlannerError::InvalidInput { .. })
    ));

    let params = RecordProgress {
        unit: UnitRef::test(1000),
        stars: 1,
        ..params
    };
    assert!(matches!(
        planner.record_progress(&params).await,
        Err(PlannerError::NotFound { entity: "Test", .. })
    ));
}
