//! End-to-end tests of the generation pipeline.

#[cfg(test)]
mod pipeline_tests {
    use std::collections::HashSet;

    use jiff::{
        civil::{date, Date},
        Timestamp,
    };

    use crate::{
        error::PlannerError,
        models::{Course, Lesson, Module, ModuleContent, StudyPlan, Test, UnitRef, Weekdays},
        scheduling::{build_plan, collect_items, PlanRequest},
    };

    const MONDAY: Date = date(2024, 9, 2);

    fn lessons_module(id: u64, lessons: &[(u64, &[u64])]) -> Module {
        Module {
            id,
            title: format!("Module {id}"),
            content: ModuleContent::Lessons(
                lessons
                    .iter()
                    .map(|(id, media)| Lesson {
                        id: *id,
                        title: format!("Lesson {id}"),
                        media_seconds: media.to_vec(),
                    })
                    .collect(),
            ),
        }
    }

    fn test_module(id: u64, test_id: u64) -> Module {
        Module {
            id,
            title: format!("Module {id}"),
            content: ModuleContent::Tests(vec![Test {
                id: test_id,
                title: format!("Test {test_id}"),
            }]),
        }
    }

    /// `count` lessons with no media, so every item lasts 1800 seconds.
    fn uniform_course(count: u64) -> Vec<Course> {
        let lessons: Vec<(u64, &[u64])> = (1..=count).map(|id| (id, &[][..])).collect();
        vec![Course {
            id: 1,
            title: "Course".to_string(),
            modules: vec![lessons_module(1, &lessons)],
        }]
    }

    fn mixed_courses() -> Vec<Course> {
        vec![
            Course {
                id: 1,
                title: "Kana".to_string(),
                modules: vec![
                    lessons_module(1, &[(1, &[300, 420]), (2, &[600]), (3, &[3600])]),
                    test_module(2, 100),
                ],
            },
            Course {
                id: 2,
                title: "Kanji".to_string(),
                modules: vec![
                    lessons_module(3, &[(4, &[1200]), (5, &[]), (6, &[900, 900])]),
                    lessons_module(4, &[(7, &[2400]), (8, &[60])]),
                    test_module(5, 101),
                ],
            },
        ]
    }

    fn request(weekdays: &[u8], requested_days: u32) -> PlanRequest {
        PlanRequest {
            student_id: 7,
            track_id: 3,
            start_date: MONDAY,
            weekdays: Weekdays::new(weekdays.iter().copied()).unwrap(),
            requested_days,
            generated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn assert_plan_invariants(plan: &StudyPlan, courses: &[Course]) {
        let expected: Vec<UnitRef> = collect_items(courses)
            .unwrap()
            .iter()
            .map(|item| item.unit())
            .collect();
        let scheduled: Vec<UnitRef> = plan.items.iter().map(|item| item.unit).collect();
        assert_eq!(scheduled, expected, "every item once, in curriculum order");

        assert!(plan.items.iter().all(|item| item.date >= plan.start_date));
        assert!(plan.items.iter().all(|item| plan.weekdays.contains(item.date)));
        assert!(plan
            .items
            .windows(2)
            .all(|w| (w[0].slot_index, w[0].position) < (w[1].slot_index, w[1].position)));
        assert!(plan.items.windows(2).all(|w| w[0].date <= w[1].date));

        // one slot per date, one date per slot
        let pairs: HashSet<(u32, Date)> = plan
            .items
            .iter()
            .map(|item| (item.slot_index, item.date))
            .collect();
        let slots: HashSet<u32> = pairs.iter().map(|(slot, _)| *slot).collect();
        let dates: HashSet<Date> = pairs.iter().map(|(_, date)| *date).collect();
        assert_eq!(pairs.len(), slots.len());
        assert_eq!(pairs.len(), dates.len());
    }

    #[test]
    fn test_five_items_five_days_every_day() {
        let courses = uniform_course(5);
        let plan = build_plan(&courses, &request(&[1, 2, 3, 4, 5, 6, 7], 5)).unwrap();

        let dates: Vec<Date> = plan.items.iter().map(|item| item.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 9, 2),
                date(2024, 9, 3),
                date(2024, 9, 4),
                date(2024, 9, 5),
                date(2024, 9, 6)
            ]
        );
        assert_plan_invariants(&plan, &courses);
    }

    #[test]
    fn test_three_items_seven_days_spaced_three_apart() {
        let courses = uniform_course(3);
        let plan = build_plan(&courses, &request(&[1, 2, 3, 4, 5, 6, 7], 7)).unwrap();

        let dates: Vec<Date> = plan.items.iter().map(|item| item.date).collect();
        assert_eq!(dates, vec![MONDAY, date(2024, 9, 5), date(2024, 9, 8)]);
        assert_plan_invariants(&plan, &courses);
    }

    #[test]
    fn test_packed_plan_balances_and_uses_consecutive_study_days() {
        let courses = uniform_course(10);
        let plan = build_plan(&courses, &request(&[1, 3, 5], 3)).unwrap();

        let per_slot: Vec<usize> = (0..3)
            .map(|slot| plan.items.iter().filter(|item| item.slot_index == slot).count())
            .collect();
        assert_eq!(per_slot, vec![3, 3, 4]);
        assert_eq!(plan.first_date(), Some(MONDAY));
        assert_eq!(plan.last_date(), Some(date(2024, 9, 6)));
        assert_plan_invariants(&plan, &courses);
    }

    #[test]
    fn test_plan_metadata_and_copied_fields() {
        let courses = mixed_courses();
        let plan = build_plan(&courses, &request(&[2, 4], 6)).unwrap();

        assert_eq!(plan.id, 0);
        assert_eq!(plan.student_id, 7);
        assert_eq!(plan.track_id, 3);
        assert_eq!(plan.requested_days, 6);
        assert_eq!(plan.items.len(), 10);
        assert_eq!(plan.items[0].title, "Lesson 1");
        assert_eq!(plan.items[0].duration_seconds, 300 + 420 + 1800);
        assert_plan_invariants(&plan, &courses);
    }

    #[test]
    fn test_invariants_hold_across_day_counts_and_weekdays() {
        let courses = mixed_courses();
        let weekday_sets: [&[u8]; 4] = [&[1], &[6, 7], &[1, 3, 5], &[1, 2, 3, 4, 5, 6, 7]];

        for weekdays in weekday_sets {
            for days in [1, 2, 4, 9, 10, 11, 25] {
                let plan = build_plan(&courses, &request(weekdays, days)).unwrap();
                assert_plan_invariants(&plan, &courses);
                assert!(plan.occupied_slots() <= days as usize);
            }
        }
    }

    #[test]
    fn test_start_on_non_study_day_never_schedules_before_it() {
        let courses = uniform_course(4);
        let mut request = request(&[1, 4], 4);
        request.start_date = date(2024, 9, 3);

        let plan = build_plan(&courses, &request).unwrap();

        assert_eq!(plan.first_date(), Some(date(2024, 9, 5)));
        assert_plan_invariants(&plan, &courses);
    }

    #[test]
    fn test_preview_is_idempotent() {
        let courses = mixed_courses();
        let request = request(&[1, 3, 5], 4);

        let first = serde_json::to_vec(&build_plan(&courses, &request).unwrap()).unwrap();
        let second = serde_json::to_vec(&build_plan(&courses, &request).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_curriculum_is_rejected() {
        let courses = vec![Course {
            id: 1,
            title: "Empty".to_string(),
            modules: vec![],
        }];
        assert!(matches!(
            build_plan(&courses, &request(&[1], 3)),
            Err(PlannerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_days_is_rejected() {
        assert!(matches!(
            build_plan(&uniform_course(2), &request(&[1], 0)),
            Err(PlannerError::InvalidInput { .. })
        ));
    }
}
