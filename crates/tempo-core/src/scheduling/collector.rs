//! Curriculum collection: flattens enrolled courses into learning items.

use log::debug;

use crate::{
    error::{PlannerError, Result},
    models::{Course, ItemKind, LearningItem, Lesson, ModuleContent, Ordinal},
};

/// Study time added to every lesson on top of its media, in seconds.
pub const LESSON_PAD_SECONDS: u64 = 1800;

/// Fixed study time of a test, in seconds.
pub const TEST_DURATION_SECONDS: u64 = 1800;

/// Flattens `courses` into learning items in course, module, item order.
///
/// Lesson modules contribute every lesson in stored order. Test modules
/// contribute only their first test.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` for field `curriculum` when no item
/// is collected.
pub fn collect_items(courses: &[Course]) -> Result<Vec<LearningItem>> {
    let mut items = Vec::new();

    for (course_index, course) in courses.iter().enumerate() {
        for (module_index, module) in course.modules.iter().enumerate() {
            let ordinal = |position: usize| Ordinal {
                course: course_index as u32,
                module: module_index as u32,
                position: position as u32,
            };

            match &module.content {
                ModuleContent::Lessons(lessons) => {
                    for (position, lesson) in lessons.iter().enumerate() {
                        items.push(LearningItem {
                            id: lesson.id,
                            kind: ItemKind::Lesson,
                            title: lesson.title.clone(),
                            duration_seconds: lesson_duration(lesson)?,
                            ordinal: ordinal(position),
                        });
                    }
                }
                ModuleContent::Tests(tests) => {
                    if let Some(test) = tests.first() {
                        items.push(LearningItem {
                            id: test.id,
                            kind: ItemKind::Test,
                            title: test.title.clone(),
                            duration_seconds: TEST_DURATION_SECONDS,
                            ordinal: ordinal(0),
                        });
                    }
                }
            }
        }
    }

    if items.is_empty() {
        return Err(PlannerError::invalid_input("curriculum")
            .with_reason("The enrolled courses contain no lessons or tests to schedule"));
    }

    debug!("Collected {} learning items from {} courses", items.len(), courses.len());
    Ok(items)
}

/// Media length plus the lesson pad, rejecting totals that overflow.
fn lesson_duration(lesson: &Lesson) -> Result<u64> {
    lesson
        .media_seconds
        .iter()
        .try_fold(LESSON_PAD_SECONDS, |total, &seconds| total.checked_add(seconds))
        .ok_or_else(|| {
            PlannerError::invalid_input("curriculum")
                .with_reason(format!("Media of lesson {} is too long to schedule", lesson.id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lesson, Module, Test};

    fn lesson(id: u64, media: &[u64]) -> Lesson {
        Lesson {
            id,
            title: format!("Lesson {id}"),
            media_seconds: media.to_vec(),
        }
    }

    fn test_unit(id: u64) -> Test {
        Test {
            id,
            title: format!("Test {id}"),
        }
    }

    fn course(id: u64, modules: Vec<ModuleContent>) -> Course {
        Course {
            id,
            title: format!("Course {id}"),
            modules: modules
                .into_iter()
                .enumerate()
                .map(|(i, content)| Module {
                    id: id * 100 + i as u64,
                    title: format!("Module {i}"),
                    content,
                })
                .collect(),
        }
    }

    #[test]
    fn test_lesson_duration_is_media_plus_pad() {
        let courses = vec![course(1, vec![ModuleContent::Lessons(vec![lesson(10, &[300, 600])])])];
        let items = collect_items(&courses).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Lesson);
        assert_eq!(items[0].duration_seconds, 300 + 600 + 1800);
    }

    #[test]
    fn test_lesson_without_media_gets_only_pad() {
        let courses = vec![course(1, vec![ModuleContent::Lessons(vec![lesson(10, &[])])])];
        let items = collect_items(&courses).unwrap();
        assert_eq!(items[0].duration_seconds, LESSON_PAD_SECONDS);
    }

    #[test]
    fn test_test_module_contributes_first_test_only() {
        let courses = vec![course(
            1,
            vec![ModuleContent::Tests(vec![test_unit(50), test_unit(51)])],
        )];
        let items = collect_items(&courses).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 50);
        assert_eq!(items[0].kind, ItemKind::Test);
        assert_eq!(items[0].duration_seconds, TEST_DURATION_SECONDS);
    }

    #[test]
    fn test_order_follows_course_module_item() {
        let courses = vec![
            course(
                1,
                vec![
                    ModuleContent::Lessons(vec![lesson(10, &[]), lesson(11, &[])]),
                    ModuleContent::Tests(vec![test_unit(12)]),
                ],
            ),
            course(2, vec![ModuleContent::Lessons(vec![lesson(20, &[60])])]),
        ];
        let items = collect_items(&courses).unwrap();

        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10, 11, 12, 20]);
        assert!(items.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
        assert_eq!(
            items[3].ordinal,
            Ordinal {
                course: 1,
                module: 0,
                position: 0
            }
        );
    }

    #[test]
    fn test_empty_modules_are_skipped() {
        let courses = vec![course(
            1,
            vec![
                ModuleContent::Tests(vec![]),
                ModuleContent::Lessons(vec![lesson(10, &[])]),
            ],
        )];
        let items = collect_items(&courses).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ordinal.module, 1);
    }

    #[test]
    fn test_overlong_lesson_media_is_invalid_input() {
        let media = [u64::MAX / 2, u64::MAX / 2];
        let courses = vec![course(1, vec![ModuleContent::Lessons(vec![lesson(10, &media)])])];
        match collect_items(&courses) {
            Err(PlannerError::InvalidInput { field, .. }) => assert_eq!(field, "curriculum"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_curriculum_is_invalid_input() {
        let courses = vec![course(1, vec![ModuleContent::Tests(vec![])])];
        match collect_items(&courses) {
            Err(PlannerError::InvalidInput { field, .. }) => assert_eq!(field, "curriculum"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(collect_items(&[]).is_err());
    }
}
