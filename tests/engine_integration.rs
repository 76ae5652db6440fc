//! End-to-end flows through the public crate surface: bulk load, dependency
//! gating, recommendation and undo working together.

use chrono::NaiveDate;
use smarttime::{GraphError, ServiceError, TaskDetails, TaskService, load_from_str};

const PLAN: &str = "\
# three-course study plan
1;Read chapter 4;Algorithms;2025-01-10;90;3;
2;Problem set 2;Algorithms;2025-01-05;120;5;1
3;Flashcards;Spanish;2025-01-05;20;2;
4;Essay draft;Writing;2025-01-15;180;4;1,3
";

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn loaded_plan_recommends_in_priority_order() {
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, PLAN);
    assert_eq!(report.tasks_loaded, 4);
    assert_eq!(report.dependencies_added, 3);

    // 2 and 3 share the earliest due date; 3 is easier
    assert_eq!(service.next_recommended().map(|t| t.id), Some(3));

    service.mark_completed(3).unwrap();
    assert_eq!(service.next_recommended().map(|t| t.id), Some(2));
}

#[test]
fn dependency_gating_follows_completion() {
    let mut service = TaskService::new();
    load_from_str(&mut service, PLAN);

    assert!(service.is_unlocked(1));
    assert!(!service.is_unlocked(2));
    assert!(!service.is_unlocked(4));

    service.mark_completed(1).unwrap();
    assert!(service.is_unlocked(2));
    assert!(!service.is_unlocked(4));

    service.mark_completed(3).unwrap();
    assert!(service.is_unlocked(4));
}

#[test]
fn cycles_cannot_be_introduced_after_load() {
    let mut service = TaskService::new();
    load_from_str(&mut service, PLAN);

    // 1 -> 4 already holds transitively, so 4 -> 1 must be refused
    let err = service.add_dependency(4, 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Dependency(GraphError::CycleDetected { .. })
    ));
    assert_eq!(service.prerequisites(4), &[1, 3]);
}

#[test]
fn a_day_of_edits_fully_unwinds() {
    let mut service = TaskService::new();
    load_from_str(&mut service, PLAN);
    let before = service.all_tasks_sorted();

    service.mark_completed(3).unwrap();
    service
        .update_details(
            1,
            TaskDetails {
                title: "Read chapters 4-5".to_string(),
                course: "Algorithms".to_string(),
                due_date: date(2025, 1, 11),
                estimated_minutes: 150,
                difficulty: 4,
            },
        )
        .unwrap();
    service.delete_task(2).unwrap();
    let extra = service.create_task("Office hours", "Algorithms", date(2025, 1, 8), 30, 1);
    assert_eq!(extra, 5);

    // four edits this session, four undos back to the loaded state
    for _ in 0..4 {
        assert!(service.undo_last());
    }

    let after = service.all_tasks_sorted();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.title, a.title);
        assert_eq!(b.course, a.course);
        assert_eq!(b.due_date, a.due_date);
        assert_eq!(b.estimated_minutes, a.estimated_minutes);
        assert_eq!(b.difficulty, a.difficulty);
        assert_eq!(b.status, a.status);
    }
    // deleting task 2 pruned its incoming edge; undo restored it
    assert_eq!(service.prerequisites(2), &[1]);
    // the load's own add entries are still undoable
    assert!(service.can_undo());
}
