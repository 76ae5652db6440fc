use crate::loader::{LoadError, load_from_path, load_from_str};
use crate::task::TaskService;
use std::io::Write;
use std::path::Path;

const SAMPLE: &str = "\
# sample study plan
1;Read chapter 4;Algorithms;2025-01-10;90;2;
2;Solve problem set;Algorithms;2025-01-12;120;4;1
3;Write summary;Writing;2025-01-05;45;1;1,2

4;Lab report;Physics;2025-01-20;60;3;
";

#[test]
fn loads_tasks_and_wires_dependencies() {
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, SAMPLE);

    assert_eq!(report.tasks_loaded, 4);
    assert_eq!(report.dependencies_added, 3);
    assert!(report.skipped_lines.is_empty());
    assert_eq!(report.skipped_references, 0);

    assert_eq!(service.len(), 4);
    assert_eq!(service.prerequisites(2), &[1]);
    assert_eq!(service.prerequisites(3), &[1, 2]);
    assert!(service.prerequisites(4).is_empty());
}

#[test]
fn forward_references_resolve_in_second_pass() {
    // task 1 references task 2, which is defined later in the file
    let content = "\
1;Later;Course;2025-02-01;30;2;2
2;Earlier;Course;2025-01-01;30;2;
";
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, content);

    assert_eq!(report.tasks_loaded, 2);
    assert_eq!(report.dependencies_added, 1);
    assert_eq!(service.prerequisites(1), &[2]);
}

#[test]
fn malformed_lines_are_reported_and_skipped() {
    let content = "\
1;Good;Course;2025-01-10;90;2;
nonsense line
2;Bad date;Course;not-a-date;90;2;
3;Bad minutes;Course;2025-01-10;soon;2;
4;Too few fields;Course
5;Bad difficulty;Course;2025-01-10;90;9;
6;Zero minutes;Course;2025-01-10;0;2;
7;Also good;Course;2025-01-11;60;3;1
";
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, content);

    assert_eq!(report.tasks_loaded, 2);
    assert_eq!(report.dependencies_added, 1);
    assert_eq!(report.skipped_lines.len(), 6);
    assert_eq!(report.skipped_lines[0].line, 2);

    assert!(service.task(1).is_some());
    assert!(service.task(7).is_some());
    assert!(service.task(2).is_none());
}

#[test]
fn unknown_prerequisite_ids_are_skipped_silently() {
    let content = "1;Solo;Course;2025-01-10;90;2;99,1\n";
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, content);

    assert_eq!(report.tasks_loaded, 1);
    assert_eq!(report.skipped_references, 1);
    // the 1 -> 1 self reference is known but rejected by the service
    assert_eq!(report.rejected_dependencies, 1);
    assert_eq!(report.dependencies_added, 0);
    assert!(service.prerequisites(1).is_empty());
}

#[test]
fn cyclic_file_dependencies_are_rejected_not_fatal() {
    let content = "\
1;A;Course;2025-01-01;30;2;2
2;B;Course;2025-01-02;30;2;1
";
    let mut service = TaskService::new();
    let report = load_from_str(&mut service, content);

    assert_eq!(report.tasks_loaded, 2);
    assert_eq!(report.dependencies_added, 1);
    assert_eq!(report.rejected_dependencies, 1);
}

#[test]
fn loads_from_a_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let mut service = TaskService::new();
    let report = load_from_path(&mut service, file.path()).unwrap();
    assert_eq!(report.tasks_loaded, 4);
}

#[test]
fn missing_file_is_a_typed_error() {
    let mut service = TaskService::new();
    let err = load_from_path(&mut service, Path::new("/no/such/tasks.txt")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}
