//! Sample-data loader for the semicolon-separated task record format.
//!
//! One task per line:
//!
//! ```text
//! id;title;course;dueDate;minutes;difficulty;prereqIds
//! ```
//!
//! `dueDate` is an ISO calendar date, `prereqIds` an optional comma-separated
//! list of task ids. Blank lines and lines starting with `#` are skipped.
//! Malformed lines are reported and skipped without aborting the load, and
//! prerequisites are wired in a second pass so a prerequisite may be defined
//! before or after the line that references it.

use crate::task::{Task, TaskId, TaskService};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("sample data file '{path}' not found")]
    NotFound { path: PathBuf },

    #[error("IO error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of a bulk load: what went in and what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks_loaded: usize,
    pub dependencies_added: usize,
    /// Malformed lines, with 1-based line numbers and the parse failure.
    pub skipped_lines: Vec<SkippedLine>,
    /// Prerequisite references to ids that never resolved to a loaded task.
    pub skipped_references: usize,
    /// Dependency pairs the service rejected (self-dependency or cycle).
    pub rejected_dependencies: usize,
}

#[derive(Debug)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

struct ParsedRecord {
    task: Task,
    prerequisite_ids: Vec<TaskId>,
}

/// Load tasks from a file on disk into the service.
pub fn load_from_path(service: &mut TaskService, path: &Path) -> Result<LoadReport, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!(path = %path.display(), "loading sample data");
    Ok(load_from_str(service, &content))
}

/// Load tasks from already-read record text.
///
/// First pass parses records and adds every task; the second pass resolves
/// prerequisite ids and wires the dependency edges, silently skipping
/// references to ids that were never defined.
pub fn load_from_str(service: &mut TaskService, content: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(line = number + 1, %reason, "skipping malformed line");
                report.skipped_lines.push(SkippedLine {
                    line: number + 1,
                    reason,
                });
            }
        }
    }

    let known_ids: HashSet<TaskId> = records.iter().map(|r| r.task.id).collect();

    for record in &records {
        service.add_task(record.task.clone());
        report.tasks_loaded += 1;
    }

    // second pass: wire prerequisites by id
    for record in &records {
        let dependent = record.task.id;
        for &prerequisite in &record.prerequisite_ids {
            if !known_ids.contains(&prerequisite) {
                debug!(prerequisite, dependent, "skipping unknown prerequisite id");
                report.skipped_references += 1;
                continue;
            }
            match service.add_dependency(prerequisite, dependent) {
                Ok(()) => report.dependencies_added += 1,
                Err(e) => {
                    warn!(error = %e, "skipping rejected dependency");
                    report.rejected_dependencies += 1;
                }
            }
        }
    }

    info!(
        tasks = report.tasks_loaded,
        dependencies = report.dependencies_added,
        skipped = report.skipped_lines.len(),
        "sample data loaded"
    );
    report
}

fn parse_line(line: &str) -> Result<ParsedRecord, String> {
    let parts: Vec<&str> = line.split(';').collect();
    if parts.len() < 6 {
        return Err(format!("expected at least 6 fields, got {}", parts.len()));
    }

    let id: TaskId = parts[0]
        .trim()
        .parse()
        .map_err(|_| format!("invalid task id '{}'", parts[0].trim()))?;
    let title = parts[1].trim().to_string();
    let course = parts[2].trim().to_string();
    let due_date: NaiveDate = parts[3]
        .trim()
        .parse()
        .map_err(|_| format!("invalid due date '{}'", parts[3].trim()))?;
    let estimated_minutes: u32 = parts[4]
        .trim()
        .parse()
        .map_err(|_| format!("invalid minutes '{}'", parts[4].trim()))?;
    if estimated_minutes == 0 {
        return Err("estimated minutes must be positive".to_string());
    }
    let difficulty: u8 = parts[5]
        .trim()
        .parse()
        .map_err(|_| format!("invalid difficulty '{}'", parts[5].trim()))?;
    if !(1..=5).contains(&difficulty) {
        return Err(format!("difficulty {difficulty} out of range 1-5"));
    }

    let mut prerequisite_ids = Vec::new();
    if let Some(field) = parts.get(6) {
        for token in field.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let prereq: TaskId = token
                .parse()
                .map_err(|_| format!("invalid prerequisite id '{token}'"))?;
            prerequisite_ids.push(prereq);
        }
    }

    Ok(ParsedRecord {
        task: Task::new(
            id,
            title,
            course,
            Some(due_date),
            estimated_minutes,
            difficulty,
        ),
        prerequisite_ids,
    })
}

#[cfg(test)]
mod tests;
