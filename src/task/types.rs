use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for tasks.
///
/// Ids are small sequential integers assigned by the service (or by a sample
/// data file) and are never reused, even after a task is deleted.
pub type TaskId = u32;

/// A single unit of work tracked by the planner.
///
/// The id is the task's identity: two `Task` values compare equal iff their
/// ids match, regardless of attribute values. Every other field may change
/// in place, but only through [`TaskService`](super::service::TaskService).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub course: String,
    /// Calendar due date, no time component. Tasks without a due date sort
    /// after all dated tasks in every ordering.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in minutes, always positive.
    pub estimated_minutes: u32,
    /// Difficulty rating, 1 (easy) to 5 (hard) inclusive.
    pub difficulty: u8,
    pub status: TaskStatus,
}

/// Lifecycle status of a task.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet done; eligible for recommendation.
    Planned,
    /// Finished; excluded from recommendation and counted when checking
    /// whether dependents are unlocked.
    Completed,
}

/// Replacement attribute values accepted by
/// [`TaskService::update_details`](super::service::TaskService::update_details).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TaskDetails {
    pub title: String,
    pub course: String,
    pub due_date: Option<NaiveDate>,
    pub estimated_minutes: u32,
    pub difficulty: u8,
}

impl Task {
    /// Create a new task with status [`TaskStatus::Planned`].
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: Option<NaiveDate>,
        estimated_minutes: u32,
        difficulty: u8,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            course: course.into(),
            due_date,
            estimated_minutes,
            difficulty,
            status: TaskStatus::Planned,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Overwrite every editable attribute except id and status.
    pub fn apply_details(&mut self, details: TaskDetails) {
        self.title = details.title;
        self.course = details.course;
        self.due_date = details.due_date;
        self.estimated_minutes = details.estimated_minutes;
        self.difficulty = details.difficulty;
    }
}

// Container membership is by identity, not by attribute value.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.due_date {
            Some(due) => write!(f, "{} ({}) - due {}", self.title, self.course, due),
            None => write!(f, "{} ({}) - no due date", self.title, self.course),
        }
    }
}
