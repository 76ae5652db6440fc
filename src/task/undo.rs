use crate::task::types::{Task, TaskId, TaskStatus};

/// One reversible mutation, tagged by kind.
///
/// Exactly one entry is produced per mutating service call. Dependency edges
/// added through `add_dependency` are not logged and cannot be undone.
#[derive(Debug, Clone)]
pub enum UndoAction {
    /// Undo by removing the added task again.
    AddTask { id: TaskId },
    /// Undo by restoring the removed task along with the dependency edges
    /// that were pruned with it.
    DeleteTask {
        task: Task,
        prerequisites: Vec<TaskId>,
        dependents: Vec<TaskId>,
    },
    /// Undo by restoring the previous status.
    UpdateStatus { id: TaskId, previous: TaskStatus },
    /// Undo by restoring the full attribute snapshot taken before the edit.
    UpdateDetails { id: TaskId, snapshot: Task },
}

/// Unbounded LIFO log of undoable actions.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    entries: Vec<UndoAction>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: UndoAction) {
        self.entries.push(action);
    }

    /// Remove and return the most recent action, or `None` when empty.
    pub fn pop(&mut self) -> Option<UndoAction> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&UndoAction> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
