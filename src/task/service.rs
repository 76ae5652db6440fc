use crate::task::graph::{DependencyGraph, GraphError};
use crate::task::heap::TaskHeap;
use crate::task::sorter;
use crate::task::types::{Task, TaskDetails, TaskId, TaskStatus};
use crate::task::undo::{UndoAction, UndoStack};
use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by mutating service operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("unknown task id {0}")]
    UnknownTask(TaskId),

    #[error(transparent)]
    Dependency(#[from] GraphError),
}

/// The sole mutation gateway over the task model.
///
/// Owns the authoritative task list plus the three derived structures: the
/// dependency graph, the recommendation heap and the undo log. All four stay
/// private so every external mutation goes through here, which is what keeps
/// undo correct and the heap consistent with the list.
///
/// Every mutation is all-or-nothing: a rejected call leaves the list, graph,
/// heap and undo log untouched. After any successful mutation that changes
/// membership or ordering keys the heap is rebuilt from the list, the single
/// synchronization point between the two.
///
/// Single-threaded by design; in a threaded host wrap the whole service in
/// one mutual-exclusion boundary, including [`next_recommended`]
/// (which temporarily drains and refills the heap).
///
/// [`next_recommended`]: TaskService::next_recommended
#[derive(Debug)]
pub struct TaskService {
    tasks: Vec<Task>,
    heap: TaskHeap,
    graph: DependencyGraph,
    undo: UndoStack,
    next_id: TaskId,
}

impl Default for TaskService {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskService {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create an empty service with a heap capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(capacity),
            heap: TaskHeap::with_capacity(capacity),
            graph: DependencyGraph::new(),
            undo: UndoStack::new(),
            next_id: 1,
        }
    }

    /// Append a caller-built task to the model.
    ///
    /// Never fails for a well-formed task; id uniqueness is the caller's
    /// responsibility and duplicates are not rejected at this layer.
    pub fn add_task(&mut self, task: Task) {
        let id = task.id;
        self.next_id = self.next_id.max(id + 1);

        self.graph.add_vertex(id);
        self.heap.insert(&task);
        self.tasks.push(task);
        self.undo.push(UndoAction::AddTask { id });

        debug!(id, "task added");
    }

    /// Build and add a task with the next free id, returning that id.
    ///
    /// Ids are handed out by a monotone counter and never reused, even after
    /// deletions.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: Option<NaiveDate>,
        estimated_minutes: u32,
        difficulty: u8,
    ) -> TaskId {
        let id = self.next_id;
        self.add_task(Task::new(
            id,
            title,
            course,
            due_date,
            estimated_minutes,
            difficulty,
        ));
        id
    }

    /// Transition a task to `Completed`.
    ///
    /// Idempotent: completing an already completed task is a no-op and does
    /// not push an undo entry.
    pub fn mark_completed(&mut self, id: TaskId) -> Result<(), ServiceError> {
        let index = self.index_of(id).ok_or(ServiceError::UnknownTask(id))?;

        let previous = self.tasks[index].status;
        if previous == TaskStatus::Completed {
            return Ok(());
        }

        self.tasks[index].status = TaskStatus::Completed;
        self.undo.push(UndoAction::UpdateStatus { id, previous });
        self.rebuild_heap();

        info!(id, "task completed");
        Ok(())
    }

    /// Replace a task's editable attributes, snapshotting the prior values
    /// (including status) for undo.
    pub fn update_details(&mut self, id: TaskId, details: TaskDetails) -> Result<(), ServiceError> {
        let index = self.index_of(id).ok_or(ServiceError::UnknownTask(id))?;

        let snapshot = self.tasks[index].clone();
        self.tasks[index].apply_details(details);
        self.rebuild_heap();
        self.undo.push(UndoAction::UpdateDetails { id, snapshot });

        debug!(id, "task details updated");
        Ok(())
    }

    /// Remove a task from the model, pruning its graph vertex.
    ///
    /// The pruned edges travel in the undo entry so undoing the delete
    /// restores them.
    pub fn delete_task(&mut self, id: TaskId) -> Result<(), ServiceError> {
        let index = self.index_of(id).ok_or(ServiceError::UnknownTask(id))?;

        let task = self.tasks.remove(index);
        let (prerequisites, dependents) = self.graph.remove_vertex(id);
        self.rebuild_heap();
        self.undo.push(UndoAction::DeleteTask {
            task,
            prerequisites,
            dependents,
        });

        info!(id, "task deleted");
        Ok(())
    }

    /// Reverse the most recent undoable mutation.
    ///
    /// Returns false (and does nothing) when the undo log is empty. Strictly
    /// LIFO, one action per call, no redo.
    pub fn undo_last(&mut self) -> bool {
        let Some(action) = self.undo.pop() else {
            return false;
        };

        match action {
            UndoAction::AddTask { id } => {
                if let Some(index) = self.index_of(id) {
                    self.tasks.remove(index);
                }
                self.graph.remove_vertex(id);
                debug!(id, "undo: task add reverted");
            }
            UndoAction::DeleteTask {
                task,
                prerequisites,
                dependents,
            } => {
                let id = task.id;
                self.graph.add_vertex(id);
                self.tasks.push(task);
                self.restore_edges(id, &prerequisites, &dependents);
                debug!(id, "undo: task delete reverted");
            }
            UndoAction::UpdateStatus { id, previous } => {
                if let Some(index) = self.index_of(id) {
                    self.tasks[index].status = previous;
                }
                debug!(id, "undo: status change reverted");
            }
            UndoAction::UpdateDetails { id, snapshot } => {
                if let Some(index) = self.index_of(id) {
                    self.tasks[index] = snapshot;
                }
                debug!(id, "undo: details edit reverted");
            }
        }

        self.rebuild_heap();
        true
    }

    /// Re-attach the edges recorded with a deleted task.
    ///
    /// Edges whose other endpoint has since been deleted are dropped, and an
    /// edge that has become cyclic against dependencies added in the meantime
    /// is rejected by the graph as usual.
    fn restore_edges(&mut self, id: TaskId, prerequisites: &[TaskId], dependents: &[TaskId]) {
        for &p in prerequisites {
            if self.index_of(p).is_none() {
                continue;
            }
            if let Err(e) = self.graph.add_edge(p, id) {
                warn!(error = %e, "undo: dependency edge not restored");
            }
        }
        for &d in dependents {
            if self.index_of(d).is_none() {
                continue;
            }
            if let Err(e) = self.graph.add_edge(id, d) {
                warn!(error = %e, "undo: dependency edge not restored");
            }
        }
    }

    /// Record that `prerequisite` must be completed before `dependent`.
    ///
    /// Self-dependencies and cycle-forming edges are rejected with the graph
    /// left unchanged. Not undoable: dependency edges have no undo entry.
    pub fn add_dependency(
        &mut self,
        prerequisite: TaskId,
        dependent: TaskId,
    ) -> Result<(), ServiceError> {
        self.index_of(prerequisite)
            .ok_or(ServiceError::UnknownTask(prerequisite))?;
        self.index_of(dependent)
            .ok_or(ServiceError::UnknownTask(dependent))?;

        self.graph.add_edge(prerequisite, dependent)?;
        Ok(())
    }

    /// True iff every direct prerequisite of the task is completed.
    pub fn is_unlocked(&self, id: TaskId) -> bool {
        let completed: HashSet<TaskId> = self
            .tasks
            .iter()
            .filter(|t| t.is_completed())
            .map(|t| t.id)
            .collect();
        self.graph.can_start(id, &completed)
    }

    /// The live, non-completed task with the minimal scheduling key.
    ///
    /// Internally drains the heap past completed or no-longer-live entries,
    /// then reinserts everything it took out, so heap membership is unchanged
    /// from the caller's perspective. `None` when nothing is eligible.
    pub fn next_recommended(&mut self) -> Option<Task> {
        let mut buffer = Vec::new();
        let mut found = None;

        while let Some(entry) = self.heap.extract_min() {
            let live = self
                .index_of(entry.id)
                .map(|i| &self.tasks[i])
                .filter(|t| !t.is_completed());

            let candidate = live.cloned();
            buffer.push(entry);
            if let Some(task) = candidate {
                found = Some(task);
                break;
            }
        }

        for entry in buffer {
            self.heap.insert_entry(entry);
        }

        found
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.index_of(id).map(|i| &self.tasks[i])
    }

    /// Defensive copy of the authoritative list, insertion order.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Copy sorted by the default multi-key ordering.
    pub fn all_tasks_sorted(&self) -> Vec<Task> {
        let mut copy = self.tasks.clone();
        sorter::sort_tasks(&mut copy, &sorter::default_order);
        copy
    }

    /// Copy sorted by due date only, missing dates last.
    pub fn tasks_by_due_date(&self) -> Vec<Task> {
        let mut copy = self.tasks.clone();
        sorter::sort_tasks(&mut copy, &sorter::by_due_date);
        copy
    }

    /// Copy sorted by difficulty only.
    pub fn tasks_by_difficulty(&self) -> Vec<Task> {
        let mut copy = self.tasks.clone();
        sorter::sort_tasks(&mut copy, &sorter::by_difficulty);
        copy
    }

    /// Direct prerequisites of a task, empty for unknown ids.
    pub fn prerequisites(&self, id: TaskId) -> &[TaskId] {
        self.graph.prerequisites(id)
    }

    /// Tasks directly depending on this one, empty for unknown ids.
    pub fn dependents(&self, id: TaskId) -> &[TaskId] {
        self.graph.dependents(id)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Clear the heap and reinsert every authoritative task.
    fn rebuild_heap(&mut self) {
        self.heap.clear();
        for task in &self.tasks {
            self.heap.insert(task);
        }
    }
}
