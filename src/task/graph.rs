use crate::task::types::TaskId;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Errors raised when a dependency edge is rejected.
///
/// Either way the graph is left exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("task {id} cannot depend on itself")]
    SelfDependency { id: TaskId },

    #[error("dependency {prerequisite} -> {dependent} would create a cycle")]
    CycleDetected {
        prerequisite: TaskId,
        dependent: TaskId,
    },
}

/// Directed graph of task dependencies. Edge: prerequisite -> dependent.
///
/// The forward and reverse adjacency maps are kept as exact transposes of
/// each other, and the graph is never left in a cyclic state: every edge
/// insertion runs a full cycle check and rolls back on detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// prerequisite -> tasks that depend on it
    dependents: HashMap<TaskId, Vec<TaskId>>,
    /// dependent -> its direct prerequisites
    prerequisites: HashMap<TaskId, Vec<TaskId>>,
}

/// DFS node state. Unvisited vertices are absent from the color map.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    /// On the current recursion path.
    Gray,
    /// Fully explored.
    Black,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a task has adjacency entries. Idempotent.
    pub fn add_vertex(&mut self, id: TaskId) {
        self.dependents.entry(id).or_default();
        self.prerequisites.entry(id).or_default();
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.dependents.contains_key(&id)
    }

    /// Add the edge `prerequisite -> dependent`, all-or-nothing.
    ///
    /// The edge is inserted tentatively and rolled back if the full cycle
    /// check finds the graph would no longer be a DAG. Running the O(V+E)
    /// check on every insertion is a deliberate tradeoff: task sets are
    /// small and the graph must never be observably cyclic.
    pub fn add_edge(&mut self, prerequisite: TaskId, dependent: TaskId) -> Result<(), GraphError> {
        if prerequisite == dependent {
            return Err(GraphError::SelfDependency { id: prerequisite });
        }

        self.add_vertex(prerequisite);
        self.add_vertex(dependent);

        self.dependents
            .entry(prerequisite)
            .or_default()
            .push(dependent);
        self.prerequisites
            .entry(dependent)
            .or_default()
            .push(prerequisite);

        if self.has_cycle() {
            // rollback the tentative edge
            if let Some(d) = self.dependents.get_mut(&prerequisite) {
                d.retain(|&t| t != dependent);
            }
            if let Some(p) = self.prerequisites.get_mut(&dependent) {
                p.retain(|&t| t != prerequisite);
            }

            return Err(GraphError::CycleDetected {
                prerequisite,
                dependent,
            });
        }

        debug!(prerequisite, dependent, "dependency edge added");
        Ok(())
    }

    /// Remove a vertex and every edge touching it from both mappings.
    ///
    /// Returns the pruned `(prerequisites, dependents)` so callers can record
    /// them for undo.
    pub fn remove_vertex(&mut self, id: TaskId) -> (Vec<TaskId>, Vec<TaskId>) {
        let prerequisites = self.prerequisites.remove(&id).unwrap_or_default();
        let dependents = self.dependents.remove(&id).unwrap_or_default();

        for &p in &prerequisites {
            if let Some(d) = self.dependents.get_mut(&p) {
                d.retain(|&t| t != id);
            }
        }
        for &d in &dependents {
            if let Some(p) = self.prerequisites.get_mut(&d) {
                p.retain(|&t| t != id);
            }
        }

        (prerequisites, dependents)
    }

    /// Tasks directly depending on `id`, or empty for unknown ids.
    pub fn dependents(&self, id: TaskId) -> &[TaskId] {
        self.dependents.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Direct prerequisites of `id`, or empty for unknown ids.
    pub fn prerequisites(&self, id: TaskId) -> &[TaskId] {
        self.prerequisites.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Insert an edge without the cycle check, for exercising `has_cycle`
    /// against graphs `add_edge` would refuse to build.
    #[cfg(test)]
    pub(crate) fn add_edge_unchecked(&mut self, prerequisite: TaskId, dependent: TaskId) {
        self.dependents
            .entry(prerequisite)
            .or_default()
            .push(dependent);
        self.prerequisites
            .entry(dependent)
            .or_default()
            .push(prerequisite);
    }

    /// Full three-color DFS cycle check over all vertices.
    pub fn has_cycle(&self) -> bool {
        let mut colors: HashMap<TaskId, Color> = HashMap::new();

        self.dependents
            .keys()
            .any(|&v| self.dfs_cycle(v, &mut colors))
    }

    fn dfs_cycle(&self, v: TaskId, colors: &mut HashMap<TaskId, Color>) -> bool {
        match colors.get(&v) {
            // back edge onto the current path
            Some(Color::Gray) => return true,
            Some(Color::Black) => return false,
            None => {}
        }

        colors.insert(v, Color::Gray);
        for &next in self.dependents(v) {
            if self.dfs_cycle(next, colors) {
                return true;
            }
        }
        colors.insert(v, Color::Black);

        false
    }

    /// True iff every direct prerequisite of `id` is in `completed`.
    ///
    /// A task with no prerequisites (or one unknown to the graph) can always
    /// start. Only direct prerequisites are checked; transitive unlocking
    /// follows by induction on the DAG.
    pub fn can_start(&self, id: TaskId, completed: &HashSet<TaskId>) -> bool {
        self.prerequisites(id).iter().all(|p| completed.contains(p))
    }
}
