use crate::task::types::{Task, TaskId};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Ordering key a task is scheduled under.
///
/// Smaller means more urgent: earlier due date first (tasks without a due
/// date last), then lower difficulty, then smaller estimated minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityKey {
    pub due_date: Option<NaiveDate>,
    pub difficulty: u8,
    pub estimated_minutes: u32,
}

impl PriorityKey {
    pub fn of(task: &Task) -> Self {
        Self {
            due_date: task.due_date,
            difficulty: task.difficulty,
            estimated_minutes: task.estimated_minutes,
        }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Option's derived order would put None first; due-less tasks must
        // sort after every dated task instead.
        let due = match (self.due_date, other.due_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        due.then_with(|| self.difficulty.cmp(&other.difficulty))
            .then_with(|| self.estimated_minutes.cmp(&other.estimated_minutes))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One heap slot: the task's identity plus the key it was inserted under.
///
/// Keys are copied at insertion time; the service rebuilds the heap whenever
/// ordering attributes change, so stored keys never go stale.
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub key: PriorityKey,
    pub id: TaskId,
}

/// Array-backed binary min-heap of tasks.
///
/// 0-indexed, children of `i` at `2i+1`/`2i+2`, parent at `(i-1)/2`. There is
/// no arbitrary-index removal or decrease-key: membership and key changes are
/// handled by rebuilding the whole heap from the authoritative task list,
/// trading O(n log n) rebuilds for not maintaining a position side table.
#[derive(Debug, Clone, Default)]
pub struct TaskHeap {
    entries: Vec<HeapEntry>,
}

impl TaskHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with a starting capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a task under its current ordering key. O(log n).
    pub fn insert(&mut self, task: &Task) {
        self.insert_entry(HeapEntry {
            key: PriorityKey::of(task),
            id: task.id,
        });
    }

    /// Insert a previously extracted entry back, keeping its original key.
    pub fn insert_entry(&mut self, entry: HeapEntry) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Root entry without removal. O(1).
    pub fn peek_min(&self) -> Option<&HeapEntry> {
        self.entries.first()
    }

    /// Remove and return the minimal entry, or `None` on an empty heap.
    pub fn extract_min(&mut self) -> Option<HeapEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        min
    }

    /// Drop all entries, used by the rebuild-on-mutation strategy.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sift_up(&mut self, index: usize) {
        let mut current = index;
        while current > 0 {
            let parent = (current - 1) / 2;
            if self.entries[current].key < self.entries[parent].key {
                self.entries.swap(current, parent);
                current = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, index: usize) {
        let mut current = index;
        loop {
            let left = 2 * current + 1;
            let right = 2 * current + 2;
            let mut smallest = current;

            if left < self.entries.len() && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < self.entries.len() && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }

            if smallest == current {
                break;
            }
            self.entries.swap(current, smallest);
            current = smallest;
        }
    }
}
