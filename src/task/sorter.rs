//! Deterministic multi-key orderings over task lists.
//!
//! Pure comparator functions plus an in-place quicksort (Lomuto partition)
//! driving them. Sorting never mutates task attributes, only their order.

use crate::task::types::Task;
use std::cmp::Ordering;

/// Default list ordering: due date ascending (missing dates last), then
/// difficulty, then estimated minutes, then title case-insensitively as the
/// final deterministic tie-break.
pub fn default_order(a: &Task, b: &Task) -> Ordering {
    by_due_date(a, b)
        .then_with(|| a.difficulty.cmp(&b.difficulty))
        .then_with(|| a.estimated_minutes.cmp(&b.estimated_minutes))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

/// Due date ascending, tasks without a due date last.
pub fn by_due_date(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Difficulty ascending.
pub fn by_difficulty(a: &Task, b: &Task) -> Ordering {
    a.difficulty.cmp(&b.difficulty)
}

/// Sort tasks in place under the given total ordering.
///
/// Quicksort with the Lomuto partition scheme (last element pivot). O(n log n)
/// expected; deterministic for equal inputs since the comparator chain only
/// leaves true title-ties unordered.
pub fn sort_tasks<F>(tasks: &mut [Task], cmp: &F)
where
    F: Fn(&Task, &Task) -> Ordering,
{
    if tasks.len() <= 1 {
        return;
    }

    let pivot = partition(tasks, cmp);
    let (lower, upper) = tasks.split_at_mut(pivot);
    sort_tasks(lower, cmp);
    sort_tasks(&mut upper[1..], cmp);
}

/// Lomuto partition: elements <= pivot end up left of the returned index.
fn partition<F>(tasks: &mut [Task], cmp: &F) -> usize
where
    F: Fn(&Task, &Task) -> Ordering,
{
    let high = tasks.len() - 1;
    let mut boundary = 0;

    for j in 0..high {
        if cmp(&tasks[j], &tasks[high]) != Ordering::Greater {
            tasks.swap(boundary, j);
            boundary += 1;
        }
    }
    tasks.swap(boundary, high);

    boundary
}
