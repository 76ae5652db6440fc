//! # SmartTime
//!
//! Single-user task scheduling engine: work items carry due dates, effort
//! estimates and a difficulty rating; prerequisite edges enforce completion
//! order; a priority heap drives recommendation; and every mutation is
//! reversible through an undo log.
//!
//! ## Architecture Overview
//!
//! - **[`task`]**: the in-memory core. A dependency graph with online cycle
//!   rejection, an array-backed min-heap, a multi-key sorter and an undo
//!   stack, coordinated by [`TaskService`] — the sole mutation gateway.
//! - **[`loader`]**: two-pass parser for the semicolon-separated sample
//!   data format, feeding `TaskService` in bulk.
//!
//! The core is single-threaded and synchronous: every operation runs to
//! completion with no internal I/O or blocking. In a threaded host, treat
//! the whole service as one critical section.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use smarttime::TaskService;
//!
//! let mut service = TaskService::new();
//! let reading = service.create_task(
//!     "Read chapter 4",
//!     "Algorithms",
//!     NaiveDate::from_ymd_opt(2025, 1, 10),
//!     90,
//!     2,
//! );
//! let essay = service.create_task(
//!     "Write essay",
//!     "Algorithms",
//!     NaiveDate::from_ymd_opt(2025, 1, 12),
//!     180,
//!     4,
//! );
//! service.add_dependency(reading, essay).unwrap();
//!
//! assert!(!service.is_unlocked(essay));
//! service.mark_completed(reading).unwrap();
//! assert!(service.is_unlocked(essay));
//!
//! service.undo_last();
//! assert!(!service.is_unlocked(essay));
//! ```

/// In-memory task model and its coordinating service.
///
/// Dependency graph, priority heap, sorter and undo stack, all owned and
/// synchronized by [`TaskService`].
pub mod task;

/// Bulk loading of the sample-data record format.
pub mod loader;

// Re-export the main model types
pub use task::{
    DependencyGraph, GraphError, HeapEntry, PriorityKey, ServiceError, Task, TaskDetails, TaskHeap,
    TaskId, TaskService, TaskStatus, UndoAction, UndoStack,
};

// Re-export the loader surface
pub use loader::{LoadError, LoadReport, load_from_path, load_from_str};
