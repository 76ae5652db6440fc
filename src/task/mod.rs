pub mod graph;
pub mod heap;
pub mod service;
pub mod sorter;
pub mod types;
pub mod undo;


pub use graph::*;
pub use heap::*;
pub use service::*;
pub use types::*;
pub use undo::*;
