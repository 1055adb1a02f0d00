//! Task records and day-marker classification.

pub mod marker;
pub mod task;

pub use marker::DayMarker;
pub use task::{Task, TaskId};
