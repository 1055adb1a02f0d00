//! daylist core library.
//!
//! An ordered, session-owned task store with key/value slot persistence and
//! a pure date-scoped view projection (filtered tasks, completion
//! percentage, day markers for calendar highlighting).
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums live next to the module that raises them;
//!   operations the presentation layer calls never fail, they degrade to a
//!   no-op or an empty store.
//! - **Logging**: Use `tracing` macros (`warn!` for swallowed persistence
//!   failures, `debug!` for mutations).

pub mod config;
pub mod model;
pub mod projection;
pub mod session;
pub mod storage;
pub mod store;

pub use config::{SessionConfig, StorageConfig};
pub use model::marker::DayMarker;
pub use model::task::{Task, TaskId};
pub use projection::{DayView, day_view, marker_for, markers};
pub use session::Session;
pub use storage::{FileSlot, MemorySlot, StateSlot};
pub use store::TaskStore;
