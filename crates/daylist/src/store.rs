//! The session-owned task store.
//!
//! An ordered sequence of [`Task`], hydrated once from a [`StateSlot`] and
//! written back after every effective mutation. Persistence is
//! fire-and-forget: a failed write is logged and never fails the mutation,
//! and a missing or malformed slot hydrates as an empty store.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::model::task::{Task, TaskId};
use crate::projection::completion_percent;
use crate::storage::StateSlot;

pub struct TaskStore {
    tasks: Vec<Task>,
    slot: Box<dyn StateSlot>,
}

impl TaskStore {
    /// Open a store on a slot, hydrating whatever task sequence it holds.
    ///
    /// A missing key or unparseable payload yields an empty store; the
    /// presentation layer never sees a hydration failure.
    pub fn open(slot: Box<dyn StateSlot>) -> Self {
        let tasks = match slot.load() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Task>>(&payload) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(%err, "discarding malformed slot payload");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "slot unreadable, starting empty");
                Vec::new()
            }
        };

        debug!(count = tasks.len(), "store hydrated");
        Self { tasks, slot }
    }

    /// Append a new incomplete task scoped to `date`.
    ///
    /// The input is trimmed first; empty input is rejected without creating
    /// a task or touching the slot. Returns the fresh id on success.
    pub fn add(&mut self, text: &str, date: Option<NaiveDate>) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("rejected empty task text");
            return None;
        }

        let id = self.next_id();
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            is_complete: false,
            date,
        });
        debug!(%id, "task added");
        self.persist();
        Some(id)
    }

    /// Flip the completion flag of the matching task.
    ///
    /// An absent id is a benign no-op (the task may have been deleted by an
    /// earlier event in the same session), not an error.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!(%id, "toggle on unknown id ignored");
            return false;
        };

        task.is_complete = !task.is_complete;
        debug!(%id, complete = task.is_complete, "task toggled");
        self.persist();
        true
    }

    /// Remove the matching task, preserving the order of the rest.
    ///
    /// An absent id is a silent no-op.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!(%id, "delete on unknown id ignored");
            return false;
        };

        self.tasks.remove(index);
        debug!(%id, "task deleted");
        self.persist();
        true
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Completion percentage over the whole store, `0` when empty.
    #[must_use]
    pub fn progress(&self) -> u8 {
        let completed = self
            .tasks
            .iter()
            .filter(|task| task.is_complete)
            .count();
        completion_percent(completed, self.tasks.len())
    }

    /// Epoch milliseconds, bumped past the current maximum so two adds in
    /// the same millisecond still get distinct, increasing ids.
    fn next_id(&self) -> TaskId {
        let now = Utc::now().timestamp_millis();
        let floor = self
            .tasks
            .iter()
            .map(|task| task.id.as_i64() + 1)
            .max()
            .unwrap_or(i64::MIN);
        TaskId::new(now.max(floor))
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "task sequence failed to serialize, slot left stale");
                return;
            }
        };

        if let Err(err) = self.slot.save(&payload) {
            warn!(%err, "slot write failed, continuing with in-memory state");
        }
    }
}
