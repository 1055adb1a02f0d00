//! The UI session controller.
//!
//! Owns the store and the reference date on behalf of a single
//! presentation layer. State is never ambient: the presentation layer holds
//! a `Session` and registers observers instead of watching globals.
//! Every effective mutation, and every reference-date change, recomputes
//! the projection and pushes it to observers; no-ops stay silent.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::model::marker::DayMarker;
use crate::model::task::TaskId;
use crate::projection::{self, DayView};
use crate::storage::StateSlot;
use crate::store::TaskStore;

type Observer = Box<dyn FnMut(&DayView)>;

pub struct Session {
    store: TaskStore,
    reference_date: NaiveDate,
    observers: Vec<Observer>,
}

impl Session {
    /// Start a session on a slot, hydrating the store it holds.
    pub fn open(slot: Box<dyn StateSlot>, reference_date: NaiveDate) -> Self {
        Self {
            store: TaskStore::open(slot),
            reference_date,
            observers: Vec::new(),
        }
    }

    /// Register a redraw callback, invoked with the fresh projection after
    /// every effective mutation or reference-date change.
    pub fn observe(&mut self, observer: impl FnMut(&DayView) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add a task scoped to the current reference date.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let id = self.store.add(text, Some(self.reference_date));
        if id.is_some() {
            self.notify();
        }
        id
    }

    pub fn toggle(&mut self, id: TaskId) -> bool {
        let changed = self.store.toggle(id);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        let changed = self.store.delete(id);
        if changed {
            self.notify();
        }
        changed
    }

    /// Move the session to another day. The store is untouched; only the
    /// projection changes.
    pub fn set_reference_date(&mut self, date: NaiveDate) {
        if self.reference_date == date {
            return;
        }
        debug!(%date, "reference date changed");
        self.reference_date = date;
        self.notify();
    }

    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// The projection for the current reference date.
    #[must_use]
    pub fn view(&self) -> DayView {
        projection::day_view(&self.store, self.reference_date)
    }

    /// Marker for an arbitrary date, for the date-selection widget.
    #[must_use]
    pub fn marker_for(&self, date: NaiveDate) -> DayMarker {
        projection::marker_for(&self.store, date)
    }

    /// Markers for every dated day in the store.
    #[must_use]
    pub fn markers(&self) -> BTreeMap<NaiveDate, DayMarker> {
        projection::markers(&self.store)
    }

    #[must_use]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    fn notify(&mut self) {
        let view = projection::day_view(&self.store, self.reference_date);
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}
