//! Date-scoped view projection.
//!
//! Pure queries over a store snapshot: no caching and no incremental
//! update, cheap enough to recompute on every render. Dates compare
//! structurally (year/month/day), never through locale-formatted strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::marker::DayMarker;
use crate::model::task::Task;
use crate::store::TaskStore;

/// The derived view for one reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    /// Tasks scoped to the reference date, store order preserved.
    pub tasks: Vec<Task>,
    /// Rounded completion percentage over `tasks`, `0` when empty.
    pub percent: u8,
    /// Marker classification for the reference date.
    pub marker: DayMarker,
}

/// Project the store onto a reference date.
#[must_use]
pub fn day_view(store: &TaskStore, date: NaiveDate) -> DayView {
    let tasks: Vec<Task> = store
        .tasks()
        .iter()
        .filter(|task| task.date == Some(date))
        .cloned()
        .collect();
    let completed = tasks.iter().filter(|task| task.is_complete).count();

    DayView {
        percent: completion_percent(completed, tasks.len()),
        marker: DayMarker::classify(completed, tasks.len()),
        tasks,
    }
}

/// Marker classification for a single date, without materializing the view.
#[must_use]
pub fn marker_for(store: &TaskStore, date: NaiveDate) -> DayMarker {
    let (completed, total) = count_for(store, date);
    DayMarker::classify(completed, total)
}

/// One marker per distinct dated day, for calendar highlighting.
///
/// Undated tasks contribute to no day. Days without tasks are absent from
/// the map, which is the `none` classification.
#[must_use]
pub fn markers(store: &TaskStore) -> BTreeMap<NaiveDate, DayMarker> {
    let mut counts: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for task in store.tasks() {
        let Some(date) = task.date else { continue };
        let entry = counts.entry(date).or_default();
        entry.1 += 1;
        if task.is_complete {
            entry.0 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(date, (completed, total))| (date, DayMarker::classify(completed, total)))
        .collect()
}

/// Rounded completion percentage, `0` for an empty set.
///
/// Round-half-up integer arithmetic; the result is always in `0..=100`.
#[must_use]
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

fn count_for(store: &TaskStore, date: NaiveDate) -> (usize, usize) {
    store
        .tasks()
        .iter()
        .filter(|task| task.date == Some(date))
        .fold((0, 0), |(completed, total), task| {
            (completed + usize::from(task.is_complete), total + 1)
        })
}

#[cfg(test)]
mod tests {
    use super::{completion_percent, day_view, marker_for, markers};
    use crate::model::marker::DayMarker;
    use crate::store::TaskStore;
    use crate::storage::MemorySlot;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two tasks on Jan 1 (one complete), one incomplete task on Jan 2.
    fn example_store() -> TaskStore {
        let mut store = TaskStore::open(Box::new(MemorySlot::new()));
        let first = store.add("one", Some(day(2024, 1, 1))).unwrap();
        store.add("two", Some(day(2024, 1, 1))).unwrap();
        store.add("three", Some(day(2024, 1, 2))).unwrap();
        store.toggle(first);
        store
    }

    #[test]
    fn filters_to_reference_date_preserving_order() {
        let store = example_store();
        let view = day_view(&store, day(2024, 1, 1));

        let texts: Vec<_> = view.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(view.percent, 50);
        assert_eq!(view.marker, DayMarker::Medium);
    }

    #[test]
    fn empty_day_yields_zero_percent_and_none() {
        let store = example_store();
        let view = day_view(&store, day(2024, 2, 14));

        assert!(view.tasks.is_empty());
        assert_eq!(view.percent, 0);
        assert_eq!(view.marker, DayMarker::None);
    }

    #[test]
    fn all_complete_day_yields_hundred_and_complete() {
        let mut store = TaskStore::open(Box::new(MemorySlot::new()));
        let a = store.add("a", Some(day(2024, 1, 1))).unwrap();
        let b = store.add("b", Some(day(2024, 1, 1))).unwrap();
        store.toggle(a);
        store.toggle(b);

        let view = day_view(&store, day(2024, 1, 1));
        assert_eq!(view.percent, 100);
        assert_eq!(view.marker, DayMarker::Complete);
    }

    #[test]
    fn undated_tasks_are_invisible_to_every_day() {
        let mut store = TaskStore::open(Box::new(MemorySlot::new()));
        store.add("floating", None).unwrap();

        assert!(day_view(&store, day(2024, 1, 1)).tasks.is_empty());
        assert!(markers(&store).is_empty());
    }

    #[test]
    fn marker_for_matches_day_view() {
        let store = example_store();
        assert_eq!(marker_for(&store, day(2024, 1, 1)), DayMarker::Medium);
        assert_eq!(marker_for(&store, day(2024, 1, 2)), DayMarker::Low);
        assert_eq!(marker_for(&store, day(2024, 1, 3)), DayMarker::None);
    }

    #[test]
    fn markers_cover_every_dated_day() {
        let mut store = TaskStore::open(Box::new(MemorySlot::new()));
        let a = store.add("a", Some(day(2024, 1, 1))).unwrap();
        store.add("b", Some(day(2024, 1, 1))).unwrap();
        let c = store.add("c", Some(day(2024, 1, 2))).unwrap();
        store.add("d", Some(day(2024, 1, 3))).unwrap();
        store.toggle(a);
        store.toggle(c);

        let map = markers(&store);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&day(2024, 1, 1)], DayMarker::Medium);
        assert_eq!(map[&day(2024, 1, 2)], DayMarker::Complete);
        assert_eq!(map[&day(2024, 1, 3)], DayMarker::Low);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(0, 3), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 2), 50);
        assert_eq!(completion_percent(5, 6), 83);
        assert_eq!(completion_percent(3, 3), 100);
    }
}
