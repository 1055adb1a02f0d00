use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a task within a store.
///
/// Time-derived (epoch milliseconds at creation) and bumped past the current
/// maximum when two tasks land in the same millisecond, so ids are strictly
/// increasing and never reused for the lifetime of the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
///
/// `text` is non-empty and trimmed after creation; empty input never
/// produces a task. `date` scopes the task to a calendar day and is absent
/// in the undated variant. Field names follow the persisted slot layout
/// (`isComplete`, ISO calendar date string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskId};
    use chrono::NaiveDate;

    #[test]
    fn task_serializes_to_slot_layout() {
        let task = Task {
            id: TaskId::new(1_704_067_200_000),
            text: "water the plants".to_string(),
            is_complete: false,
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            "{\"id\":1704067200000,\"text\":\"water the plants\",\
             \"isComplete\":false,\"date\":\"2024-01-01\"}"
        );
    }

    #[test]
    fn undated_task_omits_date_field() {
        let task = Task {
            id: TaskId::new(7),
            text: "stretch".to_string(),
            is_complete: true,
            date: None,
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("date"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn missing_is_complete_defaults_to_false() {
        let task: Task =
            serde_json::from_str("{\"id\":3,\"text\":\"call mom\"}").unwrap();
        assert_eq!(task.id, TaskId::new(3));
        assert!(!task.is_complete);
        assert!(task.date.is_none());
    }

    #[test]
    fn task_id_display_matches_raw_integer() {
        assert_eq!(TaskId::new(42).to_string(), "42");
        assert_eq!(TaskId::new(42).as_i64(), 42);
    }
}
