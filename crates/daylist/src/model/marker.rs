use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Completion classification of a calendar day, used by the date-selection
/// widget to color day cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayMarker {
    /// No tasks scoped to the day.
    None,
    /// Fewer than half of the day's tasks are complete.
    Low,
    /// At least half, but not all, of the day's tasks are complete.
    Medium,
    /// Every task scoped to the day is complete.
    Complete,
}

impl DayMarker {
    /// Classify a day from its completed/total task counts.
    ///
    /// The boundaries are exact count ratios, not rounded percentages:
    /// exactly 50% is `Medium` and only completed == total is `Complete`.
    #[must_use]
    pub const fn classify(completed: usize, total: usize) -> Self {
        if total == 0 {
            Self::None
        } else if completed == total {
            Self::Complete
        } else if completed * 2 >= total {
            Self::Medium
        } else {
            Self::Low
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for DayMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a marker value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMarkerError {
    pub got: String,
}

impl fmt::Display for ParseMarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid day marker: '{}'", self.got)
    }
}

impl std::error::Error for ParseMarkerError {}

impl FromStr for DayMarker {
    type Err = ParseMarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "complete" => Ok(Self::Complete),
            _ => Err(ParseMarkerError { got: s.to_string() }),
        }
    }
}
