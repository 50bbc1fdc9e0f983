//! Schedule data structures.

use serde::{Deserialize, Serialize};

/// A normalized schedule event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEvent {
    /// Record identifier
    pub id: String,

    /// Event title
    pub title: String,

    /// Event date (ISO string, may be empty)
    pub date: String,

    /// Event end date when the source date is a range, else empty
    pub end_date: String,

    /// Event kind from the source's select field, surfaced as description
    pub description: String,

    /// Always empty; the source collection has no location field
    pub location: String,

    /// Event instant is at or after the classification pass's reference
    /// instant. Both flags are false when `date` is empty.
    pub is_upcoming: bool,

    /// Event instant is before the reference instant
    pub is_past: bool,
}

/// Future events split into the single next event and the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FutureSchedule {
    /// Earliest event on or after today, if any
    pub next_event: Option<ScheduleEvent>,

    /// Remaining future events in ascending date order
    pub upcoming_events: Vec<ScheduleEvent>,
}

/// Past events for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthGroup {
    /// Month key in YYYY-MM format
    pub month: String,

    /// Human-readable month label (Japanese locale)
    pub label: String,

    /// Events in the order received (descending date)
    pub events: Vec<ScheduleEvent>,
}
