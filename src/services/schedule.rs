// src/services/schedule.rs

//! Schedule fetch service and time classification.
//!
//! Events are split around a reference instant captured once per pass, so a
//! single response is internally consistent. Date comparisons for the
//! past/future split use day granularity: an event today counts as future
//! regardless of time of day.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde_json::{Value, json};

use crate::extract;
use crate::models::{Config, FutureSchedule, MonthGroup, ScheduleEvent};
use crate::schema::schedule as fields;
use crate::store::{ContentStore, Query};

/// Service for fetching and classifying schedule events.
pub struct ScheduleService {
    store: Arc<dyn ContentStore>,
    collection: String,
    window_end: String,
    page_size: usize,
}

impl ScheduleService {
    /// Create a schedule service over the given store.
    pub fn new(store: Arc<dyn ContentStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.store.schedule_collection.clone(),
            window_end: config.schedule.window_end.clone(),
            page_size: config.schedule.page_size,
        }
    }

    /// Fetch future events split into next event and the remainder.
    ///
    /// Returns the empty shape on any store failure, so a store outage
    /// degrades the schedule section rather than the page.
    pub async fn fetch_future_schedule(&self) -> FutureSchedule {
        let now = Utc::now();
        let today = Local::now().date_naive();
        self.fetch_future_schedule_at(now, today).await
    }

    /// Same as [`fetch_future_schedule`](Self::fetch_future_schedule) with
    /// an injected reference instant.
    pub async fn fetch_future_schedule_at(
        &self,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> FutureSchedule {
        let today_str = today.format("%Y-%m-%d").to_string();

        // Bounded query window: today through the fixed cutoff. Strict
        // day-granularity filtering happens locally afterwards.
        let query = Query::new()
            .filter(json!({"and": [
                {"property": fields::VISIBILITY, "select": {"equals": fields::VISIBILITY_PUBLIC}},
                {"property": fields::DATE, "date": {"on_or_after": today_str}},
                {"property": fields::DATE, "date": {"on_or_before": self.window_end.clone()}}
            ]}))
            .sorts(json!([{"property": fields::DATE, "direction": "ascending"}]))
            .page_size(self.page_size);

        let records = match self.store.query(&self.collection, query).await {
            Ok(records) => records,
            Err(error) => {
                log::error!("Failed to fetch future schedule: {error}");
                return FutureSchedule::default();
            }
        };

        let events = records
            .iter()
            .map(|record| parse_event(record, now))
            .collect();
        split_future(events, today)
    }

    /// Fetch past events grouped by month, newest month first.
    ///
    /// Returns an empty list on any store failure.
    pub async fn fetch_past_events_by_month(&self) -> Vec<MonthGroup> {
        let now = Utc::now();
        let today = Local::now().date_naive();
        self.fetch_past_events_by_month_at(now, today).await
    }

    /// Same as [`fetch_past_events_by_month`](Self::fetch_past_events_by_month)
    /// with an injected reference instant.
    pub async fn fetch_past_events_by_month_at(
        &self,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Vec<MonthGroup> {
        let today_str = today.format("%Y-%m-%d").to_string();
        let before_today = json!({"property": fields::DATE, "date": {"before": today_str}});
        let sorts = json!([{"property": fields::DATE, "direction": "descending"}]);

        let filtered = Query::new()
            .filter(json!({"and": [
                {"property": fields::VISIBILITY, "select": {"equals": fields::VISIBILITY_PUBLIC}},
                before_today.clone()
            ]}))
            .sorts(sorts.clone());

        // Some exports lack the visibility property; retry without it.
        let records = match self.store.query(&self.collection, filtered).await {
            Ok(records) => records,
            Err(error) => {
                log::warn!("Past schedule query failed ({error}); retrying without visibility filter");
                let fallback = Query::new().filter(before_today).sorts(sorts);
                match self.store.query(&self.collection, fallback).await {
                    Ok(records) => records,
                    Err(error) => {
                        log::error!("Failed to fetch past schedule: {error}");
                        return Vec::new();
                    }
                }
            }
        };

        let events: Vec<ScheduleEvent> = records
            .iter()
            .map(|record| parse_event(record, now))
            .collect();
        group_past_by_month(&events)
    }
}

/// Map one raw record to a [`ScheduleEvent`].
///
/// The upcoming/past flags compare the event instant against `now`; both
/// stay false when the record has no date.
pub(crate) fn parse_event(record: &Value, now: DateTime<Utc>) -> ScheduleEvent {
    let date_prop = extract::property(record, fields::DATE).and_then(|p| p.get("date"));
    let date = date_prop
        .and_then(|d| d.get("start"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let end_date = date_prop
        .and_then(|d| d.get("end"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let instant = parse_instant(&date);
    ScheduleEvent {
        id: extract::record_id(record),
        title: extract::plain_text(
            extract::property(record, fields::TITLE).and_then(|p| p.get("title")),
        ),
        description: extract::select_name(extract::property(record, fields::KIND))
            .unwrap_or_default(),
        // The collection has no location field; kept for wire shape.
        location: String::new(),
        is_upcoming: instant.is_some_and(|t| t >= now),
        is_past: instant.is_some_and(|t| t < now),
        date,
        end_date,
    }
}

/// Parse an ISO date or datetime string to an instant.
///
/// Date-only values are taken as midnight UTC. Returns `None` for empty or
/// malformed input.
fn parse_instant(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Some(instant.with_timezone(&Utc));
    }
    let day: NaiveDate = date.parse().ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Calendar day of an event's date string, ignoring time of day.
fn event_day(date: &str) -> Option<NaiveDate> {
    date.get(..10)?.parse().ok()
}

/// Split events into the next event and the remaining upcoming ones.
///
/// Events sort ascending by date string with empty dates last (stable for
/// ties); events strictly before `today` at day granularity are dropped.
pub fn split_future(mut events: Vec<ScheduleEvent>, today: NaiveDate) -> FutureSchedule {
    events.sort_by(|a, b| match (a.date.is_empty(), b.date.is_empty()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.date.cmp(&b.date),
    });

    let mut future = events
        .into_iter()
        .filter(|event| event_day(&event.date).is_some_and(|day| day >= today));

    let next_event = future.next();
    FutureSchedule {
        next_event,
        upcoming_events: future.collect(),
    }
}

/// Group past events by calendar month, preserving first-seen group order.
///
/// Input arrives descending from the store, so groups come out newest month
/// first. Events with empty dates cannot be assigned a month and are
/// skipped.
pub fn group_past_by_month(events: &[ScheduleEvent]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for event in events {
        if event.date.is_empty() {
            continue;
        }
        let Some(month) = event.date.get(..7) else {
            continue;
        };
        match groups.iter_mut().find(|group| group.month == month) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(MonthGroup {
                month: month.to_string(),
                label: month_label(month),
                events: vec![event.clone()],
            }),
        }
    }
    groups
}

/// Japanese month label for a YYYY-MM key, e.g. "2026年1月".
fn month_label(month: &str) -> String {
    let parsed = month
        .split_once('-')
        .and_then(|(year, mon)| Some((year.parse::<i32>().ok()?, mon.parse::<u32>().ok()?)));
    match parsed {
        Some((year, mon)) => format!("{year}年{mon}月"),
        None => month.to_string(),
    }
}
