//! Work-time accounting
//!
//! Work time is accrued in whole seconds. Partial seconds are dropped at every
//! accrual point, so 999ms of activity contributes nothing.

use chrono::{DateTime, Utc};

use super::todo::{Todo, WorkState};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Whole seconds elapsed between two instants, floored.
///
/// A `now` earlier than `since` yields 0.
pub fn elapsed_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - since).num_milliseconds().max(0);
    (millis / 1000) as u64
}

/// Accumulated work time plus the running stretch if the todo is active.
///
/// The running stretch is computed on the fly and never persisted.
pub fn current_work_time(todo: &Todo, now: DateTime<Utc>) -> u64 {
    let running = match (todo.work_state, todo.last_state_change_at) {
        (WorkState::Active, Some(since)) => elapsed_seconds(since, now),
        _ => 0,
    };
    todo.total_work_time.saturating_add(running)
}

/// Renders a duration compactly.
///
/// - `0` renders as `0s`
/// - with hours, minutes are always shown and seconds dropped: `1h 0m`, `2h 5m`
/// - without hours, minutes appear when nonzero and seconds when nonzero or
///   when nothing else was printed: `1m 30s`, `2m`, `45s`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        return format!("{}h {}m", hours, minutes);
    }

    let mut parts = Vec::with_capacity(2);
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || minutes == 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
