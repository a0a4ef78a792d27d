//! Progress and deadline arithmetic for one objective.
//!
//! # Responsibility
//! - Derive percent complete, whole days remaining and the daily rate
//!   needed to finish on time.
//! - Provide the `Clock` seam that supplies "now".
//!
//! # Invariants
//! - `progress_percent` is always within `0..=100`.
//! - A target of `0` counts as complete.
//! - `days_remaining` never goes negative.

use crate::model::objective::Objective;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Source of the current local date-time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Percent complete, rounded to the nearest integer and clamped to 100.
pub fn progress_percent(objective: &Objective) -> u8 {
    if objective.total_progress == 0 {
        return 100;
    }
    let ratio = f64::from(objective.current_progress) / f64::from(objective.total_progress);
    (ratio * 100.0).round().min(100.0) as u8
}

/// Whole days until the start of `deadline`, rounded up.
///
/// Returns `None` when there is no deadline and `Some(0)` once it has passed.
pub fn days_remaining(deadline: Option<NaiveDate>, now: NaiveDateTime) -> Option<u32> {
    let deadline = deadline?;
    let seconds = (deadline.and_time(NaiveTime::default()) - now).num_seconds();
    if seconds <= 0 {
        return Some(0);
    }
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    Some(u32::try_from(days).unwrap_or(u32::MAX))
}

/// Percentage points per day needed to reach 100% by the deadline.
///
/// Returns `None` when there is no deadline or no day left.
pub fn daily_progress_needed(objective: &Objective, now: NaiveDateTime) -> Option<f64> {
    let days = days_remaining(objective.deadline, now).filter(|days| *days > 0)?;
    let left = f64::from(100 - progress_percent(objective));
    Some(round_to_hundredths(left / f64::from(days)))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
