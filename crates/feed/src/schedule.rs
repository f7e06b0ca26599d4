//! Session schedule.
//!
//! Derives per-day session metadata from configured open/close
//! times-of-day.

use chrono::NaiveTime;
use vwap_core::{date_at_time, SessionMeta, TimestampMs};

/// Milliseconds per day.
const DAY_MS: i64 = 86_400_000;

/// Daily session template: an open and close time-of-day.
///
/// A close at or before the open rolls to the next calendar day
/// (overnight sessions).
#[derive(Debug, Clone, Copy)]
pub struct SessionSchedule {
    open: NaiveTime,
    close: NaiveTime,
}

impl SessionSchedule {
    /// Create a schedule from open/close times.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    /// A 24-hour session anchored at midnight.
    pub fn full_day() -> Self {
        Self {
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
        }
    }

    /// Session metadata for the calendar day containing `ts_ms`.
    pub fn session_for(&self, ts_ms: TimestampMs) -> SessionMeta {
        let actual_begin_ms = date_at_time(ts_ms, self.open);
        let mut actual_end_ms = date_at_time(ts_ms, self.close);
        if actual_end_ms <= actual_begin_ms {
            actual_end_ms += DAY_MS;
        }
        SessionMeta {
            actual_begin_ms,
            actual_end_ms,
        }
    }

    /// Whether `ts_ms` belongs to a later session than `prev_ts_ms`.
    pub fn is_new_session(&self, prev_ts_ms: TimestampMs, ts_ms: TimestampMs) -> bool {
        self.session_for(ts_ms).actual_begin_ms > self.session_for(prev_ts_ms).actual_begin_ms
    }
}
