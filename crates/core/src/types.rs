//! Core data types for the vwap-bands workspace.

use chrono::{NaiveTime, TimeZone, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Price type with ordering support.
pub type Price = OrderedFloat<f64>;

/// Size/quantity type.
pub type Size = f64;

/// Extract the UTC time-of-day from a millisecond timestamp.
#[inline]
pub fn ts_to_time_of_day(ts_ms: TimestampMs) -> NaiveTime {
    Utc.timestamp_millis_opt(ts_ms)
        .single()
        .map(|dt| dt.time())
        .unwrap_or(NaiveTime::MIN)
}

/// Combine the calendar date of `anchor_ms` with a time-of-day.
#[inline]
pub fn date_at_time(anchor_ms: TimestampMs, tod: NaiveTime) -> TimestampMs {
    Utc.timestamp_millis_opt(anchor_ms)
        .single()
        .map(|dt| dt.date_naive().and_time(tod).and_utc().timestamp_millis())
        .unwrap_or(anchor_ms)
}

/// Aggregation period of the input bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarPeriod {
    Tick,
    Second,
    Minute,
    Volume,
    Range,
    Day,
    Week,
    Month,
    Year,
}

impl BarPeriod {
    /// The engine only operates on intraday series.
    #[inline]
    pub fn is_intraday(self) -> bool {
        !matches!(
            self,
            BarPeriod::Day | BarPeriod::Week | BarPeriod::Month | BarPeriod::Year
        )
    }
}

/// A single price/volume update from the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    /// Event timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Instrument price for the event.
    pub price: f64,
    /// Cumulative traded volume within the current bar.
    pub bar_volume: Size,
    /// First tick of the current bar.
    pub is_first_tick_of_bar: bool,
    /// First bar of a new trading session.
    pub is_first_bar_of_session: bool,
    /// Monotonically increasing bar index.
    pub bar_index: u64,
}

/// Session metadata supplied by the feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Actual session begin.
    pub actual_begin_ms: TimestampMs,
    /// Natural session end.
    pub actual_end_ms: TimestampMs,
}

/// Resolved accumulation window for one session, derived once from session
/// metadata and the configured start/end times-of-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Actual session begin from the feed.
    pub actual_begin_ms: TimestampMs,
    /// Configured start time-of-day (midnight = unset).
    pub configured_start: NaiveTime,
    /// Configured end time-of-day (midnight = unset).
    pub configured_end: NaiveTime,
    /// Session-begin date combined with the configured start.
    pub resolved_start_ms: TimestampMs,
    /// Session-begin date combined with the configured end; forced to the
    /// session's natural end when it would precede the start.
    pub resolved_end_ms: TimestampMs,
    /// Anchor accumulation to the session begin instead of the start time.
    pub use_session_begin: bool,
}

impl SessionWindow {
    /// Resolve the window from session metadata and configured times-of-day.
    pub fn resolve(meta: &SessionMeta, start: NaiveTime, end: NaiveTime) -> Self {
        let resolved_start_ms = date_at_time(meta.actual_begin_ms, start);
        let mut resolved_end_ms = date_at_time(meta.actual_begin_ms, end);

        // End before start is a defined correction, not an error.
        if resolved_end_ms < resolved_start_ms {
            resolved_end_ms = meta.actual_end_ms;
        }

        let use_session_begin =
            start == NaiveTime::MIN || start < ts_to_time_of_day(meta.actual_begin_ms);

        Self {
            actual_begin_ms: meta.actual_begin_ms,
            configured_start: start,
            configured_end: end,
            resolved_start_ms,
            resolved_end_ms,
            use_session_begin,
        }
    }

    /// Whether the event's time-of-day falls inside the window.
    ///
    /// Comparison is on times-of-day; a midnight resolved end leaves the
    /// upper bound open.
    pub fn contains(&self, ts_ms: TimestampMs) -> bool {
        let tod = ts_to_time_of_day(ts_ms);
        if tod < ts_to_time_of_day(self.resolved_start_ms) {
            return false;
        }
        let end_tod = ts_to_time_of_day(self.resolved_end_ms);
        end_tod == NaiveTime::MIN || tod <= end_tod
    }
}

/// One upper/lower band pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Band {
    pub upper: f64,
    pub lower: f64,
}

/// VWAP plus the projected dispersion bands for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSet {
    /// Current VWAP.
    pub vwap: f64,
    /// Current dispersion value.
    pub sd: f64,
    /// One entry per active band level, innermost first.
    pub levels: Vec<Band>,
}

/// Update cadence requested by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    /// Apply every update as it arrives.
    EveryTick,
    /// Treat intra-bar updates as provisional until the bar closes.
    BarClose,
}

/// Engine output for a single processed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineUpdate {
    /// Timestamp of the event that produced this update.
    pub ts_ms: TimestampMs,
    /// Current VWAP.
    pub vwap: f64,
    /// Dispersion bands; `None` when dispersion is disabled.
    pub bands: Option<BandSet>,
    /// Engine attached after session start and is estimating.
    pub estimated: bool,
    /// Cadence the host should apply when rendering this update.
    pub cadence: Cadence,
}

/// Feed-side queries the engine makes while processing an event.
pub trait FeedContext {
    /// Session metadata for the current trading day.
    fn session(&self) -> SessionMeta;

    /// Cumulative traded volume over all bars since the start of the current
    /// trading day, including the in-progress bar.
    fn day_volume(&self) -> Size;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    // 2024-01-02 09:30:00 UTC
    const SESSION_BEGIN: TimestampMs = 1704187800000;
    // 2024-01-02 16:00:00 UTC
    const SESSION_END: TimestampMs = 1704211200000;

    fn meta() -> SessionMeta {
        SessionMeta {
            actual_begin_ms: SESSION_BEGIN,
            actual_end_ms: SESSION_END,
        }
    }

    #[test]
    fn test_ts_to_time_of_day() {
        assert_eq!(ts_to_time_of_day(SESSION_BEGIN), hms(9, 30, 0));
        assert_eq!(ts_to_time_of_day(0), NaiveTime::MIN);
    }

    #[test]
    fn test_date_at_time() {
        let ts = date_at_time(SESSION_BEGIN, hms(10, 0, 0));
        assert_eq!(ts_to_time_of_day(ts), hms(10, 0, 0));
        // 30 minutes after session begin
        assert_eq!(ts, SESSION_BEGIN + 30 * 60_000);
    }

    #[test]
    fn test_bar_period_intraday() {
        assert!(BarPeriod::Minute.is_intraday());
        assert!(BarPeriod::Tick.is_intraday());
        assert!(BarPeriod::Volume.is_intraday());
        assert!(!BarPeriod::Day.is_intraday());
        assert!(!BarPeriod::Week.is_intraday());
        assert!(!BarPeriod::Month.is_intraday());
        assert!(!BarPeriod::Year.is_intraday());
    }

    #[test]
    fn test_window_resolve_basic() {
        let window = SessionWindow::resolve(&meta(), hms(10, 0, 0), hms(15, 0, 0));
        assert_eq!(window.resolved_start_ms, SESSION_BEGIN + 30 * 60_000);
        assert_eq!(
            window.resolved_end_ms,
            SESSION_BEGIN + (5 * 60 + 30) * 60_000
        );
        assert!(!window.use_session_begin);
    }

    #[test]
    fn test_window_end_before_start_uses_natural_end() {
        // End 08:00 precedes start 10:00: resolved to the natural session end.
        let window = SessionWindow::resolve(&meta(), hms(10, 0, 0), hms(8, 0, 0));
        assert_eq!(window.resolved_end_ms, SESSION_END);
        assert!(window.resolved_end_ms >= window.resolved_start_ms);
    }

    #[test]
    fn test_window_unset_start_uses_session_begin() {
        let window = SessionWindow::resolve(&meta(), NaiveTime::MIN, NaiveTime::MIN);
        assert!(window.use_session_begin);
    }

    #[test]
    fn test_window_early_start_uses_session_begin() {
        // Start 09:00 is earlier than the actual 09:30 session begin.
        let window = SessionWindow::resolve(&meta(), hms(9, 0, 0), hms(16, 0, 0));
        assert!(window.use_session_begin);
    }

    #[test]
    fn test_window_contains() {
        let window = SessionWindow::resolve(&meta(), hms(10, 0, 0), hms(15, 0, 0));
        assert!(!window.contains(SESSION_BEGIN)); // 09:30, before start
        assert!(window.contains(SESSION_BEGIN + 30 * 60_000)); // 10:00
        assert!(window.contains(SESSION_BEGIN + 3 * 3600_000)); // 12:30
        assert!(!window.contains(SESSION_END)); // 16:00, after end
    }

    #[test]
    fn test_window_midnight_end_is_open() {
        let window = SessionWindow::resolve(&meta(), NaiveTime::MIN, NaiveTime::MIN);
        assert_eq!(ts_to_time_of_day(window.resolved_end_ms), NaiveTime::MIN);
        assert!(window.contains(SESSION_END + 3600_000));
    }
}
