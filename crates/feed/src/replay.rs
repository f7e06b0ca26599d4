//! Vector-backed replay feed.
//!
//! Builds the engine's event stream from recorded trades: assigns bar
//! indices from a fixed bar interval, maintains the cumulative per-bar
//! volume counter, and answers the day-to-date volume query.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vwap_core::{Error, FeedContext, FeedEvent, Result, SessionMeta, Size, TimestampMs};

use crate::schedule::SessionSchedule;

/// A raw trade print.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub size: Size,
}

/// Replays a recorded tick stream as feed events.
pub struct ReplayFeed {
    ticks: Vec<Tick>,
    cursor: usize,
    bar_interval_ms: i64,
    schedule: SessionSchedule,
    /// Bar slot of the event last produced.
    current_bar_slot: Option<i64>,
    /// Bar slot of the current session's first bar.
    session_first_bar_slot: Option<i64>,
    bar_index: u64,
    bar_volume: Size,
    session: Option<SessionMeta>,
    day_volume: Size,
}

impl ReplayFeed {
    /// Create a feed over a time-ordered tick stream.
    pub fn new(ticks: Vec<Tick>, bar_interval_ms: i64, schedule: SessionSchedule) -> Result<Self> {
        if bar_interval_ms <= 0 {
            return Err(Error::config("bar interval must be positive"));
        }
        if ticks.windows(2).any(|pair| pair[1].ts_ms < pair[0].ts_ms) {
            return Err(Error::data("ticks must be ordered by timestamp"));
        }

        Ok(Self {
            ticks,
            cursor: 0,
            bar_interval_ms,
            schedule,
            current_bar_slot: None,
            session_first_bar_slot: None,
            bar_index: 0,
            bar_volume: 0.0,
            session: None,
            day_volume: 0.0,
        })
    }

    /// Produce the next feed event, or `None` at end of stream.
    pub fn next_event(&mut self) -> Option<FeedEvent> {
        let tick = *self.ticks.get(self.cursor)?;
        self.cursor += 1;

        let session_begin = self.schedule.session_for(tick.ts_ms).actual_begin_ms;
        let new_session = self
            .session
            .map(|meta| meta.actual_begin_ms != session_begin)
            .unwrap_or(true);

        let bar_slot = tick.ts_ms.div_euclid(self.bar_interval_ms);
        if new_session {
            self.session = Some(self.schedule.session_for(tick.ts_ms));
            self.session_first_bar_slot = Some(bar_slot);
            self.day_volume = 0.0;
            debug!(session_begin, "session rollover");
        }

        let is_first_tick_of_bar = match self.current_bar_slot {
            Some(slot) if slot == bar_slot => false,
            Some(_) => {
                self.bar_index += 1;
                self.bar_volume = 0.0;
                true
            }
            None => true,
        };
        self.current_bar_slot = Some(bar_slot);

        self.bar_volume += tick.size;
        self.day_volume += tick.size;

        Some(FeedEvent {
            ts_ms: tick.ts_ms,
            price: tick.price,
            bar_volume: self.bar_volume,
            is_first_tick_of_bar,
            is_first_bar_of_session: self.session_first_bar_slot == Some(bar_slot),
            bar_index: self.bar_index,
        })
    }

    /// Number of ticks not yet replayed.
    pub fn remaining(&self) -> usize {
        self.ticks.len() - self.cursor
    }
}

impl FeedContext for ReplayFeed {
    fn session(&self) -> SessionMeta {
        self.session.unwrap_or_else(|| {
            let first_ts = self.ticks.first().map(|tick| tick.ts_ms).unwrap_or(0);
            self.schedule.session_for(first_ts)
        })
    }

    fn day_volume(&self) -> Size {
        self.day_volume
    }
}
