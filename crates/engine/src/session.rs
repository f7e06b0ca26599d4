//! Session boundary tracking.
//!
//! Resolves the accumulation window once per engine lifetime, filters events
//! to it, and decides when a new session restarts accumulation.

use tracing::debug;
use vwap_core::{
    ts_to_time_of_day, FeedEvent, SessionMeta, SessionWindow, TimestampMs, WindowConfig,
};

/// Outcome of the per-event session check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// No boundary crossed.
    None,
    /// New session: accumulation restarts, mode is authoritative.
    Reset,
    /// One-shot load-time check: adopt the given estimation mode.
    Attach {
        /// The engine was attached after the event was produced.
        estimated: bool,
    },
}

/// Tracks session boundaries for one engine instance.
pub struct SessionTracker {
    window: Option<SessionWindow>,
    /// Timestamp of the last event of the previous bar.
    prev_bar_ts: Option<TimestampMs>,
    /// Bar currently being observed.
    current_bar_index: Option<u64>,
    /// Timestamp of the latest event in the current bar.
    current_bar_ts: Option<TimestampMs>,
    /// Load-time check still pending.
    time_check_armed: bool,
}

impl SessionTracker {
    /// Create a tracker with the load-time check armed.
    pub fn new() -> Self {
        Self {
            window: None,
            prev_bar_ts: None,
            current_bar_index: None,
            current_bar_ts: None,
            time_check_armed: true,
        }
    }

    /// Resolve the accumulation window from session metadata.
    ///
    /// Called once, on the lifetime-first event.
    pub fn resolve_window(&mut self, meta: &SessionMeta, config: &WindowConfig) {
        let window = SessionWindow::resolve(meta, config.start_time, config.end_time);
        debug!(
            start = window.resolved_start_ms,
            end = window.resolved_end_ms,
            use_session_begin = window.use_session_begin,
            "resolved session window"
        );
        self.window = Some(window);
    }

    /// The resolved window, if any event has been seen.
    pub fn window(&self) -> Option<&SessionWindow> {
        self.window.as_ref()
    }

    /// Observe a delivered event, in-window or not.
    ///
    /// The previous-bar timestamp feeds the start-crossing reset rule and
    /// must advance even for filtered events.
    pub fn observe(&mut self, event: &FeedEvent) {
        match self.current_bar_index {
            Some(index) if index == event.bar_index => {}
            _ => {
                self.prev_bar_ts = self.current_bar_ts;
                self.current_bar_index = Some(event.bar_index);
            }
        }
        self.current_bar_ts = Some(event.ts_ms);
    }

    /// Whether the event passes the hard window filter.
    pub fn in_window(&self, ts_ms: TimestampMs) -> bool {
        self.window.as_ref().is_some_and(|w| w.contains(ts_ms))
    }

    /// Session check for an in-window event.
    ///
    /// A reset fires once per session transition and re-arms the load-time
    /// check; otherwise the armed check runs once against `load_ts`.
    pub fn check(&mut self, event: &FeedEvent, load_ts: TimestampMs) -> SessionSignal {
        let Some(window) = self.window.as_ref() else {
            return SessionSignal::None;
        };

        if self.is_session_restart(event, window) {
            self.time_check_armed = true;
            debug!(bar = event.bar_index, ts = event.ts_ms, "session reset");
            return SessionSignal::Reset;
        }

        if self.time_check_armed {
            self.time_check_armed = false;
            let estimated = load_ts > event.ts_ms;
            if estimated {
                debug!(load_ts, ts = event.ts_ms, "attached mid-session, output is estimated");
            }
            return SessionSignal::Attach { estimated };
        }

        SessionSignal::None
    }

    fn is_session_restart(&self, event: &FeedEvent, window: &SessionWindow) -> bool {
        if window.use_session_begin {
            return event.is_first_bar_of_session && event.is_first_tick_of_bar;
        }
        if !event.is_first_tick_of_bar {
            return false;
        }
        // First tick of a bar that crosses the resolved start from below.
        let start_tod = ts_to_time_of_day(window.resolved_start_ms);
        match self.prev_bar_ts {
            Some(prev) => {
                ts_to_time_of_day(prev) < start_tod
                    && ts_to_time_of_day(event.ts_ms) >= start_tod
            }
            None => false,
        }
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
