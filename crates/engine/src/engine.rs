//! Per-event orchestration.
//!
//! Wires the session tracker, volume delta reconstructor, VWAP accumulator,
//! dispersion estimator and band projector into one pipeline, and decides
//! per event whether output is authoritative or estimated.

use tracing::warn;
use vwap_core::{
    BarPeriod, Cadence, Clock, DispersionMode, EngineConfig, EngineUpdate, FeedContext,
    FeedEvent, Result, SessionWindow, TimestampMs,
};

use crate::accumulator::VwapAccumulator;
use crate::bands;
use crate::dispersion::Dispersion;
use crate::session::{SessionSignal, SessionTracker};
use crate::sink::{self, OutputSink};
use crate::volume::VolumeDelta;

/// Incremental VWAP and dispersion-band engine for one input series.
///
/// Events are processed strictly sequentially; the engine owns all of its
/// state and holds no locks.
pub struct VwapEngine {
    config: EngineConfig,
    period: BarPeriod,
    load_ts: TimestampMs,
    session: SessionTracker,
    volume: VolumeDelta,
    accumulator: VwapAccumulator,
    dispersion: Dispersion,
    estimated: bool,
}

impl VwapEngine {
    /// Create an engine for one input series.
    ///
    /// The load time is captured from `clock` once, here. A non-intraday
    /// `period` yields an engine that accepts events and emits nothing.
    pub fn new(config: EngineConfig, period: BarPeriod, clock: &dyn Clock) -> Result<Self> {
        config.validate()?;
        if !period.is_intraday() {
            warn!(?period, "VWAP requires an intraday series; engine is inert");
        }

        Ok(Self {
            load_ts: clock.now_ms(),
            session: SessionTracker::new(),
            volume: VolumeDelta::new(),
            accumulator: VwapAccumulator::new(),
            dispersion: Dispersion::new(config.dispersion_mode),
            estimated: true,
            config,
            period,
        })
    }

    /// Process one feed event.
    ///
    /// Returns `None` for events outside the accumulation window and for
    /// non-intraday series.
    pub fn on_event(&mut self, event: &FeedEvent, ctx: &dyn FeedContext) -> Option<EngineUpdate> {
        if !self.period.is_intraday() {
            return None;
        }

        if self.session.window().is_none() {
            self.session.resolve_window(&ctx.session(), &self.config.window);
        }

        // The previous-bar timestamp advances even for filtered events.
        self.session.observe(event);

        if !self.session.in_window(event.ts_ms) {
            return None;
        }

        match self.session.check(event, self.load_ts) {
            SessionSignal::Reset => {
                self.estimated = false;
                self.accumulator.clear();
                self.dispersion.clear();
            }
            SessionSignal::Attach { estimated } => self.estimated = estimated,
            SessionSignal::None => {}
        }

        let tick_volume = self.volume.delta(event);
        let vwap = self.accumulator.update(event.price, tick_volume);

        let bands = if self.config.show_dispersion {
            let day_volume = match self.dispersion {
                Dispersion::Vwap(_) => ctx.day_volume(),
                Dispersion::AvgVwap(_) => 0.0,
            };
            let sd = self
                .dispersion
                .update(vwap, event.price, tick_volume, day_volume);
            Some(bands::project(vwap, sd, &self.config.bands))
        } else {
            None
        };

        Some(EngineUpdate {
            ts_ms: event.ts_ms,
            vwap,
            bands,
            estimated: self.estimated,
            cadence: self.cadence(),
        })
    }

    /// Process one event and forward any output to a sink.
    pub fn process(
        &mut self,
        event: &FeedEvent,
        ctx: &dyn FeedContext,
        sink: &mut dyn OutputSink,
    ) -> Option<EngineUpdate> {
        let update = self.on_event(event, ctx)?;
        sink::emit(&update, self.config.show_warning, sink);
        Some(update)
    }

    /// Cadence for the current mode combination: estimating in AvgVWAP
    /// mode batches display to bar close, everything else updates per tick.
    fn cadence(&self) -> Cadence {
        if self.estimated && self.config.dispersion_mode == DispersionMode::AvgVwap {
            Cadence::BarClose
        } else {
            Cadence::EveryTick
        }
    }

    /// Engine attached after session start and is estimating.
    pub fn is_estimated(&self) -> bool {
        self.estimated
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolved accumulation window, once the first event has been seen.
    pub fn window(&self) -> Option<&SessionWindow> {
        self.session.window()
    }
}
