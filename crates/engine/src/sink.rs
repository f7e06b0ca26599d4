//! Output sink interface.
//!
//! Named numeric channels plus the accuracy-warning overlay, matching the
//! plots the charting host registers for the indicator.

use std::collections::BTreeMap;

use vwap_core::{EngineUpdate, TimestampMs};

/// VWAP line channel.
pub const VWAP_CHANNEL: &str = "VWAP";

/// Upper/lower channel names per band level, innermost first.
pub const BAND_CHANNELS: [(&str, &str); 3] = [
    ("SD1 Upper", "SD1 Lower"),
    ("SD2 Upper", "SD2 Lower"),
    ("SD3 Upper", "SD3 Lower"),
];

/// Accuracy warning shown while the engine estimates.
pub const WARNING_TEXT: &str = "VWAP is most accurate when loaded before market start. \
The current VWAP values displayed are estimates.";

/// Receives engine output.
pub trait OutputSink {
    /// Write one value to a named channel.
    fn plot(&mut self, channel: &'static str, ts_ms: TimestampMs, value: f64);

    /// Render the accuracy-warning overlay.
    fn show_warning(&mut self, text: &str);

    /// Remove the accuracy-warning overlay.
    fn clear_warning(&mut self);
}

/// Forward one engine update to a sink.
///
/// Band levels beyond the configured count are never written. The warning
/// overlay tracks the estimated flag while `warn_enabled`.
pub fn emit(update: &EngineUpdate, warn_enabled: bool, sink: &mut dyn OutputSink) {
    sink.plot(VWAP_CHANNEL, update.ts_ms, update.vwap);

    if let Some(bands) = &update.bands {
        for (band, (upper_name, lower_name)) in bands.levels.iter().zip(BAND_CHANNELS) {
            sink.plot(upper_name, update.ts_ms, band.upper);
            sink.plot(lower_name, update.ts_ms, band.lower);
        }
    }

    if update.estimated && warn_enabled {
        sink.show_warning(WARNING_TEXT);
    } else {
        sink.clear_warning();
    }
}

/// In-memory sink recording per-channel series, for tests and capture.
#[derive(Debug, Default)]
pub struct MemorySink {
    channels: BTreeMap<&'static str, Vec<(TimestampMs, f64)>>,
    warning: Option<String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full series recorded for a channel.
    pub fn series(&self, channel: &str) -> &[(TimestampMs, f64)] {
        self.channels
            .get(channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Latest value recorded for a channel.
    pub fn last(&self, channel: &str) -> Option<f64> {
        self.channels
            .get(channel)
            .and_then(|series| series.last())
            .map(|&(_, value)| value)
    }

    /// Currently displayed warning, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

impl OutputSink for MemorySink {
    fn plot(&mut self, channel: &'static str, ts_ms: TimestampMs, value: f64) {
        self.channels.entry(channel).or_default().push((ts_ms, value));
    }

    fn show_warning(&mut self, text: &str) {
        self.warning = Some(text.to_string());
    }

    fn clear_warning(&mut self) {
        self.warning = None;
    }
}
