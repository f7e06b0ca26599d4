//! Volume delta reconstruction.
//!
//! The feed reports cumulative traded volume per bar; the pipeline needs the
//! volume of each individual event.

use vwap_core::{FeedEvent, Size};

/// Reconstructs per-event traded volume from the cumulative bar counter.
#[derive(Debug, Clone, Default)]
pub struct VolumeDelta {
    prev_bar_index: Option<u64>,
    prev_cumulative: Size,
}

impl VolumeDelta {
    /// Create a reconstructor with no baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Traded volume for this event.
    ///
    /// A bar-index change without the first-tick flag is a replay artifact;
    /// the baseline restarts at zero. Negative deltas (feed corrections)
    /// pass through unclamped.
    pub fn delta(&mut self, event: &FeedEvent) -> Size {
        // Missing volume counts as zero.
        let cumulative = if event.bar_volume.is_finite() {
            event.bar_volume
        } else {
            0.0
        };

        let tick_volume = if event.is_first_tick_of_bar {
            cumulative
        } else if self.prev_bar_index == Some(event.bar_index) {
            cumulative - self.prev_cumulative
        } else {
            cumulative
        };

        self.prev_bar_index = Some(event.bar_index);
        self.prev_cumulative = cumulative;
        tick_volume
    }
}
