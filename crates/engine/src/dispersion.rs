//! Dispersion estimation.
//!
//! Two mutually exclusive algorithms, selected once at construction: the
//! population standard deviation of the VWAP series itself, or the
//! volume-weighted standard deviation of distinct traded price levels
//! around the current VWAP.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use vwap_core::{DispersionMode, Size};

/// Dispersion estimator selected by [`DispersionMode`].
#[derive(Debug)]
pub enum Dispersion {
    /// Standard deviation of the VWAP series.
    AvgVwap(VwapSeriesDeviation),
    /// Volume-weighted standard deviation of traded price levels.
    Vwap(PriceLevelDeviation),
}

impl Dispersion {
    /// Select the estimator for the configured mode.
    pub fn new(mode: DispersionMode) -> Self {
        match mode {
            DispersionMode::AvgVwap => Dispersion::AvgVwap(VwapSeriesDeviation::default()),
            DispersionMode::Vwap => Dispersion::Vwap(PriceLevelDeviation::default()),
        }
    }

    /// Fold one event and return the current dispersion.
    ///
    /// `day_volume` is the day-to-date traded volume from the feed; only the
    /// price-level estimator consumes it.
    pub fn update(&mut self, vwap: f64, price: f64, tick_volume: Size, day_volume: Size) -> f64 {
        match self {
            Dispersion::AvgVwap(est) => est.update(vwap),
            Dispersion::Vwap(est) => est.update(vwap, price, tick_volume, day_volume),
        }
    }

    /// Clear all accumulated state.
    pub fn clear(&mut self) {
        match self {
            Dispersion::AvgVwap(est) => est.clear(),
            Dispersion::Vwap(est) => est.clear(),
        }
    }
}

/// Population standard deviation of the VWAP series since the last reset.
#[derive(Debug, Clone, Default)]
pub struct VwapSeriesDeviation {
    history: Vec<f64>,
    sum: f64,
}

impl VwapSeriesDeviation {
    /// Append the current VWAP and recompute the deviation over the full
    /// history, so the result is deterministic for a replayed sequence.
    pub fn update(&mut self, vwap: f64) -> f64 {
        self.history.push(vwap);
        self.sum += vwap;

        let count = self.history.len() as f64;
        let mean = self.sum / count;
        let sq_sum: f64 = self.history.iter().map(|v| (v - mean).powi(2)).sum();

        // Rounding can push the sum a hair below zero.
        if sq_sum > 0.0 {
            (sq_sum / count).sqrt()
        } else {
            0.0
        }
    }

    /// Number of VWAP observations since the last reset.
    pub fn count(&self) -> usize {
        self.history.len()
    }

    /// Clear the history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.sum = 0.0;
    }
}

/// Volume-weighted standard deviation of distinct traded price levels.
///
/// Buckets are keyed by the exact feed price; quantization to the
/// instrument's tick size happens upstream.
#[derive(Debug, Clone, Default)]
pub struct PriceLevelDeviation {
    buckets: BTreeMap<OrderedFloat<f64>, Size>,
}

impl PriceLevelDeviation {
    /// Fold the event's volume into its price bucket and recompute the
    /// deviation, weighting each level by its share of `day_volume`.
    pub fn update(&mut self, vwap: f64, price: f64, tick_volume: Size, day_volume: Size) -> f64 {
        *self.buckets.entry(OrderedFloat(price)).or_insert(0.0) += tick_volume;

        let mut sq_sum = 0.0;
        if day_volume > 0.0 {
            for (&level, &volume) in &self.buckets {
                sq_sum += (level.0 - vwap).powi(2) * (volume / day_volume);
            }
        }

        if sq_sum > 0.0 {
            sq_sum.sqrt()
        } else {
            0.0
        }
    }

    /// Number of distinct price levels since the last reset.
    pub fn level_count(&self) -> usize {
        self.buckets.len()
    }

    /// Clear the buckets.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
