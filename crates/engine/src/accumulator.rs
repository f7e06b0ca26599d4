//! Running VWAP accumulation.

use vwap_core::Size;

/// Running Σ(price·volume) / Σ(volume) since the last session reset.
#[derive(Debug, Clone, Default)]
pub struct VwapAccumulator {
    weighted_price_sum: f64,
    volume_sum: Size,
}

impl VwapAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the running sums and return the current VWAP.
    pub fn update(&mut self, price: f64, tick_volume: Size) -> f64 {
        self.weighted_price_sum += price * tick_volume;
        self.volume_sum += tick_volume;
        self.vwap()
    }

    /// Current VWAP, or 0 when no volume has accumulated.
    pub fn vwap(&self) -> f64 {
        if self.volume_sum > 0.0 {
            self.weighted_price_sum / self.volume_sum
        } else {
            0.0
        }
    }

    /// Total volume accumulated since the last reset.
    pub fn volume_sum(&self) -> Size {
        self.volume_sum
    }

    /// Clear all accumulated state.
    pub fn clear(&mut self) {
        self.weighted_price_sum = 0.0;
        self.volume_sum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tick_vwap() {
        let mut acc = VwapAccumulator::new();
        acc.update(100.0, 10.0);
        let vwap = acc.update(102.0, 10.0);
        // (100*10 + 102*10) / 20 = 101
        assert!((vwap - 101.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_volume_yields_zero() {
        let mut acc = VwapAccumulator::new();
        assert_eq!(acc.update(100.0, 0.0), 0.0);
        assert_eq!(acc.vwap(), 0.0);
    }

    #[test]
    fn test_single_point_equals_price() {
        let mut acc = VwapAccumulator::new();
        let vwap = acc.update(4217.25, 3.0);
        assert!((vwap - 4217.25).abs() < 1e-10);
    }

    #[test]
    fn test_negative_delta_tolerated() {
        let mut acc = VwapAccumulator::new();
        acc.update(100.0, 10.0);
        // Feed correction removes volume at the same price.
        let vwap = acc.update(100.0, -4.0);
        assert!((vwap - 100.0).abs() < 1e-10);
        assert!((acc.volume_sum() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_clear() {
        let mut acc = VwapAccumulator::new();
        acc.update(100.0, 10.0);
        acc.clear();
        assert_eq!(acc.vwap(), 0.0);
        assert_eq!(acc.volume_sum(), 0.0);
        let vwap = acc.update(50.0, 1.0);
        assert!((vwap - 50.0).abs() < 1e-10);
    }
}
