//! Band projection.

use vwap_core::{Band, BandConfig, BandSet};

/// Project the current VWAP and dispersion into the configured band levels.
///
/// With a single band configured, both level-1 values carry the positive
/// offset. The reference indicator behaves this way and the asymmetry is
/// reproduced as-is.
pub fn project(vwap: f64, sd: f64, config: &BandConfig) -> BandSet {
    let levels = match config.count {
        3 => vec![
            pair(vwap, sd, config.sd1_multi),
            pair(vwap, sd, config.sd2_multi),
            pair(vwap, sd, config.sd3_multi),
        ],
        2 => vec![
            pair(vwap, sd, config.sd1_multi),
            pair(vwap, sd, config.sd2_multi),
        ],
        _ => vec![Band {
            upper: vwap + config.sd1_multi * sd,
            lower: vwap + config.sd1_multi * sd,
        }],
    };

    BandSet { vwap, sd, levels }
}

fn pair(vwap: f64, sd: f64, multi: f64) -> Band {
    Band {
        upper: vwap + multi * sd,
        lower: vwap - multi * sd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: u32) -> BandConfig {
        BandConfig {
            count,
            ..BandConfig::default()
        }
    }

    #[test]
    fn test_three_band_ordering() {
        let set = project(100.0, 2.0, &config(3));
        assert_eq!(set.levels.len(), 3);
        let [b1, b2, b3] = [set.levels[0], set.levels[1], set.levels[2]];
        assert!(b3.lower <= b2.lower);
        assert!(b2.lower <= b1.lower);
        assert!(b1.lower <= set.vwap);
        assert!(set.vwap <= b1.upper);
        assert!(b1.upper <= b2.upper);
        assert!(b2.upper <= b3.upper);
        assert!((b3.upper - 106.0).abs() < 1e-10);
        assert!((b3.lower - 94.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_bands() {
        let set = project(50.0, 1.5, &config(2));
        assert_eq!(set.levels.len(), 2);
        assert!((set.levels[1].upper - 53.0).abs() < 1e-10);
        assert!((set.levels[1].lower - 47.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_band_asymmetry() {
        // Both level-1 values use the positive offset.
        let set = project(100.0, 2.0, &config(1));
        assert_eq!(set.levels.len(), 1);
        assert!((set.levels[0].upper - 102.0).abs() < 1e-10);
        assert!((set.levels[0].lower - 102.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_sd_collapses_to_vwap() {
        let set = project(100.0, 0.0, &config(3));
        for band in &set.levels {
            assert!((band.upper - 100.0).abs() < 1e-10);
            assert!((band.lower - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_custom_multipliers() {
        let cfg = BandConfig {
            count: 3,
            sd1_multi: 0.5,
            sd2_multi: 1.0,
            sd3_multi: 1.5,
        };
        let set = project(200.0, 4.0, &cfg);
        assert!((set.levels[0].upper - 202.0).abs() < 1e-10);
        assert!((set.levels[1].upper - 204.0).abs() < 1e-10);
        assert!((set.levels[2].upper - 206.0).abs() < 1e-10);
    }
}
