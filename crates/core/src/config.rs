//! Configuration for the VWAP band engine.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dispersion calculation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispersionMode {
    /// Sample standard deviation of the VWAP series itself.
    AvgVwap,
    /// Volume-weighted standard deviation of distinct traded price levels.
    Vwap,
}

/// Main configuration for one engine instance.
///
/// Immutable for the lifetime of the instance; supplied at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Dispersion calculation mode.
    pub dispersion_mode: DispersionMode,
    /// Compute and emit dispersion bands.
    pub show_dispersion: bool,
    /// Emit the accuracy warning while estimating.
    pub show_warning: bool,
    /// Band count and multipliers.
    pub bands: BandConfig,
    /// Accumulation window times.
    pub window: WindowConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispersion_mode: DispersionMode::Vwap,
            show_dispersion: true,
            show_warning: true,
            bands: BandConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration at engine construction.
    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.bands.count) {
            return Err(Error::config(format!(
                "band count must be 1, 2 or 3, got {}",
                self.bands.count
            )));
        }
        for (name, multi) in [
            ("sd1_multi", self.bands.sd1_multi),
            ("sd2_multi", self.bands.sd2_multi),
            ("sd3_multi", self.bands.sd3_multi),
        ] {
            if !multi.is_finite() || multi < 0.0 {
                return Err(Error::config(format!(
                    "{name} must be finite and non-negative, got {multi}"
                )));
            }
        }
        Ok(())
    }
}

/// Band count and sigma multipliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandConfig {
    /// Number of band levels to project (1..=3).
    pub count: u32,
    /// Level-1 multiplier.
    pub sd1_multi: f64,
    /// Level-2 multiplier.
    pub sd2_multi: f64,
    /// Level-3 multiplier.
    pub sd3_multi: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            count: 3,
            sd1_multi: 1.0,
            sd2_multi: 2.0,
            sd3_multi: 3.0,
        }
    }
}

/// Accumulation window times-of-day.
///
/// Midnight means unset: the session begin / session end is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Accumulation start time-of-day.
    pub start_time: NaiveTime,
    /// Accumulation end time-of-day.
    pub end_time: NaiveTime,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.dispersion_mode, DispersionMode::Vwap);
        assert!(config.show_dispersion);
        assert!(config.show_warning);
        assert_eq!(config.bands.count, 3);
        assert_eq!(config.bands.sd1_multi, 1.0);
        assert_eq!(config.bands.sd2_multi, 2.0);
        assert_eq!(config.bands.sd3_multi, 3.0);
        assert_eq!(config.window.start_time, NaiveTime::MIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_band_count() {
        let mut config = EngineConfig::default();
        config.bands.count = 0;
        assert!(config.validate().is_err());
        config.bands.count = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_multiplier() {
        let mut config = EngineConfig::default();
        config.bands.sd2_multi = f64::NAN;
        assert!(config.validate().is_err());
        config.bands.sd2_multi = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bands.count, config.bands.count);
        assert_eq!(back.dispersion_mode, config.dispersion_mode);
    }
}
