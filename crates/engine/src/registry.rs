//! Engine registry.
//!
//! One engine per distinct input series, created and disposed by the
//! caller. Replaces host-side indicator caching with an explicit map.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use vwap_core::{BarPeriod, Clock, EngineConfig, Result};

use crate::engine::VwapEngine;

/// Caller-owned mapping from series identity to engine instance.
#[derive(Default)]
pub struct EngineRegistry {
    engines: HashMap<String, VwapEngine>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the engine for a series, constructing it on first use.
    pub fn get_or_create(
        &mut self,
        series_id: &str,
        config: &EngineConfig,
        period: BarPeriod,
        clock: &dyn Clock,
    ) -> Result<&mut VwapEngine> {
        match self.engines.entry(series_id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                Ok(entry.insert(VwapEngine::new(config.clone(), period, clock)?))
            }
        }
    }

    /// Existing engine for a series, if any.
    pub fn get_mut(&mut self, series_id: &str) -> Option<&mut VwapEngine> {
        self.engines.get_mut(series_id)
    }

    /// Dispose of a series' engine.
    pub fn remove(&mut self, series_id: &str) -> Option<VwapEngine> {
        self.engines.remove(series_id)
    }

    /// Number of live engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the registry holds no engines.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwap_core::FixedClock;

    #[test]
    fn test_engine_reused_per_series() {
        let mut registry = EngineRegistry::new();
        let config = EngineConfig::default();
        let clock = FixedClock(0);

        registry
            .get_or_create("ES 03-24 1m", &config, BarPeriod::Minute, &clock)
            .unwrap();
        registry
            .get_or_create("ES 03-24 1m", &config, BarPeriod::Minute, &clock)
            .unwrap();
        registry
            .get_or_create("NQ 03-24 1m", &config, BarPeriod::Minute, &clock)
            .unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_disposes_engine() {
        let mut registry = EngineRegistry::new();
        let config = EngineConfig::default();
        let clock = FixedClock(0);

        registry
            .get_or_create("ES 03-24 1m", &config, BarPeriod::Minute, &clock)
            .unwrap();
        assert!(registry.remove("ES 03-24 1m").is_some());
        assert!(registry.is_empty());
        assert!(registry.get_mut("ES 03-24 1m").is_none());
    }

    #[test]
    fn test_invalid_config_propagates() {
        let mut registry = EngineRegistry::new();
        let mut config = EngineConfig::default();
        config.bands.count = 0;

        let result = registry.get_or_create("ES", &config, BarPeriod::Minute, &FixedClock(0));
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
