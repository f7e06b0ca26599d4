//! Incremental VWAP and dispersion-band computation.
//!
//! This crate handles:
//! - Session boundary tracking and accumulation resets
//! - Volume delta reconstruction from cumulative bar counters
//! - Running VWAP accumulation
//! - Dispersion estimation (VWAP-series or price-level volume-weighted)
//! - Band projection and output channel dispatch

pub mod accumulator;
pub mod bands;
pub mod dispersion;
pub mod engine;
pub mod registry;
pub mod session;
pub mod sink;
pub mod volume;

pub use accumulator::VwapAccumulator;
pub use dispersion::Dispersion;
pub use engine::VwapEngine;
pub use registry::EngineRegistry;
pub use session::{SessionSignal, SessionTracker};
pub use sink::{MemorySink, OutputSink};
pub use volume::VolumeDelta;
