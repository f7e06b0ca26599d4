//! Core types and configuration for the vwap-bands workspace.
//!
//! This crate provides shared types used across all other crates:
//! - Feed event and session types
//! - Engine configuration structures
//! - Clock capability
//! - Common error types

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BandConfig, DispersionMode, EngineConfig, WindowConfig};
pub use error::{Error, Result};
pub use types::*;
