//! Feed construction for the vwap-bands workspace.
//!
//! This crate turns raw trade streams into the engine's feed events:
//! - Session schedule (per-day session metadata)
//! - Replay feed (bar indices, cumulative bar volume, day-to-date volume)

pub mod replay;
pub mod schedule;

pub use replay::{ReplayFeed, Tick};
pub use schedule::SessionSchedule;
