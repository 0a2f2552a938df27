//! Domain layer - Pure data models.
//!
//! This module contains domain entities that represent core probe concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod result;
mod target;

// Re-export all domain types
pub use result::{ProbeReport, ProbeReportJson, ProbeResult};
pub use target::{Target, DEFAULT_PORT};
