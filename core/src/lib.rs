//! Bannergrab Core Library
//!
//! Minimal TCP banner grabbing. Given a host and port, it opens a
//! short-lived connection, reads whatever the remote sends first, and
//! reports it. Provides functionality to:
//! - Probe a single target with a bounded connect and read
//! - Probe a list of targets in order without stopping on failures
//! - Manage the configured target list
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: Network implementations
//! - `application`: Use case services
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use bannergrab_core::{probe, ProbeResult, Target};
//!
//! # async fn run() {
//! let target = Target::new("127.0.0.1", 21);
//! match probe(&target, Duration::from_secs(3)).await {
//!     ProbeResult::Banner(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
//!     ProbeResult::Failure(reason) => eprintln!("{}: {}", target, reason),
//! }
//! # }
//! ```

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{ProbeReport, ProbeReportJson, ProbeResult, Target, DEFAULT_PORT};

// Re-export other commonly used types
pub use adapters::{probe, TcpProber, DEFAULT_TIMEOUT, MAX_BANNER_LEN};
pub use application::ProbeService;
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use ports::Prober;
