//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the network. Implementations live in `adapters`.

mod prober;

pub use prober::Prober;
