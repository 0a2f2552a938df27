//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for the network
//! - Return domain types as outputs

mod probe_service;

pub use probe_service::ProbeService;
