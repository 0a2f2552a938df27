//! Banner prober port (interface).

use crate::domain::{ProbeResult, Target};

/// Port for probing a single target for its banner.
///
/// Implementations never fail: every error is folded into
/// [`ProbeResult::Failure`], so one bad target cannot abort a batch.
pub trait Prober: Send + Sync {
    /// Connect to `target`, read whatever it sends first, and release the
    /// connection before returning.
    fn probe(&self, target: &Target) -> impl std::future::Future<Output = ProbeResult> + Send;
}
