//! Batch probing application service.

use std::time::Instant;

use tracing::{debug, info};

use crate::domain::{ProbeReport, Target};
use crate::ports::Prober;

/// Application service that probes a list of targets one after another.
///
/// Targets are probed strictly in order with no overlap. A failure on one
/// target is recorded in its report and the batch carries on.
pub struct ProbeService<P: Prober> {
    prober: P,
}

impl<P: Prober> ProbeService<P> {
    /// Create a new probe service with the given prober.
    pub fn new(prober: P) -> Self {
        Self { prober }
    }

    /// Access the underlying prober.
    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Probe a single target and time it.
    pub async fn probe_one(&self, target: &Target) -> ProbeReport {
        let start = Instant::now();
        let result = self.prober.probe(target).await;
        let elapsed = start.elapsed();

        debug!(
            endpoint = %target,
            banner = result.is_banner(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Probe finished"
        );
        ProbeReport::new(target.clone(), result, elapsed)
    }

    /// Probe every target in order, handing each report to `on_report` as
    /// soon as it is available.
    pub async fn run_with<F>(&self, targets: &[Target], mut on_report: F) -> Vec<ProbeReport>
    where
        F: FnMut(&ProbeReport),
    {
        info!(count = targets.len(), "Probing targets");

        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            let report = self.probe_one(target).await;
            on_report(&report);
            reports.push(report);
        }

        let banners = reports.iter().filter(|r| r.result.is_banner()).count();
        info!(banners, failures = reports.len() - banners, "Probing complete");
        reports
    }

    /// Probe every target in order and collect the reports.
    pub async fn run(&self, targets: &[Target]) -> Vec<ProbeReport> {
        self.run_with(targets, |_| {}).await
    }
}
