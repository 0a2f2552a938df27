//! Probe command - grab banners from targets.

use std::time::Duration;

use anyhow::Result;
use bannergrab_core::{
    Config, ConfigStore, Error, ProbeReport, ProbeReportJson, ProbeResult, ProbeService, Target,
    TcpProber,
};
use tracing::warn;

pub async fn run(
    store: &ConfigStore,
    targets: &[String],
    timeout: Option<Duration>,
    port: Option<u16>,
    json: bool,
) -> Result<()> {
    let config = store.load().await?;
    let bound = timeout.unwrap_or_else(|| config.timeout());

    let (targets, rejected) = resolve_targets(&config, targets, port);

    // Bad entries are reported like any other failed target.
    for (input, e) in &rejected {
        warn!(entry = %input, error = %e, "Skipping target");
        if !json {
            println!("[-] {}: {}", input, e);
        }
    }

    if targets.is_empty() && rejected.is_empty() {
        if !json {
            println!("No targets configured.");
        } else {
            println!("[]");
        }
        return Ok(());
    }

    let service = ProbeService::new(TcpProber::new(bound));
    let reports = service
        .run_with(&targets, |report| {
            if let ProbeResult::Failure(reason) = &report.result {
                warn!(endpoint = %report.target, reason = %reason, "No banner");
            }
            if !json {
                println!("{}", format_report(report));
            }
        })
        .await;

    if json {
        let out: Vec<ProbeReportJson> = rejected
            .iter()
            .map(|(input, e)| ProbeReportJson::rejected(input, e))
            .chain(reports.iter().map(ProbeReportJson::from))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    Ok(())
}

/// Command-line targets win over the configured list. Each entry is parsed
/// on its own; the ones that fail come back with their error.
fn resolve_targets(
    config: &Config,
    args: &[String],
    port: Option<u16>,
) -> (Vec<Target>, Vec<(String, Error)>) {
    if args.is_empty() {
        config.parsed_targets()
    } else {
        let default_port = port.unwrap_or(config.default_port);
        Target::parse_all(args.iter().map(String::as_str), default_port)
    }
}

/// One line per report: `[+]` for a banner, `[-]` for a failure.
fn format_report(report: &ProbeReport) -> String {
    let marker = if report.result.is_banner() { "+" } else { "-" };
    format!("[{}] {}: {}", marker, report.target, report.result)
}
