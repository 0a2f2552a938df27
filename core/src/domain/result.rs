//! Probe outcome domain models.

use std::time::Duration;

use serde::Serialize;

use super::Target;

// ============================================================================
// ProbeResult
// ============================================================================

/// Outcome of one probe attempt.
///
/// Exactly one variant is populated per probe. `Banner` holds the raw bytes
/// read from the socket, untouched; `Failure` holds a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeResult {
    /// Bytes the remote sent unprompted after the connection was established.
    Banner(Vec<u8>),
    /// Why no banner was obtained.
    Failure(String),
}

impl ProbeResult {
    /// Build a failure from anything displayable.
    pub fn failure(reason: impl std::fmt::Display) -> Self {
        ProbeResult::Failure(reason.to_string())
    }

    /// Check if this result carries a banner.
    pub fn is_banner(&self) -> bool {
        matches!(self, ProbeResult::Banner(_))
    }

    /// Raw banner bytes, if any.
    pub fn banner(&self) -> Option<&[u8]> {
        match self {
            ProbeResult::Banner(bytes) => Some(bytes),
            ProbeResult::Failure(_) => None,
        }
    }

    /// Failure description, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ProbeResult::Banner(_) => None,
            ProbeResult::Failure(reason) => Some(reason),
        }
    }

    /// Lossy UTF-8 rendering of the banner for display.
    pub fn banner_text(&self) -> Option<String> {
        self.banner()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl std::fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Remote bytes are untrusted: control characters are escaped so
            // they cannot drive the terminal.
            ProbeResult::Banner(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                for c in text.trim_end_matches(['\r', '\n']).chars() {
                    if c.is_control() {
                        write!(f, "{}", c.escape_debug())?;
                    } else {
                        write!(f, "{}", c)?;
                    }
                }
                Ok(())
            }
            ProbeResult::Failure(reason) => write!(f, "{}", reason),
        }
    }
}

// ============================================================================
// ProbeReport
// ============================================================================

/// A probe result paired with the target it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// The probed endpoint.
    pub target: Target,
    /// What the probe produced.
    pub result: ProbeResult,
    /// Wall time spent on the probe.
    pub elapsed: Duration,
}

impl ProbeReport {
    pub fn new(target: Target, result: ProbeResult, elapsed: Duration) -> Self {
        Self {
            target,
            result,
            elapsed,
        }
    }
}

/// JSON representation of a probe report.
///
/// Banners are emitted twice: as lossy text for reading and as hex so that
/// binary greetings survive the round trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReportJson {
    /// `host:port` of the probed endpoint.
    pub target: String,
    pub host: String,
    pub port: u16,
    /// `"banner"` or `"failure"`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl From<&ProbeReport> for ProbeReportJson {
    fn from(report: &ProbeReport) -> Self {
        let (status, banner, banner_hex, error) = match &report.result {
            ProbeResult::Banner(bytes) => (
                "banner",
                Some(String::from_utf8_lossy(bytes).into_owned()),
                Some(to_hex(bytes)),
                None,
            ),
            ProbeResult::Failure(reason) => ("failure", None, None, Some(reason.clone())),
        };

        Self {
            target: report.target.to_string(),
            host: report.target.host.clone(),
            port: report.target.port,
            status: status.to_string(),
            banner,
            banner_hex,
            error,
            elapsed_ms: report.elapsed.as_millis() as u64,
        }
    }
}

impl ProbeReportJson {
    /// Entry for an input that never became a target.
    pub fn rejected(input: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            target: input.to_string(),
            host: input.to_string(),
            port: 0,
            status: "failure".to_string(),
            banner: None,
            banner_hex: None,
            error: Some(reason.to_string()),
            elapsed_ms: 0,
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

// ============================================================================
// Tests
// ============================================================================
