//! Probe target domain model.

use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Port assumed when a target is given without one (FTP greets unprompted).
pub const DEFAULT_PORT: u16 = 21;

/// A (host, port) pair identifying the endpoint to probe.
///
/// The host is kept as given: an IP literal or a hostname that is resolved
/// at probe time. Nothing is validated beyond shape; an unresolvable host
/// or port 0 is still a valid target that simply fails to probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Hostname or IP literal.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Target {
    /// Create a target from a host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host:port`, `[v6]:port`, a bare IPv6 literal, or a bare host.
    ///
    /// A missing port falls back to `default_port`.
    pub fn parse(input: &str, default_port: u16) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidTarget("empty target".to_string()));
        }

        // Bracketed IPv6: [::1]:22 or [::1]
        if let Some(rest) = input.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| Error::InvalidTarget(format!("unclosed '[' in {}", input)))?;
            if host.is_empty() {
                return Err(Error::InvalidTarget(format!("missing host in {}", input)));
            }
            let port = match tail {
                "" => default_port,
                t => match t.strip_prefix(':') {
                    Some(p) => parse_port(p, input)?,
                    None => {
                        return Err(Error::InvalidTarget(format!(
                            "unexpected '{}' after host in {}",
                            t, input
                        )))
                    }
                },
            };
            return Ok(Self::new(host, port));
        }

        // Unbracketed IPv6 literal has no room for a port.
        if Ipv6Addr::from_str(input).is_ok() {
            return Ok(Self::new(input, default_port));
        }

        match input.rsplit_once(':') {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(Error::InvalidTarget(format!("missing host in {}", input)));
                }
                Ok(Self::new(host, parse_port(port, input)?))
            }
            None => Ok(Self::new(input, default_port)),
        }
    }

    /// Parse every input on its own.
    ///
    /// Malformed entries are returned next to the targets instead of
    /// failing the whole list.
    pub fn parse_all<'a, I>(inputs: I, default_port: u16) -> (Vec<Self>, Vec<(String, Error)>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut targets = Vec::new();
        let mut rejected = Vec::new();
        for input in inputs {
            match Self::parse(input, default_port) {
                Ok(target) => targets.push(target),
                Err(e) => rejected.push((input.to_string(), e)),
            }
        }
        (targets, rejected)
    }

    /// Whether the host is an IPv6 literal.
    pub fn is_ipv6(&self) -> bool {
        Ipv6Addr::from_str(&self.host).is_ok()
    }
}

fn parse_port(port: &str, input: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| Error::InvalidTarget(format!("invalid port '{}' in {}", port, input)))
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_PORT)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_port() {
        let t = Target::parse("127.0.0.1:22", DEFAULT_PORT).unwrap();
        assert_eq!(t, Target::new("127.0.0.1", 22));

        let t = Target::parse("ftp.example.com:2121", DEFAULT_PORT).unwrap();
        assert_eq!(t.host, "ftp.example.com");
        assert_eq!(t.port, 2121);
    }

    #[test]
    fn test_parse_default_port() {
        let t = Target::parse("192.168.0.148", 25).unwrap();
        assert_eq!(t.port, 25);

        let t: Target = "localhost".parse().unwrap();
        assert_eq!(t.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_ipv6() {
        let t = Target::parse("[::1]:2222", DEFAULT_PORT).unwrap();
        assert_eq!(t, Target::new("::1", 2222));

        let t = Target::parse("[fe80::1]", DEFAULT_PORT).unwrap();
        assert_eq!(t.port, DEFAULT_PORT);

        let t = Target::parse("::1", DEFAULT_PORT).unwrap();
        assert_eq!(t.host, "::1");
        assert_eq!(t.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Target::parse("", DEFAULT_PORT).is_err());
        assert!(Target::parse(":21", DEFAULT_PORT).is_err());
        assert!(Target::parse("host:70000", DEFAULT_PORT).is_err());
        assert!(Target::parse("host:ftp", DEFAULT_PORT).is_err());
        assert!(Target::parse("[::1", DEFAULT_PORT).is_err());
        assert!(Target::parse("[::1]x", DEFAULT_PORT).is_err());
    }

    #[test]
    fn test_parse_all_keeps_good_entries() {
        let (targets, rejected) =
            Target::parse_all(["127.0.0.1:1", "host:99999", "ftp.example.com"], DEFAULT_PORT);

        assert_eq!(
            targets,
            vec![Target::new("127.0.0.1", 1), Target::new("ftp.example.com", 21)]
        );
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "host:99999");
        assert!(matches!(rejected[0].1, Error::InvalidTarget(_)));
    }

    #[test]
    fn test_port_zero_is_accepted() {
        // Rejected later by the probe, not by parsing.
        let t = Target::parse("127.0.0.1:0", DEFAULT_PORT).unwrap();
        assert_eq!(t.port, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::new("10.0.0.1", 21).to_string(), "10.0.0.1:21");
        assert_eq!(Target::new("::1", 22).to_string(), "[::1]:22");
    }
}
