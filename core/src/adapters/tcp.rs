//! Raw TCP banner prober.
//!
//! Connects, sends nothing, and waits for the remote to speak first, which
//! is how FTP, SMTP, SSH and similar services greet a client.

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::{ProbeResult, Target};
use crate::ports::Prober;

/// Bound applied to the connect and to the read when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Largest banner returned by a single probe.
pub const MAX_BANNER_LEN: usize = 1024;

/// Probe one target with the given bound.
pub async fn probe(target: &Target, bound: Duration) -> ProbeResult {
    TcpProber::new(bound).grab(target).await
}

/// Banner prober over plain TCP.
///
/// Holds no connection state; every call opens its own stream and drops it
/// before returning.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    /// Create a prober that bounds both connect and read by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Grab the banner of `target`.
    ///
    /// Performs one connection attempt and at most one read of up to
    /// [`MAX_BANNER_LEN`] bytes. Name resolution counts against the connect
    /// bound.
    pub async fn grab(&self, target: &Target) -> ProbeResult {
        if target.port == 0 {
            return ProbeResult::failure("invalid port 0");
        }

        let mut stream = match self.connect(target).await {
            Ok(stream) => stream,
            Err(failure) => return failure,
        };

        let result = self.read_banner(&mut stream, target).await;
        drop(stream);
        result
    }

    async fn connect(&self, target: &Target) -> Result<TcpStream, ProbeResult> {
        debug!(endpoint = %target, timeout_ms = self.timeout_ms(), "Connecting");

        match timeout(self.timeout, TcpStream::connect((target.host.as_str(), target.port))).await
        {
            Ok(Ok(stream)) => {
                debug!(endpoint = %target, "Connected");
                Ok(stream)
            }
            Ok(Err(e)) => {
                debug!(endpoint = %target, error = %e, "Connect failed");
                Err(ProbeResult::failure(format!("connection failed: {}", e)))
            }
            Err(_) => {
                debug!(endpoint = %target, "Connect timed out");
                Err(ProbeResult::failure(format!(
                    "connection timed out after {}ms",
                    self.timeout_ms()
                )))
            }
        }
    }

    async fn read_banner(&self, stream: &mut TcpStream, target: &Target) -> ProbeResult {
        let mut buf = [0u8; MAX_BANNER_LEN];

        match timeout(self.timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => {
                debug!(endpoint = %target, "Remote closed without sending data");
                ProbeResult::failure("connection closed without banner")
            }
            Ok(Ok(n)) => {
                debug!(endpoint = %target, bytes = n, "Banner received");
                ProbeResult::Banner(buf[..n].to_vec())
            }
            Ok(Err(e)) => {
                debug!(endpoint = %target, error = %e, "Read failed");
                ProbeResult::failure(format!("read failed: {}", e))
            }
            Err(_) => {
                debug!(endpoint = %target, "Read timed out");
                ProbeResult::failure(format!("read timed out after {}ms", self.timeout_ms()))
            }
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Prober for TcpProber {
    async fn probe(&self, target: &Target) -> ProbeResult {
        self.grab(target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    async fn local_listener() -> (TcpListener, Target) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, Target::new("127.0.0.1", port))
    }

    /// Accept one connection, send `banner`, then wait for the client to hang up.
    fn serve_once(listener: TcpListener, banner: &'static [u8]) -> tokio::task::JoinHandle<bool> {
        tokio::spawn(async move {
            let (mut conn, _) = listener.accept().await.unwrap();
            conn.write_all(banner).await.unwrap();
            let mut rest = [0u8; 16];
            matches!(
                tokio::time::timeout(Duration::from_secs(2), conn.read(&mut rest)).await,
                Ok(Ok(0))
            )
        })
    }

    #[tokio::test]
    async fn test_banner_returned_unmodified() {
        let (listener, target) = local_listener().await;
        let server = serve_once(listener, b"220 test-ftp ready\r\n");

        let result = probe(&target, Duration::from_secs(3)).await;
        assert_eq!(result, ProbeResult::Banner(b"220 test-ftp ready\r\n".to_vec()));
        assert!(server.await.unwrap());
    }

    #[tokio::test]
    async fn test_binary_banner_preserved() {
        let (listener, target) = local_listener().await;
        let server = serve_once(listener, b"\x4a\x00\x00\x00\x0a8.0.36\x00\xff\xfe");

        let result = TcpProber::default().grab(&target).await;
        assert_eq!(
            result.banner(),
            Some(&b"\x4a\x00\x00\x00\x0a8.0.36\x00\xff\xfe"[..])
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_read_capped_at_buffer_size() {
        static BIG: [u8; 4096] = [b'A'; 4096];
        let (listener, target) = local_listener().await;
        let server = tokio::spawn(async move {
            let (mut conn, _) = listener.accept().await.unwrap();
            let _ = conn.write_all(&BIG).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        });

        let result = TcpProber::default().grab(&target).await;
        let banner = result.banner().expect("expected a banner");
        assert!(!banner.is_empty());
        assert!(banner.len() <= MAX_BANNER_LEN);
        assert!(banner.iter().all(|&b| b == b'A'));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_listener_is_refused() {
        let (listener, target) = local_listener().await;
        drop(listener);

        let bound = Duration::from_secs(1);
        let start = Instant::now();
        let result = probe(&target, bound).await;

        let reason = result.failure_reason().expect("expected a failure");
        assert!(reason.starts_with("connection failed"), "{}", reason);
        assert!(reason.to_lowercase().contains("refused"), "{}", reason);
        assert!(start.elapsed() < bound + Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let (listener, target) = local_listener().await;
        let server = tokio::spawn(async move {
            let (conn, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(conn);
        });

        let start = Instant::now();
        let result = probe(&target, Duration::from_millis(200)).await;

        assert_eq!(
            result,
            ProbeResult::Failure("read timed out after 200ms".to_string())
        );
        assert!(start.elapsed() < Duration::from_secs(1));
        server.abort();
    }

    #[tokio::test]
    async fn test_immediate_close_is_failure() {
        let (listener, target) = local_listener().await;
        let server = tokio::spawn(async move {
            let (conn, _) = listener.accept().await.unwrap();
            drop(conn);
        });

        let result = probe(&target, Duration::from_secs(1)).await;
        assert!(!result.is_banner());
        assert_ne!(result, ProbeResult::Banner(Vec::new()));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_port_zero_is_failure() {
        let result = probe(&Target::new("127.0.0.1", 0), Duration::from_secs(1)).await;
        assert_eq!(result, ProbeResult::Failure("invalid port 0".to_string()));
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_failure() {
        let target = Target::new("no-such-host.invalid", 21);
        let result = probe(&target, Duration::from_secs(2)).await;
        assert!(!result.is_banner());
    }

    #[tokio::test]
    async fn test_each_probe_opens_and_releases_its_own_connection() {
        let (listener, target) = local_listener().await;
        let server = tokio::spawn(async move {
            let mut released = 0;
            for _ in 0..2 {
                let (mut conn, _) = listener.accept().await.unwrap();
                conn.write_all(b"SSH-2.0-test\r\n").await.unwrap();
                let mut rest = [0u8; 16];
                if let Ok(Ok(0)) =
                    tokio::time::timeout(Duration::from_secs(2), conn.read(&mut rest)).await
                {
                    released += 1;
                }
            }
            released
        });

        let prober = TcpProber::new(Duration::from_secs(2));
        let first = prober.grab(&target).await;
        let second = prober.grab(&target).await;

        assert_eq!(first, second);
        assert!(first.is_banner());
        // Both connections were accepted separately and both were closed by the client.
        assert_eq!(server.await.unwrap(), 2);
    }
}
