//! Banner grabbing over plain TCP connects

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::ports::is_rtsp_port;

/// Largest banner kept per endpoint
pub const MAX_BANNER_BYTES: usize = 4096;

/// How long to wait for a service to speak first before probing it
const GREETING_WAIT: Duration = Duration::from_millis(300);

/// Result of one connect attempt on an open port
#[derive(Debug, Clone)]
pub struct GrabbedBanner {
    /// Lossily decoded response, trimmed. Empty if the service stayed silent.
    pub banner: String,
    pub connect_latency: Duration,
}

/// Connects to a port, reads what it volunteers and probes silent services
#[derive(Debug, Clone)]
pub struct BannerGrabber {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl BannerGrabber {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
        }
    }

    /// Returns `None` when the port is closed, filtered or the connect timed out.
    pub async fn grab(&self, target: SocketAddr) -> Option<GrabbedBanner> {
        let start = Instant::now();

        let mut stream = match timeout(self.connect_timeout, TcpStream::connect(target)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                log::trace!("{} closed: {}", target, e);
                return None;
            }
            Err(_) => {
                log::trace!("{} connect timed out", target);
                return None;
            }
        };
        let connect_latency = start.elapsed();
        if let Err(e) = stream.set_nodelay(true) {
            log::trace!("{} set_nodelay failed: {}", target, e);
        }

        let mut buffer = vec![0u8; MAX_BANNER_BYTES];
        let greeting_wait = GREETING_WAIT.min(self.read_timeout);
        let mut total_read = read_available(&mut stream, &mut buffer, greeting_wait).await;

        if total_read == 0 {
            let probe = probe_for(target);
            if stream.write_all(probe.as_bytes()).await.is_ok() {
                total_read = read_available(&mut stream, &mut buffer, self.read_timeout).await;
            }
        }

        let banner = String::from_utf8_lossy(&buffer[..total_read]).trim().to_string();
        log::debug!("{} answered with {} bytes", target, total_read);

        Some(GrabbedBanner {
            banner,
            connect_latency,
        })
    }
}

/// Read until the buffer is full, the peer closes, or it goes quiet
async fn read_available(stream: &mut TcpStream, buffer: &mut [u8], first_wait: Duration) -> usize {
    let mut total_read = 0;
    let mut wait = first_wait;

    while total_read < buffer.len() {
        match timeout(wait, stream.read(&mut buffer[total_read..])).await {
            Ok(Ok(n)) if n > 0 => {
                total_read += n;
                wait = Duration::from_millis(50);
            }
            _ => break,
        }
    }

    total_read
}

/// Probe sent to services that do not greet first
fn probe_for(target: SocketAddr) -> String {
    if is_rtsp_port(target.port()) {
        format!(
            "OPTIONS rtsp://{}/ RTSP/1.0\r\nCSeq: 1\r\nUser-Agent: camfinder\r\n\r\n",
            target
        )
    } else {
        format!(
            "GET / HTTP/1.0\r\nHost: {}\r\nUser-Agent: camfinder\r\nAccept: */*\r\n\r\n",
            target.ip()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_selection() {
        let rtsp: SocketAddr = "192.168.1.10:554".parse().unwrap();
        assert!(probe_for(rtsp).starts_with("OPTIONS rtsp://192.168.1.10:554/ RTSP/1.0"));

        let http: SocketAddr = "192.168.1.10:8080".parse().unwrap();
        let probe = probe_for(http);
        assert!(probe.starts_with("GET / HTTP/1.0\r\n"));
        assert!(probe.contains("Host: 192.168.1.10\r\n"));
        assert!(probe.ends_with("\r\n\r\n"));
    }
}
