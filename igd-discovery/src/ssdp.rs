//! SSDP wire constants and the single-shot M-SEARCH session.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, UdpSocket};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::httpu::{self, Headers};

/// Standard SSDP multicast rendezvous port.
pub const SSDP_PORT: u16 = 1900;

/// Standard SSDP multicast group, as a string for message building.
pub const MULTICAST_ADDR: &str = "239.255.255.250";

pub(crate) const MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// Wildcard "all services" search target.
pub const SSDP_ALL: &str = "ssdp:all";

/// Search target for Internet Gateway Devices.
pub const GATEWAY_SEARCH_TARGET: &str =
    "urn:schemas-upnp-org:device:InternetGatewayDevice:1";

/// MX value sent in every M-SEARCH.
pub(crate) const SEARCH_MX: u64 = 2;

/// How long a search session collects replies: MX plus one extra second.
pub const SEARCH_WINDOW: Duration = Duration::from_secs(SEARCH_MX + 1);

/// Build the literal M-SEARCH request payload for a search target.
pub(crate) fn build_search_request(st: &str) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         Host: {MULTICAST_ADDR}:{SSDP_PORT}\r\n\
         ST: {st}\r\n\
         Man: \"ssdp:discover\"\r\n\
         MX: {SEARCH_MX}\r\n\
         \r\n"
    )
}

/// A single M-SEARCH request/response exchange.
///
/// One ephemeral socket is used for both send and receive, so unicast
/// replies addressed back to the sending port land on the session. The
/// request is sent exactly once; the session then yields each reply that
/// passes the response-mode status-line check until its window elapses,
/// at which point the socket is released regardless of in-flight replies.
pub struct SearchSession {
    socket: UdpSocket,
    deadline: Instant,
    buffer: [u8; 2048],
    finished: bool,
}

impl SearchSession {
    /// Send one M-SEARCH for `st` and open a response window of `window`.
    pub fn start(st: &str, window: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to bind search socket: {}", e))
        })?;

        socket.set_multicast_loop_v4(true).map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e))
        })?;

        let request = build_search_request(st);
        debug!(st, "sending M-SEARCH");
        socket
            .send_to(request.as_bytes(), (MULTICAST_ADDR, SSDP_PORT))
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e))
            })?;

        Ok(Self {
            socket,
            deadline: Instant::now() + window,
            buffer: [0; 2048],
            finished: false,
        })
    }
}

impl Iterator for SearchSession {
    type Item = Result<Headers>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let remaining = self.deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.finished = true;
                return None;
            }

            if let Err(e) = self.socket.set_read_timeout(Some(remaining)) {
                self.finished = true;
                return Some(Err(DiscoveryError::NetworkError(format!(
                    "Failed to set read timeout: {}",
                    e
                ))));
            }

            match self.socket.recv_from(&mut self.buffer) {
                Ok((size, _)) => {
                    // Replies failing the status-line check are dropped, not surfaced.
                    if let Some(headers) = httpu::parse_search_response(&self.buffer[..size]) {
                        return Some(Ok(headers));
                    }
                }
                Err(e)
                    if e.kind() == ErrorKind::WouldBlock
                        || e.kind() == ErrorKind::TimedOut =>
                {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(DiscoveryError::NetworkError(format!(
                        "Socket error: {}",
                        e
                    ))));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_request_literal() {
        let request = build_search_request(GATEWAY_SEARCH_TARGET);

        assert_eq!(
            request,
            "M-SEARCH * HTTP/1.1\r\n\
             Host: 239.255.255.250:1900\r\n\
             ST: urn:schemas-upnp-org:device:InternetGatewayDevice:1\r\n\
             Man: \"ssdp:discover\"\r\n\
             MX: 2\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_build_search_request_wildcard_target() {
        let request = build_search_request(SSDP_ALL);
        assert!(request.contains("ST: ssdp:all\r\n"));
    }

    #[test]
    fn test_search_window_is_mx_plus_one() {
        assert_eq!(SEARCH_WINDOW, Duration::from_secs(3));
    }

    #[test]
    fn test_session_closes_when_window_elapses() {
        // A zero-length window must yield nothing and release the socket.
        // Hosts without multicast routing cannot even send, so skip there.
        let Ok(session) = SearchSession::start(SSDP_ALL, Duration::from_millis(0)) else {
            return;
        };
        let replies: Vec<_> = session.collect();
        assert!(replies.is_empty());
    }
}
