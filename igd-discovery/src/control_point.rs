//! Standing SSDP listener and active search dispatch.
//!
//! The `ControlPoint` owns a multicast receiver joined to the SSDP group for
//! its whole lifetime. NOTIFY announcements arriving there are mapped to a
//! closed set of device events and delivered over a channel; everything else
//! on the multicast socket is ignored. Active discovery goes through
//! [`ControlPoint::search`], which runs a single-shot search session and
//! forwards its replies as `Found` events.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::httpu::{self, Headers, HttpuRequest};
use crate::ssdp::{SearchSession, MULTICAST_GROUP, SEARCH_WINDOW, SSDP_ALL, SSDP_PORT};

const NTS_ALIVE: &str = "ssdp:alive";
const NTS_BYEBYE: &str = "ssdp:byebye";
const NTS_UPDATE: &str = "ssdp:update";

/// How often the listener thread wakes to check for shutdown.
const LISTENER_POLL: Duration = Duration::from_millis(500);

/// Events emitted by a [`ControlPoint`].
///
/// `Available`/`Unavailable`/`Updated` come from multicast NOTIFY
/// announcements; `Found` comes from unicast replies to an active search.
/// Each carries the message's header map with lower-cased names.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// A device announced itself (`NTS: ssdp:alive`)
    Available(Headers),
    /// A device announced its departure (`NTS: ssdp:byebye`)
    Unavailable(Headers),
    /// A device announced a description change (`NTS: ssdp:update`)
    Updated(Headers),
    /// A device answered an M-SEARCH
    Found(Headers),
}

/// Map a parsed HTTPU request to a device event.
///
/// Only NOTIFY requests with a recognized `nts` sub-type produce an event;
/// anything else is dropped without notification.
pub(crate) fn notify_event(request: HttpuRequest) -> Option<DeviceEvent> {
    if request.method != "NOTIFY" {
        return None;
    }
    match request.headers.get("nts").map(String::as_str) {
        Some(NTS_ALIVE) => Some(DeviceEvent::Available(request.headers)),
        Some(NTS_BYEBYE) => Some(DeviceEvent::Unavailable(request.headers)),
        Some(NTS_UPDATE) => Some(DeviceEvent::Updated(request.headers)),
        _ => None,
    }
}

/// Search target actually sent: the caller's, or the wildcard default.
fn effective_target(st: Option<&str>) -> &str {
    st.unwrap_or(SSDP_ALL)
}

/// SSDP control point with a standing multicast receiver.
pub struct ControlPoint {
    events: Receiver<DeviceEvent>,
    sender: Sender<DeviceEvent>,
    stop: Arc<AtomicBool>,
    listener: Option<JoinHandle<()>>,
}

impl ControlPoint {
    /// Bind the multicast receiver and start the standing listener.
    pub fn new() -> Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, SSDP_PORT)).map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to bind SSDP socket: {}", e))
        })?;

        socket
            .join_multicast_v4(&MULTICAST_GROUP, &Ipv4Addr::UNSPECIFIED)
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to join SSDP group: {}", e))
            })?;

        socket.set_read_timeout(Some(LISTENER_POLL)).map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to set read timeout: {}", e))
        })?;

        let (sender, events) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let listener = {
            let sender = sender.clone();
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || listener_loop(socket, sender, stop))
        };

        Ok(Self {
            events,
            sender,
            stop,
            listener: Some(listener),
        })
    }

    /// Send a single SSDP search request and forward every valid unicast
    /// reply as [`DeviceEvent::Found`].
    ///
    /// `st` defaults to the wildcard `ssdp:all` target. The request is sent
    /// once, with no retransmission; the call blocks for the search window
    /// (MX + 1 seconds) and then releases the session's socket. Repeated
    /// discovery requires calling `search` again.
    pub fn search(&self, st: Option<&str>) -> Result<()> {
        let session = SearchSession::start(effective_target(st), SEARCH_WINDOW)?;
        for reply in session {
            let headers = reply?;
            // The receiver is owned by this ControlPoint, so send cannot fail.
            let _ = self.sender.send(DeviceEvent::Found(headers));
        }
        Ok(())
    }

    /// Wait up to `timeout` for the next device event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DeviceEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop the standing listener and release the multicast socket.
    pub fn close(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(listener) = self.listener.take() {
            let _ = listener.join();
        }
    }
}

impl Drop for ControlPoint {
    fn drop(&mut self) {
        self.close();
    }
}

fn listener_loop(socket: UdpSocket, events: Sender<DeviceEvent>, stop: Arc<AtomicBool>) {
    let mut buffer = [0u8; 2048];
    while !stop.load(Ordering::Relaxed) {
        match socket.recv_from(&mut buffer) {
            Ok((size, _)) => {
                // Framing errors are absorbed here; NOTIFY has no reply path.
                let Some(request) = httpu::parse_request(&buffer[..size]) else {
                    continue;
                };
                if request.method == "NOTIFY" {
                    debug!(
                        nts = request.headers.get("nts").map(String::as_str),
                        nt = request.headers.get("nt").map(String::as_str),
                        usn = request.headers.get("usn").map(String::as_str),
                        "NOTIFY"
                    );
                }
                if let Some(event) = notify_event(request) {
                    if events.send(event).is_err() {
                        break;
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                continue;
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::httpu::parse_request;
    use rstest::rstest;

    fn notify(nts: &str) -> HttpuRequest {
        let payload = format!(
            "NOTIFY * HTTP/1.1\r\n\
             HOST: 239.255.255.250:1900\r\n\
             NT: upnp:rootdevice\r\n\
             NTS: {nts}\r\n\
             USN: uuid:abc::upnp:rootdevice\r\n\
             \r\n"
        );
        parse_request(payload.as_bytes()).unwrap()
    }

    #[test]
    fn test_alive_maps_to_available_with_lowercased_headers() {
        let event = notify_event(notify("ssdp:alive")).unwrap();

        match event {
            DeviceEvent::Available(headers) => {
                assert_eq!(headers.get("nt").unwrap(), "upnp:rootdevice");
                assert_eq!(headers.get("usn").unwrap(), "uuid:abc::upnp:rootdevice");
                assert!(!headers.contains_key("NT"));
            }
            other => panic!("Expected Available, got {:?}", other),
        }
    }

    #[test]
    fn test_byebye_maps_to_unavailable() {
        assert!(matches!(
            notify_event(notify("ssdp:byebye")),
            Some(DeviceEvent::Unavailable(_))
        ));
    }

    #[test]
    fn test_update_maps_to_updated() {
        assert!(matches!(
            notify_event(notify("ssdp:update")),
            Some(DeviceEvent::Updated(_))
        ));
    }

    #[rstest]
    #[case("ssdp:unknown")]
    #[case("alive")]
    #[case("")]
    fn test_unrecognized_nts_fires_nothing(#[case] nts: &str) {
        assert!(notify_event(notify(nts)).is_none());
    }

    #[test]
    fn test_missing_nts_fires_nothing() {
        let request = parse_request(b"NOTIFY * HTTP/1.1\r\nNT: upnp:rootdevice\r\n\r\n").unwrap();
        assert!(notify_event(request).is_none());
    }

    #[test]
    fn test_search_target_defaults_to_wildcard() {
        assert_eq!(effective_target(None), "ssdp:all");
        assert_eq!(
            effective_target(Some("urn:schemas-upnp-org:device:InternetGatewayDevice:1")),
            "urn:schemas-upnp-org:device:InternetGatewayDevice:1"
        );
    }

    #[test]
    fn test_non_notify_method_fires_nothing() {
        let request =
            parse_request(b"M-SEARCH * HTTP/1.1\r\nNTS: ssdp:alive\r\n\r\n").unwrap();
        assert!(notify_event(request).is_none());
    }
}
