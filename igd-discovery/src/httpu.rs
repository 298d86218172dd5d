//! HTTPU message parsing for SSDP datagrams.
//!
//! SSDP reuses HTTP framing over UDP, but the two message shapes on the wire
//! carry different payloads: multicast NOTIFY traffic is a full HTTP-style
//! request, while unicast M-SEARCH replies are a bare status line followed by
//! headers. Both parsing modes absorb malformed input by returning `None` —
//! SSDP is a best-effort announce protocol with no response channel to report
//! framing errors on.

use std::collections::HashMap;

/// Header map parsed from an HTTPU message, keyed by lower-cased header name.
pub type Headers = HashMap<String, String>;

/// Exact status line a unicast M-SEARCH reply must open with.
pub(crate) const STATUS_LINE_OK: &str = "HTTP/1.1 200 OK";

/// An HTTP-style request parsed from a multicast datagram.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpuRequest {
    pub method: String,
    pub headers: Headers,
}

/// Parse a datagram as a full HTTP-style request (request mode).
///
/// Used for multicast NOTIFY traffic. Returns `None` on any framing
/// violation, dropping the whole datagram.
pub fn parse_request(payload: &[u8]) -> Option<HttpuRequest> {
    let text = std::str::from_utf8(payload).ok()?;
    let mut lines = text.split("\r\n");

    let request_line = lines.next()?;
    let mut parts = request_line.split(' ');
    let method = parts.next()?;
    let _target = parts.next()?;
    let version = parts.next()?;
    if method.is_empty() || !version.starts_with("HTTP/") {
        return None;
    }

    let mut headers = Headers::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        headers.insert(name.trim().to_lowercase(), value.trim().to_string());
    }

    Some(HttpuRequest {
        method: method.to_string(),
        headers,
    })
}

/// Parse a datagram as an M-SEARCH response (response mode).
///
/// The first line must equal exactly `HTTP/1.1 200 OK` or the whole message
/// is discarded. Each following line up to the first blank line is split on
/// the first `": "`; lines without that separator are skipped. Nothing after
/// the blank line is examined.
pub fn parse_search_response(payload: &[u8]) -> Option<Headers> {
    let text = std::str::from_utf8(payload).ok()?;
    let mut lines = text.split("\r\n");

    if lines.next()? != STATUS_LINE_OK {
        return None;
    }

    let mut headers = Headers::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name.to_lowercase(), value.to_string());
        }
    }

    Some(headers)
}
