//! Gateway discovery orchestration.
//!
//! One call runs one search session for Internet Gateway Devices, hands each
//! unique candidate location to the description resolver, and settles on the
//! first outcome: a resolved gateway, a resolver failure, or the deadline.
//! Settling returns and drops the session socket, so candidates arriving
//! late are never examined — the completion fires exactly once.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::description::DescriptionResolver;
use crate::error::{DiscoveryError, Result};
use crate::ssdp::{SearchSession, GATEWAY_SEARCH_TARGET, SEARCH_WINDOW};
use crate::Gateway;

/// Discover one Internet Gateway Device on the local network.
///
/// Sends a single M-SEARCH for the gateway device type and resolves the
/// first responding candidate to its WANIPConnection control endpoint.
/// Duplicate replies for the same location trigger only one description
/// fetch. A resolution failure aborts the whole attempt; there is no
/// fallback to other candidates and no automatic retry.
///
/// Exactly one outcome is produced per call: `Ok(Gateway)`,
/// `Err(DiscoveryError::Timeout)` once no candidate can resolve within
/// `timeout`, or the first resolver error.
pub fn discover_gateway(timeout: Duration) -> Result<Gateway> {
    let deadline = Instant::now() + timeout;
    let window = SEARCH_WINDOW.min(timeout);

    let session = SearchSession::start(GATEWAY_SEARCH_TARGET, window)?;
    let mut resolver = DescriptionResolver::new(timeout)?;

    for reply in session {
        if Instant::now() >= deadline {
            return Err(DiscoveryError::Timeout);
        }

        let headers = reply?;
        let Some(location) = headers.get("location") else {
            continue;
        };

        // One fetch per location, however many times a device replies.
        if !resolver.claim(location) {
            continue;
        }

        // First claimed candidate settles the attempt either way; late
        // replies are dropped with the session.
        let gateway = resolver.resolve(location)?;
        debug!(
            host = %gateway.host,
            port = gateway.port,
            path = %gateway.path,
            "gateway resolved"
        );
        return Ok(gateway);
    }

    // The search window closed without a resolvable candidate; no further
    // replies can arrive once the session socket is gone.
    Err(DiscoveryError::Timeout)
}
