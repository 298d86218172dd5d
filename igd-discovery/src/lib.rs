//! UPnP Internet Gateway Device discovery library
//!
//! This crate discovers UPnP-capable gateways (routers) on the local network
//! using SSDP (Simple Service Discovery Protocol) and resolves their device
//! descriptions down to the WANIPConnection control endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use igd_discovery::discover_gateway;
//!
//! let gateway = discover_gateway(Duration::from_secs(5))?;
//! println!("Gateway control endpoint: {}:{}{}", gateway.host, gateway.port, gateway.path);
//! # Ok::<(), igd_discovery::DiscoveryError>(())
//! ```
//!
//! # Passive monitoring
//!
//! A [`ControlPoint`] keeps a standing multicast receiver joined to the SSDP
//! group and reports NOTIFY announcements as [`DeviceEvent`]s:
//!
//! ```no_run
//! use std::time::Duration;
//! use igd_discovery::{ControlPoint, DeviceEvent};
//!
//! let cp = ControlPoint::new()?;
//! while let Some(event) = cp.recv_timeout(Duration::from_secs(10)) {
//!     match event {
//!         DeviceEvent::Available(headers) => println!("alive: {:?}", headers.get("usn")),
//!         DeviceEvent::Unavailable(_) => println!("byebye"),
//!         DeviceEvent::Updated(_) => println!("update"),
//!         DeviceEvent::Found(_) => println!("search reply"),
//!     }
//! }
//! # Ok::<(), igd_discovery::DiscoveryError>(())
//! ```

mod control_point;
pub mod description;
mod discovery;
mod error;
pub mod httpu;
pub mod ssdp;

pub use control_point::{ControlPoint, DeviceEvent};
pub use description::DescriptionResolver;
pub use discovery::discover_gateway;
pub use error::{DiscoveryError, Result};
pub use httpu::Headers;

/// Resolved identity of a gateway's control endpoint.
///
/// Immutable once constructed; exactly one `Gateway` is produced per
/// successful discovery call, and it is what action clients bind to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    /// Gateway host (usually a private IPv4 address)
    pub host: String,
    /// TCP port of the control endpoint
    pub port: u16,
    /// Absolute path accepting SOAP action requests
    pub path: String,
}
