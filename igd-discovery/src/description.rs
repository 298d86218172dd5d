//! Device description fetching and resolution.
//!
//! A device-found candidate carries a `location` URL pointing at an XML
//! description document: a tree of nested devices and services. Resolution
//! walks that tree with three exact-match lookups — WANDevice under the root
//! device, WANConnectionDevice under that, WANIPConnection among its
//! services — and combines `URLBase` with the service's `controlURL` into
//! the gateway's control endpoint.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::Gateway;

/// Device type of the WAN sub-device under the root device.
pub const WAN_DEVICE: &str = "urn:schemas-upnp-org:device:WANDevice:1";

/// Device type of the WAN connection sub-device.
pub const WAN_CONNECTION_DEVICE: &str = "urn:schemas-upnp-org:device:WANConnectionDevice:1";

/// Service type controlling external IP and port mappings.
pub const WAN_IP_CONNECTION: &str = "urn:schemas-upnp-org:service:WANIPConnection:1";

/// Root of a UPnP device description document.
#[derive(Debug, Deserialize)]
pub struct Root {
    #[serde(rename = "URLBase")]
    pub url_base: Option<String>,
    pub device: DeviceNode,
}

/// One device in the description tree.
#[derive(Debug, Deserialize)]
pub struct DeviceNode {
    #[serde(rename = "deviceType")]
    pub device_type: String,
    #[serde(rename = "deviceList")]
    pub device_list: Option<DeviceList>,
    #[serde(rename = "serviceList")]
    pub service_list: Option<ServiceList>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceList {
    #[serde(rename = "device", default)]
    pub devices: Vec<DeviceNode>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceList {
    #[serde(rename = "service", default)]
    pub services: Vec<ServiceNode>,
}

/// One service in the description tree.
#[derive(Debug, Deserialize)]
pub struct ServiceNode {
    #[serde(rename = "serviceType")]
    pub service_type: String,
    #[serde(rename = "controlURL")]
    pub control_url: String,
}

impl Root {
    /// Parse a description document from XML.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml).map_err(|e| {
            DiscoveryError::ParseError(format!("Failed to parse device description: {}", e))
        })
    }
}

/// Find an immediate child device by exact device type. First match wins.
fn find_device<'a>(node: &'a DeviceNode, device_type: &str) -> Option<&'a DeviceNode> {
    node.device_list
        .as_ref()?
        .devices
        .iter()
        .find(|d| d.device_type == device_type)
}

/// Find an immediate child service by exact service type. First match wins.
fn find_service<'a>(node: &'a DeviceNode, service_type: &str) -> Option<&'a ServiceNode> {
    node.service_list
        .as_ref()?
        .services
        .iter()
        .find(|s| s.service_type == service_type)
}

/// Split an absolute http/https URL into host, port, and path.
///
/// Ports default to 80 for http and 443 for https.
pub(crate) fn parse_http_url(url: &str) -> Option<(String, u16, String)> {
    let (scheme, rest) = url.split_once("://")?;
    let default_port: u16 = match scheme {
        "http" => 80,
        "https" => 443,
        _ => return None,
    };

    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };

    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => (host, port.parse().ok()?),
        None => (authority, default_port),
    };

    if host.is_empty() {
        return None;
    }

    Some((host.to_string(), port, path.to_string()))
}

/// The scheme://host[:port] portion of a URL, without the path.
fn origin(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split('/').next()?;
    if authority.is_empty() {
        return None;
    }
    Some(format!("{}://{}", scheme, authority))
}

/// Compute the gateway endpoint from `URLBase + controlURL`.
///
/// Gateways that omit `URLBase` describe their control URL relative to the
/// description document itself, so the location's origin stands in.
fn control_endpoint(
    url_base: Option<&str>,
    location: &str,
    control_url: &str,
) -> Result<Gateway> {
    let absolute = if control_url.contains("://") {
        control_url.to_string()
    } else {
        let base = match url_base {
            Some(base) if !base.is_empty() => base.trim_end_matches('/').to_string(),
            _ => origin(location).ok_or_else(|| {
                DiscoveryError::ParseError(format!("Malformed location URL: {}", location))
            })?,
        };
        if control_url.starts_with('/') {
            format!("{}{}", base, control_url)
        } else {
            format!("{}/{}", base, control_url)
        }
    };

    let (host, port, path) = parse_http_url(&absolute).ok_or_else(|| {
        DiscoveryError::ParseError(format!("Malformed control URL: {}", absolute))
    })?;

    Ok(Gateway { host, port, path })
}

/// Walk a parsed description down to the WANIPConnection control endpoint.
///
/// Each missing level is fatal for the discovery attempt; there is no
/// fallback to other candidates.
pub(crate) fn resolve_document(root: &Root, location: &str) -> Result<Gateway> {
    let wan_device = find_device(&root.device, WAN_DEVICE).ok_or_else(|| {
        DiscoveryError::ResolutionError(format!("Description has no {} device", WAN_DEVICE))
    })?;

    let connection_device = find_device(wan_device, WAN_CONNECTION_DEVICE).ok_or_else(|| {
        DiscoveryError::ResolutionError(format!(
            "Description has no {} device",
            WAN_CONNECTION_DEVICE
        ))
    })?;

    let service = find_service(connection_device, WAN_IP_CONNECTION).ok_or_else(|| {
        DiscoveryError::ResolutionError(format!(
            "Description has no {} service",
            WAN_IP_CONNECTION
        ))
    })?;

    control_endpoint(root.url_base.as_deref(), location, &service.control_url)
}

/// Fetches description documents and resolves them to gateway endpoints.
///
/// The pending-location set guarantees at most one fetch per location within
/// one discovery attempt, however many times a device answers the search.
pub struct DescriptionResolver {
    http_client: reqwest::blocking::Client,
    pending: HashSet<String>,
}

impl DescriptionResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            pending: HashSet::new(),
        })
    }

    /// Claim a location for this attempt. Returns `false` when this exact
    /// location has already been claimed.
    pub fn claim(&mut self, location: &str) -> bool {
        self.pending.insert(location.to_string())
    }

    /// Fetch a description document and resolve the gateway endpoint.
    pub fn resolve(&self, location: &str) -> Result<Gateway> {
        debug!(location, "fetching device description");

        let response = self.http_client.get(location).send().map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to fetch device description: {}", e))
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(DiscoveryError::ResolutionError(format!(
                "Unexpected description status code: {}",
                status
            )));
        }

        let body = response.text().map_err(|e| {
            DiscoveryError::NetworkError(format!("Failed to read description body: {}", e))
        })?;

        let root = Root::from_xml(&body)?;
        resolve_document(&root, location)
    }
}
