use igd_discovery::description::WAN_IP_CONNECTION;

/// UPnP services this SDK issues control actions against
///
/// Only WANIPConnection is supported; the enum is the seam where a sibling
/// service (e.g. WANPPPConnection) would slot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// WANIPConnection service - external IP and port mapping control
    WanIpConnection,
}

/// Service URI information used in SOAP requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The UPnP service URI named in the envelope and SOAPACTION header
    pub service_uri: &'static str,
}

impl Service {
    /// Get the name of this service as a string
    pub fn name(&self) -> &'static str {
        match self {
            Service::WanIpConnection => "WANIPConnection",
        }
    }

    /// Get the service URI information for this service
    pub fn info(&self) -> ServiceInfo {
        match self {
            Service::WanIpConnection => ServiceInfo {
                service_uri: WAN_IP_CONNECTION,
            },
        }
    }
}
