//! AddPortMapping operation for the WANIPConnection service

use std::fmt;

use serde::Serialize;
use soap_client::ArgExtractor;

use crate::operation::GatewayOperation;
use crate::{ApiError, Service};

/// Transport protocol of a port mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

/// AddPortMapping operation
pub struct AddPortMappingOperation;

/// Request for AddPortMapping
///
/// The mapping is created enabled, for any remote host, with an unlimited
/// lease — the fixed `NewEnabled`/`NewLeaseDuration`/`NewRemoteHost` values
/// gateways expect from simple port-forwarding clients.
#[derive(Debug, Clone, Serialize)]
pub struct AddPortMappingRequest {
    pub protocol: Protocol,
    pub external_port: u16,
    pub internal_port: u16,
    /// LAN host the mapping forwards to
    pub internal_client: String,
    /// Human-readable mapping description shown in router UIs
    pub description: String,
}

impl GatewayOperation for AddPortMappingOperation {
    type Request = AddPortMappingRequest;
    type Response = ();

    const SERVICE: Service = Service::WanIpConnection;
    const ACTION: &'static str = "AddPortMapping";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<NewRemoteHost></NewRemoteHost>\
             <NewExternalPort>{}</NewExternalPort>\
             <NewProtocol>{}</NewProtocol>\
             <NewInternalPort>{}</NewInternalPort>\
             <NewInternalClient>{}</NewInternalClient>\
             <NewEnabled>1</NewEnabled>\
             <NewPortMappingDescription>{}</NewPortMappingDescription>\
             <NewLeaseDuration>0</NewLeaseDuration>",
            request.external_port,
            request.protocol,
            request.internal_port,
            request.internal_client,
            request.description,
        )
    }

    fn parse_response(
        _body: &str,
        _extractor: &dyn ArgExtractor,
    ) -> Result<Self::Response, ApiError> {
        // AddPortMapping returns no output arguments; a 200 reply is success.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use soap_client::TextScanExtractor;

    #[test]
    fn test_payload_contains_all_arguments() {
        let request = AddPortMappingRequest {
            protocol: Protocol::Tcp,
            external_port: 8080,
            internal_port: 80,
            internal_client: "192.168.1.50".to_string(),
            description: "test".to_string(),
        };

        let payload = AddPortMappingOperation::build_payload(&request);

        assert!(payload.contains("<NewExternalPort>8080</NewExternalPort>"));
        assert!(payload.contains("<NewProtocol>TCP</NewProtocol>"));
        assert!(payload.contains("<NewInternalPort>80</NewInternalPort>"));
        assert!(payload.contains("<NewInternalClient>192.168.1.50</NewInternalClient>"));
        assert!(payload.contains("<NewPortMappingDescription>test</NewPortMappingDescription>"));
        assert!(payload.contains("<NewEnabled>1</NewEnabled>"));
        assert!(payload.contains("<NewLeaseDuration>0</NewLeaseDuration>"));
        assert!(payload.contains("<NewRemoteHost></NewRemoteHost>"));
    }

    #[rstest]
    #[case(Protocol::Tcp, "TCP")]
    #[case(Protocol::Udp, "UDP")]
    fn test_protocol_labels(#[case] protocol: Protocol, #[case] label: &str) {
        assert_eq!(protocol.to_string(), label);
    }

    #[test]
    fn test_empty_response_body_is_success() {
        assert!(AddPortMappingOperation::parse_response("", &TextScanExtractor).is_ok());
    }
}
