use std::time::Duration;

use igd_discovery::{discover_gateway, Gateway};
use soap_client::{ArgExtractor, SoapClient, TextScanExtractor};
use tracing::debug;

use crate::operation::GatewayOperation;
use crate::operations::{
    AddPortMappingOperation, AddPortMappingRequest, ConnectionTypeInfo, ExternalIpAddress,
    GetConnectionTypeInfoOperation, GetConnectionTypeInfoRequest, GetExternalIpAddressOperation,
    GetExternalIpAddressRequest, Protocol,
};
use crate::Result;

/// A client for executing control actions against one resolved gateway
///
/// Each discovery call resolves exactly one [`Gateway`], and this client is
/// the handle bound to it: it owns the SOAP client and the extraction
/// strategy, and exposes one method per supported WANIPConnection action.
pub struct GatewayClient {
    soap_client: SoapClient,
    extractor: Box<dyn ArgExtractor>,
    gateway: Gateway,
}

impl GatewayClient {
    /// Create a client bound to a resolved gateway, using the historical
    /// first-match text-scan extraction.
    pub fn new(gateway: Gateway) -> Self {
        Self::with_extractor(gateway, Box::new(TextScanExtractor))
    }

    /// Create a client with a custom response-argument extractor.
    pub fn with_extractor(gateway: Gateway, extractor: Box<dyn ArgExtractor>) -> Self {
        Self {
            soap_client: SoapClient::new(),
            extractor,
            gateway,
        }
    }

    /// The control endpoint this client is bound to.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Execute a gateway operation.
    ///
    /// Builds the operation's payload, posts it to the gateway's control
    /// path, and extracts the typed response from the reply body.
    pub fn execute<Op: GatewayOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let payload = Op::build_payload(request);
        debug!(action = Op::ACTION, host = %self.gateway.host, "executing gateway action");

        let body = self.soap_client.call(
            &self.gateway.host,
            self.gateway.port,
            &self.gateway.path,
            Op::SERVICE.info().service_uri,
            Op::ACTION,
            &payload,
        )?;

        Op::parse_response(&body, self.extractor.as_ref())
    }

    /// Retrieve the current and allowable connection types.
    pub fn connection_type_info(&self) -> Result<ConnectionTypeInfo> {
        self.execute::<GetConnectionTypeInfoOperation>(&GetConnectionTypeInfoRequest)
    }

    /// Retrieve the gateway's external IP address.
    pub fn external_ip_address(&self) -> Result<ExternalIpAddress> {
        self.execute::<GetExternalIpAddressOperation>(&GetExternalIpAddressRequest)
    }

    /// Create a port mapping forwarding `external_port` on the gateway to
    /// `internal_client:internal_port` on the LAN.
    pub fn add_port_mapping(
        &self,
        protocol: Protocol,
        external_port: u16,
        internal_port: u16,
        internal_client: &str,
        description: &str,
    ) -> Result<()> {
        self.execute::<AddPortMappingOperation>(&AddPortMappingRequest {
            protocol,
            external_port,
            internal_port,
            internal_client: internal_client.to_string(),
            description: description.to_string(),
        })
    }
}

/// Discover one gateway on the local network and return a control handle.
///
/// Runs a single SSDP discovery attempt bounded by `timeout` and binds a
/// [`GatewayClient`] to the first resolved gateway. Re-invoke to discover
/// again; there is no automatic retry.
pub fn discover(timeout: Duration) -> Result<GatewayClient> {
    let gateway = discover_gateway(timeout)?;
    Ok(GatewayClient::new(gateway))
}
