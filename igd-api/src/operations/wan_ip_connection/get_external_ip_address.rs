//! GetExternalIPAddress operation for the WANIPConnection service

use serde::Serialize;
use soap_client::ArgExtractor;

use crate::operation::{required_arg, GatewayOperation};
use crate::{ApiError, Service};

/// GetExternalIPAddress operation
pub struct GetExternalIpAddressOperation;

/// Request for GetExternalIPAddress (the action takes no arguments)
#[derive(Debug, Default, Serialize)]
pub struct GetExternalIpAddressRequest;

/// The gateway's WAN-side address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIpAddress {
    /// External IP address (`NewExternalIPAddress`)
    pub address: String,
}

impl GatewayOperation for GetExternalIpAddressOperation {
    type Request = GetExternalIpAddressRequest;
    type Response = ExternalIpAddress;

    const SERVICE: Service = Service::WanIpConnection;
    const ACTION: &'static str = "GetExternalIPAddress";

    fn build_payload(_request: &Self::Request) -> String {
        String::new()
    }

    fn parse_response(
        body: &str,
        extractor: &dyn ArgExtractor,
    ) -> Result<Self::Response, ApiError> {
        Ok(ExternalIpAddress {
            address: required_arg(body, extractor, "NewExternalIPAddress")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_client::{TextScanExtractor, TreeExtractor};

    #[test]
    fn test_response_parsing() {
        let body = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <u:GetExternalIPAddressResponse xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">
      <NewExternalIPAddress>1.2.3.4</NewExternalIPAddress>
    </u:GetExternalIPAddressResponse>
  </s:Body>
</s:Envelope>"#;

        let response =
            GetExternalIpAddressOperation::parse_response(body, &TextScanExtractor).unwrap();
        assert_eq!(response.address, "1.2.3.4");

        // The structural extractor is a drop-in replacement.
        let response =
            GetExternalIpAddressOperation::parse_response(body, &TreeExtractor).unwrap();
        assert_eq!(response.address, "1.2.3.4");
    }

    #[test]
    fn test_missing_address_is_error() {
        let result = GetExternalIpAddressOperation::parse_response("<s:Body/>", &TextScanExtractor);
        assert!(matches!(
            result,
            Err(ApiError::MissingArgument("NewExternalIPAddress"))
        ));
    }
}
