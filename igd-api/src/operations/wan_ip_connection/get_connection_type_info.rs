//! GetConnectionTypeInfo operation for the WANIPConnection service

use serde::Serialize;
use soap_client::ArgExtractor;

use crate::operation::{required_arg, GatewayOperation};
use crate::{ApiError, Service};

/// GetConnectionTypeInfo operation
pub struct GetConnectionTypeInfoOperation;

/// Request for GetConnectionTypeInfo (the action takes no arguments)
#[derive(Debug, Default, Serialize)]
pub struct GetConnectionTypeInfoRequest;

/// Current and allowable connection types reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTypeInfo {
    /// Current connection type (`NewConnectionType`)
    pub connection_type: String,
    /// Comma-separated allowable types (`NewPossibleConnectionTypes`)
    pub possible_connection_types: String,
}

impl GatewayOperation for GetConnectionTypeInfoOperation {
    type Request = GetConnectionTypeInfoRequest;
    type Response = ConnectionTypeInfo;

    const SERVICE: Service = Service::WanIpConnection;
    const ACTION: &'static str = "GetConnectionTypeInfo";

    fn build_payload(_request: &Self::Request) -> String {
        String::new()
    }

    fn parse_response(
        body: &str,
        extractor: &dyn ArgExtractor,
    ) -> Result<Self::Response, ApiError> {
        Ok(ConnectionTypeInfo {
            connection_type: required_arg(body, extractor, "NewConnectionType")?,
            possible_connection_types: required_arg(
                body,
                extractor,
                "NewPossibleConnectionTypes",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_client::TextScanExtractor;

    #[test]
    fn test_payload_is_empty() {
        let payload =
            GetConnectionTypeInfoOperation::build_payload(&GetConnectionTypeInfoRequest);
        assert_eq!(payload, "");
    }

    #[test]
    fn test_response_parsing_returns_both_fields() {
        let body = r#"<u:GetConnectionTypeInfoResponse>
            <NewConnectionType>IP_Routed</NewConnectionType>
            <NewPossibleConnectionTypes>Unconfigured, IP_Routed</NewPossibleConnectionTypes>
        </u:GetConnectionTypeInfoResponse>"#;

        let info =
            GetConnectionTypeInfoOperation::parse_response(body, &TextScanExtractor).unwrap();

        assert_eq!(info.connection_type, "IP_Routed");
        assert_eq!(info.possible_connection_types, "Unconfigured, IP_Routed");
    }

    #[test]
    fn test_missing_connection_type_is_error() {
        let body = "<NewPossibleConnectionTypes>IP_Routed</NewPossibleConnectionTypes>";

        let result = GetConnectionTypeInfoOperation::parse_response(body, &TextScanExtractor);
        assert!(matches!(
            result,
            Err(ApiError::MissingArgument("NewConnectionType"))
        ));
    }

    #[test]
    fn test_missing_possible_types_is_error() {
        let body = "<NewConnectionType>IP_Routed</NewConnectionType>";

        let result = GetConnectionTypeInfoOperation::parse_response(body, &TextScanExtractor);
        assert!(matches!(
            result,
            Err(ApiError::MissingArgument("NewPossibleConnectionTypes"))
        ));
    }
}
