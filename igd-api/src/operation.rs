use serde::Serialize;
use soap_client::ArgExtractor;

use crate::error::ApiError;
use crate::service::Service;

/// Base trait for all gateway API operations
///
/// Each UPnP action implements this trait once: a typed request, a typed
/// response record with one field per documented output argument, the action
/// name, and the two halves of the wire exchange — building the XML payload
/// that goes inside the SOAP envelope, and extracting named arguments from
/// the raw response body.
pub trait GatewayOperation {
    /// The request type for this operation, must be serializable
    type Request: Serialize;

    /// The response type for this operation
    type Response;

    /// The UPnP service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Build the XML payload from the request data (without SOAP envelope)
    fn build_payload(request: &Self::Request) -> String;

    /// Extract the typed response from the raw control response body
    ///
    /// A required argument that cannot be extracted is an error; optional
    /// arguments that cannot be extracted are represented as `None`.
    fn parse_response(
        body: &str,
        extractor: &dyn ArgExtractor,
    ) -> Result<Self::Response, ApiError>;
}

/// Extract a required response argument, failing with `MissingArgument`.
pub(crate) fn required_arg(
    body: &str,
    extractor: &dyn ArgExtractor,
    name: &'static str,
) -> Result<String, ApiError> {
    extractor
        .extract(body, name)
        .ok_or(ApiError::MissingArgument(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_client::TextScanExtractor;

    #[test]
    fn test_required_arg_present() {
        let body = "<NewExternalIPAddress>1.2.3.4</NewExternalIPAddress>";
        let value = required_arg(body, &TextScanExtractor, "NewExternalIPAddress").unwrap();
        assert_eq!(value, "1.2.3.4");
    }

    #[test]
    fn test_required_arg_missing() {
        let result = required_arg("<Other>x</Other>", &TextScanExtractor, "NewConnectionType");
        match result {
            Err(ApiError::MissingArgument(name)) => assert_eq!(name, "NewConnectionType"),
            other => panic!("Expected MissingArgument, got {:?}", other),
        }
    }
}
