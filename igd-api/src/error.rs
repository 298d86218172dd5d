use igd_discovery::DiscoveryError;
use soap_client::SoapError;
use thiserror::Error;

/// High-level API errors for gateway operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// Socket, connect, or HTTP-level failure while talking to the gateway.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Gateway rejected the action arguments (HTTP 402)
    #[error("Invalid Args")]
    InvalidArgs,

    /// Gateway could not perform the action (HTTP 501)
    #[error("Action Failed")]
    ActionFailed,

    /// Control response carried a status other than 200/402/501
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// A required response argument could not be extracted
    #[error("Missing response argument: {0}")]
    MissingArgument(&'static str),

    /// Gateway discovery failed before a handle could be produced
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::InvalidArgs => ApiError::InvalidArgs,
            SoapError::ActionFailed => ApiError::ActionFailed,
            SoapError::UnexpectedStatus(status) => ApiError::UnexpectedStatus(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_error_conversion() {
        assert!(matches!(
            ApiError::from(SoapError::InvalidArgs),
            ApiError::InvalidArgs
        ));
        assert!(matches!(
            ApiError::from(SoapError::ActionFailed),
            ApiError::ActionFailed
        ));
        assert!(matches!(
            ApiError::from(SoapError::UnexpectedStatus(500)),
            ApiError::UnexpectedStatus(500)
        ));
        assert!(matches!(
            ApiError::from(SoapError::Network("refused".to_string())),
            ApiError::NetworkError(_)
        ));
    }

    #[test]
    fn test_fault_display_matches_gateway_wording() {
        assert_eq!(ApiError::InvalidArgs.to_string(), "Invalid Args");
        assert_eq!(ApiError::ActionFailed.to_string(), "Action Failed");
    }
}
