//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during a SOAP control exchange
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SoapError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// Gateway rejected the action arguments (HTTP 402)
    #[error("Invalid Args")]
    InvalidArgs,

    /// Gateway could not perform the action (HTTP 501)
    #[error("Action Failed")]
    ActionFailed,

    /// Any other non-200 control response status
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
}
