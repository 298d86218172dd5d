//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
///
/// Covers the failure modes of a discovery attempt: transport problems,
/// unparseable documents, a description tree missing the expected
/// device/service levels, and the attempt deadline expiring.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, HTTP requests, etc.)
    NetworkError(String),
    /// Parsing errors (description XML, URLs)
    ParseError(String),
    /// Expected device or service node absent from the description tree
    ResolutionError(String),
    /// No gateway resolved within the caller-specified deadline
    Timeout,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiscoveryError::ResolutionError(msg) => write!(f, "Resolution error: {}", msg),
            DiscoveryError::Timeout => write!(f, "Discovery timed out"),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
