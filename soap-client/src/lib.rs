//! Private SOAP client for UPnP gateway control
//!
//! This crate provides a minimal SOAP 1.1 client for invoking control
//! actions on an Internet Gateway Device's WANIPConnection endpoint. It
//! wraps action payloads in the fixed envelope, POSTs them to the resolved
//! control URL, and classifies the gateway's fault statuses.

mod error;
mod extract;

pub use error::SoapError;
pub use extract::{ArgExtractor, TextScanExtractor, TreeExtractor};

use std::time::Duration;

/// Raw result of a control exchange: the full response body of a 200 reply.
pub type SoapResult = Result<String, SoapError>;

/// A minimal SOAP client for gateway control actions
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self {
            // Redirects are disabled so 3xx replies surface as protocol
            // faults instead of being silently re-posted.
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .redirects(0)
                .build(),
        }
    }

    /// Invoke one control action and return the full response body.
    ///
    /// Builds the SOAP envelope around `payload`, POSTs it to
    /// `http://host:port/path`, and waits for the whole body before
    /// returning. Status classification: 402 is [`SoapError::InvalidArgs`],
    /// 501 is [`SoapError::ActionFailed`], 200 is the success path, and any
    /// other status is [`SoapError::UnexpectedStatus`].
    pub fn call(
        &self,
        host: &str,
        port: u16,
        path: &str,
        service_uri: &str,
        action: &str,
        payload: &str,
    ) -> SoapResult {
        let envelope = build_envelope(service_uri, action, payload);
        let url = format!("http://{}:{}{}", host, port, path);
        let soap_action = format!("\"{}#{}\"", service_uri, action);

        let result = self
            .agent
            .post(&url)
            .set("Host", &host_header(host, port))
            .set("SOAPACTION", &soap_action)
            .set("Content-Type", "text/xml")
            .send_string(&envelope);

        let response = match result {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; classification needs the code.
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(SoapError::Network(e.to_string())),
        };

        if let Some(fault) = classify_status(response.status()) {
            return Err(fault);
        }

        response
            .into_string()
            .map_err(|e| SoapError::Network(e.to_string()))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a control response status to its fault, if any.
fn classify_status(status: u16) -> Option<SoapError> {
    match status {
        200 => None,
        402 => Some(SoapError::InvalidArgs),
        501 => Some(SoapError::ActionFailed),
        other => Some(SoapError::UnexpectedStatus(other)),
    }
}

/// Host header value: `host`, plus `:port` unless the port is 80.
fn host_header(host: &str, port: u16) -> String {
    if port == 80 {
        host.to_string()
    } else {
        format!("{}:{}", host, port)
    }
}

/// Wrap an action payload in the fixed SOAP 1.1 envelope.
fn build_envelope(service_uri: &str, action: &str, payload: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n\
         <s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\
         <s:Body>\
         <u:{action} xmlns:u=\"{service_uri}\">{payload}</u:{action}>\
         </s:Body>\
         </s:Envelope>"
    )
}
