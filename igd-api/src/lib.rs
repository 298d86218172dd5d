//! High-level API for UPnP Internet Gateway Device control
//!
//! This crate provides a type-safe, trait-based API for querying and
//! configuring the local router through its WANIPConnection service. It uses
//! the private `soap-client` crate for low-level SOAP communication and
//! `igd-discovery` to locate the gateway's control endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use igd_api::{discover, Protocol};
//!
//! let gateway = discover(Duration::from_secs(5))?;
//!
//! let ip = gateway.external_ip_address()?;
//! println!("External IP: {}", ip.address);
//!
//! gateway.add_port_mapping(Protocol::Tcp, 8080, 80, "192.168.1.50", "web server")?;
//! # Ok::<(), igd_api::ApiError>(())
//! ```

pub mod client;
pub mod error;
pub mod operation;
pub mod operations;
pub mod service;

pub use client::{discover, GatewayClient};
pub use error::{ApiError, Result};
pub use igd_discovery::Gateway;
pub use operation::GatewayOperation;
pub use operations::{ConnectionTypeInfo, ExternalIpAddress, Protocol};
pub use service::{Service, ServiceInfo};
