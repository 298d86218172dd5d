//! Operation implementations organized by UPnP service

pub mod wan_ip_connection;

pub use wan_ip_connection::{
    AddPortMappingOperation, AddPortMappingRequest, ConnectionTypeInfo, ExternalIpAddress,
    GetConnectionTypeInfoOperation, GetConnectionTypeInfoRequest,
    GetExternalIpAddressOperation, GetExternalIpAddressRequest, Protocol,
};
