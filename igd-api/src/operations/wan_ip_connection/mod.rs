//! WANIPConnection service operations

mod add_port_mapping;
mod get_connection_type_info;
mod get_external_ip_address;

pub use add_port_mapping::{AddPortMappingOperation, AddPortMappingRequest, Protocol};
pub use get_connection_type_info::{
    ConnectionTypeInfo, GetConnectionTypeInfoOperation, GetConnectionTypeInfoRequest,
};
pub use get_external_ip_address::{
    ExternalIpAddress, GetExternalIpAddressOperation, GetExternalIpAddressRequest,
};
