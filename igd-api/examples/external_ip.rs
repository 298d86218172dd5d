//! Discover the local gateway and print its external IP address.
//!
//! Run with `RUST_LOG=igd_discovery=debug,igd_api=debug` to watch the
//! discovery and control exchange.

use std::time::Duration;

use igd_api::discover;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let gateway = match discover(Duration::from_secs(5)) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Gateway discovery failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Gateway control endpoint: {}:{}{}",
        gateway.gateway().host,
        gateway.gateway().port,
        gateway.gateway().path
    );

    match gateway.connection_type_info() {
        Ok(info) => println!(
            "Connection type: {} (possible: {})",
            info.connection_type, info.possible_connection_types
        ),
        Err(e) => eprintln!("GetConnectionTypeInfo failed: {}", e),
    }

    match gateway.external_ip_address() {
        Ok(ip) => println!("External IP: {}", ip.address),
        Err(e) => eprintln!("GetExternalIPAddress failed: {}", e),
    }
}
