//! Integration tests for description fetching and resolution against a
//! local HTTP server standing in for a gateway.

use std::time::Duration;

use igd_discovery::{DescriptionResolver, DiscoveryError};

fn gateway_description(url_base: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <URLBase>{url_base}</URLBase>
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <deviceList>
      <device>
        <deviceType>urn:schemas-upnp-org:device:WANDevice:1</deviceType>
        <deviceList>
          <device>
            <deviceType>urn:schemas-upnp-org:device:WANConnectionDevice:1</deviceType>
            <serviceList>
              <service>
                <serviceType>urn:schemas-upnp-org:service:WANIPConnection:1</serviceType>
                <controlURL>/ctl</controlURL>
              </service>
            </serviceList>
          </device>
        </deviceList>
      </device>
    </deviceList>
  </device>
</root>"#
    )
}

#[test]
fn test_resolve_fetches_and_walks_description() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rootDesc.xml")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(gateway_description("http://192.168.1.1:5000/"))
        .create();

    let resolver = DescriptionResolver::new(Duration::from_secs(2)).unwrap();
    let location = format!("{}/rootDesc.xml", server.url());

    let gateway = resolver.resolve(&location).unwrap();

    assert_eq!(gateway.host, "192.168.1.1");
    assert_eq!(gateway.port, 5000);
    assert_eq!(gateway.path, "/ctl");
    mock.assert();
}

#[test]
fn test_resolve_without_url_base_uses_description_origin() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rootDesc.xml")
        .with_status(200)
        .with_body(gateway_description(""))
        .create();

    let resolver = DescriptionResolver::new(Duration::from_secs(2)).unwrap();
    let location = format!("{}/rootDesc.xml", server.url());

    let gateway = resolver.resolve(&location).unwrap();

    // mockito serves on 127.0.0.1 with an ephemeral port
    assert_eq!(gateway.host, "127.0.0.1");
    assert_eq!(gateway.path, "/ctl");
}

#[test]
fn test_non_200_description_status_fails_the_candidate() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rootDesc.xml")
        .with_status(404)
        .create();

    let resolver = DescriptionResolver::new(Duration::from_secs(2)).unwrap();
    let location = format!("{}/rootDesc.xml", server.url());

    match resolver.resolve(&location) {
        Err(DiscoveryError::ResolutionError(msg)) => assert!(msg.contains("404")),
        other => panic!("Expected ResolutionError, got {:?}", other),
    }
}

#[test]
fn test_malformed_description_body_is_parse_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rootDesc.xml")
        .with_status(200)
        .with_body("this is not xml")
        .create();

    let resolver = DescriptionResolver::new(Duration::from_secs(2)).unwrap();
    let location = format!("{}/rootDesc.xml", server.url());

    assert!(matches!(
        resolver.resolve(&location),
        Err(DiscoveryError::ParseError(_))
    ));
}

#[test]
fn test_duplicate_locations_are_claimed_once() {
    let mut resolver = DescriptionResolver::new(Duration::from_secs(2)).unwrap();

    assert!(resolver.claim("http://192.168.1.1:5000/rootDesc.xml"));
    assert!(!resolver.claim("http://192.168.1.1:5000/rootDesc.xml"));
    // A different location is an independent candidate.
    assert!(resolver.claim("http://192.168.1.2:5000/rootDesc.xml"));
}
