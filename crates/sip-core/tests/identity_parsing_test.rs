// Parser tests for the URI and To/From values the registry keys on

use std::str::FromStr;

use uactl_sip_core::{
    error::Error,
    types::uri::{Scheme, Uri},
    types::{Address, Param},
};

#[test]
fn test_parse_sip_uri() {
    let uri = Uri::from_str("sip:user@example.com").expect("Failed to parse basic SIP URI");
    assert_eq!(uri.scheme, Scheme::Sip, "URI scheme should be SIP");
    assert_eq!(uri.user(), Some("user"), "User part should be 'user'");
    assert_eq!(uri.host(), Some("example.com"), "Host should be 'example.com'");
    assert_eq!(uri.port, None);
    assert!(uri.parameters.is_empty(), "URI should have no parameters");
    assert_eq!(uri.headers, None);

    let uri = Uri::from_str("sip:user@example.com:5060").expect("Failed to parse URI with port");
    assert_eq!(uri.port, Some(5060), "Port should be 5060");
    assert_eq!(uri.host_port(), "example.com:5060");

    let uri = Uri::from_str("sip:user@example.com;transport=tcp;ttl=5")
        .expect("Failed to parse URI with parameters");
    assert_eq!(uri.transport(), Some("tcp"));
    assert_eq!(uri.parameters[1], Param::new("ttl", Some("5")));

    let uri = Uri::from_str("sip:user@example.com?subject=Meeting&priority=urgent")
        .expect("Failed to parse URI with headers");
    assert_eq!(uri.headers.as_deref(), Some("subject=Meeting&priority=urgent"));

    let uri = Uri::from_str("sip:example.com").expect("Failed to parse URI without user part");
    assert_eq!(uri.user(), None, "User part should be None");

    let uri = Uri::from_str("sips:secure@example.com").expect("Failed to parse SIPS URI");
    assert_eq!(uri.scheme, Scheme::Sips, "URI scheme should be SIPS");

    let uri = Uri::from_str("sip:user@192.0.2.1").expect("Failed to parse URI with IPv4 address");
    assert_eq!(uri.host(), Some("192.0.2.1"));

    let uri = Uri::from_str("sip:user@[2001:db8::1]:5070").expect("Failed to parse URI with IPv6 reference");
    assert_eq!(uri.host(), Some("[2001:db8::1]"));
    assert_eq!(uri.port, Some(5070));
}

#[test]
fn test_invalid_uris() {
    assert!(matches!(Uri::from_str("mailto:alice@example.com"), Err(Error::InvalidUri(_))));
    assert!(Uri::from_str("sip:").is_err());
    assert!(Uri::from_str("sip:user@example.com:port").is_err());
    assert!(Uri::from_str("sip:user@exa mple.com").is_err());
}

#[test]
fn test_parse_to_from_values() {
    let to = Address::from_str("Bob <sip:bob@biloxi.com>").expect("Failed to parse To value");
    assert_eq!(to.display_name(), Some("Bob"));
    assert_eq!(to.tag(), None);

    let from = Address::from_str("\"Alice\" <sip:alice@atlanta.com>;tag=1928301774")
        .expect("Failed to parse From value");
    assert_eq!(from.user(), Some("alice"));
    assert_eq!(from.host(), Some("atlanta.com"));
    assert_eq!(from.tag(), Some("1928301774"));

    let bare = Address::from_str("sip:carol@chicago.com ; tag = 887s").expect("Failed to parse addr-spec");
    assert_eq!(bare.tag(), Some("887s"));

    let tel = Address::from_str("<tel:+15551234>").expect("Failed to parse TEL address");
    assert_eq!(tel.user(), Some("+15551234"));
    assert_eq!(tel.host(), None);

    assert!(matches!(Address::from_str("<sip:alice@atlanta.com"), Err(Error::InvalidAddress(_))));
}
