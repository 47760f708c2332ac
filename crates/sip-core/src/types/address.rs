//! # SIP Address (name-addr)
//!
//! The value carried by To and From headers
//! ([RFC 3261 Section 20.20](https://datatracker.ietf.org/doc/html/rfc3261#section-20.20),
//! [Section 20.39](https://datatracker.ietf.org/doc/html/rfc3261#section-20.39)):
//! an optional display name, a URI, and header parameters such as `tag`.
//!
//! Both the bracketed name-addr form and the bare addr-spec form are accepted:
//!
//! ```rust
//! use uactl_sip_core::Address;
//! use std::str::FromStr;
//!
//! let to = Address::from_str("\"Bob\" <sip:bob@biloxi.com>;tag=a6c85cf").unwrap();
//! assert_eq!(to.display_name(), Some("Bob"));
//! assert_eq!(to.user(), Some("bob"));
//! assert_eq!(to.host(), Some("biloxi.com"));
//! assert_eq!(to.tag(), Some("a6c85cf"));
//!
//! let from = Address::from_str("sip:alice@atlanta.com;tag=1928301774").unwrap();
//! assert_eq!(from.tag(), Some("1928301774"));
//! ```

use std::fmt;
use std::str::FromStr;

use nom::combinator::all_consuming;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::address::parse_address;
use crate::types::param::{find_param, Param};
use crate::types::uri::Uri;

/// A To/From header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Display name, unquoted
    pub display_name: Option<String>,
    /// The addressed URI
    pub uri: Uri,
    /// Header parameters (`tag`, ...)
    pub params: Vec<Param>,
}

impl Address {
    /// Create an address with no display name or parameters
    pub fn new(uri: Uri) -> Self {
        Self {
            display_name: None,
            uri,
            params: Vec::new(),
        }
    }

    /// Create an address with a display name
    pub fn new_with_display_name(display_name: impl Into<String>, uri: Uri) -> Self {
        Self {
            display_name: Some(display_name.into()),
            uri,
            params: Vec::new(),
        }
    }

    /// Display name, if any
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// User part of the URI
    pub fn user(&self) -> Option<&str> {
        self.uri.user()
    }

    /// Host part of the URI
    pub fn host(&self) -> Option<&str> {
        self.uri.host()
    }

    /// The `tag` header parameter
    pub fn tag(&self) -> Option<&str> {
        find_param(&self.params, "tag").and_then(|p| p.value.as_deref())
    }

    /// Set (or replace) the `tag` header parameter
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.params.retain(|p| !p.is_named("tag"));
        self.params.push(Param::new("tag", Some(tag.into())));
    }
}

impl From<Uri> for Address {
    fn from(uri: Uri) -> Self {
        Address::new(uri)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.display_name {
            write!(f, "\"{}\" ", name.replace('\\', "\\\\").replace('"', "\\\""))?;
        }
        write!(f, "<{}>", self.uri)?;
        for param in &self.params {
            write!(f, ";{}", param)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        all_consuming(parse_address)(s)
            .map(|(_, address)| address)
            .map_err(|e| Error::invalid_address(format!("{}: {:?}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_quotes_name() {
        let mut addr = Address::new_with_display_name("Bob", Uri::sip("biloxi.com").with_user("bob"));
        addr.set_tag("a6c85cf");
        assert_eq!(addr.to_string(), "\"Bob\" <sip:bob@biloxi.com>;tag=a6c85cf");
        let reparsed = Address::from_str(&addr.to_string()).unwrap();
        assert_eq!(reparsed, addr);
    }

    #[test]
    fn test_set_tag_replaces() {
        let mut addr = Address::new(Uri::sip("example.com"));
        addr.set_tag("one");
        addr.set_tag("two");
        assert_eq!(addr.tag(), Some("two"));
        assert_eq!(addr.params.len(), 1);
    }

    #[test]
    fn test_surrounding_whitespace() {
        let addr = Address::from_str("  <sip:alice@example.com>  ").unwrap();
        assert_eq!(addr.user(), Some("alice"));
    }

    #[test]
    fn test_malformed_values() {
        assert!(Address::from_str("").is_err());
        assert!(Address::from_str("<sip:alice@example.com").is_err());
        assert!(Address::from_str("\"unterminated <sip:a@b>").is_err());
        assert!(Address::from_str("just some words").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_user_and_host_kept_verbatim(
            user in "[A-Za-z0-9_.!~*'-]{1,12}",
            host in "[A-Za-z0-9-]{1,10}(\\.[A-Za-z0-9-]{1,10}){0,2}",
            bracketed in proptest::bool::ANY,
        ) {
            let text = if bracketed {
                format!("<sip:{}@{}>;tag=t", user, host)
            } else {
                format!("sip:{}@{};tag=t", user, host)
            };
            let addr = Address::from_str(&text).unwrap();
            proptest::prop_assert_eq!(addr.user(), Some(user.as_str()));
            proptest::prop_assert_eq!(addr.host(), Some(host.as_str()));
            proptest::prop_assert_eq!(addr.tag(), Some("t"));
        }
    }

    #[test]
    fn test_serde_json() {
        let addr = Address::from_str("<sip:alice@example.com>;tag=x").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
