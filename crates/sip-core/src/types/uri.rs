//! # SIP URI
//!
//! A compact model of the URIs found in To/From header values, as defined in
//! [RFC 3261 Section 19.1](https://datatracker.ietf.org/doc/html/rfc3261#section-19.1)
//! and [RFC 3966](https://datatracker.ietf.org/doc/html/rfc3966) for `tel:`.
//!
//! ```text
//! sip:user:password@host:port;uri-parameters?headers
//! ```
//!
//! The user and host parts are kept byte-for-byte as written. Nothing is
//! lowercased or unescaped, so two URIs only share a user or host when the
//! text is identical.
//!
//! ```rust
//! use uactl_sip_core::{Uri, Scheme};
//! use std::str::FromStr;
//!
//! let uri = Uri::from_str("sip:alice@example.com:5060;transport=udp").unwrap();
//! assert_eq!(uri.scheme, Scheme::Sip);
//! assert_eq!(uri.user(), Some("alice"));
//! assert_eq!(uri.host(), Some("example.com"));
//! assert_eq!(uri.port, Some(5060));
//! assert_eq!(uri.transport(), Some("udp"));
//!
//! let uri = Uri::sip("example.com").with_user("bob").with_port(5070);
//! assert_eq!(uri.to_string(), "sip:bob@example.com:5070");
//! ```

use std::fmt;
use std::str::FromStr;

use nom::combinator::all_consuming;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::uri::parse_uri;
use crate::types::param::{find_param, Param};

/// URI scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// `sip:`
    Sip,
    /// `sips:`
    Sips,
    /// `tel:`
    Tel,
}

impl Scheme {
    /// Returns the string representation of the scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
            Scheme::Tel => "tel",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    // Schemes are case-insensitive (RFC 3261 Section 19.1.4)
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("sip") {
            Ok(Scheme::Sip)
        } else if s.eq_ignore_ascii_case("sips") {
            Ok(Scheme::Sips)
        } else if s.eq_ignore_ascii_case("tel") {
            Ok(Scheme::Tel)
        } else {
            Err(Error::invalid_uri(format!("unsupported scheme: {}", s)))
        }
    }
}

/// A parsed SIP, SIPS or TEL URI.
///
/// For `tel:` URIs the subscriber number is stored in `user` and there is no
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uri {
    /// URI scheme
    pub scheme: Scheme,
    /// User part, exactly as written
    pub user: Option<String>,
    /// Password (deprecated, but still seen in the wild)
    pub password: Option<String>,
    /// Host part, exactly as written (IPv6 references keep their brackets)
    pub host: Option<String>,
    /// Port
    pub port: Option<u16>,
    /// URI parameters
    pub parameters: Vec<Param>,
    /// Raw header portion after `?`, without the `?`
    pub headers: Option<String>,
}

impl Uri {
    /// Create a URI with the given scheme and host.
    pub fn new(scheme: Scheme, host: impl Into<String>) -> Self {
        Uri {
            scheme,
            user: None,
            password: None,
            host: Some(host.into()),
            port: None,
            parameters: Vec::new(),
            headers: None,
        }
    }

    /// Create a `sip:` URI for a host
    pub fn sip(host: impl Into<String>) -> Self {
        Self::new(Scheme::Sip, host)
    }

    /// Create a `sips:` URI for a host
    pub fn sips(host: impl Into<String>) -> Self {
        Self::new(Scheme::Sips, host)
    }

    /// Create a `tel:` URI for a subscriber number
    pub fn tel(number: impl Into<String>) -> Self {
        Uri {
            scheme: Scheme::Tel,
            user: Some(number.into()),
            password: None,
            host: None,
            port: None,
            parameters: Vec::new(),
            headers: None,
        }
    }

    /// Set the user part
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Append a URI parameter
    pub fn with_parameter(mut self, param: Param) -> Self {
        self.parameters.push(param);
        self
    }

    /// User part, if any
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Host part, if any
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Value of the `transport` parameter
    pub fn transport(&self) -> Option<&str> {
        find_param(&self.parameters, "transport").and_then(|p| p.value.as_deref())
    }

    /// Host and port formatted together (e.g. `example.com:5060`)
    pub fn host_port(&self) -> String {
        match (self.host(), self.port) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(user) = &self.user {
            f.write_str(user)?;
            if let Some(password) = &self.password {
                write!(f, ":{}", password)?;
            }
            if self.host.is_some() {
                f.write_str("@")?;
            }
        }
        if let Some(host) = &self.host {
            f.write_str(host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        for param in &self.parameters {
            write!(f, ";{}", param)?;
        }
        if let Some(headers) = &self.headers {
            write!(f, "?{}", headers)?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        all_consuming(parse_uri)(s.trim())
            .map(|(_, uri)| uri)
            .map_err(|e| Error::invalid_uri(format!("{}: {:?}", s, e)))
    }
}
