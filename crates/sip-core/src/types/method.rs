//! # SIP Request Methods
//!
//! The request methods a user agent issues or receives, as defined in
//! [RFC 3261 Section 7.1](https://datatracker.ietf.org/doc/html/rfc3261#section-7.1)
//! and the extension RFCs (PRACK, UPDATE, MESSAGE, SUBSCRIBE/NOTIFY, REFER, PUBLISH).
//!
//! Every well-known method carries a stable numeric code. Code `0` is reserved for
//! extension methods, which keep their token in [`Method::Extension`].
//!
//! ```rust
//! use uactl_sip_core::Method;
//! use std::str::FromStr;
//!
//! let m = Method::from_str("INVITE").unwrap();
//! assert_eq!(m, Method::Invite);
//! assert_eq!(m.code(), 1);
//!
//! let custom = Method::from_str("X-PING").unwrap();
//! assert_eq!(custom.code(), 0);
//! assert_eq!(custom.as_str(), "X-PING");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SIP request method
///
/// Method names are case-sensitive (RFC 3261 Section 7.1), so `invite` parses
/// as an extension method rather than [`Method::Invite`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// INVITE (RFC 3261)
    Invite,
    /// ACK (RFC 3261)
    Ack,
    /// CANCEL (RFC 3261)
    Cancel,
    /// BYE (RFC 3261)
    Bye,
    /// OPTIONS (RFC 3261)
    Options,
    /// REGISTER (RFC 3261)
    Register,
    /// INFO (RFC 6086)
    Info,
    /// PRACK (RFC 3262)
    Prack,
    /// UPDATE (RFC 3311)
    Update,
    /// MESSAGE (RFC 3428)
    Message,
    /// SUBSCRIBE (RFC 6665)
    Subscribe,
    /// NOTIFY (RFC 6665)
    Notify,
    /// REFER (RFC 3515)
    Refer,
    /// PUBLISH (RFC 3903)
    Publish,
    /// Any other method token
    Extension(String),
}

impl Method {
    /// Code shared by every extension method.
    pub const EXTENSION_CODE: u8 = 0;

    /// Number of distinct method codes, extension code included.
    pub const CODE_COUNT: usize = 15;

    /// All well-known methods in code order (codes `1..CODE_COUNT`).
    pub const KNOWN: [Method; 14] = [
        Method::Invite,
        Method::Ack,
        Method::Cancel,
        Method::Bye,
        Method::Options,
        Method::Register,
        Method::Info,
        Method::Prack,
        Method::Update,
        Method::Message,
        Method::Subscribe,
        Method::Notify,
        Method::Refer,
        Method::Publish,
    ];

    /// Create an extension method after validating its token.
    pub fn extension(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || !name.bytes().all(is_token_char) {
            return Err(Error::invalid_method(name));
        }
        Ok(Method::Extension(name))
    }

    /// Stable numeric code of this method.
    ///
    /// Well-known methods map to `1..=14` in the order of [`Method::KNOWN`];
    /// extension methods share [`Method::EXTENSION_CODE`].
    pub fn code(&self) -> u8 {
        match self {
            Method::Extension(_) => Self::EXTENSION_CODE,
            Method::Invite => 1,
            Method::Ack => 2,
            Method::Cancel => 3,
            Method::Bye => 4,
            Method::Options => 5,
            Method::Register => 6,
            Method::Info => 7,
            Method::Prack => 8,
            Method::Update => 9,
            Method::Message => 10,
            Method::Subscribe => 11,
            Method::Notify => 12,
            Method::Refer => 13,
            Method::Publish => 14,
        }
    }

    /// Well-known method for a code. Returns `None` for the extension code and
    /// for codes past the table.
    pub fn from_code(code: u8) -> Option<Method> {
        match code {
            0 => None,
            c => Self::KNOWN.get(usize::from(c) - 1).cloned(),
        }
    }

    /// The method token as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Invite => "INVITE",
            Method::Ack => "ACK",
            Method::Cancel => "CANCEL",
            Method::Bye => "BYE",
            Method::Options => "OPTIONS",
            Method::Register => "REGISTER",
            Method::Info => "INFO",
            Method::Prack => "PRACK",
            Method::Update => "UPDATE",
            Method::Message => "MESSAGE",
            Method::Subscribe => "SUBSCRIBE",
            Method::Notify => "NOTIFY",
            Method::Refer => "REFER",
            Method::Publish => "PUBLISH",
            Method::Extension(name) => name,
        }
    }

    /// True for methods outside the well-known set.
    pub fn is_extension(&self) -> bool {
        matches!(self, Method::Extension(_))
    }
}

// token = 1*(alphanum / "-" / "." / "!" / "%" / "*" / "_" / "+" / "`" / "'" / "~")
pub(crate) fn is_token_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, b'-' | b'.' | b'!' | b'%' | b'*' | b'_' | b'+' | b'`' | b'\'' | b'~')
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INVITE" => Ok(Method::Invite),
            "ACK" => Ok(Method::Ack),
            "CANCEL" => Ok(Method::Cancel),
            "BYE" => Ok(Method::Bye),
            "OPTIONS" => Ok(Method::Options),
            "REGISTER" => Ok(Method::Register),
            "INFO" => Ok(Method::Info),
            "PRACK" => Ok(Method::Prack),
            "UPDATE" => Ok(Method::Update),
            "MESSAGE" => Ok(Method::Message),
            "SUBSCRIBE" => Ok(Method::Subscribe),
            "NOTIFY" => Ok(Method::Notify),
            "REFER" => Ok(Method::Refer),
            "PUBLISH" => Ok(Method::Publish),
            other => Method::extension(other),
        }
    }
}
