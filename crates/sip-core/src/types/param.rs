//! # SIP Parameters
//!
//! Generic `name[=value]` parameters as they appear after URIs
//! (`sip:alice@example.com;transport=tcp`) and after header values
//! (`<sip:bob@example.com>;tag=1928301774`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `;name[=value]` parameter.
///
/// Values are kept exactly as written, including surrounding quotes for
/// quoted-string values.
///
/// ```rust
/// use uactl_sip_core::Param;
///
/// let tag = Param::new("tag", Some("1928301774"));
/// assert_eq!(tag.to_string(), "tag=1928301774");
///
/// let lr = Param::flag("lr");
/// assert_eq!(lr.to_string(), "lr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Parameter value, `None` for flag parameters
    pub value: Option<String>,
}

impl Param {
    /// Create a parameter with an optional value
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    /// Create a flag (valueless) parameter
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Parameter names compare case-insensitively (RFC 3261 Section 19.1.4).
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

/// Look up the first parameter with the given name.
pub(crate) fn find_param<'a>(params: &'a [Param], name: &str) -> Option<&'a Param> {
    params.iter().find(|p| p.is_named(name))
}
