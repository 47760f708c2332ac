//! # uactl-sip-core
//!
//! The slice of SIP that the user-agent control layer needs to identify an
//! exchange: request methods, SIP/SIPS/TEL URIs, and the name-addr values
//! carried in To and From headers, together with the nom parsers that read
//! them from text.
//!
//! ```rust
//! use uactl_sip_core::prelude::*;
//! use std::str::FromStr;
//!
//! let to = Address::from_str("<sip:alice@example.com>").unwrap();
//! assert_eq!(to.user(), Some("alice"));
//! assert_eq!(Method::from_str("REGISTER").unwrap(), Method::Register);
//! ```

pub mod error;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use types::{Address, Method, Param, Scheme, Uri};

/// Commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Address, Method, Param, Scheme, Uri};
}
