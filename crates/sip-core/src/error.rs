//! Error types for the SIP identity model

use thiserror::Error;

/// Result type for SIP identity operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing or building SIP identity values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text is not a URI this crate understands
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The text is not a valid name-addr / addr-spec header value
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The text is not a valid SIP method token
    #[error("Invalid method: {0}")]
    InvalidMethod(String),
}

impl Error {
    /// Create an invalid URI error
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri(message.into())
    }

    /// Create an invalid address error
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress(message.into())
    }

    /// Create an invalid method error
    pub fn invalid_method(message: impl Into<String>) -> Self {
        Self::InvalidMethod(message.into())
    }
}
