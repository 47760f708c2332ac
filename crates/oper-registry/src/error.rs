//! Error types for the operation registry

use std::fmt;

use thiserror::Error;

use crate::handle::{IndexHandle, RegistryId};

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Which side of the exchange an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    /// The remote party (To)
    To,
    /// The local party (From)
    From,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::To => f.write_str("To"),
            Party::From => f.write_str("From"),
        }
    }
}

/// Errors returned by [`OperRegistry`](crate::OperRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required input is absent (no protocol handle on the operation)
    #[error("Missing context: {0}")]
    NullContext(String),

    /// The operation already carries an index handle
    #[error("Operation is already indexed ({handle})")]
    AlreadyIndexed { handle: IndexHandle },

    /// Storage for a node or a string copy could not be obtained
    #[error("Allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },

    /// A method slot index outside the table
    #[error("Method slot {value} out of range (max {max})")]
    MethodOutOfRange { value: usize, max: usize },

    /// A To or From value that is missing or cannot be read
    #[error("Bad {party} identity: {reason}")]
    BadIdentity { party: Party, reason: String },

    /// The handle was issued by a different registry
    #[error("Handle {handle} was not issued by registry {registry}")]
    ForeignHandle {
        handle: IndexHandle,
        registry: RegistryId,
    },

    /// The handle's node has already been removed
    #[error("Stale index handle {0}")]
    StaleHandle(IndexHandle),

    /// Invalid registry configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RegistryError {
    pub fn null_context(what: impl Into<String>) -> Self {
        Self::NullContext(what.into())
    }

    pub fn allocation(bytes: usize) -> Self {
        Self::AllocationFailure { bytes }
    }

    pub fn bad_identity(party: Party, reason: impl Into<String>) -> Self {
        Self::BadIdentity {
            party,
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
