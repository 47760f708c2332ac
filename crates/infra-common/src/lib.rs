//! # uactl-infra-common
//!
//! Infrastructure shared by the uactl crates: `tracing` subscriber setup and
//! the errors it reports.

pub mod errors;
pub mod logging;

pub use errors::{Error, Result};
pub use logging::{setup_logging, try_setup_logging, LoggingConfig};
