//! # uactl-oper-registry
//!
//! Per-user-agent index of in-flight SIP operations.
//!
//! A user agent runs many exchanges at once: registrations, calls,
//! subscriptions, one-shot requests. When a message arrives, the UA needs
//! the operation it belongs to. This crate keeps that index, keyed by the
//! To/From identity (user and host of each) and by SIP method.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::str::FromStr;
//!
//! use uactl_oper_registry::{Endpoints, IndexHandle, OperRegistry, Operation};
//! use uactl_sip_core::{Address, Method};
//!
//! #[derive(Clone)]
//! struct Op(Rc<(Method, Cell<Option<IndexHandle>>)>);
//!
//! impl Operation for Op {
//!     fn method(&self) -> Method { self.0.0.clone() }
//!     fn endpoints(&self) -> Option<Endpoints> { None }
//!     fn index_handle(&self) -> Option<IndexHandle> { self.0.1.get() }
//!     fn set_index_handle(&self, handle: Option<IndexHandle>) { self.0.1.set(handle) }
//!     fn destroy(self) {}
//! }
//!
//! let mut registry = OperRegistry::new();
//! let register = Op(Rc::new((Method::Register, Cell::new(None))));
//!
//! let to = Address::from_str("<sip:alice@atlanta.com>").unwrap();
//! let from = Address::from_str("<sip:alice@atlanta.com>;tag=88sja8x").unwrap();
//! registry.add_with_addrs(&register, Some(&to), Some(&from)).unwrap();
//!
//! assert!(registry.find_method(Some(&to), Some(&from), &Method::Register).is_some());
//! assert!(registry.find_method(Some(&to), Some(&from), &Method::Invite).is_none());
//!
//! assert!(registry.remove(&register).unwrap());
//! assert_eq!(registry.size(), 0);
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod hashed;
pub mod identity;
pub mod method_slot;
pub mod operation;
pub mod registry;

mod table;

pub use config::{DEFAULT_BUCKET_COUNT, RegistryConfig};
pub use error::{Party, RegistryError, Result};
pub use handle::{IndexHandle, RegistryId};
pub use identity::{IdentityKey, NIL_PLACEHOLDER};
pub use method_slot::{METHOD_SLOTS, MethodSlot};
pub use operation::{Endpoints, Operation};
pub use registry::{MatchMode, OperRegistry, RegistryStats};

/// Commonly used types
pub mod prelude {
    pub use crate::config::RegistryConfig;
    pub use crate::error::{RegistryError, Result};
    pub use crate::handle::IndexHandle;
    pub use crate::identity::IdentityKey;
    pub use crate::operation::{Endpoints, Operation};
    pub use crate::registry::{MatchMode, OperRegistry};
}
