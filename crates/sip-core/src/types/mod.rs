//! SIP identity value types

pub mod address;
pub mod method;
pub mod param;
pub mod uri;

pub use address::Address;
pub use method::Method;
pub use param::Param;
pub use uri::{Scheme, Uri};
