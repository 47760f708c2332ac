//! The contract between the registry and the operations it indexes.

use uactl_sip_core::{Address, Method};

use crate::handle::IndexHandle;

/// To and From values of an operation's protocol handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    /// The remote party (To)
    pub remote: Option<Address>,
    /// The local party (From)
    pub local: Option<Address>,
}

impl Endpoints {
    pub fn new(remote: Option<Address>, local: Option<Address>) -> Self {
        Self { remote, local }
    }
}

/// An in-flight SIP exchange as seen by the registry.
///
/// Operations are reference types owned by the user agent. The registry
/// keeps a clone of the reference in each index node and never decides
/// when an operation dies, except through [`Operation::destroy`] during
/// [`OperRegistry::free`](crate::OperRegistry::free).
///
/// The index handle lives inside the operation and is written through a
/// shared reference, so implementations use interior mutability
/// (`Cell<Option<IndexHandle>>` is enough).
pub trait Operation: Clone {
    /// Method the operation was created for
    fn method(&self) -> Method;

    /// Protocol handle with the To/From values, `None` if not yet attached
    fn endpoints(&self) -> Option<Endpoints>;

    /// Current back-reference into a registry
    fn index_handle(&self) -> Option<IndexHandle>;

    /// Record or clear the back-reference
    fn set_index_handle(&self, handle: Option<IndexHandle>);

    /// Final release, called once per operation by a destroying teardown
    fn destroy(self);
}
