//! Shared fixtures for the registry integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use uactl_infra_common::{LoggingConfig, try_setup_logging};
use uactl_oper_registry::{Endpoints, IndexHandle, Operation};
use uactl_sip_core::{Address, Method};

pub fn init_logging() {
    let _ = try_setup_logging(LoggingConfig::for_tests());
}

pub fn addr(text: &str) -> Address {
    Address::from_str(text).unwrap()
}

struct Inner {
    name: String,
    method: Method,
    endpoints: Option<Endpoints>,
    handle: Cell<Option<IndexHandle>>,
    destroyed: Cell<u32>,
}

/// Reference-counted operation; clones share state like UA operation
/// pointers do.
#[derive(Clone)]
pub struct TestOp(Rc<Inner>);

impl TestOp {
    pub fn new(name: &str, method: Method) -> Self {
        Self::build(name, method, None)
    }

    pub fn with_endpoints(name: &str, method: Method, to: &str, from: &str) -> Self {
        Self::build(
            name,
            method,
            Some(Endpoints::new(Some(addr(to)), Some(addr(from)))),
        )
    }

    pub fn with_raw_endpoints(name: &str, method: Method, endpoints: Endpoints) -> Self {
        Self::build(name, method, Some(endpoints))
    }

    fn build(name: &str, method: Method, endpoints: Option<Endpoints>) -> Self {
        TestOp(Rc::new(Inner {
            name: name.to_string(),
            method,
            endpoints,
            handle: Cell::new(None),
            destroyed: Cell::new(0),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn destroy_count(&self) -> u32 {
        self.0.destroyed.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroy_count() > 0
    }

    pub fn same(&self, other: &TestOp) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TestOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestOp({} {})", self.0.name, self.0.method)
    }
}

impl PartialEq for TestOp {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Operation for TestOp {
    fn method(&self) -> Method {
        self.0.method.clone()
    }

    fn endpoints(&self) -> Option<Endpoints> {
        self.0.endpoints.clone()
    }

    fn index_handle(&self) -> Option<IndexHandle> {
        self.0.handle.get()
    }

    fn set_index_handle(&self, handle: Option<IndexHandle>) {
        self.0.handle.set(handle);
    }

    fn destroy(self) {
        self.0.destroyed.set(self.0.destroyed.get() + 1);
    }
}

/// The name of the operation a lookup returned, for readable assertions.
pub fn name_of(found: Option<&TestOp>) -> Option<&str> {
    found.map(TestOp::name)
}
