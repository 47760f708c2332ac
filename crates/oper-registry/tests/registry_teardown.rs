mod common;

use common::{TestOp, init_logging};
use pretty_assertions::assert_eq;
use uactl_oper_registry::prelude::*;
use uactl_sip_core::Method;

const TO: &str = "<sip:carol@chicago.com>";
const FROM: &str = "<sip:dave@denver.com>;tag=77";

fn populated(count: usize) -> (OperRegistry<TestOp>, Vec<TestOp>) {
    let mut registry = OperRegistry::new();
    let ops: Vec<_> = (0..count)
        .map(|i| {
            let method = if i % 2 == 0 { Method::Invite } else { Method::extension("X-KEEPALIVE").unwrap() };
            TestOp::with_endpoints(&format!("op{}", i), method, TO, FROM)
        })
        .collect();
    for op in &ops {
        registry.add(op).unwrap();
    }
    (registry, ops)
}

#[test]
fn test_free_destroys_every_operation_once() {
    init_logging();
    let (mut registry, ops) = populated(5);

    assert_eq!(registry.free(), 5);
    assert!(!registry.is_allocated());
    assert_eq!(registry.size(), 0);
    for op in &ops {
        assert_eq!(op.destroy_count(), 1, "{:?}", op);
        assert_eq!(op.index_handle(), None);
    }

    assert_eq!(registry.free(), 0);
    for op in &ops {
        assert_eq!(op.destroy_count(), 1);
    }
}

#[test]
fn test_free_no_destroy_only_clears_handles() {
    init_logging();
    let (mut registry, ops) = populated(4);

    assert_eq!(registry.free_no_destroy(), 4);
    for op in &ops {
        assert!(!op.is_destroyed());
        assert_eq!(op.index_handle(), None);
    }
    assert_eq!(registry.free_no_destroy(), 0);
}

#[test]
fn test_drop_does_not_destroy() {
    init_logging();
    let (registry, ops) = populated(3);
    drop(registry);
    for op in &ops {
        assert!(!op.is_destroyed());
        assert_eq!(op.index_handle(), None);
    }
}

#[test]
fn test_registry_is_reusable_after_free() {
    init_logging();
    let (mut registry, ops) = populated(2);
    registry.free_no_destroy();

    assert_eq!(registry.add(&ops[0]).map(|_| ()), Ok(()));
    assert!(registry.is_allocated());
    assert_eq!(registry.size(), 1);
    assert_eq!(registry.find_method_str(Some(TO), Some(FROM), &Method::Invite), Some(&ops[0]));
}

#[test]
fn test_foreign_handle_is_refused() {
    init_logging();
    let mut first = OperRegistry::new();
    let mut second = OperRegistry::new();
    let op = TestOp::with_endpoints("shared", Method::Update, TO, FROM);
    let handle = first.add(&op).unwrap();

    assert_eq!(
        second.remove(&op),
        Err(RegistryError::ForeignHandle {
            handle,
            registry: second.id(),
        })
    );
    assert!(second.add(&op).is_err());
    assert_eq!(op.index_handle(), Some(handle));
    assert_eq!(first.size(), 1);
    assert!(!second.contains(&op));
    assert!(second.get(handle).is_none());

    assert_eq!(first.remove(&op), Ok(true));
}

#[test]
fn test_stale_handle_is_detected() {
    init_logging();
    let mut registry = OperRegistry::new();
    let old = TestOp::with_endpoints("old", Method::Cancel, TO, FROM);
    let new = TestOp::with_endpoints("new", Method::Cancel, TO, FROM);

    let stale = registry.add(&old).unwrap();
    registry.remove(&old).unwrap();
    let fresh = registry.add(&new).unwrap();
    assert_eq!(fresh.slot(), stale.slot());
    assert_ne!(fresh.generation(), stale.generation());

    // Simulate an operation that kept its handle past removal.
    old.set_index_handle(Some(stale));
    assert_eq!(registry.remove(&old), Err(RegistryError::StaleHandle(stale)));
    assert_eq!(registry.get(stale), None);
    assert_eq!(registry.get(fresh), Some(&new));
    assert_eq!(registry.size(), 1);
}

#[test]
fn test_handle_from_freed_table_is_stale() {
    init_logging();
    let mut registry = OperRegistry::new();
    let old = TestOp::with_endpoints("old", Method::Bye, TO, FROM);
    let new = TestOp::with_endpoints("new", Method::Bye, TO, FROM);

    let stale = registry.add(&old).unwrap();
    assert_eq!(registry.free_no_destroy(), 1);
    let fresh = registry.add(&new).unwrap();

    // Same slot and generation in the new table; only the epoch differs.
    assert_eq!(fresh.slot(), stale.slot());
    assert_eq!(fresh.generation(), stale.generation());
    assert_ne!(fresh.epoch(), stale.epoch());
    assert_ne!(fresh, stale);

    old.set_index_handle(Some(stale));
    assert_eq!(registry.get(stale), None);
    assert!(!registry.contains(&old));
    assert_eq!(registry.remove(&old), Err(RegistryError::StaleHandle(stale)));
    assert_eq!(old.index_handle(), Some(stale));

    assert_eq!(registry.size(), 1);
    assert_eq!(new.index_handle(), Some(fresh));
    assert_eq!(registry.get(fresh), Some(&new));
    assert_eq!(registry.remove(&new), Ok(true));
    assert_eq!(registry.size(), 0);
}

#[test]
fn test_remove_without_table_is_a_no_op() {
    init_logging();
    let mut registry = OperRegistry::new();
    let op = TestOp::with_endpoints("op", Method::Options, TO, FROM);

    let handle = registry.add(&op).unwrap();
    assert_eq!(registry.free_no_destroy(), 1);
    assert!(!registry.is_allocated());

    op.set_index_handle(Some(handle));
    assert_eq!(registry.remove(&op), Ok(false));
    assert_eq!(registry.remove(&op), Ok(false));
    assert!(!registry.is_allocated());
    assert_eq!(registry.size(), 0);
    assert_eq!(op.destroy_count(), 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        OperRegistry::<TestOp>::with_config(RegistryConfig::new().with_bucket_count(0)),
        Err(RegistryError::Configuration(_))
    ));
    let registry = OperRegistry::<TestOp>::with_config(
        RegistryConfig::from_toml_str("bucket_count = 64").unwrap(),
    )
    .unwrap();
    assert_eq!(registry.config().bucket_count, 64);
    assert!(!registry.is_allocated());
}
