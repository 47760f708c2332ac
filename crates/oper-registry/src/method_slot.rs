//! Per-method list selection inside a bucket.

use std::fmt;

use uactl_sip_core::Method;

use crate::error::RegistryError;

/// Number of method lists in every bucket: one per known method plus the
/// shared extension list at slot 0.
pub const METHOD_SLOTS: usize = Method::CODE_COUNT;

/// Index of one method list within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodSlot(u8);

impl MethodSlot {
    /// Slot shared by every extension method
    pub const UNKNOWN: MethodSlot = MethodSlot(Method::EXTENSION_CODE);

    /// Slot a method is filed under
    pub fn for_method(method: &Method) -> Self {
        MethodSlot(method.code())
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The known method for this slot, `None` for [`MethodSlot::UNKNOWN`]
    pub fn method(self) -> Option<Method> {
        Method::from_code(self.0)
    }

    /// Every slot in ascending order
    pub fn all() -> impl Iterator<Item = MethodSlot> {
        (0..METHOD_SLOTS as u8).map(MethodSlot)
    }
}

impl TryFrom<usize> for MethodSlot {
    type Error = RegistryError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < METHOD_SLOTS {
            Ok(MethodSlot(value as u8))
        } else {
            Err(RegistryError::MethodOutOfRange {
                value,
                max: METHOD_SLOTS - 1,
            })
        }
    }
}

impl fmt::Display for MethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method() {
            Some(method) => write!(f, "{}", method),
            None => f.write_str("<extension>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_have_own_slot() {
        let mut seen = [false; METHOD_SLOTS];
        for method in Method::KNOWN.iter() {
            let slot = MethodSlot::for_method(method);
            assert_ne!(slot, MethodSlot::UNKNOWN, "{} shares the extension slot", method);
            assert!(!seen[slot.index()]);
            seen[slot.index()] = true;
            assert_eq!(slot.method().as_ref(), Some(method));
        }
    }

    #[test]
    fn test_extensions_share_slot_zero() {
        let foo = Method::extension("FOO").unwrap();
        let bar = Method::extension("BAR").unwrap();
        assert_eq!(MethodSlot::for_method(&foo), MethodSlot::UNKNOWN);
        assert_eq!(MethodSlot::for_method(&bar), MethodSlot::UNKNOWN);
        assert_eq!(MethodSlot::UNKNOWN.method(), None);
    }

    #[test]
    fn test_range_check() {
        assert_eq!(MethodSlot::try_from(14).unwrap().index(), 14);
        assert_eq!(
            MethodSlot::try_from(15),
            Err(RegistryError::MethodOutOfRange { value: 15, max: 14 })
        );
        assert_eq!(MethodSlot::all().count(), METHOD_SLOTS);
    }
}
