//! Dense integer type identity.
//!
//! This module provides [`TypeId`], the handle every other part of the
//! reflection system keys on. Ids are assigned monotonically at registration
//! time, never reused, and double as indexes into the registry's dense
//! attribute tables.
//!
//! # Examples
//!
//! ```
//! use reflect_core::TypeId;
//!
//! assert!(!TypeId::INVALID.is_valid());
//! assert!(TypeId::from_raw(1).is_valid());
//! ```

use std::fmt;

/// Identity of a registered type.
///
/// `TypeId(0)` is the reserved invalid sentinel; lookups that miss return it
/// instead of failing. A valid id is also the index of the type's row in the
/// registry's attribute table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The reserved "no such type" sentinel.
    pub const INVALID: TypeId = TypeId(0);

    /// Build an id from its raw value. `0` yields [`TypeId::INVALID`].
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    /// The raw numeric value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this id refers to a registered type.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// The id as a dense-table index. Index 0 is the sentinel row.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for TypeId {
    fn default() -> Self {
        TypeId::INVALID
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "TypeId({})", self.0)
        } else {
            write!(f, "TypeId(invalid)")
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_is_zero() {
        assert_eq!(TypeId::INVALID.raw(), 0);
        assert!(!TypeId::INVALID.is_valid());
        assert_eq!(TypeId::default(), TypeId::INVALID);
    }

    #[test]
    fn valid_round_trip() {
        let id = TypeId::from_raw(42);
        assert!(id.is_valid());
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(TypeId::from_raw(1) < TypeId::from_raw(2));
    }

    #[test]
    fn debug_marks_invalid() {
        assert_eq!(format!("{:?}", TypeId::INVALID), "TypeId(invalid)");
        assert_eq!(format!("{:?}", TypeId::from_raw(3)), "TypeId(3)");
    }
}
