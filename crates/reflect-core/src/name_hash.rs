//! Name hashing for the sorted name indexes.
//!
//! [`NameHash`] is the sort key of the registry's (hash, id) name tables.
//! Two distinct names may collide; the index always confirms a candidate by
//! exact string comparison, so the hash only has to be fast and stable.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// 64-bit xxh64 hash of a type name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NameHash(pub u64);

impl NameHash {
    /// Hash a literal name string.
    ///
    /// Deterministic: the same string always produces the same hash.
    ///
    /// # Examples
    ///
    /// ```
    /// use reflect_core::NameHash;
    ///
    /// assert_eq!(NameHash::of("Vec3"), NameHash::of("Vec3"));
    /// assert_ne!(NameHash::of("Vec3"), NameHash::of("Vec4"));
    /// ```
    #[inline]
    pub fn of(name: &str) -> Self {
        NameHash(xxh64(name.as_bytes(), 0))
    }

    /// The underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameHash({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism() {
        assert_eq!(NameHash::of("int"), NameHash::of("int"));
        assert_eq!(NameHash::of("Game::Player"), NameHash::of("Game::Player"));
    }

    #[test]
    fn distinct_names_distinct_hashes() {
        // Not guaranteed in general, but these must not collide for the
        // suite's fixtures to be meaningful.
        assert_ne!(NameHash::of("int"), NameHash::of("float"));
        assert_ne!(NameHash::of("Vec3"), NameHash::of("Vec3*"));
    }

    #[test]
    fn hash_is_over_literal_text() {
        // Whitespace matters to the hash; normalization happens before
        // hashing, in the name index.
        assert_ne!(NameHash::of("const Vec3"), NameHash::of("constVec3"));
    }
}
