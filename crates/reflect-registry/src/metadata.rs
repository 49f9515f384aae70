//! Per-type metadata key/value lists.
//!
//! Each type owns at most one list of [`MetadataEntry`] items, created
//! lazily on first registration and kept sorted by key for binary-search
//! lookup. Within one registration batch the first entry for a key wins;
//! across batches existing keys are never overwritten.

use reflect_core::{TypeId, Variant};

use crate::by_id::ByIdStore;

/// One metadata key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub key: Variant,
    pub value: Variant,
}

impl MetadataEntry {
    pub fn new(key: impl Into<Variant>, value: impl Into<Variant>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Metadata lists for all types.
#[derive(Default)]
pub struct MetadataStore {
    lists: ByIdStore<Vec<MetadataEntry>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `entries` to `t`. Invalid ids and empty batches are no-ops;
    /// keys already present on `t` keep their existing value.
    pub fn register(&mut self, t: TypeId, entries: Vec<MetadataEntry>) {
        if !t.is_valid() || entries.is_empty() {
            return;
        }

        if self.lists.get(t).is_none() {
            self.lists.insert(t, Vec::new());
        }
        let Some(list) = self.lists.get_mut(t) else {
            return;
        };
        for entry in entries {
            if list.binary_search_by(|e| e.key.cmp(&entry.key)).is_err() {
                list.push(entry);
                list.sort_by(|a, b| a.key.cmp(&b.key));
            }
        }
    }

    /// The value stored for `key` on `t`, if any.
    pub fn get(&self, t: TypeId, key: &Variant) -> Option<&Variant> {
        let list = self.lists.get(t)?;
        let pos = list.binary_search_by(|e| e.key.cmp(key)).ok()?;
        Some(&list[pos].value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> TypeId {
        TypeId::from_raw(raw)
    }

    #[test]
    fn missing_metadata_is_none() {
        let store = MetadataStore::new();
        assert!(store.get(id(1), &Variant::from("script_class")).is_none());
    }

    #[test]
    fn first_value_per_key_wins() {
        let mut store = MetadataStore::new();
        store.register(
            id(1),
            vec![
                MetadataEntry::new("tooltip", "first"),
                MetadataEntry::new("tooltip", "second"),
            ],
        );
        store.register(id(1), vec![MetadataEntry::new("tooltip", "third")]);
        assert_eq!(
            store.get(id(1), &Variant::from("tooltip")),
            Some(&Variant::from("first"))
        );
    }

    #[test]
    fn keys_of_mixed_kinds_coexist() {
        let mut store = MetadataStore::new();
        store.register(
            id(2),
            vec![
                MetadataEntry::new("editable", true),
                MetadataEntry::new(10_i64, "slot ten"),
            ],
        );
        assert!(store.get(id(2), &Variant::from(true)).is_none());
        assert_eq!(
            store.get(id(2), &Variant::from("editable")),
            Some(&Variant::from(true))
        );
        assert_eq!(
            store.get(id(2), &Variant::from(10_i64)),
            Some(&Variant::from("slot ten"))
        );
    }

    #[test]
    fn invalid_or_empty_registration_is_a_no_op() {
        let mut store = MetadataStore::new();
        store.register(TypeId::INVALID, vec![MetadataEntry::new("k", 1_i64)]);
        store.register(id(3), Vec::new());
        assert!(store.get(TypeId::INVALID, &Variant::from("k")).is_none());
        assert!(store.get(id(3), &Variant::from("k")).is_none());
    }
}
