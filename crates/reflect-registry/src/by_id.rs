//! Flat per-type item store, stable-sorted by id.
//!
//! Backing storage for metadata lists, enumeration tables, converters and
//! comparators: a `Vec<(TypeId, T)>` kept sorted by id with a stable sort,
//! so entries sharing an id (converters from one source to several targets)
//! keep their registration order. Lookup binary-searches to the start of
//! the id run.

use reflect_core::TypeId;

pub(crate) struct ByIdStore<T> {
    entries: Vec<(TypeId, T)>,
}

impl<T> ByIdStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry and restore the sort. Stable: same-id entries keep
    /// insertion order.
    pub(crate) fn insert(&mut self, id: TypeId, data: T) {
        self.entries.push((id, data));
        self.entries.sort_by_key(|(id, _)| *id);
    }

    /// First entry for `id`, if any.
    pub(crate) fn get(&self, id: TypeId) -> Option<&T> {
        self.iter_run(id).next()
    }

    /// Mutable first entry for `id`, if any.
    pub(crate) fn get_mut(&mut self, id: TypeId) -> Option<&mut T> {
        let start = self.entries.partition_point(|(e, _)| *e < id);
        match self.entries.get_mut(start) {
            Some((e, data)) if *e == id => Some(data),
            _ => None,
        }
    }

    /// All entries for `id`, in registration order.
    pub(crate) fn iter_run(&self, id: TypeId) -> impl Iterator<Item = &T> {
        let start = self.entries.partition_point(|(e, _)| *e < id);
        self.entries[start..]
            .iter()
            .take_while(move |(e, _)| *e == id)
            .map(|(_, data)| data)
    }
}

impl<T> Default for ByIdStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
