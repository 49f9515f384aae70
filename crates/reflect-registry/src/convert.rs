//! Conversion and comparison registries.
//!
//! Converters are keyed by (source type, target type): one source may fan
//! out to several targets, each target registered once. Comparators are one
//! per type. Both follow the registry-wide rule that duplicates and invalid
//! ids are silent no-ops.

use reflect_core::{Comparator, Converter, TypeId};

use crate::by_id::ByIdStore;

/// Converters grouped by source type.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: ByIdStore<Converter>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter from `source` to the converter's target type.
    /// A second converter for the same (source, target) pair is dropped.
    pub fn register(&mut self, source: TypeId, converter: Converter) {
        if !source.is_valid() {
            return;
        }
        if self.get(source, converter.target_type()).is_some() {
            return;
        }
        self.converters.insert(source, converter);
    }

    /// The converter from `source` to `target`, if registered.
    pub fn get(&self, source: TypeId, target: TypeId) -> Option<Converter> {
        self.converters
            .iter_run(source)
            .find(|c| c.target_type() == target)
            .cloned()
    }
}

/// One comparator per type.
#[derive(Default)]
pub struct ComparatorRegistry {
    comparators: ByIdStore<Comparator>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the comparator for `t`. A second registration is dropped.
    pub fn register(&mut self, t: TypeId, comparator: Comparator) {
        if !t.is_valid() {
            return;
        }
        if self.get(t).is_some() {
            return;
        }
        self.comparators.insert(t, comparator);
    }

    /// The comparator for `t`, if registered.
    pub fn get(&self, t: TypeId) -> Option<Comparator> {
        self.comparators.get(t).cloned()
    }
}
