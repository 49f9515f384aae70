//! Fixed-width inheritance adjacency table.
//!
//! Per raw type id, one row of [`MAX_BASE_CLASSES`] base-class slots with a
//! parallel row of upcast functions, and one row of derived-class slots.
//! Rows are grown on demand and unused slots hold [`TypeId::INVALID`].
//! Base rows are canonical: edges are deduplicated and sorted by base id
//! ascending, so traversal order is root-to-leaf regardless of the order a
//! producer declared its bases in.
//!
//! Exceeding the row width truncates; the dropped edges are reported with
//! `log::warn!` but registration still succeeds with the retained edges.

use rustc_hash::FxHashSet;

use reflect_core::TypeId;

/// Maximum number of base classes (and derived-class slots) per raw type.
pub const MAX_BASE_CLASSES: usize = 50;

/// Pointer-adjusting upcast from a derived instance to one of its bases.
pub type CastFn = fn(*const ()) -> *const ();

/// One base-class edge supplied at registration.
#[derive(Debug, Clone, Copy)]
pub struct BaseClassEdge {
    /// The base type.
    pub base: TypeId,
    /// Upcast function for this edge, if the producer supplied one.
    pub cast: Option<CastFn>,
}

impl BaseClassEdge {
    /// An edge without an upcast function.
    pub fn new(base: TypeId) -> Self {
        Self { base, cast: None }
    }

    /// An edge with an upcast function.
    pub fn with_cast(base: TypeId, cast: CastFn) -> Self {
        Self {
            base,
            cast: Some(cast),
        }
    }
}

/// Base- and derived-class rows for all raw types.
#[derive(Default)]
pub struct InheritanceGraph {
    /// `MAX_BASE_CLASSES` base slots per raw id.
    base_classes: Vec<TypeId>,
    /// Upcast function per base slot.
    casts: Vec<Option<CastFn>>,
    /// `MAX_BASE_CLASSES` derived slots per raw id.
    derived_classes: Vec<TypeId>,
}

impl InheritanceGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `derived`'s base classes on `raw_type`'s row and insert
    /// `derived` into each base's derived row.
    ///
    /// `raw_of` resolves a base id to its raw id for the derived-row
    /// bookkeeping. Duplicate bases (virtual/diamond inheritance) are
    /// removed keeping the first occurrence seen when scanning from the
    /// end; the survivors are sorted by base id ascending.
    pub fn register(
        &mut self,
        derived: TypeId,
        raw_type: TypeId,
        mut edges: Vec<BaseClassEdge>,
        raw_of: impl Fn(TypeId) -> TypeId,
    ) {
        if !raw_type.is_valid() {
            return;
        }

        let mut seen = FxHashSet::default();
        let mut keep = vec![true; edges.len()];
        for i in (0..edges.len()).rev() {
            if !seen.insert(edges[i].base) {
                keep[i] = false;
            }
        }
        let mut keep_iter = keep.into_iter();
        edges.retain(|_| keep_iter.next().unwrap_or(false));

        edges.sort_by_key(|e| e.base);

        if edges.len() > MAX_BASE_CLASSES {
            log::warn!(
                "type {derived} declares {} base classes, truncating to {MAX_BASE_CLASSES}",
                edges.len()
            );
            edges.truncate(MAX_BASE_CLASSES);
        }

        let row = raw_type.index() * MAX_BASE_CLASSES;
        grow(&mut self.base_classes, row + MAX_BASE_CLASSES, TypeId::INVALID);
        grow(&mut self.casts, row + MAX_BASE_CLASSES, None);
        for (i, edge) in edges.iter().enumerate() {
            self.base_classes[row + i] = edge.base;
            self.casts[row + i] = edge.cast;
        }

        for edge in &edges {
            let base_row = raw_of(edge.base).index() * MAX_BASE_CLASSES;
            grow(
                &mut self.derived_classes,
                base_row + MAX_BASE_CLASSES,
                TypeId::INVALID,
            );
            let slots = &mut self.derived_classes[base_row..base_row + MAX_BASE_CLASSES];
            match slots.iter_mut().find(|slot| !slot.is_valid()) {
                Some(slot) => *slot = derived,
                None => log::warn!(
                    "derived-class row of type {} is full, dropping {derived}",
                    edge.base
                ),
            }
        }
    }

    /// Base classes of `raw`, root-to-leaf order.
    pub fn base_classes(&self, raw: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        row_of(&self.base_classes, raw)
            .iter()
            .copied()
            .take_while(|t| t.is_valid())
    }

    /// Types that list `raw` as a base, in registration order.
    pub fn derived_classes(&self, raw: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        row_of(&self.derived_classes, raw)
            .iter()
            .copied()
            .take_while(|t| t.is_valid())
    }

    /// The upcast function from `raw` to `base`, if that edge exists and
    /// carries one.
    pub fn cast_to_base(&self, raw: TypeId, base: TypeId) -> Option<CastFn> {
        let row = row_of(&self.base_classes, raw);
        let offset = raw.index() * MAX_BASE_CLASSES;
        for (i, slot) in row.iter().enumerate() {
            if !slot.is_valid() {
                break;
            }
            if *slot == base {
                return self.casts[offset + i];
            }
        }
        None
    }
}

fn grow<T: Copy>(vec: &mut Vec<T>, len: usize, fill: T) {
    if vec.len() < len {
        vec.resize(len, fill);
    }
}

fn row_of(vec: &[TypeId], raw: TypeId) -> &[TypeId] {
    let start = raw.index() * MAX_BASE_CLASSES;
    if !raw.is_valid() || start + MAX_BASE_CLASSES > vec.len() {
        return &[];
    }
    &vec[start..start + MAX_BASE_CLASSES]
}
