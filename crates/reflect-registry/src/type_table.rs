//! Dense per-type attribute table.
//!
//! One [`TypeRow`] per registered id, indexed directly by [`TypeId`]. Row 0
//! is the invalid-type sentinel; every accessor is bounds checked against
//! it, so a stale or invalid id reads as "not a class, size 0, raw type
//! invalid" rather than panicking.

use reflect_core::{TypeFlags, TypeId, TypeTraits};

/// Attributes of one registered type. Immutable once pushed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeRow {
    /// Size of a value, in bytes.
    pub size: usize,
    /// Raw (qualification-stripped) type id; self-referential if raw.
    pub raw: TypeId,
    /// Wrapped (smart-pointer payload) type id; INVALID if none.
    pub wrapped: TypeId,
    /// Array element type id; self-referential if not an array.
    pub array_raw: TypeId,
    /// Classification flags.
    pub flags: TypeFlags,
    /// Pointer dimension.
    pub pointer_dim: usize,
}

/// All attribute rows, in id order.
pub struct TypeTable {
    rows: Vec<TypeRow>,
}

impl TypeTable {
    /// A table holding only the sentinel row.
    pub fn new() -> Self {
        Self {
            rows: vec![TypeRow::default()],
        }
    }

    /// Number of rows, sentinel included. The next pushed row gets the id
    /// equal to the current length.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether only the sentinel row exists.
    pub fn is_empty(&self) -> bool {
        self.rows.len() == 1
    }

    /// Append the row for a freshly assigned id.
    ///
    /// `raw` and `array_raw` must already be resolved (self-referential ids
    /// substituted); the table stores what it is given.
    pub fn push(&mut self, traits: TypeTraits) {
        self.rows.push(TypeRow {
            size: traits.size,
            raw: traits.raw,
            wrapped: traits.wrapped,
            array_raw: traits.array_raw,
            flags: traits.flags,
            pointer_dim: traits.pointer_dim,
        });
    }

    /// The row for `t`, or the sentinel row when out of range.
    pub fn row(&self, t: TypeId) -> &TypeRow {
        self.rows.get(t.index()).unwrap_or(&self.rows[0])
    }

    /// Byte size of `t`.
    pub fn size_of(&self, t: TypeId) -> usize {
        self.row(t).size
    }

    /// Raw type id of `t`.
    pub fn raw_type(&self, t: TypeId) -> TypeId {
        self.row(t).raw
    }

    /// Wrapped type id of `t`.
    pub fn wrapped_type(&self, t: TypeId) -> TypeId {
        self.row(t).wrapped
    }

    /// Array element type id of `t`.
    pub fn array_raw_type(&self, t: TypeId) -> TypeId {
        self.row(t).array_raw
    }

    /// Pointer dimension of `t`.
    pub fn pointer_dimension(&self, t: TypeId) -> usize {
        self.row(t).pointer_dim
    }

    /// Whether `t` carries the given classification flag(s).
    pub fn has_flags(&self, t: TypeId, flags: TypeFlags) -> bool {
        self.row(t).flags.contains(flags)
    }

    /// Whether `t` is a class type.
    pub fn is_class(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::CLASS)
    }

    /// Whether `t` is an enumeration type.
    pub fn is_enum(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::ENUM)
    }

    /// Whether `t` is an array type.
    pub fn is_array(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::ARRAY)
    }

    /// Whether `t` is a pointer type.
    pub fn is_pointer(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::POINTER)
    }

    /// Whether `t` is an arithmetic type.
    pub fn is_arithmetic(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::ARITHMETIC)
    }

    /// Whether `t` is a free function pointer type.
    pub fn is_function_pointer(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::FUNCTION_POINTER)
    }

    /// Whether `t` is a pointer-to-member-object type.
    pub fn is_member_object_pointer(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::MEMBER_OBJECT_POINTER)
    }

    /// Whether `t` is a pointer-to-member-function type.
    pub fn is_member_function_pointer(&self, t: TypeId) -> bool {
        self.has_flags(t, TypeFlags::MEMBER_FUNCTION_POINTER)
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
