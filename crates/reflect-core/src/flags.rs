//! Type classification flags and registration traits.

use bitflags::bitflags;

use crate::TypeId;

bitflags! {
    /// Classification flags recorded for every registered type.
    ///
    /// These answer the cheap "what kind of thing is this" questions that
    /// serialization and editor layers ask constantly, without touching the
    /// type's members.
    ///
    /// # Examples
    ///
    /// ```
    /// use reflect_core::TypeFlags;
    ///
    /// let ptr_to_class = TypeFlags::POINTER;
    /// assert!(!ptr_to_class.contains(TypeFlags::CLASS));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeFlags: u16 {
        /// Class or struct type; eligible for member registration.
        const CLASS = 1 << 0;
        /// Enumeration type.
        const ENUM = 1 << 1;
        /// Array type; `array_raw_type` names the element type.
        const ARRAY = 1 << 2;
        /// Pointer type; see `pointer_dim` for the dimension.
        const POINTER = 1 << 3;
        /// Arithmetic (integral or floating point) type.
        const ARITHMETIC = 1 << 4;
        /// Free function pointer type.
        const FUNCTION_POINTER = 1 << 5;
        /// Pointer-to-member-object type.
        const MEMBER_OBJECT_POINTER = 1 << 6;
        /// Pointer-to-member-function type.
        const MEMBER_FUNCTION_POINTER = 1 << 7;
    }
}

/// Per-type facts supplied at registration and immutable afterwards.
///
/// `raw`, `wrapped` and `array_raw` reference other (usually earlier)
/// registered types; passing [`TypeId::INVALID`] for `raw` or `array_raw`
/// means "this type is its own raw/element type" and the registry
/// substitutes the freshly assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeTraits {
    /// Size of a value of the type, in bytes.
    pub size: usize,
    /// The type stripped of cv/pointer/reference qualification.
    pub raw: TypeId,
    /// Payload type of a smart-pointer-like wrapper, INVALID if none.
    pub wrapped: TypeId,
    /// Element type if this is an array type.
    pub array_raw: TypeId,
    /// Classification flags.
    pub flags: TypeFlags,
    /// Pointer dimension (`T*` = 1, `T**` = 2, ...).
    pub pointer_dim: usize,
}
