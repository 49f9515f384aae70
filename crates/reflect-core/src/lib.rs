//! Core identity and value types for the reflection registry.
//!
//! This crate holds everything shared between registration producers (the
//! generated per-type registration blocks) and lookup consumers
//! (serialization, editor panels, dynamic call layers):
//!
//! - [`TypeId`]: dense integer type identity, `0` is invalid
//! - [`NameHash`]: xxh64 name hash used by the sorted name indexes
//! - [`TypeFlags`] / [`TypeTraits`]: per-type classification facts
//! - [`Variant`]: small tagged value for metadata and call arguments
//! - Member wrapper traits and their cloneable handles
//!
//! The database itself lives in `reflect-registry`.

mod flags;
mod member;
mod name_hash;
mod type_id;
mod variant;

pub use flags::{TypeFlags, TypeTraits};
pub use member::{
    Argument, Comparator, Constructor, ConstructorWrapper, Converter, Destructor,
    DestructorWrapper, Enumeration, EnumerationWrapper, Method, MethodWrapper, Property,
    PropertyWrapper, TypeComparator, TypeConverter, compare_with_arg_list,
    compare_with_type_list,
};
pub use name_hash::NameHash;
pub use type_id::TypeId;
pub use variant::{Variant, VariantError};
