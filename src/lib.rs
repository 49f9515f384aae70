//! Umbrella crate for the reflection registry.
//!
//! Re-exports the identity and value types from `reflect-core` and the
//! database itself from `reflect-registry`. Most users only need the
//! prelude:
//!
//! ```
//! use reflect::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! let vec3 = registry.register_type(TypeDescriptor::class("Vec3").with_size(12));
//! assert_eq!(registry.get_by_name("Vec3"), vec3);
//! ```

pub use reflect_core as core;
pub use reflect_registry as registry;

pub mod prelude {
    pub use reflect_core::{
        Argument, Comparator, Constructor, ConstructorWrapper, Converter, Destructor,
        DestructorWrapper, Enumeration, EnumerationWrapper, Method, MethodWrapper, NameHash,
        Property, PropertyWrapper, TypeComparator, TypeConverter, TypeFlags, TypeId, TypeTraits,
        Variant, VariantError,
    };
    pub use reflect_registry::{
        BaseClassEdge, CastFn, MetadataEntry, TypeDescriptor, TypeRegistry,
    };
}
