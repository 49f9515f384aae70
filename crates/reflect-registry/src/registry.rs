//! The registry facade.
//!
//! [`TypeRegistry`] owns every store and is the single entry point for both
//! registration producers and lookup consumers. Registration takes
//! `&mut self`, lookups take `&self`; all cross-store coordination (raw-id
//! resolution, class-vs-global member routing, flattened-view rebuilds)
//! happens here so the stores themselves stay single-purpose.
//!
//! # Examples
//!
//! ```
//! use reflect_registry::{TypeDescriptor, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! let vec3 = registry.register_type(TypeDescriptor::class("Vec3").with_size(12));
//! assert_eq!(registry.get_by_name("Vec3"), vec3);
//! assert_eq!(registry.size_of(vec3), 12);
//! assert!(registry.is_class(vec3));
//! ```

use reflect_core::{
    Argument, Comparator, Constructor, Converter, Destructor, Enumeration, Method, Property,
    TypeFlags, TypeId, TypeTraits, Variant,
};

use crate::by_id::ByIdStore;
use crate::convert::{ComparatorRegistry, ConverterRegistry};
use crate::inheritance::{BaseClassEdge, CastFn, InheritanceGraph};
use crate::members::MemberRegistry;
use crate::metadata::{MetadataEntry, MetadataStore};
use crate::name_index::NameIndex;
use crate::type_table::TypeTable;

/// Everything a producer declares about one type.
///
/// Built builder-style; unset ids default to self-referential (raw,
/// array-raw) or invalid (wrapped) at registration time.
#[derive(Default)]
pub struct TypeDescriptor {
    name: String,
    size: usize,
    raw_type: TypeId,
    wrapped_type: TypeId,
    array_raw_type: TypeId,
    flags: TypeFlags,
    pointer_dim: usize,
    base_classes: Vec<BaseClassEdge>,
}

impl TypeDescriptor {
    /// A descriptor with no classification flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A descriptor pre-flagged as a class type.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(TypeFlags::CLASS)
    }

    /// Byte size of a value of this type.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// The qualification-stripped form of this type.
    pub fn with_raw_type(mut self, raw: TypeId) -> Self {
        self.raw_type = raw;
        self
    }

    /// The payload type when this type is a wrapper (smart pointer).
    pub fn with_wrapped_type(mut self, wrapped: TypeId) -> Self {
        self.wrapped_type = wrapped;
        self
    }

    /// The element type this type's display name is derived from.
    pub fn with_array_raw_type(mut self, array_raw: TypeId) -> Self {
        self.array_raw_type = array_raw;
        self
    }

    /// Add classification flags.
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Pointer indirection depth.
    pub fn with_pointer_dim(mut self, dim: usize) -> Self {
        self.pointer_dim = dim;
        self
    }

    /// Add a base class without an upcast function.
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base_classes.push(BaseClassEdge::new(base));
        self
    }

    /// Add a base class with an upcast function.
    pub fn with_base_cast(mut self, base: TypeId, cast: CastFn) -> Self {
        self.base_classes.push(BaseClassEdge::with_cast(base, cast));
        self
    }
}

/// The type database.
pub struct TypeRegistry {
    names: NameIndex,
    table: TypeTable,
    inheritance: InheritanceGraph,
    members: MemberRegistry,
    metadata: MetadataStore,
    enumerations: ByIdStore<Enumeration>,
    converters: ConverterRegistry,
    comparators: ComparatorRegistry,
}

impl TypeRegistry {
    /// An empty registry holding only the invalid-type sentinel.
    pub fn new() -> Self {
        Self {
            names: NameIndex::new(),
            table: TypeTable::new(),
            inheritance: InheritanceGraph::new(),
            members: MemberRegistry::new(),
            metadata: MetadataStore::new(),
            enumerations: ByIdStore::new(),
            converters: ConverterRegistry::new(),
            comparators: ComparatorRegistry::new(),
        }
    }

    /// Number of registered types, sentinel excluded.
    pub fn type_count(&self) -> usize {
        self.names.len() - 1
    }

    // ==========================================================================
    // Type registration & identity
    // ==========================================================================

    /// Register a type and return its id.
    ///
    /// Registering a name that already exists returns the existing id and
    /// changes nothing. Unset raw and array-raw ids resolve to the new id
    /// itself; base-class edges are recorded on the resolved raw type.
    pub fn register_type(&mut self, desc: TypeDescriptor) -> TypeId {
        let (id, existed) = self.names.register(&desc.name, desc.array_raw_type);
        if existed {
            return id;
        }

        let raw = if desc.raw_type.is_valid() {
            desc.raw_type
        } else {
            id
        };
        let array_raw = if desc.array_raw_type.is_valid() {
            desc.array_raw_type
        } else {
            id
        };

        self.table.push(TypeTraits {
            size: desc.size,
            raw,
            wrapped: desc.wrapped_type,
            array_raw,
            flags: desc.flags,
            pointer_dim: desc.pointer_dim,
        });

        let table = &self.table;
        self.inheritance
            .register(id, raw, desc.base_classes, |t| table.raw_type(t));

        id
    }

    /// Overwrite `t`'s display name and re-derive the display name of every
    /// type whose array-raw id points at `t`.
    pub fn register_custom_name(&mut self, t: TypeId, name: impl Into<String>) {
        let table = &self.table;
        self.names
            .set_custom_name(t, name.into(), |id| table.array_raw_type(id));
    }

    /// Resolve a display name to its id; INVALID on miss.
    pub fn get_by_name(&self, name: &str) -> TypeId {
        self.names.get_by_name(name)
    }

    /// The display name of `t`.
    pub fn type_name(&self, t: TypeId) -> &str {
        self.names.custom_name(t)
    }

    /// The original (source) name `t` was registered under.
    pub fn original_type_name(&self, t: TypeId) -> &str {
        self.names.orig_name(t)
    }

    // ==========================================================================
    // Type attributes
    // ==========================================================================

    /// Byte size of `t`.
    pub fn size_of(&self, t: TypeId) -> usize {
        self.table.size_of(t)
    }

    /// Raw type id of `t`.
    pub fn raw_type(&self, t: TypeId) -> TypeId {
        self.table.raw_type(t)
    }

    /// Wrapped type id of `t`; INVALID when `t` wraps nothing.
    pub fn wrapped_type(&self, t: TypeId) -> TypeId {
        self.table.wrapped_type(t)
    }

    /// Array element type id of `t`.
    pub fn array_raw_type(&self, t: TypeId) -> TypeId {
        self.table.array_raw_type(t)
    }

    /// Pointer indirection depth of `t`.
    pub fn pointer_dimension(&self, t: TypeId) -> usize {
        self.table.pointer_dimension(t)
    }

    /// Whether `t` is a class type.
    pub fn is_class(&self, t: TypeId) -> bool {
        self.table.is_class(t)
    }

    /// Whether `t` is an enumeration type.
    pub fn is_enum(&self, t: TypeId) -> bool {
        self.table.is_enum(t)
    }

    /// Whether `t` is an array type.
    pub fn is_array(&self, t: TypeId) -> bool {
        self.table.is_array(t)
    }

    /// Whether `t` is a pointer type.
    pub fn is_pointer(&self, t: TypeId) -> bool {
        self.table.is_pointer(t)
    }

    /// Whether `t` is an arithmetic type.
    pub fn is_arithmetic(&self, t: TypeId) -> bool {
        self.table.is_arithmetic(t)
    }

    /// Whether `t` is a free function pointer type.
    pub fn is_function_pointer(&self, t: TypeId) -> bool {
        self.table.is_function_pointer(t)
    }

    /// Whether `t` is a pointer-to-member-object type.
    pub fn is_member_object_pointer(&self, t: TypeId) -> bool {
        self.table.is_member_object_pointer(t)
    }

    /// Whether `t` is a pointer-to-member-function type.
    pub fn is_member_function_pointer(&self, t: TypeId) -> bool {
        self.table.is_member_function_pointer(t)
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    /// Base classes of `t`, root-to-leaf order.
    pub fn base_classes(&self, t: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.inheritance.base_classes(self.table.raw_type(t))
    }

    /// Types registered with `t` as a base.
    pub fn derived_classes(&self, t: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.inheritance.derived_classes(self.table.raw_type(t))
    }

    /// The upcast function from `t` to `base`, if that edge carries one.
    pub fn cast_to_base(&self, t: TypeId, base: TypeId) -> Option<CastFn> {
        self.inheritance.cast_to_base(self.table.raw_type(t), base)
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    /// Register a property. Routed to the class stores when `t` is a class
    /// type, to the global store otherwise. Duplicates are a no-op.
    pub fn register_property(&mut self, t: TypeId, prop: Property) {
        let is_class = self.table.is_class(t);
        let table = &self.table;
        self.members
            .register_property(t, prop, is_class, &self.inheritance, |id| {
                table.raw_type(id)
            });
    }

    /// Property declared on `t` itself, by name.
    pub fn get_type_property(&self, t: TypeId, name: &str) -> Option<Property> {
        self.members.get_type_property(t, name)
    }

    /// Property visible on `t` including inherited ones, by name.
    pub fn get_class_property(&self, t: TypeId, name: &str) -> Option<Property> {
        self.members.get_class_property(t, name)
    }

    /// All properties visible on `t`, base-to-derived order.
    pub fn get_class_properties(&self, t: TypeId) -> &[Property] {
        self.members.get_class_properties(t)
    }

    /// Global property by name.
    pub fn get_global_property(&self, name: &str) -> Option<Property> {
        self.members.get_global_property(name)
    }

    /// All global properties, name order.
    pub fn get_global_properties(&self) -> impl Iterator<Item = &Property> {
        self.members.get_global_properties()
    }

    // ==========================================================================
    // Methods
    // ==========================================================================

    /// Register a method. Routed to the class stores when `t` is a class
    /// type, to the global store otherwise. Duplicate signatures are a
    /// no-op.
    pub fn register_method(&mut self, t: TypeId, method: Method) {
        let is_class = self.table.is_class(t);
        let table = &self.table;
        self.members
            .register_method(t, method, is_class, &self.inheritance, |id| {
                table.raw_type(id)
            });
    }

    /// Method declared on `t` itself, first with matching name.
    pub fn get_type_method(&self, t: TypeId, name: &str) -> Option<Method> {
        self.members.get_type_method(t, name)
    }

    /// Method visible on `t` including inherited, first with matching name.
    pub fn get_class_method(&self, t: TypeId, name: &str) -> Option<Method> {
        self.members.get_class_method(t, name)
    }

    /// Method visible on `t` with an exact parameter-type list.
    pub fn get_class_method_with_types(
        &self,
        t: TypeId,
        name: &str,
        type_list: &[TypeId],
    ) -> Option<Method> {
        self.members.get_class_method_with_types(t, name, type_list)
    }

    /// Method visible on `t` matching the runtime types of `args`.
    pub fn get_class_method_with_args(
        &self,
        t: TypeId,
        name: &str,
        args: &[Argument],
    ) -> Option<Method> {
        self.members.get_class_method_with_args(t, name, args)
    }

    /// All methods visible on `t`, base-to-derived order.
    pub fn get_class_methods(&self, t: TypeId) -> &[Method] {
        self.members.get_class_methods(t)
    }

    /// Global method by name, first registered overload.
    pub fn get_global_method(&self, name: &str) -> Option<Method> {
        self.members.get_global_method(name)
    }

    /// Global method with an exact parameter-type list.
    pub fn get_global_method_with_types(
        &self,
        name: &str,
        type_list: &[TypeId],
    ) -> Option<Method> {
        self.members.get_global_method_with_types(name, type_list)
    }

    /// Global method matching the runtime types of `args`.
    pub fn get_global_method_with_args(&self, name: &str, args: &[Argument]) -> Option<Method> {
        self.members.get_global_method_with_args(name, args)
    }

    /// All global methods, name order.
    pub fn get_global_methods(&self) -> impl Iterator<Item = &Method> {
        self.members.get_global_methods()
    }

    // ==========================================================================
    // Constructors & destructor
    // ==========================================================================

    /// Register a constructor on `t`. Duplicate parameter lists are a no-op.
    pub fn register_constructor(&mut self, t: TypeId, ctor: Constructor) {
        self.members.register_constructor(t, ctor);
    }

    /// The first registered constructor of `t`.
    pub fn get_constructor(&self, t: TypeId) -> Option<Constructor> {
        self.members.get_constructor(t)
    }

    /// Constructor of `t` with an exact parameter-type list.
    pub fn get_constructor_with_types(
        &self,
        t: TypeId,
        type_list: &[TypeId],
    ) -> Option<Constructor> {
        self.members.get_constructor_with_types(t, type_list)
    }

    /// Constructor of `t` matching the runtime types of `args`.
    pub fn get_constructor_with_args(&self, t: TypeId, args: &[Argument]) -> Option<Constructor> {
        self.members.get_constructor_with_args(t, args)
    }

    /// All constructors of `t`, registration order.
    pub fn get_constructors(&self, t: TypeId) -> &[Constructor] {
        self.members.get_constructors(t)
    }

    /// Register the destructor of `t`. A second registration is a no-op.
    pub fn register_destructor(&mut self, t: TypeId, dtor: Destructor) {
        self.members.register_destructor(t, dtor);
    }

    /// The destructor of `t`, if one was registered.
    pub fn get_destructor(&self, t: TypeId) -> Option<Destructor> {
        self.members.get_destructor(t)
    }

    // ==========================================================================
    // Enumerations
    // ==========================================================================

    /// Register the enumerator table of `t`. A second registration is a
    /// no-op.
    pub fn register_enumeration(&mut self, t: TypeId, table: Enumeration) {
        if !t.is_valid() {
            return;
        }
        if self.enumerations.get(t).is_some() {
            return;
        }
        self.enumerations.insert(t, table);
    }

    /// The enumerator table of `t`, if one was registered.
    pub fn get_enumeration(&self, t: TypeId) -> Option<Enumeration> {
        self.enumerations.get(t).cloned()
    }

    // ==========================================================================
    // Metadata
    // ==========================================================================

    /// Attach metadata entries to `t`. Keys already present keep their
    /// existing value.
    pub fn register_metadata(&mut self, t: TypeId, entries: Vec<MetadataEntry>) {
        self.metadata.register(t, entries);
    }

    /// The metadata value stored for `key` on `t`, if any.
    pub fn get_metadata(&self, t: TypeId, key: &Variant) -> Option<&Variant> {
        self.metadata.get(t, key)
    }

    // ==========================================================================
    // Conversion & comparison
    // ==========================================================================

    /// Register a converter from `source` to the converter's target type.
    /// A second converter for the same pair is a no-op.
    pub fn register_converter(&mut self, source: TypeId, converter: Converter) {
        self.converters.register(source, converter);
    }

    /// The converter from `source` to `target`, if registered.
    pub fn get_converter(&self, source: TypeId, target: TypeId) -> Option<Converter> {
        self.converters.get(source, target)
    }

    /// Register the comparator for `t`. A second registration is a no-op.
    pub fn register_comparator(&mut self, t: TypeId, comparator: Comparator) {
        self.comparators.register(t, comparator);
    }

    /// The comparator for `t`, if registered.
    pub fn get_comparator(&self, t: TypeId) -> Option<Comparator> {
        self.comparators.get(t)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_assigns_and_reuses_ids() {
        let mut registry = TypeRegistry::new();
        let a = registry.register_type(TypeDescriptor::class("Mesh").with_size(64));
        let b = registry.register_type(TypeDescriptor::class("Texture"));
        let again = registry.register_type(TypeDescriptor::class("Mesh").with_size(128));

        assert_ne!(a, b);
        assert_eq!(a, again);
        assert_eq!(registry.type_count(), 2);
        // First registration wins; the retry's attributes are ignored.
        assert_eq!(registry.size_of(a), 64);
    }

    #[test]
    fn unset_raw_and_array_raw_default_to_self() {
        let mut registry = TypeRegistry::new();
        let t = registry.register_type(TypeDescriptor::class("Material"));
        assert_eq!(registry.raw_type(t), t);
        assert_eq!(registry.array_raw_type(t), t);
        assert!(!registry.wrapped_type(t).is_valid());
    }

    #[test]
    fn pointer_type_links_to_element() {
        let mut registry = TypeRegistry::new();
        let mesh = registry.register_type(TypeDescriptor::class("Mesh"));
        let ptr = registry.register_type(
            TypeDescriptor::new("Mesh*")
                .with_flags(TypeFlags::POINTER)
                .with_raw_type(mesh)
                .with_array_raw_type(mesh)
                .with_pointer_dim(1),
        );

        assert_eq!(registry.raw_type(ptr), mesh);
        assert_eq!(registry.pointer_dimension(ptr), 1);
        assert!(registry.is_pointer(ptr));
        assert!(!registry.is_class(ptr));
    }

    #[test]
    fn attribute_queries_on_unknown_ids_read_as_sentinel() {
        let registry = TypeRegistry::new();
        let stale = TypeId::from_raw(42);
        assert_eq!(registry.size_of(stale), 0);
        assert!(!registry.is_class(stale));
        assert_eq!(registry.base_classes(stale).count(), 0);
        assert_eq!(registry.get_class_properties(stale).len(), 0);
    }
}
