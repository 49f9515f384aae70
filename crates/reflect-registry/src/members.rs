//! Property, method, constructor and destructor stores.
//!
//! Properties and methods of class types live in two maps each: the
//! type-local map (members declared on the type itself) and the class map
//! (the flattened inherited-plus-own view rebuilt by
//! [`MemberRegistry::update_class_list`] whenever a registration touches
//! the hierarchy). Non-class properties and methods go into global stores
//! ordered by name, with multiple overloads allowed under one name.
//!
//! Every registration is a silent no-op for invalid types and duplicate
//! signatures; every lookup miss returns `None` or an empty slice.

use rustc_hash::{FxHashMap, FxHashSet};

use reflect_core::{
    Argument, Constructor, Destructor, Method, Property, TypeId, compare_with_arg_list,
    compare_with_type_list,
};

use crate::inheritance::InheritanceGraph;

/// Name-ordered multimap for global (free) members.
///
/// Entries are kept sorted by name; same-name entries keep registration
/// order, so "first exact match" is "first registered".
struct NamedStore<T> {
    entries: Vec<(String, T)>,
}

impl<T> NamedStore<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, name: String, item: T) {
        let pos = self
            .entries
            .partition_point(|(n, _)| n.as_str() <= name.as_str());
        self.entries.insert(pos, (name, item));
    }

    /// The contiguous entries for `name`, in registration order.
    fn named_run(&self, name: &str) -> &[(String, T)] {
        let start = self.entries.partition_point(|(n, _)| n.as_str() < name);
        let len = self.entries[start..].partition_point(|(n, _)| n.as_str() == name);
        &self.entries[start..start + len]
    }

    fn iter_named<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s T> + use<'s, T> {
        self.named_run(name).iter().map(|(_, item)| item)
    }

    fn first(&self, name: &str) -> Option<&T> {
        self.named_run(name).first().map(|(_, item)| item)
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, item)| item)
    }
}

/// All member stores of the registry.
pub struct MemberRegistry {
    /// Properties declared on the type itself.
    type_properties: FxHashMap<TypeId, Vec<Property>>,
    /// Flattened inherited-plus-own properties.
    class_properties: FxHashMap<TypeId, Vec<Property>>,
    /// Methods declared on the type itself.
    type_methods: FxHashMap<TypeId, Vec<Method>>,
    /// Flattened inherited-plus-own methods.
    class_methods: FxHashMap<TypeId, Vec<Method>>,
    constructors: FxHashMap<TypeId, Vec<Constructor>>,
    destructors: FxHashMap<TypeId, Destructor>,
    global_properties: NamedStore<Property>,
    global_methods: NamedStore<Method>,
}

impl MemberRegistry {
    /// An empty member registry.
    pub fn new() -> Self {
        Self {
            type_properties: FxHashMap::default(),
            class_properties: FxHashMap::default(),
            type_methods: FxHashMap::default(),
            class_methods: FxHashMap::default(),
            constructors: FxHashMap::default(),
            destructors: FxHashMap::default(),
            global_properties: NamedStore::new(),
            global_methods: NamedStore::new(),
        }
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    /// Register a property on `t`, or globally when `is_class` is false.
    ///
    /// Duplicate names on the same type (or globally) are a no-op. Class
    /// registration rebuilds the flattened view for `t` and everything
    /// currently derived from it.
    pub fn register_property(
        &mut self,
        t: TypeId,
        prop: Property,
        is_class: bool,
        graph: &InheritanceGraph,
        raw_of: impl Fn(TypeId) -> TypeId,
    ) {
        if !t.is_valid() {
            return;
        }

        if is_class {
            if self.get_type_property(t, prop.name()).is_some() {
                return;
            }
            self.type_properties.entry(t).or_default().push(prop);
            let mut stack = FxHashSet::default();
            update_class_list(
                t,
                &self.type_properties,
                &mut self.class_properties,
                graph,
                &raw_of,
                &mut stack,
            );
        } else {
            if self.global_properties.first(prop.name()).is_some() {
                return;
            }
            self.global_properties.insert(prop.name().to_string(), prop);
        }
    }

    /// Property declared on `t` itself (not inherited), by name.
    pub fn get_type_property(&self, t: TypeId, name: &str) -> Option<Property> {
        self.type_properties
            .get(&t)?
            .iter()
            .find(|p| p.name() == name)
            .cloned()
    }

    /// Property visible on `t` including inherited ones, by name.
    pub fn get_class_property(&self, t: TypeId, name: &str) -> Option<Property> {
        self.class_properties
            .get(&t)?
            .iter()
            .find(|p| p.name() == name)
            .cloned()
    }

    /// All properties visible on `t`, base-to-derived order.
    pub fn get_class_properties(&self, t: TypeId) -> &[Property] {
        self.class_properties
            .get(&t)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Global property by name.
    pub fn get_global_property(&self, name: &str) -> Option<Property> {
        self.global_properties.first(name).cloned()
    }

    /// All global properties, name order.
    pub fn get_global_properties(&self) -> impl Iterator<Item = &Property> {
        self.global_properties.values()
    }

    // ==========================================================================
    // Methods
    // ==========================================================================

    /// Register a method on `t`, or globally when `is_class` is false.
    ///
    /// Duplicate (name, parameter-type-list) signatures are a no-op.
    pub fn register_method(
        &mut self,
        t: TypeId,
        method: Method,
        is_class: bool,
        graph: &InheritanceGraph,
        raw_of: impl Fn(TypeId) -> TypeId,
    ) {
        if !t.is_valid() {
            return;
        }

        if is_class {
            if self
                .get_type_method_with_types(t, method.name(), method.parameter_types())
                .is_some()
            {
                return;
            }
            self.type_methods.entry(t).or_default().push(method);
            let mut stack = FxHashSet::default();
            update_class_list(
                t,
                &self.type_methods,
                &mut self.class_methods,
                graph,
                &raw_of,
                &mut stack,
            );
        } else {
            if self
                .get_global_method_with_types(method.name(), method.parameter_types())
                .is_some()
            {
                return;
            }
            self.global_methods.insert(method.name().to_string(), method);
        }
    }

    /// Method declared on `t` itself, first with matching name.
    pub fn get_type_method(&self, t: TypeId, name: &str) -> Option<Method> {
        self.type_methods
            .get(&t)?
            .iter()
            .find(|m| m.name() == name)
            .cloned()
    }

    /// Method declared on `t` itself with an exact parameter-type list.
    pub fn get_type_method_with_types(
        &self,
        t: TypeId,
        name: &str,
        type_list: &[TypeId],
    ) -> Option<Method> {
        self.type_methods
            .get(&t)?
            .iter()
            .find(|m| m.name() == name && compare_with_type_list(m.parameter_types(), type_list))
            .cloned()
    }

    /// Method visible on `t` including inherited, first with matching name.
    pub fn get_class_method(&self, t: TypeId, name: &str) -> Option<Method> {
        self.class_methods
            .get(&t)?
            .iter()
            .find(|m| m.name() == name)
            .cloned()
    }

    /// Method visible on `t` with an exact parameter-type list.
    pub fn get_class_method_with_types(
        &self,
        t: TypeId,
        name: &str,
        type_list: &[TypeId],
    ) -> Option<Method> {
        self.class_methods
            .get(&t)?
            .iter()
            .find(|m| m.name() == name && compare_with_type_list(m.parameter_types(), type_list))
            .cloned()
    }

    /// Method visible on `t` matching the runtime types of `args`.
    pub fn get_class_method_with_args(
        &self,
        t: TypeId,
        name: &str,
        args: &[Argument],
    ) -> Option<Method> {
        self.class_methods
            .get(&t)?
            .iter()
            .find(|m| m.name() == name && compare_with_arg_list(m.parameter_types(), args))
            .cloned()
    }

    /// All methods visible on `t`, base-to-derived order.
    pub fn get_class_methods(&self, t: TypeId) -> &[Method] {
        self.class_methods
            .get(&t)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Global method by name, first registered overload.
    pub fn get_global_method(&self, name: &str) -> Option<Method> {
        self.global_methods.first(name).cloned()
    }

    /// Global method with an exact parameter-type list.
    pub fn get_global_method_with_types(
        &self,
        name: &str,
        type_list: &[TypeId],
    ) -> Option<Method> {
        self.global_methods
            .iter_named(name)
            .find(|m| compare_with_type_list(m.parameter_types(), type_list))
            .cloned()
    }

    /// Global method matching the runtime types of `args`.
    pub fn get_global_method_with_args(&self, name: &str, args: &[Argument]) -> Option<Method> {
        self.global_methods
            .iter_named(name)
            .find(|m| compare_with_arg_list(m.parameter_types(), args))
            .cloned()
    }

    /// All global methods, name order.
    pub fn get_global_methods(&self) -> impl Iterator<Item = &Method> {
        self.global_methods.values()
    }

    // ==========================================================================
    // Constructors & destructor
    // ==========================================================================

    /// Register a constructor on `t`. Duplicate parameter lists are a no-op.
    pub fn register_constructor(&mut self, t: TypeId, ctor: Constructor) {
        if !t.is_valid() {
            return;
        }
        if self
            .get_constructor_with_types(t, ctor.parameter_types())
            .is_some()
        {
            return;
        }
        self.constructors.entry(t).or_default().push(ctor);
    }

    /// The first registered constructor of `t`.
    pub fn get_constructor(&self, t: TypeId) -> Option<Constructor> {
        self.constructors.get(&t)?.first().cloned()
    }

    /// Constructor of `t` with an exact parameter-type list.
    pub fn get_constructor_with_types(
        &self,
        t: TypeId,
        type_list: &[TypeId],
    ) -> Option<Constructor> {
        self.constructors
            .get(&t)?
            .iter()
            .find(|c| compare_with_type_list(c.parameter_types(), type_list))
            .cloned()
    }

    /// Constructor of `t` matching the runtime types of `args`.
    pub fn get_constructor_with_args(&self, t: TypeId, args: &[Argument]) -> Option<Constructor> {
        self.constructors
            .get(&t)?
            .iter()
            .find(|c| compare_with_arg_list(c.parameter_types(), args))
            .cloned()
    }

    /// All constructors of `t`, registration order.
    pub fn get_constructors(&self, t: TypeId) -> &[Constructor] {
        self.constructors.get(&t).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register the destructor of `t`. A second registration is a no-op and
    /// the wrapper is dropped.
    pub fn register_destructor(&mut self, t: TypeId, dtor: Destructor) {
        if !t.is_valid() {
            return;
        }
        self.destructors.entry(t).or_insert(dtor);
    }

    /// The destructor of `t`, if one was registered.
    pub fn get_destructor(&self, t: TypeId) -> Option<Destructor> {
        self.destructors.get(&t).cloned()
    }
}

impl Default for MemberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `class_map[t]` as each base's flattened list (base-list order)
/// followed by `t`'s local list, then push the rebuild down into every
/// currently known derived class.
///
/// `stack` holds the types currently being rebuilt on this call chain.
/// A type reachable through two bases (diamond) is rebuilt once per path,
/// so the flattened view stays a pure function of the registrations; only
/// a type that is its own ancestor is skipped, which bounds the recursion
/// on a malformed cyclic hierarchy.
fn update_class_list<T: Clone>(
    t: TypeId,
    type_map: &FxHashMap<TypeId, Vec<T>>,
    class_map: &mut FxHashMap<TypeId, Vec<T>>,
    graph: &InheritanceGraph,
    raw_of: &impl Fn(TypeId) -> TypeId,
    stack: &mut FxHashSet<TypeId>,
) {
    if !stack.insert(t) {
        return;
    }

    let mut flattened = Vec::new();
    for base in graph.base_classes(raw_of(t)) {
        if let Some(list) = class_map.get(&base) {
            flattened.extend_from_slice(list);
        }
    }
    if let Some(local) = type_map.get(&t) {
        flattened.extend_from_slice(local);
    }
    class_map.insert(t, flattened);

    let derived: Vec<TypeId> = graph.derived_classes(raw_of(t)).collect();
    for d in derived {
        update_class_list(d, type_map, class_map, graph, raw_of, stack);
    }

    stack.remove(&t);
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use reflect_core::{MethodWrapper, PropertyWrapper, Variant};

    use crate::inheritance::BaseClassEdge;

    use super::*;

    struct TestProperty(&'static str);

    impl PropertyWrapper for TestProperty {
        fn name(&self) -> &str {
            self.0
        }

        fn value_type(&self) -> TypeId {
            TypeId::from_raw(1)
        }

        fn get(&self, _instance: &dyn Any) -> Option<Variant> {
            None
        }

        fn set(&self, _instance: &mut dyn Any, _value: Variant) -> bool {
            false
        }
    }

    struct TestMethod {
        name: &'static str,
        params: Vec<TypeId>,
    }

    impl MethodWrapper for TestMethod {
        fn name(&self) -> &str {
            self.name
        }

        fn parameter_types(&self) -> &[TypeId] {
            &self.params
        }

        fn invoke(&self, _instance: &mut dyn Any, _args: &[Argument]) -> Option<Variant> {
            None
        }
    }

    fn prop(name: &'static str) -> Property {
        Property::from_wrapper(TestProperty(name))
    }

    fn method(name: &'static str, params: Vec<TypeId>) -> Method {
        Method::from_wrapper(TestMethod { name, params })
    }

    fn id(raw: u32) -> TypeId {
        TypeId::from_raw(raw)
    }

    fn chain_a_b_c() -> InheritanceGraph {
        // C(3) derives B(2) derives A(1)
        let mut graph = InheritanceGraph::new();
        graph.register(id(2), id(2), vec![BaseClassEdge::new(id(1))], |t| t);
        graph.register(id(3), id(3), vec![BaseClassEdge::new(id(2))], |t| t);
        graph
    }

    #[test]
    fn invalid_type_registration_is_a_no_op() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        members.register_property(TypeId::INVALID, prop("x"), true, &graph, |t| t);
        assert!(members.get_class_properties(TypeId::INVALID).is_empty());
    }

    #[test]
    fn class_properties_flatten_base_to_derived() {
        let graph = chain_a_b_c();
        let mut members = MemberRegistry::new();
        members.register_property(id(1), prop("a"), true, &graph, |t| t);
        members.register_property(id(2), prop("b"), true, &graph, |t| t);
        members.register_property(id(3), prop("c"), true, &graph, |t| t);

        let names: Vec<_> = members
            .get_class_properties(id(3))
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn base_registered_after_derived_still_propagates() {
        let graph = chain_a_b_c();
        let mut members = MemberRegistry::new();
        members.register_property(id(3), prop("c"), true, &graph, |t| t);
        members.register_property(id(2), prop("b"), true, &graph, |t| t);
        members.register_property(id(1), prop("a"), true, &graph, |t| t);

        let names: Vec<_> = members
            .get_class_properties(id(3))
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn inherited_property_is_not_type_local() {
        let graph = chain_a_b_c();
        let mut members = MemberRegistry::new();
        members.register_property(id(1), prop("a"), true, &graph, |t| t);

        assert!(members.get_class_property(id(2), "a").is_some());
        assert!(members.get_type_property(id(2), "a").is_none());
    }

    // B(2) and C(3) derive A(1); D(4) derives both B and C.
    fn diamond() -> InheritanceGraph {
        let mut graph = InheritanceGraph::new();
        graph.register(id(2), id(2), vec![BaseClassEdge::new(id(1))], |t| t);
        graph.register(id(3), id(3), vec![BaseClassEdge::new(id(1))], |t| t);
        graph.register(
            id(4),
            id(4),
            vec![BaseClassEdge::new(id(2)), BaseClassEdge::new(id(3))],
            |t| t,
        );
        graph
    }

    #[test]
    fn diamond_flattening_is_order_independent() {
        let graph = diamond();

        let mut forward = MemberRegistry::new();
        forward.register_property(id(1), prop("a"), true, &graph, |t| t);
        forward.register_property(id(3), prop("c"), true, &graph, |t| t);

        let mut reverse = MemberRegistry::new();
        reverse.register_property(id(3), prop("c"), true, &graph, |t| t);
        reverse.register_property(id(1), prop("a"), true, &graph, |t| t);

        let names = |m: &MemberRegistry| -> Vec<String> {
            m.get_class_properties(id(4))
                .iter()
                .map(|p| p.name().to_string())
                .collect()
        };
        // The root's member reaches the bottom type through both bases.
        assert_eq!(names(&forward), vec!["a", "a", "c"]);
        assert_eq!(names(&reverse), names(&forward));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let mut graph = InheritanceGraph::new();
        graph.register(id(1), id(1), vec![BaseClassEdge::new(id(2))], |t| t);
        graph.register(id(2), id(2), vec![BaseClassEdge::new(id(1))], |t| t);

        let mut members = MemberRegistry::new();
        members.register_property(id(1), prop("x"), true, &graph, |t| t);
        assert_eq!(members.get_class_properties(id(1)).len(), 1);
        assert_eq!(members.get_class_properties(id(2)).len(), 1);
    }

    #[test]
    fn duplicate_property_name_is_idempotent() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        members.register_property(id(1), prop("x"), true, &graph, |t| t);
        members.register_property(id(1), prop("x"), true, &graph, |t| t);
        assert_eq!(members.get_class_properties(id(1)).len(), 1);
    }

    #[test]
    fn duplicate_method_signature_is_idempotent() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        members.register_method(id(1), method("f", vec![id(2)]), true, &graph, |t| t);
        members.register_method(id(1), method("f", vec![id(2)]), true, &graph, |t| t);
        assert_eq!(members.get_class_methods(id(1)).len(), 1);
    }

    #[test]
    fn method_overloads_coexist_and_resolve() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        let f_int = method("f", vec![id(2)]);
        let f_float = method("f", vec![id(3)]);
        members.register_method(id(1), f_int.clone(), true, &graph, |t| t);
        members.register_method(id(1), f_float.clone(), true, &graph, |t| t);

        assert_eq!(members.get_class_methods(id(1)).len(), 2);
        assert_eq!(
            members.get_class_method_with_types(id(1), "f", &[id(3)]),
            Some(f_float)
        );
        assert_eq!(
            members.get_class_method_with_args(
                id(1),
                "f",
                &[Argument::new(id(2), 0_i64)]
            ),
            Some(f_int)
        );
        assert!(
            members
                .get_class_method_with_args(id(1), "f", &[])
                .is_none()
        );
    }

    #[test]
    fn global_method_overloads_under_one_name() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        let g_int = method("g", vec![id(2)]);
        let g_none = method("g", vec![]);
        members.register_method(TypeId::from_raw(7), g_int.clone(), false, &graph, |t| t);
        members.register_method(TypeId::from_raw(7), g_none.clone(), false, &graph, |t| t);

        assert_eq!(members.get_global_method("g"), Some(g_int.clone()));
        assert_eq!(
            members.get_global_method_with_types("g", &[]),
            Some(g_none)
        );
        assert!(members.get_global_method("h").is_none());
    }

    #[test]
    fn global_runs_stay_bounded_by_name() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        let t = TypeId::from_raw(7);
        members.register_method(t, method("resize", vec![id(2)]), false, &graph, |t| t);
        members.register_method(t, method("reset", vec![]), false, &graph, |t| t);
        members.register_method(t, method("resize", vec![]), false, &graph, |t| t);

        let found = {
            let wanted = String::from("resize");
            members.get_global_method(&wanted)
        };
        assert_eq!(found.unwrap().parameter_types(), &[id(2)]);
        assert_eq!(
            members
                .get_global_method_with_types("reset", &[])
                .unwrap()
                .parameter_types()
                .len(),
            0
        );
        assert!(members.get_global_method_with_types("res", &[]).is_none());
    }

    #[test]
    fn global_property_duplicate_name_keeps_first() {
        let graph = InheritanceGraph::new();
        let mut members = MemberRegistry::new();
        let first = prop("gravity");
        members.register_property(TypeId::from_raw(7), first.clone(), false, &graph, |t| t);
        members.register_property(TypeId::from_raw(7), prop("gravity"), false, &graph, |t| t);
        assert_eq!(members.get_global_property("gravity"), Some(first));
        assert_eq!(members.get_global_properties().count(), 1);
    }
}
