//! Type-erased member wrappers and their cloneable handles.
//!
//! Registration producers implement the wrapper traits; the registry stores
//! one canonical handle per registered member and hands out cheap clones.
//! Handle equality is identity of the underlying wrapper object
//! (`Arc::ptr_eq`), mirroring the by-pointer identity of the original
//! wrapper scheme without manual ownership release.
//!
//! - [`PropertyWrapper`] / [`Property`]: named get/set capability
//! - [`MethodWrapper`] / [`Method`]: named invocation capability with a
//!   parameter type list
//! - [`ConstructorWrapper`] / [`Constructor`]: construction capability
//! - [`DestructorWrapper`] / [`Destructor`]: destruction capability
//! - [`EnumerationWrapper`] / [`Enumeration`]: name/value tables
//! - [`TypeConverter`] / [`Converter`]: value conversion to a target type
//! - [`TypeComparator`] / [`Comparator`]: equality/ordering predicates

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{TypeId, Variant};

/// A call argument carrying its runtime type.
///
/// Overload resolution against an argument list compares each argument's
/// `type_id` against the candidate's declared parameter types.
#[derive(Debug, Clone)]
pub struct Argument {
    /// Runtime type of the value.
    pub type_id: TypeId,
    /// The value itself.
    pub value: Variant,
}

impl Argument {
    /// Pair a value with its runtime type.
    pub fn new(type_id: TypeId, value: impl Into<Variant>) -> Self {
        Self {
            type_id,
            value: value.into(),
        }
    }
}

/// Getter/setter capability for a named property.
pub trait PropertyWrapper: Send + Sync {
    /// The property's name.
    fn name(&self) -> &str;

    /// Declared type of the property value.
    fn value_type(&self) -> TypeId;

    /// Whether the property rejects writes.
    fn is_readonly(&self) -> bool {
        false
    }

    /// Read the property from an instance.
    fn get(&self, instance: &dyn Any) -> Option<Variant>;

    /// Write the property on an instance. Returns `false` when the write
    /// was rejected (readonly, wrong instance type, wrong value shape).
    fn set(&self, instance: &mut dyn Any, value: Variant) -> bool;
}

/// Invocation capability for a named method.
pub trait MethodWrapper: Send + Sync {
    /// The method's name.
    fn name(&self) -> &str;

    /// Declared parameter types, in call order.
    fn parameter_types(&self) -> &[TypeId];

    /// Declared return type; INVALID for none.
    fn return_type(&self) -> TypeId {
        TypeId::INVALID
    }

    /// Invoke on an instance with already-typed arguments.
    fn invoke(&self, instance: &mut dyn Any, args: &[Argument]) -> Option<Variant>;
}

/// Construction capability for a type.
pub trait ConstructorWrapper: Send + Sync {
    /// Declared parameter types, in call order.
    fn parameter_types(&self) -> &[TypeId];

    /// Construct an instance from the given arguments.
    fn construct(&self, args: &[Argument]) -> Option<Box<dyn Any>>;
}

/// Destruction capability for a type.
pub trait DestructorWrapper: Send + Sync {
    /// Consume and destroy an instance.
    fn destroy(&self, instance: Box<dyn Any>);
}

/// Name/value tables of an enumeration type.
pub trait EnumerationWrapper: Send + Sync {
    /// All enumerator names, in declaration order.
    fn names(&self) -> Vec<&str>;

    /// Value for an enumerator name.
    fn value_of(&self, name: &str) -> Option<Variant>;

    /// Enumerator name for a value.
    fn name_of(&self, value: &Variant) -> Option<&str>;
}

/// Conversion of values of one registered type to another.
pub trait TypeConverter: Send + Sync {
    /// The target type this converter produces.
    fn target_type(&self) -> TypeId;

    /// Convert a value; `None` when the value cannot be converted.
    fn convert(&self, value: &Variant) -> Option<Variant>;
}

/// Equality/ordering predicates for values of one registered type.
pub trait TypeComparator: Send + Sync {
    /// Whether the two values compare equal.
    fn equal(&self, lhs: &Variant, rhs: &Variant) -> bool;

    /// Whether `lhs` orders before `rhs`.
    fn less(&self, lhs: &Variant, rhs: &Variant) -> bool;
}

macro_rules! member_handle {
    ($(#[$meta:meta])* $handle:ident, $wrapper:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $handle(Arc<dyn $wrapper>);

        impl $handle {
            /// Wrap a shared wrapper object.
            pub fn new(wrapper: Arc<dyn $wrapper>) -> Self {
                Self(wrapper)
            }

            /// Take ownership of a wrapper and produce the handle.
            pub fn from_wrapper(wrapper: impl $wrapper + 'static) -> Self {
                Self(Arc::new(wrapper))
            }

            /// Borrow the underlying wrapper.
            pub fn wrapper(&self) -> &dyn $wrapper {
                &*self.0
            }
        }

        impl PartialEq for $handle {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl Eq for $handle {}

        impl fmt::Debug for $handle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:p})", stringify!($handle), Arc::as_ptr(&self.0))
            }
        }
    };
}

member_handle! {
    /// Handle to a registered property. Equality is wrapper identity.
    Property, PropertyWrapper
}

member_handle! {
    /// Handle to a registered method. Equality is wrapper identity.
    Method, MethodWrapper
}

member_handle! {
    /// Handle to a registered constructor. Equality is wrapper identity.
    Constructor, ConstructorWrapper
}

member_handle! {
    /// Handle to a registered destructor. Equality is wrapper identity.
    Destructor, DestructorWrapper
}

member_handle! {
    /// Handle to a registered enumeration table. Equality is wrapper identity.
    Enumeration, EnumerationWrapper
}

member_handle! {
    /// Handle to a registered converter. Equality is wrapper identity.
    Converter, TypeConverter
}

member_handle! {
    /// Handle to a registered comparator. Equality is wrapper identity.
    Comparator, TypeComparator
}

impl Property {
    /// The property's name.
    pub fn name(&self) -> &str {
        self.wrapper().name()
    }

    /// Declared type of the property value.
    pub fn value_type(&self) -> TypeId {
        self.wrapper().value_type()
    }
}

impl Method {
    /// The method's name.
    pub fn name(&self) -> &str {
        self.wrapper().name()
    }

    /// Declared parameter types, in call order.
    pub fn parameter_types(&self) -> &[TypeId] {
        self.wrapper().parameter_types()
    }
}

impl Constructor {
    /// Declared parameter types, in call order.
    pub fn parameter_types(&self) -> &[TypeId] {
        self.wrapper().parameter_types()
    }
}

impl Converter {
    /// The target type this converter produces.
    pub fn target_type(&self) -> TypeId {
        self.wrapper().target_type()
    }
}

/// Exact, ordered parameter-list match against declared types.
pub fn compare_with_type_list(params: &[TypeId], type_list: &[TypeId]) -> bool {
    params.len() == type_list.len() && params.iter().zip(type_list).all(|(p, t)| p == t)
}

/// Parameter-list match against runtime-typed arguments.
///
/// Arity mismatch rejects immediately; otherwise each argument's runtime
/// type must equal the declared parameter type at the same position.
pub fn compare_with_arg_list(params: &[TypeId], args: &[Argument]) -> bool {
    params.len() == args.len() && params.iter().zip(args).all(|(p, a)| *p == a.type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopProperty(&'static str);

    impl PropertyWrapper for NoopProperty {
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

    #[test]
    fn handle_identity_equality() {
        let a = Property::from_wrapper(NoopProperty("x"));
        let b = Property::from_wrapper(NoopProperty("x"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn handle_delegates_to_wrapper() {
        let p = Property::from_wrapper(NoopProperty("pos"));
        assert_eq!(p.name(), "pos");
        assert_eq!(p.value_type(), TypeId::from_raw(1));
        assert!(!p.wrapper().is_readonly());
    }

    #[test]
    fn type_list_comparison_is_exact_and_ordered() {
        let a = TypeId::from_raw(1);
        let b = TypeId::from_raw(2);
        assert!(compare_with_type_list(&[a, b], &[a, b]));
        assert!(!compare_with_type_list(&[a, b], &[b, a]));
        assert!(!compare_with_type_list(&[a, b], &[a]));
        assert!(compare_with_type_list(&[], &[]));
    }

    #[test]
    fn arg_list_comparison_checks_arity_first() {
        let a = TypeId::from_raw(1);
        let b = TypeId::from_raw(2);
        let args = [Argument::new(a, 1_i64), Argument::new(b, 2_i64)];
        assert!(compare_with_arg_list(&[a, b], &args));
        assert!(!compare_with_arg_list(&[a], &args));
        assert!(!compare_with_arg_list(&[b, a], &args));
    }
}
