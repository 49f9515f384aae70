//! Small tagged value used for metadata keys/values and call arguments.
//!
//! [`Variant`] deliberately covers only the handful of shapes the registry
//! itself needs to store and order. Anything richer travels through the
//! opaque wrapper traits instead.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// A dynamically typed primitive value.
///
/// Variants have a total order (discriminant first, then value; floats via
/// `total_cmp`) so they can serve as binary-searchable metadata keys.
///
/// # Examples
///
/// ```
/// use reflect_core::Variant;
///
/// let key = Variant::from("category");
/// let value = Variant::from(3_i64);
/// assert!(Variant::from(1_i64) < Variant::from(2_i64));
/// ```
#[derive(Debug, Clone)]
pub enum Variant {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point value.
    Float(f64),
    /// Owned string value.
    String(String),
}

impl Variant {
    /// Discriminant rank, used as the major sort key.
    fn rank(&self) -> u8 {
        match self {
            Variant::Bool(_) => 0,
            Variant::Int(_) => 1,
            Variant::Float(_) => 2,
            Variant::String(_) => 3,
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Variant::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float payload, if this is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Variant {}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Variant::Bool(a), Variant::Bool(b)) => a.cmp(b),
            (Variant::Int(a), Variant::Int(b)) => a.cmp(b),
            (Variant::Float(a), Variant::Float(b)) => a.total_cmp(b),
            (Variant::String(a), Variant::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::Int(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Int(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Float(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}

/// Failure to extract a typed value out of a [`Variant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// The variant holds a different shape than requested.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// The requested shape.
        expected: &'static str,
        /// The shape actually held.
        found: &'static str,
    },
}

impl Variant {
    fn shape(&self) -> &'static str {
        match self {
            Variant::Bool(_) => "bool",
            Variant::Int(_) => "int",
            Variant::Float(_) => "float",
            Variant::String(_) => "string",
        }
    }
}

impl TryFrom<Variant> for i64 {
    type Error = VariantError;

    fn try_from(v: Variant) -> Result<Self, Self::Error> {
        match v {
            Variant::Int(i) => Ok(i),
            other => Err(VariantError::TypeMismatch {
                expected: "int",
                found: other.shape(),
            }),
        }
    }
}

impl TryFrom<Variant> for f64 {
    type Error = VariantError;

    fn try_from(v: Variant) -> Result<Self, Self::Error> {
        match v {
            Variant::Float(f) => Ok(f),
            other => Err(VariantError::TypeMismatch {
                expected: "float",
                found: other.shape(),
            }),
        }
    }
}

impl TryFrom<Variant> for bool {
    type Error = VariantError;

    fn try_from(v: Variant) -> Result<Self, Self::Error> {
        match v {
            Variant::Bool(b) => Ok(b),
            other => Err(VariantError::TypeMismatch {
                expected: "bool",
                found: other.shape(),
            }),
        }
    }
}

impl TryFrom<Variant> for String {
    type Error = VariantError;

    fn try_from(v: Variant) -> Result<Self, Self::Error> {
        match v {
            Variant::String(s) => Ok(s),
            other => Err(VariantError::TypeMismatch {
                expected: "string",
                found: other.shape(),
            }),
        }
    }
}
