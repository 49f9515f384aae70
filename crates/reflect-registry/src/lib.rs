//! The runtime type database.
//!
//! Types are registered once by name and receive a dense [`TypeId`]; every
//! later query keys on that id. The registry stores per-type attributes,
//! the inheritance graph, properties, methods, constructors, destructors,
//! enumerator tables, metadata, converters and comparators, all behind the
//! single [`TypeRegistry`] facade.
//!
//! Two rules hold everywhere:
//!
//! - Registration conflicts (duplicate names, duplicate signatures,
//!   invalid ids) are silent no-ops; the first registration wins.
//! - Lookup misses return `None`, [`TypeId::INVALID`] or an empty slice,
//!   never a panic.
//!
//! [`TypeId`]: reflect_core::TypeId
//! [`TypeId::INVALID`]: reflect_core::TypeId::INVALID

mod by_id;
mod convert;
mod inheritance;
mod members;
mod metadata;
mod name_index;
mod registry;
mod type_table;

pub use convert::{ComparatorRegistry, ConverterRegistry};
pub use inheritance::{BaseClassEdge, CastFn, InheritanceGraph, MAX_BASE_CLASSES};
pub use members::MemberRegistry;
pub use metadata::{MetadataEntry, MetadataStore};
pub use name_index::NameIndex;
pub use registry::{TypeDescriptor, TypeRegistry};
pub use type_table::{TypeRow, TypeTable};
