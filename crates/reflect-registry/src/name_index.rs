//! Sorted name-to-id indexes and custom-name derivation.
//!
//! Two parallel tables map names to [`TypeId`]s: the original (source) name
//! table, consulted during registration to detect already-registered types,
//! and the custom (user-facing) name table, consulted by
//! [`NameIndex::get_by_name`]. Both are flat `(hash, id)` vectors kept
//! sorted by hash; a lookup binary-searches to the start of the hash run
//! and confirms candidates by exact string comparison, so hash collisions
//! can never produce a false match.
//!
//! Custom names are derived, not registered: giving `Vec3` the display name
//! `Float3` automatically renames `Vec3*`, `const Vec3 &` and every other
//! type whose array-raw id points at `Vec3`.

use reflect_core::{NameHash, TypeId};

/// Name stored in slot 0 for the invalid type.
const INVALID_TYPE_NAME: &str = "!invalid_type!";

#[derive(Clone, Copy)]
struct NameToId {
    hash: NameHash,
    id: TypeId,
}

/// Original/custom name tables with sorted hash indexes.
pub struct NameIndex {
    /// Immutable source names, indexed by id. First registration wins.
    orig_names: Vec<String>,
    /// Mutable display names, indexed by id. Last writer wins.
    custom_names: Vec<String>,
    /// (hash, id) pairs over `orig_names`, sorted by hash.
    orig_name_to_id: Vec<NameToId>,
    /// (hash, id) pairs over `custom_names`, sorted by hash.
    custom_name_to_id: Vec<NameToId>,
}

impl NameIndex {
    /// An index holding only the slot-0 invalid sentinel.
    pub fn new() -> Self {
        Self {
            orig_names: vec![INVALID_TYPE_NAME.to_string()],
            custom_names: vec![INVALID_TYPE_NAME.to_string()],
            orig_name_to_id: Vec::new(),
            custom_name_to_id: Vec::new(),
        }
    }

    /// Number of name slots, sentinel included.
    pub fn len(&self) -> usize {
        self.orig_names.len()
    }

    /// Whether only the sentinel slot exists.
    pub fn is_empty(&self) -> bool {
        self.orig_names.len() == 1
    }

    /// Register a literal name, deriving its initial custom name from
    /// `array_raw`'s names when valid.
    ///
    /// Returns the assigned id and whether the name was already registered
    /// (in which case the existing id is returned and nothing changes).
    pub fn register(&mut self, name: &str, array_raw: TypeId) -> (TypeId, bool) {
        let hash = NameHash::of(name);
        let existing = find_exact(&self.orig_name_to_id, &self.orig_names, hash, name);
        if existing.is_valid() {
            return (existing, true);
        }

        let id = TypeId::from_raw(self.orig_names.len() as u32);
        self.orig_names.push(name.to_string());
        self.orig_name_to_id.push(NameToId { hash, id });
        self.orig_name_to_id.sort_unstable_by_key(|e| e.hash);

        let custom = self.derive_name(array_raw, name);
        self.custom_name_to_id.push(NameToId {
            hash: NameHash::of(&custom),
            id,
        });
        self.custom_name_to_id.sort_unstable_by_key(|e| e.hash);
        self.custom_names.push(custom);

        (id, false)
    }

    /// Derive the display name for `name` from its element type.
    ///
    /// With an invalid `array_raw` the name is only whitespace-normalized.
    /// Otherwise the element type's original-name substring inside `name`
    /// is replaced by the element type's custom name, preserving a single
    /// separating space on either side where the source text had one.
    pub fn derive_name(&self, array_raw: TypeId, name: &str) -> String {
        if !array_raw.is_valid() || array_raw.index() >= self.custom_names.len() {
            return normalize_name(name);
        }

        let custom = &self.custom_names[array_raw.index()];
        let raw_orig = normalize_name(&self.orig_names[array_raw.index()]);
        let src = normalize_name(name);
        derive_from_parts(&src, &raw_orig, custom)
    }

    /// Overwrite `t`'s custom name and re-derive the custom name of every
    /// other type whose array-raw id (per `array_raw_of`) is `t`.
    pub fn set_custom_name(
        &mut self,
        t: TypeId,
        custom_name: String,
        array_raw_of: impl Fn(TypeId) -> TypeId,
    ) {
        if !t.is_valid() || t.index() >= self.custom_names.len() {
            return;
        }

        self.custom_names[t.index()] = custom_name;
        let custom = self.custom_names[t.index()].clone();
        let raw_name = normalize_name(&self.orig_names[t.index()]);

        for i in 0..self.custom_name_to_id.len() {
            let id = self.custom_name_to_id[i].id;
            if id == t {
                self.custom_name_to_id[i].hash = NameHash::of(&custom);
                continue;
            }
            if array_raw_of(id) != t {
                continue;
            }
            let derived = derive_from_parts(&self.custom_names[id.index()], &raw_name, &custom);
            self.custom_name_to_id[i].hash = NameHash::of(&derived);
            self.custom_names[id.index()] = derived;
        }

        self.custom_name_to_id.sort_unstable_by_key(|e| e.hash);
    }

    /// Resolve a display name to its id; INVALID on miss.
    pub fn get_by_name(&self, name: &str) -> TypeId {
        let hash = NameHash::of(name);
        find_exact(&self.custom_name_to_id, &self.custom_names, hash, name)
    }

    /// The original (source) name of `t`; the sentinel name out of range.
    pub fn orig_name(&self, t: TypeId) -> &str {
        self.orig_names
            .get(t.index())
            .unwrap_or(&self.orig_names[0])
    }

    /// The custom (display) name of `t`; the sentinel name out of range.
    pub fn custom_name(&self, t: TypeId) -> &str {
        self.custom_names
            .get(t.index())
            .unwrap_or(&self.custom_names[0])
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary-search `table` to the run of `hash`, then confirm by exact
/// string comparison against `names`.
fn find_exact(table: &[NameToId], names: &[String], hash: NameHash, name: &str) -> TypeId {
    let start = table.partition_point(|e| e.hash < hash);
    for entry in &table[start..] {
        if entry.hash != hash {
            break;
        }
        if names[entry.id.index()] == name {
            return entry.id;
        }
    }
    TypeId::INVALID
}

/// Trim and collapse whitespace runs to a single space.
fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_whitespace(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_space_after(text: &str, part: &str) -> bool {
    if part.is_empty() {
        return false;
    }
    match text.find(part) {
        Some(pos) => text[pos + part.len()..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace),
        None => false,
    }
}

fn is_space_before(text: &str, part: &str) -> bool {
    if part.is_empty() {
        return false;
    }
    match text.rfind(part) {
        Some(pos) => text[..pos].chars().next_back().is_some_and(char::is_whitespace),
        None => false,
    }
}

/// Replace the whitespace-stripped `raw_name` substring inside the
/// whitespace-stripped `src_name` with `custom_name`, restoring one space
/// on either side of the replacement when `src_name` had one there.
fn derive_from_parts(src_name: &str, raw_name: &str, custom_name: &str) -> String {
    let stripped_raw = strip_whitespace(raw_name);
    let stripped_src = strip_whitespace(src_name);

    let Some(start) = stripped_src.find(&stripped_raw) else {
        return src_name.to_string();
    };
    let end = start + stripped_raw.len();
    let start_part = &stripped_src[..start];
    let end_part = &stripped_src[end..];

    let mut result =
        String::with_capacity(start_part.len() + custom_name.len() + end_part.len() + 2);
    result.push_str(start_part);
    if is_space_after(src_name, start_part) {
        result.push(' ');
    }
    result.push_str(custom_name);
    if is_space_before(src_name, end_part) {
        result.push(' ');
    }
    result.push_str(end_part);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_assigns_dense_ids() {
        let mut index = NameIndex::new();
        let (a, existed_a) = index.register("Vec3", TypeId::INVALID);
        let (b, existed_b) = index.register("Vec4", TypeId::INVALID);
        assert!(!existed_a);
        assert!(!existed_b);
        assert_eq!(a, TypeId::from_raw(1));
        assert_eq!(b, TypeId::from_raw(2));
    }

    #[test]
    fn duplicate_registration_returns_existing_id() {
        let mut index = NameIndex::new();
        let (a, _) = index.register("Vec3", TypeId::INVALID);
        let before = index.len();
        let (again, existed) = index.register("Vec3", TypeId::INVALID);
        assert!(existed);
        assert_eq!(a, again);
        assert_eq!(index.len(), before);
    }

    #[test]
    fn get_by_name_round_trips() {
        let mut index = NameIndex::new();
        let (a, _) = index.register("Vec3", TypeId::INVALID);
        let (b, _) = index.register("Vec4", TypeId::INVALID);
        assert_eq!(index.get_by_name("Vec3"), a);
        assert_eq!(index.get_by_name("Vec4"), b);
        assert_eq!(index.get_by_name("Vec5"), TypeId::INVALID);
    }

    #[test]
    fn derived_custom_name_substitutes_element_name() {
        let mut index = NameIndex::new();
        let (vec3, _) = index.register("Vec3", TypeId::INVALID);
        let (ptr, _) = index.register("Vec3*", vec3);
        assert_eq!(index.custom_name(ptr), "Vec3*");

        index.set_custom_name(vec3, "Float3".to_string(), |id| {
            if id == ptr { vec3 } else { TypeId::INVALID }
        });

        assert_eq!(index.custom_name(vec3), "Float3");
        assert_eq!(index.custom_name(ptr), "Float3*");
        assert_eq!(index.get_by_name("Float3"), vec3);
        assert_eq!(index.get_by_name("Float3*"), ptr);
        assert_eq!(index.get_by_name("Vec3"), TypeId::INVALID);
    }

    #[test]
    fn derived_custom_name_preserves_separating_spaces() {
        let mut index = NameIndex::new();
        let (vec3, _) = index.register("Vec3", TypeId::INVALID);
        let (cref, _) = index.register("const Vec3 &", vec3);
        assert_eq!(index.custom_name(cref), "const Vec3 &");

        index.set_custom_name(vec3, "Float3".to_string(), |id| {
            if id == cref { vec3 } else { TypeId::INVALID }
        });
        assert_eq!(index.custom_name(cref), "const Float3 &");
    }

    #[test]
    fn registering_after_custom_name_derives_immediately() {
        let mut index = NameIndex::new();
        let (vec3, _) = index.register("Vec3", TypeId::INVALID);
        index.set_custom_name(vec3, "Float3".to_string(), |_| TypeId::INVALID);

        let (ptr, _) = index.register("Vec3*", vec3);
        assert_eq!(index.custom_name(ptr), "Float3*");
        assert_eq!(index.get_by_name("Float3*"), ptr);
    }

    #[test]
    fn names_for_out_of_range_ids_are_the_sentinel() {
        let index = NameIndex::new();
        assert_eq!(index.orig_name(TypeId::from_raw(9)), INVALID_TYPE_NAME);
        assert_eq!(index.custom_name(TypeId::INVALID), INVALID_TYPE_NAME);
    }

    #[test]
    fn set_custom_name_on_invalid_type_is_a_no_op() {
        let mut index = NameIndex::new();
        index.set_custom_name(TypeId::INVALID, "Nope".to_string(), |_| TypeId::INVALID);
        assert_eq!(index.custom_name(TypeId::INVALID), INVALID_TYPE_NAME);
    }

    #[test]
    fn normalization_collapses_whitespace() {
        assert_eq!(normalize_name("  const   Vec3  * "), "const Vec3 *");
    }

    #[test]
    fn derive_without_match_keeps_source() {
        assert_eq!(derive_from_parts("Foo", "Vec3", "Float3"), "Foo");
    }
}
