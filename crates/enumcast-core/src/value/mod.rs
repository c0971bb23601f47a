
use crate::{serialize::SerializeError, traits::Path};
use serde::{Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

///
/// MemberEntry
/// Immutable payload shared by every handle to one enum member.
///

#[derive(Debug)]
pub(crate) struct MemberEntry {
    pub(crate) enum_path: Arc<str>,
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) ordinal: i64,
}

///
/// EnumValue
///
/// Handle to the single instance of one enum member.
/// Only the registry builds these, so two values with the same enum path
/// and canonical key always share one allocation.
///

#[derive(Clone)]
pub struct EnumValue(Arc<MemberEntry>);

impl EnumValue {
    pub(crate) const fn from_entry(entry: Arc<MemberEntry>) -> Self {
        Self(entry)
    }

    /// Path of the enum type this member belongs to.
    #[must_use]
    pub fn enum_path(&self) -> &str {
        &self.0.enum_path
    }

    /// Declared member identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Canonical key, as written to storage.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0.value
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.0.label
    }

    #[must_use]
    pub fn ordinal(&self) -> i64 {
        self.0.ordinal
    }

    /// Returns `true` if this member belongs to enum type `E`.
    #[must_use]
    pub fn is<E: Path>(&self) -> bool {
        self.enum_path() == E::PATH
    }

    /// Same enum type and canonical key.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns `true` if this member equals any of `candidates`.
    pub fn equals_any<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a Self>,
    {
        candidates.into_iter().any(|candidate| self.equals(candidate))
    }

    /// Returns `true` if both handles point at the same registered instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Storage scalar for this member.
    #[must_use]
    pub fn serialize(&self) -> &str {
        self.value()
    }

    /// Declaration order: enum path, then ordinal, then canonical key.
    ///
    /// Two registries may assign different ordinals to equal members, so
    /// this is kept apart from `Ord`.
    #[must_use]
    pub fn cmp_ordinal(&self, other: &Self) -> Ordering {
        self.enum_path()
            .cmp(other.enum_path())
            .then_with(|| self.ordinal().cmp(&other.ordinal()))
            .then_with(|| self.value().cmp(other.value()))
    }

    /// JSON string literal of the canonical key, quotes included.
    pub fn to_json(&self) -> Result<String, SerializeError> {
        crate::serialize::to_json(self)
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumValue({}::{})", self.enum_path(), self.name())
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
            || (self.enum_path() == other.enum_path() && self.value() == other.value())
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.enum_path().hash(state);
        self.value().hash(state);
    }
}

impl PartialOrd for EnumValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// same key as Eq and Hash
impl Ord for EnumValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.enum_path()
            .cmp(other.enum_path())
            .then_with(|| self.value().cmp(other.value()))
    }
}

impl Serialize for EnumValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.value())
    }
}
