use crate::traits::Path;
use candid::CandidType;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// FieldCardinality
///
/// How many enum values one attribute holds and how they are stored.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum FieldCardinality {
    /// Exactly one value, stored as its canonical key.
    Scalar,
    /// Ordered values with duplicates, stored delimiter-joined.
    Array,
    /// Deduplicated values, stored delimiter-joined; empty is stored as null.
    Set,
}

impl FieldCardinality {
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Array | Self::Set)
    }
}

///
/// FieldModel
///
/// Per-attribute declaration owned by the record model.
/// The casters only read it. Hosts may load declarations from JSON;
/// `nullable` defaults to `false`.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldModel {
    /// Attribute name as declared on the record.
    pub name: String,
    /// Path of the enum type the attribute holds.
    pub enum_path: String,
    pub cardinality: FieldCardinality,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldModel {
    pub fn new(
        name: impl Into<String>,
        enum_path: impl Into<String>,
        cardinality: FieldCardinality,
    ) -> Self {
        Self {
            name: name.into(),
            enum_path: enum_path.into(),
            cardinality,
            nullable: false,
        }
    }

    pub fn scalar<E: Path>(name: impl Into<String>) -> Self {
        Self::new(name, E::PATH, FieldCardinality::Scalar)
    }

    pub fn array<E: Path>(name: impl Into<String>) -> Self {
        Self::new(name, E::PATH, FieldCardinality::Array)
    }

    pub fn set<E: Path>(name: impl Into<String>) -> Self {
        Self::new(name, E::PATH, FieldCardinality::Set)
    }

    /// Mark the attribute as accepting null.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

///
/// TESTS
///
