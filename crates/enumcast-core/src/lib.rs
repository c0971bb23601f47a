//! Core runtime for enumcast: enum models, the member registry, enum values,
//! and the scalar/collection codecs a record model calls when it persists or
//! rehydrates enum-typed attributes.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod cast;
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod registry;
pub mod serialize;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Delimiter joining canonical keys in stored array/set collections.
pub const DEFAULT_DELIMITER: char = ',';

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cast::{AttributeCaster, CastInput, CastOutput, RawScalar, StoredValue},
        model::{EnumModel, FieldCardinality, FieldModel, MemberModel},
        registry::EnumRegistry,
        traits::{EnumKind, Path},
        value::EnumValue,
    };
}
