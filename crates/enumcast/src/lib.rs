//! ## Crate layout
//! - `core`: enum models, the member registry, enum values, codecs, and
//!   observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` mirrors the surface a record model needs to declare enum
//! attributes and cast them on write and read.

pub use enumcast_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use enumcast_core::enum_kind;
pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        cast::{AttributeCaster, CastInput, CastOutput, RawScalar, StoredValue},
        config::CastConfig,
        model::{EnumModel, FieldCardinality, FieldModel, MemberModel},
        registry::EnumRegistry,
        traits::{EnumKind as _, Path as _},
        value::EnumValue,
    };
    pub use crate::{Error, enum_kind};
}
