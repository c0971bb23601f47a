//! Cast boundary between application values and stored rows.
//!
//! The record model calls [`AttributeCaster::cast_out`] just before a row is
//! written and [`AttributeCaster::cast_in`] right after it is read.

mod collection;
mod input;
pub mod policy;
mod scalar;


pub use collection::CollectionCodec;
pub use input::{CastInput, RawScalar};
pub use scalar::ScalarCodec;

use crate::{
    config::CastConfig,
    error::ErrorClass,
    model::{FieldCardinality, FieldModel},
    obs::sink::{self, CastDirection, CastEvent, RejectReason},
    registry::EnumRegistry,
    value::EnumValue,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

/// Stored form of an enum attribute; `None` is a SQL NULL.
pub type StoredValue = Option<String>;

///
/// CastError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CastError {
    #[error("'{key}' is not a member of enum '{enum_path}'")]
    UnknownMember { enum_path: String, key: String },

    #[error("enum type '{enum_path}' is not registered")]
    UnknownEnumType { enum_path: String },

    #[error("field '{field}' is not nullable")]
    NotNullableEnumField { field: String },

    #[error("field '{field}' expects {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("field '{field}' cannot store key '{key}' containing the delimiter '{delimiter}'")]
    DelimiterInKey {
        field: String,
        key: String,
        delimiter: char,
    },
}

impl CastError {
    pub(crate) fn not_nullable(field: &FieldModel) -> Self {
        Self::NotNullableEnumField {
            field: field.name.clone(),
        }
    }

    pub(crate) fn type_mismatch(field: &FieldModel, input: &CastInput) -> Self {
        let expected = match field.cardinality {
            FieldCardinality::Scalar => format!("enum {}", field.enum_path),
            cardinality => format!("{cardinality} of enum {}", field.enum_path),
        };

        Self::TypeMismatch {
            field: field.name.clone(),
            expected,
            found: input.describe(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownMember { .. } => ErrorClass::Corruption,
            Self::UnknownEnumType { .. } => ErrorClass::NotFound,
            Self::NotNullableEnumField { .. } | Self::DelimiterInKey { .. } => {
                ErrorClass::InvariantViolation
            }
            Self::TypeMismatch { .. } => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::UnknownMember { .. } => RejectReason::UnknownMember,
            Self::UnknownEnumType { .. } => RejectReason::UnknownEnumType,
            Self::NotNullableEnumField { .. } => RejectReason::NotNullable,
            Self::TypeMismatch { .. } => RejectReason::TypeMismatch,
            Self::DelimiterInKey { .. } => RejectReason::DelimiterInKey,
        }
    }
}

///
/// CastOutput
///
/// Application-side value produced by an inbound cast.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CastOutput {
    Null,
    One(EnumValue),
    Many(Vec<EnumValue>),
}

impl CastOutput {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_one(&self) -> Option<&EnumValue> {
        match self {
            Self::One(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_many(&self) -> Option<&[EnumValue]> {
        match self {
            Self::Many(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_many(self) -> Option<Vec<EnumValue>> {
        match self {
            Self::Many(values) => Some(values),
            _ => None,
        }
    }
}

impl From<CastOutput> for CastInput {
    fn from(output: CastOutput) -> Self {
        match output {
            CastOutput::Null => Self::Null,
            CastOutput::One(value) => Self::Enum(value),
            CastOutput::Many(values) => values.into(),
        }
    }
}

///
/// AttributeCaster
///
/// Entry point for the record model. Dispatches on the field's cardinality
/// to the scalar or collection codec and reports every cast to the sink.
///

#[derive(Clone)]
pub struct AttributeCaster {
    registry: Arc<EnumRegistry>,
    config: CastConfig,
    scalar: ScalarCodec,
    collection: CollectionCodec,
}

impl AttributeCaster {
    #[must_use]
    pub fn new(registry: Arc<EnumRegistry>) -> Self {
        Self::with_config(registry, CastConfig::default())
    }

    #[must_use]
    pub fn with_config(registry: Arc<EnumRegistry>, config: CastConfig) -> Self {
        if registry.delimiter() != config.delimiter {
            tracing::warn!(
                registry = %registry.delimiter(),
                caster = %config.delimiter,
                "caster delimiter differs from the registry's; colliding keys fail on write"
            );
        }

        Self {
            scalar: ScalarCodec::new(Arc::clone(&registry)),
            collection: CollectionCodec::new(Arc::clone(&registry), config.delimiter),
            registry,
            config,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<EnumRegistry> {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &CastConfig {
        &self.config
    }

    /// Outbound cast: application value to storage value.
    pub fn cast_out(
        &self,
        field: &FieldModel,
        input: &CastInput,
    ) -> Result<StoredValue, CastError> {
        let result = self.check_field(field).and_then(|()| {
            if field.cardinality.is_collection() {
                self.collection.to_storage(field, input)
            } else {
                self.scalar.to_storage(field, input)
            }
        });

        match &result {
            Ok(stored) => {
                tracing::trace!(field = %field.name, stored = ?stored, "cast out");
                sink::record(CastEvent::Cast {
                    direction: CastDirection::Out,
                    field: &field.name,
                    null: stored.is_none(),
                });
            }
            Err(err) => report(CastDirection::Out, field, err),
        }

        result
    }

    /// Inbound cast: storage value to application value.
    pub fn cast_in(
        &self,
        field: &FieldModel,
        stored: Option<&str>,
    ) -> Result<CastOutput, CastError> {
        let result = self.check_field(field).and_then(|()| {
            if field.cardinality.is_collection() {
                let values = self.collection.from_storage(field, stored)?;

                Ok(values.map_or(CastOutput::Null, CastOutput::Many))
            } else {
                let value = self.scalar.from_storage(field, stored)?;

                Ok(value.map_or(CastOutput::Null, CastOutput::One))
            }
        });

        match &result {
            Ok(output) => {
                tracing::trace!(field = %field.name, stored = ?stored, "cast in");
                sink::record(CastEvent::Cast {
                    direction: CastDirection::In,
                    field: &field.name,
                    null: output.is_null(),
                });
            }
            Err(err) => report(CastDirection::In, field, err),
        }

        result
    }

    fn check_field(&self, field: &FieldModel) -> Result<(), CastError> {
        if self.registry.contains(&field.enum_path) {
            Ok(())
        } else {
            Err(CastError::UnknownEnumType {
                enum_path: field.enum_path.clone(),
            })
        }
    }
}

fn report(direction: CastDirection, field: &FieldModel, err: &CastError) {
    tracing::debug!(
        field = %field.name,
        ?direction,
        class = %err.class(),
        error = %err,
        "cast rejected"
    );
    sink::record(CastEvent::Rejected {
        direction,
        field: &field.name,
        reason: err.reason(),
    });
}
