use crate::{
    cast::{
        CastError, CastInput, StoredValue,
        policy::{self, InputShape, PolicyOutcome, ReadOutcome},
    },
    model::FieldModel,
    registry::EnumRegistry,
    value::EnumValue,
};
use std::sync::Arc;

///
/// ScalarCodec
///
/// Converts one enum value to and from its stored canonical key.
///

#[derive(Clone)]
pub struct ScalarCodec {
    registry: Arc<EnumRegistry>,
}

impl ScalarCodec {
    #[must_use]
    pub const fn new(registry: Arc<EnumRegistry>) -> Self {
        Self { registry }
    }

    /// Encode `input` for storage in `field`.
    pub fn to_storage(
        &self,
        field: &FieldModel,
        input: &CastInput,
    ) -> Result<StoredValue, CastError> {
        let shape = match input {
            CastInput::Null => InputShape::Null,
            CastInput::Enum(_) | CastInput::Raw(_) => InputShape::Present,
            CastInput::List(_) | CastInput::Invalid { .. } => InputShape::Foreign,
        };

        match policy::outbound(field, shape) {
            PolicyOutcome::Null => Ok(None),
            PolicyOutcome::RejectNull => Err(CastError::not_nullable(field)),
            PolicyOutcome::Convert => {
                let value = self.coerce(field, input)?;

                Ok(Some(value.serialize().to_string()))
            }
            // scalar input never classifies as an empty collection
            PolicyOutcome::RejectType | PolicyOutcome::Empty => {
                Err(CastError::type_mismatch(field, input))
            }
        }
    }

    /// Decode the stored scalar of `field`.
    pub fn from_storage(
        &self,
        field: &FieldModel,
        stored: Option<&str>,
    ) -> Result<Option<EnumValue>, CastError> {
        match policy::inbound(field, stored) {
            ReadOutcome::Null => Ok(None),
            ReadOutcome::RejectNull => Err(CastError::not_nullable(field)),
            ReadOutcome::Decode(key) => self.registry.make(&field.enum_path, key).map(Some),
        }
    }

    /// Turn one non-null input into a member of the field's enum type.
    pub(crate) fn coerce(
        &self,
        field: &FieldModel,
        input: &CastInput,
    ) -> Result<EnumValue, CastError> {
        match input {
            CastInput::Enum(value) if value.enum_path() == field.enum_path => Ok(value.clone()),
            CastInput::Raw(raw) => self.registry.resolve(&field.enum_path, raw),
            _ => Err(CastError::type_mismatch(field, input)),
        }
    }
}

///
/// TESTS
///
