use crate::{
    cast::{
        CastError, CastInput, StoredValue,
        policy::{self, InputShape, PolicyOutcome, ReadOutcome},
        scalar::ScalarCodec,
    },
    model::{FieldCardinality, FieldModel},
    registry::EnumRegistry,
    value::EnumValue,
};
use std::{collections::HashSet, sync::Arc};

///
/// CollectionCodec
///
/// Converts arrays and sets of enum values to and from one
/// delimiter-joined string.
///
/// Array: order and duplicates are kept; empty is stored as "".
/// Set: first-seen order with duplicates dropped; empty is stored as null.
///

#[derive(Clone)]
pub struct CollectionCodec {
    registry: Arc<EnumRegistry>,
    scalar: ScalarCodec,
    delimiter: char,
}

impl CollectionCodec {
    #[must_use]
    pub fn new(registry: Arc<EnumRegistry>, delimiter: char) -> Self {
        Self {
            scalar: ScalarCodec::new(Arc::clone(&registry)),
            registry,
            delimiter,
        }
    }

    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Encode `input` for storage in the array or set `field`.
    pub fn to_storage(
        &self,
        field: &FieldModel,
        input: &CastInput,
    ) -> Result<StoredValue, CastError> {
        let (shape, items) = match input {
            CastInput::Null => (InputShape::Null, &[][..]),
            CastInput::List(items) if items.is_empty() => (InputShape::Empty, &[][..]),
            CastInput::List(items) => (InputShape::Present, items.as_slice()),
            CastInput::Enum(_) | CastInput::Raw(_) | CastInput::Invalid { .. } => {
                (InputShape::Foreign, &[][..])
            }
        };

        match policy::outbound(field, shape) {
            PolicyOutcome::Null => Ok(None),
            PolicyOutcome::Empty => Ok(Some(String::new())),
            PolicyOutcome::RejectNull => Err(CastError::not_nullable(field)),
            PolicyOutcome::RejectType => Err(CastError::type_mismatch(field, input)),
            PolicyOutcome::Convert => {
                let values = items
                    .iter()
                    .map(|item| self.scalar.coerce(field, item))
                    .collect::<Result<Vec<_>, _>>()?;

                self.join(field, &self.normalize(field, values)).map(Some)
            }
        }
    }

    /// Decode the stored string of the array or set `field`.
    pub fn from_storage(
        &self,
        field: &FieldModel,
        stored: Option<&str>,
    ) -> Result<Option<Vec<EnumValue>>, CastError> {
        match policy::inbound(field, stored) {
            ReadOutcome::Null => Ok(None),
            ReadOutcome::RejectNull => Err(CastError::not_nullable(field)),
            ReadOutcome::Decode("") => Ok(Some(Vec::new())),
            ReadOutcome::Decode(stored) => {
                let values = stored
                    .split(self.delimiter)
                    .map(|token| self.registry.make(&field.enum_path, token))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Some(self.normalize(field, values)))
            }
        }
    }

    // sets keep the first occurrence of each canonical key
    fn normalize(&self, field: &FieldModel, values: Vec<EnumValue>) -> Vec<EnumValue> {
        if field.cardinality != FieldCardinality::Set {
            return values;
        }

        let mut seen = HashSet::with_capacity(values.len());
        values
            .into_iter()
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }

    fn join(&self, field: &FieldModel, values: &[EnumValue]) -> Result<String, CastError> {
        let mut joined = String::new();

        for (i, value) in values.iter().enumerate() {
            let key = value.serialize();
            if key.contains(self.delimiter) {
                return Err(CastError::DelimiterInKey {
                    field: field.name.clone(),
                    key: key.to_string(),
                    delimiter: self.delimiter,
                });
            }

            if i > 0 {
                joined.push(self.delimiter);
            }
            joined.push_str(key);
        }

        Ok(joined)
    }
}

///
/// TESTS
///
