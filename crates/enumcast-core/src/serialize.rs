//! JSON helpers for enum values and caster configuration.

use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    registry::EnumRegistry,
    value::EnumValue,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("deserialize error: {0}")]
    Deserialize(String),
}

impl SerializeError {
    pub(crate) const fn class() -> ErrorClass {
        ErrorClass::Internal
    }
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        Self::new(
            SerializeError::class(),
            ErrorOrigin::Serialize,
            err.to_string(),
        )
    }
}

/// Serialize a value to a JSON string.
pub fn to_json<T>(value: &T) -> Result<String, SerializeError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(|err| SerializeError::Serialize(err.to_string()))
}

/// Deserialize a value produced by [`to_json`].
pub fn from_json<T>(json: &str) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json).map_err(|err| SerializeError::Deserialize(err.to_string()))
}

/// Read a JSON string literal back into the registered member of `path`.
pub fn enum_from_json(
    registry: &EnumRegistry,
    path: &str,
    json: &str,
) -> Result<EnumValue, InternalError> {
    let key: String = from_json(json)?;

    registry.make(path, &key).map_err(InternalError::from)
}

/// Read a JSON array of string literals back into members of `path`.
pub fn enums_from_json(
    registry: &EnumRegistry,
    path: &str,
    json: &str,
) -> Result<Vec<EnumValue>, InternalError> {
    let keys: Vec<String> = from_json(json)?;

    keys.iter()
        .map(|key| registry.make(path, key).map_err(InternalError::from))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cast::CastError,
        test_fixtures::{StatusEnum, registry},
        traits::Path,
    };

    #[test]
    fn enum_values_serialize_as_json_strings() {
        let reg = registry();
        let draft = StatusEnum::draft(&reg).unwrap();
        let archived = StatusEnum::archived(&reg).unwrap();

        assert_eq!(draft.to_json().unwrap(), r#""draft""#);
        assert_eq!(
            to_json(&vec![draft, archived]).unwrap(),
            r#"["draft","stored archive"]"#
        );
    }

    #[test]
    fn json_literals_resolve_to_the_registered_instance() {
        let reg = registry();
        let draft = StatusEnum::draft(&reg).unwrap();

        let back = enum_from_json(&reg, StatusEnum::PATH, r#""draft""#).unwrap();
        assert!(back.same_instance(&draft));

        let many =
            enums_from_json(&reg, StatusEnum::PATH, r#"["stored archive","draft"]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1], draft);
    }

    #[test]
    fn bad_json_is_a_serialize_error() {
        let reg = registry();
        let err = enum_from_json(&reg, StatusEnum::PATH, "draft").unwrap_err();

        assert_eq!(err.origin, ErrorOrigin::Serialize);

        let err = enum_from_json(&reg, StatusEnum::PATH, r#""gone""#).unwrap_err();
        assert!(matches!(
            err.cast_detail(),
            Some(CastError::UnknownMember { .. })
        ));
    }
}
