use candid::CandidType;
use derive_more::Display;
use enumcast_core::{
    cast::CastError,
    error::{ErrorOrigin as CoreErrorOrigin, InternalError},
    model::EnumModelError,
    obs::RejectReason,
    registry::RegistryError,
    serialize::SerializeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(CandidType, Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Returns `true` if a null or empty value hit a non-nullable field.
    #[must_use]
    pub const fn is_not_nullable(&self) -> bool {
        matches!(self.kind, ErrorKind::Cast(CastErrorKind::NotNullableEnumField))
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::Cast(CastErrorKind::TypeMismatch))
    }

    #[must_use]
    pub const fn is_unknown_member(&self) -> bool {
        matches!(self.kind, ErrorKind::Cast(CastErrorKind::UnknownMember))
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.cast_detail(), err.origin) {
            (Some(cast), _) => ErrorKind::Cast(cast.reason().into()),
            (None, CoreErrorOrigin::Model | CoreErrorOrigin::Registry) => ErrorKind::Definition,
            (None, CoreErrorOrigin::Cast | CoreErrorOrigin::Serialize) => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<CastError> for Error {
    fn from(err: CastError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<EnumModelError> for Error {
    fn from(err: EnumModelError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and record-model integrations.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Cast(CastErrorKind),

    /// Enum type or member declarations are invalid or conflict.
    Definition,

    /// The caller cannot remediate this.
    Internal,
}

///
/// CastErrorKind
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CastErrorKind {
    /// Stored or supplied key is not a declared member.
    UnknownMember,

    /// The field names an enum type that was never registered.
    UnknownEnumType,

    /// Null or empty value on a field declared non-nullable.
    NotNullableEnumField,

    /// Input is neither a storage scalar nor a member of the expected type.
    TypeMismatch,

    /// Canonical key collides with the configured delimiter.
    DelimiterInKey,
}

impl From<RejectReason> for CastErrorKind {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::UnknownMember => Self::UnknownMember,
            RejectReason::UnknownEnumType => Self::UnknownEnumType,
            RejectReason::NotNullable => Self::NotNullableEnumField,
            RejectReason::TypeMismatch => Self::TypeMismatch,
            RejectReason::DelimiterInKey => Self::DelimiterInKey,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Cast,
    Model,
    Registry,
    Serialize,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Cast => Self::Cast,
            CoreErrorOrigin::Model => Self::Model,
            CoreErrorOrigin::Registry => Self::Registry,
            CoreErrorOrigin::Serialize => Self::Serialize,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_errors_map_to_cast_kinds() {
        let err = Error::from(CastError::NotNullableEnumField {
            field: "set_of_enums".to_string(),
        });

        assert!(err.is_not_nullable());
        assert_eq!(err.origin, ErrorOrigin::Cast);
        assert_eq!(err.to_string(), "field 'set_of_enums' is not nullable");
    }

    #[test]
    fn definition_errors_map_to_definition_kind() {
        let err = Error::from(RegistryError::DuplicateEnumType {
            path: "blog::StatusEnum".to_string(),
        });
        assert_eq!(err.kind, ErrorKind::Definition);
        assert_eq!(err.origin, ErrorOrigin::Registry);

        let err = Error::from(EnumModelError::EmptyPath);
        assert_eq!(err.kind, ErrorKind::Definition);
        assert_eq!(err.origin, ErrorOrigin::Model);
    }

    #[test]
    fn serialize_errors_are_internal() {
        let err = Error::from(SerializeError::Deserialize("eof".to_string()));

        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.origin.to_string(), "Serialize");
    }

    #[test]
    fn public_errors_serialize() {
        let err = Error::from(CastError::TypeMismatch {
            field: "status".to_string(),
            expected: "enum blog::StatusEnum".to_string(),
            found: "list".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        let back: Error = serde_json::from_str(&json).unwrap();

        assert!(back.is_type_mismatch());
        assert_eq!(back.message, err.message);
    }
}
