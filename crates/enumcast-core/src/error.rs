use crate::{cast::CastError, model::EnumModelError, registry::RegistryError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Return the cast failure carried by this error, if any.
    #[must_use]
    pub const fn cast_detail(&self) -> Option<&CastError> {
        match &self.detail {
            Some(ErrorDetail::Cast(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Cast(CastError),
}

impl From<CastError> for InternalError {
    fn from(err: CastError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Cast,
            message: err.to_string(),
            detail: Some(ErrorDetail::Cast(err)),
        }
    }
}

impl From<RegistryError> for InternalError {
    fn from(err: RegistryError) -> Self {
        Self::new(err.class(), ErrorOrigin::Registry, err.to_string())
    }
}

impl From<EnumModelError> for InternalError {
    fn from(err: EnumModelError) -> Self {
        Self::new(EnumModelError::class(), ErrorOrigin::Model, err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    NotFound,
    Internal,
    Conflict,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Cast,
    Model,
    Registry,
    Serialize,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cast => "cast",
            Self::Model => "model",
            Self::Registry => "registry",
            Self::Serialize => "serialize",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
