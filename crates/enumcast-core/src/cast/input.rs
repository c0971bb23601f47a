use crate::value::EnumValue;
use std::fmt;

///
/// RawScalar
///
/// Primitive storage scalar handed to a cast instead of an enum value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawScalar {
    /// Canonical key.
    Text(String),
    /// Member ordinal.
    Int(i64),
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(int) => write!(f, "{int}"),
        }
    }
}

///
/// CastInput
///
/// Application-side value offered to an outbound cast.
/// Anything that is neither an enum value nor a raw scalar arrives as
/// `Invalid` and is rejected with a type mismatch.
///

#[derive(Clone, Debug)]
pub enum CastInput {
    Null,
    Enum(EnumValue),
    Raw(RawScalar),
    List(Vec<Self>),
    Invalid { type_name: String },
}

impl CastInput {
    /// Wrap a value of an unsupported type, keeping only its type name.
    #[must_use]
    pub fn invalid<T: ?Sized>(_value: &T) -> Self {
        Self::Invalid {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short description of the input's shape for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Enum(value) => format!("enum {}", value.enum_path()),
            Self::Raw(RawScalar::Text(_)) => "text".to_string(),
            Self::Raw(RawScalar::Int(_)) => "int".to_string(),
            Self::List(_) => "list".to_string(),
            Self::Invalid { type_name } => type_name.clone(),
        }
    }
}

impl From<EnumValue> for CastInput {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<&EnumValue> for CastInput {
    fn from(value: &EnumValue) -> Self {
        Self::Enum(value.clone())
    }
}

impl From<RawScalar> for CastInput {
    fn from(raw: RawScalar) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for CastInput {
    fn from(text: &str) -> Self {
        Self::Raw(RawScalar::Text(text.to_string()))
    }
}

impl From<String> for CastInput {
    fn from(text: String) -> Self {
        Self::Raw(RawScalar::Text(text))
    }
}

impl From<i64> for CastInput {
    fn from(ordinal: i64) -> Self {
        Self::Raw(RawScalar::Int(ordinal))
    }
}

impl<T: Into<Self>> From<Vec<T>> for CastInput {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for CastInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
