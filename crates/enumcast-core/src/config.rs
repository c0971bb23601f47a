use crate::{DEFAULT_DELIMITER, serialize::SerializeError};
use serde::{Deserialize, Serialize};

///
/// CastConfig
///
/// Caster settings a host can embed in its own configuration document.
/// Missing keys fall back to their defaults.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CastConfig {
    /// Separator between canonical keys in stored collections.
    /// Build the shared registry with `EnumRegistry::with_config` so stored
    /// values are checked against the same character.
    pub delimiter: char,
}

impl CastConfig {
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a JSON configuration fragment.
    pub fn from_json(json: &str) -> Result<Self, SerializeError> {
        crate::serialize::from_json(json)
    }
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
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
    fn missing_keys_use_defaults() {
        assert_eq!(CastConfig::from_json("{}").unwrap(), CastConfig::default());
        assert_eq!(CastConfig::default().delimiter, ',');
    }

    #[test]
    fn delimiter_can_be_overridden() {
        let config = CastConfig::from_json(r#"{ "delimiter": "|" }"#).unwrap();

        assert_eq!(config, CastConfig::default().with_delimiter('|'));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            CastConfig::from_json(r#"{ "separator": ";" }"#),
            Err(SerializeError::Deserialize(_))
        ));
    }
}
