use crate::error::ErrorClass;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// EnumModelError
///
/// Definition errors detected when an enum model is validated.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EnumModelError {
    #[error("enum path must not be empty")]
    EmptyPath,

    #[error("enum '{path}' declares no members")]
    NoMembers { path: String },

    #[error("enum '{path}' has an unnamed member at index {index}")]
    EmptyName { path: String, index: usize },

    #[error("enum '{path}' member '{name}' has an empty stored value")]
    EmptyValue { path: String, name: String },

    #[error("enum '{path}' declares member name '{name}' more than once")]
    DuplicateName { path: String, name: String },

    #[error("enum '{path}' maps more than one member to stored value '{value}'")]
    DuplicateValue { path: String, value: String },

    #[error("enum '{path}' declares ordinal {ordinal} more than once")]
    DuplicateOrdinal { path: String, ordinal: i64 },

    #[error("enum '{path}' stored value '{value}' contains the delimiter '{delimiter}'")]
    DelimiterInValue {
        path: String,
        value: String,
        delimiter: char,
    },
}

impl EnumModelError {
    pub(crate) const fn class() -> ErrorClass {
        ErrorClass::InvariantViolation
    }
}

///
/// MemberModel
///
/// One declared member of an enum type.
/// `value` is the canonical key written to storage; `name` is the
/// declared identifier and only differs from `value` when remapped.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberModel {
    pub name: String,
    pub value: String,
    pub label: String,
    pub ordinal: i64,
}

impl MemberModel {
    /// Build a member whose stored value and label default to its name.
    pub fn new(name: impl Into<String>, ordinal: i64) -> Self {
        let name = name.into();

        Self {
            value: name.clone(),
            label: name.clone(),
            name,
            ordinal,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn with_ordinal(mut self, ordinal: i64) -> Self {
        self.ordinal = ordinal;
        self
    }
}

///
/// EnumModel
///
/// Runtime description of one closed enum type: its path and its members
/// in declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumModel {
    pub path: String,
    pub members: Vec<MemberModel>,
}

impl EnumModel {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            members: Vec::new(),
        }
    }

    /// Append a member using its declaration position as ordinal.
    #[must_use]
    pub fn member(self, name: impl Into<String>) -> Self {
        let ordinal = self.next_ordinal();

        self.with_member(MemberModel::new(name, ordinal))
    }

    /// Append a member whose stored value differs from its name.
    #[must_use]
    pub fn member_mapped(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let ordinal = self.next_ordinal();

        self.with_member(MemberModel::new(name, ordinal).with_value(value))
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberModel) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn next_ordinal(&self) -> i64 {
        i64::try_from(self.members.len()).unwrap_or(i64::MAX)
    }

    /// Check the model is well formed for storage under `delimiter`.
    pub fn validate(&self, delimiter: char) -> Result<(), EnumModelError> {
        if self.path.is_empty() {
            return Err(EnumModelError::EmptyPath);
        }
        if self.members.is_empty() {
            return Err(EnumModelError::NoMembers {
                path: self.path.clone(),
            });
        }

        let mut names = BTreeSet::new();
        let mut values = BTreeSet::new();
        let mut ordinals = BTreeSet::new();

        for (index, member) in self.members.iter().enumerate() {
            if member.name.is_empty() {
                return Err(EnumModelError::EmptyName {
                    path: self.path.clone(),
                    index,
                });
            }
            if member.value.is_empty() {
                return Err(EnumModelError::EmptyValue {
                    path: self.path.clone(),
                    name: member.name.clone(),
                });
            }
            if member.value.contains(delimiter) {
                return Err(EnumModelError::DelimiterInValue {
                    path: self.path.clone(),
                    value: member.value.clone(),
                    delimiter,
                });
            }
            if !names.insert(member.name.as_str()) {
                return Err(EnumModelError::DuplicateName {
                    path: self.path.clone(),
                    name: member.name.clone(),
                });
            }
            if !values.insert(member.value.as_str()) {
                return Err(EnumModelError::DuplicateValue {
                    path: self.path.clone(),
                    value: member.value.clone(),
                });
            }
            if !ordinals.insert(member.ordinal) {
                return Err(EnumModelError::DuplicateOrdinal {
                    path: self.path.clone(),
                    ordinal: member.ordinal,
                });
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
