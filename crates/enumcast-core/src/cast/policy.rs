//! Nullability policy.
//!
//! Pure decisions shared by the scalar and collection codecs. The write path
//! classifies application input; the read path classifies the stored string.
//! Both reject null for a non-nullable attribute.

use crate::model::{FieldCardinality, FieldModel};

///
/// InputShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputShape {
    Null,
    /// Empty collection.
    Empty,
    Present,
    /// Neither an enum value nor a recognised storage scalar.
    Foreign,
}

///
/// PolicyOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PolicyOutcome {
    /// Store, or return, null.
    Null,
    /// Store an empty string, or return an empty collection.
    Empty,
    /// Hand the value to the codec.
    Convert,
    /// Fail with `NotNullableEnumField`.
    RejectNull,
    /// Fail with `TypeMismatch`.
    RejectType,
}

///
/// ReadOutcome
///
/// Storage never holds a foreign type, so a read either yields null,
/// rejects null, or hands a string to the codec.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadOutcome<'a> {
    Null,
    /// Fail with `NotNullableEnumField`.
    RejectNull,
    /// Decode the stored string. Only array fields see `""` here.
    Decode(&'a str),
}

/// Decide how a write of `shape` into `field` proceeds.
#[must_use]
pub const fn outbound(field: &FieldModel, shape: InputShape) -> PolicyOutcome {
    decide(field.nullable, field.cardinality, shape)
}

/// Decide how the stored value of `field` is read back.
///
/// An empty string on a set field reads as null, mirroring the write path.
#[must_use]
pub fn inbound<'a>(field: &FieldModel, stored: Option<&'a str>) -> ReadOutcome<'a> {
    match (stored, field.cardinality) {
        (None, _) | (Some(""), FieldCardinality::Set) => {
            if field.nullable {
                ReadOutcome::Null
            } else {
                ReadOutcome::RejectNull
            }
        }
        (Some(stored), _) => ReadOutcome::Decode(stored),
    }
}

/// The write-side decision table.
#[must_use]
pub const fn decide(
    nullable: bool,
    cardinality: FieldCardinality,
    shape: InputShape,
) -> PolicyOutcome {
    match (shape, cardinality) {
        (InputShape::Foreign, _) => PolicyOutcome::RejectType,
        (InputShape::Present, _) | (InputShape::Empty, FieldCardinality::Scalar) => {
            PolicyOutcome::Convert
        }
        (InputShape::Empty, FieldCardinality::Array) => PolicyOutcome::Empty,
        (InputShape::Null, _) | (InputShape::Empty, FieldCardinality::Set) => {
            if nullable {
                PolicyOutcome::Null
            } else {
                PolicyOutcome::RejectNull
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FieldCardinality; 3] = [
        FieldCardinality::Scalar,
        FieldCardinality::Array,
        FieldCardinality::Set,
    ];

    #[test]
    fn null_follows_nullability_for_every_cardinality() {
        for cardinality in ALL {
            assert_eq!(
                decide(true, cardinality, InputShape::Null),
                PolicyOutcome::Null
            );
            assert_eq!(
                decide(false, cardinality, InputShape::Null),
                PolicyOutcome::RejectNull
            );
        }
    }

    #[test]
    fn empty_set_normalises_to_null_or_rejects() {
        assert_eq!(
            decide(true, FieldCardinality::Set, InputShape::Empty),
            PolicyOutcome::Null
        );
        assert_eq!(
            decide(false, FieldCardinality::Set, InputShape::Empty),
            PolicyOutcome::RejectNull
        );
    }

    #[test]
    fn empty_array_is_always_stored_as_empty() {
        assert_eq!(
            decide(true, FieldCardinality::Array, InputShape::Empty),
            PolicyOutcome::Empty
        );
        assert_eq!(
            decide(false, FieldCardinality::Array, InputShape::Empty),
            PolicyOutcome::Empty
        );
    }

    #[test]
    fn foreign_input_is_a_type_mismatch_regardless_of_nullability() {
        for cardinality in ALL {
            for nullable in [true, false] {
                assert_eq!(
                    decide(nullable, cardinality, InputShape::Foreign),
                    PolicyOutcome::RejectType
                );
            }
        }
    }

    #[test]
    fn outbound_reads_the_declaration() {
        let field = FieldModel::new("tags", "blog::StatusEnum", FieldCardinality::Set).nullable();

        assert_eq!(outbound(&field, InputShape::Empty), PolicyOutcome::Null);
        assert_eq!(outbound(&field, InputShape::Present), PolicyOutcome::Convert);
    }

    #[test]
    fn inbound_null_follows_nullability() {
        for cardinality in ALL {
            let strict = FieldModel::new("f", "blog::StatusEnum", cardinality);

            assert_eq!(inbound(&strict, None), ReadOutcome::RejectNull);
            assert_eq!(inbound(&strict.nullable(), None), ReadOutcome::Null);
        }
    }

    #[test]
    fn inbound_empty_string_depends_on_cardinality() {
        let set = FieldModel::new("tags", "blog::StatusEnum", FieldCardinality::Set);
        let array = FieldModel::new("tags", "blog::StatusEnum", FieldCardinality::Array);
        let scalar = FieldModel::new("status", "blog::StatusEnum", FieldCardinality::Scalar);

        assert_eq!(inbound(&set, Some("")), ReadOutcome::RejectNull);
        assert_eq!(inbound(&set.nullable(), Some("")), ReadOutcome::Null);
        assert_eq!(inbound(&array, Some("")), ReadOutcome::Decode(""));
        assert_eq!(inbound(&scalar, Some("")), ReadOutcome::Decode(""));
        assert_eq!(inbound(&scalar, Some("draft")), ReadOutcome::Decode("draft"));
    }
}
