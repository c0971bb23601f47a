pub mod enum_model;
pub mod field;

pub use enum_model::{EnumModel, EnumModelError, MemberModel};
pub use field::{FieldCardinality, FieldModel};
