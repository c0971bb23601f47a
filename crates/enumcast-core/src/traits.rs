use crate::model::EnumModel;

///
/// Path
/// Fully-qualified enum type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EnumKind
///
/// Compile-time declared enum type.
/// Implemented by `enum_kind!`; the model is registered once at startup.
///

pub trait EnumKind: Path + 'static {
    fn model() -> EnumModel;
}
