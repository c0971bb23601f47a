// enum_kind
/// Declare a marker type for a closed enum and one factory per member.
///
/// ```ignore
/// enum_kind! {
///     pub struct StatusEnum = "blog::StatusEnum" {
///         draft,
///         archived = "stored archive",
///     }
/// }
///
/// registry.register_kind::<StatusEnum>()?;
/// let draft = StatusEnum::draft(&registry)?;
/// ```
///
/// A member stores its own name unless a value is given after `=`.
#[macro_export]
macro_rules! enum_kind {
    (
        $(#[$meta:meta])*
        $vis:vis struct $ty:ident = $path:literal {
            $( $member:ident $(= $value:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        $vis struct $ty;

        impl $crate::traits::Path for $ty {
            const PATH: &'static str = $path;
        }

        impl $crate::traits::EnumKind for $ty {
            fn model() -> $crate::model::EnumModel {
                $crate::model::EnumModel::new($path)
                    $(
                        .member_mapped(
                            stringify!($member),
                            $crate::__enum_member_value!($member $(, $value)?),
                        )
                    )+
            }
        }

        #[allow(dead_code)]
        impl $ty {
            $(
                $vis fn $member(
                    registry: &$crate::registry::EnumRegistry,
                ) -> ::std::result::Result<$crate::value::EnumValue, $crate::cast::CastError> {
                    registry.make_kind::<Self>($crate::__enum_member_value!($member $(, $value)?))
                }
            )+
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enum_member_value {
    ($member:ident) => {
        stringify!($member)
    };
    ($member:ident, $value:literal) => {
        $value
    };
}
