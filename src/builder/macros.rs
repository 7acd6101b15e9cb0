//! Macros for declaring phase enums.

/// Declare a fieldless phase enum and implement [`State`](crate::core::State)
/// for it.
///
/// The generated enum is `Copy`, `Eq`, `Hash` and serializable, knows every
/// variant through an `ALL` constant, and displays as its variant name.
/// Attributes on the enum and its variants are forwarded, so docs and extra
/// derives such as `Default` still apply. The `final:` and `error:` lists
/// are optional.
///
/// # Example
///
/// ```
/// use keycalc::core::State;
/// use keycalc::state_enum;
///
/// state_enum! {
///     pub enum Lamp {
///         Off,
///         On,
///         Blown,
///     }
///     final: [Blown]
///     error: [Blown]
/// }
///
/// assert_eq!(Lamp::On.name(), "On");
/// assert_eq!(Lamp::Blown.to_string(), "Blown");
/// assert!(Lamp::Blown.is_final());
/// assert_eq!(Lamp::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            fn is_final(&self) -> bool {
                false $($(|| matches!(self, Self::$final))*)?
            }

            fn is_error(&self) -> bool {
                false $($(|| matches!(self, Self::$error))*)?
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
