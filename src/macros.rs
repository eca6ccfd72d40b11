/// Declare a fieldless enum and derive its reflection tables at compile time.
///
/// ```
/// use enum_traits::{EnumBounds, EnumTraits, enum_traits};
///
/// enum_traits! {
///     #[allow(dead_code)]
///     enum Hamsters: i16 {
///         MyHamster = 10,
///         Stranger = -10,
///     }
/// }
///
/// assert_eq!(Hamsters::values(), &[Hamsters::Stranger, Hamsters::MyHamster]);
/// assert_eq!(Hamsters::names(), &["Stranger", "MyHamster"]);
/// ```
///
/// The underlying type defaults to `isize`. The generated enum derives
/// `Clone, Copy, Debug, PartialEq, Eq, Hash` and implements
/// [`EnumBounds`](crate::EnumBounds), [`EnumTraits`](crate::EnumTraits) and
/// `Display` (the enumerator name, empty when outside the scan window).
///
/// An identifier that does not fit `ENUM_TRAITS_MAX_NAME_LENGTH` fails the
/// build at the declaration:
///
/// ```compile_fail
/// enum_traits::enum_traits! {
///     enum Verbose: u8 {
///         ThisEnumeratorNameIsFarTooLongToFitTheDefaultSixtyFourByteNameBuffer = 1,
///     }
/// }
/// ```
///
/// An enum with no value inside the scan window still gets [`EnumBounds`]
/// (with inverted bounds), but reading its tables fails the build:
///
/// ```compile_fail
/// use enum_traits::{EnumTraits, enum_traits};
///
/// enum_traits! {
///     enum Countries: i32 {
///         Germany = -1000,
///         Czechia = 1000,
///     }
/// }
///
/// let _ = Countries::values();
/// ```
///
/// ```
/// use enum_traits::{EnumBounds, enum_traits};
///
/// enum_traits! {
///     #[allow(dead_code)]
///     enum Countries: i32 {
///         Germany = -1000,
///         Czechia = 1000,
///     }
/// }
///
/// assert_eq!(Countries::COUNT, 0);
/// assert!(Countries::MIN > Countries::MAX);
/// ```
///
/// [`EnumBounds`]: crate::EnumBounds
#[macro_export]
macro_rules! enum_traits {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $value:expr)? ),+ $(,)?
        }
    ) => {
        $crate::__enum_traits_impl! {
            [$(#[$meta])*] $vis $name $repr
            { $( [$(#[$vmeta])*] $variant $(= $value)? ),+ }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $value:expr)? ),+ $(,)?
        }
    ) => {
        $crate::__enum_traits_impl! {
            [$(#[$meta])*] $vis $name isize
            { $( [$(#[$vmeta])*] $variant $(= $value)? ),+ }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enum_traits_impl {
    (
        [$($meta:tt)*] $vis:vis $name:ident $repr:ident
        { $( [$($vmeta:tt)*] $variant:ident $(= $value:expr)? ),+ }
    ) => {
        $($meta)*
        #[repr($repr)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $($vmeta)* $variant $(= $value)? ),+
        }

        #[doc(hidden)]
        #[allow(dead_code)]
        impl $name {
            const __ENUMERATORS: &'static [$crate::__private::engine::Enumerator<'static>] = &[
                $(
                    $crate::__private::engine::Enumerator::new(
                        ::core::stringify!($variant),
                        $name::$variant as i128,
                    )
                ),+
            ];

            const __DECLARATION: $crate::__private::engine::Declaration<'static> =
                $crate::__private::engine::Declaration::new(
                    ::core::stringify!($name),
                    <$repr as $crate::Underlying>::TYPE.range(),
                    $name::__ENUMERATORS,
                );

            const __BOUNDS: $crate::__private::engine::Bounds = $crate::__private::engine::range::bounds(
                &$name::__DECLARATION,
                $crate::ScanWindow::CONFIGURED,
            );

            const __COUNT: usize = $crate::__private::engine::range::count(
                &$name::__DECLARATION,
                $crate::ScanWindow::CONFIGURED,
            );

            const __VALUES: [$name; $name::__COUNT] = $crate::__private::engine::range::select(
                &[$($name::$variant),+],
                &$crate::__private::engine::range::indices::<{ $name::__COUNT }>(
                    &$name::__DECLARATION,
                    $crate::ScanWindow::CONFIGURED,
                ),
            );

            const __NAMES: [$crate::StaticString; $name::__COUNT] =
                $crate::__private::engine::extract::names::<
                    { $name::__COUNT },
                    { $crate::__private::common::limits::MAX_NAME_LENGTH },
                >(&$name::__DECLARATION, $crate::ScanWindow::CONFIGURED);

            const __VALUES_REF: &'static [$name] = &$name::__VALUES;
            const __NAMES_REF: &'static [$crate::StaticString] = &$name::__NAMES;

            fn __name(self) -> &'static str {
                let mut index = 0;
                while index < $name::__VALUES_REF.len() {
                    if $name::__VALUES_REF[index] as i128 == self as i128 {
                        return $name::__NAMES_REF[index].as_str();
                    }
                    index += 1;
                }
                ""
            }
        }

        const _: () = {
            $crate::__private::engine::extract::assert_names_fit(
                $name::__ENUMERATORS,
                $crate::__private::common::limits::MAX_NAME_LENGTH,
            );
            let _ = $name::__COUNT;
        };

        impl $crate::EnumBounds for $name {
            type Repr = $repr;

            const INVALID: $repr = <$repr>::MAX;
            const MIN: $repr = $name::__BOUNDS.min as $repr;
            const MAX: $repr = $name::__BOUNDS.max as $repr;
            const COUNT: usize = $name::__COUNT;

            fn to_repr(self) -> $repr {
                self as $repr
            }
        }

        impl $crate::EnumTraits for $name {
            const VALUES: &'static [Self] = $crate::__private::require_non_empty($name::__VALUES_REF);
            const NAMES: &'static [$crate::StaticString] =
                $crate::__private::require_non_empty($name::__NAMES_REF);
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.__name())
            }
        }
    };
}
