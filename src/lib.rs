//! Compile-time enum reflection.
//!
//! Declare an enum through [`enum_traits!`] and its bounds, valid values and
//! names are computed during constant evaluation:
//!
//! ```
//! use enum_traits::{EnumBounds, EnumTraits, enum_traits};
//!
//! enum_traits! {
//!     pub enum Fruits: i32 {
//!         Apples = 2,
//!         Oranges = 5,
//!         Pears = 8,
//!         Bananas = 11,
//!     }
//! }
//!
//! assert_eq!(Fruits::MIN, 2);
//! assert_eq!(Fruits::MAX, 11);
//! assert_eq!(Fruits::name_of_repr(5), "Oranges");
//! assert_eq!(Fruits::from_str("nope"), Fruits::INVALID);
//! ```
//!
//! Values are discovered by scanning the window
//! `[ENUM_TRAITS_MIN_ENUM_VALUE, ENUM_TRAITS_MAX_ENUM_VALUE]` (default
//! `[-128, 127]`) clipped to the underlying type. Enumerators outside the
//! window are invisible to every query.
//!
//! Enums that cannot go through the macro (C/C++ headers, enums owned by
//! another crate) get the same impls from `enum-traits-gen` at build time.

mod macros;
mod repr;

pub use enum_traits_common::{FixedStr, ReprRange, ReprType, ScanWindow, StaticString};
pub use repr::Underlying;

/// Bounds and size of an enum's valid values. Implemented for every
/// reflected enum, including ones with nothing inside the scan window.
pub trait EnumBounds: Copy + Eq + 'static {
    type Repr: Underlying;

    /// Returned by [`EnumTraits::from_str`] on a miss: the largest value of
    /// the underlying type.
    const INVALID: Self::Repr;
    /// Smallest valid value, or the top of the window when there is none.
    const MIN: Self::Repr;
    /// Largest valid value, or the bottom of the window when there is none.
    const MAX: Self::Repr;
    /// Number of distinct valid values; gaps between them are not counted.
    const COUNT: usize;

    fn to_repr(self) -> Self::Repr;

    fn min() -> Self::Repr {
        Self::MIN
    }

    fn max() -> Self::Repr {
        Self::MAX
    }

    fn count() -> usize {
        Self::COUNT
    }
}

/// Value and name tables of an enum with at least one valid value.
///
/// For an enum whose window holds no valid value, using [`VALUES`] or
/// [`NAMES`] (directly or through any method here) fails to compile.
///
/// [`VALUES`]: EnumTraits::VALUES
/// [`NAMES`]: EnumTraits::NAMES
pub trait EnumTraits: EnumBounds {
    /// Valid values in ascending numeric order.
    const VALUES: &'static [Self];
    /// Names index-aligned with [`EnumTraits::VALUES`].
    const NAMES: &'static [StaticString];

    fn values() -> &'static [Self] {
        Self::VALUES
    }

    fn names() -> &'static [StaticString] {
        Self::NAMES
    }

    /// Name of `self`, or the empty string when it is not a discovered value.
    fn name(self) -> StaticString {
        Self::VALUES
            .iter()
            .position(|value| *value == self)
            .map(|index| Self::NAMES[index])
            .unwrap_or(StaticString::EMPTY)
    }

    fn from_repr(repr: Self::Repr) -> Option<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|value| value.to_repr() == repr)
    }

    /// Name of a raw underlying value, or the empty string on a miss.
    fn name_of_repr(repr: Self::Repr) -> StaticString {
        Self::from_repr(repr)
            .map(Self::name)
            .unwrap_or(StaticString::EMPTY)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|candidate| candidate.eq_str(name))
            .map(|index| Self::VALUES[index])
    }

    /// Underlying value named `name`, or [`EnumBounds::INVALID`] on a miss.
    fn from_str(name: &str) -> Self::Repr {
        Self::from_name(name)
            .map(Self::to_repr)
            .unwrap_or(Self::INVALID)
    }
}

#[doc(hidden)]
pub mod __private {
    pub use enum_traits_common as common;
    pub use enum_traits_core as engine;

    /// Fails constant evaluation when a reflected enum has no valid value.
    pub const fn require_non_empty<T>(items: &'static [T]) -> &'static [T] {
        if items.is_empty() {
            panic!(
                "enum has no valid value inside the scan window; widen \
                 ENUM_TRAITS_MIN_ENUM_VALUE / ENUM_TRAITS_MAX_ENUM_VALUE"
            );
        }
        items
    }
}
