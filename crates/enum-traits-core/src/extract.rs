//! Name extraction.
//!
//! A valid value is named by the identifier of its first enumerator. An
//! invalid value gets the synthetic cast text `(TypeName)value`; that text is
//! for diagnostics only and never appears in the public name tables.

use enum_traits_common::fixed_str::fits;
use enum_traits_common::{CapacityError, FixedStr, ScanWindow};

use crate::declaration::{Declaration, Enumerator};
use crate::probe::first_enumerator;
use crate::range::indices;

/// Name of a value already known to be valid.
pub const fn name_of_valid<const CAP: usize>(decl: &Declaration<'_>, value: i128) -> FixedStr<CAP> {
    match first_enumerator(decl, value) {
        Some(index) => FixedStr::new(decl.enumerators[index].name),
        None => panic!("name_of_valid called with a value that names no enumerator"),
    }
}

/// Synthetic cast text for a value known to be invalid.
pub const fn name_of_invalid<const CAP: usize>(
    decl: &Declaration<'_>,
    value: i128,
) -> Result<FixedStr<CAP>, CapacityError> {
    assert!(
        first_enumerator(decl, value).is_none(),
        "name_of_invalid called with a value that names an enumerator"
    );
    let text = match FixedStr::<CAP>::EMPTY.try_push_str("(") {
        Ok(text) => text,
        Err(err) => return Err(err),
    };
    let text = match text.try_push_str(decl.type_name) {
        Ok(text) => text,
        Err(err) => return Err(err),
    };
    let text = match text.try_push_str(")") {
        Ok(text) => text,
        Err(err) => return Err(err),
    };
    text.try_push_i128(value)
}

/// Name for any value: the identifier when valid, the cast text otherwise.
pub const fn render<const CAP: usize>(
    decl: &Declaration<'_>,
    value: i128,
) -> Result<FixedStr<CAP>, CapacityError> {
    match first_enumerator(decl, value) {
        Some(index) => FixedStr::try_new(decl.enumerators[index].name),
        None => name_of_invalid(decl, value),
    }
}

/// Names aligned with [`crate::range::values`]. `N` must equal the scanned count.
pub const fn names<const N: usize, const CAP: usize>(
    decl: &Declaration<'_>,
    window: ScanWindow,
) -> [FixedStr<CAP>; N] {
    let indices = indices::<N>(decl, window);
    let mut out = [FixedStr::<CAP>::EMPTY; N];
    let mut i = 0;
    while i < N {
        out[i] = FixedStr::new(decl.enumerators[indices[i]].name);
        i += 1;
    }
    out
}

/// Fail constant evaluation when any declared identifier exceeds `capacity`.
pub const fn assert_names_fit(enumerators: &[Enumerator<'_>], capacity: usize) {
    let mut i = 0;
    while i < enumerators.len() {
        if !fits(enumerators[i].name.len(), capacity) {
            panic!(
                "enumerator name exceeds the fixed name capacity; raise ENUM_TRAITS_MAX_NAME_LENGTH"
            );
        }
        i += 1;
    }
}

/// The first declared identifier that does not fit `capacity`.
pub fn first_oversized<'a>(enumerators: &[Enumerator<'a>], capacity: usize) -> Option<&'a str> {
    enumerators
        .iter()
        .map(|e| e.name)
        .find(|name| !fits(name.len(), capacity))
}
