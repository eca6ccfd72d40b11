//! Validity probe.
//!
//! Decides whether a single candidate value names an enumerator. The probe
//! knows nothing about scan windows; callers decide which candidates to ask
//! about.

use crate::declaration::Declaration;

/// Index of the first enumerator, in declaration order, holding `value`.
///
/// When several enumerators alias one value, only this first one is ever
/// reported.
pub const fn first_enumerator(decl: &Declaration<'_>, value: i128) -> Option<usize> {
    let mut i = 0;
    while i < decl.enumerators.len() {
        if decl.enumerators[i].value == value {
            return Some(i);
        }
        i += 1;
    }
    None
}

pub const fn is_valid(decl: &Declaration<'_>, value: i128) -> bool {
    first_enumerator(decl, value).is_some()
}
