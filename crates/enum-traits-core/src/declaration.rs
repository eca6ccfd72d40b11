//! Enum declarations as seen by the engine.
//!
//! A declaration is the type name, the range of its underlying type, and the
//! enumerators in declaration order with their values widened to `i128`.
//! Both the `enum_traits!` macro and the build-time generator reduce an enum
//! to this shape before anything is scanned.

use enum_traits_common::{ReprRange, ScanWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Enumerator<'a> {
    pub name: &'a str,
    pub value: i128,
}

impl<'a> Enumerator<'a> {
    pub const fn new(name: &'a str, value: i128) -> Self {
        Self { name, value }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub type_name: &'a str,
    pub repr: ReprRange,
    pub enumerators: &'a [Enumerator<'a>],
}

impl<'a> Declaration<'a> {
    pub const fn new(type_name: &'a str, repr: ReprRange, enumerators: &'a [Enumerator<'a>]) -> Self {
        Self {
            type_name,
            repr,
            enumerators,
        }
    }

    /// The part of `window` this type can actually hold.
    pub const fn effective_window(&self, window: ScanWindow) -> ScanWindow {
        window.clip(self.repr)
    }

    pub const fn len(&self) -> usize {
        self.enumerators.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.enumerators.is_empty()
    }
}
