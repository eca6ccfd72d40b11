//! Fixed-capacity strings.
//!
//! `FixedStr<N>` owns a zero-padded `[u8; N]` buffer and can be built in
//! constant expressions. The capacity counts a terminator, so a `FixedStr<64>`
//! holds at most 62 bytes of text followed by at least one zero byte. Text
//! that does not fit is rejected: in const context the construction panics,
//! which surfaces as a compile error; at run time `try_new` reports a
//! [`CapacityError`]. Nothing is ever truncated.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use serde::{Serialize, Serializer};

use crate::limits::MAX_NAME_LENGTH;
use crate::scan::{bytes_eq, find_byte};

/// Fixed-capacity string sized by the configured name capacity.
pub type StaticString = FixedStr<MAX_NAME_LENGTH>;

/// Text did not fit into a fixed-capacity string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "text of {len} bytes does not fit a {capacity}-byte name buffer (terminator included); \
     raise ENUM_TRAITS_MAX_NAME_LENGTH"
)]
pub struct CapacityError {
    pub len: usize,
    pub capacity: usize,
}

/// Whether `len` bytes of text plus a terminator fit strictly inside `capacity`.
pub const fn fits(len: usize, capacity: usize) -> bool {
    capacity > 0 && len < capacity - 1
}

#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// The empty string.
    pub const EMPTY: Self = Self { bytes: [0; N] };

    /// Build from `text`, panicking when it does not fit.
    ///
    /// Use this in constant expressions, where the panic becomes a compile error.
    pub const fn new(text: &str) -> Self {
        match Self::try_new(text) {
            Ok(value) => value,
            Err(_) => panic!(
                "enumerator name exceeds the fixed name capacity; raise ENUM_TRAITS_MAX_NAME_LENGTH"
            ),
        }
    }

    /// Build from `text`, reporting an error when it does not fit.
    pub const fn try_new(text: &str) -> Result<Self, CapacityError> {
        Self::EMPTY.try_push_str(text)
    }

    /// Append `text`, keeping room for the terminator.
    pub const fn try_push_str(self, text: &str) -> Result<Self, CapacityError> {
        self.try_push_bytes(text.as_bytes())
    }

    const fn try_push_bytes(self, src: &[u8]) -> Result<Self, CapacityError> {
        let start = self.len();
        if !fits(start + src.len(), N) {
            return Err(CapacityError {
                len: start + src.len(),
                capacity: N,
            });
        }
        let mut bytes = self.bytes;
        let mut i = 0;
        while i < src.len() {
            bytes[start + i] = src[i];
            i += 1;
        }
        Ok(Self { bytes })
    }

    /// Append the decimal rendering of `value`.
    pub const fn try_push_i128(self, value: i128) -> Result<Self, CapacityError> {
        // 39 digits for u128::MAX plus a sign
        let mut digits = [0u8; 40];
        let mut len = 0;
        let mut magnitude = value.unsigned_abs();
        loop {
            digits[len] = b'0' + (magnitude % 10) as u8;
            len += 1;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        if value < 0 {
            digits[len] = b'-';
            len += 1;
        }
        let mut ordered = [0u8; 40];
        let mut i = 0;
        while i < len {
            ordered[i] = digits[len - 1 - i];
            i += 1;
        }
        self.try_push_bytes(ordered.split_at(len).0)
    }

    /// Byte capacity, terminator included.
    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn len(&self) -> usize {
        match find_byte(&self.bytes, 0, 0) {
            Some(end) => end,
            None => N,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text bytes up to the terminator.
    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes.split_at(self.len()).0
    }

    pub const fn as_str(&self) -> &str {
        match std::str::from_utf8(self.as_bytes()) {
            Ok(text) => text,
            // Only whole `&str` values and ASCII digits are ever copied in.
            Err(_) => "",
        }
    }

    /// Content equality against plain text, usable in const context.
    pub const fn eq_str(&self, other: &str) -> bool {
        bytes_eq(self.as_bytes(), other.as_bytes())
    }

    /// Content equality against a string of any capacity.
    pub const fn eq_fixed<const M: usize>(&self, other: &FixedStr<M>) -> bool {
        bytes_eq(self.as_bytes(), other.as_bytes())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const N: usize> Deref for FixedStr<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for FixedStr<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize, const M: usize> PartialEq<FixedStr<M>> for FixedStr<N> {
    fn eq(&self, other: &FixedStr<M>) -> bool {
        self.eq_fixed(other)
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, other: &str) -> bool {
        self.eq_str(other)
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.eq_str(other)
    }
}

impl<const N: usize> PartialEq<FixedStr<N>> for str {
    fn eq(&self, other: &FixedStr<N>) -> bool {
        other.eq_str(self)
    }
}

impl<const N: usize> PartialEq<FixedStr<N>> for &str {
    fn eq(&self, other: &FixedStr<N>) -> bool {
        other.eq_str(self)
    }
}

impl<const N: usize> Hash for FixedStr<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> Serialize for FixedStr<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_and_pads() {
        const NAME: FixedStr<8> = FixedStr::new("Pears");
        assert_eq!(NAME.len(), 5);
        assert_eq!(NAME.as_str(), "Pears");
        assert_eq!(NAME.capacity(), 8);
    }

    #[test]
    fn test_capacity_counts_terminator() {
        // 6 bytes of text need 7 bytes, which is not strictly less than 7.
        assert_eq!(
            FixedStr::<7>::try_new("Apples"),
            Err(CapacityError {
                len: 6,
                capacity: 7
            })
        );
        assert!(FixedStr::<8>::try_new("Apples").is_ok());
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        assert!(FixedStr::<0>::try_new("").is_err());
        assert!(FixedStr::<1>::try_new("").is_err());
        assert!(FixedStr::<2>::try_new("").is_ok());
    }

    #[test]
    #[should_panic(expected = "ENUM_TRAITS_MAX_NAME_LENGTH")]
    fn test_new_panics_on_overflow() {
        let _ = FixedStr::<4>::new("Bananas");
    }

    #[test]
    fn test_equality_against_text() {
        let name = FixedStr::<16>::new("Oranges");
        assert_eq!(name, "Oranges");
        assert_eq!("Oranges", name);
        assert_ne!(name, "Orange");
        assert_ne!(name, "Oranges!");
        assert!(name.eq_str("Oranges"));
    }

    #[test]
    fn test_equality_across_capacities() {
        let small = FixedStr::<8>::new("Husky");
        let large = FixedStr::<64>::new("Husky");
        let other = FixedStr::<64>::new("Huskies");
        assert_eq!(small, large);
        assert_ne!(small, other);
    }

    #[test]
    fn test_empty_and_default() {
        let empty = StaticString::default();
        assert!(empty.is_empty());
        assert_eq!(empty, "");
        assert_eq!(empty, StaticString::EMPTY);
    }

    #[test]
    fn test_push_renders_cast_text() {
        let text = FixedStr::<32>::EMPTY
            .try_push_str("(Fruits)")
            .and_then(|s| s.try_push_i128(-42))
            .expect("fits");
        assert_eq!(text, "(Fruits)-42");
    }

    #[test]
    fn test_push_i128_extremes() {
        let min = FixedStr::<48>::EMPTY.try_push_i128(i128::MIN).unwrap();
        assert_eq!(min.as_str(), i128::MIN.to_string());
        let zero = FixedStr::<4>::EMPTY.try_push_i128(0).unwrap();
        assert_eq!(zero, "0");
    }

    #[test]
    fn test_push_overflow_reports_total_length() {
        let err = FixedStr::<6>::new("abc").try_push_str("de").unwrap_err();
        assert_eq!(err.len, 5);
        assert_eq!(err.capacity, 6);
    }

    #[test]
    fn test_display_and_serialize() {
        let name = FixedStr::<16>::new("Berlin");
        assert_eq!(name.to_string(), "Berlin");
        assert_eq!(format!("{name:?}"), "\"Berlin\"");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Berlin\"");
    }
}
