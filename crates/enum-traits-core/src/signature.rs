//! Compiler signature dialects.
//!
//! C++ toolchains render an instantiated probe function such as
//! `validateEnum<T, TValue>()` as text, and that text is the only reflection
//! such compilers offer. A value that names an enumerator renders as a
//! qualified identifier. Any other value renders as a synthetic numeric or
//! cast expression. The shape differs per toolchain family:
//!
//! | Dialect | Valid | Invalid |
//! |---|---|---|
//! | Clang | `[T = Fruits, TValue = Fruits::Apples]` | `[T = Fruits, TValue = 42]` |
//! | Gcc | `[with T = Fruits; T TValue = Fruits::Apples]` | `[with T = Fruits; T TValue = (Fruits)42]` |
//! | Msvc | `validateEnum<enum Fruits,Fruits::Apples>(void) noexcept` | `validateEnum<enum Fruits,(enum Fruits)0x2a>(void) noexcept` |
//!
//! Every rendering ends in a fixed trailer produced by the probe function's
//! own signature. Its length is tied to that exact wording: `]` for Clang and
//! Gcc, `>(void) noexcept` for Msvc.

use std::fmt;
use std::str::FromStr;

use enum_traits_common::scan::{find_byte, find_bytes, rfind_byte};
use enum_traits_common::{CapacityError, FixedStr};
use serde::{Deserialize, Serialize};

/// Marker preceding the rendered value in Clang and Gcc signatures.
const VALUE_MARKER: &[u8] = b"TValue = ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureDialect {
    Clang,
    Gcc,
    Msvc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature has no `TValue = ` marker")]
    MissingMarker,
    #[error("signature has no '{0}' delimiter before its trailer")]
    MissingDelimiter(char),
    #[error("signature is shorter than the {0}-byte trailer")]
    Truncated(usize),
    #[error("signature yields an empty name")]
    EmptyName,
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl SignatureDialect {
    pub const ALL: [SignatureDialect; 3] = [
        SignatureDialect::Clang,
        SignatureDialect::Gcc,
        SignatureDialect::Msvc,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SignatureDialect::Clang => "clang",
            SignatureDialect::Gcc => "gcc",
            SignatureDialect::Msvc => "msvc",
        }
    }

    /// Bytes of fixed suffix after the rendered value.
    pub const fn trailer_len(self) -> usize {
        match self {
            SignatureDialect::Clang | SignatureDialect::Gcc => 1,
            SignatureDialect::Msvc => 16,
        }
    }

    /// Delimiter preceding the synthetic text of an invalid value.
    const fn invalid_delimiter(self) -> u8 {
        match self {
            SignatureDialect::Clang | SignatureDialect::Gcc => b' ',
            SignatureDialect::Msvc => b',',
        }
    }

    /// Guess the dialect that produced `signature`.
    pub fn detect(signature: &str) -> Option<Self> {
        if signature.contains("__cdecl") || signature.ends_with(">(void) noexcept") {
            Some(SignatureDialect::Msvc)
        } else if signature.contains("[with ") {
            Some(SignatureDialect::Gcc)
        } else if signature.contains("[T = ") {
            Some(SignatureDialect::Clang)
        } else {
            None
        }
    }
}

impl fmt::Display for SignatureDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clang" => Ok(SignatureDialect::Clang),
            "gcc" | "g++" => Ok(SignatureDialect::Gcc),
            "msvc" | "cl" => Ok(SignatureDialect::Msvc),
            _ => Err(format!("unknown signature dialect '{s}'")),
        }
    }
}

/// Index one past the rendered value, i.e. where the trailer starts.
const fn value_end(dialect: SignatureDialect, signature: &[u8]) -> Result<usize, SignatureError> {
    let trailer = dialect.trailer_len();
    if signature.len() <= trailer {
        return Err(SignatureError::Truncated(trailer));
    }
    Ok(signature.len() - trailer)
}

/// Whether `signature` renders a named enumerator.
pub const fn probe_signature(
    dialect: SignatureDialect,
    signature: &[u8],
) -> Result<bool, SignatureError> {
    match dialect {
        SignatureDialect::Clang => {
            let start = match find_bytes(signature, VALUE_MARKER, 0) {
                Some(pos) => pos + VALUE_MARKER.len(),
                None => return Err(SignatureError::MissingMarker),
            };
            if start >= signature.len() {
                return Err(SignatureError::MissingMarker);
            }
            let first = signature[start];
            Ok(first != b'-' && !first.is_ascii_digit())
        }
        SignatureDialect::Gcc => match find_bytes(signature, VALUE_MARKER, 0) {
            Some(pos) => Ok(find_byte(signature, b'(', pos + VALUE_MARKER.len()).is_none()),
            None => Err(SignatureError::MissingMarker),
        },
        SignatureDialect::Msvc => {
            let end = match value_end(dialect, signature) {
                Ok(end) => end,
                Err(err) => return Err(err),
            };
            Ok(rfind_byte(signature, b')', end).is_none())
        }
    }
}

/// Slice the enumerator identifier (valid) or the synthetic value text
/// (invalid) out of `signature`.
pub const fn extract_signature_name<const CAP: usize>(
    dialect: SignatureDialect,
    signature: &[u8],
    valid: bool,
) -> Result<FixedStr<CAP>, SignatureError> {
    let end = match value_end(dialect, signature) {
        Ok(end) => end,
        Err(err) => return Err(err),
    };
    let delimiter = if valid {
        b':'
    } else {
        dialect.invalid_delimiter()
    };
    let begin = match rfind_byte(signature, delimiter, end - 1) {
        Some(pos) => pos + 1,
        None => return Err(SignatureError::MissingDelimiter(delimiter as char)),
    };
    if begin >= end {
        return Err(SignatureError::EmptyName);
    }
    let slice = signature.split_at(end).0.split_at(begin).1;
    let text = match std::str::from_utf8(slice) {
        Ok(text) => text,
        Err(_) => return Err(SignatureError::EmptyName),
    };
    match FixedStr::try_new(text) {
        Ok(name) => Ok(name),
        Err(err) => Err(SignatureError::Capacity(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLANG_VALID: &str =
        "bool etraits::detail::validateEnum() [T = Fruits, TValue = Fruits::Apples]";
    const CLANG_INVALID: &str = "bool etraits::detail::validateEnum() [T = Fruits, TValue = -3]";
    const GCC_VALID: &str = "constexpr bool etraits::detail::validateEnum() \
                             [with T = main::Fruits; T TValue = main::Fruits::Pears]";
    const GCC_INVALID: &str = "constexpr bool etraits::detail::validateEnum() \
                               [with T = Fruits; T TValue = (Fruits)42]";
    const MSVC_VALID: &str = "bool __cdecl etraits::detail::validateEnum<enum Fruits,Fruits::Bananas>(void) noexcept";
    const MSVC_INVALID: &str = "bool __cdecl etraits::detail::validateEnum<enum Fruits,(enum Fruits)0x2a>(void) noexcept";

    fn probe(dialect: SignatureDialect, text: &str) -> bool {
        probe_signature(dialect, text.as_bytes()).expect("well-formed signature")
    }

    fn extract(dialect: SignatureDialect, text: &str, valid: bool) -> FixedStr<64> {
        extract_signature_name(dialect, text.as_bytes(), valid).expect("well-formed signature")
    }

    #[test]
    fn test_clang_probe() {
        assert!(probe(SignatureDialect::Clang, CLANG_VALID));
        assert!(!probe(SignatureDialect::Clang, CLANG_INVALID));
        assert!(!probe(
            SignatureDialect::Clang,
            "bool validateEnum() [T = Fruits, TValue = 7]"
        ));
    }

    #[test]
    fn test_gcc_probe() {
        assert!(probe(SignatureDialect::Gcc, GCC_VALID));
        assert!(!probe(SignatureDialect::Gcc, GCC_INVALID));
    }

    #[test]
    fn test_msvc_probe_ignores_trailer_parenthesis() {
        assert!(probe(SignatureDialect::Msvc, MSVC_VALID));
        assert!(!probe(SignatureDialect::Msvc, MSVC_INVALID));
    }

    #[test]
    fn test_valid_names_strip_qualification() {
        assert_eq!(extract(SignatureDialect::Clang, CLANG_VALID, true), "Apples");
        assert_eq!(extract(SignatureDialect::Gcc, GCC_VALID, true), "Pears");
        assert_eq!(extract(SignatureDialect::Msvc, MSVC_VALID, true), "Bananas");
    }

    #[test]
    fn test_invalid_names_are_synthetic_text() {
        assert_eq!(extract(SignatureDialect::Clang, CLANG_INVALID, false), "-3");
        assert_eq!(extract(SignatureDialect::Gcc, GCC_INVALID, false), "(Fruits)42");
        assert_eq!(
            extract(SignatureDialect::Msvc, MSVC_INVALID, false),
            "(enum Fruits)0x2a"
        );
    }

    #[test]
    fn test_missing_marker_is_an_error() {
        assert_eq!(
            probe_signature(SignatureDialect::Gcc, b"bool validateEnum()"),
            Err(SignatureError::MissingMarker)
        );
        assert_eq!(
            probe_signature(SignatureDialect::Clang, b"[T = Fruits, TValue = "),
            Err(SignatureError::MissingMarker)
        );
    }

    #[test]
    fn test_short_signature_is_truncated() {
        assert_eq!(
            probe_signature(SignatureDialect::Msvc, b"(void)"),
            Err(SignatureError::Truncated(16))
        );
        assert_eq!(
            extract_signature_name::<64>(SignatureDialect::Clang, b"]", true),
            Err(SignatureError::Truncated(1))
        );
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            extract_signature_name::<64>(SignatureDialect::Clang, b"[TValue=Apples]", true),
            Err(SignatureError::MissingDelimiter(':'))
        );
    }

    #[test]
    fn test_name_overflow() {
        let result = extract_signature_name::<4>(SignatureDialect::Clang, CLANG_VALID.as_bytes(), true);
        assert!(matches!(result, Err(SignatureError::Capacity(_))));
    }

    #[test]
    fn test_detect() {
        assert_eq!(SignatureDialect::detect(CLANG_VALID), Some(SignatureDialect::Clang));
        assert_eq!(SignatureDialect::detect(GCC_INVALID), Some(SignatureDialect::Gcc));
        assert_eq!(SignatureDialect::detect(MSVC_VALID), Some(SignatureDialect::Msvc));
        assert_eq!(SignatureDialect::detect("void f()"), None);
    }

    #[test]
    fn test_parse_dialect_names() {
        assert_eq!("GCC".parse::<SignatureDialect>(), Ok(SignatureDialect::Gcc));
        assert_eq!("cl".parse::<SignatureDialect>(), Ok(SignatureDialect::Msvc));
        assert!("icc".parse::<SignatureDialect>().is_err());
    }
}
