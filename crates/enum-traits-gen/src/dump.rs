//! Signature dumps.
//!
//! A C++ toolchain can reflect an enum only through the text it renders for
//! `validateEnum<T, TValue>()` instantiations. A dump is that text captured
//! one probe per line as `<value>\t<signature>`. Blank lines and lines
//! starting with `#` are ignored. Each line is probed with the dialect's
//! rule; lines rendering a named enumerator contribute it to a declaration
//! that the ordinary derivation then scans.

use enum_traits_common::{FixedStr, ReprType};
use enum_traits_core::{SignatureDialect, extract_signature_name, probe_signature};
use tracing::{debug, trace};

use crate::error::GenError;
use crate::eval::parse_int;
use crate::parser::{DeclOrigin, EnumDecl, EnumeratorDecl, SourceSyntax};

/// Room for a rendered name before the configured capacity is applied.
const DUMP_NAME_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureDump {
    pub dialect: SignatureDialect,
    pub decl: EnumDecl,
    /// Values whose rendering named no enumerator, with the synthetic text.
    pub invalid: Vec<(i128, String)>,
}

pub fn read_signature_dump(
    text: &str,
    dialect: Option<SignatureDialect>,
    type_name: &str,
    repr: ReprType,
) -> Result<SignatureDump, GenError> {
    let lines: Vec<(u32, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index as u32 + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .collect();

    let dialect = match dialect {
        Some(dialect) => dialect,
        None => lines
            .iter()
            .find_map(|(_, line)| line.split_once('\t').and_then(|(_, sig)| SignatureDialect::detect(sig)))
            .ok_or_else(|| GenError::Dump {
                line: lines.first().map(|(line, _)| *line).unwrap_or(0),
                message: "cannot detect the signature dialect; pass it explicitly".to_string(),
            })?,
    };
    debug!(%dialect, type_name, lines = lines.len(), "reading signature dump");

    let range = repr.range();
    let mut enumerators = Vec::new();
    let mut invalid = Vec::new();
    for (line, content) in lines {
        let Some((value, signature)) = content.split_once('\t') else {
            return Err(GenError::Dump {
                line,
                message: "expected `<value>\\t<signature>`".to_string(),
            });
        };
        let value = parse_value(value.trim()).map_err(|message| GenError::Dump { line, message })?;
        if !range.contains(value) {
            return Err(GenError::OutOfRange {
                line,
                type_name: type_name.to_string(),
                name: signature.to_string(),
                value,
                repr,
            });
        }

        let bytes = signature.as_bytes();
        let valid = probe_signature(dialect, bytes)
            .map_err(|source| GenError::Signature { line, source })?;
        let name: FixedStr<DUMP_NAME_CAPACITY> = extract_signature_name(dialect, bytes, valid)
            .map_err(|source| GenError::Signature { line, source })?;
        trace!(value = %value, valid, name = name.as_str(), "probed");
        if valid {
            enumerators.push(EnumeratorDecl {
                name: name.as_str().to_string(),
                value,
                line,
            });
        } else {
            invalid.push((value, name.as_str().to_string()));
        }
    }

    Ok(SignatureDump {
        dialect,
        decl: EnumDecl {
            name: type_name.to_string(),
            repr,
            origin: DeclOrigin::Signatures,
            line: 1,
            enumerators,
        },
        invalid,
    })
}

fn parse_value(text: &str) -> Result<i128, String> {
    match text.strip_prefix('-') {
        Some(magnitude) => parse_int(magnitude, SourceSyntax::Cpp).map(|value| -value),
        None => parse_int(text, SourceSyntax::Cpp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLANG_DUMP: &str = "\
# probes for Fruits
1\tbool etraits::detail::validateEnum() [T = Fruits, TValue = 1]
2\tbool etraits::detail::validateEnum() [T = Fruits, TValue = Fruits::Apples]
5\tbool etraits::detail::validateEnum() [T = Fruits, TValue = Fruits::Oranges]

-3\tbool etraits::detail::validateEnum() [T = Fruits, TValue = -3]
";

    #[test]
    fn test_clang_dump_detected() {
        let dump = read_signature_dump(CLANG_DUMP, None, "Fruits", ReprType::I32).expect("reads");
        assert_eq!(dump.dialect, SignatureDialect::Clang);
        let names: Vec<_> = dump
            .decl
            .enumerators
            .iter()
            .map(|e| (e.name.as_str(), e.value))
            .collect();
        assert_eq!(names, vec![("Apples", 2), ("Oranges", 5)]);
        assert_eq!(dump.invalid, vec![(1, "1".to_string()), (-3, "-3".to_string())]);
        assert_eq!(dump.decl.origin, DeclOrigin::Signatures);
    }

    #[test]
    fn test_msvc_dump_with_hex_values() {
        let dump = "0x2a\tbool __cdecl etraits::detail::validateEnum<enum Fruits,(enum Fruits)0x2a>(void) noexcept\n\
                    0xb\tbool __cdecl etraits::detail::validateEnum<enum Fruits,Fruits::Bananas>(void) noexcept";
        let dump = read_signature_dump(dump, Some(SignatureDialect::Msvc), "Fruits", ReprType::I32)
            .expect("reads");
        assert_eq!(dump.decl.enumerators.len(), 1);
        assert_eq!(dump.decl.enumerators[0].name, "Bananas");
        assert_eq!(dump.decl.enumerators[0].value, 11);
        assert_eq!(dump.invalid[0].1, "(enum Fruits)0x2a");
    }

    #[test]
    fn test_malformed_lines() {
        let err = read_signature_dump("2 no tab here", Some(SignatureDialect::Gcc), "E", ReprType::I32)
            .unwrap_err();
        assert_eq!(err.line(), Some(1));

        let err = read_signature_dump(
            "\n7\tconstexpr bool validateEnum()",
            Some(SignatureDialect::Gcc),
            "E",
            ReprType::I32,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::Signature { line: 2, .. }));

        let err = read_signature_dump("300\t[with T = E; T TValue = E::A]", None, "E", ReprType::U8)
            .unwrap_err();
        assert!(matches!(err, GenError::OutOfRange { value: 300, .. }));
    }

    #[test]
    fn test_undetectable_dialect() {
        let err = read_signature_dump("1\tvoid f()", None, "E", ReprType::I32).unwrap_err();
        assert!(err.to_string().contains("dialect"));
    }
}
