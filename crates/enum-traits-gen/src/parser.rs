//! Enum declaration finder.
//!
//! Walks a token stream looking for fieldless enum definitions and reduces
//! each one to an [`EnumDecl`]: name, underlying type and enumerators with
//! evaluated values in declaration order.
//!
//! Rust: `#[repr(..)]` is honored (`isize` otherwise, `repr(C)` means `i32`).
//! Generic and data-carrying enums are skipped, and so is every enum nested
//! in a module, function or block: generated impls name the type from the
//! `include!` site, where only top-level items are in scope.
//!
//! C/C++: `enum`, `enum class` and `enum struct`, with an optional `: base`.
//! Scoped enums without a base are `int`. Unscoped ones without a base get
//! the first of `int`, `unsigned int`, `long long`, `unsigned long long` that
//! holds every value. `typedef enum { .. } Name;` takes the typedef name.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use enum_traits_common::ReprType;
use enum_traits_core::Enumerator;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenError;
use crate::eval::{Scope, evaluate, join_type_name};
use crate::lexer::{Token, TokenKind, tokenize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSyntax {
    Rust,
    Cpp,
}

impl SourceSyntax {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "rs" => Some(SourceSyntax::Rust),
            "h" | "hh" | "hpp" | "hxx" | "h++" | "inl" | "ipp" | "c" | "cc" | "cpp" | "cxx"
            | "c++" | "ixx" | "cppm" => Some(SourceSyntax::Cpp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceSyntax::Rust => "rust",
            SourceSyntax::Cpp => "cpp",
        }
    }
}

impl fmt::Display for SourceSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceSyntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(SourceSyntax::Rust),
            "cpp" | "c++" | "c" => Ok(SourceSyntax::Cpp),
            _ => Err(format!("unknown source syntax '{s}'")),
        }
    }
}

/// Where a declaration came from. Everything except Rust sources needs its
/// enum definition emitted before it can be used from Rust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclOrigin {
    Rust,
    Cpp,
    Signatures,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumeratorDecl {
    pub name: String,
    pub value: i128,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub repr: ReprType,
    pub origin: DeclOrigin,
    pub line: u32,
    pub enumerators: Vec<EnumeratorDecl>,
}

impl EnumDecl {
    /// Borrowed enumerators in the shape the engine scans.
    pub fn engine_enumerators(&self) -> Vec<Enumerator<'_>> {
        self.enumerators
            .iter()
            .map(|enumerator| Enumerator::new(&enumerator.name, enumerator.value))
            .collect()
    }

    pub fn needs_definition(&self) -> bool {
        self.origin != DeclOrigin::Rust
    }
}

pub fn parse_source(text: &str, syntax: SourceSyntax) -> Result<Vec<EnumDecl>, GenError> {
    let tokens = tokenize(text, syntax)?;
    let decls = match syntax {
        SourceSyntax::Rust => parse_rust(&tokens)?,
        SourceSyntax::Cpp => parse_cpp(&tokens)?,
    };
    for decl in &decls {
        debug!(
            name = %decl.name,
            repr = %decl.repr,
            enumerators = decl.enumerators.len(),
            line = decl.line,
            "found enum"
        );
    }
    Ok(decls)
}

/// An enumerator before evaluation.
struct RawEnumerator<'t, 's> {
    name: &'s str,
    line: u32,
    /// Tokens after `=`, if any.
    value: Option<&'t [Token<'s>]>,
}

// =====================================================================
// Rust
// =====================================================================

fn parse_rust(tokens: &[Token<'_>]) -> Result<Vec<EnumDecl>, GenError> {
    let mut decls = Vec::new();
    let mut repr: Option<ReprType> = None;
    let mut depth = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_punct("#") {
            let inner = tokens.get(i + 1).is_some_and(|t| t.is_punct("!"));
            let open = if inner { i + 2 } else { i + 1 };
            if !tokens.get(open).is_some_and(|t| t.is_punct("[")) {
                i += 1;
                continue;
            }
            let close = matching(tokens, open, "[", "]")?;
            if !inner {
                if let Some(found) = repr_attribute(&tokens[open + 1..close]) {
                    repr = Some(found);
                }
            }
            i = close + 1;
            continue;
        }
        if token.is_punct(";") || token.is_punct("{") || token.is_punct("}") {
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth = depth.saturating_sub(1);
            }
            repr = None;
            i += 1;
            continue;
        }
        if token.is_ident("enum") && tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Ident) {
            if depth > 0 {
                let name = &tokens[i + 1];
                debug!(name = name.text, line = name.line, "skipping nested enum");
                repr = None;
                i += 2;
                continue;
            }
            let (decl, next) = parse_rust_enum(tokens, i, repr.take())?;
            decls.extend(decl);
            i = next;
            continue;
        }
        i += 1;
    }
    Ok(decls)
}

/// `repr(u8)`, `repr(C)`, `repr(C, i16)` and friends.
fn repr_attribute(tokens: &[Token<'_>]) -> Option<ReprType> {
    if !tokens.first()?.is_ident("repr") {
        return None;
    }
    let mut c_repr = false;
    for token in &tokens[1..] {
        if token.kind != TokenKind::Ident {
            continue;
        }
        if let Some(repr) = ReprType::from_rust_name(token.text) {
            return Some(repr);
        }
        c_repr |= token.text == "C";
    }
    c_repr.then_some(ReprType::I32)
}

fn parse_rust_enum(
    tokens: &[Token<'_>],
    at: usize,
    repr: Option<ReprType>,
) -> Result<(Option<EnumDecl>, usize), GenError> {
    let name = tokens[at + 1];
    let open = at + 2;
    match tokens.get(open) {
        Some(token) if token.is_punct("{") => {}
        Some(token) if token.is_punct("<") => {
            debug!(name = name.text, line = name.line, "skipping generic enum");
            return Ok((None, open));
        }
        _ => return Ok((None, open)),
    }
    let close = matching(tokens, open, "{", "}")?;

    let mut raw = Vec::new();
    for segment in split_top_level(&tokens[open + 1..close]) {
        let mut rest = segment;
        while rest.first().is_some_and(|t| t.is_punct("#")) {
            let Some(open_attr) = rest.get(1).filter(|t| t.is_punct("[")).map(|_| 1) else {
                break;
            };
            let close_attr = matching(rest, open_attr, "[", "]")?;
            rest = &rest[close_attr + 1..];
        }
        let Some(variant) = rest.first() else {
            continue;
        };
        if variant.kind != TokenKind::Ident {
            return Err(GenError::syntax(
                variant.line,
                format!("expected a variant of `{}`, found `{}`", name.text, variant.text),
            ));
        }
        match rest.get(1) {
            None => raw.push(RawEnumerator {
                name: variant.text,
                line: variant.line,
                value: None,
            }),
            Some(next) if next.is_punct("=") => raw.push(RawEnumerator {
                name: variant.text,
                line: variant.line,
                value: Some(&rest[2..]),
            }),
            Some(next) if next.is_punct("(") || next.is_punct("{") => {
                debug!(name = name.text, line = name.line, "skipping enum with fields");
                return Ok((None, close + 1));
            }
            Some(next) => {
                return Err(GenError::syntax(
                    next.line,
                    format!("unexpected `{}` after `{}::{}`", next.text, name.text, variant.text),
                ));
            }
        }
    }
    if raw.is_empty() {
        debug!(name = name.text, line = name.line, "skipping enum without variants");
        return Ok((None, close + 1));
    }

    let repr = repr.unwrap_or(ReprType::Isize);
    let enumerators = evaluate_enumerators(name.text, SourceSyntax::Rust, repr, &raw)?;
    check_range(name.text, repr, &enumerators)?;
    let decl = EnumDecl {
        name: name.text.to_string(),
        repr,
        origin: DeclOrigin::Rust,
        line: name.line,
        enumerators,
    };
    Ok((Some(decl), close + 1))
}

// =====================================================================
// C/C++
// =====================================================================

fn parse_cpp(tokens: &[Token<'_>]) -> Result<Vec<EnumDecl>, GenError> {
    let mut decls = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].is_ident("enum") {
            let (decl, next) = parse_cpp_enum(tokens, i)?;
            decls.extend(decl);
            i = next;
        } else {
            i += 1;
        }
    }
    Ok(decls)
}

fn skip_cpp_attributes(tokens: &[Token<'_>], mut at: usize) -> Result<usize, GenError> {
    while tokens.get(at).is_some_and(|t| t.is_punct("["))
        && tokens.get(at + 1).is_some_and(|t| t.is_punct("["))
    {
        at = matching(tokens, at, "[", "]")? + 1;
    }
    Ok(at)
}

fn parse_cpp_enum(tokens: &[Token<'_>], at: usize) -> Result<(Option<EnumDecl>, usize), GenError> {
    let line = tokens[at].line;
    let typedef = at > 0 && tokens[at - 1].is_ident("typedef");
    let mut j = at + 1;
    let scoped = tokens
        .get(j)
        .is_some_and(|t| t.is_ident("class") || t.is_ident("struct"));
    if scoped {
        j += 1;
    }
    j = skip_cpp_attributes(tokens, j)?;

    let mut name = None;
    if let Some(token) = tokens.get(j).filter(|t| t.kind == TokenKind::Ident) {
        name = Some(token.text);
        j += 1;
    }

    let mut base = None;
    if tokens.get(j).is_some_and(|t| t.is_punct(":")) {
        let start = j + 1;
        let Some(len) = tokens[start..]
            .iter()
            .position(|t| t.is_punct("{") || t.is_punct(";"))
        else {
            return Ok((None, start));
        };
        let spelled = join_type_name(&tokens[start..start + len]);
        let repr = ReprType::from_c_name(&spelled).ok_or_else(|| {
            GenError::syntax(line, format!("unsupported underlying type `{spelled}`"))
        })?;
        base = Some(repr);
        j = start + len;
    }

    // Opaque declarations, `using enum`, and elaborated type specifiers.
    if !tokens.get(j).is_some_and(|t| t.is_punct("{")) {
        return Ok((None, j.max(at + 1)));
    }
    let open = j;
    let close = matching(tokens, open, "{", "}")?;

    if name.is_none() && typedef {
        name = tokens
            .get(close + 1)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text);
    }
    let Some(name) = name else {
        debug!(line, "skipping anonymous enum");
        return Ok((None, close + 1));
    };

    let mut raw = Vec::new();
    for segment in split_top_level(&tokens[open + 1..close]) {
        let Some(enumerator) = segment.first() else {
            continue;
        };
        if enumerator.kind != TokenKind::Ident {
            return Err(GenError::syntax(
                enumerator.line,
                format!("expected an enumerator of `{name}`, found `{}`", enumerator.text),
            ));
        }
        let after = skip_cpp_attributes(segment, 1)?;
        let value = match segment.get(after) {
            None => None,
            Some(token) if token.is_punct("=") => Some(&segment[after + 1..]),
            Some(token) => {
                return Err(GenError::syntax(
                    token.line,
                    format!("unexpected `{}` after `{name}::{}`", token.text, enumerator.text),
                ));
            }
        };
        raw.push(RawEnumerator {
            name: enumerator.text,
            line: enumerator.line,
            value,
        });
    }
    if raw.is_empty() {
        debug!(name, line, "skipping enum without enumerators");
        return Ok((None, close + 1));
    }

    let evaluation_repr = base.unwrap_or(ReprType::I32);
    let enumerators = evaluate_enumerators(name, SourceSyntax::Cpp, evaluation_repr, &raw)?;
    let repr = match base {
        Some(repr) => repr,
        None if scoped => ReprType::I32,
        None => widest_needed(&enumerators),
    };
    check_range(name, repr, &enumerators)?;
    let decl = EnumDecl {
        name: name.to_string(),
        repr,
        origin: DeclOrigin::Cpp,
        line,
        enumerators,
    };
    Ok((Some(decl), close + 1))
}

/// Underlying type an unscoped enum without a fixed base ends up with.
fn widest_needed(enumerators: &[EnumeratorDecl]) -> ReprType {
    [ReprType::I32, ReprType::U32, ReprType::I64, ReprType::U64]
        .into_iter()
        .find(|repr| {
            let range = repr.range();
            enumerators.iter().all(|e| range.contains(e.value))
        })
        .unwrap_or(ReprType::I64)
}

// =====================================================================
// Shared
// =====================================================================

fn evaluate_enumerators(
    type_name: &str,
    syntax: SourceSyntax,
    repr: ReprType,
    raw: &[RawEnumerator<'_, '_>],
) -> Result<Vec<EnumeratorDecl>, GenError> {
    let mut known: FxHashMap<String, i128> = FxHashMap::default();
    let mut enumerators = Vec::with_capacity(raw.len());
    let mut next = 0i128;
    for enumerator in raw {
        let value = match enumerator.value {
            Some([]) => {
                return Err(GenError::syntax(
                    enumerator.line,
                    format!("missing value after `{type_name}::{} =`", enumerator.name),
                ));
            }
            Some(tokens) => {
                let scope = Scope {
                    type_name,
                    syntax,
                    repr,
                    known: &known,
                };
                evaluate(tokens, &scope)?
            }
            None => next,
        };
        if known.insert(enumerator.name.to_string(), value).is_some() {
            return Err(GenError::syntax(
                enumerator.line,
                format!("`{type_name}::{}` is declared twice", enumerator.name),
            ));
        }
        next = value.checked_add(1).unwrap_or(value);
        enumerators.push(EnumeratorDecl {
            name: enumerator.name.to_string(),
            value,
            line: enumerator.line,
        });
    }
    Ok(enumerators)
}

fn check_range(
    type_name: &str,
    repr: ReprType,
    enumerators: &[EnumeratorDecl],
) -> Result<(), GenError> {
    let range = repr.range();
    match enumerators.iter().find(|e| !range.contains(e.value)) {
        Some(e) => Err(GenError::OutOfRange {
            line: e.line,
            type_name: type_name.to_string(),
            name: e.name.clone(),
            value: e.value,
            repr,
        }),
        None => Ok(()),
    }
}

/// Index of the bracket closing the one at `open`.
fn matching(tokens: &[Token<'_>], open: usize, left: &str, right: &str) -> Result<usize, GenError> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct(left) {
            depth += 1;
        } else if token.is_punct(right) {
            depth -= 1;
            if depth == 0 {
                return Ok(index);
            }
        }
    }
    Err(GenError::syntax(
        tokens[open].line,
        format!("unclosed `{left}`"),
    ))
}

/// Split on commas outside any bracket pair.
fn split_top_level<'t, 's>(tokens: &'t [Token<'s>]) -> Vec<&'t [Token<'s>]> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Punct {
            continue;
        }
        match token.text {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            "," if depth == 0 => {
                segments.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&tokens[start..]);
    segments
}
