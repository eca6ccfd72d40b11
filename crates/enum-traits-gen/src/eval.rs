//! Discriminant expression evaluator.
//!
//! Precedence climbing over the tokens between `=` and the next enumerator.
//! Arithmetic is checked `i128`; names resolve to enumerators declared
//! earlier in the same enum, bare or qualified (`Self::X`, `Type::X`).

use enum_traits_common::{ReprRange, ReprType};
use rustc_hash::FxHashMap;

use crate::error::GenError;
use crate::lexer::{Token, TokenKind};
use crate::parser::SourceSyntax;

/// Enumerators already evaluated in the enclosing enum.
pub struct Scope<'a> {
    pub type_name: &'a str,
    pub syntax: SourceSyntax,
    pub repr: ReprType,
    pub known: &'a FxHashMap<String, i128>,
}

pub fn evaluate(tokens: &[Token<'_>], scope: &Scope<'_>) -> Result<i128, GenError> {
    let line = tokens.first().map(|token| token.line).unwrap_or(0);
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        scope,
        line,
    };
    let value = parser.expr(0)?;
    if parser.pos != tokens.len() {
        return Err(parser.error(format!("unexpected `{}`", tokens[parser.pos].text)));
    }
    Ok(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
}

impl BinOp {
    fn from_token(token: &Token<'_>) -> Option<Self> {
        if token.kind != TokenKind::Punct {
            return None;
        }
        Some(match token.text {
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Rem,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "<<" => BinOp::Shl,
            ">>" => BinOp::Shr,
            "&" => BinOp::BitAnd,
            "^" => BinOp::BitXor,
            "|" => BinOp::BitOr,
            _ => return None,
        })
    }

    /// Rust and C agree on the relative order of these operators.
    fn precedence(self) -> u8 {
        match self {
            BinOp::Mul | BinOp::Div | BinOp::Rem => 10,
            BinOp::Add | BinOp::Sub => 9,
            BinOp::Shl | BinOp::Shr => 8,
            BinOp::BitAnd => 7,
            BinOp::BitXor => 6,
            BinOp::BitOr => 5,
        }
    }

    fn apply(self, lhs: i128, rhs: i128) -> Result<i128, String> {
        let overflow = || format!("overflow in {lhs} {} {rhs}", self.symbol());
        match self {
            BinOp::Mul => lhs.checked_mul(rhs).ok_or_else(overflow),
            BinOp::Div if rhs == 0 => Err("division by zero".to_string()),
            BinOp::Div => lhs.checked_div(rhs).ok_or_else(overflow),
            BinOp::Rem if rhs == 0 => Err("remainder by zero".to_string()),
            BinOp::Rem => lhs.checked_rem(rhs).ok_or_else(overflow),
            BinOp::Add => lhs.checked_add(rhs).ok_or_else(overflow),
            BinOp::Sub => lhs.checked_sub(rhs).ok_or_else(overflow),
            BinOp::Shl | BinOp::Shr => {
                let amount = u32::try_from(rhs)
                    .ok()
                    .filter(|amount| *amount < 128)
                    .ok_or_else(|| format!("shift amount {rhs} out of range"))?;
                if self == BinOp::Shl {
                    let shifted = lhs.checked_shl(amount).ok_or_else(overflow)?;
                    if shifted >> amount != lhs {
                        return Err(overflow());
                    }
                    Ok(shifted)
                } else {
                    Ok(lhs >> amount)
                }
            }
            BinOp::BitAnd => Ok(lhs & rhs),
            BinOp::BitXor => Ok(lhs ^ rhs),
            BinOp::BitOr => Ok(lhs | rhs),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::BitOr => "|",
        }
    }
}

struct ExprParser<'t, 's, 'c> {
    tokens: &'t [Token<'s>],
    pos: usize,
    scope: &'c Scope<'c>,
    line: u32,
}

impl<'t, 's> ExprParser<'t, 's, '_> {
    fn error(&self, reason: impl Into<String>) -> GenError {
        let expr = self
            .tokens
            .iter()
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join(" ");
        GenError::Eval {
            line: self.line,
            expr,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<&'t Token<'s>> {
        self.tokens.get(self.pos)
    }

    fn eat_punct(&mut self, punct: &str) -> bool {
        if self.peek().is_some_and(|token| token.is_punct(punct)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: &str) -> Result<(), GenError> {
        if self.eat_punct(punct) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{punct}`")))
        }
    }

    fn expr(&mut self, min_precedence: u8) -> Result<i128, GenError> {
        let mut lhs = self.unary()?;
        loop {
            let is_cast = self.peek().is_some_and(|token| token.is_ident("as"));
            if self.scope.syntax == SourceSyntax::Rust && is_cast {
                self.pos += 1;
                lhs = self.cast(lhs)?;
                continue;
            }
            let Some(op) = self.peek().and_then(BinOp::from_token) else {
                break;
            };
            if op.precedence() < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.expr(op.precedence() + 1)?;
            lhs = op.apply(lhs, rhs).map_err(|reason| self.error(reason))?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<i128, GenError> {
        if self.eat_punct("-") {
            let value = self.unary()?;
            return value
                .checked_neg()
                .ok_or_else(|| self.error("overflow in negation"));
        }
        if self.scope.syntax == SourceSyntax::Cpp && self.eat_punct("+") {
            return self.unary();
        }
        if self.scope.syntax == SourceSyntax::Cpp && self.eat_punct("~") {
            let value = self.unary()?;
            return Ok(self.complement(value));
        }
        if self.eat_punct("!") {
            let value = self.unary()?;
            return Ok(match self.scope.syntax {
                SourceSyntax::Rust => self.complement(value),
                SourceSyntax::Cpp => i128::from(value == 0),
            });
        }
        self.primary()
    }

    /// Bitwise complement within the underlying type.
    fn complement(&self, value: i128) -> i128 {
        wrap(!value, self.scope.repr.range())
    }

    fn primary(&mut self) -> Result<i128, GenError> {
        let Some(token) = self.peek().copied() else {
            return Err(self.error("expression ends early"));
        };
        match token.kind {
            TokenKind::Number => {
                self.pos += 1;
                parse_int(token.text, self.scope.syntax).map_err(|reason| self.error(reason))
            }
            TokenKind::Char => {
                self.pos += 1;
                parse_char(token.text).map_err(|reason| self.error(reason))
            }
            TokenKind::Punct if token.text == "(" => {
                self.pos += 1;
                if let Some(repr) = self.c_cast_type() {
                    let value = self.unary()?;
                    return Ok(wrap(value, repr.range()));
                }
                let value = self.expr(0)?;
                self.expect_punct(")")?;
                Ok(value)
            }
            TokenKind::Ident => self.path(),
            TokenKind::Punct => Err(self.error(format!("unexpected `{}`", token.text))),
        }
    }

    /// `(type)` in C/C++: consumes the type and closing paren.
    fn c_cast_type(&mut self) -> Option<ReprType> {
        if self.scope.syntax != SourceSyntax::Cpp {
            return None;
        }
        let close = self.tokens[self.pos..]
            .iter()
            .position(|token| token.is_punct(")"))?;
        let inner = &self.tokens[self.pos..self.pos + close];
        let is_type_name = inner
            .iter()
            .all(|token| token.kind == TokenKind::Ident || token.is_punct("::"));
        if inner.is_empty() || !is_type_name {
            return None;
        }
        let repr = ReprType::from_c_name(&join_type_name(inner))?;
        self.pos += close + 1;
        Some(repr)
    }

    fn path(&mut self) -> Result<i128, GenError> {
        let mut segments = Vec::new();
        loop {
            let Some(token) = self.peek().copied() else {
                return Err(self.error("expression ends early"));
            };
            if token.kind != TokenKind::Ident {
                return Err(self.error(format!("unexpected `{}`", token.text)));
            }
            segments.push(token.text);
            self.pos += 1;
            if !self.eat_punct("::") {
                break;
            }
        }

        match segments.as_slice() {
            ["true"] => return Ok(1),
            ["false"] => return Ok(0),
            _ => {}
        }
        let (name, qualifier) = match segments.split_last() {
            Some((name, qualifier)) => (*name, qualifier),
            None => return Err(self.error("empty path")),
        };
        if let Some(last) = qualifier.last() {
            if *last != "Self" && *last != self.scope.type_name {
                return Err(self.error(format!(
                    "`{}` is not an enumerator of `{}`",
                    segments.join("::"),
                    self.scope.type_name
                )));
            }
        }
        self.scope
            .known
            .get(name)
            .copied()
            .ok_or_else(|| self.error(format!("`{name}` is not an earlier enumerator")))
    }

    fn cast(&mut self, value: i128) -> Result<i128, GenError> {
        let Some(token) = self.peek().copied() else {
            return Err(self.error("expected a type after `as`"));
        };
        self.pos += 1;
        let repr = ReprType::from_rust_name(token.text)
            .ok_or_else(|| self.error(format!("cannot cast to `{}`", token.text)))?;
        Ok(wrap(value, repr.range()))
    }
}

/// Truncate `value` into `range` the way an `as` cast does.
pub fn wrap(value: i128, range: ReprRange) -> i128 {
    if range.contains(value) {
        return value;
    }
    let span = range.max - range.min + 1;
    let offset = (value.rem_euclid(span) - range.min.rem_euclid(span)).rem_euclid(span);
    range.min + offset
}

/// Join type-name tokens back into text, `std::uint8_t` or `unsigned char`.
pub fn join_type_name(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.is_punct("::") {
            out.push_str("::");
            continue;
        }
        if !out.is_empty() && !out.ends_with("::") {
            out.push(' ');
        }
        out.push_str(token.text);
    }
    out
}

const RUST_INT_SUFFIXES: &[&str] = &[
    "i128", "u128", "isize", "usize", "i64", "u64", "i32", "u32", "i16", "u16", "i8", "u8",
];

/// Integer literal in any base, separators and suffixes stripped.
pub fn parse_int(text: &str, syntax: SourceSyntax) -> Result<i128, String> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_' && *c != '\'')
        .collect();
    let lower = cleaned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if syntax == SourceSyntax::Cpp && lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    let digits = match syntax {
        SourceSyntax::Rust => RUST_INT_SUFFIXES
            .iter()
            .find_map(|suffix| digits.strip_suffix(suffix))
            .unwrap_or(digits),
        SourceSyntax::Cpp => digits.trim_end_matches(['u', 'l', 'z']),
    };
    if digits.is_empty() {
        return Err(format!("malformed integer literal `{text}`"));
    }
    u128::from_str_radix(digits, radix)
        .ok()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or_else(|| format!("malformed integer literal `{text}`"))
}

/// Char literal (quotes included) as its code point.
pub fn parse_char(text: &str) -> Result<i128, String> {
    let inner = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(|| format!("malformed char literal {text}"))?;
    let malformed = || format!("malformed char literal {text}");
    let Some(escape) = inner.strip_prefix('\\') else {
        let mut chars = inner.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c as i128),
            _ => Err(malformed()),
        };
    };
    let value = match escape {
        "n" => '\n' as u32,
        "t" => '\t' as u32,
        "r" => '\r' as u32,
        "0" => 0,
        "\\" => '\\' as u32,
        "'" => '\'' as u32,
        "\"" => '"' as u32,
        "a" => 0x07,
        "b" => 0x08,
        "f" => 0x0c,
        "v" => 0x0b,
        _ => {
            if let Some(hex) = escape.strip_prefix('x') {
                u32::from_str_radix(hex, 16).map_err(|_| malformed())?
            } else if let Some(unicode) = escape
                .strip_prefix("u{")
                .and_then(|rest| rest.strip_suffix('}'))
            {
                u32::from_str_radix(&unicode.replace('_', ""), 16).map_err(|_| malformed())?
            } else if escape.bytes().all(|b| (b'0'..=b'7').contains(&b)) && escape.len() <= 3 {
                u32::from_str_radix(escape, 8).map_err(|_| malformed())?
            } else {
                return Err(malformed());
            }
        }
    };
    Ok(i128::from(value))
}
