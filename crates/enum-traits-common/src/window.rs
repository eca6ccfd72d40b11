//! Scan windows and underlying-type ranges.
//!
//! All values are carried as `i128`, which holds every supported underlying
//! type (`i8`..`i64`, `u8`..`u64`, `isize`, `usize`) without loss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::limits::{MAX_ENUM_VALUE, MIN_ENUM_VALUE};

/// Closed interval of candidate values considered by the range scanner.
///
/// A window may be inverted (`min > max`) after clipping against a type that
/// shares no values with it; scans over an inverted window find nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanWindow {
    pub min: i128,
    pub max: i128,
}

impl ScanWindow {
    /// The signed 8-bit range.
    pub const DEFAULT: Self = Self {
        min: i8::MIN as i128,
        max: i8::MAX as i128,
    };

    /// The window baked in at build time (see [`crate::limits`]).
    pub const CONFIGURED: Self = Self {
        min: MIN_ENUM_VALUE,
        max: MAX_ENUM_VALUE,
    };

    pub const fn new(min: i128, max: i128) -> Self {
        Self { min, max }
    }

    pub const fn is_inverted(self) -> bool {
        self.min > self.max
    }

    /// Number of candidates in the window; 0 when inverted.
    pub const fn width(self) -> u128 {
        if self.is_inverted() {
            0
        } else {
            self.max.abs_diff(self.min) + 1
        }
    }

    pub const fn contains(self, value: i128) -> bool {
        self.min <= value && value <= self.max
    }

    /// Intersect with the values a type can represent.
    pub const fn clip(self, repr: ReprRange) -> Self {
        Self {
            min: if self.min > repr.min { self.min } else { repr.min },
            max: if self.max < repr.max { self.max } else { repr.max },
        }
    }
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self::CONFIGURED
    }
}

impl fmt::Display for ScanWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Representable range of an underlying integer type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReprRange {
    pub min: i128,
    pub max: i128,
}

impl ReprRange {
    /// Build a range, rejecting types whose maximum does not survive widening
    /// to `i128` (`u128`, which wraps to -1).
    pub const fn new(min: i128, max: i128) -> Self {
        assert!(
            min <= max,
            "unsupported underlying type: its range does not fit in i128"
        );
        Self { min, max }
    }

    pub const fn contains(self, value: i128) -> bool {
        self.min <= value && value <= self.max
    }

    pub const fn is_unsigned(self) -> bool {
        self.min == 0
    }
}

/// Supported underlying types, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReprType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Isize,
    Usize,
}

impl ReprType {
    pub const ALL: [ReprType; 10] = [
        ReprType::I8,
        ReprType::U8,
        ReprType::I16,
        ReprType::U16,
        ReprType::I32,
        ReprType::U32,
        ReprType::I64,
        ReprType::U64,
        ReprType::Isize,
        ReprType::Usize,
    ];

    pub const fn range(self) -> ReprRange {
        match self {
            ReprType::I8 => ReprRange::new(i8::MIN as i128, i8::MAX as i128),
            ReprType::U8 => ReprRange::new(0, u8::MAX as i128),
            ReprType::I16 => ReprRange::new(i16::MIN as i128, i16::MAX as i128),
            ReprType::U16 => ReprRange::new(0, u16::MAX as i128),
            ReprType::I32 => ReprRange::new(i32::MIN as i128, i32::MAX as i128),
            ReprType::U32 => ReprRange::new(0, u32::MAX as i128),
            ReprType::I64 => ReprRange::new(i64::MIN as i128, i64::MAX as i128),
            ReprType::U64 => ReprRange::new(0, u64::MAX as i128),
            ReprType::Isize => ReprRange::new(isize::MIN as i128, isize::MAX as i128),
            ReprType::Usize => ReprRange::new(0, usize::MAX as i128),
        }
    }

    /// Rust spelling, as used in `#[repr(..)]`.
    pub const fn rust_name(self) -> &'static str {
        match self {
            ReprType::I8 => "i8",
            ReprType::U8 => "u8",
            ReprType::I16 => "i16",
            ReprType::U16 => "u16",
            ReprType::I32 => "i32",
            ReprType::U32 => "u32",
            ReprType::I64 => "i64",
            ReprType::U64 => "u64",
            ReprType::Isize => "isize",
            ReprType::Usize => "usize",
        }
    }

    pub fn from_rust_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|repr| repr.rust_name() == name)
    }

    /// Map a C/C++ underlying type spelling (`uint8_t`, `unsigned char`,
    /// `std::int64_t`, `long long`, ...). Whitespace between words must be
    /// normalized to single spaces by the caller.
    pub fn from_c_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("std::").unwrap_or(name);
        let repr = match name {
            "int8_t" | "signed char" | "char" => ReprType::I8,
            "uint8_t" | "unsigned char" | "bool" => ReprType::U8,
            "int16_t" | "short" | "short int" | "signed short" => ReprType::I16,
            "uint16_t" | "unsigned short" | "unsigned short int" => ReprType::U16,
            "int32_t" | "int" | "signed" | "signed int" => ReprType::I32,
            "uint32_t" | "unsigned" | "unsigned int" => ReprType::U32,
            "int64_t" | "long long" | "long long int" | "signed long long" => ReprType::I64,
            "uint64_t" | "unsigned long long" | "unsigned long long int" => ReprType::U64,
            "intptr_t" | "ptrdiff_t" | "ssize_t" | "long" => ReprType::Isize,
            "uintptr_t" | "size_t" | "unsigned long" => ReprType::Usize,
            _ => return None,
        };
        Some(repr)
    }
}

impl fmt::Display for ReprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

impl FromStr for ReprType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rust_name(s)
            .or_else(|| Self::from_c_name(s))
            .ok_or_else(|| format!("unsupported underlying type '{s}'"))
    }
}
