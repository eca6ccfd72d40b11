//! Common types and utilities for enum-traits.
//!
//! This crate provides the leaves every other enum-traits crate builds on:
//! - Fixed-capacity strings (`FixedStr`, `StaticString`)
//! - Const text scanning (`find_byte`, `rfind_byte`, `find_bytes`)
//! - Scan windows and underlying-type ranges (`ScanWindow`, `ReprRange`, `ReprType`)
//! - Build-time configuration limits

// Fixed-capacity, const-constructible strings
pub mod fixed_str;
pub use fixed_str::{CapacityError, FixedStr, StaticString};

// Const text scanning primitives
pub mod scan;
pub use scan::{find_byte, find_bytes, rfind_byte, rfind_last};

// Centralized configuration baked in by build.rs
pub mod limits;

// Scan window and underlying representation ranges
pub mod window;
pub use window::{ReprRange, ReprType, ScanWindow};
