//! Centralized configuration for enum reflection.
//!
//! The three tunable knobs are process-wide and fixed at compile time. They are
//! read from the environment by `build.rs` when this crate is built:
//!
//! | Variable | Constant | Default |
//! |---|---|---|
//! | `ENUM_TRAITS_MAX_NAME_LENGTH` | [`MAX_NAME_LENGTH`] | 64 |
//! | `ENUM_TRAITS_MIN_ENUM_VALUE` | [`MIN_ENUM_VALUE`] | -128 |
//! | `ENUM_TRAITS_MAX_ENUM_VALUE` | [`MAX_ENUM_VALUE`] | 127 |
//!
//! Changing any of them requires rebuilding every crate that reflects enums,
//! because the derived tables are constants baked into those crates.

include!(concat!(env!("OUT_DIR"), "/config.rs"));
