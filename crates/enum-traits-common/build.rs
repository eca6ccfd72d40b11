//! Build script for enum-traits-common
//!
//! Bakes the process-wide reflection configuration into `limits`:
//! - `ENUM_TRAITS_MAX_NAME_LENGTH` - name capacity in bytes, terminator included (default 64)
//! - `ENUM_TRAITS_MIN_ENUM_VALUE` - lowest scanned value (default `i8::MIN`)
//! - `ENUM_TRAITS_MAX_ENUM_VALUE` - highest scanned value (default `i8::MAX`)
//!
//! Invalid values fail the build instead of silently falling back.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

const MAX_NAME_LENGTH_VAR: &str = "ENUM_TRAITS_MAX_NAME_LENGTH";
const MIN_ENUM_VALUE_VAR: &str = "ENUM_TRAITS_MIN_ENUM_VALUE";
const MAX_ENUM_VALUE_VAR: &str = "ENUM_TRAITS_MAX_ENUM_VALUE";

/// Widest window the const engine is allowed to walk.
const MAX_SCAN_WIDTH: u128 = 1 << 16;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={MAX_NAME_LENGTH_VAR}");
    println!("cargo:rerun-if-env-changed={MIN_ENUM_VALUE_VAR}");
    println!("cargo:rerun-if-env-changed={MAX_ENUM_VALUE_VAR}");

    let max_name_length: usize = read_var(MAX_NAME_LENGTH_VAR, 64);
    let min_enum_value: i128 = read_var(MIN_ENUM_VALUE_VAR, i8::MIN as i128);
    let max_enum_value: i128 = read_var(MAX_ENUM_VALUE_VAR, i8::MAX as i128);

    if max_name_length < 2 {
        panic!("{MAX_NAME_LENGTH_VAR} must be at least 2 (one character plus terminator)");
    }
    if min_enum_value > max_enum_value {
        panic!(
            "{MIN_ENUM_VALUE_VAR} ({min_enum_value}) must not exceed {MAX_ENUM_VALUE_VAR} ({max_enum_value})"
        );
    }
    let width = (max_enum_value - min_enum_value) as u128 + 1;
    if width > MAX_SCAN_WIDTH {
        panic!(
            "scan window [{min_enum_value}, {max_enum_value}] spans {width} values; \
             the limit is {MAX_SCAN_WIDTH}"
        );
    }

    let generated = format!(
        "/// Capacity of [`StaticString`](crate::StaticString) in bytes, terminator included.\n\
         pub const MAX_NAME_LENGTH: usize = {max_name_length};\n\
         /// Lowest value considered by the range scanner.\n\
         pub const MIN_ENUM_VALUE: i128 = {min_enum_value};\n\
         /// Highest value considered by the range scanner.\n\
         pub const MAX_ENUM_VALUE: i128 = {max_enum_value};\n\
         /// Widest window the const engine is allowed to walk.\n\
         pub const MAX_SCAN_WIDTH: u128 = {MAX_SCAN_WIDTH};\n"
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("config.rs"), generated)?;
    Ok(())
}

fn read_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(err) => panic!("{name}={raw:?} is not a valid number: {err}"),
        },
        Err(_) => default,
    }
}
