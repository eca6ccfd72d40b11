//! Generates reflection impls for the C++ header in `include/` and for the
//! plain Rust enums in `src/legacy.rs`.

use std::error::Error;

use enum_traits_gen::Builder;

fn main() -> Result<(), Box<dyn Error>> {
    Builder::new()
        .source("include/zoo.hpp")
        .emit_definitions(true)
        .out_file("zoo.rs")
        .generate()?;

    Builder::new()
        .source("src/legacy.rs")
        .out_file("legacy_traits.rs")
        .generate()?;

    Ok(())
}
