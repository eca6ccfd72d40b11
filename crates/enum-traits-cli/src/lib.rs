//! Command-line front end for `enum-traits-gen`.
//!
//! - `args` - Argument definitions
//! - `driver` - Subcommand execution
//! - `report` - Text and JSON renderings of reflected tables
//! - `tracing_config` - Subscriber setup from `--log` or `ETRAITS_LOG`

pub mod args;
pub mod driver;
pub mod report;
pub mod tracing_config;
