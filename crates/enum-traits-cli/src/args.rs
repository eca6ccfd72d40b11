use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use enum_traits_common::ReprType;
use enum_traits_core::SignatureDialect;
use enum_traits_gen::SourceSyntax;

use crate::tracing_config::LogFormat;

/// CLI arguments for the etraits binary.
#[derive(Parser, Debug)]
#[command(
    name = "etraits",
    version,
    about = "Derive enum bounds, values and names from Rust and C/C++ declarations"
)]
pub struct CliArgs {
    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write `EnumBounds`/`EnumTraits` impls for every enum found.
    Generate(GenerateArgs),
    /// Print the reflected tables.
    Inspect(InspectArgs),
    /// Reflect an enum from a dump of compiler probe signatures.
    Signatures(SignaturesArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source files or directories to scan.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file. Prints to stdout when omitted.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Source files or directories to scan.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = InspectFormat::Text)]
    pub format: InspectFormat,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct SignaturesArgs {
    /// Dump file with one `<value>\t<signature>` line per probe.
    pub dump: PathBuf,

    /// Name of the probed enum.
    #[arg(long = "type-name")]
    pub type_name: String,

    /// Underlying type, Rust (`u8`) or C (`unsigned char`) spelling.
    #[arg(long)]
    pub repr: ReprType,

    /// Signature dialect. Detected from the first probe when omitted.
    #[arg(long)]
    pub dialect: Option<SignatureDialect>,

    #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
    pub format: DumpFormat,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Diagnostics on stderr. Off unless a filter is given here or through
/// `ETRAITS_LOG`/`RUST_LOG`.
#[derive(Args, Debug, Default)]
pub struct LogArgs {
    /// Filter directives in `RUST_LOG` syntax, e.g. `enum_traits_gen=debug`.
    #[arg(long, global = true, value_name = "DIRECTIVES")]
    pub log: Option<String>,

    /// Log layout. Falls back to `ETRAITS_LOG_FORMAT`.
    #[arg(long = "log-format", global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Treat every input as this syntax instead of going by extension.
    #[arg(long)]
    pub syntax: Option<SourceSyntax>,
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file. Defaults to `etraits.json` in the working directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lowest value scanned.
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i128>,

    /// Highest value scanned.
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i128>,

    /// Name capacity in bytes, terminator included.
    #[arg(long = "max-name-length")]
    pub max_name_length: Option<usize>,

    /// Path of the enum-traits crate as seen from the generated code.
    #[arg(long = "crate-path")]
    pub crate_path: Option<String>,

    /// Also emit enum definitions for C/C++ sources and dumps.
    #[arg(long = "emit-definitions")]
    pub emit_definitions: bool,

    /// Only reflect these enums. Repeatable.
    #[arg(long = "only")]
    pub only: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum InspectFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
    Rust,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_flags() {
        let args = CliArgs::parse_from([
            "etraits",
            "generate",
            "a.hpp",
            "src/",
            "-o",
            "out.rs",
            "--syntax",
            "cpp",
            "--min",
            "-1000",
            "--max",
            "1000",
            "--only",
            "Access",
            "--only",
            "Color",
            "--emit-definitions",
        ]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.inputs, vec![PathBuf::from("a.hpp"), PathBuf::from("src/")]);
        assert_eq!(generate.output, Some(PathBuf::from("out.rs")));
        assert_eq!(generate.sources.syntax, Some(SourceSyntax::Cpp));
        assert_eq!(generate.config.min, Some(-1000));
        assert_eq!(generate.config.max, Some(1000));
        assert_eq!(generate.config.only, vec!["Access", "Color"]);
        assert!(generate.config.emit_definitions);
    }

    #[test]
    fn test_signatures_flags() {
        let args = CliArgs::parse_from([
            "etraits",
            "--no-color",
            "signatures",
            "probes.txt",
            "--type-name",
            "Fruits",
            "--repr",
            "unsigned char",
            "--dialect",
            "msvc",
            "--format",
            "rust",
        ]);
        assert!(args.no_color);
        assert_eq!(args.log.log, None);
        let Command::Signatures(signatures) = args.command else {
            panic!("expected signatures");
        };
        assert_eq!(signatures.repr, ReprType::U8);
        assert_eq!(signatures.dialect, Some(SignatureDialect::Msvc));
        assert_eq!(signatures.format, DumpFormat::Rust);
    }

    #[test]
    fn test_log_flags_are_global() {
        let args = CliArgs::parse_from([
            "etraits",
            "inspect",
            "zoo.hpp",
            "--log",
            "enum_traits_gen=debug",
            "--log-format",
            "tree",
        ]);
        assert_eq!(args.log.log.as_deref(), Some("enum_traits_gen=debug"));
        assert_eq!(args.log.log_format, Some(LogFormat::Tree));
        assert!(CliArgs::try_parse_from(["etraits", "--log-format", "pretty", "inspect", "a.rs"]).is_err());
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(CliArgs::try_parse_from(["etraits", "inspect"]).is_err());
    }
}
