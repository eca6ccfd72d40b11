//! Subscriber setup for `etraits`.
//!
//! Filter directives come from `--log`, then `ETRAITS_LOG`, then `RUST_LOG`.
//! The layout comes from `--log-format`, then `ETRAITS_LOG_FORMAT`. With no
//! directives at all nothing is installed. Events go to stderr so generated
//! code on stdout stays clean.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::args::LogArgs;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Flat lines.
    #[default]
    Text,
    /// Indented spans.
    Tree,
    /// One object per event.
    Json,
}

impl LogFormat {
    /// Unknown names fall back to text rather than failing startup.
    fn from_env_value(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or_default()
    }
}

/// Logging settings after merging flags with the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// `None` when logging stays off.
    pub fn resolve(
        args: &LogArgs,
        etraits_log: Option<String>,
        rust_log: Option<String>,
        format_env: Option<String>,
    ) -> Option<Self> {
        let directives = args.log.clone().or(etraits_log).or(rust_log)?;
        let format = args
            .log_format
            .or_else(|| format_env.as_deref().map(LogFormat::from_env_value))
            .unwrap_or_default();
        Some(Self { directives, format })
    }

    fn from_process_env(args: &LogArgs) -> Option<Self> {
        Self::resolve(
            args,
            std::env::var("ETRAITS_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
            std::env::var("ETRAITS_LOG_FORMAT").ok(),
        )
    }
}

pub fn init_tracing(args: &LogArgs) {
    let Some(settings) = LogSettings::from_process_env(args) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(&settings.directives);

    match settings.format {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
    }
}
