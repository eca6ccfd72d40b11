//! `build.rs` entry point.
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     if let Err(err) = enum_traits_gen::Builder::new()
//!         .source("include/flags.hpp")
//!         .emit_definitions(true)
//!         .generate()
//!     {
//!         panic!("{err}");
//!     }
//! }
//! ```
//!
//! and in the crate:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/enum_traits.rs"));
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GenConfig;
use crate::error::GenError;
use crate::parser::SourceSyntax;
use crate::{Source, generate_sources};

pub const DEFAULT_OUT_FILE: &str = "enum_traits.rs";

#[derive(Clone, Debug, Default)]
pub struct Builder {
    sources: Vec<Source>,
    config: GenConfig,
    out_dir: Option<PathBuf>,
    out_file: Option<String>,
    cargo_directives: Option<bool>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::new(path));
        self
    }

    pub fn source_with_syntax(mut self, path: impl Into<PathBuf>, syntax: SourceSyntax) -> Self {
        self.sources.push(Source::with_syntax(path, syntax));
        self
    }

    pub fn config(mut self, config: GenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn emit_definitions(mut self, yes: bool) -> Self {
        self.config.emit_definitions = yes;
        self
    }

    pub fn only(mut self, name: impl Into<String>) -> Self {
        self.config.only.push(name.into());
        self
    }

    /// Defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn out_file(mut self, name: impl Into<String>) -> Self {
        self.out_file = Some(name.into());
        self
    }

    /// Print `cargo:rerun-if-changed` lines. On by default when running
    /// under cargo, i.e. when no explicit output directory was given.
    pub fn cargo_directives(mut self, yes: bool) -> Self {
        self.cargo_directives = Some(yes);
        self
    }

    /// Generate and write the output file, returning its path.
    ///
    /// The file is only rewritten when its content changes, so an unchanged
    /// header does not invalidate downstream builds.
    pub fn generate(self) -> Result<PathBuf, GenError> {
        if self.cargo_directives.unwrap_or(self.out_dir.is_none()) {
            for source in &self.sources {
                println!("cargo:rerun-if-changed={}", source.path.display());
            }
        }

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env::var_os("OUT_DIR").map(PathBuf::from).ok_or_else(|| {
                GenError::Config("OUT_DIR is not set; call `out_dir` outside build scripts".to_string())
            })?,
        };
        let out_path = out_dir.join(self.out_file.as_deref().unwrap_or(DEFAULT_OUT_FILE));

        let generated = generate_sources(&self.sources, &self.config)?;
        write_if_changed(&out_path, &generated)?;
        Ok(out_path)
    }
}

fn write_if_changed(path: &Path, content: &str) -> Result<(), GenError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        debug!(path = %path.display(), "generated file unchanged");
        return Ok(());
    }
    debug!(path = %path.display(), bytes = content.len(), "writing generated file");
    fs::write(path, content).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })
}
