//! Build-time generator of `enum-traits` impls.
//!
//! Reads enum declarations out of Rust or C/C++ source text, derives the
//! same tables the `enum_traits!` macro computes in constant evaluation and
//! writes them as Rust source:
//! - `lexer` - Token stream for both syntaxes
//! - `eval` - Discriminant expression evaluation
//! - `parser` - Enum declaration finder
//! - `emit` - Table derivation and deterministic Rust output
//! - `dump` - Declarations recovered from compiler signature dumps
//! - `builder` - `build.rs` entry point

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::debug;

pub mod builder;
pub use builder::Builder;

pub mod config;
pub use config::{CONFIG_FILE_NAME, GenConfig};

pub mod dump;
pub use dump::{SignatureDump, read_signature_dump};

pub mod emit;
pub use emit::{Reflected, derive_table, emit};

pub mod error;
pub use error::GenError;

pub mod eval;
pub mod lexer;

pub mod parser;
pub use parser::{DeclOrigin, EnumDecl, EnumeratorDecl, SourceSyntax, parse_source};

/// A file to read declarations from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    /// Inferred from the extension when `None`.
    pub syntax: Option<SourceSyntax>,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            syntax: None,
        }
    }

    pub fn with_syntax(path: impl Into<PathBuf>, syntax: SourceSyntax) -> Self {
        Self {
            path: path.into(),
            syntax: Some(syntax),
        }
    }

    pub fn syntax(&self) -> Result<SourceSyntax, GenError> {
        self.syntax
            .or_else(|| SourceSyntax::from_path(&self.path))
            .ok_or_else(|| GenError::UnknownSyntax(self.path.clone()))
    }
}

/// Read and parse one source file. Errors carry the file path.
pub fn load_source(source: &Source) -> Result<Vec<EnumDecl>, GenError> {
    let syntax = source.syntax()?;
    let text = read_file(&source.path)?;
    parse_source(&text, syntax).map_err(|err| err.in_file(&source.path))
}

pub(crate) fn read_file(path: &Path) -> Result<String, GenError> {
    fs::read_to_string(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Select the declarations `config.only` asks for and derive their tables.
///
/// Declarations keep their input order. A name listed in `only` that no
/// source declares is an error, and so is a name declared twice.
pub fn reflect(decls: Vec<EnumDecl>, config: &GenConfig) -> Result<Vec<Reflected>, GenError> {
    config.validate()?;

    let mut seen = FxHashSet::default();
    let mut selected = Vec::with_capacity(decls.len());
    for decl in decls {
        if !config.wants(&decl.name) {
            debug!(name = %decl.name, "not selected");
            continue;
        }
        if !seen.insert(decl.name.clone()) {
            return Err(GenError::DuplicateEnum(decl.name));
        }
        selected.push(decl);
    }
    if let Some(missing) = config.only.iter().find(|name| !seen.contains(name.as_str())) {
        return Err(GenError::UnknownEnum(missing.clone()));
    }

    selected
        .into_iter()
        .map(|decl| {
            let table = derive_table(&decl, config)?;
            Ok(Reflected { decl, table })
        })
        .collect()
}

/// Parse, reflect and emit a single source text.
pub fn generate(text: &str, syntax: SourceSyntax, config: &GenConfig) -> Result<String, GenError> {
    let items = reflect(parse_source(text, syntax)?, config)?;
    Ok(emit(&items, config))
}

/// Parse every source in parallel, then reflect the union and emit it.
///
/// Output follows the order of `sources`, then declaration order within each
/// file, regardless of which file finished parsing first.
pub fn generate_sources(sources: &[Source], config: &GenConfig) -> Result<String, GenError> {
    let items = reflect_sources(sources, config)?;
    Ok(emit(&items, config))
}

/// [`generate_sources`] without the emission step.
pub fn reflect_sources(sources: &[Source], config: &GenConfig) -> Result<Vec<Reflected>, GenError> {
    let parsed: Vec<Vec<EnumDecl>> = sources
        .par_iter()
        .map(load_source)
        .collect::<Result<_, _>>()?;
    debug!(
        files = sources.len(),
        enums = parsed.iter().map(Vec::len).sum::<usize>(),
        "parsed sources"
    );
    reflect(parsed.into_iter().flatten().collect(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_filter() {
        let decls = parse_source("enum A { X } enum B { Y = 3 }", SourceSyntax::Rust).expect("parses");
        let config = GenConfig {
            only: vec!["B".to_string()],
            ..GenConfig::default()
        };
        let items = reflect(decls, &config).expect("reflects");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].table.type_name, "B");
        assert_eq!(items[0].table.values().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_unknown_and_duplicate_names() {
        let decls = parse_source("enum A { X }", SourceSyntax::Rust).expect("parses");
        let config = GenConfig {
            only: vec!["A".to_string(), "Missing".to_string()],
            ..GenConfig::default()
        };
        assert!(matches!(
            reflect(decls.clone(), &config),
            Err(GenError::UnknownEnum(name)) if name == "Missing"
        ));

        let twice = [decls.clone(), decls].concat();
        assert!(matches!(
            reflect(twice, &GenConfig::default()),
            Err(GenError::DuplicateEnum(name)) if name == "A"
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GenConfig {
            min_enum_value: 5,
            max_enum_value: -5,
            ..GenConfig::default()
        };
        assert!(matches!(
            generate("enum A { X }", SourceSyntax::Rust, &config),
            Err(GenError::Config(_))
        ));
    }

    #[test]
    fn test_source_syntax_from_extension() {
        assert_eq!(Source::new("a/b.hpp").syntax().expect("known"), SourceSyntax::Cpp);
        assert_eq!(Source::new("lib.rs").syntax().expect("known"), SourceSyntax::Rust);
        assert!(matches!(
            Source::new("notes.txt").syntax(),
            Err(GenError::UnknownSyntax(_))
        ));
        assert_eq!(
            Source::with_syntax("notes.txt", SourceSyntax::Cpp).syntax().expect("explicit"),
            SourceSyntax::Cpp
        );
    }
}
