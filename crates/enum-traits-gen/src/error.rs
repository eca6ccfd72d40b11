use std::io;
use std::path::PathBuf;

use enum_traits_common::ReprType;
use enum_traits_core::{SignatureError, TableError};

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },

    #[error("line {line}: cannot evaluate `{expr}`: {reason}")]
    Eval {
        line: u32,
        expr: String,
        reason: String,
    },

    #[error("line {line}: `{type_name}::{name}` = {value} does not fit `{repr}`")]
    OutOfRange {
        line: u32,
        type_name: String,
        name: String,
        value: i128,
        repr: ReprType,
    },

    #[error("line {line}: `{name}` cannot be used as a Rust identifier (in `{type_name}`)")]
    ReservedName {
        line: u32,
        type_name: String,
        name: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("dump line {line}: {source}")]
    Signature {
        line: u32,
        #[source]
        source: SignatureError,
    },

    #[error("dump line {line}: {message}")]
    Dump { line: u32, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot tell whether {0} is Rust or C/C++; pass the syntax explicitly")]
    UnknownSyntax(PathBuf),

    #[error("no enum named `{0}` in the given sources")]
    UnknownEnum(String),

    #[error("enum `{0}` is declared more than once across the given sources")]
    DuplicateEnum(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<GenError>,
    },
}

impl GenError {
    pub(crate) fn syntax(line: u32, message: impl Into<String>) -> Self {
        GenError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        GenError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            GenError::Syntax { line, .. }
            | GenError::Eval { line, .. }
            | GenError::OutOfRange { line, .. }
            | GenError::ReservedName { line, .. }
            | GenError::Signature { line, .. }
            | GenError::Dump { line, .. } => Some(*line),
            GenError::InFile { source, .. } => source.line(),
            _ => None,
        }
    }
}
