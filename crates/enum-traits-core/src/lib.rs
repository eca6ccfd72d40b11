//! Reflection engine for enum-traits.
//!
//! Everything here except [`table`] is `const fn`, so the facts about an enum
//! can be computed during constant evaluation:
//! - `declaration` - the enum as a list of named values
//! - `probe` - does a value name an enumerator?
//! - `range` - bounded min/max scans, counts and ascending value lists
//! - `extract` - names for valid values, cast text for invalid ones
//! - `signature` - the same probe/extract questions answered from C++
//!   compiler signature renderings
//! - `table` - owned, serializable tables for build-time callers

pub mod declaration;
pub use declaration::{Declaration, Enumerator};

pub mod probe;
pub use probe::{first_enumerator, is_valid};

pub mod range;
pub use range::{Bounds, ValidValues};

pub mod extract;

pub mod signature;
pub use signature::{SignatureDialect, SignatureError, extract_signature_name, probe_signature};

pub mod table;
pub use table::{Alias, EnumTable, TableEntry, TableError};
