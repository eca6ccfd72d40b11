//! Rust source emission.
//!
//! Output depends only on the tables and the configuration: no timestamps,
//! no paths, no hash-map iteration. Regenerating from the same input yields
//! the same bytes.

use enum_traits_common::ScanWindow;
use enum_traits_core::EnumTable;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GenConfig;
use crate::error::GenError;
use crate::parser::EnumDecl;

pub const HEADER: &str = "// @generated by enum-traits-gen. Do not edit.";

/// A declaration together with the table derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reflected {
    pub decl: EnumDecl,
    pub table: EnumTable,
}

pub fn derive_table(decl: &EnumDecl, config: &GenConfig) -> Result<EnumTable, GenError> {
    check_identifiers(decl)?;
    let enumerators = decl.engine_enumerators();
    let declaration = enum_traits_core::Declaration::new(&decl.name, decl.repr.range(), &enumerators);
    let table = EnumTable::derive(&declaration, config.window(), config.max_name_length)?;
    for hidden in &table.out_of_window {
        warn!(
            name = %decl.name,
            enumerator = %hidden.name,
            value = %hidden.value,
            window = %table.window,
            "enumerator lies outside the scan window and is invisible"
        );
    }
    for alias in &table.aliases {
        debug!(name = %decl.name, alias = %alias.name, target = %alias.target, "alias");
    }
    if table.is_empty() {
        warn!(name = %decl.name, window = %table.window, "no valid value in the scan window");
    }
    Ok(table)
}

pub fn emit(items: &[Reflected], config: &GenConfig) -> String {
    let mut emitter = Emitter {
        out: String::new(),
        crate_path: config.crate_path.trim_end_matches("::"),
    };
    emitter.header(config.window(), config.max_name_length);
    for item in items {
        emitter.blank();
        if config.emit_definitions && item.decl.needs_definition() {
            emitter.definition(&item.decl);
            emitter.display(&item.decl, &item.table);
            emitter.blank();
        }
        emitter.bounds(&item.decl, &item.table);
        if !item.table.is_empty() {
            emitter.blank();
            emitter.traits(&item.decl, &item.table);
        }
    }
    emitter.out
}

struct Emitter<'c> {
    out: String,
    crate_path: &'c str,
}

impl Emitter<'_> {
    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn header(&mut self, window: ScanWindow, capacity: usize) {
        self.line(HEADER);
        self.line(&format!("// scan window {window}, name capacity {capacity}"));
    }

    fn definition(&mut self, decl: &EnumDecl) {
        let name = rust_ident(&decl.name);
        let mut seen = FxHashSet::default();
        let mut aliases = Vec::new();

        self.line("#[allow(non_camel_case_types)]");
        self.line(&format!("#[repr({})]", decl.repr.rust_name()));
        self.line("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
        self.line(&format!("pub enum {name} {{"));
        for enumerator in &decl.enumerators {
            if !seen.insert(enumerator.value) {
                aliases.push(enumerator);
                continue;
            }
            self.line(&format!(
                "    {} = {},",
                rust_ident(&enumerator.name),
                enumerator.value
            ));
        }
        self.line("}");

        if aliases.is_empty() {
            return;
        }
        self.blank();
        self.line("#[allow(non_upper_case_globals)]");
        self.line(&format!("impl {name} {{"));
        for alias in aliases {
            let target = decl
                .enumerators
                .iter()
                .find(|e| e.value == alias.value)
                .map(|e| rust_ident(&e.name))
                .unwrap_or_default();
            self.line(&format!(
                "    pub const {}: {name} = {name}::{target};",
                rust_ident(&alias.name)
            ));
        }
        self.line("}");
    }

    fn display(&mut self, decl: &EnumDecl, table: &EnumTable) {
        let name = rust_ident(&decl.name);
        self.blank();
        self.line(&format!("impl ::core::fmt::Display for {name} {{"));
        self.line("    #[allow(unreachable_patterns)]");
        self.line("    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {");
        self.line("        f.write_str(match self {");
        for entry in &table.entries {
            self.line(&format!(
                "            {name}::{} => \"{}\",",
                rust_ident(&entry.name),
                entry.name
            ));
        }
        self.line("            _ => \"\",");
        self.line("        })");
        self.line("    }");
        self.line("}");
    }

    fn bounds(&mut self, decl: &EnumDecl, table: &EnumTable) {
        let name = rust_ident(&decl.name);
        let repr = decl.repr.rust_name();
        self.line(&format!("impl {}::EnumBounds for {name} {{", self.crate_path));
        self.line(&format!("    type Repr = {repr};"));
        self.blank();
        self.line(&format!("    const INVALID: {repr} = {repr}::MAX;"));
        self.line(&format!("    const MIN: {repr} = {};", table.min));
        self.line(&format!("    const MAX: {repr} = {};", table.max));
        self.line(&format!("    const COUNT: usize = {};", table.count));
        self.blank();
        self.line(&format!("    fn to_repr(self) -> {repr} {{"));
        self.line(&format!("        self as {repr}"));
        self.line("    }");
        self.line("}");
    }

    fn traits(&mut self, decl: &EnumDecl, table: &EnumTable) {
        let name = rust_ident(&decl.name);
        let crate_path = self.crate_path;
        self.line(&format!("impl {crate_path}::EnumTraits for {name} {{"));
        self.line("    const VALUES: &'static [Self] = &[");
        for entry in &table.entries {
            self.line(&format!("        {name}::{},", rust_ident(&entry.name)));
        }
        self.line("    ];");
        self.line(&format!(
            "    const NAMES: &'static [{crate_path}::StaticString] = &["
        ));
        for entry in &table.entries {
            self.line(&format!(
                "        {crate_path}::StaticString::new(\"{}\"),",
                entry.name
            ));
        }
        self.line("    ];");
        self.line("}");
    }
}

/// Words that must be written `r#word` to be used as an identifier.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Words that are not identifiers even as `r#word`.
const RESERVED_PATH_WORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

fn check_identifiers(decl: &EnumDecl) -> Result<(), GenError> {
    let names = std::iter::once((decl.name.as_str(), decl.line)).chain(
        decl.enumerators
            .iter()
            .map(|enumerator| (enumerator.name.as_str(), enumerator.line)),
    );
    for (name, line) in names {
        if RESERVED_PATH_WORDS.contains(&name) {
            return Err(GenError::ReservedName {
                line,
                type_name: decl.name.clone(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn rust_ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}
