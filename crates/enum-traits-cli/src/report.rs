use std::fmt::Write as _;

use colored::Colorize;
use enum_traits_gen::{Reflected, SignatureDump};
use serde::Serialize;

/// Renders reflected tables for humans. Colors are only applied when the
/// reporter was created with `color` on.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, items: &[Reflected]) -> String {
        let mut out = String::new();
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            self.render_item(&mut out, item);
        }
        out
    }

    pub fn render_dump(&self, dump: &SignatureDump, item: &Reflected) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} dialect, {} probes named an enumerator, {} did not",
            dump.dialect,
            dump.decl.enumerators.len(),
            dump.invalid.len()
        );
        self.render_item(&mut out, item);
        if !dump.invalid.is_empty() {
            let _ = writeln!(out, "  {}", self.dim("unnamed probes:"));
            for (value, text) in &dump.invalid {
                let _ = writeln!(out, "    {value:>6}  {text}");
            }
        }
        out
    }

    fn render_item(&self, out: &mut String, item: &Reflected) {
        let table = &item.table;
        let _ = writeln!(
            out,
            "{} ({}) window {}",
            self.title(&table.type_name),
            item.decl.repr,
            table.window
        );
        let _ = writeln!(
            out,
            "  min {}  max {}  count {}",
            table.min, table.max, table.count
        );
        if table.is_empty() {
            let _ = writeln!(out, "  {}", self.warning("no valid value inside the window"));
        }
        for entry in &table.entries {
            let _ = writeln!(out, "  {:>6}  {}", entry.value, entry.name);
        }
        for alias in &table.aliases {
            let _ = writeln!(
                out,
                "  {}",
                self.dim(&format!("alias {} = {} ({})", alias.name, alias.target, alias.value))
            );
        }
        for hidden in &table.out_of_window {
            let _ = writeln!(
                out,
                "  {}",
                self.warning(&format!("outside window: {} = {}", hidden.name, hidden.value))
            );
        }
    }

    fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Error line printed by the binary: `error: <message>` then each cause.
pub fn format_error(err: &anyhow::Error, color: bool) -> String {
    let label = if color {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    let mut out = format!("{label}: {err}");
    for cause in err.chain().skip(1) {
        let _ = write!(out, "\n  caused by: {cause}");
    }
    out
}

#[derive(Serialize)]
struct DumpReport<'a> {
    dialect: String,
    #[serde(flatten)]
    reflected: &'a Reflected,
    invalid: &'a [(i128, String)],
}

pub fn dump_json(dump: &SignatureDump, item: &Reflected) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DumpReport {
        dialect: dump.dialect.to_string(),
        reflected: item,
        invalid: &dump.invalid,
    })
}

pub fn tables_json(items: &[Reflected]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}
