//! Owned enum tables.
//!
//! The same facts the const engine bakes into associated constants, derived
//! at build time into plain data that can be serialized or emitted as code.

use enum_traits_common::ScanWindow;
use serde::Serialize;

use crate::declaration::Declaration;
use crate::extract::first_oversized;
use crate::probe::first_enumerator;
use crate::range::{ValidValues, bounds};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error(
        "enumerator `{type_name}::{name}` does not fit a {capacity}-byte name buffer \
         (terminator included); raise ENUM_TRAITS_MAX_NAME_LENGTH"
    )]
    NameTooLong {
        type_name: String,
        name: String,
        capacity: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub name: String,
    pub value: i128,
}

/// An enumerator hidden behind an earlier one with the same value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub name: String,
    pub target: String,
    pub value: i128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTable {
    pub type_name: String,
    /// Scan window after clipping to the underlying type.
    pub window: ScanWindow,
    pub min: i128,
    pub max: i128,
    pub count: usize,
    /// Ascending by value, one entry per valid value.
    pub entries: Vec<TableEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Alias>,
    /// Enumerators whose value lies outside the scan window.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub out_of_window: Vec<TableEntry>,
}

impl EnumTable {
    pub fn derive(
        decl: &Declaration<'_>,
        window: ScanWindow,
        capacity: usize,
    ) -> Result<Self, TableError> {
        if let Some(name) = first_oversized(decl.enumerators, capacity) {
            return Err(TableError::NameTooLong {
                type_name: decl.type_name.to_string(),
                name: name.to_string(),
                capacity,
            });
        }

        let effective = decl.effective_window(window);
        let bounds = bounds(decl, window);
        let entries: Vec<TableEntry> = ValidValues::new(decl, window)
            .filter_map(|value| {
                first_enumerator(decl, value).map(|index| TableEntry {
                    name: decl.enumerators[index].name.to_string(),
                    value,
                })
            })
            .collect();

        let mut aliases = Vec::new();
        let mut out_of_window = Vec::new();
        for (index, enumerator) in decl.enumerators.iter().enumerate() {
            if !effective.contains(enumerator.value) {
                out_of_window.push(TableEntry {
                    name: enumerator.name.to_string(),
                    value: enumerator.value,
                });
                continue;
            }
            if let Some(first) = first_enumerator(decl, enumerator.value) {
                if first != index {
                    aliases.push(Alias {
                        name: enumerator.name.to_string(),
                        target: decl.enumerators[first].name.to_string(),
                        value: enumerator.value,
                    });
                }
            }
        }

        Ok(Self {
            type_name: decl.type_name.to_string(),
            window: effective,
            min: bounds.min,
            max: bounds.max,
            count: entries.len(),
            entries,
            aliases,
            out_of_window,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = i128> + '_ {
        self.entries.iter().map(|entry| entry.value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Name of `value`, or the empty string when it is not in the table.
    pub fn name(&self, value: i128) -> &str {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.name.as_str())
            .unwrap_or("")
    }

    pub fn value_of(&self, name: &str) -> Option<i128> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }
}
