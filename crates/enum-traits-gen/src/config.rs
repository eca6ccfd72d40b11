//! Generator configuration.
//!
//! Defaults come from the values baked into `enum-traits-common` at build
//! time, so generated tables agree with what `enum_traits!` computes unless
//! a caller overrides them. A JSON file (`etraits.json`, camelCase keys) can
//! supply any subset of the fields.

use std::fs;
use std::path::Path;

use enum_traits_common::ScanWindow;
use enum_traits_common::limits::{MAX_NAME_LENGTH, MAX_SCAN_WIDTH};
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// File name looked up by the CLI when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "etraits.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenConfig {
    pub min_enum_value: i128,
    pub max_enum_value: i128,
    /// Name capacity in bytes, terminator included.
    pub max_name_length: usize,
    /// Path under which the facade crate is reachable from generated code.
    pub crate_path: String,
    /// Also emit the enum definitions (for C/C++ sources and signature dumps).
    pub emit_definitions: bool,
    /// Restrict output to these enums; empty means all.
    pub only: Vec<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            min_enum_value: ScanWindow::CONFIGURED.min,
            max_enum_value: ScanWindow::CONFIGURED.max,
            max_name_length: MAX_NAME_LENGTH,
            crate_path: "::enum_traits".to_string(),
            emit_definitions: false,
            only: Vec::new(),
        }
    }
}

impl GenConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, GenError> {
        let text = fs::read_to_string(path).map_err(|source| GenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| GenError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn window(&self) -> ScanWindow {
        ScanWindow::new(self.min_enum_value, self.max_enum_value)
    }

    /// Apply the same limits the build script enforces on the baked values.
    pub fn validate(&self) -> Result<(), GenError> {
        let window = self.window();
        if window.is_inverted() {
            return Err(GenError::Config(format!(
                "minEnumValue ({}) exceeds maxEnumValue ({})",
                self.min_enum_value, self.max_enum_value
            )));
        }
        if window.width() > MAX_SCAN_WIDTH {
            return Err(GenError::Config(format!(
                "scan window {window} spans {} values; the limit is {MAX_SCAN_WIDTH}",
                window.width()
            )));
        }
        if self.max_name_length < 2 {
            return Err(GenError::Config(
                "maxNameLength must be at least 2 (one character plus terminator)".to_string(),
            ));
        }
        if self.crate_path.trim().is_empty() {
            return Err(GenError::Config("cratePath must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn wants(&self, name: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|only| only == name)
    }
}
