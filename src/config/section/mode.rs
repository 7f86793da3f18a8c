//! `[mode]` section configuration.
//!
//! Only the combined `symbol` mode exists.
//!
//! # Example
//!
//! ```toml
//! [mode.symbol]
//! enable = true
//! dest = "."                 # Relative to the output directory
//! sprite = "svg-sprite.svg"  # Sprite file name
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub symbol: SymbolModeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolModeConfig {
    /// Produce the combined symbol sprite.
    pub enable: bool,

    /// Sprite directory, relative to `[build].output`.
    pub dest: PathBuf,

    /// Sprite file name.
    pub sprite: String,
}

impl Default for SymbolModeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            dest: ".".into(),
            sprite: "svg-sprite.svg".to_string(),
        }
    }
}

impl ModeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let symbol = &self.symbol;
        if !symbol.enable {
            return;
        }
        if symbol.sprite.is_empty() || symbol.sprite.contains(['/', '\\']) {
            diag.error_with_hint(
                "mode.symbol.sprite",
                "sprite must be a plain file name",
                "put directories in `mode.symbol.dest`",
            );
        }
        if symbol.dest.is_absolute() {
            diag.error(
                "mode.symbol.dest",
                "dest must be relative to the output directory",
            );
        }
    }
}
