//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! icons = "icons"     # Directory scanned for .svg files (relative to project root)
//! output = "dist"     # Output directory (relative to project root)
//! preview = true      # Write preview.html next to the sprite
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Icon source directory.
    pub icons: PathBuf,

    /// Output directory for the sprite, its html copy and the preview.
    pub output: PathBuf,

    /// Generate the preview gallery.
    pub preview: bool,

    /// Suppress progress output (CLI only).
    #[serde(skip)]
    pub quiet: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            icons: "icons".into(),
            output: "dist".into(),
            preview: true,
            quiet: false,
        }
    }
}

impl BuildConfig {
    /// Validate directory layout. Call after paths are resolved.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.icons == self.output {
            diag.error_with_hint(
                "build.output",
                "output directory is the icon directory",
                "the generated sprite would be picked up as an icon on the next build; use a separate directory",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.icons, PathBuf::from("icons"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.preview);
        assert!(!config.build.quiet);
    }

    #[test]
    fn test_overrides() {
        let config = test_parse_config("[build]\nicons = \"assets/icons\"\npreview = false");
        assert_eq!(config.build.icons, PathBuf::from("assets/icons"));
        assert!(!config.build.preview);
    }

    #[test]
    fn test_same_directory_rejected() {
        let build = BuildConfig {
            icons: "/site/icons".into(),
            output: "/site/icons".into(),
            ..BuildConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert!(!diag.is_empty());
        assert_eq!(diag.errors()[0].field, "build.output");
    }
}
