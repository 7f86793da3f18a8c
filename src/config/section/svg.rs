//! `[svg]` section configuration.
//!
//! Settings for the generated sprite document itself.
//!
//! # Example
//!
//! ```toml
//! [svg]
//! xml_declaration = false       # Emit <?xml ...?> before the sprite
//! doctype_declaration = false   # Emit the SVG 1.1 DOCTYPE
//! namespace_ids = true          # Prefix ids inside each shape with its symbol id
//! namespace_classnames = true   # Same for class names and `.class` selectors
//! dimension_attributes = true   # width/height on the sprite root
//!
//! [svg.root_attributes]
//! style = "display: none;"
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Add XML declaration to the sprite.
    pub xml_declaration: bool,

    /// Add DOCTYPE declaration to the sprite.
    pub doctype_declaration: bool,

    /// Namespace ids inside shapes so two icons never clash.
    pub namespace_ids: bool,

    /// Namespace class names inside shapes, including `<style>` selectors.
    pub namespace_classnames: bool,

    /// Put width and height attributes on the sprite's root `<svg>`.
    pub dimension_attributes: bool,

    /// Extra attributes on the sprite's root `<svg>`.
    pub root_attributes: BTreeMap<String, String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            xml_declaration: false,
            doctype_declaration: false,
            namespace_ids: true,
            namespace_classnames: true,
            dimension_attributes: true,
            root_attributes: BTreeMap::from([(
                "style".to_string(),
                "display: none;".to_string(),
            )]),
        }
    }
}

impl SvgConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for name in self.root_attributes.keys() {
            if !is_attribute_name(name) {
                diag.error(
                    "svg.root_attributes",
                    format!("`{name}` is not a valid attribute name"),
                );
            }
        }
    }
}

/// Loose XML name check: non-empty, no whitespace, quotes, `=`, `<` or `>`.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/'))
}
