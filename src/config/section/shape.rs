//! `[shape]` section configuration.
//!
//! Options applied to every icon while it is turned into a sprite symbol.
//!
//! # Example
//!
//! ```toml
//! [shape]
//! id_separator = "--"                    # Replaces path separators in symbol ids
//! precision = 2                          # Decimal places kept in viewBox values
//! strip_attributes = ["fill", "stroke"]  # Removed from every shape element
//! max_width = 2000                       # Shapes larger than this are scaled down
//! max_height = 2000
//! padding = 0                            # Space around every shape
//! box = "content"                        # Padding strategy: content, padding or icon
//! dimension_attributes = false           # width/height on every <symbol>
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

/// How padding relates to the shape size, similar to CSS `box-sizing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxSizing {
    /// Maximum size limits the shape; padding is added outside it.
    #[default]
    Content,
    /// Maximum size limits the shape; padding is taken from inside it.
    Padding,
    /// Maximum size limits shape plus padding.
    Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Separator for directory name traversal in symbol ids.
    pub id_separator: String,

    /// Floating point precision for viewBox values.
    pub precision: usize,

    /// Attributes removed from shape elements so icons can be recolored.
    pub strip_attributes: Vec<String>,

    /// Maximum shape width.
    pub max_width: f64,

    /// Maximum shape height.
    pub max_height: f64,

    /// Padding around every shape, in output units.
    pub padding: f64,

    #[serde(rename = "box")]
    pub box_sizing: BoxSizing,

    /// Put width and height attributes on each symbol.
    pub dimension_attributes: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            id_separator: "--".to_string(),
            precision: 2,
            strip_attributes: vec!["fill".to_string(), "stroke".to_string()],
            max_width: 2000.0,
            max_height: 2000.0,
            padding: 0.0,
            box_sizing: BoxSizing::Content,
            dimension_attributes: false,
        }
    }
}

impl ShapeConfig {
    /// Largest precision that still round-trips through `f64`.
    const MAX_PRECISION: usize = 15;

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.id_separator.chars().any(char::is_whitespace) {
            diag.error_with_hint(
                "shape.id_separator",
                "separator contains whitespace",
                "symbol ids cannot contain whitespace, try \"--\"",
            );
        }
        if self.precision > Self::MAX_PRECISION {
            diag.error(
                "shape.precision",
                format!("precision must be at most {}", Self::MAX_PRECISION),
            );
        }
        if self.strip_attributes.iter().any(|a| a.trim().is_empty()) {
            diag.error("shape.strip_attributes", "attribute names must not be empty");
        }
        if !(self.max_width.is_finite() && self.max_width > 0.0) {
            diag.error("shape.max_width", "max_width must be a positive number");
        }
        if !(self.max_height.is_finite() && self.max_height > 0.0) {
            diag.error("shape.max_height", "max_height must be a positive number");
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            diag.error("shape.padding", "padding must not be negative");
        }
    }

    /// Check whether an attribute is removed from shapes.
    pub fn strips(&self, attribute: &[u8]) -> bool {
        self.strip_attributes
            .iter()
            .any(|name| name.as_bytes() == attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.shape.id_separator, "--");
        assert_eq!(config.shape.precision, 2);
        assert!(config.shape.strips(b"fill"));
        assert!(config.shape.strips(b"stroke"));
        assert!(!config.shape.strips(b"d"));
        assert_eq!(config.shape.max_width, 2000.0);
        assert_eq!(config.shape.max_height, 2000.0);
        assert_eq!(config.shape.padding, 0.0);
        assert_eq!(config.shape.box_sizing, BoxSizing::Content);
        assert!(!config.shape.dimension_attributes);
    }

    #[test]
    fn test_empty_strip_list() {
        let config = test_parse_config("[shape]\nstrip_attributes = []");
        assert!(!config.shape.strips(b"fill"));
    }

    #[test]
    fn test_spacing_options() {
        let config = test_parse_config(
            "[shape]\npadding = 2.5\nbox = \"icon\"\nmax_width = 64\ndimension_attributes = true",
        );
        assert_eq!(config.shape.padding, 2.5);
        assert_eq!(config.shape.box_sizing, BoxSizing::Icon);
        assert_eq!(config.shape.max_width, 64.0);
        assert!(config.shape.dimension_attributes);
    }

    #[test]
    fn test_validate_separator_whitespace() {
        let shape = ShapeConfig {
            id_separator: "- -".into(),
            ..ShapeConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        shape.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_precision() {
        let config = test_parse_config("[shape]\nprecision = 40");
        let mut diag = ConfigDiagnostics::new();
        config.shape.validate(&mut diag);
        assert!(!diag.is_empty());
    }

    #[test]
    fn test_validate_dimensions_and_padding() {
        let config = test_parse_config("[shape]\nmax_width = 0\nmax_height = -1\npadding = -2");
        let mut diag = ConfigDiagnostics::new();
        config.shape.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["shape.max_width", "shape.max_height", "shape.padding"]);
    }
}
