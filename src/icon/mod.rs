//! Icon ingestion: discovery, reading and rectangle stripping.
//!
//! ```text
//! icons/ ──► scan_icon_dir ──► [IconFile] ──► load_icons ──► [IconRecord]
//!                                               │
//!                                               └─ strip_first_rect per file
//! ```

mod load;
mod transform;

pub use load::load;
pub use transform::strip_first_rect;

use std::path::PathBuf;
use thiserror::Error;

/// Extension (without dot) of files picked up from the icon directory.
pub const ICON_EXTENSION: &str = "svg";

/// An entry of the icon directory that passed the extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    /// File name within the icon directory, e.g. `home.svg`.
    pub name: String,
    /// Icon directory joined with `name`.
    pub path: PathBuf,
    /// Raw extension as listed (always `svg` after filtering).
    pub extension: String,
}

/// A successfully read and transformed icon.
#[derive(Debug, Clone)]
pub struct IconRecord {
    /// File name including extension; the name the sprite compiler sees.
    pub name: String,
    /// File stem; symbol id inside the sprite and `#ref` in the preview.
    pub id: String,
    pub path: PathBuf,
    /// Content after rectangle stripping.
    pub content: String,
}

impl IconRecord {
    /// Build a record from a discovered file and its raw content.
    pub fn new(file: IconFile, raw: String) -> Self {
        let content = strip_first_rect(&raw);
        let id = file
            .name
            .strip_suffix(file.extension.as_str())
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&file.name)
            .to_string();
        Self {
            name: file.name,
            id,
            path: file.path,
            content,
        }
    }
}

/// Failures while discovering or reading icons.
///
/// None of these abort a build: the loader logs them and moves on.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("cannot read icon directory `{}`", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read icon `{}`", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("loading icon `{}` did not complete: {message}", path.display())]
    Task { path: PathBuf, message: String },
}
