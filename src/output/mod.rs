//! Persisting compiled sprites.
//!
//! Each artifact of a [`CompiledSprite`] produces up to three files, written
//! concurrently and independently:
//!
//! | Kind      | Path                          | Contents                    |
//! |-----------|-------------------------------|-----------------------------|
//! | `sprite`  | the artifact's own path       | compiled sprite             |
//! | `html`    | `<output>/svg-sprite.html`    | compiled sprite             |
//! | `preview` | `<output>/preview.html`       | preview page (optional)     |
//!
//! A failed write is logged and recorded; it never stops the other writes.

mod preview;

pub use preview::generate_preview;

use crate::{
    log,
    logger::report,
    sprite::{CompiledArtifact, CompiledSprite},
};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Sprite markup copied as an HTML document.
pub const SPRITE_HTML_FILE: &str = "svg-sprite.html";
/// Icon preview page.
pub const PREVIEW_FILE: &str = "preview.html";

/// Which of the three outputs a write belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Sprite,
    Html,
    Preview,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sprite => "sprite",
            Self::Html => "html",
            Self::Preview => "preview",
        })
    }
}

#[derive(Debug, Error)]
#[error("cannot write {kind} `{}`", path.display())]
pub struct WriteError {
    pub kind: OutputKind,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Outcome of writing every artifact.
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<(OutputKind, PathBuf)>,
    pub failed: Vec<WriteError>,
}

impl WriteSummary {
    fn record(&mut self, kind: OutputKind, path: PathBuf, result: Result<(), WriteError>) {
        match result {
            Ok(()) => self.written.push((kind, path)),
            Err(err) => {
                log!("error"; "{}", report(&err));
                self.failed.push(err);
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes compiled sprites below one output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    preview: bool,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, preview: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            preview,
        }
    }

    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(SPRITE_HTML_FILE)
    }

    pub fn preview_path(&self) -> PathBuf {
        self.output_dir.join(PREVIEW_FILE)
    }

    /// Write every artifact of `sprite`. `ids` feed the preview rows.
    ///
    /// Never fails as a whole; see [`WriteSummary::failed`].
    pub async fn write(&self, sprite: &CompiledSprite, ids: &[String]) -> WriteSummary {
        let mut summary = WriteSummary::default();

        for (mode, resource, artifact) in sprite.iter() {
            crate::debug!("output"; "writing {}/{}", mode, resource);
            self.write_artifact(artifact, ids, &mut summary).await;
        }

        summary
    }

    async fn write_artifact(
        &self,
        artifact: &CompiledArtifact,
        ids: &[String],
        summary: &mut WriteSummary,
    ) {
        let html_path = self.html_path();
        let preview_path = self.preview_path();

        let preview = async {
            if !self.preview {
                return None;
            }
            let markup = String::from_utf8_lossy(&artifact.contents);
            let page = generate_preview(ids, &markup);
            Some(write_file(OutputKind::Preview, &preview_path, page.as_bytes()).await)
        };

        let (sprite, html, preview) = tokio::join!(
            write_file(OutputKind::Sprite, &artifact.path, &artifact.contents),
            write_file(OutputKind::Html, &html_path, &artifact.contents),
            preview,
        );

        if sprite.is_ok() {
            log!("sprite"; "{} ({} KB)", artifact.path.display(), size_kb(artifact.contents.len()));
        }
        summary.record(OutputKind::Sprite, artifact.path.clone(), sprite);
        summary.record(OutputKind::Html, html_path, html);
        if let Some(preview) = preview {
            if preview.is_ok() {
                log!("preview"; "{}", preview_path.display());
            }
            summary.record(OutputKind::Preview, preview_path, preview);
        }
    }
}

/// Create the parent directory if needed, then write `contents`.
async fn write_file(kind: OutputKind, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    let wrap = |source| WriteError {
        kind,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(wrap)?;
    }
    tokio::fs::write(path, contents).await.map_err(wrap)
}

fn size_kb(bytes: usize) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}
