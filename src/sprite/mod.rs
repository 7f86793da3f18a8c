//! Sprite compilation.
//!
//! The pipeline only talks to a [`SpriteCompiler`]: icons are registered one
//! by one, then compiled once into a [`CompiledSprite`]. [`SymbolSpriter`] is
//! the built-in compiler for the combined `symbol` mode.
//!
//! ```text
//! [IconRecord] ──► aggregate ──► register × N ──► compile ──► CompiledSprite
//!                                                             mode
//!                                                             └─ resource key
//!                                                                └─ { path, contents }
//! ```

mod aggregate;
mod shape;
mod symbol;

pub use aggregate::aggregate;
pub use symbol::{SpriteOptions, SymbolSpriter};

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// A sprite-building backend.
pub trait SpriteCompiler {
    /// Register one shape. `path` is only a namespace/debug key; the
    /// compiler must use `content` and never read the file again.
    ///
    /// Registering the same name again replaces the earlier content.
    fn register(&mut self, path: &Path, name: &str, content: &str);

    /// Compile everything registered so far.
    fn compile(&self) -> Result<CompiledSprite, CompileError>;
}

/// Failures of the compile step. Any of these aborts the build.
///
/// A single shape that cannot be parsed is not one of them: compilers leave
/// it out and list it in [`CompiledSprite::skipped`].
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("shapes `{first}` and `{second}` both map to symbol id `{id}`")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

/// One output file produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Compiler output, bucketed by output mode, then by resource key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledSprite {
    modes: BTreeMap<String, BTreeMap<String, CompiledArtifact>>,
    skipped: Vec<String>,
}

impl CompiledSprite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the artifact at `mode`/`resource`.
    pub fn insert(
        &mut self,
        mode: impl Into<String>,
        resource: impl Into<String>,
        artifact: CompiledArtifact,
    ) {
        self.modes
            .entry(mode.into())
            .or_default()
            .insert(resource.into(), artifact);
    }

    /// Record a registered name that was left out of the output.
    pub fn skip(&mut self, name: impl Into<String>) {
        self.skipped.push(name.into());
    }

    /// Registered names left out of the output, in registration order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    #[cfg(test)]
    pub fn get(&self, mode: &str, resource: &str) -> Option<&CompiledArtifact> {
        self.modes.get(mode)?.get(resource)
    }

    /// Iterate `(mode, resource, artifact)` in mode order, then resource order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &CompiledArtifact)> {
        self.modes.iter().flat_map(|(mode, resources)| {
            resources
                .iter()
                .map(move |(resource, artifact)| (mode.as_str(), resource.as_str(), artifact))
        })
    }

    /// Total number of artifacts across all modes.
    pub fn len(&self) -> usize {
        self.modes.values().map(BTreeMap::len).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(path: &str, contents: &str) -> CompiledArtifact {
        CompiledArtifact {
            path: PathBuf::from(path),
            contents: contents.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_empty_sprite() {
        let sprite = CompiledSprite::new();
        assert!(sprite.is_empty());
        assert_eq!(sprite.iter().count(), 0);
    }

    #[test]
    fn test_iter_is_two_level_ordered() {
        let mut sprite = CompiledSprite::new();
        sprite.insert("symbol", "sprite", artifact("a.svg", "a"));
        sprite.insert("stack", "sprite", artifact("b.svg", "b"));
        sprite.insert("symbol", "example", artifact("c.html", "c"));

        let keys: Vec<_> = sprite.iter().map(|(m, r, _)| (m, r)).collect();
        assert_eq!(
            keys,
            [("stack", "sprite"), ("symbol", "example"), ("symbol", "sprite")]
        );
        assert_eq!(sprite.len(), 3);
    }

    #[test]
    fn test_insert_replaces() {
        let mut sprite = CompiledSprite::new();
        sprite.insert("symbol", "sprite", artifact("a.svg", "old"));
        sprite.insert("symbol", "sprite", artifact("a.svg", "new"));
        assert_eq!(sprite.len(), 1);
        assert_eq!(sprite.get("symbol", "sprite").unwrap().contents, b"new");
        assert!(sprite.get("symbol", "missing").is_none());
    }

    #[test]
    fn test_skipped_names_kept_in_order() {
        let mut sprite = CompiledSprite::new();
        sprite.skip("b.svg");
        sprite.skip("a.svg");
        assert_eq!(sprite.skipped(), ["b.svg", "a.svg"]);
        assert!(sprite.is_empty());
    }
}
