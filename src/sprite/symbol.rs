//! Built-in compiler for the combined `symbol` mode.
//!
//! Every registered shape becomes a `<symbol>` inside one hidden `<svg>`,
//! addressable as `<use xlink:href="#id"/>`.

use super::{CompileError, CompiledArtifact, CompiledSprite, SpriteCompiler, shape};
use crate::{
    config::{ShapeConfig, SpriteConfig, SvgConfig, SymbolModeConfig},
    debug, log,
    utils::{html::escape, plural_count},
};
use rustc_hash::FxHashMap;
use std::{
    collections::hash_map::Entry,
    fmt::Write as _,
    path::{Path, PathBuf},
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const DOCTYPE_DECLARATION: &str = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#;
const SVG_ROOT_OPEN: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#;

/// Compiler settings, taken from the build configuration once per run.
#[derive(Debug, Clone)]
pub struct SpriteOptions {
    /// Main output directory.
    pub dest: PathBuf,
    pub shape: ShapeConfig,
    pub svg: SvgConfig,
    pub symbol: SymbolModeConfig,
}

impl SpriteOptions {
    pub fn from_config(config: &SpriteConfig) -> Self {
        Self {
            dest: config.build.output.clone(),
            shape: config.shape.clone(),
            svg: config.svg.clone(),
            symbol: config.mode.symbol.clone(),
        }
    }

    /// Where the symbol sprite is written.
    pub fn sprite_path(&self) -> PathBuf {
        let dir = &self.symbol.dest;
        let base = if dir.as_os_str().is_empty() || dir == Path::new(".") {
            self.dest.clone()
        } else {
            self.dest.join(dir)
        };
        base.join(&self.symbol.sprite)
    }
}

#[derive(Debug)]
struct Shape {
    path: PathBuf,
    name: String,
    content: String,
}

/// Symbol-mode sprite compiler.
#[derive(Debug)]
pub struct SymbolSpriter {
    options: SpriteOptions,
    shapes: Vec<Shape>,
}

impl SymbolSpriter {
    /// Output mode key in the compiled sprite.
    pub const MODE: &'static str = "symbol";
    /// Resource key of the sprite file within the mode.
    pub const RESOURCE: &'static str = "sprite";

    pub fn new(options: SpriteOptions) -> Self {
        Self {
            options,
            shapes: Vec::new(),
        }
    }

    /// Symbol id for a registered name: extension removed, path separators
    /// replaced by the configured separator.
    fn shape_id(&self, name: &str) -> String {
        let stem = name.strip_suffix(".svg").unwrap_or(name);
        stem.replace(['/', '\\'], &self.options.shape.id_separator)
    }

    /// Two registered names must never share a symbol id.
    fn check_ids(&self) -> Result<(), CompileError> {
        let mut seen: FxHashMap<String, &str> = FxHashMap::default();
        for shape in &self.shapes {
            match seen.entry(self.shape_id(&shape.name)) {
                Entry::Occupied(entry) => {
                    return Err(CompileError::DuplicateId {
                        id: entry.key().clone(),
                        first: entry.get().to_string(),
                        second: shape.name.clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(&shape.name);
                }
            }
        }
        Ok(())
    }

    /// Render the sprite document. Shapes that fail to parse are logged,
    /// left out and recorded as skipped in `sprite`.
    fn render(&self, sprite: &mut CompiledSprite) -> String {
        let svg = &self.options.svg;
        let shape_config = &self.options.shape;

        let mut symbols =
            String::with_capacity(self.shapes.iter().map(|s| s.content.len()).sum::<usize>());
        // Largest outer size over all shapes
        let mut size: Option<(f64, f64)> = None;

        for shape in &self.shapes {
            let id = self.shape_id(&shape.name);
            match shape::symbol_markup(&id, &shape.content, shape_config, svg) {
                Ok(rendered) => {
                    if let Some(geometry) = rendered.geometry {
                        let (width, height) = size.unwrap_or_default();
                        size = Some((width.max(geometry.width), height.max(geometry.height)));
                    }
                    debug!("sprite"; "{} -> #{}", shape.path.display(), id);
                    symbols.push_str(&rendered.markup);
                }
                Err(err) => {
                    log!("error"; "cannot compile shape `{}`: {}", shape.name, err);
                    sprite.skip(&shape.name);
                }
            }
        }

        let mut out = String::with_capacity(256 + symbols.len());
        if svg.xml_declaration {
            out.push_str(XML_DECLARATION);
        }
        if svg.doctype_declaration {
            out.push_str(DOCTYPE_DECLARATION);
        }

        out.push_str(SVG_ROOT_OPEN);
        if svg.dimension_attributes
            && let Some((width, height)) = size
        {
            let precision = shape_config.precision;
            let _ = write!(
                out,
                r#" width="{}" height="{}""#,
                shape::round_number(width, precision),
                shape::round_number(height, precision)
            );
        }
        for (name, value) in &svg.root_attributes {
            let _ = write!(out, r#" {}="{}""#, name, escape(value));
        }
        out.push('>');
        out.push_str(&symbols);
        out.push_str("</svg>");
        out
    }
}

impl SpriteCompiler for SymbolSpriter {
    fn register(&mut self, path: &Path, name: &str, content: &str) {
        match self.shapes.iter_mut().find(|shape| shape.name == name) {
            Some(shape) => {
                debug!("sprite"; "replacing shape {}", name);
                shape.path = path.to_path_buf();
                shape.content = content.to_string();
            }
            None => self.shapes.push(Shape {
                path: path.to_path_buf(),
                name: name.to_string(),
                content: content.to_string(),
            }),
        }
    }

    fn compile(&self) -> Result<CompiledSprite, CompileError> {
        let mut sprite = CompiledSprite::new();

        if !self.options.symbol.enable {
            debug!("sprite"; "symbol mode disabled, nothing to compile");
            return Ok(sprite);
        }

        self.check_ids()?;
        let contents = self.render(&mut sprite);
        debug!(
            "sprite";
            "compiled {}",
            plural_count(self.shapes.len() - sprite.skipped().len(), "symbol")
        );

        sprite.insert(
            Self::MODE,
            Self::RESOURCE,
            CompiledArtifact {
                path: self.options.sprite_path(),
                contents: contents.into_bytes(),
            },
        );
        Ok(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SpriteOptions {
        SpriteOptions::from_config(&SpriteConfig {
            build: crate::config::BuildConfig {
                output: PathBuf::from("/out"),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn sprite_text(spriter: &SymbolSpriter) -> String {
        let sprite = spriter.compile().unwrap();
        let artifact = sprite
            .get(SymbolSpriter::MODE, SymbolSpriter::RESOURCE)
            .unwrap();
        String::from_utf8(artifact.contents.clone()).unwrap()
    }

    #[test]
    fn test_empty_sprite_is_valid() {
        let spriter = SymbolSpriter::new(options());
        assert_eq!(
            sprite_text(&spriter),
            format!(r#"{SVG_ROOT_OPEN} style="display: none;"></svg>"#)
        );
    }

    #[test]
    fn test_sprite_path_default() {
        let sprite = SymbolSpriter::new(options()).compile().unwrap();
        let artifact = sprite.get("symbol", "sprite").unwrap();
        assert_eq!(artifact.path, PathBuf::from("/out/svg-sprite.svg"));
    }

    #[test]
    fn test_sprite_path_with_dest() {
        let mut options = options();
        options.symbol.dest = "sprites".into();
        options.symbol.sprite = "icons.svg".into();
        assert_eq!(options.sprite_path(), PathBuf::from("/out/sprites/icons.svg"));
    }

    #[test]
    fn test_symbols_in_registration_order() {
        let mut spriter = SymbolSpriter::new(options());
        spriter.register(Path::new("icons/home.svg"), "home.svg", r#"<svg><path d="M0 0"/></svg>"#);
        spriter.register(Path::new("icons/star.svg"), "star.svg", "</svg>");

        assert_eq!(
            sprite_text(&spriter),
            format!(
                r#"{SVG_ROOT_OPEN} style="display: none;"><symbol id="home"><path d="M0 0"/></symbol><symbol id="star"></symbol></svg>"#
            )
        );
    }

    #[test]
    fn test_register_same_name_last_write_wins() {
        let mut spriter = SymbolSpriter::new(options());
        spriter.register(Path::new("a/x.svg"), "x.svg", "<svg><g/></svg>");
        spriter.register(Path::new("b/y.svg"), "y.svg", "<svg><circle/></svg>");
        spriter.register(Path::new("c/x.svg"), "x.svg", "<svg><path/></svg>");

        let text = sprite_text(&spriter);
        assert!(!text.contains("<g/>"));
        let x = text.find(r#"<symbol id="x"><path/></symbol>"#).unwrap();
        let y = text.find(r#"<symbol id="y">"#).unwrap();
        assert!(x < y);
    }

    #[test]
    fn test_declarations_and_root_attributes() {
        let mut options = options();
        options.svg.xml_declaration = true;
        options.svg.doctype_declaration = true;
        options.svg.root_attributes.insert("aria-hidden".into(), "true".into());

        let text = sprite_text(&SymbolSpriter::new(options));
        assert!(text.starts_with(&format!("{XML_DECLARATION}{DOCTYPE_DECLARATION}<svg ")));
        assert!(text.contains(r#" aria-hidden="true" style="display: none;">"#));
    }

    #[test]
    fn test_shape_id_separator() {
        let mut options = options();
        options.shape.id_separator = "__".into();
        let spriter = SymbolSpriter::new(options);
        assert_eq!(spriter.shape_id("arrows/left.svg"), "arrows__left");
        assert_eq!(spriter.shape_id("plain.svg"), "plain");
        assert_eq!(spriter.shape_id("noext"), "noext");
    }

    #[test]
    fn test_disabled_mode_compiles_to_nothing() {
        let mut options = options();
        options.symbol.enable = false;
        let mut spriter = SymbolSpriter::new(options);
        spriter.register(Path::new("a.svg"), "a.svg", "<svg/>");
        assert!(spriter.compile().unwrap().is_empty());
    }

    #[test]
    fn test_broken_shape_is_skipped() {
        let mut spriter = SymbolSpriter::new(options());
        spriter.register(Path::new("home.svg"), "home.svg", "<svg><g/></svg>");
        spriter.register(Path::new("bad.svg"), "bad.svg", r#"<svg><path d="M0"#);
        spriter.register(Path::new("star.svg"), "star.svg", "<svg><circle/></svg>");

        let sprite = spriter.compile().unwrap();

        assert_eq!(sprite.skipped(), ["bad.svg"]);
        assert_eq!(
            sprite_text(&spriter),
            format!(
                r#"{SVG_ROOT_OPEN} style="display: none;"><symbol id="home"><g/></symbol><symbol id="star"><circle/></symbol></svg>"#
            )
        );
    }

    #[test]
    fn test_duplicate_symbol_id_fails_compile() {
        let mut spriter = SymbolSpriter::new(options());
        spriter.register(Path::new("icons/arrows/left.svg"), "arrows/left.svg", "<svg/>");
        spriter.register(Path::new("icons/arrows--left.svg"), "arrows--left.svg", "<svg/>");

        let err = spriter.compile().unwrap_err();
        assert!(matches!(
            err,
            CompileError::DuplicateId { ref id, ref first, ref second }
                if id == "arrows--left" && first == "arrows/left.svg" && second == "arrows--left.svg"
        ));
    }

    #[test]
    fn test_root_dimensions_from_largest_shape() {
        let mut spriter = SymbolSpriter::new(options());
        spriter.register(Path::new("a.svg"), "a.svg", r#"<svg viewBox="0 0 24 16"/>"#);
        spriter.register(Path::new("b.svg"), "b.svg", r#"<svg viewBox="0 0 8 32"/>"#);
        spriter.register(Path::new("c.svg"), "c.svg", "<svg/>");

        let text = sprite_text(&spriter);
        assert!(text.starts_with(&format!(
            r#"{SVG_ROOT_OPEN} width="24" height="32" style="display: none;">"#
        )));
    }

    #[test]
    fn test_dimension_attributes_toggles() {
        let mut options = options();
        options.svg.dimension_attributes = false;
        options.shape.dimension_attributes = true;
        let mut spriter = SymbolSpriter::new(options);
        spriter.register(Path::new("a.svg"), "a.svg", r#"<svg viewBox="0 0 24 16"/>"#);

        assert_eq!(
            sprite_text(&spriter),
            format!(
                r#"{SVG_ROOT_OPEN} style="display: none;"><symbol id="a" viewBox="0 0 24 16" width="24" height="16"></symbol></svg>"#
            )
        );
    }
}
