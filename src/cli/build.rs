//! Sprite build orchestration.
//!
//! Build pipeline phases:
//! - **Load** - List the icon directory, read and strip every `.svg` concurrently
//! - **Aggregate** - Register all records with the compiler, compile once
//! - **Write** - Sprite, `svg-sprite.html` and the optional preview page

use crate::{
    config::SpriteConfig,
    icon::{self, IconRecord},
    log,
    output::{OutputWriter, WriteSummary},
    sprite::{self, CompileError, CompiledSprite, SpriteCompiler, SpriteOptions, SymbolSpriter},
    utils::plural_count,
};

/// What a finished build produced.
#[derive(Debug)]
pub struct BuildReport {
    /// Ids of the icons that made it into the sprite, in listing order.
    pub ids: Vec<String>,
    pub sprite: CompiledSprite,
    pub writes: WriteSummary,
}

/// Build with the built-in symbol compiler.
pub async fn build_sprite(config: &SpriteConfig) -> Result<BuildReport, CompileError> {
    let mut compiler = SymbolSpriter::new(SpriteOptions::from_config(config));
    build_with(config, &mut compiler).await
}

/// Run the pipeline against any compiler.
///
/// Load failures and shapes the compiler skips only shrink the icon set.
/// A compile failure is returned before anything is written. Write failures
/// end up in the report.
pub async fn build_with<C>(config: &SpriteConfig, compiler: &mut C) -> Result<BuildReport, CompileError>
where
    C: SpriteCompiler + ?Sized,
{
    let records = icon::load(&config.build.icons, config.build.quiet).await;
    let compiled = sprite::aggregate(&records, compiler)?;
    let ids = sprite_ids(&records, &compiled);

    let writer = OutputWriter::new(&config.build.output, config.build.preview);
    let writes = writer.write(&compiled, &ids).await;

    log_summary(ids.len(), &writes);
    Ok(BuildReport {
        ids,
        sprite: compiled,
        writes,
    })
}

/// Ids of the records the compiler kept, in listing order.
fn sprite_ids(records: &[IconRecord], compiled: &CompiledSprite) -> Vec<String> {
    records
        .iter()
        .filter(|record| !compiled.skipped().contains(&record.name))
        .map(|record| record.id.clone())
        .collect()
}

fn log_summary(icons: usize, writes: &WriteSummary) {
    if writes.is_ok() {
        log!("build"; "{} in sprite", plural_count(icons, "icon"));
    } else {
        log!(
            "build";
            "{} in sprite, {} failed",
            plural_count(icons, "icon"),
            plural_count(writes.failed.len(), "write")
        );
    }
}
