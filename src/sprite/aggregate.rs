//! Feeding loaded icons into a sprite compiler.

use super::{CompileError, CompiledSprite, SpriteCompiler};
use crate::{debug, icon::IconRecord, utils::plural_count};

/// Register every record, then compile once.
///
/// Records are registered under their file name with their transformed
/// content; compilation starts only after the last registration.
pub fn aggregate<C>(records: &[IconRecord], compiler: &mut C) -> Result<CompiledSprite, CompileError>
where
    C: SpriteCompiler + ?Sized,
{
    for record in records {
        compiler.register(&record.path, &record.name, &record.content);
    }
    debug!("sprite"; "registered {}", plural_count(records.len(), "shape"));

    compiler.compile()
}
