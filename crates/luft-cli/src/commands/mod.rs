pub mod index;
pub mod parse;
pub mod score;
pub mod thresholds;

use luft_core::error::LuftError;
use luft_core::thresholds::builtin;
use luft_core::thresholds::schema::ThresholdTableDef;
use std::path::PathBuf;

/// Resolve the threshold table for a command: a custom file wins over the
/// preset name.
pub fn resolve_table(
    file: Option<PathBuf>,
    preset: &str,
) -> Result<ThresholdTableDef, LuftError> {
    match file {
        Some(path) => luft_core::thresholds::load_table(&path),
        None => builtin::load_preset(preset),
    }
}
