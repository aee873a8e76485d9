use thiserror::Error;

use crate::spiral::SpiralId;

/// Errors surfaced by editor commands.
///
/// Geometry-level edge cases (degenerate curves, no snap candidate, empty
/// undo stack) are well-defined empty/`None` results, not errors; only a
/// command naming a spiral that does not exist fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no spiral with id {0:?}")]
    UnknownSpiral(SpiralId),
}
