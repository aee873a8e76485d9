use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

// Single static counter for all spirals
static NEXT_SPIRAL_ID: AtomicUsize = AtomicUsize::new(1);

/// Stable identity for a spiral.
///
/// Attachments reference ids rather than store positions, so relationships
/// survive reordering or removal of other spirals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpiralId(usize);

impl SpiralId {
    pub fn next() -> Self {
        SpiralId(NEXT_SPIRAL_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Reserved id for preview geometry that is never stored. The counter
    /// starts at 1, so 0 can never collide with a committed spiral.
    pub const PREVIEW: SpiralId = SpiralId(0);
}
