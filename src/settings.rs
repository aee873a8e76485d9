use serde::{Deserialize, Serialize};

use crate::spiral::{
    MAX_COILS, MAX_SIZE_RATIO, MAX_THICKNESS, MIN_COILS, MIN_SIZE_RATIO, MIN_THICKNESS, SpiralKind,
};

/// Per-tick delta while a coil-adjust control is held.
pub const COIL_ADJUST_SPEED: f32 = 0.05;
/// Per-tick delta while a thickness-adjust control is held.
pub const THICKNESS_ADJUST_SPEED: f32 = 0.2;
/// Step applied per size-ratio nudge.
pub const SIZE_RATIO_STEP: f32 = 0.1;

/// Externally supplied configuration: snap radii and the defaults applied
/// to newly drawn spirals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub snapping_enabled: bool,
    /// Snap radius in px for endpoints and curve points.
    pub endpoint_snap_radius: f32,
    /// Wider snap radius in px for curve proximity, applied only to the
    /// first point of a new gesture.
    pub center_snap_radius: f32,
    pub default_coils: f32,
    pub line_thickness: f32,
    pub kind: SpiralKind,
    pub taper_to_center: bool,
    pub clockwise: bool,
    pub size_ratio: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            snapping_enabled: true,
            endpoint_snap_radius: 10.0,
            center_snap_radius: 20.0,
            default_coils: 3.0,
            line_thickness: 10.0,
            kind: SpiralKind::Logarithmic,
            taper_to_center: true,
            clockwise: true,
            size_ratio: 1.0,
        }
    }
}

/// A single parameter edit, applied to a selected spiral or to the
/// defaults for new spirals. Values are clamped before they land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEdit {
    Thickness(f32),
    Coils(f32),
    TaperToCenter(bool),
    Clockwise(bool),
    Kind(SpiralKind),
    SizeRatio(f32),
}

/// Which parameter a held-key ramp is adjusting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustKind {
    Coils,
    Thickness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustDirection {
    Increase,
    Decrease,
}

/// One tick of a held-key ramp: clamp-then-apply, no partial state. The
/// caller owns the timer and calls this once per tick for as long as the
/// control stays active.
pub fn apply_adjust(current: f32, kind: AdjustKind, direction: AdjustDirection) -> f32 {
    let step = match kind {
        AdjustKind::Coils => COIL_ADJUST_SPEED,
        AdjustKind::Thickness => THICKNESS_ADJUST_SPEED,
    };
    let delta = match direction {
        AdjustDirection::Increase => step,
        AdjustDirection::Decrease => -step,
    };
    match kind {
        AdjustKind::Coils => (current + delta).clamp(MIN_COILS, MAX_COILS),
        AdjustKind::Thickness => (current + delta).clamp(MIN_THICKNESS, MAX_THICKNESS),
    }
}

/// One size-ratio nudge, clamped to [0, 3].
pub fn step_size_ratio(current: f32, direction: AdjustDirection) -> f32 {
    let delta = match direction {
        AdjustDirection::Increase => SIZE_RATIO_STEP,
        AdjustDirection::Decrease => -SIZE_RATIO_STEP,
    };
    (current + delta).clamp(MIN_SIZE_RATIO, MAX_SIZE_RATIO)
}
