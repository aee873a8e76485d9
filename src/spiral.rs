use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

pub use crate::id_generator::SpiralId;

pub const MIN_COILS: f32 = -22.0;
pub const MAX_COILS: f32 = 22.0;
pub const MIN_THICKNESS: f32 = 1.0;
pub const MAX_THICKNESS: f32 = 50.0;
pub const MIN_SIZE_RATIO: f32 = 0.0;
pub const MAX_SIZE_RATIO: f32 = 3.0;

/// Curve family of a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralKind {
    Line,
    Logarithmic,
    Archimedes,
    Hyperbolic,
    Fermat,
    SCurve,
}

/// A single spiral stroke, defined by its two control points.
///
/// `outer` is where a draw gesture started and carries the stroke width at
/// that end; `center` is where the gesture ended. Neither name implies a
/// radial ordering once the spiral has been dragged around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spiral {
    pub id: SpiralId,
    pub outer: Pos2,
    /// Stroke width at the `outer` end.
    pub outer_thickness: f32,
    pub center: Pos2,
    pub clockwise: bool,
    /// Signed turn count in [-22, 22]; the sign flips the winding.
    pub coils: f32,
    pub kind: SpiralKind,
    /// Thickness decreases toward `center` when true, toward `outer` when
    /// false.
    pub taper_to_center: bool,
    /// Scale of the mirrored half; only the s-curve family reads this.
    pub size_ratio: f32,
}

impl Spiral {
    pub fn radius(&self) -> f32 {
        self.outer.distance(self.center)
    }

    pub fn set_coils(&mut self, coils: f32) {
        self.coils = coils.clamp(MIN_COILS, MAX_COILS);
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.outer_thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    pub fn set_size_ratio(&mut self, ratio: f32) {
        self.size_ratio = ratio.clamp(MIN_SIZE_RATIO, MAX_SIZE_RATIO);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.outer += delta;
        self.center += delta;
    }
}
