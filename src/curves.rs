//! Polyline synthesis for the six curve families, plus the tapering model
//! and the curve-parameter lookups used by snapping and attachments.

use egui::{Pos2, pos2};
use std::f32::consts::{PI, TAU};

use crate::geometry::distance_to_segment;
use crate::spiral::{Spiral, SpiralKind};

/// Fixed sampling resolution: every full coil contributes this many steps.
pub const SAMPLES_PER_COIL: f32 = 100.0;
/// Number of constant-thickness chunks a tapered stroke is split into.
pub const TAPER_SEGMENTS: usize = 50;

/// How quickly the hyperbolic family tightens toward its center.
const HYPERBOLIC_SCALE: f32 = 5.0;
/// Below this control-point distance the taper model degenerates.
const MIN_TAPER_DISTANCE: f32 = 0.1;

/// Distance band over which a new spiral's coil count scales from half the
/// configured default up to the full default.
const COIL_SIZE_MIN_DISTANCE: f32 = 50.0;
const COIL_SIZE_MAX_DISTANCE: f32 = 200.0;

/// A run of consecutive curve samples rendered at one stroke width.
#[derive(Debug, Clone, PartialEq)]
pub struct TaperedSegment {
    pub points: Vec<Pos2>,
    pub thickness: f32,
}

/// Samples the spiral's curve as a polyline.
///
/// Returns an empty vector for degenerate input (`coils == 0` or coincident
/// control points), where the growth factor would be undefined. Non-finite
/// samples are filtered out.
///
/// Sample direction is family-dependent: logarithmic, hyperbolic and
/// s-curve start at the `outer` side, archimedes and fermat start at
/// `center`. Attachment parameters index into this exact ordering.
pub fn sample_curve(spiral: &Spiral) -> Vec<Pos2> {
    sample_curve_raw(
        spiral.outer,
        spiral.center,
        spiral.clockwise,
        spiral.coils,
        spiral.kind,
        spiral.size_ratio,
    )
}

pub fn sample_curve_raw(
    outer: Pos2,
    center: Pos2,
    clockwise: bool,
    coils: f32,
    kind: SpiralKind,
    size_ratio: f32,
) -> Vec<Pos2> {
    let delta = outer - center;
    let distance = delta.length();
    if coils == 0.0 || distance == 0.0 {
        return Vec::new();
    }

    let abs_coils = coils.abs();
    let steps = (SAMPLES_PER_COIL * abs_coils).ceil() as usize;
    let base_angle = delta.y.atan2(delta.x);
    // Negative coil counts are equivalent to flipping the winding.
    let winding = if coils >= 0.0 { clockwise } else { !clockwise };
    let dir: f32 = if winding { 1.0 } else { -1.0 };

    let mut points = Vec::with_capacity(steps + 1);
    match kind {
        SpiralKind::Line => {
            points.push(outer);
            points.push(center);
        }
        SpiralKind::Logarithmic => {
            let growth = distance.ln() / (TAU * abs_coils);
            for i in (0..=steps).rev() {
                let t = i as f32 / steps as f32;
                let radius = (TAU * abs_coils * t * growth).exp();
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t);
                points.push(pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }
        }
        SpiralKind::Archimedes => {
            // Linear growth (r = a*t), sampled center-first.
            for i in (0..=steps).rev() {
                let t = 1.0 - i as f32 / steps as f32;
                let radius = distance * t;
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t);
                points.push(pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }
        }
        SpiralKind::Hyperbolic => {
            // 1/r spiral with a fixed outer point. Winding here follows the
            // raw clockwise flag; negative coils do not flip it.
            let dir: f32 = if clockwise { -1.0 } else { 1.0 };
            for i in (0..=steps).rev() {
                let t = i as f32 / steps as f32;
                let radius = distance / (1.0 + HYPERBOLIC_SCALE * t);
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t);
                points.push(pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }
        }
        SpiralKind::Fermat => {
            // Square-root growth (r = a*sqrt(t)), sampled center-first.
            for i in (0..=steps).rev() {
                let t = 1.0 - i as f32 / steps as f32;
                let radius = distance * t.sqrt();
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t);
                points.push(pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }
        }
        SpiralKind::SCurve => {
            // Two mirrored logarithmic halves: the first anchored at the
            // outer point and rotated half a turn, the second reflected
            // through the center point and scaled by the size ratio.
            let growth = distance.ln() / (TAU * abs_coils);
            points.reserve(steps + 1);
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let radius = distance * (TAU * abs_coils * (t - 1.0) * growth).exp();
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t) + PI;
                points.push(pos2(
                    outer.x + radius * angle.cos(),
                    outer.y + radius * angle.sin(),
                ));
            }
            for i in (0..=steps).rev() {
                let t = i as f32 / steps as f32;
                let radius = distance * (TAU * abs_coils * (t - 1.0) * growth).exp();
                let angle = base_angle + dir * TAU * abs_coils * (1.0 - t) + PI;
                let base = pos2(
                    outer.x + radius * angle.cos(),
                    outer.y + radius * angle.sin(),
                );
                let v = base - center;
                points.push(pos2(
                    center.x - v.x * size_ratio,
                    center.y - v.y * size_ratio,
                ));
            }
        }
    }

    points.retain(|p| p.x.is_finite() && p.y.is_finite());
    points
}

/// Splits the sampled curve into [`TAPER_SEGMENTS`] chunks with a stroke
/// width per chunk.
///
/// Chunk thickness is `base * taper_t^size_factor + 0.5`, where
/// `size_factor = max(1, 100/d)` makes short spirals taper more sharply
/// than long ones.
pub fn tapered_segments(spiral: &Spiral, base_thickness: f32) -> Vec<TaperedSegment> {
    let distance = spiral.radius();
    if distance < MIN_TAPER_DISTANCE {
        return Vec::new();
    }

    let winding = if spiral.coils >= 0.0 {
        spiral.clockwise
    } else {
        !spiral.clockwise
    };
    let samples = sample_curve_raw(
        spiral.outer,
        spiral.center,
        winding,
        spiral.coils.abs(),
        spiral.kind,
        spiral.size_ratio,
    );
    if samples.len() < 2 {
        return Vec::new();
    }

    let size_factor = (100.0 / distance).max(1.0);
    let last = samples.len() - 1;

    let mut segments = Vec::with_capacity(TAPER_SEGMENTS);
    for i in (1..=TAPER_SEGMENTS).rev() {
        let chunk_start = (i - 1) * samples.len() / TAPER_SEGMENTS;
        let chunk_end = (i * samples.len() / TAPER_SEGMENTS).min(last);
        if chunk_start > chunk_end {
            continue;
        }

        let progress = i as f32 / TAPER_SEGMENTS as f32;
        let taper_t = if spiral.taper_to_center {
            progress
        } else {
            1.0 - progress
        };
        let thickness = base_thickness * taper_t.powf(size_factor) + 0.5;

        segments.push(TaperedSegment {
            points: samples[chunk_start..=chunk_end].to_vec(),
            thickness,
        });
    }

    segments
}

/// Stroke width of `spiral` at an arbitrary point assumed to lie on its
/// curve.
///
/// Interpolates from the outer thickness by polar angle and radius relative
/// to the spiral's center, folding the angle difference into the winding
/// direction. This is how a child spiral inherits the parent's local width
/// at its attachment point instead of the parent's endpoint width.
pub fn thickness_at(spiral: &Spiral, point: Pos2, fallback: f32) -> f32 {
    let v = point - spiral.center;
    let point_radius = v.length();
    let outer_v = spiral.outer - spiral.center;
    let max_radius = outer_v.length();
    if max_radius == 0.0 {
        return fallback;
    }

    let point_angle = v.y.atan2(v.x);
    let base_angle = outer_v.y.atan2(outer_v.x);

    let mut angle_diff = point_angle - base_angle;
    if spiral.clockwise {
        if angle_diff > 0.0 {
            angle_diff -= TAU;
        }
    } else if angle_diff < 0.0 {
        angle_diff += TAU;
    }

    let base = if spiral.outer_thickness > 0.0 {
        spiral.outer_thickness
    } else {
        fallback
    };
    base * (angle_diff / TAU).exp() * (point_radius / max_radius)
}

/// Coil count for a freshly drawn spiral of the given control-point
/// distance: half the configured default at 50 px or less, ramping linearly
/// to the full default at 200 px.
pub fn coils_for_size(distance: f32, default_coils: f32) -> f32 {
    let min_coils = default_coils * 0.5;
    let span = ((distance - COIL_SIZE_MIN_DISTANCE)
        / (COIL_SIZE_MAX_DISTANCE - COIL_SIZE_MIN_DISTANCE))
        .clamp(0.0, 1.0);
    min_coils + (default_coils - min_coils) * span
}

/// Normalized curve parameter of the sample segment closest to `point`,
/// refined by the intra-segment projection fraction.
pub fn curve_param_at(spiral: &Spiral, point: Pos2) -> f32 {
    let samples = sample_curve(spiral);
    if samples.len() < 2 {
        return 0.0;
    }

    let mut best_dist = f32::INFINITY;
    let mut best_t = 0.0;
    for i in 0..samples.len() - 1 {
        let proj = distance_to_segment(point, samples[i], samples[i + 1]);
        if proj.distance < best_dist {
            best_dist = proj.distance;
            best_t = (i as f32 + proj.t) / (samples.len() - 1) as f32;
        }
    }
    best_t
}

/// Curve point at normalized parameter `t`, or `None` when the curve is
/// degenerate.
pub fn point_at_param(spiral: &Spiral, t: f32) -> Option<Pos2> {
    let samples = sample_curve(spiral);
    if samples.is_empty() {
        return None;
    }
    let last = samples.len() - 1;
    let index = (t.clamp(0.0, 1.0) * last as f32).round() as usize;
    samples.get(index.min(last)).copied()
}
