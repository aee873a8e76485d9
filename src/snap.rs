//! Nearest-point snap search across guide lines, endpoints and curve
//! points. Plain Euclidean distance decides ties; the closest eligible
//! candidate wins regardless of category.

use egui::Pos2;
use log::trace;
use std::f32::consts::{PI, TAU};

use crate::curves;
use crate::geometry::{distance_to_segment, extend_line, reflect_across_line};
use crate::settings::ToolSettings;
use crate::spiral::{Spiral, SpiralId};

/// Factor by which the parent's radial vector is stretched into a guide
/// probe line.
const GUIDE_EXTENSION: f32 = 100.0;

/// A resolved snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    pub point: Pos2,
    pub spiral: SpiralId,
    /// Curve parameter of the hit, present for endpoint and curve matches
    /// but not for guide-line matches (those points are off-curve).
    pub t: Option<f32>,
    /// Parent-local stroke width at the hit, for endpoint and curve
    /// matches.
    pub thickness: Option<f32>,
}

/// Context for one snap query.
pub struct SnapQuery<'a> {
    pub spirals: &'a [Spiral],
    pub settings: &'a ToolSettings,
    /// Spiral the in-flight gesture started on, if any. Its guide lines are
    /// considered and its own curve is skipped.
    pub active_parent: Option<&'a Spiral>,
    /// Where the in-flight gesture started; anchors the guide lines.
    pub gesture_start: Option<Pos2>,
    /// Spirals that must not be snapped to (the dragged spiral and its
    /// descendants).
    pub exclude: &'a [SpiralId],
    /// True when resolving the very first point of a gesture; widens the
    /// curve-proximity radius to `center_snap_radius`.
    pub initial: bool,
}

impl<'a> SnapQuery<'a> {
    pub fn new(spirals: &'a [Spiral], settings: &'a ToolSettings) -> Self {
        Self {
            spirals,
            settings,
            active_parent: None,
            gesture_start: None,
            exclude: &[],
            initial: false,
        }
    }
}

/// The radial guide line from `start` through the parent's center,
/// stretched into a probe, plus its mirror image across the parent's local
/// tangent at `start`. `None` when the parent is degenerate.
pub fn guide_lines(parent: &Spiral, start: Pos2) -> Option<[(Pos2, Pos2); 2]> {
    let v = start - parent.center;
    let r = v.length();
    if r <= 0.0 || parent.coils == 0.0 {
        return None;
    }

    let base_angle = v.y.atan2(v.x);
    let growth = r.ln() / (TAU * parent.coils);
    let sign: f32 = if parent.clockwise { 1.0 } else { -1.0 };
    // True spiral tangent at this radius, from the logarithmic growth rate.
    let tangent_angle = base_angle + sign * (PI / 2.0 + growth.atan());

    let (a, b) = extend_line(start, parent.center, GUIDE_EXTENSION);
    let mirrored = (
        reflect_across_line(a, start, tangent_angle),
        reflect_across_line(b, start, tangent_angle),
    );
    Some([(a, b), mirrored])
}

/// Finds the closest eligible snap target for `cursor`, or `None` when
/// snapping is disabled or nothing lies within radius. The caller treats
/// `None` as free placement.
pub fn find_snap_point(cursor: Pos2, query: &SnapQuery<'_>) -> Option<SnapHit> {
    if !query.settings.snapping_enabled {
        return None;
    }

    let endpoint_radius = query.settings.endpoint_snap_radius;
    let mut best_dist = f32::INFINITY;
    let mut best: Option<SnapHit> = None;

    // The active parent's guide lines come first so a continued stroke can
    // leave the parent along its radial or tangent-mirrored direction.
    if let (Some(parent), Some(start)) = (query.active_parent, query.gesture_start) {
        if let Some(lines) = guide_lines(parent, start) {
            for (a, b) in lines {
                let proj = distance_to_segment(cursor, a, b);
                if proj.distance <= endpoint_radius && proj.distance < best_dist {
                    best_dist = proj.distance;
                    best = Some(SnapHit {
                        point: proj.point,
                        spiral: parent.id,
                        t: None,
                        thickness: None,
                    });
                }
            }
        }
    }

    for spiral in query.spirals {
        if query.exclude.contains(&spiral.id) {
            continue;
        }
        // Skip the parent mid-gesture so a child cannot immediately
        // reattach to the spiral it grows out of.
        if query.active_parent.is_some_and(|p| p.id == spiral.id) {
            continue;
        }

        for end in [spiral.outer, spiral.center] {
            let dist = cursor.distance(end);
            if dist <= endpoint_radius && dist < best_dist {
                best_dist = dist;
                best = Some(SnapHit {
                    point: end,
                    spiral: spiral.id,
                    t: Some(curves::curve_param_at(spiral, end)),
                    thickness: Some(curves::thickness_at(
                        spiral,
                        end,
                        query.settings.line_thickness,
                    )),
                });
            }
        }

        // A gesture may start loosely on a spiral's body, so the first
        // point of a gesture gets the wider radius along the curve.
        let segment_radius = if query.initial {
            query.settings.center_snap_radius
        } else {
            endpoint_radius
        };
        let samples = curves::sample_curve(spiral);
        for (i, pair) in samples.windows(2).enumerate() {
            let proj = distance_to_segment(cursor, pair[0], pair[1]);
            if proj.distance <= segment_radius && proj.distance < best_dist {
                best_dist = proj.distance;
                let t = (i as f32 + proj.t) / (samples.len() - 1) as f32;
                best = Some(SnapHit {
                    point: proj.point,
                    spiral: spiral.id,
                    t: Some(t),
                    thickness: Some(curves::thickness_at(
                        spiral,
                        proj.point,
                        query.settings.line_thickness,
                    )),
                });
            }
        }
    }

    if let Some(hit) = &best {
        trace!(
            "snap: cursor {:?} -> {:?} on {:?} (dist {:.2})",
            cursor, hit.point, hit.spiral, best_dist
        );
    }
    best
}
