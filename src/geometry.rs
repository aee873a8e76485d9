use egui::{Pos2, pos2};

/// Result of projecting a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Euclidean distance from the query point to the projected point.
    pub distance: f32,
    /// The projected point, clamped to the segment.
    pub point: Pos2,
    /// Fraction along the segment (0 at `start`, 1 at `end`).
    pub t: f32,
}

/// Perpendicular projection of `point` onto the segment `[start, end]`,
/// clamped to the segment. A zero-length segment falls back to the plain
/// distance to `start`.
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> SegmentProjection {
    let dir = end - start;
    let len2 = dir.x * dir.x + dir.y * dir.y;

    if len2 == 0.0 {
        return SegmentProjection {
            distance: point.distance(start),
            point: start,
            t: 0.0,
        };
    }

    let t = ((point - start).dot(dir) / len2).clamp(0.0, 1.0);
    let projected = start + dir * t;

    SegmentProjection {
        distance: point.distance(projected),
        point: projected,
        t,
    }
}

/// Scales the segment `[start, end]` around its own midpoint so its length
/// is multiplied by `factor`. Used to turn a finite radial vector into a
/// long probe line for snap guides.
pub fn extend_line(start: Pos2, end: Pos2, factor: f32) -> (Pos2, Pos2) {
    let dir = end - start;
    let half = (factor - 1.0) / 2.0;
    (start - dir * half, end + dir * half)
}

/// Reflects `point` across the line through `origin` at `line_angle`
/// radians. Applying it twice returns the original point.
pub fn reflect_across_line(point: Pos2, origin: Pos2, line_angle: f32) -> Pos2 {
    let v = point - origin;
    let (sin2, cos2) = (2.0 * line_angle).sin_cos();
    pos2(
        origin.x + v.x * cos2 + v.y * sin2,
        origin.y + v.x * sin2 - v.y * cos2,
    )
}
