use approx::assert_abs_diff_eq;
use egui::pos2;
use spiral_sketch::curves::{
    TAPER_SEGMENTS, coils_for_size, curve_param_at, point_at_param, sample_curve,
    sample_curve_raw, tapered_segments, thickness_at,
};
use spiral_sketch::spiral::{Spiral, SpiralId, SpiralKind};

fn spiral(kind: SpiralKind) -> Spiral {
    Spiral {
        id: SpiralId::next(),
        outer: pos2(100.0, 0.0),
        outer_thickness: 10.0,
        center: pos2(0.0, 0.0),
        clockwise: true,
        coils: 3.0,
        kind,
        taper_to_center: true,
        size_ratio: 1.0,
    }
}

const ALL_KINDS: [SpiralKind; 6] = [
    SpiralKind::Line,
    SpiralKind::Logarithmic,
    SpiralKind::Archimedes,
    SpiralKind::Hyperbolic,
    SpiralKind::Fermat,
    SpiralKind::SCurve,
];

#[test]
fn degenerate_input_yields_no_points() {
    for kind in ALL_KINDS {
        let mut s = spiral(kind);
        s.coils = 0.0;
        assert!(sample_curve(&s).is_empty(), "{kind:?} with zero coils");

        let mut s = spiral(kind);
        s.center = s.outer;
        assert!(
            sample_curve(&s).is_empty(),
            "{kind:?} with coincident endpoints"
        );
    }
}

#[test]
fn line_is_just_its_two_endpoints() {
    let s = spiral(SpiralKind::Line);
    assert_eq!(sample_curve(&s), vec![s.outer, s.center]);
}

#[test]
fn sample_count_follows_coil_count() {
    for kind in [
        SpiralKind::Logarithmic,
        SpiralKind::Archimedes,
        SpiralKind::Hyperbolic,
        SpiralKind::Fermat,
    ] {
        let samples = sample_curve(&spiral(kind));
        assert_eq!(samples.len(), 301, "{kind:?}");
        assert!(samples.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
    // Fractional coil counts round the step count up.
    let mut s = spiral(SpiralKind::Archimedes);
    s.coils = 2.5;
    assert_eq!(sample_curve(&s).len(), 251);
}

#[test]
fn s_curve_has_two_mirrored_halves() {
    let samples = sample_curve(&spiral(SpiralKind::SCurve));
    assert_eq!(samples.len(), 602);
}

#[test]
fn s_curve_second_half_collapses_at_zero_ratio() {
    let mut s = spiral(SpiralKind::SCurve);
    s.size_ratio = 0.0;
    let samples = sample_curve(&s);
    for p in &samples[301..] {
        assert_abs_diff_eq!(p.x, s.center.x, epsilon = 1e-3);
        assert_abs_diff_eq!(p.y, s.center.y, epsilon = 1e-3);
    }
}

#[test]
fn logarithmic_runs_from_outer_toward_center() {
    let s = spiral(SpiralKind::Logarithmic);
    let samples = sample_curve(&s);
    let first = samples[0];
    let last = *samples.last().unwrap();
    assert_abs_diff_eq!(first.x, s.outer.x, epsilon = 1e-2);
    assert_abs_diff_eq!(first.y, s.outer.y, epsilon = 1e-2);
    // The innermost sample sits at unit radius, not exactly on the center.
    assert_abs_diff_eq!(last.distance(s.center), 1.0, epsilon = 1e-2);
}

#[test]
fn archimedes_and_fermat_run_from_center_toward_outer() {
    for kind in [SpiralKind::Archimedes, SpiralKind::Fermat] {
        let s = spiral(kind);
        let samples = sample_curve(&s);
        let first = samples[0];
        let last = *samples.last().unwrap();
        assert_abs_diff_eq!(first.x, s.center.x, epsilon = 1e-2);
        assert_abs_diff_eq!(first.y, s.center.y, epsilon = 1e-2);
        assert_abs_diff_eq!(last.x, s.outer.x, epsilon = 1e-2);
        assert_abs_diff_eq!(last.y, s.outer.y, epsilon = 1e-2);
    }
}

#[test]
fn hyperbolic_outermost_sample_reaches_full_radius() {
    let s = spiral(SpiralKind::Hyperbolic);
    let samples = sample_curve(&s);
    let radius = s.radius();
    // Innermost sample sits at r / (1 + scale), outermost at r.
    assert_abs_diff_eq!(samples[0].distance(s.center), radius / 6.0, epsilon = 1e-2);
    assert_abs_diff_eq!(
        samples.last().unwrap().distance(s.center),
        radius,
        epsilon = 1e-2
    );
}

#[test]
fn negative_coils_flip_the_winding() {
    for kind in [
        SpiralKind::Logarithmic,
        SpiralKind::Archimedes,
        SpiralKind::Fermat,
    ] {
        let flipped = sample_curve_raw(pos2(100.0, 0.0), pos2(0.0, 0.0), true, -3.0, kind, 1.0);
        let reversed = sample_curve_raw(pos2(100.0, 0.0), pos2(0.0, 0.0), false, 3.0, kind, 1.0);
        assert_eq!(flipped.len(), reversed.len(), "{kind:?}");
        for (a, b) in flipped.iter().zip(&reversed) {
            assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
            assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
        }
    }
}

#[test]
fn taper_produces_fixed_segment_count() {
    let mut s = spiral(SpiralKind::Logarithmic);
    s.outer = pos2(150.0, 0.0);
    let segments = tapered_segments(&s, 10.0);
    assert_eq!(segments.len(), TAPER_SEGMENTS);
    assert!(segments.iter().all(|seg| seg.points.len() >= 2));
}

#[test]
fn taper_thins_toward_the_center() {
    // 150 px keeps the size factor at its floor of 1.
    let mut s = spiral(SpiralKind::Logarithmic);
    s.outer = pos2(150.0, 0.0);
    let segments = tapered_segments(&s, 10.0);
    assert_abs_diff_eq!(segments[0].thickness, 10.5, epsilon = 1e-3);
    assert_abs_diff_eq!(
        segments.last().unwrap().thickness,
        10.0 * (1.0 / TAPER_SEGMENTS as f32) + 0.5,
        epsilon = 1e-3
    );
    for pair in segments.windows(2) {
        assert!(pair[0].thickness > pair[1].thickness);
    }
}

#[test]
fn taper_direction_flips_with_the_flag() {
    let mut s = spiral(SpiralKind::Logarithmic);
    s.outer = pos2(150.0, 0.0);
    s.taper_to_center = false;
    let segments = tapered_segments(&s, 10.0);
    for pair in segments.windows(2) {
        assert!(pair[0].thickness < pair[1].thickness);
    }
}

#[test]
fn taper_rejects_near_zero_spirals() {
    let mut s = spiral(SpiralKind::Logarithmic);
    s.outer = pos2(0.05, 0.0);
    assert!(tapered_segments(&s, 10.0).is_empty());
}

#[test]
fn short_spirals_taper_more_sharply() {
    // 50 px doubles the size factor, steepening the power falloff.
    let mut long = spiral(SpiralKind::Logarithmic);
    long.outer = pos2(200.0, 0.0);
    let mut short = spiral(SpiralKind::Logarithmic);
    short.outer = pos2(50.0, 0.0);

    let long_mid = &tapered_segments(&long, 10.0)[TAPER_SEGMENTS / 2];
    let short_mid = &tapered_segments(&short, 10.0)[TAPER_SEGMENTS / 2];
    assert!(short_mid.thickness < long_mid.thickness);
}

#[test]
fn coil_count_scales_with_gesture_size() {
    assert_abs_diff_eq!(coils_for_size(50.0, 3.0), 1.5);
    assert_abs_diff_eq!(coils_for_size(125.0, 3.0), 2.25);
    assert_abs_diff_eq!(coils_for_size(200.0, 3.0), 3.0);
    // Clamped at both ends of the band.
    assert_abs_diff_eq!(coils_for_size(10.0, 3.0), 1.5);
    assert_abs_diff_eq!(coils_for_size(1000.0, 3.0), 3.0);
}

#[test]
fn thickness_at_the_outer_point_is_the_base_width() {
    let s = spiral(SpiralKind::Logarithmic);
    assert_abs_diff_eq!(thickness_at(&s, s.outer, 99.0), 10.0, epsilon = 1e-3);
}

#[test]
fn thickness_falls_back_when_the_spiral_has_no_width() {
    let mut s = spiral(SpiralKind::Logarithmic);
    s.outer_thickness = 0.0;
    assert_abs_diff_eq!(thickness_at(&s, s.outer, 7.0), 7.0, epsilon = 1e-3);
}

#[test]
fn curve_param_round_trips_through_point_lookup() {
    let s = spiral(SpiralKind::Logarithmic);
    let midpoint = point_at_param(&s, 0.5).unwrap();
    let t = curve_param_at(&s, midpoint);
    assert_abs_diff_eq!(t, 0.5, epsilon = 0.01);
}

#[test]
fn point_at_param_clamps_and_handles_degenerates() {
    let s = spiral(SpiralKind::Logarithmic);
    assert_eq!(point_at_param(&s, -1.0), point_at_param(&s, 0.0));
    assert_eq!(point_at_param(&s, 2.0), point_at_param(&s, 1.0));

    let mut degenerate = s.clone();
    degenerate.coils = 0.0;
    assert_eq!(point_at_param(&degenerate, 0.5), None);
}
