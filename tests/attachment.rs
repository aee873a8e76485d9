use approx::assert_abs_diff_eq;
use egui::{Pos2, pos2};
use spiral_sketch::attachment::{Attachment, AttachmentGraph, relative_angle};
use spiral_sketch::curves::point_at_param;
use spiral_sketch::spiral::{Spiral, SpiralId, SpiralKind};

fn spiral_at(outer: Pos2, center: Pos2) -> Spiral {
    Spiral {
        id: SpiralId::next(),
        outer,
        outer_thickness: 10.0,
        center,
        clockwise: true,
        coils: 3.0,
        kind: SpiralKind::Logarithmic,
        taper_to_center: true,
        size_ratio: 1.0,
    }
}

fn edge(child: SpiralId, parent: SpiralId) -> Attachment {
    Attachment {
        child,
        parent,
        t: 0.5,
        angle: 0.0,
    }
}

#[test]
fn a_child_holds_at_most_one_edge() {
    let (a, b, c) = (SpiralId::next(), SpiralId::next(), SpiralId::next());
    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(edge(a, b));
    graph.register_or_replace(edge(a, c));

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.parent_of(a).unwrap().parent, c);
}

#[test]
fn detach_removes_and_returns_the_edge() {
    let (a, b) = (SpiralId::next(), SpiralId::next());
    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(edge(a, b));

    let removed = graph.detach(a).expect("edge existed");
    assert_eq!(removed.parent, b);
    assert!(graph.is_empty());
    assert!(graph.detach(a).is_none());
}

#[test]
fn descendants_walk_the_whole_subtree() {
    let ids: Vec<SpiralId> = (0..4).map(|_| SpiralId::next()).collect();
    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(edge(ids[1], ids[0]));
    graph.register_or_replace(edge(ids[2], ids[1]));
    graph.register_or_replace(edge(ids[3], ids[0]));

    let descendants = graph.descendants_of(ids[0]);
    assert_eq!(descendants.len(), 3);
    assert!(!descendants.contains(&ids[0]));
    assert!(graph.descendants_of(ids[2]).is_empty());
}

#[test]
fn descendants_terminate_on_a_cycle() {
    let (a, b) = (SpiralId::next(), SpiralId::next());
    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(edge(b, a));
    graph.register_or_replace(edge(a, b));

    let descendants = graph.descendants_of(a);
    assert_eq!(descendants.len(), 1);
    assert!(descendants.contains(&b));
}

#[test]
fn children_follow_the_parents_curve_not_its_translation() {
    let mut parent = spiral_at(pos2(200.0, 0.0), pos2(0.0, 0.0));
    let attach = point_at_param(&parent, 0.5).unwrap();
    let mut child = spiral_at(attach, attach + egui::vec2(30.0, 0.0));
    child.coils = 2.0;
    let stored_angle = relative_angle(&parent, attach, &child);

    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(Attachment {
        child: child.id,
        parent: parent.id,
        t: 0.5,
        angle: stored_angle,
    });

    let old_outer = child.outer;
    let mut spirals = vec![parent.clone(), child.clone()];

    // Reshape the parent by its outer point; the center pin stays put.
    spirals[0].outer = pos2(260.0, 40.0);
    graph.propagate(parent.id, &mut spirals);
    parent = spirals[0].clone();
    child = spirals[1].clone();

    let new_attach = point_at_param(&parent, 0.5).unwrap();
    assert_abs_diff_eq!(child.outer.x, new_attach.x, epsilon = 1e-3);
    assert_abs_diff_eq!(child.outer.y, new_attach.y, epsilon = 1e-3);

    // Rigid translation by the outer point's delta would land elsewhere:
    // the pin rides the reshaped curve.
    let translated = old_outer + egui::vec2(60.0, 40.0);
    assert!(child.outer.distance(translated) > 1.0);

    // Size and relative orientation survive the move.
    assert_abs_diff_eq!(child.radius(), 30.0, epsilon = 1e-2);
    assert_abs_diff_eq!(
        relative_angle(&parent, new_attach, &child),
        stored_angle,
        epsilon = 1e-3
    );
}

#[test]
fn propagation_cascades_through_grandchildren() {
    let mut parent = spiral_at(pos2(200.0, 0.0), pos2(0.0, 0.0));
    let attach = point_at_param(&parent, 0.25).unwrap();
    let child = spiral_at(attach, attach + egui::vec2(40.0, 10.0));
    let child_attach = point_at_param(&child, 0.5).unwrap();
    let grandchild = spiral_at(child_attach, child_attach + egui::vec2(15.0, 0.0));

    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(Attachment {
        child: child.id,
        parent: parent.id,
        t: 0.25,
        angle: relative_angle(&parent, attach, &child),
    });
    graph.register_or_replace(Attachment {
        child: grandchild.id,
        parent: child.id,
        t: 0.5,
        angle: relative_angle(&child, child_attach, &grandchild),
    });

    let mut spirals = vec![parent.clone(), child.clone(), grandchild.clone()];
    spirals[0].outer = pos2(150.0, 120.0);
    graph.propagate(parent.id, &mut spirals);
    parent = spirals[0].clone();

    let new_attach = point_at_param(&parent, 0.25).unwrap();
    assert_abs_diff_eq!(spirals[1].outer.x, new_attach.x, epsilon = 1e-3);
    assert_abs_diff_eq!(spirals[1].outer.y, new_attach.y, epsilon = 1e-3);

    let new_child_attach = point_at_param(&spirals[1], 0.5).unwrap();
    assert_abs_diff_eq!(spirals[2].outer.x, new_child_attach.x, epsilon = 1e-3);
    assert_abs_diff_eq!(spirals[2].outer.y, new_child_attach.y, epsilon = 1e-3);
}

#[test]
fn a_degenerate_parent_leaves_its_child_in_place() {
    let mut parent = spiral_at(pos2(200.0, 0.0), pos2(0.0, 0.0));
    parent.coils = 0.0;
    let child = spiral_at(pos2(50.0, 50.0), pos2(90.0, 50.0));

    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(Attachment {
        child: child.id,
        parent: parent.id,
        t: 0.5,
        angle: 0.0,
    });

    let mut spirals = vec![parent.clone(), child.clone()];
    graph.propagate(parent.id, &mut spirals);
    assert_eq!(spirals[1], child);
}

#[test]
fn propagation_terminates_on_a_cycle() {
    let a = spiral_at(pos2(100.0, 0.0), pos2(0.0, 0.0));
    let b = spiral_at(pos2(100.0, 100.0), pos2(0.0, 100.0));

    let mut graph = AttachmentGraph::new();
    graph.register_or_replace(Attachment {
        child: b.id,
        parent: a.id,
        t: 0.5,
        angle: 0.0,
    });
    graph.register_or_replace(Attachment {
        child: a.id,
        parent: b.id,
        t: 0.5,
        angle: 0.0,
    });

    let mut spirals = vec![a, b];
    // Must return rather than recurse forever.
    graph.propagate(spirals[0].id, &mut spirals);
}

#[test]
fn relative_angle_is_normalized() {
    let parent = spiral_at(pos2(100.0, 0.0), pos2(0.0, 0.0));
    let attach = pos2(100.0, 0.0);
    for center in [
        pos2(140.0, 0.0),
        pos2(100.0, 40.0),
        pos2(60.0, 0.0),
        pos2(100.0, -40.0),
    ] {
        let child = spiral_at(attach, center);
        let angle = relative_angle(&parent, attach, &child);
        assert!((-std::f32::consts::PI..std::f32::consts::PI).contains(&angle));
    }
}
