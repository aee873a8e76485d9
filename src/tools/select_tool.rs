//! Select-tool state: current selection, hover feedback, and the
//! endpoint-drag gesture (idle -> dragging -> committed).

use egui::Pos2;
use log::debug;

use crate::attachment::{self, Attachment};
use crate::curves;
use crate::document::Document;
use crate::geometry::distance_to_segment;
use crate::settings::ToolSettings;
use crate::snap::{SnapQuery, find_snap_point};
use crate::spiral::{Spiral, SpiralId};

/// Which control point of a spiral is being grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPoint {
    Outer,
    Center,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub spiral: SpiralId,
    /// Some when an endpoint handle was grabbed, None for a body hit.
    pub end: Option<EndPoint>,
}

/// Pointer-down hit test: endpoint handles of the selected spiral win,
/// then the topmost spiral whose curve passes within `radius`.
pub fn hit_test(
    point: Pos2,
    spirals: &[Spiral],
    selected: Option<SpiralId>,
    radius: f32,
) -> Option<HitTarget> {
    if let Some(sel) = selected.and_then(|id| spirals.iter().find(|s| s.id == id)) {
        if point.distance(sel.outer) <= radius {
            return Some(HitTarget {
                spiral: sel.id,
                end: Some(EndPoint::Outer),
            });
        }
        if point.distance(sel.center) <= radius {
            return Some(HitTarget {
                spiral: sel.id,
                end: Some(EndPoint::Center),
            });
        }
    }

    for spiral in spirals.iter().rev() {
        let samples = curves::sample_curve(spiral);
        for pair in samples.windows(2) {
            if distance_to_segment(point, pair[0], pair[1]).distance <= radius {
                return Some(HitTarget {
                    spiral: spiral.id,
                    end: None,
                });
            }
        }
    }

    None
}

#[derive(Debug, Clone, Copy, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging { id: SpiralId, end: EndPoint },
}

#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    selected: Option<SpiralId>,
    hovered_end: Option<EndPoint>,
    state: DragState,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<SpiralId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<SpiralId>) {
        self.selected = id;
    }

    pub fn hovered_end(&self) -> Option<EndPoint> {
        self.hovered_end
    }

    /// Hover feedback over the selected spiral's endpoint handles.
    pub fn update_hover(&mut self, point: Pos2, spirals: &[Spiral], radius: f32) {
        let Some(sel) = self.selected.and_then(|id| spirals.iter().find(|s| s.id == id)) else {
            self.hovered_end = None;
            return;
        };
        self.hovered_end = if point.distance(sel.outer) <= radius {
            Some(EndPoint::Outer)
        } else if point.distance(sel.center) <= radius {
            Some(EndPoint::Center)
        } else if self.is_dragging() {
            self.hovered_end
        } else {
            None
        };
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn begin_drag(&mut self, id: SpiralId, end: EndPoint) {
        self.selected = Some(id);
        self.state = DragState::Dragging { id, end };
    }

    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }

    /// Moves the grabbed endpoint to `point` and cascades the change.
    ///
    /// An outer drag translates the spiral rigidly and may re-snap it onto
    /// a new parent; snapping onto the spiral's own descendants is refused
    /// so the graph stays acyclic. An outer drag that lands unsnapped
    /// detaches the spiral from its parent. A center drag reorients the
    /// spiral in place and refreshes its stored attachment angle (the outer
    /// pin still holds).
    ///
    /// Descendants are recomputed on a copy of the spiral set which is
    /// swapped in whole once propagation finishes.
    pub fn update_drag(&mut self, point: Pos2, document: &mut Document, settings: &ToolSettings) {
        let DragState::Dragging { id, end } = self.state else {
            return;
        };
        if document.spiral(id).is_none() {
            return;
        }

        match end {
            EndPoint::Center => self.drag_center(id, point, document),
            EndPoint::Outer => self.drag_outer(id, point, document, settings),
        }
    }

    fn drag_center(&mut self, id: SpiralId, point: Pos2, document: &mut Document) {
        let mut updated = document.spirals().to_vec();
        let Some(spiral) = updated.iter_mut().find(|s| s.id == id) else {
            return;
        };
        spiral.center = point;
        let moved = spiral.clone();

        // The outer pin is unaffected, but the child's orientation changed;
        // refresh the stored relative angle so the next parent move keeps
        // this new orientation.
        if let Some(edge) = document.attachments().parent_of(id).copied() {
            if let Some(parent) = updated.iter().find(|s| s.id == edge.parent) {
                if let Some(attach_point) = curves::point_at_param(parent, edge.t) {
                    let angle = attachment::relative_angle(parent, attach_point, &moved);
                    document.attachments_mut().set_angle(id, angle);
                }
            }
        }

        document.attachments().propagate(id, &mut updated);
        document.replace_spirals(updated);
    }

    fn drag_outer(
        &mut self,
        id: SpiralId,
        point: Pos2,
        document: &mut Document,
        settings: &ToolSettings,
    ) {
        // The dragged spiral and everything hanging off it are not valid
        // snap targets; reattaching inside the subtree would cycle.
        let mut exclude: Vec<SpiralId> = vec![id];
        exclude.extend(document.attachments().descendants_of(id));

        let query = SnapQuery {
            exclude: &exclude,
            ..SnapQuery::new(document.spirals(), settings)
        };
        let hit = find_snap_point(point, &query);
        let target = hit.map_or(point, |h| h.point);

        let mut updated = document.spirals().to_vec();
        let Some(spiral) = updated.iter_mut().find(|s| s.id == id) else {
            return;
        };
        let delta = target - spiral.outer;
        spiral.outer = target;
        spiral.center += delta;
        let moved = spiral.clone();

        match hit {
            Some(hit) => {
                if let Some(parent) = updated.iter().find(|s| s.id == hit.spiral) {
                    let t = hit
                        .t
                        .unwrap_or_else(|| curves::curve_param_at(parent, target));
                    let angle = attachment::relative_angle(parent, target, &moved);
                    document.attachments_mut().register_or_replace(Attachment {
                        child: id,
                        parent: hit.spiral,
                        t,
                        angle,
                    });
                }
            }
            None => {
                // Moved clear of any parent: explicit detach rather than a
                // stale edge.
                if document.attachments_mut().detach(id).is_some() {
                    debug!("{id:?} detached after unsnapped drag");
                }
            }
        }

        document.attachments().propagate(id, &mut updated);
        document.replace_spirals(updated);
    }
}
