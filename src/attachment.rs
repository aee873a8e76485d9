//! Parent/child attachment graph. A child's outer point is pinned to a
//! parameter along its parent's curve, with orientation held at a fixed
//! angle relative to the parent's local radial direction.

use egui::{Pos2, pos2};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use crate::curves;
use crate::spiral::{Spiral, SpiralId};

/// Hard stop for propagation through transiently malformed edges.
const MAX_PROPAGATION_DEPTH: usize = 100;

/// One parent/child edge. At most one exists per child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub child: SpiralId,
    pub parent: SpiralId,
    /// Normalized curve parameter of the pin along the parent.
    pub t: f32,
    /// Child orientation relative to the parent's local radial direction.
    pub angle: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentGraph {
    attachments: Vec<Attachment>,
}

impl AttachmentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the edge, dropping any existing edge for the same child.
    pub fn register_or_replace(&mut self, attachment: Attachment) {
        self.attachments.retain(|a| a.child != attachment.child);
        self.attachments.push(attachment);
    }

    /// Removes and returns the child's edge, if any.
    pub fn detach(&mut self, child: SpiralId) -> Option<Attachment> {
        let pos = self.attachments.iter().position(|a| a.child == child)?;
        Some(self.attachments.remove(pos))
    }

    pub fn parent_of(&self, child: SpiralId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.child == child)
    }

    /// Rewrites the stored relative angle of the child's edge.
    pub fn set_angle(&mut self, child: SpiralId, angle: f32) {
        if let Some(a) = self.attachments.iter_mut().find(|a| a.child == child) {
            a.angle = angle;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter()
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn clear(&mut self) {
        self.attachments.clear();
    }

    /// Every spiral reachable from `id` through child edges. Never contains
    /// `id` itself and terminates even if the edges contain a cycle.
    pub fn descendants_of(&self, id: SpiralId) -> HashSet<SpiralId> {
        let mut descendants = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for a in self.attachments.iter().filter(|a| a.parent == current) {
                if a.child != id && descendants.insert(a.child) {
                    stack.push(a.child);
                }
            }
        }

        descendants
    }

    /// Recomputes every descendant of `moved` from its parent's current
    /// geometry. `spirals` is mutated in place; the caller swaps the whole
    /// collection back into the store once this returns, so a renderer
    /// never observes a half-updated set.
    ///
    /// A missing record or an empty resampled curve skips that branch and
    /// leaves its prior geometry; a transient inconsistency mid-drag must
    /// not take the frame down.
    pub fn propagate(&self, moved: SpiralId, spirals: &mut [Spiral]) {
        let mut visited = HashSet::new();
        self.propagate_from(moved, spirals, &mut visited, 0);
    }

    fn propagate_from(
        &self,
        parent_id: SpiralId,
        spirals: &mut [Spiral],
        visited: &mut HashSet<SpiralId>,
        depth: usize,
    ) {
        if depth > MAX_PROPAGATION_DEPTH || !visited.insert(parent_id) {
            return;
        }

        let edges: Vec<Attachment> = self
            .attachments
            .iter()
            .filter(|a| a.parent == parent_id)
            .copied()
            .collect();

        for edge in edges {
            if visited.contains(&edge.child) {
                continue;
            }

            let Some(parent) = spirals.iter().find(|s| s.id == parent_id).cloned() else {
                debug_assert!(false, "attachment references unknown parent {parent_id:?}");
                continue;
            };
            let Some(attach_point) = curves::point_at_param(&parent, edge.t) else {
                warn!(
                    "propagation into {:?} skipped: parent {:?} has no curve",
                    edge.child, parent_id
                );
                continue;
            };

            let Some(child) = spirals.iter_mut().find(|s| s.id == edge.child) else {
                debug_assert!(false, "attachment references unknown child {:?}", edge.child);
                continue;
            };

            let parent_angle = (parent.center.y - attach_point.y)
                .atan2(parent.center.x - attach_point.x);
            let new_angle = parent_angle + edge.angle;
            let child_radius = child.radius();

            child.outer = attach_point;
            child.center = pos2(
                attach_point.x + child_radius * new_angle.cos(),
                attach_point.y + child_radius * new_angle.sin(),
            );

            self.propagate_from(edge.child, spirals, visited, depth + 1);
        }
    }
}

/// Angle of the child's outer->center vector relative to the parent's
/// radial direction at the attachment point, normalized to [-PI, PI).
pub fn relative_angle(parent: &Spiral, attach_point: Pos2, child: &Spiral) -> f32 {
    let parent_angle =
        (parent.center.y - attach_point.y).atan2(parent.center.x - attach_point.x);
    let child_angle = (child.center.y - child.outer.y).atan2(child.center.x - child.outer.x);
    ((child_angle - parent_angle + 3.0 * PI) % TAU) - PI
}
