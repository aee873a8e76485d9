//! Draw-gesture state machine: idle -> drawing -> committed. Owns only the
//! transient gesture state; the store is untouched until `finish`.

use egui::Pos2;
use log::debug;

use crate::attachment::Attachment;
use crate::curves;
use crate::settings::ToolSettings;
use crate::snap::{SnapQuery, find_snap_point};
use crate::spiral::{Spiral, SpiralId};

/// Result of a draw-gesture step: the (possibly snapped) cursor position
/// and the spiral it snapped to, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUpdate {
    pub point: Pos2,
    pub snapped: Option<SpiralId>,
}

#[derive(Debug, Clone, Default)]
enum DrawState {
    #[default]
    Idle,
    Drawing {
        start: Pos2,
        /// Stroke width the new spiral starts with: inherited from the
        /// parent's curve when the gesture began on a snap, the configured
        /// default otherwise.
        start_thickness: f32,
        parent: Option<SpiralId>,
        current: Option<Pos2>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawTool {
    state: DrawState,
}

impl DrawTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Spiral the gesture started on, if the first point snapped.
    pub fn active_parent(&self) -> Option<SpiralId> {
        match self.state {
            DrawState::Drawing { parent, .. } => parent,
            DrawState::Idle => None,
        }
    }

    pub fn start_point(&self) -> Option<Pos2> {
        match self.state {
            DrawState::Drawing { start, .. } => Some(start),
            DrawState::Idle => None,
        }
    }

    /// Starts a gesture at `point`, resolving the initial snap. A snapped
    /// start records the hit spiral as the gesture's parent and inherits
    /// its local stroke width.
    pub fn begin(&mut self, point: Pos2, spirals: &[Spiral], settings: &ToolSettings) -> DrawUpdate {
        let query = SnapQuery {
            initial: true,
            ..SnapQuery::new(spirals, settings)
        };

        let update = match find_snap_point(point, &query) {
            Some(hit) => {
                debug!("draw begins snapped to {:?} at {:?}", hit.spiral, hit.point);
                self.state = DrawState::Drawing {
                    start: hit.point,
                    start_thickness: hit.thickness.unwrap_or(settings.line_thickness),
                    parent: Some(hit.spiral),
                    current: None,
                };
                DrawUpdate {
                    point: hit.point,
                    snapped: Some(hit.spiral),
                }
            }
            None => {
                self.state = DrawState::Drawing {
                    start: point,
                    start_thickness: settings.line_thickness,
                    parent: None,
                    current: None,
                };
                DrawUpdate {
                    point,
                    snapped: None,
                }
            }
        };
        update
    }

    /// Moves the gesture's free end, re-snapping the cursor against guide
    /// lines and the other spirals. A no-op while idle.
    pub fn update(
        &mut self,
        point: Pos2,
        spirals: &[Spiral],
        settings: &ToolSettings,
    ) -> DrawUpdate {
        let DrawState::Drawing {
            start,
            parent,
            current,
            ..
        } = &mut self.state
        else {
            return DrawUpdate {
                point,
                snapped: None,
            };
        };

        let parent_spiral = parent.and_then(|id| spirals.iter().find(|s| s.id == id));
        let query = SnapQuery {
            active_parent: parent_spiral,
            gesture_start: Some(*start),
            ..SnapQuery::new(spirals, settings)
        };

        match find_snap_point(point, &query) {
            Some(hit) => {
                *current = Some(hit.point);
                DrawUpdate {
                    point: hit.point,
                    snapped: Some(hit.spiral),
                }
            }
            None => {
                *current = Some(point);
                DrawUpdate {
                    point,
                    snapped: None,
                }
            }
        }
    }

    /// Completes the gesture. Yields the new spiral and, when the gesture
    /// started snapped to a parent, the attachment edge pinning its outer
    /// point there. `None` when the gesture never moved or the endpoints
    /// coincide.
    pub fn finish(
        &mut self,
        spirals: &[Spiral],
        settings: &ToolSettings,
    ) -> Option<(Spiral, Option<Attachment>)> {
        let state = std::mem::take(&mut self.state);
        let DrawState::Drawing {
            start,
            start_thickness,
            parent,
            current: Some(current),
        } = state
        else {
            return None;
        };
        if start == current {
            return None;
        }

        let spiral = Spiral {
            id: SpiralId::next(),
            outer: start,
            outer_thickness: start_thickness,
            center: current,
            clockwise: settings.clockwise,
            coils: curves::coils_for_size(start.distance(current), settings.default_coils),
            kind: settings.kind,
            taper_to_center: settings.taper_to_center,
            size_ratio: settings.size_ratio,
        };

        let attachment = parent.and_then(|parent_id| {
            let parent = spirals.iter().find(|s| s.id == parent_id)?;
            let parent_angle = (parent.center.y - start.y).atan2(parent.center.x - start.x);
            let child_angle = (current.y - start.y).atan2(current.x - start.x);
            Some(Attachment {
                child: spiral.id,
                parent: parent_id,
                t: curves::curve_param_at(parent, start),
                angle: child_angle - parent_angle,
            })
        });

        Some((spiral, attachment))
    }

    /// Drops any in-flight gesture without committing.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }

    /// Ghost spiral for rendering the in-flight gesture, sized and typed as
    /// the committed spiral would be. Carries the reserved preview id.
    pub fn preview(&self, settings: &ToolSettings) -> Option<Spiral> {
        let DrawState::Drawing {
            start,
            start_thickness,
            current: Some(current),
            ..
        } = self.state
        else {
            return None;
        };

        Some(Spiral {
            id: SpiralId::PREVIEW,
            outer: start,
            outer_thickness: start_thickness,
            center: current,
            clockwise: settings.clockwise,
            coils: curves::coils_for_size(start.distance(current), settings.default_coils),
            kind: settings.kind,
            taper_to_center: settings.taper_to_center,
            size_ratio: settings.size_ratio,
        })
    }
}
