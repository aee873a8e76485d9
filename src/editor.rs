//! Editor facade: owns the document, its history, the tool settings and
//! the two gesture state machines, and exposes the command surface the
//! host application drives.

use egui::Pos2;
use log::debug;

use crate::curves::{self, TaperedSegment};
use crate::document::Document;
use crate::error::EditorError;
use crate::history::History;
use crate::settings::{self, AdjustDirection, AdjustKind, ParamEdit, ToolSettings};
use crate::snap;
use crate::spiral::{
    MAX_COILS, MAX_SIZE_RATIO, MAX_THICKNESS, MIN_COILS, MIN_SIZE_RATIO, MIN_THICKNESS, Spiral,
    SpiralId,
};
use crate::tools::{self, DrawTool, DrawUpdate, EndPoint, HitTarget, SelectTool, ToolChoice};

#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    history: History,
    settings: ToolSettings,
    tool: ToolChoice,
    draw: DrawTool,
    select: SelectTool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn tool(&self) -> ToolChoice {
        self.tool
    }

    /// Switches tools; picking the spiral tool drops the selection, like
    /// the select tool has nothing to act on afterwards.
    pub fn set_tool(&mut self, tool: ToolChoice) {
        self.tool = tool;
        if tool == ToolChoice::Spiral {
            self.select.select(None);
        }
    }

    // ---- render queries ----------------------------------------------

    /// Polyline of the spiral's curve, empty for unknown ids or degenerate
    /// geometry.
    pub fn sample_curve(&self, id: SpiralId) -> Vec<Pos2> {
        self.document
            .spiral(id)
            .map(curves::sample_curve)
            .unwrap_or_default()
    }

    /// Thickness-tapered chunks for variable-width stroke rendering.
    pub fn sample_tapered_segments(&self, id: SpiralId) -> Vec<TaperedSegment> {
        let Some(spiral) = self.document.spiral(id) else {
            return Vec::new();
        };
        let base = if spiral.outer_thickness > 0.0 {
            spiral.outer_thickness
        } else {
            self.settings.line_thickness
        };
        curves::tapered_segments(spiral, base)
    }

    /// Ghost spiral for the in-flight draw gesture.
    pub fn draw_preview(&self) -> Option<Spiral> {
        self.draw.preview(&self.settings)
    }

    /// Snap guide lines for the in-flight draw gesture (radial plus its
    /// tangent mirror), for the presentation layer to paint.
    pub fn draw_guides(&self) -> Option<[(Pos2, Pos2); 2]> {
        let parent = self
            .draw
            .active_parent()
            .and_then(|id| self.document.spiral(id))?;
        snap::guide_lines(parent, self.draw.start_point()?)
    }

    // ---- draw gesture ------------------------------------------------

    pub fn begin_draw(&mut self, point: Pos2) -> DrawUpdate {
        self.draw
            .begin(point, self.document.spirals(), &self.settings)
    }

    pub fn update_draw(&mut self, point: Pos2) -> DrawUpdate {
        self.draw
            .update(point, self.document.spirals(), &self.settings)
    }

    /// Commits the in-flight draw gesture: snapshots the store, appends
    /// the new spiral and registers its attachment if the gesture started
    /// snapped. `None` (and no commit) when the gesture is degenerate.
    pub fn end_draw(&mut self) -> Option<Spiral> {
        let (spiral, attachment) = self.draw.finish(self.document.spirals(), &self.settings)?;
        self.history.record(self.document.snapshot());
        self.document.add_spiral(spiral.clone());
        if let Some(edge) = attachment {
            self.document.attachments_mut().register_or_replace(edge);
        }
        debug!("committed spiral {:?}", spiral.id);
        Some(spiral)
    }

    pub fn cancel_draw(&mut self) {
        self.draw.cancel();
    }

    // ---- select / drag gesture ---------------------------------------

    /// Pointer-down for the select tool: grabs an endpoint handle of the
    /// current selection or picks the topmost spiral under the cursor.
    pub fn select_at(&mut self, point: Pos2) -> Option<HitTarget> {
        let target = tools::hit_test(
            point,
            self.document.spirals(),
            self.select.selected(),
            self.settings.endpoint_snap_radius,
        );
        match target {
            Some(HitTarget {
                spiral,
                end: Some(end),
            }) => self.select.begin_drag(spiral, end),
            Some(HitTarget { spiral, end: None }) => self.select.select(Some(spiral)),
            None => self.select.select(None),
        }
        target
    }

    pub fn selected(&self) -> Option<SpiralId> {
        self.select.selected()
    }

    pub fn hovered_end(&self) -> Option<EndPoint> {
        self.select.hovered_end()
    }

    pub fn update_hover(&mut self, point: Pos2) {
        self.select.update_hover(
            point,
            self.document.spirals(),
            self.settings.endpoint_snap_radius,
        );
    }

    pub fn begin_drag(&mut self, id: SpiralId, end: EndPoint) -> Result<(), EditorError> {
        if self.document.spiral(id).is_none() {
            return Err(EditorError::UnknownSpiral(id));
        }
        self.select.begin_drag(id, end);
        Ok(())
    }

    /// One step of an endpoint drag. Live updates are not committing: no
    /// history snapshot is pushed per step.
    pub fn update_drag(&mut self, point: Pos2) {
        self.select
            .update_drag(point, &mut self.document, &self.settings);
    }

    pub fn end_drag(&mut self) {
        self.select.end_drag();
    }

    // ---- parameters --------------------------------------------------

    /// Applies one parameter edit to the named spiral, or to the defaults
    /// for new spirals when `target` is `None`. Values are clamped.
    pub fn set_parameter(
        &mut self,
        target: Option<SpiralId>,
        edit: ParamEdit,
    ) -> Result<(), EditorError> {
        match target {
            Some(id) => {
                let spiral = self
                    .document
                    .spiral_mut(id)
                    .ok_or(EditorError::UnknownSpiral(id))?;
                match edit {
                    ParamEdit::Thickness(v) => spiral.set_thickness(v),
                    ParamEdit::Coils(v) => spiral.set_coils(v),
                    ParamEdit::TaperToCenter(v) => spiral.taper_to_center = v,
                    ParamEdit::Clockwise(v) => spiral.clockwise = v,
                    ParamEdit::Kind(v) => spiral.kind = v,
                    ParamEdit::SizeRatio(v) => spiral.set_size_ratio(v),
                }
            }
            None => match edit {
                ParamEdit::Thickness(v) => {
                    self.settings.line_thickness = v.clamp(MIN_THICKNESS, MAX_THICKNESS)
                }
                ParamEdit::Coils(v) => {
                    self.settings.default_coils = v.clamp(MIN_COILS, MAX_COILS)
                }
                ParamEdit::TaperToCenter(v) => self.settings.taper_to_center = v,
                ParamEdit::Clockwise(v) => self.settings.clockwise = v,
                ParamEdit::Kind(v) => self.settings.kind = v,
                ParamEdit::SizeRatio(v) => {
                    self.settings.size_ratio = v.clamp(MIN_SIZE_RATIO, MAX_SIZE_RATIO)
                }
            },
        }
        Ok(())
    }

    /// One tick of a held adjust control, applied to the selected spiral
    /// or to the defaults. Each tick clamps then applies one quantized
    /// delta; the caller stops ticking when the control is released.
    pub fn apply_adjust(&mut self, kind: AdjustKind, direction: AdjustDirection) {
        match (kind, self.select.selected()) {
            (AdjustKind::Coils, Some(id)) => {
                if let Some(s) = self.document.spiral_mut(id) {
                    s.coils = settings::apply_adjust(s.coils, kind, direction);
                }
            }
            (AdjustKind::Coils, None) => {
                self.settings.default_coils =
                    settings::apply_adjust(self.settings.default_coils, kind, direction);
            }
            (AdjustKind::Thickness, Some(id)) => {
                if let Some(s) = self.document.spiral_mut(id) {
                    s.outer_thickness =
                        settings::apply_adjust(s.outer_thickness, kind, direction);
                }
            }
            (AdjustKind::Thickness, None) => {
                self.settings.line_thickness =
                    settings::apply_adjust(self.settings.line_thickness, kind, direction);
            }
        }
    }

    /// Flips the winding of the selected spiral, or the default winding.
    pub fn toggle_clockwise(&mut self) {
        match self.select.selected() {
            Some(id) => {
                if let Some(s) = self.document.spiral_mut(id) {
                    s.clockwise = !s.clockwise;
                }
            }
            None => self.settings.clockwise = !self.settings.clockwise,
        }
    }

    /// Flips the taper direction of the selected spiral, or the default.
    pub fn toggle_taper(&mut self) {
        match self.select.selected() {
            Some(id) => {
                if let Some(s) = self.document.spiral_mut(id) {
                    s.taper_to_center = !s.taper_to_center;
                }
            }
            None => self.settings.taper_to_center = !self.settings.taper_to_center,
        }
    }

    pub fn toggle_snapping(&mut self) {
        self.settings.snapping_enabled = !self.settings.snapping_enabled;
    }

    /// Nudges the default s-curve size ratio by one step.
    pub fn step_size_ratio(&mut self, direction: AdjustDirection) {
        self.settings.size_ratio = settings::step_size_ratio(self.settings.size_ratio, direction);
    }

    // ---- history -----------------------------------------------------

    /// Restores the previous committed state; false on an empty stack.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        if undone {
            self.validate_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        if redone {
            self.validate_selection();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Empties the canvas. A committing action: the cleared state can be
    /// undone.
    pub fn clear(&mut self) {
        self.history.record(self.document.snapshot());
        self.document.clear();
        self.select.select(None);
        debug!("canvas cleared");
    }

    /// Drops a selection whose spiral no longer exists after a history
    /// jump.
    fn validate_selection(&mut self) {
        if let Some(id) = self.select.selected() {
            if self.document.spiral(id).is_none() {
                self.select.select(None);
            }
        }
    }
}
