use crate::draw::shape::{bounding_box_for_disc, bounding_box_for_segment};
use crate::draw::{DirtyTracker, Outline, Point, ShapeKind, Surface, SurfaceError};
use crate::input::Tool;
use log::{debug, warn};
use std::mem;

use super::{DrawingState, StrokeSession, Widget};

impl Widget {
    /// Processes a pointer press over the surface.
    ///
    /// Starts a stroke with the active tool and brush. Any queued restores
    /// are applied first so the stroke starts from the state the history
    /// says is current.
    pub fn pointer_down(&mut self, point: Point) {
        if self.is_drawing() {
            debug!("Pointer down during a stroke; ignoring");
            return;
        }
        self.run_pending();

        let pre_snapshot = match self.surface.capture() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Failed to capture surface before stroke: {}", err);
                return;
            }
        };

        debug!(
            "Stroke started with {} at ({:.1}, {:.1})",
            self.tool, point.x, point.y
        );
        self.state = DrawingState::Drawing(StrokeSession {
            tool: self.tool,
            anchor: point,
            last: point,
            brush: self.brush,
            pre_snapshot,
            preview_bounds: None,
        });
    }

    /// Processes pointer motion. Does nothing unless a stroke is in progress.
    ///
    /// - Brush: strokes from the previous position to `point`
    /// - Eraser: stamps a background disc at `point`
    /// - Shape tools: replace the previous preview with the shape spanned by
    ///   the anchor and `point`
    pub fn pointer_move(&mut self, point: Point) {
        let DrawingState::Drawing(session) = &mut self.state else {
            return;
        };

        let brush = session.brush;
        let result = if let Some(kind) = session.tool.shape_kind() {
            preview_shape(&mut self.surface, &mut self.dirty, session, kind, point)
        } else if session.tool == Tool::Eraser {
            self.dirty
                .mark_optional_rect(bounding_box_for_disc(point, brush.size()));
            self.surface.erase_disc(point, brush.size())
        } else {
            let from = session.last;
            self.dirty
                .mark_optional_rect(bounding_box_for_segment(from, point, brush.size()));
            self.surface.stroke_segment(
                from,
                point,
                brush.size(),
                brush.color,
                cairo::LineCap::Round,
                cairo::LineJoin::Round,
            )
        };
        session.last = point;

        if let Err(err) = result {
            warn!("Failed to render {} stroke: {}", session.tool, err);
        }
    }

    /// Processes a pointer release. Ends the stroke and records it.
    pub fn pointer_up(&mut self) {
        self.finish_stroke("pointer up");
    }

    /// Processes the pointer leaving the surface. Ends the stroke and records
    /// it, exactly like a release.
    pub fn pointer_leave(&mut self) {
        self.finish_stroke("pointer left surface");
    }

    fn finish_stroke(&mut self, reason: &str) {
        let DrawingState::Drawing(session) = mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };
        debug!("Stroke with {} ended ({})", session.tool, reason);
        self.commit_snapshot();
    }
}

fn preview_shape(
    surface: &mut Surface,
    dirty: &mut DirtyTracker,
    session: &mut StrokeSession,
    kind: ShapeKind,
    point: Point,
) -> Result<(), SurfaceError> {
    let width = session.brush.size();

    // The old preview's pixels get restored, so its area is dirty too
    if let Some(previous) = session.preview_bounds.take() {
        dirty.mark_rect(previous);
    }
    let bounds = Outline::from_points(kind, session.anchor, point).bounding_box(width);
    dirty.mark_optional_rect(bounds);
    session.preview_bounds = bounds;

    surface.restore(&session.pre_snapshot)?;
    surface.stroke_shape(kind, session.anchor, point, width, session.brush.color)
}
