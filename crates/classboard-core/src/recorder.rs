//! Freehand stroke capture.
//!
//! Turns pointer positions into a [`PathData`] while the button is held and
//! commits the finished stroke to a [`SceneDocument`]. Every call is total:
//! calls that don't fit the current state are ignored.

use crate::document::SceneDocument;
use crate::shapes::{PathData, ShapeId, StrokePath, StrokeStyle};
use kurbo::{Point, Vec2};

/// Layer that receives committed strokes.
pub const ACTIVE_LAYER: usize = 0;

/// State of the stroke currently being drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InProgressStroke {
    /// No stroke in progress.
    #[default]
    Idle,
    /// Pointer is held; geometry accumulated so far.
    Drawing { path: PathData },
}

impl InProgressStroke {
    pub fn is_active(&self) -> bool {
        matches!(self, InProgressStroke::Drawing { .. })
    }
}

/// Records one stroke at a time.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    /// On-screen offset of the drawing surface.
    surface_offset: Vec2,
    /// Style applied to committed strokes.
    style: StrokeStyle,
    state: InProgressStroke,
}

impl StrokeRecorder {
    /// Create a recorder that commits strokes with `style`.
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            surface_offset: Vec2::ZERO,
            style,
            state: InProgressStroke::Idle,
        }
    }

    /// Update the drawing surface's on-screen offset.
    pub fn set_surface_offset(&mut self, offset: Vec2) {
        self.surface_offset = offset;
    }

    pub fn surface_offset(&self) -> Vec2 {
        self.surface_offset
    }

    /// Convert a screen position to canvas-local coordinates.
    ///
    /// Positions are not clamped to the canvas area.
    pub fn to_canvas(&self, screen: Point) -> Point {
        screen - self.surface_offset
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn state(&self) -> &InProgressStroke {
        &self.state
    }

    /// Geometry of the stroke in progress, for live rendering.
    pub fn preview(&self) -> Option<&PathData> {
        match &self.state {
            InProgressStroke::Drawing { path } => Some(path),
            InProgressStroke::Idle => None,
        }
    }

    /// Start a stroke at `position`. Ignored while a stroke is active or when
    /// the position is not finite.
    pub fn begin_stroke(&mut self, position: Point) {
        if self.is_active() {
            log::debug!("Ignoring stroke begin while a stroke is active");
            return;
        }
        let start = self.to_canvas(position);
        if !start.is_finite() {
            log::debug!("Ignoring stroke begin at non-finite position {:?}", position);
            return;
        }
        log::debug!("Stroke begin at ({}, {})", start.x, start.y);
        self.state = InProgressStroke::Drawing {
            path: PathData::starting_at(start),
        };
    }

    /// Extend the active stroke to `position`. Ignored when idle or when the
    /// position is not finite.
    pub fn extend_stroke(&mut self, position: Point) {
        let point = self.to_canvas(position);
        if !point.is_finite() {
            log::debug!("Ignoring stroke extend to non-finite position {:?}", position);
            return;
        }
        if let InProgressStroke::Drawing { path } = &mut self.state {
            path.line_to(point);
        }
    }

    /// Commit the active stroke to the document's active layer.
    ///
    /// Returns the new stroke's id, or `None` when there was nothing to
    /// commit. The recorder is idle afterwards either way.
    pub fn end_stroke(&mut self, document: &mut SceneDocument) -> Option<ShapeId> {
        let InProgressStroke::Drawing { path } = std::mem::take(&mut self.state) else {
            return None;
        };
        if path.is_empty() {
            return None;
        }

        let stroke = StrokePath::new(path, self.style.clone());
        let commands = stroke.path().len();
        match document.append_stroke(ACTIVE_LAYER, stroke) {
            Ok(id) => {
                log::debug!("Committed stroke {} with {} commands", id, commands);
                Some(id)
            }
            Err(e) => {
                log::warn!("Dropping stroke: {}", e);
                None
            }
        }
    }

    /// The pointer left the drawing surface; commits like [`Self::end_stroke`].
    pub fn pointer_leave(&mut self, document: &mut SceneDocument) -> Option<ShapeId> {
        self.end_stroke(document)
    }

    /// Abandon the active stroke without committing it.
    pub fn cancel(&mut self) {
        self.state = InProgressStroke::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::PathCommand;

    fn setup() -> (StrokeRecorder, SceneDocument) {
        (StrokeRecorder::new(StrokeStyle::default()), SceneDocument::default())
    }

    #[test]
    fn test_stroke_lifecycle() {
        let (mut rec, mut doc) = setup();
        assert!(!rec.is_active());

        rec.begin_stroke(Point::new(10.0, 10.0));
        assert!(rec.is_active());
        rec.extend_stroke(Point::new(20.0, 10.0));
        rec.extend_stroke(Point::new(20.0, 20.0));
        assert_eq!(rec.preview().unwrap().as_str(), "M 10 10 L 20 10 L 20 20");

        let id = rec.end_stroke(&mut doc).unwrap();
        assert!(!rec.is_active());
        assert!(rec.preview().is_none());

        let stroke = &doc.layers()[0].objects()[0];
        assert_eq!(stroke.id(), id);
        assert_eq!(stroke.path().as_str(), "M 10 10 L 20 10 L 20 20");
        assert_eq!(stroke.style(), &StrokeStyle::default());
    }

    #[test]
    fn test_surface_offset_translation() {
        let (mut rec, mut doc) = setup();
        rec.set_surface_offset(Vec2::new(100.0, 50.0));

        rec.begin_stroke(Point::new(110.0, 60.0));
        rec.extend_stroke(Point::new(90.0, 40.0));
        rec.end_stroke(&mut doc);

        let path = doc.layers()[0].objects()[0].path();
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(10.0, 10.0)),
                // Outside the canvas; not clamped.
                PathCommand::LineTo(Point::new(-10.0, -10.0)),
            ]
        );
    }

    #[test]
    fn test_extend_and_end_without_begin() {
        let (mut rec, mut doc) = setup();
        rec.extend_stroke(Point::new(5.0, 5.0));
        assert!(!rec.is_active());
        assert!(rec.end_stroke(&mut doc).is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_double_end_commits_once() {
        let (mut rec, mut doc) = setup();
        rec.begin_stroke(Point::new(1.0, 1.0));
        assert!(rec.end_stroke(&mut doc).is_some());
        assert!(rec.end_stroke(&mut doc).is_none());
        assert_eq!(doc.object_count(), 1);
    }

    #[test]
    fn test_begin_while_active_is_ignored() {
        let (mut rec, mut doc) = setup();
        rec.begin_stroke(Point::new(1.0, 1.0));
        rec.begin_stroke(Point::new(50.0, 50.0));
        rec.end_stroke(&mut doc);

        assert_eq!(doc.layers()[0].objects()[0].path().as_str(), "M 1 1");
    }

    #[test]
    fn test_pointer_leave_commits_single_point() {
        let (mut rec, mut doc) = setup();
        rec.begin_stroke(Point::new(5.0, 5.0));
        let id = rec.pointer_leave(&mut doc);

        assert!(id.is_some());
        assert_eq!(doc.layers()[0].objects()[0].path().as_str(), "M 5 5");
    }

    #[test]
    fn test_cancel_discards() {
        let (mut rec, mut doc) = setup();
        rec.begin_stroke(Point::new(5.0, 5.0));
        rec.cancel();
        assert!(rec.end_stroke(&mut doc).is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_custom_style() {
        let style = StrokeStyle::new("red", 5.0, "none");
        let mut rec = StrokeRecorder::new(style.clone());
        let mut doc = SceneDocument::default();
        rec.begin_stroke(Point::ZERO);
        rec.end_stroke(&mut doc);
        assert_eq!(doc.layers()[0].objects()[0].style(), &style);
    }

    #[test]
    fn test_non_finite_positions_ignored() {
        let (mut rec, mut doc) = setup();

        rec.begin_stroke(Point::new(f64::NAN, 0.0));
        assert!(!rec.is_active());

        rec.begin_stroke(Point::new(1.0, 1.0));
        rec.extend_stroke(Point::new(f64::NAN, f64::INFINITY));
        rec.extend_stroke(Point::new(2.0, f64::NEG_INFINITY));
        rec.extend_stroke(Point::new(3.0, 3.0));
        rec.end_stroke(&mut doc).unwrap();

        let json = doc.to_json().unwrap();
        let loaded = SceneDocument::from_json(&json).unwrap();
        assert_eq!(loaded.layers()[0].objects()[0].path().as_str(), "M 1 1 L 3 3");
        assert_eq!(loaded, doc);
    }
}
