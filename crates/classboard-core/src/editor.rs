//! Canvas editor session.

use crate::config::EditorConfig;
use crate::document::SceneDocument;
use crate::input::PointerEvent;
use crate::recorder::StrokeRecorder;
use crate::shapes::{PathData, ShapeId};
use kurbo::Vec2;

/// What a pointer event changed, so the host knows whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorUpdate {
    /// Nothing changed.
    None,
    /// The in-progress stroke changed.
    Preview,
    /// A stroke was committed to the document.
    Committed(ShapeId),
}

impl EditorUpdate {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, EditorUpdate::None)
    }
}

/// One open canvas editor: a fresh document plus stroke capture state for a
/// single section. Closing the session hands back the document.
#[derive(Debug)]
pub struct EditorSession {
    section_id: String,
    document: SceneDocument,
    recorder: StrokeRecorder,
}

impl EditorSession {
    /// Open an editor for `section_id` with an empty document.
    pub fn open(section_id: impl Into<String>, config: &EditorConfig) -> Self {
        let section_id = section_id.into();
        log::info!("Opening canvas editor for section {}", section_id);
        Self {
            section_id,
            document: SceneDocument::new(config),
            recorder: StrokeRecorder::new(config.stroke.clone()),
        }
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Geometry of the stroke being drawn, if any.
    pub fn preview(&self) -> Option<&PathData> {
        self.recorder.preview()
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_active()
    }

    /// Update the drawing surface's on-screen offset.
    pub fn set_surface_offset(&mut self, offset: Vec2) {
        self.recorder.set_surface_offset(offset);
    }

    /// Route a pointer event to stroke capture.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> EditorUpdate {
        match *event {
            PointerEvent::Down { position, button } => {
                if !button.is_primary() || self.recorder.is_active() {
                    return EditorUpdate::None;
                }
                self.recorder.begin_stroke(position);
                EditorUpdate::Preview
            }
            PointerEvent::Move { position } => {
                if !self.recorder.is_active() {
                    return EditorUpdate::None;
                }
                self.recorder.extend_stroke(position);
                EditorUpdate::Preview
            }
            PointerEvent::Up { button, .. } => {
                if !button.is_primary() {
                    return EditorUpdate::None;
                }
                self.commit(StrokeRecorder::end_stroke)
            }
            PointerEvent::Leave => self.commit(StrokeRecorder::pointer_leave),
        }
    }

    fn commit(
        &mut self,
        finish: fn(&mut StrokeRecorder, &mut SceneDocument) -> Option<ShapeId>,
    ) -> EditorUpdate {
        match finish(&mut self.recorder, &mut self.document) {
            Some(id) => EditorUpdate::Committed(id),
            None => EditorUpdate::None,
        }
    }

    /// Remove every stroke and abandon any stroke in progress.
    pub fn clear(&mut self) {
        self.recorder.cancel();
        self.document.clear();
        log::info!("Cleared canvas for section {}", self.section_id);
    }

    /// Close the editor, returning the final document.
    pub fn close(self) -> SceneDocument {
        log::info!(
            "Closing canvas editor for section {} ({} strokes)",
            self.section_id,
            self.document.object_count()
        );
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use kurbo::Point;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_open_fresh_document() {
        let editor = EditorSession::open("algebra-1", &EditorConfig::default());
        assert_eq!(editor.section_id(), "algebra-1");
        assert!(editor.document().is_empty());
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_event_dispatch() {
        let mut editor = EditorSession::open("s", &EditorConfig::default());

        assert_eq!(editor.handle_pointer_event(&mv(0.0, 0.0)), EditorUpdate::None);
        assert_eq!(editor.handle_pointer_event(&down(10.0, 10.0)), EditorUpdate::Preview);
        assert_eq!(editor.handle_pointer_event(&mv(20.0, 10.0)), EditorUpdate::Preview);

        let update = editor.handle_pointer_event(&up(20.0, 10.0));
        assert!(matches!(update, EditorUpdate::Committed(_)));
        assert!(update.needs_redraw());
        assert_eq!(editor.document().object_count(), 1);

        assert_eq!(editor.handle_pointer_event(&up(20.0, 10.0)), EditorUpdate::None);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut editor = EditorSession::open("s", &EditorConfig::default());
        let right = PointerEvent::Down {
            position: Point::new(1.0, 1.0),
            button: MouseButton::Right,
        };
        assert_eq!(editor.handle_pointer_event(&right), EditorUpdate::None);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_leave_commits() {
        let mut editor = EditorSession::open("s", &EditorConfig::default());
        editor.handle_pointer_event(&down(5.0, 5.0));
        let update = editor.handle_pointer_event(&PointerEvent::Leave);
        assert!(matches!(update, EditorUpdate::Committed(_)));
        assert_eq!(editor.document().layers()[0].objects()[0].path().as_str(), "M 5 5");
    }

    #[test]
    fn test_clear_drops_in_progress() {
        let mut editor = EditorSession::open("s", &EditorConfig::default());
        editor.handle_pointer_event(&down(1.0, 1.0));
        editor.handle_pointer_event(&up(1.0, 1.0));
        editor.handle_pointer_event(&down(2.0, 2.0));

        editor.clear();
        assert!(editor.document().is_empty());
        assert!(editor.preview().is_none());
    }

    #[test]
    fn test_close_returns_document() {
        let mut editor = EditorSession::open("s", &EditorConfig::default());
        editor.set_surface_offset(Vec2::new(10.0, 10.0));
        editor.handle_pointer_event(&down(15.0, 15.0));
        editor.handle_pointer_event(&up(15.0, 15.0));

        let doc = editor.close();
        assert_eq!(doc.layers()[0].objects()[0].path().as_str(), "M 5 5");
    }
}
