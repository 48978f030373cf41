//! Renderer trait abstraction.

use classboard_core::document::SceneDocument;
use classboard_core::shapes::PathData;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to draw one frame.
pub struct RenderContext<'a> {
    /// The committed drawing.
    pub document: &'a SceneDocument,
    /// Stroke currently being drawn, drawn above the document.
    pub preview: Option<&'a PathData>,
    /// Output pixels per canvas unit.
    pub scale: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context at 1:1 scale.
    pub fn new(document: &'a SceneDocument) -> Self {
        Self {
            document,
            preview: None,
            scale: 1.0,
        }
    }

    /// Set the in-progress stroke.
    pub fn with_preview(mut self, preview: Option<&'a PathData>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the output scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Output produced for one frame.
    type Output;

    /// Draw the document, then the preview stroke on top.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Self::Output>;
}
