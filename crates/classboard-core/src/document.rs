//! Layered scene document.

use crate::config::EditorConfig;
use crate::shapes::{ShapeId, StrokePath};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current document format version.
pub const FORMAT_VERSION: &str = "1.0";

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
/// Default canvas background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Errors from document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Layer {index} not found (document has {count} layers)")]
    LayerNotFound { index: usize, count: usize },
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(String),
    #[error("Document has no layers")]
    NoLayers,
    #[error("Canvas size must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Fixed canvas metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasInfo {
    pub width: f64,
    pub height: f64,
    pub background: String,
}

impl Default for CanvasInfo {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl CanvasInfo {
    /// The visible canvas area.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A named, ordered group of strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    /// Hidden layers are kept but not rendered.
    pub visible: bool,
    objects: Vec<StrokePath>,
}

impl Layer {
    /// Create an empty, visible layer.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            objects: Vec::new(),
        }
    }

    /// Strokes in z-order (back to front).
    pub fn objects(&self) -> &[StrokePath] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn push(&mut self, stroke: StrokePath) {
        self.objects.push(stroke);
    }

    fn clear(&mut self) {
        self.objects.clear();
    }
}

/// The full drawing state of one editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: String,
    pub canvas: CanvasInfo,
    layers: Vec<Layer>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl SceneDocument {
    /// Id of the layer every new document starts with.
    pub const DEFAULT_LAYER_ID: &'static str = "layer-1";

    /// Create an empty document with one default layer.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            canvas: config.canvas.clone(),
            layers: vec![Layer::new(Self::DEFAULT_LAYER_ID, config.layer_name.clone())],
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Append a stroke to the end of a layer; it renders above earlier ones.
    pub fn append_stroke(&mut self, layer_index: usize, stroke: StrokePath) -> DocumentResult<ShapeId> {
        let count = self.layers.len();
        let layer = self
            .layers
            .get_mut(layer_index)
            .ok_or(DocumentError::LayerNotFound { index: layer_index, count })?;
        let id = stroke.id();
        layer.push(stroke);
        Ok(id)
    }

    /// Remove every stroke. Layers, version and canvas are kept.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Total number of strokes across all layers.
    pub fn object_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    /// All strokes in render order: layer by layer, back to front.
    pub fn strokes_ordered(&self) -> impl Iterator<Item = &StrokePath> {
        self.layers.iter().flat_map(|layer| layer.objects.iter())
    }

    /// Bounding box of all strokes.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes_ordered()
            .map(StrokePath::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Plain nested-record form of the document.
    pub fn serialize(&self) -> serde_json::Value {
        // A document only holds strings, finite numbers and sequences.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Serialize the document to pretty JSON.
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    ///
    /// Documents from a different major format version, without a layer or
    /// with a non-positive canvas size are rejected.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        if !is_compatible_version(&document.version) {
            log::warn!("Rejecting document with version {}", document.version);
            return Err(DocumentError::UnsupportedVersion(document.version));
        }
        if document.layers.is_empty() {
            log::warn!("Rejecting document without layers");
            return Err(DocumentError::NoLayers);
        }
        let CanvasInfo { width, height, .. } = document.canvas;
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Rejecting document with canvas {}x{}", width, height);
            return Err(DocumentError::InvalidCanvas { width, height });
        }
        Ok(document)
    }
}

fn major(version: &str) -> Option<&str> {
    version.split('.').next().filter(|m| !m.is_empty())
}

fn is_compatible_version(version: &str) -> bool {
    match (major(version), major(FORMAT_VERSION)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
