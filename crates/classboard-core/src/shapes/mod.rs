//! Drawable object definitions for the canvas editor.

mod path_data;
mod stroke_path;

pub use path_data::{PathCommand, PathData, PathParseError};
pub use stroke_path::StrokePath;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a drawable object.
pub type ShapeId = Uuid;

/// Discriminator for drawable objects.
///
/// Only freehand paths exist today; the tag is serialized so that other
/// object kinds can be added without breaking existing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Path,
}

/// Rendering attributes applied to a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    /// Stroke color, as an SVG paint value.
    pub stroke: String,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Fill paint (`"none"` = no fill).
    pub fill: String,
}

impl StrokeStyle {
    /// Paint value meaning "no fill".
    pub const NO_FILL: &'static str = "none";

    pub fn new(stroke: impl Into<String>, stroke_width: f64, fill: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            stroke_width,
            fill: fill.into(),
        }
    }

    /// Whether this style paints the path interior.
    pub fn is_filled(&self) -> bool {
        self.fill != Self::NO_FILL
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new("black", 2.0, Self::NO_FILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StrokeStyle::default();
        assert_eq!(style.stroke, "black");
        assert!((style.stroke_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(style.fill, "none");
        assert!(!style.is_filled());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ObjectKind::Path).unwrap();
        assert_eq!(json, "\"path\"");
    }
}
