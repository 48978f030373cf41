//! Freehand stroke object.

use super::{ObjectKind, PathData, ShapeId, StrokeStyle};
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed freehand stroke.
///
/// Fields are read-only once constructed; a stroke is never edited after it
/// has been appended to a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    id: ShapeId,
    kind: ObjectKind,
    #[serde(flatten)]
    style: StrokeStyle,
    path: PathData,
}

impl StrokePath {
    /// Create a stroke with a freshly generated id.
    pub fn new(path: PathData, style: StrokeStyle) -> Self {
        Self::with_id(Uuid::new_v4(), path, style)
    }

    /// Create a stroke with an explicit id.
    pub fn with_id(id: ShapeId, path: PathData, style: StrokeStyle) -> Self {
        Self {
            id,
            kind: ObjectKind::Path,
            style,
            path,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Stroke geometry.
    pub fn path(&self) -> &PathData {
        &self.path
    }

    /// Bounding box of the geometry, widened by half the stroke width.
    pub fn bounds(&self) -> Rect {
        self.path
            .bounds()
            .map(|r| r.inflate(self.style.stroke_width / 2.0, self.style.stroke_width / 2.0))
            .unwrap_or(Rect::ZERO)
    }

    pub fn to_bez_path(&self) -> BezPath {
        self.path.to_bez_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn sample() -> StrokePath {
        let mut path = PathData::starting_at(Point::new(10.0, 10.0));
        path.line_to(Point::new(20.0, 10.0));
        StrokePath::new(path, StrokeStyle::default())
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(sample().id(), sample().id());
    }

    #[test]
    fn test_wire_shape() {
        let stroke = sample();
        let value = serde_json::to_value(&stroke).unwrap();

        assert_eq!(value["id"], stroke.id().to_string());
        assert_eq!(value["kind"], "path");
        assert_eq!(value["stroke"], "black");
        assert_eq!(value["strokeWidth"], 2.0);
        assert_eq!(value["fill"], "none");
        assert_eq!(value["path"], "M 10 10 L 20 10");
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "kind": "path",
            "stroke": "red",
            "strokeWidth": 4,
            "fill": "none",
            "path": "M 1 1 L 2 2"
        }"#;
        let stroke: StrokePath = serde_json::from_str(json).unwrap();
        assert_eq!(stroke.style().stroke, "red");
        assert_eq!(stroke.path().len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_bad_path() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "kind": "path",
            "stroke": "black",
            "strokeWidth": 2,
            "fill": "none",
            "path": ""
        }"#;
        assert!(serde_json::from_str::<StrokePath>(json).is_err());
    }

    #[test]
    fn test_bounds_include_stroke_width() {
        let bounds = sample().bounds();
        assert!((bounds.x0 - 9.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 21.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 9.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 11.0).abs() < f64::EPSILON);
    }
}
