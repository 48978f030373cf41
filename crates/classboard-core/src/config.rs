//! Editor configuration.

use crate::document::CanvasInfo;
use crate::shapes::StrokeStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings applied to every editor session.
///
/// Missing fields fall back to the defaults, so a config file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Canvas dimensions and background.
    pub canvas: CanvasInfo,
    /// Style given to every committed stroke.
    pub stroke: StrokeStyle,
    /// Name of the layer created with each document.
    pub layer_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasInfo::default(),
            stroke: StrokeStyle::default(),
            layer_name: "Layer 1".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that dimensions and stroke width are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !(self.stroke.stroke_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke width must be positive, got {}",
                self.stroke.stroke_width
            )));
        }
        if self.layer_name.trim().is_empty() {
            return Err(ConfigError::Invalid("layer name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.canvas.width - 800.0).abs() < f64::EPSILON);
        assert!((config.canvas.height - 600.0).abs() < f64::EPSILON);
        assert_eq!(config.stroke, StrokeStyle::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "layerName": "Homework" }"#).unwrap();
        assert_eq!(config.layer_name, "Homework");
        assert_eq!(config.canvas, CanvasInfo::default());
    }

    #[test]
    fn test_stroke_override() {
        let json = r##"{ "stroke": { "stroke": "#1d4ed8", "strokeWidth": 4, "fill": "none" } }"##;
        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.stroke.stroke, "#1d4ed8");
        assert!((config.stroke.stroke_width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        let json = r#"{ "canvas": { "width": 0, "height": 600, "background": "white" } }"#;
        assert!(matches!(EditorConfig::from_json(json), Err(ConfigError::Invalid(_))));

        let json = r#"{ "layerName": "  " }"#;
        assert!(matches!(EditorConfig::from_json(json), Err(ConfigError::Invalid(_))));

        assert!(matches!(EditorConfig::from_json("[]"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EditorConfig::load(Path::new("/nonexistent/classboard.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
