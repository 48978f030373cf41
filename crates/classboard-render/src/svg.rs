//! SVG output.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use classboard_core::config::EditorConfig;
use classboard_core::shapes::{PathData, StrokeStyle};
use std::fmt::Write as _;

/// Renders a scene document as a standalone SVG string.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Style used for the in-progress stroke.
    preview_style: StrokeStyle,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            preview_style: StrokeStyle::default(),
        }
    }

    /// Draw the in-progress stroke in the style strokes are committed with.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            preview_style: config.stroke.clone(),
        }
    }

    /// Set the style used for the in-progress stroke.
    pub fn with_preview_style(mut self, style: StrokeStyle) -> Self {
        self.preview_style = style;
        self
    }

    fn write_path(out: &mut String, path: &PathData, style: &StrokeStyle, extra: &str) {
        let d = if path.len() == 1 {
            // A lone move draws nothing; repeat the point so the round cap shows a dot.
            let p = path.commands()[0].point();
            format!("{} L {} {}", path.as_str(), p.x, p.y)
        } else {
            path.as_str().to_string()
        };
        let _ = writeln!(
            out,
            r#"    <path{} d="{}" stroke="{}" stroke-width="{}" fill="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            extra,
            d,
            escape_attr(&style.stroke),
            style.stroke_width,
            escape_attr(&style.fill),
        );
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, ctx: &RenderContext) -> RenderResult<String> {
        if !(ctx.scale.is_finite() && ctx.scale > 0.0) {
            return Err(RendererError::InvalidScale(ctx.scale));
        }

        let canvas = &ctx.document.canvas;
        let bounds = canvas.rect();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            bounds.width() * ctx.scale,
            bounds.height() * ctx.scale,
            bounds.width(),
            bounds.height(),
        );
        let _ = writeln!(
            out,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            bounds.width(),
            bounds.height(),
            escape_attr(&canvas.background),
        );

        let mut drawn = 0usize;
        // Visibility is stored but not applied; every layer is drawn.
        for layer in ctx.document.layers() {
            let _ = writeln!(out, r#"  <g id="{}">"#, escape_attr(&layer.id));
            for stroke in layer.objects() {
                let id = format!(r#" id="{}""#, stroke.id());
                Self::write_path(&mut out, stroke.path(), stroke.style(), &id);
                drawn += 1;
            }
            out.push_str("  </g>\n");
        }

        if let Some(preview) = ctx.preview.filter(|p| !p.is_empty()) {
            Self::write_path(&mut out, preview, &self.preview_style, r#" class="preview""#);
        }

        out.push_str("</svg>\n");
        log::debug!("Rendered {} strokes to SVG", drawn);
        Ok(out)
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
