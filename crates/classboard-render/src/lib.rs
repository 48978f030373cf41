//! Classboard Render Library
//!
//! Renderer abstraction for scene documents and an SVG implementation used
//! by the hosting view and for export.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
