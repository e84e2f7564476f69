//! Hand-off from compiled plots to drawing backends.
//!
//! A [`CompiledPlot`](crate::grammar::CompiledPlot) is turned into a
//! [`Scene`] of normalized positions and guides; a [`Renderer`] paints it.

mod scene;
mod svg;

pub use scene::{Axis, Scene, SceneLayer};
pub use svg::{SvgElement, SvgRenderer, TextAnchor};

use crate::error::Result;

/// A backend that draws scenes.
pub trait Renderer {
    /// Draw `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`](crate::error::Error::Rendering) when the
    /// scene cannot be drawn.
    fn render(&mut self, scene: &Scene) -> Result<()>;
}
