//! SVG renderer.
//!
//! Draws a [`Scene`] as vector SVG into an in-memory string. Points become
//! circles, lines become polylines, and the x/y guides become grid lines
//! with tick labels.

use std::fmt::Write as FmtWrite;

use super::scene::{Axis, Scene, SceneLayer};
use super::Renderer;
use crate::error::{Error, Result};
use crate::grammar::{DataValue, GeomKind};

/// Space reserved around the panel, in pixels.
const MARGIN: f64 = 10.0;
/// Space reserved for tick labels, in pixels.
const GUIDE: f64 = 30.0;
/// Label font size, in pixels.
const FONT_SIZE: f64 = 10.0;

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Circle
    Circle { cx: f64, cy: f64, r: f64, fill: String, opacity: f64 },
    /// Line
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: String, stroke_width: f64 },
    /// Polyline (connected line segments)
    Polyline { points: Vec<(f64, f64)>, stroke: String, stroke_width: f64, opacity: f64 },
    /// Text
    Text { x: f64, y: f64, text: String, anchor: TextAnchor },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

/// Pixel rectangle the panel is drawn into.
#[derive(Debug, Clone, Copy)]
struct Panel {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Panel {
    fn px(&self, u: f64) -> f64 {
        self.x + u * self.w
    }

    /// Screen `y` grows downward, so normalized `y` is flipped.
    fn py(&self, v: f64) -> f64 {
        self.y + (1.0 - v) * self.h
    }
}

/// Renders scenes to SVG documents.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    elements: Vec<SvgElement>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgRenderer {
    /// Create a renderer with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, elements: Vec::new() }
    }

    /// Elements of the last rendered scene.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// The last rendered scene as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(4096);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);
        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn panel(&self) -> Result<Panel> {
        let w = f64::from(self.width) - 2.0 * MARGIN - GUIDE;
        let h = f64::from(self.height) - 2.0 * MARGIN - GUIDE;
        if w <= 0.0 || h <= 0.0 {
            return Err(Error::Rendering(format!("{}x{} leaves no room for the panel", self.width, self.height)));
        }
        Ok(Panel { x: MARGIN + GUIDE, y: MARGIN, w, h })
    }

    fn draw_guides(&mut self, panel: &Panel, x_axis: Option<&Axis>, y_axis: Option<&Axis>) {
        if let Some(axis) = x_axis {
            for (&t, label) in axis.ticks.iter().zip(&axis.labels) {
                let x = panel.px(t);
                self.elements.push(grid_line(x, panel.y, x, panel.y + panel.h));
                self.elements.push(SvgElement::Text {
                    x,
                    y: panel.y + panel.h + FONT_SIZE + 5.0,
                    text: label.clone(),
                    anchor: TextAnchor::Middle,
                });
            }
        }
        if let Some(axis) = y_axis {
            for (&t, label) in axis.ticks.iter().zip(&axis.labels) {
                let y = panel.py(t);
                self.elements.push(grid_line(panel.x, y, panel.x + panel.w, y));
                self.elements.push(SvgElement::Text {
                    x: panel.x - 5.0,
                    y: y + FONT_SIZE / 2.0,
                    text: label.clone(),
                    anchor: TextAnchor::End,
                });
            }
        }
    }

    fn draw_layer(&mut self, panel: &Panel, layer: &SceneLayer) -> Result<()> {
        let points = layer
            .points()
            .ok_or_else(|| Error::Rendering(format!("{} layer has no scaled x/y positions", layer.kind)))?;

        match layer.kind {
            GeomKind::Point => {
                for (row, &(u, v)) in points.iter().enumerate() {
                    self.elements.push(SvgElement::Circle {
                        cx: panel.px(u),
                        cy: panel.py(v),
                        r: number(layer, "size", row, 1.5) * 2.0,
                        fill: colour(layer, row),
                        opacity: number(layer, "alpha", row, 1.0),
                    });
                }
            }
            GeomKind::Line => {
                self.elements.push(SvgElement::Polyline {
                    points: points.iter().map(|&(u, v)| (panel.px(u), panel.py(v))).collect(),
                    stroke: colour(layer, 0),
                    stroke_width: number(layer, "size", 0, 0.5) * 2.0,
                    opacity: number(layer, "alpha", 0, 1.0),
                });
            }
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        let panel = self.panel()?;
        self.elements.clear();
        self.draw_guides(&panel, scene.x_axis.as_ref(), scene.y_axis.as_ref());
        for layer in &scene.layers {
            self.draw_layer(&panel, layer)?;
        }
        tracing::debug!(elements = self.elements.len(), "scene rendered to svg");
        Ok(())
    }
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> SvgElement {
    SvgElement::Line { x1, y1, x2, y2, stroke: "#c0c0c0".to_string(), stroke_width: 1.0 }
}

fn number(layer: &SceneLayer, aesthetic: &str, row: usize, fallback: f64) -> f64 {
    layer.value(aesthetic, row).and_then(|v| v.as_f64()).unwrap_or(fallback)
}

fn colour(layer: &SceneLayer, row: usize) -> String {
    match layer.value("colour", row) {
        Some(DataValue::Text(c)) => c,
        _ => "black".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Circle { cx, cy, r, fill, opacity } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" fill-opacity="{opacity}"/>"#, escape(fill))
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                escape(stroke)
            )
        }
        SvgElement::Polyline { points, stroke, stroke_width, opacity } => {
            let points_str = points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}" stroke-opacity="{opacity}"/>"#,
                escape(stroke)
            )
        }
        SvgElement::Text { x, y, text, anchor } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{FONT_SIZE}" text-anchor="{anchor_str}" font-family="sans-serif">{}</text>"#,
                escape(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Aes, DataFrame, GGPlot, Geom};

    fn plot() -> GGPlot {
        GGPlot::new(DataFrame::from_xy(&[0.0, 5.0, 10.0], &[0.0, 20.0, 40.0])).aes(Aes::new().x("x").y("y"))
    }

    #[test]
    fn test_render_points() {
        let mut renderer = SvgRenderer::new(400, 300);
        plot().geom(Geom::point().colour("red")).render(&mut renderer).unwrap();

        let circles: Vec<_> =
            renderer.elements().iter().filter(|e| matches!(e, SvgElement::Circle { .. })).collect();
        assert_eq!(circles.len(), 3);
        let SvgElement::Circle { cx, cy, fill, .. } = circles[0] else { unreachable!() };
        assert_eq!(*cx, MARGIN + GUIDE);
        assert_eq!(*cy, MARGIN + 300.0 - 2.0 * MARGIN - GUIDE);
        assert_eq!(fill, "red");

        let svg = renderer.to_svg();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("<circle"));
        assert!(svg.contains(">40</text>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_render_line() {
        let mut renderer = SvgRenderer::default();
        plot().geom(Geom::line()).render(&mut renderer).unwrap();
        let svg = renderer.to_svg();
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("stroke=\"black\""));
        assert!(svg.contains("stroke-width=\"1\""));
    }

    #[test]
    fn test_render_replaces_previous_scene() {
        let mut renderer = SvgRenderer::default();
        let plot = plot().geom(Geom::point());
        plot.render(&mut renderer).unwrap();
        let n = renderer.elements().len();
        plot.render(&mut renderer).unwrap();
        assert_eq!(renderer.elements().len(), n);
    }

    #[test]
    fn test_render_too_small() {
        let mut renderer = SvgRenderer::new(20, 20);
        let err = plot().geom(Geom::point()).render(&mut renderer).unwrap_err();
        assert!(matches!(err, Error::Rendering(_)));
    }

    #[test]
    fn test_text_escaping() {
        let text = SvgElement::Text { x: 0.0, y: 0.0, text: "a<b & \"c\"".to_string(), anchor: TextAnchor::Start };
        let svg = element_to_svg(&text);
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(svg.contains("text-anchor=\"start\""));
    }
}
