//! Render-ready plot description.
//!
//! Positions of scaled aesthetics are in normalized `[0, 1]` units with the
//! origin at the bottom-left; mapping onto pixels (and flipping `y` for
//! screen coordinates) is left to the renderer.

use std::collections::BTreeMap;

use crate::grammar::{CompiledPlot, ConcreteAes, ConcreteGeom, ConcreteScale, DataValue, GeomKind};

/// Normalized tick positions and their labels for one guide.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Tick positions in `[0, 1]`.
    pub ticks: Vec<f64>,
    /// One label per tick.
    pub labels: Vec<String>,
}

impl Axis {
    fn new(scale: &ConcreteScale) -> Self {
        let (ticks, labels) = scale.ticks().map(|(t, l)| (t, l.to_string())).unzip();
        Self { ticks, labels }
    }
}

/// One layer of a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    /// The geometry kind.
    pub kind: GeomKind,
    /// Numeric aesthetics normalized through their scales.
    pub scaled: BTreeMap<String, Vec<f64>>,
    /// Aesthetics without a scale, passed through.
    pub unscaled: ConcreteAes,
    /// Constant properties.
    pub props: BTreeMap<String, DataValue>,
}

impl SceneLayer {
    fn new(layer: &ConcreteGeom, scales: &BTreeMap<String, ConcreteScale>) -> Self {
        let mut scaled = BTreeMap::new();
        let mut unscaled = ConcreteAes::new();
        for (name, values) in &layer.aes {
            match (scales.get(name), values.as_numbers()) {
                (Some(scale), Some(xs)) => {
                    scaled.insert(name.clone(), scale.apply_all(xs));
                }
                _ => {
                    unscaled.insert(name.clone(), values.clone());
                }
            }
        }
        Self { kind: layer.kind, scaled, unscaled, props: layer.props.clone() }
    }

    /// Normalized `(x, y)` pairs, if both positions are scaled.
    #[must_use]
    pub fn points(&self) -> Option<Vec<(f64, f64)>> {
        let x = self.scaled.get("x")?;
        let y = self.scaled.get("y")?;
        Some(x.iter().copied().zip(y.iter().copied()).collect())
    }

    /// Per-row value of an aesthetic, falling back to the constant property.
    #[must_use]
    pub fn value(&self, aesthetic: &str, row: usize) -> Option<DataValue> {
        if let Some(values) = self.unscaled.get(aesthetic) {
            if let Some(s) = values.as_strings().and_then(|s| s.get(row)) {
                return Some(DataValue::Text(s.clone()));
            }
            if let Some(x) = values.as_numbers().and_then(|x| x.get(row)) {
                return Some(DataValue::Number(*x));
            }
        }
        self.props.get(aesthetic).cloned()
    }
}

/// Everything a renderer needs to draw a compiled plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Layers in drawing order.
    pub layers: Vec<SceneLayer>,
    /// Horizontal guide, when an `x` scale exists.
    pub x_axis: Option<Axis>,
    /// Vertical guide, when a `y` scale exists.
    pub y_axis: Option<Axis>,
}

impl Scene {
    /// Normalize a compiled plot.
    #[must_use]
    pub fn new(plot: &CompiledPlot) -> Self {
        Self {
            layers: plot.layers.iter().map(|l| SceneLayer::new(l, &plot.scales)).collect(),
            x_axis: plot.scales.get("x").map(Axis::new),
            y_axis: plot.scales.get("y").map(Axis::new),
        }
    }
}
