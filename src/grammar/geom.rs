//! Geometry types for Grammar of Graphics.
//!
//! A [`GeomKind`] carries a static [`GeomSpecifier`] describing which
//! aesthetics it understands. [`materialize_geom`] resolves a layer's
//! aesthetics against its own mapping, the plot-wide mapping and the
//! specifier defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use super::aes::{apply_data_to_aesthetics, Aes, ConcreteAes};
use super::data::{DataFrame, DataValue};
use crate::error::{Error, Result};

/// Which guide an aesthetic's scale is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Horizontal position axis.
    X,
    /// Vertical position axis.
    Y,
    /// A legend keyed by the aesthetic name.
    Legend(&'static str),
}

/// How one geometry treats one aesthetic.
#[derive(Debug, Clone, PartialEq)]
pub struct AesSpec {
    /// Aesthetic name.
    pub name: &'static str,
    /// Resolution fails when the aesthetic cannot be found.
    pub required: bool,
    /// May be taken from the plot-wide mapping.
    pub inheritable: bool,
    /// Guide the aesthetic is drawn on.
    pub axis: AxisRole,
    /// Whether the aesthetic expects continuous data, when known.
    pub continuous: Option<bool>,
    /// Value used when nothing else supplies the aesthetic.
    pub default: Option<DataValue>,
}

impl AesSpec {
    fn position(name: &'static str, axis: AxisRole) -> Self {
        Self { name, required: true, inheritable: true, axis, continuous: Some(true), default: None }
    }

    fn legend(name: &'static str, default: DataValue) -> Self {
        Self {
            name,
            required: false,
            inheritable: true,
            axis: AxisRole::Legend(name),
            continuous: None,
            default: Some(default),
        }
    }
}

/// Static description of a geometry kind.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomSpecifier {
    /// Geometry kind.
    pub kind: GeomKind,
    /// Recognized aesthetics, in resolution order.
    pub aes: Vec<AesSpec>,
}

impl GeomSpecifier {
    /// Look up one aesthetic's description.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AesSpec> {
        self.aes.iter().find(|spec| spec.name == name)
    }
}

/// Geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeomKind {
    /// Points.
    Point,
    /// Lines connecting points in data order.
    Line,
}

impl GeomKind {
    /// Kind name as used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GeomKind::Point => "point",
            GeomKind::Line => "line",
        }
    }

    /// The static specifier of this kind.
    #[must_use]
    pub fn specifier(self) -> &'static GeomSpecifier {
        static POINT: OnceLock<GeomSpecifier> = OnceLock::new();
        static LINE: OnceLock<GeomSpecifier> = OnceLock::new();

        match self {
            GeomKind::Point => POINT.get_or_init(|| GeomSpecifier {
                kind: GeomKind::Point,
                aes: vec![
                    AesSpec::position("x", AxisRole::X),
                    AesSpec::position("y", AxisRole::Y),
                    AesSpec::legend("colour", DataValue::from("black")),
                    AesSpec::legend("alpha", DataValue::Number(1.0)),
                    AesSpec::legend("shape", DataValue::Number(19.0)),
                    AesSpec::legend("size", DataValue::Number(1.5)),
                ],
            }),
            GeomKind::Line => LINE.get_or_init(|| GeomSpecifier {
                kind: GeomKind::Line,
                aes: vec![
                    AesSpec::position("x", AxisRole::X),
                    AesSpec::position("y", AxisRole::Y),
                    AesSpec::legend("colour", DataValue::from("black")),
                    AesSpec::legend("alpha", DataValue::Number(1.0)),
                    AesSpec::legend("size", DataValue::Number(0.5)),
                ],
            }),
        }
    }
}

impl fmt::Display for GeomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A geometry layer as declared by the caller.
#[derive(Debug, Clone)]
pub struct Geom {
    /// The geometry kind.
    pub kind: GeomKind,
    /// Layer-specific data (if different from plot data).
    pub data: Option<DataFrame>,
    /// Layer-specific aesthetics.
    pub aes: Option<Aes>,
    /// Constant, non-data-driven properties.
    pub props: BTreeMap<String, DataValue>,
}

impl Geom {
    /// Create a layer of the given kind.
    #[must_use]
    pub fn new(kind: GeomKind) -> Self {
        Self { kind, data: None, aes: None, props: BTreeMap::new() }
    }

    /// Create a point geometry.
    #[must_use]
    pub fn point() -> Self {
        Self::new(GeomKind::Point)
    }

    /// Create a line geometry.
    #[must_use]
    pub fn line() -> Self {
        Self::new(GeomKind::Line)
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = Some(data);
        self
    }

    /// Add layer-specific aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = Some(aes);
        self
    }

    /// Set a constant property.
    #[must_use]
    pub fn prop(mut self, name: &str, value: impl Into<DataValue>) -> Self {
        self.props.insert(name.to_string(), value.into());
        self
    }

    /// Set a constant size.
    #[must_use]
    pub fn size(self, size: f64) -> Self {
        self.prop("size", size)
    }

    /// Set a constant colour.
    #[must_use]
    pub fn colour(self, colour: &str) -> Self {
        self.prop("colour", colour)
    }

    /// Set a constant shape (code or name).
    #[must_use]
    pub fn shape(self, shape: impl Into<DataValue>) -> Self {
        self.prop("shape", shape)
    }

    /// Set a constant alpha.
    #[must_use]
    pub fn alpha(self, alpha: f64) -> Self {
        self.prop("alpha", alpha)
    }

    /// Set the position adjustment.
    #[must_use]
    pub fn position(self, position: &str) -> Self {
        self.prop("position", position)
    }
}

/// A layer with every aesthetic resolved, ready for scaling and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteGeom {
    /// The geometry kind.
    pub kind: GeomKind,
    /// Row-aligned aesthetic vectors.
    pub aes: ConcreteAes,
    /// Constants, including defaults of unmapped aesthetics.
    pub props: BTreeMap<String, DataValue>,
}

/// Resolve a layer.
///
/// The layer's own mapping is evaluated against its own data, or `data`
/// when it has none. Then, for each aesthetic of the specifier in order:
/// own mappings and properties win; an inheritable aesthetic is copied from
/// `global`; a missing required aesthetic fails; otherwise a default goes
/// into the property map.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredAesthetic`] or any failure evaluating
/// the layer's own mapping.
pub fn materialize_geom(data: &DataFrame, global: &ConcreteAes, layer: &Geom) -> Result<ConcreteGeom> {
    let aes = match &layer.aes {
        Some(own) => apply_data_to_aesthetics(layer.data.as_ref().unwrap_or(data), own)?,
        None => ConcreteAes::new(),
    };
    let mut geom = ConcreteGeom { kind: layer.kind, aes, props: layer.props.clone() };

    for spec in &layer.kind.specifier().aes {
        if geom.aes.contains_key(spec.name) || geom.props.contains_key(spec.name) {
            continue;
        }
        if spec.inheritable {
            if let Some(values) = global.get(spec.name) {
                tracing::trace!(geom = %layer.kind, aesthetic = spec.name, "inherited");
                geom.aes.insert(spec.name.to_string(), values.clone());
                continue;
            }
        }
        if spec.required {
            return Err(Error::MissingRequiredAesthetic {
                geom: layer.kind.name(),
                aes: spec.name.to_string(),
            });
        }
        if let Some(default) = &spec.default {
            geom.props.insert(spec.name.to_string(), default.clone());
        }
    }

    Ok(geom)
}
