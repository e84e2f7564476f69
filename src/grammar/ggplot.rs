//! Plot assembly and compilation.
//!
//! Components are merged into a [`PlotSpec`], then [`compile`] resolves the
//! global aesthetics, every layer, and every scale into a [`CompiledPlot`].

use std::collections::BTreeMap;

use super::aes::{apply_data_to_aesthetics, merge_aesthetics, Aes, ConcreteAes};
use super::data::{DataFrame, ValueType, Values};
use super::geom::{materialize_geom, ConcreteGeom, Geom};
use super::scale::{materialize_scale_with, merge_scales, ConcreteScale, ContinuousScale, ScaleSpec, Scales};
use crate::config::ScaleConfig;
use crate::error::{Error, Result};
use crate::render::{Renderer, Scene};
use crate::scale::{data_range, Limits};

/// One independently declared piece of a plot.
#[derive(Debug, Clone)]
pub enum PlotComponent {
    /// Plot-wide aesthetic mappings.
    Aes(Aes),
    /// Scale declarations.
    Scale(Scales),
    /// A geometry layer.
    Geom(Geom),
}

impl From<Aes> for PlotComponent {
    fn from(aes: Aes) -> Self {
        PlotComponent::Aes(aes)
    }
}

impl From<Scales> for PlotComponent {
    fn from(scales: Scales) -> Self {
        PlotComponent::Scale(scales)
    }
}

impl From<Geom> for PlotComponent {
    fn from(geom: Geom) -> Self {
        PlotComponent::Geom(geom)
    }
}

/// Merged, still abstract plot.
#[derive(Debug, Clone, Default)]
pub struct PlotSpec {
    /// Plot data.
    pub data: Option<DataFrame>,
    /// Plot-wide aesthetics.
    pub aes: Option<Aes>,
    /// Declared scales.
    pub scales: Option<Scales>,
    /// Layers, in insertion order.
    pub geoms: Vec<Geom>,
}

/// Merge components into a plot specification.
///
/// Aesthetics and scales merge with conflict detection; layers keep their
/// order.
///
/// # Errors
///
/// Returns the first aesthetic or scale merge conflict.
pub fn merge<I>(components: I) -> Result<PlotSpec>
where
    I: IntoIterator<Item = PlotComponent>,
{
    let mut spec = PlotSpec::default();
    for component in components {
        match component {
            PlotComponent::Aes(aes) => {
                spec.aes = Some(match spec.aes {
                    Some(current) => merge_aesthetics(&current, &aes)?,
                    None => aes,
                });
            }
            PlotComponent::Scale(scales) => {
                spec.scales = Some(match spec.scales {
                    Some(current) => merge_scales(&current, &scales)?,
                    None => scales,
                });
            }
            PlotComponent::Geom(geom) => spec.geoms.push(geom),
        }
    }
    Ok(spec)
}

/// A plot with every layer and scale resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPlot {
    /// Resolved layers, in declaration order.
    pub layers: Vec<ConcreteGeom>,
    /// Resolved scales by aesthetic name.
    pub scales: BTreeMap<String, ConcreteScale>,
}

impl CompiledPlot {
    /// Scale for an aesthetic, if one was resolved.
    #[must_use]
    pub fn scale(&self, aesthetic: &str) -> Option<&ConcreteScale> {
        self.scales.get(aesthetic)
    }

    /// Normalized, render-ready description of the plot.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::new(self)
    }
}

/// Compile components against `data` with the default configuration.
///
/// # Errors
///
/// See [`compile_with`].
pub fn compile<I>(data: &DataFrame, components: I) -> Result<CompiledPlot>
where
    I: IntoIterator<Item = PlotComponent>,
{
    compile_with(data, components, &ScaleConfig::default())
}

/// Compile components against `data`.
///
/// # Errors
///
/// Any merge, aesthetic, layer or scale failure aborts the compilation.
pub fn compile_with<I>(data: &DataFrame, components: I, config: &ScaleConfig) -> Result<CompiledPlot>
where
    I: IntoIterator<Item = PlotComponent>,
{
    let spec = merge(components)?;
    compile_spec(data, &spec, config)
}

/// Compile an already merged specification.
///
/// `spec.data`, when present, replaces `data`.
///
/// # Errors
///
/// Any aesthetic, layer or scale failure aborts the compilation.
pub fn compile_spec(data: &DataFrame, spec: &PlotSpec, config: &ScaleConfig) -> Result<CompiledPlot> {
    let data = spec.data.as_ref().unwrap_or(data);
    let global = match &spec.aes {
        Some(aes) => apply_data_to_aesthetics(data, aes)?,
        None => ConcreteAes::new(),
    };

    let layers = spec
        .geoms
        .iter()
        .map(|geom| materialize_geom(data, &global, geom))
        .collect::<Result<Vec<_>>>()?;

    let declared = spec.scales.as_ref();
    let mut declared_data: BTreeMap<&str, Vec<&Values>> = BTreeMap::new();
    let mut inferred_data: BTreeMap<&str, Vec<&Values>> = BTreeMap::new();
    for layer in &layers {
        for (name, values) in &layer.aes {
            let target = if declared.is_some_and(|s| s.contains_key(name)) {
                &mut declared_data
            } else {
                &mut inferred_data
            };
            target.entry(name.as_str()).or_default().push(values);
        }
    }

    let mut scales = BTreeMap::new();
    for (name, list) in &inferred_data {
        let spec = infer_scale(name, list, config)?;
        scales.insert((*name).to_string(), materialize_scale_with(&spec, None, config)?);
    }
    if let Some(declared) = declared {
        for (name, list) in &declared_data {
            let Some(spec) = declared.get(*name) else { continue };
            let values = concat_values(list);
            scales.insert((*name).to_string(), materialize_scale_with(spec, Some(&values), config)?);
        }
    }

    tracing::debug!(layers = layers.len(), scales = scales.len(), "plot compiled");
    Ok(CompiledPlot { layers, scales })
}

/// Continuous scale with limits spanning every layer's values.
fn infer_scale(name: &str, list: &[&Values], config: &ScaleConfig) -> Result<ScaleSpec> {
    let Some(first) = list.first() else {
        return Ok(ScaleSpec::default());
    };
    if list.iter().any(|v| v.value_type() != first.value_type()) {
        return Err(Error::MixedAestheticTypes(name.to_string()));
    }
    match first.value_type() {
        ValueType::Number => {
            let limits = list
                .iter()
                .filter_map(|v| v.as_numbers())
                .map(|xs| data_range(xs, config.inferred_margin))
                .fold(Limits::new(f64::INFINITY, f64::NEG_INFINITY), |acc, l| acc.union(&l));
            tracing::trace!(aesthetic = name, min = limits.min, max = limits.max, "scale inferred");
            Ok(ScaleSpec::Continuous(ContinuousScale { limits: Some(limits), ..ContinuousScale::default() }))
        }
        _ => Err(Error::Unimplemented("discrete data")),
    }
}

/// All numeric values of a declared aesthetic, or the first non-numeric
/// vector so that scale resolution can reject it.
fn concat_values(list: &[&Values]) -> Values {
    if let Some(text) = list.iter().find(|v| v.as_numbers().is_none()) {
        return (*text).clone();
    }
    Values::Number(list.iter().filter_map(|v| v.as_numbers()).flatten().copied().collect())
}

/// Grammar of Graphics plot builder.
#[derive(Debug, Clone, Default)]
pub struct GGPlot {
    /// Plot data.
    data: DataFrame,
    /// Components, in insertion order.
    components: Vec<PlotComponent>,
    /// Scale tunables.
    config: ScaleConfig,
}

impl GGPlot {
    /// Create a plot over `data`.
    #[must_use]
    pub fn new(data: DataFrame) -> Self {
        Self { data, components: Vec::new(), config: ScaleConfig::default() }
    }

    /// Replace the plot data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = data;
        self
    }

    /// Add plot-wide aesthetics.
    #[must_use]
    pub fn aes(self, aes: Aes) -> Self {
        self.add(aes)
    }

    /// Add a geometry layer.
    #[must_use]
    pub fn geom(self, geom: Geom) -> Self {
        self.add(geom)
    }

    /// Declare a scale for an aesthetic.
    #[must_use]
    pub fn scale(self, aesthetic: &str, scale: ScaleSpec) -> Self {
        self.add(Scales::from([(aesthetic.to_string(), scale)]))
    }

    /// Add any component.
    #[must_use]
    pub fn add(mut self, component: impl Into<PlotComponent>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Set scale tunables.
    #[must_use]
    pub fn config(mut self, config: ScaleConfig) -> Self {
        self.config = config;
        self
    }

    /// Merge the components.
    ///
    /// # Errors
    ///
    /// Returns the first merge conflict.
    pub fn spec(&self) -> Result<PlotSpec> {
        let mut spec = merge(self.components.iter().cloned())?;
        spec.data = Some(self.data.clone());
        Ok(spec)
    }

    /// Resolve the plot.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot cannot be compiled.
    pub fn compile(&self) -> Result<CompiledPlot> {
        compile_with(&self.data, self.components.iter().cloned(), &self.config)
    }

    /// Resolve the plot and hand its scene to a renderer.
    ///
    /// # Errors
    ///
    /// Returns compilation or renderer errors.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        let scene = self.compile()?.scene();
        renderer.render(&scene)
    }
}
