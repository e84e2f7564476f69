//! Scale declarations and their resolution.
//!
//! A [`ScaleSpec`] is what the caller declares for one aesthetic: possibly
//! missing limits, breaks or labels. [`materialize_scale`] fills the gaps
//! from data and the break optimizer, producing a [`ConcreteScale`].

use std::collections::BTreeMap;

use super::aes::ConcreteAes;
use super::data::Values;
use super::ggplot::PlotComponent;
use crate::breaks;
use crate::config::ScaleConfig;
use crate::error::{Error, Result};
use crate::scale::{data_range, Limits, Scale};

/// Overrides for a continuous scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContinuousScale {
    /// Visible range, in data units.
    pub limits: Option<Limits>,
    /// Tick positions, in data units.
    pub breaks: Option<Vec<f64>>,
    /// Tick labels, one per break.
    pub labels: Option<Vec<String>>,
}

impl ContinuousScale {
    /// A scale with nothing overridden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visible range.
    #[must_use]
    pub fn limits(mut self, min: f64, max: f64) -> Self {
        self.limits = Some(Limits::new(min, max));
        self
    }

    /// Set explicit tick positions.
    #[must_use]
    pub fn breaks(mut self, breaks: Vec<f64>) -> Self {
        self.breaks = Some(breaks);
        self
    }

    /// Set explicit tick labels.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Overrides for a discrete scale.
///
/// Discrete scales can be declared but not resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscreteScale {
    /// Tick positions.
    pub breaks: Option<Vec<f64>>,
    /// Tick labels.
    pub labels: Option<Vec<String>>,
    /// Level order.
    pub order: Option<Vec<String>>,
}

impl DiscreteScale {
    /// A scale with nothing overridden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level order.
    #[must_use]
    pub fn order<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(levels.into_iter().map(Into::into).collect());
        self
    }
}

/// A declared scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleSpec {
    /// Numeric domain.
    Continuous(ContinuousScale),
    /// Categorical domain.
    Discrete(DiscreteScale),
}

impl ScaleSpec {
    /// Whether this is a continuous scale.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, ScaleSpec::Continuous(_))
    }
}

impl Default for ScaleSpec {
    fn default() -> Self {
        ScaleSpec::Continuous(ContinuousScale::default())
    }
}

/// Declared scales by aesthetic name.
pub type Scales = BTreeMap<String, ScaleSpec>;

/// Declare a continuous `x` scale.
#[must_use]
pub fn scale_x_continuous(scale: ContinuousScale) -> PlotComponent {
    scale_continuous("x", scale)
}

/// Declare a continuous `y` scale.
#[must_use]
pub fn scale_y_continuous(scale: ContinuousScale) -> PlotComponent {
    scale_continuous("y", scale)
}

/// Declare a continuous scale for any aesthetic.
#[must_use]
pub fn scale_continuous(name: &str, scale: ContinuousScale) -> PlotComponent {
    PlotComponent::Scale(Scales::from([(name.to_string(), ScaleSpec::Continuous(scale))]))
}

/// Declare a discrete scale for any aesthetic.
#[must_use]
pub fn scale_discrete(name: &str, scale: DiscreteScale) -> PlotComponent {
    PlotComponent::Scale(Scales::from([(name.to_string(), ScaleSpec::Discrete(scale))]))
}

fn merge_field<T: Clone>(scale: &str, field: &'static str, lhs: &Option<T>, rhs: &Option<T>) -> Result<Option<T>> {
    match (lhs, rhs) {
        (Some(_), Some(_)) => Err(Error::DuplicateScaleField { scale: scale.to_string(), field }),
        (l, r) => Ok(r.clone().or_else(|| l.clone())),
    }
}

/// Merge two scale maps.
///
/// Names present on one side are copied. A name present on both sides must
/// be continuous on both; each of `limits`, `breaks` and `labels` may then
/// come from at most one side.
///
/// # Errors
///
/// Returns [`Error::ScaleKindMismatch`] for continuous against discrete,
/// [`Error::DuplicateScaleField`] when a field is overridden twice and
/// [`Error::Unimplemented`] when both sides are discrete.
pub fn merge_scales(lhs: &Scales, rhs: &Scales) -> Result<Scales> {
    let mut merged = lhs.clone();
    for (name, right) in rhs {
        let Some(left) = lhs.get(name) else {
            merged.insert(name.clone(), right.clone());
            continue;
        };
        let scale = match (left, right) {
            (ScaleSpec::Continuous(l), ScaleSpec::Continuous(r)) => ScaleSpec::Continuous(ContinuousScale {
                limits: merge_field(name, "limits", &l.limits, &r.limits)?,
                breaks: merge_field(name, "breaks", &l.breaks, &r.breaks)?,
                labels: merge_field(name, "labels", &l.labels, &r.labels)?,
            }),
            (ScaleSpec::Discrete(_), ScaleSpec::Discrete(_)) => {
                return Err(Error::Unimplemented("merging discrete scales"));
            }
            _ => return Err(Error::ScaleKindMismatch(name.clone())),
        };
        merged.insert(name.clone(), scale);
    }
    Ok(merged)
}

/// A fully resolved continuous scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteScale {
    /// Visible range; always contains every break.
    pub limits: Limits,
    /// Tick positions, in data units.
    pub breaks: Vec<f64>,
    /// Tick labels, same length as `breaks`.
    pub labels: Vec<String>,
}

impl ConcreteScale {
    /// Normalize one value into `[0, 1]`.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        self.limits.normalize(x)
    }

    /// Normalize every value of `xs`.
    #[must_use]
    pub fn apply_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.apply(x)).collect()
    }

    /// Breaks in normalized coordinates, paired with their labels.
    pub fn ticks(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.breaks.iter().zip(&self.labels).map(|(&b, l)| (self.apply(b), l.as_str()))
    }
}

impl Scale<f64, f64> for ConcreteScale {
    fn scale(&self, value: f64) -> f64 {
        self.apply(value)
    }

    fn domain(&self) -> (f64, f64) {
        (self.limits.min, self.limits.max)
    }

    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Resolve a declared scale with the default configuration.
///
/// # Errors
///
/// See [`materialize_scale_with`].
pub fn materialize_scale(spec: &ScaleSpec, values: Option<&Values>) -> Result<ConcreteScale> {
    materialize_scale_with(spec, values, &ScaleConfig::default())
}

/// Resolve a declared scale.
///
/// Missing limits come from `values`, padded by `config.margin`. Missing
/// breaks come from the break optimizer on those limits. Missing labels are
/// the breaks formatted as numbers. The limits are then widened to cover
/// every break.
///
/// # Errors
///
/// - [`Error::Unimplemented`] for a discrete scale.
/// - [`Error::MissingScaleValues`] / [`Error::DiscreteData`] when limits must
///   be derived but `values` is absent / not numeric.
/// - [`Error::LabelCountMismatch`] when explicit labels don't match the breaks.
/// - Any break optimizer failure.
pub fn materialize_scale_with(spec: &ScaleSpec, values: Option<&Values>, config: &ScaleConfig) -> Result<ConcreteScale> {
    let scale = match spec {
        ScaleSpec::Continuous(scale) => scale,
        ScaleSpec::Discrete(_) => return Err(Error::Unimplemented("discrete scales")),
    };

    let mut limits = match scale.limits {
        Some(limits) => limits,
        None => {
            let values = values.ok_or(Error::MissingScaleValues)?;
            let xs = values.as_numbers().ok_or(Error::DiscreteData)?;
            data_range(xs, config.margin)
        }
    };

    let breaks = match &scale.breaks {
        Some(breaks) => breaks.clone(),
        None => {
            let (lo, hi) = if limits.min == limits.max {
                (limits.min - 1.0, limits.max + 1.0)
            } else {
                (limits.min, limits.max)
            };
            breaks::search(lo, hi, config.target_ticks, &config.breaks)?.expand()
        }
    };

    let labels = match &scale.labels {
        Some(labels) if labels.len() != breaks.len() => {
            return Err(Error::LabelCountMismatch { breaks: breaks.len(), labels: labels.len() });
        }
        Some(labels) => labels.clone(),
        None => breaks.iter().copied().map(format_break).collect(),
    };

    if let (Some(&first), Some(&last)) = (breaks.first(), breaks.last()) {
        limits.min = limits.min.min(first);
        limits.max = limits.max.max(last);
    }

    tracing::debug!(min = limits.min, max = limits.max, n_breaks = breaks.len(), "scale materialized");
    Ok(ConcreteScale { limits, breaks, labels })
}

/// Plain decimal for `1e-6 <= |x| < 1e21`, scientific notation outside.
fn format_break(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&x.abs()) {
        x.to_string()
    } else {
        format!("{x:e}")
    }
}

/// Resolve a scale for every name in `wanted`.
///
/// Names without a declaration get an empty continuous scale; values come
/// from the matching entry of `aes`.
///
/// # Errors
///
/// Propagates the first [`materialize_scale`] failure.
pub fn materialize_scales(aes: &ConcreteAes, wanted: &[&str], given: &Scales) -> Result<BTreeMap<String, ConcreteScale>> {
    wanted
        .iter()
        .map(|&name| {
            let spec = given.get(name).cloned().unwrap_or_default();
            let scale = materialize_scale(&spec, aes.get(name))?;
            Ok((name.to_string(), scale))
        })
        .collect()
}
