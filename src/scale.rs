//! Scale functions for data-to-visual mappings.
//!
//! Continuous scales map a numeric domain onto the normalized `[0, 1]`
//! surface consumed by renderers. Based on the Grammar of Graphics
//! [Wilkinson 2005].

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Numeric extent of a continuous scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Limits {
    /// Create limits from bounds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the extent.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Smallest extent containing both.
    #[must_use]
    pub fn union(&self, other: &Limits) -> Limits {
        Limits { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Normalize a value against these limits.
    ///
    /// `min` maps to 0 and `max` to 1; values outside the limits fall outside
    /// `[0, 1]`.
    #[must_use]
    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.min) / self.span()
    }
}

impl Scale<f64, f64> for Limits {
    fn scale(&self, value: f64) -> f64 {
        self.normalize(value)
    }

    fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Exact extent of `xs`, widened by `margin * (max - min)` on each side.
///
/// An empty slice yields `NaN` bounds.
#[must_use]
pub fn data_range(xs: &[f64], margin: f64) -> Limits {
    let Some((&first, rest)) = xs.split_first() else {
        return Limits::new(f64::NAN, f64::NAN);
    };

    let (lo, hi) = rest.iter().fold((first, first), |(lo, hi), &x| {
        (if x < lo { x } else { lo }, if x > hi { x } else { hi })
    });

    let pad = (hi - lo) * margin;
    Limits::new(lo - pad, hi + pad)
}

/// Normalize a single value into `[0, 1]` using any continuous scale.
#[must_use]
pub fn apply_scale<S: Scale<f64, f64> + ?Sized>(x: f64, scale: &S) -> f64 {
    scale.scale(x)
}

/// Normalize every value of `xs`.
#[must_use]
pub fn apply_scale_all<S: Scale<f64, f64> + ?Sized>(xs: &[f64], scale: &S) -> Vec<f64> {
    xs.iter().map(|&x| scale.scale(x)).collect()
}

/// Normalized position of `x`, optionally flipped (`1 - v`).
#[must_use]
pub fn scale_position(x: f64, limits: &Limits, flip: bool) -> f64 {
    let v = limits.normalize(x);
    if flip {
        1.0 - v
    } else {
        v
    }
}

/// Normalized positions of `xs`, optionally flipped.
#[must_use]
pub fn scale_positions(xs: &[f64], limits: &Limits, flip: bool) -> Vec<f64> {
    xs.iter().map(|&x| scale_position(x, limits, flip)).collect()
}

/// Express a data-unit distance as a fraction of the scale's span.
#[must_use]
pub fn scale_distance(d: f64, limits: &Limits) -> f64 {
    d / limits.span()
}
