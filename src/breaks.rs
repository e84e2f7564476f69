//! Axis break selection.
//!
//! An extended Wilkinson search [Talbot, Lin & Hanrahan 2010]: every
//! candidate labelling is an arithmetic progression `start * step / j ..`
//! scored on coverage, simplicity, density and legibility. Four nested
//! loops enumerate `(j, q, k, z)` and prune any branch whose best possible
//! score cannot beat the incumbent.
//!
//! # References
//!
//! - Talbot, J., Lin, S., & Hanrahan, P. (2010). "An Extension of Wilkinson's
//!   Algorithm for Positioning Tick Labels on Axes." IEEE InfoVis.

use crate::error::{Error, Result};

/// Upper bound (exclusive) on the step-skipping factor `j`.
const MAX_J: usize = 100;
/// Upper bound (exclusive) on the tick count `k`.
const MAX_K: usize = 100;
/// Upper bound (exclusive) on the magnitude exponent `z`.
const MAX_Z: i32 = 100;
/// Tolerance for "zero lands on a tick".
const ZERO_EPS: f64 = 1e-10;
/// Scores start below any reachable candidate.
const INITIAL_SCORE: f64 = -2.0;

/// Tunables of the break search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BreakConfig {
    /// Nice step multipliers, most preferred first.
    pub nice_steps: Vec<f64>,
    /// Weights for `[coverage, simplicity, density, legibility]`.
    pub weights: [f64; 4],
    /// Only accept windows that contain the whole data range.
    pub loose: bool,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self { nice_steps: vec![1.0, 5.0, 2.0, 2.5, 4.0, 3.0], weights: [0.2, 0.25, 0.5, 0.05], loose: false }
    }
}

impl BreakConfig {
    /// Require windows to contain the data range.
    #[must_use]
    pub fn loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    /// Replace the nice step multipliers.
    #[must_use]
    pub fn nice_steps(mut self, q: Vec<f64>) -> Self {
        self.nice_steps = q;
        self
    }

    /// Replace the scoring weights.
    #[must_use]
    pub fn weights(mut self, w: [f64; 4]) -> Self {
        self.weights = w;
        self
    }

    /// Check the configuration can drive a search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBreakConfig`] for an empty multiplier list or
    /// a non-positive / non-finite multiplier.
    pub fn validate(&self) -> Result<()> {
        if self.nice_steps.is_empty() {
            return Err(Error::InvalidBreakConfig("nice_steps must not be empty".to_string()));
        }
        if let Some(q) = self.nice_steps.iter().find(|q| !(q.is_finite() && **q > 0.0)) {
            return Err(Error::InvalidBreakConfig(format!("nice step {q} must be positive")));
        }
        Ok(())
    }
}

/// An evenly spaced tick progression `min, min + step, .., max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breaks {
    /// First tick.
    pub min: f64,
    /// Last tick.
    pub max: f64,
    /// Distance between ticks.
    pub step: f64,
}

impl Breaks {
    /// Expand into explicit tick positions.
    #[must_use]
    pub fn expand(&self) -> Vec<f64> {
        expand_breaks(self)
    }
}

/// Best breaks for `[d_min, d_max]` aiming at `m` ticks, default config.
///
/// # Errors
///
/// See [`search`].
pub fn breaks(d_min: f64, d_max: f64, m: usize) -> Result<Breaks> {
    search(d_min, d_max, m, &BreakConfig::default())
}

/// Best breaks for `[d_min, d_max]` aiming at `m` ticks.
///
/// # Errors
///
/// Returns [`Error::InvalidBreakConfig`] if `m < 2` or the config is invalid,
/// and [`Error::BreakSearchExhausted`] when the range is empty, inverted or
/// not finite, or when no candidate survives the search.
pub fn search(d_min: f64, d_max: f64, m: usize, config: &BreakConfig) -> Result<Breaks> {
    if m < 2 {
        return Err(Error::InvalidBreakConfig(format!("target tick count {m} is below 2")));
    }
    config.validate()?;

    let exhausted = || Error::BreakSearchExhausted { min: d_min, max: d_max };
    if !(d_min.is_finite() && d_max.is_finite() && d_max > d_min) {
        return Err(exhausted());
    }

    let q = &config.nice_steps;
    let w = &config.weights;
    let n = q.len();
    let m = m as f64;

    let mut best = Incumbent::default();

    'j: for j in 1..MAX_J {
        let jf = j as f64;
        for (i, &qi) in q.iter().enumerate() {
            let sm = simplicity_max(n, i, jf);
            if w[0] + w[1] * sm + w[2] + w[3] < best.score {
                break 'j;
            }

            for k in 2..MAX_K {
                let kf = k as f64;
                let dm = density_max(kf, m);
                if w[0] + w[1] * sm + w[2] * dm + w[3] < best.score {
                    break;
                }

                let delta = (d_max - d_min) / (kf + 1.0) / jf / qi;
                let mut z = delta.log10().ceil() as i32;
                while z < MAX_Z {
                    let step = jf * qi * 10f64.powi(z);
                    let cm = coverage_max(d_min, d_max, step * (kf - 1.0));
                    if w[0] * cm + w[1] * sm + w[2] * dm + w[3] < best.score {
                        break;
                    }

                    let min_start = (d_max / step).floor() as i64 * j as i64 - (k as i64 - 1) * j as i64;
                    let max_start = (d_min / step).ceil() as i64 * j as i64;

                    for start in min_start..=max_start {
                        let l_min = start as f64 * (step / jf);
                        let l_max = l_min + step * (kf - 1.0);
                        if !advances(l_min, step) || !advances(l_max, step) {
                            continue;
                        }
                        let c = coverage(d_min, d_max, l_min, l_max);
                        let s = simplicity(n, i, jf, l_min, l_max, step);
                        let g = density(kf, m, d_min, d_max, l_min, l_max);
                        let score = w[0] * c + w[1] * s + w[2] * g + w[3];

                        let contains = l_min <= d_min && l_max >= d_max;
                        if score > best.score && (!config.loose || contains) {
                            best = Incumbent {
                                breaks: Some(Breaks { min: l_min, max: l_max, step }),
                                score,
                            };
                        }
                    }

                    z += 1;
                }
            }
        }
    }

    tracing::trace!(d_min, d_max, score = best.score, "break search finished");
    best.breaks.ok_or_else(exhausted)
}

/// Expand a progression into ticks by repeated addition while `<= max`.
///
/// Stops early if `step` is too small to move past a tick.
#[must_use]
pub fn expand_breaks(breaks: &Breaks) -> Vec<f64> {
    let mut ticks = Vec::new();
    if !(breaks.step > 0.0) {
        return ticks;
    }
    let mut x = breaks.min;
    while x <= breaks.max {
        ticks.push(x);
        let next = x + breaks.step;
        if next <= x {
            break;
        }
        x = next;
    }
    ticks
}

/// Adding `step` to `x` yields a larger float.
fn advances(x: f64, step: f64) -> bool {
    x + step > x
}

/// Best candidate seen so far.
#[derive(Debug, Clone, Copy)]
struct Incumbent {
    breaks: Option<Breaks>,
    score: f64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self { breaks: None, score: INITIAL_SCORE }
    }
}

fn index_penalty(n: usize, i: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}

fn simplicity(n: usize, i: usize, j: f64, l_min: f64, l_max: f64, step: f64) -> f64 {
    let rem = l_min - step * (l_min / step).floor();
    let zero_on_tick = (rem < ZERO_EPS || step - rem < ZERO_EPS) && l_min <= 0.0 && l_max >= 0.0;
    let v = if zero_on_tick { 1.0 } else { 0.0 };
    1.0 - index_penalty(n, i) - j + v
}

fn simplicity_max(n: usize, i: usize, j: f64) -> f64 {
    2.0 - index_penalty(n, i) - j
}

fn coverage(d_min: f64, d_max: f64, l_min: f64, l_max: f64) -> f64 {
    let range = d_max - d_min;
    1.0 - 0.5 * ((d_max - l_max).powi(2) + (d_min - l_min).powi(2)) / (0.1 * range).powi(2)
}

fn coverage_max(d_min: f64, d_max: f64, span: f64) -> f64 {
    let range = d_max - d_min;
    if span > range {
        let half = (span - range) / 2.0;
        1.0 - half.powi(2) / (0.1 * range).powi(2)
    } else {
        1.0
    }
}

fn density(k: f64, m: f64, d_min: f64, d_max: f64, l_min: f64, l_max: f64) -> f64 {
    let r = (k - 1.0) / (l_max - l_min);
    let rt = (m - 1.0) / (l_max.max(d_max) - l_min.min(d_min));
    2.0 - (r / rt).max(rt / r)
}

fn density_max(k: f64, m: f64) -> f64 {
    if k >= m {
        2.0 - (k - 1.0) / (m - 1.0)
    } else {
        1.0
    }
}
