//! # Trueno-GG
//!
//! Grammar of Graphics plot specification resolver.
//!
//! Callers declare data, aesthetic mappings, geometry layers and scale
//! overrides as independent components. trueno-gg merges them, resolves
//! every layer against the data, derives the missing scale limits, breaks
//! and labels, and produces a scene normalized to the `[0, 1] x [0, 1]`
//! surface that a renderer paints.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_gg::prelude::*;
//!
//! let data = DataFrame::new()
//!     .with_f64("height", &[1.0, 2.0, 3.0, 4.0, 10.0])?
//!     .with_f64("weight", &[0.0, 10.0, 20.0, 30.0, 40.0])?;
//!
//! let plot = GGPlot::new(data)
//!     .aes(Aes::new().x("height").y("weight"))
//!     .geom(Geom::point().colour("steelblue"))
//!     .add(scale_y_continuous(ContinuousScale::new().limits(0.0, 50.0)));
//!
//! let mut svg = SvgRenderer::new(640, 480);
//! plot.render(&mut svg)?;
//! assert!(svg.to_svg().contains("<circle"));
//! # Ok::<(), trueno_gg::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): YAML parsing of [`config::ScaleConfig`]
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Talbot, J., Lin, S., & Hanrahan, P. (2010). "An Extension of Wilkinson's
//!   Algorithm for Positioning Tick Labels on Axes." IEEE InfoVis.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Axis break selection.
pub mod breaks;

/// Scale resolution settings.
pub mod config;

// ============================================================================
// Specification Modules
// ============================================================================

/// Grammar of Graphics implementation.
pub mod grammar;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Scenes and renderers.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-gg operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_gg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::breaks::{BreakConfig, Breaks};
    pub use crate::config::ScaleConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        compile, scale_continuous, scale_discrete, scale_x_continuous, scale_y_continuous, Aes,
        CompiledPlot, ContinuousScale, DataFrame, DataValue, DiscreteScale, GGPlot, Geom, GeomKind,
        PlotComponent, ScaleSpec, Values,
    };
    pub use crate::render::{Renderer, Scene, SvgRenderer};
    pub use crate::scale::{apply_scale, Limits, Scale};
}
