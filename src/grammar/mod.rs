//! Grammar of Graphics implementation.
//!
//! Provides declarative plot specification based on Wilkinson's
//! Grammar of Graphics [Wilkinson 2005].
//!
//! # Components
//!
//! - **Data**: Typed, named columns ([`DataFrame`])
//! - **Aesthetics**: Mappings from data to visual channels (x, y, colour, size, shape, alpha)
//! - **Geometries**: Drawable layers (point, line)
//! - **Scales**: Limits, breaks and labels for each mapped aesthetic
//!
//! Components are declared independently, merged with conflict detection,
//! and compiled into concrete layers and scales.
//!
//! # Example
//!
//! ```rust
//! use trueno_gg::grammar::*;
//!
//! let data = DataFrame::from_xy(&[1.0, 2.0, 3.0, 4.0, 10.0], &[4.0, 5.0, 6.0, 7.0, 8.0]);
//! let plot = GGPlot::new(data)
//!     .aes(Aes::new().x("x").y("y"))
//!     .geom(Geom::point())
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(plot.scale("x").unwrap().breaks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod data;
mod geom;
mod ggplot;
mod scale;

pub use aes::{apply_data_to_aesthetics, merge_aesthetics, Aes, Binding, ConcreteAes, DeriveFn};
pub use data::{ColumnRef, DataFrame, DataValue, ValueType, Values};
pub use geom::{materialize_geom, AesSpec, AxisRole, ConcreteGeom, Geom, GeomKind, GeomSpecifier};
pub use ggplot::{compile, compile_spec, compile_with, merge, CompiledPlot, GGPlot, PlotComponent, PlotSpec};
pub use scale::{
    materialize_scale, materialize_scale_with, materialize_scales, merge_scales, scale_continuous,
    scale_discrete, scale_x_continuous, scale_y_continuous, ConcreteScale, ContinuousScale, DiscreteScale,
    ScaleSpec, Scales,
};
