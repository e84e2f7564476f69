//! Falsification Tests for the plot compilation pipeline.
//!
//! Each test is a falsifiable claim about the public API that can be
//! empirically refuted.
//!
//! Run: cargo test --test falsification_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;

use trueno_gg::breaks::{breaks, expand_breaks, search, BreakConfig};
use trueno_gg::config::ScaleConfig;
use trueno_gg::grammar::{
    compile, merge, scale_continuous, scale_discrete, scale_x_continuous, scale_y_continuous, Aes,
    ContinuousScale, DataFrame, DataValue, DiscreteScale, GGPlot, Geom, PlotComponent, Values,
};
use trueno_gg::render::{Renderer, Scene, SvgRenderer};
use trueno_gg::scale::{apply_scale, data_range, scale_distance, scale_position, Limits};
use trueno_gg::Error;

fn sample() -> DataFrame {
    DataFrame::new()
        .with_f64("t", &[1.0, 2.0, 3.0, 4.0, 10.0])
        .unwrap()
        .with_f64("v", &[2.0, 3.5, 1.0, 8.0, 6.0])
        .unwrap()
        .with_str("kind", &["a", "b", "a", "b", "a"])
        .unwrap()
}

// ============================================================================
// SECTION 1: MERGE CLAIMS
// ============================================================================

/// Claim 1: Conflicting limits on one scale abort the merge
#[test]
fn claim_01_duplicate_limits_rejected() {
    let err = merge(vec![
        scale_x_continuous(ContinuousScale::new().limits(0.0, 10.0)),
        scale_x_continuous(ContinuousScale::new().limits(0.0, 20.0)),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("limits specified more than once"), "Claim 1 FALSIFIED: {err}");
}

/// Claim 2: Complementary overrides on one scale combine
#[test]
fn claim_02_complementary_overrides_combine() {
    let plot = compile(
        &sample(),
        vec![
            Aes::new().x("t").y("v").into(),
            Geom::point().into(),
            scale_x_continuous(ContinuousScale::new().limits(0.0, 20.0)),
            scale_x_continuous(ContinuousScale::new().breaks(vec![0.0, 10.0, 20.0])),
        ],
    )
    .unwrap();
    let x = plot.scale("x").unwrap();
    assert_eq!(x.breaks, vec![0.0, 10.0, 20.0]);
    assert_eq!(x.labels, vec!["0", "10", "20"]);
    assert_eq!(x.limits, Limits::new(0.0, 20.0));
}

/// Claim 3: A second mapping of the same aesthetic is an error, not an override
#[test]
fn claim_03_duplicate_aesthetic_rejected() {
    let err = GGPlot::new(sample()).aes(Aes::new().x("t")).aes(Aes::new().x("v")).compile().unwrap_err();
    assert_eq!(err, Error::DuplicateAesthetic("x".to_string()));
}

/// Claim 4: Continuous and discrete declarations never merge
#[test]
fn claim_04_scale_kinds_do_not_mix() {
    let err = merge(vec![
        scale_continuous("colour", ContinuousScale::new()),
        scale_discrete("colour", DiscreteScale::new()),
    ])
    .unwrap_err();
    assert_eq!(err, Error::ScaleKindMismatch("colour".to_string()));
}

// ============================================================================
// SECTION 2: LAYER CLAIMS
// ============================================================================

/// Claim 5: Layers inherit plot-wide positions they do not map themselves
#[test]
fn claim_05_layers_inherit_positions() {
    let plot = compile(
        &sample(),
        vec![Aes::new().y("v").into(), Geom::point().aes(Aes::new().x("t")).into()],
    )
    .unwrap();
    let layer = &plot.layers[0];
    assert_eq!(layer.aes["x"], Values::Number(vec![1.0, 2.0, 3.0, 4.0, 10.0]));
    assert_eq!(layer.aes["y"], Values::Number(vec![2.0, 3.5, 1.0, 8.0, 6.0]));
}

/// Claim 6: Unmapped optional aesthetics fall back to constants
#[test]
fn claim_06_defaults_are_properties() {
    let plot = compile(&sample(), vec![Aes::new().x("t").y("v").into(), Geom::line().into()]).unwrap();
    let layer = &plot.layers[0];
    assert_eq!(layer.props["colour"], DataValue::from("black"));
    assert_eq!(layer.props["size"], DataValue::Number(0.5));
    assert!(!layer.aes.contains_key("colour"));
}

/// Claim 7: Missing required aesthetics name the geometry and aesthetic
#[test]
fn claim_07_required_aesthetic_enforced() {
    let err = compile(&sample(), vec![Aes::new().y("v").into(), Geom::line().into()]).unwrap_err();
    assert_eq!(err.to_string(), "geom line requires the aesthetic x");
}

/// Claim 8: Constant aesthetics broadcast to the data length
#[test]
fn claim_08_constants_broadcast() {
    let plot = compile(
        &sample(),
        vec![Aes::new().x("t").y("v").constant("size", 3.0).into(), Geom::point().into()],
    )
    .unwrap();
    assert_eq!(plot.layers[0].aes["size"], Values::Number(vec![3.0; 5]));
    assert_eq!(plot.scale("size").unwrap().limits.min, 2.0);
}

/// Claim 9: A layer may bring its own data
#[test]
fn claim_09_layer_data_override() {
    let other = DataFrame::from_xy(&[100.0, 200.0], &[0.0, 1.0]);
    let plot = compile(
        &sample(),
        vec![
            Aes::new().x("t").y("v").into(),
            Geom::point().into(),
            Geom::line().data(other).aes(Aes::new().x("x").y("y")).into(),
        ],
    )
    .unwrap();
    assert_eq!(plot.layers[1].aes["x"].len(), 2);
    assert!(plot.scale("x").unwrap().limits.max >= 200.0);
}

// ============================================================================
// SECTION 3: SCALE CLAIMS
// ============================================================================

/// Claim 10: Data [1,2,3,4,10] gets ticks 0, 2.5, .., 10
#[test]
fn claim_10_reference_breaks() {
    let plot = compile(
        &sample(),
        vec![Aes::new().x("t").y("v").into(), Geom::point().into(), scale_x_continuous(ContinuousScale::new())],
    )
    .unwrap();
    let x = plot.scale("x").unwrap();
    assert_eq!(x.breaks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    assert_eq!(x.labels, vec!["0", "2.5", "5", "7.5", "10"]);
    assert_relative_eq!(x.limits.min, 0.0);
    assert_relative_eq!(x.limits.max, 10.45, epsilon = 1e-12);
}

/// Claim 11: Final limits always contain every break and every value
#[test]
fn claim_11_limits_contain_breaks_and_data() {
    let plot = compile(&sample(), vec![Aes::new().x("t").y("v").into(), Geom::point().into()]).unwrap();
    for (name, scale) in &plot.scales {
        for b in &scale.breaks {
            assert!(scale.limits.min <= *b && *b <= scale.limits.max, "Claim 11 FALSIFIED for {name}");
        }
        let values = plot.layers[0].aes[name].as_numbers().unwrap();
        for x in values {
            assert!(scale.limits.min <= *x && *x <= scale.limits.max, "Claim 11 FALSIFIED for {name}");
        }
    }
}

/// Claim 12: String data never reaches a continuous scale
#[test]
fn claim_12_discrete_data_rejected() {
    let inferred = compile(&sample(), vec![Aes::new().x("kind").y("v").into(), Geom::point().into()]);
    assert!(matches!(inferred, Err(Error::Unimplemented(_))));

    let declared = compile(
        &sample(),
        vec![Aes::new().x("t").y("kind").into(), Geom::point().into(), scale_y_continuous(ContinuousScale::new())],
    );
    assert_eq!(declared.unwrap_err(), Error::DiscreteData);
}

/// Claim 13: Discrete scales fail loudly
#[test]
fn claim_13_discrete_scale_unimplemented() {
    let err = compile(
        &sample(),
        vec![Aes::new().x("t").y("v").into(), Geom::point().into(), scale_discrete("y", DiscreteScale::new())],
    )
    .unwrap_err();
    assert!(err.to_string().contains("not implemented"));
}

/// Claim 14: Normalization maps limits onto [0, 1]
#[test]
fn claim_14_normalization_endpoints() {
    let limits = data_range(&[3.0, -2.0, 8.0], 0.1);
    assert_relative_eq!(limits.min, -3.0);
    assert_relative_eq!(limits.max, 9.0);
    assert_relative_eq!(apply_scale(limits.min, &limits), 0.0);
    assert_relative_eq!(apply_scale(limits.max, &limits), 1.0);
    assert_relative_eq!(scale_position(limits.max, &limits, true), 0.0);
    assert_relative_eq!(scale_distance(6.0, &limits), 0.5);
}

// ============================================================================
// SECTION 4: BREAK OPTIMIZER CLAIMS
// ============================================================================

/// Claim 15: Breaks are evenly spaced and ascending
#[test]
fn claim_15_breaks_evenly_spaced() {
    for (lo, hi) in [(0.0, 1.0), (-3.7, 12.2), (1000.0, 1010.0), (0.001, 0.009)] {
        let b = breaks(lo, hi, 5).unwrap();
        let ticks = expand_breaks(&b);
        assert!(ticks.len() >= 2, "Claim 15 FALSIFIED for [{lo}, {hi}]");
        assert_eq!(ticks[0], b.min);
        for w in ticks.windows(2) {
            assert!(w[1] > w[0]);
            assert_relative_eq!(w[1] - w[0], b.step, epsilon = b.step * 1e-9);
        }
    }
}

/// Claim 16: Loose mode covers the whole range
#[test]
fn claim_16_loose_mode_covers_range() {
    let config = BreakConfig::default().loose(true);
    let b = search(0.55, 10.45, 5, &config).unwrap();
    assert!(b.min <= 0.55 && b.max >= 10.45);
}

/// Claim 17: Degenerate ranges are reported, not looped on
#[test]
fn claim_17_degenerate_range_reported() {
    assert!(matches!(breaks(5.0, 5.0, 5), Err(Error::BreakSearchExhausted { .. })));
    assert!(matches!(breaks(f64::NAN, 1.0, 5), Err(Error::BreakSearchExhausted { .. })));
}

/// Claim 18: Configuration changes the tick target
#[test]
fn claim_18_config_tick_target() {
    let plot = GGPlot::new(sample())
        .aes(Aes::new().x("t").y("v"))
        .geom(Geom::point())
        .config(ScaleConfig::new().target_ticks(3))
        .compile()
        .unwrap();
    assert_eq!(plot.scale("x").unwrap().breaks, vec![0.0, 5.0, 10.0]);
}

// ============================================================================
// SECTION 5: RENDER HAND-OFF CLAIMS
// ============================================================================

struct CountingRenderer {
    points: usize,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, scene: &Scene) -> trueno_gg::Result<()> {
        for layer in &scene.layers {
            self.points += layer.points().map_or(0, |p| p.len());
        }
        Ok(())
    }
}

/// Claim 19: Every row reaches the renderer in normalized coordinates
#[test]
fn claim_19_rows_reach_renderer() {
    let plot = GGPlot::new(sample()).aes(Aes::new().x("t").y("v")).geom(Geom::point()).geom(Geom::line());
    let mut counter = CountingRenderer { points: 0 };
    plot.render(&mut counter).unwrap();
    assert_eq!(counter.points, 10);

    let scene = plot.compile().unwrap().scene();
    for layer in &scene.layers {
        for (u, v) in layer.points().unwrap() {
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v), "Claim 19 FALSIFIED");
        }
    }
}

/// Claim 20: The SVG renderer emits one circle per row
#[test]
fn claim_20_svg_output() {
    let mut svg = SvgRenderer::new(640, 480);
    let component: PlotComponent = Geom::point().colour("steelblue").into();
    GGPlot::new(sample()).aes(Aes::new().x("t").y("v")).add(component).render(&mut svg).unwrap();
    let doc = svg.to_svg();
    assert_eq!(doc.matches("<circle").count(), 5);
    assert!(doc.contains("fill=\"steelblue\""));
    assert!(doc.contains(">7.5</text>") || doc.contains(">5</text>"));
}
