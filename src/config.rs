//! Scale resolution settings.
//!
//! With the `config` feature these can be read from YAML; fields missing
//! from the document keep their defaults.

use crate::breaks::BreakConfig;
#[cfg(feature = "config")]
use crate::error::{Error, Result};

/// Tunables for deriving limits and breaks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleConfig {
    /// Padding, as a fraction of the data span, when a scale derives its
    /// limits from values.
    #[cfg_attr(feature = "config", serde(default = "default_margin"))]
    pub margin: f64,

    /// Padding applied when the compiler infers an undeclared scale.
    #[cfg_attr(feature = "config", serde(default = "default_inferred_margin"))]
    pub inferred_margin: f64,

    /// Desired number of ticks.
    #[cfg_attr(feature = "config", serde(default = "default_target_ticks"))]
    pub target_ticks: usize,

    /// Break search settings.
    #[cfg_attr(feature = "config", serde(default))]
    pub breaks: BreakConfig,
}

fn default_margin() -> f64 {
    0.05
}
fn default_inferred_margin() -> f64 {
    0.0
}
fn default_target_ticks() -> usize {
    5
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            inferred_margin: default_inferred_margin(),
            target_ticks: default_target_ticks(),
            breaks: BreakConfig::default(),
        }
    }
}

impl ScaleConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the padding used for data-derived limits.
    #[must_use]
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the desired tick count.
    #[must_use]
    pub fn target_ticks(mut self, m: usize) -> Self {
        self.target_ticks = m;
        self
    }

    /// Set the break search settings.
    #[must_use]
    pub fn breaks(mut self, breaks: BreakConfig) -> Self {
        self.breaks = breaks;
        self
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    #[cfg(feature = "config")]
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Serializes the configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "config")]
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScaleConfig::default();
        assert_eq!(config.margin, 0.05);
        assert_eq!(config.inferred_margin, 0.0);
        assert_eq!(config.target_ticks, 5);
        assert_eq!(config.breaks.nice_steps, vec![1.0, 5.0, 2.0, 2.5, 4.0, 3.0]);
        assert_eq!(config.breaks.weights, [0.2, 0.25, 0.5, 0.05]);
        assert!(!config.breaks.loose);
    }

    #[test]
    fn test_builders() {
        let config = ScaleConfig::new().margin(0.1).target_ticks(7).breaks(BreakConfig::default().loose(true));
        assert_eq!(config.margin, 0.1);
        assert_eq!(config.target_ticks, 7);
        assert!(config.breaks.loose);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_partial_yaml() {
        let yaml = "target_ticks: 8\nbreaks:\n  loose: true\n";
        let config = ScaleConfig::parse(yaml).unwrap();
        assert_eq!(config.target_ticks, 8);
        assert!(config.breaks.loose);
        assert_eq!(config.margin, 0.05);
        assert_eq!(config.breaks.nice_steps.len(), 6);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_empty_document_object() {
        let config = ScaleConfig::parse("{}").unwrap();
        assert_eq!(config, ScaleConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_error_reports_line() {
        let err = ScaleConfig::parse("margin: 0.1\ntarget_ticks: [oops\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_yaml_roundtrip() {
        let config = ScaleConfig::new().target_ticks(6);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ScaleConfig::parse(&yaml).unwrap(), config);
    }
}
