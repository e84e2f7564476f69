//! Error types for trueno-gg operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a plot specification.
///
/// Every error aborts the compilation that raised it; nothing is recovered
/// internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Two merged mappings both bind the same aesthetic.
    #[error("more than 1 specification for aesthetic {0}")]
    DuplicateAesthetic(String),

    /// Two merged scales both override the same field.
    #[error("for scale '{scale}', {field} specified more than once")]
    DuplicateScaleField {
        /// Scale (aesthetic) name.
        scale: String,
        /// One of `limits`, `breaks`, `labels`.
        field: &'static str,
    },

    /// Continuous and discrete declarations under one scale name.
    #[error("cannot combine continuous and discrete features on scale '{0}'")]
    ScaleKindMismatch(String),

    /// Layers supplied both string and numeric vectors for one aesthetic.
    #[error("for aesthetic {0}, both discrete and continuous data given")]
    MixedAestheticTypes(String),

    /// A continuous scale was asked to derive limits from string data.
    #[error("cannot compute continuous scale on discrete data")]
    DiscreteData,

    /// A continuous scale has no limits and no values to derive them from.
    #[error("cannot compute limits for scale without values")]
    MissingScaleValues,

    /// A geometry's required aesthetic could not be resolved.
    #[error("geom {geom} requires the aesthetic {aes}")]
    MissingRequiredAesthetic {
        /// Geometry kind name.
        geom: &'static str,
        /// Aesthetic name.
        aes: String,
    },

    /// A code path that is deliberately not implemented (discrete scales).
    #[error("{0} not implemented")]
    Unimplemented(&'static str),

    /// The break search produced no candidate.
    #[error("couldn't find a reasonable set of breaks for [{min}, {max}]")]
    BreakSearchExhausted {
        /// Lower data bound.
        min: f64,
        /// Upper data bound.
        max: f64,
    },

    /// Break optimizer configuration is unusable.
    #[error("invalid break configuration: {0}")]
    InvalidBreakConfig(String),

    /// Explicit labels do not line up with the breaks.
    #[error("scale has {breaks} breaks but {labels} labels")]
    LabelCountMismatch {
        /// Number of breaks.
        breaks: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Column lookup by name failed.
    #[error("no column named '{0}'")]
    UnknownColumn(String),

    /// Column lookup by index failed.
    #[error("column index {index} out of range ({ncol} columns)")]
    ColumnIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of columns.
        ncol: usize,
    },

    /// A column with this name already exists.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A column's values do not share a single type.
    #[error("column '{0}' mixes value types")]
    ColumnType(String),

    /// A column's length disagrees with the data frame.
    #[error("Data length mismatch: column '{column}' has {actual} rows, expected {expected}")]
    DataLengthMismatch {
        /// Column name.
        column: String,
        /// Row count of the data frame.
        expected: usize,
        /// Row count of the column.
        actual: usize,
    },

    /// A renderer could not draw a scene.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// YAML configuration could not be parsed.
    #[cfg(feature = "config")]
    #[error("config parse error at line {line}: {message}")]
    ConfigParse {
        /// 1-based line (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingRequiredAesthetic { geom: "point", aes: "y".to_string() };
        assert_eq!(err.to_string(), "geom point requires the aesthetic y");
    }

    #[test]
    fn test_duplicate_scale_field() {
        let err = Error::DuplicateScaleField { scale: "x".to_string(), field: "limits" };
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("limits"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err =
            Error::DataLengthMismatch { column: "y".to_string(), expected: 10, actual: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }
}
