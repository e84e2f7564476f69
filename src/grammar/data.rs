//! Data abstraction for Grammar of Graphics.
//!
//! An ordered, typed, columnar data frame plus the typed value vectors that
//! flow between aesthetics, geoms and scales.

use std::fmt;

use crate::error::{Error, Result};

/// Type tag of a column or scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Text.
    Text,
    /// Floating point number.
    Number,
    /// Boolean.
    Bool,
    /// Missing.
    Null,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "string",
            ValueType::Number => "number",
            ValueType::Bool => "boolean",
            ValueType::Null => "null",
        };
        f.write_str(name)
    }
}

/// A scalar value in a data frame, an aesthetic constant or a geom property.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A boolean value.
    Bool(bool),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Type tag of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            DataValue::Number(_) => ValueType::Number,
            DataValue::Text(_) => ValueType::Text,
            DataValue::Bool(_) => ValueType::Bool,
            DataValue::Null => ValueType::Null,
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Number(f64::from(v))
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// A typed value vector: the unit of exchange between aesthetics, geoms
/// and scales.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Strings.
    Text(Vec<String>),
    /// Numbers.
    Number(Vec<f64>),
}

impl Values {
    /// Type tag of the elements.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Values::Text(_) => ValueType::Text,
            Values::Number(_) => ValueType::Number,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Values::Text(v) => v.len(),
            Values::Number(v) => v.len(),
        }
    }

    /// Whether the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric elements, if this is a numeric vector.
    #[must_use]
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Values::Number(v) => Some(v),
            Values::Text(_) => None,
        }
    }

    /// String elements, if this is a string vector.
    #[must_use]
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Values::Text(v) => Some(v),
            Values::Number(_) => None,
        }
    }

    /// A vector of `n` copies of a scalar.
    ///
    /// Only strings and numbers broadcast; other scalars yield `None`.
    #[must_use]
    pub fn broadcast(value: &DataValue, n: usize) -> Option<Self> {
        match value {
            DataValue::Number(x) => Some(Values::Number(vec![*x; n])),
            DataValue::Text(s) => Some(Values::Text(vec![s.clone(); n])),
            DataValue::Bool(_) | DataValue::Null => None,
        }
    }
}

impl From<Vec<f64>> for Values {
    fn from(v: Vec<f64>) -> Self {
        Values::Number(v)
    }
}

impl From<&[f64]> for Values {
    fn from(v: &[f64]) -> Self {
        Values::Number(v.to_vec())
    }
}

impl From<Vec<String>> for Values {
    fn from(v: Vec<String>) -> Self {
        Values::Text(v)
    }
}

impl From<&[&str]> for Values {
    fn from(v: &[&str]) -> Self {
        Values::Text(v.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Column lookup key: by name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Column name.
    Name(String),
    /// Zero-based column position.
    Index(usize),
}

impl From<&str> for ColumnRef {
    fn from(s: &str) -> Self {
        ColumnRef::Name(s.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(s: String) -> Self {
        ColumnRef::Name(s)
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    value_type: ValueType,
    values: Vec<DataValue>,
}

impl Column {
    fn to_values(&self) -> Values {
        match self.value_type {
            ValueType::Number | ValueType::Null => Values::Number(
                self.values.iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect(),
            ),
            ValueType::Text => Values::Text(
                self.values.iter().map(|v| v.as_str().unwrap_or_default().to_string()).collect(),
            ),
            ValueType::Bool => Values::Text(
                self.values
                    .iter()
                    .map(|v| match v {
                        DataValue::Bool(b) => b.to_string(),
                        _ => String::new(),
                    })
                    .collect(),
            ),
        }
    }
}

/// A columnar data frame with ordered, typed columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from x and y arrays, truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let number = |xs: &[f64]| -> Vec<DataValue> { xs.iter().map(|&v| DataValue::Number(v)).collect() };
        Self {
            columns: vec![
                Column { name: "x".to_string(), value_type: ValueType::Number, values: number(&x[..n]) },
                Column { name: "y".to_string(), value_type: ValueType::Number, values: number(&y[..n]) },
            ],
            n_rows: n,
        }
    }

    /// Add a numeric column.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name or a length that disagrees with the frame.
    pub fn add_column_f64(&mut self, name: &str, data: &[f64]) -> Result<()> {
        self.push(name, ValueType::Number, data.iter().map(|&v| DataValue::Number(v)).collect())
    }

    /// Add a text column.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name or a length that disagrees with the frame.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.push(name, ValueType::Text, data.iter().map(|&s| DataValue::from(s)).collect())
    }

    /// Add a boolean column.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name or a length that disagrees with the frame.
    pub fn add_column_bool(&mut self, name: &str, data: &[bool]) -> Result<()> {
        self.push(name, ValueType::Bool, data.iter().map(|&b| DataValue::Bool(b)).collect())
    }

    /// Add a column of arbitrary scalars; its type is that of the non-null
    /// entries, or null if all are missing.
    ///
    /// # Errors
    ///
    /// Fails if the non-null entries mix types, on a duplicate name, or on a
    /// length mismatch.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) -> Result<()> {
        let mut value_type = ValueType::Null;
        for v in &values {
            match (value_type, v.value_type()) {
                (_, ValueType::Null) => {}
                (ValueType::Null, t) => value_type = t,
                (current, t) if current != t => return Err(Error::ColumnType(name.to_string())),
                _ => {}
            }
        }
        self.push(name, value_type, values)
    }

    /// Builder form of [`DataFrame::add_column_f64`].
    ///
    /// # Errors
    ///
    /// See [`DataFrame::add_column_f64`].
    pub fn with_f64(mut self, name: &str, data: &[f64]) -> Result<Self> {
        self.add_column_f64(name, data)?;
        Ok(self)
    }

    /// Builder form of [`DataFrame::add_column_str`].
    ///
    /// # Errors
    ///
    /// See [`DataFrame::add_column_str`].
    pub fn with_str(mut self, name: &str, data: &[&str]) -> Result<Self> {
        self.add_column_str(name, data)?;
        Ok(self)
    }

    fn push(&mut self, name: &str, value_type: ValueType, values: Vec<DataValue>) -> Result<()> {
        if self.has_column(name) {
            return Err(Error::DuplicateColumn(name.to_string()));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows {
            return Err(Error::DataLengthMismatch {
                column: name.to_string(),
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.n_rows = values.len();
        self.columns.push(Column { name: name.to_string(), value_type, values });
        Ok(())
    }

    fn column(&self, column: &ColumnRef) -> Result<&Column> {
        match column {
            ColumnRef::Name(name) => self
                .columns
                .iter()
                .find(|c| &c.name == name)
                .ok_or_else(|| Error::UnknownColumn(name.clone())),
            ColumnRef::Index(index) => self
                .columns
                .get(*index)
                .ok_or(Error::ColumnIndexOutOfRange { index: *index, ncol: self.columns.len() }),
        }
    }

    /// Get a column as a typed value vector.
    ///
    /// Numeric columns become numbers (missing entries are `NaN`), text
    /// columns strings (missing entries are empty), boolean columns the
    /// strings `"true"`/`"false"`, and all-null columns `NaN` numbers.
    ///
    /// # Errors
    ///
    /// Fails if the column does not exist.
    pub fn get(&self, column: impl Into<ColumnRef>) -> Result<Values> {
        self.column(&column.into()).map(Column::to_values)
    }

    /// Get a column's raw scalars.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.values.as_slice())
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names, in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Column types, in insertion order.
    #[must_use]
    pub fn column_types(&self) -> Vec<ValueType> {
        self.columns.iter().map(|c| c.value_type).collect()
    }
}
