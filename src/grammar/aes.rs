//! Aesthetic mappings for Grammar of Graphics.
//!
//! Binds aesthetic names (x, y, colour, size, ...) to constants, literal
//! vectors or functions of the data, and evaluates those bindings against a
//! [`DataFrame`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::data::{DataFrame, DataValue, Values};
use crate::error::{Error, Result};

/// Function computing an aesthetic's values from the data.
pub type DeriveFn = dyn Fn(&DataFrame) -> Result<Values> + Send + Sync;

/// The unevaluated source of one aesthetic's values.
#[derive(Clone)]
pub enum Binding {
    /// A scalar broadcast to the row count of its sibling vectors.
    Constant(DataValue),
    /// A literal vector passed through unchanged.
    Vector(Values),
    /// Values computed from the data source.
    Derived(Arc<DeriveFn>),
}

impl Binding {
    /// A binding that reads a column by name.
    #[must_use]
    pub fn column(name: &str) -> Self {
        let name = name.to_string();
        Binding::Derived(Arc::new(move |data: &DataFrame| data.get(name.as_str())))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Binding::Vector(v) => f.debug_tuple("Vector").field(v).finish(),
            Binding::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Aesthetic mapping evaluated against data: name to row-aligned vector.
pub type ConcreteAes = BTreeMap<String, Values>;

/// Aesthetic mapping specification.
///
/// Keys are unique; key order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Aes {
    bindings: BTreeMap<String, Binding>,
}

impl Aes {
    /// Create a new aesthetic mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an aesthetic to an arbitrary binding.
    #[must_use]
    pub fn bind(mut self, aesthetic: &str, binding: Binding) -> Self {
        self.bindings.insert(aesthetic.to_string(), binding);
        self
    }

    /// Map an aesthetic to a data column.
    #[must_use]
    pub fn map(self, aesthetic: &str, column: &str) -> Self {
        self.bind(aesthetic, Binding::column(column))
    }

    /// Bind an aesthetic to a constant.
    #[must_use]
    pub fn constant(self, aesthetic: &str, value: impl Into<DataValue>) -> Self {
        self.bind(aesthetic, Binding::Constant(value.into()))
    }

    /// Bind an aesthetic to a literal vector.
    #[must_use]
    pub fn values(self, aesthetic: &str, values: impl Into<Values>) -> Self {
        self.bind(aesthetic, Binding::Vector(values.into()))
    }

    /// Bind an aesthetic to a function of the data.
    #[must_use]
    pub fn derive<F>(self, aesthetic: &str, f: F) -> Self
    where
        F: Fn(&DataFrame) -> Result<Values> + Send + Sync + 'static,
    {
        self.bind(aesthetic, Binding::Derived(Arc::new(f)))
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(self, column: &str) -> Self {
        self.map("x", column)
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(self, column: &str) -> Self {
        self.map("y", column)
    }

    /// Map colour to a column.
    #[must_use]
    pub fn colour(self, column: &str) -> Self {
        self.map("colour", column)
    }

    /// Map size to a column.
    #[must_use]
    pub fn size(self, column: &str) -> Self {
        self.map("size", column)
    }

    /// Map shape to a column.
    #[must_use]
    pub fn shape(self, column: &str) -> Self {
        self.map("shape", column)
    }

    /// Map alpha/opacity to a column.
    #[must_use]
    pub fn alpha(self, column: &str) -> Self {
        self.map("alpha", column)
    }

    /// Binding for an aesthetic, if any.
    #[must_use]
    pub fn get(&self, aesthetic: &str) -> Option<&Binding> {
        self.bindings.get(aesthetic)
    }

    /// Whether an aesthetic is bound.
    #[must_use]
    pub fn contains(&self, aesthetic: &str) -> bool {
        self.bindings.contains_key(aesthetic)
    }

    /// Number of bound aesthetics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound aesthetic names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Union with another mapping; see [`merge_aesthetics`].
    ///
    /// # Errors
    ///
    /// Fails if both mappings bind the same aesthetic.
    pub fn merge(&self, other: &Aes) -> Result<Aes> {
        merge_aesthetics(self, other)
    }
}

/// Union of two mappings over disjoint keys.
///
/// # Errors
///
/// Returns [`Error::DuplicateAesthetic`] if any aesthetic is bound on both
/// sides.
pub fn merge_aesthetics(lhs: &Aes, rhs: &Aes) -> Result<Aes> {
    if let Some(name) = lhs.names().find(|name| rhs.contains(name)) {
        return Err(Error::DuplicateAesthetic(name.to_string()));
    }

    let mut merged = lhs.clone();
    merged.bindings.extend(rhs.bindings.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(merged)
}

/// Evaluate every binding against `data`.
///
/// Derived bindings are called, literal vectors pass through, and constants
/// are broadcast to the longest resulting vector (0 if there is none).
/// Boolean and null constants are dropped. Vectors of differing lengths are
/// left as they are.
///
/// # Errors
///
/// Propagates failures of derived bindings (e.g. an unknown column).
pub fn apply_data_to_aesthetics(data: &DataFrame, aes: &Aes) -> Result<ConcreteAes> {
    let mut resolved = ConcreteAes::new();
    let mut deferred = Vec::new();

    for (name, binding) in &aes.bindings {
        match binding {
            Binding::Derived(f) => {
                resolved.insert(name.clone(), f(data)?);
            }
            Binding::Vector(values) => {
                resolved.insert(name.clone(), values.clone());
            }
            Binding::Constant(value) => deferred.push((name, value)),
        }
    }

    let n = resolved.values().map(Values::len).max().unwrap_or(0);

    for (name, value) in deferred {
        match Values::broadcast(value, n) {
            Some(values) => {
                resolved.insert(name.clone(), values);
            }
            None => tracing::trace!(aesthetic = %name, "dropping non-broadcastable constant"),
        }
    }

    Ok(resolved)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z]{1,6}", 0..8).prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_merge_commutes_on_disjoint_keys(lhs in names(), rhs in names()) {
            let lhs_aes = lhs.iter().fold(Aes::new(), |a, n| a.constant(n, 1.0));
            let rhs_aes = rhs.iter().fold(Aes::new(), |a, n| a.constant(n, 2.0));
            let overlap = lhs.iter().any(|n| rhs.contains(n));

            let ab = merge_aesthetics(&lhs_aes, &rhs_aes);
            let ba = merge_aesthetics(&rhs_aes, &lhs_aes);
            prop_assert_eq!(ab.is_err(), overlap);
            prop_assert_eq!(ba.is_err(), overlap);
            if let (Ok(ab), Ok(ba)) = (ab, ba) {
                prop_assert_eq!(ab.names().collect::<Vec<_>>(), ba.names().collect::<Vec<_>>());
            }
        }

        #[test]
        fn prop_broadcast_matches_longest_vector(
            lens in prop::collection::vec(0usize..50, 1..5),
            constant in -1e3f64..1e3
        ) {
            let aes = lens.iter().enumerate().fold(Aes::new(), |a, (i, &len)| {
                a.values(&format!("v{i}"), vec![0.0; len])
            });
            let aes = aes.constant("k", constant).constant("label", "txt");
            let n = lens.iter().copied().max().unwrap_or(0);

            let concrete = apply_data_to_aesthetics(&DataFrame::new(), &aes).unwrap();
            prop_assert_eq!(concrete["k"].clone(), Values::Number(vec![constant; n]));
            prop_assert_eq!(concrete["label"].len(), n);
        }
    }
}
