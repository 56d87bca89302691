//! Auxiliary data and scratch variable stores.
//!
//! `DataStore` holds named time-aligned grids a strategy may read through
//! rolling or expanding windows; values are validated for alignment before
//! insertion and are read-only thereafter. `VariableStore` holds arbitrary
//! values a strategy carries across time steps, living for the whole run.

use gridsim_core::{Error, Result};
use ndarray::{s, Array2, ArrayView2};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Named, time-aligned auxiliary grids.
#[derive(Debug, Default)]
pub struct DataStore {
    series: HashMap<String, Array2<f64>>,
}

impl DataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated grid under a name, replacing any previous value.
    ///
    /// Callers are expected to have conformed the grid against the canonical
    /// labels already; the store only sees raw values.
    pub fn insert(&mut self, name: impl Into<String>, values: Array2<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Whether a series has been posted.
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Trailing window `[step - window + 1 ..= step]`, saturating at row 0.
    pub fn rolling(&self, name: &str, step: usize, window: usize) -> Result<ArrayView2<'_, f64>> {
        let grid = self
            .series
            .get(name)
            .ok_or_else(|| Error::unknown_series(name))?;
        let start = (step + 1).saturating_sub(window);
        Ok(grid.slice(s![start..=step, ..]))
    }

    /// Full history `[0 ..= step]`.
    pub fn expanding(&self, name: &str, step: usize) -> Result<ArrayView2<'_, f64>> {
        let grid = self
            .series
            .get(name)
            .ok_or_else(|| Error::unknown_series(name))?;
        Ok(grid.slice(s![..=step, ..]))
    }
}

/// Scratch values a strategy persists across time steps.
///
/// Values are type-erased; retrieval downcasts back to the stored type. The
/// store lives as long as the engine and is cleared only by rebuilding it.
#[derive(Default)]
pub struct VariableStore {
    vars: HashMap<String, Box<dyn Any>>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a name, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Any) {
        self.vars.insert(name.into(), Box::new(value));
    }

    /// Read a stored value, if present and of the requested type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.vars.get(name)?.downcast_ref()
    }

    /// Mutably access a stored value, if present and of the requested type.
    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.vars.get_mut(name)?.downcast_mut()
    }

    /// Whether a variable has been stored.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

impl fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableStore")
            .field("names", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
