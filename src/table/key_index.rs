use std::collections::HashMap;

use crate::error::{Error, Result};

use super::Table;

/// Key -> row lookup over one column of a table.
///
/// Duplicate keys resolve to their first row.
#[derive(Debug, Clone)]
pub struct KeyIndex {
    positions: HashMap<String, usize>,
}

impl KeyIndex {
    pub fn new(table: &Table, column: &str) -> Result<Self> {
        Ok(Self::from_keys(table.column(column)?))
    }

    pub fn from_keys(keys: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(keys.len());
        for (row, key) in keys.iter().enumerate() {
            positions.entry(key.clone()).or_insert(row);
        }
        Self { positions }
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Row of `key`, or a lookup error describing `what` was missing
    pub fn require(&self, key: &str, what: &'static str) -> Result<usize> {
        self.position(key).ok_or_else(|| Error::lookup(what, key))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
