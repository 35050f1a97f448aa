//! Ordered intermediate representation of generated outputs.
//!
//! Entries keep construction order; nothing here sorts. Rendering into a
//! concrete syntax lives in [`crate::writer`].

use serde::Serialize;

use crate::error::{Error, Result};
use crate::names;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: String,
    /// Underlying integer type, if any
    pub underlying: Option<String>,
    pub entries: Vec<EnumEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub key: String,
    /// Pre-rendered literal
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapDef {
    pub name: String,
    pub key_type: String,
    pub value_type: String,
    pub entries: Vec<MapEntry>,
}

/// One generated output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    Enum(EnumDef),
    Map(MapDef),
}

impl Artifact {
    pub fn name(&self) -> &str {
        match self {
            Artifact::Enum(def) => &def.name,
            Artifact::Map(def) => &def.name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Artifact::Enum(def) => def.entries.len(),
            Artifact::Map(def) => def.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnumDef {
    /// Build an enum from parallel name and value sequences.
    ///
    /// Names are repaired into identifiers and collisions are numbered.
    pub fn from_pairs<N, V>(
        name: &str,
        underlying: Option<&str>,
        names: &[N],
        values: &[V],
    ) -> Result<Self>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        check_parallel(name, names.len(), values.len())?;

        let entries = names::resolve(names)
            .into_iter()
            .zip(values)
            .map(|(name, value)| EnumEntry {
                name,
                value: value.as_ref().to_string(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            underlying: underlying.map(str::to_string),
            entries,
        })
    }
}

impl MapDef {
    pub fn from_pairs<K, V>(
        name: &str,
        key_type: &str,
        value_type: &str,
        keys: &[K],
        values: &[V],
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        check_parallel(name, keys.len(), values.len())?;

        let entries = keys
            .iter()
            .zip(values)
            .map(|(key, value)| MapEntry {
                key: key.as_ref().to_string(),
                value: value.as_ref().to_string(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            key_type: key_type.to_string(),
            value_type: value_type.to_string(),
            entries,
        })
    }
}

fn check_parallel(name: &str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::lookup(
            "matching value count for output",
            format!("{} ({} names, {} values)", name, left, right),
        ));
    }
    Ok(())
}
