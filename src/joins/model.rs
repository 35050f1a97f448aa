//! Model joins: NPC -> model variants -> asset path.
//!
//! Model ids are composite (`<base>Md<variant>`). Model rows are grouped by
//! base id, NPC rows are grouped by the base id of their model field, and
//! every NPC in a group receives every model variant of that group.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::names::fix_leading;
use crate::table::Table;

/// Column holding the asset path in the model table. The model id is the
/// first column.
pub const MODEL_PATH_COLUMN: &str = "ModelPath";
pub const NPC_ID_COLUMN: &str = "Id";
pub const NPC_NAME_COLUMN: &str = "Name";
pub const NPC_MODEL_COLUMN: &str = "ModelId";

/// Marker separating base and variant in a model id
pub const MODEL_MARKER: &str = "Md";
const FALLBACK_MARKER: char = '_';

/// Leading characters of an NPC id that must match for a run of equal
/// names to be numbered
pub const ID_PREFIX_LEN: usize = 5;

/// One model variant of an NPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    pub model_id: String,
    pub path: String,
}

/// Literal text substitution applied to NPC names before numbering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCorrection {
    pub from: String,
    pub to: String,
}

impl std::str::FromStr for NameCorrection {
    type Err = String;

    /// Parse `FROM=TO`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() => Ok(Self {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(format!("expected FROM=TO, got '{}'", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelTable {
    npc_models: IndexMap<String, Vec<ModelEntry>>,
}

impl ModelTable {
    pub fn new(model_table: &Table, npc_table: &Table) -> Result<Self> {
        let model_ids = model_table.column_at(0)?;
        let paths = model_table.column(MODEL_PATH_COLUMN)?;

        // base id -> [(variant, path)]
        let mut variants: IndexMap<&str, Vec<(&str, &str)>> = IndexMap::new();
        for (raw, path) in model_ids.iter().zip(paths) {
            let (base, sub) = split_model_id(raw);
            variants.entry(base).or_default().push((sub, path.as_str()));
        }

        // base id -> [npc id]
        let npc_ids = npc_table.column(NPC_ID_COLUMN)?;
        let npc_model_ids = npc_table.column(NPC_MODEL_COLUMN)?;
        let mut npcs_by_model: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (npc_id, raw) in npc_ids.iter().zip(npc_model_ids) {
            let (base, _) = split_model_id(raw);
            npcs_by_model.entry(base).or_default().push(npc_id.as_str());
        }

        let mut npc_models: IndexMap<String, Vec<ModelEntry>> = IndexMap::new();
        let mut unused_groups = 0;
        for (base, entries) in &variants {
            let Some(npcs) = npcs_by_model.get(base) else {
                unused_groups += 1;
                continue;
            };

            for npc_id in npcs {
                let models = npc_models.entry(npc_id.to_string()).or_default();
                models.extend(entries.iter().map(|(sub, path)| ModelEntry {
                    model_id: format!("{}{}", base, sub),
                    path: path.to_string(),
                }));
            }
        }

        debug!(
            "{} model groups joined to {} NPCs, {} groups without NPCs",
            variants.len() - unused_groups,
            npc_models.len(),
            unused_groups
        );

        Ok(Self { npc_models })
    }

    /// Model variants of an NPC, in model-row order
    pub fn models_of(&self, npc_id: &str) -> Result<&[ModelEntry]> {
        self.npc_models
            .get(npc_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::lookup("NPC id in model map", npc_id))
    }

    /// Models of an NPC as a `{{"id", "path"}, ...}` literal
    pub fn rendered_entry(&self, npc_id: &str) -> Result<String> {
        Ok(render_models(self.models_of(npc_id)?))
    }

    /// NPCs that received at least one model, in join order
    pub fn npc_ids(&self) -> impl Iterator<Item = &str> {
        self.npc_models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.npc_models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npc_models.is_empty()
    }
}

/// Split a model id into base and variant at the marker, falling back to
/// the first underscore. The variant keeps the marker.
pub fn split_model_id(raw: &str) -> (&str, &str) {
    let cut = raw.find(MODEL_MARKER).or_else(|| raw.find(FALLBACK_MARKER));
    match cut {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    }
}

pub fn render_models(models: &[ModelEntry]) -> String {
    let pairs: Vec<String> = models
        .iter()
        .map(|m| format!("{{\"{}\", \"{}\"}}", escape(&m.model_id), escape(&m.path)))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Enum-ready NPC names.
///
/// Repairs the leading character, applies the literal corrections, then
/// numbers runs of adjacent rows with identical names whose ids share the
/// first [`ID_PREFIX_LEN`] characters. Repeats outside such runs are left
/// as they are.
pub fn fixed_npc_names(names: &[String], ids: &[String], corrections: &[NameCorrection]) -> Vec<String> {
    let mut fixed: Vec<String> = names
        .iter()
        .map(|name| {
            corrections
                .iter()
                .fold(fix_leading(name), |name, c| name.replace(&c.from, &c.to))
        })
        .collect();

    number_adjacent_runs(&mut fixed, ids);
    fixed
}

fn number_adjacent_runs(names: &mut [String], ids: &[String]) {
    let len = names.len().min(ids.len());
    let mut start = 0;
    while start < len {
        let prefix = id_prefix(&ids[start]);
        let mut end = start + 1;
        while end < len && names[end] == names[start] && id_prefix(&ids[end]) == prefix {
            end += 1;
        }

        if end - start > 1 {
            for (ordinal, name) in names[start..end].iter_mut().enumerate() {
                name.push_str(&format!("_{}", ordinal));
            }
        }
        start = end;
    }
}

fn id_prefix(id: &str) -> &str {
    id.char_indices()
        .nth(ID_PREFIX_LEN)
        .map_or(id, |(idx, _)| &id[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn model_table(text: &str) -> Table {
        Table::parse(Path::new("Model.tab"), text, Some(MODEL_PATH_COLUMN), false).unwrap()
    }

    fn npc_table(text: &str) -> Table {
        Table::parse(Path::new("Npc.tab"), text, Some(NPC_MODEL_COLUMN), true).unwrap()
    }

    #[test]
    fn test_split_model_id() {
        assert_eq!(split_model_id("NpcMd01_X"), ("Npc", "Md01_X"));
        assert_eq!(split_model_id("Boss_01"), ("Boss", "_01"));
        assert_eq!(split_model_id("Plain"), ("Plain", ""));
        assert_eq!(split_model_id("Md7"), ("", "Md7"));
    }

    #[test]
    fn test_models_of_in_row_order() {
        let models = model_table("Id\tModelPath\nNpcMd01_X\tpath/a\nNpcMd01_Y\tpath/b\n");
        let npcs = npc_table("Id\tName\tModelId\nN1\tGuard\tNpcMd01\n");
        let table = ModelTable::new(&models, &npcs).unwrap();

        let entries = table.models_of("N1").unwrap();
        assert_eq!(
            entries,
            [
                ModelEntry {
                    model_id: "NpcMd01_X".into(),
                    path: "path/a".into()
                },
                ModelEntry {
                    model_id: "NpcMd01_Y".into(),
                    path: "path/b".into()
                },
            ]
        );
    }

    #[test]
    fn test_cross_join_and_unmatched_groups() {
        let models = model_table(
            "Id\tModelPath\n\
             Mb1Md01\tmb/1\n\
             Orphan_01\torphan\n\
             Mb1Md02\tmb/2\n\
             Mb2Md01\tmb2/1\n",
        );
        let npcs = npc_table(
            "Id\tName\tModelId\n\
             900\tA\tMb2Md05\n\
             901\tB\tMb1Md01\n\
             902\tC\tMb1Md09\n\
             903\tD\tNothing\n",
        );
        let table = ModelTable::new(&models, &npcs).unwrap();

        assert_eq!(table.npc_ids().collect::<Vec<_>>(), ["901", "902", "900"]);
        let ids: Vec<_> = table
            .models_of("902")
            .unwrap()
            .iter()
            .map(|m| m.model_id.as_str())
            .collect();
        assert_eq!(ids, ["Mb1Md01", "Mb1Md02"]);
        assert_eq!(table.models_of("900").unwrap().len(), 1);
        assert!(matches!(table.models_of("903"), Err(Error::Lookup { .. })));
    }

    #[test]
    fn test_rendered_entry() {
        let models = model_table("Id\tModelPath\nMb1Md01\ta/b\nMb1Md02\tc\\\"d\n");
        let npcs = npc_table("Id\tName\tModelId\n1\tA\tMb1Md01\n");
        let table = ModelTable::new(&models, &npcs).unwrap();
        assert_eq!(
            table.rendered_entry("1").unwrap(),
            r#"{{"Mb1Md01", "a/b"}, {"Mb1Md02", "c\\\"d"}}"#
        );
    }

    #[test]
    fn test_fixed_names_number_adjacent_runs() {
        let names = strings(&["Guard", "Guard", "Guard", "Boss", "Boss", "Guard"]);
        let ids = strings(&["100010", "100011", "100012", "200010", "300010", "100013"]);
        let fixed = fixed_npc_names(&names, &ids, &[]);
        assert_eq!(
            fixed,
            ["Guard_0", "Guard_1", "Guard_2", "Boss", "Boss", "Guard"]
        );
    }

    #[test]
    fn test_fixed_names_prefix_breaks_run() {
        let names = strings(&["Wolf", "Wolf", "Wolf", "Wolf"]);
        let ids = strings(&["123450", "123451", "999990", "999991"]);
        let fixed = fixed_npc_names(&names, &ids, &[]);
        assert_eq!(fixed, ["Wolf_0", "Wolf_1", "Wolf_0", "Wolf_1"]);
    }

    #[test]
    fn test_fixed_names_leading_and_corrections() {
        let names = strings(&["3Headed", "Gaurd_Captain"]);
        let ids = strings(&["1", "2"]);
        let corrections = vec!["Gaurd=Guard".parse::<NameCorrection>().unwrap()];
        let fixed = fixed_npc_names(&names, &ids, &corrections);
        assert_eq!(fixed, ["_3Headed", "Guard_Captain"]);
    }

    #[test]
    fn test_name_correction_parse() {
        assert!("=x".parse::<NameCorrection>().is_err());
        assert!("novalue".parse::<NameCorrection>().is_err());
        let c: NameCorrection = "a=".parse().unwrap();
        assert_eq!(c.to, "");
    }

    #[test]
    fn test_short_ids_compare_whole() {
        assert_eq!(id_prefix("12"), "12");
        assert_eq!(id_prefix("1234567"), "12345");
    }
}
