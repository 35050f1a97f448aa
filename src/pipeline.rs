//! Generation driver: load every needed table, run the joins, and build the
//! ordered artifacts. Nothing is written here, so a failure anywhere leaves
//! existing output untouched.

use indexmap::IndexMap;
use std::path::Path;
use tracing::info;

use crate::emit::{Artifact, EnumDef, MapDef};
use crate::error::{Error, Result};
use crate::joins::model::{NPC_ID_COLUMN, NPC_NAME_COLUMN};
use crate::joins::{fixed_npc_names, ModelTable, NameCorrection, SkillTable};
use crate::names::{self, description_suffix, owner_prefixed};
use crate::schema::{
    OutputBuilder, OutputDef, OutputKind, TableSource, ALL_OUTPUTS, OWNER_ID_COLUMN, OWNER_NAME_COLUMN,
};
use crate::table::{KeyIndex, Table};
use crate::ui::{Phase, Ui};

/// Knobs for a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Literal corrections applied to NPC names
    pub npc_name_fixes: Vec<NameCorrection>,
}

/// Tables loaded for one run, keyed by source name
#[derive(Debug, Default)]
pub struct LoadedTables {
    tables: IndexMap<&'static str, Table>,
}

impl LoadedTables {
    /// Load every table the given outputs read, in first-use order
    pub fn load(table_dir: &Path, outputs: &[&OutputDef], ui: &mut impl Ui) -> Result<Self> {
        if !table_dir.is_dir() {
            return Err(Error::NotFound {
                path: table_dir.to_path_buf(),
            });
        }

        let mut sources: Vec<&'static TableSource> = Vec::new();
        for output in outputs {
            for source in output.sources() {
                if !sources.iter().any(|s| s.name == source.name) {
                    sources.push(source);
                }
            }
        }

        ui.set_phase(Phase::Loading);
        let total = sources.len() as u64;
        let mut tables = IndexMap::with_capacity(sources.len());
        for (i, source) in sources.iter().enumerate() {
            ui.set_progress(i as u64, total, source.path);
            let path = source.resolve(table_dir);
            let table = Table::load(&path, source.required_column, source.sanitize)?;
            tables.insert(source.name, table);
        }
        ui.set_progress(total, total, "tables loaded");
        ui.clear_progress();

        Ok(Self { tables })
    }

    pub fn get(&self, source: &TableSource) -> Result<&Table> {
        self.tables
            .get(source.name)
            .ok_or_else(|| Error::lookup("loaded table", source.name))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Build every output from the tables under `table_dir`.
///
/// Returned artifacts follow [`ALL_OUTPUTS`] order.
pub fn generate(table_dir: &Path, options: &GenerateOptions, ui: &mut impl Ui) -> Result<Vec<Artifact>> {
    let outputs = ALL_OUTPUTS;
    let tables = LoadedTables::load(table_dir, outputs, ui)?;
    info!("{} tables loaded from {}", tables.len(), table_dir.display());

    let builder = ArtifactBuilder {
        tables: &tables,
        options,
    };

    ui.set_phase(Phase::Emitting);
    let total = outputs.len() as u64;
    let mut artifacts = Vec::with_capacity(outputs.len());
    for (i, output) in outputs.iter().enumerate() {
        ui.set_progress(i as u64, total, output.name);
        let artifact = builder.build(output)?;
        ui.log(format!("Processed {} ({} entries)", artifact.name(), artifact.len()));
        artifacts.push(artifact);
    }
    ui.clear_progress();

    Ok(artifacts)
}

struct ArtifactBuilder<'a> {
    tables: &'a LoadedTables,
    options: &'a GenerateOptions,
}

impl ArtifactBuilder<'_> {
    fn build(&self, def: &OutputDef) -> Result<Artifact> {
        match (&def.builder, &def.kind) {
            (
                OutputBuilder::NpcModels { npcs, models },
                OutputKind::Map {
                    key_type,
                    value_type,
                },
            ) => {
                let (keys, values) = self.npc_model_pairs(npcs, models, key_type)?;
                Ok(Artifact::Map(MapDef::from_pairs(
                    def.name, key_type, value_type, &keys, &values,
                )?))
            }
            (OutputBuilder::NpcModels { .. }, OutputKind::Enum { .. }) => {
                Err(Error::lookup("enum builder for output", def.name))
            }
            (builder, OutputKind::Enum { underlying }) => {
                let (names, values) = self.enum_pairs(builder)?;
                Ok(Artifact::Enum(EnumDef::from_pairs(
                    def.name,
                    *underlying,
                    &names,
                    &values,
                )?))
            }
            (_, OutputKind::Map { .. }) => Err(Error::lookup("map builder for output", def.name)),
        }
    }

    /// Raw (name, value) columns for an enum output
    fn enum_pairs(&self, builder: &OutputBuilder) -> Result<(Vec<String>, Vec<String>)> {
        match *builder {
            OutputBuilder::Named {
                table,
                id_column,
                name_column,
            } => {
                let table = self.tables.get(table)?;
                Ok((
                    table.column(name_column)?.to_vec(),
                    table.column(id_column)?.to_vec(),
                ))
            }
            OutputBuilder::Owned {
                table,
                id_column,
                name_column,
                owner_column,
                owner,
            } => {
                let table = self.tables.get(table)?;
                let owners = self.tables.get(owner)?;
                let owner_index = KeyIndex::new(owners, OWNER_ID_COLUMN)?;
                let owner_names = owners.column(OWNER_NAME_COLUMN)?;

                let names = table
                    .column(owner_column)?
                    .iter()
                    .zip(table.column(name_column)?)
                    .map(|(owner_id, name)| {
                        let row = owner_index.require(owner_id, "owner id")?;
                        Ok(owner_prefixed(&owner_names[row], name))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((names, table.column(id_column)?.to_vec()))
            }
            OutputBuilder::Described {
                table,
                id_column,
                name_column,
                description_column,
            } => {
                let table = self.tables.get(table)?;
                let names = table
                    .column(description_column)?
                    .iter()
                    .zip(table.column(name_column)?)
                    .map(|(description, name)| owner_prefixed(description_suffix(description), name))
                    .collect();
                Ok((names, table.column(id_column)?.to_vec()))
            }
            OutputBuilder::Skills {
                skills,
                upgrades,
                owner,
            } => {
                let skill_table = SkillTable::new(self.tables.get(skills)?, self.tables.get(upgrades)?)?;
                let owners = self.tables.get(owner)?;

                let mut names = Vec::with_capacity(skill_table.total_skills());
                let mut ids = Vec::with_capacity(skill_table.total_skills());
                for (owner_id, owner_name) in owners
                    .column(OWNER_ID_COLUMN)?
                    .iter()
                    .zip(owners.column(OWNER_NAME_COLUMN)?)
                {
                    for skill_id in skill_table.skills_of(owner_id)? {
                        names.push(owner_prefixed(owner_name, skill_table.skill_name(skill_id)?));
                        ids.push(skill_id.clone());
                    }
                }
                Ok((names, ids))
            }
            OutputBuilder::NpcNames { npcs } => {
                let npcs = self.tables.get(npcs)?;
                Ok((self.npc_names(npcs)?, npcs.column(NPC_ID_COLUMN)?.to_vec()))
            }
            OutputBuilder::NpcModels { .. } => Err(Error::lookup("enum builder for output", "NpcModels")),
        }
    }

    /// NPC names before enum resolution
    fn npc_names(&self, npcs: &Table) -> Result<Vec<String>> {
        Ok(fixed_npc_names(
            npcs.column(NPC_NAME_COLUMN)?,
            npcs.column(NPC_ID_COLUMN)?,
            &self.options.npc_name_fixes,
        ))
    }

    /// `<key type>::<npc enumerator>` -> rendered model list
    fn npc_model_pairs(
        &self,
        npcs: &TableSource,
        models: &TableSource,
        key_type: &str,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let npc_table = self.tables.get(npcs)?;
        let model_table = ModelTable::new(self.tables.get(models)?, npc_table)?;

        // Same resolution as the NPC enum, so keys name real enumerators
        let enumerators = names::resolve(self.npc_names(npc_table)?);
        let npc_index = KeyIndex::new(npc_table, NPC_ID_COLUMN)?;

        let mut keys = Vec::with_capacity(model_table.len());
        let mut values = Vec::with_capacity(model_table.len());
        for npc_id in model_table.npc_ids() {
            let row = npc_index.require(npc_id, "NPC id")?;
            keys.push(format!("{}::{}", key_type, enumerators[row]));
            values.push(model_table.rendered_entry(npc_id)?);
        }
        Ok((keys, values))
    }
}
