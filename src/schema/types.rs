use std::path::{Path, PathBuf};

/// A source table inside the exported table directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub name: &'static str,
    /// Path relative to the table directory, `/`-separated
    pub path: &'static str,
    /// Column whose absence means the wrong file was exported
    pub required_column: Option<&'static str>,
    /// Replace non-alphanumeric characters in cells with `_`
    pub sanitize: bool,
}

impl TableSource {
    /// A sanitized table
    pub const fn new(name: &'static str, path: &'static str, required_column: &'static str) -> Self {
        Self {
            name,
            path,
            required_column: Some(required_column),
            sanitize: true,
        }
    }

    /// Keep cell text as-is (tables holding data such as asset paths)
    pub const fn raw(self) -> Self {
        Self {
            sanitize: false,
            ..self
        }
    }

    /// Full path of this table under `table_dir`
    pub fn resolve(&self, table_dir: &Path) -> PathBuf {
        self.path
            .split('/')
            .fold(table_dir.to_path_buf(), |dir, part| dir.join(part))
    }
}

/// Shape of a generated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    Enum {
        underlying: Option<&'static str>,
    },
    Map {
        key_type: &'static str,
        value_type: &'static str,
    },
}

/// How the (name, value) sequence of an output is produced
#[derive(Debug, Clone)]
pub enum OutputBuilder {
    /// Name and id columns of a single table
    Named {
        table: &'static TableSource,
        id_column: &'static str,
        name_column: &'static str,
    },
    /// `<owner name>_<name>`, owner found through a foreign key column
    Owned {
        table: &'static TableSource,
        id_column: &'static str,
        name_column: &'static str,
        owner_column: &'static str,
        owner: &'static TableSource,
    },
    /// `<description suffix>_<name>`
    Described {
        table: &'static TableSource,
        id_column: &'static str,
        name_column: &'static str,
        description_column: &'static str,
    },
    /// `<owner name>_<skill name>` for every skill of every owner
    Skills {
        skills: &'static TableSource,
        upgrades: &'static TableSource,
        owner: &'static TableSource,
    },
    /// NPC names with run numbering and corrections
    NpcNames { npcs: &'static TableSource },
    /// NPC enumerator -> model variants
    NpcModels {
        npcs: &'static TableSource,
        models: &'static TableSource,
    },
}

/// Owner tables are joined on these columns
pub const OWNER_ID_COLUMN: &str = "Id";
pub const OWNER_NAME_COLUMN: &str = "LogName";

/// A generated output definition
#[derive(Debug, Clone)]
pub struct OutputDef {
    pub name: &'static str,
    pub kind: OutputKind,
    pub builder: OutputBuilder,
}

impl OutputDef {
    /// Tables this output reads, without duplicates
    pub fn sources(&self) -> Vec<&'static TableSource> {
        let all: Vec<&'static TableSource> = match self.builder {
            OutputBuilder::Named { table, .. } | OutputBuilder::Described { table, .. } => vec![table],
            OutputBuilder::Owned { table, owner, .. } => vec![owner, table],
            OutputBuilder::Skills {
                skills,
                upgrades,
                owner,
            } => vec![owner, skills, upgrades],
            OutputBuilder::NpcNames { npcs } => vec![npcs],
            OutputBuilder::NpcModels { npcs, models } => vec![models, npcs],
        };

        let mut unique: Vec<&'static TableSource> = Vec::with_capacity(all.len());
        for source in all {
            if !unique.iter().any(|s| s.name == source.name) {
                unique.push(source);
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_segments() {
        let source = TableSource::new("npc", "Share/Fight/Npc/Npc.tab", "ModelId");
        let path = source.resolve(Path::new("/data"));
        assert_eq!(path, Path::new("/data").join("Share").join("Fight").join("Npc").join("Npc.tab"));
    }

    #[test]
    fn test_raw_disables_sanitize() {
        let source = TableSource::new("model", "Model.tab", "ModelPath").raw();
        assert!(!source.sanitize);
        assert_eq!(source.required_column, Some("ModelPath"));
    }
}
