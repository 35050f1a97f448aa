//! Skill joins: which skills each entity owns, and each skill's display name
//! and level range from the upgrade description table.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::Table;

/// Entity id column of the per-entity skill table
pub const OWNER_ID_COLUMN: &str = "Id";
/// Header prefix of the repeated skill id group (`SkillGroupId[1]` ...)
pub const SKILL_GROUP_PREFIX: &str = "SkillGroupId";
/// Skill id column of the upgrade description table. Level and display
/// name follow it directly.
pub const UPGRADE_SKILL_ID_COLUMN: &str = "SkillId";

/// Display name and inclusive level range of one skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: String,
    pub min_level: i32,
    pub max_level: i32,
}

#[derive(Debug, Clone)]
pub struct SkillTable {
    owner_skills: IndexMap<String, Vec<String>>,
    skills: IndexMap<String, SkillInfo>,
    total_skills: usize,
}

impl SkillTable {
    /// Join a per-entity skill table with its upgrade description table
    pub fn new(skill_table: &Table, upgrade_table: &Table) -> Result<Self> {
        let owner_ids = skill_table.column(OWNER_ID_COLUMN)?;
        let group_columns = skill_group_columns(skill_table);
        if group_columns.is_empty() {
            return Err(Error::MissingColumn {
                path: skill_table.path().to_path_buf(),
                column: format!("{}[..]", SKILL_GROUP_PREFIX),
            });
        }

        let mut owner_skills: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut total_skills = 0;
        for (row, owner_id) in owner_ids.iter().enumerate() {
            let cells: Vec<&str> = group_columns.iter().map(|column| column[row].as_str()).collect();
            let ids: Vec<String> = collect_group_ids(&cells)
                .into_iter()
                .map(strip_flag)
                .collect();

            if !owner_skills.contains_key(owner_id) {
                total_skills += ids.len();
                owner_skills.insert(owner_id.clone(), ids);
            }
        }

        let skills = upgrade_descriptions(upgrade_table)?;

        debug!(
            "{}: {} owners, {} skills, {} upgrade entries",
            skill_table.name(),
            owner_skills.len(),
            total_skills,
            skills.len()
        );

        Ok(Self {
            owner_skills,
            skills,
            total_skills,
        })
    }

    /// Display name of a skill
    pub fn skill_name(&self, skill_id: &str) -> Result<&str> {
        Ok(&self.skill(skill_id)?.name)
    }

    /// Skill ids owned by an entity, last group column first
    pub fn skills_of(&self, owner_id: &str) -> Result<&[String]> {
        self.owner_skills
            .get(owner_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::lookup("entity id in skill table", owner_id))
    }

    /// Inclusive `(min, max)` level range of a skill
    pub fn level_range(&self, skill_id: &str) -> Result<(i32, i32)> {
        let info = self.skill(skill_id)?;
        Ok((info.min_level, info.max_level))
    }

    /// `<name>_LV<n>` for every level of a skill
    pub fn level_suffixed_names(&self, skill_id: &str) -> Result<impl Iterator<Item = String> + '_> {
        let info = self.skill(skill_id)?;
        Ok((info.min_level..=info.max_level).map(move |level| format!("{}_LV{}", info.name, level)))
    }

    /// Number of skill ids across all distinct owners
    pub fn total_skills(&self) -> usize {
        self.total_skills
    }

    /// Owners in skill-table row order
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owner_skills.keys().map(String::as_str)
    }

    fn skill(&self, skill_id: &str) -> Result<&SkillInfo> {
        self.skills
            .get(skill_id)
            .ok_or_else(|| Error::lookup("skill id in upgrade table", skill_id))
    }
}

fn skill_group_columns(table: &Table) -> Vec<&[String]> {
    let bracketed = format!("{}[", SKILL_GROUP_PREFIX);
    table
        .headers()
        .filter(|h| *h == SKILL_GROUP_PREFIX || h.starts_with(&bracketed))
        .filter_map(|h| table.column(h).ok())
        .collect()
}

/// Non-empty cells of a repeated group, scanned from the last slot to the
/// first. Empty slots are skipped wherever they occur.
pub fn collect_group_ids<'a>(cells: &[&'a str]) -> Vec<&'a str> {
    cells
        .iter()
        .rev()
        .copied()
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Drop the trailing flag character of a raw skill id
pub fn strip_flag(raw: &str) -> String {
    let mut id = raw.to_string();
    id.pop();
    id
}

/// Name and level range for every distinct skill id, in first-seen order.
///
/// Rows of one skill are expected to be contiguous: the level range ends at
/// the first row belonging to another skill.
fn upgrade_descriptions(table: &Table) -> Result<IndexMap<String, SkillInfo>> {
    let id_pos = table.column_position(UPGRADE_SKILL_ID_COLUMN)?;
    if table.column_count() < id_pos + 3 {
        return Err(Error::malformed(
            table.path(),
            format!(
                "expected level and name columns after '{}'",
                UPGRADE_SKILL_ID_COLUMN
            ),
        ));
    }
    let ids = table.column_at(id_pos)?;
    let levels = table.column_at(id_pos + 1)?;
    let names = table.column_at(id_pos + 2)?;

    let mut skills = IndexMap::new();
    for start in 0..ids.len() {
        let skill_id = &ids[start];
        if skills.contains_key(skill_id) {
            continue;
        }

        let run = ids[start..].iter().take_while(|id| *id == skill_id).count();
        let min_level = parse_level(table, &levels[start])?;
        let max_level = parse_level(table, &levels[start + run - 1])?;

        skills.insert(
            skill_id.clone(),
            SkillInfo {
                name: names[start].clone(),
                min_level,
                max_level,
            },
        );
    }

    Ok(skills)
}

fn parse_level(table: &Table, cell: &str) -> Result<i32> {
    cell.trim()
        .parse()
        .map_err(|_| Error::malformed(table.path(), format!("invalid level '{}'", cell)))
}
