//! Source tables of the exported table directory

use super::types::*;

// =============================================================================
// Shared tables
// =============================================================================

pub static CHARACTER: TableSource =
    TableSource::new("character", "Share/Character/Character.tab", "StoryChapterId");

pub static EQUIP: TableSource = TableSource::new("equip", "Share/Equip/Equip.tab", "DefaultLock");

pub static FASHION: TableSource = TableSource::new("fashion", "Share/Fashion/Fashion.tab", "Series");

pub static CHARACTER_SKILL: TableSource = TableSource::new(
    "character_skill",
    "Share/Character/Skill/CharacterSkill.tab",
    "SkillGroupId[9]",
);

pub static ENHANCE_SKILL: TableSource = TableSource::new(
    "enhance_skill",
    "Share/Character/EnhanceSkill/EnhanceSkill.tab",
    "SkillGroupId[9]",
);

pub static NPC: TableSource = TableSource::new("npc", "Share/Fight/Npc/Npc/Npc.tab", "ModelId");

// =============================================================================
// Client tables
// =============================================================================

/// Descriptions keep their em dash separator; names are still fixed up
/// during enum resolution
pub static WEAPON_FASHION: TableSource = TableSource::new(
    "weapon_fashion",
    "Client/WeaponFashion/WeaponFashionRes.tab",
    "ResonanceModelTransId3[2]",
)
.raw();

pub static CHARACTER_SKILL_UPGRADE: TableSource = TableSource::new(
    "character_skill_upgrade",
    "Client/Character/Skill/CharacterSkillUpgradeDes.tab",
    "SkillId",
);

pub static ENHANCE_SKILL_UPGRADE: TableSource = TableSource::new(
    "enhance_skill_upgrade",
    "Client/Character/EnhanceSkill/EnhanceSkillUpgradeDes.tab",
    "SkillId",
);

/// Asset paths must survive untouched
pub static MODEL: TableSource =
    TableSource::new("model", "Client/ResourceLut/Model/Model.tab", "ModelPath").raw();

/// All source tables
pub static ALL_TABLES: &[&TableSource] = &[
    &CHARACTER,
    &EQUIP,
    &FASHION,
    &WEAPON_FASHION,
    &CHARACTER_SKILL,
    &CHARACTER_SKILL_UPGRADE,
    &ENHANCE_SKILL,
    &ENHANCE_SKILL_UPGRADE,
    &MODEL,
    &NPC,
];

/// Get table source by name
pub fn get_table(name: &str) -> Option<&'static TableSource> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}
