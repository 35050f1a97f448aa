//! Generated output definitions, in emission order

use super::tables::*;
use super::types::*;

const ENUM_U32: OutputKind = OutputKind::Enum {
    underlying: Some("uint32_t"),
};

pub static CHARACTER_ENUM: OutputDef = OutputDef {
    name: "Character",
    kind: ENUM_U32,
    builder: OutputBuilder::Named {
        table: &CHARACTER,
        id_column: "Id",
        name_column: "LogName",
    },
};

pub static EQUIP_ENUM: OutputDef = OutputDef {
    name: "Equip",
    kind: ENUM_U32,
    builder: OutputBuilder::Named {
        table: &EQUIP,
        id_column: "Id",
        name_column: "LogName",
    },
};

pub static FASHION_ENUM: OutputDef = OutputDef {
    name: "Fashion",
    kind: ENUM_U32,
    builder: OutputBuilder::Owned {
        table: &FASHION,
        id_column: "Id",
        name_column: "Name",
        owner_column: "CharacterId",
        owner: &CHARACTER,
    },
};

pub static WEAPON_FASHION_ENUM: OutputDef = OutputDef {
    name: "WeaponFashion",
    kind: ENUM_U32,
    builder: OutputBuilder::Described {
        table: &WEAPON_FASHION,
        id_column: "Id",
        name_column: "Name",
        description_column: "Description",
    },
};

pub static CHARACTER_SKILL_ENUM: OutputDef = OutputDef {
    name: "CharacterSkill",
    kind: ENUM_U32,
    builder: OutputBuilder::Skills {
        skills: &CHARACTER_SKILL,
        upgrades: &CHARACTER_SKILL_UPGRADE,
        owner: &CHARACTER,
    },
};

pub static ENHANCE_SKILL_ENUM: OutputDef = OutputDef {
    name: "EnhanceSkill",
    kind: ENUM_U32,
    builder: OutputBuilder::Skills {
        skills: &ENHANCE_SKILL,
        upgrades: &ENHANCE_SKILL_UPGRADE,
        owner: &CHARACTER,
    },
};

pub static NPC_ENUM: OutputDef = OutputDef {
    name: "Npc",
    kind: ENUM_U32,
    builder: OutputBuilder::NpcNames { npcs: &NPC },
};

pub static NPC_MODEL_MAP: OutputDef = OutputDef {
    name: "NpcModelMap",
    kind: OutputKind::Map {
        key_type: "Npc",
        value_type: "std::vector<std::pair<std::string, std::string>>",
    },
    builder: OutputBuilder::NpcModels {
        npcs: &NPC,
        models: &MODEL,
    },
};

/// Every generated output, in emission order
pub static ALL_OUTPUTS: &[&OutputDef] = &[
    &CHARACTER_ENUM,
    &EQUIP_ENUM,
    &FASHION_ENUM,
    &WEAPON_FASHION_ENUM,
    &CHARACTER_SKILL_ENUM,
    &ENHANCE_SKILL_ENUM,
    &NPC_ENUM,
    &NPC_MODEL_MAP,
];

/// Get output definition by name
pub fn get_output(name: &str) -> Option<&'static OutputDef> {
    ALL_OUTPUTS.iter().find(|o| o.name == name).copied()
}

/// Get all output names
pub fn output_names() -> Vec<&'static str> {
    ALL_OUTPUTS.iter().map(|o| o.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_are_registered() {
        for output in ALL_OUTPUTS {
            for source in output.sources() {
                assert_eq!(get_table(source.name), Some(source));
            }
        }
    }

    #[test]
    fn test_skill_output_sources() {
        let names: Vec<_> = CHARACTER_SKILL_ENUM.sources().iter().map(|s| s.name).collect();
        assert_eq!(names, ["character", "character_skill", "character_skill_upgrade"]);
    }

    #[test]
    fn test_model_table_is_raw() {
        let sources = NPC_MODEL_MAP.sources();
        assert!(!sources[0].sanitize);
        assert!(sources[1].sanitize);
    }
}
