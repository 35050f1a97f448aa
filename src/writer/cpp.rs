use crate::emit::{Artifact, EnumDef, MapDef};

/// Generate an `enum class` definition
pub fn generate_enum(def: &EnumDef) -> String {
    let mut out = match &def.underlying {
        Some(underlying) => format!("enum class {} : {}\n{{\n", def.name, underlying),
        None => format!("enum class {}\n{{\n", def.name),
    };

    for entry in &def.entries {
        out.push_str(&format!("\t{} = {},\n", entry.name, entry.value));
    }

    out.push_str("};");
    out
}

/// Generate a `static const std::map` definition
pub fn generate_map(def: &MapDef) -> String {
    let mut out = format!(
        "static const std::map<{}, {}> {}\n{{\n",
        def.key_type, def.value_type, def.name
    );

    for entry in &def.entries {
        out.push_str(&format!("\t{{{}, {}}},\n", entry.key, entry.value));
    }

    out.push_str("};");
    out
}

pub fn generate_artifact(artifact: &Artifact) -> String {
    match artifact {
        Artifact::Enum(def) => generate_enum(def),
        Artifact::Map(def) => generate_map(def),
    }
}

/// Generate a header body: artifacts separated by a blank line
pub fn generate_header(artifacts: &[Artifact]) -> String {
    let mut out = artifacts
        .iter()
        .map(generate_artifact)
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character_enum() -> EnumDef {
        EnumDef::from_pairs("Character", Some("uint32_t"), &["Alice", "Bob"], &["1001", "1002"]).unwrap()
    }

    #[test]
    fn test_generate_enum() {
        let text = generate_enum(&character_enum());
        assert_eq!(
            text,
            "enum class Character : uint32_t\n{\n\tAlice = 1001,\n\tBob = 1002,\n};"
        );
    }

    #[test]
    fn test_generate_enum_without_underlying() {
        let def = EnumDef::from_pairs("Plain", None, &["A"], &["1"]).unwrap();
        assert!(generate_enum(&def).starts_with("enum class Plain\n{\n"));
    }

    #[test]
    fn test_generate_map() {
        let def = MapDef::from_pairs(
            "NpcModelMap",
            "Npc",
            "std::vector<std::pair<std::string, std::string>>",
            &["Npc::Guard"],
            &[r#"{{"GdMd01", "a/b"}}"#],
        )
        .unwrap();
        assert_eq!(
            generate_map(&def),
            "static const std::map<Npc, std::vector<std::pair<std::string, std::string>>> NpcModelMap\n{\n\t{Npc::Guard, {{\"GdMd01\", \"a/b\"}}},\n};"
        );
    }

    #[test]
    fn test_generate_header_layout() {
        let artifacts = vec![
            Artifact::Enum(character_enum()),
            Artifact::Enum(EnumDef::from_pairs("Equip", Some("uint32_t"), &["Sword"], &["1"]).unwrap()),
        ];
        let text = generate_header(&artifacts);
        assert!(text.contains("};\n\nenum class Equip"));
        assert!(text.ends_with("};\n"));
        assert!(!text.ends_with("\n\n"));
    }
}
