use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::joins::NameCorrection;
use crate::writer::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tab-enumgen")]
#[command(version, about = "Generate C++ enums and lookup maps from tab-delimited game tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load tables and write the generated header
    Generate {
        /// Directory containing the table files
        table_dir: PathBuf,

        /// Output file path
        output: PathBuf,

        /// Output syntax
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Cpp)]
        format: OutputFormat,

        /// Literal NPC name correction, FROM=TO (repeatable).
        ///
        /// No corrections are built in: without this option NPC names keep
        /// any typos present in the source table.
        #[arg(long = "npc-name-fix", value_name = "FROM=TO")]
        npc_name_fix: Vec<NameCorrection>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Strip binary headers from exported *.tab.bytes files
    Convert {
        /// Directory searched recursively for *.tab.bytes
        input_dir: PathBuf,

        /// Directory the converted tables are written under
        output_dir: PathBuf,

        /// Extension for converted files
        #[arg(long, default_value = "tsv")]
        extension: String,
    },

    /// List all available output names
    ListOutputs,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "tab-enumgen",
            "generate",
            "tables",
            "Enums.h",
            "--npc-name-fix",
            "Gaurd=Guard",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                table_dir,
                format,
                npc_name_fix,
                quiet,
                ..
            } => {
                assert_eq!(table_dir, PathBuf::from("tables"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(npc_name_fix.len(), 1);
                assert_eq!(npc_name_fix[0].to, "Guard");
                assert!(!quiet);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_filters_not_accepted() {
        let result = Cli::try_parse_from(["tab-enumgen", "generate", "t", "o", "--include", "Npc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_name_fix_help_states_default() {
        let mut command = Cli::command();
        let generate = command.find_subcommand_mut("generate").unwrap();
        let help = generate.render_long_help().to_string();
        assert!(help.contains("No corrections are built in"));
    }

    #[test]
    fn test_bad_name_fix_rejected() {
        let result = Cli::try_parse_from(["tab-enumgen", "generate", "t", "o", "--npc-name-fix", "oops"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_default_extension() {
        let cli = Cli::try_parse_from(["tab-enumgen", "convert", "in", "out"]).unwrap();
        match cli.command {
            Commands::Convert { extension, .. } => assert_eq!(extension, "tsv"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
