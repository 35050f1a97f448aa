use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tab_enumgen::{
    cli::{Cli, Commands},
    convert::convert_tables,
    init_logging,
    joins::NameCorrection,
    pipeline::{generate, GenerateOptions},
    schema::output_names,
    ui::{ConsoleUi, Phase, SilentUi, Ui},
    writer::{write_artifacts, OutputFormat},
};

fn run_generate(
    table_dir: &Path,
    output: &Path,
    format: OutputFormat,
    npc_name_fix: Vec<NameCorrection>,
    ui: &mut impl Ui,
) -> Result<usize> {
    let options = GenerateOptions {
        npc_name_fixes: npc_name_fix,
    };
    let artifacts = generate(table_dir, &options, ui)
        .with_context(|| format!("Failed to generate from {:?}", table_dir))?;

    write_artifacts(output, &artifacts, format, ui)?;
    ui.set_phase(Phase::Complete);

    Ok(artifacts.iter().map(|a| a.len()).sum())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging();

    match cli.command {
        Commands::Generate {
            table_dir,
            output,
            format,
            npc_name_fix,
            quiet,
        } => {
            let start = Instant::now();

            let entry_count = if quiet {
                run_generate(&table_dir, &output, format, npc_name_fix, &mut SilentUi::new())?
            } else {
                run_generate(&table_dir, &output, format, npc_name_fix, &mut ConsoleUi::new())?
            };

            let elapsed = start.elapsed();
            if !quiet {
                println!(
                    "\nCreated {:?} ({} entries) in {:.1}s",
                    output,
                    entry_count,
                    elapsed.as_secs_f64()
                );
            }
        }

        Commands::Convert {
            input_dir,
            output_dir,
            extension,
        } => {
            let start = Instant::now();

            let count = convert_tables(&input_dir, &output_dir, &extension, &mut ConsoleUi::new())
                .with_context(|| format!("Failed to convert tables in {:?}", input_dir))?;

            let elapsed = start.elapsed();
            println!(
                "\nConverted {} tables into {:?} in {:.1}s",
                count,
                output_dir,
                elapsed.as_secs_f64()
            );
        }

        Commands::ListOutputs => {
            println!("Available outputs:\n");
            for name in output_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
