use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::cpp::generate_header;
use crate::emit::Artifact;
use crate::ui::{Phase, Ui};

/// Output file syntax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// C++ header with enum classes and maps
    #[default]
    Cpp,
    /// Ordered artifact list as JSON
    Json,
}

/// Render artifacts in the requested format
pub fn render(artifacts: &[Artifact], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Cpp => Ok(generate_header(artifacts)),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(artifacts)
                .context("Failed to serialize artifacts")?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Sibling path the output is staged at before it replaces the target
fn staging_path(output: &Path) -> PathBuf {
    let ext = output
        .extension()
        .map(|e| format!("new.{}", e.to_string_lossy()))
        .unwrap_or_else(|| "new".to_string());
    output.with_extension(ext)
}

/// Write `contents` to `output` in one step.
///
/// The text goes to a staging file first and is renamed over the target,
/// so a failed write never leaves a truncated output behind.
pub fn write_atomic(output: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let staging = staging_path(output);
    if let Err(e) = fs::write(&staging, contents) {
        fs::remove_file(&staging).ok();
        return Err(e).with_context(|| format!("Failed to write: {:?}", staging));
    }

    fs::rename(&staging, output).with_context(|| {
        fs::remove_file(&staging).ok();
        format!("Failed to replace output: {:?}", output)
    })?;

    Ok(())
}

/// Render and write all artifacts
pub fn write_artifacts(
    output: &Path,
    artifacts: &[Artifact],
    format: OutputFormat,
    ui: &mut impl Ui,
) -> Result<()> {
    ui.set_phase(Phase::Writing);
    let text = render(artifacts, format)?;
    write_atomic(output, &text)?;

    info!("Wrote {} artifacts to {}", artifacts.len(), output.display());
    ui.set_info(format!("{} ({} bytes)", output.display(), text.len()));
    Ok(())
}
