//! Strip the binary wrapper from exported `*.tab.bytes` assets so the
//! tab-delimited payload can be loaded as a plain table.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ui::{Phase, Ui};

/// Suffix of exported binary tables
pub const BINARY_SUFFIX: &str = ".tab.bytes";

/// Bytes of opaque header preceding the table text
pub const HEADER_LEN: usize = 128;

/// Payload of a binary table after its fixed header
pub fn strip_header<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a [u8]> {
    bytes.get(HEADER_LEN..).ok_or_else(|| {
        Error::malformed(
            path,
            format!("{} bytes is shorter than the {}-byte header", bytes.len(), HEADER_LEN),
        )
    })
}

/// Destination for `file` found under `input_dir`, mirrored under `output_dir`
pub fn converted_path(input_dir: &Path, output_dir: &Path, file: &Path, extension: &str) -> Option<PathBuf> {
    let relative = file.strip_prefix(input_dir).ok()?;
    let file_name = relative.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(BINARY_SUFFIX)?;

    let mut dest = output_dir.join(relative);
    dest.set_file_name(format!("{}.{}", stem, extension.trim_start_matches('.')));
    Some(dest)
}

fn find_binary_tables(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| input_dir.to_path_buf()),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        let is_table = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(BINARY_SUFFIX));
        if entry.file_type().is_file() && is_table {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Convert every binary table under `input_dir`, returning how many were written
pub fn convert_tables(input_dir: &Path, output_dir: &Path, extension: &str, ui: &mut impl Ui) -> Result<usize> {
    if !input_dir.is_dir() {
        return Err(Error::NotFound {
            path: input_dir.to_path_buf(),
        });
    }

    ui.set_phase(Phase::Converting);
    let files = find_binary_tables(input_dir)?;
    let total = files.len() as u64;

    for (i, file) in files.iter().enumerate() {
        let Some(dest) = converted_path(input_dir, output_dir, file, extension) else {
            continue;
        };
        ui.set_progress(i as u64, total, file.display().to_string());

        let bytes = fs::read(file).map_err(|source| Error::Io {
            path: file.clone(),
            source,
        })?;
        let payload = strip_header(file, &bytes)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, payload).map_err(|source| Error::Io {
            path: dest.clone(),
            source,
        })?;
        debug!("{} -> {}", file.display(), dest.display());
    }
    ui.clear_progress();

    info!("Converted {} tables into {}", files.len(), output_dir.display());
    Ok(files.len())
}
