//! Output directory preparation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// Refuse an output directory that equals or contains any of `inputs`.
///
/// The output tree is deleted on every build, so it must never overlap the
/// site root, the templates or the data file.
pub fn ensure_safe_output_dir(output_dir: &Path, inputs: &[PathBuf]) -> Result<(), BuildError> {
    let output = normalize(output_dir);

    if inputs.iter().any(|input| normalize(input).starts_with(&output)) {
        return Err(BuildError::UnsafeOutputDir(output_dir.to_path_buf()));
    }

    Ok(())
}

/// Absolute, symlink-free form of `path`, even when it does not exist yet.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if parent.as_os_str().is_empty() => {
            normalize(Path::new(".")).join(name)
        }
        (Some(parent), Some(name)) => normalize(parent).join(name),
        _ => path.to_path_buf(),
    }
}

/// Delete any existing output tree and recreate it empty.
pub fn prepare_output_dir(path: &Path) -> Result<(), BuildError> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|source| BuildError::Output {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir_all(path).map_err(|source| BuildError::Output {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Created directory: {}", path.display());
    Ok(())
}
