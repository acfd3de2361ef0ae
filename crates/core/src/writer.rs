//! Persisting a generated file map under an output root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{GeneratorError, Result};
use crate::generator::FileMap;

/// Outcome of one write pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files created or overwritten
    pub written: usize,
    /// Files skipped because their content was already current
    pub unchanged: usize,
}

/// Resolve a generated relative path under `root`, rejecting anything that
/// is absolute or climbs out of it.
fn resolve(root: &Path, relative: &str) -> Result<PathBuf> {
    let rel = Path::new(relative);
    let normal = rel.components().all(|c| matches!(c, Component::Normal(_)));
    if relative.is_empty() || !normal {
        return Err(GeneratorError::InvalidOutputPath(relative.to_string()));
    }
    Ok(root.join(rel))
}

/// Write every file in `files` below `root`, skipping files whose content is
/// already identical. All paths are validated before anything is written.
pub fn write_files(root: &Path, files: &FileMap) -> Result<WriteSummary> {
    let targets = files
        .iter()
        .map(|(relative, content)| Ok((resolve(root, relative)?, content)))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = WriteSummary::default();
    for (path, content) in targets {
        if fs::read_to_string(&path).is_ok_and(|existing| existing == *content) {
            summary.unchanged += 1;
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| GeneratorError::io(&path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote file.");
        summary.written += 1;
    }
    Ok(summary)
}
