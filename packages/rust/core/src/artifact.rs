//! Output directory helpers: atomic writes and artifact enumeration.

use std::path::{Path, PathBuf};

use tracing::debug;

use infographic_shared::{InfographicError, OutputArtifact, Result, VISUAL_EXTENSIONS, VISUALS_DIR};

/// Write `content` to `path`, replacing any previous file of the same name.
///
/// The content goes to a hidden temp file in the same directory first and is
/// then renamed over the target.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| InfographicError::config(format!("not a file path: {}", path.display())))?;
    let temp = dir.join(format!(".{}.tmp", file_name.to_string_lossy()));

    if let Err(e) = std::fs::write(&temp, content) {
        std::fs::remove_file(&temp).ok();
        return Err(InfographicError::io(&temp, e));
    }
    if let Err(e) = std::fs::rename(&temp, path) {
        std::fs::remove_file(&temp).ok();
        return Err(InfographicError::io(path, e));
    }

    debug!(path = %path.display(), size = content.len(), "wrote artifact");
    Ok(())
}

/// True when `path` is a regular file with at least one byte.
pub fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Markdown files directly inside the output directory, sorted by name.
pub fn content_artifacts(output_dir: &Path) -> Result<Vec<OutputArtifact>> {
    let mut found = Vec::new();
    let entries = std::fs::read_dir(output_dir).map_err(|e| InfographicError::io(output_dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| InfographicError::io(output_dir, e))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, &["md"]) {
            found.push(describe(output_dir, path)?);
        }
    }

    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

/// Rendered files anywhere under `visuals/`, sorted by relative path.
///
/// Returns an empty list when nothing was rendered.
pub fn visual_artifacts(output_dir: &Path) -> Result<Vec<OutputArtifact>> {
    let root = output_dir.join(VISUALS_DIR);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| InfographicError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| InfographicError::io(&dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if has_extension(&path, VISUAL_EXTENSIONS) {
                found.push(describe(output_dir, path)?);
            }
        }
    }

    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|want| e.eq_ignore_ascii_case(want)))
}

fn describe(output_dir: &Path, path: PathBuf) -> Result<OutputArtifact> {
    let size_bytes = std::fs::metadata(&path)
        .map_err(|e| InfographicError::io(&path, e))?
        .len();
    let name = path
        .strip_prefix(output_dir)
        .unwrap_or(&path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Ok(OutputArtifact {
        name,
        path,
        size_bytes,
    })
}
