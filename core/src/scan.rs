use crate::error::{ExtractionError, RankError, Result};
use crate::extract::{FileKind, TextExtractor};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported files directly inside `dir`, sorted by file name.
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ExtractionError::NotFound(dir.to_path_buf()).into());
    }
    if !dir.is_dir() {
        return Err(ExtractionError::NotADirectory(dir.to_path_buf()).into());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop"));
            RankError::from(ExtractionError::Io { path, source })
        })?;
        let p = entry.path();
        if p.is_file() && FileKind::from_path(p).is_some() {
            files.push(p.to_path_buf());
        }
    }
    Ok(files)
}

pub fn resume_count(dir: &Path) -> Result<usize> {
    Ok(scan_folder(dir)?.len())
}

/// Extract every supported file in `dir`, keyed by file name.
///
/// A file that fails to extract is logged and left out.
pub fn extract_folder<E: TextExtractor>(
    dir: &Path,
    extractor: &E,
) -> Result<BTreeMap<String, String>> {
    let mut extracted = BTreeMap::new();
    for path in scan_folder(dir)? {
        let name = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        match extractor.extract_text(&path) {
            Ok(text) => {
                extracted.insert(name, text);
            }
            Err(err) => tracing::warn!(file = %name, error = %err, "skipping resume"),
        }
    }
    Ok(extracted)
}
