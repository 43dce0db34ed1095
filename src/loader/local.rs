use crate::error::{Error, Result};
use crate::loader::interface::TemplateSourceGetter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Prefix of the bookkeeping entries projected volumes add next to real files.
const HIDDEN_ENTRY_PREFIX: &str = "..";

/// Getter for templates stored in a local directory.
///
/// Every regular file below the directory is read in file name order and the
/// contents are joined with a newline.
pub struct LocalGetter<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalGetter<P> {
    /// Creates a new LocalGetter instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

/// Resolves a relative directory against the configured template root.
pub fn resolve_dir(dir_path: &str, root: Option<&Path>) -> PathBuf {
    let dir = PathBuf::from(dir_path);
    match root {
        Some(root) if dir.is_relative() => root.join(dir),
        _ => dir,
    }
}

impl<P: AsRef<Path>> TemplateSourceGetter for LocalGetter<P> {
    fn get_templates(&self) -> Result<String> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::SourceError(format!(
                "cannot read templates from '{}': not a directory",
                path.display()
            )));
        }

        let walker = WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_name().to_string_lossy().starts_with(HIDDEN_ENTRY_PREFIX)
            });

        let mut parts = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::SourceError(format!("cannot walk '{}': {e}", path.display()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            log::debug!("Reading template file '{}'", entry.path().display());
            let content = std::fs::read_to_string(entry.path()).map_err(|e| {
                Error::SourceError(format!(
                    "cannot read template file '{}': {e}",
                    entry.path().display()
                ))
            })?;
            parts.push(content);
        }

        Ok(parts.join("\n"))
    }
}
