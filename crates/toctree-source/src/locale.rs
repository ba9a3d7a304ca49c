//! Locale directory discovery.

use std::fs;
use std::path::{Path, PathBuf};

/// A locale directory containing a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Directory name (e.g., "en", "es", "zh").
    pub name: String,
    /// Locale source directory.
    pub dir: PathBuf,
    /// Manifest file inside `dir`.
    pub manifest: PathBuf,
}

impl Locale {
    /// Locale rooted at `source_dir/name`, whether or not it exists.
    #[must_use]
    pub fn new(source_dir: &Path, name: &str, manifest_name: &str) -> Self {
        let dir = source_dir.join(name);
        Self {
            name: name.to_owned(),
            manifest: dir.join(manifest_name),
            dir,
        }
    }
}

/// Find every direct child of `source_dir` that contains `manifest_name`.
///
/// Hidden directories are skipped. Results are sorted by name. Returns an
/// empty Vec if the source directory doesn't exist.
pub fn discover_locales(source_dir: &Path, manifest_name: &str) -> Vec<Locale> {
    let Ok(entries) = fs::read_dir(source_dir) else {
        tracing::debug!(dir = %source_dir.display(), "Source directory not readable");
        return Vec::new();
    };

    let mut locales: Vec<Locale> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let locale = Locale::new(source_dir, &name, manifest_name);
            locale.manifest.is_file().then_some(locale)
        })
        .collect();

    locales.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(count = locales.len(), "Discovered locales");
    locales
}
