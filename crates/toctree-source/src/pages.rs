//! Page discovery by filesystem walking.
//!
//! Only file locations are collected; page content is never read. A page id
//! is the path relative to the locale directory, without extension and with
//! `/` separators, which is the form manifest `local` values use.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use glob::Pattern;
use toctree_manifest::PageIndex;

/// Error returned when building [`ScanOptions`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Which files count as pages.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl ScanOptions {
    /// Build options from page extensions (without dot) and exclude globs.
    ///
    /// Exclude globs are matched against both the relative path
    /// (`api/_internal.md`) and the bare file name.
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self, SourceError> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| SourceError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude,
        })
    }

    fn is_page(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext.to_string_lossy().to_lowercase()))
    }

    fn is_excluded(&self, rel_path: &str, file_name: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern.matches(rel_path) || pattern.matches(file_name))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned(), "mdx".to_owned()],
            exclude: Vec::new(),
        }
    }
}

/// Page identifiers found in a locale directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: BTreeSet<String>,
}

impl PageSet {
    /// Walk `dir` and collect every page.
    ///
    /// Hidden files and directories are skipped. Returns an empty set if the
    /// directory doesn't exist.
    pub fn scan(dir: &Path, options: &ScanOptions) -> Self {
        let mut pages = BTreeSet::new();
        if dir.exists() {
            scan_directory(dir, "", options, &mut pages);
        }
        tracing::debug!(dir = %dir.display(), pages = pages.len(), "Scanned pages");
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }
}

impl FromIterator<String> for PageSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl PageIndex for PageSet {
    fn contains(&self, local: &str) -> bool {
        self.pages.contains(local)
    }

    fn locals(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

fn scan_directory(
    dir_path: &Path,
    prefix: &str,
    options: &ScanOptions,
    pages: &mut BTreeSet<String>,
) {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir_path.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let rel_path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            scan_directory(&entry.path(), &rel_path, options, pages);
        } else if options.is_page(&name) && !options.is_excluded(&rel_path, &name) {
            pages.insert(file_path_to_local(&rel_path));
        }
    }
}

/// Strip the extension from a relative page path.
///
/// - `index.md` -> `index`
/// - `main_classes/model.md` -> `main_classes/model`
/// - `v1.2/notes.mdx` -> `v1.2/notes`
fn file_path_to_local(rel_path: &str) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    match dir {
        Some(dir) => format!("{dir}/{stem}"),
        None => stem.to_owned(),
    }
}
