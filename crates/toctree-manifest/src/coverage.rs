//! Translation coverage between a reference manifest and a translated one.

use std::collections::HashSet;

use crate::node::Toctree;

/// Reference page absent from the translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingEntry {
    pub local: String,
    /// Title in the reference manifest.
    pub title: String,
    /// Reference titles of the enclosing groups, outermost first.
    pub breadcrumb: Vec<String>,
}

/// Comparison of a translated manifest against its reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Reference `local`s also listed in the translation, in reference order.
    pub translated: Vec<String>,
    /// Reference pages the translation does not list, in reference order.
    pub missing: Vec<MissingEntry>,
    /// Translation `local`s the reference does not list, in translation order.
    pub extra: Vec<String>,
}

impl Coverage {
    /// Translated share of reference pages, 1.0 when the reference is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        let total = self.translated.len() + self.missing.len();
        if total == 0 {
            return 1.0;
        }
        self.translated.len() as f64 / total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare `translated` against `reference` by `local`.
///
/// Duplicate `local`s are counted once.
pub fn coverage(reference: &Toctree, translated: &Toctree) -> Coverage {
    let translated_locals: HashSet<&str> = translated.locals().into_iter().collect();
    let reference_locals: HashSet<&str> = reference.locals().into_iter().collect();

    let mut result = Coverage::default();
    let mut seen = HashSet::new();

    for (path, leaf) in reference.leaves() {
        if !seen.insert(leaf.local.as_str()) {
            continue;
        }
        if translated_locals.contains(leaf.local.as_str()) {
            result.translated.push(leaf.local.clone());
        } else {
            let mut breadcrumb: Vec<String> = reference
                .breadcrumb(&path)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_owned)
                .collect();
            breadcrumb.pop();
            result.missing.push(MissingEntry {
                local: leaf.local.clone(),
                title: leaf.title.clone(),
                breadcrumb,
            });
        }
    }

    let mut seen_extra = HashSet::new();
    for local in translated.locals() {
        if !reference_locals.contains(local) && seen_extra.insert(local) {
            result.extra.push(local.to_owned());
        }
    }

    tracing::debug!(
        translated = result.translated.len(),
        missing = result.missing.len(),
        extra = result.extra.len(),
        "Computed translation coverage"
    );

    result
}
