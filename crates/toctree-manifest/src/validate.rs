//! Tree-wide manifest checks.
//!
//! Parsing guarantees every node has a valid shape. Validation covers the
//! properties that need the whole tree (duplicate `local`s, sibling titles)
//! or an outside page set (unresolved and unlisted pages).

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::node::{Node, NodePath, NodeRef, Toctree};

/// Set of pages that manifest entries may reference.
pub trait PageIndex {
    /// Whether a page with this identifier exists.
    fn contains(&self, local: &str) -> bool;

    /// All page identifiers, sorted.
    fn locals(&self) -> Vec<&str>;
}

impl PageIndex for BTreeSet<String> {
    fn contains(&self, local: &str) -> bool {
        BTreeSet::contains(self, local)
    }

    fn locals(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

/// Optional checks.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Warn about pages in the index that no entry references.
    pub report_unlisted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Group without children.
    EmptyGroup { title: String },
    /// `local` already referenced at `first`.
    ///
    /// Raised once per repeat, at the repeat's path. The first occurrence
    /// gets no diagnostic of its own; it is only named by `first`.
    DuplicateLocal { local: String, first: NodePath },
    /// `local` not found in the page index.
    MissingPage { local: String },
    /// Page in the index that no entry references.
    UnlistedPage { local: String },
    /// Sibling with the same title at `first`.
    DuplicateTitle { title: String, first: NodePath },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyGroup { .. } | Self::DuplicateLocal { .. } | Self::MissingPage { .. } => {
                Severity::Error
            }
            Self::UnlistedPage { .. } | Self::DuplicateTitle { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroup { title } => write!(f, "group `{title}` has no sections"),
            Self::DuplicateLocal { local, first } => {
                write!(f, "`{local}` is already listed at {first}")
            }
            Self::MissingPage { local } => write!(f, "`{local}` does not match any page"),
            Self::UnlistedPage { local } => write!(f, "page `{local}` is not listed"),
            Self::DuplicateTitle { title, first } => {
                write!(f, "title `{title}` is already used by a sibling at {first}")
            }
        }
    }
}

/// Finding with its location in the tree (`None` for tree-wide findings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: Option<NodePath>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    fn at(path: NodePath, kind: DiagnosticKind) -> Self {
        Self {
            path: Some(path),
            kind,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{path}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Result of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// All findings: tree findings in document order, then unlisted pages.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity() == severity)
    }
}

/// Check a parsed tree.
///
/// Page checks (`MissingPage`, `UnlistedPage`) run only when `pages` is given.
pub fn validate(
    tree: &Toctree,
    options: &ValidateOptions,
    pages: Option<&dyn PageIndex>,
) -> ValidationReport {
    let mut diagnostics = Vec::new();
    let mut first_seen: HashMap<&str, NodePath> = HashMap::new();

    check_sibling_titles(
        tree.chapters()
            .iter()
            .enumerate()
            .map(|(index, chapter)| (NodePath::chapter(index), chapter.title.as_str())),
        &mut diagnostics,
    );

    for entry in tree.walk() {
        match entry.node {
            NodeRef::Group(group) => {
                if group.sections.is_empty() {
                    diagnostics.push(Diagnostic::at(
                        entry.path.clone(),
                        DiagnosticKind::EmptyGroup {
                            title: group.title.clone(),
                        },
                    ));
                }
                check_sibling_titles(
                    group
                        .sections
                        .iter()
                        .enumerate()
                        .map(|(index, child)| (entry.path.child(index), Node::title(child))),
                    &mut diagnostics,
                );
            }
            NodeRef::Leaf(leaf) => {
                if let Some(first) = first_seen.get(leaf.local.as_str()) {
                    diagnostics.push(Diagnostic::at(
                        entry.path.clone(),
                        DiagnosticKind::DuplicateLocal {
                            local: leaf.local.clone(),
                            first: first.clone(),
                        },
                    ));
                } else {
                    first_seen.insert(&leaf.local, entry.path.clone());
                }

                if let Some(pages) = pages
                    && !pages.contains(&leaf.local)
                {
                    diagnostics.push(Diagnostic::at(
                        entry.path,
                        DiagnosticKind::MissingPage {
                            local: leaf.local.clone(),
                        },
                    ));
                }
            }
        }
    }

    if options.report_unlisted
        && let Some(pages) = pages
    {
        let listed: HashSet<&str> = first_seen.keys().copied().collect();
        diagnostics.extend(
            pages
                .locals()
                .into_iter()
                .filter(|local| !listed.contains(local))
                .map(|local| Diagnostic {
                    path: None,
                    kind: DiagnosticKind::UnlistedPage {
                        local: local.to_owned(),
                    },
                }),
        );
    }

    tracing::debug!(
        diagnostics = diagnostics.len(),
        unique_locals = first_seen.len(),
        "Validated manifest"
    );

    ValidationReport { diagnostics }
}

/// Flag siblings sharing a title with an earlier sibling.
fn check_sibling_titles<'a>(
    siblings: impl Iterator<Item = (NodePath, &'a str)>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut seen: HashMap<&str, NodePath> = HashMap::new();
    for (path, title) in siblings {
        if let Some(first) = seen.get(title) {
            diagnostics.push(Diagnostic::at(
                path,
                DiagnosticKind::DuplicateTitle {
                    title: title.to_owned(),
                    first: first.clone(),
                },
            ));
        } else {
            seen.insert(title, path);
        }
    }
}
