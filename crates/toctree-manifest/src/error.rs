//! Manifest error types.

use std::path::PathBuf;

use crate::node::NodePath;

/// Reason a node does not match the Group or Leaf shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaErrorKind {
    #[error("node has no `title`")]
    MissingTitle,
    #[error("`title` is empty")]
    EmptyTitle,
    #[error("`local` is empty")]
    EmptyLocal,
    #[error("node has neither `local` nor `sections`")]
    UnknownShape,
    #[error("node has both `local` and `sections`")]
    AmbiguousShape,
    #[error("`isExpanded` is only valid on groups")]
    ExpandedLeaf,
    #[error("top-level entries must be groups with `sections`")]
    TopLevelLeaf,
}

/// A node that is neither a valid Group nor a valid Leaf.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid node at {path}: {kind}")]
pub struct SchemaError {
    /// Location of the offending node.
    pub path: NodePath,
    /// What is wrong with it.
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    #[must_use]
    pub fn new(path: NodePath, kind: SchemaErrorKind) -> Self {
        Self { path, kind }
    }
}

/// Error returned when loading or saving a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed YAML, wrong value types or unknown keys.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Well-formed YAML with an invalid node shape.
    #[error("{0}")]
    Schema(#[from] SchemaError),
}
