//! YAML parsing and canonical serialization.
//!
//! Parsing is two-phase: `serde_yaml` reads a permissive [`RawNode`] tree
//! (rejecting unknown keys and wrong value types), then each node is narrowed
//! to a [`Group`] or [`Leaf`] with its [`NodePath`] so shape errors point at
//! the offending entry.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ManifestError, SchemaError, SchemaErrorKind};
use crate::node::{Group, Leaf, Node, NodePath, Toctree};

/// Node as written in the manifest, before shape checks.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    title: Option<String>,
    local: Option<String>,
    sections: Option<Vec<RawNode>>,
    #[serde(rename = "isExpanded")]
    is_expanded: Option<bool>,
}

impl RawNode {
    fn into_node(self, path: &NodePath) -> Result<Node, SchemaError> {
        let fail = |kind| Err(SchemaError::new(path.clone(), kind));

        let title = match self.title {
            None => return fail(SchemaErrorKind::MissingTitle),
            Some(title) if title.trim().is_empty() => return fail(SchemaErrorKind::EmptyTitle),
            Some(title) => title,
        };

        match (self.local, self.sections) {
            (Some(_), Some(_)) => fail(SchemaErrorKind::AmbiguousShape),
            (None, None) => fail(SchemaErrorKind::UnknownShape),
            (Some(local), None) => {
                if local.trim().is_empty() {
                    return fail(SchemaErrorKind::EmptyLocal);
                }
                if self.is_expanded.is_some() {
                    return fail(SchemaErrorKind::ExpandedLeaf);
                }
                Ok(Node::Leaf(Leaf { local, title }))
            }
            (None, Some(children)) => {
                let sections = children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| child.into_node(&path.child(index)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Group(Group {
                    is_expanded: self.is_expanded,
                    sections,
                    title,
                }))
            }
        }
    }
}

impl Toctree {
    /// Parse a manifest from YAML.
    ///
    /// Empty input (or an empty sequence) yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Yaml`] for malformed YAML or unknown keys and
    /// [`ManifestError::Schema`] for entries that match neither node shape.
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: Option<Vec<RawNode>> = serde_yaml::from_str(content)?;
        let chapters = raw
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let path = NodePath::chapter(index);
                match raw.into_node(&path)? {
                    Node::Group(group) => Ok(group),
                    Node::Leaf(_) => Err(SchemaError::new(path, SchemaErrorKind::TopLevelLeaf)),
                }
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        Ok(Self::new(chapters))
    }

    /// Serialize to canonical YAML.
    ///
    /// Keys are written alphabetically (`isExpanded`, `local`, `sections`,
    /// `title`) and child order is preserved.
    pub fn to_yaml_string(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            chapters = tree.chapters().len(),
            "Loaded manifest"
        );
        Ok(tree)
    }

    /// Write the canonical YAML form to a file.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let content = self.to_yaml_string()?;
        std::fs::write(path, content).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
