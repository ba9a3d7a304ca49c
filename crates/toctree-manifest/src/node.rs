//! Manifest tree types.
//!
//! Field order on [`Group`] and [`Leaf`] is the serialization order: keys are
//! written alphabetically, matching how upstream manifests are laid out.

use std::fmt;

use serde::Serialize;

/// Location of a node as child indices, starting with the chapter index.
///
/// Displays as `[0].sections[2].sections[1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the top-level chapter at `index`.
    #[must_use]
    pub fn chapter(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of the child at `index` below this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Parent path, or `None` for chapters and the empty path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            len => Some(Self(self.0[..len - 1].to_vec())),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth: 0 for chapters.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return f.write_str("<root>");
        };
        write!(f, "[{first}]")?;
        for index in rest {
            write!(f, ".sections[{index}]")?;
        }
        Ok(())
    }
}

/// A single manifest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Heading with nested entries.
    Group(Group),
    /// Reference to one documentation page.
    Leaf(Leaf),
}

impl Node {
    pub fn title(&self) -> &str {
        match self {
            Self::Group(group) => &group.title,
            Self::Leaf(leaf) => &leaf.title,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Borrowed view of this node.
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Self::Group(group) => NodeRef::Group(group),
            Self::Leaf(leaf) => NodeRef::Leaf(leaf),
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// Borrowed node, used where chapters (stored as [`Group`]) and nested
/// [`Node`]s are visited uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Group(&'a Group),
    Leaf(&'a Leaf),
}

impl<'a> NodeRef<'a> {
    pub fn title(self) -> &'a str {
        match self {
            Self::Group(group) => &group.title,
            Self::Leaf(leaf) => &leaf.title,
        }
    }

    pub fn as_group(self) -> Option<&'a Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(self) -> Option<&'a Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }
}

/// Chapter or section heading with ordered children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Initial expansion state. `None` leaves it to the renderer.
    #[serde(rename = "isExpanded", skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    /// Child entries in display order.
    pub sections: Vec<Node>,
    /// Display title.
    pub title: String,
}

impl Group {
    #[must_use]
    pub fn new(title: impl Into<String>, sections: Vec<Node>) -> Self {
        Self {
            is_expanded: None,
            sections,
            title: title.into(),
        }
    }

    /// Set the initial expansion state.
    #[must_use]
    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = Some(is_expanded);
        self
    }
}

/// Reference to a single documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Leaf {
    /// Page identifier relative to the locale source directory, without extension.
    pub local: String,
    /// Display title.
    pub title: String,
}

impl Leaf {
    #[must_use]
    pub fn new(title: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            title: title.into(),
        }
    }
}

/// A complete manifest: ordered top-level chapters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Toctree {
    chapters: Vec<Group>,
}

impl Toctree {
    #[must_use]
    pub fn new(chapters: Vec<Group>) -> Self {
        Self { chapters }
    }

    pub fn chapters(&self) -> &[Group] {
        &self.chapters
    }

    pub fn into_chapters(self) -> Vec<Group> {
        self.chapters
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
