//! Tree traversal and lookup.

use crate::node::{Leaf, NodePath, NodeRef, Toctree};

/// A node visited by [`Walk`].
#[derive(Clone, Debug)]
pub struct Entry<'a> {
    pub path: NodePath,
    pub node: NodeRef<'a>,
}

impl Entry<'_> {
    /// Nesting depth: 0 for chapters.
    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Pre-order iterator over every node of a [`Toctree`].
pub struct Walk<'a> {
    stack: Vec<(NodePath, NodeRef<'a>)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        if let NodeRef::Group(group) = node {
            // Reverse push so the first child is visited first
            for (index, child) in group.sections.iter().enumerate().rev() {
                self.stack.push((path.child(index), child.view()));
            }
        }
        Some(Entry { path, node })
    }
}

/// Node counts for a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub groups: usize,
    pub leaves: usize,
    /// Deepest nesting level (0 when only chapters exist).
    pub max_depth: usize,
}

impl Toctree {
    /// Visit every node in document order.
    pub fn walk(&self) -> Walk<'_> {
        let stack = self
            .chapters()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, chapter)| (NodePath::chapter(index), NodeRef::Group(chapter)))
            .collect();
        Walk { stack }
    }

    /// Every leaf with its location, in document order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodePath, &Leaf)> {
        self.walk()
            .filter_map(|entry| entry.node.as_leaf().map(|leaf| (entry.path, leaf)))
    }

    /// Every `local` in document order, duplicates included.
    pub fn locals(&self) -> Vec<&str> {
        self.leaves().map(|(_, leaf)| leaf.local.as_str()).collect()
    }

    /// First leaf referencing `local`.
    pub fn find_local(&self, local: &str) -> Option<(NodePath, &Leaf)> {
        self.leaves().find(|(_, leaf)| leaf.local == local)
    }

    /// Node at `path`, if the path exists.
    pub fn node_at(&self, path: &NodePath) -> Option<NodeRef<'_>> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = NodeRef::Group(self.chapters().get(*first)?);
        for index in rest {
            node = node.as_group()?.sections.get(*index)?.view();
        }
        Some(node)
    }

    /// Titles from the chapter down to the node at `path` (inclusive).
    pub fn breadcrumb(&self, path: &NodePath) -> Option<Vec<&str>> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = NodeRef::Group(self.chapters().get(*first)?);
        let mut titles = vec![node.title()];
        for index in rest {
            node = node.as_group()?.sections.get(*index)?.view();
            titles.push(node.title());
        }
        Some(titles)
    }

    pub fn stats(&self) -> TreeStats {
        self.walk().fold(TreeStats::default(), |mut stats, entry| {
            match entry.node {
                NodeRef::Group(_) => stats.groups += 1,
                NodeRef::Leaf(_) => stats.leaves += 1,
            }
            stats.max_depth = stats.max_depth.max(entry.depth());
            stats
        })
    }
}
