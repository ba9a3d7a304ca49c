//! Navigation view for UI and JSON output.

use serde::Serialize;

use crate::node::{Group, Node, Toctree};

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path. `None` for groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Initial expansion state for groups that set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Drop children deeper than `max_depth` (0 keeps only these items).
    pub fn prune(&mut self, max_depth: usize) {
        if max_depth == 0 {
            self.children.clear();
            return;
        }
        for child in &mut self.children {
            child.prune(max_depth - 1);
        }
    }
}

impl Toctree {
    /// Build the navigation tree.
    ///
    /// Leaf paths are `{link_prefix}/{local}`; a trailing slash on the prefix
    /// is ignored, so an empty prefix yields `/{local}`.
    pub fn navigation(&self, link_prefix: &str) -> Vec<NavItem> {
        let prefix = link_prefix.trim_end_matches('/');
        self.chapters()
            .iter()
            .map(|chapter| group_item(chapter, prefix))
            .collect()
    }
}

fn group_item(group: &Group, prefix: &str) -> NavItem {
    NavItem {
        title: group.title.clone(),
        path: None,
        expanded: group.is_expanded,
        children: group
            .sections
            .iter()
            .map(|node| match node {
                Node::Group(child) => group_item(child, prefix),
                Node::Leaf(leaf) => NavItem {
                    title: leaf.title.clone(),
                    path: Some(format!("{prefix}/{}", leaf.local)),
                    expanded: None,
                    children: Vec::new(),
                },
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Leaf;

    fn sample_tree() -> Toctree {
        Toctree::new(vec![
            Group::new("Empezar", vec![Leaf::new("Tour rápido", "quicktour").into()]),
            Group::new(
                "Guías prácticas",
                vec![
                    Group::new(
                        "Audio",
                        vec![Leaf::new("Clasificación", "tasks/audio_classification").into()],
                    )
                    .into(),
                ],
            )
            .expanded(false),
        ])
    }

    #[test]
    fn test_navigation_links_leaves() {
        let nav = sample_tree().navigation("/docs/es/");

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].title, "Empezar");
        assert!(nav[0].path.is_none());
        assert_eq!(nav[0].children[0].path.as_deref(), Some("/docs/es/quicktour"));
        assert_eq!(
            nav[1].children[0].children[0].path.as_deref(),
            Some("/docs/es/tasks/audio_classification")
        );
        assert_eq!(nav[1].expanded, Some(false));
    }

    #[test]
    fn test_navigation_empty_prefix() {
        let nav = sample_tree().navigation("");
        assert_eq!(nav[0].children[0].path.as_deref(), Some("/quicktour"));
    }

    #[test]
    fn test_prune() {
        let mut nav = sample_tree().navigation("");
        for item in &mut nav {
            item.prune(1);
        }

        assert_eq!(nav[1].children.len(), 1);
        assert!(nav[1].children[0].children.is_empty());

        nav[0].prune(0);
        assert!(nav[0].children.is_empty());
    }

    #[test]
    fn test_navigation_serialization() {
        let nav = sample_tree().navigation("");

        let json = serde_json::to_value(&nav).unwrap();

        assert_eq!(json[0]["title"], "Empezar");
        assert!(json[0].get("path").is_none());
        assert!(json[0].get("expanded").is_none());
        assert_eq!(json[0]["children"][0]["path"], "/quicktour");
        assert!(json[0]["children"][0].get("children").is_none());
        assert_eq!(json[1]["expanded"], false);
    }
}
