//! Deduplicate and sort alphabetical groups.
//!
//! Some groups (model reference pages, for example) are kept in title order.
//! [`tidy`] normalises the groups named by title paths: the group itself and
//! every group beneath it whose children are all leaves.

use std::collections::HashMap;

use crate::node::{Group, Leaf, Node, Toctree};

/// Error returned when a tree cannot be tidied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TidyError {
    /// No group matches the configured title path.
    #[error("no group found at `{}`", .0.join(" > "))]
    GroupNotFound(Vec<String>),
    /// Same `local` listed under different titles within one group.
    #[error("`{local}` is listed with different titles: {}", titles.join(", "))]
    ConflictingTitles { local: String, titles: Vec<String> },
}

/// What [`tidy`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TidySummary {
    /// Leaves removed because an identical entry preceded them.
    pub removed_duplicates: usize,
    /// Groups whose order changed.
    pub reordered_groups: usize,
}

impl TidySummary {
    pub fn is_noop(&self) -> bool {
        self.removed_duplicates == 0 && self.reordered_groups == 0
    }
}

/// Return a copy of `tree` with the groups at `sorted_groups` normalised.
///
/// Leaves with the same `local` and title are collapsed; the rest are sorted
/// by case-insensitive title, keeping the original order for equal titles.
pub fn tidy(
    tree: &Toctree,
    sorted_groups: &[Vec<String>],
) -> Result<(Toctree, TidySummary), TidyError> {
    let mut chapters = tree.clone().into_chapters();
    let mut summary = TidySummary::default();

    for title_path in sorted_groups {
        let group = find_group_mut(&mut chapters, title_path)
            .ok_or_else(|| TidyError::GroupNotFound(title_path.clone()))?;
        tidy_group(group, &mut summary)?;
    }

    Ok((Toctree::new(chapters), summary))
}

/// Follow titles from a chapter down through nested groups.
fn find_group_mut<'a>(chapters: &'a mut [Group], titles: &[String]) -> Option<&'a mut Group> {
    let (first, rest) = titles.split_first()?;
    let mut group = chapters.iter_mut().find(|chapter| &chapter.title == first)?;
    for title in rest {
        group = group.sections.iter_mut().find_map(|node| match node {
            Node::Group(child) if &child.title == title => Some(child),
            _ => None,
        })?;
    }
    Some(group)
}

fn tidy_group(group: &mut Group, summary: &mut TidySummary) -> Result<(), TidyError> {
    for node in &mut group.sections {
        if let Node::Group(child) = node {
            tidy_group(child, summary)?;
        }
    }

    if group.sections.is_empty() || !group.sections.iter().all(Node::is_leaf) {
        return Ok(());
    }

    let mut titles: HashMap<String, String> = HashMap::new();
    let mut leaves: Vec<Leaf> = Vec::with_capacity(group.sections.len());
    for leaf in std::mem::take(&mut group.sections)
        .into_iter()
        .filter_map(|node| match node {
            Node::Leaf(leaf) => Some(leaf),
            Node::Group(_) => None,
        })
    {
        match titles.get(&leaf.local) {
            Some(title) if *title == leaf.title => summary.removed_duplicates += 1,
            Some(title) => {
                return Err(TidyError::ConflictingTitles {
                    titles: vec![title.clone(), leaf.title],
                    local: leaf.local,
                });
            }
            None => {
                titles.insert(leaf.local.clone(), leaf.title.clone());
                leaves.push(leaf);
            }
        }
    }

    let before: Vec<String> = leaves.iter().map(|leaf| leaf.local.clone()).collect();
    leaves.sort_by_cached_key(|leaf| leaf.title.to_lowercase());
    if leaves.iter().map(|leaf| &leaf.local).ne(before.iter()) {
        tracing::debug!(group = %group.title, "Reordered group");
        summary.reordered_groups += 1;
    }

    group.sections = leaves.into_iter().map(Node::Leaf).collect();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn path(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|&t| t.to_owned()).collect()
    }

    fn models_tree() -> Toctree {
        Toctree::new(vec![
            Group::new("Get started", vec![Leaf::new("Zebra intro", "zebra").into()]),
            Group::new(
                "API",
                vec![
                    Group::new(
                        "Models",
                        vec![
                            Group::new(
                                "Text models",
                                vec![
                                    Leaf::new("T5", "model_doc/t5").into(),
                                    Leaf::new("ALBERT", "model_doc/albert").into(),
                                    Leaf::new("bert", "model_doc/bert").into(),
                                    Leaf::new("T5", "model_doc/t5").into(),
                                ],
                            )
                            .into(),
                            Group::new(
                                "Vision models",
                                vec![
                                    Leaf::new("ViT", "model_doc/vit").into(),
                                    Leaf::new("BEiT", "model_doc/beit").into(),
                                ],
                            )
                            .into(),
                        ],
                    )
                    .into(),
                ],
            ),
        ])
    }

    fn titles_at(tree: &Toctree, indices: Vec<usize>) -> Vec<String> {
        let node = tree.node_at(&indices.into()).unwrap();
        node.as_group()
            .unwrap()
            .sections
            .iter()
            .map(|n| n.title().to_owned())
            .collect()
    }

    #[test]
    fn test_sorts_and_dedupes_leaf_groups() {
        let (tidied, summary) = tidy(&models_tree(), &[path(&["API", "Models"])]).unwrap();

        assert_eq!(titles_at(&tidied, vec![1, 0, 0]), vec!["ALBERT", "bert", "T5"]);
        assert_eq!(titles_at(&tidied, vec![1, 0, 1]), vec!["BEiT", "ViT"]);
        // Mixed group keeps its order
        assert_eq!(
            titles_at(&tidied, vec![1, 0]),
            vec!["Text models", "Vision models"]
        );
        assert_eq!(
            summary,
            TidySummary {
                removed_duplicates: 1,
                reordered_groups: 2,
            }
        );
    }

    #[test]
    fn test_untargeted_groups_untouched() {
        let tree = models_tree();
        let (tidied, summary) = tidy(&tree, &[]).unwrap();

        assert_eq!(tidied, tree);
        assert!(summary.is_noop());
    }

    #[test]
    fn test_already_tidy_is_noop() {
        let (once, _) = tidy(&models_tree(), &[path(&["API"])]).unwrap();
        let (twice, summary) = tidy(&once, &[path(&["API"])]).unwrap();

        assert_eq!(twice, once);
        assert!(summary.is_noop());
    }

    #[test]
    fn test_conflicting_titles() {
        let tree = Toctree::new(vec![Group::new(
            "Models",
            vec![
                Leaf::new("BERT", "model_doc/bert").into(),
                Leaf::new("Bert", "model_doc/bert").into(),
            ],
        )]);

        let err = tidy(&tree, &[path(&["Models"])]).unwrap_err();

        assert_eq!(
            err,
            TidyError::ConflictingTitles {
                local: "model_doc/bert".to_owned(),
                titles: vec!["BERT".to_owned(), "Bert".to_owned()],
            }
        );
    }

    #[test]
    fn test_group_not_found() {
        let err = tidy(&models_tree(), &[path(&["API", "Modelos"])]).unwrap_err();

        assert_eq!(err, TidyError::GroupNotFound(path(&["API", "Modelos"])));
        assert_eq!(err.to_string(), "no group found at `API > Modelos`");
    }

    #[test]
    fn test_stable_for_equal_titles() {
        let tree = Toctree::new(vec![Group::new(
            "Models",
            vec![
                Leaf::new("Auto", "model_doc/auto_b").into(),
                Leaf::new("auto", "model_doc/auto_a").into(),
            ],
        )]);

        let (tidied, summary) = tidy(&tree, &[path(&["Models"])]).unwrap();

        assert_eq!(tidied.locals(), vec!["model_doc/auto_b", "model_doc/auto_a"]);
        assert_eq!(summary.reordered_groups, 0);
    }
}
