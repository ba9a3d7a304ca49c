//! `toctree show` command implementation.

use std::path::PathBuf;

use clap::Args;
use toctree_config::CliSettings;
use toctree_manifest::{NavItem, NodeRef, Toctree};

use super::{ConfigArgs, Target, locale_target};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Locale to show (default: reference locale).
    #[arg(short, long, conflicts_with = "manifest")]
    locale: Option<String>,

    /// Show a manifest file instead of a locale.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Print the navigation tree as JSON.
    #[arg(long)]
    json: bool,

    /// Maximum nesting depth to print (0 prints chapters only).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Prefix for page links in JSON output.
    #[arg(long, default_value = "")]
    link_prefix: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(CliSettings::default())?;
        let target = if let Some(manifest) = &self.manifest {
            Target {
                locale: None,
                manifest: manifest.clone(),
                pages_dir: PathBuf::new(),
            }
        } else {
            let locale = self
                .locale
                .as_deref()
                .unwrap_or(&config.docs_resolved.reference_locale);
            locale_target(&config, locale)?
        };

        let tree = Toctree::load(&target.manifest)?;

        if self.json {
            let items = navigation(&tree, &self.link_prefix, self.depth);
            output.data(&serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        for line in render_tree(&tree, self.depth) {
            output.data(&line);
        }
        let stats = tree.stats();
        output.info(&output.dimmed(&format!(
            "{}: {} groups, {} entries, depth {}",
            target.label(),
            stats.groups,
            stats.leaves,
            stats.max_depth
        )));
        Ok(())
    }
}

fn navigation(tree: &Toctree, link_prefix: &str, depth: Option<usize>) -> Vec<NavItem> {
    let mut items = tree.navigation(link_prefix);
    if let Some(depth) = depth {
        for item in &mut items {
            item.prune(depth);
        }
    }
    items
}

/// Indented outline, one node per line.
///
/// Groups end with `/` (`+` or `-` marks an explicit expansion state) and
/// leaves show their `local` in parentheses.
fn render_tree(tree: &Toctree, depth: Option<usize>) -> Vec<String> {
    tree.walk()
        .filter(|entry| depth.is_none_or(|max| entry.depth() <= max))
        .map(|entry| {
            let indent = "  ".repeat(entry.depth());
            match entry.node {
                NodeRef::Group(group) => {
                    let marker = match group.is_expanded {
                        Some(true) => " +",
                        Some(false) => " -",
                        None => "",
                    };
                    format!("{indent}{}/{marker}", group.title)
                }
                NodeRef::Leaf(leaf) => format!("{indent}{} ({})", leaf.title, leaf.local),
            }
        })
        .collect()
}
