//! `toctree fmt` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use toctree_config::CliSettings;
use toctree_manifest::{TidySummary, Toctree, tidy};

use super::{ConfigArgs, Target, resolve_targets};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fmt command.
#[derive(Args)]
pub(crate) struct FmtArgs {
    /// Locale to format, repeatable (default: every locale with a manifest).
    #[arg(short, long = "locale", conflicts_with = "manifest")]
    locales: Vec<String>,

    /// Format a single manifest file (no tidy rules apply).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Report manifests that would change without writing them.
    #[arg(long)]
    check: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

/// Result of formatting one manifest.
#[derive(Debug, PartialEq, Eq)]
struct Formatted {
    changed: bool,
    summary: TidySummary,
}

impl FmtArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(CliSettings::default())?;
        let targets = resolve_targets(&config, &self.locales, self.manifest.as_deref())?;

        let mut changed = Vec::new();
        for target in &targets {
            let label = target.label();
            let rules = target
                .locale
                .as_deref()
                .map(|locale| config.tidy.rules_for(locale))
                .unwrap_or_default();
            let formatted = format_target(target, rules, !self.check)?;

            if !formatted.changed {
                output.info(&format!("{label}: unchanged"));
                continue;
            }

            let mut details = Vec::new();
            if formatted.summary.removed_duplicates > 0 {
                details.push(format!(
                    "{} duplicates removed",
                    formatted.summary.removed_duplicates
                ));
            }
            if formatted.summary.reordered_groups > 0 {
                details.push(format!(
                    "{} groups sorted",
                    formatted.summary.reordered_groups
                ));
            }
            let details = if details.is_empty() {
                String::new()
            } else {
                format!(" ({})", details.join(", "))
            };

            if self.check {
                output.warning(&format!("{label}: would reformat{details}"));
            } else {
                output.success(&format!("{label}: reformatted{details}"));
            }
            changed.push(label);
        }

        if self.check {
            check_result(&changed)
        } else {
            Ok(())
        }
    }
}

/// Outcome of `--check`: fails when any manifest would change.
fn check_result(changed: &[String]) -> Result<(), CliError> {
    if changed.is_empty() {
        return Ok(());
    }
    Err(CliError::Validation(format!(
        "{} manifests need formatting: {}",
        changed.len(),
        changed.join(", ")
    )))
}

/// Tidy and canonicalize a manifest, writing it back when `write` is set.
fn format_target(
    target: &Target,
    rules: &[Vec<String>],
    write: bool,
) -> Result<Formatted, CliError> {
    let current = fs::read_to_string(&target.manifest)?;
    let tree = Toctree::from_yaml_str(&current)?;
    let (tidied, summary) = tidy(&tree, rules)?;
    let canonical = tidied.to_yaml_string()?;

    let changed = canonical != current;
    if changed && write {
        tidied.save(&target.manifest)?;
        tracing::debug!(manifest = %target.manifest.display(), "Wrote canonical manifest");
    }
    Ok(Formatted { changed, summary })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const MESSY: &str = "\
- sections:
  - title: BERT
    local: model_doc/bert
  - title: ALBERT
    local: model_doc/albert
  - title: BERT
    local: model_doc/bert
  title: Models
  isExpanded: false
";

    fn target(root: &Path, content: &str) -> Target {
        let manifest = root.join("_toctree.yml");
        fs::write(&manifest, content).unwrap();
        Target {
            locale: Some("en".to_owned()),
            manifest,
            pages_dir: root.to_path_buf(),
        }
    }

    #[test]
    fn test_format_rewrites_canonical_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = target(temp_dir.path(), MESSY);

        let formatted = format_target(&target, &[], true).unwrap();

        assert!(formatted.changed);
        assert!(formatted.summary.is_noop());
        let written = fs::read_to_string(&target.manifest).unwrap();
        assert!(written.starts_with("- isExpanded: false\n"));
        assert!(!format_target(&target, &[], true).unwrap().changed);
    }

    #[test]
    fn test_format_applies_tidy_rules() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = target(temp_dir.path(), MESSY);

        let formatted = format_target(&target, &[vec!["Models".to_owned()]], true).unwrap();

        assert_eq!(
            formatted.summary,
            TidySummary {
                removed_duplicates: 1,
                reordered_groups: 1,
            }
        );
        let tree = Toctree::load(&target.manifest).unwrap();
        assert_eq!(tree.locals(), vec!["model_doc/albert", "model_doc/bert"]);
    }

    #[test]
    fn test_check_mode_leaves_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = target(temp_dir.path(), MESSY);

        let formatted = format_target(&target, &[], false).unwrap();

        assert!(formatted.changed);
        assert_eq!(fs::read_to_string(&target.manifest).unwrap(), MESSY);
    }

    #[test]
    fn test_format_missing_group_rule_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = target(temp_dir.path(), MESSY);

        let err = format_target(&target, &[vec!["Modelos".to_owned()]], true).unwrap_err();

        assert!(matches!(err, CliError::Tidy(_)));
        assert_eq!(fs::read_to_string(&target.manifest).unwrap(), MESSY);
    }

    #[test]
    fn test_check_result_passes_when_unchanged() {
        assert!(check_result(&[]).is_ok());
    }

    #[test]
    fn test_check_result_fails_when_changed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = target(temp_dir.path(), MESSY);
        let formatted = format_target(&target, &[], false).unwrap();
        assert!(formatted.changed);

        let err = check_result(&[target.label()]).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.to_string(), "1 manifests need formatting: en");
    }
}
