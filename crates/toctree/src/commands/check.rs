//! `toctree check` command implementation.

use std::path::PathBuf;

use clap::Args;
use toctree_config::{CliSettings, Config};
use toctree_manifest::{
    Diagnostic, ManifestError, PageIndex, Severity, Toctree, ValidateOptions, ValidationReport,
    validate,
};
use toctree_source::{PageSet, ScanOptions};

use super::{ConfigArgs, Target, resolve_targets, scan_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Locale to check, repeatable (default: every locale with a manifest).
    #[arg(short, long = "locale", conflicts_with = "manifest")]
    locales: Vec<String>,

    /// Check a single manifest file; pages resolve relative to its directory.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Skip resolving entries against page files.
    #[arg(long)]
    no_pages: bool,

    /// Warn about page files that no entry references.
    #[arg(long)]
    unlisted: bool,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(CliSettings {
            check_pages: self.no_pages.then_some(false),
            report_unlisted: self.unlisted.then_some(true),
            ..CliSettings::default()
        })?;
        let targets = resolve_targets(&config, &self.locales, self.manifest.as_deref())?;
        let scan = scan_options(&config)?;

        let mut failed = Vec::new();
        for target in &targets {
            let label = target.label();
            match check_target(target, &config, &scan) {
                Ok((tree, report)) => {
                    print_report(&output, &label, &tree, &report);
                    if target_failed(&report, self.strict) {
                        failed.push(label);
                    }
                }
                Err(err) => {
                    output.error(&format!("{label}: {err}"));
                    failed.push(label);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} of {} manifests failed: {}",
                failed.len(),
                targets.len(),
                failed.join(", ")
            )))
        }
    }
}

/// Load and validate one manifest.
fn check_target(
    target: &Target,
    config: &Config,
    scan: &ScanOptions,
) -> Result<(Toctree, ValidationReport), ManifestError> {
    let tree = Toctree::load(&target.manifest)?;
    let pages = config
        .validate
        .check_pages
        .then(|| PageSet::scan(&target.pages_dir, scan));
    let options = ValidateOptions {
        report_unlisted: config.validate.report_unlisted,
    };
    let report = validate(
        &tree,
        &options,
        pages.as_ref().map(|pages| pages as &dyn PageIndex),
    );
    Ok((tree, report))
}

/// Errors always fail a manifest; warnings fail it only in strict mode.
fn target_failed(report: &ValidationReport, strict: bool) -> bool {
    report.has_errors() || (strict && !report.is_clean())
}

fn print_report(output: &Output, label: &str, tree: &Toctree, report: &ValidationReport) {
    let stats = tree.stats();
    if report.is_clean() {
        output.success(&format!(
            "{label}: ok ({} groups, {} entries)",
            stats.groups, stats.leaves
        ));
        return;
    }

    output.highlight(&format!(
        "{label}: {} errors, {} warnings",
        report.errors().count(),
        report.warnings().count()
    ));
    for diagnostic in report.diagnostics() {
        let line = format!("  {}: {diagnostic}", diagnostic.severity());
        match diagnostic.severity() {
            Severity::Error => output.error(&line),
            Severity::Warning => output.warning(&line),
        }
        if let Some(crumbs) = location(tree, diagnostic) {
            output.info(&format!("    {}", output.dimmed(&crumbs)));
        }
    }
}

/// Breadcrumb of a diagnostic's node, like `Tutorials > Pipelines`.
fn location(tree: &Toctree, diagnostic: &Diagnostic) -> Option<String> {
    let path = diagnostic.path.as_ref()?;
    tree.breadcrumb(path).map(|titles| titles.join(" > "))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use toctree_manifest::{DiagnosticKind, Group, Leaf, NodePath};

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn target(root: &Path) -> Target {
        Target {
            locale: Some("en".to_owned()),
            manifest: root.join("_toctree.yml"),
            pages_dir: root.to_path_buf(),
        }
    }

    const MANIFEST: &str = "\
- title: Get started
  sections:
  - local: index
    title: Home
  - local: installation
    title: Installation
";

    #[test]
    fn test_check_target_reports_missing_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);
        write(temp_dir.path(), "index.md", "# Home");

        let (_, report) =
            check_target(&target(temp_dir.path()), &Config::default(), &ScanOptions::default())
                .unwrap();

        assert_eq!(
            report.diagnostics(),
            &[Diagnostic {
                path: Some(NodePath::from(vec![0, 1])),
                kind: DiagnosticKind::MissingPage {
                    local: "installation".to_owned(),
                },
            }]
        );
    }

    #[test]
    fn test_check_target_without_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);
        let mut config = Config::default();
        config.validate.check_pages = false;

        let (tree, report) =
            check_target(&target(temp_dir.path()), &config, &ScanOptions::default()).unwrap();

        assert!(report.is_clean());
        assert_eq!(tree.stats().leaves, 2);
    }

    #[test]
    fn test_check_target_unlisted_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);
        write(temp_dir.path(), "index.md", "# Home");
        write(temp_dir.path(), "installation.md", "# Install");
        write(temp_dir.path(), "drafts/roadmap.md", "# Roadmap");
        let mut config = Config::default();
        config.validate.report_unlisted = true;

        let (_, report) =
            check_target(&target(temp_dir.path()), &config, &ScanOptions::default()).unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_check_target_invalid_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", "- local: index\n  title: Home\n");

        let err =
            check_target(&target(temp_dir.path()), &Config::default(), &ScanOptions::default())
                .unwrap_err();

        assert!(matches!(err, ManifestError::Schema(_)));
    }

    #[test]
    fn test_location_breadcrumb() {
        let tree = Toctree::new(vec![Group::new(
            "Tutorials",
            vec![Group::new("Pipelines", vec![Leaf::new("Run", "run").into()]).into()],
        )]);
        let diagnostic = Diagnostic {
            path: Some(NodePath::from(vec![0, 0, 0])),
            kind: DiagnosticKind::MissingPage {
                local: "run".to_owned(),
            },
        };

        assert_eq!(
            location(&tree, &diagnostic).as_deref(),
            Some("Tutorials > Pipelines > Run")
        );
    }

    #[test]
    fn test_warnings_fail_only_in_strict_mode() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);
        write(temp_dir.path(), "index.md", "# Home");
        write(temp_dir.path(), "installation.md", "# Install");
        write(temp_dir.path(), "glossary.md", "# Glossary");
        let mut config = Config::default();
        config.validate.report_unlisted = true;

        let (_, report) =
            check_target(&target(temp_dir.path()), &config, &ScanOptions::default()).unwrap();

        assert!(!report.has_errors());
        assert!(!target_failed(&report, false));
        assert!(target_failed(&report, true));
    }

    #[test]
    fn test_errors_fail_without_strict_mode() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);

        let (_, report) =
            check_target(&target(temp_dir.path()), &Config::default(), &ScanOptions::default())
                .unwrap();

        assert!(report.has_errors());
        assert!(target_failed(&report, false));
    }

    #[test]
    fn test_clean_report_passes_strict_mode() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "_toctree.yml", MANIFEST);
        write(temp_dir.path(), "index.md", "# Home");
        write(temp_dir.path(), "installation.md", "# Install");

        let (_, report) =
            check_target(&target(temp_dir.path()), &Config::default(), &ScanOptions::default())
                .unwrap();

        assert!(report.is_clean());
        assert!(!target_failed(&report, true));
    }
}
