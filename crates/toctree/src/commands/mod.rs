//! CLI command implementations.

mod check;
mod coverage;
mod fmt;
mod show;

use std::path::{Path, PathBuf};

use clap::Args;
use toctree_config::{CliSettings, Config};
use toctree_source::{Locale, ScanOptions, discover_locales};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use coverage::CoverageArgs;
pub(crate) use fmt::FmtArgs;
pub(crate) use show::ShowArgs;

/// Configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover toctree.toml).
    #[arg(short, long, env = "TOCTREE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per locale (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load configuration, letting `settings` and `--source-dir` override it.
    pub(crate) fn load(&self, settings: CliSettings) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// A manifest to operate on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    /// Locale name, `None` for a manifest given by path.
    pub(crate) locale: Option<String>,
    pub(crate) manifest: PathBuf,
    /// Directory that page identifiers are relative to.
    pub(crate) pages_dir: PathBuf,
}

impl Target {
    fn from_locale(locale: Locale) -> Self {
        Self {
            locale: Some(locale.name),
            manifest: locale.manifest,
            pages_dir: locale.dir,
        }
    }

    fn from_manifest(manifest: &Path) -> Self {
        Self {
            locale: None,
            manifest: manifest.to_path_buf(),
            // A bare file name has an empty parent
            pages_dir: manifest
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        }
    }

    /// Name used in messages.
    pub(crate) fn label(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(|| self.manifest.display().to_string())
    }
}

/// Resolve the manifests a command runs on.
///
/// An explicit `manifest` wins. Otherwise each named locale must have a
/// manifest, and with no locales every discovered locale is used.
pub(crate) fn resolve_targets(
    config: &Config,
    locales: &[String],
    manifest: Option<&Path>,
) -> Result<Vec<Target>, CliError> {
    if let Some(manifest) = manifest {
        return Ok(vec![Target::from_manifest(manifest)]);
    }

    let docs = &config.docs_resolved;
    if !docs.source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            docs.source_dir.display()
        )));
    }

    if !locales.is_empty() {
        return locales
            .iter()
            .map(|name| locale_target(config, name))
            .collect();
    }

    let discovered = discover_locales(&docs.source_dir, &docs.manifest);
    if discovered.is_empty() {
        return Err(CliError::Validation(format!(
            "No {} found in any locale under {}",
            docs.manifest,
            docs.source_dir.display()
        )));
    }
    Ok(discovered.into_iter().map(Target::from_locale).collect())
}

/// Target for a single named locale, which must have a manifest.
pub(crate) fn locale_target(config: &Config, name: &str) -> Result<Target, CliError> {
    let docs = &config.docs_resolved;
    let locale = Locale::new(&docs.source_dir, name, &docs.manifest);
    if !locale.manifest.is_file() {
        return Err(CliError::Validation(format!(
            "Locale `{name}` has no manifest at {}",
            locale.manifest.display()
        )));
    }
    Ok(Target::from_locale(locale))
}

/// Page scan options from the `[docs]` section.
pub(crate) fn scan_options(config: &Config) -> Result<ScanOptions, CliError> {
    let docs = &config.docs_resolved;
    Ok(ScanOptions::new(&docs.extensions, &docs.exclude)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use toctree_manifest::{PageIndex, Toctree, ValidateOptions, validate};
    use toctree_source::PageSet;

    use super::*;

    fn config_for(source_dir: &Path) -> Config {
        let config_path = source_dir.join("toctree.toml");
        fs::write(
            &config_path,
            format!("[docs]\nsource_dir = \"{}\"\n", source_dir.display()),
        )
        .unwrap();
        Config::load(Some(&config_path), None).unwrap()
    }

    fn add_locale(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("_toctree.yml"), "[]").unwrap();
    }

    #[test]
    fn test_resolve_all_locales() {
        let temp_dir = tempfile::tempdir().unwrap();
        add_locale(temp_dir.path(), "es");
        add_locale(temp_dir.path(), "en");
        let config = config_for(temp_dir.path());

        let targets = resolve_targets(&config, &[], None).unwrap();

        let labels: Vec<_> = targets.iter().map(Target::label).collect();
        assert_eq!(labels, vec!["en", "es"]);
        assert_eq!(targets[1].pages_dir, temp_dir.path().join("es"));
    }

    #[test]
    fn test_resolve_named_locale() {
        let temp_dir = tempfile::tempdir().unwrap();
        add_locale(temp_dir.path(), "en");
        add_locale(temp_dir.path(), "es");
        let config = config_for(temp_dir.path());

        let targets = resolve_targets(&config, &["es".to_owned()], None).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].locale.as_deref(), Some("es"));
        assert_eq!(
            targets[0].manifest,
            temp_dir.path().join("es").join("_toctree.yml")
        );
    }

    #[test]
    fn test_resolve_unknown_locale_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        add_locale(temp_dir.path(), "en");
        let config = config_for(temp_dir.path());

        let err = resolve_targets(&config, &["fr".to_owned()], None).unwrap_err();

        assert!(err.to_string().contains("Locale `fr` has no manifest"));
    }

    #[test]
    fn test_resolve_without_locales_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config_for(temp_dir.path());

        let err = resolve_targets(&config, &[], None).unwrap_err();

        assert!(err.to_string().contains("No _toctree.yml found"));
    }

    #[test]
    fn test_resolve_missing_source_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = config_for(temp_dir.path());
        config.docs_resolved.source_dir = temp_dir.path().join("missing");

        let err = resolve_targets(&config, &[], None).unwrap_err();

        assert!(err.to_string().contains("Source directory not found"));
    }

    #[test]
    fn test_resolve_explicit_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config_for(temp_dir.path());
        let manifest = temp_dir.path().join("site").join("toc.yml");

        let targets = resolve_targets(&config, &["en".to_owned()], Some(&manifest)).unwrap();

        assert_eq!(
            targets,
            vec![Target {
                locale: None,
                manifest: manifest.clone(),
                pages_dir: temp_dir.path().join("site"),
            }]
        );
        assert_eq!(targets[0].label(), manifest.display().to_string());
    }

    #[test]
    fn test_explicit_manifest_file_name_uses_current_dir() {
        let target = Target::from_manifest(Path::new("_toctree.yml"));

        assert_eq!(target.pages_dir, PathBuf::from("."));
        assert_eq!(target.manifest, PathBuf::from("_toctree.yml"));
    }

    #[test]
    fn test_explicit_manifest_file_name_resolves_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("_toctree.yml"),
            "- title: Get started\n  sections:\n  - local: index\n    title: Home\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();

        let target = Target::from_manifest(Path::new("_toctree.yml"));
        let pages_dir = temp_dir.path().join(&target.pages_dir);
        let tree = Toctree::load(&temp_dir.path().join(&target.manifest)).unwrap();
        let pages = PageSet::scan(&pages_dir, &ScanOptions::default());
        let report = validate(&tree, &ValidateOptions::default(), Some(&pages as &dyn PageIndex));

        assert_eq!(pages.len(), 1);
        assert!(report.is_clean());
    }
}
