//! Configuration management for toctree.
//!
//! Parses `toctree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.manifest`
//! - `docs.reference_locale`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override manifest file name.
    pub manifest: Option<String>,
    /// Override reference locale.
    pub reference_locale: Option<String>,
    /// Override page resolution.
    pub check_pages: Option<bool>,
    /// Override unlisted page reporting.
    pub report_unlisted: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "toctree.toml";

const DEFAULT_SOURCE_DIR: &str = "docs/source";
const DEFAULT_MANIFEST: &str = "_toctree.yml";
const DEFAULT_REFERENCE_LOCALE: &str = "en";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Validation configuration.
    pub validate: ValidateConfig,
    /// Tidy rules applied by `fmt`.
    pub tidy: TidyConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
    reference_locale: Option<String>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding one subdirectory per locale.
    pub source_dir: PathBuf,
    /// Manifest file name inside each locale directory.
    pub manifest: String,
    /// Locale that translations are compared against.
    pub reference_locale: String,
    /// Page file extensions, without dot.
    pub extensions: Vec<String>,
    /// Glob patterns for files that are not pages.
    pub exclude: Vec<String>,
}

impl DocsConfig {
    /// Source directory of a locale.
    #[must_use]
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.source_dir.join(locale)
    }

    /// Manifest path of a locale.
    #[must_use]
    pub fn manifest_path(&self, locale: &str) -> PathBuf {
        self.locale_dir(locale).join(&self.manifest)
    }
}

/// Validation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Resolve `local` references against page files.
    pub check_pages: bool,
    /// Warn about page files no entry references.
    pub report_unlisted: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            check_pages: true,
            report_unlisted: false,
        }
    }
}

/// Tidy configuration.
///
/// ```toml
/// [tidy.sorted_groups]
/// en = [["API", "Models"]]
/// es = [["API", "Modelos"]]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TidyConfig {
    /// Title paths of alphabetically sorted groups, per locale.
    pub sorted_groups: BTreeMap<String, Vec<Vec<String>>>,
}

impl TidyConfig {
    /// Sorted group title paths for a locale (empty if none configured).
    pub fn rules_for(&self, locale: &str) -> &[Vec<String>] {
        self.sorted_groups
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `toctree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(manifest) = &settings.manifest {
            self.docs_resolved.manifest.clone_from(manifest);
        }
        if let Some(reference_locale) = &settings.reference_locale {
            self.docs_resolved
                .reference_locale
                .clone_from(reference_locale);
        }
        if let Some(check_pages) = settings.check_pages {
            self.validate.check_pages = check_pages;
        }
        if let Some(report_unlisted) = settings.report_unlisted {
            self.validate.report_unlisted = report_unlisted;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            validate: ValidateConfig::default(),
            tidy: TidyConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                manifest: DEFAULT_MANIFEST.to_owned(),
                reference_locale: DEFAULT_REFERENCE_LOCALE.to_owned(),
                extensions: default_extensions(),
                exclude: Vec::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_tidy()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.manifest, "docs.manifest")?;
        if docs.manifest.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.manifest must be a file name, not a path".to_owned(),
            ));
        }
        require_non_empty(&docs.reference_locale, "docs.reference_locale")?;

        if docs.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions must list at least one extension".to_owned(),
            ));
        }
        for ext in &docs.extensions {
            require_non_empty(ext.trim_start_matches('.'), "docs.extensions")?;
        }

        Ok(())
    }

    /// Validate tidy configuration.
    fn validate_tidy(&self) -> Result<(), ConfigError> {
        for (locale, paths) in &self.tidy.sorted_groups {
            for path in paths {
                if path.is_empty() || path.iter().any(|title| title.trim().is_empty()) {
                    return Err(ConfigError::Validation(format!(
                        "tidy.sorted_groups.{locale} contains an empty title path"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let docs = &mut self.docs;
        if let Some(ref source_dir) = docs.source_dir {
            docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref manifest) = docs.manifest {
            docs.manifest = Some(expand::expand_env(manifest, "docs.manifest")?);
        }
        if let Some(ref locale) = docs.reference_locale {
            docs.reference_locale = Some(expand::expand_env(locale, "docs.reference_locale")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let docs = &self.docs;
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(docs.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)),
            manifest: docs
                .manifest
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_owned()),
            reference_locale: docs
                .reference_locale
                .clone()
                .unwrap_or_else(|| DEFAULT_REFERENCE_LOCALE.to_owned()),
            extensions: docs.extensions.clone().unwrap_or_else(default_extensions),
            exclude: docs.exclude.clone().unwrap_or_default(),
        };
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_owned(), "mdx".to_owned()]
}
