//! `toctree coverage` command implementation.

use clap::Args;
use toctree_config::CliSettings;
use toctree_manifest::{Coverage, MissingEntry, Toctree, coverage};

use super::{ConfigArgs, locale_target};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the coverage command.
#[derive(Args)]
pub(crate) struct CoverageArgs {
    /// Translated locale to measure.
    #[arg(short, long)]
    locale: String,

    /// Locale to compare against (overrides config).
    #[arg(short, long)]
    reference: Option<String>,

    /// Fail when coverage is below this percentage.
    #[arg(long, value_name = "PCT", value_parser = parse_percent)]
    fail_under: Option<f64>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl CoverageArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(CliSettings {
            reference_locale: self.reference.clone(),
            ..CliSettings::default()
        })?;
        let reference_locale = &config.docs_resolved.reference_locale;
        if *reference_locale == self.locale {
            return Err(CliError::Validation(format!(
                "`{}` is the reference locale",
                self.locale
            )));
        }

        let reference = Toctree::load(&locale_target(&config, reference_locale)?.manifest)?;
        let translated = Toctree::load(&locale_target(&config, &self.locale)?.manifest)?;
        let report = coverage(&reference, &translated);

        output.highlight(&summary_line(&self.locale, reference_locale, &report));
        if !report.missing.is_empty() {
            output.separator();
            output.info("Not translated:");
            for entry in &report.missing {
                output.info(&missing_line(entry));
            }
        }
        for local in &report.extra {
            output.warning(&format!("  `{local}` is not in the {reference_locale} manifest"));
        }

        let percent = report.ratio() * 100.0;
        if let Some(threshold) = self.fail_under
            && percent < threshold
        {
            return Err(CliError::Validation(format!(
                "Coverage {percent:.1}% is below {threshold}%"
            )));
        }
        if report.is_complete() {
            output.success("All reference pages are translated");
        }
        Ok(())
    }
}

fn summary_line(locale: &str, reference: &str, report: &Coverage) -> String {
    let total = report.translated.len() + report.missing.len();
    format!(
        "{locale}: {}/{total} {reference} pages translated ({:.1}%)",
        report.translated.len(),
        report.ratio() * 100.0
    )
}

fn missing_line(entry: &MissingEntry) -> String {
    if entry.breadcrumb.is_empty() {
        format!("  {} ({})", entry.title, entry.local)
    } else {
        format!(
            "  {} > {} ({})",
            entry.breadcrumb.join(" > "),
            entry.title,
            entry.local
        )
    }
}

fn parse_percent(value: &str) -> Result<f64, String> {
    let percent: f64 = value
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=100.0).contains(&percent) {
        Ok(percent)
    } else {
        Err(format!("{percent} is not between 0 and 100"))
    }
}
