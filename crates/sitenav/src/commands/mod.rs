//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_content::ContentPage;
use sitenav_core::{LoadWarning, NavigationBuilder, PageIndex, SiteNavigation};

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command that loads a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (show load summaries and lookups).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with CLI overrides applied.
    fn load_config(&self, strict: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            strict,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Index content pages by site path.
fn page_index(pages: &[ContentPage]) -> PageIndex {
    pages.iter().map(|p| (&p.path, &p.title)).collect()
}

/// Build the navigation, printing warnings whether or not it loads.
fn build_navigation(
    output: &Output,
    builder: NavigationBuilder<'_>,
) -> Result<SiteNavigation, CliError> {
    match builder.build() {
        Ok(loaded) => {
            report_warnings(output, &loaded.warnings);
            Ok(loaded.navigation)
        }
        Err(err) => {
            report_warnings(output, &err.warnings);
            Err(err.into())
        }
    }
}

fn report_warnings(output: &Output, warnings: &[LoadWarning]) {
    output.warning_list("warning(s):", warnings);
}
