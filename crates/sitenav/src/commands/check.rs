//! `sitenav check` command implementation.

use clap::Args;
use rayon::prelude::*;
use sitenav_content::{ContentPage, scan_pages};
use sitenav_core::{Route, SiteNavigation};

use super::{SiteArgs, build_navigation, page_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Fail on links to missing pages (overrides config).
    #[arg(long)]
    strict: bool,

    /// Report links to missing pages as warnings (overrides config).
    #[arg(long, conflicts_with = "strict")]
    no_strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, content scanning or navigation
    /// loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load_config(self.resolve_strict())?;
        let source_dir = &config.docs_resolved.source_dir;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Source directory: {}", source_dir.display()));

        let pages = scan_pages(source_dir)?;
        let index = page_index(&pages);
        let navigation = build_navigation(&output, SiteNavigation::builder(&config).pages(&index))?;

        output.warning_list(
            "page(s) not in any sidebar:",
            &uncovered_pages(&navigation, &pages),
        );

        output.success(&format!(
            "Navigation OK: {} navbar item(s), {} sidebar section(s), {} page(s)",
            navigation.navbar().items().len(),
            navigation.sidebar().sections().len(),
            pages.len()
        ));
        Ok(())
    }

    /// Resolve strictness from --strict/--no-strict flags.
    fn resolve_strict(&self) -> Option<bool> {
        self.no_strict
            .then_some(false)
            .or(self.strict.then_some(true))
    }
}

/// Pages whose rendered path resolves to an empty sidebar, in scan order.
fn uncovered_pages<'a>(navigation: &SiteNavigation, pages: &'a [ContentPage]) -> Vec<&'a str> {
    pages
        .par_iter()
        .filter(|page| {
            let served = navigation.base().href(&Route::parse(&page.path));
            navigation.resolve(&served).sidebar_prefix.is_none()
        })
        .map(|page| page.path.as_str())
        .collect()
}
