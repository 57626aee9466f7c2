//! `sitenav resolve` command implementation.

use clap::Args;
use console::Term;
use sitenav_content::{ScanError, scan_pages};
use sitenav_core::{ResolvedNavigation, SiteNavigation};

use super::{SiteArgs, build_navigation, page_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Rendered page path, base included (e.g., /tutorial/method.html).
    path: String,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// A missing source directory is not fatal: links are then not checked
    /// and bare sidebar references take titles from their slugs.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or navigation loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;

        let index = match scan_pages(&config.docs_resolved.source_dir) {
            Ok(pages) => Some(page_index(&pages)),
            Err(ScanError::SourceNotFound(dir)) => {
                output.warning(&format!(
                    "Source directory not found: {}, links not checked",
                    dir.display()
                ));
                None
            }
            Err(err) => return Err(err.into()),
        };

        let mut builder = SiteNavigation::builder(&config);
        if let Some(index) = &index {
            builder = builder.pages(index);
        }
        let navigation = build_navigation(&output, builder)?;

        let resolved = navigation.resolve(&self.path);
        tracing::debug!(
            path = %self.path,
            route = %resolved.route,
            sidebar = ?resolved.sidebar_prefix,
            "Resolved navigation"
        );
        Term::stdout().write_line(&render(&resolved, self.pretty)?)?;
        Ok(())
    }
}

fn render(resolved: &ResolvedNavigation, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(resolved)
    } else {
        serde_json::to_string(resolved)
    }
}
