//! `folio check` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or navigation is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.compose()?;

        output.path("Source directory", &config.docs_resolved.source_dir);
        output.site_heading(site.config().title(), site.edition());

        for category in site.navigation().categories() {
            output.category(&category.label, category.pages.len());
            for page in &category.pages {
                output.page(&page.title, &site.config().url_for(&page.resolved_path));
            }
        }

        output.done(&format!(
            "OK: {} categories, {} pages, {} navbar links",
            site.navigation().categories().len(),
            site.navigation().len(),
            site.config().navbar_links().len(),
        ));
        Ok(())
    }
}
