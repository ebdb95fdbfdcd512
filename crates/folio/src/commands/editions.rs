//! `folio editions` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::Config;
use folio_site::{SiteError, load_editions};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the editions command.
#[derive(Args)]
pub(crate) struct EditionsArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl EditionsArgs {
    /// Execute the editions command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or a sidebar file cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let editions = load_editions(&config.docs_resolved)?;
        let default = editions
            .select(config.docs_resolved.edition.as_deref())
            .map_err(SiteError::from)?
            .name()
            .to_owned();

        for edition in editions.iter() {
            output.edition(
                edition.name(),
                edition.spec().categories().len(),
                edition.spec().page_ids().count(),
                edition.name() == default,
            );
        }
        Ok(())
    }
}
