//! `folio build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Manifest output path (default: .folio/manifest.json next to folio.toml).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be composed or the manifest
    /// cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.compose()?;

        let manifest_path = match self.output {
            Some(path) => path,
            None => {
                ensure_project_dir(&config.docs_resolved.project_dir)?;
                config.docs_resolved.manifest_path()
            }
        };

        site.manifest().write(&manifest_path)?;

        output.done(&format!(
            "Built edition {} ({} pages) -> {}",
            site.edition(),
            site.navigation().len(),
            manifest_path.display()
        ));
        Ok(())
    }
}

/// Ensure the `.folio/` project directory exists with a `.gitignore`.
fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = std::fs::write(&gitignore_path, "# Automatically created by folio\n*\n");
    }

    Ok(())
}
