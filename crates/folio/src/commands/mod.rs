//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod editions;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use folio_config::{CliSettings, Config};
use folio_content::FsContent;
use folio_nav::EmptyCategories;
use folio_site::Site;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use editions::EditionsArgs;

/// Arguments shared by commands that compose the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Edition to build (default: docs.edition, else the latest).
    #[arg(short, long, env = "FOLIO_EDITION")]
    edition: Option<String>,

    /// How to treat categories without pages (overrides config).
    #[arg(long, value_enum)]
    empty_categories: Option<EmptyCategoriesArg>,

    /// Enable verbose output (show resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// `--empty-categories` values.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum EmptyCategoriesArg {
    Keep,
    Drop,
    Reject,
}

impl From<EmptyCategoriesArg> for EmptyCategories {
    fn from(arg: EmptyCategoriesArg) -> Self {
        match arg {
            EmptyCategoriesArg::Keep => Self::Keep,
            EmptyCategoriesArg::Drop => Self::Drop,
            EmptyCategoriesArg::Reject => Self::Reject,
        }
    }
}

impl SiteArgs {
    /// Load configuration with CLI overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            edition: self.edition.clone(),
            empty_categories: self.empty_categories.map(Into::into),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and compose the site from the docs directory.
    pub(crate) fn compose(&self) -> Result<(Config, Site), CliError> {
        let config = self.load_config()?;
        let content = FsContent::new(config.docs_resolved.source_dir.clone());
        let site = Site::compose(&config, &content, None)?;
        Ok((config, site))
    }
}
