//! Site configuration for Folio.
//!
//! Two layers:
//!
//! - [`SiteConfig::build`] turns raw site fields into the immutable
//!   [`SiteConfig`], checking doc link targets against a resolved
//!   navigation tree. It reads no files and no environment.
//! - [`Config::load`] parses `folio.toml` with serde, auto-discovers it in
//!   parent directories, expands environment variables and resolves paths.
//!   CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.base_url`
//! - `footer.copyright`
//! - `docs.editions.footer.copyright`
//!
//! ## Editions
//!
//! `[[docs.editions]]` pairs each sidebar file with optional `navbar` and
//! `footer` tables. When present they replace the top-level ones for that
//! edition, so links can follow pages that an edition adds or removes.

mod expand;
mod site;
mod target;

use std::path::{Path, PathBuf};

use folio_nav::{DEFAULT_EDITION, EmptyCategories, ResolveOptions};
use serde::Deserialize;

pub use site::{
    FooterItem, FooterItemRaw, FooterRaw, FooterSection, FooterSectionRaw, FooterStyle, Logo,
    NavLink, NavLinkRaw, NavbarRaw, Position, Preset, PresetRaw, SiteConfig, SiteConfigRaw,
    SiteMetaRaw,
};
pub use target::Target;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the selected edition.
    pub edition: Option<String>,
    /// Override empty category handling.
    pub empty_categories: Option<EmptyCategories>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default sidebar file, relative to the config file.
const DEFAULT_SIDEBARS: &str = "sidebars.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site, navbar, footer and preset declarations.
    #[serde(flatten)]
    pub site: SiteConfigRaw,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

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
    route_base: Option<String>,
    sidebars: Option<String>,
    edition: Option<String>,
    empty_categories: Option<EmptyCategories>,
    editions: Option<Vec<EditionRaw>>,
}

/// `[[docs.editions]]` entry.
#[derive(Debug, Deserialize)]
struct EditionRaw {
    name: String,
    sidebars: String,
    navbar: Option<NavbarRaw>,
    footer: Option<FooterRaw>,
}

/// Sidebar file and site overrides of one edition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditionSource {
    /// Edition name.
    pub name: String,
    /// Absolute path to the YAML sidebar file.
    pub sidebars: PathBuf,
    /// Replaces the top-level `[navbar]` for this edition.
    pub navbar: Option<NavbarRaw>,
    /// Replaces the top-level `[footer]` for this edition.
    pub footer: Option<FooterRaw>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Project directory for folio output (.folio/).
    pub project_dir: PathBuf,
    /// URL segment docs are served under.
    pub route_base: String,
    /// Declared editions, oldest first.
    pub editions: Vec<EditionSource>,
    /// Edition to build. `None` selects the latest.
    pub edition: Option<String>,
    /// Empty category handling.
    pub empty_categories: EmptyCategories,
}

impl DocsConfig {
    /// Default manifest path (.folio/manifest.json).
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("manifest.json")
    }

    /// Navigation resolution options.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            route_base: self.route_base.clone(),
            empty_categories: self.empty_categories,
        }
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
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
    /// Base URL without leading and trailing slash.
    #[error("Invalid base URL {0:?}: must start and end with '/'")]
    InvalidBaseUrl(String),
    /// Navbar label repeated on the same side.
    #[error("Duplicate navbar entry {label:?} on the {position} side")]
    DuplicateNavEntry {
        /// Repeated label.
        label: String,
        /// Navbar side.
        position: Position,
    },
    /// Doc link target that is not a page in the navigation tree.
    #[error("Unresolved link target: {0}")]
    UnresolvedTarget(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
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
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::info!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(edition) = &settings.edition {
            self.docs_resolved.edition = Some(edition.clone());
        }
        if let Some(empty_categories) = settings.empty_categories {
            self.docs_resolved.empty_categories = empty_categories;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            site: SiteConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                project_dir: base.join(".folio"),
                route_base: "docs".to_owned(),
                editions: vec![EditionSource {
                    name: DEFAULT_EDITION.to_owned(),
                    sidebars: base.join(DEFAULT_SIDEBARS),
                    ..EditionSource::default()
                }],
                edition: None,
                empty_categories: EmptyCategories::Keep,
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
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            editions = config.docs_resolved.editions.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Site fields are checked later by [`SiteConfig::build`], once the
    /// navigation tree exists. This covers the docs section only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;

        if docs
            .route_base
            .split('/')
            .any(|segment| segment == "..")
        {
            return Err(ConfigError::Validation(
                "docs.route_base cannot contain '..'".to_owned(),
            ));
        }

        if docs.editions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.editions cannot be empty".to_owned(),
            ));
        }
        for edition in &docs.editions {
            site::require_non_empty(&edition.name, "docs.editions.name")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site.site;
        site.base_url = expand::expand_env(&site.base_url, "site.base_url")?;
        if let Some(ref url) = site.url {
            site.url = Some(expand::expand_env(url, "site.url")?);
        }

        expand_copyright(&mut self.site.footer, "footer.copyright")?;
        for edition in self.docs.editions.iter_mut().flatten() {
            if let Some(footer) = &mut edition.footer {
                expand_copyright(footer, "docs.editions.footer.copyright")?;
            }
        }

        Ok(())
    }

    /// Raw site fields for one edition, with its navbar and footer
    /// overrides applied.
    ///
    /// Unknown edition names get the top-level fields unchanged.
    #[must_use]
    pub fn site_for_edition(&self, name: &str) -> SiteConfigRaw {
        let mut site = self.site.clone();
        if let Some(edition) = self.docs_resolved.editions.iter().find(|e| e.name == name) {
            if let Some(navbar) = &edition.navbar {
                site.navbar = navbar.clone();
            }
            if let Some(footer) = &edition.footer {
                site.footer = footer.clone();
            }
        }
        site
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Validates that `sidebars` and `editions` are not both set.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let editions = match (&self.docs.sidebars, &self.docs.editions) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "docs.sidebars and docs.editions cannot both be set".to_owned(),
                ));
            }
            (_, Some(editions)) => editions
                .iter()
                .map(|e| EditionSource {
                    name: e.name.clone(),
                    sidebars: config_dir.join(&e.sidebars),
                    navbar: e.navbar.clone(),
                    footer: e.footer.clone(),
                })
                .collect(),
            (sidebars, None) => vec![EditionSource {
                name: DEFAULT_EDITION.to_owned(),
                sidebars: config_dir.join(sidebars.as_deref().unwrap_or(DEFAULT_SIDEBARS)),
                ..EditionSource::default()
            }],
        };

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            project_dir: config_dir.join(".folio"),
            route_base: self
                .docs
                .route_base
                .clone()
                .unwrap_or_else(|| "docs".to_owned()),
            editions,
            edition: self.docs.edition.clone(),
            empty_categories: self.docs.empty_categories.unwrap_or_default(),
        };

        Ok(())
    }
}

fn expand_copyright(footer: &mut FooterRaw, field: &str) -> Result<(), ConfigError> {
    if let Some(ref copyright) = footer.copyright {
        footer.copyright = Some(expand::expand_env(copyright, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIZSEQ_TOML: &str = r#"
[site]
title = "VizSeq"
tagline = "A visual analysis toolkit for text generation tasks"
url = "https://facebookresearch.github.io"
base_url = "/vizseq/"
favicon = "img/favicon.png"
organization = "facebookresearch"
project = "vizseq"

[navbar]
title = ""
logo = { alt = "VizSeq", src = "img/logo.png" }

[[navbar.links]]
to = "docs/overview"
label = "Docs"
position = "left"

[[navbar.links]]
href = "https://github.com/facebookresearch/vizseq"
label = "VizSeq@GitHub"

[footer]
style = "dark"
copyright = "Copyright © 2019 Facebook, Inc."

[[footer.sections]]
title = "Docs"
items = [
    { label = "Overview", to = "docs/overview" },
    { label = "VizSeq@GitHub", href = "https://github.com/facebookresearch/vizseq" },
]

[[presets]]
name = "classic"
options = { custom_css = "src/css/custom.css" }
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.project_dir, PathBuf::from("/test/.folio"));
        assert_eq!(
            config.docs_resolved.manifest_path(),
            PathBuf::from("/test/.folio/manifest.json")
        );
        assert_eq!(config.docs_resolved.route_base, "docs");
        assert_eq!(
            config.docs_resolved.editions,
            vec![EditionSource {
                name: "current".to_owned(),
                sidebars: PathBuf::from("/test/sidebars.yaml"),
                ..EditionSource::default()
            }]
        );
        assert_eq!(config.site.site.base_url, "/");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.site.base_url, "/");
        assert!(config.site.navbar.links.is_empty());
    }

    #[test]
    fn test_parse_site_config() {
        let config: Config = toml::from_str(VIZSEQ_TOML).unwrap();
        let site = &config.site;

        assert_eq!(site.site.title, "VizSeq");
        assert_eq!(site.site.base_url, "/vizseq/");
        assert_eq!(site.site.organization, "facebookresearch");
        assert_eq!(site.navbar.title.as_deref(), Some(""));
        assert_eq!(site.navbar.logo.as_ref().unwrap().src, "img/logo.png");
        assert_eq!(site.navbar.links[0].target, "docs/overview");
        assert_eq!(site.navbar.links[1].position, Position::Left);
        assert_eq!(
            site.navbar.links[1].target,
            "https://github.com/facebookresearch/vizseq"
        );
        assert_eq!(site.footer.style, FooterStyle::Dark);
        assert_eq!(site.footer.sections[0].items.len(), 2);
        assert_eq!(site.presets[0].name, "classic");
        assert_eq!(
            site.presets[0].options["custom_css"].as_str(),
            Some("src/css/custom.css")
        );
    }

    #[test]
    fn test_resolve_paths_single_sidebar() {
        let toml = r#"
[docs]
source_dir = "website/docs"
sidebars = "website/sidebars.yaml"
route_base = ""
empty_categories = "drop"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        let docs = &config.docs_resolved;

        assert_eq!(docs.source_dir, PathBuf::from("/project/website/docs"));
        assert_eq!(docs.route_base, "");
        assert_eq!(docs.empty_categories, EmptyCategories::Drop);
        assert_eq!(
            docs.editions,
            vec![EditionSource {
                name: "current".to_owned(),
                sidebars: PathBuf::from("/project/website/sidebars.yaml"),
                ..EditionSource::default()
            }]
        );
        assert_eq!(docs.resolve_options().route_base, "");
    }

    #[test]
    fn test_resolve_paths_editions() {
        let toml = r#"
[docs]
edition = "2019-08"

[[docs.editions]]
name = "2019-08"
sidebars = "sidebars/2019-08.yaml"

[[docs.editions]]
name = "2019-09"
sidebars = "sidebars/2019-09.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        let docs = &config.docs_resolved;

        assert_eq!(docs.editions.len(), 2);
        assert_eq!(docs.editions[1].name, "2019-09");
        assert_eq!(
            docs.editions[1].sidebars,
            PathBuf::from("/project/sidebars/2019-09.yaml")
        );
        assert_eq!(docs.edition.as_deref(), Some("2019-08"));
    }

    #[test]
    fn test_site_for_edition_overrides() {
        let toml = r#"
[[navbar.links]]
to = "docs/new_metric"
label = "Extending"

[footer]
copyright = "Copyright © 2019 Facebook, Inc."

[[docs.editions]]
name = "2019-08"
sidebars = "old.yaml"

[docs.editions.navbar]
links = [{ label = "Docs", to = "docs/overview" }]

[[docs.editions]]
name = "2019-09"
sidebars = "new.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        let old = config.site_for_edition("2019-08");
        assert_eq!(old.navbar.links.len(), 1);
        assert_eq!(old.navbar.links[0].target, "docs/overview");
        assert_eq!(
            old.footer.copyright.as_deref(),
            Some("Copyright © 2019 Facebook, Inc.")
        );

        let new = config.site_for_edition("2019-09");
        assert_eq!(new.navbar.links[0].target, "docs/new_metric");
    }

    #[test]
    fn test_expand_env_vars_edition_footer() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_EDITION_YEAR");
        }

        let toml = r#"
[[docs.editions]]
name = "2019-08"
sidebars = "old.yaml"
footer = { copyright = "Copyright © ${FOLIO_TEST_EDITION_YEAR}" }
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(err.to_string().contains("docs.editions.footer.copyright"));
    }

    #[test]
    fn test_sidebars_and_editions_exclusive() {
        let toml = r#"
[docs]
sidebars = "sidebars.yaml"

[[docs.editions]]
name = "a"
sidebars = "a.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.editions"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            edition: Some("2019-08".to_owned()),
            empty_categories: Some(EmptyCategories::Reject),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.docs_resolved.edition.as_deref(), Some("2019-08"));
        assert_eq!(
            config.docs_resolved.empty_categories,
            EmptyCategories::Reject
        );
        assert_eq!(
            config.docs_resolved.project_dir,
            PathBuf::from("/test/.folio")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(config.docs_resolved.edition.is_none());
    }

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_BASE_URL", "/preview/");
            std::env::set_var("FOLIO_TEST_ORIGIN", "https://staging.example.com");
        }

        let toml = r#"
[site]
base_url = "${FOLIO_TEST_BASE_URL}"
url = "${FOLIO_TEST_ORIGIN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.site.base_url, "/preview/");
        assert_eq!(
            config.site.site.url.as_deref(),
            Some("https://staging.example.com")
        );

        unsafe {
            std::env::remove_var("FOLIO_TEST_BASE_URL");
            std::env::remove_var("FOLIO_TEST_ORIGIN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING_YEAR");
        }

        let toml = r#"
[footer]
copyright = "Copyright © ${FOLIO_TEST_MISSING_YEAR} Facebook, Inc."
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("footer.copyright"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_route_base_parent_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.route_base = "../docs".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.route_base"));
    }

    #[test]
    fn test_validate_empty_editions() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.editions.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.editions"));
    }

    #[test]
    fn test_validate_empty_edition_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.editions[0].name = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.editions.name"));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("folio.toml");
        std::fs::write(&path, VIZSEQ_TOML).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.docs_resolved.source_dir, tmp.path().join("docs"));
        assert_eq!(
            config.docs_resolved.editions[0].sidebars,
            tmp.path().join("sidebars.yaml")
        );
        assert_eq!(config.site.site.title, "VizSeq");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("folio.toml");
        std::fs::write(&path, "[site\ntitle = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
