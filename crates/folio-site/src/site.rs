//! Composed site for one build.

use folio_config::{Config, SiteConfig};
use folio_content::ContentSource;
use folio_nav::{NavigationTree, Resolver};

use crate::error::SiteError;
use crate::loader::load_editions;
use crate::manifest::SiteManifest;

/// Site configuration and navigation of one selected edition.
///
/// Both parts are validated against each other: every doc link in the
/// navbar and footer names a page of `navigation`.
#[derive(Clone, Debug)]
pub struct Site {
    edition: String,
    config: SiteConfig,
    navigation: NavigationTree,
}

impl Site {
    /// Compose a site from loaded configuration and a content source.
    ///
    /// `edition` overrides `docs.edition` from the config. With neither set
    /// the last declared edition is used.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if a sidebar file cannot be loaded, the edition
    /// is unknown, navigation fails to resolve, or the site configuration
    /// is invalid for the resolved tree.
    pub fn compose(
        config: &Config,
        content: &dyn ContentSource,
        edition: Option<&str>,
    ) -> Result<Self, SiteError> {
        let docs = &config.docs_resolved;
        let editions = load_editions(docs)?;
        let options = docs.resolve_options();
        let name = edition.or(docs.edition.as_deref());

        let resolver = Resolver::new(content, options);
        let (selected, navigation) = resolver.resolve_edition(&editions, name)?;
        let site_config = SiteConfig::build(
            config.site_for_edition(selected.name()),
            &navigation,
            &resolver.options().route_base,
        )?;

        tracing::info!(
            edition = selected.name(),
            pages = navigation.len(),
            "Composed site"
        );

        Ok(Self {
            edition: selected.name().to_owned(),
            config: site_config,
            navigation,
        })
    }

    /// Name of the selected edition.
    #[must_use]
    pub fn edition(&self) -> &str {
        &self.edition
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationTree {
        &self.navigation
    }

    /// Serializable view of the site.
    #[must_use]
    pub fn manifest(&self) -> SiteManifest<'_> {
        SiteManifest::new(&self.edition, &self.config, &self.navigation)
    }
}
