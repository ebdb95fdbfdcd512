//! JSON manifest handed to the rendering host.

use std::path::Path;

use folio_config::SiteConfig;
use folio_nav::{Breadcrumb, NavigationTree, PageRef};
use serde::Serialize;

use crate::error::SiteError;

/// Serializable site: configuration plus navigation with final URLs.
#[derive(Debug, Serialize)]
pub struct SiteManifest<'a> {
    /// Selected edition.
    pub edition: &'a str,
    pub config: &'a SiteConfig,
    /// Sidebar categories in order.
    pub navigation: Vec<ManifestCategory<'a>>,
}

/// Sidebar category with its pages.
#[derive(Debug, Serialize)]
pub struct ManifestCategory<'a> {
    pub label: &'a str,
    pub pages: Vec<ManifestPage<'a>>,
}

/// Page entry with everything a doc page template needs.
#[derive(Debug, Serialize)]
pub struct ManifestPage<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// Site-relative path (e.g., "docs/overview").
    pub path: &'a str,
    /// Path under the base URL (e.g., "/vizseq/docs/overview").
    pub url: String,
    /// Absolute URL, when the site origin is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Id of the previous page in reading order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<&'a str>,
    /// Id of the next page in reading order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a str>,
}

impl<'a> SiteManifest<'a> {
    pub(crate) fn new(
        edition: &'a str,
        config: &'a SiteConfig,
        navigation: &'a NavigationTree,
    ) -> Self {
        let page = |p: &'a PageRef| {
            let neighbors = navigation.neighbors(&p.id);
            ManifestPage {
                id: &p.id,
                title: &p.title,
                path: &p.resolved_path,
                url: config.url_for(&p.resolved_path),
                permalink: config.permalink(&p.resolved_path),
                breadcrumbs: navigation.breadcrumbs(&p.id),
                previous: neighbors
                    .as_ref()
                    .and_then(|n| n.previous)
                    .map(|prev| prev.id.as_str()),
                next: neighbors
                    .as_ref()
                    .and_then(|n| n.next)
                    .map(|next| next.id.as_str()),
            }
        };

        Self {
            edition,
            config,
            navigation: navigation
                .categories()
                .iter()
                .map(|c| ManifestCategory {
                    label: &c.label,
                    pages: c.pages.iter().map(&page).collect(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), SiteError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "Wrote manifest");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_config::{SiteConfigRaw, SiteMetaRaw};
    use folio_content::MockContent;
    use folio_nav::{NavigationSpec, ResolveOptions, Resolver};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture() -> (SiteConfig, NavigationTree) {
        let content = MockContent::new()
            .with_document("installation", "Installation")
            .with_document("overview", "Overview")
            .with_document("data", "Data Inputs");
        let spec = NavigationSpec::from_categories([
            ("Getting Started", vec!["installation", "overview"]),
            ("Features", vec!["data"]),
        ])
        .unwrap();
        let tree = Resolver::new(&content, ResolveOptions::default())
            .resolve(&spec)
            .unwrap();
        let raw = SiteConfigRaw {
            site: SiteMetaRaw {
                title: "VizSeq".to_owned(),
                url: Some("https://facebookresearch.github.io/".to_owned()),
                base_url: "/vizseq/".to_owned(),
                ..SiteMetaRaw::default()
            },
            ..SiteConfigRaw::default()
        };
        let config = SiteConfig::build(raw, &tree, "docs").unwrap();
        (config, tree)
    }

    #[test]
    fn test_manifest_pages() {
        let (config, tree) = fixture();
        let manifest = SiteManifest::new("current", &config, &tree);

        assert_eq!(manifest.navigation.len(), 2);
        let overview = &manifest.navigation[0].pages[1];
        assert_eq!(overview.id, "overview");
        assert_eq!(overview.url, "/vizseq/docs/overview");
        assert_eq!(
            overview.permalink.as_deref(),
            Some("https://facebookresearch.github.io/vizseq/docs/overview")
        );
        assert_eq!(overview.previous, Some("installation"));
        assert_eq!(overview.next, Some("data"));
        assert_eq!(overview.breadcrumbs.len(), 2);
        assert_eq!(overview.breadcrumbs[0].title, "Getting Started");
    }

    #[test]
    fn test_manifest_json() {
        let (config, tree) = fixture();
        let manifest = SiteManifest::new("current", &config, &tree);

        let json: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(json["edition"], "current");
        assert_eq!(json["config"]["base_url"], "/vizseq/");
        assert_eq!(json["navigation"][0]["label"], "Getting Started");
        assert_eq!(json["navigation"][1]["pages"][0]["title"], "Data Inputs");
        assert!(json["navigation"][0]["pages"][0].get("previous").is_none());
        assert!(json["navigation"][1]["pages"][0].get("next").is_none());
    }

    #[test]
    fn test_manifest_write_creates_parent() {
        let (config, tree) = fixture();
        let manifest = SiteManifest::new("current", &config, &tree);
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".folio").join("manifest.json");

        manifest.write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"edition\": \"current\""));
    }
}
