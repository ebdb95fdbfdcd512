//! Site metadata: raw declarations and the built [`SiteConfig`].
//!
//! Raw types mirror `folio.toml` and are plain data. [`SiteConfig::build`]
//! validates them against a resolved [`NavigationTree`] and produces the one
//! immutable value handed to the rendering host.

use std::collections::HashSet;
use std::fmt;

use folio_nav::NavigationTree;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::target::{Target, TargetKind, classify, has_scheme};

/// Navbar side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Footer color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Light,
    #[default]
    Dark,
}

/// Image with alt text, used for navbar and footer logos.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Logo {
    pub alt: String,
    pub src: String,
}

/// Raw site fields as declared by maintainers.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfigRaw {
    /// `[site]` section.
    pub site: SiteMetaRaw,
    /// `[navbar]` section.
    pub navbar: NavbarRaw,
    /// `[footer]` section.
    pub footer: FooterRaw,
    /// `[[presets]]` entries.
    pub presets: Vec<PresetRaw>,
}

/// `[site]` section.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteMetaRaw {
    pub title: String,
    pub tagline: String,
    /// Deployment origin (e.g., `https://facebookresearch.github.io`).
    pub url: Option<String>,
    pub base_url: String,
    pub favicon: Option<String>,
    pub organization: String,
    pub project: String,
}

impl Default for SiteMetaRaw {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            url: None,
            base_url: "/".to_owned(),
            favicon: None,
            organization: String::new(),
            project: String::new(),
        }
    }
}

/// `[navbar]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavbarRaw {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub links: Vec<NavLinkRaw>,
}

/// `[[navbar.links]]` entry. `to` and `href` are accepted for `target`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NavLinkRaw {
    pub label: String,
    #[serde(alias = "to", alias = "href")]
    pub target: String,
    #[serde(default)]
    pub position: Position,
}

/// `[footer]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FooterRaw {
    pub style: FooterStyle,
    pub logo: Option<Logo>,
    pub copyright: Option<String>,
    pub sections: Vec<FooterSectionRaw>,
}

/// `[[footer.sections]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FooterSectionRaw {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FooterItemRaw>,
}

/// Footer link. `to` and `href` are accepted for `target`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FooterItemRaw {
    pub label: String,
    #[serde(alias = "to", alias = "href")]
    pub target: String,
}

/// `[[presets]]` entry: a rendering-host preset and its options.
#[derive(Clone, Debug, Deserialize)]
pub struct PresetRaw {
    pub name: String,
    #[serde(default)]
    pub options: toml::Table,
}

/// Built navbar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub target: Target,
    pub position: Position,
}

/// Built footer link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterItem {
    pub label: String,
    pub target: Target,
}

/// Built footer column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub title: String,
    pub items: Vec<FooterItem>,
}

/// Rendering-host preset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Preset {
    pub name: String,
    pub options: toml::Table,
}

/// Immutable site configuration.
///
/// Only [`build`](Self::build) creates one. Fields are private and there are
/// no mutating methods, so a built value stays as validated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteConfig {
    title: String,
    tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<String>,
    organization_id: String,
    project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    navbar_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    navbar_logo: Option<Logo>,
    navbar_links: Vec<NavLink>,
    footer_style: FooterStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer_logo: Option<Logo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<String>,
    footer_sections: Vec<FooterSection>,
    presets: Vec<Preset>,
}

impl SiteConfig {
    /// Validate raw fields and compose the site configuration.
    ///
    /// `route_base` is the docs URL segment, stripped from doc targets such
    /// as `docs/overview` before they are looked up in `tree`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBaseUrl`] if `base_url` does not start and end with `/`
    /// - [`ConfigError::DuplicateNavEntry`] for a repeated label on one navbar side
    /// - [`ConfigError::UnresolvedTarget`] for a doc target missing from `tree`
    /// - [`ConfigError::Validation`] for empty titles/labels or a non-http `url`
    pub fn build(
        raw: SiteConfigRaw,
        tree: &NavigationTree,
        route_base: &str,
    ) -> Result<Self, ConfigError> {
        let SiteConfigRaw {
            site,
            navbar,
            footer,
            presets,
        } = raw;

        validate_base_url(&site.base_url)?;
        require_non_empty(&site.title, "site.title")?;
        if let Some(url) = &site.url {
            require_http_url(url, "site.url")?;
        }

        let mut seen = HashSet::new();
        let mut navbar_links = Vec::with_capacity(navbar.links.len());
        for link in navbar.links {
            require_non_empty(&link.label, "navbar.links.label")?;
            if !seen.insert((link.label.clone(), link.position)) {
                return Err(ConfigError::DuplicateNavEntry {
                    label: link.label,
                    position: link.position,
                });
            }
            navbar_links.push(NavLink {
                target: resolve_target(&link.target, tree, route_base)?,
                label: link.label,
                position: link.position,
            });
        }

        let mut footer_sections = Vec::with_capacity(footer.sections.len());
        for section in footer.sections {
            require_non_empty(&section.title, "footer.sections.title")?;
            let items = section
                .items
                .into_iter()
                .map(|item| -> Result<FooterItem, ConfigError> {
                    require_non_empty(&item.label, "footer.sections.items.label")?;
                    Ok(FooterItem {
                        target: resolve_target(&item.target, tree, route_base)?,
                        label: item.label,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            footer_sections.push(FooterSection {
                title: section.title,
                items,
            });
        }

        let presets = presets
            .into_iter()
            .map(|p| -> Result<Preset, ConfigError> {
                require_non_empty(&p.name, "presets.name")?;
                Ok(Preset {
                    name: p.name,
                    options: p.options,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: site.title,
            tagline: site.tagline,
            url: site.url,
            base_url: site.base_url,
            favicon: site.favicon,
            organization_id: site.organization,
            project_id: site.project,
            navbar_title: navbar.title,
            navbar_logo: navbar.logo,
            navbar_links,
            footer_style: footer.style,
            footer_logo: footer.logo,
            copyright: footer.copyright,
            footer_sections,
            presets,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Path prefix the site is served under (always `/`-delimited).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[must_use]
    pub fn navbar_title(&self) -> Option<&str> {
        self.navbar_title.as_deref()
    }

    #[must_use]
    pub fn navbar_logo(&self) -> Option<&Logo> {
        self.navbar_logo.as_ref()
    }

    #[must_use]
    pub fn navbar_links(&self) -> &[NavLink] {
        &self.navbar_links
    }

    /// Navbar links on one side, in declaration order.
    pub fn navbar_links_at(&self, position: Position) -> impl Iterator<Item = &NavLink> {
        self.navbar_links
            .iter()
            .filter(move |l| l.position == position)
    }

    #[must_use]
    pub fn footer_style(&self) -> FooterStyle {
        self.footer_style
    }

    #[must_use]
    pub fn footer_logo(&self) -> Option<&Logo> {
        self.footer_logo.as_ref()
    }

    #[must_use]
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    #[must_use]
    pub fn footer_sections(&self) -> &[FooterSection] {
        &self.footer_sections
    }

    #[must_use]
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Site-relative path prefixed with the base URL.
    ///
    /// Absolute URLs and anchors are returned unchanged.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if has_scheme(path) || path.starts_with("//") || path.starts_with('#') {
            return path.to_owned();
        }
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute page URL, when the deployment origin is known.
    #[must_use]
    pub fn permalink(&self, path: &str) -> Option<String> {
        let origin = self.url.as_deref()?.trim_end_matches('/');
        Some(format!("{origin}{}", self.url_for(path)))
    }

    /// Final `href` for a link target.
    #[must_use]
    pub fn href(&self, target: &Target) -> String {
        match target {
            Target::Doc {
                path,
                fragment: Some(fragment),
                ..
            } => format!("{}#{fragment}", self.url_for(path)),
            Target::Doc { path, .. } => self.url_for(path),
            Target::External { url } => url.clone(),
            Target::Anchor { fragment } => format!("#{fragment}"),
        }
    }
}

/// Classify a raw target and check doc targets against the tree.
fn resolve_target(
    raw: &str,
    tree: &NavigationTree,
    route_base: &str,
) -> Result<Target, ConfigError> {
    match classify(raw, route_base) {
        TargetKind::Doc { id, fragment } => {
            let page = tree
                .page(id)
                .ok_or_else(|| ConfigError::UnresolvedTarget(raw.to_owned()))?;
            Ok(Target::Doc {
                id: page.id.clone(),
                path: page.resolved_path.clone(),
                fragment: fragment.map(str::to_owned),
            })
        }
        TargetKind::External => Ok(Target::External {
            url: raw.to_owned(),
        }),
        TargetKind::Anchor(fragment) => Ok(Target::Anchor {
            fragment: fragment.to_owned(),
        }),
    }
}

/// Base URL must start and end with `/` and contain no whitespace.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let valid = base_url.starts_with('/')
        && base_url.ends_with('/')
        && !base_url.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseUrl(base_url.to_owned()))
    }
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
