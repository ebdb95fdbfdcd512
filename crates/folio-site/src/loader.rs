//! Sidebar file loading.

use folio_config::DocsConfig;
use folio_nav::{Editions, NavigationSpec};

use crate::error::SiteError;

/// Read the sidebar file of every declared edition, in declaration order.
///
/// # Errors
///
/// - [`SiteError::SidebarIo`] if a sidebar file cannot be read
/// - [`SiteError::Sidebar`] if a sidebar file is not a valid navigation spec
/// - [`SiteError::Navigation`] if an edition name is declared twice
pub fn load_editions(docs: &DocsConfig) -> Result<Editions, SiteError> {
    let mut editions = Editions::new();
    for source in &docs.editions {
        let content =
            std::fs::read_to_string(&source.sidebars).map_err(|e| SiteError::SidebarIo {
                path: source.sidebars.clone(),
                source: e,
            })?;
        let spec = NavigationSpec::from_yaml(&content).map_err(|e| SiteError::Sidebar {
            path: source.sidebars.clone(),
            source: e,
        })?;
        tracing::debug!(
            edition = %source.name,
            path = %source.sidebars.display(),
            categories = spec.categories().len(),
            "Loaded sidebar"
        );
        editions.push(source.name.clone(), spec)?;
    }
    Ok(editions)
}
