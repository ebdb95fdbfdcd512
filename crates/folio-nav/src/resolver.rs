//! Navigation spec resolution.
//!
//! Resolution runs in a fixed order so failures are deterministic:
//! 1. duplicate page ids across the whole spec (all reported together)
//! 2. empty categories, when they are rejected
//! 3. page ids without content (all reported together)
//! 4. tree construction, keeping declaration order

use std::collections::HashMap;

use folio_content::{ContentSource, Document};
use serde::Deserialize;

use crate::edition::{Edition, Editions};
use crate::error::NavigationError;
use crate::spec::NavigationSpec;
use crate::tree::{Category, NavigationTree, PageRef};

/// What to do with categories declared without pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCategories {
    /// Keep them as empty sections.
    #[default]
    Keep,
    /// Leave them out of the tree.
    Drop,
    /// Fail with [`NavigationError::EmptyCategory`].
    Reject,
}

/// Resolution options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// URL segment docs are served under. Empty serves them at the site root.
    pub route_base: String,
    pub empty_categories: EmptyCategories,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            route_base: "docs".to_owned(),
            empty_categories: EmptyCategories::Keep,
        }
    }
}

impl ResolveOptions {
    /// Site-relative path for a page id.
    ///
    /// Depends on nothing but `id` and `route_base`, so paths are stable
    /// across rebuilds.
    #[must_use]
    pub fn resolved_path(&self, id: &str) -> String {
        let base = self.route_base.trim_matches('/');
        if base.is_empty() {
            id.to_owned()
        } else {
            format!("{base}/{id}")
        }
    }
}

/// Turns navigation specs into validated trees.
pub struct Resolver<'a> {
    content: &'a dyn ContentSource,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    /// Create a resolver checking page ids against `content`.
    #[must_use]
    pub fn new(content: &'a dyn ContentSource, options: ResolveOptions) -> Self {
        Self { content, options }
    }

    #[must_use]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a spec into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicatePageId`],
    /// [`NavigationError::EmptyCategory`], [`NavigationError::MissingContent`],
    /// or [`NavigationError::Content`] when the content source fails.
    pub fn resolve(&self, spec: &NavigationSpec) -> Result<NavigationTree, NavigationError> {
        let duplicates = spec.duplicate_page_ids();
        if !duplicates.is_empty() {
            return Err(NavigationError::DuplicatePageId(duplicates));
        }

        if self.options.empty_categories == EmptyCategories::Reject
            && let Some(label) = spec.empty_categories().next()
        {
            return Err(NavigationError::EmptyCategory(label.to_owned()));
        }

        let documents: HashMap<String, Document> = self
            .content
            .scan()?
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();

        let missing: Vec<String> = spec
            .page_ids()
            .filter(|id| !documents.contains_key(*id))
            .map(str::to_owned)
            .collect();
        if !missing.is_empty() {
            return Err(NavigationError::MissingContent(missing));
        }

        let drop_empty = self.options.empty_categories == EmptyCategories::Drop;
        let categories = spec
            .categories()
            .iter()
            .filter(|c| !(drop_empty && c.pages().is_empty()))
            .map(|c| Category {
                label: c.label().to_owned(),
                pages: c
                    .pages()
                    .iter()
                    .map(|id| PageRef {
                        id: id.clone(),
                        resolved_path: self.options.resolved_path(id),
                        title: documents[id.as_str()].title.clone(),
                    })
                    .collect(),
            })
            .collect();

        let tree = NavigationTree::new(categories);
        tracing::debug!(
            categories = tree.categories().len(),
            pages = tree.len(),
            "Resolved navigation tree"
        );
        Ok(tree)
    }

    /// Select an edition and resolve it on its own.
    ///
    /// # Errors
    ///
    /// Returns selection errors from [`Editions::select`] or any error of
    /// [`resolve`](Self::resolve).
    pub fn resolve_edition<'e>(
        &self,
        editions: &'e Editions,
        name: Option<&str>,
    ) -> Result<(&'e Edition, NavigationTree), NavigationError> {
        let edition = editions.select(name)?;
        let _span = tracing::debug_span!("edition", name = edition.name()).entered();
        let tree = self.resolve(edition.spec())?;
        Ok((edition, tree))
    }
}
