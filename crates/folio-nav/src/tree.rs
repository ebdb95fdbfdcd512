//! Resolved navigation tree.
//!
//! Categories hold their pages directly. A flat reading order is kept next
//! to the categories so that id lookups, breadcrumbs and previous/next
//! links are O(1) without walking the tree.

use std::collections::HashMap;

use serde::Serialize;

/// A resolved documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRef {
    /// Page id as declared in the sidebar.
    pub id: String,
    /// Site-relative path derived from the id (e.g., "docs/overview").
    pub resolved_path: String,
    /// Sidebar label, taken from the content unit.
    pub title: String,
}

/// A sidebar section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Section title.
    pub label: String,
    /// Pages in declaration order.
    pub pages: Vec<PageRef>,
}

/// Breadcrumb item. Categories have no page of their own, so no path.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Link target path, if the item is a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Previous and next pages in reading order.
#[derive(Debug, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a PageRef>,
    pub next: Option<&'a PageRef>,
}

/// Validated, render-ready navigation tree.
///
/// Built only by the [`Resolver`](crate::Resolver). There are no mutating
/// methods; a tree stays as resolved until it is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationTree {
    categories: Vec<Category>,
    /// Reading order as (category, page) indices.
    #[serde(skip)]
    order: Vec<(usize, usize)>,
    /// Page id to position in `order`.
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl NavigationTree {
    /// Build lookup tables over already validated categories.
    pub(crate) fn new(categories: Vec<Category>) -> Self {
        let order: Vec<(usize, usize)> = categories
            .iter()
            .enumerate()
            .flat_map(|(c, category)| (0..category.pages.len()).map(move |p| (c, p)))
            .collect();
        let index = order
            .iter()
            .enumerate()
            .map(|(pos, &(c, p))| (categories[c].pages[p].id.clone(), pos))
            .collect();

        Self {
            categories,
            order,
            index,
        }
    }

    /// Categories in sidebar order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All pages in reading order.
    pub fn pages(&self) -> impl Iterator<Item = &PageRef> {
        self.order.iter().map(|&(c, p)| &self.categories[c].pages[p])
    }

    /// Number of pages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a page by id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&PageRef> {
        self.index.get(id).map(|&pos| self.at(pos))
    }

    /// Whether a page id is part of the tree.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Category holding the page.
    #[must_use]
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        let &pos = self.index.get(id)?;
        Some(&self.categories[self.order[pos].0])
    }

    /// Breadcrumbs for a page: its category, then the page itself.
    ///
    /// Unknown ids yield no breadcrumbs.
    #[must_use]
    pub fn breadcrumbs(&self, id: &str) -> Vec<Breadcrumb> {
        let (Some(category), Some(page)) = (self.category_of(id), self.page(id)) else {
            return Vec::new();
        };

        vec![
            Breadcrumb {
                title: category.label.clone(),
                path: None,
            },
            Breadcrumb {
                title: page.title.clone(),
                path: Some(page.resolved_path.clone()),
            },
        ]
    }

    /// Previous and next pages, crossing category boundaries.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Option<Neighbors<'_>> {
        let &pos = self.index.get(id)?;
        Some(Neighbors {
            previous: pos.checked_sub(1).map(|prev| self.at(prev)),
            next: (pos + 1 < self.order.len()).then(|| self.at(pos + 1)),
        })
    }

    fn at(&self, pos: usize) -> &PageRef {
        let (c, p) = self.order[pos];
        &self.categories[c].pages[p]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(id: &str) -> PageRef {
        PageRef {
            id: id.to_owned(),
            resolved_path: format!("docs/{id}"),
            title: id.to_uppercase(),
        }
    }

    fn tree() -> NavigationTree {
        NavigationTree::new(vec![
            Category {
                label: "Getting Started".to_owned(),
                pages: vec![page("installation"), page("overview")],
            },
            Category {
                label: "Empty".to_owned(),
                pages: Vec::new(),
            },
            Category {
                label: "Features".to_owned(),
                pages: vec![page("data")],
            },
        ])
    }

    #[test]
    fn test_pages_in_reading_order() {
        let tree = tree();
        let ids: Vec<_> = tree.pages().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["installation", "overview", "data"]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_page_lookup() {
        let tree = tree();

        assert_eq!(tree.page("overview").unwrap().resolved_path, "docs/overview");
        assert!(tree.contains("data"));
        assert!(!tree.contains("metrics"));
        assert!(tree.page("metrics").is_none());
    }

    #[test]
    fn test_category_of() {
        let tree = tree();
        assert_eq!(tree.category_of("data").unwrap().label, "Features");
        assert!(tree.category_of("nope").is_none());
    }

    #[test]
    fn test_breadcrumbs() {
        let tree = tree();

        assert_eq!(
            tree.breadcrumbs("overview"),
            vec![
                Breadcrumb {
                    title: "Getting Started".to_owned(),
                    path: None,
                },
                Breadcrumb {
                    title: "OVERVIEW".to_owned(),
                    path: Some("docs/overview".to_owned()),
                },
            ]
        );
        assert!(tree.breadcrumbs("unknown").is_empty());
    }

    #[test]
    fn test_neighbors_cross_categories() {
        let tree = tree();

        let first = tree.neighbors("installation").unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.unwrap().id, "overview");

        let boundary = tree.neighbors("overview").unwrap();
        assert_eq!(boundary.previous.unwrap().id, "installation");
        assert_eq!(boundary.next.unwrap().id, "data");

        let last = tree.neighbors("data").unwrap();
        assert_eq!(last.previous.unwrap().id, "overview");
        assert!(last.next.is_none());

        assert!(tree.neighbors("unknown").is_none());
    }

    #[test]
    fn test_serialize_skips_lookup_tables() {
        let json = serde_json::to_value(tree()).unwrap();

        assert_eq!(json["categories"][0]["label"], "Getting Started");
        assert_eq!(
            json["categories"][0]["pages"][1]["resolved_path"],
            "docs/overview"
        );
        assert!(json.get("index").is_none());
        assert!(json.get("order").is_none());
    }
}
