//! Author-declared navigation structure.
//!
//! A sidebar file maps category labels to ordered page id lists:
//!
//! ```yaml
//! Getting Started: [installation, overview, ipynb_example, web_app_example]
//! Features: [data, metrics, ipynb_api]
//! Extending VizSeq: [new_metric]
//! ```
//!
//! The mapping is read in document order, so the file order is the sidebar
//! order. The categories may also sit under one named sidebar:
//!
//! ```yaml
//! docs:
//!   Getting Started: [installation, overview]
//!   Features: [data]
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::NavigationError;

/// One declared category with its page ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySpec {
    label: String,
    pages: Vec<String>,
}

impl CategorySpec {
    /// Category label (sidebar section title).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Page ids in declaration order.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

/// Ordered mapping from category label to ordered page ids.
///
/// Category labels are unique within a spec, enforced on insertion. Page id
/// uniqueness spans categories and is checked by the
/// [`Resolver`](crate::Resolver), which reports every duplicate at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationSpec {
    categories: Vec<CategorySpec>,
}

impl NavigationSpec {
    /// Create an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from `(label, pages)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicateCategory`] or
    /// [`NavigationError::InvalidPageId`].
    pub fn from_categories<I, L, P, S>(categories: I) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self::new();
        for (label, pages) in categories {
            spec.push_category(label, pages)?;
        }
        Ok(spec)
    }

    /// Parse a YAML sidebar declaration.
    ///
    /// An empty document yields an empty spec.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Parse`] for malformed YAML, otherwise the
    /// same errors as [`from_categories`](Self::from_categories).
    pub fn from_yaml(content: &str) -> Result<Self, NavigationError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: OrderedCategories = serde_yaml::from_str(content)?;
        Self::from_categories(raw.0)
    }

    /// Append a category.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicateCategory`] if the label is already
    /// declared, or [`NavigationError::InvalidPageId`] for an id that is not
    /// a clean relative path.
    pub fn push_category<L, P, S>(&mut self, label: L, pages: P) -> Result<(), NavigationError>
    where
        L: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        if self.categories.iter().any(|c| c.label == label) {
            return Err(NavigationError::DuplicateCategory(label));
        }

        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        if let Some(bad) = pages.iter().find(|id| !is_valid_page_id(id)) {
            return Err(NavigationError::InvalidPageId(bad.clone()));
        }

        self.categories.push(CategorySpec { label, pages });
        Ok(())
    }

    /// Declared categories in order.
    #[must_use]
    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    /// All page ids in reading order, duplicates included.
    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.pages.iter().map(String::as_str))
    }

    /// Number of declared categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Labels of categories declared without pages.
    pub(crate) fn empty_categories(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|c| c.pages.is_empty())
            .map(|c| c.label.as_str())
    }

    /// Page ids that occur more than once, in first-seen order.
    pub(crate) fn duplicate_page_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for id in self.page_ids() {
            let count = counts.entry(id).or_insert(0);
            if *count == 0 {
                order.push(id);
            }
            *count += 1;
        }
        order
            .into_iter()
            .filter(|id| counts[id] > 1)
            .map(str::to_owned)
            .collect()
    }
}

impl<'de> Deserialize<'de> for NavigationSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = OrderedCategories::deserialize(deserializer)?;
        Self::from_categories(raw.0).map_err(de::Error::custom)
    }
}

/// Page ids become URL path segments: non-empty, relative, no `.`/`..`.
fn is_valid_page_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('/').all(|segment| {
            !segment.is_empty() && segment != "." && segment != ".." && segment.trim() == segment
        })
}

/// Category entries in document order.
///
/// The top level is either the categories themselves or a single named
/// sidebar holding them (`docs: {...}`).
struct OrderedCategories(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for OrderedCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarFileVisitor;

        impl<'de> Visitor<'de> for SidebarFileVisitor {
            type Value = OrderedCategories;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category labels to lists of page ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut sidebar = None;
                while let Some((key, entry)) = map.next_entry::<String, Entry>()? {
                    match entry {
                        Entry::Pages(pages) => entries.push((key, pages)),
                        Entry::Sidebar(_) if sidebar.is_some() => {
                            return Err(de::Error::custom(format!(
                                "only one named sidebar is supported, found another: {key}"
                            )));
                        }
                        Entry::Sidebar(categories) => sidebar = Some((key, categories)),
                    }
                }

                match sidebar {
                    None => Ok(OrderedCategories(entries)),
                    Some((_, categories)) if entries.is_empty() => {
                        Ok(OrderedCategories(categories))
                    }
                    Some((key, _)) => Err(de::Error::custom(format!(
                        "named sidebar {key} cannot be mixed with top-level categories"
                    ))),
                }
            }
        }

        deserializer.deserialize_map(SidebarFileVisitor)
    }
}

/// Value under a top-level key: a category's pages, or a named sidebar.
enum Entry {
    Pages(Vec<String>),
    Sidebar(Vec<(String, Vec<String>)>),
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = Entry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of page ids or a map of categories")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut pages = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(id) = seq.next_element::<String>()? {
                    pages.push(id);
                }
                Ok(Entry::Pages(pages))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, pages)) = map.next_entry::<String, Vec<String>>()? {
                    categories.push((label, pages));
                }
                Ok(Entry::Sidebar(categories))
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn labels(spec: &NavigationSpec) -> Vec<&str> {
        spec.categories().iter().map(CategorySpec::label).collect()
    }

    #[test]
    fn test_from_categories_keeps_order() {
        let spec = NavigationSpec::from_categories([
            ("Zeta", vec!["z"]),
            ("Alpha", vec!["b", "a"]),
        ])
        .unwrap();

        assert_eq!(labels(&spec), vec!["Zeta", "Alpha"]);
        assert_eq!(spec.categories()[1].pages(), ["b", "a"]);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = NavigationSpec::from_categories([("A", vec!["x"]), ("A", vec!["y"])])
            .unwrap_err();

        assert!(matches!(err, NavigationError::DuplicateCategory(ref l) if l == "A"));
    }

    #[test]
    fn test_invalid_page_ids_rejected() {
        for id in ["", "/abs", "trailing/", "a//b", "../up", "a/./b", " padded"] {
            let err = NavigationSpec::from_categories([("A", vec![id])]).unwrap_err();
            assert!(
                matches!(err, NavigationError::InvalidPageId(ref bad) if bad == id),
                "Expected InvalidPageId for {id:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_nested_page_id_accepted() {
        let spec = NavigationSpec::from_categories([("Guides", vec!["guides/deploy"])]).unwrap();
        assert_eq!(spec.page_ids().collect::<Vec<_>>(), vec!["guides/deploy"]);
    }

    #[test]
    fn test_from_yaml_preserves_document_order() {
        let yaml = r"
Getting Started: [installation, overview, ipynb_example, web_app_example]
Features:
  - data
  - metrics
  - ipynb_api
Extending VizSeq: [new_metric]
";
        let spec = NavigationSpec::from_yaml(yaml).unwrap();

        assert_eq!(
            labels(&spec),
            vec!["Getting Started", "Features", "Extending VizSeq"]
        );
        assert_eq!(spec.categories()[1].pages(), ["data", "metrics", "ipynb_api"]);
    }

    #[test]
    fn test_from_yaml_named_sidebar() {
        let yaml = r"
docs:
  Getting Started: [installation, overview]
  Features: [data, metrics]
";
        let spec = NavigationSpec::from_yaml(yaml).unwrap();

        assert_eq!(labels(&spec), vec!["Getting Started", "Features"]);
        assert_eq!(spec.categories()[1].pages(), ["data", "metrics"]);
    }

    #[test]
    fn test_from_yaml_two_named_sidebars_rejected() {
        let yaml = "docs:\n  A: [x]\napi:\n  B: [y]\n";
        let err = NavigationSpec::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("only one named sidebar"), "got {err}");
    }

    #[test]
    fn test_from_yaml_named_sidebar_mixed_with_categories_rejected() {
        let err = NavigationSpec::from_yaml("docs:\n  A: [x]\nB: [y]\n").unwrap_err();
        assert!(err.to_string().contains("cannot be mixed"), "got {err}");
    }

    #[test]
    fn test_from_yaml_non_alphabetical_order() {
        let spec = NavigationSpec::from_yaml("b: [y]\na: [x]\n").unwrap();
        assert_eq!(labels(&spec), vec!["b", "a"]);
    }

    #[test]
    fn test_from_yaml_empty_document() {
        assert!(NavigationSpec::from_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_empty_category() {
        let spec = NavigationSpec::from_yaml("Empty: []\n").unwrap();
        assert_eq!(spec.empty_categories().collect::<Vec<_>>(), vec!["Empty"]);
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = NavigationSpec::from_yaml("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, NavigationError::Parse(_)));
    }

    #[test]
    fn test_from_yaml_duplicate_category_fails() {
        assert!(NavigationSpec::from_yaml("A: [x]\nA: [y]\n").is_err());
    }

    #[test]
    fn test_duplicate_page_ids_in_first_seen_order() {
        let spec = NavigationSpec::from_categories([
            ("A", vec!["x", "y"]),
            ("B", vec!["y", "z"]),
            ("C", vec!["x", "y"]),
        ])
        .unwrap();

        assert_eq!(spec.duplicate_page_ids(), vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_page_ids_none() {
        let spec = NavigationSpec::from_categories([("A", vec!["x"]), ("B", vec!["y"])]).unwrap();
        assert!(spec.duplicate_page_ids().is_empty());
    }
}
