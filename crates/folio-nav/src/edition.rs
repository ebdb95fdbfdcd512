//! Named navigation snapshots.
//!
//! Documentation gets restructured over time. Each restructuring is an
//! edition: a complete [`NavigationSpec`] that is valid on its own. Editions
//! are never merged; a build selects exactly one.

use crate::error::NavigationError;
use crate::spec::NavigationSpec;

/// Edition name used when a site declares a single sidebar.
pub const DEFAULT_EDITION: &str = "current";

/// One named navigation snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edition {
    name: String,
    spec: NavigationSpec,
}

impl Edition {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn spec(&self) -> &NavigationSpec {
        &self.spec
    }
}

/// Editions in declaration order.
///
/// The last declared edition is the default selection.
#[derive(Clone, Debug, Default)]
pub struct Editions {
    editions: Vec<Edition>,
}

impl Editions {
    /// Create an empty edition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edition.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicateEdition`] if the name is taken.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        spec: NavigationSpec,
    ) -> Result<(), NavigationError> {
        let name = name.into();
        if self.editions.iter().any(|e| e.name == name) {
            return Err(NavigationError::DuplicateEdition(name));
        }
        self.editions.push(Edition { name, spec });
        Ok(())
    }

    /// Select an edition by name, or the latest when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownEdition`] for an undeclared name and
    /// [`NavigationError::NoEditions`] when nothing is declared.
    pub fn select(&self, name: Option<&str>) -> Result<&Edition, NavigationError> {
        match name {
            Some(name) => self
                .editions
                .iter()
                .find(|e| e.name == name)
                .ok_or_else(|| NavigationError::UnknownEdition(name.to_owned())),
            None => self.latest().ok_or(NavigationError::NoEditions),
        }
    }

    /// Most recently declared edition.
    #[must_use]
    pub fn latest(&self) -> Option<&Edition> {
        self.editions.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edition> {
        self.editions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.editions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str, pages: &[&str]) -> NavigationSpec {
        NavigationSpec::from_categories([(label, pages.iter().copied())]).unwrap()
    }

    fn editions() -> Editions {
        let mut editions = Editions::new();
        editions
            .push("2019-08", spec("Docs", &["overview"]))
            .unwrap();
        editions
            .push("2019-09", spec("Getting Started", &["installation", "overview"]))
            .unwrap();
        editions
    }

    #[test]
    fn test_select_defaults_to_latest() {
        let editions = editions();
        assert_eq!(editions.select(None).unwrap().name(), "2019-09");
    }

    #[test]
    fn test_select_by_name() {
        let editions = editions();
        let edition = editions.select(Some("2019-08")).unwrap();

        assert_eq!(edition.name(), "2019-08");
        assert_eq!(edition.spec().categories()[0].label(), "Docs");
    }

    #[test]
    fn test_select_unknown() {
        let err = editions().select(Some("2020-01")).unwrap_err();
        assert!(matches!(err, NavigationError::UnknownEdition(ref n) if n == "2020-01"));
    }

    #[test]
    fn test_select_empty() {
        let err = Editions::new().select(None).unwrap_err();
        assert!(matches!(err, NavigationError::NoEditions));
    }

    #[test]
    fn test_duplicate_edition() {
        let mut editions = editions();
        let err = editions
            .push("2019-08", NavigationSpec::new())
            .unwrap_err();

        assert!(matches!(err, NavigationError::DuplicateEdition(ref n) if n == "2019-08"));
        assert_eq!(editions.len(), 2);
    }
}
