//! Navigation error types.

use folio_content::ContentError;

/// Error returned when a navigation spec cannot be turned into a tree.
///
/// Variants carrying a list report every offending id, in declaration order.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Page ids declared more than once across all categories.
    #[error("Duplicate page id(s): {}", .0.join(", "))]
    DuplicatePageId(Vec<String>),
    /// Page ids with no matching document in the content source.
    #[error("Missing content for page id(s): {}", .0.join(", "))]
    MissingContent(Vec<String>),
    /// Category label declared twice in one spec.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),
    /// Category without pages while empty categories are rejected.
    #[error("Category has no pages: {0}")]
    EmptyCategory(String),
    /// Page id that cannot be used as a relative path.
    #[error("Invalid page id: {0:?}")]
    InvalidPageId(String),
    /// Requested edition is not declared.
    #[error("Unknown edition: {0}")]
    UnknownEdition(String),
    /// Edition name declared twice.
    #[error("Duplicate edition: {0}")]
    DuplicateEdition(String),
    /// Edition selection on an empty set.
    #[error("No editions declared")]
    NoEditions,
    /// Content source failed.
    #[error("Content source error: {0}")]
    Content(#[from] ContentError),
    /// Sidebar file is not valid YAML.
    #[error("Sidebar parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
