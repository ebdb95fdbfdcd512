//! Mock content source for testing.
//!
//! Provides [`MockContent`] for unit testing without filesystem access.

use crate::content::{ContentError, ContentErrorKind, ContentSource, Document};

/// In-memory content source.
///
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use folio_content::{ContentSource, MockContent};
///
/// let content = MockContent::new()
///     .with_document("overview", "Overview")
///     .with_documents(["installation", "data"]);
///
/// assert_eq!(content.scan().unwrap().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MockContent {
    documents: Vec<Document>,
    fail: bool,
}

impl MockContent {
    /// Create a new empty mock content source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given id and title.
    #[must_use]
    pub fn with_document(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.documents.push(Document {
            id: id.into(),
            title: title.into(),
            path: None,
        });
        self
    }

    /// Add documents titled after their ids.
    #[must_use]
    pub fn with_documents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            self = self.with_document(id.clone(), id);
        }
        self
    }

    /// Make every scan fail with an `Other` error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ContentSource for MockContent {
    fn scan(&self) -> Result<Vec<Document>, ContentError> {
        if self.fail {
            return Err(ContentError::new(ContentErrorKind::Other).with_backend("Mock"));
        }
        Ok(self.documents.clone())
    }
}
