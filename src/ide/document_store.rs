//! Source text of open documents, keyed by URI.

use rustc_hash::FxHashMap;

/// Read access to document content.
pub trait DocumentStore {
    fn content(&self, uri: &str) -> Option<&str>;

    fn contains(&self, uri: &str) -> bool {
        self.content(uri).is_some()
    }
}

/// The store used by [`AnalysisHost`](super::AnalysisHost): latest text per URI.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: FxHashMap<String, String>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` for `uri`, returning the previous content.
    pub fn insert(&mut self, uri: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.documents.insert(uri.into(), text.into())
    }

    pub fn remove(&mut self, uri: &str) -> Option<String> {
        self.documents.remove(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn content(&self, uri: &str) -> Option<&str> {
        self.documents.get(uri).map(String::as_str)
    }
}
