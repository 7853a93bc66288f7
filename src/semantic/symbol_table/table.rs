use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::symbol::{DefinitionKind, SymbolDefinition};

/// Workspace-wide index of declarations.
///
/// Three views over the same records:
/// - by owning file URI (append-only until the file is cleared)
/// - by simple name (append-only until the file is cleared)
/// - by qualified name (one entry per name, last write wins)
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Index mapping file URIs to the definitions declared in them
    by_file: FxHashMap<String, Vec<Arc<SymbolDefinition>>>,
    /// Index mapping simple names to definitions, insertion order
    by_name: FxHashMap<String, Vec<Arc<SymbolDefinition>>>,
    /// Index for qualified name lookups
    by_qualified_name: IndexMap<String, Arc<SymbolDefinition>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, definition: SymbolDefinition) {
        let definition = Arc::new(definition);
        self.by_file
            .entry(definition.file_uri.clone())
            .or_default()
            .push(Arc::clone(&definition));
        self.by_name
            .entry(definition.name.clone())
            .or_default()
            .push(Arc::clone(&definition));
        self.by_qualified_name
            .insert(definition.qualified_name.clone(), definition);
    }

    pub fn add_all(&mut self, definitions: impl IntoIterator<Item = SymbolDefinition>) {
        for definition in definitions {
            self.add(definition);
        }
    }

    /// Remove every definition declared in `uri` from all three indices.
    pub fn clear_file(&mut self, uri: &str) {
        let Some(removed) = self.by_file.remove(uri) else {
            return;
        };

        for definition in &removed {
            if let Some(entries) = self.by_name.get_mut(&definition.name) {
                entries.retain(|d| d.file_uri != uri);
                if entries.is_empty() {
                    self.by_name.remove(&definition.name);
                }
            }
        }
        self.by_qualified_name.retain(|_, d| d.file_uri != uri);

        tracing::trace!(uri, removed = removed.len(), "cleared file symbols");
    }

    /// All definitions with this simple name, across files, in insertion order.
    pub fn find_by_name(&self, name: &str) -> &[Arc<SymbolDefinition>] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_by_qualified_name(&self, qualified_name: &str) -> Option<&Arc<SymbolDefinition>> {
        self.by_qualified_name.get(qualified_name)
    }

    pub fn find_in_file(&self, uri: &str) -> &[Arc<SymbolDefinition>] {
        self.by_file.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_by_kind(&self, uri: &str, kind: DefinitionKind) -> Vec<&Arc<SymbolDefinition>> {
        self.find_in_file(uri)
            .iter()
            .filter(|d| d.kind == kind)
            .collect()
    }

    /// Members whose containing class is `class_qualified_name`.
    pub fn find_by_containing_class(&self, class_qualified_name: &str) -> Vec<&Arc<SymbolDefinition>> {
        self.by_file
            .values()
            .flatten()
            .filter(|d| d.containing_class.as_deref() == Some(class_qualified_name))
            .collect()
    }

    pub fn file_uris(&self) -> impl Iterator<Item = &str> {
        self.by_file.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_file.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_file.clear();
        self.by_name.clear();
        self.by_qualified_name.clear();
    }
}
