//! Per-file registry of scope trees.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::scope::{ScopeRef, ScopeTree};
use super::symbol_table::SymbolDefinition;
use crate::base::Position;

/// Maps each file URI to the root of its scope tree.
#[derive(Debug, Default)]
pub struct ScopeManager {
    roots: FxHashMap<String, ScopeTree>,
}

impl ScopeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tree for `uri`, replacing the previous one wholesale.
    pub fn set_root_scope(&mut self, uri: impl Into<String>, tree: ScopeTree) {
        self.roots.insert(uri.into(), tree);
    }

    pub fn root_scope(&self, uri: &str) -> Option<ScopeRef<'_>> {
        self.roots.get(uri).map(ScopeTree::root)
    }

    pub fn tree(&self, uri: &str) -> Option<&ScopeTree> {
        self.roots.get(uri)
    }

    /// Innermost scope of `uri` containing `position`.
    pub fn scope_at(&self, uri: &str, position: Position) -> Option<ScopeRef<'_>> {
        self.root_scope(uri)?.find_scope_at(position)
    }

    /// Resolve `name` from the innermost scope at `position` outward.
    pub fn find_symbol_at(
        &self,
        uri: &str,
        position: Position,
        name: &str,
    ) -> Option<&Arc<SymbolDefinition>> {
        self.scope_at(uri, position)?.find_symbol(name)
    }

    pub fn available_symbols_at(&self, uri: &str, position: Position) -> Vec<&Arc<SymbolDefinition>> {
        self.scope_at(uri, position)
            .map(|scope| scope.available_symbols())
            .unwrap_or_default()
    }

    pub fn clear_file(&mut self, uri: &str) {
        self.roots.remove(uri);
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    pub fn file_count(&self) -> usize {
        self.roots.len()
    }
}
