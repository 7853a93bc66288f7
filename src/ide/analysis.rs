//! AnalysisHost and Analysis: unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and hands out `Analysis`
//! snapshots for querying. A snapshot holds a read guard, so every query made
//! through it observes the same state.
//!
//! ## Usage
//!
//! ```
//! use groovy_lsp::base::Position;
//! use groovy_lsp::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new();
//! host.set_file_content("file:///Calc.groovy", "class Calc {\n  int add(int a) { a }\n}\n")
//!     .unwrap();
//!
//! let analysis = host.analysis();
//! let defs = analysis.find_definition_by_name("add", "file:///Calc.groovy", Position::new(0, 0));
//! assert_eq!(defs[0].qualified_name, "Calc.add");
//! ```

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use super::definition::DefinitionFinder;
use super::document_store::{DocumentStore, InMemoryDocumentStore};
use super::error::{AnalysisError, AnalysisResult};
use super::hover::{HoverResult, hover};
use super::symbols::{DocumentSymbol, document_symbols};
use super::type_info::{TypeInfo, type_info_at};
use crate::base::Position;
use crate::semantic::{ScopeManager, SymbolDefinition, SymbolTable, build_scope, collect_definitions};
use crate::syntax::{ParseDiagnostic, ParsedFile, parse};

#[derive(Debug, Default)]
struct AnalysisState {
    documents: InMemoryDocumentStore,
    parsed: FxHashMap<String, Arc<ParsedFile>>,
    symbols: SymbolTable,
    scopes: ScopeManager,
}

/// Owns all mutable state for the IDE layer.
///
/// Writers rebuild a file's symbols and scopes outside the lock and swap them
/// in under one write guard, so readers see either the old or the new state
/// of a file, never a half-built one. All methods take `&self`; share the
/// host across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    state: RwLock<AnalysisState>,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store, parse and index `text` as the latest content of `uri`.
    ///
    /// Returns the parse diagnostics; syntax errors never fail the update.
    pub fn set_file_content(&self, uri: &str, text: &str) -> AnalysisResult<Vec<ParseDiagnostic>> {
        let parsed = parse(uri, text)?;
        let definitions = collect_definitions(&parsed, uri)?;
        let tree = build_scope(&parsed, uri)?;
        let diagnostics = parsed.diagnostics.clone();

        tracing::debug!(
            uri,
            classes = parsed.classes.len(),
            symbols = definitions.len(),
            diagnostics = diagnostics.len(),
            "file indexed"
        );

        let mut state = self.state.write();
        state.documents.insert(uri, text);
        state.symbols.clear_file(uri);
        state.symbols.add_all(definitions);
        state.scopes.set_root_scope(uri, tree);
        state.parsed.insert(uri.to_string(), Arc::new(parsed));

        Ok(diagnostics)
    }

    /// Drop the document and everything derived from it.
    pub fn remove_file(&self, uri: &str) {
        let mut state = self.state.write();
        state.documents.remove(uri);
        state.parsed.remove(uri);
        state.symbols.clear_file(uri);
        state.scopes.clear_file(uri);
        tracing::debug!(uri, "file removed");
    }

    pub fn has_file(&self, uri: &str) -> bool {
        self.state.read().documents.contains(uri)
    }

    pub fn file_count(&self) -> usize {
        self.state.read().documents.len()
    }

    /// A consistent read snapshot. Writers block while it is alive.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            state: self.state.read(),
        }
    }
}

/// Read-only view of the host state.
pub struct Analysis<'a> {
    state: RwLockReadGuard<'a, AnalysisState>,
}

impl Analysis<'_> {
    fn finder(&self) -> DefinitionFinder<'_, InMemoryDocumentStore> {
        DefinitionFinder::new(&self.state.documents, &self.state.symbols, &self.state.scopes)
    }

    fn parsed(&self, uri: &str) -> AnalysisResult<&ParsedFile> {
        self.state
            .parsed
            .get(uri)
            .map(Arc::as_ref)
            .ok_or_else(|| AnalysisError::DocumentNotFound(uri.to_string()))
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.state.symbols
    }

    pub fn scope_manager(&self) -> &ScopeManager {
        &self.state.scopes
    }

    pub fn file_content(&self, uri: &str) -> Option<&str> {
        self.state.documents.content(uri)
    }

    /// The parsed model of `uri`, shared with the host.
    pub fn parsed_file(&self, uri: &str) -> Option<Arc<ParsedFile>> {
        self.state.parsed.get(uri).cloned()
    }

    pub fn find_definition(
        &self,
        uri: &str,
        position: Position,
    ) -> AnalysisResult<Vec<Arc<SymbolDefinition>>> {
        self.finder().find_definition(uri, position)
    }

    pub fn find_definition_by_name(
        &self,
        name: &str,
        uri: &str,
        position: Position,
    ) -> Vec<Arc<SymbolDefinition>> {
        self.finder().find_definition_by_name(name, uri, position)
    }

    pub fn find_definition_by_qualified_name(
        &self,
        qualified_name: &str,
    ) -> AnalysisResult<Arc<SymbolDefinition>> {
        self.finder().find_definition_by_qualified_name(qualified_name)
    }

    pub fn type_info(&self, uri: &str, position: Position) -> AnalysisResult<TypeInfo> {
        type_info_at(self.parsed(uri)?, position)
    }

    pub fn hover(&self, uri: &str, position: Position) -> AnalysisResult<Option<HoverResult>> {
        let parsed = self.parsed(uri)?;
        let content = self
            .file_content(uri)
            .ok_or_else(|| AnalysisError::DocumentNotFound(uri.to_string()))?;
        Ok(hover(parsed, content, position))
    }

    pub fn document_symbols(&self, uri: &str) -> AnalysisResult<Vec<DocumentSymbol>> {
        Ok(document_symbols(self.parsed(uri)?, uri)?)
    }
}
