//! Go-to-definition.
//!
//! Resolution order for a name at a cursor:
//! 1. the innermost scope at the cursor, walking outward (shadowing wins)
//! 2. the symbol table's by-name index, preferring matches in the same file

use std::sync::Arc;

use super::document_store::DocumentStore;
use super::error::{AnalysisError, AnalysisResult};
use crate::base::{Position, extract_word_at_cursor, line_at};
use crate::semantic::{ScopeManager, SymbolDefinition, SymbolTable};

/// Read-only view over the state needed to resolve definitions.
pub struct DefinitionFinder<'a, D: DocumentStore + ?Sized> {
    documents: &'a D,
    symbols: &'a SymbolTable,
    scopes: &'a ScopeManager,
}

impl<'a, D: DocumentStore + ?Sized> DefinitionFinder<'a, D> {
    pub fn new(documents: &'a D, symbols: &'a SymbolTable, scopes: &'a ScopeManager) -> Self {
        Self {
            documents,
            symbols,
            scopes,
        }
    }

    /// Definitions of the identifier under the cursor.
    ///
    /// A cursor on whitespace or punctuation yields an empty list.
    pub fn find_definition(
        &self,
        uri: &str,
        position: Position,
    ) -> AnalysisResult<Vec<Arc<SymbolDefinition>>> {
        let content = self
            .documents
            .content(uri)
            .ok_or_else(|| AnalysisError::DocumentNotFound(uri.to_string()))?;

        let Some(word) = line_at(content, position.line)
            .and_then(|line| extract_word_at_cursor(line, position.character))
        else {
            tracing::trace!(uri, %position, "no identifier at cursor");
            return Ok(Vec::new());
        };

        Ok(self.find_definition_by_name(&word, uri, position))
    }

    pub fn find_definition_by_name(
        &self,
        name: &str,
        uri: &str,
        position: Position,
    ) -> Vec<Arc<SymbolDefinition>> {
        if let Some(definition) = self.scopes.find_symbol_at(uri, position, name) {
            tracing::debug!(name, uri, qualified = %definition.qualified_name, "resolved from scope");
            return vec![Arc::clone(definition)];
        }

        let candidates = self.symbols.find_by_name(name);
        let same_file: Vec<_> = candidates
            .iter()
            .filter(|d| d.file_uri == uri)
            .cloned()
            .collect();

        tracing::debug!(
            name,
            uri,
            candidates = candidates.len(),
            same_file = same_file.len(),
            "resolved from symbol table"
        );

        if same_file.is_empty() {
            candidates.to_vec()
        } else {
            same_file
        }
    }

    pub fn find_definition_by_qualified_name(
        &self,
        qualified_name: &str,
    ) -> AnalysisResult<Arc<SymbolDefinition>> {
        self.symbols
            .find_by_qualified_name(qualified_name)
            .cloned()
            .ok_or_else(|| AnalysisError::DefinitionNotFound(qualified_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ide::InMemoryDocumentStore;
    use crate::parser::parse_groovy;
    use crate::semantic::{DefinitionKind, build_scope, build_symbol_table};

    struct Fixture {
        documents: InMemoryDocumentStore,
        symbols: SymbolTable,
        scopes: ScopeManager,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                documents: InMemoryDocumentStore::new(),
                symbols: SymbolTable::new(),
                scopes: ScopeManager::new(),
            }
        }

        fn open(&mut self, uri: &str, stem: &str, text: &str) {
            let parsed = parse_groovy(stem, text);
            build_symbol_table(&parsed, uri, &mut self.symbols).unwrap();
            self.scopes.set_root_scope(uri, build_scope(&parsed, uri).unwrap());
            self.documents.insert(uri, text);
        }

        fn finder(&self) -> DefinitionFinder<'_, InMemoryDocumentStore> {
            DefinitionFinder::new(&self.documents, &self.symbols, &self.scopes)
        }
    }

    #[test]
    fn test_missing_document() {
        let fixture = Fixture::new();
        let result = fixture
            .finder()
            .find_definition("file:///missing.groovy", Position::new(0, 0));
        assert_eq!(
            result,
            Err(AnalysisError::DocumentNotFound("file:///missing.groovy".to_string()))
        );
    }

    #[test]
    fn test_cursor_on_whitespace() {
        let mut fixture = Fixture::new();
        fixture.open("file:///A.groovy", "A", "class A {\n\n  int x\n}\n");
        let result = fixture
            .finder()
            .find_definition("file:///A.groovy", Position::new(1, 0))
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_local_shadows_field() {
        let mut fixture = Fixture::new();
        let text = "class A {\n  int count\n  void run() {\n    def count = 1\n    println count\n  }\n}\n";
        fixture.open("file:///A.groovy", "A", text);

        let result = fixture
            .finder()
            .find_definition("file:///A.groovy", Position::new(4, 14))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, DefinitionKind::LocalVariable);

        let result = fixture
            .finder()
            .find_definition("file:///A.groovy", Position::new(1, 7))
            .unwrap();
        assert_eq!(result[0].kind, DefinitionKind::Field);
    }

    #[test]
    fn test_same_file_preferred_then_cross_file() {
        let mut fixture = Fixture::new();
        fixture.open("file:///A.groovy", "A", "class A {\n  void foo() {}\n}\n");
        fixture.open("file:///B.groovy", "B", "class B {\n  void foo() {}\n}\n");
        fixture.open("file:///C.groovy", "C", "class C {\n}\n");

        let finder = fixture.finder();
        let outside = Position::new(10, 0);

        let from_a = finder.find_definition_by_name("foo", "file:///A.groovy", outside);
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].qualified_name, "A.foo");

        let from_c = finder.find_definition_by_name("foo", "file:///C.groovy", outside);
        let names: Vec<_> = from_c.iter().map(|d| d.qualified_name.as_str()).collect();
        assert_eq!(names, ["A.foo", "B.foo"]);
    }

    #[test]
    fn test_find_by_qualified_name() {
        let mut fixture = Fixture::new();
        fixture.open("file:///A.groovy", "A", "package p\nclass A {\n  int x\n}\n");
        let finder = fixture.finder();
        assert_eq!(
            finder.find_definition_by_qualified_name("p.A.x").unwrap().name,
            "x"
        );
        assert_eq!(
            finder.find_definition_by_qualified_name("p.A.y"),
            Err(AnalysisError::DefinitionNotFound("p.A.y".to_string()))
        );
    }
}
