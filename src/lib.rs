//! # groovy-lsp-base
//!
//! Core library for Groovy parsing, scopes, symbol tables, go-to-definition
//! and hover.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → file filters, workspace loading
//!   ↓
//! ide       → definition finder, type info, hover, outline, AnalysisHost
//!   ↓
//! semantic  → symbol table, scope trees, builder
//!   ↓
//! syntax    → parsed-file model, parse()
//!   ↓
//! parser    → logos lexer, recursive-descent Groovy parser
//!   ↓
//! base      → positions, spans, line index, word extraction
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → ide → project)
// ============================================================================

/// Foundation types: 0-based positions, 1-based spans, text helpers
pub mod base;

/// Parser: logos lexer and recursive-descent Groovy front end
pub mod parser;

/// Syntax: parsed-file model (classes, members, bodies)
pub mod syntax;

/// Semantic model: symbol table, scopes and the builder populating them
pub mod semantic;

/// IDE features: go-to-definition, hover, document symbols
pub mod ide;

/// Project management: file filters, workspace loading
pub mod project;

// Re-export foundation types
pub use base::{LineIndex, Position, Range, SourcePos, SourceSpan, SpanError};

// Re-export the main entry points
pub use ide::{AnalysisError, AnalysisHost, HoverResult, TypeInfo, TypeInfoKind};
pub use semantic::{
    DefinitionKind, ScopeKind, ScopeManager, ScopeTree, SymbolDefinition, SymbolTable,
};
pub use syntax::{ParseError, ParsedFile, parse};
