//! # Semantic Analysis
//!
//! Turns parsed Groovy files into queryable symbol data:
//!
//! - [`SymbolTable`]: workspace-wide index of class, method and field
//!   definitions, keyed by file, simple name and qualified name
//! - [`ScopeTree`] and [`ScopeManager`]: per-file lexical scopes used to
//!   resolve names at a cursor position; imports, parameters and locals
//!   live only here
//! - [`builder`]: populates both from a [`ParsedFile`](crate::syntax::ParsedFile)

pub mod builder;
mod error;
pub mod scope;
pub mod scope_manager;
pub mod symbol_table;

pub use builder::{build_scope, build_symbol_table, collect_definitions};
pub use error::{BuildError, BuildResult};
pub use scope::{ScopeId, ScopeKind, ScopeRef, ScopeTree};
pub use scope_manager::ScopeManager;
pub use symbol_table::{DefinitionKind, Location, SymbolDefinition, SymbolKind, SymbolTable};
