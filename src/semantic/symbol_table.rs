//! Workspace-wide registry of class, method and field declarations
mod symbol;
mod table;

pub use symbol::{DefinitionKind, Location, SymbolDefinition, SymbolKind};
pub use table::SymbolTable;
