//! Semantic layer tests: scopes, symbol table rebuilds, coordinates

pub mod tests_coordinates;
pub mod tests_rebuild;
pub mod tests_scope;
