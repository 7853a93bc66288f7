//! Scope tree tests: nesting, containment and shadowing.

use std::sync::Arc;

use groovy_lsp::base::{Position, Range};
use groovy_lsp::semantic::{
    DefinitionKind, ScopeId, ScopeKind, ScopeTree, SymbolDefinition, SymbolKind,
};

use crate::helpers::host_helpers::{host_with, position_of};
use crate::helpers::source_fixtures::SHADOWING;

const URI: &str = "file:///Counter.groovy";

fn definition(name: &str, kind: DefinitionKind, range: Range) -> SymbolDefinition {
    SymbolDefinition {
        name: name.to_string(),
        qualified_name: name.to_string(),
        kind,
        symbol_kind: SymbolKind::Variable,
        file_uri: URI.to_string(),
        range,
        selection_range: range,
        containing_class: None,
    }
}

// ============================================================================
// Hand-built trees
// ============================================================================

#[test]
fn test_innermost_scope_is_found() {
    let mut tree = ScopeTree::new(Range::from_coords(0, 0, 100, 0));
    let class = tree.add_scope(
        ScopeId::ROOT,
        ScopeKind::Class,
        Range::from_coords(10, 0, 80, 0),
        Some("Outer".to_string()),
    );
    let method = tree.add_scope(class, ScopeKind::Method, Range::from_coords(20, 0, 50, 0), None);

    assert_eq!(tree.root().find_scope_at(Position::new(30, 4)).map(|s| s.id()), Some(method));
    assert_eq!(tree.root().find_scope_at(Position::new(60, 0)).map(|s| s.id()), Some(class));
    assert_eq!(tree.root().find_scope_at(Position::new(5, 0)).map(|s| s.id()), Some(ScopeId::ROOT));
    assert!(tree.root().find_scope_at(Position::new(101, 0)).is_none());
}

#[test]
fn test_scope_bounds_are_inclusive() {
    let mut tree = ScopeTree::new(Range::from_coords(0, 0, 100, 0));
    let block = tree.add_scope(ScopeId::ROOT, ScopeKind::Block, Range::from_coords(20, 4, 50, 5), None);

    assert_eq!(tree.scope(block).find_scope_at(Position::new(20, 4)).map(|s| s.id()), Some(block));
    assert_eq!(tree.scope(block).find_scope_at(Position::new(50, 5)).map(|s| s.id()), Some(block));
    assert!(tree.scope(block).find_scope_at(Position::new(50, 6)).is_none());
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let mut tree = ScopeTree::for_file();
    let class = tree.add_scope(ScopeId::ROOT, ScopeKind::Class, Range::from_coords(0, 0, 20, 1), None);
    let method = tree.add_scope(class, ScopeKind::Method, Range::from_coords(2, 4, 10, 5), None);
    let block = tree.add_scope(method, ScopeKind::Block, Range::from_coords(4, 8, 8, 9), None);

    tree.add_symbol(class, definition("x", DefinitionKind::Field, Range::from_coords(1, 4, 1, 9)));
    tree.add_symbol(block, definition("x", DefinitionKind::LocalVariable, Range::from_coords(5, 12, 5, 21)));

    let from_block = tree.scope(block).find_symbol("x").map(|d| d.kind);
    let from_method = tree.scope(method).find_symbol("x").map(|d| d.kind);
    assert_eq!(from_block, Some(DefinitionKind::LocalVariable));
    assert_eq!(from_method, Some(DefinitionKind::Field));
    assert!(tree.scope(method).find_local_symbol("x").is_none());
}

#[test]
fn test_available_symbols_nearest_first() {
    let mut tree = ScopeTree::for_file();
    let method = tree.add_scope(ScopeId::ROOT, ScopeKind::Method, Range::from_coords(0, 0, 9, 0), None);
    tree.add_symbol(ScopeId::ROOT, definition("a", DefinitionKind::Class, Range::default()));
    tree.add_symbol(ScopeId::ROOT, definition("b", DefinitionKind::Class, Range::default()));
    tree.add_symbol(method, Arc::new(definition("a", DefinitionKind::Parameter, Range::default())));

    let available: Vec<_> = tree
        .scope(method)
        .available_symbols()
        .into_iter()
        .map(|d| (d.name.as_str(), d.kind))
        .collect();
    assert_eq!(
        available,
        [
            ("a", DefinitionKind::Parameter),
            ("a", DefinitionKind::Class),
            ("b", DefinitionKind::Class),
        ]
    );
}

// ============================================================================
// Trees built from source
// ============================================================================

#[test]
fn test_shadowing_chain_from_source() {
    let host = host_with(&[(URI, SHADOWING)]);
    let analysis = host.analysis();
    let scopes = analysis.scope_manager();

    // `println count` directly in `bump` sees the parameter
    let at_param_use = position_of(SHADOWING, "println count", 0, 8);
    let found = scopes.find_symbol_at(URI, at_param_use, "count").unwrap();
    assert_eq!(found.kind, DefinitionKind::Parameter);
    assert_eq!(found.qualified_name, "Counter.bump.count");

    // inside the `if` block the local wins
    let at_local_use = position_of(SHADOWING, "println count", 1, 8);
    let found = scopes.find_symbol_at(URI, at_local_use, "count").unwrap();
    assert_eq!(found.kind, DefinitionKind::LocalVariable);

    // `reset` has no parameter, so the field is visible
    let at_field_use = position_of(SHADOWING, "count = 0", 1, 0);
    let found = scopes.find_symbol_at(URI, at_field_use, "count").unwrap();
    assert_eq!(found.kind, DefinitionKind::Field);
    assert_eq!(found.qualified_name, "Counter.count");
}

#[test]
fn test_scope_kinds_from_source() {
    let host = host_with(&[(URI, SHADOWING)]);
    let analysis = host.analysis();
    let scopes = analysis.scope_manager();

    let at_local_use = position_of(SHADOWING, "println count", 1, 8);
    let mut kinds = Vec::new();
    let mut scope = scopes.scope_at(URI, at_local_use);
    while let Some(current) = scope {
        kinds.push(current.kind());
        scope = current.parent();
    }
    assert_eq!(
        kinds,
        [ScopeKind::Block, ScopeKind::Method, ScopeKind::Class, ScopeKind::Global]
    );
}
