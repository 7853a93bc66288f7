//! Rebuilding one file must leave every other file's symbols alone.

use groovy_lsp::base::Position;
use groovy_lsp::semantic::DefinitionKind;

use crate::helpers::host_helpers::host_with;

const A: &str = "file:///A.groovy";
const B: &str = "file:///B.groovy";

#[test]
fn test_rebuild_isolated_per_file() {
    let host = host_with(&[
        (A, "class A {\n  void shared() {}\n  void onlyA() {}\n}\n"),
        (B, "class B {\n  void shared() {}\n}\n"),
    ]);
    assert_eq!(host.analysis().symbol_table().find_by_name("shared").len(), 2);

    host.set_file_content(A, "class A {\n  void renamed() {}\n}\n").unwrap();

    let analysis = host.analysis();
    let table = analysis.symbol_table();
    let shared: Vec<_> = table
        .find_by_name("shared")
        .iter()
        .map(|d| d.qualified_name.as_str())
        .collect();
    assert_eq!(shared, ["B.shared"]);
    assert!(table.find_by_name("onlyA").is_empty());
    assert!(table.find_by_qualified_name("B").is_some());
    assert_eq!(table.find_in_file(B).len(), 2);
    assert!(analysis.scope_manager().root_scope(B).is_some());
}

#[test]
fn test_rebuild_replaces_scope_tree() {
    let host = host_with(&[(A, "class A {\n  void run(int x) {\n    x\n  }\n}\n")]);
    let inside = Position::new(2, 4);
    assert_eq!(
        host.analysis()
            .scope_manager()
            .find_symbol_at(A, inside, "x")
            .map(|d| d.kind),
        Some(DefinitionKind::Parameter)
    );

    host.set_file_content(A, "class A {\n  void run(int y) {\n    y\n  }\n}\n").unwrap();

    let analysis = host.analysis();
    assert!(analysis.scope_manager().find_symbol_at(A, inside, "x").is_none());
    assert!(analysis.scope_manager().find_symbol_at(A, inside, "y").is_some());
}

#[test]
fn test_remove_then_reopen() {
    let host = host_with(&[(A, "class A {}\n"), (B, "class B {}\n")]);
    host.remove_file(A);
    {
        let analysis = host.analysis();
        assert!(analysis.symbol_table().find_by_qualified_name("A").is_none());
        assert!(analysis.scope_manager().root_scope(A).is_none());
        assert!(analysis.symbol_table().find_by_qualified_name("B").is_some());
    }

    host.set_file_content(A, "class A {}\n").unwrap();
    assert_eq!(host.file_count(), 2);
    assert!(host.analysis().symbol_table().find_by_qualified_name("A").is_some());
}
