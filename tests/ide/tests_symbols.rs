//! Document outline through the AnalysisHost.

use groovy_lsp::base::Range;
use groovy_lsp::ide::AnalysisError;
use groovy_lsp::semantic::SymbolKind;

use crate::helpers::host_helpers::host_with;
use crate::helpers::source_fixtures::{CALCULATOR_WITH_CALLER, SCRIPT};

#[test]
fn test_class_outline() {
    let uri = "file:///Calculator.groovy";
    let host = host_with(&[(uri, CALCULATOR_WITH_CALLER)]);
    let symbols = host.analysis().document_symbols(uri).unwrap();

    assert_eq!(symbols.len(), 1);
    let calculator = &symbols[0];
    assert_eq!(calculator.name, "Calculator");
    assert_eq!(calculator.kind, SymbolKind::Class);
    assert_eq!(calculator.selection_range, Range::from_coords(2, 6, 2, 16));

    let children: Vec<_> = calculator
        .children
        .iter()
        .map(|c| (c.name.as_str(), c.kind, c.detail.as_deref()))
        .collect();
    assert_eq!(
        children,
        [
            ("total", SymbolKind::Field, Some("int")),
            ("add", SymbolKind::Method, Some("(int a, int b): int")),
            ("twice", SymbolKind::Method, Some("(int x): int")),
        ]
    );
}

#[test]
fn test_script_outline_lists_declared_methods() {
    let uri = "file:///greet.groovy";
    let host = host_with(&[(uri, SCRIPT)]);
    let symbols = host.analysis().document_symbols(uri).unwrap();

    let names: Vec<_> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["shout"]);
    assert_eq!(symbols[0].detail.as_deref(), Some("(String text): Object"));
}

#[test]
fn test_interface_and_nested_outline() {
    let source = "interface Shape {\n    double area()\n}\n\nclass Box implements Shape {\n    static class Lid {}\n    double area() { 1.0 }\n}\n";
    let uri = "file:///Shapes.groovy";
    let host = host_with(&[(uri, source)]);
    let symbols = host.analysis().document_symbols(uri).unwrap();

    let top: Vec<_> = symbols.iter().map(|s| (s.name.as_str(), s.kind)).collect();
    assert_eq!(top, [("Shape", SymbolKind::Interface), ("Box", SymbolKind::Class)]);
    assert_eq!(symbols[1].detail.as_deref(), Some("implements Shape"));

    let members: Vec<_> = symbols[1].children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(members, ["area", "Lid"]);
}

#[test]
fn test_outline_unknown_document() {
    let host = host_with(&[]);
    assert!(matches!(
        host.analysis().document_symbols("file:///Gone.groovy"),
        Err(AnalysisError::DocumentNotFound(_))
    ));
}
