//! Type info and hover through the AnalysisHost.

use groovy_lsp::base::Position;
use groovy_lsp::ide::{AnalysisError, DYNAMIC_FALLBACK, MarkupKind, TypeInfoKind};
use rstest::rstest;

use crate::helpers::host_helpers::{host_with, position_of};
use crate::helpers::source_fixtures::CALCULATOR_WITH_CALLER;

const URI: &str = "file:///Calculator.groovy";

#[test]
fn test_parameter_type_info() {
    let host = host_with(&[(URI, CALCULATOR_WITH_CALLER)]);
    let position = position_of(CALCULATOR_WITH_CALLER, "int a", 0, 4);

    let info = host.analysis().type_info(URI, position).unwrap();
    assert_eq!(info.name, "a");
    assert_eq!(info.type_name, "int");
    assert_eq!(info.kind, TypeInfoKind::Parameter);
}

#[test]
fn test_no_type_info_between_members() {
    let host = host_with(&[(URI, CALCULATOR_WITH_CALLER)]);
    assert_eq!(
        host.analysis().type_info(URI, Position::new(4, 0)),
        Err(AnalysisError::NoTypeInfo(Position::new(4, 0)))
    );
}

#[rstest]
#[case::parameter("int a", 4, "```groovy\nint a\n```")]
#[case::method("add(int a", 0, "```groovy\npublic add(int a, int b): int\n```")]
#[case::class("Calculator {", 0, "```groovy\npublic class Calculator\n```")]
#[case::call("add(x, x)", 0, "```groovy\npublic add(int a, int b): int\n```")]
fn test_hover_markdown(#[case] needle: &str, #[case] offset: u32, #[case] expected: &str) {
    let host = host_with(&[(URI, CALCULATOR_WITH_CALLER)]);
    let position = position_of(CALCULATOR_WITH_CALLER, needle, 0, offset);

    let hover = host.analysis().hover(URI, position).unwrap().unwrap();
    assert_eq!(hover.markup, MarkupKind::Markdown);
    assert_eq!(hover.contents, expected);
}

#[test]
fn test_hover_on_field_reference() {
    let host = host_with(&[(URI, CALCULATOR_WITH_CALLER)]);
    let position = position_of(CALCULATOR_WITH_CALLER, "total = doubled", 0, 1);

    let hover = host.analysis().hover(URI, position).unwrap().unwrap();
    assert!(hover.contents.contains("int total"), "{}", hover.contents);
    assert_eq!(hover.type_info.map(|i| i.kind), Some(TypeInfoKind::Field));
}

#[test]
fn test_hover_on_whitespace_is_empty() {
    let host = host_with(&[(URI, CALCULATOR_WITH_CALLER)]);
    assert_eq!(host.analysis().hover(URI, Position::new(1, 0)).unwrap(), None);
}

#[test]
fn test_hover_falls_back_for_dynamic_property() {
    let source = "class Dyn {\n    def go(thing) {\n        thing.whatever\n    }\n}\n";
    let uri = "file:///Dyn.groovy";
    let host = host_with(&[(uri, source)]);
    let position = position_of(source, "whatever", 0, 2);

    let hover = host.analysis().hover(uri, position).unwrap().unwrap();
    assert_eq!(hover.markup, MarkupKind::PlainText);
    assert_eq!(hover.contents, DYNAMIC_FALLBACK);
}

#[test]
fn test_hover_unknown_document() {
    let host = host_with(&[]);
    assert!(matches!(
        host.analysis().hover("file:///Gone.groovy", Position::new(0, 0)),
        Err(AnalysisError::DocumentNotFound(_))
    ));
}

#[test]
fn test_hover_cursor_past_line_end() {
    let source = "class A {\n  int total\n}\n";
    let uri = "file:///A.groovy";
    let host = host_with(&[(uri, source)]);

    let hover = host.analysis().hover(uri, Position::new(1, u32::MAX)).unwrap().unwrap();
    assert_eq!(hover.markup, MarkupKind::Markdown);
    assert!(hover.contents.contains("int total"), "{}", hover.contents);
}
