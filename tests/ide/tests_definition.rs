//! Go-to-definition through the AnalysisHost.

use groovy_lsp::base::Position;
use groovy_lsp::ide::AnalysisError;
use groovy_lsp::semantic::DefinitionKind;

use crate::helpers::host_helpers::{host_with, position_of};
use crate::helpers::source_fixtures::{CALCULATOR, CALCULATOR_WITH_CALLER, SCRIPT};

const CALC_URI: &str = "file:///Calculator.groovy";

#[test]
fn test_method_definition_end_to_end() {
    let host = host_with(&[(CALC_URI, CALCULATOR)]);
    let analysis = host.analysis();

    let at_add = position_of(CALCULATOR, "add", 0, 1);
    let definitions = analysis.find_definition(CALC_URI, at_add).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].kind, DefinitionKind::Method);
    assert_eq!(definitions[0].qualified_name, "Calculator.add");
    assert_eq!(definitions[0].file_uri, CALC_URI);
}

#[test]
fn test_cursor_on_whitespace_finds_nothing() {
    let host = host_with(&[(CALC_URI, CALCULATOR_WITH_CALLER)]);
    let analysis = host.analysis();
    assert!(analysis.find_definition(CALC_URI, Position::new(1, 0)).unwrap().is_empty());
}

#[test]
fn test_unknown_document() {
    let host = host_with(&[]);
    assert_eq!(
        host.analysis().find_definition("file:///Nope.groovy", Position::new(0, 0)),
        Err(AnalysisError::DocumentNotFound("file:///Nope.groovy".to_string()))
    );
}

#[test]
fn test_references_inside_method_body() {
    let host = host_with(&[(CALC_URI, CALCULATOR_WITH_CALLER)]);
    let analysis = host.analysis();

    let call = position_of(CALCULATOR_WITH_CALLER, "add(x, x)", 0, 0);
    let definitions = analysis.find_definition(CALC_URI, call).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].qualified_name, "math.Calculator.add");

    let argument = position_of(CALCULATOR_WITH_CALLER, "add(x, x)", 0, 4);
    let definitions = analysis.find_definition(CALC_URI, argument).unwrap();
    assert_eq!(definitions[0].kind, DefinitionKind::Parameter);
    assert_eq!(definitions[0].qualified_name, "math.Calculator.twice.x");

    let field = position_of(CALCULATOR_WITH_CALLER, "total = doubled", 0, 0);
    let definitions = analysis.find_definition(CALC_URI, field).unwrap();
    assert_eq!(definitions[0].kind, DefinitionKind::Field);

    let local = position_of(CALCULATOR_WITH_CALLER, "return doubled", 0, 7);
    let definitions = analysis.find_definition(CALC_URI, local).unwrap();
    assert_eq!(definitions[0].kind, DefinitionKind::LocalVariable);
    assert_eq!(definitions[0].name, "doubled");
}

#[test]
fn test_same_file_match_preferred() {
    let a = "class A {\n  void foo() {}\n}\n";
    let b = "class B {\n  void foo() {}\n}\n";
    let host = host_with(&[("file:///A.groovy", a), ("file:///B.groovy", b)]);
    let analysis = host.analysis();

    let outside = Position::new(50, 0);
    let from_b = analysis.find_definition_by_name("foo", "file:///B.groovy", outside);
    assert_eq!(from_b.len(), 1);
    assert_eq!(from_b[0].qualified_name, "B.foo");
}

#[test]
fn test_cross_file_candidates_when_not_local() {
    let host = host_with(&[
        ("file:///A.groovy", "class A {\n  void foo() {}\n}\n"),
        ("file:///B.groovy", "class B {\n  void foo() {}\n}\n"),
        ("file:///Main.groovy", "class Main {\n  void run() {\n    foo()\n  }\n}\n"),
    ]);
    let analysis = host.analysis();

    let definitions = analysis
        .find_definition("file:///Main.groovy", Position::new(2, 5))
        .unwrap();
    let mut names: Vec<_> = definitions.iter().map(|d| d.qualified_name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["A.foo", "B.foo"]);
}

#[test]
fn test_script_definitions() {
    let uri = "file:///greet.groovy";
    let host = host_with(&[(uri, SCRIPT)]);
    let analysis = host.analysis();

    let call = position_of(SCRIPT, "shout(greeting", 0, 2);
    let definitions = analysis.find_definition(uri, call).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].qualified_name, "greet.shout");

    let closure_param = position_of(SCRIPT, "+ n", 0, 2);
    let definitions = analysis.find_definition(uri, closure_param).unwrap();
    assert_eq!(definitions[0].kind, DefinitionKind::Parameter);
    assert_eq!(definitions[0].name, "n");
}

#[test]
fn test_qualified_name_lookup() {
    let host = host_with(&[(CALC_URI, CALCULATOR_WITH_CALLER)]);
    let analysis = host.analysis();

    let total = analysis
        .find_definition_by_qualified_name("math.Calculator.total")
        .unwrap();
    assert_eq!(total.kind, DefinitionKind::Field);
    assert_eq!(total.containing_class.as_deref(), Some("math.Calculator"));
    assert!(matches!(
        analysis.find_definition_by_qualified_name("math.Calculator.missing"),
        Err(AnalysisError::DefinitionNotFound(_))
    ));
}

#[test]
fn test_parameter_of_other_method_not_visible() {
    let source = "class A {\n  void m(int a) {}\n  void n() {\n    a\n  }\n}\n";
    let uri = "file:///A.groovy";
    let host = host_with(&[(uri, source)]);
    let analysis = host.analysis();

    assert!(analysis.symbol_table().find_by_name("a").is_empty());
    assert!(analysis.find_definition(uri, Position::new(3, 4)).unwrap().is_empty());

    let definitions = analysis.find_definition(uri, Position::new(1, 13)).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].qualified_name, "A.m.a");
}

#[test]
fn test_import_resolves_from_root_scope() {
    let source = "import java.util.concurrent.ConcurrentHashMap as CHM\n\nclass Cache {\n  CHM entries\n}\n";
    let uri = "file:///Cache.groovy";
    let host = host_with(&[(uri, source)]);
    let analysis = host.analysis();

    let definitions = analysis.find_definition(uri, Position::new(3, 3)).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].kind, DefinitionKind::Import);
    assert_eq!(definitions[0].qualified_name, "java.util.concurrent.ConcurrentHashMap");
    assert_eq!(definitions[0].range.start, Position::new(0, 0));
}
