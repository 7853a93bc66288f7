//! 1-based front-end spans against 0-based editor ranges.

use groovy_lsp::base::{Position, Range, SourcePos, SourceSpan, SpanError};
use groovy_lsp::semantic::DefinitionKind;
use rstest::rstest;

use crate::helpers::host_helpers::host_with;
use crate::helpers::source_fixtures::CALCULATOR;

#[test]
fn test_span_converts_to_range() {
    let span = SourceSpan::from_coords(3, 1, 10, 1);
    assert_eq!(span.to_range(), Ok(Range::from_coords(2, 0, 9, 0)));
    assert_eq!(Range::from_coords(2, 0, 9, 0).to_source_span(), span);
}

#[rstest]
#[case(SourceSpan::from_coords(0, 1, 2, 1))]
#[case(SourceSpan::from_coords(1, 0, 2, 1))]
#[case(SourceSpan::from_coords(1, 1, 2, 0))]
fn test_zero_coordinate_rejected(#[case] span: SourceSpan) {
    assert!(matches!(span.to_range(), Err(SpanError::ZeroCoordinate(_))));
}

#[rstest]
#[case(Position::new(0, 0), SourcePos::new(1, 1))]
#[case(Position::new(4, 17), SourcePos::new(5, 18))]
fn test_position_to_source_pos(#[case] position: Position, #[case] expected: SourcePos) {
    assert_eq!(position.to_source_pos(), expected);
    assert_eq!(expected.to_position(), Ok(position));
}

#[test]
fn test_definition_ranges_are_zero_based() {
    let host = host_with(&[("file:///Calculator.groovy", CALCULATOR)]);
    let analysis = host.analysis();
    let add = analysis
        .symbol_table()
        .find_by_qualified_name("Calculator.add")
        .unwrap();

    assert_eq!(add.kind, DefinitionKind::Method);
    assert_eq!(add.range.start, Position::new(0, 19));
    assert_eq!(add.selection_range, Range::from_coords(0, 23, 0, 26));
}
