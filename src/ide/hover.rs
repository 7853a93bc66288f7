//! Hover information implementation.

use super::error::AnalysisError;
use super::type_info::{TypeInfo, TypeInfoKind, type_info_at};
use crate::base::{Position, extract_word_at_cursor, line_at};
use crate::syntax::ParsedFile;

/// Shown when the cursor is on an identifier the model has no type for.
pub const DYNAMIC_FALLBACK: &str = "Groovy element (dynamic type)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Markdown,
    PlainText,
}

/// Result of a hover request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: String,
    pub markup: MarkupKind,
    /// The resolved info, absent for fallback text.
    pub type_info: Option<TypeInfo>,
}

/// Hover for the cursor at `position`.
///
/// Returns `None` when the cursor is not on an identifier.
pub fn hover(file: &ParsedFile, content: &str, position: Position) -> Option<HoverResult> {
    let line = line_at(content, position.line)?;
    let word = extract_word_at_cursor(line, position.character)?;

    // Word extraction clamps to the line end, so type info must agree.
    let line_len = u32::try_from(line.encode_utf16().count()).unwrap_or(u32::MAX);
    let position = Position::new(position.line, position.character.min(line_len));

    match type_info_at(file, position) {
        Ok(info) => Some(HoverResult {
            contents: render_markdown(&info),
            markup: MarkupKind::Markdown,
            type_info: Some(info),
        }),
        Err(AnalysisError::NoTypeInfo(_)) => {
            tracing::trace!(%word, %position, "hover fallback");
            Some(HoverResult {
                contents: DYNAMIC_FALLBACK.to_string(),
                markup: MarkupKind::PlainText,
                type_info: None,
            })
        }
        Err(err) => {
            tracing::warn!(%err, %position, "hover failed");
            None
        }
    }
}

/// Render as a `groovy` code block, followed by documentation if any.
pub fn render_markdown(info: &TypeInfo) -> String {
    let mut out = String::from("```groovy\n");
    if let Some(modifiers) = &info.modifiers {
        out.push_str(modifiers);
        out.push(' ');
    }

    match info.kind {
        TypeInfoKind::LocalVariable | TypeInfoKind::Field | TypeInfoKind::Parameter => {
            out.push_str(&info.type_name);
            out.push(' ');
            out.push_str(&info.name);
        }
        TypeInfoKind::Method => out.push_str(&info.type_name),
        TypeInfoKind::Class => {
            out.push_str("class ");
            out.push_str(&info.name);
        }
        TypeInfoKind::Enum => {
            out.push_str("enum ");
            out.push_str(&info.name);
        }
        TypeInfoKind::EnumConstant => {
            out.push_str(&info.name);
            out.push_str(" : ");
            out.push_str(&info.type_name);
        }
    }
    out.push_str("\n```");

    if let Some(documentation) = &info.documentation {
        out.push_str("\n\n");
        out.push_str(documentation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_groovy;

    const SOURCE: &str = "class Greeter {\n    private String name\n\n    String greet(String who) {\n        def unknown\n        return who + unknown.value\n    }\n}\n";

    fn hover_at(line: u32, character: u32) -> Option<HoverResult> {
        hover(&parse_groovy("Greeter", SOURCE), SOURCE, Position::new(line, character))
    }

    #[test]
    fn test_field_hover() {
        let result = hover_at(1, 20).unwrap();
        assert_eq!(result.markup, MarkupKind::Markdown);
        assert_eq!(result.contents, "```groovy\nprivate String name\n```");
    }

    #[test]
    fn test_method_hover() {
        let result = hover_at(3, 12).unwrap();
        assert_eq!(
            result.contents,
            "```groovy\npublic greet(String who): String\n```"
        );
    }

    #[test]
    fn test_class_hover() {
        let result = hover_at(0, 8).unwrap();
        assert_eq!(result.contents, "```groovy\npublic class Greeter\n```");
    }

    #[test]
    fn test_no_identifier_means_no_hover() {
        assert!(hover_at(2, 0).is_none());
        assert!(hover_at(3, 29).is_none());
    }

    #[test]
    fn test_cursor_past_line_end() {
        let result = hover_at(1, u32::MAX).unwrap();
        assert_eq!(result.contents, "```groovy\nprivate String name\n```");
    }

    #[test]
    fn test_unresolved_property_falls_back() {
        let result = hover_at(5, 30).unwrap();
        assert_eq!(result.markup, MarkupKind::PlainText);
        assert_eq!(result.contents, DYNAMIC_FALLBACK);
        assert!(result.type_info.is_none());
    }

    #[test]
    fn test_documentation_is_appended() {
        let info = TypeInfo {
            name: "Inner".into(),
            type_name: "Outer.Inner".into(),
            kind: TypeInfoKind::Class,
            documentation: Some("Nested class of `Outer`".into()),
            modifiers: None,
        };
        assert_eq!(
            render_markdown(&info),
            "```groovy\nclass Inner\n```\n\nNested class of `Outer`"
        );
    }
}
