//! Parsed-file model for Groovy sources
//!
//! - [`model`] - classes, methods, fields, imports and diagnostics
//! - [`body`] - statement and expression trees of method and closure bodies
//!
//! [`parse`] is the entry point used by the analysis layer. It never fails
//! on malformed source: syntax errors are reported as diagnostics and the
//! partial model is returned.

pub mod body;
pub mod model;

use std::path::Path;

use thiserror::Error;

pub use body::{
    AssignOp, BinaryOp, Block, CatchClause, Closure, Expr, ExprKind, Literal, MapEntry, Stmt,
    StmtKind, UnaryOp, VarDecl,
};
pub use model::{
    ClassInfo, ClassType, FieldInfo, ImportInfo, MethodInfo, Modifiers, ParameterInfo,
    ParseDiagnostic, ParsedFile, TypeRef,
};

/// File extensions the front end accepts, longest first.
pub const GROOVY_EXTENSIONS: &[&str] = &[".gradle.kts", ".groovy", ".gradle", ".gvy", ".gy", ".gsh"];

/// Input the front end cannot accept at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),
}

/// Parse a Groovy source file.
///
/// `file_name` may be a bare name, a path or a `file://` URI; its stem names
/// the implicit script class. Extensions match case-insensitively.
pub fn parse(file_name: &str, text: &str) -> Result<ParsedFile, ParseError> {
    let path = file_name.strip_prefix("file://").unwrap_or(file_name);
    let base = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);

    // Extensions are ASCII, so lowercasing keeps byte offsets for the stem.
    let lowered = base.to_ascii_lowercase();
    let Some(extension) = GROOVY_EXTENSIONS.iter().find(|ext| lowered.ends_with(*ext)) else {
        return Err(ParseError::UnsupportedExtension(base.to_string()));
    };
    let stem = &base[..base.len() - extension.len()];
    if stem.is_empty() {
        return Err(ParseError::UnsupportedExtension(base.to_string()));
    }

    let parsed = crate::parser::parse_groovy(stem, text);
    tracing::debug!(
        file = %file_name,
        classes = parsed.classes.len(),
        errors = parsed.diagnostics.len(),
        "parsed file"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uses_file_stem_for_script() {
        let parsed = parse("file:///work/build.gradle", "println 'x'\n").unwrap();
        assert_eq!(parsed.classes[0].name, "build");
        assert_eq!(parsed.classes[0].class_type, ClassType::Script);
    }

    #[test]
    fn test_parse_gradle_kts() {
        let parsed = parse("settings.gradle.kts", "include 'app'\n").unwrap();
        assert_eq!(parsed.classes[0].name, "settings");
    }

    #[test]
    fn test_parse_extension_ignores_case() {
        let parsed = parse("file:///src/Foo.GROOVY", "println 'x'\n").unwrap();
        assert_eq!(parsed.classes[0].name, "Foo");
        assert!(parse("Build.Gradle.KTS", "").is_ok());
    }

    #[test]
    fn test_parse_rejects_other_extensions() {
        assert_eq!(
            parse("Main.java", "class Main {}"),
            Err(ParseError::UnsupportedExtension("Main.java".to_string()))
        );
        assert!(parse(".groovy", "").is_err());
    }

    #[test]
    fn test_parse_keeps_partial_model_on_errors() {
        let parsed = parse("Broken.groovy", "class Broken {\n  void ok() {}\n  int x = )\n").unwrap();
        assert!(parsed.has_errors());
        assert_eq!(parsed.classes[0].name, "Broken");
        assert!(parsed.classes[0].find_method("ok").is_some());
    }
}
