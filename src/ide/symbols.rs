//! Document outline.
//!
//! Unlike the builder, this path always uses name-token selection ranges.
//! Script classes are not listed; their declared methods appear at the top
//! level instead.

use crate::base::{Range, SourceSpan};
use crate::semantic::{BuildError, BuildResult, SymbolKind};
use crate::syntax::{ClassInfo, ClassType, FieldInfo, MethodInfo, ParsedFile};

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: String,
    /// Type for fields, `(params): Return` for methods, supertypes for classes.
    pub detail: Option<String>,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    pub children: Vec<DocumentSymbol>,
}

/// Outline of `file`, classes first, members in source order.
pub fn document_symbols(file: &ParsedFile, uri: &str) -> BuildResult<Vec<DocumentSymbol>> {
    let outline = Outline { uri };
    let mut symbols = Vec::new();
    for class in &file.classes {
        if class.class_type == ClassType::Script {
            for method in class.methods.iter().filter(|m| m.name_span.is_some()) {
                symbols.push(outline.method(method, &class.name)?);
            }
        } else {
            symbols.push(outline.class(class)?);
        }
    }
    Ok(symbols)
}

struct Outline<'a> {
    uri: &'a str,
}

impl Outline<'_> {
    fn ranges(&self, name: &str, span: SourceSpan, name_span: Option<SourceSpan>) -> BuildResult<(Range, Range)> {
        let convert = |span: SourceSpan| {
            span.to_range().map_err(|source| BuildError::InvalidSpan {
                uri: self.uri.to_string(),
                name: name.to_string(),
                source,
            })
        };
        let range = convert(span)?;
        let selection = match name_span {
            Some(span) => convert(span)?,
            None => range,
        };
        Ok((range, selection))
    }

    fn class(&self, class: &ClassInfo) -> BuildResult<DocumentSymbol> {
        let (range, selection_range) = self.ranges(&class.name, class.span, class.name_span)?;

        let mut children = Vec::new();
        for field in &class.fields {
            children.push(self.field(field)?);
        }
        for method in &class.methods {
            children.push(self.method(method, &class.name)?);
        }
        for inner in &class.inner_classes {
            children.push(self.class(inner)?);
        }

        let kind = match class.class_type {
            ClassType::Interface => SymbolKind::Interface,
            ClassType::Enum => SymbolKind::Enum,
            ClassType::Annotation => SymbolKind::Struct,
            ClassType::Class | ClassType::Trait | ClassType::Script => SymbolKind::Class,
        };

        Ok(DocumentSymbol {
            name: class.name.to_string(),
            detail: class_detail(class),
            kind,
            range,
            selection_range,
            children,
        })
    }

    fn field(&self, field: &FieldInfo) -> BuildResult<DocumentSymbol> {
        let (range, selection_range) = self.ranges(&field.name, field.span, field.name_span)?;
        let kind = if field.is_enum_constant {
            SymbolKind::EnumMember
        } else if field.is_static() {
            SymbolKind::Constant
        } else {
            SymbolKind::Field
        };
        Ok(DocumentSymbol {
            name: field.name.to_string(),
            detail: (!field.is_enum_constant).then(|| field.type_ref.display_name()),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        })
    }

    fn method(&self, method: &MethodInfo, class_name: &str) -> BuildResult<DocumentSymbol> {
        let (range, selection_range) = self.ranges(&method.name, method.span, method.name_span)?;
        let parameters = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_ref.display_name(), p.name))
            .collect::<Vec<_>>()
            .join(", ");

        let (kind, detail) = if method.is_constructor {
            (SymbolKind::Constructor, format!("{class_name}({parameters})"))
        } else {
            (
                SymbolKind::Method,
                format!("({parameters}): {}", method.return_type.display_name()),
            )
        };

        Ok(DocumentSymbol {
            name: method.name.to_string(),
            detail: Some(detail),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        })
    }
}

/// `extends A implements B, C`, or nothing for a plain class.
fn class_detail(class: &ClassInfo) -> Option<String> {
    let mut parts = Vec::new();
    if !class.super_types.is_empty() {
        let names: Vec<_> = class.super_types.iter().map(|t| t.display_name()).collect();
        parts.push(format!("extends {}", names.join(", ")));
    }
    if !class.interfaces.is_empty() {
        let names: Vec<_> = class.interfaces.iter().map(|t| t.display_name()).collect();
        parts.push(format!("implements {}", names.join(", ")));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}
