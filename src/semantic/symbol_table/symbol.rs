use std::fmt;

use crate::base::Range;
use crate::syntax::{ClassInfo, ClassType, FieldInfo, ImportInfo, MethodInfo, ParameterInfo};

/// Which kind of declaration produced a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionKind {
    Class,
    Method,
    Field,
    LocalVariable,
    Parameter,
    Import,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DefinitionKind::Class => "class",
            DefinitionKind::Method => "method",
            DefinitionKind::Field => "field",
            DefinitionKind::LocalVariable => "local variable",
            DefinitionKind::Parameter => "parameter",
            DefinitionKind::Import => "import",
        };
        f.write_str(text)
    }
}

/// Editor-facing symbol category, mirroring the LSP `SymbolKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    /// Annotation types
    Struct,
    Method,
    Constructor,
    Field,
    /// Static fields
    Constant,
    EnumMember,
    Variable,
}

/// A document URI plus a range inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

/// An immutable record of one declaration.
///
/// Definitions are created once per build pass and replaced wholesale when
/// their file is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolDefinition {
    pub name: String,
    pub qualified_name: String,
    pub kind: DefinitionKind,
    pub symbol_kind: SymbolKind,
    pub file_uri: String,
    /// Full span of the declaration, 0-based.
    pub range: Range,
    /// Span of the declared name, 0-based.
    pub selection_range: Range,
    /// Qualified name of the enclosing class (or `Class.method` for parameters).
    pub containing_class: Option<String>,
}

impl SymbolDefinition {
    pub fn for_class(class: &ClassInfo, uri: &str, range: Range, selection_range: Range) -> Self {
        let symbol_kind = match class.class_type {
            ClassType::Class | ClassType::Script | ClassType::Trait => SymbolKind::Class,
            ClassType::Interface => SymbolKind::Interface,
            ClassType::Enum => SymbolKind::Enum,
            ClassType::Annotation => SymbolKind::Struct,
        };
        Self {
            name: class.name.to_string(),
            qualified_name: class.qualified_name.clone(),
            kind: DefinitionKind::Class,
            symbol_kind,
            file_uri: uri.to_string(),
            range,
            selection_range,
            containing_class: class.outer_class.clone(),
        }
    }

    pub fn for_method(
        method: &MethodInfo,
        class_qualified_name: &str,
        uri: &str,
        range: Range,
        selection_range: Range,
    ) -> Self {
        Self {
            name: method.name.to_string(),
            qualified_name: format!("{class_qualified_name}.{}", method.name),
            kind: DefinitionKind::Method,
            symbol_kind: if method.is_constructor {
                SymbolKind::Constructor
            } else {
                SymbolKind::Method
            },
            file_uri: uri.to_string(),
            range,
            selection_range,
            containing_class: Some(class_qualified_name.to_string()),
        }
    }

    pub fn for_field(
        field: &FieldInfo,
        class_qualified_name: &str,
        uri: &str,
        range: Range,
        selection_range: Range,
    ) -> Self {
        let symbol_kind = if field.is_enum_constant {
            SymbolKind::EnumMember
        } else if field.is_static() {
            SymbolKind::Constant
        } else {
            SymbolKind::Field
        };
        Self {
            name: field.name.to_string(),
            qualified_name: format!("{class_qualified_name}.{}", field.name),
            kind: DefinitionKind::Field,
            symbol_kind,
            file_uri: uri.to_string(),
            range,
            selection_range,
            containing_class: Some(class_qualified_name.to_string()),
        }
    }

    /// `owner` is the qualified name of the method or closure declaring the parameter.
    pub fn for_parameter(
        parameter: &ParameterInfo,
        owner: &str,
        uri: &str,
        range: Range,
        selection_range: Range,
    ) -> Self {
        Self {
            name: parameter.name.to_string(),
            qualified_name: format!("{owner}.{}", parameter.name),
            kind: DefinitionKind::Parameter,
            symbol_kind: SymbolKind::Variable,
            file_uri: uri.to_string(),
            range,
            selection_range,
            containing_class: Some(owner.to_string()),
        }
    }

    pub fn for_local(name: &str, owner: &str, uri: &str, range: Range, selection_range: Range) -> Self {
        Self {
            name: name.to_string(),
            qualified_name: format!("{owner}.{name}"),
            kind: DefinitionKind::LocalVariable,
            symbol_kind: SymbolKind::Variable,
            file_uri: uri.to_string(),
            range,
            selection_range,
            containing_class: Some(owner.to_string()),
        }
    }

    /// `None` for wildcard imports, which bind no single name.
    pub fn for_import(import: &ImportInfo, uri: &str, range: Range) -> Option<Self> {
        let name = import.simple_name()?;
        Some(Self {
            name: name.to_string(),
            qualified_name: import.class_name.clone(),
            kind: DefinitionKind::Import,
            symbol_kind: SymbolKind::Class,
            file_uri: uri.to_string(),
            range,
            selection_range: range,
            containing_class: None,
        })
    }

    pub fn to_location(&self) -> Location {
        Location {
            uri: self.file_uri.clone(),
            range: self.range,
        }
    }

    pub fn to_selection_location(&self) -> Location {
        Location {
            uri: self.file_uri.clone(),
            range: self.selection_range,
        }
    }
}
