//! Parsed-file model: declarations with 1-based positions.
//!
//! Every declaration carries its full [`SourceSpan`] and, where the source has
//! one, the span of its name token. Spans use 1-based lines and columns; the
//! end column points one past the last character.

use smol_str::SmolStr;

use super::body::{Block, Expr};
use crate::base::{SourcePos, SourceSpan};

// ============================================================================
// MODIFIERS
// ============================================================================

/// JVM access flags for a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    pub const STATIC: Modifiers = Modifiers(0x0008);
    pub const FINAL: Modifiers = Modifiers(0x0010);
    pub const SYNCHRONIZED: Modifiers = Modifiers(0x0020);
    pub const VOLATILE: Modifiers = Modifiers(0x0040);
    pub const TRANSIENT: Modifiers = Modifiers(0x0080);
    pub const NATIVE: Modifiers = Modifiers(0x0100);
    pub const ABSTRACT: Modifiers = Modifiers(0x0400);

    pub const fn from_bits(bits: u32) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: Modifiers) {
        self.0 |= other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// True when any of public/protected/private is set.
    pub const fn has_visibility(self) -> bool {
        self.0 & (Self::PUBLIC.0 | Self::PRIVATE.0 | Self::PROTECTED.0) != 0
    }

    /// Render as Java source keywords: visibility first, then static, final, abstract.
    ///
    /// Returns `None` when none of those apply.
    pub fn display(self) -> Option<String> {
        let mut words = Vec::new();
        if self.contains(Self::PUBLIC) {
            words.push("public");
        } else if self.contains(Self::PROTECTED) {
            words.push("protected");
        } else if self.contains(Self::PRIVATE) {
            words.push("private");
        }
        if self.contains(Self::STATIC) {
            words.push("static");
        }
        if self.contains(Self::FINAL) {
            words.push("final");
        }
        if self.contains(Self::ABSTRACT) {
            words.push("abstract");
        }
        (!words.is_empty()).then(|| words.join(" "))
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// A type as written in source: `java.util.Map<String, List<Integer>>[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Name as written, possibly package-qualified.
    pub name: SmolStr,
    pub generics: Vec<TypeRef>,
    pub array_dims: u8,
    /// Declared with `def`/`var` (or omitted), i.e. `Object` at runtime.
    pub dynamic: bool,
}

impl TypeRef {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            generics: Vec::new(),
            array_dims: 0,
            dynamic: false,
        }
    }

    /// The `def` type.
    pub fn dynamic() -> Self {
        Self {
            name: SmolStr::new_static("Object"),
            generics: Vec::new(),
            array_dims: 0,
            dynamic: true,
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeRef>) -> Self {
        self.generics = generics;
        self
    }

    pub fn with_array_dims(mut self, dims: u8) -> Self {
        self.array_dims = dims;
        self
    }

    /// Name without its package prefix.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0 && PRIMITIVES.contains(&self.name.as_str())
    }

    /// True for `def` and explicit `Object`: the type carries no information.
    pub fn is_object(&self) -> bool {
        self.array_dims == 0
            && (self.dynamic || self.name == "Object" || self.name == "java.lang.Object")
    }

    /// Render for display.
    ///
    /// Primitives and `java.lang` types use their short name, arrays append
    /// `[]` per dimension, generic arguments are rendered recursively.
    pub fn display_name(&self) -> String {
        let mut out = self.simple_name().to_string();
        if !self.generics.is_empty() {
            let args: Vec<String> = self.generics.iter().map(TypeRef::display_name).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        for _ in 0..self.array_dims {
            out.push_str("[]");
        }
        out
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::dynamic()
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassType {
    Class,
    Interface,
    Enum,
    Annotation,
    Trait,
    /// Implicit class holding a script's loose statements.
    Script,
}

/// A class-like declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub name: SmolStr,
    /// Package plus enclosing classes, dot separated.
    pub qualified_name: String,
    pub class_type: ClassType,
    pub span: SourceSpan,
    pub name_span: Option<SourceSpan>,
    pub methods: Vec<MethodInfo>,
    pub fields: Vec<FieldInfo>,
    /// `extends` clause (several for interfaces).
    pub super_types: Vec<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub modifiers: Modifiers,
    pub inner_classes: Vec<ClassInfo>,
    /// Qualified name of the enclosing class for nested declarations.
    pub outer_class: Option<String>,
    pub annotations: Vec<SmolStr>,
}

impl ClassInfo {
    pub fn constructors(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter().filter(|m| m.is_constructor)
    }

    /// Methods proper, without constructors.
    pub fn plain_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter().filter(|m| !m.is_constructor)
    }

    pub fn enum_constants(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| f.is_enum_constant)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodInfo> {
        self.plain_methods().find(|m| m.name == name)
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    pub name: SmolStr,
    pub return_type: TypeRef,
    pub parameters: Vec<ParameterInfo>,
    pub span: SourceSpan,
    pub name_span: Option<SourceSpan>,
    pub modifiers: Modifiers,
    pub is_constructor: bool,
    pub annotations: Vec<SmolStr>,
    /// Absent for abstract and interface methods.
    pub body: Option<Block>,
}

impl MethodInfo {
    /// `name(int a, String b): ReturnType`
    pub fn signature(&self) -> String {
        format!("{}({}): {}", self.name, self.parameter_list(), self.return_type.display_name())
    }

    /// `ClassName(int a, String b)`
    pub fn constructor_signature(&self, class_name: &str) -> String {
        format!("{}({})", class_name, self.parameter_list())
    }

    fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.type_ref.display_name(), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A method, constructor, closure or catch parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub name: SmolStr,
    pub type_ref: TypeRef,
    pub default_value: Option<Expr>,
    pub is_var_arg: bool,
    pub span: SourceSpan,
    pub name_span: SourceSpan,
}

/// A field, property or enum constant.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: SmolStr,
    pub type_ref: TypeRef,
    pub span: SourceSpan,
    pub name_span: Option<SourceSpan>,
    pub modifiers: Modifiers,
    pub initializer: Option<Expr>,
    pub is_enum_constant: bool,
    /// Declared without visibility, which makes it a Groovy property.
    pub is_property: bool,
}

impl FieldInfo {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// An `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Imported name without the trailing `.*`.
    pub class_name: String,
    pub alias: Option<SmolStr>,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: SourceSpan,
}

impl ImportInfo {
    /// Name the import binds in the file, if any.
    pub fn simple_name(&self) -> Option<&str> {
        if self.is_wildcard {
            return None;
        }
        Some(
            self.alias
                .as_deref()
                .unwrap_or_else(|| self.class_name.rsplit('.').next().unwrap_or(&self.class_name)),
        )
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// A syntax error found while parsing; never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub start: SourcePos,
    pub end: SourcePos,
}

// ============================================================================
// FILE
// ============================================================================

/// Everything the front end extracted from one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedFile {
    pub package_name: Option<String>,
    pub imports: Vec<ImportInfo>,
    /// Top-level classes; nested classes live in [`ClassInfo::inner_classes`].
    pub classes: Vec<ClassInfo>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParsedFile {
    /// All classes, outer before inner, in source order.
    pub fn all_classes(&self) -> Vec<&ClassInfo> {
        fn collect<'a>(class: &'a ClassInfo, out: &mut Vec<&'a ClassInfo>) {
            out.push(class);
            for inner in &class.inner_classes {
                collect(inner, out);
            }
        }

        let mut out = Vec::new();
        for class in &self.classes {
            collect(class, &mut out);
        }
        out
    }

    /// Find a class by simple or qualified name.
    pub fn find_class(&self, name: &str) -> Option<&ClassInfo> {
        self.all_classes()
            .into_iter()
            .find(|c| c.name == name || c.qualified_name == name)
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
