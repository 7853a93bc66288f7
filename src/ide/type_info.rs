//! Type information for the construct under the cursor.
//!
//! Walks the parsed-file model rather than the scope tree, since expression
//! level detail (initializers, call receivers) is needed. Classes are visited
//! depth first and the first match wins, in this order per class:
//!
//! 1. fields
//! 2. constructors, then methods: parameters, body, then the name token
//! 3. nested classes
//! 4. the class name token
//!
//! Cursor positions arrive 0-based and are compared in the model's 1-based
//! space.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::error::{AnalysisError, AnalysisResult};
use crate::base::{Position, SourcePos, SourceSpan};
use crate::syntax::{
    ClassInfo, ClassType, Expr, ExprKind, FieldInfo, MethodInfo, ParameterInfo, ParsedFile,
    Stmt, StmtKind, TypeRef, VarDecl,
};

/// What kind of construct a [`TypeInfo`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeInfoKind {
    LocalVariable,
    Field,
    Parameter,
    Method,
    Class,
    Enum,
    EnumConstant,
}

/// Resolved description of one construct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeInfo {
    pub name: String,
    /// Display type; the full signature for methods, the qualified name for classes.
    pub type_name: String,
    pub kind: TypeInfoKind,
    pub documentation: Option<String>,
    /// Rendered modifier keywords, absent when none apply.
    pub modifiers: Option<String>,
}

impl TypeInfo {
    fn new(name: impl Into<String>, type_name: impl Into<String>, kind: TypeInfoKind) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind,
            documentation: None,
            modifiers: None,
        }
    }

    fn with_modifiers(mut self, modifiers: Option<String>) -> Self {
        self.modifiers = modifiers;
        self
    }

    fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Type information for the construct at `position` in `file`.
pub fn type_info_at(file: &ParsedFile, position: Position) -> AnalysisResult<TypeInfo> {
    let mut resolver = TypeInfoResolver::new(file, position.to_source_pos());
    for class in &file.classes {
        if let Some(info) = resolver.visit_class(class) {
            tracing::debug!(%position, name = %info.name, kind = ?info.kind, "resolved type info");
            return Ok(info);
        }
    }
    tracing::debug!(%position, "no type info");
    Err(AnalysisError::NoTypeInfo(position))
}

/// A name whose type is known from an earlier declaration.
#[derive(Debug, Clone)]
struct Recorded {
    type_ref: TypeRef,
    kind: TypeInfoKind,
}

struct TypeInfoResolver<'a> {
    file: &'a ParsedFile,
    target: SourcePos,
    variables: FxHashMap<SmolStr, Recorded>,
    current_class: Option<&'a ClassInfo>,
}

impl<'a> TypeInfoResolver<'a> {
    fn new(file: &'a ParsedFile, target: SourcePos) -> Self {
        Self {
            file,
            target,
            variables: FxHashMap::default(),
            current_class: None,
        }
    }

    fn within(&self, span: SourceSpan) -> bool {
        span.contains(self.target)
    }

    /// Half-open check for name tokens: the column just past a name is not on it.
    fn within_name(&self, span: Option<SourceSpan>) -> bool {
        span.is_some_and(|span| {
            self.target.line == span.start.line
                && self.target.column >= span.start.column
                && self.target.column < span.end.column
        })
    }

    fn record(&mut self, name: &SmolStr, type_ref: TypeRef, kind: TypeInfoKind) {
        self.variables.insert(name.clone(), Recorded { type_ref, kind });
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn visit_class(&mut self, class: &'a ClassInfo) -> Option<TypeInfo> {
        let outer_class = self.current_class.replace(class);
        let outer_variables = self.variables.clone();
        let found = self.visit_class_members(class);
        self.current_class = outer_class;
        self.variables = outer_variables;
        found
    }

    fn visit_class_members(&mut self, class: &'a ClassInfo) -> Option<TypeInfo> {
        for field in &class.fields {
            let type_ref = self.field_type(field);
            self.record(&field.name, type_ref, TypeInfoKind::Field);
        }

        for field in &class.fields {
            if self.within(field.span) {
                return Some(self.field_info(class, field));
            }
            if let Some(found) = field.initializer.as_ref().and_then(|e| self.visit_expr(e)) {
                return Some(found);
            }
        }

        for method in class.constructors().chain(class.plain_methods()) {
            if let Some(found) = self.visit_method(class, method) {
                return Some(found);
            }
        }

        for inner in &class.inner_classes {
            if let Some(found) = self.visit_class(inner) {
                return Some(found);
            }
        }

        if self.within_name(class.name_span) {
            return Some(class_info(class));
        }
        None
    }

    fn field_info(&self, class: &ClassInfo, field: &FieldInfo) -> TypeInfo {
        if field.is_enum_constant {
            return TypeInfo::new(field.name.as_str(), class.name.as_str(), TypeInfoKind::EnumConstant);
        }
        TypeInfo::new(
            field.name.as_str(),
            self.field_type(field).display_name(),
            TypeInfoKind::Field,
        )
        .with_modifiers(field.modifiers.display())
    }

    /// Declared type, or the initializer's type for `def` fields.
    fn field_type(&self, field: &FieldInfo) -> TypeRef {
        if !field.type_ref.is_object() {
            return field.type_ref.clone();
        }
        field
            .initializer
            .as_ref()
            .and_then(|init| self.infer(init))
            .unwrap_or_else(|| field.type_ref.clone())
    }

    fn visit_method(&mut self, class: &ClassInfo, method: &MethodInfo) -> Option<TypeInfo> {
        self.scoped(|this| this.visit_method_inner(class, method))
    }

    /// Runs `visit` and then forgets every variable it recorded.
    fn scoped(&mut self, visit: impl FnOnce(&mut Self) -> Option<TypeInfo>) -> Option<TypeInfo> {
        let outer_variables = self.variables.clone();
        let found = visit(self);
        self.variables = outer_variables;
        found
    }

    fn visit_method_inner(&mut self, class: &ClassInfo, method: &MethodInfo) -> Option<TypeInfo> {
        if let Some(found) = self.visit_parameters(&method.parameters) {
            return Some(found);
        }

        if let Some(body) = &method.body {
            if let Some(found) = self.visit_statements(&body.statements) {
                return Some(found);
            }
        }

        if !self.within_name(method.name_span) {
            return None;
        }
        let info = if method.is_constructor {
            TypeInfo::new(
                class.name.as_str(),
                method.constructor_signature(&class.name),
                TypeInfoKind::Method,
            )
        } else {
            let info = TypeInfo::new(method.name.as_str(), method.signature(), TypeInfoKind::Method);
            if method.annotations.iter().any(|a| a == "Override") {
                info.with_documentation(format!("Overrides a method of a supertype of `{}`", class.name))
            } else {
                info
            }
        };
        Some(info.with_modifiers(method.modifiers.display()))
    }

    fn visit_parameters(&mut self, parameters: &[ParameterInfo]) -> Option<TypeInfo> {
        for parameter in parameters {
            self.record(&parameter.name, parameter.type_ref.clone(), TypeInfoKind::Parameter);
            if self.within(parameter.span) {
                return Some(TypeInfo::new(
                    parameter.name.as_str(),
                    parameter.type_ref.display_name(),
                    TypeInfoKind::Parameter,
                ));
            }
            if let Some(found) = parameter.default_value.as_ref().and_then(|e| self.visit_expr(e)) {
                return Some(found);
            }
        }
        None
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn visit_statements(&mut self, statements: &[Stmt]) -> Option<TypeInfo> {
        statements.iter().find_map(|stmt| self.visit_stmt(stmt))
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Option<TypeInfo> {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.visit_var_decl(decl),
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.visit_expr(expr),
            StmtKind::Return(value) => value.as_ref().and_then(|e| self.visit_expr(e)),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => self
                .visit_expr(condition)
                .or_else(|| self.visit_stmt(then_branch))
                .or_else(|| else_branch.as_ref().and_then(|s| self.visit_stmt(s))),
            StmtKind::While { condition, body } => self
                .visit_expr(condition)
                .or_else(|| self.visit_stmt(body)),
            StmtKind::ForIn {
                variable,
                iterable,
                body,
            } => self.visit_expr(iterable).or_else(|| {
                self.scoped(|this| {
                    this.visit_var_decl(variable)
                        .or_else(|| this.visit_stmt(body))
                })
            }),
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => self.scoped(|this| {
                this.visit_statements(init)
                    .or_else(|| condition.as_ref().and_then(|e| this.visit_expr(e)))
                    .or_else(|| update.iter().find_map(|e| this.visit_expr(e)))
                    .or_else(|| this.visit_stmt(body))
            }),
            StmtKind::Block(block) => self.scoped(|this| this.visit_statements(&block.statements)),
            StmtKind::TryCatch {
                body,
                catches,
                finally,
            } => self
                .scoped(|this| this.visit_statements(&body.statements))
                .or_else(|| {
                    catches.iter().find_map(|catch| {
                        self.scoped(|this| {
                            let param = &catch.parameter;
                            this.record(&param.name, param.type_ref.clone(), TypeInfoKind::LocalVariable);
                            if this.within(param.span) {
                                return Some(TypeInfo::new(
                                    param.name.as_str(),
                                    param.type_ref.display_name(),
                                    TypeInfoKind::LocalVariable,
                                ));
                            }
                            this.visit_statements(&catch.body.statements)
                        })
                    })
                })
                .or_else(|| {
                    finally
                        .as_ref()
                        .and_then(|b| self.scoped(|this| this.visit_statements(&b.statements)))
                }),
            StmtKind::Break | StmtKind::Continue | StmtKind::Empty => None,
        }
    }

    /// Records the variable's type, then checks its name and initializer.
    fn visit_var_decl(&mut self, decl: &VarDecl) -> Option<TypeInfo> {
        let type_ref = if decl.type_ref.is_object() {
            decl.initializer
                .as_ref()
                .and_then(|init| self.infer(init))
                .unwrap_or_else(|| decl.type_ref.clone())
        } else {
            decl.type_ref.clone()
        };
        self.record(&decl.name, type_ref.clone(), TypeInfoKind::LocalVariable);

        if self.within(decl.name_span) {
            return Some(TypeInfo::new(
                decl.name.as_str(),
                type_ref.display_name(),
                TypeInfoKind::LocalVariable,
            ));
        }
        decl.initializer.as_ref().and_then(|init| self.visit_expr(init))
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn visit_exprs(&mut self, exprs: &[Expr]) -> Option<TypeInfo> {
        exprs.iter().find_map(|expr| self.visit_expr(expr))
    }

    fn visit_expr(&mut self, expr: &Expr) -> Option<TypeInfo> {
        match &expr.kind {
            ExprKind::Variable(name) => self
                .within(expr.span)
                .then(|| self.variable_info(name)),
            ExprKind::MethodCall {
                receiver,
                name,
                name_span,
                args,
                ..
            } => {
                if self.within(*name_span) {
                    return Some(self.call_info(receiver.as_deref(), name));
                }
                receiver
                    .as_deref()
                    .and_then(|r| self.visit_expr(r))
                    .or_else(|| self.visit_exprs(args))
            }
            ExprKind::Property {
                receiver,
                name,
                name_span,
                ..
            } => {
                if self.within(*name_span) {
                    return self.property_info(receiver, name);
                }
                self.visit_expr(receiver)
            }
            ExprKind::New {
                type_ref,
                type_span,
                args,
            } => {
                if self.within(*type_span) {
                    return Some(self.constructor_call_info(type_ref));
                }
                self.visit_exprs(args)
            }
            ExprKind::Closure(closure) => self.scoped(|this| {
                if closure.implicit_it {
                    this.record(&SmolStr::new_static("it"), TypeRef::dynamic(), TypeInfoKind::Parameter);
                }
                this.visit_parameters(&closure.parameters)
                    .or_else(|| this.visit_statements(&closure.body))
            }),
            ExprKind::Index { target, index } => self
                .visit_expr(target)
                .or_else(|| self.visit_expr(index)),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs).or_else(|| self.visit_expr(rhs))
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => self
                .visit_expr(condition)
                .or_else(|| self.visit_expr(then_expr))
                .or_else(|| self.visit_expr(else_expr)),
            ExprKind::Elvis { value, fallback } => self
                .visit_expr(value)
                .or_else(|| self.visit_expr(fallback)),
            ExprKind::Assign { target, value, .. } => self
                .visit_expr(target)
                .or_else(|| self.visit_expr(value)),
            ExprKind::Cast { expr, .. } => self.visit_expr(expr),
            ExprKind::Range { from, to, .. } => {
                self.visit_expr(from).or_else(|| self.visit_expr(to))
            }
            ExprKind::List(items) => self.visit_exprs(items),
            ExprKind::Map(entries) => entries
                .iter()
                .find_map(|entry| self.visit_expr(&entry.key).or_else(|| self.visit_expr(&entry.value))),
            ExprKind::Literal(_) | ExprKind::This | ExprKind::Super | ExprKind::Error => None,
        }
    }

    fn variable_info(&self, name: &str) -> TypeInfo {
        if let Some(recorded) = self.variables.get(name) {
            return TypeInfo::new(name, recorded.type_ref.display_name(), recorded.kind);
        }
        if let Some(class) = self.file.find_class(name) {
            return class_info(class);
        }
        TypeInfo::new(name, TypeRef::dynamic().display_name(), TypeInfoKind::LocalVariable)
    }

    /// Method name under the cursor in a call expression.
    fn call_info(&self, receiver: Option<&Expr>, name: &str) -> TypeInfo {
        let receiver_type = match receiver {
            None | Some(Expr { kind: ExprKind::This, .. }) => {
                self.current_class.map(|c| TypeRef::named(c.name.as_str()))
            }
            Some(expr) => self.infer(expr),
        };

        let declared = receiver_type
            .as_ref()
            .and_then(|t| self.class_of(t))
            .and_then(|class| class.find_method(name));
        if let Some(method) = declared {
            return TypeInfo::new(name, method.signature(), TypeInfoKind::Method)
                .with_modifiers(method.modifiers.display());
        }

        let description = match receiver_type.filter(|t| !t.is_object()) {
            Some(t) => format!("{}.{name}(...)", t.display_name()),
            None => format!("{name}(...)"),
        };
        TypeInfo::new(name, description, TypeInfoKind::Method)
    }

    /// Property name under the cursor: enum constants, nested classes, then fields.
    fn property_info(&self, receiver: &Expr, name: &str) -> Option<TypeInfo> {
        let class = match &receiver.kind {
            ExprKind::Variable(var) if !self.variables.contains_key(var.as_str()) => {
                self.file.find_class(var)
            }
            _ => self.infer(receiver).and_then(|t| self.class_of(&t)),
        };

        if let Some(class) = class {
            let constant = (class.class_type == ClassType::Enum)
                .then(|| class.enum_constants().find(|f| f.name == name))
                .flatten();
            if let Some(constant) = constant {
                return Some(TypeInfo::new(
                    constant.name.as_str(),
                    class.name.as_str(),
                    TypeInfoKind::EnumConstant,
                ));
            }
            if let Some(inner) = class.inner_classes.iter().find(|c| c.name == name) {
                return Some(class_info(inner));
            }
            if let Some(field) = class.find_field(name) {
                return Some(
                    TypeInfo::new(name, self.field_type(field).display_name(), TypeInfoKind::Field)
                        .with_modifiers(field.modifiers.display()),
                );
            }
        }

        self.variables
            .get(name)
            .map(|recorded| TypeInfo::new(name, recorded.type_ref.display_name(), TypeInfoKind::Field))
    }

    fn constructor_call_info(&self, type_ref: &TypeRef) -> TypeInfo {
        let name = type_ref.simple_name();
        let signature = self
            .class_of(type_ref)
            .and_then(|class| class.constructors().next())
            .map(|ctor| ctor.constructor_signature(name))
            .unwrap_or_else(|| format!("{name}(...)"));
        TypeInfo::new(name, signature, TypeInfoKind::Method).with_documentation("Constructor")
    }

    // ------------------------------------------------------------------------
    // Inference
    // ------------------------------------------------------------------------

    fn class_of(&self, type_ref: &TypeRef) -> Option<&'a ClassInfo> {
        if type_ref.is_object() {
            return None;
        }
        self.file.find_class(&type_ref.name).or_else(|| {
            self.file.find_class(type_ref.simple_name())
        })
    }

    /// Static type of `expr` where it is evident without type checking.
    fn infer(&self, expr: &Expr) -> Option<TypeRef> {
        let inferred = match &expr.kind {
            ExprKind::Literal(literal) => literal.type_ref(),
            ExprKind::New { type_ref, .. } | ExprKind::Cast { type_ref, .. } => type_ref.clone(),
            ExprKind::List(_) => TypeRef::named("ArrayList"),
            ExprKind::Map(_) => TypeRef::named("LinkedHashMap"),
            ExprKind::Closure(_) => TypeRef::named("Closure"),
            ExprKind::Variable(name) => self.variables.get(name.as_str())?.type_ref.clone(),
            ExprKind::This => TypeRef::named(self.current_class?.name.as_str()),
            ExprKind::MethodCall { receiver, name, .. } => {
                let class = match receiver.as_deref() {
                    None | Some(Expr { kind: ExprKind::This, .. }) => self.current_class?,
                    Some(receiver) => self.class_of(&self.infer(receiver)?)?,
                };
                class.find_method(name)?.return_type.clone()
            }
            _ => return None,
        };
        (!inferred.is_object()).then_some(inferred)
    }
}

fn class_info(class: &ClassInfo) -> TypeInfo {
    let kind = if class.class_type == ClassType::Enum {
        TypeInfoKind::Enum
    } else {
        TypeInfoKind::Class
    };
    let info = TypeInfo::new(class.name.as_str(), class.qualified_name.as_str(), kind)
        .with_modifiers(class.modifiers.display());
    match &class.outer_class {
        Some(outer) => info.with_documentation(format!("Nested class of `{outer}`")),
        None => info,
    }
}
