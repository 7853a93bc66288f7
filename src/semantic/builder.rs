//! Builds the symbol table entries and the scope tree of one parsed file.
//!
//! Both passes walk the same [`ParsedFile`]:
//! - [`collect_definitions`] yields class, method and field definitions
//!   for the workspace-wide [`SymbolTable`]
//! - [`build_scope`] yields a [`ScopeTree`] whose class and method scopes
//!   mirror the declarations, with block and closure scopes for bodies
//!
//! Imports, parameters and local variables only ever live in scopes.

use crate::base::{Range, SourceSpan};
use crate::semantic::error::{BuildError, BuildResult};
use crate::semantic::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::semantic::symbol_table::{SymbolDefinition, SymbolTable};
use crate::syntax::{
    Block, ClassInfo, Expr, ExprKind, MethodInfo, ParameterInfo, ParsedFile, Stmt, StmtKind,
};

/// Replace every definition of `uri` in `table` with those of `parsed`.
///
/// On error the table is left untouched.
pub fn build_symbol_table(parsed: &ParsedFile, uri: &str, table: &mut SymbolTable) -> BuildResult<()> {
    let definitions = collect_definitions(parsed, uri)?;
    table.clear_file(uri);
    tracing::debug!(uri, symbols = definitions.len(), "rebuilt symbol table");
    table.add_all(definitions);
    Ok(())
}

/// Definitions for every class (nested included), method and field of
/// `parsed`.
pub fn collect_definitions(parsed: &ParsedFile, uri: &str) -> BuildResult<Vec<SymbolDefinition>> {
    let converter = SpanConverter { uri };
    let mut definitions = Vec::new();

    for class in parsed.all_classes() {
        definitions.push(converter.class_definition(class)?);

        for field in &class.fields {
            let range = converter.range(&field.name, field.span)?;
            let selection = converter.selection(&field.name, field.name_span, range)?;
            definitions.push(SymbolDefinition::for_field(
                field,
                &class.qualified_name,
                uri,
                range,
                selection,
            ));
        }

        for method in &class.methods {
            definitions.push(converter.method_definition(method, &class.qualified_name)?);
        }
    }

    Ok(definitions)
}

/// Build the scope tree for one file.
///
/// The root spans the whole file and holds the imports and top-level
/// classes; a class declared in the file replaces an import of the same
/// name. Each class scope holds its fields, methods and nested classes;
/// each method scope holds its parameters and body locals.
pub fn build_scope(parsed: &ParsedFile, uri: &str) -> BuildResult<ScopeTree> {
    let mut builder = ScopeBuilder {
        tree: ScopeTree::for_file(),
        converter: SpanConverter { uri },
        owner: String::new(),
    };
    for import in &parsed.imports {
        let range = builder.converter.range(&import.class_name, import.span)?;
        if let Some(definition) = SymbolDefinition::for_import(import, uri, range) {
            builder.tree.add_symbol(ScopeId::ROOT, definition);
        }
    }
    for class in &parsed.classes {
        builder.add_class(ScopeId::ROOT, class)?;
    }
    tracing::debug!(uri, scopes = builder.tree.len(), "rebuilt scope tree");
    Ok(builder.tree)
}

// ============================================================================
// Position conversion
// ============================================================================

struct SpanConverter<'a> {
    uri: &'a str,
}

impl SpanConverter<'_> {
    fn range(&self, name: &str, span: SourceSpan) -> BuildResult<Range> {
        span.to_range().map_err(|source| BuildError::InvalidSpan {
            uri: self.uri.to_string(),
            name: name.to_string(),
            source,
        })
    }

    /// The name token's range, or `fallback` when the model has none.
    fn selection(&self, name: &str, name_span: Option<SourceSpan>, fallback: Range) -> BuildResult<Range> {
        match name_span {
            Some(span) => self.range(name, span),
            None => Ok(fallback),
        }
    }

    fn class_definition(&self, class: &ClassInfo) -> BuildResult<SymbolDefinition> {
        let range = self.range(&class.name, class.span)?;
        let selection = self.selection(&class.name, class.name_span, range)?;
        Ok(SymbolDefinition::for_class(class, self.uri, range, selection))
    }

    fn method_definition(&self, method: &MethodInfo, class_name: &str) -> BuildResult<SymbolDefinition> {
        let range = self.range(&method.name, method.span)?;
        let selection = self.selection(&method.name, method.name_span, range)?;
        Ok(SymbolDefinition::for_method(method, class_name, self.uri, range, selection))
    }

    /// Parameters use their own span; `method_range` covers a model without one.
    fn parameter_definition(
        &self,
        parameter: &ParameterInfo,
        owner: &str,
        method_range: Range,
    ) -> BuildResult<SymbolDefinition> {
        let range = self
            .range(&parameter.name, parameter.span)
            .unwrap_or(method_range);
        let selection = self
            .range(&parameter.name, parameter.name_span)
            .unwrap_or(range);
        Ok(SymbolDefinition::for_parameter(parameter, owner, self.uri, range, selection))
    }

    fn local_definition(&self, name: &str, owner: &str, span: SourceSpan, name_span: SourceSpan) -> BuildResult<SymbolDefinition> {
        let range = self.range(name, span)?;
        let selection = self.range(name, name_span)?;
        Ok(SymbolDefinition::for_local(name, owner, self.uri, range, selection))
    }
}

// ============================================================================
// Scope construction
// ============================================================================

struct ScopeBuilder<'a> {
    tree: ScopeTree,
    converter: SpanConverter<'a>,
    /// Qualified name of the method or field whose body is being walked
    owner: String,
}

impl ScopeBuilder<'_> {
    /// The class symbol goes into `parent`; members go into the class scope.
    fn add_class(&mut self, parent: ScopeId, class: &ClassInfo) -> BuildResult<()> {
        let definition = self.converter.class_definition(class)?;
        let range = definition.range;
        self.tree.add_symbol(parent, definition);

        let scope = self.tree.add_scope(
            parent,
            ScopeKind::Class,
            range,
            Some(class.qualified_name.clone()),
        );

        for field in &class.fields {
            let field_range = self.converter.range(&field.name, field.span)?;
            let selection = self.converter.selection(&field.name, field.name_span, field_range)?;
            self.tree.add_symbol(
                scope,
                SymbolDefinition::for_field(
                    field,
                    &class.qualified_name,
                    self.converter.uri,
                    field_range,
                    selection,
                ),
            );
            if let Some(initializer) = &field.initializer {
                self.owner = format!("{}.{}", class.qualified_name, field.name);
                self.walk_expr(scope, initializer)?;
            }
        }

        for method in &class.methods {
            self.add_method(scope, method, &class.qualified_name)?;
        }

        for inner in &class.inner_classes {
            self.add_class(scope, inner)?;
        }
        Ok(())
    }

    fn add_method(&mut self, class_scope: ScopeId, method: &MethodInfo, class_name: &str) -> BuildResult<()> {
        let definition = self.converter.method_definition(method, class_name)?;
        let range = definition.range;
        let owner = definition.qualified_name.clone();
        self.tree.add_symbol(class_scope, definition);

        let scope = self
            .tree
            .add_scope(class_scope, ScopeKind::Method, range, Some(owner.clone()));
        for parameter in &method.parameters {
            let definition = self.converter.parameter_definition(parameter, &owner, range)?;
            self.tree.add_symbol(scope, definition);
        }

        self.owner = owner;
        if let Some(body) = &method.body {
            self.walk_statements(scope, &body.statements)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Bodies
    // ------------------------------------------------------------------------

    fn walk_statements(&mut self, scope: ScopeId, statements: &[Stmt]) -> BuildResult<()> {
        for stmt in statements {
            self.walk_stmt(scope, stmt)?;
        }
        Ok(())
    }

    fn walk_block(&mut self, parent: ScopeId, block: &Block) -> BuildResult<()> {
        let range = self.converter.range("<block>", block.span)?;
        let scope = self.tree.add_scope(parent, ScopeKind::Block, range, None);
        self.walk_statements(scope, &block.statements)
    }

    fn add_local(&mut self, scope: ScopeId, name: &str, span: SourceSpan, name_span: SourceSpan) -> BuildResult<()> {
        let definition = self
            .converter
            .local_definition(name, &self.owner, span, name_span)?;
        self.tree.add_symbol(scope, definition);
        Ok(())
    }

    fn walk_stmt(&mut self, scope: ScopeId, stmt: &Stmt) -> BuildResult<()> {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => {
                if let Some(initializer) = &decl.initializer {
                    self.walk_expr(scope, initializer)?;
                }
                self.add_local(scope, &decl.name, stmt.span, decl.name_span)
            }
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.walk_expr(scope, expr),
            StmtKind::Return(value) => match value {
                Some(expr) => self.walk_expr(scope, expr),
                None => Ok(()),
            },
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.walk_expr(scope, condition)?;
                self.walk_stmt(scope, then_branch)?;
                match else_branch {
                    Some(branch) => self.walk_stmt(scope, branch),
                    None => Ok(()),
                }
            }
            StmtKind::While { condition, body } => {
                self.walk_expr(scope, condition)?;
                self.walk_stmt(scope, body)
            }
            StmtKind::ForIn {
                variable,
                iterable,
                body,
            } => {
                self.walk_expr(scope, iterable)?;
                let range = self.converter.range(&variable.name, stmt.span)?;
                let loop_scope = self.tree.add_scope(scope, ScopeKind::Block, range, None);
                self.add_local(loop_scope, &variable.name, variable.name_span, variable.name_span)?;
                self.walk_stmt(loop_scope, body)
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                let range = self.converter.range("<for>", stmt.span)?;
                let loop_scope = self.tree.add_scope(scope, ScopeKind::Block, range, None);
                self.walk_statements(loop_scope, init)?;
                if let Some(condition) = condition {
                    self.walk_expr(loop_scope, condition)?;
                }
                for expr in update {
                    self.walk_expr(loop_scope, expr)?;
                }
                self.walk_stmt(loop_scope, body)
            }
            StmtKind::Block(block) => self.walk_block(scope, block),
            StmtKind::TryCatch {
                body,
                catches,
                finally,
            } => {
                self.walk_block(scope, body)?;
                for catch in catches {
                    let param = &catch.parameter;
                    let span = SourceSpan::new(param.span.start, catch.body.span.end);
                    let range = self.converter.range(&param.name, span)?;
                    let catch_scope = self.tree.add_scope(scope, ScopeKind::Block, range, None);
                    self.add_local(catch_scope, &param.name, param.span, param.name_span)?;
                    self.walk_statements(catch_scope, &catch.body.statements)?;
                }
                match finally {
                    Some(block) => self.walk_block(scope, block),
                    None => Ok(()),
                }
            }
            StmtKind::Break | StmtKind::Continue | StmtKind::Empty => Ok(()),
        }
    }

    fn walk_exprs(&mut self, scope: ScopeId, exprs: &[Expr]) -> BuildResult<()> {
        for expr in exprs {
            self.walk_expr(scope, expr)?;
        }
        Ok(())
    }

    fn walk_expr(&mut self, scope: ScopeId, expr: &Expr) -> BuildResult<()> {
        match &expr.kind {
            ExprKind::Closure(closure) => {
                let range = self.converter.range("<closure>", expr.span)?;
                let closure_scope = self.tree.add_scope(scope, ScopeKind::Closure, range, None);
                for parameter in &closure.parameters {
                    let definition =
                        self.converter
                            .parameter_definition(parameter, &self.owner, range)?;
                    self.tree.add_symbol(closure_scope, definition);
                }
                self.walk_statements(closure_scope, &closure.body)
            }
            ExprKind::New { args, .. } => self.walk_exprs(scope, args),
            ExprKind::MethodCall { receiver, args, .. } => {
                if let Some(receiver) = receiver {
                    self.walk_expr(scope, receiver)?;
                }
                self.walk_exprs(scope, args)
            }
            ExprKind::Property { receiver, .. } => self.walk_expr(scope, receiver),
            ExprKind::Index { target, index } => {
                self.walk_expr(scope, target)?;
                self.walk_expr(scope, index)
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.walk_expr(scope, lhs)?;
                self.walk_expr(scope, rhs)
            }
            ExprKind::Unary { operand, .. } => self.walk_expr(scope, operand),
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                self.walk_expr(scope, condition)?;
                self.walk_expr(scope, then_expr)?;
                self.walk_expr(scope, else_expr)
            }
            ExprKind::Elvis { value, fallback } => {
                self.walk_expr(scope, value)?;
                self.walk_expr(scope, fallback)
            }
            ExprKind::Assign { target, value, .. } => {
                self.walk_expr(scope, target)?;
                self.walk_expr(scope, value)
            }
            ExprKind::Cast { expr, .. } => self.walk_expr(scope, expr),
            ExprKind::Range { from, to, .. } => {
                self.walk_expr(scope, from)?;
                self.walk_expr(scope, to)
            }
            ExprKind::List(items) => self.walk_exprs(scope, items),
            ExprKind::Map(entries) => {
                for entry in entries {
                    self.walk_expr(scope, &entry.key)?;
                    self.walk_expr(scope, &entry.value)?;
                }
                Ok(())
            }
            ExprKind::Literal(_)
            | ExprKind::Variable(_)
            | ExprKind::This
            | ExprKind::Super
            | ExprKind::Error => Ok(()),
        }
    }
}
