//! Compilation unit, type declarations and class members.

use smol_str::SmolStr;
use text_size::TextSize;

use super::types::DeclPrefix;
use crate::base::SourceSpan;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::syntax::{
    Block, ClassInfo, ClassType, FieldInfo, ImportInfo, MethodInfo, Modifiers, ParameterInfo,
    Stmt, TypeRef,
};

/// Loose top-level code collected into the implicit script class.
#[derive(Default)]
struct ScriptParts {
    methods: Vec<MethodInfo>,
    statements: Vec<Stmt>,
}

impl Parser<'_> {
    /// CompilationUnit = Package? (Import | TypeDecl | Method | Statement)*
    pub(crate) fn parse_compilation_unit(&mut self) {
        let mut script = ScriptParts::default();

        loop {
            self.skip_separators();
            if self.at_eof() {
                break;
            }

            let before = self.position();
            self.parse_top_level_item(&mut script);
            if self.position() == before {
                self.bump_with_error(format!("unexpected '{}'", self.current_text()));
            }
        }

        if !script.methods.is_empty() || !script.statements.is_empty() {
            let class = self.finish_script_class(script);
            self.file.classes.push(class);
        }
    }

    fn parse_top_level_item(&mut self, script: &mut ScriptParts) {
        match self.current_kind() {
            TokenKind::PackageKw => {
                self.parse_package();
                return;
            }
            TokenKind::ImportKw => {
                self.parse_import();
                return;
            }
            _ => {}
        }

        let start = self.start();
        let prefix = self.parse_decl_prefix();

        if self.at_type_declaration_keyword() {
            let package = self.file.package_name.clone();
            if let Some(class) = self.parse_type_declaration(start, prefix, package.as_deref(), None) {
                self.file.classes.push(class);
            }
            return;
        }

        if self.at_method_header(!prefix.is_empty()) {
            let method = self.parse_method(start, prefix, ClassType::Script, None);
            script.methods.push(method);
            self.finish_statement();
            return;
        }

        let statements = if prefix.is_empty() {
            self.parse_statement()
        } else {
            self.parse_statement_after_prefix(start, prefix)
        };
        script.statements.extend(statements);
        self.finish_statement();
    }

    /// `package com.example.app`
    fn parse_package(&mut self) {
        self.bump();
        match self.parse_qualified_name() {
            Some(name) => self.file.package_name = Some(name),
            None => self.error("expected package name"),
        }
        self.finish_statement();
    }

    /// `import [static] a.b.C[.*] [as Alias]`
    fn parse_import(&mut self) {
        let start = self.start();
        self.bump();
        let is_static = self.eat(TokenKind::StaticKw);

        let Some((first, _)) = self.expect_ident("import name") else {
            self.recover_statement();
            return;
        };
        let mut class_name = first.to_string();
        let mut is_wildcard = false;
        while self.at(TokenKind::Dot) {
            self.bump();
            if self.eat(TokenKind::Star) {
                is_wildcard = true;
                break;
            }
            match self.expect_ident("import name") {
                Some((part, _)) => {
                    class_name.push('.');
                    class_name.push_str(&part);
                }
                None => break,
            }
        }

        let alias = if self.eat(TokenKind::AsKw) {
            self.expect_ident("import alias").map(|(name, _)| name)
        } else {
            None
        };

        self.file.imports.push(ImportInfo {
            class_name,
            alias,
            is_static,
            is_wildcard,
            span: self.span_from(start),
        });
        self.finish_statement();
    }

    /// `a.b.c`
    pub(crate) fn parse_qualified_name(&mut self) -> Option<String> {
        if !self.at(TokenKind::Ident) {
            return None;
        }
        let mut name = String::from(self.current_text());
        self.bump();
        while self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Ident {
            self.bump();
            name.push('.');
            name.push_str(self.current_text());
            self.bump();
        }
        Some(name)
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    pub(crate) fn at_type_declaration_keyword(&self) -> bool {
        match self.current_kind() {
            TokenKind::ClassKw | TokenKind::InterfaceKw | TokenKind::EnumKw | TokenKind::TraitKw => {
                true
            }
            TokenKind::At => self.nth(1) == TokenKind::InterfaceKw,
            _ => false,
        }
    }

    /// `class`/`interface`/`enum`/`trait`/`@interface` declaration.
    ///
    /// `outer` is the qualified name of the enclosing class for nested types.
    pub(crate) fn parse_type_declaration(
        &mut self,
        start: TextSize,
        prefix: DeclPrefix,
        package: Option<&str>,
        outer: Option<&str>,
    ) -> Option<ClassInfo> {
        let class_type = match self.current_kind() {
            TokenKind::InterfaceKw => ClassType::Interface,
            TokenKind::EnumKw => ClassType::Enum,
            TokenKind::TraitKw => ClassType::Trait,
            TokenKind::At => {
                self.bump();
                ClassType::Annotation
            }
            _ => ClassType::Class,
        };
        self.bump();

        let Some((name, name_span)) = self.expect_ident("type name") else {
            self.recover_statement();
            if self.at(TokenKind::LBrace) {
                self.skip_balanced_nested();
            }
            return None;
        };

        let qualified_name = match (outer, package) {
            (Some(outer), _) => format!("{outer}.{name}"),
            (None, Some(package)) => format!("{package}.{name}"),
            (None, None) => name.to_string(),
        };

        self.skip_type_parameters();

        let mut super_types = Vec::new();
        let mut interfaces = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::ExtendsKw) {
                super_types.extend(self.parse_type_list());
            } else if self.eat(TokenKind::ImplementsKw) {
                interfaces.extend(self.parse_type_list());
            } else {
                break;
            }
        }

        let mut class = ClassInfo {
            name,
            qualified_name,
            class_type,
            span: name_span,
            name_span: Some(name_span),
            methods: Vec::new(),
            fields: Vec::new(),
            super_types,
            interfaces,
            modifiers: default_class_modifiers(class_type, prefix.modifiers),
            inner_classes: Vec::new(),
            outer_class: outer.map(str::to_string),
            annotations: prefix.annotations,
        };

        if self.expect(TokenKind::LBrace, "'{'") {
            self.parse_class_body(&mut class, package);
            self.expect(TokenKind::RBrace, "'}'");
        }
        class.span = self.span_from(start);

        tracing::trace!(class = %class.qualified_name, "parsed type declaration");
        Some(class)
    }

    fn parse_type_list(&mut self) -> Vec<TypeRef> {
        let mut types = Vec::new();
        loop {
            match self.parse_type() {
                Some(ty) => types.push(ty),
                None => {
                    self.error("expected type name");
                    break;
                }
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        types
    }

    fn parse_class_body(&mut self, class: &mut ClassInfo, package: Option<&str>) {
        if class.class_type == ClassType::Enum {
            self.parse_enum_constants(class);
        }

        loop {
            self.skip_separators();
            if self.at(TokenKind::RBrace) || self.at_eof() {
                break;
            }

            let before = self.position();
            self.parse_member(class, package);
            if self.position() == before {
                self.bump_with_error(format!("unexpected '{}' in class body", self.current_text()));
                continue;
            }
            self.finish_statement();
        }
    }

    /// `RED, GREEN('g'), BLUE { ... };`
    fn parse_enum_constants(&mut self, class: &mut ClassInfo) {
        loop {
            self.skip_newlines();
            while self.parse_annotation().is_some() {
                self.skip_newlines();
            }
            if !self.at_enum_constant() {
                break;
            }

            let start = self.start();
            let Some((name, name_span)) = self.expect_ident("enum constant") else {
                break;
            };
            if self.at(TokenKind::LParen) {
                self.skip_balanced_nested();
            }
            if self.at(TokenKind::LBrace) {
                self.skip_balanced_nested();
            }

            class.fields.push(FieldInfo {
                name,
                type_ref: TypeRef::named(class.name.clone()),
                span: self.span_from(start),
                name_span: Some(name_span),
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
                initializer: None,
                is_enum_constant: true,
                is_property: false,
            });

            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.skip_newlines();
        self.eat(TokenKind::Semicolon);
    }

    fn at_enum_constant(&self) -> bool {
        self.at(TokenKind::Ident)
            && matches!(
                self.nth_raw(1),
                TokenKind::Comma
                    | TokenKind::Semicolon
                    | TokenKind::LParen
                    | TokenKind::LBrace
                    | TokenKind::RBrace
                    | TokenKind::Newline
                    | TokenKind::Eof
            )
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Field, method, constructor, nested type or initializer block.
    fn parse_member(&mut self, class: &mut ClassInfo, package: Option<&str>) {
        let start = self.start();
        let prefix = self.parse_decl_prefix();

        if self.at_type_declaration_keyword() {
            let outer = class.qualified_name.clone();
            if let Some(inner) = self.parse_type_declaration(start, prefix, package, Some(&outer)) {
                class.inner_classes.push(inner);
            }
            return;
        }

        // static or instance initializer
        if self.at(TokenKind::LBrace) {
            self.skip_balanced_nested();
            return;
        }

        if self.at(TokenKind::Ident)
            && class.name == self.current_text()
            && self.nth(1) == TokenKind::LParen
        {
            let method = self.parse_method(start, prefix, class.class_type, Some(&class.name));
            class.methods.push(method);
            return;
        }

        self.skip_type_parameters();

        if self.at(TokenKind::Ident) && self.nth(1) == TokenKind::LParen {
            let method = self.parse_method(start, prefix, class.class_type, None);
            class.methods.push(method);
            return;
        }

        if self.at_method_header(true) {
            let method = self.parse_method(start, prefix, class.class_type, None);
            class.methods.push(method);
            return;
        }

        let fields = self.parse_field_declarators(start, prefix, class.class_type);
        class.fields.extend(fields);
    }

    /// Is the upcoming text `[<T>] [Type] name (`?
    ///
    /// Without a modifier prefix only a type-like name qualifies, so that
    /// `foo(1)` and `println(x)` stay calls.
    pub(crate) fn at_method_header(&mut self, has_prefix: bool) -> bool {
        self.lookahead(|p| {
            let had_type_params = p.at(TokenKind::Lt);
            p.skip_type_parameters();
            if p.at(TokenKind::Ident) && p.nth(1) == TokenKind::LParen {
                return has_prefix || had_type_params;
            }
            if !has_prefix && !p.at_type_like_name() {
                return false;
            }
            if p.parse_type().is_none() {
                return false;
            }
            if !(p.at(TokenKind::Ident) && p.nth(1) == TokenKind::LParen) {
                return false;
            }
            // `Type name(...)` followed by a body or a declaration end
            p.bump();
            p.skip_balanced_nested();
            matches!(
                p.nth(0),
                TokenKind::LBrace
                    | TokenKind::ThrowsKw
                    | TokenKind::DefaultKw
                    | TokenKind::Semicolon
                    | TokenKind::RBrace
                    | TokenKind::Eof
            ) || p.at_statement_end()
        })
    }

    /// Method or constructor, positioned at the return type or name.
    ///
    /// `constructor_of` is the class name when parsing a constructor.
    pub(crate) fn parse_method(
        &mut self,
        start: TextSize,
        prefix: DeclPrefix,
        class_type: ClassType,
        constructor_of: Option<&str>,
    ) -> MethodInfo {
        self.skip_type_parameters();

        let is_constructor = constructor_of.is_some();
        let return_type = if is_constructor {
            TypeRef::named("void")
        } else if self.at(TokenKind::Ident) && self.nth(1) != TokenKind::LParen {
            self.parse_type().unwrap_or_default()
        } else {
            TypeRef::dynamic()
        };

        let (name, name_span) = self
            .expect_ident("method name")
            .unwrap_or_else(|| (SmolStr::new_static("<missing>"), self.span_from(start)));

        let parameters = if self.at(TokenKind::LParen) {
            self.parse_parameter_list()
        } else {
            self.error("expected '('");
            Vec::new()
        };

        if self.eat(TokenKind::ThrowsKw) {
            self.parse_type_list();
        }
        // annotation member default value
        if self.eat(TokenKind::DefaultKw) {
            self.parse_expression();
        }

        if self.nth(0) == TokenKind::LBrace {
            self.skip_newlines();
        }
        let body: Option<Block> = self.at(TokenKind::LBrace).then(|| self.parse_block());

        let modifiers = default_method_modifiers(class_type, prefix.modifiers, body.is_some());

        MethodInfo {
            name,
            return_type,
            parameters,
            span: self.span_from(start),
            name_span: Some(name_span),
            modifiers,
            is_constructor,
            annotations: prefix.annotations,
            body,
        }
    }

    /// `(Type a, def b = 1, String... rest)`
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<ParameterInfo> {
        self.nested(|p| {
            p.bump();
            let mut params = Vec::new();
            if p.eat(TokenKind::RParen) {
                return params;
            }
            loop {
                match p.parse_parameter() {
                    Some(param) => params.push(param),
                    None => p.skip_until(&[TokenKind::Comma, TokenKind::RParen, TokenKind::LBrace]),
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
            params
        })
    }

    /// One method or closure parameter.
    pub(crate) fn parse_parameter(&mut self) -> Option<ParameterInfo> {
        let start = self.start();
        let prefix = self.parse_decl_prefix();

        let mut type_ref = TypeRef::dynamic();
        if !prefix.has_def
            && self.at(TokenKind::Ident)
            && matches!(
                self.nth(1),
                TokenKind::Ident
                    | TokenKind::Lt
                    | TokenKind::Dot
                    | TokenKind::LBracket
                    | TokenKind::Ellipsis
            )
        {
            match self.parse_type() {
                Some(ty) => type_ref = ty,
                None => {
                    self.error("expected parameter type");
                    return None;
                }
            }
        }

        let is_var_arg = self.eat(TokenKind::Ellipsis);
        if is_var_arg {
            type_ref.array_dims = type_ref.array_dims.saturating_add(1);
        }

        let (name, name_span) = self.expect_ident("parameter name")?;
        let default_value = self.eat(TokenKind::Eq).then(|| self.parse_expression());

        Some(ParameterInfo {
            name,
            type_ref,
            default_value,
            is_var_arg,
            span: self.span_from(start),
            name_span,
        })
    }

    /// Skip tokens until one of `stops` (not consumed) or end of input.
    pub(crate) fn skip_until(&mut self, stops: &[TokenKind]) {
        while !self.at_eof() && !self.at_any(stops) {
            if matches!(
                self.current_kind(),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
            ) {
                self.skip_balanced_nested();
            } else {
                self.bump();
            }
        }
    }

    /// `[Type] a = 1, b` after the prefix; one [`FieldInfo`] per declarator.
    fn parse_field_declarators(
        &mut self,
        start: TextSize,
        prefix: DeclPrefix,
        class_type: ClassType,
    ) -> Vec<FieldInfo> {
        let type_ref = if !prefix.has_def
            && self.at(TokenKind::Ident)
            && matches!(
                self.nth(1),
                TokenKind::Ident | TokenKind::Lt | TokenKind::Dot | TokenKind::LBracket
            ) {
            self.parse_type().unwrap_or_default()
        } else {
            TypeRef::dynamic()
        };

        let is_property = !prefix.modifiers.has_visibility() && class_type != ClassType::Interface;
        let modifiers = default_field_modifiers(class_type, prefix.modifiers);

        let mut fields = Vec::new();
        loop {
            let Some((name, name_span)) = self.expect_ident("field name") else {
                self.recover_statement();
                break;
            };
            let initializer = self.eat(TokenKind::Eq).then(|| self.parse_expression());

            let span = if fields.is_empty() {
                self.span_from(start)
            } else {
                SourceSpan::new(name_span.start, self.span_from(start).end)
            };
            fields.push(FieldInfo {
                name,
                type_ref: type_ref.clone(),
                span,
                name_span: Some(name_span),
                modifiers,
                initializer,
                is_enum_constant: false,
                is_property,
            });

            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        fields
    }

    // =========================================================================
    // Scripts
    // =========================================================================

    fn finish_script_class(&mut self, script: ScriptParts) -> ClassInfo {
        let span = self.span_of_input();
        let mut methods = script.methods;

        if !script.statements.is_empty() {
            let body_span = match (script.statements.first(), script.statements.last()) {
                (Some(first), Some(last)) => SourceSpan::new(first.span.start, last.span.end),
                _ => span,
            };
            methods.push(MethodInfo {
                name: SmolStr::new_static("run"),
                return_type: TypeRef::dynamic(),
                parameters: Vec::new(),
                span: body_span,
                name_span: None,
                modifiers: Modifiers::PUBLIC,
                is_constructor: false,
                annotations: Vec::new(),
                body: Some(Block {
                    statements: script.statements,
                    span: body_span,
                }),
            });
        }

        let name = self.script_name.clone();
        let qualified_name = match &self.file.package_name {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        };

        ClassInfo {
            name,
            qualified_name,
            class_type: ClassType::Script,
            span,
            name_span: None,
            methods,
            fields: Vec::new(),
            super_types: vec![TypeRef::named("groovy.lang.Script")],
            interfaces: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            inner_classes: Vec::new(),
            outer_class: None,
            annotations: Vec::new(),
        }
    }
}

// ============================================================================
// Implicit modifiers
// ============================================================================

fn default_class_modifiers(class_type: ClassType, declared: Modifiers) -> Modifiers {
    let mut modifiers = declared;
    if !declared.has_visibility() {
        modifiers.insert(Modifiers::PUBLIC);
    }
    match class_type {
        ClassType::Interface | ClassType::Annotation | ClassType::Trait => {
            modifiers.insert(Modifiers::ABSTRACT)
        }
        ClassType::Enum => modifiers.insert(Modifiers::FINAL),
        ClassType::Class | ClassType::Script => {}
    }
    modifiers
}

fn default_method_modifiers(class_type: ClassType, declared: Modifiers, has_body: bool) -> Modifiers {
    let mut modifiers = declared;
    if !declared.has_visibility() {
        modifiers.insert(Modifiers::PUBLIC);
    }
    if class_type == ClassType::Interface && !has_body && !declared.is_static() {
        modifiers.insert(Modifiers::ABSTRACT);
    }
    modifiers
}

/// Fields without visibility are properties, backed by a private field.
fn default_field_modifiers(class_type: ClassType, declared: Modifiers) -> Modifiers {
    let mut modifiers = declared;
    if class_type == ClassType::Interface {
        modifiers.insert(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL);
    } else if !declared.has_visibility() {
        modifiers.insert(Modifiers::PRIVATE);
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use crate::base::SourceSpan;
    use crate::parser::parse_groovy;
    use crate::syntax::{ClassType, Modifiers};

    #[test]
    fn test_package_and_imports() {
        let file = parse_groovy(
            "Test",
            "package com.example\n\nimport java.util.List\nimport static java.lang.Math.*\nimport java.util.concurrent.ConcurrentHashMap as CHM\n",
        );
        assert_eq!(file.package_name.as_deref(), Some("com.example"));
        assert_eq!(file.imports.len(), 3);
        assert_eq!(file.imports[0].class_name, "java.util.List");
        assert!(file.imports[1].is_static);
        assert!(file.imports[1].is_wildcard);
        assert_eq!(file.imports[1].class_name, "java.lang.Math");
        assert_eq!(file.imports[2].alias.as_deref(), Some("CHM"));
        assert!(file.classes.is_empty());
    }

    #[test]
    fn test_class_with_members() {
        let source = "package com.example\n\nclass TestClass {\n    String name\n\n    void testMethod() {\n        println 'test'\n    }\n}\n";
        let file = parse_groovy("Test", source);
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);

        let class = &file.classes[0];
        assert_eq!(class.name, "TestClass");
        assert_eq!(class.qualified_name, "com.example.TestClass");
        assert_eq!(class.class_type, ClassType::Class);
        assert_eq!(class.span, SourceSpan::from_coords(3, 1, 9, 2));
        assert_eq!(class.name_span, Some(SourceSpan::from_coords(3, 7, 3, 16)));

        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.fields[0].name, "name");
        assert!(class.fields[0].is_property);
        assert!(class.fields[0].modifiers.contains(Modifiers::PRIVATE));

        let method = &class.methods[0];
        assert_eq!(method.name, "testMethod");
        assert_eq!(method.span, SourceSpan::from_coords(6, 5, 8, 6));
        assert_eq!(method.name_span, Some(SourceSpan::from_coords(6, 10, 6, 20)));
        assert!(method.modifiers.contains(Modifiers::PUBLIC));
    }

    #[test]
    fn test_extends_and_implements() {
        let file = parse_groovy(
            "Test",
            "class Dog extends Animal implements Comparable<Dog>, Serializable {}",
        );
        let class = &file.classes[0];
        assert_eq!(class.super_types[0].name, "Animal");
        assert_eq!(class.interfaces.len(), 2);
        assert_eq!(class.interfaces[0].display_name(), "Comparable<Dog>");
    }

    #[test]
    fn test_constructor_and_parameters() {
        let source = "class Point {\n  int x\n  Point(int x, int y = 0) { this.x = x }\n}";
        let file = parse_groovy("Test", source);
        let class = &file.classes[0];
        let ctor = class.constructors().next().unwrap();
        assert_eq!(ctor.parameters.len(), 2);
        assert!(ctor.parameters[1].default_value.is_some());
        assert_eq!(ctor.constructor_signature("Point"), "Point(int x, int y)");
    }

    #[test]
    fn test_varargs_parameter() {
        let file = parse_groovy("Test", "class A {\n  def log(String... parts) {}\n}");
        let param = &file.classes[0].methods[0].parameters[0];
        assert!(param.is_var_arg);
        assert_eq!(param.type_ref.display_name(), "String[]");
    }

    #[test]
    fn test_enum_constants() {
        let file = parse_groovy("Test", "enum Color {\n  RED, GREEN,\n  BLUE\n\n  String hex\n}");
        let class = &file.classes[0];
        assert_eq!(class.class_type, ClassType::Enum);
        let names: Vec<_> = class.enum_constants().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["RED", "GREEN", "BLUE"]);
        assert!(class.fields[0].is_static());
        assert_eq!(class.fields[3].name, "hex");
        assert!(!class.fields[3].is_enum_constant);
    }

    #[test]
    fn test_nested_class() {
        let file = parse_groovy(
            "Test",
            "package p\nclass Outer {\n  static class Inner {\n    int v\n  }\n}",
        );
        let outer = &file.classes[0];
        assert_eq!(outer.inner_classes.len(), 1);
        let inner = &outer.inner_classes[0];
        assert_eq!(inner.qualified_name, "p.Outer.Inner");
        assert_eq!(inner.outer_class.as_deref(), Some("p.Outer"));
        assert_eq!(file.all_classes().len(), 2);
    }

    #[test]
    fn test_interface_methods_are_abstract() {
        let file = parse_groovy("Test", "interface Shape {\n  double area()\n}");
        let class = &file.classes[0];
        assert_eq!(class.class_type, ClassType::Interface);
        let method = &class.methods[0];
        assert!(method.body.is_none());
        assert!(method.modifiers.contains(Modifiers::ABSTRACT));
    }

    #[test]
    fn test_annotations_and_annotation_type() {
        let file = parse_groovy(
            "Test",
            "@interface Marker {\n  String value() default 'x'\n}\n@groovy.transform.ToString\nclass A {\n  @Override\n  String toString() { 'a' }\n}",
        );
        assert_eq!(file.classes[0].class_type, ClassType::Annotation);
        let class = &file.classes[1];
        assert_eq!(class.annotations, ["ToString"]);
        assert_eq!(class.methods[0].annotations, ["Override"]);
    }

    #[test]
    fn test_script_class() {
        let source = "def greet(name) {\n  \"Hello $name\"\n}\n\ndef x = 1\nprintln greet('bob')\n";
        let file = parse_groovy("hello", source);
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let script = &file.classes[0];
        assert_eq!(script.class_type, ClassType::Script);
        assert_eq!(script.name, "hello");
        let names: Vec<_> = script.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["greet", "run"]);
        assert_eq!(script.methods[1].body.as_ref().unwrap().statements.len(), 2);
    }

    #[test]
    fn test_script_class_is_last() {
        let file = parse_groovy("main", "println 'start'\nclass Helper {}\n");
        assert_eq!(file.classes[0].name, "Helper");
        assert_eq!(file.classes[1].class_type, ClassType::Script);
    }

    #[test]
    fn test_recovers_after_bad_member() {
        let source = "class A {\n  int x = )\n  void ok() {}\n}";
        let file = parse_groovy("Test", source);
        assert!(!file.diagnostics.is_empty());
        let class = &file.classes[0];
        assert!(class.methods.iter().any(|m| m.name == "ok"));
    }

    #[test]
    fn test_multiple_field_declarators() {
        let file = parse_groovy("Test", "class A {\n  private int a = 1, b\n}");
        let fields = &file.classes[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name, "b");
        assert_eq!(fields[1].type_ref.name, "int");
        assert!(!fields[0].is_property);
    }
}
