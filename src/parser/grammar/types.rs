//! Type references, annotations and modifier lists.

use smol_str::SmolStr;

use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::syntax::{Modifiers, TypeRef};

const PRIMITIVE_NAMES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Modifiers and annotations collected before a declaration.
#[derive(Debug, Default)]
pub(crate) struct DeclPrefix {
    pub modifiers: Modifiers,
    pub annotations: Vec<SmolStr>,
    /// `def` was present, so the declared type is dynamic.
    pub has_def: bool,
}

impl DeclPrefix {
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.annotations.is_empty() && !self.has_def
    }
}

impl Parser<'_> {
    /// Parse a type such as `java.util.List<String>[]`.
    ///
    /// Returns `None` without reporting when the current token cannot start a type.
    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
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

        let mut type_ref = TypeRef::named(name);
        if self.at(TokenKind::Lt) {
            type_ref.generics = self.parse_type_arguments()?;
        }
        type_ref.array_dims = self.parse_array_dims();
        Some(type_ref)
    }

    /// `<A, B<C>, ? extends D>`; wildcards become their bound (or `Object`).
    fn parse_type_arguments(&mut self) -> Option<Vec<TypeRef>> {
        self.nested(|p| {
            p.bump();
            let mut args = Vec::new();
            // diamond `<>`
            if p.eat(TokenKind::Gt) {
                return Some(args);
            }
            loop {
                if p.eat(TokenKind::Question) {
                    if p.at(TokenKind::ExtendsKw) || p.at(TokenKind::SuperKw) {
                        p.bump();
                        args.push(p.parse_type()?);
                    } else {
                        args.push(TypeRef::named("Object"));
                    }
                } else {
                    args.push(p.parse_type()?);
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.eat(TokenKind::Gt).then_some(args)
        })
    }

    fn parse_array_dims(&mut self) -> u8 {
        let mut dims = 0u8;
        while self.at(TokenKind::LBracket) && self.nth(1) == TokenKind::RBracket {
            self.bump();
            self.bump();
            dims = dims.saturating_add(1);
        }
        dims
    }

    /// Skip a generic parameter declaration such as `<T extends Comparable<T>>`.
    pub(crate) fn skip_type_parameters(&mut self) {
        if !self.at(TokenKind::Lt) {
            return;
        }
        self.nested(|p| {
            let mut depth = 0usize;
            loop {
                match p.current_kind() {
                    TokenKind::Lt => depth += 1,
                    TokenKind::Gt => depth = depth.saturating_sub(1),
                    TokenKind::Eof | TokenKind::LBrace => return,
                    _ => {}
                }
                p.bump();
                if depth == 0 {
                    return;
                }
            }
        });
    }

    /// True when the current identifier is conventionally a type rather
    /// than a variable: a primitive, a capitalised (possibly qualified) name,
    /// or a name followed by `<` or `[]`.
    ///
    /// This separates `String name` declarations from `println name` calls.
    pub(crate) fn at_type_like_name(&self) -> bool {
        if !self.at(TokenKind::Ident) {
            return false;
        }
        let mut n = 0;
        while self.nth(n + 1) == TokenKind::Dot && self.nth(n + 2) == TokenKind::Ident {
            n += 2;
        }
        let last = self.nth_token(n).text;
        if n == 0 && PRIMITIVE_NAMES.contains(&last) {
            return true;
        }
        if last.chars().next().is_some_and(char::is_uppercase) {
            return true;
        }
        match self.nth(n + 1) {
            TokenKind::Lt => true,
            TokenKind::LBracket => self.nth(n + 2) == TokenKind::RBracket,
            _ => false,
        }
    }

    // =========================================================================
    // Annotations and modifiers
    // =========================================================================

    /// `@Name`, `@pkg.Name(...)`; returns the simple annotation name.
    pub(crate) fn parse_annotation(&mut self) -> Option<SmolStr> {
        if !self.at(TokenKind::At) || self.nth(1) == TokenKind::InterfaceKw {
            return None;
        }
        self.bump();
        let mut name = self.expect_ident("annotation name")?.0;
        while self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Ident {
            self.bump();
            name = SmolStr::new(self.current_text());
            self.bump();
        }
        if self.at(TokenKind::LParen) {
            self.skip_balanced_nested();
        }
        Some(name)
    }

    /// Skip a bracketed group at the (possibly newline-prefixed) current token.
    pub(crate) fn skip_balanced_nested(&mut self) {
        self.sync_to_current();
        self.skip_balanced();
    }

    /// Annotations, modifiers and `def`, in any order.
    pub(crate) fn parse_decl_prefix(&mut self) -> DeclPrefix {
        let mut prefix = DeclPrefix::default();
        loop {
            if self.at(TokenKind::At) && self.nth(1) != TokenKind::InterfaceKw {
                if let Some(name) = self.parse_annotation() {
                    prefix.annotations.push(name);
                }
                self.skip_newlines();
                continue;
            }
            let modifier = match self.current_kind() {
                TokenKind::PublicKw => Modifiers::PUBLIC,
                TokenKind::PrivateKw => Modifiers::PRIVATE,
                TokenKind::ProtectedKw => Modifiers::PROTECTED,
                TokenKind::StaticKw => Modifiers::STATIC,
                TokenKind::FinalKw => Modifiers::FINAL,
                TokenKind::AbstractKw => Modifiers::ABSTRACT,
                TokenKind::SynchronizedKw if self.nth(1) != TokenKind::LParen => {
                    Modifiers::SYNCHRONIZED
                }
                TokenKind::TransientKw => Modifiers::TRANSIENT,
                TokenKind::VolatileKw => Modifiers::VOLATILE,
                TokenKind::NativeKw => Modifiers::NATIVE,
                TokenKind::DefaultKw if self.nth(1) != TokenKind::Colon => Modifiers::NONE,
                TokenKind::DefKw | TokenKind::VarKw => {
                    prefix.has_def = true;
                    self.bump();
                    continue;
                }
                _ => break,
            };
            prefix.modifiers.insert(modifier);
            self.bump();
        }
        prefix
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_groovy;
    use crate::syntax::TypeRef;

    fn field_type(source: &str) -> TypeRef {
        let file = parse_groovy("Test", source);
        file.classes[0].fields[0].type_ref.clone()
    }

    #[test]
    fn test_generic_field_type() {
        let ty = field_type("class A {\n  Map<String, List<Integer>> data\n}");
        assert_eq!(ty.display_name(), "Map<String, List<Integer>>");
    }

    #[test]
    fn test_array_field_type() {
        let ty = field_type("class A {\n  int[][] grid\n}");
        assert_eq!(ty.array_dims, 2);
        assert_eq!(ty.display_name(), "int[][]");
    }

    #[test]
    fn test_qualified_field_type() {
        let ty = field_type("class A {\n  java.util.concurrent.atomic.AtomicLong counter\n}");
        assert_eq!(ty.name, "java.util.concurrent.atomic.AtomicLong");
        assert_eq!(ty.display_name(), "AtomicLong");
    }

    #[test]
    fn test_wildcard_generic() {
        let ty = field_type("class A {\n  List<? extends Number> nums\n}");
        assert_eq!(ty.display_name(), "List<Number>");
    }
}
