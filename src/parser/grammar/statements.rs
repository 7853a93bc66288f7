//! Statements and blocks.

use text_size::TextSize;

use super::types::DeclPrefix;
use crate::base::SourceSpan;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::syntax::{
    Block, CatchClause, Expr, ExprKind, Literal, MapEntry, ParameterInfo, Stmt, StmtKind, TypeRef,
    VarDecl,
};

impl Parser<'_> {
    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Block {
        self.sync_to_current();
        self.unnested(|p| {
            let start = p.start();
            p.expect(TokenKind::LBrace, "'{'");
            let statements = p.parse_statements_until_rbrace();
            p.expect(TokenKind::RBrace, "'}'");
            Block {
                statements,
                span: p.span_from(start),
            }
        })
    }

    /// Statements up to (not including) the closing `}`.
    pub(crate) fn parse_statements_until_rbrace(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            if self.at(TokenKind::RBrace) || self.at_eof() {
                break;
            }
            let before = self.position();
            statements.extend(self.parse_statement());
            if self.position() == before {
                self.bump_with_error(format!("unexpected '{}'", self.current_text()));
                continue;
            }
            self.finish_statement();
        }
        statements
    }

    /// One source statement.
    ///
    /// Returns several nodes for `int a = 1, b = 2` and none for constructs
    /// that carry nothing worth keeping, such as a local class.
    pub(crate) fn parse_statement(&mut self) -> Vec<Stmt> {
        let start = self.start();
        let stmt = match self.current_kind() {
            TokenKind::LBrace => {
                let block = self.parse_block();
                StmtKind::Block(block)
            }
            TokenKind::IfKw => self.parse_if(),
            TokenKind::WhileKw => self.parse_while(),
            TokenKind::DoKw => self.parse_do_while(),
            TokenKind::ForKw => self.parse_for(),
            TokenKind::TryKw => self.parse_try(),
            TokenKind::SwitchKw => self.parse_switch(),
            TokenKind::ReturnKw => {
                self.bump();
                let value = (!self.at_statement_end()).then(|| self.parse_expression());
                StmtKind::Return(value)
            }
            TokenKind::ThrowKw => {
                self.bump();
                StmtKind::Throw(self.parse_expression())
            }
            TokenKind::BreakKw | TokenKind::ContinueKw => {
                let kind = self.current_kind();
                self.bump();
                // optional label on the same line
                if self.nth_raw(0) == TokenKind::Ident {
                    self.bump();
                }
                if kind == TokenKind::BreakKw {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                }
            }
            TokenKind::AssertKw => return self.parse_assert(start),
            TokenKind::SynchronizedKw if self.nth(1) == TokenKind::LParen => {
                self.bump();
                let lock = self.parse_parenthesized();
                let body = self.parse_block();
                let span = self.span_from(start);
                return vec![
                    Stmt::new(StmtKind::Expr(lock), span),
                    Stmt::new(StmtKind::Block(body), span),
                ];
            }
            TokenKind::Ident if self.nth_raw(1) == TokenKind::Colon => {
                // `outer:` loop labels and Spock `given:` blocks
                self.bump();
                self.bump();
                self.skip_separators();
                if self.at(TokenKind::RBrace) || self.at_eof() {
                    return Vec::new();
                }
                return self.parse_statement();
            }
            _ => {
                let prefix = self.parse_decl_prefix();
                if self.at_type_declaration_keyword() {
                    // local classes are not indexed
                    let package = self.file.package_name.clone();
                    self.parse_type_declaration(start, prefix, package.as_deref(), None);
                    return Vec::new();
                }
                return self.parse_statement_after_prefix(start, prefix);
            }
        };
        vec![Stmt::new(stmt, self.span_from(start))]
    }

    /// A statement whose modifiers and annotations were already consumed.
    pub(crate) fn parse_statement_after_prefix(
        &mut self,
        start: TextSize,
        prefix: DeclPrefix,
    ) -> Vec<Stmt> {
        if prefix.has_def && self.at(TokenKind::LParen) {
            return self.parse_multiple_assignment(start);
        }

        if !prefix.is_empty() {
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
            return self.parse_var_declarators(start, type_ref);
        }

        if self.at_local_declaration() {
            let type_ref = self.parse_type().unwrap_or_default();
            return self.parse_var_declarators(start, type_ref);
        }

        vec![self.parse_expression_statement(start)]
    }

    /// `String name`, `List<Foo> items = []`: a type-like name, then an
    /// identifier, then something that can follow a declarator.
    fn at_local_declaration(&mut self) -> bool {
        if !self.at_type_like_name() {
            return false;
        }
        self.lookahead(|p| {
            if p.parse_type().is_none() || !p.at(TokenKind::Ident) {
                return false;
            }
            p.bump();
            p.at_statement_end() || p.at_any(&[TokenKind::Eq, TokenKind::Comma])
        })
    }

    /// `a = 1, b, c = foo()`, one [`StmtKind::VarDecl`] per variable.
    fn parse_var_declarators(&mut self, start: TextSize, type_ref: TypeRef) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            let decl_start = if stmts.is_empty() { start } else { self.start() };
            let Some((name, name_span)) = self.expect_ident("variable name") else {
                self.recover_statement();
                break;
            };
            let initializer = self.eat(TokenKind::Eq).then(|| {
                self.skip_newlines();
                self.parse_expression()
            });
            let decl = VarDecl {
                name,
                type_ref: type_ref.clone(),
                initializer,
                name_span,
            };
            stmts.push(Stmt::new(StmtKind::VarDecl(decl), self.span_from(decl_start)));

            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        stmts
    }

    /// `def (a, String b) = expr`
    fn parse_multiple_assignment(&mut self, start: TextSize) -> Vec<Stmt> {
        let names = self.nested(|p| {
            p.bump();
            let mut names = Vec::new();
            loop {
                let type_ref = if p.at(TokenKind::Ident) && p.nth(1) == TokenKind::Ident {
                    p.parse_type().unwrap_or_default()
                } else {
                    TypeRef::dynamic()
                };
                match p.expect_ident("variable name") {
                    Some((name, span)) => names.push((name, type_ref, span)),
                    None => break,
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
            names
        });

        let value = self
            .expect(TokenKind::Eq, "'='")
            .then(|| self.parse_expression());
        let span = self.span_from(start);

        let mut stmts: Vec<Stmt> = names
            .into_iter()
            .map(|(name, type_ref, name_span)| {
                let decl = VarDecl {
                    name,
                    type_ref,
                    initializer: None,
                    name_span,
                };
                Stmt::new(StmtKind::VarDecl(decl), span)
            })
            .collect();
        if let Some(value) = value {
            stmts.push(Stmt::new(StmtKind::Expr(value), span));
        }
        stmts
    }

    /// An expression, possibly a parenthesis-free command call such as
    /// `println x` or `assertThat a, b`.
    fn parse_expression_statement(&mut self, start: TextSize) -> Stmt {
        let expr = self.parse_expression();
        let expr = if self.at_command_argument() {
            self.parse_command_call(start, expr)
        } else {
            expr
        };
        Stmt::new(StmtKind::Expr(expr), self.span_from(start))
    }

    fn at_command_argument(&self) -> bool {
        if self.at_statement_end() {
            return false;
        }
        matches!(
            self.current_kind(),
            TokenKind::Ident
                | TokenKind::Integer
                | TokenKind::Long
                | TokenKind::BigInteger
                | TokenKind::Decimal
                | TokenKind::Double
                | TokenKind::Float
                | TokenKind::SingleQuotedString
                | TokenKind::DoubleQuotedString
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::NullKw
                | TokenKind::ThisKw
                | TokenKind::NewKw
                | TokenKind::Bang
        )
    }

    fn parse_command_call(&mut self, start: TextSize, callee: Expr) -> Expr {
        let callee_span = callee.span;
        let (receiver, name, name_span) = match callee.kind {
            ExprKind::Variable(name) => (None, name, callee_span),
            ExprKind::Property {
                receiver,
                name,
                name_span,
                ..
            } => (Some(receiver), name, name_span),
            other => {
                // `foo(x) y` style chains are not modelled
                self.error("unexpected command argument");
                self.recover_statement();
                return Expr::new(other, callee_span);
            }
        };

        let mut named = Vec::new();
        let mut args = Vec::new();
        loop {
            if self.at_named_argument() {
                named.push(self.parse_named_argument());
            } else {
                args.push(self.parse_expression());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        if !named.is_empty() {
            let span = SourceSpan::new(named[0].key.span.start, self.span_from(start).end);
            args.insert(0, Expr::new(ExprKind::Map(named), span));
        }

        Expr::new(
            ExprKind::MethodCall {
                receiver,
                name,
                name_span,
                args,
                safe: false,
            },
            self.span_from(start),
        )
    }

    /// `name:` inside an argument list or command call.
    pub(crate) fn at_named_argument(&self) -> bool {
        let kind = self.current_kind();
        (kind == TokenKind::Ident
            || kind.is_keyword()
            || kind == TokenKind::SingleQuotedString
            || kind == TokenKind::DoubleQuotedString)
            && self.nth(1) == TokenKind::Colon
    }

    pub(crate) fn parse_named_argument(&mut self) -> MapEntry {
        let start = self.start();
        let text = self.current_text();
        let key_text = if self.at(TokenKind::Ident) || self.current_kind().is_keyword() {
            text.to_string()
        } else {
            unquote(text).to_string()
        };
        self.bump();
        let key = Expr::new(
            ExprKind::Literal(Literal::String(key_text)),
            self.span_from(start),
        );
        self.bump();
        self.skip_newlines();
        let value = self.parse_expression();
        MapEntry { key, value }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// `( expr )`
    fn parse_parenthesized(&mut self) -> Expr {
        self.nested(|p| {
            p.expect(TokenKind::LParen, "'('");
            let expr = p.parse_expression();
            p.expect(TokenKind::RParen, "')'");
            expr
        })
    }

    /// Body of `if`/`while`/`for`: a block or a single statement.
    fn parse_branch(&mut self) -> Box<Stmt> {
        self.skip_newlines();
        let start = self.start();
        if self.at(TokenKind::LBrace) {
            let block = self.parse_block();
            let span = block.span;
            return Box::new(Stmt::new(StmtKind::Block(block), span));
        }
        let mut stmts = if self.at_statement_end() {
            Vec::new()
        } else {
            self.parse_statement()
        };
        let span = self.span_from(start);
        Box::new(match stmts.len() {
            0 => Stmt::new(StmtKind::Empty, span),
            1 => stmts.remove(0),
            _ => Stmt::new(
                StmtKind::Block(Block {
                    statements: stmts,
                    span,
                }),
                span,
            ),
        })
    }

    fn parse_if(&mut self) -> StmtKind {
        self.bump();
        let condition = self.parse_parenthesized();
        let then_branch = self.parse_branch();
        let else_branch = if self.nth(0) == TokenKind::ElseKw {
            self.skip_newlines();
            self.bump();
            Some(self.parse_branch())
        } else {
            None
        };
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        }
    }

    fn parse_while(&mut self) -> StmtKind {
        self.bump();
        let condition = self.parse_parenthesized();
        let body = self.parse_branch();
        StmtKind::While { condition, body }
    }

    fn parse_do_while(&mut self) -> StmtKind {
        self.bump();
        let body = self.parse_branch();
        self.skip_newlines();
        let condition = if self.expect(TokenKind::WhileKw, "'while'") {
            self.parse_parenthesized()
        } else {
            Expr::new(ExprKind::Error, body.span)
        };
        StmtKind::While { condition, body }
    }

    /// `for (x in xs)`, `for (T x : xs)` and `for (init; cond; update)`.
    fn parse_for(&mut self) -> StmtKind {
        self.bump();
        let header = self.nested(|p| {
            p.expect(TokenKind::LParen, "'('");
            let header = match p.speculate(|p| p.parse_for_in_variable()) {
                Some(variable) => {
                    let iterable = p.parse_expression();
                    ForHeader::In { variable, iterable }
                }
                None => p.parse_classic_for_header(),
            };
            p.expect(TokenKind::RParen, "')'");
            header
        });
        let body = self.parse_branch();

        match header {
            ForHeader::In { variable, iterable } => StmtKind::ForIn {
                variable,
                iterable,
                body,
            },
            ForHeader::Classic {
                init,
                condition,
                update,
            } => StmtKind::For {
                init,
                condition,
                update,
                body,
            },
        }
    }

    /// `[def|Type] name in` / `Type name :`
    fn parse_for_in_variable(&mut self) -> Option<VarDecl> {
        let prefix = self.parse_decl_prefix();
        let type_ref = if !prefix.has_def
            && self.at(TokenKind::Ident)
            && !matches!(self.nth(1), TokenKind::InKw | TokenKind::Colon)
        {
            self.parse_type()?
        } else {
            TypeRef::dynamic()
        };
        if !self.at(TokenKind::Ident) {
            return None;
        }
        let (name, name_span) = self.expect_ident("loop variable")?;
        if !(self.eat(TokenKind::InKw) || self.eat(TokenKind::Colon)) {
            return None;
        }
        Some(VarDecl {
            name,
            type_ref,
            initializer: None,
            name_span,
        })
    }

    fn parse_classic_for_header(&mut self) -> ForHeader {
        let init = if self.at(TokenKind::Semicolon) {
            Vec::new()
        } else {
            let start = self.start();
            let prefix = self.parse_decl_prefix();
            self.parse_statement_after_prefix(start, prefix)
        };
        self.expect(TokenKind::Semicolon, "';'");
        let condition = (!self.at(TokenKind::Semicolon)).then(|| self.parse_expression());
        self.expect(TokenKind::Semicolon, "';'");
        let mut update = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            update.push(self.parse_expression());
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        ForHeader::Classic {
            init,
            condition,
            update,
        }
    }

    fn parse_try(&mut self) -> StmtKind {
        self.bump();
        // try-with-resources
        if self.at(TokenKind::LParen) {
            self.skip_balanced_nested();
        }
        self.skip_newlines();
        let body = self.parse_block();

        let mut catches = Vec::new();
        while self.nth(0) == TokenKind::CatchKw {
            self.skip_newlines();
            self.bump();
            let parameter = self.nested(|p| p.parse_catch_parameter());
            self.skip_newlines();
            let body = self.parse_block();
            if let Some(parameter) = parameter {
                catches.push(CatchClause { parameter, body });
            }
        }

        let finally = if self.nth(0) == TokenKind::FinallyKw {
            self.skip_newlines();
            self.bump();
            self.skip_newlines();
            Some(self.parse_block())
        } else {
            None
        };

        StmtKind::TryCatch {
            body,
            catches,
            finally,
        }
    }

    /// `(IOException | SQLException e)`; a multi-catch keeps the first type.
    fn parse_catch_parameter(&mut self) -> Option<ParameterInfo> {
        if !self.expect(TokenKind::LParen, "'('") {
            return None;
        }
        let start = self.start();
        let prefix = self.parse_decl_prefix();
        let mut type_ref = TypeRef::dynamic();
        if !prefix.has_def && self.at(TokenKind::Ident) && self.nth(1) != TokenKind::RParen {
            type_ref = self.parse_type().unwrap_or_default();
            while self.eat(TokenKind::Pipe) {
                self.parse_type();
            }
        }
        let parameter = self
            .expect_ident("exception name")
            .map(|(name, name_span)| ParameterInfo {
                name,
                type_ref,
                default_value: None,
                is_var_arg: false,
                span: self.span_from(start),
                name_span,
            });
        self.expect(TokenKind::RParen, "')'");
        parameter
    }

    /// `switch` is flattened into a block: the selector, then every case body.
    fn parse_switch(&mut self) -> StmtKind {
        let start = self.start();
        self.bump();
        let selector = self.parse_parenthesized();
        let selector_span = selector.span;
        let mut statements = vec![Stmt::new(StmtKind::Expr(selector), selector_span)];

        self.skip_newlines();
        if !self.expect(TokenKind::LBrace, "'{'") {
            return StmtKind::Block(Block {
                statements,
                span: self.span_from(start),
            });
        }
        self.unnested(|p| loop {
            p.skip_separators();
            match p.current_kind() {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::CaseKw => {
                    p.bump();
                    loop {
                        let value = p.parse_expression();
                        let span = value.span;
                        statements.push(Stmt::new(StmtKind::Expr(value), span));
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    if !p.eat(TokenKind::Arrow) {
                        p.expect(TokenKind::Colon, "':'");
                    }
                }
                TokenKind::DefaultKw => {
                    p.bump();
                    if !p.eat(TokenKind::Arrow) {
                        p.expect(TokenKind::Colon, "':'");
                    }
                }
                _ => {
                    let before = p.position();
                    statements.extend(p.parse_statement());
                    if p.position() == before {
                        p.bump_with_error(format!("unexpected '{}' in switch", p.current_text()));
                        continue;
                    }
                    p.finish_statement();
                }
            }
        });
        self.expect(TokenKind::RBrace, "'}'");

        StmtKind::Block(Block {
            statements,
            span: self.span_from(start),
        })
    }

    /// `assert cond : message`
    fn parse_assert(&mut self, start: TextSize) -> Vec<Stmt> {
        self.bump();
        let mut stmts = vec![];
        let condition = self.parse_expression();
        stmts.push(Stmt::new(StmtKind::Expr(condition), self.span_from(start)));
        if self.eat(TokenKind::Colon) || self.eat(TokenKind::Comma) {
            let message = self.parse_expression();
            let span = message.span;
            stmts.push(Stmt::new(StmtKind::Expr(message), span));
        }
        stmts
    }
}

enum ForHeader {
    In {
        variable: VarDecl,
        iterable: Expr,
    },
    Classic {
        init: Vec<Stmt>,
        condition: Option<Expr>,
        update: Vec<Expr>,
    },
}

/// Strip the quotes from a string literal token.
pub(crate) fn unquote(text: &str) -> &str {
    for quote in ["'''", "\"\"\"", "'", "\""] {
        if text.len() >= 2 * quote.len() && text.starts_with(quote) && text.ends_with(quote) {
            return &text[quote.len()..text.len() - quote.len()];
        }
    }
    text
}
