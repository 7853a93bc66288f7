//! Expressions, by precedence climbing.
//!
//! From loosest to tightest: assignment, ternary/elvis, `||`, `&&`, `|`,
//! `^`, `&`, equality, relational, shift/range, additive, multiplicative,
//! unary, `**`, then postfix navigation and calls.

use smol_str::SmolStr;
use text_size::TextSize;

use super::statements::unquote;
use crate::base::SourceSpan;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::syntax::{
    AssignOp, BinaryOp, Closure, Expr, ExprKind, Literal, MapEntry, TypeRef, UnaryOp,
};

/// Binding power of a binary operator; higher binds tighter.
fn binary_power(kind: TokenKind) -> Option<(u8, BinaryOp)> {
    let entry = match kind {
        TokenKind::PipePipe => (1, BinaryOp::Or),
        TokenKind::AmpAmp => (2, BinaryOp::And),
        TokenKind::Pipe => (3, BinaryOp::BitOr),
        TokenKind::Caret => (4, BinaryOp::BitXor),
        TokenKind::Amp => (5, BinaryOp::BitAnd),
        TokenKind::EqEq => (6, BinaryOp::Eq),
        TokenKind::BangEq => (6, BinaryOp::NotEq),
        TokenKind::EqEqEq => (6, BinaryOp::Identical),
        TokenKind::BangEqEq => (6, BinaryOp::NotIdentical),
        TokenKind::Spaceship => (6, BinaryOp::Compare),
        TokenKind::EqTilde => (6, BinaryOp::Find),
        TokenKind::EqEqTilde => (6, BinaryOp::Match),
        TokenKind::Lt => (7, BinaryOp::Lt),
        TokenKind::LtEq => (7, BinaryOp::LtEq),
        TokenKind::Gt => (7, BinaryOp::Gt),
        TokenKind::GtEq => (7, BinaryOp::GtEq),
        TokenKind::InKw => (7, BinaryOp::In),
        TokenKind::Shl => (8, BinaryOp::Shl),
        TokenKind::Plus => (9, BinaryOp::Add),
        TokenKind::Minus => (9, BinaryOp::Sub),
        TokenKind::Star => (10, BinaryOp::Mul),
        TokenKind::Slash => (10, BinaryOp::Div),
        TokenKind::Percent => (10, BinaryOp::Mod),
        _ => return None,
    };
    Some(entry)
}

const RELATIONAL: u8 = 7;
const SHIFT: u8 = 8;

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Eq => Some(AssignOp::Assign),
        TokenKind::PlusEq => Some(AssignOp::Add),
        TokenKind::MinusEq => Some(AssignOp::Sub),
        TokenKind::StarEq => Some(AssignOp::Mul),
        TokenKind::SlashEq => Some(AssignOp::Div),
        TokenKind::PercentEq => Some(AssignOp::Mod),
        TokenKind::ElvisEq => Some(AssignOp::Elvis),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse an expression. Never fails; bad input yields [`ExprKind::Error`].
    pub(crate) fn parse_expression(&mut self) -> Expr {
        let start = self.start();
        let target = self.parse_ternary();

        if let Some(op) = assign_op(self.current_kind()) {
            self.bump();
            self.skip_newlines();
            let value = self.parse_expression();
            return Expr::new(
                ExprKind::Assign {
                    target: Box::new(target),
                    op,
                    value: Box::new(value),
                },
                self.span_from(start),
            );
        }
        target
    }

    fn parse_ternary(&mut self) -> Expr {
        let start = self.start();
        let condition = self.parse_binary(1);

        if self.eat(TokenKind::Elvis) {
            self.skip_newlines();
            let fallback = self.parse_ternary();
            return Expr::new(
                ExprKind::Elvis {
                    value: Box::new(condition),
                    fallback: Box::new(fallback),
                },
                self.span_from(start),
            );
        }

        if self.eat(TokenKind::Question) {
            self.skip_newlines();
            let then_expr = self.parse_ternary();
            self.skip_newlines();
            self.expect(TokenKind::Colon, "':'");
            self.skip_newlines();
            let else_expr = self.parse_ternary();
            return Expr::new(
                ExprKind::Ternary {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                self.span_from(start),
            );
        }
        condition
    }

    fn parse_binary(&mut self, min_power: u8) -> Expr {
        let start = self.start();
        let mut lhs = self.parse_unary();

        loop {
            // `x as Type` and `x instanceof Type` take a type operand
            if min_power <= RELATIONAL
                && matches!(self.current_kind(), TokenKind::AsKw | TokenKind::InstanceofKw)
            {
                let is_cast = self.at(TokenKind::AsKw);
                self.bump();
                let type_start = self.start();
                let type_ref = self.parse_type().unwrap_or_else(|| {
                    self.error("expected type");
                    TypeRef::dynamic()
                });
                let type_span = self.span_from(type_start);
                let kind = if is_cast {
                    ExprKind::Cast {
                        expr: Box::new(lhs),
                        type_ref,
                    }
                } else {
                    ExprKind::Binary {
                        op: BinaryOp::InstanceOf,
                        lhs: Box::new(lhs),
                        rhs: Box::new(Expr::new(ExprKind::Variable(type_ref.name), type_span)),
                    }
                };
                lhs = Expr::new(kind, self.span_from(start));
                continue;
            }

            // `x !in xs`, `x !instanceof T`
            if min_power <= RELATIONAL
                && self.at(TokenKind::Bang)
                && matches!(self.nth(1), TokenKind::InKw | TokenKind::InstanceofKw)
            {
                self.bump();
                let negated_start = start;
                let is_in = self.at(TokenKind::InKw);
                self.bump();
                let rhs = if is_in {
                    self.parse_binary(RELATIONAL + 1)
                } else {
                    let type_start = self.start();
                    let name = self
                        .parse_type()
                        .map(|t| t.name)
                        .unwrap_or_else(|| SmolStr::new_static("Object"));
                    Expr::new(ExprKind::Variable(name), self.span_from(type_start))
                };
                let op = if is_in { BinaryOp::In } else { BinaryOp::InstanceOf };
                let inner = Expr::new(
                    ExprKind::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    self.span_from(negated_start),
                );
                lhs = Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Not,
                        operand: Box::new(inner),
                    },
                    self.span_from(negated_start),
                );
                continue;
            }

            // ranges and `>>` sit between relational and additive
            if min_power <= SHIFT {
                if matches!(self.current_kind(), TokenKind::DotDot | TokenKind::DotDotLt) {
                    let exclusive = self.at(TokenKind::DotDotLt);
                    self.bump();
                    self.skip_newlines();
                    let to = self.parse_binary(SHIFT + 1);
                    lhs = Expr::new(
                        ExprKind::Range {
                            from: Box::new(lhs),
                            to: Box::new(to),
                            exclusive,
                        },
                        self.span_from(start),
                    );
                    continue;
                }
                if let Some(len) = self.at_shift_right() {
                    for _ in 0..len {
                        self.bump();
                    }
                    self.skip_newlines();
                    let rhs = self.parse_binary(SHIFT + 1);
                    lhs = binary(BinaryOp::Shr, lhs, rhs, self.span_from(start));
                    continue;
                }
            }

            let Some((power, op)) = binary_power(self.current_kind()) else {
                break;
            };
            if power < min_power {
                break;
            }
            self.bump();
            self.skip_newlines();
            let rhs = self.parse_binary(power + 1);
            lhs = binary(op, lhs, rhs, self.span_from(start));
        }
        lhs
    }

    /// `>>` or `>>>` written as adjacent `>` tokens.
    fn at_shift_right(&self) -> Option<usize> {
        if !self.at(TokenKind::Gt) || !self.next_is_adjacent() || self.nth_raw(1) != TokenKind::Gt {
            return None;
        }
        if self.nth_raw(2) == TokenKind::Gt {
            Some(3)
        } else {
            Some(2)
        }
    }

    fn parse_unary(&mut self) -> Expr {
        let start = self.start();
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::PlusPlus => UnaryOp::PreInc,
            TokenKind::MinusMinus => UnaryOp::PreDec,
            _ => return self.parse_power(),
        };
        self.bump();
        let operand = self.parse_unary();
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        )
    }

    fn parse_power(&mut self) -> Expr {
        let start = self.start();
        let base = self.parse_postfix();
        if self.eat(TokenKind::StarStar) {
            self.skip_newlines();
            let exponent = self.parse_unary();
            return binary(BinaryOp::Pow, base, exponent, self.span_from(start));
        }
        base
    }

    // =========================================================================
    // Postfix
    // =========================================================================

    fn parse_postfix(&mut self) -> Expr {
        let start = self.start();
        let mut expr = self.parse_primary();

        loop {
            // a leading `.` on the next line continues the chain
            if self.nth_raw(0) == TokenKind::Newline
                && matches!(
                    self.nth(0),
                    TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot
                )
            {
                self.skip_newlines();
            }

            match self.current_kind() {
                TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot => {
                    let safe = self.at(TokenKind::SafeDot);
                    self.bump();
                    self.skip_newlines();
                    // `.@field` direct field access
                    self.eat(TokenKind::At);
                    // `.<T>method()`
                    self.skip_type_parameters();
                    expr = self.parse_member_access(start, expr, safe);
                }
                TokenKind::MethodPointer | TokenKind::ColonColon => {
                    self.bump();
                    let Some((name, name_span)) = self.parse_member_name() else {
                        break;
                    };
                    expr = Expr::new(
                        ExprKind::Property {
                            receiver: Box::new(expr),
                            name,
                            name_span,
                            safe: false,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::LParen => {
                    let args = self.parse_call_arguments();
                    expr = self.make_call(start, expr, args);
                }
                TokenKind::LBrace if is_callable(&expr) => {
                    let closure = self.parse_closure();
                    expr = self.make_call(start, expr, vec![closure]);
                }
                TokenKind::LBracket => {
                    let index = self.nested(|p| {
                        p.bump();
                        let index = p.parse_expression();
                        while p.eat(TokenKind::Comma) {
                            p.parse_expression();
                        }
                        p.expect(TokenKind::RBracket, "']'");
                        index
                    });
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.at(TokenKind::PlusPlus) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    self.bump();
                    expr = Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(expr),
                        },
                        self.span_from(start),
                    );
                }
                _ => break,
            }
        }
        expr
    }

    /// A name after `.`: identifier, keyword (`it.class`) or quoted string.
    fn parse_member_name(&mut self) -> Option<(SmolStr, SourceSpan)> {
        let start = self.start();
        let kind = self.current_kind();
        let name = if kind == TokenKind::Ident || kind.is_keyword() {
            SmolStr::new(self.current_text())
        } else if matches!(
            kind,
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString
        ) {
            SmolStr::new(unquote(self.current_text()))
        } else {
            self.error(format!("expected member name, found '{}'", self.current_text()));
            return None;
        };
        self.bump();
        Some((name, self.span_from(start)))
    }

    fn parse_member_access(&mut self, start: TextSize, receiver: Expr, safe: bool) -> Expr {
        let Some((name, name_span)) = self.parse_member_name() else {
            return receiver;
        };

        let receiver = Box::new(receiver);
        let has_args = self.at(TokenKind::LParen);
        if has_args || self.at(TokenKind::LBrace) {
            let mut args = if has_args {
                self.parse_call_arguments()
            } else {
                Vec::new()
            };
            if !has_args {
                args.push(self.parse_closure());
            }
            return Expr::new(
                ExprKind::MethodCall {
                    receiver: Some(receiver),
                    name,
                    name_span,
                    args,
                    safe,
                },
                self.span_from(start),
            );
        }

        Expr::new(
            ExprKind::Property {
                receiver,
                name,
                name_span,
                safe,
            },
            self.span_from(start),
        )
    }

    /// `(a, b, key: value) { closure }`; named arguments become a leading map.
    fn parse_call_arguments(&mut self) -> Vec<Expr> {
        let mut args = self.nested(|p| {
            let open = p.start();
            p.bump();
            let mut named: Vec<MapEntry> = Vec::new();
            let mut args = Vec::new();
            while !p.at(TokenKind::RParen) && !p.at_eof() {
                // spread `*list`
                p.eat(TokenKind::Star);
                if p.at_named_argument() {
                    named.push(p.parse_named_argument());
                } else {
                    args.push(p.parse_expression());
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
            if !named.is_empty() {
                args.insert(0, Expr::new(ExprKind::Map(named), p.span_from(open)));
            }
            args
        });

        // trailing closures on the same line
        while self.at(TokenKind::LBrace) {
            args.push(self.parse_closure());
        }
        args
    }

    fn make_call(&mut self, start: TextSize, callee: Expr, args: Vec<Expr>) -> Expr {
        let span = callee.span;
        let kind = match callee.kind {
            ExprKind::Variable(name) => ExprKind::MethodCall {
                receiver: None,
                name,
                name_span: span,
                args,
                safe: false,
            },
            ExprKind::This => ExprKind::MethodCall {
                receiver: None,
                name: SmolStr::new_static("this"),
                name_span: span,
                args,
                safe: false,
            },
            ExprKind::Super => ExprKind::MethodCall {
                receiver: None,
                name: SmolStr::new_static("super"),
                name_span: span,
                args,
                safe: false,
            },
            ExprKind::MethodCall {
                receiver,
                name,
                name_span,
                args: mut existing,
                safe,
            } => {
                // `foo(a) { ... }` already consumed; more closures append
                existing.extend(args);
                ExprKind::MethodCall {
                    receiver,
                    name,
                    name_span,
                    args: existing,
                    safe,
                }
            }
            ExprKind::Property {
                receiver,
                name,
                name_span,
                safe,
            } => ExprKind::MethodCall {
                receiver: Some(receiver),
                name,
                name_span,
                args,
                safe,
            },
            other => ExprKind::MethodCall {
                receiver: Some(Box::new(Expr::new(other, span))),
                name: SmolStr::new_static("call"),
                name_span: span,
                args,
                safe: false,
            },
        };
        Expr::new(kind, self.span_from(start))
    }

    // =========================================================================
    // Primary
    // =========================================================================

    fn parse_primary(&mut self) -> Expr {
        let start = self.start();
        let kind = match self.current_kind() {
            TokenKind::Integer => self.parse_integer(),
            TokenKind::Long => self.parse_long(),
            TokenKind::BigInteger => {
                let text = strip_suffix(self.current_text());
                self.bump();
                ExprKind::Literal(Literal::BigInteger(text))
            }
            TokenKind::Decimal => {
                let text = strip_suffix(self.current_text());
                self.bump();
                ExprKind::Literal(Literal::Decimal(text))
            }
            TokenKind::Double => {
                let text = strip_suffix(self.current_text());
                self.bump();
                ExprKind::Literal(Literal::Double(text))
            }
            TokenKind::Float => {
                let text = strip_suffix(self.current_text());
                self.bump();
                ExprKind::Literal(Literal::Float(text))
            }
            TokenKind::SingleQuotedString => {
                let text = unquote(self.current_text()).to_string();
                self.bump();
                ExprKind::Literal(Literal::String(text))
            }
            TokenKind::DoubleQuotedString => {
                let text = unquote(self.current_text()).to_string();
                self.bump();
                if text.contains('$') {
                    ExprKind::Literal(Literal::GString(text))
                } else {
                    ExprKind::Literal(Literal::String(text))
                }
            }
            TokenKind::TrueKw | TokenKind::FalseKw => {
                let value = self.at(TokenKind::TrueKw);
                self.bump();
                ExprKind::Literal(Literal::Boolean(value))
            }
            TokenKind::NullKw => {
                self.bump();
                ExprKind::Literal(Literal::Null)
            }
            TokenKind::Ident => {
                let name = SmolStr::new(self.current_text());
                self.bump();
                ExprKind::Variable(name)
            }
            TokenKind::ThisKw => {
                self.bump();
                ExprKind::This
            }
            TokenKind::SuperKw => {
                self.bump();
                ExprKind::Super
            }
            TokenKind::NewKw => self.parse_new(),
            TokenKind::LParen => {
                if let Some(cast) = self.speculate(|p| p.parse_cast(start)) {
                    return cast;
                }
                return self.nested(|p| {
                    p.bump();
                    let inner = p.parse_expression();
                    p.expect(TokenKind::RParen, "')'");
                    inner
                });
            }
            TokenKind::LBracket => self.parse_list_or_map(),
            TokenKind::LBrace => return self.parse_closure(),
            // keywords used as plain names, e.g. a property called `in`
            kind if kind.is_keyword() && !kind.is_modifier() && self.nth(1) == TokenKind::Dot => {
                let name = SmolStr::new(self.current_text());
                self.bump();
                ExprKind::Variable(name)
            }
            _ => {
                self.error(format!("expected expression, found '{}'", self.current_text()));
                let closes = matches!(
                    self.current_kind(),
                    TokenKind::RParen
                        | TokenKind::RBracket
                        | TokenKind::RBrace
                        | TokenKind::Comma
                        | TokenKind::Colon
                        | TokenKind::Semicolon
                        | TokenKind::Newline
                        | TokenKind::Eof
                );
                if !closes && !self.at_statement_end() {
                    self.bump();
                }
                ExprKind::Error
            }
        };
        Expr::new(kind, self.span_from(start))
    }

    fn parse_integer(&mut self) -> ExprKind {
        let text = self.current_text();
        self.bump();
        let digits = strip_suffix(text);
        match parse_int(&digits) {
            Some(value) if i32::try_from(value).is_ok() => ExprKind::Literal(Literal::Integer(value)),
            Some(value) => ExprKind::Literal(Literal::Long(value)),
            None => ExprKind::Literal(Literal::BigInteger(digits)),
        }
    }

    fn parse_long(&mut self) -> ExprKind {
        let text = self.current_text();
        self.bump();
        let digits = strip_suffix(text);
        match parse_int(&digits) {
            Some(value) => ExprKind::Literal(Literal::Long(value)),
            None => ExprKind::Literal(Literal::BigInteger(digits)),
        }
    }

    /// `(Type) expr`; only for type-like names so `(a) - b` stays arithmetic.
    fn parse_cast(&mut self, start: TextSize) -> Option<Expr> {
        let type_ref = self.nested(|p| {
            p.bump();
            if !p.at_type_like_name() {
                return None;
            }
            let type_ref = p.parse_type()?;
            p.eat(TokenKind::RParen).then_some(type_ref)
        })?;
        let operand_starts = matches!(
            self.current_kind(),
            TokenKind::Ident
                | TokenKind::Integer
                | TokenKind::Long
                | TokenKind::Decimal
                | TokenKind::Double
                | TokenKind::Float
                | TokenKind::SingleQuotedString
                | TokenKind::DoubleQuotedString
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::NewKw
                | TokenKind::ThisKw
                | TokenKind::NullKw
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::Bang
        );
        if !operand_starts {
            return None;
        }
        let expr = self.parse_unary();
        Some(Expr::new(
            ExprKind::Cast {
                expr: Box::new(expr),
                type_ref,
            },
            self.span_from(start),
        ))
    }

    /// `new Foo(args)`, `new int[3]`, `new String[] { ... }`, anonymous classes.
    fn parse_new(&mut self) -> ExprKind {
        self.bump();
        let type_start = self.start();
        let Some(mut type_ref) = self.parse_type() else {
            self.error("expected type after 'new'");
            return ExprKind::Error;
        };
        let type_span = self.span_from(type_start);

        let mut args = Vec::new();
        if self.at(TokenKind::LBracket) {
            while self.at(TokenKind::LBracket) {
                self.nested(|p| {
                    p.bump();
                    if !p.at(TokenKind::RBracket) {
                        args.push(p.parse_expression());
                    }
                    p.expect(TokenKind::RBracket, "']'");
                });
                type_ref.array_dims = type_ref.array_dims.saturating_add(1);
            }
        } else if self.at(TokenKind::LParen) {
            args = self.parse_new_arguments();
        }
        // array initializer or anonymous class body
        if self.at(TokenKind::LBrace) {
            self.skip_balanced_nested();
        }

        ExprKind::New {
            type_ref,
            type_span,
            args,
        }
    }

    fn parse_new_arguments(&mut self) -> Vec<Expr> {
        self.nested(|p| {
            let open = p.start();
            p.bump();
            let mut named = Vec::new();
            let mut args = Vec::new();
            while !p.at(TokenKind::RParen) && !p.at_eof() {
                if p.at_named_argument() {
                    named.push(p.parse_named_argument());
                } else {
                    args.push(p.parse_expression());
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
            if !named.is_empty() {
                args.insert(0, Expr::new(ExprKind::Map(named), p.span_from(open)));
            }
            args
        })
    }

    /// `[1, 2]`, `[a: 1]`, `[:]`
    fn parse_list_or_map(&mut self) -> ExprKind {
        self.nested(|p| {
            p.bump();
            if p.at(TokenKind::Colon) && p.nth(1) == TokenKind::RBracket {
                p.bump();
                p.bump();
                return ExprKind::Map(Vec::new());
            }

            let mut items = Vec::new();
            let mut entries = Vec::new();
            while !p.at(TokenKind::RBracket) && !p.at_eof() {
                // spread `*:map` / `*list`
                if p.eat(TokenKind::Star) {
                    p.eat(TokenKind::Colon);
                }
                if p.at_named_argument() {
                    entries.push(p.parse_named_argument());
                } else {
                    let value = p.parse_expression();
                    if p.eat(TokenKind::Colon) {
                        let key = value;
                        let value = p.parse_expression();
                        entries.push(MapEntry { key, value });
                    } else {
                        items.push(value);
                    }
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RBracket, "']'");

            if entries.is_empty() {
                ExprKind::List(items)
            } else {
                ExprKind::Map(entries)
            }
        })
    }

    /// `{ a, b -> ... }` or `{ ... }` with an implicit `it`.
    pub(crate) fn parse_closure(&mut self) -> Expr {
        self.sync_to_current();
        let start = self.start();
        self.unnested(|p| {
            p.bump();
            let parameters = p.speculate(|p| {
                p.nested(|p| {
                    if p.eat(TokenKind::Arrow) {
                        return Some(Vec::new());
                    }
                    let mut params = Vec::new();
                    loop {
                        if !p.at_any(&[TokenKind::Ident, TokenKind::DefKw, TokenKind::FinalKw]) {
                            return None;
                        }
                        params.push(p.parse_parameter()?);
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    p.eat(TokenKind::Arrow).then_some(params)
                })
            });

            let body = p.parse_statements_until_rbrace();
            p.expect(TokenKind::RBrace, "'}'");

            let closure = Closure {
                implicit_it: parameters.is_none(),
                parameters: parameters.unwrap_or_default(),
                body,
            };
            Expr::new(ExprKind::Closure(closure), p.span_from(start))
        })
    }
}

/// Expressions that a same-line `{` turns into a call with a closure argument.
fn is_callable(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Variable(_) | ExprKind::MethodCall { .. } | ExprKind::Property { .. }
    )
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: SourceSpan) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

/// Drop `_` separators and a trailing type suffix such as `L` or `G`.
fn strip_suffix(text: &str) -> String {
    let is_hex = text.starts_with("0x") || text.starts_with("0X");
    let mut digits: String = text.chars().filter(|c| *c != '_').collect();
    if let Some(last) = digits.chars().last() {
        let suffix = if is_hex {
            matches!(last, 'l' | 'L' | 'g' | 'G' | 'i' | 'I')
        } else {
            matches!(
                last,
                'l' | 'L' | 'g' | 'G' | 'i' | 'I' | 'd' | 'D' | 'f' | 'F'
            )
        };
        if suffix {
            digits.pop();
        }
    }
    digits
}

fn parse_int(digits: &str) -> Option<i64> {
    match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => digits.parse().ok(),
    }
}
