//! Tolerant recursive-descent parser for Groovy.
//!
//! The parser never fails: every problem becomes a [`ParseDiagnostic`] and
//! parsing resumes at the next statement or member boundary. Grammar rules
//! live in [`super::grammar`]; this file holds the cursor, span and error
//! plumbing they share.

use smol_str::SmolStr;
use text_size::TextSize;

use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{LineIndex, SourcePos, SourceSpan};
use crate::syntax::{ParseDiagnostic, ParsedFile};

/// Parse Groovy source text into a [`ParsedFile`].
///
/// `script_name` names the implicit class that holds loose top-level
/// statements and methods, as Groovy derives it from the file name.
pub fn parse_groovy(script_name: &str, input: &str) -> ParsedFile {
    let mut tokens = tokenize(input);
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        offset: TextSize::of(input),
    });

    let mut parser = Parser::new(&tokens, input, script_name);
    parser.parse_compilation_unit();
    parser.finish()
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    line_index: LineIndex<'a>,
    /// End offset of the last consumed token.
    last_end: TextSize,
    /// Inside `()`/`[]` newlines are not statement terminators.
    nesting: u32,
    pub(super) file: ParsedFile,
    pub(super) script_name: SmolStr,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], input: &'a str, script_name: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            line_index: LineIndex::new(input),
            last_end: TextSize::from(0),
            nesting: 0,
            file: ParsedFile::default(),
            script_name: SmolStr::new(script_name),
        }
    }

    fn finish(self) -> ParsedFile {
        tracing::trace!(
            classes = self.file.classes.len(),
            diagnostics = self.file.diagnostics.len(),
            "parsed groovy source"
        );
        self.file
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the current token, skipping newlines while nested.
    fn current_index(&self) -> usize {
        let mut idx = self.pos;
        if self.nesting > 0 {
            while self.tokens[idx].kind == TokenKind::Newline {
                idx += 1;
            }
        }
        idx
    }

    pub(super) fn current(&self) -> &Token<'a> {
        &self.tokens[self.current_index()]
    }

    pub(super) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(super) fn current_text(&self) -> &'a str {
        self.tokens[self.current_index()].text
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(super) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(super) fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Look ahead `n` tokens past the current one, ignoring newlines.
    pub(super) fn nth(&self, n: usize) -> TokenKind {
        self.nth_token(n).kind
    }

    pub(super) fn nth_token(&self, n: usize) -> &Token<'a> {
        let mut idx = self.current_index();
        let mut count = 0;
        loop {
            let token = &self.tokens[idx];
            if token.kind == TokenKind::Eof {
                return token;
            }
            if token.kind != TokenKind::Newline {
                if count == n {
                    return token;
                }
                count += 1;
            }
            idx += 1;
        }
    }

    /// Raw look-ahead that keeps newlines, for same-line checks.
    pub(super) fn nth_raw(&self, n: usize) -> TokenKind {
        let idx = (self.current_index() + n).min(self.tokens.len() - 1);
        self.tokens[idx].kind
    }

    /// True when the next token starts directly after the current one.
    pub(super) fn next_is_adjacent(&self) -> bool {
        let idx = self.current_index();
        match self.tokens.get(idx + 1) {
            Some(next) => next.offset == self.tokens[idx].end(),
            None => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) {
        let idx = self.current_index();
        let token = &self.tokens[idx];
        if token.kind == TokenKind::Eof {
            self.pos = idx;
            return;
        }
        self.last_end = token.end();
        self.pos = idx + 1;
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {what}, found '{}'", self.describe_current()));
            false
        }
    }

    /// Consume an identifier (or a keyword used as a name) and return its text.
    pub(super) fn expect_ident(&mut self, what: &str) -> Option<(SmolStr, SourceSpan)> {
        if self.at(TokenKind::Ident) {
            let start = self.current().offset;
            let text = SmolStr::new(self.current_text());
            self.bump();
            Some((text, self.span_from(start)))
        } else {
            self.error(format!("expected {what}, found '{}'", self.describe_current()));
            None
        }
    }

    /// Move the raw cursor onto the current token, dropping skipped newlines.
    pub(super) fn sync_to_current(&mut self) {
        self.pos = self.current_index();
    }

    pub(super) fn skip_newlines(&mut self) {
        while self.tokens[self.pos].kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    /// Skip newlines and semicolons between statements or members.
    pub(super) fn skip_separators(&mut self) {
        while matches!(
            self.tokens[self.pos].kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.pos += 1;
        }
    }

    /// Run `f` with newlines treated as whitespace.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    /// Run `f` with newlines significant again, e.g. inside a closure body.
    pub(super) fn unnested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.nesting;
        self.nesting = 0;
        let result = f(self);
        self.nesting = saved;
        result
    }

    /// Try a rule; on `None` rewind as if nothing had been consumed.
    pub(super) fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        let result = f(self);
        if result.is_none() {
            self.rewind(checkpoint);
        }
        result
    }

    /// Evaluate a predicate over the upcoming tokens, then rewind regardless.
    pub(super) fn lookahead(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.rewind(checkpoint);
        result
    }

    fn checkpoint(&self) -> (usize, TextSize, u32, usize) {
        (
            self.pos,
            self.last_end,
            self.nesting,
            self.file.diagnostics.len(),
        )
    }

    fn rewind(&mut self, (pos, last_end, nesting, diagnostics): (usize, TextSize, u32, usize)) {
        self.pos = pos;
        self.last_end = last_end;
        self.nesting = nesting;
        self.file.diagnostics.truncate(diagnostics);
    }

    /// Raw cursor, for loops that must verify progress.
    pub(super) fn position(&self) -> usize {
        self.pos
    }

    /// Force progress after a rule consumed nothing.
    pub(super) fn bump_with_error(&mut self, message: impl Into<String>) {
        self.error(message);
        if self.tokens[self.pos].kind != TokenKind::Eof {
            self.last_end = self.tokens[self.pos].end();
            self.pos += 1;
        }
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Offset of the current token, the start of whatever is parsed next.
    pub(super) fn start(&self) -> TextSize {
        self.current().offset
    }

    pub(super) fn pos_at(&self, offset: TextSize) -> SourcePos {
        self.line_index.source_pos(offset)
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: TextSize) -> SourceSpan {
        let end = self.last_end.max(start);
        SourceSpan::new(self.pos_at(start), self.pos_at(end))
    }

    /// Span of the whole input.
    pub(super) fn span_of_input(&self) -> SourceSpan {
        let end = self.tokens[self.tokens.len() - 1].offset;
        SourceSpan::new(SourcePos::new(1, 1), self.pos_at(end))
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn describe_current(&self) -> String {
        match self.current_kind() {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Newline => "newline".to_string(),
            _ => self.current_text().to_string(),
        }
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let token = self.current();
        let start = self.pos_at(token.offset);
        let end = self.pos_at(token.end());
        let message = message.into();
        tracing::trace!(%start, %message, "parse error");
        self.file.diagnostics.push(ParseDiagnostic {
            message,
            start,
            end,
        });
    }

    /// Skip to the end of the current statement.
    ///
    /// Stops before a newline, `;` or an unbalanced `}` and always makes progress.
    pub(super) fn recover_statement(&mut self) {
        let start = self.pos;
        loop {
            match self.tokens[self.pos].kind {
                TokenKind::Eof | TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace => {
                    break;
                }
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => self.skip_balanced(),
                _ => {
                    self.last_end = self.tokens[self.pos].end();
                    self.pos += 1;
                }
            }
        }
        if self.pos == start && !self.at_eof() && self.tokens[self.pos].kind != TokenKind::RBrace {
            self.last_end = self.tokens[self.pos].end();
            self.pos += 1;
        }
    }

    /// Skip a bracketed group starting at the raw current token, including
    /// everything nested inside it.
    pub(super) fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            let kind = self.tokens[self.pos].kind;
            match kind {
                TokenKind::Eof => return,
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.last_end = self.tokens[self.pos].end();
            self.pos += 1;
            if depth == 0 {
                return;
            }
        }
    }

    /// True when a statement may end here.
    pub(super) fn at_statement_end(&self) -> bool {
        matches!(
            self.tokens[self.pos].kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        )
    }

    /// Require a statement terminator, reporting and recovering otherwise.
    pub(super) fn finish_statement(&mut self) {
        if self.at_statement_end() {
            return;
        }
        self.error(format!(
            "unexpected '{}' after statement",
            self.describe_current()
        ));
        self.recover_statement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let file = parse_groovy("Empty", "");
        assert!(file.classes.is_empty());
        assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn test_speculate_rewinds() {
        let tokens = {
            let mut t = tokenize("a b");
            t.push(Token {
                kind: TokenKind::Eof,
                text: "",
                offset: TextSize::from(3),
            });
            t
        };
        let mut parser = Parser::new(&tokens, "a b", "Test");
        let result: Option<()> = parser.speculate(|p| {
            p.bump();
            p.error("nope");
            None
        });
        assert!(result.is_none());
        assert_eq!(parser.current_text(), "a");
        assert!(parser.file.diagnostics.is_empty());
    }

    #[test]
    fn test_nested_skips_newlines() {
        let input = "(\n x)";
        let mut tokens = tokenize(input);
        tokens.push(Token {
            kind: TokenKind::Eof,
            text: "",
            offset: TextSize::of(input),
        });
        let mut parser = Parser::new(&tokens, input, "Test");
        parser.bump();
        assert_eq!(parser.current_kind(), TokenKind::Newline);
        parser.nested(|p| assert_eq!(p.current_text(), "x"));
    }
}
