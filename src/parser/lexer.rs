//! Logos-based lexer for Groovy
//!
//! Whitespace and comments are dropped; newlines are kept because they end
//! statements in Groovy.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = result.unwrap_or(TokenKind::Error);

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Token kinds produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\f\r]+")]
#[logos(skip r"\\\r?\n")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
#[logos(skip r"#![^\n]*")]
pub enum TokenKind {
    // =========================================================================
    // LAYOUT
    // =========================================================================
    #[token("\n")]
    Newline,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*[iI]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Integer,

    #[regex(r"[0-9][0-9_]*[lL]")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]")]
    Long,

    #[regex(r"[0-9][0-9_]*[gG]")]
    BigInteger,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[gG]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[gG]?")]
    Decimal,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[dD]")]
    Double,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[fF]")]
    Float,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    #[regex(r"'''([^']|'[^']|''[^'])*'''")]
    SingleQuotedString,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    DoubleQuotedString,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("as")]
    AsKw,
    #[token("assert")]
    AssertKw,
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("class")]
    ClassKw,
    #[token("continue")]
    ContinueKw,
    #[token("def")]
    DefKw,
    #[token("default")]
    DefaultKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("extends")]
    ExtendsKw,
    #[token("false")]
    FalseKw,
    #[token("final")]
    FinalKw,
    #[token("finally")]
    FinallyKw,
    #[token("for")]
    ForKw,
    #[token("if")]
    IfKw,
    #[token("implements")]
    ImplementsKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("interface")]
    InterfaceKw,
    #[token("native")]
    NativeKw,
    #[token("new")]
    NewKw,
    #[token("null")]
    NullKw,
    #[token("package")]
    PackageKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("return")]
    ReturnKw,
    #[token("static")]
    StaticKw,
    #[token("super")]
    SuperKw,
    #[token("switch")]
    SwitchKw,
    #[token("synchronized")]
    SynchronizedKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("throws")]
    ThrowsKw,
    #[token("trait")]
    TraitKw,
    #[token("transient")]
    TransientKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("var")]
    VarKw,
    #[token("volatile")]
    VolatileKw,
    #[token("while")]
    WhileKw,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("...")]
    Ellipsis,
    #[token("..<")]
    DotDotLt,
    #[token("..")]
    DotDot,
    #[token("?.")]
    SafeDot,
    #[token("*.")]
    SpreadDot,
    #[token(".&")]
    MethodPointer,
    #[token("?:")]
    Elvis,
    #[token("?=")]
    ElvisEq,
    #[token("->")]
    Arrow,
    #[token("::")]
    ColonColon,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("==~")]
    EqEqTilde,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("=~")]
    EqTilde,
    #[token("<=>")]
    Spaceship,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("**")]
    StarStar,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("@")]
    At,

    /// Any character the lexer does not recognise.
    Error,
    /// Synthetic end-of-input marker, never produced by logos.
    Eof,
}

impl TokenKind {
    /// Keywords that may still be used as member or property names (`map.class`).
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            AbstractKw
                | AsKw
                | AssertKw
                | BreakKw
                | CaseKw
                | CatchKw
                | ClassKw
                | ContinueKw
                | DefKw
                | DefaultKw
                | DoKw
                | ElseKw
                | EnumKw
                | ExtendsKw
                | FalseKw
                | FinalKw
                | FinallyKw
                | ForKw
                | IfKw
                | ImplementsKw
                | ImportKw
                | InKw
                | InstanceofKw
                | InterfaceKw
                | NativeKw
                | NewKw
                | NullKw
                | PackageKw
                | PrivateKw
                | ProtectedKw
                | PublicKw
                | ReturnKw
                | StaticKw
                | SuperKw
                | SwitchKw
                | SynchronizedKw
                | ThisKw
                | ThrowKw
                | ThrowsKw
                | TraitKw
                | TransientKw
                | TrueKw
                | TryKw
                | VarKw
                | VolatileKw
                | WhileKw
        )
    }

    /// Declaration modifiers, in any order before a declaration.
    pub fn is_modifier(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            PublicKw
                | PrivateKw
                | ProtectedKw
                | StaticKw
                | FinalKw
                | AbstractKw
                | SynchronizedKw
                | TransientKw
                | VolatileKw
                | NativeKw
                | DefaultKw
        )
    }
}
