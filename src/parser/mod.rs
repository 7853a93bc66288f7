//! Tolerant recursive-descent parser for Groovy
//!
//! This module turns source text into the declaration model in
//! [`crate::syntax`]:
//! - **logos** for fast lexing
//! - hand-written recursive descent with speculative backtracking
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind and offsets
//!     ↓
//! Parser → ParsedFile (classes, members, bodies, diagnostics)
//!     ↓
//! Semantic → symbol table and scope trees
//! ```
//!
//! Newlines are significant at statement level and ignored inside `()`/`[]`.
//! Errors never abort: they are recorded as diagnostics and parsing resumes
//! at the next statement or member.

#[allow(clippy::module_inception)]
mod parser;

mod grammar;
mod lexer;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::parse_groovy;
