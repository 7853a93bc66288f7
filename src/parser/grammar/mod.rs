//! Grammar rules for Groovy
//!
//! Each file extends [`Parser`](super::parser::Parser) with the rules for one
//! layer of the language:
//! - `declarations` - compilation unit, package, imports, types and members
//! - `statements` - blocks and statements inside method and closure bodies
//! - `expressions` - precedence-climbing expression parser
//! - `types` - type references, annotations and modifier prefixes

mod declarations;
mod expressions;
mod statements;
mod types;
