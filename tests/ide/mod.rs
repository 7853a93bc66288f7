//! IDE feature tests
//!
//! Tests for:
//! - Go to definition
//! - Type info and hover
//! - Document symbols

pub mod tests_definition;
pub mod tests_hover;
pub mod tests_symbols;
