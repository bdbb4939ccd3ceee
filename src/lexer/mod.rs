//! Lexical analysis for Cosmo source.
//!
//! This module converts source text into a stream of tokens for parsing.
//! It handles:
//!
//! - Whitespace-delimited word classification using regex patterns
//! - Recognition of keywords, identifiers, comet literals, strings and operators
//! - The classified-tag convention (`id_x`, `cmt_5`, `sep_semicolon`) in both directions
//! - Block comments and byte-offset spans for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
