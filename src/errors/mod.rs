//! Error types and error handling for the toolchain.
//!
//! This module defines the single error type shared by the lexer and the
//! interpreter. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing and runtime failures
//! - Helpful error tips for display
//!
//! A rejected parse is not an error; the parser reports it as a verdict.

pub mod errors;
