//! Tree-walking interpreter for accepted Cosmo programs.
//!
//! This module executes a parse tree against a stack of lexical scopes. It
//! handles:
//!
//! - Declarations into the innermost scope and assignment to the nearest one
//! - Integer arithmetic with `*` and `/` folded before `+` and `-`
//! - Relational and logical conditions
//! - The orbit / navigate / propel branch cascade
//! - Pre-tested and post-tested loops with an iteration cap
//! - Transmission output and line-based reception input
//!
//! Runtime errors abort the run and carry the position of the offending token.

pub mod eval;
pub mod interpreter;
pub mod scope;

#[cfg(test)]
mod tests;
