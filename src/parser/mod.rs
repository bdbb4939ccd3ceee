//! Shift-reduce parser for Cosmo token streams.
//!
//! This module turns a stream of classified tokens into a parse tree and an
//! accept/reject verdict. It contains:
//!
//! - Grammar symbols (terminals wrap tokens, non-terminals are a closed enum)
//! - The parse stack of symbol slots
//! - The parse tree, restructured in lockstep with every reduction
//! - The production catalog, an ordered list of window matchers
//! - The driver that shifts one token at a time and reduces to a fixed point
//! - Trace records of every shift and reduction
//!
//! The grammar is fixed. Productions are tried in priority order and only the
//! first match fires per step, so the order of the catalog is significant.

pub mod parser;
pub mod productions;
pub mod stack;
pub mod symbols;
pub mod trace;
pub mod tree;
