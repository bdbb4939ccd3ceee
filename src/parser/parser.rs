//! Shift-reduce driver.
//!
//! The driver shifts one token at a time onto the parse stack, adds a leaf
//! for it to the parse tree, and then runs the production catalog until no
//! production fires. After the last shift the stack is checked against the
//! accepting symbols; when that fails, an arithmetic-only derivation is tried
//! on a copy of the state before the input is rejected.

use std::fmt::Display;

use log::{debug, trace};

use crate::lexer::tokens::Token;

use super::{
    productions::{create_production_catalog, Mode, Production, Reduction},
    stack::ParseStack,
    symbols::{NonTerminal, Symbol},
    trace::TraceRecord,
    tree::ParseTreeNode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accept => write!(f, "ACCEPT"),
            Verdict::Reject => write!(f, "REJECT"),
        }
    }
}

/// Parser state: remaining input, stack, tree and trace.
#[derive(Clone)]
pub struct Parser {
    /// Input tokens, shifted front to back
    tokens: Vec<Token>,
    /// Index of the next token to shift
    pos: usize,
    stack: ParseStack,
    /// Root `Program` node; its children run parallel to the stack
    tree: ParseTreeNode,
    trace: Vec<TraceRecord>,
    /// Productions in priority order
    catalog: Vec<Production>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            stack: ParseStack::with_capacity(tokens.len()),
            tokens,
            pos: 0,
            tree: ParseTreeNode::program(),
            trace: vec![],
            catalog: create_production_catalog(),
        }
    }

    pub fn stack(&self) -> &ParseStack {
        &self.stack
    }

    pub fn tree(&self) -> &ParseTreeNode {
        &self.tree
    }

    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Moves the next token onto the stack and into the tree. Returns `false`
    /// when the input is exhausted.
    pub fn shift(&mut self) -> bool {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return false;
        };
        self.pos += 1;

        let tag = token.tag();
        self.tree.add_child(ParseTreeNode::leaf(token.clone()));
        self.stack.shift(Symbol::Terminal(token));

        trace!("shift {} -> {}", tag, self.stack);
        self.trace.push(TraceRecord::Shift {
            token: tag,
            stack: self.stack.to_string(),
        });
        true
    }

    /// Fires the first matching production, if any.
    pub fn step(&mut self, mode: Mode) -> Option<Reduction> {
        let found = self
            .catalog
            .iter()
            .filter(|production| mode == Mode::Primary || production.arithmetic)
            .find_map(|production| (production.matcher)(&self.stack, mode).map(|r| (production.name, r)));

        let (name, reduction) = found?;
        self.apply(name, reduction);
        Some(reduction)
    }

    /// Runs the catalog to a fixed point and returns how many reductions fired.
    pub fn reduce(&mut self, mode: Mode) -> usize {
        let mut count = 0;
        while self.step(mode).is_some() {
            count += 1;
        }
        count
    }

    fn apply(&mut self, name: &'static str, reduction: Reduction) {
        let window = self.stack.render_from(reduction.start);

        self.stack.reduce(reduction.start, reduction.width, reduction.lhs);
        self.tree.collapse(reduction.start, reduction.width, reduction.lhs);

        trace!("reduce {} -> {}", name, self.stack);
        self.trace.push(TraceRecord::Reduce {
            production: name,
            stack: self.stack.to_string(),
            window,
        });
    }

    /// Every symbol left on the stack is a complete top-level statement.
    pub fn is_accepting(&self) -> bool {
        self.stack
            .symbols()
            .all(|symbol| symbol.non_terminal().is_some_and(|nt| nt.is_accepting()))
    }

    /// Replays the arithmetic productions with the end of input as lookahead.
    /// Returns the resulting state when it collapses to one `arithExp`.
    fn fallback(&self) -> Option<Parser> {
        let mut attempt = self.clone();
        let fired = attempt.reduce(Mode::Fallback);

        let single_arith = {
            let mut symbols = attempt.stack.symbols();
            matches!(
                (symbols.next(), symbols.next()),
                (Some(symbol), None) if symbol.is(NonTerminal::ArithExp)
            )
        };

        debug!("fallback derivation fired {} reductions, arithExp: {}", fired, single_arith);
        single_arith.then_some(attempt)
    }
}

/// Parses a complete token stream.
///
/// Always returns the final parser state so the stack, tree and trace can be
/// inspected after a rejection.
pub fn parse(tokens: Vec<Token>) -> (Parser, Verdict) {
    let mut parser = Parser::new(tokens);

    while parser.shift() {
        parser.reduce(Mode::Primary);
    }
    parser.reduce(Mode::Primary);

    let verdict = if parser.is_accepting() {
        Verdict::Accept
    } else if let Some(derived) = parser.fallback() {
        parser = derived;
        Verdict::Accept
    } else {
        Verdict::Reject
    };

    parser.trace.push(match verdict {
        Verdict::Accept => TraceRecord::Accept,
        Verdict::Reject => TraceRecord::Reject,
    });
    debug!("parse finished: {} with stack [{}]", verdict, parser.stack);

    (parser, verdict)
}
