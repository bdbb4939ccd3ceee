use crate::{lexer::tokens::TokenKind, MK_REDUCTION};

use super::{
    stack::ParseStack,
    symbols::{NonTerminal, Symbol},
};

/// A stack window that a production wants to collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    pub start: usize,
    pub width: usize,
    pub lhs: NonTerminal,
}

/// How the catalog treats the top of the stack.
///
/// In `Primary` mode more input may still arrive, so rules that need a
/// lookahead wait while their candidate is on top. `Fallback` runs after the
/// input is exhausted and treats the end as a settled lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Primary,
    Fallback,
}

/// The symbol after a window.
#[derive(Debug, Clone, Copy)]
pub enum Next<'a> {
    Symbol(&'a Symbol),
    Pending,
    End,
}

impl<'a> Next<'a> {
    pub fn of(stack: &'a ParseStack, index: usize, mode: Mode) -> Next<'a> {
        match (stack.get(index), mode) {
            (Some(symbol), _) => Next::Symbol(symbol),
            (None, Mode::Primary) => Next::Pending,
            (None, Mode::Fallback) => Next::End,
        }
    }

    /// Known, and not `*` or `/`.
    fn ends_term(&self) -> bool {
        match self {
            Next::Symbol(symbol) => !symbol.is_multiplicative_operator(),
            Next::Pending => false,
            Next::End => true,
        }
    }
}

pub type Matcher = fn(&ParseStack, Mode) -> Option<Reduction>;

#[derive(Clone)]
pub struct Production {
    pub name: &'static str,
    pub matcher: Matcher,
    /// Part of the arithmetic closure replayed by the fallback derivation.
    pub arithmetic: bool,
}

/// One position of a fixed right-hand side.
#[derive(Debug, Clone, Copy)]
enum Expect {
    T(TokenKind),
    N(NonTerminal),
    /// identifier | comet_literal | arithExp
    Value,
    /// identifier | comet_literal
    Operand,
    /// string | identifier
    IoArgument,
    /// relationalExp | logicalExp
    Condition,
    Relational,
    Logical,
    Additive,
    Multiplicative,
}

impl Expect {
    fn matches(&self, symbol: &Symbol) -> bool {
        match self {
            Expect::T(kind) => symbol.is_kind(*kind),
            Expect::N(nt) => symbol.is(*nt),
            Expect::Value => {
                symbol.is(NonTerminal::Identifier)
                    || symbol.is(NonTerminal::CometLiteral)
                    || symbol.is(NonTerminal::ArithExp)
            }
            Expect::Operand => symbol.is(NonTerminal::Identifier) || symbol.is(NonTerminal::CometLiteral),
            Expect::IoArgument => symbol.is(NonTerminal::String) || symbol.is(NonTerminal::Identifier),
            Expect::Condition => symbol.is(NonTerminal::RelationalExp) || symbol.is(NonTerminal::LogicalExp),
            Expect::Relational => symbol.token_kind().is_some_and(|k| k.is_relational()),
            Expect::Logical => symbol.token_kind().is_some_and(|k| k.is_logical()),
            Expect::Additive => symbol.is_additive_operator(),
            Expect::Multiplicative => symbol.is_multiplicative_operator(),
        }
    }
}

/// Leftmost start index where `pattern` matches the stack.
fn find(stack: &ParseStack, pattern: &[Expect]) -> Option<usize> {
    find_where(stack, pattern, |_| true)
}

/// Leftmost start index where `pattern` matches and `accept(start)` holds.
fn find_where(stack: &ParseStack, pattern: &[Expect], accept: impl Fn(usize) -> bool) -> Option<usize> {
    if pattern.len() > stack.len() {
        return None;
    }

    (0..=stack.len() - pattern.len()).find(|&z| {
        pattern
            .iter()
            .enumerate()
            .all(|(offset, expect)| stack.get(z + offset).is_some_and(|s| expect.matches(s)))
            && accept(z)
    })
}

fn previous(stack: &ParseStack, index: usize) -> Option<&Symbol> {
    index.checked_sub(1).and_then(|i| stack.get(i))
}

fn fixed(stack: &ParseStack, pattern: &[Expect], lhs: NonTerminal) -> Option<Reduction> {
    find(stack, pattern).map(|z| MK_REDUCTION!(z, pattern.len(), lhs))
}

fn promote_string(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(stack, &[Expect::T(TokenKind::String)], NonTerminal::String)
}

fn promote_identifier(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(stack, &[Expect::T(TokenKind::Identifier)], NonTerminal::Identifier)
}

fn promote_comet_literal(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(stack, &[Expect::T(TokenKind::CometLiteral)], NonTerminal::CometLiteral)
}

fn declaration(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Comet),
            Expect::N(NonTerminal::Identifier),
            Expect::T(TokenKind::Assignment),
            Expect::Value,
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::DecStmt,
    )
}

fn assignment(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::N(NonTerminal::Identifier),
            Expect::T(TokenKind::Assignment),
            Expect::Value,
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::AssignStmt,
    )
}

fn io_statement(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::OpenParen),
            Expect::IoArgument,
            Expect::T(TokenKind::CloseParen),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::IoStmt,
    )
}

fn transmission(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[Expect::T(TokenKind::Transmission), Expect::N(NonTerminal::IoStmt)],
        NonTerminal::TransmissionStmt,
    )
}

fn reception(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::N(NonTerminal::Identifier),
            Expect::T(TokenKind::Assignment),
            Expect::T(TokenKind::Reception),
            Expect::N(NonTerminal::IoStmt),
        ],
        NonTerminal::ReceptionStmt,
    )
}

fn relational_operator(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(stack, &[Expect::Relational], NonTerminal::RelationalOp)
}

fn logical_operator(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(stack, &[Expect::Logical], NonTerminal::LogicalOp)
}

fn relational_expression(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[Expect::Operand, Expect::N(NonTerminal::RelationalOp), Expect::Operand],
        NonTerminal::RelationalExp,
    )
}

/// `relationalExp (logicalOp relationalExp)+` closed by `)`, taken as one
/// window of 2n+1 symbols.
fn logical_expression(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    let is_rel = |i: usize| stack.get(i).is_some_and(|s| s.is(NonTerminal::RelationalExp));
    let is_logic = |i: usize| stack.get(i).is_some_and(|s| s.is(NonTerminal::LogicalOp));

    for z in 0..stack.len() {
        let chain_start = is_rel(z) && !(z > 0 && is_logic(z - 1));
        if !chain_start {
            continue;
        }

        let mut end = z + 1;
        while is_logic(end) && is_rel(end + 1) {
            end += 2;
        }

        let width = end - z;
        let closed = stack.get(end).is_some_and(|s| s.is_kind(TokenKind::CloseParen));
        if width >= 3 && closed {
            return Some(MK_REDUCTION!(z, width, NonTerminal::LogicalExp));
        }
    }

    None
}

fn conditional_expression(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[Expect::T(TokenKind::OpenParen), Expect::Condition, Expect::T(TokenKind::CloseParen)],
        NonTerminal::ConditionalExp,
    )
}

/// An operand next to `+ - * /` becomes a factor.
fn factor(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    find_where(stack, &[Expect::Operand], |z| {
        let before = previous(stack, z).is_some_and(|s| s.is_arithmetic_operator());
        let after = stack.get(z + 1).is_some_and(|s| s.is_arithmetic_operator());
        before || after
    })
    .map(|z| MK_REDUCTION!(z, 1, NonTerminal::Factor))
}

fn term_product(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[Expect::N(NonTerminal::Term), Expect::Multiplicative, Expect::N(NonTerminal::Factor)],
        NonTerminal::Term,
    )
}

/// A factor that does not follow `*` or `/` starts a term.
fn term(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    find_where(stack, &[Expect::N(NonTerminal::Factor)], |z| {
        !previous(stack, z).is_some_and(|s| s.is_multiplicative_operator())
    })
    .map(|z| MK_REDUCTION!(z, 1, NonTerminal::Term))
}

/// `arithExp (+|-) term`, once the term can no longer grow.
fn arith_sum(stack: &ParseStack, mode: Mode) -> Option<Reduction> {
    let pattern = [Expect::N(NonTerminal::ArithExp), Expect::Additive, Expect::N(NonTerminal::Term)];
    find_where(stack, &pattern, |z| Next::of(stack, z + 3, mode).ends_term())
        .map(|z| MK_REDUCTION!(z, 3, NonTerminal::ArithExp))
}

/// A leading term becomes an arithmetic expression once it can no longer grow.
fn arith_expression(stack: &ParseStack, mode: Mode) -> Option<Reduction> {
    find_where(stack, &[Expect::N(NonTerminal::Term)], |z| {
        let leading = !previous(stack, z).is_some_and(|s| s.is_arithmetic_operator());
        leading && Next::of(stack, z + 1, mode).ends_term()
    })
    .map(|z| MK_REDUCTION!(z, 1, NonTerminal::ArithExp))
}

/// `{ expr+ }`
fn statement_body(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    for z in 0..stack.len() {
        if !stack.get(z).is_some_and(|s| s.is_kind(TokenKind::OpenBrace)) {
            continue;
        }

        let mut end = z + 1;
        while stack.get(end).is_some_and(|s| s.is(NonTerminal::Expr)) {
            end += 1;
        }

        let closed = stack.get(end).is_some_and(|s| s.is_kind(TokenKind::CloseBrace));
        if end > z + 1 && closed {
            return Some(MK_REDUCTION!(z, end - z + 1, NonTerminal::Stmt));
        }
    }

    None
}

fn navigate(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Navigate),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::N(NonTerminal::Stmt),
        ],
        NonTerminal::NavigateStmt,
    )
}

fn propel(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[Expect::T(TokenKind::Propel), Expect::N(NonTerminal::Stmt)],
        NonTerminal::PropelStmt,
    )
}

fn orbit(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Orbit),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::N(NonTerminal::Stmt),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::OrbitStmt,
    )
}

fn orbit_propel(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Orbit),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::N(NonTerminal::Stmt),
            Expect::N(NonTerminal::PropelStmt),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::OrbitStmt,
    )
}

fn orbit_navigate_propel(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Orbit),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::N(NonTerminal::Stmt),
            Expect::N(NonTerminal::NavigateStmt),
            Expect::N(NonTerminal::PropelStmt),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::OrbitStmt,
    )
}

fn whirl_loop(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::Whirl),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::N(NonTerminal::Stmt),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::WhirlLoop,
    )
}

fn launch_whirl_loop(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    fixed(
        stack,
        &[
            Expect::T(TokenKind::LaunchWhirl),
            Expect::N(NonTerminal::Stmt),
            Expect::T(TokenKind::Whirl),
            Expect::N(NonTerminal::ConditionalExp),
            Expect::T(TokenKind::Semicolon),
        ],
        NonTerminal::LaunchWhirlLoop,
    )
}

/// Complete statements, and an arithmetic expression followed by something
/// other than an operator.
fn expression(stack: &ParseStack, _: Mode) -> Option<Reduction> {
    (0..stack.len())
        .find(|&z| {
            let Some(symbol) = stack.get(z) else {
                return false;
            };

            match symbol.non_terminal() {
                Some(
                    NonTerminal::ReceptionStmt
                    | NonTerminal::TransmissionStmt
                    | NonTerminal::AssignStmt
                    | NonTerminal::DecStmt
                    | NonTerminal::OrbitStmt
                    | NonTerminal::WhirlLoop
                    | NonTerminal::LaunchWhirlLoop,
                ) => true,
                Some(NonTerminal::ArithExp) => stack
                    .get(z + 1)
                    .is_some_and(|next| !next.is_arithmetic_operator()),
                _ => false,
            }
        })
        .map(|z| MK_REDUCTION!(z, 1, NonTerminal::Expr))
}

/// Builds the production catalog in priority order.
pub fn create_production_catalog() -> Vec<Production> {
    let rule = |name: &'static str, matcher: Matcher| Production { name, matcher, arithmetic: false };
    let arith = |name: &'static str, matcher: Matcher| Production { name, matcher, arithmetic: true };

    vec![
        rule("string", promote_string),
        rule("identifier", promote_identifier),
        rule("comet_literal", promote_comet_literal),
        rule("decStmt", declaration),
        rule("assignStmt", assignment),
        rule("ioStmt", io_statement),
        rule("transmissionStmt", transmission),
        rule("receptionStmt", reception),
        rule("relationalOp", relational_operator),
        rule("logicalOp", logical_operator),
        rule("relationalExp", relational_expression),
        rule("logicalExp", logical_expression),
        rule("conditionalExp", conditional_expression),
        // Arithmetic
        arith("factor", factor),
        arith("term_product", term_product),
        arith("term", term),
        arith("arithExp_sum", arith_sum),
        arith("arithExp", arith_expression),
        // Blocks and control flow
        rule("stmt", statement_body),
        rule("navigateStmt", navigate),
        rule("propelStmt", propel),
        rule("orbitStmt", orbit),
        rule("orbitStmt_propel", orbit_propel),
        rule("orbitStmt_navigate_propel", orbit_navigate_propel),
        rule("whirlLoop", whirl_loop),
        rule("launchWhirlLoop", launch_whirl_loop),
        rule("expr", expression),
    ]
}
