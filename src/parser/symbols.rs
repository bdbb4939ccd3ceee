use std::fmt::Display;

use crate::lexer::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Identifier,
    CometLiteral,
    String,
    DecStmt,
    AssignStmt,
    IoStmt,
    TransmissionStmt,
    ReceptionStmt,
    RelationalOp,
    LogicalOp,
    RelationalExp,
    LogicalExp,
    ConditionalExp,
    Expr,
    Stmt,
    Factor,
    Term,
    ArithExp,
    NavigateStmt,
    PropelStmt,
    OrbitStmt,
    WhirlLoop,
    LaunchWhirlLoop,
}

impl NonTerminal {
    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::Identifier => "identifier",
            NonTerminal::CometLiteral => "comet_literal",
            NonTerminal::String => "string",
            NonTerminal::DecStmt => "decStmt",
            NonTerminal::AssignStmt => "assignStmt",
            NonTerminal::IoStmt => "ioStmt",
            NonTerminal::TransmissionStmt => "transmissionStmt",
            NonTerminal::ReceptionStmt => "receptionStmt",
            NonTerminal::RelationalOp => "relationalOp",
            NonTerminal::LogicalOp => "logicalOp",
            NonTerminal::RelationalExp => "relationalExp",
            NonTerminal::LogicalExp => "logicalExp",
            NonTerminal::ConditionalExp => "conditionalExp",
            NonTerminal::Expr => "expr",
            NonTerminal::Stmt => "stmt",
            NonTerminal::Factor => "factor",
            NonTerminal::Term => "term",
            NonTerminal::ArithExp => "arithExp",
            NonTerminal::NavigateStmt => "navigateStmt",
            NonTerminal::PropelStmt => "propelStmt",
            NonTerminal::OrbitStmt => "orbitStmt",
            NonTerminal::WhirlLoop => "whirlLoop",
            NonTerminal::LaunchWhirlLoop => "launchWhirlLoop",
        }
    }

    /// Symbols that may stand alone on a fully reduced stack.
    pub fn is_accepting(&self) -> bool {
        matches!(
            self,
            NonTerminal::DecStmt
                | NonTerminal::Expr
                | NonTerminal::OrbitStmt
                | NonTerminal::WhirlLoop
                | NonTerminal::LaunchWhirlLoop
        )
    }
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One parse stack entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Terminal(Token),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self {
            Symbol::Terminal(token) => Some(token.kind),
            Symbol::NonTerminal(_) => None,
        }
    }

    pub fn non_terminal(&self) -> Option<NonTerminal> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::NonTerminal(nt) => Some(*nt),
        }
    }

    pub fn is(&self, nt: NonTerminal) -> bool {
        self.non_terminal() == Some(nt)
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.token_kind() == Some(kind)
    }

    /// `+ - * /` as a raw terminal.
    pub fn is_arithmetic_operator(&self) -> bool {
        self.token_kind().is_some_and(|kind| kind.is_arithmetic())
    }

    pub fn is_additive_operator(&self) -> bool {
        self.token_kind().is_some_and(|kind| kind.is_additive())
    }

    pub fn is_multiplicative_operator(&self) -> bool {
        self.token_kind().is_some_and(|kind| kind.is_multiplicative())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(token) => write!(f, "{}", token.tag()),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
        }
    }
}
