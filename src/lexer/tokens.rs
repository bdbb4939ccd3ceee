use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("Comet", TokenKind::Comet);
        map.insert("Voyage", TokenKind::Voyage);
        map.insert("reception", TokenKind::Reception);
        map.insert("Reception", TokenKind::Reception);
        map.insert("transmission", TokenKind::Transmission);
        map.insert("Transmission", TokenKind::Transmission);
        map.insert("Whirl", TokenKind::Whirl);
        map.insert("Launch", TokenKind::LaunchWhirl);
        map.insert("Orbit", TokenKind::Orbit);
        map.insert("Navigate", TokenKind::Navigate);
        map.insert("Propel", TokenKind::Propel);
        map
    };

    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        // Separators
        map.insert("(", TokenKind::OpenParen);
        map.insert(")", TokenKind::CloseParen);
        map.insert("{", TokenKind::OpenBrace);
        map.insert("}", TokenKind::CloseBrace);
        map.insert(",", TokenKind::Comma);
        map.insert(";", TokenKind::Semicolon);
        // Comparison
        map.insert("==", TokenKind::Equals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert(">", TokenKind::Greater);
        map.insert("<", TokenKind::Less);
        map.insert(">=", TokenKind::GreaterEquals);
        map.insert("<=", TokenKind::LessEquals);
        // Logical
        map.insert("&&", TokenKind::And);
        map.insert("||", TokenKind::Or);
        // Arithmetic
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Minus);
        map.insert("*", TokenKind::Star);
        map.insert("/", TokenKind::Slash);
        map.insert("++", TokenKind::PlusPlus);
        map.insert("--", TokenKind::MinusMinus);
        map.insert("=", TokenKind::Assignment);
        map
    };

    /// Every fixed classified tag, keyed by its tag text.
    pub static ref TAG_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        for kind in TokenKind::FIXED {
            if let Some(tag) = kind.fixed_tag() {
                map.insert(tag, kind);
            }
        }
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    CometLiteral,
    String,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Semicolon,

    Equals,    // ==
    NotEquals, // !=
    Greater,
    Less,
    GreaterEquals,
    LessEquals,

    And,
    Or,

    Plus,
    Minus,
    Star,
    Slash,
    PlusPlus,
    MinusMinus,
    Assignment, // =

    // Reserved
    Comet,
    Voyage,
    Reception,
    Transmission,
    Whirl,
    LaunchWhirl,
    Orbit,
    Navigate,
    Propel,
}

impl TokenKind {
    /// All kinds whose classified tag does not depend on the token value.
    pub const FIXED: [TokenKind; 30] = [
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Greater,
        TokenKind::Less,
        TokenKind::GreaterEquals,
        TokenKind::LessEquals,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::PlusPlus,
        TokenKind::MinusMinus,
        TokenKind::Assignment,
        TokenKind::Comet,
        TokenKind::Voyage,
        TokenKind::Reception,
        TokenKind::Transmission,
        TokenKind::Whirl,
        TokenKind::LaunchWhirl,
        TokenKind::Orbit,
        TokenKind::Navigate,
        TokenKind::Propel,
    ];

    /// The classified tag for kinds that carry no value.
    pub fn fixed_tag(&self) -> Option<&'static str> {
        let tag = match self {
            TokenKind::Identifier | TokenKind::CometLiteral | TokenKind::String => return None,
            TokenKind::OpenParen => "sep_op_par",
            TokenKind::CloseParen => "sep_cl_par",
            TokenKind::OpenBrace => "sep_op_brac",
            TokenKind::CloseBrace => "sep_cl_brac",
            TokenKind::Comma => "sep_comma",
            TokenKind::Semicolon => "sep_semicolon",
            TokenKind::Equals => "comp_eq",
            TokenKind::NotEquals => "comp_not",
            TokenKind::Greater => "comp_great",
            TokenKind::Less => "comp_less",
            TokenKind::GreaterEquals => "comp_great_eq",
            TokenKind::LessEquals => "comp_less_eq",
            TokenKind::And => "logic_and",
            TokenKind::Or => "logic_or",
            TokenKind::Plus => "arith_plus",
            TokenKind::Minus => "arith_minus",
            TokenKind::Star => "arith_mult",
            TokenKind::Slash => "arith_div",
            TokenKind::PlusPlus => "arith_incr",
            TokenKind::MinusMinus => "arith_decr",
            TokenKind::Assignment => "arith_assign",
            TokenKind::Comet => "comet_token",
            TokenKind::Voyage => "voyage_token",
            TokenKind::Reception => "reception_token",
            TokenKind::Transmission => "transmission_token",
            TokenKind::Whirl => "whirl_token",
            TokenKind::LaunchWhirl => "launchwhirl_token",
            TokenKind::Orbit => "orbit_token",
            TokenKind::Navigate => "navigate_token",
            TokenKind::Propel => "propel_token",
        };
        Some(tag)
    }

    /// The canonical source spelling of a fixed kind.
    pub fn lexeme(&self) -> Option<&'static str> {
        let lexeme = match self {
            TokenKind::Identifier | TokenKind::CometLiteral | TokenKind::String => return None,
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Assignment => "=",
            TokenKind::Comet => "Comet",
            TokenKind::Voyage => "Voyage",
            TokenKind::Reception => "Reception",
            TokenKind::Transmission => "Transmission",
            TokenKind::Whirl => "Whirl",
            TokenKind::LaunchWhirl => "Launch",
            TokenKind::Orbit => "Orbit",
            TokenKind::Navigate => "Navigate",
            TokenKind::Propel => "Propel",
        };
        Some(lexeme)
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Greater
                | TokenKind::Less
                | TokenKind::GreaterEquals
                | TokenKind::LessEquals
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }

    /// `+ - * /`; assignment and the increment forms are not operators of
    /// an arithmetic expression.
    pub fn is_arithmetic(&self) -> bool {
        self.is_additive() || self.is_multiplicative()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl Token {
    /// Renders the token in the classified-tag convention (`id_x`, `cmt_5`,
    /// `sep_semicolon`, ...). Strings are kept verbatim, quotes included.
    pub fn tag(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("id_{}", self.value),
            TokenKind::CometLiteral => format!("cmt_{}", self.value),
            TokenKind::String => self.value.clone(),
            _ => self.kind.fixed_tag().unwrap_or_default().to_string(),
        }
    }

    /// Parses one classified tag back into a token.
    ///
    /// Keyword tags are checked before the literal prefixes so `comet_token`
    /// is never read as a literal. Both `cmt_` and `comet_` prefixes are
    /// accepted for literals.
    pub fn from_tag(tag: &str, position: Position) -> Result<Token, Error> {
        let span = Span {
            start: position.clone(),
            end: Position(position.0 + tag.len() as u32, position.1.clone()),
        };

        if let Some(kind) = TAG_LOOKUP.get(tag) {
            let lexeme = kind.lexeme().unwrap_or_default().to_string();
            return Ok(MK_TOKEN!(*kind, lexeme, span));
        }

        if tag.len() >= 2 && tag.starts_with('"') && tag.ends_with('"') {
            return Ok(MK_TOKEN!(TokenKind::String, tag.to_string(), span));
        }

        if let Some(name) = tag.strip_prefix("id_") {
            if !name.is_empty() {
                return Ok(MK_TOKEN!(TokenKind::Identifier, name.to_string(), span));
            }
        }

        let literal = tag.strip_prefix("cmt_").or_else(|| tag.strip_prefix("comet_"));
        if let Some(digits) = literal {
            if is_comet_literal(digits) {
                return Ok(MK_TOKEN!(TokenKind::CometLiteral, digits.to_string(), span));
            }
        }

        Err(Error::new(ErrorImpl::MalformedTag { tag: tag.to_string() }, position))
    }

    /// The identifier name or literal digits, the string text without its
    /// quotes, or the source spelling for fixed tokens.
    pub fn text(&self) -> String {
        match self.kind {
            TokenKind::String => self.value.replace('"', ""),
            _ => self.value.clone(),
        }
    }
}

fn is_comet_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
