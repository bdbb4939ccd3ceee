use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, OPERATOR_LOOKUP, RESERVED_LOOKUP};

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").unwrap();
}

pub type WordHandler = fn(&mut Lexer) -> Result<(), Error>;

#[derive(Clone)]
pub struct WordPattern {
    regex: Regex,
    handler: WordHandler,
}

/// A whitespace-delimited word and its byte offset in the source.
#[derive(Debug, Clone)]
struct Word {
    offset: usize,
    text: String,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<WordPattern>,
    tokens: Vec<Token>,
    words: Vec<Word>,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                WordPattern { regex: Regex::new(r"^(Comet|Voyage|[Rr]eception|[Tt]ransmission|Whirl|Launch|Orbit|Navigate|Propel)$").unwrap(), handler: reserved_handler },
                WordPattern { regex: Regex::new(r"^-?[0-9]+$").unwrap(), handler: literal_handler },
                WordPattern { regex: Regex::new(r"^(\(|\)|\{|\}|,|;|==|!=|>=|<=|>|<|&&|\|\||\+\+|--|\+|-|\*|/|=)$").unwrap(), handler: operator_handler },
                WordPattern { regex: Regex::new(r"^[a-zA-Z0-9_]+$").unwrap(), handler: identifier_handler },
                WordPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
                WordPattern { regex: Regex::new(r"^/\*").unwrap(), handler: comment_handler },
            ],
            words: split_words(&source),
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn at(&self) -> &Word {
        &self.words[self.pos]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.words.len()
    }

    fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    fn span(&self, offset: usize, len: usize) -> Span {
        Span {
            start: self.position(offset),
            end: self.position(offset + len),
        }
    }

    /// Pushes the current word as a token of `kind` and moves past it.
    fn push_word(&mut self, kind: TokenKind, value: String) {
        let word = self.at();
        let span = self.span(word.offset, word.text.len());
        self.push(MK_TOKEN!(kind, value, span));
        self.advance_n(1);
    }
}

fn split_words(source: &str) -> Vec<Word> {
    WORD.find_iter(source)
        .map(|m| Word {
            offset: m.start(),
            text: m.as_str().to_string(),
        })
        .collect()
}

fn reserved_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let text = lexer.at().text.clone();
    let kind = RESERVED_LOOKUP[text.as_str()];
    lexer.push_word(kind, text);
    Ok(())
}

fn literal_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let text = lexer.at().text.clone();
    lexer.push_word(TokenKind::CometLiteral, text);
    Ok(())
}

fn operator_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let text = lexer.at().text.clone();
    let kind = OPERATOR_LOOKUP[text.as_str()];
    lexer.push_word(kind, text);
    Ok(())
}

fn identifier_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let word = lexer.at().clone();

    // `comet`, `whirl`, ... are reserved even though only the capitalised
    // spelling is a keyword.
    let misused = RESERVED_LOOKUP
        .keys()
        .find(|keyword| keyword.to_lowercase() == word.text);

    if let Some(keyword) = misused {
        return Err(Error::new(
            ErrorImpl::ReservedWordMisuse {
                word: word.text.clone(),
                keyword: keyword.to_string(),
            },
            lexer.position(word.offset),
        ));
    }

    lexer.push_word(TokenKind::Identifier, word.text);
    Ok(())
}

fn string_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let first = lexer.at().clone();
    let mut parts = vec![first.text.clone()];
    let mut end = first.offset + first.text.len();
    let mut consumed = 1;

    let closed_by_first = first.text.len() >= 2 && first.text.ends_with('"');

    if !closed_by_first {
        loop {
            let Some(word) = lexer.words.get(lexer.pos + consumed) else {
                return Err(Error::new(
                    ErrorImpl::UnterminatedString { text: parts.join(" ") },
                    lexer.position(first.offset),
                ));
            };

            parts.push(word.text.clone());
            end = word.offset + word.text.len();
            consumed += 1;

            if word.text.ends_with('"') {
                break;
            }
        }
    }

    let span = lexer.span(first.offset, end - first.offset);
    lexer.push(MK_TOKEN!(TokenKind::String, parts.join(" "), span));
    lexer.advance_n(consumed);
    Ok(())
}

fn comment_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.at().offset;
    let first = &lexer.at().text;

    // A lone `/*` cannot close itself.
    if first.len() >= 4 && first.ends_with("*/") {
        lexer.advance_n(1);
        return Ok(());
    }

    let mut consumed = 1;
    loop {
        let Some(word) = lexer.words.get(lexer.pos + consumed) else {
            return Err(Error::new(ErrorImpl::UnterminatedComment, lexer.position(start)));
        };

        consumed += 1;
        if word.text.ends_with("*/") {
            break;
        }
    }

    lexer.advance_n(consumed);
    Ok(())
}

/// Converts Cosmo source text into tokens.
///
/// The source is split on whitespace and each word is classified by the
/// first pattern that matches it in full. String literals may span several
/// words and keep their quotes. Block comments are dropped.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in lex.clone().patterns.iter() {
            if pattern.regex.is_match(&lex.at().text) {
                (pattern.handler)(&mut lex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            let word = lex.at();
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token: word.text.clone() },
                lex.position(word.offset),
            ));
        }
    }

    Ok(lex.tokens)
}

/// Reads a whitespace-separated list of classified tags (`comet_token id_x
/// arith_assign cmt_5 sep_semicolon`). Quoted strings may contain spaces.
pub fn tokens_from_tags(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let file = Rc::new(file.unwrap_or_else(|| String::from("shell")));
    let words = split_words(&source);
    let mut tokens = vec![];
    let mut i = 0;

    while i < words.len() {
        let first = &words[i];
        let position = Position(first.offset as u32, Rc::clone(&file));
        let mut tag = first.text.clone();
        i += 1;

        if tag.starts_with('"') && !(tag.len() >= 2 && tag.ends_with('"')) {
            loop {
                let Some(word) = words.get(i) else {
                    return Err(Error::new(ErrorImpl::UnterminatedString { text: tag }, position));
                };
                tag.push(' ');
                tag.push_str(&word.text);
                i += 1;

                if word.text.ends_with('"') {
                    break;
                }
            }
        }

        tokens.push(Token::from_tag(&tag, position)?);
    }

    Ok(tokens)
}
