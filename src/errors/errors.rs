use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::ReservedWordMisuse { .. } => "ReservedWordMisuse",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::MalformedTag { .. } => "MalformedTag",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::Undeclared { .. } => "Undeclared",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::LoopIterationLimitExceeded { .. } => "LoopIterationLimitExceeded",
            ErrorImpl::MalformedExpression { .. } => "MalformedExpression",
            ErrorImpl::InputExhausted => "InputExhausted",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::ReservedWordMisuse { word, keyword } => ErrorTip::Suggestion(format!(
                "`{}` is reserved, did you mean `{}`?",
                word, keyword
            )),
            ErrorImpl::UnterminatedString { text } => {
                ErrorTip::Suggestion(format!("String `{}` is missing its closing quote", text))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment is missing its closing `*/`"))
            }
            ErrorImpl::MalformedTag { tag } => {
                ErrorTip::Suggestion(format!("`{}` is not a classified token", tag))
            }
            ErrorImpl::AlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` has already been declared in the current scope",
                variable
            )),
            ErrorImpl::Undeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` has not been declared", variable))
            }
            ErrorImpl::DivisionByZero => ErrorTip::Suggestion(String::from("Divisor evaluated to zero")),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {}, received `{}`",
                expected, received
            )),
            ErrorImpl::LoopIterationLimitExceeded { limit } => ErrorTip::Suggestion(format!(
                "Loop ran more than {} iterations, is its guard ever false?",
                limit
            )),
            ErrorImpl::MalformedExpression { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::InputExhausted => {
                ErrorTip::Suggestion(String::from("Input ended before a value was received"))
            }
            ErrorImpl::Io { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("reserved word {word:?} used as identifier (keyword is {keyword:?})")]
    ReservedWordMisuse { word: String, keyword: String },
    #[error("unterminated string: {text:?}")]
    UnterminatedString { text: String },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("malformed token tag: {tag:?}")]
    MalformedTag { tag: String },
    #[error("variable {variable:?} already declared in this scope")]
    AlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    Undeclared { variable: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("type mismatch: expected {expected}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("loop exceeded {limit} iterations")]
    LoopIterationLimitExceeded { limit: usize },
    #[error("malformed expression: {message}")]
    MalformedExpression { message: String },
    #[error("input exhausted")]
    InputExhausted,
    #[error("i/o error: {message}")]
    Io { message: String },
}
