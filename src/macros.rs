//! Utility macros for the toolchain.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_REDUCTION!` - Creates a Reduction describing one stack window
//!
//! These macros reduce boilerplate in the lexer and the production catalog.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::CometLiteral, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Reduction that collapses `$width` stack symbols starting at
/// `$start` into the non-terminal `$lhs`.
///
/// # Example
///
/// ```ignore
/// return Some(MK_REDUCTION!(z, 5, NonTerminal::DecStmt));
/// ```
#[macro_export]
macro_rules! MK_REDUCTION {
    ($start:expr, $width:expr, $lhs:expr) => {
        Reduction {
            start: $start,
            width: $width,
            lhs: $lhs,
        }
    };
}
