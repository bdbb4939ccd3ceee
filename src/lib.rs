#![allow(clippy::module_inception)]

use std::{io::{BufRead, Write}, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorTip},
    interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize,
    parser::parser::{parse, Parser, Verdict},
};

pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position within that line, or `None` when the offset is past the end.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}


/// Renders an error with the offending source line underneath it.
pub fn format_error(error: &Error, content: &str) -> String {
    /*
        Error: message
        -> main.cosmo
           |
        20 | x = y ;
           | ----^
    */

    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(content, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

/// Result of running a complete source program.
pub struct RunReport<R: BufRead, W: Write> {
    pub parser: Parser,
    pub verdict: Verdict,
    /// `None` when the program was rejected and never executed.
    pub interpreter: Option<Interpreter<R, W>>,
}

/// Tokenizes, parses and, when accepted, interprets `source`.
///
/// Lexing and runtime errors abort the run; a rejected parse is reported
/// through the verdict without executing anything.
pub fn run_source<R: BufRead, W: Write>(
    source: &str,
    file: Option<String>,
    input: R,
    output: W,
) -> Result<RunReport<R, W>, Error> {
    let tokens = tokenize(source.to_string(), file)?;
    let (parser, verdict) = parse(tokens);

    if verdict == Verdict::Reject {
        return Ok(RunReport { parser, verdict, interpreter: None });
    }

    let mut interpreter = Interpreter::new(input, output);
    interpreter.interpret(parser.tree())?;

    Ok(RunReport {
        parser,
        verdict,
        interpreter: Some(interpreter),
    })
}
