//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Comet literals
//! - Multi-word string literals
//! - Operators and separators
//! - Block comments
//! - The classified-tag codec
//! - Error cases

use super::{
    lexer::{tokenize, tokens_from_tags},
    tokens::{Token, TokenKind},
};
use crate::Position;

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.cosmo".to_string())).unwrap()
}

fn tags(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.tag()).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = lex("Comet Voyage Reception reception Transmission transmission Whirl Launch Orbit Navigate Propel");

    assert_eq!(tokens[0].kind, TokenKind::Comet);
    assert_eq!(tokens[1].kind, TokenKind::Voyage);
    assert_eq!(tokens[2].kind, TokenKind::Reception);
    assert_eq!(tokens[3].kind, TokenKind::Reception);
    assert_eq!(tokens[4].kind, TokenKind::Transmission);
    assert_eq!(tokens[5].kind, TokenKind::Transmission);
    assert_eq!(tokens[6].kind, TokenKind::Whirl);
    assert_eq!(tokens[7].kind, TokenKind::LaunchWhirl);
    assert_eq!(tokens[8].kind, TokenKind::Orbit);
    assert_eq!(tokens[9].kind, TokenKind::Navigate);
    assert_eq!(tokens[10].kind, TokenKind::Propel);
    assert_eq!(tokens.len(), 11);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo bar_2 _under CamelCase 9lives");

    for token in &tokens {
        assert_eq!(token.kind, TokenKind::Identifier);
    }
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_2");
    assert_eq!(tokens[4].value, "9lives");
}

#[test]
fn test_tokenize_comet_literals() {
    let tokens = lex("42 -7 0");

    assert_eq!(tokens[0].kind, TokenKind::CometLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::CometLiteral);
    assert_eq!(tokens[1].value, "-7");
    assert_eq!(tokens[2].value, "0");
}

#[test]
fn test_tokenize_strings() {
    let tokens = lex(r#"Transmission ( "hello there world" ) ; "one""#);

    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "\"hello there world\"");
    assert_eq!(tokens[2].text(), "hello there world");
    assert_eq!(tokens[5].kind, TokenKind::String);
    assert_eq!(tokens[5].value, "\"one\"");
}

#[test]
fn test_tokenize_operators() {
    let tokens = lex("+ - * / ++ -- = == != > < >= <= && ||");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Greater,
            TokenKind::Less,
            TokenKind::GreaterEquals,
            TokenKind::LessEquals,
            TokenKind::And,
            TokenKind::Or,
        ]
    );
}

#[test]
fn test_tokenize_separators() {
    let tokens = lex("( ) { } , ;");

    assert_eq!(
        tags(&tokens),
        vec!["sep_op_par", "sep_cl_par", "sep_op_brac", "sep_cl_brac", "sep_comma", "sep_semicolon"]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("Comet x = 5 ; /* a comment\nspanning lines */ x = 6 ; /*short*/");

    assert_eq!(
        tags(&tokens),
        vec![
            "comet_token", "id_x", "arith_assign", "cmt_5", "sep_semicolon",
            "id_x", "arith_assign", "cmt_6", "sep_semicolon",
        ]
    );
}

#[test]
fn test_tokenize_simple_program_tags() {
    let tokens = lex("Comet x = 5 ;\nTransmission ( x ) ;");

    assert_eq!(
        tags(&tokens),
        vec![
            "comet_token", "id_x", "arith_assign", "cmt_5", "sep_semicolon",
            "transmission_token", "sep_op_par", "id_x", "sep_cl_par", "sep_semicolon",
        ]
    );
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = lex("Comet  x = 5 ;");

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 7);
    assert_eq!(*tokens[1].span.start.1, "test.cosmo");
}

#[test]
fn test_tokenize_empty_source() {
    assert!(lex("  \n\t ").is_empty());
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("Comet x = 5 @ ;".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_operator_glued_to_word_is_unrecognised() {
    let error = tokenize("x = 5;".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_reserved_word_misuse() {
    let error = tokenize("comet x = 5 ;".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "ReservedWordMisuse");
    assert!(error.get_tip().to_string().contains("Comet"));
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("Transmission ( \"never closed ) ;".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedString");
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("Comet x = 5 ; /* open".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedComment");
}

#[test]
fn test_from_tag_keywords_win_over_literals() {
    let token = Token::from_tag("comet_token", Position::null()).unwrap();
    assert_eq!(token.kind, TokenKind::Comet);

    let token = Token::from_tag("comet_12", Position::null()).unwrap();
    assert_eq!(token.kind, TokenKind::CometLiteral);
    assert_eq!(token.value, "12");

    let token = Token::from_tag("cmt_-3", Position::null()).unwrap();
    assert_eq!(token.kind, TokenKind::CometLiteral);
    assert_eq!(token.value, "-3");
}

#[test]
fn test_from_tag_identifier_and_string() {
    let token = Token::from_tag("id_count", Position::null()).unwrap();
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.value, "count");

    let token = Token::from_tag("\"hi\"", Position::null()).unwrap();
    assert_eq!(token.kind, TokenKind::String);
}

#[test]
fn test_from_tag_malformed() {
    let error = Token::from_tag("sep_bogus", Position::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedTag");

    let error = Token::from_tag("cmt_abc", Position::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedTag");
}

#[test]
fn test_tags_read_back_into_equal_kinds() {
    let source = "Comet x = 5 ; Launch { x = x + 1 ; } Whirl ( x < 3 ) ; Transmission ( \"done now\" ) ;";
    let tokens = lex(source);
    let text = tags(&tokens).join(" ");

    let reread = tokens_from_tags(text, None).unwrap();
    let original: Vec<(TokenKind, String)> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
    let parsed: Vec<(TokenKind, String)> = reread.iter().map(|t| (t.kind, t.value.clone())).collect();

    assert_eq!(original, parsed);
}

#[test]
fn test_tokens_from_tags_unterminated_string() {
    let error = tokens_from_tags("transmission_token sep_op_par \"open".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedString");
}
