//! Integration tests for the full pipeline.
//!
//! These tests run complete Cosmo programs from source text through
//! tokenization, shift-reduce parsing and interpretation.

use std::io::Cursor;

use cosmo::{
    format_error,
    lexer::lexer::{tokenize, tokens_from_tags},
    parser::{
        parser::{parse, Verdict},
        symbols::NonTerminal,
    },
    run_source,
};

fn run(source: &str, input: &str) -> (Verdict, String) {
    let report = run_source(
        source,
        Some("test.cosmo".to_string()),
        Cursor::new(input.to_string()),
        Vec::new(),
    )
    .unwrap();

    let output = report
        .interpreter
        .map(|interpreter| String::from_utf8(interpreter.into_output()).unwrap())
        .unwrap_or_default();
    (report.verdict, output)
}

#[test]
fn test_countdown_program() {
    let source = "
        /* count down from three */
        Comet n = 3 ;
        Whirl ( n > 0 ) {
            Transmission ( n ) ;
            n = n - 1 ;
        } ;
        Transmission ( \"liftoff\" ) ;
    ";

    let (verdict, output) = run(source, "");
    assert_eq!(verdict, Verdict::Accept);
    assert_eq!(output, "3\n2\n1\nliftoff\n");
}

#[test]
fn test_reception_drives_branching() {
    let source = "
        Comet speed = 0 ;
        speed = Reception ( \"Speed?\" ) ;
        Orbit ( speed >= 100 ) { Transmission ( \"fast\" ) ; }
        Navigate ( speed >= 10 ) { Transmission ( \"cruising\" ) ; }
        Propel { Transmission ( \"drifting\" ) ; } ;
    ";

    let (_, output) = run(source, "42\n");
    assert_eq!(output, "Speed?cruising\n");

    let (_, output) = run(source, "7\n");
    assert_eq!(output, "Speed?drifting\n");
}

#[test]
fn test_nested_loops_and_shadowing() {
    let source = "
        Comet total = 0 ;
        Comet i = 0 ;
        Whirl ( i < 3 ) {
            Comet j = 0 ;
            Whirl ( j < 2 ) {
                total = total + i * 2 ;
                j = j + 1 ;
            } ;
            i = i + 1 ;
        } ;
        Transmission ( total ) ;
    ";

    let (verdict, output) = run(source, "");
    assert_eq!(verdict, Verdict::Accept);
    assert_eq!(output, "12\n");
}

#[test]
fn test_rejected_program_is_not_run() {
    let (verdict, output) = run("Comet x = 5 Transmission ( x ) ;", "");

    assert_eq!(verdict, Verdict::Reject);
    assert_eq!(output, "");
}

#[test]
fn test_runtime_error_is_rendered_with_source_line() {
    let source = "Comet x = 1 ;\nx = x / 0 ;\n";
    let result = run_source(source, Some("div.cosmo".to_string()), Cursor::new(String::new()), Vec::new());

    let error = match result {
        Ok(_) => panic!("division by zero should fail"),
        Err(error) => error,
    };
    assert_eq!(error.get_error_name(), "DivisionByZero");

    let rendered = format_error(&error, source);
    assert!(rendered.contains("-> div.cosmo"));
    assert!(rendered.contains("2 | x = x / 0 ;"));
}

#[test]
fn test_lexing_error_aborts_run() {
    let result = run_source("Comet x = 5 # ;", None, Cursor::new(String::new()), Vec::new());

    match result {
        Ok(_) => panic!("unknown word should fail"),
        Err(error) => assert_eq!(error.get_error_name(), "UnrecognisedToken"),
    }
}

#[test]
fn test_tags_parse_like_source() {
    let source = "Comet x = 2 + 3 ; Transmission ( x ) ;";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let tags = tokens.iter().map(|token| token.tag()).collect::<Vec<_>>().join(" ");

    let (from_source, source_verdict) = parse(tokens);
    let (from_tags, tags_verdict) = parse(tokens_from_tags(tags, None).unwrap());

    assert_eq!(source_verdict, Verdict::Accept);
    assert_eq!(tags_verdict, Verdict::Accept);
    assert_eq!(from_source.tree().render(), from_tags.tree().render());
}

#[test]
fn test_tree_has_one_expr_per_statement() {
    let source = "Comet a = 1 ; Comet b = a + 2 ; Transmission ( b ) ;";
    let (parser, verdict) = parse(tokenize(source.to_string(), None).unwrap());

    assert_eq!(verdict, Verdict::Accept);
    assert_eq!(parser.tree().children.len(), 3);
    assert!(parser.tree().children.iter().all(|child| child.is(NonTerminal::Expr)));
}
