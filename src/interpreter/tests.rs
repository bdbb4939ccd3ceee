//! Unit tests for the interpreter module.
//!
//! This module contains tests for program execution including:
//! - Declarations, assignments and scope resolution
//! - Arithmetic precedence and division by zero
//! - Transmission and reception
//! - Orbit cascades and logical conditions
//! - Loops and the iteration cap

use std::io::Cursor;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::{parse, Verdict},
};

use super::{
    interpreter::{Interpreter, DEFAULT_MAX_LOOP_ITERATIONS},
    scope::ScopeStack,
};

type TestInterpreter = Interpreter<Cursor<String>, Vec<u8>>;

fn run_configured(
    source: &str,
    interpreter: TestInterpreter,
) -> (Result<(), Error>, TestInterpreter) {
    let tokens = tokenize(source.to_string(), Some("test.cosmo".to_string())).unwrap();
    let (parser, verdict) = parse(tokens);
    assert_eq!(verdict, Verdict::Accept, "program should parse: {}", source);

    let mut interpreter = interpreter;
    let result = interpreter.interpret(parser.tree());
    (result, interpreter)
}

fn run_with_input(source: &str, input: &str) -> (Result<(), Error>, TestInterpreter) {
    run_configured(source, Interpreter::new(Cursor::new(input.to_string()), Vec::new()))
}

fn run(source: &str) -> (Result<(), Error>, TestInterpreter) {
    run_with_input(source, "")
}

fn output(interpreter: &TestInterpreter) -> String {
    String::from_utf8(interpreter.output().clone()).unwrap()
}

fn error_name(result: Result<(), Error>) -> String {
    result.unwrap_err().get_error_name().to_string()
}

#[test]
fn test_transmission_of_declared_value() {
    let (result, interpreter) = run("Comet x = 5 ; Transmission ( x ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "5\n");
}

#[test]
fn test_transmission_of_string_strips_quotes() {
    let (result, interpreter) = run("Transmission ( \"hello there\" ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "hello there\n");
}

#[test]
fn test_transmission_of_undeclared() {
    let (result, _) = run("Transmission ( ghost ) ;");
    assert_eq!(error_name(result), "Undeclared");
}

#[test]
fn test_arithmetic_precedence() {
    let (result, interpreter) = run(
        "Comet x = 2 + 3 * 4 ; Comet y = 10 - 6 / 2 - 1 ; Comet z = 7 / 2 * 2 ; \
         Transmission ( x ) ; Transmission ( y ) ; Transmission ( z ) ;",
    );

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "14\n6\n6\n");
}

#[test]
fn test_arithmetic_with_identifiers() {
    let (result, interpreter) = run("Comet a = 4 ; Comet b = 3 ; Comet c = a * b - a ; Transmission ( c ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "8\n");
}

#[test]
fn test_declaration_from_identifier_copies_value() {
    let (result, interpreter) = run("Comet a = 7 ; Comet b = a ; a = 1 ; Transmission ( b ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "7\n");
}

#[test]
fn test_division_by_zero() {
    let (result, _) = run("Comet a = 4 ; Comet b = 0 ; Comet c = a / b ;");
    assert_eq!(error_name(result), "DivisionByZero");
}

#[test]
fn test_undeclared_operand_in_arithmetic() {
    let (result, _) = run("a + 1");

    let error = result.unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::Undeclared {
            variable: "a".to_string()
        }
    );
}

#[test]
fn test_whirl_counts_down_to_zero() {
    let (result, interpreter) = run(
        "Comet x = 10 ; Comet n = 0 ; \
         Whirl ( x != 0 ) { x = x - 1 ; n = n + 1 ; } ; \
         Transmission ( x ) ; Transmission ( n ) ;",
    );

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "0\n10\n");
    assert_eq!(interpreter.value_table()["x"].value, "0");
}

#[test]
fn test_whirl_with_false_guard_never_runs() {
    let (result, interpreter) = run("Comet x = 0 ; Whirl ( x > 0 ) { Transmission ( \"body\" ) ; } ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "");
}

#[test]
fn test_launch_whirl_runs_at_least_once() {
    let (result, interpreter) = run("Comet x = 5 ; Launch { x = x + 1 ; } Whirl ( x < 3 ) ; Transmission ( x ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "6\n");
}

#[test]
fn test_launch_whirl_repeats_while_guard_holds() {
    let (result, interpreter) = run("Comet x = 0 ; Launch { x = x + 1 ; } Whirl ( x < 3 ) ; Transmission ( x ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "3\n");
}

#[test]
fn test_loop_limit_exceeded() {
    let (result, interpreter) = run("Comet x = 0 ; Whirl ( x < 1000 ) { x = x + 1 ; } ;");

    let error = result.unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::LoopIterationLimitExceeded {
            limit: DEFAULT_MAX_LOOP_ITERATIONS
        }
    );
    assert_eq!(interpreter.value_table()["x"].value, "200");
}

#[test]
fn test_loop_at_limit_is_allowed() {
    let (result, interpreter) = run("Comet x = 0 ; Whirl ( x < 200 ) { x = x + 1 ; } ; Transmission ( x ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "200\n");
}

#[test]
fn test_launch_loop_limit_exceeded() {
    let (result, _) = run("Comet x = 0 ; Launch { x = x + 1 ; } Whirl ( x > 0 ) ;");
    assert_eq!(error_name(result), "LoopIterationLimitExceeded");
}

#[test]
fn test_custom_loop_limit() {
    let interpreter = Interpreter::new(Cursor::new(String::new()), Vec::new()).with_max_loop_iterations(5);
    let (result, _) = run_configured("Comet x = 0 ; Whirl ( x < 10 ) { x = x + 1 ; } ;", interpreter);

    assert_eq!(
        result.unwrap_err().get_impl(),
        &ErrorImpl::LoopIterationLimitExceeded { limit: 5 }
    );
}

#[test]
fn test_redeclaration_in_same_scope() {
    let (result, _) = run("Comet x = 1 ; Comet x = 2 ;");
    assert_eq!(error_name(result), "AlreadyDeclared");
}

#[test]
fn test_redeclaration_in_nested_scope_shadows() {
    let (result, interpreter) = run(
        "Comet x = 1 ; Orbit ( x == 1 ) { Comet x = 2 ; Transmission ( x ) ; } ; Transmission ( x ) ;",
    );

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "2\n1\n");
}

#[test]
fn test_assignment_from_inner_scope_updates_outer() {
    let (result, interpreter) = run("Comet x = 1 ; Orbit ( x == 1 ) { x = 5 ; } ; Transmission ( x ) ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "5\n");
}

#[test]
fn test_assignment_to_undeclared() {
    let (result, _) = run("y = 1 ;");
    assert_eq!(error_name(result), "Undeclared");
}

#[test]
fn test_inner_declaration_not_visible_after_scope() {
    let (result, _) = run("Comet x = 1 ; Orbit ( x == 1 ) { Comet y = 2 ; } ; Transmission ( y ) ;");
    assert_eq!(error_name(result), "Undeclared");
}

#[test]
fn test_orbit_cascade_takes_first_true_branch() {
    let program = |x: i64| {
        format!(
            "Comet x = {} ; \
             Orbit ( x > 5 ) {{ Transmission ( \"big\" ) ; }} \
             Navigate ( x > 2 ) {{ Transmission ( \"medium\" ) ; }} \
             Propel {{ Transmission ( \"small\" ) ; }} ;",
            x
        )
    };

    for (x, expected) in [(9, "big\n"), (3, "medium\n"), (1, "small\n")] {
        let (result, interpreter) = run(&program(x));
        assert!(result.is_ok());
        assert_eq!(output(&interpreter), expected, "x = {}", x);
    }
}

#[test]
fn test_orbit_without_else_is_noop_when_false() {
    let (result, interpreter) = run("Comet x = 1 ; Orbit ( x > 5 ) { Transmission ( \"big\" ) ; } ;");

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "");
}

#[test]
fn test_logical_conditions() {
    let (result, interpreter) = run(
        "Comet a = 3 ; \
         Orbit ( a > 1 && a < 2 ) { Transmission ( \"and\" ) ; } Propel { Transmission ( \"not and\" ) ; } ; \
         Orbit ( a > 5 || a == 3 ) { Transmission ( \"or\" ) ; } ;",
    );

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "not and\nor\n");
}

#[test]
fn test_logical_condition_evaluates_every_operand() {
    let (result, _) = run("Comet a = 3 ; Orbit ( a > 1 || ghost < 2 ) { a = 1 ; } ;");
    assert_eq!(error_name(result), "Undeclared");
}

#[test]
fn test_reception_binds_integer() {
    let (result, interpreter) = run_with_input(
        "Comet n = 0 ; n = Reception ( \"Enter:\" ) ; Transmission ( n ) ;",
        "42\n",
    );

    assert!(result.is_ok());
    assert_eq!(output(&interpreter), "Enter:42\n");
    assert_eq!(interpreter.value_table()["n"].value, "42");
}

#[test]
fn test_reception_rejects_non_integer() {
    let (result, _) = run_with_input("Comet n = 0 ; n = Reception ( \"Enter:\" ) ;", "abc\n");

    assert_eq!(
        result.unwrap_err().get_impl(),
        &ErrorImpl::TypeMismatch {
            expected: "a comet (integer)".to_string(),
            received: "abc".to_string(),
        }
    );
}

#[test]
fn test_reception_requires_declaration() {
    let (result, _) = run_with_input("m = Reception ( \"Enter:\" ) ;", "1\n");
    assert_eq!(error_name(result), "Undeclared");
}

#[test]
fn test_reception_input_exhausted() {
    let (result, _) = run_with_input("Comet n = 0 ; n = Reception ( \"Enter:\" ) ;", "");
    assert_eq!(error_name(result), "InputExhausted");
}

#[test]
fn test_decimal_reception_fails_in_arithmetic() {
    let (result, interpreter) = run_with_input(
        "Comet n = 0 ; n = Reception ( \"Enter:\" ) ; n = n + 1 ;",
        "2.5\n",
    );

    assert_eq!(error_name(result), "TypeMismatch");
    assert_eq!(interpreter.value_table()["n"].value, "2.5");
}

#[test]
fn test_scope_history_and_value_table() {
    let (result, interpreter) = run("Comet x = 1 ; Orbit ( x == 1 ) { Comet y = 2 ; } ;");
    assert!(result.is_ok());

    assert_eq!(interpreter.scopes().depth(), 0);

    let history = interpreter.scope_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["y"], "2");
    assert_eq!(history[1]["x"], "1");

    assert_eq!(interpreter.value_table()["x"].scopes.len(), 1);
    assert_eq!(interpreter.value_table()["y"].scopes.len(), 2);
}

#[test]
fn test_scope_stack_declare_and_assign() {
    let position = crate::Position::null();
    let mut scopes = ScopeStack::new();
    scopes.push();
    scopes.declare("x", "1".to_string(), position.clone()).unwrap();
    scopes.push();
    scopes.declare("x", "2".to_string(), position.clone()).unwrap();

    assert_eq!(scopes.lookup("x"), Some(&"2".to_string()));

    scopes.pop();
    scopes.assign("x", "3".to_string(), position.clone()).unwrap();
    assert_eq!(scopes.lookup("x"), Some(&"3".to_string()));

    assert!(scopes.assign("y", "0".to_string(), position).is_err());
}
