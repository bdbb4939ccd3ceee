//! Expression evaluation over parse tree nodes.
//!
//! Arithmetic is integer-only: a flattened expression is folded for `*` and
//! `/` first, left to right, then for `+` and `-`. Relational operands are
//! compared as floating point numbers. Logical chains evaluate every
//! relational operand before combining them.

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{symbols::NonTerminal, tree::ParseTreeNode},
    Position,
};

use super::scope::ScopeStack;

pub const COMET_TYPE: &str = "a comet (integer)";

fn malformed(message: &str, position: Position) -> Error {
    Error::new(
        ErrorImpl::MalformedExpression {
            message: message.to_string(),
        },
        position,
    )
}

/// Start of the first token under `node`, for error reporting.
pub fn node_position(node: &ParseTreeNode) -> Position {
    node.leaves()
        .first()
        .map(|token| token.span.start.clone())
        .unwrap_or_else(Position::null)
}

/// The single token under an `identifier`, `comet_literal` or `string` node.
pub fn leaf_token(node: &ParseTreeNode) -> Result<&Token, Error> {
    node.leaves()
        .first()
        .copied()
        .ok_or_else(|| malformed("expected a token", Position::null()))
}

pub fn parse_comet(text: &str, position: &Position) -> Result<i64, Error> {
    text.trim().parse::<i64>().map_err(|_| {
        Error::new(
            ErrorImpl::TypeMismatch {
                expected: COMET_TYPE.to_string(),
                received: text.to_string(),
            },
            position.clone(),
        )
    })
}

/// Identifiers resolve through the scope stack, literals stand for themselves.
pub fn operand_text(token: &Token, scopes: &ScopeStack) -> Result<String, Error> {
    match token.kind {
        TokenKind::Identifier => scopes.resolve(&token.value, &token.span.start),
        TokenKind::CometLiteral => Ok(token.value.clone()),
        _ => Err(malformed(
            &format!("`{}` is not an operand", token.value),
            token.span.start.clone(),
        )),
    }
}

fn operand_value(token: &Token, scopes: &ScopeStack) -> Result<i64, Error> {
    let text = operand_text(token, scopes)?;
    parse_comet(&text, &token.span.start)
}

/// Evaluates an `arithExp` subtree.
pub fn evaluate_arithmetic(node: &ParseTreeNode, scopes: &ScopeStack) -> Result<i64, Error> {
    let leaves = node.leaves();
    let Some((first, rest)) = leaves.split_first() else {
        return Err(malformed("empty arithmetic expression", Position::null()));
    };

    let mut operands = vec![operand_value(first, scopes)?];
    let mut operators: Vec<&Token> = vec![];

    for pair in rest.chunks(2) {
        let [operator, operand] = pair else {
            return Err(malformed("operator is missing its right operand", pair[0].span.start.clone()));
        };
        if !operator.kind.is_arithmetic() {
            return Err(malformed(
                &format!("`{}` is not an arithmetic operator", operator.value),
                operator.span.start.clone(),
            ));
        }
        operators.push(*operator);
        operands.push(operand_value(operand, scopes)?);
    }

    // `*` and `/`
    let mut values = vec![operands[0]];
    let mut additive: Vec<&Token> = vec![];

    for (i, operator) in operators.iter().enumerate() {
        let rhs = operands[i + 1];

        if operator.kind.is_multiplicative() {
            let lhs = values.pop().unwrap_or_default();
            let result = match operator.kind {
                TokenKind::Star => lhs.wrapping_mul(rhs),
                _ => {
                    if rhs == 0 {
                        return Err(Error::new(ErrorImpl::DivisionByZero, operator.span.start.clone()));
                    }
                    lhs.wrapping_div(rhs)
                }
            };
            trace!("arithmetic: {} {} {} = {}", lhs, operator.value, rhs, result);
            values.push(result);
        } else {
            additive.push(operator);
            values.push(rhs);
        }
    }

    // `+` and `-`
    let mut result = values[0];
    for (i, operator) in additive.iter().enumerate() {
        let rhs = values[i + 1];
        let before = result;
        result = match operator.kind {
            TokenKind::Plus => result.wrapping_add(rhs),
            _ => result.wrapping_sub(rhs),
        };
        trace!("arithmetic: {} {} {} = {}", before, operator.value, rhs, result);
    }

    Ok(result)
}

fn relational_operand(node: &ParseTreeNode, scopes: &ScopeStack) -> Result<f64, Error> {
    let token = leaf_token(node)?;
    let text = operand_text(token, scopes)?;

    text.trim().parse::<f64>().map_err(|_| {
        Error::new(
            ErrorImpl::TypeMismatch {
                expected: COMET_TYPE.to_string(),
                received: text.clone(),
            },
            token.span.start.clone(),
        )
    })
}

/// Evaluates a `relationalExp` node: operand, operator, operand.
pub fn evaluate_relational(node: &ParseTreeNode, scopes: &ScopeStack) -> Result<bool, Error> {
    let position = node_position(node);

    let mut operands = node
        .children
        .iter()
        .filter(|child| child.is(NonTerminal::Identifier) || child.is(NonTerminal::CometLiteral));
    let left = operands
        .next()
        .ok_or_else(|| malformed("relational expression has no left operand", position.clone()))?;
    let right = operands
        .next()
        .ok_or_else(|| malformed("relational expression has no right operand", position.clone()))?;
    let operator = node
        .child(NonTerminal::RelationalOp)
        .ok_or_else(|| malformed("relational expression has no operator", position.clone()))?;

    let left = relational_operand(left, scopes)?;
    let right = relational_operand(right, scopes)?;

    let result = match leaf_token(operator)?.kind {
        TokenKind::NotEquals => left != right,
        TokenKind::Less => left < right,
        TokenKind::LessEquals => left <= right,
        TokenKind::Greater => left > right,
        TokenKind::GreaterEquals => left >= right,
        TokenKind::Equals => left == right,
        _ => return Err(malformed("unknown relational operator", position)),
    };

    Ok(result)
}

/// Evaluates a `logicalExp` chain. Every relational expression is evaluated
/// before the chain is folded left to right.
pub fn evaluate_logical(node: &ParseTreeNode, scopes: &ScopeStack) -> Result<bool, Error> {
    let position = node_position(node);

    let values = node
        .children
        .iter()
        .filter(|child| child.is(NonTerminal::RelationalExp))
        .map(|child| evaluate_relational(child, scopes))
        .collect::<Result<Vec<bool>, Error>>()?;
    let operators = node
        .children
        .iter()
        .filter(|child| child.is(NonTerminal::LogicalOp))
        .map(|child| leaf_token(child).map(|token| token.kind))
        .collect::<Result<Vec<TokenKind>, Error>>()?;

    if values.is_empty() || values.len() != operators.len() + 1 {
        return Err(malformed("logical expression is missing an operand", position));
    }

    let mut result = values[0];
    for (operator, value) in operators.iter().zip(values.iter().skip(1)) {
        result = match operator {
            TokenKind::And => result && *value,
            TokenKind::Or => result || *value,
            _ => return Err(malformed("unknown logical operator", position)),
        };
    }

    Ok(result)
}

/// Evaluates a `conditionalExp`: `( relationalExp | logicalExp )`.
pub fn evaluate_condition(node: &ParseTreeNode, scopes: &ScopeStack) -> Result<bool, Error> {
    if let Some(logical) = node.child(NonTerminal::LogicalExp) {
        return evaluate_logical(logical, scopes);
    }
    if let Some(relational) = node.child(NonTerminal::RelationalExp) {
        return evaluate_relational(relational, scopes);
    }

    Err(malformed("condition has no expression", node_position(node)))
}
