use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{
        symbols::NonTerminal,
        tree::{NodeLabel, ParseTreeNode},
    },
    Position,
};

use super::{
    eval::{evaluate_arithmetic, evaluate_condition, leaf_token, node_position, COMET_TYPE},
    scope::{Frame, ScopeStack},
};

pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 200;

lazy_static! {
    static ref RECEIVED_COMET: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
}

/// The latest write to an identifier, with the scope stack as it was then.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntry {
    pub identifier: String,
    pub value: String,
    pub scopes: Vec<Frame>,
}

/// Tree-walking interpreter for accepted parse trees.
///
/// Program output and reception prompts go to `output`; reception reads one
/// line at a time from `input`.
pub struct Interpreter<R: BufRead, W: Write> {
    scopes: ScopeStack,
    value_table: BTreeMap<String, VariableEntry>,
    input: R,
    output: W,
    max_loop_iterations: usize,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interpreter {
            scopes: ScopeStack::new(),
            value_table: BTreeMap::new(),
            input,
            output,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }

    pub fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = limit;
        self
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn value_table(&self) -> &BTreeMap<String, VariableEntry> {
        &self.value_table
    }

    /// Frames closed so far, in the order they were popped.
    pub fn scope_history(&self) -> &[Frame] {
        self.scopes.history()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Executes `node` and everything beneath it.
    pub fn interpret(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let nt = match &node.label {
            NodeLabel::Program => return self.scoped(|i| i.interpret_children(node)),
            NodeLabel::Token(_) => return Ok(()),
            NodeLabel::NonTerminal(nt) => *nt,
        };

        match nt {
            NonTerminal::DecStmt => self.declaration(node),
            NonTerminal::AssignStmt => self.assignment(node),
            NonTerminal::TransmissionStmt => self.transmission(node),
            NonTerminal::ReceptionStmt => self.reception(node),
            NonTerminal::ArithExp => {
                let value = evaluate_arithmetic(node, &self.scopes)?;
                debug!("discarding value {} of a bare arithmetic expression", value);
                Ok(())
            }
            NonTerminal::OrbitStmt => self.orbit(node),
            NonTerminal::WhirlLoop => self.whirl(node),
            NonTerminal::LaunchWhirlLoop => self.launch_whirl(node),
            _ => self.interpret_children(node),
        }
    }

    fn interpret_children(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        for child in &node.children {
            self.interpret(child)?;
        }
        Ok(())
    }

    /// Runs `body` inside a fresh frame. The frame is popped even when `body`
    /// fails.
    fn scoped<F>(&mut self, body: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.scopes.push();
        let result = body(self);
        self.scopes.pop();
        result
    }

    fn record(&mut self, identifier: &str, value: &str) {
        self.value_table.insert(
            identifier.to_string(),
            VariableEntry {
                identifier: identifier.to_string(),
                value: value.to_string(),
                scopes: self.scopes.frames().to_vec(),
            },
        );
    }

    fn write_line(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.output, "{}", text).map_err(|e| io_error(e, Position::null()))
    }

    /// Value of the right-hand side of a declaration or assignment.
    fn value_of(&self, node: &ParseTreeNode) -> Result<String, Error> {
        match node.non_terminal() {
            Some(NonTerminal::Identifier) => {
                let token = leaf_token(node)?;
                self.scopes.resolve(&token.value, &token.span.start)
            }
            Some(NonTerminal::CometLiteral) => Ok(leaf_token(node)?.value.clone()),
            Some(NonTerminal::ArithExp) => Ok(evaluate_arithmetic(node, &self.scopes)?.to_string()),
            _ => Err(Error::new(
                ErrorImpl::MalformedExpression {
                    message: format!("`{}` cannot be assigned", node.label),
                },
                node_position(node),
            )),
        }
    }

    /// Target identifier and value node of `[Comet] identifier = value ;`.
    fn binding_parts<'a>(&self, node: &'a ParseTreeNode) -> Result<(&'a Token, &'a ParseTreeNode), Error> {
        let target = node
            .child(NonTerminal::Identifier)
            .ok_or_else(|| missing("identifier", node))?;
        let value = node
            .children
            .iter()
            .skip_while(|child| child.token().map(|t| t.kind) != Some(TokenKind::Assignment))
            .nth(1)
            .ok_or_else(|| missing("value", node))?;

        Ok((leaf_token(target)?, value))
    }

    fn declaration(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let (target, value_node) = self.binding_parts(node)?;
        let value = self.value_of(value_node)?;

        self.scopes.declare(&target.value, value.clone(), target.span.start.clone())?;
        self.record(&target.value, &value);
        debug!("declared {} = {}", target.value, value);
        Ok(())
    }

    fn assignment(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let (target, value_node) = self.binding_parts(node)?;
        let value = self.value_of(value_node)?;

        self.scopes.assign(&target.value, value.clone(), target.span.start.clone())?;
        self.record(&target.value, &value);
        debug!("assigned {} = {}", target.value, value);
        Ok(())
    }

    fn transmission(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let io = node.child(NonTerminal::IoStmt).ok_or_else(|| missing("ioStmt", node))?;

        let text = if let Some(string) = io.child(NonTerminal::String) {
            leaf_token(string)?.text()
        } else if let Some(identifier) = io.child(NonTerminal::Identifier) {
            let token = leaf_token(identifier)?;
            self.scopes.resolve(&token.value, &token.span.start)?
        } else {
            return Err(missing("transmission argument", io));
        };

        self.write_line(&text)
    }

    fn reception(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let target = node
            .child(NonTerminal::Identifier)
            .ok_or_else(|| missing("identifier", node))
            .and_then(leaf_token)?;
        let position = target.span.start.clone();
        self.scopes.resolve(&target.value, &position)?;

        let io = node.child(NonTerminal::IoStmt).ok_or_else(|| missing("ioStmt", node))?;
        let prompt = if let Some(string) = io.child(NonTerminal::String) {
            leaf_token(string)?.text()
        } else if let Some(identifier) = io.child(NonTerminal::Identifier) {
            let token = leaf_token(identifier)?;
            self.scopes.resolve(&token.value, &token.span.start)?
        } else {
            String::new()
        };

        write!(self.output, "{}", prompt).map_err(|e| io_error(e, position.clone()))?;
        self.output.flush().map_err(|e| io_error(e, position.clone()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| io_error(e, position.clone()))?;
        if read == 0 {
            return Err(Error::new(ErrorImpl::InputExhausted, position));
        }

        let received = line.trim().to_string();
        if !RECEIVED_COMET.is_match(&received) {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: COMET_TYPE.to_string(),
                    received,
                },
                position,
            ));
        }

        self.scopes.assign(&target.value, received.clone(), position)?;
        self.record(&target.value, &received);
        info!("received {} = {}", target.value, received);
        Ok(())
    }

    /// Runs the body of a `stmt` node: `{ expr+ }`.
    fn run_body(&mut self, stmt: &ParseTreeNode) -> Result<(), Error> {
        self.interpret_children(stmt)
    }

    fn guard_and_body<'a>(
        &self,
        node: &'a ParseTreeNode,
    ) -> Result<(&'a ParseTreeNode, &'a ParseTreeNode), Error> {
        let condition = node
            .child(NonTerminal::ConditionalExp)
            .ok_or_else(|| missing("conditionalExp", node))?;
        let body = node.child(NonTerminal::Stmt).ok_or_else(|| missing("stmt", node))?;
        Ok((condition, body))
    }

    /// `Orbit`, then an optional `Navigate`, then an optional `Propel`. The
    /// first branch whose guard holds runs, each in its own frame.
    fn orbit(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let (condition, body) = self.guard_and_body(node)?;
        if evaluate_condition(condition, &self.scopes)? {
            return self.scoped(|i| i.run_body(body));
        }

        if let Some(navigate) = node.child(NonTerminal::NavigateStmt) {
            let (condition, body) = self.guard_and_body(navigate)?;
            if evaluate_condition(condition, &self.scopes)? {
                return self.scoped(|i| i.run_body(body));
            }
        }

        if let Some(propel) = node.child(NonTerminal::PropelStmt) {
            let body = propel.child(NonTerminal::Stmt).ok_or_else(|| missing("stmt", propel))?;
            return self.scoped(|i| i.run_body(body));
        }

        Ok(())
    }

    fn check_iterations(&self, iterations: usize, node: &ParseTreeNode) -> Result<(), Error> {
        if iterations > self.max_loop_iterations {
            return Err(Error::new(
                ErrorImpl::LoopIterationLimitExceeded {
                    limit: self.max_loop_iterations,
                },
                node_position(node),
            ));
        }
        Ok(())
    }

    /// Pre-tested loop. The guard is re-read after each iteration's frame is
    /// popped.
    fn whirl(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let (condition, body) = self.guard_and_body(node)?;
        let mut iterations = 0;

        while evaluate_condition(condition, &self.scopes)? {
            iterations += 1;
            self.check_iterations(iterations, node)?;
            self.scoped(|i| i.run_body(body))?;
        }

        debug!("whirl loop finished after {} iteration(s)", iterations);
        Ok(())
    }

    /// Post-tested loop, the body runs at least once.
    fn launch_whirl(&mut self, node: &ParseTreeNode) -> Result<(), Error> {
        let (condition, body) = self.guard_and_body(node)?;
        let mut iterations = 0;

        loop {
            iterations += 1;
            self.check_iterations(iterations, node)?;
            self.scoped(|i| i.run_body(body))?;

            if !evaluate_condition(condition, &self.scopes)? {
                break;
            }
        }

        debug!("launch loop finished after {} iteration(s)", iterations);
        Ok(())
    }
}

fn missing(what: &str, node: &ParseTreeNode) -> Error {
    Error::new(
        ErrorImpl::MalformedExpression {
            message: format!("`{}` is missing its {}", node.label, what),
        },
        node_position(node),
    )
}

fn io_error(error: std::io::Error, position: Position) -> Error {
    Error::new(
        ErrorImpl::Io {
            message: error.to_string(),
        },
        position,
    )
}
