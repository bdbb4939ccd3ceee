use std::collections::BTreeMap;

use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// One lexical binding environment, identifier to textual value.
pub type Frame = BTreeMap<String, String>;

/// Stack of scope frames, innermost last.
///
/// Frames that have been popped are kept in `history` in the order they were
/// closed, for the scope dump.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
    history: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::new());
        debug!("enter scope {}", self.frames.len());
    }

    pub fn pop(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug!("exit scope {} with {} binding(s)", self.frames.len() + 1, frame.len());
            self.history.push(frame);
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn history(&self) -> &[Frame] {
        &self.history
    }

    /// Binds `name` in the innermost frame.
    pub fn declare(&mut self, name: &str, value: String, position: Position) -> Result<(), Error> {
        if self.frames.is_empty() {
            self.push();
        }

        let index = self.frames.len() - 1;
        let innermost = &mut self.frames[index];
        if innermost.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::AlreadyDeclared {
                    variable: name.to_string(),
                },
                position,
            ));
        }

        innermost.insert(name.to_string(), value);
        Ok(())
    }

    /// Resolves `name` innermost-first.
    pub fn lookup(&self, name: &str) -> Option<&String> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn resolve(&self, name: &str, position: &Position) -> Result<String, Error> {
        self.lookup(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::Undeclared {
                    variable: name.to_string(),
                },
                position.clone(),
            )
        })
    }

    /// Overwrites the binding in the nearest frame that declares `name`.
    pub fn assign(&mut self, name: &str, value: String, position: Position) -> Result<(), Error> {
        match self.frames.iter_mut().rev().find(|frame| frame.contains_key(name)) {
            Some(frame) => {
                frame.insert(name.to_string(), value);
                Ok(())
            }
            None => Err(Error::new(
                ErrorImpl::Undeclared {
                    variable: name.to_string(),
                },
                position,
            )),
        }
    }
}
