use std::fmt::Display;

use super::symbols::{NonTerminal, Symbol};

/// The bottom-up parse state.
///
/// Slots are allocated up front, one per input token. Occupied slots are kept
/// compacted at the front, so the occupied prefix reads as the sentential form
/// derived so far.
#[derive(Debug, Clone, Default)]
pub struct ParseStack {
    slots: Vec<Option<Symbol>>,
    len: usize,
}

impl ParseStack {
    pub fn with_capacity(capacity: usize) -> Self {
        ParseStack {
            slots: vec![None; capacity],
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        if index < self.len {
            self.slots[index].as_ref()
        } else {
            None
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.slots.iter().take(self.len).flatten()
    }

    pub fn shift(&mut self, symbol: Symbol) {
        if self.len < self.slots.len() {
            self.slots[self.len] = Some(symbol);
        } else {
            self.slots.push(Some(symbol));
        }
        self.len += 1;
    }

    /// Replaces `width` symbols starting at `start` with `lhs`, emptying the
    /// consumed slots, then compacts.
    pub fn reduce(&mut self, start: usize, width: usize, lhs: NonTerminal) {
        self.slots[start] = Some(Symbol::NonTerminal(lhs));
        for slot in &mut self.slots[start + 1..start + width] {
            *slot = None;
        }
        self.compact();
    }

    fn compact(&mut self) {
        let mut write = 0;
        for read in 0..self.slots.len() {
            if self.slots[read].is_some() {
                self.slots.swap(write, read);
                write += 1;
            }
        }
        self.len = write;
    }

    /// Renders the occupied symbols from `start` onward.
    pub fn render_from(&self, start: usize) -> String {
        self.symbols()
            .skip(start)
            .map(|symbol| symbol.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl Display for ParseStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_from(0))
    }
}
