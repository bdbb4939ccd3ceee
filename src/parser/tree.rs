use std::fmt::Display;

use crate::lexer::tokens::{Token, TokenKind};

use super::symbols::NonTerminal;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeLabel {
    Program,
    Token(Token),
    NonTerminal(NonTerminal),
}

impl Display for NodeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeLabel::Program => write!(f, "Program"),
            NodeLabel::Token(token) => write!(f, "{}", token.tag()),
            NodeLabel::NonTerminal(nt) => write!(f, "{}", nt),
        }
    }
}

/// A parse tree node owning its children in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTreeNode {
    pub label: NodeLabel,
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    pub fn new(label: NodeLabel) -> Self {
        ParseTreeNode {
            label,
            children: vec![],
        }
    }

    pub fn program() -> Self {
        ParseTreeNode::new(NodeLabel::Program)
    }

    pub fn leaf(token: Token) -> Self {
        ParseTreeNode::new(NodeLabel::Token(token))
    }

    pub fn add_child(&mut self, child: ParseTreeNode) {
        self.children.push(child);
    }

    /// Re-parents `width` children starting at `start` under a new node
    /// labelled `lhs`, which takes the place of the first of them.
    pub fn collapse(&mut self, start: usize, width: usize, lhs: NonTerminal) {
        let mut reduced = ParseTreeNode::new(NodeLabel::NonTerminal(lhs));
        reduced.children = self.children.drain(start..start + width).collect();
        self.children.insert(start, reduced);
    }

    pub fn non_terminal(&self) -> Option<NonTerminal> {
        match &self.label {
            NodeLabel::NonTerminal(nt) => Some(*nt),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.label {
            NodeLabel::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn is(&self, nt: NonTerminal) -> bool {
        self.non_terminal() == Some(nt)
    }

    /// First direct child labelled `nt`.
    pub fn child(&self, nt: NonTerminal) -> Option<&ParseTreeNode> {
        self.children.iter().find(|child| child.is(nt))
    }

    /// First direct child that is a token of `kind`.
    pub fn token_child(&self, kind: TokenKind) -> Option<&Token> {
        self.children
            .iter()
            .filter_map(|child| child.token())
            .find(|token| token.kind == kind)
    }

    /// Every token under this node, left to right.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = vec![];
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if let NodeLabel::Token(token) = &self.label {
            out.push(token);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Indented text rendering, one `|____` per depth level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"|____".repeat(depth));
        out.push_str(&self.label.to_string());
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}
