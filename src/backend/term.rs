//! Input trees.
use crate::backend::syntax::{Literal, Syntax};
use std::fmt::{self, Display, Formatter};

/// A node of a syntax tree, as handed over by a parser front end.
///
/// Terms are finite, acyclic and owned as a strict tree.
#[derive(Hash, Clone, Debug, Default, PartialEq, Eq)]
pub enum Term {
    /// Placeholder for an absent child (e.g. a missing initializer).
    #[default]
    Empty,
    Roll(Box<Syntax<Term>>),
}

impl Term {
    pub fn roll(s: Syntax<Term>) -> Self {
        Term::Roll(Box::new(s))
    }

    pub fn apply(callee: Term, args: Vec<Term>) -> Self {
        Term::roll(Syntax::Apply(callee, args))
    }

    pub fn abstraction(params: Vec<Term>, body: Term) -> Self {
        Term::roll(Syntax::Abstract(params, body))
    }

    pub fn assign(name: impl Into<String>, value: Term) -> Self {
        Term::roll(Syntax::Assign(name.into(), value))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::roll(Syntax::Variable(name.into()))
    }

    pub fn literal(value: Literal) -> Self {
        Term::roll(Syntax::Literal(value))
    }

    pub fn integer(value: i64) -> Self {
        Term::literal(Literal::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Term::literal(Literal::Boolean(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Term::literal(Literal::Text(value.into()))
    }

    pub fn group(name: Term, members: Vec<Term>) -> Self {
        Term::roll(Syntax::Group(name, members))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Term::Empty)
    }

    /// Number of non-empty nodes.
    pub fn size(&self) -> usize {
        match self {
            Term::Empty => 0,
            Term::Roll(s) => 1 + s.children().into_iter().map(Term::size).sum::<usize>(),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::Empty => Ok(()),
            Term::Roll(s) => write!(f, "{s}"),
        }
    }
}
