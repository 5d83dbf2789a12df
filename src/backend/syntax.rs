//! Syntax shapes, shared by input trees (`Syntax<Term>`) and their diffs
//! (`Syntax<Diff>`).
use std::fmt::{self, Display, Formatter};

/// A literal scalar. Equality is by value: two integer literals spelled
/// differently in source (`0x10` and `16`) still compare equal.
#[derive(Hash, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Integer(i64),
    Boolean(bool),
    /// Anything else (strings, floats, characters), kept in its source spelling.
    Text(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(x) => write!(f, "{x}"),
            Literal::Boolean(x) => write!(f, "{x}"),
            Literal::Text(x) => f.write_str(x),
        }
    }
}

/// The kind of a node together with its children, generic over the child
/// type so the same shapes describe both trees and diffs.
///
/// Positions holding a `Vec<A>` are ordered sequences and get aligned
/// element-wise; the others are compared one to one.
#[derive(Hash, Clone, Debug, PartialEq, Eq)]
pub enum Syntax<A> {
    /// A call: callee and arguments.
    Apply(A, Vec<A>),
    /// A function: parameters and body.
    Abstract(Vec<A>, A),
    /// A binding of a value to a name.
    Assign(String, A),
    Variable(String),
    Literal(Literal),
    /// Any other node: its (possibly changing) name and members.
    Group(A, Vec<A>),
}

impl<A> Syntax<A> {
    /// Short name of the shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Syntax::Apply(_, _) => "apply",
            Syntax::Abstract(_, _) => "abstract",
            Syntax::Assign(_, _) => "assign",
            Syntax::Variable(_) => "variable",
            Syntax::Literal(_) => "literal",
            Syntax::Group(_, _) => "group",
        }
    }

    /// Children in document order.
    pub fn children(&self) -> Vec<&A> {
        match self {
            Syntax::Apply(f, xs) => std::iter::once(f).chain(xs).collect(),
            Syntax::Abstract(xs, b) => xs.iter().chain(std::iter::once(b)).collect(),
            Syntax::Assign(_, x) => vec![x],
            Syntax::Variable(_) | Syntax::Literal(_) => vec![],
            Syntax::Group(n, xs) => std::iter::once(n).chain(xs).collect(),
        }
    }

    /// Rebuild the shape with new children, using `one` for single child
    /// positions and `many` for ordered sequences. Keys (names, literal
    /// values) are carried over as they are.
    pub fn map_with<B>(
        &self,
        mut one: impl FnMut(&A) -> B,
        mut many: impl FnMut(&[A]) -> Vec<B>,
    ) -> Syntax<B> {
        match self {
            Syntax::Apply(f, xs) => Syntax::Apply(one(f), many(xs.as_slice())),
            Syntax::Abstract(xs, b) => {
                let xs = many(xs.as_slice());
                Syntax::Abstract(xs, one(b))
            }
            Syntax::Assign(n, x) => Syntax::Assign(n.clone(), one(x)),
            Syntax::Variable(n) => Syntax::Variable(n.clone()),
            Syntax::Literal(l) => Syntax::Literal(l.clone()),
            Syntax::Group(n, xs) => Syntax::Group(one(n), many(xs.as_slice())),
        }
    }
}

fn write_joined<A: Display>(f: &mut Formatter<'_>, xs: &[A], sep: &str) -> fmt::Result {
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }

        write!(f, "{x}")?;
    }

    Ok(())
}

/// Shape layout; children render through their own `Display`.
impl<A: Display> Display for Syntax<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Syntax::Apply(callee, xs) => {
                write!(f, "{callee}(")?;
                write_joined(f, xs, ", ")?;
                f.write_str(")")
            }
            Syntax::Abstract(xs, body) => {
                f.write_str("\\(")?;
                write_joined(f, xs, ", ")?;
                write!(f, ") -> {body}")
            }
            Syntax::Assign(n, x) => write!(f, "{n} = {x}"),
            Syntax::Variable(n) => f.write_str(n),
            Syntax::Literal(l) => write!(f, "{l}"),
            Syntax::Group(n, xs) if xs.is_empty() => write!(f, "{n} {{}}"),
            Syntax::Group(n, xs) => {
                write!(f, "{n} {{ ")?;
                write_joined(f, xs, "; ")?;
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Literal, Syntax};

    #[test]
    fn children_in_document_order() {
        let s = Syntax::Abstract(vec![1, 2], 3);
        assert_eq!(s.children(), vec![&1, &2, &3]);

        let s = Syntax::Apply(0, vec![1, 2]);
        assert_eq!(s.children(), vec![&0, &1, &2]);

        let s: Syntax<u8> = Syntax::Literal(Literal::Integer(4));
        assert!(s.children().is_empty());
    }

    #[test]
    fn map_with_keeps_keys() {
        let s = Syntax::Assign("x".to_string(), 1);
        let m = s.map_with(|x| x * 10, |xs| xs.iter().map(|x| x * 10).collect());

        assert_eq!(m, Syntax::Assign("x".to_string(), 10));

        let s = Syntax::Group(0, vec![1, 2, 3]);
        let m = s.map_with(|x| *x, |xs| xs.iter().filter(|&&x| x != 2).copied().collect());

        assert_eq!(m, Syntax::Group(0, vec![1, 3]));
    }

    #[test]
    fn layout() {
        let s = Syntax::Apply("f", vec!["1", "2"]);
        assert_eq!(s.to_string(), "f(1, 2)");

        let s = Syntax::Abstract(vec!["x", "y"], "x");
        assert_eq!(s.to_string(), "\\(x, y) -> x");

        let s = Syntax::Group("block", vec![]);
        assert_eq!(s.to_string(), "block {}");

        let s = Syntax::Group("block", vec!["a", "b"]);
        assert_eq!(s.to_string(), "block { a; b }");

        let s: Syntax<&str> = Syntax::Literal(Literal::Text("\"hi\"".to_string()));
        assert_eq!(s.to_string(), "\"hi\"");
    }
}
