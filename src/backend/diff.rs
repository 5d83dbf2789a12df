//! Tree differences datatype
use crate::backend::{syntax::Syntax, term::Term};
use std::fmt::{self, Display, Formatter};

pub const DELETE_OPEN: &str = "{-";
pub const DELETE_CLOSE: &str = "-}";
pub const INSERT_OPEN: &str = "{+";
pub const INSERT_CLOSE: &str = "+}";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// The comparison of two terms.
#[derive(Hash, Clone, Debug, Default, PartialEq, Eq)]
pub enum Diff {
    /// Two empty terms.
    #[default]
    Empty,
    /// Wholesale replacement of `before` by `after`. Either side may be
    /// `Term::Empty` for a pure insertion or deletion.
    Patch(Term, Term),
    /// Same node kind on both sides; the children carry the differences.
    Copy(Box<Syntax<Diff>>),
}

impl Diff {
    pub fn insert(t: Term) -> Self {
        Diff::Patch(Term::Empty, t)
    }

    pub fn delete(t: Term) -> Self {
        Diff::Patch(t, Term::Empty)
    }

    pub fn copy(s: Syntax<Diff>) -> Self {
        Diff::Copy(Box::new(s))
    }

    /// Edit count: every patch counts once, whatever the size of the
    /// subtrees it replaces.
    pub fn magnitude(&self) -> usize {
        match self {
            Diff::Empty => 0,
            Diff::Patch(_, _) => 1,
            Diff::Copy(s) => magnitude(s.children()),
        }
    }

    /// `true` when the two compared terms were identical.
    pub fn is_empty(&self) -> bool {
        match self {
            Diff::Empty => true,
            Diff::Patch(_, _) => false,
            Diff::Copy(s) => s.children().into_iter().all(Diff::is_empty),
        }
    }

    /// The old term.
    ///
    /// Inside ordered sequences, insertions contribute nothing.
    pub fn before(&self) -> Term {
        self.project(Side::Before)
    }

    /// The new term.
    ///
    /// Inside ordered sequences, deletions contribute nothing.
    pub fn after(&self) -> Term {
        self.project(Side::After)
    }

    fn project(&self, side: Side) -> Term {
        match self {
            Diff::Empty => Term::Empty,
            Diff::Patch(x, _) if side == Side::Before => x.clone(),
            Diff::Patch(_, y) => y.clone(),
            Diff::Copy(s) => Term::roll(s.map_with(
                |d| d.project(side),
                |ds| {
                    ds.iter()
                        .map(|d| d.project(side))
                        .filter(|t| !t.is_empty())
                        .collect()
                },
            )),
        }
    }

    /// Every replacement in document order, as `(before, after)` pairs.
    pub fn changes(&self) -> Vec<(&Term, &Term)> {
        let mut out = Vec::new();

        self.collect_changes(&mut out);

        out
    }

    fn collect_changes<'a>(&'a self, out: &mut Vec<(&'a Term, &'a Term)>) {
        match self {
            Diff::Empty => {}
            Diff::Patch(x, y) => out.push((x, y)),
            Diff::Copy(s) => {
                for d in s.children() {
                    d.collect_changes(out);
                }
            }
        }
    }
}

/// Total magnitude of a sequence of diffs.
pub fn magnitude<'a>(ds: impl IntoIterator<Item = &'a Diff>) -> usize {
    ds.into_iter().map(Diff::magnitude).sum()
}

/// Deletions render before insertions, each in its marker even when the
/// wrapped term is empty.
impl Display for Diff {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Diff::Empty => Ok(()),
            Diff::Patch(x, y) => {
                write!(f, "{DELETE_OPEN}{x}{DELETE_CLOSE}{INSERT_OPEN}{y}{INSERT_CLOSE}")
            }
            Diff::Copy(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{magnitude, Diff};
    use crate::backend::{
        syntax::{Literal, Syntax},
        term::Term,
    };
    use pretty_assertions::assert_eq;

    fn call() -> Diff {
        Diff::copy(Syntax::Apply(
            Diff::copy(Syntax::Variable("f".to_string())),
            vec![
                Diff::insert(Term::integer(0)),
                Diff::copy(Syntax::Literal(Literal::Integer(1))),
                Diff::Patch(Term::integer(2), Term::integer(3)),
                Diff::delete(Term::variable("y")),
            ],
        ))
    }

    #[test]
    fn weight() {
        assert_eq!(Diff::Empty.magnitude(), 0);
        assert_eq!(
            Diff::Patch(
                Term::apply(Term::variable("f"), vec![Term::integer(1); 20]),
                Term::Empty
            )
            .magnitude(),
            1
        );
        assert_eq!(call().magnitude(), 3);
        assert_eq!(magnitude(&[call(), Diff::Empty, call()]), 6);
    }

    #[test]
    fn emptiness() {
        assert!(Diff::Empty.is_empty());
        assert!(Diff::copy(Syntax::Variable("x".to_string())).is_empty());
        assert!(!Diff::insert(Term::Empty).is_empty());
        assert!(!call().is_empty());

        let nested = Diff::copy(Syntax::Group(
            Diff::copy(Syntax::Variable("block".to_string())),
            vec![Diff::copy(Syntax::Assign("x".to_string(), Diff::Empty))],
        ));
        assert!(nested.is_empty());
        assert_eq!(nested.magnitude(), 0);
    }

    #[test]
    fn projections() {
        let d = call();

        assert_eq!(
            d.before(),
            Term::apply(
                Term::variable("f"),
                vec![Term::integer(1), Term::integer(2), Term::variable("y")]
            )
        );
        assert_eq!(
            d.after(),
            Term::apply(
                Term::variable("f"),
                vec![Term::integer(0), Term::integer(1), Term::integer(3)]
            )
        );
    }

    #[test]
    fn changes_in_document_order() {
        let d = call();
        let changes = d.changes();

        assert_eq!(changes.len(), d.magnitude());
        assert_eq!(changes[0], (&Term::Empty, &Term::integer(0)));
        assert_eq!(changes[1], (&Term::integer(2), &Term::integer(3)));
        assert_eq!(changes[2], (&Term::variable("y"), &Term::Empty));
    }

    #[test]
    fn render() {
        assert_eq!(Diff::Empty.to_string(), "");
        assert_eq!(
            Diff::Patch(Term::integer(2), Term::integer(3)).to_string(),
            "{-2-}{+3+}"
        );
        assert_eq!(Diff::insert(Term::variable("x")).to_string(), "{--}{+x+}");
        assert_eq!(Diff::delete(Term::variable("x")).to_string(), "{-x-}{++}");
        assert_eq!(call().to_string(), "f({--}{+0+}, 1, {-2-}{+3+}, {-y-}{++})");
    }
}
