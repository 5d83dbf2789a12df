//! Applying a `Diff` to a `Term`, and the error raised when it does not fit.
use crate::backend::{diff::Diff, syntax::Syntax, term::Term};
use thiserror::Error;

/// The subterm and the diff that could not be applied to it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("diff `{1}` does not apply to `{0}`")]
pub struct PatchError(pub Term, pub Diff);

/// Applies `d` to `t`.
///
/// Patches require `t` to be their `before` side verbatim, copies require
/// the same node kind and key.
pub fn patch(t: &Term, d: &Diff) -> Result<Term, PatchError> {
    match (t, d) {
        (_, Diff::Empty) => Ok(t.clone()),
        (_, Diff::Patch(before, after)) if t == before => Ok(after.clone()),
        (Term::Roll(x), Diff::Copy(dx)) => match patch_shape(x, dx)? {
            Some(s) => Ok(Term::roll(s)),
            None => Err(PatchError(t.clone(), d.clone())),
        },
        _ => Err(PatchError(t.clone(), d.clone())),
    }
}

fn patch_shape(x: &Syntax<Term>, dx: &Syntax<Diff>) -> Result<Option<Syntax<Term>>, PatchError> {
    use Syntax::*;

    Ok(Some(match (x, dx) {
        (Apply(f, xs), Apply(df, dxs)) => Apply(patch(f, df)?, patch_sequence(xs, dxs)?),
        (Abstract(xs, b), Abstract(dxs, db)) => Abstract(patch_sequence(xs, dxs)?, patch(b, db)?),
        (Assign(n, v), Assign(m, dv)) if n == m => Assign(n.clone(), patch(v, dv)?),
        (Variable(n), Variable(m)) if n == m => Variable(n.clone()),
        (Literal(v), Literal(w)) if v == w => Literal(v.clone()),
        (Group(n, xs), Group(dn, dxs)) => Group(patch(n, dn)?, patch_sequence(xs, dxs)?),
        (
            Apply(_, _) | Abstract(_, _) | Assign(_, _) | Variable(_) | Literal(_) | Group(_, _),
            _,
        ) => return Ok(None),
    }))
}

/// Replays an alignment: insertions consume no old element, deletions
/// consume one equal to the deleted term, anything else patches the next
/// old element.
fn patch_sequence(xs: &[Term], ds: &[Diff]) -> Result<Vec<Term>, PatchError> {
    let mut old = xs.iter();
    let mut out = Vec::with_capacity(ds.len());

    for d in ds {
        match d {
            Diff::Patch(Term::Empty, after) => out.push(after.clone()),
            Diff::Patch(before, Term::Empty) => match old.next() {
                Some(x) if x == before => {}
                Some(x) => return Err(PatchError(x.clone(), d.clone())),
                None => return Err(PatchError(Term::Empty, d.clone())),
            },
            _ => {
                let x = old
                    .next()
                    .ok_or_else(|| PatchError(Term::Empty, d.clone()))?;
                let y = patch(x, d)?;

                if !y.is_empty() {
                    out.push(y);
                }
            }
        }
    }

    match old.next() {
        Some(x) => Err(PatchError(x.clone(), Diff::Empty)),
        None => Ok(out),
    }
}

#[cfg(test)]
mod test {
    use super::{patch, PatchError};
    use crate::backend::{diff::Diff, differ::diff_term, syntax::Syntax, term::Term};
    use pretty_assertions::assert_eq;

    fn block(xs: Vec<Term>) -> Term {
        Term::group(Term::variable("block"), xs)
    }

    #[test]
    fn no_difference() {
        let t = block(vec![
            Term::assign("x", Term::integer(5)),
            Term::apply(Term::variable("f"), vec![Term::variable("x")]),
        ]);

        let d = diff_term(&t, &t).unwrap();

        assert_eq!(patch(&t, &d), Ok(t));
    }

    #[test]
    fn statements_added_and_changed() {
        let left = block(vec![Term::integer(1)]);
        let right = block(vec![Term::assign("x", Term::integer(5)), Term::integer(3)]);

        let d = diff_term(&left, &right).unwrap();

        assert_eq!(patch(&left, &d), Ok(right));
    }

    #[test]
    fn unrelated_trees() {
        let left = Term::abstraction(vec![], Term::integer(1));
        let right = block(vec![Term::assign("i", Term::variable("i32"))]);

        let d = diff_term(&left, &right).unwrap();

        assert_eq!(d, Diff::Patch(left.clone(), right.clone()));
        assert_eq!(patch(&left, &d), Ok(right));
    }

    #[test]
    fn wrong_base() {
        let d = Diff::Patch(Term::integer(1), Term::integer(2));

        assert_eq!(
            patch(&Term::integer(7), &d),
            Err(PatchError(Term::integer(7), d))
        );

        let d = Diff::copy(Syntax::Variable("x".to_string()));

        assert_eq!(
            patch(&Term::variable("y"), &d),
            Err(PatchError(Term::variable("y"), d))
        );
    }

    #[test]
    fn wrong_sequence_length() {
        let d = diff_term(&block(vec![Term::integer(1)]), &block(vec![])).unwrap();

        assert!(patch(&block(vec![]), &d).is_err());
        assert!(patch(&block(vec![Term::integer(1), Term::integer(2)]), &d).is_err());
        assert_eq!(patch(&block(vec![Term::integer(1)]), &d), Ok(block(vec![])));
    }
}
