//! Term and sequence differ.
//!
//! Terms are compared top-down. Matching node kinds become copies whose
//! children are compared in turn, anything else becomes a single patch.
//! Ordered child lists are aligned by a table over every pair of
//! remaining suffixes, so each `(i, j)` subproblem is solved exactly once.
//!
//! Tables only hold costs and step kinds. Diffs are built for the pairs on
//! the chosen alignment, so memory stays proportional to the result.
use crate::backend::{
    diff::Diff,
    error::DiffError,
    syntax::Syntax,
    term::Term,
};
use tracing::{debug, trace, warn};

pub const DEFAULT_MAX_DEPTH: usize = 512;
pub const DEFAULT_MAX_SEQUENCE_CELLS: usize = 1 << 22;
pub const DEFAULT_MAX_TOTAL_CELLS: usize = 1 << 24;

/// Resource bounds for a single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest nesting level that may be compared, the roots being level 0.
    pub max_depth: usize,
    /// Largest alignment table, `(|a| + 1) * (|b| + 1)`, for one sequence.
    pub max_sequence_cells: usize,
    /// Alignment cells filled over a whole comparison, nested tables
    /// included.
    pub max_total_cells: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_sequence_cells: DEFAULT_MAX_SEQUENCE_CELLS,
            max_total_cells: DEFAULT_MAX_TOTAL_CELLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Here,
    Insert,
    Delete,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    limits: Limits,
}

impl Differ {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn diff_term(&self, a: &Term, b: &Term) -> Result<Diff, DiffError> {
        Run::new(self.limits).term(a, b, 0)
    }

    pub fn diff_sequence(&self, a: &[Term], b: &[Term]) -> Result<Vec<Diff>, DiffError> {
        Run::new(self.limits).sequence(a, b, 0)
    }
}

/// State of one comparison.
struct Run {
    limits: Limits,
    /// Alignment cells filled so far.
    spent: usize,
}

impl Run {
    fn new(limits: Limits) -> Self {
        Self { limits, spent: 0 }
    }

    fn enter(&self, depth: usize) -> Result<(), DiffError> {
        if depth > self.limits.max_depth {
            warn!(limit = self.limits.max_depth, "term nesting limit reached");
            return Err(DiffError::TooDeep {
                limit: self.limits.max_depth,
            });
        }

        Ok(())
    }

    fn term(&mut self, a: &Term, b: &Term, depth: usize) -> Result<Diff, DiffError> {
        self.enter(depth)?;

        match (a, b) {
            (Term::Empty, Term::Empty) => Ok(Diff::Empty),
            (Term::Roll(x), Term::Roll(y)) => match self.shape(x, y, depth + 1)? {
                Some(s) => Ok(Diff::copy(s)),
                None => {
                    trace!(before = x.kind(), after = y.kind(), depth, "patch");
                    Ok(Diff::Patch(a.clone(), b.clone()))
                }
            },
            _ => Ok(Diff::Patch(a.clone(), b.clone())),
        }
    }

    /// `None` when the two nodes do not match at this level.
    fn shape(
        &mut self,
        x: &Syntax<Term>,
        y: &Syntax<Term>,
        depth: usize,
    ) -> Result<Option<Syntax<Diff>>, DiffError> {
        use Syntax::*;

        Ok(Some(match (x, y) {
            // TODO: align arguments by similarity once callees are compared
            // for meaning; for now they are aligned as a plain sequence.
            (Apply(f, xs), Apply(g, ys)) => Apply(
                self.term(f, g, depth)?,
                self.sequence(xs, ys, depth)?,
            ),
            (Abstract(xs, b), Abstract(ys, c)) => Abstract(
                self.sequence(xs, ys, depth)?,
                self.term(b, c, depth)?,
            ),
            (Assign(n, v), Assign(m, w)) if n == m => Assign(m.clone(), self.term(v, w, depth)?),
            (Variable(n), Variable(m)) if n == m => Variable(m.clone()),
            (Literal(v), Literal(w)) if v == w => Literal(w.clone()),
            (Group(n, xs), Group(m, ys)) => Group(
                self.term(n, m, depth)?,
                self.sequence(xs, ys, depth)?,
            ),
            (
                Apply(_, _)
                | Abstract(_, _)
                | Assign(_, _)
                | Variable(_)
                | Literal(_)
                | Group(_, _),
                _,
            ) => return Ok(None),
        }))
    }

    /// `term(a, b).magnitude()` without building the diff.
    fn cost(&mut self, a: &Term, b: &Term, depth: usize) -> Result<usize, DiffError> {
        self.enter(depth)?;

        match (a, b) {
            (Term::Empty, Term::Empty) => Ok(0),
            (Term::Roll(x), Term::Roll(y)) => Ok(self.shape_cost(x, y, depth + 1)?.unwrap_or(1)),
            _ => Ok(1),
        }
    }

    fn shape_cost(
        &mut self,
        x: &Syntax<Term>,
        y: &Syntax<Term>,
        depth: usize,
    ) -> Result<Option<usize>, DiffError> {
        use Syntax::*;

        Ok(Some(match (x, y) {
            (Apply(f, xs), Apply(g, ys)) => {
                self.cost(f, g, depth)? + self.sequence_cost(xs, ys, depth)?
            }
            (Abstract(xs, b), Abstract(ys, c)) => {
                self.sequence_cost(xs, ys, depth)? + self.cost(b, c, depth)?
            }
            (Assign(n, v), Assign(m, w)) if n == m => self.cost(v, w, depth)?,
            (Variable(n), Variable(m)) if n == m => 0,
            (Literal(v), Literal(w)) if v == w => 0,
            (Group(n, xs), Group(m, ys)) => {
                self.cost(n, m, depth)? + self.sequence_cost(xs, ys, depth)?
            }
            (
                Apply(_, _)
                | Abstract(_, _)
                | Assign(_, _)
                | Variable(_)
                | Literal(_)
                | Group(_, _),
                _,
            ) => return Ok(None),
        }))
    }

    /// Fills the table for `a` against `b`. `cost[i * (|b| + 1) + j]` is the
    /// least magnitude for the suffixes `a[i..]` and `b[j..]`; on equal
    /// costs pairing wins over inserting, which wins over deleting.
    fn align(
        &mut self,
        a: &[Term],
        b: &[Term],
        depth: usize,
    ) -> Result<(Vec<usize>, Vec<Step>), DiffError> {
        let (n, m) = (a.len(), b.len());
        let width = m + 1;
        let cells = (n + 1).saturating_mul(width);

        if cells > self.limits.max_sequence_cells {
            warn!(
                old = n,
                new = m,
                limit = self.limits.max_sequence_cells,
                "sequence alignment limit reached"
            );
            return Err(DiffError::TooLarge {
                cells,
                limit: self.limits.max_sequence_cells,
            });
        }

        let spent = self.spent.saturating_add(cells);

        if spent > self.limits.max_total_cells {
            warn!(
                spent,
                limit = self.limits.max_total_cells,
                "comparison alignment budget spent"
            );
            return Err(DiffError::TooLarge {
                cells: spent,
                limit: self.limits.max_total_cells,
            });
        }

        self.spent = spent;

        let mut cost = vec![0usize; cells];
        let mut steps = vec![Step::Delete; cells];

        for i in (0..=n).rev() {
            for j in (0..=m).rev() {
                let at = i * width + j;

                if i == n && j == m {
                    continue;
                } else if i == n {
                    cost[at] = 1 + cost[at + 1];
                    steps[at] = Step::Insert;
                } else if j == m {
                    cost[at] = 1 + cost[at + width];
                    steps[at] = Step::Delete;
                } else {
                    let here = self.cost(&a[i], &b[j], depth)? + cost[at + width + 1];
                    let insert = 1 + cost[at + 1];
                    let delete = 1 + cost[at + width];

                    (cost[at], steps[at]) = if here <= insert && here <= delete {
                        (here, Step::Here)
                    } else if insert <= delete {
                        (insert, Step::Insert)
                    } else {
                        (delete, Step::Delete)
                    };
                }
            }
        }

        Ok((cost, steps))
    }

    fn sequence_cost(&mut self, a: &[Term], b: &[Term], depth: usize) -> Result<usize, DiffError> {
        let (cost, _) = self.align(a, b, depth)?;

        Ok(cost[0])
    }

    fn sequence(&mut self, a: &[Term], b: &[Term], depth: usize) -> Result<Vec<Diff>, DiffError> {
        let (cost, steps) = self.align(a, b, depth)?;
        let (n, m) = (a.len(), b.len());
        let width = m + 1;

        if n + m > 0 {
            debug!(old = n, new = m, magnitude = cost[0], depth, "aligned sequence");
        }

        let mut out = Vec::with_capacity(n.max(m));
        let (mut i, mut j) = (0, 0);

        while i < n || j < m {
            match steps[i * width + j] {
                Step::Here => {
                    out.push(self.term(&a[i], &b[j], depth)?);
                    i += 1;
                    j += 1;
                }
                Step::Insert => {
                    out.push(Diff::insert(b[j].clone()));
                    j += 1;
                }
                Step::Delete => {
                    out.push(Diff::delete(a[i].clone()));
                    i += 1;
                }
            }
        }

        Ok(out)
    }
}

/// Compares two terms under the default limits.
pub fn diff_term(a: &Term, b: &Term) -> Result<Diff, DiffError> {
    Differ::default().diff_term(a, b)
}

/// Aligns two ordered sequences of terms under the default limits.
pub fn diff_sequence(a: &[Term], b: &[Term]) -> Result<Vec<Diff>, DiffError> {
    Differ::default().diff_sequence(a, b)
}
