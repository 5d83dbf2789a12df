//! Failures of the differ. Over inputs within its limits the differ is
//! total; these only report resource exhaustion.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("diff too deep: terms nest more than {limit} levels")]
    TooDeep { limit: usize },
    #[error("diff too large: alignment needs {cells} cells, the limit is {limit}")]
    TooLarge { cells: usize, limit: usize },
}
