pub mod assign;
pub mod diff;
pub mod differ;
pub mod error;
pub mod linguist;
pub mod patch;
pub mod syntax;
pub mod term;

pub use diff::Diff;
pub use differ::{diff_sequence, diff_term, Differ, Limits};
pub use error::DiffError;
pub use syntax::{Literal, Syntax};
pub use term::Term;
