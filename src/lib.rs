//! Structural diffs of syntax trees.
//!
//! Two [`Term`](backend::Term)s are compared node by node: matching node
//! kinds are kept as copies and only their children are compared further,
//! mismatches become a single patch. Ordered child lists (arguments,
//! statements, parameters) are aligned so that the total number of edits
//! is as small as possible.
pub mod backend;
pub mod config;
