//! Backtracking pattern matcher: a fixed- or variable-length `MATCH`
//! engine over the graph, built from a linear chain of node and edge
//! constraints (component J: `compiler`), run by a seed-and-backtrack
//! executor (component K: `executor`) that delegates variable-length
//! steps to a loop-safe path enumerator (component L: `varlen`).

pub mod compiler;
pub mod executor;
pub mod varlen;

pub use compiler::{CompiledPattern, Direction, EdgeConstraint, GraphError, NodeConstraint, Pattern};
pub use executor::{run, Binding, EdgeBinding, PatternMatch};
pub use varlen::VarLenConstraint;
