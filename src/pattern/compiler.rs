//! Pattern compiler (component J).
//!
//! Grounded on `original_source/pattern_test.go`: a pattern is an
//! alternating chain of node and edge constraints —
//! `node0 -edge0- node1 -edge1- node2 ...` — built up by a caller
//! rather than parsed from text (this library has no query-language
//! front end; a Cypher-like `MATCH` clause is the caller's problem).
//! Compiling only validates the chain's shape; it is not yet bound to
//! any particular graph, so it can't pick a scan seed — that happens
//! in `executor::run`, once there is a graph to measure partitions
//! against.

use crate::graph::Node;
use std::fmt;
use std::rc::Rc;

/// Which way an edge constraint must be satisfied, relative to the
/// node appearing before it in the chain ("left") versus after it
/// ("right").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// left --edge--> right
	Outgoing,
	/// left <--edge-- right
	Incoming,
	/// either direction
	Either,
}

impl Direction {
	pub(crate) fn flipped(self) -> Direction {
		match self {
			Direction::Outgoing => Direction::Incoming,
			Direction::Incoming => Direction::Outgoing,
			Direction::Either => Direction::Either,
		}
	}
}

/// A constraint on one node position in the chain.
pub struct NodeConstraint {
	pub symbol: Option<String>,
	pub labels: Vec<String>,
	pub predicate: Option<Rc<dyn Fn(&Node) -> bool>>,
}

impl NodeConstraint {
	pub fn new() -> Self {
		NodeConstraint { symbol: None, labels: Vec::new(), predicate: None }
	}

	pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
		self.symbol = Some(symbol.into());
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.labels.push(label.into());
		self
	}

	pub fn with_predicate(mut self, predicate: impl Fn(&Node) -> bool + 'static) -> Self {
		self.predicate = Some(Rc::new(predicate));
		self
	}
}

impl Default for NodeConstraint {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for NodeConstraint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeConstraint").field("symbol", &self.symbol).field("labels", &self.labels).field("predicate", &self.predicate.is_some()).finish()
	}
}

/// A constraint on one edge position in the chain, optionally
/// variable-length (`min_hops`/`max_hops` spanning more than one edge,
/// handled by the enumerator in `varlen`).
pub struct EdgeConstraint {
	pub symbol: Option<String>,
	pub label: Option<String>,
	pub predicate: Option<Rc<dyn Fn(&crate::graph::Edge) -> bool>>,
	pub direction: Direction,
	pub min_hops: usize,
	pub max_hops: Option<usize>,
}

impl EdgeConstraint {
	pub fn new(direction: Direction) -> Self {
		EdgeConstraint { symbol: None, label: None, predicate: None, direction, min_hops: 1, max_hops: Some(1) }
	}

	pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
		self.symbol = Some(symbol.into());
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_predicate(mut self, predicate: impl Fn(&crate::graph::Edge) -> bool + 'static) -> Self {
		self.predicate = Some(Rc::new(predicate));
		self
	}

	/// Marks this edge position as a variable-length path of `min` to
	/// `max` hops (`None` for unbounded, still terminated by
	/// loop-safety once every reachable edge has been used once).
	pub fn with_hops(mut self, min: usize, max: Option<usize>) -> Self {
		self.min_hops = min;
		self.max_hops = max;
		self
	}

	pub fn is_variable_length(&self) -> bool {
		self.min_hops != 1 || self.max_hops != Some(1)
	}
}

impl fmt::Debug for EdgeConstraint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EdgeConstraint")
			.field("symbol", &self.symbol)
			.field("label", &self.label)
			.field("predicate", &self.predicate.is_some())
			.field("direction", &self.direction)
			.field("min_hops", &self.min_hops)
			.field("max_hops", &self.max_hops)
			.finish()
	}
}

/// A linear chain pattern: `nodes.len()` node constraints joined by
/// `nodes.len() - 1` edge constraints.
#[derive(Debug, Default)]
pub struct Pattern {
	pub nodes: Vec<NodeConstraint>,
	pub edges: Vec<EdgeConstraint>,
}

impl Pattern {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn node(mut self, constraint: NodeConstraint) -> Self {
		self.nodes.push(constraint);
		self
	}

	pub fn edge(mut self, constraint: EdgeConstraint) -> Self {
		self.edges.push(constraint);
		self
	}

	/// Validates the chain's shape. The only way a `Pattern` fails to
	/// compile is a malformed chain — a node/edge count mismatch, or no
	/// nodes at all. Everything else (missing labels, unsatisfiable
	/// predicates) is a legitimate pattern that simply matches nothing.
	pub fn compile(self) -> Result<CompiledPattern, GraphError> {
		if self.nodes.is_empty() {
			return Err(GraphError::EmptyPattern);
		}
		let expected = self.nodes.len() - 1;
		if self.edges.len() != expected {
			return Err(GraphError::MalformedChain { node_constraints: self.nodes.len(), expected_edge_constraints: expected, found_edge_constraints: self.edges.len() });
		}
		Ok(CompiledPattern(self))
	}
}

/// A pattern whose chain shape has been validated. The only way to
/// run a pattern is through this type — `Pattern::compile` is the
/// single gate.
pub struct CompiledPattern(pub(crate) Pattern);

/// The only errors this library raises through `Result` rather than
/// `panic!`: structural pattern mistakes caught at compile time,
/// before any graph is touched.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("pattern has no node constraints")]
	EmptyPattern,
	#[error("pattern chain is malformed: {node_constraints} node constraints require {expected_edge_constraints} edge constraints, found {found_edge_constraints}")]
	MalformedChain { node_constraints: usize, expected_edge_constraints: usize, found_edge_constraints: usize },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn well_formed_chain_compiles() {
		let pattern = Pattern::new().node(NodeConstraint::new().with_label("Person")).edge(EdgeConstraint::new(Direction::Outgoing).with_label("knows")).node(NodeConstraint::new().with_label("Person"));
		assert!(pattern.compile().is_ok());
	}

	#[test]
	fn mismatched_chain_is_rejected() {
		let pattern = Pattern::new().node(NodeConstraint::new()).edge(EdgeConstraint::new(Direction::Outgoing)).edge(EdgeConstraint::new(Direction::Outgoing));
		assert!(matches!(pattern.compile(), Err(GraphError::MalformedChain { .. })));
	}

	#[test]
	fn empty_pattern_is_rejected() {
		assert!(matches!(Pattern::new().compile(), Err(GraphError::EmptyPattern)));
	}
}
