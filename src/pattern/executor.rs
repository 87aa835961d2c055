//! Pattern executor (component K): backtracking search over a
//! compiled chain pattern.
//!
//! Grounded on `original_source/pattern_test.go`'s use of
//! `getFastestElement`/`GetPlan`/`Plan.Run`: pick whichever node
//! constraint has the smallest label-partition bound as the scan
//! seed, then walk the rest of the chain outward from it, carrying a
//! symbol table that every re-use of a name must agree with.

use crate::graph::Graph;
use crate::ids::{EdgeId, NodeId};
use crate::path::Path;
use crate::pattern::compiler::{CompiledPattern, Direction, EdgeConstraint};
use crate::pattern::varlen::{self, VarLenConstraint};
use ahash::AHashMap;

/// What a symbol in the pattern resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
	Node(NodeId),
	Edge(EdgeId),
	Path(Path),
}

/// One full match: a node id per node-constraint position, an edge
/// binding per edge-constraint position, and the named subset of both
/// keyed by symbol.
#[derive(Debug, Clone)]
pub struct PatternMatch {
	pub nodes: Vec<NodeId>,
	pub edges: Vec<EdgeBinding>,
	pub symbols: AHashMap<String, Binding>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeBinding {
	/// A fixed single-step match. `reverse` carries the same meaning as
	/// `PathElement::reverse` — set whenever this edge was reached via
	/// the anchor's incoming side rather than its outgoing side, so a
	/// `ToLeft`/`Incoming` constraint's matches are distinguishable from
	/// a `Forward`/`Outgoing` one even though both produce one edge.
	Single { edge: EdgeId, reverse: bool },
	Variable(Path),
}

/// Runs `pattern` against `graph`, calling `accumulator` with every
/// match found; stops early if `accumulator` returns `false`, mirroring
/// the Go source's accumulator protocol where returning `false` means
/// "I have enough, stop searching."
pub fn run(graph: &Graph, pattern: &CompiledPattern, mut accumulator: impl FnMut(&PatternMatch) -> bool) {
	let chain = &pattern.0;
	let n = chain.nodes.len();
	let start_index = seed_index(graph, chain);

	let mut nodes: Vec<Option<NodeId>> = vec![None; n];
	let mut edges: Vec<Option<EdgeBinding>> = vec![None; n.saturating_sub(1)];
	let mut symbols: AHashMap<String, Binding> = AHashMap::default();
	let mut stop = false;

	let seed_constraint = &chain.nodes[start_index];
	let candidates: Vec<NodeId> = graph.find_nodes(&seed_constraint.labels, |node| seed_constraint.predicate.as_ref().map_or(true, |p| p(node))).collect();

	for candidate in candidates {
		if stop {
			break;
		}
		let mut inserted_symbol = false;
		if let Some(symbol) = &seed_constraint.symbol {
			match try_bind(&mut symbols, symbol, Binding::Node(candidate)) {
				BindOutcome::Conflict => continue,
				BindOutcome::Fresh => inserted_symbol = true,
				BindOutcome::AlreadyConsistent => {}
			}
		}
		nodes[start_index] = Some(candidate);

		extend_right(graph, chain, start_index, start_index, &mut nodes, &mut edges, &mut symbols, &mut accumulator, &mut stop);

		nodes[start_index] = None;
		if inserted_symbol {
			symbols.remove(seed_constraint.symbol.as_ref().unwrap());
		}
	}
}

enum BindOutcome {
	Fresh,
	AlreadyConsistent,
	Conflict,
}

fn try_bind(symbols: &mut AHashMap<String, Binding>, name: &str, binding: Binding) -> BindOutcome {
	match symbols.get(name) {
		Some(existing) if *existing == binding => BindOutcome::AlreadyConsistent,
		Some(_) => BindOutcome::Conflict,
		None => {
			symbols.insert(name.to_string(), binding);
			BindOutcome::Fresh
		}
	}
}

/// Extends the match rightward from `index` (already bound) through
/// edges `index..n-1`; once the right end is reached, hands off to
/// `extend_left` to fill in everything before `seed`.
#[allow(clippy::too_many_arguments)]
fn extend_right(
	graph: &Graph,
	chain: &crate::pattern::compiler::Pattern,
	index: usize,
	seed: usize,
	nodes: &mut [Option<NodeId>],
	edges: &mut [Option<EdgeBinding>],
	symbols: &mut AHashMap<String, Binding>,
	accumulator: &mut impl FnMut(&PatternMatch) -> bool,
	stop: &mut bool,
) {
	if index + 1 >= chain.nodes.len() {
		extend_left(graph, chain, seed, nodes, edges, symbols, accumulator, stop);
		return;
	}
	let left_node = nodes[index].unwrap();
	let edge_constraint = &chain.edges[index];
	let next_constraint = &chain.nodes[index + 1];

	for_each_step(graph, left_node, edge_constraint, false, |edge_binding, next_node| {
		if *stop {
			return false;
		}
		if !next_constraint.labels.is_empty() && !graph.node(next_node).labels().has_all(&next_constraint.labels) {
			return true;
		}
		if let Some(pred) = &next_constraint.predicate {
			if !pred(graph.node(next_node)) {
				return true;
			}
		}
		let mut inserted = Vec::new();
		if let Some(symbol) = &next_constraint.symbol {
			match try_bind(symbols, symbol, Binding::Node(next_node)) {
				BindOutcome::Conflict => return true,
				BindOutcome::Fresh => inserted.push(symbol.clone()),
				BindOutcome::AlreadyConsistent => {}
			}
		}
		if let Some(symbol) = &edge_constraint.symbol {
			match try_bind(symbols, symbol, edge_binding_as_symbol(&edge_binding)) {
				BindOutcome::Conflict => {
					for s in &inserted {
						symbols.remove(s);
					}
					return true;
				}
				BindOutcome::Fresh => inserted.push(symbol.clone()),
				BindOutcome::AlreadyConsistent => {}
			}
		}

		nodes[index + 1] = Some(next_node);
		edges[index] = Some(edge_binding);
		extend_right(graph, chain, index + 1, seed, nodes, edges, symbols, accumulator, stop);
		edges[index] = None;
		nodes[index + 1] = None;
		for s in &inserted {
			symbols.remove(s);
		}
		true
	});
}

#[allow(clippy::too_many_arguments)]
fn extend_left(
	graph: &Graph,
	chain: &crate::pattern::compiler::Pattern,
	index: usize,
	nodes: &mut [Option<NodeId>],
	edges: &mut [Option<EdgeBinding>],
	symbols: &mut AHashMap<String, Binding>,
	accumulator: &mut impl FnMut(&PatternMatch) -> bool,
	stop: &mut bool,
) {
	// `index` is the leftmost position already bound; once it reaches
	// 0, every position in the chain has a node, and the match is
	// complete.
	if index == 0 {
		emit(graph, chain, nodes, edges, symbols, accumulator, stop);
		return;
	}
	let right_index = index;
	let right_node = nodes[right_index].unwrap();
	let edge_constraint = &chain.edges[right_index - 1];
	let left_constraint = &chain.nodes[right_index - 1];

	for_each_step(graph, right_node, edge_constraint, true, |edge_binding, left_node| {
		if *stop {
			return false;
		}
		if !left_constraint.labels.is_empty() && !graph.node(left_node).labels().has_all(&left_constraint.labels) {
			return true;
		}
		if let Some(pred) = &left_constraint.predicate {
			if !pred(graph.node(left_node)) {
				return true;
			}
		}
		let mut inserted = Vec::new();
		if let Some(symbol) = &left_constraint.symbol {
			match try_bind(symbols, symbol, Binding::Node(left_node)) {
				BindOutcome::Conflict => return true,
				BindOutcome::Fresh => inserted.push(symbol.clone()),
				BindOutcome::AlreadyConsistent => {}
			}
		}
		if let Some(symbol) = &edge_constraint.symbol {
			match try_bind(symbols, symbol, edge_binding_as_symbol(&edge_binding)) {
				BindOutcome::Conflict => {
					for s in &inserted {
						symbols.remove(s);
					}
					return true;
				}
				BindOutcome::Fresh => inserted.push(symbol.clone()),
				BindOutcome::AlreadyConsistent => {}
			}
		}

		nodes[right_index - 1] = Some(left_node);
		edges[right_index - 1] = Some(edge_binding);
		extend_left(graph, chain, right_index - 1, nodes, edges, symbols, accumulator, stop);
		edges[right_index - 1] = None;
		nodes[right_index - 1] = None;
		for s in &inserted {
			symbols.remove(s);
		}
		true
	});
}

fn edge_binding_as_symbol(binding: &EdgeBinding) -> Binding {
	match binding {
		EdgeBinding::Single { edge, .. } => Binding::Edge(*edge),
		EdgeBinding::Variable(p) => Binding::Path(p.clone()),
	}
}

/// Invokes `step` for each way to satisfy `constraint` starting from
/// `anchor`; `searching_backward` flips the constraint's direction,
/// since walking from the right-hand node toward the left-hand one
/// means asking for the mirror image of the declared direction.
/// `step` returns `false` to signal "stop the whole search."
fn for_each_step(graph: &Graph, anchor: NodeId, constraint: &EdgeConstraint, searching_backward: bool, mut step: impl FnMut(EdgeBinding, NodeId) -> bool) {
	let direction = if searching_backward { constraint.direction.flipped() } else { constraint.direction };

	if !constraint.is_variable_length() {
		// Each candidate carries whether it was found via the anchor's
		// incoming side; that becomes `EdgeBinding::Single`'s `reverse`
		// flag, the same convention `varlen::candidate_steps` uses for
		// `PathElement::reverse`.
		let candidates: Vec<(EdgeId, bool)> = match (direction, &constraint.label) {
			(Direction::Outgoing, Some(l)) => graph.outgoing_with_label(anchor, l).map(|e| (e, false)).collect(),
			(Direction::Outgoing, None) => graph.outgoing(anchor).map(|e| (e, false)).collect(),
			(Direction::Incoming, Some(l)) => graph.incoming_with_label(anchor, l).map(|e| (e, true)).collect(),
			(Direction::Incoming, None) => graph.incoming(anchor).map(|e| (e, true)).collect(),
			(Direction::Either, Some(l)) => {
				let out: Vec<(EdgeId, bool)> = graph.outgoing_with_label(anchor, l).map(|e| (e, false)).collect();
				let out_ids: ahash::AHashSet<EdgeId> = out.iter().map(|(e, _)| *e).collect();
				out.into_iter().chain(graph.incoming_with_label(anchor, l).filter(|e| !out_ids.contains(e)).map(|e| (e, true))).collect()
			}
			(Direction::Either, None) => {
				let out: Vec<(EdgeId, bool)> = graph.outgoing(anchor).map(|e| (e, false)).collect();
				let out_ids: ahash::AHashSet<EdgeId> = out.iter().map(|(e, _)| *e).collect();
				out.into_iter().chain(graph.incoming(anchor).filter(|e| !out_ids.contains(e)).map(|e| (e, true))).collect()
			}
		};
		for (edge_id, reverse) in candidates {
			let edge = graph.edge(edge_id);
			if let Some(pred) = &constraint.predicate {
				if !pred(edge) {
					continue;
				}
			}
			let other = if edge.source() == anchor { edge.target() } else { edge.source() };
			if !step(EdgeBinding::Single { edge: edge_id, reverse }, other) {
				return;
			}
		}
		return;
	}

	let varlen_constraint = VarLenConstraint { label: constraint.label.clone(), direction, min_hops: constraint.min_hops, max_hops: constraint.max_hops };
	for path in varlen::enumerate_paths(graph, anchor, &varlen_constraint) {
		if let Some(pred) = &constraint.predicate {
			if !path.elements().iter().all(|e| pred(graph.edge(e.edge))) {
				continue;
			}
		}
		let end_node = path.last(graph);
		if !step(EdgeBinding::Variable(path), end_node) {
			return;
		}
	}
}

fn seed_index(graph: &Graph, chain: &crate::pattern::compiler::Pattern) -> usize {
	chain
		.nodes
		.iter()
		.enumerate()
		.min_by_key(|(_, nc)| if nc.labels.is_empty() { usize::MAX } else { graph.label_partition_bound(&nc.labels).unwrap_or(0) })
		.map(|(i, _)| i)
		.unwrap_or(0)
}

fn emit(graph: &Graph, chain: &crate::pattern::compiler::Pattern, nodes: &[Option<NodeId>], edges: &[Option<EdgeBinding>], symbols: &AHashMap<String, Binding>, accumulator: &mut impl FnMut(&PatternMatch) -> bool, stop: &mut bool) {
	let _ = (graph, chain);
	let matched = PatternMatch { nodes: nodes.iter().map(|n| n.unwrap()).collect(), edges: edges.iter().map(|e| e.clone().unwrap()).collect(), symbols: symbols.clone() };
	if !accumulator(&matched) {
		*stop = true;
	}
}
