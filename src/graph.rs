//! The graph itself (component G): owns every node and edge, enforces
//! the data-model invariants on each mutation, and answers label- and
//! property-scoped queries by picking whichever index gives the
//! smallest seed to scan.
//!
//! Grounded on `original_source/graph.go`: nodes and edges live in
//! per-graph arenas so ids are cheap, copyable handles rather than
//! smart pointers; `FastNewNode`/`FastNewEdge` skip index maintenance
//! for bulk loads, `NewNode`/`NewEdge` do the full accounting.

use crate::adjacency::{EdgeLinkStore, EdgeLinks, EdgeMap, SLOT_GLOBAL, SLOT_INCOMING, SLOT_OUTGOING};
use crate::ids::{EdgeId, NodeId};
use crate::index::{IndexKind, PropertyIndex};
use crate::intern::{InternedKey, StringInterner};
use crate::iter::{self, BoxedIter};
use crate::label_index::NodeLabelIndex;
use crate::value::PropertyValue;
use ahash::AHashMap;

/// An insertion-ordered, duplicate-free set of labels. Node label-sets
/// and the single edge label both use plain strings, never routed
/// through the property-key interner — labels are typically drawn from
/// a small closed vocabulary and don't churn the way property values
/// do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn has(&self, label: &str) -> bool {
		self.0.iter().any(|l| l == label)
	}

	pub fn has_all(&self, labels: &[String]) -> bool {
		labels.iter().all(|l| self.has(l))
	}

	pub fn add(&mut self, label: impl Into<String>) -> bool {
		let label = label.into();
		if self.has(&label) {
			return false;
		}
		self.0.push(label);
		true
	}

	pub fn remove(&mut self, label: &str) -> bool {
		let before = self.0.len();
		self.0.retain(|l| l != label);
		self.0.len() != before
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct Node {
	id: NodeId,
	labels: LabelSet,
	properties: AHashMap<InternedKey, PropertyValue>,
	out: EdgeMap,
	incoming: EdgeMap,
}

impl Node {
	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn labels(&self) -> &LabelSet {
		&self.labels
	}

	pub fn properties(&self) -> &AHashMap<InternedKey, PropertyValue> {
		&self.properties
	}
}

#[derive(Debug, Clone, Copy)]
struct EdgeLinkState(EdgeLinks);

impl Default for EdgeLinkState {
	fn default() -> Self {
		EdgeLinkState([Default::default(); 3])
	}
}

#[derive(Debug, Clone)]
pub struct Edge {
	id: EdgeId,
	source: NodeId,
	target: NodeId,
	label: String,
	properties: AHashMap<InternedKey, PropertyValue>,
	links: EdgeLinkState,
}

impl Edge {
	pub fn id(&self) -> EdgeId {
		self.id
	}

	pub fn source(&self) -> NodeId {
		self.source
	}

	pub fn target(&self) -> NodeId {
		self.target
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn properties(&self) -> &AHashMap<InternedKey, PropertyValue> {
		&self.properties
	}

	/// Whether this edge is a self-loop — it then occupies both the
	/// incoming and outgoing partitions of the same node (spec.md §9's
	/// resolved Open Question on self-loop path semantics builds on
	/// this: the edge contributes exactly one path element either way).
	pub fn is_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Thin adapter so the intrusive list code in `adjacency` can reach an
/// edge's link slots through a disjoint borrow of just `Graph::edges`,
/// without naming `Graph` itself.
struct EdgeArena<'a>(&'a mut Vec<Option<Edge>>);

impl<'a> EdgeLinkStore for EdgeArena<'a> {
	fn links(&self, id: EdgeId) -> EdgeLinks {
		self.0[id.index() as usize].as_ref().expect("dangling edge id").links.0
	}

	fn set_links(&mut self, id: EdgeId, links: EdgeLinks) {
		self.0[id.index() as usize].as_mut().expect("dangling edge id").links.0 = links;
	}
}

#[derive(Default)]
pub struct Graph {
	nodes: Vec<Option<Node>>,
	edges: Vec<Option<Edge>>,
	node_count: usize,
	edge_count: usize,
	interner: StringInterner,
	node_labels: NodeLabelIndex,
	global_edges: crate::adjacency::EdgeListHandle,
	node_indices: AHashMap<InternedKey, PropertyIndex<NodeId>>,
	edge_indices: AHashMap<InternedKey, PropertyIndex<EdgeId>>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn node_count(&self) -> usize {
		self.node_count
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	fn arena(&mut self) -> EdgeArena<'_> {
		EdgeArena(&mut self.edges)
	}

	fn node_mut(&mut self, id: NodeId) -> &mut Node {
		self.nodes[id.index() as usize].as_mut().expect("node does not belong to this graph")
	}

	pub fn node(&self, id: NodeId) -> &Node {
		self.nodes[id.index() as usize].as_ref().expect("node does not belong to this graph")
	}

	pub fn edge(&self, id: EdgeId) -> &Edge {
		self.edges[id.index() as usize].as_ref().expect("edge does not belong to this graph")
	}

	fn intern_property_key(&mut self, key: &str) -> InternedKey {
		self.interner.allocate(key)
	}

	/// Creates a node with the given labels and properties, indexing it
	/// into the node-by-label index and every property index that
	/// already covers one of the given keys (mirrors `NewNode`, not
	/// `FastNewNode` — the fast variant is a bulk-load optimization this
	/// single-threaded library has no use for without a bulk-load API).
	pub fn new_node<S, P>(&mut self, labels: impl IntoIterator<Item = S>, properties: impl IntoIterator<Item = (S, P)>) -> NodeId
	where
		S: Into<String>,
		P: Into<PropertyValue>,
	{
		let id = NodeId(self.nodes.len() as u32);
		let mut label_set = LabelSet::new();
		for label in labels {
			label_set.add(label.into());
		}
		let mut props = AHashMap::default();
		for (key, value) in properties {
			let key = self.intern_property_key(&key.into());
			props.insert(key, value.into());
		}
		self.nodes.push(Some(Node { id, labels: label_set.clone(), properties: props.clone(), out: EdgeMap::new(), incoming: EdgeMap::new() }));
		self.node_count += 1;
		self.node_labels.add(id, label_set.as_slice());
		for (key, value) in &props {
			if let Some(index) = self.node_indices.get_mut(key) {
				index.add(value, id.index(), id);
			}
		}
		id
	}

	/// Creates a directed edge. Panics if either endpoint id does not
	/// belong to this graph, mirroring `NewEdge`'s cross-graph guard.
	pub fn new_edge<S, P>(&mut self, source: NodeId, target: NodeId, label: S, properties: impl IntoIterator<Item = (S, P)>) -> EdgeId
	where
		S: Into<String>,
		P: Into<PropertyValue>,
	{
		assert!((source.index() as usize) < self.nodes.len() && self.nodes[source.index() as usize].is_some(), "source node does not belong to this graph");
		assert!((target.index() as usize) < self.nodes.len() && self.nodes[target.index() as usize].is_some(), "target node does not belong to this graph");
		let id = EdgeId(self.edges.len() as u32);
		let label = label.into();
		let mut props = AHashMap::default();
		for (key, value) in properties {
			let key = self.intern_property_key(&key.into());
			props.insert(key, value.into());
		}
		self.edges.push(Some(Edge { id, source, target, label: label.clone(), properties: props.clone(), links: EdgeLinkState::default() }));
		self.edge_count += 1;

		let mut handle = std::mem::take(&mut self.global_edges);
		handle.push_back(&mut self.arena(), SLOT_GLOBAL, id);
		self.global_edges = handle;

		{
			let mut arena = EdgeArena(&mut self.edges);
			let node = self.nodes[source.index() as usize].as_mut().unwrap();
			node.out.add(&mut arena, SLOT_OUTGOING, &label, id);
		}
		{
			let mut arena = EdgeArena(&mut self.edges);
			let node = self.nodes[target.index() as usize].as_mut().unwrap();
			node.incoming.add(&mut arena, SLOT_INCOMING, &label, id);
		}

		for (key, value) in &props {
			if let Some(index) = self.edge_indices.get_mut(key) {
				index.add(value, id.index(), id);
			}
		}
		id
	}

	fn unlink_edge(&mut self, id: EdgeId) {
		let (source, target, label) = {
			let edge = self.edge(id);
			(edge.source, edge.target, edge.label.clone())
		};
		let mut handle = std::mem::take(&mut self.global_edges);
		handle.remove(&mut self.arena(), SLOT_GLOBAL, id);
		self.global_edges = handle;

		{
			let mut arena = EdgeArena(&mut self.edges);
			let node = self.nodes[source.index() as usize].as_mut().unwrap();
			node.out.remove(&mut arena, SLOT_OUTGOING, &label, id);
		}
		{
			let mut arena = EdgeArena(&mut self.edges);
			let node = self.nodes[target.index() as usize].as_mut().unwrap();
			node.incoming.remove(&mut arena, SLOT_INCOMING, &label, id);
		}
	}

	/// Removes a single edge. The edge's own property entries are
	/// dereferenced from the interner and from any property index
	/// covering them.
	pub fn remove_edge(&mut self, id: EdgeId) {
		self.unlink_edge(id);
		let edge = self.edges[id.index() as usize].take().expect("edge does not belong to this graph");
		for (key, value) in &edge.properties {
			if let Some(index) = self.edge_indices.get_mut(key) {
				index.remove(value, id.index());
			}
			self.interner.free(*key);
		}
		self.edge_count -= 1;
	}

	/// Removes every edge incident to `node`, in either direction,
	/// leaving the node itself in place. Mirrors `detachNode`.
	pub fn detach(&mut self, node: NodeId) {
		let incident: Vec<EdgeId> = {
			let n = self.node(node);
			let arena_ref = ArenaRef(&self.edges);
			let out: Vec<_> = n.out.iterate_all(arena_ref, SLOT_OUTGOING).collect();
			let inc: Vec<_> = n.incoming.iterate_all(arena_ref, SLOT_INCOMING).collect();
			out.into_iter().chain(inc).collect()
		};
		let mut seen = ahash::AHashSet::default();
		for edge_id in incident {
			if seen.insert(edge_id) {
				self.remove_edge(edge_id);
			}
		}
	}

	/// Detaches and then removes `node` entirely. Mirrors
	/// `detachRemoveNode`.
	pub fn detach_and_remove(&mut self, node: NodeId) {
		self.detach(node);
		let n = self.nodes[node.index() as usize].take().expect("node does not belong to this graph");
		self.node_labels.remove(node, n.labels.as_slice());
		for (key, value) in &n.properties {
			if let Some(index) = self.node_indices.get_mut(key) {
				index.remove(value, node.index());
			}
			self.interner.free(*key);
		}
		self.node_count -= 1;
	}

	pub fn add_node_label(&mut self, node: NodeId, label: impl Into<String>) {
		let label = label.into();
		let added = self.node_mut(node).labels.add(label.clone());
		if added {
			self.node_labels.add_label(node, &label);
		}
	}

	pub fn remove_node_label(&mut self, node: NodeId, label: &str) {
		let removed = self.node_mut(node).labels.remove(label);
		if removed {
			self.node_labels.remove_label(node, label);
		}
	}

	/// Sets a node property, allocating an interner slot only on first
	/// insertion of this key on this node and reusing the existing slot
	/// on overwrite, so the interner's refcount for a key equals the
	/// number of live property entries using it, never the number of
	/// writes (invariant on string-interner refcounts).
	pub fn set_node_property(&mut self, node: NodeId, key: &str, value: impl Into<PropertyValue>) {
		let value = value.into();
		let interned = self.interner.lookup(key).filter(|k| self.node(node).properties.contains_key(k)).unwrap_or_else(|| self.interner.allocate(key));
		let previous = self.node_mut(node).properties.insert(interned, value.clone());
		if let Some(index) = self.node_indices.get_mut(&interned) {
			if let Some(old) = previous {
				index.remove(&old, node.index());
			}
			index.add(&value, node.index(), node);
		}
	}

	pub fn remove_node_property(&mut self, node: NodeId, key: &str) {
		let Some(interned) = self.interner.lookup(key) else { return };
		if let Some(value) = self.node_mut(node).properties.remove(&interned) {
			if let Some(index) = self.node_indices.get_mut(&interned) {
				index.remove(&value, node.index());
			}
			self.interner.free(interned);
		}
	}

	pub fn set_edge_property(&mut self, edge: EdgeId, key: &str, value: impl Into<PropertyValue>) {
		let value = value.into();
		let interned = self.interner.lookup(key).filter(|k| self.edge(edge).properties.contains_key(k)).unwrap_or_else(|| self.interner.allocate(key));
		let previous = self.edges[edge.index() as usize].as_mut().unwrap().properties.insert(interned, value.clone());
		if let Some(index) = self.edge_indices.get_mut(&interned) {
			if let Some(old) = previous {
				index.remove(&old, edge.index());
			}
			index.add(&value, edge.index(), edge);
		}
	}

	pub fn remove_edge_property(&mut self, edge: EdgeId, key: &str) {
		let Some(interned) = self.interner.lookup(key) else { return };
		if let Some(value) = self.edges[edge.index() as usize].as_mut().unwrap().properties.remove(&interned) {
			if let Some(index) = self.edge_indices.get_mut(&interned) {
				index.remove(&value, edge.index());
			}
			self.interner.free(interned);
		}
	}

	pub fn create_node_index(&mut self, key: &str, kind: IndexKind) {
		let interned = self.interner.allocate(key);
		let index = self.node_indices.entry(interned).or_insert_with(|| PropertyIndex::new(kind));
		if index.is_empty() {
			for node in self.nodes.iter().flatten() {
				if let Some(value) = node.properties.get(&interned) {
					index.add(value, node.id.index(), node.id);
				}
			}
		}
	}

	pub fn create_edge_index(&mut self, key: &str, kind: IndexKind) {
		let interned = self.interner.allocate(key);
		let index = self.edge_indices.entry(interned).or_insert_with(|| PropertyIndex::new(kind));
		if index.is_empty() {
			for edge in self.edges.iter().flatten() {
				if let Some(value) = edge.properties.get(&interned) {
					index.add(value, edge.id.index(), edge.id);
				}
			}
		}
	}

	/// Looks up the interned handle for a property key, without
	/// allocating one if it has never been used. Lets a predicate
	/// closure (which only ever sees a `&Node`/`&Edge`, never the
	/// `Graph` itself) resolve a key once up front and then compare
	/// against `Node::properties()`/`Edge::properties()` directly.
	pub fn property_key(&self, key: &str) -> Option<InternedKey> {
		self.interner.lookup(key)
	}

	/// Reads a single property off a node by key. `None` covers both
	/// "the node has no such property" and "this key was never used
	/// anywhere in the graph" — mirrors `GetProperty`'s two-valued
	/// (value, found) return collapsed onto `Option`.
	pub fn node_property(&self, node: NodeId, key: &str) -> Option<&PropertyValue> {
		let interned = self.interner.lookup(key)?;
		self.node(node).properties.get(&interned)
	}

	pub fn edge_property(&self, edge: EdgeId, key: &str) -> Option<&PropertyValue> {
		let interned = self.interner.lookup(key)?;
		self.edge(edge).properties.get(&interned)
	}

	pub fn nodes_with_property<'a>(&'a self, key: &str, value: &PropertyValue) -> BoxedIter<'a, NodeId> {
		match self.interner.lookup(key).and_then(|k| self.node_indices.get(&k)) {
			Some(index) => index.iterate_equal(value),
			None => iter::empty(),
		}
	}

	pub fn edges_with_property<'a>(&'a self, key: &str, value: &PropertyValue) -> BoxedIter<'a, EdgeId> {
		match self.interner.lookup(key).and_then(|k| self.edge_indices.get(&k)) {
			Some(index) => index.iterate_equal(value),
			None => iter::empty(),
		}
	}

	/// Size of the smallest of `labels`' node partitions, used by the
	/// pattern executor to pick which constraint in a chain to scan
	/// first. `None` if `labels` is empty or none of them are known.
	pub fn label_partition_bound(&self, labels: &[String]) -> Option<usize> {
		self.node_labels.smallest_partition_size(labels)
	}

	/// All nodes carrying every label in `labels` and satisfying
	/// `filter`; picks the rarest label's partition as a seed rather
	/// than scanning the whole node arena (mirrors `FindNodes`'s
	/// smallest-partition strategy).
	pub fn find_nodes<'a>(&'a self, labels: &[String], filter: impl Fn(&Node) -> bool + 'a) -> BoxedIter<'a, NodeId> {
		let labels = labels.to_vec();
		let seed = if labels.is_empty() { self.node_labels.iterate_all() } else { self.node_labels.seed_for(&labels).unwrap_or_else(iter::empty) };
		iter::filter(seed, move |id: &NodeId| {
			let node = self.node(*id);
			node.labels.has_all(&labels) && filter(node)
		})
	}

	/// All edges carrying `label` (or, if `None`, any label) and
	/// satisfying `filter`. There is no label-only seed index for
	/// edges at the graph level — label partitions live per node side
	/// — so this scans the global edge list, narrowed by label first.
	pub fn find_edges<'a>(&'a self, label: Option<&str>, filter: impl Fn(&Edge) -> bool + 'a) -> BoxedIter<'a, EdgeId> {
		let label = label.map(|s| s.to_string());
		let seed = iter::sized(self.global_edges.iter(ArenaRef(&self.edges), SLOT_GLOBAL), self.global_edges.len());
		iter::filter(seed, move |id: &EdgeId| {
			let edge = self.edge(*id);
			label.as_deref().map(|l| edge.label == l).unwrap_or(true) && filter(edge)
		})
	}

	pub fn outgoing<'a>(&'a self, node: NodeId) -> BoxedIter<'a, EdgeId> {
		self.node(node).out.iterate_all(ArenaRef(&self.edges), SLOT_OUTGOING)
	}

	pub fn incoming<'a>(&'a self, node: NodeId) -> BoxedIter<'a, EdgeId> {
		self.node(node).incoming.iterate_all(ArenaRef(&self.edges), SLOT_INCOMING)
	}

	pub fn outgoing_with_label<'a>(&'a self, node: NodeId, label: &str) -> BoxedIter<'a, EdgeId> {
		self.node(node).out.iterate_label(ArenaRef(&self.edges), SLOT_OUTGOING, label)
	}

	pub fn incoming_with_label<'a>(&'a self, node: NodeId, label: &str) -> BoxedIter<'a, EdgeId> {
		self.node(node).incoming.iterate_label(ArenaRef(&self.edges), SLOT_INCOMING, label)
	}

	pub fn outgoing_with_any_label<'a>(&'a self, node: NodeId, labels: &LabelSet) -> BoxedIter<'a, EdgeId> {
		self.node(node).out.iterate_any_label(ArenaRef(&self.edges), SLOT_OUTGOING, labels)
	}

	pub fn incoming_with_any_label<'a>(&'a self, node: NodeId, labels: &LabelSet) -> BoxedIter<'a, EdgeId> {
		self.node(node).incoming.iterate_any_label(ArenaRef(&self.edges), SLOT_INCOMING, labels)
	}

	/// The nodes reachable by a single outgoing edge labeled `label`
	/// from `node` — supplements the library with a convenience the
	/// original Go `NextNodesWith`/`PrevNodesWith` provided but the
	/// edge-id-only query surface above does not.
	pub fn next_with_label<'a>(&'a self, node: NodeId, label: &str) -> BoxedIter<'a, NodeId> {
		iter::map(self.outgoing_with_label(node, label), |e| self.edge(e).target)
	}

	pub fn prev_with_label<'a>(&'a self, node: NodeId, label: &str) -> BoxedIter<'a, NodeId> {
		iter::map(self.incoming_with_label(node, label), |e| self.edge(e).source)
	}

	/// All node ids, in id order.
	pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.nodes.iter().enumerate().filter_map(|(i, n)| n.as_ref().map(|_| NodeId(i as u32)))
	}

	pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
		self.edges.iter().enumerate().filter_map(|(i, e)| e.as_ref().map(|_| EdgeId(i as u32)))
	}

	/// Builds a new, independent graph with the same topology, passing
	/// every property value through `transform` (e.g. to deep-copy a
	/// `Native` payload, or to strip a property entirely by mapping it
	/// to a sentinel the caller then filters — `clone_with` itself
	/// always keeps the key, mirroring `cloneNode`/`cloneEdge` plus the
	/// Go source's transform-on-clone convention).
	pub fn clone_with(&self, transform: impl Fn(&PropertyValue) -> PropertyValue) -> Graph {
		let mut out = Graph::new();
		let mut remap = AHashMap::default();
		for id in self.nodes() {
			let node = self.node(id);
			let props: Vec<(String, PropertyValue)> = node.properties.iter().map(|(k, v)| (self.interner.str(*k).to_string(), transform(v))).collect();
			let new_id = out.new_node(node.labels.iter().map(|s| s.to_string()), props);
			remap.insert(id, new_id);
		}
		for id in self.edges() {
			let edge = self.edge(id);
			let props: Vec<(String, PropertyValue)> = edge.properties.iter().map(|(k, v)| (self.interner.str(*k).to_string(), transform(v))).collect();
			out.new_edge(remap[&edge.source], remap[&edge.target], edge.label.clone(), props);
		}
		out
	}
}

/// A read-only view over an edge arena, used by query methods that
/// only need to read link slots, not mutate them (`&self` query paths
/// can't go through `EdgeArena`, which requires `&mut`).
#[derive(Clone, Copy)]
struct ArenaRef<'a>(&'a Vec<Option<Edge>>);

impl<'a> EdgeLinkStore for ArenaRef<'a> {
	fn links(&self, id: EdgeId) -> EdgeLinks {
		self.0[id.index() as usize].as_ref().expect("dangling edge id").links.0
	}

	fn set_links(&mut self, _id: EdgeId, _links: EdgeLinks) {
		unreachable!("ArenaRef is read-only")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_edge_links_both_endpoints() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		let b = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		let e = g.new_edge(a, b, "knows", Vec::<(&str, PropertyValue)>::new());
		assert_eq!(g.outgoing(a).collect::<Vec<_>>(), vec![e]);
		assert_eq!(g.incoming(b).collect::<Vec<_>>(), vec![e]);
	}

	#[test]
	fn self_loop_is_both_incoming_and_outgoing() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		let e = g.new_edge(a, a, "self", Vec::<(&str, PropertyValue)>::new());
		assert!(g.edge(e).is_loop());
		assert_eq!(g.outgoing(a).collect::<Vec<_>>(), vec![e]);
		assert_eq!(g.incoming(a).collect::<Vec<_>>(), vec![e]);
	}

	#[test]
	fn detach_removes_edges_but_keeps_node() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		let b = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		g.new_edge(a, b, "knows", Vec::<(&str, PropertyValue)>::new());
		g.detach(a);
		assert_eq!(g.edge_count(), 0);
		assert_eq!(g.node_count(), 2);
	}

	#[test]
	fn detach_and_remove_drops_the_node() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		g.detach_and_remove(a);
		assert_eq!(g.node_count(), 0);
	}

	#[test]
	fn property_overwrite_does_not_leak_interner_refcount() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		g.set_node_property(a, "name", "Alice");
		g.set_node_property(a, "name", "Alicia");
		assert_eq!(g.node(a).properties().len(), 1);
	}

	#[test]
	fn find_nodes_filters_by_all_labels() {
		let mut g = Graph::new();
		let a = g.new_node(["Person", "Admin"], Vec::<(&str, PropertyValue)>::new());
		let _b = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		let labels = vec!["Person".to_string(), "Admin".to_string()];
		let found: Vec<_> = g.find_nodes(&labels, |_| true).collect();
		assert_eq!(found, vec![a]);
	}

	#[test]
	fn property_index_tracks_value_changes() {
		let mut g = Graph::new();
		g.create_node_index("name", IndexKind::Hash);
		let a = g.new_node(Vec::<&str>::new(), [("name", PropertyValue::string("Alice"))]);
		assert_eq!(g.nodes_with_property("name", &PropertyValue::string("Alice")).collect::<Vec<_>>(), vec![a]);
		g.set_node_property(a, "name", "Bob");
		assert!(g.nodes_with_property("name", &PropertyValue::string("Alice")).collect::<Vec<_>>().is_empty());
		assert_eq!(g.nodes_with_property("name", &PropertyValue::string("Bob")).collect::<Vec<_>>(), vec![a]);
	}

	#[test]
	fn clone_with_transforms_every_property_value() {
		let mut g = Graph::new();
		let a = g.new_node(["Person"], [("age", PropertyValue::int(30))]);
		let b = g.new_node(["Person"], Vec::<(&str, PropertyValue)>::new());
		g.new_edge(a, b, "knows", [("since", PropertyValue::int(2020))]);
		let cloned = g.clone_with(|v| match v {
			PropertyValue::Int(i) => PropertyValue::Int(i + 1),
			other => other.clone(),
		});
		assert_eq!(cloned.node_count(), 2);
		assert_eq!(cloned.edge_count(), 1);
	}
}
