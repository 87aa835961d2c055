//! Node-by-label index (component F).
//!
//! Grounded on `original_source/maps.go`'s `NodeMap`: a label-insertion
//! ordered map from label to the identity-set of nodes carrying it,
//! plus a distinguished partition for nodes with no labels at all, so
//! `find_nodes` with an empty label set still has a seed to iterate.

use crate::identity_set::IdentitySet;
use crate::ids::NodeId;
use crate::iter::{self, BoxedIter};
use crate::util::InsertionOrderedMap;

#[derive(Debug, Clone, Default)]
pub struct NodeLabelIndex {
	by_label: InsertionOrderedMap<String, IdentitySet<NodeId>>,
	unlabeled: IdentitySet<NodeId>,
}

impl NodeLabelIndex {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, id: NodeId, labels: &[String]) {
		if labels.is_empty() {
			self.unlabeled.add(id.index(), id);
			return;
		}
		for label in labels {
			self.by_label.get_or_insert_with(label.clone(), IdentitySet::new).add(id.index(), id);
		}
	}

	pub fn remove(&mut self, id: NodeId, labels: &[String]) {
		if labels.is_empty() {
			self.unlabeled.remove(id.index());
			return;
		}
		for label in labels {
			if let Some(set) = self.by_label.get_mut(label) {
				set.remove(id.index());
				if set.is_empty() {
					self.by_label.remove(label);
				}
			}
		}
	}

	pub fn add_label(&mut self, id: NodeId, label: &str) {
		self.by_label.get_or_insert_with(label.to_string(), IdentitySet::new).add(id.index(), id);
	}

	pub fn remove_label(&mut self, id: NodeId, label: &str) {
		let key = label.to_string();
		if let Some(set) = self.by_label.get_mut(&key) {
			set.remove(id.index());
			if set.is_empty() {
				self.by_label.remove(&key);
			}
		}
	}

	/// Size of the smallest partition among `labels`, used by
	/// find-nodes seed selection (spec.md §4.F — "has all of these
	/// labels" queries scan the rarest label first).
	pub fn smallest_partition_size(&self, labels: &[String]) -> Option<usize> {
		labels.iter().filter_map(|l| self.by_label.get(l).map(|s| s.size())).min()
	}

	pub fn iterate_label<'a>(&'a self, label: &str) -> BoxedIter<'a, NodeId> {
		match self.by_label.get(&label.to_string()) {
			Some(set) => iter::sized(set.iter().copied(), set.size()),
			None => iter::empty(),
		}
	}

	pub fn iterate_unlabeled<'a>(&'a self) -> BoxedIter<'a, NodeId> {
		iter::sized(self.unlabeled.iter().copied(), self.unlabeled.size())
	}

	/// All nodes, over every label partition plus the unlabeled
	/// partition, each node appearing once regardless of how many
	/// labels it carries.
	pub fn iterate_all<'a>(&'a self) -> BoxedIter<'a, NodeId> {
		let mut iters: Vec<BoxedIter<'a, NodeId>> = self.by_label.iter_in_order().map(|(_, set)| iter::sized(set.iter().copied(), set.size())).collect();
		iters.push(iter::sized(self.unlabeled.iter().copied(), self.unlabeled.size()));
		iter::unique(iter::concat(iters), |id: &NodeId| *id)
	}

	/// The smallest-labeled partition among `labels`, as a seed
	/// iterator for a "has all of these labels" scan; `None` if
	/// `labels` is empty (caller falls back to `iterate_all`).
	pub fn seed_for<'a>(&'a self, labels: &[String]) -> Option<BoxedIter<'a, NodeId>> {
		let smallest = labels.iter().min_by_key(|l| self.by_label.get(l).map(|s| s.size()).unwrap_or(0))?;
		Some(self.iterate_label(smallest))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nid(i: u32) -> NodeId {
		NodeId(i)
	}

	#[test]
	fn unlabeled_nodes_land_in_their_own_partition() {
		let mut idx = NodeLabelIndex::new();
		idx.add(nid(1), &[]);
		idx.add(nid(2), &["Person".to_string()]);
		assert_eq!(idx.iterate_unlabeled().collect::<Vec<_>>(), vec![nid(1)]);
		assert_eq!(idx.iterate_label("Person").collect::<Vec<_>>(), vec![nid(2)]);
	}

	#[test]
	fn smallest_partition_picks_rarest_label() {
		let mut idx = NodeLabelIndex::new();
		idx.add(nid(1), &["Person".to_string()]);
		idx.add(nid(2), &["Person".to_string()]);
		idx.add(nid(3), &["Admin".to_string()]);
		let labels = vec!["Person".to_string(), "Admin".to_string()];
		assert_eq!(idx.smallest_partition_size(&labels), Some(1));
		let seed: Vec<_> = idx.seed_for(&labels).unwrap().collect();
		assert_eq!(seed, vec![nid(3)]);
	}

	#[test]
	fn emptied_partition_is_removed() {
		let mut idx = NodeLabelIndex::new();
		idx.add(nid(1), &["Person".to_string()]);
		idx.remove(nid(1), &["Person".to_string()]);
		assert_eq!(idx.smallest_partition_size(&["Person".to_string()]), None);
	}
}
