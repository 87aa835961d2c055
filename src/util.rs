//! Small shared collection helpers used by the indexing subsystem.

use ahash::AHashMap;

/// A map that preserves key insertion order, used wherever the spec
/// requires deterministic "label-insertion order" iteration (label
/// partitions, the node-by-label index).
#[derive(Debug, Clone)]
pub struct InsertionOrderedMap<K, V> {
	order: Vec<K>,
	slots: AHashMap<K, V>,
}

impl<K, V> Default for InsertionOrderedMap<K, V> {
	fn default() -> Self {
		Self { order: Vec::new(), slots: AHashMap::default() }
	}
}

impl<K, V> InsertionOrderedMap<K, V>
where
	K: std::hash::Hash + Eq + Clone,
{
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &K) -> Option<&V> {
		self.slots.get(key)
	}

	pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		self.slots.get_mut(key)
	}

	pub fn contains_key(&self, key: &K) -> bool {
		self.slots.contains_key(key)
	}

	/// Inserts a new key in insertion order. Does nothing to the order
	/// if the key already exists; the caller is expected to use
	/// `get_mut` for updates.
	pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
		if !self.slots.contains_key(&key) {
			self.order.push(key.clone());
			self.slots.insert(key.clone(), default());
		}
		self.slots.get_mut(&key).unwrap()
	}

	pub fn remove(&mut self, key: &K) -> Option<V> {
		let removed = self.slots.remove(key);
		if removed.is_some() {
			self.order.retain(|k| k != key);
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Iterates keys in insertion order.
	pub fn keys_in_order(&self) -> impl Iterator<Item = &K> {
		self.order.iter()
	}

	/// Iterates (key, value) pairs in insertion order.
	pub fn iter_in_order(&self) -> impl Iterator<Item = (&K, &V)> {
		self.order.iter().map(move |k| (k, self.slots.get(k).unwrap()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn preserves_insertion_order_across_removals() {
		let mut m: InsertionOrderedMap<&'static str, i32> = InsertionOrderedMap::new();
		m.get_or_insert_with("b", || 2);
		m.get_or_insert_with("a", || 1);
		m.get_or_insert_with("c", || 3);
		assert_eq!(m.keys_in_order().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
		m.remove(&"a");
		assert_eq!(m.keys_in_order().copied().collect::<Vec<_>>(), vec!["b", "c"]);
	}
}
