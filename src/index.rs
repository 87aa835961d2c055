//! Property index (component E).
//!
//! Grounded on `original_source/indexes.go`, `btreeindex.go` and
//! `hashindex.go`: a polymorphic index over one property key, backed
//! by either a sorted tree (range-queryable) or a hash table
//! (equality-only, cheaper to maintain). Both map a value to the
//! identity-set of nodes or edges carrying it, and both reindex
//! existing entries when created over a key that is already in use.

use crate::identity_set::IdentitySet;
use crate::iter::{self, BoxedIter};
use crate::value::PropertyValue;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
	BTree,
	Hash,
}

enum Backing<Id> {
	BTree(BTreeMap<PropertyValue, IdentitySet<Id>>),
	Hash(ahash::AHashMap<PropertyValue, IdentitySet<Id>>),
}

/// An index over a single property key. `Id` is `NodeId` or `EdgeId`.
pub struct PropertyIndex<Id> {
	kind: IndexKind,
	backing: Backing<Id>,
}

impl<Id: Copy> PropertyIndex<Id> {
	pub fn new(kind: IndexKind) -> Self {
		let backing = match kind {
			IndexKind::BTree => Backing::BTree(BTreeMap::new()),
			IndexKind::Hash => Backing::Hash(ahash::AHashMap::default()),
		};
		Self { kind, backing }
	}

	pub fn kind(&self) -> IndexKind {
		self.kind
	}

	pub fn is_empty(&self) -> bool {
		match &self.backing {
			Backing::BTree(m) => m.is_empty(),
			Backing::Hash(m) => m.is_empty(),
		}
	}

	/// Adds `id` under `value`. Idempotent: re-adding the same
	/// (value, id) pair leaves the index unchanged, matching the "no
	/// duplicate effect on repeated index creation" contract.
	pub fn add(&mut self, value: &PropertyValue, raw_id: u32, id: Id) {
		match &mut self.backing {
			Backing::BTree(m) => {
				m.entry(value.clone()).or_insert_with(IdentitySet::new).add(raw_id, id);
			}
			Backing::Hash(m) => {
				m.entry(value.clone()).or_insert_with(IdentitySet::new).add(raw_id, id);
			}
		}
	}

	pub fn remove(&mut self, value: &PropertyValue, raw_id: u32) {
		match &mut self.backing {
			Backing::BTree(m) => {
				if let Some(set) = m.get_mut(value) {
					set.remove(raw_id);
					if set.is_empty() {
						m.remove(value);
					}
				}
			}
			Backing::Hash(m) => {
				if let Some(set) = m.get_mut(value) {
					set.remove(raw_id);
					if set.is_empty() {
						m.remove(value);
					}
				}
			}
		}
	}

	pub fn size_for(&self, value: &PropertyValue) -> Option<usize> {
		match &self.backing {
			Backing::BTree(m) => m.get(value).map(|s| s.size()),
			Backing::Hash(m) => m.get(value).map(|s| s.size()),
		}
	}

	pub fn iterate_equal<'a>(&'a self, value: &PropertyValue) -> BoxedIter<'a, Id> {
		let set = match &self.backing {
			Backing::BTree(m) => m.get(value),
			Backing::Hash(m) => m.get(value),
		};
		match set {
			Some(s) => iter::sized(s.iter().copied(), s.size()),
			None => iter::empty(),
		}
	}

	/// Range scan over `[start, end)`; only meaningful on a `BTree`
	/// index (a `Hash` index returns nothing — equality-only, as the
	/// Go `hashIndex` never supported ranges either).
	pub fn iterate_range<'a>(&'a self, start: &PropertyValue, end: &PropertyValue) -> BoxedIter<'a, Id> {
		match &self.backing {
			Backing::BTree(m) => {
				let iters: Vec<BoxedIter<'a, Id>> = m.range(start.clone()..end.clone()).map(|(_, s)| iter::sized(s.iter().copied(), s.size())).collect();
				iter::concat(iters)
			}
			Backing::Hash(_) => iter::empty(),
		}
	}

	pub fn iterate_all<'a>(&'a self) -> BoxedIter<'a, Id> {
		match &self.backing {
			Backing::BTree(m) => {
				let iters: Vec<BoxedIter<'a, Id>> = m.values().map(|s| iter::sized(s.iter().copied(), s.size())).collect();
				iter::concat(iters)
			}
			Backing::Hash(m) => {
				let iters: Vec<BoxedIter<'a, Id>> = m.values().map(|s| iter::sized(s.iter().copied(), s.size())).collect();
				iter::concat(iters)
			}
		}
	}
}
