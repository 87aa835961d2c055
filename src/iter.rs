//! Iterator algebra (component H).
//!
//! Grounded on `original_source/itr.go`: a narrow iterator contract —
//! `next`/`value`/`max_size` — composed through small adapters rather
//! than a deep virtual hierarchy. Go reaches for `interface{}` values
//! and a `MaxSize` method because it has no generics-with-size-hints;
//! Rust already has `Iterator` plus `size_hint`, so the idiomatic
//! shape here is a thin extension trait adding the "upper bound or
//! unknown" hint the pattern compiler needs for seed selection, with
//! the Go adapters (`filterIterator`, `procIterator`, `funcIterator`,
//! `withSize`, `makeUniqueIterator`, `MultiIterator`) reimplemented as
//! boxed trait objects so the graph/index code can hand back whatever
//! concrete adapter chain it built without naming its type.

use ahash::AHashSet;
use std::hash::Hash;

/// An iterator that additionally knows an upper bound on how many
/// items remain, or reports it is unknown (`None`, the Go `-1`).
pub trait SizedIterator: Iterator {
	fn max_size(&self) -> Option<usize>;
}

pub type BoxedIter<'a, T> = Box<dyn SizedIterator<Item = T> + 'a>;

/// An iterator with zero items and a known size of zero.
pub fn empty<'a, T: 'a>() -> BoxedIter<'a, T> {
	struct Empty<T>(std::marker::PhantomData<T>);
	impl<T> Iterator for Empty<T> {
		type Item = T;
		fn next(&mut self) -> Option<T> {
			None
		}
	}
	impl<T> SizedIterator for Empty<T> {
		fn max_size(&self) -> Option<usize> {
			Some(0)
		}
	}
	Box::new(Empty(std::marker::PhantomData))
}

/// Annotates any plain iterator with a known max size, for sources
/// (e.g. a `Vec` drained into an iterator) that know their exact
/// length up front. Mirrors `withSize` in the Go source.
pub fn sized<'a, I>(inner: I, size: usize) -> BoxedIter<'a, I::Item>
where
	I: Iterator + 'a,
{
	struct Sized<I> {
		inner: I,
		size: usize,
	}
	impl<I: Iterator> Iterator for Sized<I> {
		type Item = I::Item;
		fn next(&mut self) -> Option<I::Item> {
			self.inner.next()
		}
	}
	impl<I: Iterator> SizedIterator for Sized<I> {
		fn max_size(&self) -> Option<usize> {
			Some(self.size)
		}
	}
	Box::new(Sized { inner, size })
}

/// Wraps a plain iterator whose size is not known ahead of time.
pub fn unsized_iter<'a, I>(inner: I) -> BoxedIter<'a, I::Item>
where
	I: Iterator + 'a,
{
	struct Unsized<I>(I);
	impl<I: Iterator> Iterator for Unsized<I> {
		type Item = I::Item;
		fn next(&mut self) -> Option<I::Item> {
			self.0.next()
		}
	}
	impl<I: Iterator> SizedIterator for Unsized<I> {
		fn max_size(&self) -> Option<usize> {
			None
		}
	}
	Box::new(Unsized(inner))
}

/// Filters the inner iterator. The size hint propagates from the
/// inner iterator — filtering can only shrink the result, but the Go
/// source propagates the same (over-)estimate, which callers already
/// treat as an upper bound, not an exact count.
pub fn filter<'a, T: 'a>(inner: BoxedIter<'a, T>, pred: impl FnMut(&T) -> bool + 'a) -> BoxedIter<'a, T> {
	struct Filter<'a, T> {
		inner: BoxedIter<'a, T>,
		pred: Box<dyn FnMut(&T) -> bool + 'a>,
	}
	impl<'a, T> Iterator for Filter<'a, T> {
		type Item = T;
		fn next(&mut self) -> Option<T> {
			for item in self.inner.by_ref() {
				if (self.pred)(&item) {
					return Some(item);
				}
			}
			None
		}
	}
	impl<'a, T> SizedIterator for Filter<'a, T> {
		fn max_size(&self) -> Option<usize> {
			self.inner.max_size()
		}
	}
	Box::new(Filter { inner, pred: Box::new(pred) })
}

/// Maps items through `f`, propagating the inner size hint exactly
/// (a 1:1 transform never changes cardinality).
pub fn map<'a, T: 'a, O: 'a>(inner: BoxedIter<'a, T>, f: impl FnMut(T) -> O + 'a) -> BoxedIter<'a, O> {
	struct Map<'a, T, O> {
		inner: BoxedIter<'a, T>,
		f: Box<dyn FnMut(T) -> O + 'a>,
	}
	impl<'a, T, O> Iterator for Map<'a, T, O> {
		type Item = O;
		fn next(&mut self) -> Option<O> {
			self.inner.next().map(|v| (self.f)(v))
		}
	}
	impl<'a, T, O> SizedIterator for Map<'a, T, O> {
		fn max_size(&self) -> Option<usize> {
			self.inner.max_size()
		}
	}
	Box::new(Map { inner, f: Box::new(f) })
}

/// Concatenates iterators end to end. Mirrors `MultiIterator`; the
/// combined size is unknown once more than a single source is
/// involved unless every source reports a size, matching the source's
/// conservative `-1`.
pub fn concat<'a, T: 'a>(iters: Vec<BoxedIter<'a, T>>) -> BoxedIter<'a, T> {
	struct Concat<'a, T> {
		iters: std::collections::VecDeque<BoxedIter<'a, T>>,
		total_size: Option<usize>,
	}
	impl<'a, T> Iterator for Concat<'a, T> {
		type Item = T;
		fn next(&mut self) -> Option<T> {
			while let Some(front) = self.iters.front_mut() {
				if let Some(v) = front.next() {
					return Some(v);
				}
				self.iters.pop_front();
			}
			None
		}
	}
	impl<'a, T> SizedIterator for Concat<'a, T> {
		fn max_size(&self) -> Option<usize> {
			self.total_size
		}
	}
	let total_size = iters.iter().try_fold(0usize, |acc, it| it.max_size().map(|s| acc + s));
	Box::new(Concat { iters: iters.into(), total_size })
}

/// Filters out items already seen, by a derived key. Size is unknown
/// (`makeUniqueIterator` in the Go source never reports a size
/// either).
pub fn unique<'a, T: 'a, K>(inner: BoxedIter<'a, T>, key: impl Fn(&T) -> K + 'a) -> BoxedIter<'a, T>
where
	K: Hash + Eq,
{
	struct Unique<'a, T, K> {
		inner: BoxedIter<'a, T>,
		key: Box<dyn Fn(&T) -> K + 'a>,
		seen: AHashSet<K>,
	}
	impl<'a, T, K: Hash + Eq> Iterator for Unique<'a, T, K> {
		type Item = T;
		fn next(&mut self) -> Option<T> {
			for item in self.inner.by_ref() {
				if self.seen.insert((self.key)(&item)) {
					return Some(item);
				}
			}
			None
		}
	}
	impl<'a, T, K: Hash + Eq> SizedIterator for Unique<'a, T, K> {
		fn max_size(&self) -> Option<usize> {
			None
		}
	}
	Box::new(Unique { inner, key: Box::new(key), seen: AHashSet::new() })
}

/// Pulls a fresh iterator from `next_iter` whenever the current one is
/// exhausted, stopping when it returns `None`. Mirrors `funcIterator`.
pub fn from_fn<'a, T: 'a>(mut next_iter: impl FnMut() -> Option<BoxedIter<'a, T>> + 'a) -> BoxedIter<'a, T> {
	struct FromFn<'a, T> {
		current: Option<BoxedIter<'a, T>>,
		next_iter: Box<dyn FnMut() -> Option<BoxedIter<'a, T>> + 'a>,
	}
	impl<'a, T> Iterator for FromFn<'a, T> {
		type Item = T;
		fn next(&mut self) -> Option<T> {
			loop {
				if let Some(cur) = self.current.as_mut() {
					if let Some(v) = cur.next() {
						return Some(v);
					}
					self.current = None;
				}
				self.current = (self.next_iter)();
				self.current.as_ref()?;
			}
		}
	}
	impl<'a, T> SizedIterator for FromFn<'a, T> {
		fn max_size(&self) -> Option<usize> {
			None
		}
	}
	Box::new(FromFn { current: next_iter(), next_iter: Box::new(next_iter) })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filter_propagates_inner_size_as_upper_bound() {
		let it = sized(vec![1, 2, 3, 4].into_iter(), 4);
		let it = filter(it, |v| v % 2 == 0);
		assert_eq!(it.max_size(), Some(4));
		assert_eq!(it.collect::<Vec<_>>(), vec![2, 4]);
	}

	#[test]
	fn concat_sums_known_sizes() {
		let a = sized(vec![1, 2].into_iter(), 2);
		let b = sized(vec![3].into_iter(), 1);
		let c = concat(vec![a, b]);
		assert_eq!(c.max_size(), Some(3));
		assert_eq!(c.collect::<Vec<_>>(), vec![1, 2, 3]);
	}

	#[test]
	fn concat_is_unknown_if_any_source_is_unknown() {
		let a = sized(vec![1].into_iter(), 1);
		let b = unsized_iter(vec![2].into_iter());
		let c = concat(vec![a, b]);
		assert_eq!(c.max_size(), None);
	}

	#[test]
	fn unique_drops_duplicates_by_key() {
		let it = unsized_iter(vec![1, 1, 2, 3, 2].into_iter());
		let it = unique(it, |v| *v);
		assert_eq!(it.collect::<Vec<_>>(), vec![1, 2, 3]);
	}

	#[test]
	fn empty_has_zero_size() {
		let it: BoxedIter<i32> = empty();
		assert_eq!(it.max_size(), Some(0));
	}
}
