//! An in-memory labeled property graph: nodes carry a label set and a
//! property map, edges are directed and carry one label and a
//! property map, and the graph supports label/property indexing plus
//! a backtracking pattern matcher for fixed- and variable-length path
//! queries.
//!
//! Everything here is single-threaded and unsynchronized — a `Graph`
//! is `Send` but not `Sync`-friendly under concurrent mutation; wrap
//! it in your own `Mutex`/`RwLock` if you need to share one across
//! threads.

pub mod adjacency;
pub mod graph;
pub mod identity_set;
pub mod ids;
pub mod index;
pub mod intern;
pub mod iter;
pub mod label_index;
pub mod path;
pub mod pattern;
pub mod util;
pub mod value;

pub use graph::{Edge, Graph, LabelSet, Node};
pub use ids::{EdgeId, NodeId};
pub use index::IndexKind;
pub use intern::InternedKey;
pub use iter::{BoxedIter, SizedIterator};
pub use path::{Path, PathElement};
pub use value::{Comparison, NativeValue, PropertyValue};
