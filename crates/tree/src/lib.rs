//! Ordered associative containers over a red-black tree.
//!
//! [`TreeMap`] is a comparison-ordered key/value map; [`TreeSet`] is the
//! same engine with a unit payload. Instead of heap pointers, all node
//! links are `Option<u32>` indices into an arena of slots, with vacated
//! slots reused through a free list.
//!
//! The comparator is fixed when the container is built: `new()` uses the
//! key's [`Ord`] and `with_comparator` accepts any total order over the
//! key type. Values dropped by `remove`, `clear`, or the duplicate path
//! of [`TreeMap::join`] are released exactly once through ordinary
//! [`Drop`]; values moved by `join` are handed off to the destination
//! without being duplicated or dropped.

mod arena;
mod balance;
mod error;
mod map;
mod node;
mod set;

pub use error::ReserveError;
pub use map::{Iter, TreeMap};
pub use set::TreeSet;
