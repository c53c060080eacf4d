//! Two generic containers with constant time operations at their ends.
//!
//! [`Deque`] is a double-ended queue built as a circular doubly-linked
//! ring anchored on a sentinel node. The nodes live in a `Vec` and
//! track their neighbors by index, so there are no self-referential
//! pointers. Slots of removed nodes are put on an internal free list
//! and reused by later insertions before the `Vec` is expanded.
//!
//! [`RandomizedQueue`] removes and samples items uniformly at random.
//! It is backed by a resizable array that removes by swapping in the
//! last item, and every iterator walks its own freshly shuffled
//! permutation of the items.
//!
//! Neither container is thread-safe; both are meant for use by a single
//! owner.

mod deque;
mod error;
mod iterators;
mod randomized_queue;
mod slot;

pub use crate::deque::Deque;
pub use crate::error::{Error, Result};
pub use crate::iterators::{IntoIter, Iter, ShuffledIntoIter, ShuffledIter};
pub use crate::randomized_queue::{RandomizedQueue, DEFAULT_MIN_CAPACITY};
