use crate::deque::Deque;
use crate::randomized_queue::RandomizedQueue;
use std::iter::FusedIterator;
use std::vec;

/// An iterator over the deque from front to back. It is constructed
/// from the [`iter`] method on `Deque`. It also walks back to front
/// through `DoubleEndedIterator`.
///
/// [`iter`]: struct.Deque.html#method.iter
pub struct Iter<'l, T> {
    target: &'l Deque<T>,
    front: usize,
    back: usize,
    // Items not yet yielded from either end. The cursors are only
    // followed while this is non-zero, so they never step onto the
    // sentinel.
    remaining: usize,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(target: &'l Deque<T>, front: usize, back: usize, remaining: usize) -> Self {
        Self {
            target,
            front,
            back,
            remaining,
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        if 0 != self.remaining {
            let r = self.target.slots[self.front]
                .get_used()
                .expect("self.target.slots[self.front] is expected to be used");
            self.front = r.links().next;
            self.remaining -= 1;
            Some(r.data())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> DoubleEndedIterator for Iter<'l, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if 0 != self.remaining {
            let r = self.target.slots[self.back]
                .get_used()
                .expect("self.target.slots[self.back] is expected to be used");
            self.back = r.links().prev;
            self.remaining -= 1;
            Some(r.data())
        } else {
            None
        }
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}
impl<'l, T> FusedIterator for Iter<'l, T> {}

impl<'l, T> IntoIterator for &'l Deque<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator that empties the deque from front to back. It is
/// constructed by calling `into_iter` on a `Deque`.
pub struct IntoIter<T>(Deque<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// An iterator over the randomized queue in a uniformly random
/// order. It is constructed from the [`iter`] method on
/// `RandomizedQueue`.
///
/// Each instance owns its own permutation of the queue's slots, so
/// several of them can be walked side by side without affecting each
/// other's order.
///
/// [`iter`]: struct.RandomizedQueue.html#method.iter
pub struct ShuffledIter<'l, T> {
    items: &'l [T],
    order: vec::IntoIter<usize>,
}

impl<'l, T> ShuffledIter<'l, T> {
    pub(crate) fn new(items: &'l [T], order: Vec<usize>) -> Self {
        debug_assert_eq!(items.len(), order.len());
        Self {
            items,
            order: order.into_iter(),
        }
    }
}

impl<'l, T> Iterator for ShuffledIter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.order.next().map(|ix| &items[ix])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'l, T> ExactSizeIterator for ShuffledIter<'l, T> {}
impl<'l, T> FusedIterator for ShuffledIter<'l, T> {}

impl<'l, T, R> IntoIterator for &'l RandomizedQueue<T, R>
where
    R: rand::Rng,
{
    type Item = &'l T;
    type IntoIter = ShuffledIter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the items of a randomized queue in a
/// uniformly random order. It is constructed by calling `into_iter` on
/// a `RandomizedQueue`.
pub struct ShuffledIntoIter<T> {
    items: vec::IntoIter<T>,
}

impl<T> ShuffledIntoIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<T> Iterator for ShuffledIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for ShuffledIntoIter<T> {}
impl<T> FusedIterator for ShuffledIntoIter<T> {}
