use crate::error::{Error, Result};
use crate::iterators::Iter;
use crate::slot::{Links, Slot};
use std::fmt;
use std::iter::FromIterator;
use std::usize;

// The slot holding the ring's sentinel. It is allocated when the deque
// is created and never freed.
const SENTINEL: usize = 0;

/// A double-ended queue with constant time insertion and removal at
/// both ends.
///
/// Items live in a circular doubly-linked ring anchored on a sentinel
/// node. The nodes are stored in a `Vec` and refer to each other by
/// index. The sentinel's `next` is the front of the deque and its
/// `prev` is the back; in an empty deque both point at the sentinel
/// itself.
///
/// As items are removed, their slots are put on an internal free list
/// which is drained by later insertions before the `Vec` is expanded.
pub struct Deque<T> {
    // Index of the first element on the free list. MAX when the
    // free-list is empty.
    free_list: usize,
    // The number of slots currently used by entries.
    len_used: usize,
    // The number of slots currently on the free list.
    len_free: usize,
    // The sentinel, followed by used and free slots in no particular
    // order.
    pub(crate) slots: Vec<Slot<T>>,
}

impl<T> fmt::Debug for Deque<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Creates an empty `Deque`. Only the sentinel is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Deque<T> {
        Deque {
            free_list: usize::MAX,
            len_used: 0,
            len_free: 0,
            slots: vec![Slot::new_sentinel(SENTINEL)],
        }
    }

    /// Create a new `Deque` instance with a freelist at least
    /// `capacity` elements deep.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(16);
    /// assert_eq!(16, deque.len_freelist());
    /// ```
    pub fn with_capacity(capacity: usize) -> Deque<T> {
        let mut vec = Vec::with_capacity(capacity + 1);
        vec.push(Slot::new_sentinel(SENTINEL));

        let mut next = usize::MAX;
        for i in 1..=capacity {
            vec.push(Slot::new_free(next));
            next = i;
        }

        Deque {
            free_list: next,
            len_used: 0,
            len_free: capacity,
            slots: vec,
        }
    }

    /// Returns how many items could be held without resizing the
    /// internal vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let d: Deque<u8> = Deque::with_capacity(16);
    /// assert!(16 <= d.capacity());
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// The number of items in the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// d.push_front(1);
    /// d.push_back(2);
    /// assert_eq!(2, d.len());
    ///
    /// d.pop_front().unwrap();
    /// assert_eq!(1, d.len());
    /// ```
    pub fn len(&self) -> usize {
        self.len_used
    }

    /// True when the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// assert!(d.is_empty());
    ///
    /// d.push_front(1);
    /// assert!(!d.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(
            0 == self.len_used,
            SENTINEL == self.links(SENTINEL).next
        );
        0 == self.len_used
    }

    /// The number of entries on the deque's freelist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// assert_eq!(0, d.len_freelist());
    ///
    /// d.push_front(1);
    /// assert_eq!(0, d.len_freelist());
    ///
    /// d.pop_front().unwrap();
    /// assert_eq!(1, d.len_freelist());
    ///
    /// d.push_front(2);
    /// assert_eq!(0, d.len_freelist());
    /// ```
    pub fn len_freelist(&self) -> usize {
        self.len_free
    }

    /// Insert `data` into the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.push_front(10);
    /// l.push_front(20);
    ///
    /// assert_eq!(Some(&20), l.front());
    /// ```
    pub fn push_front(&mut self, data: T) {
        let front = self.links(SENTINEL).next;
        self.link(SENTINEL, front, data);
    }

    /// Insert `data` into the back of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.push_back(10);
    /// l.push_back(20);
    ///
    /// assert_eq!(Some(&20), l.back());
    /// ```
    pub fn push_back(&mut self, data: T) {
        let back = self.links(SENTINEL).prev;
        self.link(back, SENTINEL, data);
    }

    /// Remove the front of the deque and return it. If the deque is
    /// empty, an [`Error::Empty`] is returned and the deque is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.push_back(10);
    /// l.push_back(20);
    ///
    /// assert_eq!(Ok(10), l.pop_front());
    /// assert_eq!(Ok(20), l.pop_front());
    /// assert!(l.pop_front().is_err());
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Self::empty());
        }

        let front = self.links(SENTINEL).next;
        Ok(self.unlink(front))
    }

    /// Remove the back of the deque and return it. If the deque is
    /// empty, an [`Error::Empty`] is returned and the deque is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.push_front(10);
    /// l.push_front(20);
    ///
    /// assert_eq!(Ok(10), l.pop_back());
    /// assert_eq!(Ok(20), l.pop_back());
    /// assert!(l.pop_back().is_err());
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Self::empty());
        }

        let back = self.links(SENTINEL).prev;
        Ok(self.unlink(back))
    }

    /// Get the front value of the deque. If the deque is empty, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// assert_eq!(None, l.front());
    ///
    /// l.push_back(10);
    /// assert_eq!(Some(&10), l.front());
    /// ```
    pub fn front(&self) -> Option<&T> {
        // The sentinel is never a used slot, so an empty ring yields
        // `None` here.
        self.slots[self.links(SENTINEL).next]
            .get_used()
            .map(|u| u.data())
    }

    /// Get the back of the deque. If the deque is empty, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut l = Deque::new();
    /// assert_eq!(None, l.back());
    ///
    /// l.push_front(10);
    /// assert_eq!(Some(&10), l.back());
    /// ```
    pub fn back(&self) -> Option<&T> {
        self.slots[self.links(SENTINEL).prev]
            .get_used()
            .map(|u| u.data())
    }

    /// Create an iterator over the deque from front to back. Each call
    /// starts a fresh cursor at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// d.push_back(3);
    ///
    /// let v: Vec<&u8> = d.iter().collect();
    /// assert_eq!(vec![&1, &2, &3], v);
    ///
    /// let v: Vec<&u8> = d.iter().rev().collect();
    /// assert_eq!(vec![&3, &2, &1], v);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        let Links { prev, next } = self.links(SENTINEL);
        Iter::new(self, next, prev, self.len_used)
    }

    pub(crate) fn links(&self, ix: usize) -> Links {
        self.slots[ix]
            .links()
            .expect("self.slots[ix] is expected to be in the ring")
    }

    fn links_mut(&mut self, ix: usize) -> &mut Links {
        self.slots[ix]
            .links_mut()
            .expect("self.slots[ix] is expected to be in the ring")
    }

    fn empty() -> Error {
        Error::Empty {
            container: "deque",
            operation: "remove from",
        }
    }

    // Splice a new node holding `data` between the adjacent nodes
    // `prev` and `next`.
    fn link(&mut self, prev: usize, next: usize, data: T) {
        debug_assert_eq!(next, self.links(prev).next);
        debug_assert_eq!(prev, self.links(next).prev);

        let ix = self.allocate(prev, next, data);
        self.links_mut(prev).next = ix;
        self.links_mut(next).prev = ix;
    }

    // Splice the node at `ix` out of the ring and return its data.
    fn unlink(&mut self, ix: usize) -> T {
        debug_assert_ne!(SENTINEL, ix);

        let (Links { prev, next }, data) = self
            .free(ix)
            .into_used()
            .expect("self.slots[ix] is expected to be used")
            .take();

        self.links_mut(prev).next = next;
        self.links_mut(next).prev = prev;

        data
    }

    fn allocate(&mut self, prev: usize, next: usize, data: T) -> usize {
        self.len_used += 1;

        let s = Slot::new_used(prev, next, data);

        if usize::MAX == self.free_list {
            self.slots.push(s);
            log::trace!("deque arena grew to {} slots", self.slots.len());
            self.slots.len() - 1
        } else {
            let ix = self.free_list;
            self.free_list = self.slots[ix]
                .get_free()
                .expect("self.slots[self.free_list] is expected to be free")
                .next();
            self.slots[ix] = s;
            self.len_free -= 1;
            ix
        }
    }

    fn free(&mut self, ix: usize) -> Slot<T> {
        debug_assert!(self.slots[ix].get_used().is_some());

        self.len_used -= 1;

        let mut v = Slot::new_free(self.free_list);
        std::mem::swap(&mut v, &mut self.slots[ix]);
        self.free_list = ix;
        self.len_free += 1;
        v
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        l.extend(iter);
        l
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.push_back(i);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Walk the ring from the sentinel and check that every hop is
    // mirrored by the reverse link, that only used slots are visited,
    // and that the counts add up.
    fn assert_ring<T>(d: &Deque<T>) {
        let mut count = 0;
        let mut ix = SENTINEL;

        loop {
            let next = d.links(ix).next;
            assert_eq!(ix, d.links(next).prev);
            ix = next;

            if SENTINEL == ix {
                break;
            }

            assert!(d.slots[ix].get_used().is_some());
            count += 1;
        }

        assert_eq!(d.len(), count);
        assert_eq!(d.slots.len(), 1 + d.len() + d.len_freelist());
    }

    #[test]
    fn new_deque_is_an_empty_ring() {
        let l: Deque<u8> = Deque::new();

        assert_ring(&l);
        assert!(l.is_empty());
        assert_eq!(0, l.len());
        assert_eq!(Links { prev: 0, next: 0 }, l.links(SENTINEL));
    }

    #[test]
    fn push_front_and_back_keep_ring_linked() {
        let mut l = Deque::new();
        l.push_front(10u8);
        assert_ring(&l);
        l.push_back(11u8);
        assert_ring(&l);
        l.push_front(9u8);
        assert_ring(&l);

        assert_eq!(Some(&9), l.front());
        assert_eq!(Some(&11), l.back());
        assert_eq!(3, l.len());
    }

    #[test]
    fn add_last_then_remove_last_reverses() {
        let mut l = Deque::new();
        for i in 0..5 {
            l.push_back(i);
        }

        for i in (0..5).rev() {
            assert_eq!(Ok(i), l.pop_back());
            assert_ring(&l);
        }

        assert!(l.is_empty());
    }

    #[test]
    fn add_first_then_remove_first_reverses() {
        let mut l = Deque::new();
        for i in 0..5 {
            l.push_front(i);
        }

        for i in (0..5).rev() {
            assert_eq!(Ok(i), l.pop_front());
            assert_ring(&l);
        }

        assert!(l.is_empty());
    }

    #[test]
    fn mixed_ends() {
        let mut l = Deque::new();
        l.push_back(2u8);
        l.push_front(1u8);
        l.push_back(3u8);

        assert_eq!(Ok(3), l.pop_back());
        assert_eq!(Ok(1), l.pop_front());
        assert_eq!(Ok(2), l.pop_back());
        assert_ring(&l);
        assert!(l.is_empty());
    }

    #[test]
    fn counts_work_as_expected() {
        let mut l = Deque::new();
        l.push_front(10u8);
        l.push_front(11u8);
        assert_eq!(2, l.len());
        assert_eq!(0, l.len_freelist());

        l.pop_back().unwrap();
        assert_eq!(1, l.len());
        assert_eq!(1, l.len_freelist());

        l.pop_back().unwrap();
        assert_eq!(0, l.len());
        assert_eq!(2, l.len_freelist());

        l.push_front(12u8);
        assert_eq!(1, l.len());
        assert_eq!(1, l.len_freelist());

        l.push_front(13u8);
        assert_eq!(2, l.len());
        assert_eq!(0, l.len_freelist());
        assert_ring(&l);
    }

    #[test]
    fn empty_removal_fails_and_leaves_deque_intact() {
        let mut l: Deque<u8> = Deque::new();
        l.push_front(1);
        l.pop_front().unwrap();

        let before = l.slots.len();

        assert_eq!(
            Err(Error::Empty {
                container: "deque",
                operation: "remove from",
            }),
            l.pop_front()
        );
        assert!(l.pop_back().is_err());

        assert!(l.is_empty());
        assert_eq!(None, l.front());
        assert_eq!(None, l.back());
        assert_eq!(before, l.slots.len());
        assert_ring(&l);
    }

    #[test]
    fn can_be_created_from_iterator() {
        let mut l = Deque::from_iter(0..5);
        assert_ring(&l);

        for i in 0..5 {
            assert_eq!(Ok(i), l.pop_front());
        }
    }

    #[test]
    fn with_capacity_preallocates_free_list() {
        let mut l = Deque::with_capacity(3);
        assert_eq!(3, l.len_freelist());
        assert_eq!(0, l.len());
        assert_ring(&l);

        l.push_front(());
        assert_eq!(2, l.len_freelist());
        assert_eq!(1, l.len());

        // The arena should not have grown.
        assert_eq!(4, l.slots.len());

        l.push_front(());
        l.push_front(());
        l.push_front(());

        assert_eq!(0, l.len_freelist());
        assert_eq!(4, l.len());
        assert_eq!(5, l.slots.len());
        assert_ring(&l);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut l = Deque::new();
        for i in 0..8u8 {
            l.push_back(i);
        }
        for _ in 0..8 {
            l.pop_front().unwrap();
        }

        let slots = l.slots.len();
        for i in 0..8u8 {
            l.push_front(i);
        }

        assert_eq!(slots, l.slots.len());
        assert_ring(&l);
    }

    #[test]
    fn debug_string() {
        let mut l: Deque<u8> = Deque::new();

        l.push_back(1);
        l.push_back(2);
        l.push_back(3);

        assert_eq!("[1, 2, 3]", format!("{:?}", l));
    }
}
