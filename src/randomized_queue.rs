use crate::error::{Error, Result};
use crate::iterators::{ShuffledIntoIter, ShuffledIter};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cell::RefCell;
use std::cmp;
use std::fmt;
use std::iter::FromIterator;

/// The capacity a queue starts with and never shrinks below, unless
/// another one is given to [`RandomizedQueue::with_capacity`].
pub const DEFAULT_MIN_CAPACITY: usize = 20;

/// A queue whose removals pick an item uniformly at random.
///
/// Items are kept packed in the front of a backing array in no
/// meaningful order. Removing swaps the last item into the hole, so
/// `enqueue` and `dequeue` are O(1) amortized. The array doubles when
/// it is full and halves when only a quarter of it is in use, but
/// never drops below its minimum capacity.
///
/// The random source is any [`rand::Rng`]; by default the thread-local
/// generator is used.
pub struct RandomizedQueue<T, R = ThreadRng> {
    // Live items in `[0, items.len())`.
    items: Vec<T>,
    // The logical capacity of the backing array. The `Vec` may have
    // reserved more.
    capacity: usize,
    min_capacity: usize,
    // Sampling and iteration draw from the generator through `&self`.
    rng: RefCell<R>,
}

impl<T, R> fmt::Debug for RandomizedQueue<T, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Default for RandomizedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RandomizedQueue<T> {
    /// Creates an empty queue with [`DEFAULT_MIN_CAPACITY`] slots that
    /// draws from the thread-local generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let q: RandomizedQueue<u32> = RandomizedQueue::new();
    /// assert!(q.is_empty());
    /// assert_eq!(20, q.capacity());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MIN_CAPACITY)
    }

    /// Creates an empty queue whose backing array starts at, and never
    /// shrinks below, `min_capacity` slots. A minimum of zero is
    /// treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let q: RandomizedQueue<u32> = RandomizedQueue::with_capacity(4);
    /// assert_eq!(4, q.capacity());
    /// ```
    pub fn with_capacity(min_capacity: usize) -> Self {
        Self::with_capacity_and_rng(min_capacity, rand::thread_rng())
    }
}

impl<T, R> RandomizedQueue<T, R>
where
    R: Rng,
{
    /// Creates an empty queue that draws from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::with_rng(StdRng::seed_from_u64(1));
    /// q.enqueue("a");
    /// assert_eq!(Ok("a"), q.dequeue());
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self::with_capacity_and_rng(DEFAULT_MIN_CAPACITY, rng)
    }

    /// Creates an empty queue with the given minimum capacity that
    /// draws from `rng`.
    pub fn with_capacity_and_rng(min_capacity: usize, rng: R) -> Self {
        let min_capacity = cmp::max(1, min_capacity);

        RandomizedQueue {
            items: Vec::with_capacity(min_capacity),
            capacity: min_capacity,
            min_capacity,
            rng: RefCell::new(rng),
        }
    }

    /// The number of items in the queue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of items the queue can hold before its backing array
    /// is grown.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::with_capacity(2);
    /// q.enqueue(1);
    /// q.enqueue(2);
    /// assert_eq!(2, q.capacity());
    ///
    /// q.enqueue(3);
    /// assert_eq!(4, q.capacity());
    /// ```
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add `item` to the queue, doubling the backing array first if it
    /// is full.
    ///
    /// The item is appended and then swapped with a uniformly chosen
    /// slot (possibly its own), so slot order carries no information
    /// about insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::new();
    /// q.enqueue(10);
    /// q.enqueue(20);
    /// assert_eq!(2, q.len());
    /// ```
    pub fn enqueue(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.resize(2 * self.capacity);
        }

        self.items.push(item);

        let last = self.items.len() - 1;
        let ix = self.random_index();
        self.items.swap(ix, last);
    }

    /// Remove and return an item chosen uniformly at random. If the
    /// queue is empty, an [`Error::Empty`] is returned and the queue is
    /// left untouched.
    ///
    /// The last item is moved into the vacated slot. When the length
    /// drops to a quarter of the capacity, the backing array is halved.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::new();
    /// q.enqueue(10);
    ///
    /// assert_eq!(Ok(10), q.dequeue());
    /// assert!(q.dequeue().is_err());
    /// ```
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty {
                container: "randomized queue",
                operation: "remove from",
            });
        }

        let ix = self.random_index();
        let item = self.items.swap_remove(ix);

        if self.capacity > self.min_capacity && self.items.len() == self.capacity / 4 {
            self.resize(cmp::max(self.capacity / 2, self.min_capacity));
        }

        Ok(item)
    }

    /// Return a reference to an item chosen uniformly at random without
    /// removing it. Every call is an independent draw.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::new();
    /// assert!(q.sample().is_err());
    ///
    /// q.enqueue(10);
    /// assert_eq!(Ok(&10), q.sample());
    /// assert_eq!(1, q.len());
    /// ```
    pub fn sample(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::Empty {
                container: "randomized queue",
                operation: "sample",
            });
        }

        Ok(&self.items[self.random_index()])
    }

    /// Create an iterator over every item in the queue in a uniformly
    /// random order. Each call shuffles a fresh permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queues::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::new();
    /// q.extend(0..5);
    ///
    /// let mut v: Vec<i32> = q.iter().cloned().collect();
    /// v.sort();
    /// assert_eq!(vec![0, 1, 2, 3, 4], v);
    /// ```
    pub fn iter(&self) -> ShuffledIter<T> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.shuffle(&mut *self.rng.borrow_mut());
        ShuffledIter::new(&self.items, order)
    }

    // A uniformly chosen index into the live items. The queue must not
    // be empty.
    fn random_index(&self) -> usize {
        debug_assert!(!self.items.is_empty());
        self.rng.borrow_mut().gen_range(0, self.items.len())
    }

    fn resize(&mut self, capacity: usize) {
        debug_assert!(self.items.len() <= capacity);

        log::debug!(
            "resizing randomized queue from {} to {} slots holding {} items",
            self.capacity,
            capacity,
            self.items.len()
        );

        if capacity > self.capacity {
            self.items.reserve_exact(capacity - self.items.len());
        } else {
            self.items.shrink_to(capacity);
        }
        self.capacity = capacity;
    }
}

impl<T, R> IntoIterator for RandomizedQueue<T, R>
where
    R: Rng,
{
    type Item = T;
    type IntoIter = ShuffledIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let RandomizedQueue { mut items, rng, .. } = self;
        items.shuffle(&mut rng.into_inner());
        ShuffledIntoIter::new(items)
    }
}

impl<T> FromIterator<T> for RandomizedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut q = Self::new();
        q.extend(iter);
        q
    }
}

impl<T, R> Extend<T> for RandomizedQueue<T, R>
where
    R: Rng,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.enqueue(i);
        }
    }
}
