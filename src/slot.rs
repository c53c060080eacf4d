/// The neighbors of a node in the ring. Both the sentinel and every
/// used slot carry one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    // The index of the slot before this slot.
    pub(crate) prev: usize,
    // The index of the slot after this slot.
    pub(crate) next: usize,
}

pub(crate) struct Free(FreeInner);
pub(crate) struct FreeInner {
    // The next free slot.
    next: usize,
}

impl Free {
    fn new(next: usize) -> Free {
        Free(FreeInner { next })
    }

    pub(crate) fn next(&self) -> usize {
        self.0.next
    }
}

pub(crate) struct Used<T>(UsedInner<T>);
struct UsedInner<T> {
    links: Links,
    // The contained data.
    data: T,
}

impl<T> Used<T> {
    fn new(links: Links, data: T) -> Used<T> {
        Used(UsedInner { links, data })
    }

    pub(crate) fn links(&self) -> Links {
        self.0.links
    }

    pub(crate) fn take(self) -> (Links, T) {
        let Used(UsedInner { links, data }) = self;
        (links, data)
    }

    pub(crate) fn data(&self) -> &T {
        &self.0.data
    }
}

pub(crate) enum Slot<T> {
    // The anchor of the ring. Never holds data and is never freed.
    Sentinel(Links),
    Free(Free),
    Used(Used<T>),
}

impl<T> Slot<T> {
    pub(crate) fn new_sentinel(ix: usize) -> Slot<T> {
        Slot::Sentinel(Links { prev: ix, next: ix })
    }

    pub(crate) fn new_free(next: usize) -> Slot<T> {
        Slot::Free(Free::new(next))
    }

    pub(crate) fn new_used(prev: usize, next: usize, data: T) -> Slot<T> {
        Slot::Used(Used::new(Links { prev, next }, data))
    }

    /// The ring links of a sentinel or used slot. Free slots are not
    /// part of the ring and have none.
    pub(crate) fn links(&self) -> Option<Links> {
        match self {
            Slot::Sentinel(links) => Some(*links),
            Slot::Used(used) => Some(used.links()),
            Slot::Free(_) => None,
        }
    }

    pub(crate) fn links_mut(&mut self) -> Option<&mut Links> {
        match self {
            Slot::Sentinel(links) => Some(links),
            Slot::Used(used) => Some(&mut (used.0).links),
            Slot::Free(_) => None,
        }
    }

    pub(crate) fn get_used(&self) -> Option<&Used<T>> {
        if let Slot::Used(used) = self {
            Some(used)
        } else {
            None
        }
    }

    pub(crate) fn get_free(&self) -> Option<&Free> {
        if let Slot::Free(free) = self {
            Some(free)
        } else {
            None
        }
    }

    pub(crate) fn into_used(self) -> Option<Used<T>> {
        if let Slot::Used(used) = self {
            Some(used)
        } else {
            None
        }
    }
}
