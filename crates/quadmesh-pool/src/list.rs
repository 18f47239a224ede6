use crate::pool::{Pool, PoolHandle};

/// A link cell: a value plus the handle of the next link in the
/// list, or `None` at the tail.
#[derive(Debug)]
pub struct Link<T> {
    data: T,
    next: Option<PoolHandle>,
}

/// A singly-linked list whose links live in a caller-supplied
/// [`Pool<Link<T>>`].
///
/// Every operation takes the backing pool explicitly rather than the
/// list owning (or borrowing) one itself, which sidesteps a lifetime
/// parameter on `PoolList` for the one case this crate needs: a work
/// list shared by a single call that already owns the pool outright.
/// `pop_front` on an empty list is a precondition violation (panics),
/// matching `Pool::free`'s own "undefined on misuse" contract.
#[derive(Debug, Default)]
pub struct PoolList<T> {
    first: Option<PoolHandle>,
    last: Option<PoolHandle>,
    count: usize,
    _marker: core::marker::PhantomData<T>,
}

impl<T> PoolList<T> {
    pub fn new() -> Self {
        Self {
            first: None,
            last: None,
            count: 0,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn first(&self) -> Option<PoolHandle> {
        self.first
    }

    pub fn last(&self) -> Option<PoolHandle> {
        self.last
    }

    /// Inserts `data` at the front of the list.
    pub fn prepend(&mut self, pool: &mut Pool<Link<T>>, data: T) -> PoolHandle {
        let handle = pool.alloc(Link {
            data,
            next: self.first,
        });
        self.first = Some(handle);
        if self.last.is_none() {
            self.last = Some(handle);
        }
        self.count += 1;
        handle
    }

    /// Inserts `data` at the back of the list.
    pub fn append(&mut self, pool: &mut Pool<Link<T>>, data: T) -> PoolHandle {
        let handle = pool.alloc(Link { data, next: None });

        if let Some(last) = self.last {
            pool.get_mut(last).next = Some(handle);
        } else {
            self.first = Some(handle);
        }
        self.last = Some(handle);
        self.count += 1;
        handle
    }

    /// Inserts `data` immediately after `after`.
    ///
    /// # Panics
    ///
    /// Panics if `after` is not a handle currently in this list's
    /// pool.
    pub fn insert_after(
        &mut self,
        pool: &mut Pool<Link<T>>,
        after: PoolHandle,
        data: T,
    ) -> PoolHandle {
        let next = pool.get(after).next;
        let handle = pool.alloc(Link { data, next });
        pool.get_mut(after).next = Some(handle);

        if self.last == Some(after) {
            self.last = Some(handle);
        }
        self.count += 1;
        handle
    }

    /// Removes and returns the front element.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_front(&mut self, pool: &mut Pool<Link<T>>) -> T {
        let handle = self.first.expect("pop_front on an empty PoolList");
        let Link { data, next } = pool.free(handle);

        self.first = next;
        if self.first.is_none() {
            self.last = None;
        }
        self.count -= 1;
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_pop_front_preserves_order() {
        let mut pool = Pool::new();
        let mut list = PoolList::new();

        list.append(&mut pool, 1);
        list.append(&mut pool, 2);
        list.append(&mut pool, 3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_front(&mut pool), 1);
        assert_eq!(list.pop_front(&mut pool), 2);
        assert_eq!(list.pop_front(&mut pool), 3);
        assert!(list.is_empty());
    }

    #[test]
    fn prepend_reverses_pop_order() {
        let mut pool = Pool::new();
        let mut list = PoolList::new();

        list.prepend(&mut pool, 1);
        list.prepend(&mut pool, 2);
        list.prepend(&mut pool, 3);

        assert_eq!(list.pop_front(&mut pool), 3);
        assert_eq!(list.pop_front(&mut pool), 2);
        assert_eq!(list.pop_front(&mut pool), 1);
    }

    #[test]
    fn insert_after_splices_in_the_middle() {
        let mut pool = Pool::new();
        let mut list = PoolList::new();

        let first = list.append(&mut pool, 1);
        list.append(&mut pool, 3);
        list.insert_after(&mut pool, first, 2);

        assert_eq!(list.pop_front(&mut pool), 1);
        assert_eq!(list.pop_front(&mut pool), 2);
        assert_eq!(list.pop_front(&mut pool), 3);
    }

    #[test]
    fn insert_after_last_updates_tail() {
        let mut pool = Pool::new();
        let mut list = PoolList::new();

        let only = list.append(&mut pool, 1);
        list.insert_after(&mut pool, only, 2);
        list.append(&mut pool, 3);

        assert_eq!(list.pop_front(&mut pool), 1);
        assert_eq!(list.pop_front(&mut pool), 2);
        assert_eq!(list.pop_front(&mut pool), 3);
    }

    #[test]
    fn pool_is_balanced_after_full_drain() {
        let mut pool = Pool::new();
        let mut list = PoolList::new();
        let start = pool.len();

        for i in 0..10 {
            list.append(&mut pool, i);
        }
        while !list.is_empty() {
            list.pop_front(&mut pool);
        }

        assert_eq!(pool.len(), start);
    }

    #[test]
    #[should_panic]
    fn pop_front_on_empty_panics() {
        let mut pool: Pool<Link<i32>> = Pool::new();
        let mut list: PoolList<i32> = PoolList::new();
        list.pop_front(&mut pool);
    }
}
