//! The bag queue: one worker's heterogeneous container of pending work.
//!
//! The queue holds at most one bag per kind, in insertion order. A bag given
//! to the queue whose kind is already resident is merged into the resident
//! bag instead of being appended. Processing follows a sticky-favorite
//! policy: the entry under the cursor is serviced until it runs dry, then the
//! cursor moves on (wrapping) to the next entry that still has work.
//!
//! The queue is single-threaded. Bags may give new work back to the queue
//! from inside `process`; those bags are staged and inserted as soon as the
//! current `process` call returns, so they are visible to the very next
//! `is_empty`/`process` call.

use std::fmt;

use tracing::{debug, trace};

use crate::bag::{Bag, BagKind, DynBag};
use crate::collector::WorkCollector;
use crate::fold::Fold;

/// Capacity of a fresh queue. Doubles whenever it fills up.
pub const INITIAL_CAPACITY: usize = 16;

pub struct BagQueue<R: Fold> {
    /// Resident bags, one per kind, in insertion order.
    bags: Vec<DynBag<R>>,

    /// Index of the last bag known (or suspected) to have work.
    last_with_work: usize,

    /// Bags given by the bag currently being processed.
    inbox: Vec<DynBag<R>>,
}

impl<R: Fold> BagQueue<R> {
    pub fn new() -> Self {
        Self {
            bags: Vec::with_capacity(INITIAL_CAPACITY),
            last_with_work: 0,
            inbox: Vec::new(),
        }
    }

    /// Give a concrete bag to the queue.
    pub fn give_bag<B: Bag<R>>(&mut self, bag: B) {
        self.add_bag(DynBag::new(bag));
    }

    /// Number of resident entries (distinct kinds).
    pub fn len(&self) -> usize {
        self.bags.len()
    }

    /// Current capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.bags.capacity()
    }

    /// Cursor position: index of the favored entry.
    pub fn cursor(&self) -> usize {
        self.last_with_work
    }

    /// Kinds of the resident entries, in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = BagKind> + '_ {
        self.bags.iter().map(DynBag::kind)
    }

    /// The resident bag of kind `B`, if any.
    pub fn get<B: Bag<R>>(&self) -> Option<&B> {
        self.bags.iter().find_map(DynBag::downcast_ref::<B>)
    }

    /// True if no resident bag has work left.
    ///
    /// Takes `&mut self` because the scan shares the cursor with `process`:
    /// the cursor is left on the first entry found with work.
    pub fn is_empty(&mut self) -> bool {
        !self.seek_work()
    }

    /// Process `work_amount` units in a single entry.
    ///
    /// The entry under the cursor is serviced if it has work; otherwise the
    /// cursor advances to the next entry with work. Only one entry is
    /// serviced per call. Bags given during processing are inserted before
    /// this returns.
    pub fn process(&mut self, work_amount: usize) {
        if self.bags.is_empty() {
            return;
        }
        self.seek_work();

        let index = self.last_with_work;
        trace!(index, work_amount, kind = %self.bags[index].kind(), "processing bag");

        let Self { bags, inbox, .. } = self;
        bags[index].process(work_amount, inbox);

        self.absorb_inbox();
    }

    /// Split work off the first entry, in insertion order, that can give some.
    ///
    /// `None` iff every resident bag declined to split.
    pub fn split(&mut self) -> Option<DynBag<R>> {
        let split = self.bags.iter_mut().find_map(DynBag::split);
        match &split {
            Some(bag) => debug!(kind = %bag.kind(), "split off work"),
            None => trace!(entries = self.bags.len(), "nothing to split"),
        }
        split
    }

    /// Fold every resident bag's contribution into a fresh accumulator.
    pub fn result(&self, initializer: impl FnOnce() -> R) -> R {
        let mut result = initializer();
        for bag in &self.bags {
            bag.submit(&mut result);
        }
        result
    }

    /// Drop every resident bag and reset the cursor.
    pub fn clear(&mut self) {
        debug!(entries = self.bags.len(), "clearing bag queue");
        self.bags.clear();
        self.inbox.clear();
        self.last_with_work = 0;
    }

    /// Move the cursor to an entry with work, wrapping around at most once.
    /// Returns false (cursor back where it started) if there is none.
    fn seek_work(&mut self) -> bool {
        let n = self.bags.len();
        if n == 0 {
            return false;
        }
        let start = self.last_with_work;
        if !self.bags[start].is_empty() {
            return true;
        }
        loop {
            self.last_with_work = (self.last_with_work + 1) % n;
            if !self.bags[self.last_with_work].is_empty() {
                trace!(from = start, to = self.last_with_work, "cursor advanced");
                return true;
            }
            if self.last_with_work == start {
                return false;
            }
        }
    }

    /// Merge `bag` into the resident bag of the same kind, or append it.
    fn add_bag(&mut self, mut bag: DynBag<R>) {
        let kind = bag.kind();
        for resident in self.bags.iter_mut().filter(|resident| resident.kind() == kind) {
            match resident.merge(bag) {
                Ok(()) => {
                    trace!(%kind, "bag merged into resident entry");
                    return;
                }
                Err(refused) => bag = refused,
            }
        }

        if self.bags.len() == self.bags.capacity() {
            self.grow();
        }
        debug!(%kind, index = self.bags.len(), "new bag kind appended");
        self.bags.push(bag);
    }

    /// Double the backing storage. Bags are boxed, so only pointers move.
    fn grow(&mut self) {
        let additional = self.bags.capacity().max(INITIAL_CAPACITY);
        self.bags.reserve_exact(additional);
        debug!(capacity = self.bags.capacity(), "bag queue grown");
    }

    fn absorb_inbox(&mut self) {
        if self.inbox.is_empty() {
            return;
        }
        let mut pending = std::mem::take(&mut self.inbox);
        for bag in pending.drain(..) {
            self.add_bag(bag);
        }
        self.inbox = pending;
    }
}

impl<R: Fold> WorkCollector<R> for BagQueue<R> {
    fn give_dyn(&mut self, bag: DynBag<R>) {
        self.add_bag(bag);
    }
}

impl<R: Fold> Default for BagQueue<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Fold> fmt::Debug for BagQueue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BagQueue")
            .field("bags", &self.bags)
            .field("last_with_work", &self.last_with_work)
            .finish()
    }
}
