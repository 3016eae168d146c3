//! Bags: splittable, mergeable units of pending work.
//!
//! A bag holds not-yet-executed work of one concrete kind. The queue keeps at
//! most one bag per kind and merges newcomers into the resident instance, so
//! the kind of a bag (its concrete Rust type) is the dedup key.

use std::any::{Any, TypeId};
use std::fmt;

use crate::collector::WorkCollector;
use crate::fold::Fold;

// ---------------------------------------------------------------------------
// Bag
// ---------------------------------------------------------------------------

/// A unit of splittable, mergeable, processable work producing a partial `R`.
///
/// Implementations are driven by a single worker at a time. `process` may hand
/// newly discovered work (of this kind or any other) to the collector it is
/// given; the collector is always the queue that owns the bag.
pub trait Bag<R: Fold>: Send + 'static {
    /// True iff no further `process` call can do useful work.
    fn is_empty(&self) -> bool;

    /// Consume up to `work_amount` units of work. Must not block.
    fn process(&mut self, work_amount: usize, collector: &mut dyn WorkCollector<R>);

    /// Carve off roughly half of the splittable work into a new bag of the
    /// same kind. `None` when nothing qualifies. Both halves must remain
    /// valid bags.
    fn split(&mut self) -> Option<Self>
    where
        Self: Sized;

    /// Absorb all of `other`'s remaining work (and any result it carries).
    fn merge(&mut self, other: Self)
    where
        Self: Sized;

    /// Fold this bag's locally produced result into `result`.
    fn submit(&self, result: &mut R);
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Identity of a bag's concrete type. Equality is exact type identity.
#[derive(Debug, Clone, Copy)]
pub struct BagKind {
    id: TypeId,
    name: &'static str,
}

impl BagKind {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for BagKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BagKind {}

impl fmt::Display for BagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short display: last path segment
        let short = self.name.rsplit("::").next().unwrap_or(self.name);
        write!(f, "{short}")
    }
}

// ---------------------------------------------------------------------------
// Type-erased bag
// ---------------------------------------------------------------------------

/// Object-safe view over any `Bag<R>`.
trait ErasedBag<R: Fold>: Send {
    fn kind(&self) -> BagKind;
    fn is_empty(&self) -> bool;
    fn process(&mut self, work_amount: usize, collector: &mut dyn WorkCollector<R>);
    fn split(&mut self) -> Option<DynBag<R>>;
    fn merge(&mut self, other: DynBag<R>) -> Result<(), DynBag<R>>;
    fn submit(&self, result: &mut R);
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<R: Fold, B: Bag<R>> ErasedBag<R> for B {
    fn kind(&self) -> BagKind {
        BagKind::of::<B>()
    }

    fn is_empty(&self) -> bool {
        <B as Bag<R>>::is_empty(self)
    }

    fn process(&mut self, work_amount: usize, collector: &mut dyn WorkCollector<R>) {
        <B as Bag<R>>::process(self, work_amount, collector);
    }

    fn split(&mut self) -> Option<DynBag<R>> {
        <B as Bag<R>>::split(self).map(DynBag::new)
    }

    fn merge(&mut self, other: DynBag<R>) -> Result<(), DynBag<R>> {
        let other = other.downcast::<B>()?;
        <B as Bag<R>>::merge(self, other);
        Ok(())
    }

    fn submit(&self, result: &mut R) {
        <B as Bag<R>>::submit(self, result);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// An owned bag of any kind producing `R`.
///
/// This is what the queue stores, what `split` hands back, and what crosses
/// from one worker's queue to another's.
pub struct DynBag<R: Fold> {
    inner: Box<dyn ErasedBag<R>>,
}

impl<R: Fold> DynBag<R> {
    pub fn new<B: Bag<R>>(bag: B) -> Self {
        Self {
            inner: Box::new(bag),
        }
    }

    pub fn kind(&self) -> BagKind {
        self.inner.kind()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn process(&mut self, work_amount: usize, collector: &mut dyn WorkCollector<R>) {
        self.inner.process(work_amount, collector);
    }

    pub fn split(&mut self) -> Option<DynBag<R>> {
        self.inner.split()
    }

    /// Merge `other` into this bag. Hands `other` back untouched if it is of
    /// a different kind.
    pub fn merge(&mut self, other: DynBag<R>) -> Result<(), DynBag<R>> {
        self.inner.merge(other)
    }

    pub fn submit(&self, result: &mut R) {
        self.inner.submit(result);
    }

    pub fn is<B: Bag<R>>(&self) -> bool {
        self.inner.as_any().is::<B>()
    }

    pub fn downcast_ref<B: Bag<R>>(&self) -> Option<&B> {
        self.inner.as_any().downcast_ref::<B>()
    }

    /// Recover the concrete bag, or get `self` back if it is another kind.
    pub fn downcast<B: Bag<R>>(self) -> Result<B, Self> {
        if !self.is::<B>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<B>() {
            Ok(bag) => Ok(*bag),
            Err(_) => unreachable!("bag kind checked before downcast"),
        }
    }
}

impl<R: Fold> fmt::Debug for DynBag<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynBag")
            .field("kind", &self.kind().name())
            .field("empty", &self.is_empty())
            .finish()
    }
}
