//! Work collectors: where bags report work they discover while processing.

use crate::bag::{Bag, DynBag};
use crate::fold::Fold;

/// A receiver for newly produced bags.
///
/// `Bag::process` gets a `&mut dyn WorkCollector<R>` and may give it any
/// number of bags. Giving never fails.
pub trait WorkCollector<R: Fold> {
    /// Accept one bag of any kind.
    fn give_dyn(&mut self, bag: DynBag<R>);
}

impl<R: Fold> dyn WorkCollector<R> + '_ {
    /// Accept one concrete bag.
    pub fn give_bag<B: Bag<R>>(&mut self, bag: B) {
        self.give_dyn(DynBag::new(bag));
    }
}

/// Plain buffer, in arrival order. No merging.
impl<R: Fold> WorkCollector<R> for Vec<DynBag<R>> {
    fn give_dyn(&mut self, bag: DynBag<R>) {
        self.push(bag);
    }
}
