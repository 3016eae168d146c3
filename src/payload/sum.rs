//! Integer sum.

use crate::fold::Fold;

/// Performs addition on integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum {
    pub sum: i64,
}

impl Sum {
    pub fn new(sum: i64) -> Self {
        Self { sum }
    }
}

impl Fold for Sum {
    fn fold(&mut self, other: Self) {
        self.sum += other.sum;
    }
}
