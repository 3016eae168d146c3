//! Result accumulators.

/// A partial result that can absorb another instance of itself.
///
/// Bags fold their local contribution into an accumulator of this type, and
/// the accumulators of every worker are folded together at the end of a
/// computation. Splits and merges happen in no particular order, so `fold`
/// must be associative and commutative at the domain level. The engine does
/// not check this.
pub trait Fold: Send + 'static {
    /// Absorb `other`'s contribution into `self`.
    fn fold(&mut self, other: Self)
    where
        Self: Sized;

    /// Diagnostic tag. Never inspected by the engine.
    fn id(&self) -> &str {
        ""
    }
}
