//! Monoid trait used to combine partial evaluation results
//!
//! Corpus statistics form a monoid: they have an empty value and an
//! associative combine. Any partition of a corpus can therefore be reduced
//! separately and the partial results combined afterwards without changing
//! the totals.

/// An associative binary operation with an identity element
///
/// Implementations must satisfy, for all `a`, `b` and `c`:
/// - `a.combine(&Self::identity()) == a`
/// - `a.combine(&b.combine(&c)) == a.combine(&b).combine(&c)`
pub trait Monoid: Clone + Send + Sync {
    /// Returns the identity element of the monoid
    fn identity() -> Self;

    /// Combines two elements of the monoid
    fn combine(&self, other: &Self) -> Self;
}

/// Extension trait for monoids that can be reduced from collections
pub trait MonoidReduce: Monoid {
    /// Reduces a collection of monoid elements to a single result
    ///
    /// Neighbouring elements are combined pairwise level by level, keeping
    /// the reduction depth logarithmic while never reordering elements.
    fn reduce<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut items: Vec<Self> = iter.into_iter().collect();

        while items.len() > 1 {
            let mut next_level = Vec::with_capacity(items.len().div_ceil(2));
            let mut pending = items.into_iter();

            while let Some(left) = pending.next() {
                match pending.next() {
                    Some(right) => next_level.push(left.combine(&right)),
                    None => next_level.push(left),
                }
            }

            items = next_level;
        }

        items.pop().unwrap_or_else(Self::identity)
    }
}

impl<T: Monoid> MonoidReduce for T {}
