//! Randomness provider contract injected into matrix generation and rendering.

/// Source of uniformly distributed random numbers.
///
/// Implementations decide how they are seeded; callers never reach for a
/// process-wide generator, which keeps generation reproducible under test.
pub trait RandomSource {
    /// Draws an integer uniformly from `min..=max`.
    ///
    /// Implementations swap the bounds when `min > max`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;

    /// Draws an index uniformly from `0..len`, or `None` when `len` is zero.
    fn uniform_index(&mut self, len: usize) -> Option<usize>;
}

/// Convenience helpers layered on top of [`RandomSource`].
pub trait RandomSourceExt: RandomSource {
    /// Picks an element uniformly, or `None` when `items` is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let index = self.uniform_index(items.len())?;
        items.get(index)
    }
}

impl<R> RandomSourceExt for R where R: RandomSource + ?Sized {}
