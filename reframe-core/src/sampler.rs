//! Category sampling with an injectable random source.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick `k` distinct items uniformly at random.
///
/// Returns fewer than `k` items only when `items` is shorter than `k`.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
    items.choose_multiple(rng, k).cloned().collect()
}

/// Chooses the categories an initial fact is generated from.
pub trait CategorySampler {
    fn pick(&mut self, categories: &[String]) -> Vec<String>;
}

/// Picks two or three categories with equal probability.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CategorySampler for RandomSampler<R> {
    fn pick(&mut self, categories: &[String]) -> Vec<String> {
        let k = if self.rng.gen_bool(0.5) { 2 } else { 3 };
        sample(categories, k, &mut self.rng)
    }
}

/// Always returns the same categories, for deterministic callers.
#[derive(Debug, Clone)]
pub struct FixedSampler(pub Vec<String>);

impl FixedSampler {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(categories.into_iter().map(Into::into).collect())
    }
}

impl CategorySampler for FixedSampler {
    fn pick(&mut self, _categories: &[String]) -> Vec<String> {
        self.0.clone()
    }
}
