//! Variadic folds over a list of sources.
//!
//! Each combinator reads every source at the requested tick and folds the
//! results.  Combinators hold no per-tick state of their own; wrap one in a
//! `CachedVal` if it is expensive and widely shared.

use std::marker::PhantomData;

use tv_core::Tick;

use crate::{GraphError, GraphResult, Source, TimedVal};

// ── Fold ──────────────────────────────────────────────────────────────────────

/// How a [`Combiner`] reduces its source values.
pub trait Fold {
    /// Node name used in error messages.
    const NAME: &'static str;

    /// Fewest sources for which the fold is defined.
    const MIN_SOURCES: usize = 0;

    fn fold(values: impl Iterator<Item = f64>) -> f64;
}

/// Sum; `0` for no sources.
pub struct Sum;

impl Fold for Sum {
    const NAME: &'static str = "Adder";

    #[inline]
    fn fold(values: impl Iterator<Item = f64>) -> f64 {
        values.sum()
    }
}

/// Product; `1` for no sources.  Most useful for factors in `[0, 1]`.
pub struct Product;

impl Fold for Product {
    const NAME: &'static str = "Multiplier";

    #[inline]
    fn fold(values: impl Iterator<Item = f64>) -> f64 {
        values.product()
    }
}

/// Arithmetic mean.
pub struct Mean;

impl Fold for Mean {
    const NAME: &'static str = "Averager";
    const MIN_SOURCES: usize = 1;

    #[inline]
    fn fold(values: impl Iterator<Item = f64>) -> f64 {
        let (sum, count) = values.fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
        sum / count as f64
    }
}

// ── Combiner ──────────────────────────────────────────────────────────────────

/// A fold `F` over an ordered list of sources.
pub struct Combiner<F> {
    sources: Vec<Source>,
    _fold:   PhantomData<F>,
}

pub type Adder = Combiner<Sum>;
/// Alias kept for callers that think of it as a running sum.
pub type Summer = Adder;
pub type Multiplier = Combiner<Product>;
pub type Averager = Combiner<Mean>;

impl<F: Fold> Combiner<F> {
    /// Build the combinator, rejecting source lists shorter than
    /// `F::MIN_SOURCES`.
    pub fn try_new(sources: Vec<Source>) -> GraphResult<Self> {
        if sources.len() < F::MIN_SOURCES {
            return Err(GraphError::TooFewSources {
                node: F::NAME,
                min:  F::MIN_SOURCES,
                got:  sources.len(),
            });
        }
        Ok(Self::from_sources(sources))
    }

    fn from_sources(sources: Vec<Source>) -> Self {
        Self {
            sources,
            _fold: PhantomData,
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

impl Combiner<Sum> {
    pub fn new(sources: Vec<Source>) -> Self {
        Self::from_sources(sources)
    }
}

impl Combiner<Product> {
    pub fn new(sources: Vec<Source>) -> Self {
        Self::from_sources(sources)
    }
}

impl Combiner<Mean> {
    /// Fails on an empty source list: the mean of nothing is undefined.
    pub fn new(sources: Vec<Source>) -> GraphResult<Self> {
        Self::try_new(sources)
    }
}

impl<F: Fold> TimedVal for Combiner<F> {
    fn value_at(&self, now: Tick) -> f64 {
        F::fold(self.sources.iter().map(|s| s.value_at(now)))
    }
}
