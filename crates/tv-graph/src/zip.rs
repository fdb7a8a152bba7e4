//! Pairwise folds over two source lists.
//!
//! Every source in both lists is evaluated at the requested tick, so
//! stateful sources stay in step even when they fall outside the overlap.
//! Lists of different lengths are silently truncated to the shorter one.

use std::marker::PhantomData;

use tv_core::Tick;

use crate::{Source, TimedVal};

/// How a [`ZipCombiner`] reduces `(a_i, b_i)` pairs.
pub trait ZipFold {
    fn fold(pairs: impl Iterator<Item = (f64, f64)>) -> f64;
}

/// `Σ a_i · b_i`.
pub struct Dot;

impl ZipFold for Dot {
    #[inline]
    fn fold(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
        pairs.map(|(a, b)| a * b).sum()
    }
}

/// `Σ w_i · x_i / Σ w_i` with the weights in the first list.
///
/// Both sums run over the overlapping prefix only: a weight with no matching
/// input adds nothing to the denominator, rather than zeroing it.
///
/// A zero weight sum yields `NaN` or `±∞`; that propagates like any other
/// value.
pub struct Weighted;

impl ZipFold for Weighted {
    #[inline]
    fn fold(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
        let (weighted, total) = pairs.fold((0.0, 0.0), |(acc, tot), (w, x)| (acc + w * x, tot + w));
        weighted / total
    }
}

pub struct ZipCombiner<Z> {
    a:     Vec<Source>,
    b:     Vec<Source>,
    _fold: PhantomData<Z>,
}

pub type DotProduct = ZipCombiner<Dot>;
pub type WeightedAverage = ZipCombiner<Weighted>;

impl<Z: ZipFold> ZipCombiner<Z> {
    pub fn new(a: Vec<Source>, b: Vec<Source>) -> Self {
        Self { a, b, _fold: PhantomData }
    }

    /// Number of pairs that contribute to the fold.
    pub fn overlap(&self) -> usize {
        self.a.len().min(self.b.len())
    }
}

impl<Z: ZipFold> TimedVal for ZipCombiner<Z> {
    fn value_at(&self, now: Tick) -> f64 {
        let n = self.overlap();
        let value = Z::fold(
            self.a[..n]
                .iter()
                .zip(&self.b[..n])
                .map(|(a, b)| (a.value_at(now), b.value_at(now))),
        );
        for tail in self.a[n..].iter().chain(&self.b[n..]) {
            tail.value_at(now);
        }
        value
    }
}
