//! The `TimedVal` capability and shared source handles.

use std::rc::Rc;

use tv_core::Tick;

/// A quantity that can report its value as of a given tick.
///
/// Callers must pass non-decreasing ticks to any node that holds state
/// (accumulators, cached nodes).  Pure nodes accept any tick.
pub trait TimedVal {
    fn value_at(&self, now: Tick) -> f64;
}

/// Shared handle to an upstream node.
///
/// Downstream nodes only read through it; many of them may hold the same
/// source.
pub type Source = Rc<dyn TimedVal>;

/// Erase a concrete node handle into a [`Source`], keeping the caller's
/// handle usable for `set_value`/`toggle`/`change_*`.
#[inline]
pub fn as_source<T: TimedVal + 'static>(node: &Rc<T>) -> Source {
    node.clone()
}

/// Build a `Vec<Source>` from a mixed list of node handles.
///
/// ```rust,ignore
/// let k = knob(5.0);
/// let total = add(sources![num(3.0), num(4.0), k.clone()]);
/// ```
#[macro_export]
macro_rules! sources {
    ($($node:expr),* $(,)?) => {
        ::std::vec![$({
            let source: $crate::Source = $node;
            source
        }),*]
    };
}
