//! Unit tests for tv-graph.

use std::cell::Cell;
use std::rc::Rc;

use tv_core::Tick;

use crate::TimedVal;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Counts how often it is evaluated; value is the tick itself.
#[derive(Default)]
struct CountingSource {
    calls: Cell<u32>,
}

impl TimedVal for CountingSource {
    fn value_at(&self, now: Tick) -> f64 {
        self.calls.set(self.calls.get() + 1);
        now.as_f64()
    }
}

fn t(n: i64) -> Tick {
    Tick(n)
}

// ── Sources ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sources {
    use super::*;
    use crate::build::{button, half, knob, num, one, zero};

    #[test]
    fn constant_ignores_time() {
        let c = num(10.0);
        for tick in [0, 1, 2, 3, -120, 2_000_000] {
            assert_eq!(c.value_at(t(tick)), 10.0);
        }
    }

    #[test]
    fn shared_constants() {
        assert_eq!(zero().value_at(t(9)), 0.0);
        assert_eq!(half().value_at(t(9)), 0.5);
        assert_eq!(one().value_at(t(9)), 1.0);
    }

    #[test]
    fn knob_reflects_latest_write() {
        let k = knob(10.0);
        assert_eq!(k.value_at(t(0)), 10.0);
        k.set_value(5.0);
        assert_eq!(k.value_at(t(100)), 5.0);
        // Not tick-cached: an earlier tick sees the new value too.
        assert_eq!(k.value_at(t(0)), 5.0);
        assert_eq!(k.get(), 5.0);
    }

    #[test]
    fn button_toggle_and_set() {
        let b = button(false);
        assert_eq!(b.value_at(t(0)), 0.0);
        b.toggle();
        assert_eq!(b.value_at(t(0)), 1.0);
        assert!(b.is_on());
        b.set(false);
        assert_eq!(b.value_at(t(1)), 0.0);
        b.set(false);
        assert!(!b.is_on());
    }
}

// ── Cached base ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use super::*;
    use crate::build::{add, cached};
    use crate::{Source, TickCache, sources};

    #[test]
    fn computes_at_most_once_per_tick() {
        let counter = Rc::new(CountingSource::default());
        let c = cached(counter.clone(), t(0));

        let first = c.value_at(t(3));
        let second = c.value_at(t(3));
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(counter.calls.get(), 1);

        c.value_at(t(4));
        assert_eq!(counter.calls.get(), 2);
    }

    #[test]
    fn fan_out_evaluates_shared_source_once() {
        let counter = Rc::new(CountingSource::default());
        let shared: Source = cached(counter.clone(), t(0));
        let consumers: Vec<_> = (0..10).map(|_| add(sources![shared.clone()])).collect();

        for c in &consumers {
            assert_eq!(c.value_at(t(7)), 7.0);
        }
        assert_eq!(counter.calls.get(), 1);
    }

    #[test]
    fn nothing_computed_at_construction() {
        let counter = Rc::new(CountingSource::default());
        let c = cached(counter.clone(), t(0));
        assert_eq!(counter.calls.get(), 0);
        assert_eq!(c.value_at(t(0)), 0.0);
        assert_eq!(counter.calls.get(), 1);
    }

    #[test]
    fn stale_tick_returns_last_value() {
        let counter = Rc::new(CountingSource::default());
        let c = cached(counter.clone(), t(0));
        assert_eq!(c.value_at(t(5)), 5.0);
        assert_eq!(c.value_at(t(2)), 5.0);
        assert_eq!(counter.calls.get(), 1);
    }

    #[test]
    fn empty_cache_reports_creation_tick() {
        let cache = TickCache::new(t(4));
        assert_eq!(cache.last_tick(), t(4));
        assert_eq!(cache.last_value(), None);
    }
}

// ── Combinators ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod combinators {
    use approx::assert_relative_eq;

    use super::*;
    use crate::build::{accum, add, avg, knob, mul, num};
    use crate::{Averager, GraphError, Summer, sources};

    #[test]
    fn adder_sums_and_tracks_knobs() {
        let a = knob(5.0);
        let s = add(sources![num(3.0), num(4.0), a.clone()]);
        assert_eq!(s.value_at(t(0)), 12.0);
        assert_eq!(s.value_at(t(1)), 12.0);
        a.set_value(7.0);
        assert_eq!(s.value_at(t(0)), 14.0);
        assert_eq!(s.value_at(t(1)), 14.0);
    }

    #[test]
    fn adder_over_accumulators() {
        let a = accum(0.0, t(0), 1.0, 0.0);
        let b = accum(0.0, t(0), 2.0, 0.0);
        let s = add(sources![a, b]);
        for (tick, expected) in [(0, 0.0), (1, 3.0), (2, 6.0), (3, 9.0)] {
            assert_eq!(s.value_at(t(tick)), expected);
        }
    }

    #[test]
    fn summer_alias_is_adder() {
        let s = Summer::new(sources![num(1.0), num(2.0)]);
        assert_eq!(s.value_at(t(0)), 3.0);
        assert_eq!(add(vec![]).value_at(t(0)), 0.0);
    }

    #[test]
    fn multiplier_product_and_identity() {
        let a = knob(5.0);
        let m = mul(sources![num(3.0), num(4.0), a.clone()]);
        assert_eq!(m.value_at(t(0)), 60.0);
        a.set_value(7.0);
        assert_eq!(m.value_at(t(1)), 84.0);
        assert_eq!(mul(vec![]).value_at(t(0)), 1.0);
    }

    #[test]
    fn multiplier_over_accumulators() {
        let a = accum(0.0, t(0), 1.0, 0.0);
        let b = accum(0.0, t(0), 2.0, 0.0);
        let m = mul(sources![a, b]);
        for (tick, expected) in [(0, 0.0), (1, 2.0), (2, 8.0), (3, 18.0)] {
            assert_eq!(m.value_at(t(tick)), expected);
        }
    }

    #[test]
    fn averager_mean() {
        let a = avg(sources![num(6.0), num(10.0), num(12.0)]).unwrap();
        assert_relative_eq!(a.value_at(t(0)), (6.0 + 10.0 + 12.0) / 3.0, epsilon = 1e-10);
        assert_eq!(a.sources().len(), 3);
    }

    #[test]
    fn averager_rejects_empty_sources() {
        let err = avg(vec![]).err().unwrap();
        assert_eq!(err, GraphError::TooFewSources { node: "Averager", min: 1, got: 0 });
        assert!(Averager::try_new(vec![]).is_err());
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod filters {
    use approx::assert_relative_eq;

    use super::*;
    use crate::build::{clamp, knob, num, sigmoid};

    #[test]
    fn clamper_clips_inclusive() {
        let x = knob(5.0);
        let c = clamp(x.clone(), 0.0, 10.0);
        assert_eq!(c.value_at(t(0)), 5.0);
        x.set_value(-15.0);
        assert_eq!(c.value_at(t(0)), 0.0);
        x.set_value(11.0);
        assert_eq!(c.value_at(t(0)), 10.0);
        x.set_value(10.0);
        assert_eq!(c.value_at(t(0)), 10.0);
    }

    #[test]
    fn clamper_bounds_are_mutable() {
        let c = clamp(num(5.0), 0.0, 10.0);
        c.set_max(3.0);
        assert_eq!(c.value_at(t(0)), 3.0);
        c.set_min(7.0);
        c.set_max(9.0);
        assert_eq!(c.value_at(t(0)), 7.0);
        assert_eq!(c.bounds(), (7.0, 9.0));
    }

    #[test]
    fn sigmoid_adds_shift_to_value() {
        let s = sigmoid(num(0.0), 0.0, 1.0);
        assert_relative_eq!(s.value_at(t(0)), 0.5);

        // scale / (1 + e^(value + shift)), not e^-(value - shift).
        let shifted = sigmoid(num(1.0), 2.0, 4.0);
        assert_relative_eq!(shifted.value_at(t(0)), 4.0 / (1.0 + 3.0_f64.exp()));

        let big = sigmoid(num(50.0), 0.0, 1.0);
        assert!(big.value_at(t(0)) < 1e-20);
    }
}

// ── Zip combinators ───────────────────────────────────────────────────────────

#[cfg(test)]
mod zip {
    use approx::assert_relative_eq;

    use super::*;
    use crate::build::{accum, dot, knob, num, weighted_avg};
    use crate::sources;

    #[test]
    fn static_dot_product() {
        let d = dot(
            sources![num(1.0), num(2.0), num(3.0)],
            sources![num(4.0), num(5.0), num(6.0)],
        );
        for tick in [0, 123, -1245] {
            assert_eq!(d.value_at(t(tick)), 32.0);
        }
    }

    #[test]
    fn dot_product_truncates_to_overlap() {
        let d = dot(sources![num(1.0), num(2.0), num(3.0)], sources![num(4.0), num(5.0)]);
        assert_eq!(d.overlap(), 2);
        assert_eq!(d.value_at(t(0)), 14.0);

        let d = dot(sources![num(2.0)], sources![num(4.0), num(5.0), num(6.0)]);
        assert_eq!(d.value_at(t(0)), 8.0);
    }

    #[test]
    fn dot_product_follows_knobs() {
        let (a, b, c, d) = (knob(1.0), knob(1.0), knob(1.0), knob(1.0));
        let p = dot(sources![a.clone(), b.clone()], sources![c.clone(), d.clone()]);
        assert_eq!(p.value_at(t(0)), 2.0);
        a.set_value(2.0);
        assert_eq!(p.value_at(t(0)), 3.0);
        b.set_value(2.0);
        assert_eq!(p.value_at(t(0)), 4.0);
        c.set_value(11.0);
        assert_eq!(p.value_at(t(0)), 24.0);
    }

    #[test]
    fn dot_product_over_time() {
        let a = accum(0.0, t(0), 1.0, 0.0);
        let b = accum(0.0, t(0), 2.0, 0.0);
        let d = accum(0.0, t(0), 1.0, 0.0);
        let p = dot(sources![a, b], sources![num(0.5), d]);
        for (tick, expected) in [(0, 0.0), (1, 2.5), (2, 9.0), (3, 19.5)] {
            assert_eq!(p.value_at(t(tick)), expected);
        }
    }

    #[test]
    fn truncated_tail_still_evaluated() {
        let tail = Rc::new(CountingSource::default());
        let p = dot(sources![num(1.0)], sources![num(2.0), tail.clone()]);
        p.value_at(t(3));
        assert_eq!(tail.calls.get(), 1);
    }

    #[test]
    fn weighted_average() {
        let w = weighted_avg(
            sources![num(1.0), num(5.0), num(9.0)],
            sources![num(10.0), num(10.0), num(10.0)],
        );
        assert_relative_eq!(w.value_at(t(0)), 10.0 / 15.0 + 50.0 / 15.0 + 90.0 / 15.0, epsilon = 1e-10);
    }

    #[test]
    fn weighted_average_truncates_both_sums() {
        // Only the first two weights count, in the numerator and denominator.
        let w = weighted_avg(
            sources![num(1.0), num(3.0), num(100.0)],
            sources![num(4.0), num(8.0)],
        );
        assert_relative_eq!(w.value_at(t(0)), (4.0 + 24.0) / 4.0);
    }

    #[test]
    fn zero_weight_sum_is_not_finite() {
        let w = weighted_avg(sources![num(0.0)], sources![num(5.0)]);
        assert!(!w.value_at(t(0)).is_finite());

        let empty = weighted_avg(vec![], vec![]);
        assert!(empty.value_at(t(0)).is_nan());
    }
}

// ── Accumulator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod accumulator {
    use super::*;
    use crate::build::accum;

    #[test]
    fn constant_velocity() {
        let acc = accum(0.0, t(0), 1.0, 0.0);
        assert_eq!(acc.value_at(t(0)), 0.0);
        assert_eq!(acc.value_at(t(1)), 1.0);
        assert_eq!(acc.value_at(t(4)), 4.0);
    }

    #[test]
    fn velocity_change_flushes_first() {
        let acc = accum(0.0, t(0), 1.0, 0.0);
        assert_eq!(acc.value_at(t(4)), 4.0);
        acc.change_velocity(-1.0, t(4));
        assert_eq!(acc.value_at(t(6)), 2.0);
        acc.change_velocity(2.0, t(6));
        assert_eq!(acc.value_at(t(8)), 6.0);
    }

    #[test]
    fn velocity_change_without_prior_read() {
        // Nothing read since creation: the change still integrates 0..4 at
        // the old velocity before switching.
        let acc = accum(0.0, t(0), 1.0, 0.0);
        acc.change_velocity(-1.0, t(4));
        assert_eq!(acc.value_at(t(6)), 2.0);
        assert_eq!(acc.velocity(), -1.0);
    }

    #[test]
    fn constant_acceleration() {
        let acc = accum(0.0, t(0), 0.0, 1.0);
        for (tick, expected) in [(0, 0.0), (1, 0.5), (2, 2.0), (3, 4.5)] {
            assert_eq!(acc.value_at(t(tick)), expected);
        }
    }

    #[test]
    fn acceleration_change_flushes_first() {
        let acc = accum(0.0, t(0), 0.0, 1.0);
        assert_eq!(acc.value_at(t(0)), 0.0);
        assert_eq!(acc.value_at(t(1)), 0.5);
        acc.change_acceleration(-1.0, t(1));
        assert_eq!(acc.value_at(t(2)), 1.0);
        assert_eq!(acc.value_at(t(3)), 0.5);
        assert_eq!(acc.value_at(t(4)), -1.0);
        assert_eq!(acc.acceleration(), -1.0);
    }

    #[test]
    fn velocity_and_acceleration() {
        let acc = accum(0.0, t(0), 1.0, 1.0);
        for (tick, expected) in [(0, 0.0), (1, 1.5), (2, 4.0), (3, 7.5)] {
            assert_eq!(acc.value_at(t(tick)), expected);
        }
    }

    #[test]
    fn skipping_ticks_matches_stepping() {
        let stepped = accum(2.0, t(0), 0.5, 0.25);
        let jumped = accum(2.0, t(0), 0.5, 0.25);
        for tick in 1..=10 {
            stepped.value_at(t(tick));
        }
        assert_eq!(stepped.value_at(t(10)), jumped.value_at(t(10)));
    }

    #[test]
    fn repeated_read_is_idempotent() {
        let acc = accum(0.0, t(0), 1.0, 1.0);
        let a = acc.value_at(t(5));
        let b = acc.value_at(t(5));
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(acc.last_tick(), t(5));
    }

    #[test]
    fn non_monotonic_read_is_clamped() {
        let acc = accum(0.0, t(0), 1.0, 0.0);
        assert_eq!(acc.value_at(t(5)), 5.0);
        assert_eq!(acc.value_at(t(3)), 5.0);
        assert_eq!(acc.value_at(t(6)), 6.0);
    }

    #[test]
    fn created_mid_simulation() {
        let acc = accum(10.0, t(100), 2.0, 0.0);
        assert_eq!(acc.value_at(t(100)), 10.0);
        assert_eq!(acc.value_at(t(103)), 16.0);
    }
}

// ── DependentAccumulator ──────────────────────────────────────────────────────

#[cfg(test)]
mod dependent {
    use tv_clock::Clock;

    use super::*;
    use crate::build::{daccum, knob, num, one, zero};

    #[test]
    fn constant_velocity_source() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), one(), zero()));
        assert_eq!(acc.value_at(clock.now()), 0.0);
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 1.0);
        clock.tick();
        clock.tick();
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 4.0);
    }

    #[test]
    fn velocity_source_swap() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), one(), zero()));
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(acc.value_at(clock.now()), 4.0);
        acc.change_velocity(num(-1.0), clock.now());
        clock.tick();
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 2.0);
        acc.change_velocity(num(2.0), clock.now());
        clock.tick();
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 6.0);
    }

    #[test]
    fn constant_acceleration_source() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), zero(), one()));
        assert_eq!(acc.value_at(clock.now()), 0.0);
        for expected in [0.5, 2.0, 4.5] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
    }

    #[test]
    fn acceleration_source_swap() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), zero(), one()));
        assert_eq!(acc.value_at(clock.now()), 0.0);
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 0.5);
        acc.change_acceleration(num(-1.0), clock.now());
        for expected in [1.0, 0.5, -1.0] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
    }

    #[test]
    fn velocity_and_acceleration_sources() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), one(), one()));
        assert_eq!(acc.value_at(clock.now()), 0.0);
        for expected in [1.5, 4.0, 7.5] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
    }

    #[test]
    fn knob_velocity_jumps_are_impulses() {
        let clock = Clock::new();
        let k = knob(1.0);
        let acc = clock.attach(daccum(0.0, clock.now(), k.clone(), zero()));

        assert_eq!(acc.value_at(clock.now()), 0.0);
        for expected in [1.0, 2.0, 3.0] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
        k.set_value(-1.0);
        for expected in [2.0, 1.0] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
        k.set_value(2.0);
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 3.0);
    }

    #[test]
    fn knob_acceleration_changes() {
        let clock = Clock::new();
        let k = knob(1.0);
        let acc = clock.attach(daccum(0.0, clock.now(), zero(), k.clone()));

        assert_eq!(acc.value_at(clock.now()), 0.0);
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 0.5);
        k.set_value(-1.0);
        for expected in [1.0, 0.5, -1.0] {
            clock.tick();
            assert_eq!(acc.value_at(clock.now()), expected);
        }
    }

    #[test]
    fn ticks_even_when_unread() {
        let clock = Clock::new();
        let k = knob(1.0);
        let acc = clock.attach(daccum(0.0, clock.now(), k.clone(), zero()));
        clock.tick();
        clock.tick();
        // The clock refreshed the node at tick 2 before the knob moved.
        assert_eq!(acc.last_tick(), Tick(2));
        k.set_value(5.0);
        clock.tick();
        assert_eq!(acc.value_at(clock.now()), 7.0);
    }

    #[test]
    fn sources_not_read_at_construction() {
        let counter = Rc::new(CountingSource::default());
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), counter.clone(), zero()));
        assert_eq!(counter.calls.get(), 0);
        clock.tick();
        assert_eq!(counter.calls.get(), 1);
        acc.value_at(clock.now());
        assert_eq!(counter.calls.get(), 1);
    }

    #[test]
    fn detached_node_stops_ticking_but_still_reads() {
        let clock = Clock::new();
        let acc = clock.attach(daccum(0.0, clock.now(), one(), zero())).detach();
        clock.tick();
        clock.tick();
        assert_eq!(acc.last_tick(), Tick(0));
        assert_eq!(acc.value_at(clock.now()), 2.0);
        assert_eq!(clock.subscriber_count(), 0);
    }

    #[test]
    fn dropping_owner_unregisters() {
        let clock = Clock::new();
        {
            let _skill = clock.attach(daccum(0.0, clock.now(), one(), zero()));
            assert_eq!(clock.subscriber_count(), 1);
        }
        assert_eq!(clock.subscriber_count(), 0);
    }
}
