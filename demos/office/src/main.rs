//! office — small demo for the rust_tv time-varying value engine.
//!
//! A team of six learns three skills over a working week.  Each tick is one
//! working hour; every hour each employee's training switch may flip at
//! random, and the team's skill statistics are read back through the graph.
//!
//! `office --stress N` instead attaches N accumulators to one clock and
//! times the tick fan-out (the real game targets ~10⁶ skill values).

mod staff;

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tv_clock::Clock;
use tv_core::ClockConfig;
use tv_graph::build::{avg, clamp, daccum, one, sigmoid, weighted_avg, zero};
use tv_graph::{Source, TimedVal, as_source};
use tv_integral::integral_accum;

use staff::{Employee, SKILLS};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SEED:   u64 = 7;
const DAYS:           i64 = 5;
const HOURS_PER_DAY:  i64 = 8;
const TOGGLE_CHANCE:  f64 = 0.25;
const STRESS_TICKS:   u32 = 60; // one second of game time at 60 tps

// name, seniority, learn rate, starting skills
const TEAM: [(&str, f64, f64, [f64; 3]); 6] = [
    ("Ada",     5.0, 0.020, [6.0, 2.0, 1.0]),
    ("Brook",   2.0, 0.050, [3.0, 4.0, 2.0]),
    ("Carmen",  8.0, 0.010, [8.0, 5.0, 6.0]),
    ("Dev",     1.0, 0.080, [1.0, 1.0, 3.0]),
    ("Emeka",   3.0, 0.040, [4.0, 6.0, 1.0]),
    ("Farah",   4.0, 0.030, [5.0, 3.0, 7.0]),
];

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Office skills demo for the rust_tv engine")]
struct Args {
    /// Skip the office run; attach N accumulators and time the tick fan-out.
    #[arg(long, value_name = "N")]
    stress: Option<usize>,
    /// Seed for the training-toggle RNG.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    match args.stress {
        Some(n) => run_stress(n),
        None => run_office(args.seed),
    }
}

fn run_office(seed: u64) -> Result<()> {
    println!("=== office — rust_tv time-varying value engine ===");
    println!("Team: {}  |  Days: {DAYS}  |  Seed: {seed}", TEAM.len());
    println!();

    let clock = Clock::with_config(ClockConfig::with_capacity(TEAM.len() * SKILLS.len()))?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let team: Vec<Employee> = TEAM
        .iter()
        .map(|&(name, seniority, rate, start)| Employee::hire(&clock, name, seniority, rate, start))
        .collect();
    println!("Attached {} skill accumulators", clock.subscriber_count());

    // Per-skill team statistics.
    let seniority: Vec<Source> = team.iter().map(|e| as_source(&e.seniority)).collect();
    let mut averages = Vec::with_capacity(SKILLS.len());
    let mut weighted = Vec::with_capacity(SKILLS.len());
    for i in 0..SKILLS.len() {
        let levels: Vec<Source> = team.iter().map(|e| e.skill(i)).collect();
        averages.push(avg(levels.clone())?);
        weighted.push(weighted_avg(seniority.clone(), levels));
    }

    // Hiring pressure falls as average coding skill rises past 5.
    let shown_coding = clamp(averages[0].clone(), 0.0, 10.0);
    let hiring_pressure = sigmoid(shown_coding.clone(), -5.0, 1.0);

    // Focus peaks mid-day; its running integral is the team's focused hours.
    let focus_curve = |t: f64| {
        let hour = t.rem_euclid(HOURS_PER_DAY as f64);
        0.5 + 0.5 * (PI * hour / HOURS_PER_DAY as f64).sin()
    };
    let focused_hours = integral_accum(0.0, clock.now(), focus_curve);

    // Time on the job, kept by the clock.
    let tenure = clock.attach(daccum(0.0, clock.now(), one(), zero()));

    for day in 1..=DAYS {
        let mut sessions = 0usize;
        for _ in 0..HOURS_PER_DAY {
            for e in &team {
                if rng.gen_bool(TOGGLE_CHANCE) {
                    e.training.toggle();
                }
                if e.training.is_on() {
                    sessions += 1;
                }
            }
            clock.tick();
        }

        // Mid-week the newest hire's mentor leaves and learning slows.
        if day == 3 {
            let dev = &team[3];
            dev.learn_rate.set_value(dev.learn_rate.get() * 0.5);
            info!(employee = dev.name, rate = dev.learn_rate.get(), "learn rate halved");
        }

        let now = clock.now();
        println!("Day {day} ({now}, {sessions} training hours)");
        for (i, skill) in SKILLS.iter().enumerate() {
            println!(
                "  {skill:<7} avg {:>6.3}   seniority-weighted {:>6.3}",
                averages[i].value_at(now),
                weighted[i].value_at(now),
            );
        }
        println!(
            "  hiring pressure {:.3}   focused hours {:.2} / {:.0}",
            hiring_pressure.value_at(now),
            focused_hours.value_at(now),
            tenure.value_at(now),
        );
    }

    println!();
    println!("Final skills:");
    let now = clock.now();
    for e in &team {
        let levels: Vec<String> = e.skills.iter().map(|s| format!("{:.3}", s.value_at(now))).collect();
        println!("  {:<7} {}", e.name, levels.join("  "));
    }

    drop(team);
    drop(tenure);
    println!("Subscribers after teardown: {}", clock.subscriber_count());
    Ok(())
}

fn run_stress(n: usize) -> Result<()> {
    println!("=== office --stress {n} ===");

    let clock = Clock::with_config(ClockConfig::with_capacity(n))?;

    let t0 = Instant::now();
    let skills: Vec<_> = (0..n)
        .map(|_| clock.attach(daccum(0.0, clock.now(), one(), zero())))
        .collect();
    println!("Attached {} accumulators in {:.2?}", clock.subscriber_count(), t0.elapsed());

    let t0 = Instant::now();
    for _ in 0..STRESS_TICKS {
        clock.tick();
    }
    let elapsed = t0.elapsed();
    let per_tick = elapsed / STRESS_TICKS;
    println!("{STRESS_TICKS} ticks in {elapsed:.2?}  ({per_tick:.2?} per tick)");
    if n > 0 {
        println!(
            "{:.1} ns per subscriber per tick",
            per_tick.as_nanos() as f64 / n as f64
        );
        println!("Sample value: {}", skills[n / 2].value_at(clock.now()));
    }

    let t0 = Instant::now();
    drop(skills);
    println!("Detached all in {:.2?}; {} left", t0.elapsed(), clock.subscriber_count());
    Ok(())
}
