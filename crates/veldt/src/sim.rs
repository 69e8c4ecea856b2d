//! # Simulation Loop
//!
//! The single-threaded driver in front of [`World::tick`]: wall-clock delta
//! measurement, tick timing statistics, and over-budget warnings.
//!
//! One tick runs to completion per rendered frame; there is no suspension
//! within a tick and no async anywhere in the core. Headless consumers
//! (tests, replays, the `roam` demo) drive fixed deltas instead of the
//! wall clock.

use std::time::{Duration, Instant};

use crate::locomotion::InputIntent;
use crate::world::World;

/// Per-tick time budget at 60 ticks per second.
pub const TICK_BUDGET: Duration = Duration::from_micros(16_666);

/// Timing record for a single tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Tick number.
    pub tick: u64,
    /// Tick execution time in microseconds.
    pub tick_us: u64,
}

/// Accumulator for tick statistics across a session.
#[derive(Clone, Debug)]
pub struct TickStatsAccumulator {
    /// Total ticks recorded.
    pub ticks_recorded: u64,
    /// Sum of tick execution times.
    pub total_us_sum: u64,
    /// Fastest tick.
    pub min_tick_us: u64,
    /// Slowest tick.
    pub max_tick_us: u64,
    /// Ticks that exceeded [`TICK_BUDGET`].
    pub ticks_over_budget: u64,
}

impl TickStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks_recorded: 0,
            total_us_sum: 0,
            min_tick_us: u64::MAX,
            max_tick_us: 0,
            ticks_over_budget: 0,
        }
    }

    /// Records one tick's statistics.
    pub fn record(&mut self, stats: TickStats) {
        self.ticks_recorded += 1;
        self.total_us_sum += stats.tick_us;
        self.min_tick_us = self.min_tick_us.min(stats.tick_us);
        self.max_tick_us = self.max_tick_us.max(stats.tick_us);

        if stats.tick_us > TICK_BUDGET.as_micros() as u64 {
            self.ticks_over_budget += 1;
        }
    }

    /// Average tick time in milliseconds.
    #[must_use]
    pub fn avg_tick_ms(&self) -> f64 {
        if self.ticks_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.ticks_recorded as f64) / 1000.0
    }

    /// Fraction of recorded ticks that blew the budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.ticks_recorded == 0 {
            return 0.0;
        }
        self.ticks_over_budget as f64 / self.ticks_recorded as f64
    }
}

impl Default for TickStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// The tick driver. Owns the world for the session's lifetime.
pub struct SimLoop {
    world: World,
    last_tick: Instant,
    tick_count: u64,
    stats: TickStatsAccumulator,
}

impl SimLoop {
    /// Wraps a generated world in a driver.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            last_tick: Instant::now(),
            tick_count: 0,
            stats: TickStatsAccumulator::new(),
        }
    }

    /// Runs one tick against the wall clock.
    ///
    /// The elapsed time since the previous call becomes the delta; the
    /// world clamps it, so a stall integrates one bounded step.
    pub fn advance(&mut self, intent: &InputIntent) -> TickStats {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.run_tick(delta, intent)
    }

    /// Runs one tick with a fixed delta.
    ///
    /// For headless and deterministic consumers: same deltas, same world,
    /// same trajectory.
    pub fn step_fixed(&mut self, dt: f32, intent: &InputIntent) -> TickStats {
        self.last_tick = Instant::now();
        self.run_tick(dt, intent)
    }

    fn run_tick(&mut self, dt: f32, intent: &InputIntent) -> TickStats {
        let started = Instant::now();
        self.world.tick(dt, intent);
        let elapsed = started.elapsed();

        let stats = TickStats {
            tick: self.tick_count,
            tick_us: elapsed.as_micros() as u64,
        };
        self.tick_count += 1;
        self.stats.record(stats);

        if elapsed > TICK_BUDGET {
            tracing::warn!(
                tick = stats.tick,
                elapsed_us = stats.tick_us,
                "tick exceeded frame budget"
            );
        }

        stats
    }

    /// Ticks run so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The accumulated timing statistics.
    #[must_use]
    pub fn stats(&self) -> &TickStatsAccumulator {
        &self.stats
    }

    /// The driven world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for interaction shells.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn test_loop() -> SimLoop {
        let world = World::generate(&WorldConfig {
            seed: "sim-unit".to_string(),
            ..WorldConfig::default()
        })
        .unwrap();
        SimLoop::new(world)
    }

    #[test]
    fn test_ticks_are_counted_and_recorded() {
        let mut sim = test_loop();

        for _ in 0..10 {
            sim.step_fixed(1.0 / 60.0, &InputIntent::default());
        }

        assert_eq!(sim.tick_count(), 10);
        assert_eq!(sim.stats().ticks_recorded, 10);
        assert!(sim.stats().min_tick_us <= sim.stats().max_tick_us);
    }

    #[test]
    fn test_accumulator_math() {
        let mut acc = TickStatsAccumulator::new();

        for tick in 0..100u64 {
            acc.record(TickStats {
                tick,
                tick_us: 1000 + tick * 10,
            });
        }

        assert_eq!(acc.ticks_recorded, 100);
        assert!((acc.avg_tick_ms() - 1.495).abs() < 0.01);
        assert_eq!(acc.ticks_over_budget, 0);
        assert!(acc.over_budget_ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn test_over_budget_ticks_are_flagged() {
        let mut acc = TickStatsAccumulator::new();
        acc.record(TickStats {
            tick: 0,
            tick_us: 20_000,
        });

        assert_eq!(acc.ticks_over_budget, 1);
        assert!((acc.over_budget_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fixed_step_is_deterministic() {
        let mut a = test_loop();
        let mut b = test_loop();
        let intent = InputIntent {
            forward: true,
            ..InputIntent::default()
        };

        for _ in 0..120 {
            a.step_fixed(1.0 / 60.0, &intent);
            b.step_fixed(1.0 / 60.0, &intent);
        }

        let pa = a.world().avatar().position;
        let pb = b.world().avatar().position;
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        assert_eq!(pa.z.to_bits(), pb.z.to_bits());
    }
}
