#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting hostile spawn
//! commands on a timed cadence.

use std::time::Duration;

use lane_defence_core::{BattleConfig, Command, Event, GamePhase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands while a battle is
/// playing.
///
/// Seeding the generator reproduces the exact `(tier, row)` sequence, which
/// keeps replays and tests deterministic.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    last_spawn: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            last_spawn: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events to emit at most one spawn command per tick.
    ///
    /// Outside the playing phase the spawn timer re-anchors to the current
    /// clock so a battle never opens with a burst of stale spawns.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        config: &BattleConfig,
        out: &mut Vec<Command>,
    ) {
        let Some(now) = latest_tick(events) else {
            return;
        };

        if phase != GamePhase::Playing {
            self.last_spawn = now;
            return;
        }

        if self.spawn_interval.is_zero() || config.rows == 0 {
            return;
        }

        if now.saturating_sub(self.last_spawn) < self.spawn_interval {
            return;
        }

        // Draw order is part of the contract: roll first, then row.
        let roll = self.rng.gen_range(0..=100_u32);
        let tier = config.tier_for_roll(roll);
        let row = self.rng.gen_range(0..config.rows);
        out.push(Command::SpawnHostile { row, tier });
        self.last_spawn = now;
    }
}

fn latest_tick(events: &[Event]) -> Option<Duration> {
    events.iter().rev().find_map(|event| match event {
        Event::TimeAdvanced { now, .. } => Some(*now),
        _ => None,
    })
}
