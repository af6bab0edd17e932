//! Engine settings that are not part of the game's rules.

use std::time::Duration;

use crate::core::GameRng;

/// Range of the simulated "thinking" pause before an automated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThinkDelay {
    pub min: Duration,
    pub max: Duration,
}

impl ThinkDelay {
    /// No pause at all.
    pub const NONE: ThinkDelay = ThinkDelay {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max: max.max(min) }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// A uniformly random pause within the range, at millisecond resolution.
    pub fn sample(&self, rng: &mut GameRng) -> Duration {
        let min = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rng.gen_range_u64(min..=max))
    }
}

impl Default for ThinkDelay {
    /// Two to seven seconds.
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), Duration::from_millis(7000))
    }
}

/// Seed, pacing and limits for one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root seed; shuffles and pacing use separate streams derived from it.
    pub seed: u64,

    pub think_delay: ThinkDelay,

    /// Abort with `TurnLimitReached` once this many turns have started.
    pub turn_limit: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            think_delay: ThinkDelay::default(),
            turn_limit: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_think_delay(mut self, delay: ThinkDelay) -> Self {
        self.think_delay = delay;
        self
    }

    /// Automated players move without pausing.
    #[must_use]
    pub fn without_delay(self) -> Self {
        self.with_think_delay(ThinkDelay::NONE)
    }

    #[must_use]
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = Some(limit);
        self
    }
}
