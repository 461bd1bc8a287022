//! Random sources for split decisions
//!
//! Generation never touches a process-wide generator. Callers pass in a
//! [`RandomSource`]; any `rand::Rng` (normally `ChaCha8Rng`) works, and
//! [`ScriptedSource`] pins every draw for reproducible fixtures.

use std::collections::VecDeque;

use rand::Rng;

/// The two kinds of draws the partitioner makes.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn roll(&mut self) -> f32;

    /// Uniform integer in `[low, high)`. An empty range yields `low`.
    fn range(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            low
        } else {
            self.gen_range(low..high)
        }
    }
}

/// Where a [`ScriptedSource`] lands inside a requested range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetPick {
    Low,
    Mid,
    High,
}

/// Deterministic source: replays queued rolls, then repeats a fixed roll.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    queued: VecDeque<f32>,
    roll: f32,
    pick: OffsetPick,
}

impl ScriptedSource {
    pub fn new(roll: f32, pick: OffsetPick) -> Self {
        Self {
            queued: VecDeque::new(),
            roll: roll.clamp(0.0, 0.999_999),
            pick,
        }
    }

    /// Rolls returned, in order, before falling back to the fixed roll.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f32>) -> Self {
        self.queued.extend(rolls);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn roll(&mut self) -> f32 {
        self.queued.pop_front().unwrap_or(self.roll)
    }

    fn range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        match self.pick {
            OffsetPick::Low => low,
            OffsetPick::Mid => low + (high - low) / 2,
            OffsetPick::High => high - 1,
        }
    }
}
