//! Deterministic six-sided dice.
//!
//! In a chat session the dice value comes from the platform. `Dice` is for
//! everything else: simulations, benches, and tests that need reproducible
//! roll sequences.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Forkable**: Independent per-game streams from one master seed
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use rust_snl::core::Dice;
//!
//! let mut a = Dice::new(42);
//! let mut b = Dice::new(42);
//! for _ in 0..10 {
//!     let roll = a.roll();
//!     assert!((1..=6).contains(&roll));
//!     assert_eq!(roll, b.roll());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Seeded die backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct Dice {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl Dice {
    /// Create a die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Roll once, returning a value in `1..=6`.
    pub fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Fork an independent die.
    ///
    /// Each fork produces a different but deterministic sequence, so one
    /// master seed can drive many simulated games.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceState {
        DiceState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable dice state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    /// Seed the dice were created with
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
    /// Fork counter
    pub fork_counter: u64,
}
