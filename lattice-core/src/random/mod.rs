//! Deterministic pseudo random numbers.
//!
//! The level owns one generator and draws the random-tick cells from it, so a run
//! seeded with the same value replays identically.

pub mod xoroshiro128;

pub use xoroshiro128::Xoroshiro;

pub trait Random {
    fn next_i32(&mut self) -> i32;

    /// Uniform value in `0..bound`. `bound` must be positive.
    fn next_bounded_i32(&mut self, bound: i32) -> i32;
}
