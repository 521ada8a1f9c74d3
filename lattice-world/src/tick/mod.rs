//! Scheduled ticks.
//!
//! - [`ScheduledTick`] - one pending tick, fired when the level reaches its trigger tick
//! - [`TickPriority`] - ordering among ticks due on the same game tick
//! - [`LevelTicks`] - the level's queue, deduplicated per position and token
//!
//! The token is whatever identifies the owner of a tick, usually a [`BlockId`].
//! A tick never holds a reference to a state: when it fires, the caller compares
//! the token with what currently occupies the position and skips stale entries.
//!
//! [`BlockId`]: crate::block::BlockId

use lattice_core::BlockPos;

mod level_ticks;
mod scheduled_tick;

pub use level_ticks::LevelTicks;
pub use scheduled_tick::{ScheduledTick, TickKey, TickPriority};

pub trait TickScheduler<T> {
    /// Schedules `token` at `pos` to fire `delay` ticks after the current tick.
    /// Returns `false` without changing anything if the same `(pos, token)` is
    /// already pending.
    fn schedule(&mut self, pos: BlockPos, token: T, delay: u32, priority: TickPriority) -> bool;

    /// Removes the pending tick for `(pos, token)`, if any.
    fn cancel(&mut self, pos: BlockPos, token: T) -> bool;

    fn has_scheduled(&self, pos: BlockPos, token: T) -> bool;

    /// Advances the scheduler to `now` and removes up to `limit` due ticks, in order
    /// of trigger tick, then priority, then scheduling order. Ticks left over stay
    /// queued for the next call.
    fn drain(&mut self, now: u64, limit: usize) -> Vec<ScheduledTick<T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
