//! Typed block states and the level that updates them.
//!
//! A [`Registry`](block::Registry) is built once from block-type declarations and
//! then shared read-only. A [`Level`](level::Level) borrows it, stores one state id
//! per cell and drives neighbor cascades, scheduled ticks and random ticks.

use static_assertions::assert_impl_all;

pub mod block;
pub mod fluid;
pub mod level;
pub mod tick;

pub use block::{blocks::default_registry, BlockId, BlockState, Registry, StateId};
pub use level::{Level, UpdateFlags, WorldEvent, WorldView};

assert_impl_all!(block::Registry: Send, Sync);
assert_impl_all!(block::BlockState<'static>: Copy, Send, Sync);
