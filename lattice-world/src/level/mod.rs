//! The simulated grid and everything that mutates it.
//!
//! All writes go through [`Level::set_block_state`]. A write that changes a cell
//! queues a neighbor update; the queue is drained breadth-first until it is empty
//! before the outermost call returns, so callers always observe a settled grid.

use std::collections::{BTreeMap, VecDeque};

use lattice_config::LevelConfig;
use lattice_core::{
    math::vector3::Vector3,
    random::Xoroshiro,
    BlockPos, Direction,
};
use log::trace;

use crate::{
    block::{behavior::Fallable, BlockId, BlockState, Registry, StateId},
    fluid::{Fluid, FluidState},
    tick::{LevelTicks, TickPriority, TickScheduler},
};

mod dispatcher;
mod event;
mod flags;
mod random_tick;
mod section;

pub use event::WorldEvent;
pub use flags::UpdateFlags;
pub use section::{Section, SECTION_VOLUME};

/// What block behaviors may see and do while reacting to the world.
pub trait WorldView<'r> {
    fn registry(&self) -> &'r Registry;

    fn get_block_state(&self, pos: BlockPos) -> BlockState<'r>;

    fn get_fluid_state(&self, pos: BlockPos) -> FluidState;

    /// Writes `state` at `pos`. Returns whether the cell changed.
    fn set_block_state(&mut self, pos: BlockPos, state: BlockState<'r>, flags: UpdateFlags) -> bool;

    fn schedule_tick(&mut self, pos: BlockPos, block: BlockId, delay: u32) -> bool {
        self.schedule_tick_with_priority(pos, block, delay, TickPriority::Normal)
    }

    fn schedule_tick_with_priority(
        &mut self,
        pos: BlockPos,
        block: BlockId,
        delay: u32,
        priority: TickPriority,
    ) -> bool;

    fn has_scheduled_tick(&self, pos: BlockPos, block: BlockId) -> bool;

    fn game_time(&self) -> u64;
}

/// Counters over the lifetime of a level, or since the last [`Level::reset_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Writes that changed a cell.
    pub mutations: u64,
    /// Neighbor positions visited by cascades.
    pub notifications: u64,
    /// Visits that invoked a block's reaction.
    pub reactions: u64,
    /// Reactions that produced a different state.
    pub changes: u64,
    /// Longest chain of reactions triggered by one write.
    pub max_depth: u32,
    pub scheduled_ticks: u64,
    /// Scheduled ticks skipped because their block was gone.
    pub stale_ticks: u64,
    pub random_ticks: u64,
    /// Neighbor updates discarded when a cascade ran over its budget.
    pub dropped_updates: u64,
}

#[derive(Clone, Copy, Debug)]
struct NeighborUpdate {
    pos: BlockPos,
    /// Neighbor that caused this update and must not be notified back.
    skip: Option<Direction>,
    depth: u32,
}

/// Where a write comes from: an outside caller, or a reaction at some depth.
#[derive(Clone, Copy, Debug)]
struct UpdateOrigin {
    skip: Option<Direction>,
    depth: u32,
}

impl UpdateOrigin {
    const EXTERNAL: UpdateOrigin = UpdateOrigin {
        skip: None,
        depth: 0,
    };
}

pub struct Level<'r> {
    registry: &'r Registry,
    config: LevelConfig,
    sections: BTreeMap<Vector3<i32>, Section>,
    block_ticks: LevelTicks<BlockId>,
    updates: VecDeque<NeighborUpdate>,
    dispatching: bool,
    random: Xoroshiro,
    game_time: u64,
    events: Vec<WorldEvent>,
    stats: UpdateStats,
}

impl<'r> Level<'r> {
    pub fn new(registry: &'r Registry, config: LevelConfig) -> Self {
        Self {
            registry,
            random: Xoroshiro::from_seed(config.seed),
            config,
            sections: BTreeMap::new(),
            block_ticks: LevelTicks::new(),
            updates: VecDeque::new(),
            dispatching: false,
            game_time: 0,
            events: Vec::new(),
            stats: UpdateStats::default(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn game_time(&self) -> u64 {
        self.game_time
    }

    pub fn stats(&self) -> UpdateStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = UpdateStats::default();
    }

    /// Events recorded since the last [`Level::drain_events`].
    ///
    /// Nothing is dropped: the outbox keeps growing until it is drained, so an owner
    /// that ticks the level must drain it every tick.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn block_ticks(&self) -> &LevelTicks<BlockId> {
        &self.block_ticks
    }

    /// Number of stored sections. Sections that become all air are dropped.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn get_block_state(&self, pos: BlockPos) -> BlockState<'r> {
        let (section, relative) = pos.section_and_relative_position();
        let id = self
            .sections
            .get(&section)
            .map_or(StateId::AIR, |section| section.get(Section::index(relative)));
        self.registry.state_by_id(id)
    }

    pub fn get_fluid_state(&self, pos: BlockPos) -> FluidState {
        self.registry.fluid_state(self.get_block_state(pos).id())
    }

    /// Writes `state` at `pos` and settles the grid. Returns whether the cell changed.
    pub fn set_block_state(&mut self, pos: BlockPos, state: BlockState<'r>, flags: UpdateFlags) -> bool {
        self.write_block_state(pos, state, flags, UpdateOrigin::EXTERNAL)
    }

    /// Places `state` the way a player would: only into air or a replaceable cell,
    /// adjusted by the block's placement behavior and waterlogged if the cell held a
    /// water source. Returns `false` if nothing was placed.
    pub fn place_block(&mut self, pos: BlockPos, state: BlockState<'r>) -> bool {
        let current = self.get_block_state(pos);
        if !current.is_air() && !current.block().is_replaceable() {
            return false;
        }

        let mut state = state;
        let capabilities = state.block().capabilities();
        if let Some(placeable) = capabilities.placeable() {
            state = placeable.state_for_placement(state, &*self, pos);
            if !placeable.can_survive(state, &*self, pos) {
                trace!("{} cannot survive at {}", state, pos);
                return false;
            }
        }
        if let Some(waterloggable) = capabilities.waterloggable() {
            let in_water = self.get_fluid_state(pos) == FluidState::water_source();
            if let Ok(waterlogged) = state.try_with(&waterloggable.waterlogged_property(), in_water) {
                state = waterlogged;
            }
        }
        self.set_block_state(pos, state, UpdateFlags::empty())
    }

    /// Breaks the block at `pos`, dropping its items. A waterlogged block leaves its
    /// water behind.
    pub fn remove_block(&mut self, pos: BlockPos) -> bool {
        self.destroy_block(pos, true)
    }

    pub fn destroy_block(&mut self, pos: BlockPos, drop_items: bool) -> bool {
        self.destroy_from(pos, drop_items, UpdateOrigin::EXTERNAL)
    }

    /// Puts a water source into `pos`, either by waterlogging the block there or by
    /// placing water into an empty or replaceable cell.
    pub fn fill_with_water(&mut self, pos: BlockPos) -> bool {
        let state = self.get_block_state(pos);
        if let Some(waterloggable) = state.block().capabilities().waterloggable() {
            return match state.try_with(&waterloggable.waterlogged_property(), true) {
                Ok(filled) => self.set_block_state(pos, filled, UpdateFlags::empty()),
                Err(_) => false,
            };
        }
        if !state.is_air() && !state.block().is_replaceable() {
            return false;
        }
        match self.registry.fluid_block(Fluid::Water) {
            Some(water) => self.set_block_state(pos, water.default_state(), UpdateFlags::empty()),
            None => false,
        }
    }

    /// Removes water from `pos`: un-waterlogs the block there, or clears a water block.
    pub fn drain_water(&mut self, pos: BlockPos) -> bool {
        let state = self.get_block_state(pos);
        let capabilities = state.block().capabilities();
        if let Some(waterloggable) = capabilities.waterloggable() {
            return match state.try_with(&waterloggable.waterlogged_property(), false) {
                Ok(drained) => self.set_block_state(pos, drained, UpdateFlags::empty()),
                Err(_) => false,
            };
        }
        if capabilities.fluid_source().is_some() {
            let air = self.registry.air();
            return self.set_block_state(pos, air, UpdateFlags::empty());
        }
        false
    }

    pub fn schedule_tick(&mut self, pos: BlockPos, block: BlockId, delay: u32) -> bool {
        self.schedule_tick_with_priority(pos, block, delay, TickPriority::Normal)
    }

    pub fn schedule_tick_with_priority(
        &mut self,
        pos: BlockPos,
        block: BlockId,
        delay: u32,
        priority: TickPriority,
    ) -> bool {
        self.block_ticks.schedule(pos, block, delay, priority)
    }

    pub fn has_scheduled_tick(&self, pos: BlockPos, block: BlockId) -> bool {
        self.block_ticks.has_scheduled(pos, block)
    }

    pub fn cancel_scheduled_tick(&mut self, pos: BlockPos, block: BlockId) -> bool {
        self.block_ticks.cancel(pos, block)
    }

    /// Advances the level by one game tick: fires due scheduled ticks, then random
    /// ticks.
    pub fn tick(&mut self) {
        self.game_time += 1;
        self.tick_scheduled();
        self.tick_random();
    }

    fn tick_scheduled(&mut self) {
        let due = self
            .block_ticks
            .drain(self.game_time, self.config.max_scheduled_ticks_per_tick);
        for tick in due {
            let state = self.get_block_state(tick.pos);
            if !state.is_of(tick.token) {
                self.stats.stale_ticks += 1;
                trace!(
                    "Dropping stale tick for block {} at {}, now {}",
                    tick.token,
                    tick.pos,
                    state
                );
                continue;
            }
            self.stats.scheduled_ticks += 1;

            let capabilities = state.block().capabilities();
            if let Some(fallable) = capabilities.fallable() {
                self.fall(state, tick.pos, fallable);
            } else if let Some(tickable) = capabilities.tickable() {
                tickable.scheduled_tick(state, self, tick.pos);
            }
        }
    }

    fn fall(&mut self, state: BlockState<'r>, pos: BlockPos, fallable: &dyn Fallable) {
        let below = pos.below();
        if !fallable.can_fall_into(self.get_block_state(below)) {
            fallable.on_land(state, self, pos);
            return;
        }
        let vacated = self.removal_replacement(state);
        self.set_block_state(pos, vacated, UpdateFlags::SKIP_DROPS);
        self.set_block_state(below, state, UpdateFlags::empty());
    }

    /// What a removed block leaves behind: its fluid if it held a source, else air.
    fn removal_replacement(&self, state: BlockState<'r>) -> BlockState<'r> {
        let fluid = self.registry.fluid_state(state.id());
        if fluid.is_source() && state.block().capabilities().fluid_source().is_none() {
            if let Some(block) = self.registry.fluid_block(fluid.fluid()) {
                return block.default_state();
            }
        }
        self.registry.air()
    }

    fn destroy_from(&mut self, pos: BlockPos, drop_items: bool, origin: UpdateOrigin) -> bool {
        let state = self.get_block_state(pos);
        if state.is_air() {
            return false;
        }
        let replacement = self.removal_replacement(state);
        let flags = if drop_items {
            UpdateFlags::empty()
        } else {
            UpdateFlags::SKIP_DROPS
        };
        self.write_block_state(pos, replacement, flags, origin)
    }

    fn write_block_state(
        &mut self,
        pos: BlockPos,
        state: BlockState<'r>,
        flags: UpdateFlags,
        origin: UpdateOrigin,
    ) -> bool {
        let old = self.store(pos, state);
        if old == state {
            if flags.contains(UpdateFlags::FORCE_RENDER_UPDATE) {
                self.events.push(WorldEvent::RenderRefresh { pos });
            }
            return false;
        }

        self.stats.mutations += 1;
        self.events.push(WorldEvent::BlockChanged {
            pos,
            old: old.id(),
            new: state.id(),
        });
        if flags.contains(UpdateFlags::FORCE_RENDER_UPDATE) {
            self.events.push(WorldEvent::RenderRefresh { pos });
        }

        if !flags.contains(UpdateFlags::NO_NEIGHBOR_NOTIFY) {
            self.updates.push_back(NeighborUpdate {
                pos,
                skip: origin.skip,
                depth: origin.depth,
            });
        }

        if old.block_id() != state.block_id() {
            if is_removal(old, state) && !flags.contains(UpdateFlags::SKIP_DROPS) {
                self.events.push(WorldEvent::DropItems {
                    pos,
                    block: old.block_id(),
                });
            }
            if !flags.contains(UpdateFlags::MOVED_BY_ACTUATOR) {
                let capabilities = state.block().capabilities();
                if let Some(placeable) = capabilities.placeable() {
                    placeable.on_placed(state, old, self, pos);
                }
                if let Some(fallable) = capabilities.fallable() {
                    self.schedule_tick(pos, state.block_id(), fallable.fall_delay());
                }
            }
        }

        self.run_updates();
        true
    }

    /// Writes the raw cell and returns what was there.
    fn store(&mut self, pos: BlockPos, state: BlockState<'r>) -> BlockState<'r> {
        let (section_pos, relative) = pos.section_and_relative_position();
        let index = Section::index(relative);
        let ticks_randomly = self.registry.ticks_randomly(state.id());

        let Some(section) = self.sections.get_mut(&section_pos) else {
            if !state.is_air() {
                let mut section = Section::new();
                section.set(index, state.id(), ticks_randomly, false);
                self.sections.insert(section_pos, section);
            }
            return self.registry.air();
        };

        let old_id = section.get(index);
        if old_id == state.id() {
            return state;
        }
        section.set(index, state.id(), ticks_randomly, self.registry.ticks_randomly(old_id));
        if section.is_empty() {
            self.sections.remove(&section_pos);
        }
        self.registry.state_by_id(old_id)
    }
}

/// A block disappears, as opposed to being swapped for another block.
fn is_removal(old: BlockState<'_>, new: BlockState<'_>) -> bool {
    !old.is_air()
        && old.block().capabilities().fluid_source().is_none()
        && (new.is_air() || new.block().capabilities().fluid_source().is_some())
}

impl<'r> WorldView<'r> for Level<'r> {
    fn registry(&self) -> &'r Registry {
        self.registry
    }

    fn get_block_state(&self, pos: BlockPos) -> BlockState<'r> {
        Level::get_block_state(self, pos)
    }

    fn get_fluid_state(&self, pos: BlockPos) -> FluidState {
        Level::get_fluid_state(self, pos)
    }

    fn set_block_state(&mut self, pos: BlockPos, state: BlockState<'r>, flags: UpdateFlags) -> bool {
        Level::set_block_state(self, pos, state, flags)
    }

    fn schedule_tick_with_priority(
        &mut self,
        pos: BlockPos,
        block: BlockId,
        delay: u32,
        priority: TickPriority,
    ) -> bool {
        Level::schedule_tick_with_priority(self, pos, block, delay, priority)
    }

    fn has_scheduled_tick(&self, pos: BlockPos, block: BlockId) -> bool {
        Level::has_scheduled_tick(self, pos, block)
    }

    fn game_time(&self) -> u64 {
        self.game_time
    }
}
