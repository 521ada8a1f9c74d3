use std::sync::Arc;

use lattice_core::{BlockPos, Direction};

use crate::{
    block::{
        behavior::{NeighborReactive, Tickable},
        property::{FACING, POWERED},
        BlockSettings, BlockState,
    },
    level::{UpdateFlags, WorldView},
};

/// Watches the cell it faces. A change there schedules a short pulse: the observer
/// turns powered on the first tick and back off on the next one.
pub struct ObserverBlock;

impl ObserverBlock {
    pub const PULSE_DELAY: u32 = 2;

    pub fn settings(name: &'static str) -> BlockSettings {
        let observer = Arc::new(ObserverBlock);
        BlockSettings::new(name)
            .property(&FACING)
            .property(&POWERED)
            .default_value(&FACING, Direction::South)
            .neighbor_reactive(observer.clone())
            .tickable(observer)
    }
}

impl NeighborReactive for ObserverBlock {
    fn update_shape<'r>(
        &self,
        state: BlockState<'r>,
        direction: Direction,
        _neighbor_state: BlockState<'r>,
        world: &mut dyn WorldView<'r>,
        pos: BlockPos,
        _neighbor_pos: BlockPos,
    ) -> BlockState<'r> {
        if state.get(&FACING) == direction && !state.get(&POWERED) {
            world.schedule_tick(pos, state.block_id(), Self::PULSE_DELAY);
        }
        state
    }
}

impl Tickable for ObserverBlock {
    fn scheduled_tick<'r>(&self, state: BlockState<'r>, world: &mut dyn WorldView<'r>, pos: BlockPos) {
        if state.get(&POWERED) {
            world.set_block_state(pos, state.with(&POWERED, false), UpdateFlags::empty());
        } else {
            world.set_block_state(pos, state.with(&POWERED, true), UpdateFlags::empty());
            world.schedule_tick(pos, state.block_id(), Self::PULSE_DELAY);
        }
    }
}
