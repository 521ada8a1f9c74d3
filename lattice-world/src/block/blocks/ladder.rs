use std::sync::Arc;

use lattice_core::{BlockPos, Direction};

use crate::{
    block::{
        behavior::{NeighborReactive, Placeable, Waterloggable},
        property::{HORIZONTAL_FACING, WATERLOGGED},
        BlockSettings, BlockState,
    },
    level::WorldView,
};

/// Hangs on the solid block behind it, opposite to its facing. Pops off when that
/// block goes away.
pub struct LadderBlock;

impl LadderBlock {
    pub fn settings(name: &'static str) -> BlockSettings {
        let ladder = Arc::new(LadderBlock);
        BlockSettings::new(name)
            .property(&HORIZONTAL_FACING)
            .property(&WATERLOGGED)
            .non_solid()
            .neighbor_reactive(ladder.clone())
            .placeable(ladder.clone())
            .waterloggable(ladder)
    }

    fn support(state: BlockState<'_>, pos: BlockPos) -> BlockPos {
        pos.offset(state.get(&HORIZONTAL_FACING).opposite())
    }
}

impl Placeable for LadderBlock {
    /// Keeps the requested facing if it has support, otherwise takes the first
    /// horizontal facing that does.
    fn state_for_placement<'r>(
        &self,
        state: BlockState<'r>,
        world: &dyn WorldView<'r>,
        pos: BlockPos,
    ) -> BlockState<'r> {
        if self.can_survive(state, world, pos) {
            return state;
        }
        Direction::HORIZONTAL
            .into_iter()
            .map(|facing| state.with(&HORIZONTAL_FACING, facing))
            .find(|candidate| self.can_survive(*candidate, world, pos))
            .unwrap_or(state)
    }

    fn can_survive<'r>(&self, state: BlockState<'r>, world: &dyn WorldView<'r>, pos: BlockPos) -> bool {
        world.get_block_state(Self::support(state, pos)).block().is_solid()
    }
}

impl NeighborReactive for LadderBlock {
    fn update_shape<'r>(
        &self,
        state: BlockState<'r>,
        direction: Direction,
        _neighbor_state: BlockState<'r>,
        world: &mut dyn WorldView<'r>,
        pos: BlockPos,
        _neighbor_pos: BlockPos,
    ) -> BlockState<'r> {
        if direction == state.get(&HORIZONTAL_FACING).opposite() && !self.can_survive(state, &*world, pos) {
            return world.registry().air();
        }
        state
    }
}

impl Waterloggable for LadderBlock {}
