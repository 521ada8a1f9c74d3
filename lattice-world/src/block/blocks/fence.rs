use std::sync::Arc;

use lattice_core::{BlockPos, Direction};

use crate::{
    block::{
        behavior::{NeighborReactive, Placeable, Waterloggable},
        property::{connection_property, EAST, NORTH, SOUTH, WATERLOGGED, WEST},
        BlockSettings, BlockState,
    },
    level::WorldView,
};

/// Connects on each horizontal side to other fences and to solid blocks.
pub struct FenceBlock;

impl FenceBlock {
    pub const TAG: &'static str = "fences";

    pub fn settings(name: &'static str) -> BlockSettings {
        let fence = Arc::new(FenceBlock);
        BlockSettings::new(name)
            .property(&NORTH)
            .property(&EAST)
            .property(&SOUTH)
            .property(&WEST)
            .property(&WATERLOGGED)
            .non_solid()
            .tag(Self::TAG)
            .neighbor_reactive(fence.clone())
            .placeable(fence.clone())
            .waterloggable(fence)
    }

    fn connects_to(neighbor: BlockState<'_>) -> bool {
        neighbor.block().has_tag(Self::TAG) || neighbor.block().is_solid()
    }
}

impl Placeable for FenceBlock {
    fn state_for_placement<'r>(
        &self,
        state: BlockState<'r>,
        world: &dyn WorldView<'r>,
        pos: BlockPos,
    ) -> BlockState<'r> {
        Direction::HORIZONTAL
            .into_iter()
            .filter_map(|direction| connection_property(direction).map(|side| (direction, side)))
            .fold(state, |state, (direction, side)| {
                state.with(&side, Self::connects_to(world.get_block_state(pos.offset(direction))))
            })
    }
}

impl NeighborReactive for FenceBlock {
    fn update_shape<'r>(
        &self,
        state: BlockState<'r>,
        direction: Direction,
        neighbor_state: BlockState<'r>,
        _world: &mut dyn WorldView<'r>,
        _pos: BlockPos,
        _neighbor_pos: BlockPos,
    ) -> BlockState<'r> {
        match connection_property(direction) {
            Some(side) => state.with(&side, Self::connects_to(neighbor_state)),
            None => state,
        }
    }
}

impl Waterloggable for FenceBlock {}
