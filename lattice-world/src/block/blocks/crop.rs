use std::sync::Arc;

use lattice_core::{BlockPos, Direction};

use super::SOIL_TAG;
use crate::{
    block::{
        behavior::{NeighborReactive, Placeable, RandomTickable},
        property::AGE_7,
        BlockSettings, BlockState,
    },
    level::{UpdateFlags, WorldView},
};

/// Grows one age step per random tick until fully grown. Needs soil directly below.
pub struct CropBlock;

impl CropBlock {
    pub const MAX_AGE: i32 = 7;

    pub fn settings(name: &'static str) -> BlockSettings {
        let crop = Arc::new(CropBlock);
        BlockSettings::new(name)
            .property(&AGE_7)
            .non_solid()
            .random_tickable(crop.clone())
            .placeable(crop.clone())
            .neighbor_reactive(crop)
    }
}

impl Placeable for CropBlock {
    fn can_survive<'r>(&self, _state: BlockState<'r>, world: &dyn WorldView<'r>, pos: BlockPos) -> bool {
        world.get_block_state(pos.below()).block().has_tag(SOIL_TAG)
    }
}

impl RandomTickable for CropBlock {
    fn ticks_randomly(&self, state: BlockState<'_>) -> bool {
        state.get(&AGE_7) < Self::MAX_AGE
    }

    fn random_tick<'r>(&self, state: BlockState<'r>, world: &mut dyn WorldView<'r>, pos: BlockPos) {
        let age = state.get(&AGE_7);
        if age < Self::MAX_AGE {
            world.set_block_state(pos, state.with(&AGE_7, age + 1), UpdateFlags::empty());
        }
    }
}

impl NeighborReactive for CropBlock {
    fn update_shape<'r>(
        &self,
        state: BlockState<'r>,
        direction: Direction,
        _neighbor_state: BlockState<'r>,
        world: &mut dyn WorldView<'r>,
        pos: BlockPos,
        _neighbor_pos: BlockPos,
    ) -> BlockState<'r> {
        if direction == Direction::Down && !self.can_survive(state, &*world, pos) {
            return world.registry().air();
        }
        state
    }
}
