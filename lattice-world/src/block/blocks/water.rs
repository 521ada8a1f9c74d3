use std::sync::Arc;

use crate::{
    block::{behavior::FluidSource, property::LEVEL, BlockSettings, BlockState},
    fluid::{Fluid, FluidState},
};

pub struct WaterBlock;

impl WaterBlock {
    pub fn settings(name: &'static str) -> BlockSettings {
        BlockSettings::new(name)
            .property(&LEVEL)
            .non_solid()
            .replaceable()
            .fluid_source(Arc::new(WaterBlock))
    }
}

impl FluidSource for WaterBlock {
    fn fluid_state(&self, state: BlockState<'_>) -> FluidState {
        FluidState::from_level(Fluid::Water, state.get(&LEVEL))
    }
}
