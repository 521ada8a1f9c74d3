use std::sync::Arc;

use crate::block::{
    behavior::Waterloggable,
    property::{HORIZONTAL_FACING, OPEN, WATERLOGGED},
    BlockSettings,
};

pub struct TrapdoorBlock;

impl TrapdoorBlock {
    pub fn settings(name: &'static str) -> BlockSettings {
        BlockSettings::new(name)
            .property(&HORIZONTAL_FACING)
            .property(&OPEN)
            .property(&WATERLOGGED)
            .non_solid()
            .waterloggable(Arc::new(TrapdoorBlock))
    }
}

impl Waterloggable for TrapdoorBlock {}
