use std::sync::Arc;

use crate::block::{behavior::Fallable, BlockSettings};

/// Sand and the like. All of the falling logic comes with [`Fallable`].
pub struct FallingBlock;

impl FallingBlock {
    pub fn settings(name: &'static str) -> BlockSettings {
        BlockSettings::new(name).fallable(Arc::new(FallingBlock))
    }
}

impl Fallable for FallingBlock {}
