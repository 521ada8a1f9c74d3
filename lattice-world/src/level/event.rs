use lattice_core::BlockPos;

use crate::block::{BlockId, StateId};

/// Side effects of grid mutations, collected for whoever drives the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    BlockChanged {
        pos: BlockPos,
        old: StateId,
        new: StateId,
    },
    /// Clients should redraw the cell.
    RenderRefresh { pos: BlockPos },
    /// A block was removed in a way that yields its items.
    DropItems { pos: BlockPos, block: BlockId },
}

impl WorldEvent {
    pub fn pos(&self) -> BlockPos {
        match self {
            WorldEvent::BlockChanged { pos, .. }
            | WorldEvent::RenderRefresh { pos }
            | WorldEvent::DropItems { pos, .. } => *pos,
        }
    }
}
