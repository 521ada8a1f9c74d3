//! Optional behaviors a block-type can opt into.
//!
//! Each capability is its own trait so a block only implements what it reacts to.
//! A [`BlockType`](super::BlockType) carries at most one implementation of each,
//! attached through [`BlockSettings`](super::BlockSettings) at registration.

use std::{fmt, sync::Arc};

use lattice_core::{BlockPos, Direction};

use super::{property::WATERLOGGED, BlockState, BooleanProperty};
use crate::{fluid::FluidState, level::WorldView};

/// Recomputes a state when an adjacent cell changes.
pub trait NeighborReactive: Send + Sync {
    /// Returns the state `state` at `pos` should have now that the cell at
    /// `neighbor_pos` holds `neighbor_state`. `direction` points from `pos` toward the
    /// changed neighbor. Returning air removes the block.
    fn update_shape<'r>(
        &self,
        state: BlockState<'r>,
        direction: Direction,
        neighbor_state: BlockState<'r>,
        world: &mut dyn WorldView<'r>,
        pos: BlockPos,
        neighbor_pos: BlockPos,
    ) -> BlockState<'r>;
}

pub trait Placeable: Send + Sync {
    /// State to place at `pos` instead of the block's default state.
    fn state_for_placement<'r>(
        &self,
        state: BlockState<'r>,
        _world: &dyn WorldView<'r>,
        _pos: BlockPos,
    ) -> BlockState<'r> {
        state
    }

    fn can_survive<'r>(&self, _state: BlockState<'r>, _world: &dyn WorldView<'r>, _pos: BlockPos) -> bool {
        true
    }

    /// Runs after the block was written into the grid.
    fn on_placed<'r>(
        &self,
        _state: BlockState<'r>,
        _old_state: BlockState<'r>,
        _world: &mut dyn WorldView<'r>,
        _pos: BlockPos,
    ) {
    }
}

pub trait Tickable: Send + Sync {
    fn scheduled_tick<'r>(&self, state: BlockState<'r>, world: &mut dyn WorldView<'r>, pos: BlockPos);
}

pub trait RandomTickable: Send + Sync {
    /// Whether `state` takes part in random ticking at all. Evaluated once per state
    /// when the registry is built.
    fn ticks_randomly(&self, _state: BlockState<'_>) -> bool {
        true
    }

    fn random_tick<'r>(&self, state: BlockState<'r>, world: &mut dyn WorldView<'r>, pos: BlockPos);
}

/// Blocks that can hold a water source in the same cell.
pub trait Waterloggable: Send + Sync {
    fn waterlogged_property(&self) -> BooleanProperty {
        WATERLOGGED
    }
}

/// Blocks pulled down by gravity.
///
/// Placement and neighbor changes schedule a tick for the block. When it fires and
/// the cell below can be fallen into, the block moves down one cell; otherwise it
/// has landed.
pub trait Fallable: Send + Sync {
    fn fall_delay(&self) -> u32 {
        2
    }

    fn can_fall_into(&self, below: BlockState<'_>) -> bool {
        below.is_air() || below.block().is_replaceable()
    }

    fn on_land<'r>(&self, _state: BlockState<'r>, _world: &mut dyn WorldView<'r>, _pos: BlockPos) {}
}

/// Blocks that are themselves a fluid.
pub trait FluidSource: Send + Sync {
    fn fluid_state(&self, state: BlockState<'_>) -> FluidState;
}

#[derive(Clone, Default)]
pub struct Capabilities {
    pub(crate) neighbor_reactive: Option<Arc<dyn NeighborReactive>>,
    pub(crate) placeable: Option<Arc<dyn Placeable>>,
    pub(crate) tickable: Option<Arc<dyn Tickable>>,
    pub(crate) random_tickable: Option<Arc<dyn RandomTickable>>,
    pub(crate) waterloggable: Option<Arc<dyn Waterloggable>>,
    pub(crate) fallable: Option<Arc<dyn Fallable>>,
    pub(crate) fluid_source: Option<Arc<dyn FluidSource>>,
}

impl Capabilities {
    pub fn neighbor_reactive(&self) -> Option<&dyn NeighborReactive> {
        self.neighbor_reactive.as_deref()
    }

    pub fn placeable(&self) -> Option<&dyn Placeable> {
        self.placeable.as_deref()
    }

    pub fn tickable(&self) -> Option<&dyn Tickable> {
        self.tickable.as_deref()
    }

    pub fn random_tickable(&self) -> Option<&dyn RandomTickable> {
        self.random_tickable.as_deref()
    }

    pub fn waterloggable(&self) -> Option<&dyn Waterloggable> {
        self.waterloggable.as_deref()
    }

    pub fn fallable(&self) -> Option<&dyn Fallable> {
        self.fallable.as_deref()
    }

    pub fn fluid_source(&self) -> Option<&dyn FluidSource> {
        self.fluid_source.as_deref()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("neighbor_reactive", &self.neighbor_reactive.is_some())
            .field("placeable", &self.placeable.is_some())
            .field("tickable", &self.tickable.is_some())
            .field("random_tickable", &self.random_tickable.is_some())
            .field("waterloggable", &self.waterloggable.is_some())
            .field("fallable", &self.fallable.is_some())
            .field("fluid_source", &self.fluid_source.is_some())
            .finish()
    }
}
