use derive_more::{Display, From, Into};

pub mod behavior;
mod block_type;
pub mod blocks;
pub mod error;
pub mod property;
pub mod registry;
mod state;
pub mod state_definition;

pub use behavior::Capabilities;
pub use block_type::{BlockSettings, BlockType, PropertySlot};
pub use error::{ConfigurationError, ContractViolation, StateParseError};
pub use property::{
    BooleanProperty, EnumProperty, IntProperty, Property, PropertyDescriptor, PropertyDomain,
    PropertyEnum, PropertyValue,
};
pub use registry::{Registry, RegistryBuilder, StateTable};
pub use state::BlockState;
pub use state_definition::{InternedState, StateDefinition};

/// Dense index of a registered block-type. Air is always `BlockId(0)`.
#[derive(Clone, Copy, Debug, Display, From, Into, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
}

/// Global identifier of a state, dense across all block-types in registration order.
/// Air's only state is `StateId(0)`.
#[derive(Clone, Copy, Debug, Display, From, Into, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl StateId {
    pub const AIR: StateId = StateId(0);
}
