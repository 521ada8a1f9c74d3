use crate::block::{BlockSettings, ConfigurationError, Registry, RegistryBuilder};

pub mod crop;
pub mod falling;
pub mod fence;
pub mod ladder;
pub mod observer;
pub mod trapdoor;
pub mod water;

pub use crop::CropBlock;
pub use falling::FallingBlock;
pub use fence::FenceBlock;
pub use ladder::LadderBlock;
pub use observer::ObserverBlock;
pub use trapdoor::TrapdoorBlock;
pub use water::WaterBlock;

/// Blocks crops can grow on.
pub const SOIL_TAG: &str = "soil";

/// Registers the bundled blocks, after air, in a fixed order.
pub fn register_default_blocks(builder: &mut RegistryBuilder) {
    builder.register(BlockSettings::new("stone"));
    builder.register(BlockSettings::new("dirt").tag(SOIL_TAG));
    builder.register(FallingBlock::settings("sand"));
    builder.register(FenceBlock::settings("oak_fence"));
    builder.register(LadderBlock::settings("ladder"));
    builder.register(TrapdoorBlock::settings("oak_trapdoor"));
    builder.register(CropBlock::settings("wheat"));
    builder.register(ObserverBlock::settings("observer"));
    builder.register(WaterBlock::settings("water"));
}

pub fn default_registry() -> Result<Registry, ConfigurationError> {
    let mut builder = RegistryBuilder::new();
    register_default_blocks(&mut builder);
    builder.build()
}
