use std::{collections::HashMap, ops::Index};

use itertools::Itertools;
use log::debug;

use super::{
    block_type::{BlockSettings, BlockType},
    error::{ConfigurationError, StateParseError},
    state_definition::StateDefinition,
    BlockId, BlockState, StateId,
};
use crate::fluid::{Fluid, FluidState};

/// Collects block-types before the registry is frozen.
///
/// Air is always registered first, so it owns `BlockId(0)` and `StateId(0)`.
pub struct RegistryBuilder {
    blocks: Vec<BlockSettings>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockSettings::new("air").non_solid().replaceable()],
        }
    }

    /// Queues a block-type and returns the id it will have. Validation happens in
    /// [`RegistryBuilder::build`].
    pub fn register(&mut self, settings: BlockSettings) -> BlockId {
        let id = BlockId(self.blocks.len().min(u16::MAX as usize) as u16);
        self.blocks.push(settings);
        id
    }

    pub fn build(self) -> Result<Registry, ConfigurationError> {
        if self.blocks.len() > u16::MAX as usize {
            return Err(ConfigurationError::TooManyBlocks(u16::MAX as usize));
        }
        if let Some(duplicate) = self.blocks.iter().map(|s| s.name).duplicates().next() {
            return Err(ConfigurationError::DuplicateBlock(duplicate));
        }

        let mut blocks = Vec::with_capacity(self.blocks.len());
        let mut by_name = HashMap::with_capacity(self.blocks.len());
        let mut next_state = 0u32;
        for (i, mut settings) in self.blocks.into_iter().enumerate() {
            let id = BlockId(i as u16);
            let properties = std::mem::take(&mut settings.properties);
            let definition =
                StateDefinition::build(settings.name, StateId(next_state), properties, &settings.defaults)?;
            next_state += definition.state_count() as u32;
            by_name.insert(settings.name, id);
            blocks.push(BlockType::new(id, settings, definition));
        }

        let state_owner = blocks
            .iter()
            .flat_map(|block| std::iter::repeat(block.id()).take(block.state_count()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let mut registry = Registry {
            blocks,
            by_name,
            state_owner,
            random_ticking: StateTable::default(),
            fluids: StateTable::default(),
            fluid_blocks: HashMap::new(),
        };

        registry.random_ticking = StateTable::new(&registry, |state| {
            state
                .block()
                .capabilities()
                .random_tickable()
                .is_some_and(|behavior| behavior.ticks_randomly(state))
        });
        registry.fluids = StateTable::new(&registry, fluid_state_of);
        registry.fluid_blocks = registry
            .blocks
            .iter()
            .filter_map(|block| {
                let fluid = fluid_state_of(block.default_state()).fluid();
                (block.capabilities().fluid_source().is_some() && fluid != Fluid::Empty)
                    .then(|| (fluid, block.id()))
            })
            .collect();

        debug!(
            "Registered {} block-types with {} states",
            registry.blocks.len(),
            registry.state_count()
        );
        Ok(registry)
    }
}

fn fluid_state_of(state: BlockState<'_>) -> FluidState {
    let capabilities = state.block().capabilities();
    if let Some(source) = capabilities.fluid_source() {
        return source.fluid_state(state);
    }
    match capabilities.waterloggable() {
        Some(waterloggable) if state.try_get(&waterloggable.waterlogged_property()) == Ok(true) => {
            FluidState::water_source()
        }
        _ => FluidState::EMPTY,
    }
}

/// The frozen set of block-types. Immutable and shareable once built.
#[derive(Debug)]
pub struct Registry {
    blocks: Vec<BlockType>,
    by_name: HashMap<&'static str, BlockId>,
    /// Owning block of every state id.
    state_owner: Box<[BlockId]>,
    random_ticking: StateTable<bool>,
    fluids: StateTable<FluidState>,
    fluid_blocks: HashMap<Fluid, BlockId>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id.0 as usize)
    }

    pub fn block_by_name(&self, name: &str) -> Option<&BlockType> {
        self.by_name.get(name).map(|id| &self.blocks[id.0 as usize])
    }

    pub fn default_state(&self, name: &str) -> Option<BlockState<'_>> {
        self.block_by_name(name).map(BlockType::default_state)
    }

    pub fn air(&self) -> BlockState<'_> {
        self.blocks[0].default_state()
    }

    /// Total number of states across all block-types.
    pub fn state_count(&self) -> usize {
        self.state_owner.len()
    }

    pub fn state(&self, id: StateId) -> Option<BlockState<'_>> {
        let owner = self.state_owner.get(id.0 as usize)?;
        let block = &self.blocks[owner.0 as usize];
        block.state_at(id.0 - block.definition().base_id().0)
    }

    /// Like [`Registry::state`] for ids known to come from this registry.
    ///
    /// # Panics
    /// If `id` was not issued by this registry.
    pub fn state_by_id(&self, id: StateId) -> BlockState<'_> {
        let block = &self.blocks[self.state_owner[id.0 as usize].0 as usize];
        BlockState::new(block, id.0 - block.definition().base_id().0)
    }

    pub fn ticks_randomly(&self, id: StateId) -> bool {
        self.random_ticking[id]
    }

    pub fn fluid_state(&self, id: StateId) -> FluidState {
        self.fluids[id]
    }

    /// The block that represents `fluid` on its own, if one is registered.
    pub fn fluid_block(&self, fluid: Fluid) -> Option<&BlockType> {
        self.fluid_blocks.get(&fluid).and_then(|id| self.block(*id))
    }

    /// Resolves a block name plus property strings, with unnamed properties taking
    /// their default value.
    pub fn state_from_properties(
        &self,
        name: &str,
        properties: &HashMap<String, String>,
    ) -> Result<BlockState<'_>, StateParseError> {
        self.resolve(name, properties.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Parses `name` or `name[key=value,...]`, the form produced by `Display`.
    pub fn parse_state(&self, text: &str) -> Result<BlockState<'_>, StateParseError> {
        let text = text.trim();
        let (name, properties) = match text.split_once('[') {
            None => (text, ""),
            Some((name, rest)) => {
                let properties = rest
                    .strip_suffix(']')
                    .ok_or_else(|| StateParseError::Malformed(text.to_string()))?;
                (name, properties)
            }
        };
        if name.is_empty() {
            return Err(StateParseError::Malformed(text.to_string()));
        }

        let mut pairs = Vec::new();
        for pair in properties.split(',').filter(|pair| !pair.trim().is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| StateParseError::Malformed(text.to_string()))?;
            pairs.push((key.trim(), value.trim()));
        }
        self.resolve(name, pairs.into_iter())
    }

    fn resolve<'a>(
        &self,
        name: &str,
        properties: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Result<BlockState<'_>, StateParseError> {
        let block = self
            .block_by_name(name)
            .ok_or_else(|| StateParseError::UnknownBlock(name.to_string()))?;
        let definition = block.definition();

        let mut state = block.default_state();
        let mut seen = vec![false; definition.properties().len()];
        for (key, value) in properties {
            let slot = definition
                .slot_of(key)
                .ok_or_else(|| StateParseError::UnknownProperty {
                    block: block.name(),
                    property: key.to_string(),
                })?;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(StateParseError::RepeatedProperty(key.to_string()));
            }
            let descriptor = &definition.properties()[slot];
            let ordinal = descriptor
                .domain
                .parse(value)
                .ok_or_else(|| StateParseError::InvalidValue {
                    property: descriptor.name,
                    value: value.to_string(),
                })?;
            state = state.with_ordinal(slot, ordinal);
        }
        Ok(state)
    }
}

/// A value for every state id of a registry, for O(1) per-state caches.
#[derive(Debug, Clone)]
pub struct StateTable<T> {
    entries: Box<[T]>,
}

impl<T> Default for StateTable<T> {
    fn default() -> Self {
        Self {
            entries: Box::new([]),
        }
    }
}

impl<T> StateTable<T> {
    pub fn new(registry: &Registry, mut f: impl FnMut(BlockState<'_>) -> T) -> Self {
        Self {
            entries: registry
                .blocks
                .iter()
                .flat_map(BlockType::states)
                .map(&mut f)
                .collect(),
        }
    }

    pub fn get(&self, id: StateId) -> Option<&T> {
        self.entries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Index<StateId> for StateTable<T> {
    type Output = T;

    fn index(&self, id: StateId) -> &T {
        &self.entries[id.0 as usize]
    }
}
