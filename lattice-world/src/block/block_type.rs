use std::sync::Arc;

use super::{
    behavior::{
        Capabilities, Fallable, FluidSource, NeighborReactive, Placeable, RandomTickable,
        Tickable, Waterloggable,
    },
    error::ContractViolation,
    property::{Property, PropertyDescriptor, PropertyValue},
    state_definition::StateDefinition,
    BlockId, BlockState,
};

/// Everything needed to register a block-type.
///
/// ```ignore
/// let fence = Arc::new(FenceBlock);
/// builder.register(
///     BlockSettings::new("oak_fence")
///         .property(&NORTH)
///         .property(&WATERLOGGED)
///         .non_solid()
///         .tag("fences")
///         .neighbor_reactive(fence.clone())
///         .placeable(fence),
/// );
/// ```
#[derive(Debug)]
pub struct BlockSettings {
    pub(crate) name: &'static str,
    pub(crate) properties: Vec<PropertyDescriptor>,
    pub(crate) defaults: Vec<(&'static str, PropertyValue)>,
    pub(crate) solid: bool,
    pub(crate) replaceable: bool,
    pub(crate) tags: Vec<&'static str>,
    pub(crate) capabilities: Capabilities,
}

impl BlockSettings {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            properties: Vec::new(),
            defaults: Vec::new(),
            solid: true,
            replaceable: false,
            tags: Vec::new(),
            capabilities: Capabilities::default(),
        }
    }

    /// Declares a property. Declaration order fixes state enumeration order.
    pub fn property<P: Property>(mut self, property: &P) -> Self {
        self.properties.push(property.descriptor());
        self
    }

    /// Declares a property from its untyped form.
    pub fn property_descriptor(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.push(descriptor);
        self
    }

    /// Overrides the default value of a property, which is otherwise the first value
    /// of its domain.
    pub fn default_value<P: Property>(mut self, property: &P, value: P::Value) -> Self {
        self.defaults.push((property.name(), property.to_value(value)));
        self
    }

    pub fn non_solid(mut self) -> Self {
        self.solid = false;
        self
    }

    pub fn replaceable(mut self) -> Self {
        self.replaceable = true;
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn neighbor_reactive(mut self, behavior: Arc<dyn NeighborReactive>) -> Self {
        self.capabilities.neighbor_reactive = Some(behavior);
        self
    }

    pub fn placeable(mut self, behavior: Arc<dyn Placeable>) -> Self {
        self.capabilities.placeable = Some(behavior);
        self
    }

    pub fn tickable(mut self, behavior: Arc<dyn Tickable>) -> Self {
        self.capabilities.tickable = Some(behavior);
        self
    }

    pub fn random_tickable(mut self, behavior: Arc<dyn RandomTickable>) -> Self {
        self.capabilities.random_tickable = Some(behavior);
        self
    }

    pub fn waterloggable(mut self, behavior: Arc<dyn Waterloggable>) -> Self {
        self.capabilities.waterloggable = Some(behavior);
        self
    }

    pub fn fallable(mut self, behavior: Arc<dyn Fallable>) -> Self {
        self.capabilities.fallable = Some(behavior);
        self
    }

    pub fn fluid_source(mut self, behavior: Arc<dyn FluidSource>) -> Self {
        self.capabilities.fluid_source = Some(behavior);
        self
    }
}

/// A registered kind of block together with all of its states.
#[derive(Debug)]
pub struct BlockType {
    id: BlockId,
    name: &'static str,
    solid: bool,
    replaceable: bool,
    tags: Box<[&'static str]>,
    definition: StateDefinition,
    capabilities: Capabilities,
}

impl BlockType {
    pub(crate) fn new(id: BlockId, settings: BlockSettings, definition: StateDefinition) -> Self {
        Self {
            id,
            name: settings.name,
            solid: settings.solid,
            replaceable: settings.replaceable,
            tags: settings.tags.into_boxed_slice(),
            definition,
            capabilities: settings.capabilities,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the block fills its whole cell, which is what fences connect to and
    /// ladders hang on.
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Whether placing or falling into this block's cell simply overwrites it.
    pub fn is_replaceable(&self) -> bool {
        self.replaceable
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    pub fn definition(&self) -> &StateDefinition {
        &self.definition
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        self.definition.properties()
    }

    pub fn state_count(&self) -> usize {
        self.definition.state_count()
    }

    pub fn default_state(&self) -> BlockState<'_> {
        BlockState::new(self, self.definition.default_index())
    }

    pub fn state_at(&self, index: u32) -> Option<BlockState<'_>> {
        ((index as usize) < self.state_count()).then(|| BlockState::new(self, index))
    }

    pub fn states(&self) -> impl Iterator<Item = BlockState<'_>> {
        (0..self.state_count() as u32).map(move |index| BlockState::new(self, index))
    }

    /// Index of the state holding `assignment`, one value per declared property.
    pub fn index_of(&self, assignment: &[PropertyValue]) -> Option<u32> {
        if assignment.len() != self.properties().len() {
            return None;
        }
        let ordinals = self
            .properties()
            .iter()
            .zip(assignment)
            .map(|(property, value)| property.domain.ordinal_of(value))
            .collect::<Option<Vec<_>>>()?;
        self.definition.index_of(&ordinals)
    }

    /// Resolves `property` against this block-type once, so that later reads and
    /// writes through the slot skip the lookup.
    pub fn slot<P: Property>(&self, property: &P) -> Result<PropertySlot<'_, P>, ContractViolation> {
        let index = self.definition.slot_of(property.name()).ok_or(
            ContractViolation::UndeclaredProperty {
                block: self.name,
                property: property.name(),
            },
        )?;
        if !property.matches(&self.properties()[index].domain) {
            return Err(ContractViolation::DomainMismatch {
                block: self.name,
                property: property.name(),
            });
        }
        Ok(PropertySlot {
            block: self,
            index,
            property: property.clone(),
        })
    }
}

/// A property handle checked against one block-type.
///
/// Only states of that block-type accept the slot; see [`BlockState::get_slot`].
#[derive(Clone, Copy, Debug)]
pub struct PropertySlot<'r, P> {
    block: &'r BlockType,
    index: usize,
    property: P,
}

impl<'r, P: Property> PropertySlot<'r, P> {
    pub fn block(&self) -> &'r BlockType {
        self.block
    }

    /// Declaration position of the property in its block-type.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn property(&self) -> &P {
        &self.property
    }
}
