use std::{
    fmt,
    hash::{Hash, Hasher},
    ptr,
};

use super::{
    error::ContractViolation,
    property::{Property, PropertyDescriptor, PropertyValue},
    state_definition::InternedState,
    BlockId, BlockType, PropertySlot, StateId,
};

/// A handle to one state of a block-type.
///
/// States are never allocated: a handle is the owning block-type plus an index into
/// its precomputed tables, so reading and transitioning are table lookups. Two
/// handles are equal exactly when they name the same state.
#[derive(Clone, Copy)]
pub struct BlockState<'r> {
    block: &'r BlockType,
    index: u32,
}

impl<'r> BlockState<'r> {
    pub(crate) fn new(block: &'r BlockType, index: u32) -> Self {
        debug_assert!((index as usize) < block.state_count());
        Self { block, index }
    }

    pub fn block(&self) -> &'r BlockType {
        self.block
    }

    pub fn block_id(&self) -> BlockId {
        self.block.id()
    }

    pub fn id(&self) -> StateId {
        self.interned().id()
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The canonical record for this state, shared by every handle to it.
    pub fn interned(&self) -> &'r InternedState {
        self.block.definition().interned(self.index)
    }

    pub fn is_air(&self) -> bool {
        self.block.id() == BlockId::AIR
    }

    pub fn is_of(&self, block: BlockId) -> bool {
        self.block.id() == block
    }

    pub fn is_default(&self) -> bool {
        self.index == self.block.definition().default_index()
    }

    pub fn has<P: Property>(&self, property: &P) -> bool {
        self.block.slot(property).is_ok()
    }

    pub fn try_get<P: Property>(&self, property: &P) -> Result<P::Value, ContractViolation> {
        let slot = self.block.slot(property)?;
        Ok(self.read(&slot))
    }

    /// Value of `property` in this state.
    ///
    /// # Panics
    /// If the block-type does not declare `property` with the handle's domain.
    pub fn get<P: Property>(&self, property: &P) -> P::Value {
        self.try_get(property)
            .unwrap_or_else(|violation| panic!("{violation}"))
    }

    pub fn try_with<P: Property>(self, property: &P, value: P::Value) -> Result<Self, ContractViolation> {
        let slot = self.block.slot(property)?;
        self.write(&slot, value)
    }

    /// The state identical to this one except that `property` is `value`.
    ///
    /// # Panics
    /// If `property` is not declared or `value` is outside its domain.
    pub fn with<P: Property>(self, property: &P, value: P::Value) -> Self {
        self.try_with(property, value)
            .unwrap_or_else(|violation| panic!("{violation}"))
    }

    pub fn try_cycle<P: Property>(self, property: &P) -> Result<Self, ContractViolation> {
        let slot = self.block.slot(property)?;
        Ok(self.advance(&slot))
    }

    /// Advances `property` to the next value of its domain, wrapping to the first.
    ///
    /// # Panics
    /// If `property` is not declared.
    pub fn cycle<P: Property>(self, property: &P) -> Self {
        self.try_cycle(property)
            .unwrap_or_else(|violation| panic!("{violation}"))
    }

    /// Reads through a slot from [`BlockType::slot`] without looking the property up.
    ///
    /// # Panics
    /// If `slot` was resolved for another block-type.
    pub fn get_slot<P: Property>(&self, slot: &PropertySlot<'_, P>) -> P::Value {
        if let Err(violation) = self.check_owner(slot) {
            panic!("{violation}");
        }
        self.read(slot)
    }

    pub fn try_with_slot<P: Property>(
        self,
        slot: &PropertySlot<'_, P>,
        value: P::Value,
    ) -> Result<Self, ContractViolation> {
        self.check_owner(slot)?;
        self.write(slot, value)
    }

    /// # Panics
    /// If `slot` belongs to another block-type or `value` is outside its domain.
    pub fn with_slot<P: Property>(self, slot: &PropertySlot<'_, P>, value: P::Value) -> Self {
        self.try_with_slot(slot, value)
            .unwrap_or_else(|violation| panic!("{violation}"))
    }

    /// # Panics
    /// If `slot` was resolved for another block-type.
    pub fn cycle_slot<P: Property>(self, slot: &PropertySlot<'_, P>) -> Self {
        if let Err(violation) = self.check_owner(slot) {
            panic!("{violation}");
        }
        self.advance(slot)
    }

    /// Untyped read by property name.
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        let definition = self.block.definition();
        let slot = definition.slot_of(name)?;
        definition.properties()[slot]
            .domain
            .value_at(definition.ordinal(self.index, slot))
    }

    /// Every property with its value in this state, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&'r PropertyDescriptor, PropertyValue)> + '_ {
        let definition = self.block.definition();
        definition
            .properties()
            .iter()
            .zip(definition.values(self.index))
            .filter_map(|(descriptor, &ordinal)| {
                descriptor
                    .domain
                    .value_at(ordinal as usize)
                    .map(|value| (descriptor, value))
            })
    }

    /// Untyped transition used by the state parser.
    pub(crate) fn with_ordinal(self, slot: usize, ordinal: usize) -> Self {
        Self::new(
            self.block,
            self.block.definition().transition(self.index, slot, ordinal),
        )
    }

    fn check_owner<P: Property>(&self, slot: &PropertySlot<'_, P>) -> Result<(), ContractViolation> {
        if ptr::eq(slot.block(), self.block) {
            return Ok(());
        }
        Err(ContractViolation::ForeignSlot {
            block: self.block.name(),
            resolved: slot.block().name(),
            property: slot.property().name(),
        })
    }

    // The slot's domain equals the declared one, so every stored ordinal maps to a
    // value of the handle.
    fn read<P: Property>(&self, slot: &PropertySlot<'_, P>) -> P::Value {
        let ordinal = self.block.definition().ordinal(self.index, slot.index());
        match slot.property().value_at(ordinal) {
            Some(value) => value,
            None => unreachable!("ordinal {ordinal} outside `{}`", slot.property().name()),
        }
    }

    fn write<P: Property>(self, slot: &PropertySlot<'_, P>, value: P::Value) -> Result<Self, ContractViolation> {
        let property = slot.property();
        let ordinal = property
            .ordinal_of(value)
            .ok_or_else(|| ContractViolation::ValueOutOfDomain {
                property: property.name(),
                value: format!("{value:?}"),
            })?;
        let index = self.block.definition().transition(self.index, slot.index(), ordinal);
        Ok(Self::new(self.block, index))
    }

    fn advance<P: Property>(self, slot: &PropertySlot<'_, P>) -> Self {
        let definition = self.block.definition();
        let next = (definition.ordinal(self.index, slot.index()) + 1) % definition.domain_size(slot.index());
        Self::new(self.block, definition.transition(self.index, slot.index(), next))
    }
}

impl PartialEq for BlockState<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.block, other.block) && self.index == other.index
    }
}

impl Eq for BlockState<'_> {}

impl Hash for BlockState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Renders as `name[property=value,...]`, or just `name` without properties.
impl fmt::Display for BlockState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block.name())?;
        let mut values = self.values().peekable();
        if values.peek().is_none() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (descriptor, value)) in values.enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={value}", descriptor.name)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for BlockState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockState({} #{})", self, self.id())
    }
}
