use itertools::Itertools;

use super::{
    error::ConfigurationError,
    property::{PropertyDescriptor, PropertyValue},
    StateId,
};

/// Largest domain a single property may have; ordinals are stored as `u8`.
pub const MAX_DOMAIN_SIZE: usize = 256;

/// The canonical record of one state. There is exactly one per state and its
/// address never changes, so identity can be checked with [`std::ptr::eq`].
#[derive(Debug, PartialEq, Eq)]
pub struct InternedState {
    id: StateId,
    index: u32,
}

impl InternedState {
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Position inside the owning block-type's state list.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Every state of one block-type, built once at registration.
///
/// States are enumerated as the cartesian product of the property domains in
/// declaration order, last property varying fastest. A state's index is therefore
/// `sum(ordinal[i] * stride[i])`, and the transition table holds, for every state
/// and every value of every property, the index reached by assigning that value.
#[derive(Debug)]
pub struct StateDefinition {
    base_id: StateId,
    properties: Box<[PropertyDescriptor]>,
    sizes: Box<[usize]>,
    strides: Box<[u32]>,
    /// Start of each property's block of columns in a transition row.
    offsets: Box<[usize]>,
    row_len: usize,
    /// `state_count * properties.len()` ordinals, one row per state.
    values: Box<[u8]>,
    transitions: Box<[u32]>,
    interned: Box<[InternedState]>,
    default_index: u32,
}

impl StateDefinition {
    pub fn build(
        block: &'static str,
        base_id: StateId,
        properties: Vec<PropertyDescriptor>,
        defaults: &[(&'static str, PropertyValue)],
    ) -> Result<Self, ConfigurationError> {
        if let Some(duplicate) = properties.iter().map(|p| p.name).duplicates().next() {
            return Err(ConfigurationError::DuplicateProperty {
                block,
                property: duplicate,
            });
        }

        let mut sizes = Vec::with_capacity(properties.len());
        for property in &properties {
            let size = property.domain.len();
            if size == 0 {
                return Err(ConfigurationError::EmptyDomain {
                    block,
                    property: property.name,
                });
            }
            if size > MAX_DOMAIN_SIZE {
                return Err(ConfigurationError::DomainTooLarge {
                    block,
                    property: property.name,
                    size,
                });
            }
            sizes.push(size);
        }

        let state_count = sizes
            .iter()
            .try_fold(1u128, |count, &size| count.checked_mul(size as u128))
            .unwrap_or(u128::MAX);
        if u128::from(base_id.0).saturating_add(state_count) > u128::from(u32::MAX) {
            return Err(ConfigurationError::TooManyStates {
                block,
                states: state_count,
            });
        }
        let state_count = state_count as usize;

        let mut strides = vec![1u32; sizes.len()];
        for i in (0..sizes.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * sizes[i + 1] as u32;
        }

        let values: Vec<u8> = if properties.is_empty() {
            Vec::new()
        } else {
            sizes
                .iter()
                .map(|&size| 0..size)
                .multi_cartesian_product()
                .flatten()
                .map(|ordinal| ordinal as u8)
                .collect()
        };
        debug_assert_eq!(values.len(), state_count * properties.len());

        let offsets: Vec<usize> = sizes
            .iter()
            .scan(0, |acc, &size| {
                let offset = *acc;
                *acc += size;
                Some(offset)
            })
            .collect();
        let row_len = sizes.iter().sum::<usize>();

        let mut transitions = Vec::with_capacity(state_count * row_len);
        for index in 0..state_count {
            let row = &values[index * sizes.len()..(index + 1) * sizes.len()];
            for (slot, &size) in sizes.iter().enumerate() {
                let cleared = index as u32 - u32::from(row[slot]) * strides[slot];
                transitions.extend((0..size as u32).map(|ordinal| cleared + ordinal * strides[slot]));
            }
        }

        let mut default_ordinals = vec![0usize; properties.len()];
        for &(name, value) in defaults {
            let slot = properties
                .iter()
                .position(|p| p.name == name)
                .ok_or(ConfigurationError::UndeclaredDefault {
                    block,
                    property: name,
                })?;
            default_ordinals[slot] = properties[slot].domain.ordinal_of(&value).ok_or(
                ConfigurationError::InvalidDefault {
                    block,
                    property: name,
                },
            )?;
        }
        let default_index = default_ordinals
            .iter()
            .zip(&strides)
            .map(|(&ordinal, &stride)| ordinal as u32 * stride)
            .sum::<u32>();

        let interned = (0..state_count as u32)
            .map(|index| InternedState {
                id: StateId(base_id.0 + index),
                index,
            })
            .collect();

        Ok(Self {
            base_id,
            properties: properties.into_boxed_slice(),
            sizes: sizes.into_boxed_slice(),
            strides: strides.into_boxed_slice(),
            offsets: offsets.into_boxed_slice(),
            row_len,
            values: values.into_boxed_slice(),
            transitions: transitions.into_boxed_slice(),
            interned,
            default_index,
        })
    }

    pub fn base_id(&self) -> StateId {
        self.base_id
    }

    pub fn state_count(&self) -> usize {
        self.interned.len()
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }

    pub fn domain_size(&self, slot: usize) -> usize {
        self.sizes[slot]
    }

    pub fn default_index(&self) -> u32 {
        self.default_index
    }

    /// Ordinals of every property for the state at `index`, in declaration order.
    pub fn values(&self, index: u32) -> &[u8] {
        let width = self.properties.len();
        let start = index as usize * width;
        &self.values[start..start + width]
    }

    #[inline]
    pub fn ordinal(&self, index: u32, slot: usize) -> usize {
        self.values[index as usize * self.properties.len() + slot] as usize
    }

    /// Index of the state with exactly these ordinals. `None` when the assignment has
    /// the wrong length or any ordinal is outside its domain.
    pub fn index_of(&self, ordinals: &[usize]) -> Option<u32> {
        if ordinals.len() != self.properties.len() {
            return None;
        }
        let mut index = 0u32;
        for ((&ordinal, &size), &stride) in ordinals.iter().zip(&self.sizes).zip(&self.strides) {
            if ordinal >= size {
                return None;
            }
            index += ordinal as u32 * stride;
        }
        Some(index)
    }

    /// Index reached from `index` by setting the property at `slot` to `ordinal`.
    /// Both must be in range.
    #[inline]
    pub fn transition(&self, index: u32, slot: usize, ordinal: usize) -> u32 {
        debug_assert!(ordinal < self.sizes[slot]);
        self.transitions[index as usize * self.row_len + self.offsets[slot] + ordinal]
    }

    pub fn interned(&self, index: u32) -> &InternedState {
        &self.interned[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use lattice_core::Direction;

    use super::*;
    use crate::block::property::{Property, PropertyDomain, AGE_7, HORIZONTAL_FACING, OPEN, WATERLOGGED};

    fn facing_waterlogged() -> StateDefinition {
        StateDefinition::build(
            "ladder",
            StateId(10),
            vec![HORIZONTAL_FACING.descriptor(), WATERLOGGED.descriptor()],
            &[],
        )
        .unwrap()
    }

    #[test]
    fn enumerates_last_property_fastest() {
        let definition = facing_waterlogged();
        assert_eq!(definition.state_count(), 8);
        assert_eq!(definition.values(0), &[0, 0]);
        assert_eq!(definition.values(1), &[0, 1]);
        assert_eq!(definition.values(2), &[1, 0]);
        assert_eq!(definition.values(7), &[3, 1]);
        assert_eq!(definition.interned(7).id(), StateId(17));
    }

    #[test]
    fn transitions_change_only_one_property() {
        let definition = facing_waterlogged();
        for index in 0..definition.state_count() as u32 {
            for slot in 0..2 {
                for ordinal in 0..definition.domain_size(slot) {
                    let target = definition.transition(index, slot, ordinal);
                    assert_eq!(definition.ordinal(target, slot), ordinal);
                    let other = 1 - slot;
                    assert_eq!(
                        definition.ordinal(target, other),
                        definition.ordinal(index, other)
                    );
                }
            }
        }
    }

    #[test]
    fn index_of_inverts_values() {
        let definition = facing_waterlogged();
        for index in 0..8u32 {
            let ordinals: Vec<usize> = definition.values(index).iter().map(|&v| v as usize).collect();
            assert_eq!(definition.index_of(&ordinals), Some(index));
        }
        assert_eq!(definition.index_of(&[4, 0]), None);
        assert_eq!(definition.index_of(&[0]), None);
    }

    #[test]
    fn no_properties_means_one_state() {
        let definition = StateDefinition::build("stone", StateId(1), Vec::new(), &[]).unwrap();
        assert_eq!(definition.state_count(), 1);
        assert_eq!(definition.default_index(), 0);
        assert!(definition.values(0).is_empty());
        assert_eq!(definition.index_of(&[]), Some(0));
    }

    #[test]
    fn defaults_select_default_index() {
        let definition = StateDefinition::build(
            "ladder",
            StateId(0),
            vec![HORIZONTAL_FACING.descriptor(), WATERLOGGED.descriptor()],
            &[(HORIZONTAL_FACING.name(), HORIZONTAL_FACING.to_value(Direction::East))],
        )
        .unwrap();
        assert_eq!(definition.values(definition.default_index()), &[3, 0]);
    }

    #[test]
    fn rejects_bad_declarations() {
        let duplicate = StateDefinition::build(
            "door",
            StateId(0),
            vec![OPEN.descriptor(), OPEN.descriptor()],
            &[],
        );
        assert!(matches!(
            duplicate,
            Err(ConfigurationError::DuplicateProperty { property: "open", .. })
        ));

        let invalid_default = StateDefinition::build(
            "wheat",
            StateId(0),
            vec![AGE_7.descriptor()],
            &[("age", PropertyValue::Int(8))],
        );
        assert!(matches!(
            invalid_default,
            Err(ConfigurationError::InvalidDefault { .. })
        ));

        let undeclared = StateDefinition::build(
            "wheat",
            StateId(0),
            vec![AGE_7.descriptor()],
            &[("open", PropertyValue::Bool(true))],
        );
        assert!(matches!(
            undeclared,
            Err(ConfigurationError::UndeclaredDefault { .. })
        ));

        let overflow = StateDefinition::build(
            "huge",
            StateId(u32::MAX - 4),
            vec![AGE_7.descriptor()],
            &[],
        );
        assert!(matches!(overflow, Err(ConfigurationError::TooManyStates { .. })));
    }

    #[test]
    fn state_count_past_u128_is_too_many_states() {
        const NAMES: [&str; 17] = [
            "p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9", "p10", "p11", "p12",
            "p13", "p14", "p15", "p16",
        ];
        let properties = NAMES
            .iter()
            .map(|&name| PropertyDescriptor::new(name, PropertyDomain::IntRange { min: 0, max: 255 }))
            .collect();

        let result = StateDefinition::build("huge", StateId(0), properties, &[]);
        assert_eq!(
            result.err(),
            Some(ConfigurationError::TooManyStates {
                block: "huge",
                states: u128::MAX
            })
        );
    }
}
