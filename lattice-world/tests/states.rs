use std::{collections::HashSet, ptr};

use lattice_core::Direction;
use lattice_world::block::{
    property::{FACING, HORIZONTAL_FACING, LEVEL, OPEN, WATERLOGGED},
    BlockSettings, ConfigurationError, ContractViolation, EnumProperty, IntProperty, Property,
    PropertyDescriptor, PropertyDomain, PropertyEnum, PropertyValue, Registry, RegistryBuilder,
};
use proptest::prelude::*;

fn hatch_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder.register(BlockSettings::new("hatch").property(&OPEN));
    builder.register(
        BlockSettings::new("wall_sign")
            .property(&HORIZONTAL_FACING)
            .property(&WATERLOGGED),
    );
    builder.register(BlockSettings::new("tank").property(&LEVEL).property(&OPEN));
    builder.build().unwrap()
}

#[test]
fn single_boolean_property() {
    let registry = hatch_registry();
    let hatch = registry.block_by_name("hatch").unwrap();

    assert_eq!(hatch.state_count(), 2);
    assert!(!hatch.default_state().get(&OPEN));
    assert!(hatch.default_state().with(&OPEN, true).get(&OPEN));
}

#[test]
fn facing_and_waterlogged_are_distinct_states() {
    let registry = hatch_registry();
    let sign = registry.block_by_name("wall_sign").unwrap();
    assert_eq!(sign.state_count(), 8);

    let states: Vec<_> = sign.states().collect();
    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            assert_ne!(a, b);
            assert!(!ptr::eq(a.interned(), b.interned()));
        }
    }
    let ids: HashSet<_> = states.iter().map(|state| state.id()).collect();
    assert_eq!(ids.len(), 8);
}

#[test]
fn transitions_return_the_canonical_state() {
    let registry = hatch_registry();
    let sign = registry.block_by_name("wall_sign").unwrap().default_state();

    let a = sign.with(&HORIZONTAL_FACING, Direction::East).with(&WATERLOGGED, true);
    let b = sign.with(&WATERLOGGED, true).with(&HORIZONTAL_FACING, Direction::East);
    assert_eq!(a, b);
    assert!(ptr::eq(a.interned(), b.interned()));
    assert!(ptr::eq(a.interned(), registry.state(a.id()).unwrap().interned()));
}

#[test]
fn index_of_finds_the_state_for_an_assignment() {
    let registry = hatch_registry();
    let sign = registry.block_by_name("wall_sign").unwrap();
    let expected = sign
        .default_state()
        .with(&HORIZONTAL_FACING, Direction::West)
        .with(&WATERLOGGED, true);

    let index = sign
        .index_of(&[PropertyValue::Enum("west"), PropertyValue::Bool(true)])
        .unwrap();
    assert_eq!(sign.state_at(index).unwrap(), expected);
    assert_eq!(sign.index_of(&[PropertyValue::Enum("up"), PropertyValue::Bool(true)]), None);
    assert_eq!(sign.index_of(&[PropertyValue::Bool(true)]), None);
}

#[test]
fn setting_the_current_value_is_identity() {
    let registry = hatch_registry();
    for state in registry.block_by_name("tank").unwrap().states() {
        let level = state.get(&LEVEL);
        assert!(ptr::eq(state.with(&LEVEL, level).interned(), state.interned()));
    }
}

#[test]
fn cycle_wraps_around_the_domain() {
    let registry = hatch_registry();
    let start = registry.block_by_name("tank").unwrap().default_state();
    let mut state = start;
    for expected in 1..=15 {
        state = state.cycle(&LEVEL);
        assert_eq!(state.get(&LEVEL), expected);
    }
    assert_eq!(state.cycle(&LEVEL), start);

    let sign = registry.block_by_name("wall_sign").unwrap().default_state();
    let order: Vec<_> = std::iter::successors(Some(sign), |s| Some(s.cycle(&HORIZONTAL_FACING)))
        .take(4)
        .map(|s| s.get(&HORIZONTAL_FACING))
        .collect();
    assert_eq!(order, Direction::HORIZONTAL);
}

#[test]
fn undeclared_property_is_a_contract_violation() {
    let registry = hatch_registry();
    let hatch = registry.block_by_name("hatch").unwrap().default_state();

    assert!(!hatch.has(&WATERLOGGED));
    assert_eq!(
        hatch.try_get(&WATERLOGGED),
        Err(ContractViolation::UndeclaredProperty {
            block: "hatch",
            property: "waterlogged"
        })
    );
    assert!(hatch.try_with(&WATERLOGGED, true).is_err());
    assert!(hatch.try_cycle(&WATERLOGGED).is_err());
}

#[test]
#[should_panic(expected = "does not declare property `waterlogged`")]
fn get_panics_on_undeclared_property() {
    let registry = hatch_registry();
    let hatch = registry.block_by_name("hatch").unwrap().default_state();
    hatch.get(&WATERLOGGED);
}

#[test]
fn out_of_domain_values_are_rejected() {
    let registry = hatch_registry();
    let sign = registry.block_by_name("wall_sign").unwrap().default_state();

    assert!(matches!(
        sign.try_with(&HORIZONTAL_FACING, Direction::Up),
        Err(ContractViolation::ValueOutOfDomain { property: "facing", .. })
    ));
    // Same name, wider domain than the block declares.
    assert!(matches!(
        sign.try_get(&FACING),
        Err(ContractViolation::DomainMismatch { .. })
    ));

    let tank = registry.block_by_name("tank").unwrap().default_state();
    assert!(tank.try_with(&LEVEL, 16).is_err());
    assert!(tank.try_with(&LEVEL, -1).is_err());
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Vane {
    A,
    B,
    C,
    D,
}

impl PropertyEnum for Vane {
    fn name(self) -> &'static str {
        match self {
            Vane::A => "a",
            Vane::B => "b",
            Vane::C => "c",
            Vane::D => "d",
        }
    }
}

#[test]
fn same_sized_foreign_domains_are_rejected() {
    let registry = hatch_registry();
    let tank = registry.block_by_name("tank").unwrap().default_state();
    let shifted = IntProperty::new("level", 1, 16);
    let mismatch = ContractViolation::DomainMismatch {
        block: "tank",
        property: "level",
    };

    assert_eq!(shifted.len(), LEVEL.len());
    assert_eq!(tank.try_get(&shifted), Err(mismatch.clone()));
    assert_eq!(tank.try_with(&shifted, 16), Err(mismatch.clone()));
    assert_eq!(tank.try_cycle(&shifted), Err(mismatch));
    assert!(!tank.has(&shifted));

    let sign = registry.block_by_name("wall_sign").unwrap().default_state();
    const VANE: EnumProperty<Vane> =
        EnumProperty::new("facing", &[Vane::A, Vane::B, Vane::C, Vane::D]);
    assert!(matches!(
        sign.try_get(&VANE),
        Err(ContractViolation::DomainMismatch { block: "wall_sign", .. })
    ));
}

#[test]
fn slots_read_and_write_like_handles() {
    let registry = hatch_registry();
    let tank = registry.block_by_name("tank").unwrap();
    let level = tank.slot(&LEVEL).unwrap();
    let open = tank.slot(&OPEN).unwrap();
    assert_eq!(level.index(), 0);
    assert_eq!(open.index(), 1);

    for state in tank.states() {
        assert_eq!(state.get_slot(&level), state.get(&LEVEL));
        assert_eq!(state.get_slot(&open), state.get(&OPEN));
        assert_eq!(state.with_slot(&level, 9), state.with(&LEVEL, 9));
        assert_eq!(state.cycle_slot(&open), state.cycle(&OPEN));
    }
    let hatch = registry.block_by_name("hatch").unwrap().default_state();
    assert_eq!(
        hatch.try_with_slot(&open, true),
        Err(ContractViolation::ForeignSlot {
            block: "hatch",
            resolved: "tank",
            property: "open",
        })
    );
    assert!(matches!(
        tank.default_state().try_with_slot(&level, 16),
        Err(ContractViolation::ValueOutOfDomain { property: "level", .. })
    ));

    assert!(matches!(
        tank.slot(&WATERLOGGED),
        Err(ContractViolation::UndeclaredProperty { .. })
    ));
    assert!(matches!(
        tank.slot(&IntProperty::new("level", 1, 16)),
        Err(ContractViolation::DomainMismatch { .. })
    ));
}

#[test]
#[should_panic(expected = "was resolved for block `hatch`, not `tank`")]
fn slot_from_another_block_panics() {
    let registry = hatch_registry();
    let open = registry.block_by_name("hatch").unwrap().slot(&OPEN).unwrap();
    let tank = registry.block_by_name("tank").unwrap().default_state();
    let _ = tank.get_slot(&open);
}

#[test]
fn registration_errors() {
    let register = |settings: BlockSettings| {
        let mut builder = RegistryBuilder::new();
        builder.register(settings);
        builder.build().unwrap_err()
    };

    assert!(matches!(
        register(BlockSettings::new("door").property(&OPEN).property(&OPEN)),
        ConfigurationError::DuplicateProperty { .. }
    ));
    assert!(matches!(
        register(BlockSettings::new("cake").property(&IntProperty::new("bites", 6, 0))),
        ConfigurationError::EmptyDomain { property: "bites", .. }
    ));
    assert!(matches!(
        register(BlockSettings::new("meter").property(&IntProperty::new("reading", 0, 256))),
        ConfigurationError::DomainTooLarge { size: 257, .. }
    ));
    assert!(matches!(
        register(BlockSettings::new("vane").property(&EnumProperty::<Direction>::new("facing", &[]))),
        ConfigurationError::EmptyDomain { .. }
    ));
    assert!(matches!(
        register(
            BlockSettings::new("ledge")
                .property(&HORIZONTAL_FACING)
                .default_value(&FACING, Direction::Up)
        ),
        ConfigurationError::InvalidDefault { .. }
    ));
    assert!(matches!(
        register(BlockSettings::new("air")),
        ConfigurationError::DuplicateBlock("air")
    ));
}

#[test]
fn display_lists_properties_in_declaration_order() {
    let registry = hatch_registry();
    let sign = registry
        .block_by_name("wall_sign")
        .unwrap()
        .default_state()
        .with(&HORIZONTAL_FACING, Direction::West);
    assert_eq!(sign.to_string(), "wall_sign[facing=west,waterlogged=false]");
    assert_eq!(registry.parse_state("wall_sign[facing=west]").unwrap(), sign);
}

fn tank_state_strategy() -> impl Strategy<Value = (u32, i32, bool)> {
    (0u32..32, 0i32..=15, any::<bool>())
}

const GENERATED_NAMES: [&str; 4] = ["p0", "p1", "p2", "p3"];
const COLORS: [&str; 4] = ["red", "green", "blue", "white"];

fn domain_strategy() -> impl Strategy<Value = PropertyDomain> {
    prop_oneof![
        Just(PropertyDomain::Bool),
        (-3i32..3, 0i32..4).prop_map(|(min, extra)| PropertyDomain::IntRange {
            min,
            max: min + extra,
        }),
        (1usize..=4).prop_map(|len| PropertyDomain::Enum(COLORS[..len].into())),
    ]
}

proptest! {
    #[test]
    fn generated_definitions_enumerate_every_assignment(
        domains in prop::collection::vec(domain_strategy(), 0..=4)
    ) {
        let settings = domains.iter().zip(GENERATED_NAMES).fold(
            BlockSettings::new("generated"),
            |settings, (domain, name)| {
                settings.property_descriptor(PropertyDescriptor::new(name, domain.clone()))
            },
        );
        let mut builder = RegistryBuilder::new();
        builder.register(settings);
        let registry = builder.build().unwrap();
        let block = registry.block_by_name("generated").unwrap();

        let expected: usize = domains.iter().map(PropertyDomain::len).product();
        prop_assert_eq!(block.state_count(), expected);
        for (index, state) in block.states().enumerate() {
            let assignment: Vec<_> = state.values().map(|(_, value)| value).collect();
            prop_assert_eq!(assignment.len(), domains.len());
            prop_assert_eq!(block.index_of(&assignment), Some(index as u32));
        }
    }

    #[test]
    fn with_then_get_returns_the_value((index, level, open) in tank_state_strategy()) {
        let registry = hatch_registry();
        let tank = registry.block_by_name("tank").unwrap();
        let state = tank.state_at(index).unwrap();

        let changed = state.with(&LEVEL, level);
        prop_assert_eq!(changed.get(&LEVEL), level);
        prop_assert_eq!(changed.get(&OPEN), state.get(&OPEN));

        let changed = changed.with(&OPEN, open);
        prop_assert_eq!(changed.get(&OPEN), open);
        prop_assert_eq!(changed.get(&LEVEL), level);
    }

    #[test]
    fn cycling_domain_size_times_is_identity(index in 0u32..32) {
        let registry = hatch_registry();
        let state = registry.block_by_name("tank").unwrap().state_at(index).unwrap();

        let mut cycled = state;
        for _ in 0..LEVEL.len() {
            cycled = cycled.cycle(&LEVEL);
        }
        prop_assert!(ptr::eq(cycled.interned(), state.interned()));
        prop_assert_eq!(state.cycle(&OPEN).cycle(&OPEN), state);
    }

    #[test]
    fn parse_inverts_display(index in 0u32..32) {
        let registry = hatch_registry();
        let state = registry.block_by_name("tank").unwrap().state_at(index).unwrap();
        prop_assert_eq!(registry.parse_state(&state.to_string()).unwrap(), state);
    }
}
