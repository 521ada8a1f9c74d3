use std::fmt;

use lattice_core::Direction;

/// The finite, ordered set of values a property can take.
///
/// Ordinals index into this order, and state enumeration follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyDomain {
    /// `false` then `true`.
    Bool,
    /// Every integer in `min..=max`.
    IntRange { min: i32, max: i32 },
    /// Named values in declaration order.
    Enum(Box<[&'static str]>),
}

impl PropertyDomain {
    pub fn len(&self) -> usize {
        match self {
            PropertyDomain::Bool => 2,
            PropertyDomain::IntRange { min, max } => {
                if max < min {
                    0
                } else {
                    (i64::from(*max) - i64::from(*min) + 1) as usize
                }
            }
            PropertyDomain::Enum(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value_at(&self, ordinal: usize) -> Option<PropertyValue> {
        if ordinal >= self.len() {
            return None;
        }
        Some(match self {
            PropertyDomain::Bool => PropertyValue::Bool(ordinal == 1),
            PropertyDomain::IntRange { min, .. } => PropertyValue::Int(min + ordinal as i32),
            PropertyDomain::Enum(values) => PropertyValue::Enum(values[ordinal]),
        })
    }

    /// Position of `value` in this domain, `None` when it is not a member.
    pub fn ordinal_of(&self, value: &PropertyValue) -> Option<usize> {
        match (self, value) {
            (PropertyDomain::Bool, PropertyValue::Bool(value)) => Some(usize::from(*value)),
            (PropertyDomain::IntRange { min, max }, PropertyValue::Int(value)) => {
                (min..=max)
                    .contains(&value)
                    .then(|| (i64::from(*value) - i64::from(*min)) as usize)
            }
            (PropertyDomain::Enum(values), PropertyValue::Enum(name)) => {
                values.iter().position(|candidate| candidate == name)
            }
            _ => None,
        }
    }

    /// Parses the textual form used in state strings such as `ladder[facing=east]`.
    pub fn parse(&self, text: &str) -> Option<usize> {
        match self {
            PropertyDomain::Bool => match text {
                "false" => Some(0),
                "true" => Some(1),
                _ => None,
            },
            PropertyDomain::IntRange { .. } => {
                let value = text.parse::<i32>().ok()?;
                self.ordinal_of(&PropertyValue::Int(value))
            }
            PropertyDomain::Enum(values) => values.iter().position(|candidate| *candidate == text),
        }
    }
}

/// A named property declaration, the untyped form a block-type stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub domain: PropertyDomain,
}

impl PropertyDescriptor {
    pub fn new(name: &'static str, domain: PropertyDomain) -> Self {
        Self { name, domain }
    }
}

/// A property value without its static type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Enum(&'static str),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Int(value) => write!(f, "{value}"),
            PropertyValue::Enum(name) => f.write_str(name),
        }
    }
}

/// A typed handle to a property.
///
/// Handles are plain constants; the block-type they are used with resolves them by
/// name, so the same handle works for every block declaring the property. A handle
/// is only accepted where its domain equals the declared one exactly.
pub trait Property: Clone {
    type Value: Copy + PartialEq + fmt::Debug;

    fn name(&self) -> &'static str;

    fn domain(&self) -> PropertyDomain;

    /// Number of values in the domain.
    fn len(&self) -> usize;

    fn ordinal_of(&self, value: Self::Value) -> Option<usize>;

    fn value_at(&self, ordinal: usize) -> Option<Self::Value>;

    fn to_value(&self, value: Self::Value) -> PropertyValue;

    /// Whether this handle's domain is `domain`, value for value and in order.
    fn matches(&self, domain: &PropertyDomain) -> bool {
        self.domain() == *domain
    }

    fn descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor::new(self.name(), self.domain())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BooleanProperty {
    name: &'static str,
}

impl BooleanProperty {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Property for BooleanProperty {
    type Value = bool;

    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> PropertyDomain {
        PropertyDomain::Bool
    }

    fn len(&self) -> usize {
        2
    }

    fn ordinal_of(&self, value: bool) -> Option<usize> {
        Some(usize::from(value))
    }

    fn value_at(&self, ordinal: usize) -> Option<bool> {
        match ordinal {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }

    fn to_value(&self, value: bool) -> PropertyValue {
        PropertyValue::Bool(value)
    }

    fn matches(&self, domain: &PropertyDomain) -> bool {
        matches!(domain, PropertyDomain::Bool)
    }
}

/// An inclusive integer range. A range with `max < min` is representable but has an
/// empty domain and is rejected when a block declares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntProperty {
    name: &'static str,
    min: i32,
    max: i32,
}

impl IntProperty {
    pub const fn new(name: &'static str, min: i32, max: i32) -> Self {
        Self { name, min, max }
    }

    pub const fn min(&self) -> i32 {
        self.min
    }

    pub const fn max(&self) -> i32 {
        self.max
    }
}

impl Property for IntProperty {
    type Value = i32;

    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> PropertyDomain {
        PropertyDomain::IntRange {
            min: self.min,
            max: self.max,
        }
    }

    fn len(&self) -> usize {
        self.domain().len()
    }

    fn ordinal_of(&self, value: i32) -> Option<usize> {
        (self.min..=self.max)
            .contains(&value)
            .then(|| (i64::from(value) - i64::from(self.min)) as usize)
    }

    fn value_at(&self, ordinal: usize) -> Option<i32> {
        (ordinal < self.len()).then(|| self.min + ordinal as i32)
    }

    fn to_value(&self, value: i32) -> PropertyValue {
        PropertyValue::Int(value)
    }

    fn matches(&self, domain: &PropertyDomain) -> bool {
        *domain
            == PropertyDomain::IntRange {
                min: self.min,
                max: self.max,
            }
    }
}

/// Rust enums usable as property values.
pub trait PropertyEnum: Copy + Eq + fmt::Debug + 'static {
    fn name(self) -> &'static str;
}

impl PropertyEnum for Direction {
    fn name(self) -> &'static str {
        Direction::name(self)
    }
}

/// An enumerated property over a fixed, ordered subset of `E`'s variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumProperty<E: 'static> {
    name: &'static str,
    values: &'static [E],
}

impl<E: PropertyEnum> EnumProperty<E> {
    pub const fn new(name: &'static str, values: &'static [E]) -> Self {
        Self { name, values }
    }

    pub fn values(&self) -> &'static [E] {
        self.values
    }
}

impl<E: PropertyEnum> Property for EnumProperty<E> {
    type Value = E;

    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> PropertyDomain {
        PropertyDomain::Enum(self.values.iter().map(|value| value.name()).collect())
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn ordinal_of(&self, value: E) -> Option<usize> {
        self.values.iter().position(|candidate| *candidate == value)
    }

    fn value_at(&self, ordinal: usize) -> Option<E> {
        self.values.get(ordinal).copied()
    }

    fn to_value(&self, value: E) -> PropertyValue {
        PropertyValue::Enum(value.name())
    }

    fn matches(&self, domain: &PropertyDomain) -> bool {
        match domain {
            PropertyDomain::Enum(names) => {
                names.len() == self.values.len()
                    && names
                        .iter()
                        .zip(self.values)
                        .all(|(name, value)| *name == value.name())
            }
            _ => false,
        }
    }
}

// Shared property handles used by the bundled blocks.

pub const WATERLOGGED: BooleanProperty = BooleanProperty::new("waterlogged");
pub const OPEN: BooleanProperty = BooleanProperty::new("open");
pub const POWERED: BooleanProperty = BooleanProperty::new("powered");

pub const NORTH: BooleanProperty = BooleanProperty::new("north");
pub const EAST: BooleanProperty = BooleanProperty::new("east");
pub const SOUTH: BooleanProperty = BooleanProperty::new("south");
pub const WEST: BooleanProperty = BooleanProperty::new("west");

pub const AGE_7: IntProperty = IntProperty::new("age", 0, 7);
pub const LEVEL: IntProperty = IntProperty::new("level", 0, 15);

pub const FACING: EnumProperty<Direction> = EnumProperty::new("facing", &Direction::ALL);
pub const HORIZONTAL_FACING: EnumProperty<Direction> =
    EnumProperty::new("facing", &Direction::HORIZONTAL);

/// The connection flag for a horizontal side, `None` for up and down.
pub fn connection_property(direction: Direction) -> Option<BooleanProperty> {
    match direction {
        Direction::North => Some(NORTH),
        Direction::East => Some(EAST),
        Direction::South => Some(SOUTH),
        Direction::West => Some(WEST),
        Direction::Down | Direction::Up => None,
    }
}
