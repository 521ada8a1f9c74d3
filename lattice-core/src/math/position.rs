use super::vector3::Vector3;
use std::fmt;

use crate::{direction::Direction, math::SECTION_SIZE};
use num_traits::Euclid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
/// Position of a single grid cell.
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    #[inline]
    pub const fn z(&self) -> i32 {
        self.0.z
    }

    /// The adjacent cell in `direction`.
    #[inline]
    pub fn offset(&self, direction: Direction) -> Self {
        Self(self.0 + direction.to_offset())
    }

    #[inline]
    pub fn below(&self) -> Self {
        self.offset(Direction::Down)
    }

    #[inline]
    pub fn above(&self) -> Self {
        self.offset(Direction::Up)
    }

    /// Splits the position into its section coordinate and the coordinate relative to
    /// that section. Relative components are always within `0..SECTION_SIZE`.
    pub fn section_and_relative_position(&self) -> (Vector3<i32>, Vector3<i32>) {
        let (x_section, x_rem) = self.0.x.div_rem_euclid(&SECTION_SIZE);
        let (y_section, y_rem) = self.0.y.div_rem_euclid(&SECTION_SIZE);
        let (z_section, z_rem) = self.0.z.div_rem_euclid(&SECTION_SIZE);
        (
            Vector3::new(x_section, y_section, z_section),
            Vector3::new(x_rem, y_rem, z_rem),
        )
    }

    /// Inverse of [`BlockPos::section_and_relative_position`].
    pub fn from_section(section: Vector3<i32>, relative: Vector3<i32>) -> Self {
        Self(section * SECTION_SIZE + relative)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}
