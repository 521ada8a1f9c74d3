pub mod direction;
pub mod math;
pub mod random;

pub use direction::Direction;
pub use math::position::BlockPos;
