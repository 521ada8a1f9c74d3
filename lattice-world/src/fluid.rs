/// Fluid content of a cell, derived from its block state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fluid {
    Empty,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FluidState {
    fluid: Fluid,
    /// `1..=8`, where 8 is a full cell. Always `0` for [`Fluid::Empty`].
    amount: u8,
    source: bool,
}

impl FluidState {
    pub const EMPTY: FluidState = FluidState {
        fluid: Fluid::Empty,
        amount: 0,
        source: false,
    };

    pub const MAX_AMOUNT: u8 = 8;

    pub const fn water_source() -> Self {
        Self {
            fluid: Fluid::Water,
            amount: Self::MAX_AMOUNT,
            source: true,
        }
    }

    /// Maps the `level` property of a fluid block: `0` is a source, `1..=7` flow with
    /// decreasing amount, `8..=15` are falling and count as full.
    pub fn from_level(fluid: Fluid, level: i32) -> Self {
        if fluid == Fluid::Empty {
            return Self::EMPTY;
        }
        match level {
            0 => Self {
                fluid,
                amount: Self::MAX_AMOUNT,
                source: true,
            },
            1..=7 => Self {
                fluid,
                amount: Self::MAX_AMOUNT - level as u8,
                source: false,
            },
            _ => Self {
                fluid,
                amount: Self::MAX_AMOUNT,
                source: false,
            },
        }
    }

    pub fn fluid(&self) -> Fluid {
        self.fluid
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }

    pub fn is_source(&self) -> bool {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.fluid == Fluid::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::{Fluid, FluidState};

    #[test]
    fn levels_map_to_amounts() {
        assert_eq!(FluidState::from_level(Fluid::Water, 0), FluidState::water_source());
        assert_eq!(FluidState::from_level(Fluid::Water, 3).amount(), 5);
        assert!(!FluidState::from_level(Fluid::Water, 3).is_source());
        assert_eq!(FluidState::from_level(Fluid::Water, 12).amount(), 8);
        assert!(FluidState::from_level(Fluid::Empty, 0).is_empty());
    }
}
