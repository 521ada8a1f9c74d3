use lattice_core::math::{vector3::Vector3, SECTION_SIZE};

use crate::block::StateId;

pub const SECTION_VOLUME: usize = (SECTION_SIZE * SECTION_SIZE * SECTION_SIZE) as usize;

/// A 16x16x16 cube of cells. Cells outside any stored section are air.
pub struct Section {
    states: Box<[StateId; SECTION_VOLUME]>,
    non_air: u16,
    random_ticking: u16,
}

impl Section {
    pub fn new() -> Self {
        Self {
            states: Box::new([StateId::AIR; SECTION_VOLUME]),
            non_air: 0,
            random_ticking: 0,
        }
    }

    /// Index of a relative position, x fastest then z then y.
    #[inline]
    pub fn index(relative: Vector3<i32>) -> usize {
        debug_assert!((0..SECTION_SIZE).contains(&relative.x));
        debug_assert!((0..SECTION_SIZE).contains(&relative.y));
        debug_assert!((0..SECTION_SIZE).contains(&relative.z));
        ((relative.y * SECTION_SIZE + relative.z) * SECTION_SIZE + relative.x) as usize
    }

    #[inline]
    pub fn relative_position(index: usize) -> Vector3<i32> {
        let index = index as i32;
        Vector3::new(
            index % SECTION_SIZE,
            index / (SECTION_SIZE * SECTION_SIZE),
            (index / SECTION_SIZE) % SECTION_SIZE,
        )
    }

    #[inline]
    pub fn get(&self, index: usize) -> StateId {
        self.states[index]
    }

    /// Stores `state` and returns the previous occupant. The caller passes whether
    /// each of the two takes part in random ticking.
    pub fn set(
        &mut self,
        index: usize,
        state: StateId,
        ticks_randomly: bool,
        old_ticks_randomly: bool,
    ) -> StateId {
        let old = std::mem::replace(&mut self.states[index], state);
        if old == StateId::AIR && state != StateId::AIR {
            self.non_air += 1;
        } else if old != StateId::AIR && state == StateId::AIR {
            self.non_air -= 1;
        }
        match (old_ticks_randomly, ticks_randomly) {
            (false, true) => self.random_ticking += 1,
            (true, false) => self.random_ticking -= 1,
            _ => {}
        }
        old
    }

    /// True when every cell is air and the section can be dropped.
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    pub fn has_random_ticking(&self) -> bool {
        self.random_ticking > 0
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use lattice_core::math::vector3::Vector3;

    use super::{Section, SECTION_VOLUME};
    use crate::block::StateId;

    #[test]
    fn index_roundtrips() {
        for index in 0..SECTION_VOLUME {
            assert_eq!(Section::index(Section::relative_position(index)), index);
        }
        assert_eq!(Section::index(Vector3::new(1, 0, 0)), 1);
        assert_eq!(Section::index(Vector3::new(0, 1, 0)), 256);
    }

    #[test]
    fn counters_follow_writes() {
        let mut section = Section::new();
        assert!(section.is_empty());
        section.set(5, StateId(3), true, false);
        assert!(!section.is_empty());
        assert!(section.has_random_ticking());
        let old = section.set(5, StateId::AIR, false, true);
        assert_eq!(old, StateId(3));
        assert!(section.is_empty());
        assert!(!section.has_random_ticking());
    }
}
