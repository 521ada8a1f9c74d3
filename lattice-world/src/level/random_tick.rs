use lattice_core::{math::vector3::Vector3, random::Random, BlockPos};

use super::{Level, Section, SECTION_VOLUME};

impl<'r> Level<'r> {
    /// Samples `random_tick_speed` distinct cells in every section that holds a
    /// randomly ticking state, and ticks those that still do when visited.
    pub(super) fn tick_random(&mut self) {
        let speed = self.config.random_tick_speed as usize;
        if speed == 0 {
            return;
        }

        let sections: Vec<Vector3<i32>> = self
            .sections
            .iter()
            .filter(|(_, section)| section.has_random_ticking())
            .map(|(pos, _)| *pos)
            .collect();

        for section in sections {
            for index in self.sample_indices(speed) {
                let pos = BlockPos::from_section(section, Section::relative_position(index));
                let state = self.get_block_state(pos);
                if !self.registry.ticks_randomly(state.id()) {
                    continue;
                }
                if let Some(behavior) = state.block().capabilities().random_tickable() {
                    self.stats.random_ticks += 1;
                    behavior.random_tick(state, self, pos);
                }
            }
        }
    }

    /// `count` distinct cell indices of a section. With `count` at or above the
    /// section volume every cell is returned in index order.
    fn sample_indices(&mut self, count: usize) -> Vec<usize> {
        if count >= SECTION_VOLUME {
            return (0..SECTION_VOLUME).collect();
        }
        let mut seen = [0u64; SECTION_VOLUME / 64];
        let mut picked = Vec::with_capacity(count);
        while picked.len() < count {
            let index = self.random.next_bounded_i32(SECTION_VOLUME as i32) as usize;
            let (word, bit) = (index / 64, 1u64 << (index % 64));
            if seen[word] & bit == 0 {
                seen[word] |= bit;
                picked.push(index);
            }
        }
        picked
    }
}
