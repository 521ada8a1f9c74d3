use lattice_core::{BlockPos, Direction};
use log::error;

use super::{Level, UpdateFlags, UpdateOrigin};

impl<'r> Level<'r> {
    /// Drains the neighbor update queue breadth-first.
    ///
    /// Each queued update notifies the six neighbors of its cell in
    /// [`Direction::ALL`] order, except the one that caused it. Writes made by
    /// reactions only enqueue further updates; nested calls return immediately, so
    /// the only loop is this one. Once `max_chained_neighbor_updates` notifications
    /// have been processed the remaining queue is discarded.
    pub(super) fn run_updates(&mut self) {
        if self.dispatching || self.updates.is_empty() {
            return;
        }
        self.dispatching = true;

        let budget = self.config.max_chained_neighbor_updates;
        let mut processed = 0usize;
        'queue: while let Some(update) = self.updates.pop_front() {
            self.stats.max_depth = self.stats.max_depth.max(update.depth);
            for direction in Direction::ALL {
                if update.skip == Some(direction) {
                    continue;
                }
                if processed >= budget {
                    let dropped = self.updates.len() as u64 + 1;
                    error!(
                        "Neighbor updates around {} exceeded the limit of {}, dropping {} queued updates",
                        update.pos, budget, dropped
                    );
                    self.stats.dropped_updates += dropped;
                    self.updates.clear();
                    break 'queue;
                }
                processed += 1;
                self.notify_neighbor(update.pos, direction, update.depth);
            }
        }

        self.dispatching = false;
    }

    /// Lets the block next to `source` in `direction` react to the change at `source`.
    fn notify_neighbor(&mut self, source: BlockPos, direction: Direction, depth: u32) {
        self.stats.notifications += 1;
        let pos = source.offset(direction);
        let state = self.get_block_state(pos);
        let capabilities = state.block().capabilities();
        let towards_source = direction.opposite();

        if let Some(fallable) = capabilities.fallable() {
            self.schedule_tick(pos, state.block_id(), fallable.fall_delay());
        }

        let Some(reactive) = capabilities.neighbor_reactive() else {
            return;
        };
        self.stats.reactions += 1;
        let source_state = self.get_block_state(source);
        let new_state = reactive.update_shape(state, towards_source, source_state, self, pos, source);
        if new_state == state {
            return;
        }

        self.stats.changes += 1;
        let origin = UpdateOrigin {
            skip: Some(towards_source),
            depth: depth + 1,
        };
        if new_state.is_air() {
            self.destroy_from(pos, true, origin);
        } else {
            self.write_block_state(pos, new_state, UpdateFlags::empty(), origin);
        }
    }
}
