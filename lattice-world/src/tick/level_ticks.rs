use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use lattice_core::BlockPos;

use super::{ScheduledTick, TickKey, TickPriority, TickScheduler};

/// Pending ticks of a level.
///
/// The queue is ordered by [`TickKey`]; a side index keyed by `(pos, token)` keeps
/// at most one pending entry per pair and makes lookups and cancellation O(log n).
#[derive(Debug)]
pub struct LevelTicks<T> {
    time: u64,
    next_sub_tick: u64,
    queue: BTreeMap<TickKey, (BlockPos, T)>,
    pending: HashMap<(BlockPos, T), TickKey>,
}

impl<T> Default for LevelTicks<T> {
    fn default() -> Self {
        Self {
            time: 0,
            next_sub_tick: 0,
            queue: BTreeMap::new(),
            pending: HashMap::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> LevelTicks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the scheduler was last advanced to.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Trigger tick of the pending entry for `(pos, token)`.
    pub fn trigger_tick(&self, pos: BlockPos, token: T) -> Option<u64> {
        self.pending.get(&(pos, token)).map(|key| key.trigger_tick)
    }

    pub fn iter(&self) -> impl Iterator<Item = ScheduledTick<T>> + '_ {
        self.queue.iter().map(|(key, &(pos, token))| ScheduledTick {
            pos,
            token,
            trigger_tick: key.trigger_tick,
            priority: key.priority,
            sub_tick_order: key.sub_tick_order,
        })
    }
}

impl<T: Copy + Eq + Hash> TickScheduler<T> for LevelTicks<T> {
    fn schedule(&mut self, pos: BlockPos, token: T, delay: u32, priority: TickPriority) -> bool {
        if self.pending.contains_key(&(pos, token)) {
            return false;
        }
        let key = TickKey {
            trigger_tick: self.time + u64::from(delay),
            priority,
            sub_tick_order: self.next_sub_tick,
        };
        self.next_sub_tick += 1;
        self.queue.insert(key, (pos, token));
        self.pending.insert((pos, token), key);
        true
    }

    fn cancel(&mut self, pos: BlockPos, token: T) -> bool {
        match self.pending.remove(&(pos, token)) {
            Some(key) => {
                self.queue.remove(&key);
                true
            }
            None => false,
        }
    }

    fn has_scheduled(&self, pos: BlockPos, token: T) -> bool {
        self.pending.contains_key(&(pos, token))
    }

    fn drain(&mut self, now: u64, limit: usize) -> Vec<ScheduledTick<T>> {
        self.time = self.time.max(now);
        let mut due = Vec::new();
        while due.len() < limit {
            let Some(entry) = self.queue.first_entry() else {
                break;
            };
            if entry.key().trigger_tick > now {
                break;
            }
            let (key, (pos, token)) = entry.remove_entry();
            self.pending.remove(&(pos, token));
            due.push(ScheduledTick {
                pos,
                token,
                trigger_tick: key.trigger_tick,
                priority: key.priority,
                sub_tick_order: key.sub_tick_order,
            });
        }
        due
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use lattice_core::BlockPos;

    use super::LevelTicks;
    use crate::tick::{TickPriority, TickScheduler};

    const A: BlockPos = BlockPos::new(0, 0, 0);
    const B: BlockPos = BlockPos::new(1, 0, 0);

    #[test]
    fn duplicate_pairs_are_ignored() {
        let mut ticks = LevelTicks::new();
        assert!(ticks.schedule(A, 1u16, 5, TickPriority::Normal));
        assert!(!ticks.schedule(A, 1, 2, TickPriority::High));
        assert!(ticks.schedule(A, 2, 2, TickPriority::Normal));
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks.trigger_tick(A, 1), Some(5));
    }

    #[test]
    fn drains_by_time_then_priority_then_order() {
        let mut ticks = LevelTicks::new();
        ticks.schedule(A, 1u16, 2, TickPriority::Normal);
        ticks.schedule(B, 1, 1, TickPriority::Low);
        ticks.schedule(B, 2, 2, TickPriority::High);
        ticks.schedule(A, 3, 2, TickPriority::Normal);

        assert!(ticks.drain(0, usize::MAX).is_empty());
        let first: Vec<_> = ticks.drain(1, usize::MAX).iter().map(|t| t.token).collect();
        assert_eq!(first, [1]);
        let second: Vec<_> = ticks
            .drain(2, usize::MAX)
            .iter()
            .map(|t| (t.pos, t.token))
            .collect();
        assert_eq!(second, [(B, 2), (A, 1), (A, 3)]);
        assert!(ticks.is_empty());
    }

    #[test]
    fn drain_limit_carries_over() {
        let mut ticks = LevelTicks::new();
        for token in 0..5u16 {
            ticks.schedule(A, token, 0, TickPriority::Normal);
        }
        assert_eq!(ticks.drain(1, 3).len(), 3);
        let rest: Vec<_> = ticks.drain(2, 3).iter().map(|t| t.token).collect();
        assert_eq!(rest, [3, 4]);
    }

    #[test]
    fn delay_counts_from_last_drain() {
        let mut ticks = LevelTicks::new();
        ticks.drain(10, usize::MAX);
        ticks.schedule(A, 7u16, 3, TickPriority::Normal);
        assert!(ticks.drain(12, usize::MAX).is_empty());
        assert_eq!(ticks.drain(13, usize::MAX).len(), 1);
    }

    #[test]
    fn cancel_frees_the_pair() {
        let mut ticks = LevelTicks::new();
        ticks.schedule(A, 1u16, 4, TickPriority::Normal);
        assert!(ticks.cancel(A, 1));
        assert!(!ticks.cancel(A, 1));
        assert!(!ticks.has_scheduled(A, 1));
        assert!(ticks.schedule(A, 1, 1, TickPriority::Normal));
        assert_eq!(ticks.iter().count(), 1);
    }
}
