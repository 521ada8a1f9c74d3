use lattice_core::BlockPos;

/// Ordering among ticks due on the same game tick. Lower runs first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum TickPriority {
    ExtremelyHigh = -3,
    VeryHigh = -2,
    High = -1,
    #[default]
    Normal = 0,
    Low = 1,
    VeryLow = 2,
    ExtremelyLow = 3,
}

/// Queue order of a scheduled tick. `sub_tick_order` is a running counter, so ties
/// on tick and priority resolve by scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickKey {
    pub trigger_tick: u64,
    pub priority: TickPriority,
    pub sub_tick_order: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTick<T> {
    pub pos: BlockPos,
    pub token: T,
    pub trigger_tick: u64,
    pub priority: TickPriority,
    pub sub_tick_order: u64,
}

impl<T> ScheduledTick<T> {
    pub fn key(&self) -> TickKey {
        TickKey {
            trigger_tick: self.trigger_tick,
            priority: self.priority,
            sub_tick_order: self.sub_tick_order,
        }
    }
}
