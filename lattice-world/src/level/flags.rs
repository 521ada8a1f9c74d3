use bitflags::bitflags;

bitflags! {
    /// Options for a single grid mutation. The empty set is a normal update.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// Write the cell without notifying its neighbors.
        const NO_NEIGHBOR_NOTIFY = 1 << 0;
        /// Emit a render refresh even if the cell did not change.
        const FORCE_RENDER_UPDATE = 1 << 1;
        /// The block was moved rather than placed: no placement hooks, no gravity.
        const MOVED_BY_ACTUATOR = 1 << 2;
        /// Do not drop items for the block being removed.
        const SKIP_DROPS = 1 << 3;
    }
}

impl Default for UpdateFlags {
    fn default() -> Self {
        Self::empty()
    }
}
