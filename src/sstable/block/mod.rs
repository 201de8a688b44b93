pub mod builder;

pub use builder::BlockBuilder;

/// Restart interval used when none is configured.
pub const DEFAULT_RESTART_INTERVAL: u32 = 16;

/// Tuning knobs for a [`BlockBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOptions {
    /// Maximum number of records per prefix-compression chain. A record that
    /// starts a new chain stores its key in full. Must be at least 1.
    pub restart_interval: u32,
}

impl BlockOptions {
    /// Set the restart interval.
    pub fn with_restart_interval(mut self, restart_interval: u32) -> Self {
        self.restart_interval = restart_interval;
        self
    }
}

impl Default for BlockOptions {
    fn default() -> Self {
        BlockOptions {
            restart_interval: DEFAULT_RESTART_INTERVAL,
        }
    }
}
