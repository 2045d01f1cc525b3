//! Chain configuration.

/// Configuration for a [`Chain`](crate::Chain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Entry capacity reserved for each new block.
    pub block_capacity: usize,
    /// Seal the open block once it holds this many entries (0 = never).
    pub max_entries_per_block: usize,
    /// Whether to validate salts and links when importing blocks.
    pub verify_on_import: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            block_capacity: 64,
            max_entries_per_block: 1024,
            verify_on_import: true,
        }
    }
}

impl ChainConfig {
    pub fn block_capacity(mut self, capacity: usize) -> Self {
        self.block_capacity = capacity;
        self
    }

    pub fn max_entries_per_block(mut self, max: usize) -> Self {
        self.max_entries_per_block = max;
        self
    }

    pub fn verify_on_import(mut self, verify: bool) -> Self {
        self.verify_on_import = verify;
        self
    }
}
