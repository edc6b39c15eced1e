//! Size bound applied to the conversation after every append.

use serde::{Deserialize, Serialize};

/// Default character threshold for the recent conversation.
pub const DEFAULT_CHAR_LIMIT: usize = 4_000;
/// Default number of oldest messages removed per pruning round.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Pruning policy: while the recent conversation holds at least `char_limit`
/// characters, drop the `batch_size` oldest messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningPolicy {
    pub char_limit: usize,
    pub batch_size: usize,
}

impl Default for PruningPolicy {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PruningPolicy {
    pub fn new(char_limit: usize, batch_size: usize) -> Self {
        Self {
            char_limit,
            batch_size,
        }
    }

    /// Whether a recent-conversation length violates the bound.
    pub fn exceeded_by(&self, chars: usize) -> bool {
        chars >= self.char_limit
    }
}
