use std::env;
use std::num::NonZeroUsize;
use std::thread;

use crate::error::OthelloError;

pub const THREADS_VAR: &str = "BITHELLO_THREADS";
pub const SEED_VAR: &str = "BITHELLO_SEED";

/// Search settings, fixed when a player is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub threads: usize,
    /// Base seed for worker RNGs; `None` draws a fresh one per search.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            threads: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by `BITHELLO_THREADS` and `BITHELLO_SEED`.
    pub fn from_env() -> Result<Self, OthelloError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OthelloError> {
        let mut config = SearchConfig::default();

        if let Some(raw) = lookup(THREADS_VAR) {
            let threads = raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|e| OthelloError::InvalidConfig(format!("{THREADS_VAR}={raw:?}: {e}")))?;
            config.threads = threads.get();
        }

        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| OthelloError::InvalidConfig(format!("{SEED_VAR}={raw:?}: {e}")))?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
