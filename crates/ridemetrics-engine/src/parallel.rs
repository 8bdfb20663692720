//! Parallel execution heuristics
//!
//! Partitions are independent, so a run with enough of them is spread over
//! the rayon pool. The partition-count threshold is chosen once from the
//! available threads:
//! - 1 thread: never parallelize
//! - 2-3 threads: 64 partitions
//! - 4-7 threads: 16 partitions
//! - 8+ threads: 8 partitions
//!
//! `RIDEMETRICS_PARALLEL_THRESHOLD` overrides the detected value with a
//! number, or with `max`/`disabled` to turn parallelism off.
//!
//! Only compiled when the `parallel` feature is enabled.

use std::sync::OnceLock;

static PARALLEL_CONFIG: OnceLock<ParallelConfig> = OnceLock::new();

const THRESHOLD_ENV: &str = "RIDEMETRICS_PARALLEL_THRESHOLD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of threads available (from rayon)
    pub num_threads: usize,
    /// Minimum partition count for parallel evaluation
    pub partition_threshold: usize,
}

impl ParallelConfig {
    /// Get or initialize the global parallel configuration
    pub fn global() -> &'static ParallelConfig {
        PARALLEL_CONFIG.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        let num_threads = rayon::current_num_threads();

        let partition_threshold = match std::env::var(THRESHOLD_ENV) {
            Ok(value) => Self::parse_threshold_override(&value)
                .unwrap_or_else(|| Self::threshold_for_hardware(num_threads)),
            Err(_) => Self::threshold_for_hardware(num_threads),
        };

        log::debug!(
            "Parallel partition threshold {} on {} threads",
            partition_threshold,
            num_threads
        );

        ParallelConfig { num_threads, partition_threshold }
    }

    /// Parse the override; `None` for unrecognized input
    fn parse_threshold_override(value: &str) -> Option<usize> {
        let value = value.trim().to_lowercase();
        if value == "max" || value == "disabled" {
            Some(usize::MAX)
        } else {
            value.parse().ok()
        }
    }

    fn threshold_for_hardware(num_threads: usize) -> usize {
        match num_threads {
            0 | 1 => usize::MAX,
            2..=3 => 64,
            4..=7 => 16,
            _ => 8,
        }
    }

    pub fn should_parallelize(&self, partition_count: usize) -> bool {
        partition_count >= self.partition_threshold
    }
}
