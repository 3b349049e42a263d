use serde::{Deserialize, Serialize};

/// How the live cells of one diagonal are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Fan the cells of long diagonals out over the rayon pool.
    Rayon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub parallelism: Parallelism,
    /// Shortest diagonal worth splitting across threads.
    pub parallel_threshold: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::Sequential,
            parallel_threshold: 64,
        }
    }
}

impl PerformanceConfig {
    pub fn rayon(parallel_threshold: usize) -> Self {
        Self {
            parallelism: Parallelism::Rayon,
            parallel_threshold,
        }
    }

    #[inline]
    pub(crate) fn split_diagonal(&self, diag_len: usize) -> bool {
        self.parallelism == Parallelism::Rayon && diag_len >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_long_diagonals_are_split() {
        let config = PerformanceConfig::rayon(16);
        assert!(!config.split_diagonal(15));
        assert!(config.split_diagonal(16));
        assert!(!PerformanceConfig::default().split_diagonal(10_000));
    }
}
