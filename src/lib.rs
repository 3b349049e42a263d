//! Smith-Waterman local alignment scores for batches of short sequence pairs.
//!
//! Each pair is scored by a [`WavefrontEngine`], which evaluates the affine-gap
//! (Gotoh) recurrence one anti-diagonal at a time and keeps only three
//! diagonals of state alive. A [`LaneScheduler`] spreads a batch over a fixed
//! number of lanes and returns one result per pair, in submission order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod collector;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod multi_lane;
pub mod partition;
pub mod scoring;
pub mod wavefront;

pub use crate::collector::ScoreCollector;
pub use crate::config::{Parallelism, PerformanceConfig};
pub use crate::encoding::{AlignmentPair, EncodedSequence, SENTINEL};
pub use crate::engine::WavefrontEngine;
pub use crate::multi_lane::{BatchResult, LaneScheduler};
pub use crate::partition::LanePartition;
pub use crate::scoring::{AlignmentScore, AlignmentStats, BatchStats, ScoreParams};
pub use crate::wavefront::{DiagonalSchedule, DiagonalStep};

/// Residues per sequence in the default configuration.
pub const SEQ_SIZE: usize = 150;
/// Sentinel codes appended after the longest supported sequence.
pub const PADDING_SIZE: usize = 8;
pub const DEFAULT_MAX_DIM: usize = SEQ_SIZE + PADDING_SIZE;
pub const MAX_SUPPORTED_DIM: usize = 1 << 14;

pub const DEFAULT_LANES: usize = 8;
pub const MAX_LANES: usize = 512;

// DNA scoring parameters. Gap values are penalties and therefore negative.
pub const DNA_MATCH: i32 = 1;
pub const DNA_MISMATCH: i32 = -1;
pub const DNA_GAP_OPEN: i32 = -3;
pub const DNA_GAP_EXT: i32 = -1;
pub const DNA_GAP_FIRST: i32 = DNA_GAP_OPEN + DNA_GAP_EXT;

/// Bound on the magnitude of every scoring parameter, so that
/// `MAX_SUPPORTED_DIM * SCORE_LIMIT` and `NEG_INF - SCORE_LIMIT` stay in `i32`.
pub const SCORE_LIMIT: i32 = 1 << 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignerError {
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
    #[error("invalid sequence length {length} (supported: 1..={max_dim})")]
    InvalidLength { length: usize, max_dim: usize },
    #[error("lane assignment violated: {0}")]
    LaneAssignment(String),
    #[error("invalid scoring configuration: {0}")]
    InvalidScoring(String),
    #[error("invalid lane count {0} (supported: 1..={max})", max = MAX_LANES)]
    InvalidLanes(usize),
    #[error("invalid maximum sequence dimension {0} (supported: 1..={max})", max = MAX_SUPPORTED_DIM)]
    InvalidMaxDim(usize),
    #[error("lane {0} is no longer accepting work")]
    LaneDisconnected(usize),
}

/// Batch-level configuration: lane fan-out, sequence dimension and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerParameters {
    lanes: usize,
    max_dim: usize,
    partition: LanePartition,
    scoring: ScoreParams,
    performance: PerformanceConfig,
}

impl Default for AlignerParameters {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
            max_dim: DEFAULT_MAX_DIM,
            partition: LanePartition::default(),
            scoring: ScoreParams::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl AlignerParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lanes(mut self, lanes: usize) -> Result<Self, AlignerError> {
        check_lanes(lanes)?;
        self.lanes = lanes;
        Ok(self)
    }

    pub fn with_max_dim(mut self, max_dim: usize) -> Result<Self, AlignerError> {
        check_max_dim(max_dim)?;
        self.max_dim = max_dim;
        Ok(self)
    }

    pub fn with_scoring(mut self, scoring: ScoreParams) -> Result<Self, AlignerError> {
        scoring.validate()?;
        self.scoring = scoring;
        Ok(self)
    }

    pub fn with_partition(mut self, partition: LanePartition) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_performance(mut self, performance: PerformanceConfig) -> Self {
        self.performance = performance;
        self
    }

    /// Re-checks every invariant; needed after deserialization, which bypasses
    /// the `with_*` checks.
    pub fn validate(&self) -> Result<(), AlignerError> {
        check_lanes(self.lanes)?;
        check_max_dim(self.max_dim)?;
        self.scoring.validate()
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    pub fn partition(&self) -> LanePartition {
        self.partition
    }

    pub fn scoring(&self) -> ScoreParams {
        self.scoring
    }

    pub fn performance(&self) -> PerformanceConfig {
        self.performance
    }
}

fn check_lanes(lanes: usize) -> Result<(), AlignerError> {
    if lanes == 0 || lanes > MAX_LANES {
        return Err(AlignerError::InvalidLanes(lanes));
    }
    Ok(())
}

fn check_max_dim(max_dim: usize) -> Result<(), AlignerError> {
    if max_dim == 0 || max_dim > MAX_SUPPORTED_DIM {
        return Err(AlignerError::InvalidMaxDim(max_dim));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = AlignerParameters::new();
        assert!(params.validate().is_ok());
        assert_eq!(params.lanes(), DEFAULT_LANES);
        assert_eq!(params.max_dim(), 158);
        assert_eq!(params.scoring().gap_first(), DNA_GAP_FIRST);
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        assert_eq!(
            AlignerParameters::new().with_lanes(0).unwrap_err(),
            AlignerError::InvalidLanes(0)
        );
        assert_eq!(
            AlignerParameters::new().with_lanes(MAX_LANES + 1).unwrap_err(),
            AlignerError::InvalidLanes(MAX_LANES + 1)
        );
        assert_eq!(
            AlignerParameters::new().with_max_dim(0).unwrap_err(),
            AlignerError::InvalidMaxDim(0)
        );
        assert!(AlignerParameters::new()
            .with_scoring(ScoreParams::new(0, -1, -2, -1))
            .is_err());
    }

    #[test]
    fn builder_chains() {
        let params = AlignerParameters::new()
            .with_lanes(3)
            .and_then(|p| p.with_max_dim(32))
            .map(|p| p.with_partition(LanePartition::Block))
            .unwrap();
        assert_eq!(params.lanes(), 3);
        assert_eq!(params.max_dim(), 32);
        assert_eq!(params.partition(), LanePartition::Block);
    }
}
