use serde::{Deserialize, Serialize};

use crate::encoding::SENTINEL;
use crate::{AlignerError, DNA_GAP_EXT, DNA_GAP_OPEN, DNA_MATCH, DNA_MISMATCH, SCORE_LIMIT};

/// The scoring tuple handed to every engine of a batch.
///
/// A newly opened gap costs `gap_open + gap_extend`; each further gap cell
/// costs `gap_extend`. Callers that think in terms of a single first-gap cost
/// must split it into these two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap_open: i32,
    pub gap_ext: i32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: DNA_MATCH,
            mismatch: DNA_MISMATCH,
            gap_open: DNA_GAP_OPEN,
            gap_ext: DNA_GAP_EXT,
        }
    }
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap_open: i32, gap_ext: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap_open,
            gap_ext,
        }
    }

    pub fn validate(&self) -> Result<(), AlignerError> {
        if self.match_score <= 0 {
            return Err(AlignerError::InvalidScoring(format!(
                "match score must be positive, got {}",
                self.match_score
            )));
        }
        if self.mismatch > 0 {
            return Err(AlignerError::InvalidScoring(format!(
                "mismatch score must not be positive, got {}",
                self.mismatch
            )));
        }
        if self.gap_open > 0 || self.gap_ext > 0 {
            return Err(AlignerError::InvalidScoring(format!(
                "gap penalties must not be positive, got open={} extend={}",
                self.gap_open, self.gap_ext
            )));
        }
        let largest = [self.match_score, self.mismatch, self.gap_open, self.gap_ext]
            .iter()
            .map(|v| v.unsigned_abs())
            .max()
            .unwrap_or(0);
        if largest > SCORE_LIMIT as u32 {
            return Err(AlignerError::InvalidScoring(format!(
                "parameter magnitude {} exceeds {}",
                largest, SCORE_LIMIT
            )));
        }
        Ok(())
    }

    /// Cost charged on the first cell of a gap run.
    #[inline]
    pub fn gap_first(&self) -> i32 {
        self.gap_open + self.gap_ext
    }

    /// Match/mismatch score for two symbol codes, or `None` when either side is
    /// padding.
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> Option<i32> {
        if a == SENTINEL || b == SENTINEL {
            None
        } else if a == b {
            Some(self.match_score)
        } else {
            Some(self.mismatch)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentScore {
    pub score: u32,
    pub statistics: AlignmentStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    /// DP cells evaluated (`len_t * len_d`).
    pub cells: u64,
    pub diagonals: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub pairs: usize,
    pub failed: usize,
    pub cells: u64,
    pub execution_time_ms: f32,
}

impl BatchStats {
    /// Giga cell updates per second over the whole batch.
    pub fn gcups(&self) -> f64 {
        if self.execution_time_ms <= 0.0 {
            return 0.0;
        }
        self.cells as f64 / (f64::from(self.execution_time_ms) * 1e-3) / 1e9
    }

    pub(crate) fn record(&mut self, result: &Result<AlignmentScore, AlignerError>) {
        self.pairs += 1;
        match result {
            Ok(score) => self.cells += score.statistics.cells,
            Err(_) => self.failed += 1,
        }
    }
}
