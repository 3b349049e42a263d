//! Affine-gap Smith-Waterman scoring in anti-diagonal order.
//!
//! For 1-based cell `(i, j)`:
//!
//! ```text
//! P[i][j] = max(P[i-1][j] + gap_ext, D[i-1][j] + gap_open + gap_ext)
//! Q[i][j] = max(Q[i][j-1] + gap_ext, D[i][j-1] + gap_open + gap_ext)
//! D[i][j] = max(0, D[i-1][j-1] + s(T[i-1], Db[j-1]), P[i][j], Q[i][j])
//! ```
//!
//! Row 0, column 0 and every cell touching a sentinel code hold `D = 0` and
//! `P = Q = NEG_INF`. A cell on diagonal `k` reads `P`/`Q`/`D` from diagonal
//! `k - 1` and `D` from diagonal `k - 2` only, so the cells of one diagonal can
//! be written in any order, or concurrently. State is indexed by database
//! column and lives in three slots per matrix, slot `k % 3` being written.

use log::trace;
use rayon::prelude::*;

use crate::config::PerformanceConfig;
use crate::encoding::{AlignmentPair, EncodedSequence};
use crate::scoring::{AlignmentScore, AlignmentStats, ScoreParams};
use crate::wavefront::{DiagonalSchedule, DiagonalStep};
use crate::{check_max_dim, AlignerError, AlignerParameters};

/// Stand-in for minus infinity. Far enough from `i32::MIN` that adding any
/// valid penalty cannot wrap.
pub const NEG_INF: i32 = i32::MIN / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    d: i32,
    p: i32,
    q: i32,
}

const BOUNDARY: Cell = Cell {
    d: 0,
    p: NEG_INF,
    q: NEG_INF,
};

/// Read-only view of the two diagonals preceding the one being written.
struct Prior<'a> {
    d1: &'a [i32],
    p1: &'a [i32],
    q1: &'a [i32],
    d2: &'a [i32],
}

#[inline]
fn relax(scoring: &ScoreParams, t: u8, db: u8, row: usize, col: usize, prior: &Prior<'_>) -> Cell {
    let Some(substitution) = scoring.substitution(t, db) else {
        return BOUNDARY;
    };

    let (up_d, up_p) = if row > 0 {
        (prior.d1[col], prior.p1[col])
    } else {
        (BOUNDARY.d, BOUNDARY.p)
    };
    let (left_d, left_q) = if col > 0 {
        (prior.d1[col - 1], prior.q1[col - 1])
    } else {
        (BOUNDARY.d, BOUNDARY.q)
    };
    let diag_d = if row > 0 && col > 0 {
        prior.d2[col - 1]
    } else {
        BOUNDARY.d
    };

    let gap_first = scoring.gap_first();
    let p = (up_p + scoring.gap_ext).max(up_d + gap_first);
    let q = (left_q + scoring.gap_ext).max(left_d + gap_first);
    let d = (diag_d + substitution).max(0).max(p).max(q);
    Cell { d, p, q }
}

/// Splits a 3-slot ring into (written, one back, two back) for `diagonal`.
fn ring<T>(slots: &mut [T; 3], diagonal: usize) -> (&mut T, &T, &T) {
    let [s0, s1, s2] = slots;
    match diagonal % 3 {
        0 => (s0, s2, s1),
        1 => (s1, s0, s2),
        _ => (s2, s1, s0),
    }
}

/// D/P/Q state for three consecutive diagonals of one alignment.
struct DiagonalBuffers {
    d: [Vec<i32>; 3],
    p: [Vec<i32>; 3],
    q: [Vec<i32>; 3],
}

impl DiagonalBuffers {
    fn new(max_dim: usize) -> Self {
        let zeros = || vec![BOUNDARY.d; max_dim];
        let neg = || vec![NEG_INF; max_dim];
        Self {
            d: [zeros(), zeros(), zeros()],
            p: [neg(), neg(), neg()],
            q: [neg(), neg(), neg()],
        }
    }

    /// Writes every live cell of `step` and returns the best `D` among them.
    /// All writes have landed when this returns, so the next diagonal can
    /// safely read them.
    fn evaluate<F>(&mut self, step: &DiagonalStep, split: bool, cell: F) -> i32
    where
        F: Fn(usize, usize, &Prior<'_>) -> Cell + Sync,
    {
        let (d_cur, d1, d2) = ring(&mut self.d, step.index);
        let (p_cur, p1, _) = ring(&mut self.p, step.index);
        let (q_cur, q1, _) = ring(&mut self.q, step.index);
        let prior = Prior { d1, p1, q1, d2 };

        let live = step.database_cursor..step.database_cursor + step.diag_len;
        let write = |(j, ((d, p), q)): (usize, ((&mut i32, &mut i32), &mut i32))| {
            let out = cell(step.target_cursor - j, step.database_cursor + j, &prior);
            *d = out.d;
            *p = out.p;
            *q = out.q;
            out.d
        };

        let best = if split {
            d_cur[live.clone()]
                .par_iter_mut()
                .zip(p_cur[live.clone()].par_iter_mut())
                .zip(q_cur[live].par_iter_mut())
                .enumerate()
                .map(write)
                .max()
        } else {
            d_cur[live.clone()]
                .iter_mut()
                .zip(p_cur[live.clone()].iter_mut())
                .zip(q_cur[live].iter_mut())
                .enumerate()
                .map(write)
                .max()
        };
        best.unwrap_or(0)
    }
}

/// Scores one pair at a time; cheap to clone, one per lane.
#[derive(Debug, Clone)]
pub struct WavefrontEngine {
    scoring: ScoreParams,
    max_dim: usize,
    performance: PerformanceConfig,
}

impl WavefrontEngine {
    pub fn new(scoring: ScoreParams, max_dim: usize) -> Result<Self, AlignerError> {
        scoring.validate()?;
        check_max_dim(max_dim)?;
        Ok(Self {
            scoring,
            max_dim,
            performance: PerformanceConfig::default(),
        })
    }

    pub fn from_parameters(params: &AlignerParameters) -> Result<Self, AlignerError> {
        Ok(Self::new(params.scoring(), params.max_dim())?.with_performance(params.performance()))
    }

    pub fn with_performance(mut self, performance: PerformanceConfig) -> Self {
        self.performance = performance;
        self
    }

    pub fn scoring(&self) -> ScoreParams {
        self.scoring
    }

    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Best local alignment score of `pair` over the real residues.
    pub fn score(&self, pair: &AlignmentPair) -> Result<AlignmentScore, AlignerError> {
        self.score_extent(&pair.target, pair.len_t(), &pair.database, pair.len_d())
    }

    /// Scores the leading `len_t x len_d` block of the two code arrays.
    ///
    /// The extents may reach into the sentinel padding; padded cells are
    /// boundary cells and never raise the score.
    pub fn score_extent(
        &self,
        target: &EncodedSequence,
        len_t: usize,
        database: &EncodedSequence,
        len_d: usize,
    ) -> Result<AlignmentScore, AlignerError> {
        self.check_extent(len_t, target)?;
        self.check_extent(len_d, database)?;

        let target = target.codes();
        let database = database.codes();
        let scoring = &self.scoring;

        let mut buffers = DiagonalBuffers::new(self.max_dim);
        let schedule = DiagonalSchedule::new(len_t, len_d);
        let diagonals = schedule.total();
        let mut max_score = 0;

        for step in schedule {
            let split = self.performance.split_diagonal(step.diag_len);
            let best = buffers.evaluate(&step, split, |row, col, prior| {
                relax(scoring, target[row], database[col], row, col, prior)
            });
            max_score = max_score.max(best);
        }

        trace!("scored {len_t}x{len_d} over {diagonals} diagonals: {max_score}");

        Ok(AlignmentScore {
            score: max_score as u32,
            statistics: AlignmentStats {
                cells: (len_t * len_d) as u64,
                diagonals,
            },
        })
    }

    fn check_extent(&self, length: usize, seq: &EncodedSequence) -> Result<(), AlignerError> {
        let max_dim = self.max_dim.min(seq.max_dim());
        if length == 0 || length > max_dim {
            return Err(AlignerError::InvalidLength { length, max_dim });
        }
        Ok(())
    }
}
