//! Anti-diagonal traversal of a `len_t x len_d` DP matrix.
//!
//! Cell `(r, c)` (0-based target row, database column) lies on diagonal
//! `k = r + c`. The live cells of diagonal `k` are
//!
//! ```text
//! (target_cursor - j, database_cursor + j)    for j in 0..diag_len
//! ```
//!
//! `diag_len` grows by one per diagonal up to `min(len_t, len_d)`, holds that
//! value for `|len_t - len_d| + 1` diagonals and then shrinks back to one.
//! Everything here depends only on the two lengths and the diagonal index.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalStep {
    pub index: usize,
    pub diag_len: usize,
    /// Database column of the first live cell.
    pub database_cursor: usize,
    /// Target row of the first live cell.
    pub target_cursor: usize,
    /// Plateau diagonals still to come after this one.
    pub repeat: usize,
}

impl DiagonalStep {
    /// Closed form of the step at diagonal `index`, `None` past the last one.
    pub fn at(len_t: usize, len_d: usize, index: usize) -> Option<Self> {
        if len_t == 0 || len_d == 0 || index >= len_t + len_d - 1 {
            return None;
        }
        let short = len_t.min(len_d);
        let long = len_t.max(len_d);
        let diag_len = (index + 1).min(short).min(len_t + len_d - 1 - index);
        let repeat = if index + 1 < short {
            long - short + 1
        } else {
            (long - 1).saturating_sub(index)
        };
        let database_cursor = (index + 1).saturating_sub(len_t);
        Some(Self {
            index,
            diag_len,
            database_cursor,
            target_cursor: index - database_cursor,
            repeat,
        })
    }

    /// Live cells as `(row, column)` pairs, in evaluation order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.diag_len).map(move |j| (self.target_cursor - j, self.database_cursor + j))
    }
}

/// Walks the diagonals incrementally with a grow / plateau / shrink counter.
#[derive(Debug, Clone)]
pub struct DiagonalSchedule {
    len_t: usize,
    total: usize,
    max_diag_len: usize,
    index: usize,
    diag_len: usize,
    database_cursor: usize,
    repeat: usize,
}

impl DiagonalSchedule {
    pub fn new(len_t: usize, len_d: usize) -> Self {
        let total = if len_t == 0 || len_d == 0 {
            0
        } else {
            len_t + len_d - 1
        };
        Self {
            len_t,
            total,
            max_diag_len: len_t.min(len_d),
            index: 0,
            diag_len: 0,
            database_cursor: 0,
            repeat: len_t.abs_diff(len_d) + 1,
        }
    }

    /// Number of diagonals the schedule yields in total.
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for DiagonalSchedule {
    type Item = DiagonalStep;

    fn next(&mut self) -> Option<DiagonalStep> {
        if self.index >= self.total {
            return None;
        }

        if self.repeat > 0 {
            if self.diag_len < self.max_diag_len {
                self.diag_len += 1;
            }
            if self.diag_len == self.max_diag_len {
                self.repeat -= 1;
            }
        } else {
            self.diag_len -= 1;
        }

        if self.index >= self.len_t {
            self.database_cursor += 1;
        }

        let step = DiagonalStep {
            index: self.index,
            diag_len: self.diag_len,
            database_cursor: self.database_cursor,
            target_cursor: self.index - self.database_cursor,
            repeat: self.repeat,
        };
        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DiagonalSchedule {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(len_t: usize, len_d: usize) -> Vec<usize> {
        DiagonalSchedule::new(len_t, len_d).map(|s| s.diag_len).collect()
    }

    #[test]
    fn trapezoid_shapes() {
        assert_eq!(lengths(3, 3), vec![1, 2, 3, 2, 1]);
        assert_eq!(lengths(2, 4), vec![1, 2, 2, 2, 1]);
        assert_eq!(lengths(4, 2), vec![1, 2, 2, 2, 1]);
        assert_eq!(lengths(1, 3), vec![1, 1, 1]);
        assert_eq!(lengths(1, 1), vec![1]);
        assert!(lengths(0, 5).is_empty());
    }

    #[test]
    fn plateau_length_matches_length_difference() {
        for (len_t, len_d) in [(3, 3), (8, 4), (4, 8), (1, 6), (5, 2)] {
            let short = usize::min(len_t, len_d);
            let plateau = lengths(len_t, len_d)
                .into_iter()
                .filter(|&l| l == short)
                .count();
            assert_eq!(plateau, len_t.abs_diff(len_d) + 1, "{len_t}x{len_d}");
        }
    }

    #[test]
    fn incremental_matches_closed_form() {
        for len_t in 1..=12 {
            for len_d in 1..=12 {
                let schedule = DiagonalSchedule::new(len_t, len_d);
                assert_eq!(schedule.len(), len_t + len_d - 1);
                for step in schedule {
                    assert_eq!(Some(step), DiagonalStep::at(len_t, len_d, step.index));
                }
                assert_eq!(DiagonalStep::at(len_t, len_d, len_t + len_d - 1), None);
            }
        }
    }

    #[test]
    fn every_cell_visited_once() {
        for (len_t, len_d) in [(1, 1), (3, 7), (7, 3), (5, 5), (9, 2)] {
            let mut seen = vec![vec![0u8; len_d]; len_t];
            for step in DiagonalSchedule::new(len_t, len_d) {
                for (r, c) in step.cells() {
                    assert_eq!(r + c, step.index);
                    seen[r][c] += 1;
                }
            }
            assert!(seen.iter().flatten().all(|&n| n == 1), "{len_t}x{len_d}");
        }
    }

    #[test]
    fn cursors_on_tall_matrix() {
        let steps: Vec<_> = DiagonalSchedule::new(3, 2).collect();
        let cursors: Vec<_> = steps
            .iter()
            .map(|s| (s.target_cursor, s.database_cursor))
            .collect();
        assert_eq!(cursors, vec![(0, 0), (1, 0), (2, 0), (2, 1)]);
    }
}
