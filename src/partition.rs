use serde::{Deserialize, Serialize};

use crate::AlignerError;

/// Strategy for spreading pair indices over lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanePartition {
    /// Pair `i` goes to lane `i % lanes`.
    #[default]
    RoundRobin,
    /// Contiguous runs of `ceil(pairs / lanes)` pairs per lane.
    Block,
}

/// Cycles through lane ids.
struct LaneCursor {
    lanes: usize,
    current: usize,
}

impl LaneCursor {
    fn new(lanes: usize) -> Self {
        Self { lanes, current: 0 }
    }

    fn next_lane(&mut self) -> usize {
        let lane = self.current;
        self.current = if self.current + 1 < self.lanes {
            self.current + 1
        } else {
            0
        };
        lane
    }
}

impl LanePartition {
    /// Builds the per-lane index lists for a batch of `pairs`.
    pub fn assign(self, pairs: usize, lanes: usize) -> Result<Vec<Vec<usize>>, AlignerError> {
        if lanes == 0 {
            return Err(AlignerError::InvalidLanes(lanes));
        }

        let mut plan = vec![Vec::with_capacity(pairs / lanes + 1); lanes];
        match self {
            LanePartition::RoundRobin => {
                let mut cursor = LaneCursor::new(lanes);
                for index in 0..pairs {
                    plan[cursor.next_lane()].push(index);
                }
            }
            LanePartition::Block => {
                let chunk = pairs.div_ceil(lanes).max(1);
                for index in 0..pairs {
                    plan[index / chunk].push(index);
                }
            }
        }
        Ok(plan)
    }
}

/// Checks that `plan` hands out every index below `pairs` exactly once.
pub fn verify_assignment(plan: &[Vec<usize>], pairs: usize) -> Result<(), AlignerError> {
    let mut seen = vec![false; pairs];
    for (lane, indices) in plan.iter().enumerate() {
        for &index in indices {
            match seen.get_mut(index) {
                None => {
                    return Err(AlignerError::LaneAssignment(format!(
                        "lane {lane} was given pair {index} of a {pairs}-pair batch"
                    )))
                }
                Some(true) => {
                    return Err(AlignerError::LaneAssignment(format!(
                        "pair {index} assigned twice (again on lane {lane})"
                    )))
                }
                Some(slot) => *slot = true,
            }
        }
    }
    if let Some(index) = seen.iter().position(|&s| !s) {
        return Err(AlignerError::LaneAssignment(format!(
            "pair {index} not assigned to any lane"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_five_over_two() {
        let plan = LanePartition::RoundRobin.assign(5, 2).unwrap();
        assert_eq!(plan, vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn block_five_over_two() {
        let plan = LanePartition::Block.assign(5, 2).unwrap();
        assert_eq!(plan, vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn more_lanes_than_pairs() {
        for partition in [LanePartition::RoundRobin, LanePartition::Block] {
            let plan = partition.assign(3, 8).unwrap();
            assert_eq!(plan.len(), 8);
            assert!(verify_assignment(&plan, 3).is_ok());
        }
    }

    #[test]
    fn every_plan_covers_the_batch() {
        for partition in [LanePartition::RoundRobin, LanePartition::Block] {
            for pairs in 0..40 {
                for lanes in 1..10 {
                    let plan = partition.assign(pairs, lanes).unwrap();
                    assert_eq!(plan.len(), lanes);
                    verify_assignment(&plan, pairs).unwrap();
                }
            }
        }
    }

    #[test]
    fn zero_lanes_rejected() {
        assert_eq!(
            LanePartition::Block.assign(4, 0).unwrap_err(),
            AlignerError::InvalidLanes(0)
        );
    }

    #[test]
    fn verify_catches_broken_plans() {
        assert!(matches!(
            verify_assignment(&[vec![0, 1], vec![1]], 2),
            Err(AlignerError::LaneAssignment(_))
        ));
        assert!(matches!(
            verify_assignment(&[vec![0], vec![2]], 3),
            Err(AlignerError::LaneAssignment(_))
        ));
        assert!(matches!(
            verify_assignment(&[vec![0, 5]], 2),
            Err(AlignerError::LaneAssignment(_))
        ));
    }
}
