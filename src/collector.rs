use crate::AlignerError;

/// Fan-in point for lane output. Results land in the slot of their pair index,
/// so completion order across lanes does not matter.
#[derive(Debug)]
pub struct ScoreCollector<T> {
    slots: Vec<Option<T>>,
    filled: usize,
}

impl<T> ScoreCollector<T> {
    pub fn new(pairs: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(pairs).collect(),
            filled: 0,
        }
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), AlignerError> {
        let pairs = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            AlignerError::LaneAssignment(format!(
                "result for pair {index} outside a {pairs}-pair batch"
            ))
        })?;
        if slot.is_some() {
            return Err(AlignerError::LaneAssignment(format!(
                "pair {index} scored twice"
            )));
        }
        *slot = Some(value);
        self.filled += 1;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Results in pair order. Fails if any pair never reported back.
    pub fn finish(self) -> Result<Vec<T>, AlignerError> {
        let pairs = self.slots.len();
        let mut out = Vec::with_capacity(pairs);
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(value) => out.push(value),
                None => {
                    return Err(AlignerError::LaneAssignment(format!(
                        "pair {index} of {pairs} was never scored"
                    )))
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_inserts_come_back_in_order() {
        let mut collector = ScoreCollector::new(4);
        for index in [3, 1, 0, 2] {
            collector.insert(index, index * 10).unwrap();
        }
        assert!(collector.is_complete());
        assert_eq!(collector.finish().unwrap(), vec![0, 10, 20, 30]);
    }

    #[test]
    fn duplicate_is_an_assignment_error() {
        let mut collector = ScoreCollector::new(2);
        collector.insert(1, 'a').unwrap();
        assert!(matches!(
            collector.insert(1, 'b'),
            Err(AlignerError::LaneAssignment(_))
        ));
    }

    #[test]
    fn out_of_range_is_an_assignment_error() {
        let mut collector = ScoreCollector::<u32>::new(2);
        assert!(matches!(
            collector.insert(2, 7),
            Err(AlignerError::LaneAssignment(_))
        ));
    }

    #[test]
    fn missing_slot_is_an_assignment_error() {
        let mut collector = ScoreCollector::new(3);
        collector.insert(0, ()).unwrap();
        collector.insert(2, ()).unwrap();
        assert!(!collector.is_complete());
        assert!(matches!(
            collector.finish(),
            Err(AlignerError::LaneAssignment(_))
        ));
    }

    #[test]
    fn empty_batch() {
        let collector = ScoreCollector::<i32>::new(0);
        assert!(collector.is_complete());
        assert!(collector.finish().unwrap().is_empty());
    }
}
