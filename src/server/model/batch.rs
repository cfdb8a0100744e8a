use crate::model::api::{BatchFailureDto, BatchResultDto};

/// One rejected batch item and the client-facing reason.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Position of the item in the request body.
    pub index: usize,
    pub error: String,
}

/// Items of a batch request split by outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub successful: Vec<T>,
    pub failed: Vec<BatchFailure>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            successful: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Converts the successful items with `f` and adds the counts.
    pub fn into_dto<U, F>(self, f: F) -> BatchResultDto<U>
    where
        F: FnMut(T) -> U,
    {
        let total = self.total();
        let success_count = self.successful.len();
        let failure_count = self.failed.len();

        BatchResultDto {
            successful: self.successful.into_iter().map(f).collect(),
            failed: self
                .failed
                .into_iter()
                .map(|failure| BatchFailureDto {
                    index: failure.index,
                    error: failure.error,
                })
                .collect(),
            total,
            success_count,
            failure_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_both_sides() {
        let outcome = BatchOutcome {
            successful: vec![1, 2],
            failed: vec![BatchFailure {
                index: 1,
                error: "latitude: must be between -90 and 90".to_string(),
            }],
        };

        let dto = outcome.into_dto(|n| n * 10);
        assert_eq!(dto.successful, vec![10, 20]);
        assert_eq!(dto.total, 3);
        assert_eq!(dto.failure_count, 1);
        assert_eq!(dto.failed[0].index, 1);
    }
}
