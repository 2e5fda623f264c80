use crate::error::{SweepError, SweepResult};
use crate::schedule::SpeedSchedule;

/// Ordered velocities (m/s) to solve. Order is preserved, never sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRequest {
    velocities: Vec<f64>,
}

impl SweepRequest {
    /// Every velocity must be finite and non-negative. Speeds at or below the
    /// solver's degenerate threshold are accepted here and reported per point.
    pub fn new(velocities: Vec<f64>) -> SweepResult<Self> {
        for (index, &value) in velocities.iter().enumerate() {
            if !value.is_finite() {
                return Err(SweepError::InvalidVelocity {
                    index,
                    value,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(SweepError::InvalidVelocity {
                    index,
                    value,
                    reason: "must be >= 0",
                });
            }
        }
        Ok(Self { velocities })
    }

    pub fn from_schedule(schedule: &SpeedSchedule) -> SweepResult<Self> {
        Self::new(schedule.velocities()?)
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_order() {
        let request = SweepRequest::new(vec![10.0, 5.0, 0.0, 7.5]).unwrap();
        assert_eq!(request.velocities(), &[10.0, 5.0, 0.0, 7.5]);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(matches!(
            SweepRequest::new(vec![1.0, -0.5]),
            Err(SweepError::InvalidVelocity { index: 1, .. })
        ));
        assert!(matches!(
            SweepRequest::new(vec![f64::NAN]),
            Err(SweepError::InvalidVelocity { index: 0, .. })
        ));
    }
}
