//! Speed schedules.
//!
//! A schedule is the user-facing description of which speeds to solve. It
//! expands into the ordered velocity list of a [`SweepRequest`](crate::SweepRequest).

use crate::error::{SweepError, SweepResult};
use ph_core::linspace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper limit on the number of speeds a schedule may expand to.
pub const MAX_SCHEDULE_POINTS: usize = 10_000;

fn too_many(count: f64) -> SweepError {
    SweepError::InvalidSchedule(format!(
        "schedule expands to {count} speeds, more than {MAX_SCHEDULE_POINTS}"
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpeedSchedule {
    /// Explicit list, solved in the given order
    Discrete { values: Vec<f64> },
    /// `start, start + step, ...` up to `end` (inclusive within `0.001 * step`)
    Stepped { start: f64, end: f64, step: f64 },
    /// `points` evenly spaced speeds with exact endpoints
    Linear { start: f64, end: f64, points: usize },
}

impl SpeedSchedule {
    /// Parse a comma-separated list such as `"5.2, 7.8,10"`. Empty items are skipped.
    pub fn parse_discrete(text: &str) -> SweepResult<Self> {
        let values = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<f64>().map_err(|_| SweepError::Parse {
                    item: item.to_string(),
                })
            })
            .collect::<SweepResult<Vec<_>>>()?;
        Ok(Self::Discrete { values })
    }

    /// Expand into velocities (m/s) in solve order.
    pub fn velocities(&self) -> SweepResult<Vec<f64>> {
        match *self {
            Self::Discrete { ref values } => Ok(values.clone()),
            Self::Stepped { start, end, step } => {
                if !start.is_finite() || !end.is_finite() || !step.is_finite() {
                    return Err(SweepError::InvalidSchedule(
                        "stepped bounds must be finite".to_string(),
                    ));
                }
                if step <= 0.0 {
                    return Ok(vec![start]);
                }
                let count = ((end + step * 0.001 - start) / step).ceil();
                if !count.is_finite() {
                    return Err(SweepError::InvalidSchedule(format!(
                        "stepped schedule {start}..{end} by {step} has no finite length"
                    )));
                }
                if count > MAX_SCHEDULE_POINTS as f64 {
                    return Err(too_many(count));
                }
                let count = count.max(0.0) as usize;
                Ok((0..count).map(|i| start + i as f64 * step).collect())
            }
            Self::Linear { start, end, points } => {
                if points == 0 {
                    return Err(SweepError::InvalidSchedule(
                        "linear schedule needs at least one point".to_string(),
                    ));
                }
                if points > MAX_SCHEDULE_POINTS {
                    return Err(too_many(points as f64));
                }
                Ok(linspace(start, end, points))
            }
        }
    }
}

impl fmt::Display for SpeedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete { values } => write!(f, "{} discrete speeds", values.len()),
            Self::Stepped { start, end, step } => {
                write!(f, "{start} to {end} m/s in steps of {step}")
            }
            Self::Linear { start, end, points } => {
                write!(f, "{start} to {end} m/s ({points} points)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_discrete_list() {
        let schedule = SpeedSchedule::parse_discrete(" 5.2267, 7.8844,,10 ").unwrap();
        assert_eq!(schedule.velocities().unwrap(), vec![5.2267, 7.8844, 10.0]);
    }

    #[test]
    fn rejects_bad_item() {
        let err = SpeedSchedule::parse_discrete("5, fast").unwrap_err();
        assert_eq!(
            err,
            SweepError::Parse {
                item: "fast".to_string()
            }
        );
    }

    #[test]
    fn stepped_includes_end() {
        let v = SpeedSchedule::Stepped {
            start: 2.0,
            end: 3.0,
            step: 0.5,
        }
        .velocities()
        .unwrap();
        assert_eq!(v, vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn stepped_with_non_positive_step_is_single_point() {
        let v = SpeedSchedule::Stepped {
            start: 4.0,
            end: 10.0,
            step: 0.0,
        }
        .velocities()
        .unwrap();
        assert_eq!(v, vec![4.0]);
    }

    #[test]
    fn stepped_with_tiny_step_is_rejected() {
        let err = SpeedSchedule::Stepped {
            start: 5.0,
            end: 10.0,
            step: 1e-17,
        }
        .velocities()
        .unwrap_err();
        assert!(matches!(err, SweepError::InvalidSchedule(_)));
    }

    #[test]
    fn stepped_at_the_point_limit_is_accepted() {
        let v = SpeedSchedule::Stepped {
            start: 0.0,
            end: (MAX_SCHEDULE_POINTS - 1) as f64,
            step: 1.0,
        }
        .velocities()
        .unwrap();
        assert_eq!(v.len(), MAX_SCHEDULE_POINTS);
    }

    #[test]
    fn stepped_past_end_is_empty() {
        let v = SpeedSchedule::Stepped {
            start: 10.0,
            end: 5.0,
            step: 1.0,
        }
        .velocities()
        .unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn linear_with_too_many_points_is_rejected() {
        let err = SpeedSchedule::Linear {
            start: 5.0,
            end: 10.0,
            points: MAX_SCHEDULE_POINTS + 1,
        }
        .velocities()
        .unwrap_err();
        assert!(matches!(err, SweepError::InvalidSchedule(_)));
    }

    #[test]
    fn linear_has_exact_endpoints() {
        let v = SpeedSchedule::Linear {
            start: 5.0,
            end: 15.0,
            points: 5,
        }
        .velocities()
        .unwrap();
        assert_eq!(v, vec![5.0, 7.5, 10.0, 12.5, 15.0]);
    }

    #[test]
    fn serde_tag_matches_project_format() {
        let json = r#"{"type":"stepped","start":1.0,"end":2.0,"step":0.5}"#;
        let schedule: SpeedSchedule = serde_json::from_str(json).unwrap();
        assert!(matches!(schedule, SpeedSchedule::Stepped { .. }));
    }

    proptest! {
        #[test]
        fn stepped_is_increasing_and_bounded(
            start in 0.0f64..20.0,
            span in 0.0f64..30.0,
            step in 0.05f64..3.0,
        ) {
            let end = start + span;
            let v = SpeedSchedule::Stepped { start, end, step }.velocities().unwrap();
            prop_assert!(!v.is_empty());
            prop_assert_eq!(v[0], start);
            prop_assert!(v.windows(2).all(|w| w[1] > w[0]));
            prop_assert!(*v.last().unwrap() < end + step * 0.001);
        }
    }
}
