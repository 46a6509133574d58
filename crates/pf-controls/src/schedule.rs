//! Day/night schedule for time-modulated pressure references.
//!
//! The schedule is data: a repeating period and a list of night windows
//! inside it. Everything outside a night window is day. Window boundaries
//! belong to the day side, so the exact start of a day segment is day and
//! the exact start of a night window is still day.

use pf_core::{SECONDS_PER_DAY, time_in_period};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Which pressure a time-modulated reference applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Day,
    Night,
}

/// Night interval within the schedule period, exclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub start_s: u64,
    pub end_s: u64,
}

impl NightWindow {
    fn contains(&self, tod: u64) -> bool {
        tod > self.start_s && tod < self.end_s
    }
}

/// Repeating day/night pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNightSchedule {
    /// Repeat length (seconds)
    pub period_s: u64,
    /// Night windows, sorted and non-overlapping
    pub night: Vec<NightWindow>,
}

impl Default for DayNightSchedule {
    /// Night from 01:00 to 05:00 every day.
    fn default() -> Self {
        Self {
            period_s: SECONDS_PER_DAY,
            night: vec![NightWindow {
                start_s: 3_600,
                end_s: 18_000,
            }],
        }
    }
}

impl DayNightSchedule {
    /// Create a validated schedule.
    pub fn new(period_s: u64, night: Vec<NightWindow>) -> ControlResult<Self> {
        let schedule = Self { period_s, night };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if self.period_s == 0 {
            return Err(ControlError::InvalidSchedule {
                what: "period must be positive".to_string(),
            });
        }
        for w in &self.night {
            if w.start_s >= w.end_s {
                return Err(ControlError::InvalidSchedule {
                    what: format!("window {}..{} is empty", w.start_s, w.end_s),
                });
            }
            if w.end_s > self.period_s {
                return Err(ControlError::InvalidSchedule {
                    what: format!(
                        "window {}..{} exceeds period {}",
                        w.start_s, w.end_s, self.period_s
                    ),
                });
            }
        }
        for pair in self.night.windows(2) {
            if pair[1].start_s < pair[0].end_s {
                return Err(ControlError::InvalidSchedule {
                    what: format!(
                        "windows starting at {} and {} overlap or are unsorted",
                        pair[0].start_s, pair[1].start_s
                    ),
                });
            }
        }
        Ok(())
    }

    /// Phase in effect at elapsed simulated time `t_s`.
    pub fn phase_at(&self, t_s: u64) -> Phase {
        let tod = time_in_period(t_s, self.period_s);
        if self.night.iter().any(|w| w.contains(tod)) {
            Phase::Night
        } else {
            Phase::Day
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_night_is_one_to_five() {
        let s = DayNightSchedule::default();
        assert_eq!(s.phase_at(0), Phase::Day);
        assert_eq!(s.phase_at(3_600), Phase::Day);
        assert_eq!(s.phase_at(3_601), Phase::Night);
        assert_eq!(s.phase_at(17_999), Phase::Night);
        assert_eq!(s.phase_at(18_000), Phase::Day);
    }

    #[test]
    fn pattern_repeats_each_period() {
        let s = DayNightSchedule::default();
        for day in 0..7 {
            let base = day * SECONDS_PER_DAY;
            assert_eq!(s.phase_at(base + 7_200), Phase::Night);
            assert_eq!(s.phase_at(base + 43_200), Phase::Day);
        }
    }

    #[test]
    fn rejects_bad_windows() {
        let empty = NightWindow {
            start_s: 10,
            end_s: 10,
        };
        assert!(DayNightSchedule::new(100, vec![empty]).is_err());

        let outside = NightWindow {
            start_s: 10,
            end_s: 200,
        };
        assert!(DayNightSchedule::new(100, vec![outside]).is_err());

        let a = NightWindow {
            start_s: 10,
            end_s: 50,
        };
        let b = NightWindow {
            start_s: 40,
            end_s: 60,
        };
        assert!(DayNightSchedule::new(100, vec![a, b]).is_err());
        assert!(DayNightSchedule::new(0, vec![]).is_err());
    }
}
