//! Simulated-time helpers.
//!
//! Simulated time is an integer number of seconds since the start of a run.

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Format elapsed seconds as `H:MM:SS`. Hours are not wrapped at 24.
pub fn format_clock(t_s: u64) -> String {
    let hours = t_s / 3600;
    let minutes = (t_s % 3600) / 60;
    let seconds = t_s % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Position of `t_s` within a repeating period.
pub fn time_in_period(t_s: u64, period_s: u64) -> u64 {
    if period_s == 0 { t_s } else { t_s % period_s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "0:00:00");
        assert_eq!(format_clock(3661), "1:01:01");
        assert_eq!(format_clock(90_000), "25:00:00");
    }

    #[test]
    fn period_wraps() {
        assert_eq!(time_in_period(90_000, SECONDS_PER_DAY), 3600);
        assert_eq!(time_in_period(42, 0), 42);
    }
}
