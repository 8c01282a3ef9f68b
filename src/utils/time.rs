//! Time utility functions

use std::time::{Duration, Instant};

/// Convert duration to whole milliseconds, saturating at `u64::MAX`
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Milliseconds elapsed since `start`
pub fn elapsed_ms(start: Instant) -> u64 {
    duration_to_ms(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_ms_truncates() {
        assert_eq!(duration_to_ms(Duration::from_micros(2_999)), 2);
        assert_eq!(duration_to_ms(Duration::ZERO), 0);
    }

    #[test]
    fn test_elapsed_ms_tracks_wall_clock() {
        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(15));
        assert!(elapsed_ms(start) >= 15);
    }
}
