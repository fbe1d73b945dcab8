//! Remaining words and reading speed to a display label.

/// Seconds needed to read `remaining_words` at `words_per_minute`.
///
/// Saturates to zero for a non-positive or non-finite speed.
pub fn seconds_left(remaining_words: u64, words_per_minute: f64) -> u64 {
    if !(words_per_minute > 0.0) || !words_per_minute.is_finite() {
        return 0;
    }
    let words_per_second = words_per_minute / 60.0;
    (remaining_words as f64 / words_per_second).floor() as u64
}

/// Renders `seconds_left` as `"5m, 40s left"`, or `"6 minutes left"` when
/// `minutes_only` is set.
pub fn format_label(seconds_left: u64, minutes_only: bool) -> String {
    if minutes_only {
        let minutes = (seconds_left as f64 / 60.0).round() as u64;
        return match minutes {
            0 => "seconds left".to_string(),
            1 => "1 minute left".to_string(),
            n => format!("{n} minutes left"),
        };
    }
    let minutes = seconds_left / 60;
    let seconds = seconds_left % 60;
    format!("{minutes}m, {seconds}s left")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_floored() {
        assert_eq!(seconds_left(100, 200.0), 30);
        assert_eq!(seconds_left(7, 200.0), 2);
        assert_eq!(seconds_left(0, 200.0), 0);
    }

    #[test]
    fn zero_or_invalid_speed_saturates_to_zero() {
        assert_eq!(seconds_left(500, 0.0), 0);
        assert_eq!(seconds_left(500, -3.0), 0);
        assert_eq!(seconds_left(500, f64::NAN), 0);
    }

    #[test]
    fn seconds_are_never_negative_across_inputs() {
        for words in [0u64, 1, 59, 1_000, 250_000] {
            for wpm in [1.0, 20.0, 199.5, 1200.0] {
                let secs = seconds_left(words, wpm);
                assert_eq!(secs, (words as f64 / (wpm / 60.0)).floor() as u64);
            }
        }
    }

    #[test]
    fn default_format_shows_minutes_and_seconds() {
        assert_eq!(format_label(340, false), "5m, 40s left");
        assert_eq!(format_label(0, false), "0m, 0s left");
    }

    #[test]
    fn minutes_only_rounds_to_nearest_minute() {
        assert_eq!(format_label(340, true), "6 minutes left");
        assert_eq!(format_label(30, true), "1 minute left");
        assert_eq!(format_label(10, true), "seconds left");
    }
}
