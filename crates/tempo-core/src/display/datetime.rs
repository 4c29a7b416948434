//! Date, time and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats a number of seconds as a study duration, e.g. `1h 05m` or `42m`.
///
/// Seconds are rounded up to whole minutes.
///
/// ```rust
/// use tempo_core::display::StudyDuration;
///
/// assert_eq!(StudyDuration(2520).to_string(), "42m");
/// assert_eq!(StudyDuration(3900).to_string(), "1h 05m");
/// assert_eq!(StudyDuration(61).to_string(), "2m");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudyDuration(pub u64);

impl fmt::Display for StudyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.div_ceil(60);
        match (minutes / 60, minutes % 60) {
            (0, m) => write!(f, "{m}m"),
            (h, m) => write!(f, "{h}h {m:02}m"),
        }
    }
}
